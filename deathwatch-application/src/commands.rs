pub mod refresh_commands;
