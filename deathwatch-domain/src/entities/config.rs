// Runtime configuration handed to the application layer

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub log_file_path: PathBuf,
    pub state_path: PathBuf,
    pub events_path: PathBuf,
    pub scan_interval_seconds: u64,
    pub scan_on_startup: bool,
    pub request_timeout_seconds: u64,
}

impl RuntimeConfig {
    /// Defaults for a log and data directory, used by embedders and tests.
    pub fn for_paths(log_file_path: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            api_token: None,
            log_file_path: log_file_path.into(),
            state_path: data_dir.join(STATE_FILE_NAME),
            events_path: data_dir.join(EVENTS_FILE_NAME),
            scan_interval_seconds: 0,
            scan_on_startup: false,
            request_timeout_seconds: 15,
        }
    }
}

pub const STATE_FILE_NAME: &str = "scanner-state.json";
pub const EVENTS_FILE_NAME: &str = "deaths.json";
