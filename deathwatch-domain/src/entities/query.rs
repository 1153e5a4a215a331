use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct DeathQuery {
    pub player: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    pub mode: Option<String>,
}
