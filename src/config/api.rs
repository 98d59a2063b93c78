use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    /// May reference an environment variable as `${NAME}`.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub request_timeout: Option<u64>,
}
