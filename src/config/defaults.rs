pub const DEFAULT_API_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

pub fn default_request_timeout() -> u64 {
    60
}

pub fn example_config() -> &'static str {
    r#"# Minimalist Lens configuration
api:
  # endpoint: https://generativelanguage.googleapis.com/v1beta/models
  api_key: ${GEMINI_API_KEY}
  request_timeout: 60
model:
  default_model: gemini-3-flash-preview
session:
  verbose: false
  # data_dir: ~/.local/share/minimalist-lens
  # language: zh
"#
}
