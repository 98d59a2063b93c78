use minimalist_lens::cli::Args;
use minimalist_lens::config::{Config, JsonConfig, DEFAULT_API_ENDPOINT};
use minimalist_lens::models::Language;
use std::collections::HashMap;
use std::path::PathBuf;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

fn yaml(contents: &str) -> JsonConfig {
    serde_yaml::from_str(contents).unwrap()
}

#[test]
fn test_defaults_without_any_source() {
    let config = Config::resolve(&Args::default(), &JsonConfig::default(), env(&[])).unwrap();

    assert!(config.api_key.is_none());
    assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
    assert_eq!(config.model, "gemini-3-flash-preview");
    assert_eq!(config.request_timeout, 60);
    assert!(!config.verbose);
    assert!(config.language.is_none());
}

#[test]
fn test_args_override_env_and_file() {
    let file = yaml(
        "model:\n  default_model: file-model\napi:\n  endpoint: https://file.test/v1beta\n",
    );
    let args = Args {
        model: Some("arg-model".to_string()),
        api_endpoint: Some("https://arg.test/v1beta/".to_string()),
        ..Args::default()
    };
    let config = Config::resolve(
        &args,
        &file,
        env(&[("LENS_MODEL", "env-model"), ("LENS_API_ENDPOINT", "https://env.test")]),
    )
    .unwrap();

    assert_eq!(config.model, "arg-model");
    assert_eq!(config.api_endpoint, "https://arg.test/v1beta/models");
}

#[test]
fn test_env_overrides_file() {
    let file = yaml(
        "model:\n  default_model: file-model\napi:\n  request_timeout: 10\nsession:\n  verbose: false\n",
    );
    let config = Config::resolve(
        &Args::default(),
        &file,
        env(&[
            ("LENS_MODEL", "env-model"),
            ("LENS_TIMEOUT", "5"),
            ("LENS_VERBOSE", "yes"),
        ]),
    )
    .unwrap();

    assert_eq!(config.model, "env-model");
    assert_eq!(config.request_timeout, 5);
    assert!(config.verbose);
}

#[test]
fn test_file_api_key_expands_env_vars() {
    let file = yaml("api:\n  api_key: ${MY_GEMINI_KEY}\n");

    let config = Config::resolve(
        &Args::default(),
        &file,
        env(&[("MY_GEMINI_KEY", "from-file-var")]),
    )
    .unwrap();
    assert_eq!(config.api_key.as_deref(), Some("from-file-var"));

    // An unresolved reference is not a usable key
    let config = Config::resolve(&Args::default(), &file, env(&[])).unwrap();
    assert!(config.api_key.is_none());

    let config = Config::resolve(
        &Args::default(),
        &file,
        env(&[("GEMINI_API_KEY", "direct"), ("MY_GEMINI_KEY", "ignored")]),
    )
    .unwrap();
    assert_eq!(config.api_key.as_deref(), Some("direct"));
}

#[test]
fn test_language_and_data_dir() {
    let file = yaml("session:\n  language: en\n  data_dir: /tmp/lens-file\n");

    let config = Config::resolve(&Args::default(), &file, env(&[])).unwrap();
    assert_eq!(config.language, Some(Language::En));
    assert_eq!(config.data_dir, PathBuf::from("/tmp/lens-file"));

    let args = Args {
        lang: Some("zh".to_string()),
        ..Args::default()
    };
    let config = Config::resolve(&args, &file, env(&[("LENS_DATA_DIR", "/tmp/lens-env")])).unwrap();
    assert_eq!(config.language, Some(Language::Zh));
    assert_eq!(config.data_dir, PathBuf::from("/tmp/lens-env"));
}

#[test]
fn test_unknown_cli_language_is_an_error() {
    let args = Args {
        lang: Some("fr".to_string()),
        ..Args::default()
    };
    assert!(Config::resolve(&args, &JsonConfig::default(), env(&[])).is_err());
}

#[test]
fn test_example_config_parses() {
    let config: JsonConfig =
        serde_yaml::from_str(minimalist_lens::config::example_config()).unwrap();
    assert_eq!(
        config.model.default_model.as_deref(),
        Some("gemini-3-flash-preview")
    );
    assert_eq!(config.api.request_timeout, Some(60));
}
