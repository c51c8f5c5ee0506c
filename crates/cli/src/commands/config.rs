use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use storefront_core::config::{AppConfig, LoadOptions};
use storefront_core::errors::ApplicationError;
use toml::Value;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

#[derive(Debug, Serialize)]
struct ConfigReport {
    precedence: &'static str,
    entries: Vec<ConfigEntry>,
}

pub fn run(options: &LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options.clone()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::from_application_error(
                "config",
                ApplicationError::Configuration(format!("configuration issue: {error}")),
            );
        }
    };

    let config_file_path = detect_config_path(options.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let entries = vec![
        ConfigEntry {
            key: "recommender.max_results",
            value: config.recommender.max_results.to_string(),
            source: source("recommender.max_results", &["STOREFRONT_RECOMMENDER_MAX_RESULTS"]),
        },
        ConfigEntry {
            key: "data.catalog_path",
            value: display_path(config.data.catalog_path.as_deref(), "<builtin inventory>"),
            source: source("data.catalog_path", &["STOREFRONT_DATA_CATALOG_PATH"]),
        },
        ConfigEntry {
            key: "data.orders_path",
            value: display_path(config.data.orders_path.as_deref(), "<no order history>"),
            source: source("data.orders_path", &["STOREFRONT_DATA_ORDERS_PATH"]),
        },
        ConfigEntry {
            key: "logging.level",
            value: config.logging.level.clone(),
            source: source("logging.level", &["STOREFRONT_LOGGING_LEVEL", "STOREFRONT_LOG_LEVEL"]),
        },
        ConfigEntry {
            key: "logging.format",
            value: format!("{:?}", config.logging.format),
            source: source(
                "logging.format",
                &["STOREFRONT_LOGGING_FORMAT", "STOREFRONT_LOG_FORMAT"],
            ),
        },
    ];

    CommandResult::success(
        "config",
        ConfigReport { precedence: "override > env > file > default", entries },
    )
}

fn detect_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }

    let root = PathBuf::from("storefront.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/storefront.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

/// The first env key set wins, matching the loader's alias order.
fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn display_path(path: Option<&Path>, unset: &str) -> String {
    path.map(|path| path.display().to_string()).unwrap_or_else(|| unset.to_string())
}

#[cfg(test)]
mod tests {
    use toml::Value;

    use super::{contains_path, field_source};

    #[test]
    fn nested_keys_are_found_in_file_doc() {
        let doc: Value = "[recommender]\nmax_results = 4\n".parse().expect("toml");

        assert!(contains_path(&doc, "recommender.max_results"));
        assert!(!contains_path(&doc, "data.catalog_path"));
    }

    #[test]
    fn source_falls_back_to_default() {
        let doc: Value = "[logging]\nlevel = \"warn\"\n".parse().expect("toml");

        assert_eq!(
            field_source("logging.level", &["STOREFRONT_TEST_UNSET_KEY"], Some(&doc), None),
            "file (config file)"
        );
        assert_eq!(
            field_source("data.orders_path", &["STOREFRONT_TEST_UNSET_KEY"], Some(&doc), None),
            "default"
        );
    }
}
