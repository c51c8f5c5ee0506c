pub mod catalog;
pub mod config;
pub mod recommend;
pub mod sales;

use serde::Serialize;
use storefront_core::config::{AppConfig, LoadOptions};
use storefront_core::errors::ApplicationError;

use crate::SnapshotArgs;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl CommandResult {
    pub fn success(command: &str, data: impl Serialize) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), 5);
            }
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: None,
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: Some(message.into()),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_application_error(command: &str, error: ApplicationError) -> Self {
        let exit_code = match error {
            ApplicationError::Configuration(_) => 2,
            ApplicationError::Input(_) => 3,
            ApplicationError::Domain(_) => 4,
        };
        Self::failure(command, error.error_class(), error.to_string(), exit_code)
    }
}

/// Loads config with the snapshot paths from the command line layered on top.
pub(crate) fn load_config(
    options: &LoadOptions,
    snapshot: &SnapshotArgs,
    max_results: Option<usize>,
) -> Result<AppConfig, ApplicationError> {
    let mut options = options.clone();
    if let Some(max_results) = max_results {
        options.overrides.max_results = Some(max_results);
    }
    if let Some(catalog_path) = &snapshot.catalog {
        options.overrides.catalog_path = Some(catalog_path.clone());
    }
    if let Some(orders_path) = &snapshot.orders {
        options.overrides.orders_path = Some(orders_path.clone());
    }

    AppConfig::load(options)
        .map_err(|error| ApplicationError::Configuration(format!("configuration issue: {error}")))
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

#[cfg(test)]
mod tests {
    use storefront_core::errors::{ApplicationError, DomainError};
    use storefront_core::ProductId;

    use super::CommandResult;

    #[test]
    fn failure_payload_carries_error_class() {
        let result = CommandResult::failure("recommend", "input", "bad file", 3);
        let payload: serde_json::Value =
            serde_json::from_str(&result.output).expect("failure output is json");

        assert_eq!(result.exit_code, 3);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "input");
        assert!(payload.get("data").is_none());
    }

    #[test]
    fn domain_errors_exit_with_code_four() {
        let result = CommandResult::from_application_error(
            "sales",
            ApplicationError::Domain(DomainError::UnknownProduct(ProductId(3))),
        );

        assert_eq!(result.exit_code, 4);
        assert!(result.output.contains("domain_validation"));
    }
}
