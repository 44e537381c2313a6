use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GENERATED_FILE_NAME: &str = "generated.proto";
pub const DEFAULT_SERVICE_SUFFIX: &str = "Service";

/// Naming conventions used when deriving import locators and service names.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrConfig {
  /// File name appended to a package path to form its import locator.
  pub generated_file_name: String,

  /// Suffix appended to the last package name segment to form the service name.
  pub service_suffix: String,
}

impl Default for IrConfig {
  fn default() -> Self {
    Self {
      generated_file_name: DEFAULT_GENERATED_FILE_NAME.to_string(),
      service_suffix: DEFAULT_SERVICE_SUFFIX.to_string(),
    }
  }
}

impl IrConfig {
  pub fn from_yaml(input: &str) -> Result<Self> {
    let config: IrConfig = serde_yaml::from_str(input)?;
    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_yaml_keeps_defaults() {
    let config = IrConfig::from_yaml("service_suffix: Api\n").unwrap();
    assert_eq!(config.service_suffix, "Api");
    assert_eq!(config.generated_file_name, DEFAULT_GENERATED_FILE_NAME);
  }

  #[test]
  fn full_yaml() {
    let config =
      IrConfig::from_yaml("generated_file_name: schema.proto\nservice_suffix: Rpc\n").unwrap();
    assert_eq!(config.generated_file_name, "schema.proto");
    assert_eq!(config.service_suffix, "Rpc");
  }

  #[test]
  fn malformed_yaml_is_an_error() {
    assert!(IrConfig::from_yaml("service_suffix: [").is_err());
  }
}
