use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::azure::LoadPolicy;
use crate::error::Result;
use crate::utils::EXECUTIONS_DIR;

pub const DEFAULT_CONFIG_FILE: &str = "harness.toml";
pub const PAT_ENV_VAR: &str = "AZURE_PAT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub azure: AzureConfig,
    pub report: ReportConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AzureConfig {
    pub project_url: Option<String>,
    pub plan_id: i64,
    pub suite_id: i64,
    pub api_version: String,
    pub pat: Option<String>,
}

impl Default for AzureConfig {
    fn default() -> Self {
        AzureConfig {
            project_url: None,
            plan_id: 0,
            suite_id: 0,
            api_version: "6.0".to_string(),
            pat: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            dir: PathBuf::from(EXECUTIONS_DIR),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub policy: LoadPolicy,
}

impl HarnessConfig {
    /// Lee la configuración; si el archivo no existe se usan los valores por
    /// defecto. `AZURE_PAT` tiene prioridad sobre `azure.pat`.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            info!(
                "{} no existe, se usa la configuración por defecto",
                path.display()
            );
            HarnessConfig::default()
        };

        if let Ok(pat) = std::env::var(PAT_ENV_VAR) {
            config.azure.pat = Some(pat);
        }

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_full_file() {
        let config = HarnessConfig::parse(
            r#"
            [azure]
            project_url = "https://dev.azure.com/banco/Pagos"
            plan_id = 12
            suite_id = 34
            api_version = "7.1"
            pat = "abc"

            [report]
            dir = "informes"

            [load]
            policy = "skip-invalid"
            "#,
        )
        .unwrap();

        assert_eq!(config.azure.plan_id, 12);
        assert_eq!(config.azure.suite_id, 34);
        assert_eq!(config.azure.api_version, "7.1");
        assert_eq!(config.azure.pat.as_deref(), Some("abc"));
        assert_eq!(config.report.dir, PathBuf::from("informes"));
        assert_eq!(config.load.policy, LoadPolicy::SkipInvalid);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let config = HarnessConfig::parse("[azure]\nplan_id = 1\n").unwrap();

        assert_eq!(config.azure.api_version, "6.0");
        assert_eq!(config.azure.suite_id, 0);
        assert_eq!(config.report.dir, PathBuf::from(EXECUTIONS_DIR));
        assert_eq!(config.load.policy, LoadPolicy::FailFast);
    }

    #[test]
    fn unknown_policy_is_an_error() {
        assert!(HarnessConfig::parse("[load]\npolicy = \"retry\"\n").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = HarnessConfig::load(&dir.path().join("harness.toml")).unwrap();
        assert_eq!(config.azure.plan_id, 0);
    }
}
