use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;

use crate::azure::suite::{LoadPolicy, SuiteLoader};
use crate::config::AzureConfig;
use crate::error::{HarnessError, Result};
use crate::models::TestCase;

/// Cliente del API de planes de prueba de Azure DevOps Server
pub struct AzureDevOpsClient {
    http: Client,
    project_url: String,
    plan_id: i64,
    suite_id: i64,
    api_version: String,
    auth_header: String,
}

impl AzureDevOpsClient {
    pub fn new(config: &AzureConfig) -> Result<Self> {
        let pat = config
            .pat
            .as_deref()
            .filter(|pat| !pat.trim().is_empty())
            .ok_or_else(|| {
                HarnessError::Config("falta el token de acceso (azure.pat o AZURE_PAT)".to_string())
            })?;
        let project_url = config
            .project_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| HarnessError::Config("falta azure.project_url".to_string()))?;
        if config.plan_id <= 0 || config.suite_id <= 0 {
            return Err(HarnessError::Config(format!(
                "azure.plan_id ({}) y azure.suite_id ({}) deben ser positivos",
                config.plan_id, config.suite_id
            )));
        }

        Ok(AzureDevOpsClient {
            http: Client::builder().build()?,
            project_url,
            plan_id: config.plan_id,
            suite_id: config.suite_id,
            api_version: config.api_version.clone(),
            auth_header: basic_auth_header(pat),
        })
    }

    pub fn plan_id(&self) -> i64 {
        self.plan_id
    }

    pub fn suite_id(&self) -> i64 {
        self.suite_id
    }

    pub fn suite_url(&self) -> String {
        format!(
            "{}/_apis/testplan/Plans/{}/Suites/{}/TestCase?api-version={}",
            self.project_url, self.plan_id, self.suite_id, self.api_version
        )
    }

    /// Descarga la respuesta cruda de la suite configurada
    pub fn fetch_suite_json(&self) -> Result<String> {
        let url = self.suite_url();
        info!("consultando {}", url);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if status != StatusCode::OK {
            return Err(HarnessError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!("{} bytes recibidos", body.len());
        Ok(body)
    }

    pub fn load_test_cases(&self, policy: LoadPolicy) -> Result<Vec<TestCase>> {
        let body = self.fetch_suite_json()?;
        SuiteLoader::with_policy(policy).load(&body)
    }
}

// Azure DevOps acepta el PAT como contraseña con usuario vacío
fn basic_auth_header(pat: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!(":{}", pat)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AzureConfig {
        AzureConfig {
            project_url: Some("https://devops.example.com/tfs/Banco/Pagos/".to_string()),
            plan_id: 12,
            suite_id: 34,
            api_version: "6.0".to_string(),
            pat: Some("secreto".to_string()),
        }
    }

    #[test]
    fn builds_suite_url() {
        let client = AzureDevOpsClient::new(&config()).unwrap();
        assert_eq!(
            client.suite_url(),
            "https://devops.example.com/tfs/Banco/Pagos/_apis/testplan/Plans/12/Suites/34/TestCase?api-version=6.0"
        );
    }

    #[test]
    fn auth_header_uses_empty_user() {
        // ":secreto" en base64
        assert_eq!(basic_auth_header("secreto"), "Basic OnNlY3JldG8=");
    }

    #[test]
    fn missing_pat_is_a_config_error() {
        let mut config = config();
        config.pat = None;
        assert!(matches!(
            AzureDevOpsClient::new(&config),
            Err(HarnessError::Config(_))
        ));
    }

    #[test]
    fn non_positive_ids_are_rejected() {
        let mut config = config();
        config.suite_id = 0;
        assert!(matches!(
            AzureDevOpsClient::new(&config),
            Err(HarnessError::Config(_))
        ));
    }
}
