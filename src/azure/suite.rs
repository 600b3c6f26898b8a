use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::azure::assembler::assemble;
use crate::error::{HarnessError, Result};
use crate::models::TestCase;

/// Qué hacer con un elemento cuyo XML incrustado no se puede interpretar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPolicy {
    /// Un caso corrupto invalida toda la suite
    #[default]
    FailFast,
    /// El caso corrupto se registra y se omite
    SkipInvalid,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SuiteLoader {
    policy: LoadPolicy,
}

impl SuiteLoader {
    pub fn with_policy(policy: LoadPolicy) -> Self {
        SuiteLoader { policy }
    }

    /// Convierte la respuesta del endpoint de casos de prueba en la lista
    /// ordenada de casos. No reordena ni elimina duplicados.
    pub fn load(&self, raw_json: &str) -> Result<Vec<TestCase>> {
        let root: Value = serde_json::from_str(raw_json)
            .map_err(|e| HarnessError::Protocol(format!("la respuesta no es JSON válido: {}", e)))?;

        let entries = match root {
            Value::Array(entries) => entries,
            other => {
                return Err(HarnessError::Protocol(format!(
                    "se esperaba un arreglo JSON y se recibió {}",
                    json_kind(&other)
                )))
            }
        };

        let mut test_cases = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match assemble(entry) {
                Ok(Some(test_case)) => test_cases.push(test_case),
                Ok(None) => warn!("elemento {} sin workItem válido, se omite", index),
                Err(err) => match self.policy {
                    LoadPolicy::FailFast => return Err(HarnessError::from_field(index, err)),
                    LoadPolicy::SkipInvalid => {
                        warn!("elemento {} omitido: {}", index, err)
                    }
                },
            }
        }

        info!(
            "{} casos de prueba cargados de {} elementos",
            test_cases.len(),
            entries.len()
        );
        Ok(test_cases)
    }
}

/// Carga la suite con la política por defecto (falla ante el primer caso corrupto)
pub fn load_suite(raw_json: &str) -> Result<Vec<TestCase>> {
    SuiteLoader::default().load(raw_json)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "un booleano",
        Value::Number(_) => "un número",
        Value::String(_) => "un texto",
        Value::Array(_) => "un arreglo",
        Value::Object(_) => "un objeto",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LOGIN_STEPS: &str = r#"<steps><step id=\"1\" type=\"ActionStep\"><parameterizedString>&lt;P&gt;Open app&lt;/P&gt;</parameterizedString><parameterizedString>&lt;P&gt;App opens&lt;/P&gt;</parameterizedString></step></steps>"#;

    #[test]
    fn loads_login_scenario() {
        let raw = format!(
            r#"[{{"workItem": {{"id": 101, "name": "Login Test", "workItemFields": [{{"Microsoft.VSTS.TCM.Steps": "{}"}}]}}}}]"#,
            LOGIN_STEPS
        );

        let test_cases = load_suite(&raw).unwrap();

        assert_eq!(test_cases.len(), 1);
        assert_eq!(test_cases[0].id, 101);
        assert_eq!(test_cases[0].title, "Login Test");
        assert_eq!(test_cases[0].steps.len(), 1);
        assert_eq!(test_cases[0].steps[0].action, "Open app");
        assert_eq!(test_cases[0].steps[0].expected, "App opens");
    }

    #[test]
    fn top_level_object_is_a_protocol_error() {
        let err = load_suite(r#"{"value": []}"#).unwrap_err();
        assert!(matches!(err, HarnessError::Protocol(_)));
    }

    #[test]
    fn invalid_json_is_a_protocol_error() {
        assert!(matches!(load_suite("<html>"), Err(HarnessError::Protocol(_))));
    }

    #[test]
    fn keeps_order_and_duplicates_and_skips_missing_work_items() {
        let raw = r#"[
            {"workItem": {"id": 3, "name": "c"}},
            {"order": 9},
            {"workItem": {"id": 1, "name": "a"}},
            {"workItem": {"id": 3, "name": "c otra vez"}}
        ]"#;

        let titles: Vec<String> = load_suite(raw).unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["c", "a", "c otra vez"]);
    }

    #[test]
    fn malformed_steps_abort_the_load() {
        let raw = r#"[
            {"workItem": {"id": 1, "name": "ok"}},
            {"workItem": {"id": 2, "workItemFields": [{"Microsoft.VSTS.TCM.Steps": "<steps><step id=\"1\">"}]}}
        ]"#;

        match load_suite(raw).unwrap_err() {
            HarnessError::Parse {
                index,
                test_case_id,
                field,
                ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(test_case_id, 2);
                assert_eq!(field, "Microsoft.VSTS.TCM.Steps");
            }
            other => panic!("error inesperado: {other}"),
        }
    }

    #[test]
    fn skip_policy_drops_only_the_corrupt_case() {
        let raw = r#"[
            {"workItem": {"id": 1, "name": "ok"}},
            {"workItem": {"id": 2, "workItemFields": [{"Microsoft.VSTS.TCM.Steps": "<steps><step id=\"1\">"}]}},
            {"workItem": {"id": 3, "name": "también"}}
        ]"#;

        let ids: Vec<i64> = SuiteLoader::with_policy(LoadPolicy::SkipInvalid)
            .load(raw)
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn empty_array_is_an_empty_suite() {
        assert!(load_suite("[]").unwrap().is_empty());
    }
}
