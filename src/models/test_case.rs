use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::TestStep;

/// Fila de parámetros: nombre -> valor, en el orden del documento
pub type DataRow = IndexMap<String, String>;

/// Caso de prueba tal como lo entrega el plan de pruebas
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: i64,
    pub title: String,
    pub order: i32,
    pub plan_id: i64,
    pub plan_name: Option<String>,
    pub suite_id: i64,
    pub suite_name: Option<String>,
    pub project_name: Option<String>,
    pub state: Option<String>,
    pub priority: Option<i32>,
    pub configurations: Vec<String>,
    pub steps: Vec<TestStep>,
    pub data_rows: Vec<DataRow>,
}

impl TestCase {
    /// Agrega una configuración ignorando nombres vacíos
    pub fn add_configuration(&mut self, name: Option<String>) {
        if let Some(name) = name {
            if !name.trim().is_empty() {
                self.configurations.push(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_configurations_are_dropped() {
        let mut test_case = TestCase::default();
        test_case.add_configuration(Some("Windows 10, Chrome".to_string()));
        test_case.add_configuration(Some("   ".to_string()));
        test_case.add_configuration(None);
        test_case.add_configuration(Some(String::new()));

        assert_eq!(test_case.configurations, vec!["Windows 10, Chrome"]);
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let test_case = TestCase {
            id: 7,
            plan_id: 3,
            ..Default::default()
        };
        let json = serde_json::to_value(&test_case).unwrap();

        assert_eq!(json["planId"], 3);
        assert!(json["planName"].is_null());
        assert!(json["dataRows"].as_array().unwrap().is_empty());
    }
}
