use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::models::TestStatus;
use crate::utils::{save_to_csv, save_to_markdown};

/// Resultado de ejecutar un paso con una fila de datos
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StepResult {
    pub test_case_id: i64,
    pub title: String,
    pub data_row: usize,
    pub step_id: i32,
    pub keyword: String,
    pub status: TestStatus,
    pub message: String,
}

/// Informe de una ejecución. Se crea una vez, acumula resultados y se vuelca
/// a disco explícitamente con [`ExecutionReport::flush`].
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub name: String,
    pub run_id: Uuid,
    pub started_at: DateTime<Local>,
    pub results: Vec<StepResult>,
}

impl ExecutionReport {
    pub fn new(name: impl Into<String>) -> Self {
        ExecutionReport {
            name: name.into(),
            run_id: Uuid::new_v4(),
            started_at: Local::now(),
            results: Vec::new(),
        }
    }

    pub fn record(&mut self, result: StepResult) {
        self.results.push(result);
    }

    pub fn count(&self, status: TestStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.status.is_failure())
    }

    /// Escribe el informe en `dir` como CSV y Markdown y devuelve ambas rutas
    pub fn flush(&self, dir: &Path) -> Result<(PathBuf, PathBuf)> {
        std::fs::create_dir_all(dir)?;

        let timestamp = self.started_at.format("%Y%m%d_%H%M%S");
        let execution_name = format!("{}-{}", self.name, timestamp);
        let csv_path = dir.join(format!("{}.csv", execution_name));
        let md_path = dir.join(format!("{}.md", execution_name));

        save_to_csv(&csv_path, &self.results)?;
        save_to_markdown(&md_path, self)?;

        info!(
            "informe {} guardado en {} y {}",
            self.run_id,
            csv_path.display(),
            md_path.display()
        );
        Ok((csv_path, md_path))
    }
}
