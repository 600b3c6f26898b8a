//! Ejecución de pasos por palabra clave.
//!
//! La primera palabra de la acción de un paso indica qué manejador lo ejecuta.
//! Las palabras clave no registradas se omiten y quedan en el informe.

pub mod api_get;

use std::collections::HashMap;

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Captures, Regex};
use thiserror::Error;

use crate::error::{HarnessError, Result};
use crate::models::{DataRow, ExecutionReport, StepResult, TestCase, TestStatus, TestStep};

pub use api_get::ApiGetKeyword;

lazy_static! {
    static ref PARAMETER: Regex = Regex::new(r"@([A-Za-z_][A-Za-z0-9_]*)").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
}

#[derive(Error, Debug)]
pub enum KeywordError {
    #[error("{0}")]
    Failed(String),

    #[error("error HTTP: {0}")]
    Http(#[from] reqwest::Error),
}

/// Datos disponibles para un manejador durante un paso
pub struct KeywordContext<'a> {
    pub test_case: &'a TestCase,
    pub step: &'a TestStep,
    pub data_row: &'a DataRow,
    pub data_row_index: usize,
}

impl KeywordContext<'_> {
    /// Acción del paso con los parámetros `@nombre` ya sustituidos
    pub fn action(&self) -> String {
        substitute_parameters(&self.step.action, self.data_row)
    }

    pub fn expected(&self) -> String {
        substitute_parameters(&self.step.expected, self.data_row)
    }

    /// Argumentos de la acción, sin la palabra clave
    pub fn arguments(&self) -> Vec<String> {
        self.action()
            .split_whitespace()
            .skip(1)
            .map(str::to_string)
            .collect()
    }
}

pub trait KeywordHandler {
    /// Ejecuta el paso y devuelve un detalle breve para el informe
    fn execute(&self, ctx: &KeywordContext<'_>) -> std::result::Result<String, KeywordError>;
}

#[derive(Default)]
pub struct KeywordExecutor {
    handlers: HashMap<String, Box<dyn KeywordHandler>>,
}

impl KeywordExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ejecutor con las palabras clave incluidas (`API_GET`)
    pub fn with_builtins() -> Self {
        let mut executor = Self::new();
        executor.register("API_GET", ApiGetKeyword::new());
        executor
    }

    pub fn register(&mut self, keyword: &str, handler: impl KeywordHandler + 'static) {
        self.handlers
            .insert(keyword.to_uppercase(), Box::new(handler));
    }

    pub fn is_registered(&self, keyword: &str) -> bool {
        self.handlers.contains_key(&keyword.to_uppercase())
    }

    /// Ejecuta un paso y registra el resultado en `report`.
    ///
    /// Una palabra clave vacía o sin manejador se registra como omitida y no
    /// es un error. Si el manejador falla el paso queda rechazado y el error
    /// se devuelve al llamador.
    pub fn execute(
        &self,
        keyword: &str,
        ctx: &KeywordContext<'_>,
        report: &mut ExecutionReport,
    ) -> Result<TestStatus> {
        let (status, message) = if keyword.trim().is_empty() {
            warn!("paso {} sin palabra clave", ctx.step.id);
            (
                TestStatus::Skipped,
                format!("No se encontró palabra clave para el paso {}", ctx.step.id),
            )
        } else {
            match self.handlers.get(&keyword.to_uppercase()) {
                None => {
                    warn!("palabra clave '{}' no registrada, se omite el paso", keyword);
                    (
                        TestStatus::Skipped,
                        format!("No hay manejador registrado para '{}'", keyword),
                    )
                }
                Some(handler) => match handler.execute(ctx) {
                    Ok(detail) => {
                        debug!("'{}' ejecutada en el paso {}", keyword, ctx.step.id);
                        (TestStatus::Validated, detail)
                    }
                    Err(err) => {
                        let message = err.to_string();
                        report.record(step_result(keyword, ctx, TestStatus::Rejected, &message));
                        return Err(HarnessError::Keyword {
                            keyword: keyword.to_string(),
                            message,
                        });
                    }
                },
            }
        };

        report.record(step_result(keyword, ctx, status, &message));
        Ok(status)
    }
}

pub(crate) fn step_result(
    keyword: &str,
    ctx: &KeywordContext<'_>,
    status: TestStatus,
    message: &str,
) -> StepResult {
    StepResult {
        test_case_id: ctx.test_case.id,
        title: ctx.test_case.title.clone(),
        data_row: ctx.data_row_index,
        step_id: ctx.step.id,
        keyword: keyword.to_string(),
        status,
        message: message.to_string(),
    }
}

/// Primera palabra de la acción, sin etiquetas
pub fn extract_keyword(action: &str) -> String {
    let cleaned = TAG.replace_all(action, " ");
    cleaned
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Sustituye `@nombre` por el valor de la fila; los nombres desconocidos se dejan igual
pub fn substitute_parameters(text: &str, row: &DataRow) -> String {
    PARAMETER
        .replace_all(text, |caps: &Captures| match row.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
