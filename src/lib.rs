//! Ejecución de casos de prueba por palabras clave a partir de los planes de
//! prueba de Azure DevOps.
//!
//! El núcleo convierte la respuesta JSON del endpoint de casos de prueba (con
//! XML y HTML escapados en su interior) en una lista ordenada de
//! [`models::TestCase`] con sus pasos y filas de datos.

pub mod azure;
pub mod commands;
pub mod config;
pub mod error;
pub mod keywords;
pub mod models;
pub mod parser;
pub mod utils;

pub use error::{HarnessError, Result};
