pub mod execute;
pub mod fetch;
pub mod show;

pub use execute::*;
pub use fetch::*;
pub use show::*;

use std::fs;
use std::path::Path;

use crate::azure::{LoadPolicy, SuiteLoader};
use crate::error::Result;
use crate::models::TestCase;

/// Carga una definición guardada con `fetch`
pub fn load_from_definition(file_path: &Path, policy: LoadPolicy) -> Result<Vec<TestCase>> {
    let raw = fs::read_to_string(file_path)?;
    SuiteLoader::with_policy(policy).load(&raw)
}
