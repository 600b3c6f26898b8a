use std::path::{Path, PathBuf};

use colored::*;

use crate::azure::{AzureDevOpsClient, LoadPolicy, SuiteLoader};
use crate::config::HarnessConfig;
use crate::error::Result;
use crate::utils::{save_definition, DEFINITIONS_DIR};

/// Descarga la suite configurada y la guarda como definición
pub fn fetch_suite(config: &HarnessConfig, policy: LoadPolicy) -> Result<PathBuf> {
    let client = AzureDevOpsClient::new(&config.azure)?;

    println!(
        "{}",
        format!(
            "Descargando casos de prueba del plan {} / suite {}...",
            client.plan_id(),
            client.suite_id()
        )
        .blue()
    );
    let raw = client.fetch_suite_json()?;

    // Se valida antes de guardar para no dejar definiciones corruptas
    let test_cases = SuiteLoader::with_policy(policy).load(&raw)?;

    let path = Path::new(DEFINITIONS_DIR).join(definition_name(client.plan_id(), client.suite_id()));
    save_definition(&path, &raw)?;

    let steps: usize = test_cases.iter().map(|tc| tc.steps.len()).sum();
    println!(
        "{}",
        format!(
            "{} casos de prueba ({} pasos) guardados en {}",
            test_cases.len(),
            steps,
            path.display()
        )
        .green()
    );

    Ok(path)
}

pub fn definition_name(plan_id: i64, suite_id: i64) -> String {
    format!("plan{}-suite{}.json", plan_id, suite_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_definition_after_plan_and_suite() {
        assert_eq!(definition_name(12, 34), "plan12-suite34.json");
    }
}
