use std::path::Path;

use colored::*;
use log::info;

use crate::azure::{AzureDevOpsClient, LoadPolicy};
use crate::commands::load_from_definition;
use crate::config::HarnessConfig;
use crate::error::Result;
use crate::keywords::{extract_keyword, step_result, KeywordContext, KeywordExecutor};
use crate::models::{DataRow, ExecutionReport, TestCase, TestStatus};

/// Ejecuta una definición guardada o, sin archivo, la suite configurada en Azure
pub fn execute_test_cases(
    file_path: Option<&Path>,
    config: &HarnessConfig,
    policy: LoadPolicy,
) -> Result<ExecutionReport> {
    let (base_name, test_cases) = match file_path {
        Some(path) => {
            let base_name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("test_cases")
                .to_string();
            (base_name, load_from_definition(path, policy)?)
        }
        None => {
            let client = AzureDevOpsClient::new(&config.azure)?;
            let base_name = format!("plan{}-suite{}", client.plan_id(), client.suite_id());
            (base_name, client.load_test_cases(policy)?)
        }
    };

    let mut report = ExecutionReport::new(base_name);

    if test_cases.is_empty() {
        println!("{}", "No hay casos de prueba para ejecutar.".yellow());
        return Ok(report);
    }

    let executor = KeywordExecutor::with_builtins();
    run_test_cases(&test_cases, &executor, &mut report);

    let (csv_path, md_path) = report.flush(&config.report.dir)?;
    println!(
        "{}",
        format!(
            "Ejecución completada y guardada en {} y {}",
            csv_path.display(),
            md_path.display()
        )
        .green()
    );

    Ok(report)
}

/// Recorre cada caso, fila de datos y paso, en orden.
///
/// Sin filas de datos los pasos se ejecutan una vez con una fila vacía. Cuando
/// un paso falla, el resto de pasos del caso (en esa fila y en las
/// siguientes) se registran como bloqueados.
pub fn run_test_cases(
    test_cases: &[TestCase],
    executor: &KeywordExecutor,
    report: &mut ExecutionReport,
) {
    let empty_rows = vec![DataRow::new()];

    for (i, test_case) in test_cases.iter().enumerate() {
        println!(
            "{}",
            format!(
                "Caso de prueba #{}: {} (ID: {})",
                i + 1,
                test_case.title,
                test_case.id
            )
            .blue()
        );

        let rows = if test_case.data_rows.is_empty() {
            &empty_rows
        } else {
            &test_case.data_rows
        };

        let mut blocked_by: Option<String> = None;
        for (row_index, row) in rows.iter().enumerate() {
            info!("caso {} fila {}: {:?}", test_case.id, row_index + 1, row);

            for step in &test_case.steps {
                let keyword = extract_keyword(&step.action);
                let ctx = KeywordContext {
                    test_case,
                    step,
                    data_row: row,
                    data_row_index: row_index,
                };

                if let Some(failed_keyword) = &blocked_by {
                    let message = format!("Bloqueado por el fallo de '{}'", failed_keyword);
                    report.record(step_result(&keyword, &ctx, TestStatus::Blocked, &message));
                    continue;
                }

                match executor.execute(&keyword, &ctx, report) {
                    Ok(status) => println!("  Paso {} [{}]: {}", step.id, keyword, status),
                    Err(err) => {
                        println!("{}", format!("  Paso {} [{}]: {}", step.id, keyword, err).red());
                        blocked_by = Some(keyword.clone());
                    }
                }
            }
        }
    }
}
