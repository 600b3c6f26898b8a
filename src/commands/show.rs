use std::path::Path;

use colored::*;

use crate::azure::LoadPolicy;
use crate::commands::load_from_definition;
use crate::error::Result;
use crate::models::TestCase;

/// Muestra los casos de prueba de una definición
pub fn show_test_cases(file_path: &Path, policy: LoadPolicy, as_json: bool) -> Result<()> {
    let test_cases = load_from_definition(file_path, policy)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&test_cases)?);
        return Ok(());
    }

    if test_cases.is_empty() {
        println!("{}", "No hay casos de prueba en la definición.".yellow());
        return Ok(());
    }

    for test_case in &test_cases {
        print_test_case(test_case);
    }

    Ok(())
}

fn print_test_case(test_case: &TestCase) {
    println!(
        "{}",
        format!("#{} {} (ID: {})", test_case.order, test_case.title, test_case.id)
            .blue()
            .bold()
    );

    let plan = test_case.plan_name.as_deref().unwrap_or("-");
    let suite = test_case.suite_name.as_deref().unwrap_or("-");
    println!(
        "  Plan: {} ({}) | Suite: {} ({})",
        plan, test_case.plan_id, suite, test_case.suite_id
    );
    if let Some(project) = &test_case.project_name {
        println!("  Proyecto: {}", project);
    }
    println!(
        "  Estado: {} | Prioridad: {}",
        test_case.state.as_deref().unwrap_or("-"),
        test_case
            .priority
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    if !test_case.configurations.is_empty() {
        println!("  Configuraciones: {}", test_case.configurations.join(", "));
    }

    for step in &test_case.steps {
        println!("  Paso {} [{}]", step.id, step.step_type);
        println!("    Acción   : {}", step.action.replace('\n', "\n               "));
        if !step.expected.is_empty() {
            println!("    Esperado : {}", step.expected.replace('\n', "\n               "));
        }
    }

    for (i, row) in test_case.data_rows.iter().enumerate() {
        let fields: Vec<String> = row.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        println!("  Fila {}: {}", i + 1, fields.join(", "));
    }

    println!();
}
