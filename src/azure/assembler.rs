use log::{debug, warn};
use serde_json::Value;

use crate::azure::fields::{
    value_as_i32, value_as_i64, value_as_priority, value_as_text, FieldResolver,
    LOCAL_DATA_SOURCE, PRIORITY, STEPS, SYSTEM_STATE, SYSTEM_TITLE,
};
use crate::error::FieldError;
use crate::models::TestCase;
use crate::parser::{parse_data_source, parse_steps};

/// Construye un [`TestCase`] a partir de un elemento de la respuesta del plan.
///
/// Devuelve `Ok(None)` cuando el elemento no trae `workItem` o éste no tiene
/// un `id` positivo (numérico o texto con un entero); el llamador lo omite. Un XML de pasos o de datos mal
/// formado invalida el caso completo.
pub fn assemble(entry: &Value) -> Result<Option<TestCase>, FieldError> {
    let work_item = match entry.get("workItem").filter(|w| w.is_object()) {
        Some(work_item) => work_item,
        None => return Ok(None),
    };

    let id = match work_item.get("id").and_then(value_as_i64) {
        Some(id) if id > 0 => id,
        _ => {
            warn!("workItem sin id válido: {:?}", work_item.get("id"));
            return Ok(None);
        }
    };
    let name = work_item
        .get("name")
        .and_then(value_as_text)
        .unwrap_or_default();

    let no_fields = Vec::new();
    let fields: &[Value] = work_item
        .get("workItemFields")
        .and_then(Value::as_array)
        .unwrap_or(&no_fields);

    let mut test_case = TestCase {
        id,
        title: resolve_title(fields).unwrap_or(name),
        order: entry.get("order").and_then(value_as_i32).unwrap_or(0),
        plan_id: nested_id(entry, "testPlan"),
        plan_name: nested_name(entry, "testPlan"),
        suite_id: nested_id(entry, "testSuite"),
        suite_name: nested_name(entry, "testSuite"),
        project_name: nested_name(entry, "project"),
        state: fields.resolve(SYSTEM_STATE).and_then(value_as_text),
        priority: fields.resolve(PRIORITY).and_then(value_as_priority),
        ..Default::default()
    };

    if let Some(assignments) = entry.get("pointAssignments").and_then(Value::as_array) {
        for assignment in assignments {
            test_case.add_configuration(assignment.get("configurationName").and_then(value_as_text));
        }
    }

    if let Some(steps_xml) = non_empty_text(fields.resolve(STEPS)) {
        test_case.steps = parse_steps(&steps_xml).map_err(|source| FieldError {
            test_case_id: id,
            field: STEPS,
            source,
        })?;
    }

    if let Some(data_source_xml) = non_empty_text(fields.resolve(LOCAL_DATA_SOURCE)) {
        test_case.data_rows = parse_data_source(&data_source_xml).map_err(|source| FieldError {
            test_case_id: id,
            field: LOCAL_DATA_SOURCE,
            source,
        })?;
    }

    debug!(
        "caso {} '{}': {} pasos, {} filas de datos",
        test_case.id,
        test_case.title,
        test_case.steps.len(),
        test_case.data_rows.len()
    );
    Ok(Some(test_case))
}

/// Primer `System.Title` con valor en la forma `fieldName`; si no hay, la forma directa.
/// Una entrada con `null` no detiene la búsqueda.
fn resolve_title(fields: &[Value]) -> Option<String> {
    fields
        .resolve_named(SYSTEM_TITLE)
        .into_iter()
        .chain(fields.resolve_direct(SYSTEM_TITLE))
        .find_map(value_as_text)
}

fn nested_id(entry: &Value, key: &str) -> i64 {
    entry
        .get(key)
        .and_then(|node| node.get("id"))
        .and_then(Value::as_i64)
        .unwrap_or(0)
}

fn nested_name(entry: &Value, key: &str) -> Option<String> {
    entry
        .get(key)
        .and_then(|node| node.get("name"))
        .and_then(value_as_text)
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    value.and_then(value_as_text).filter(|text| !text.is_empty())
}
