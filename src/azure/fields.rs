use serde_json::Value;

pub const SYSTEM_TITLE: &str = "System.Title";
pub const SYSTEM_STATE: &str = "System.State";
pub const PRIORITY: &str = "Microsoft.VSTS.Common.Priority";
pub const STEPS: &str = "Microsoft.VSTS.TCM.Steps";
pub const LOCAL_DATA_SOURCE: &str = "Microsoft.VSTS.TCM.LocalDataSource";

const KEY_FIELD_NAME: &str = "fieldName";
const KEY_VALUE: &str = "value";

/// Búsqueda de campos sobre `workItemFields`.
///
/// El servicio emite cada campo de dos formas:
/// `{ "fieldName": "System.State", "value": "Ready" }` o bien
/// `{ "System.State": "Ready" }`. Un `null` explícito cuenta como ausente.
pub trait FieldResolver {
    /// Valores de la forma `fieldName`/`value`, en orden
    fn resolve_named<'a>(&'a self, field: &str) -> Vec<&'a Value>;

    /// Valores de la forma con el nombre como clave, en orden
    fn resolve_direct<'a>(&'a self, field: &str) -> Vec<&'a Value>;

    /// Último valor presente en cualquiera de las dos formas
    fn resolve<'a>(&'a self, field: &str) -> Option<&'a Value>;
}

impl FieldResolver for [Value] {
    fn resolve_named<'a>(&'a self, field: &str) -> Vec<&'a Value> {
        self.iter().filter_map(|entry| named_value(entry, field)).collect()
    }

    fn resolve_direct<'a>(&'a self, field: &str) -> Vec<&'a Value> {
        self.iter().filter_map(|entry| direct_value(entry, field)).collect()
    }

    fn resolve<'a>(&'a self, field: &str) -> Option<&'a Value> {
        let mut found = None;
        for entry in self {
            // Una entrada podría traer ambas formas; la directa se evalúa después
            if let Some(value) = named_value(entry, field) {
                found = Some(value);
            }
            if let Some(value) = direct_value(entry, field) {
                found = Some(value);
            }
        }
        found.filter(|value| !value.is_null())
    }
}

fn named_value<'a>(entry: &'a Value, field: &str) -> Option<&'a Value> {
    let name = entry.get(KEY_FIELD_NAME)?;
    if name.as_str() == Some(field) {
        entry.get(KEY_VALUE)
    } else {
        None
    }
}

fn direct_value<'a>(entry: &'a Value, field: &str) -> Option<&'a Value> {
    entry.get(field)
}

/// Texto de un valor escalar. `null`, arreglos y objetos no tienen texto.
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Entero a partir de un número JSON o de un texto con un entero
pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

pub fn value_as_i32(value: &Value) -> Option<i32> {
    value_as_i64(value).and_then(|n| i32::try_from(n).ok())
}

/// Prioridad: sólo números JSON. Los decimales se truncan y los textos,
/// aunque contengan un entero, no cuentan.
pub fn value_as_priority(value: &Value) -> Option<i32> {
    let number = match value {
        Value::Number(number) => number,
        _ => return None,
    };
    match number.as_i64() {
        Some(n) => i32::try_from(n).ok(),
        None => number.as_f64().map(|f| f.trunc() as i32),
    }
}
