use serde::{Deserialize, Serialize};

/// Valor usado cuando el atributo `id` de un paso no es numérico
pub const INVALID_STEP_ID: i32 = -1;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TestStep {
    pub id: i32,
    #[serde(rename = "type")]
    pub step_type: String,
    pub action: String,
    pub expected: String,
}
