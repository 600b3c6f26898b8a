use serde::{Deserialize, Serialize};
use std::fmt;

/// Estado de un paso en el informe de ejecución
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    Pending,
    Validated,
    Rejected,
    Skipped,
    Blocked,
}

impl TestStatus {
    pub const ALL: [TestStatus; 5] = [
        TestStatus::Validated,
        TestStatus::Rejected,
        TestStatus::Pending,
        TestStatus::Skipped,
        TestStatus::Blocked,
    ];

    /// Rechazado o bloqueado: la ejecución no puede darse por buena
    pub fn is_failure(self) -> bool {
        matches!(self, TestStatus::Rejected | TestStatus::Blocked)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pending => write!(f, "⏳ Pendiente"),
            TestStatus::Validated => write!(f, "✅ Validado"),
            TestStatus::Rejected => write!(f, "❌ Rechazado"),
            TestStatus::Skipped => write!(f, "⏭️ Omitido"),
            TestStatus::Blocked => write!(f, "🚫 Bloqueado"),
        }
    }
}
