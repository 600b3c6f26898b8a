use log::debug;
use reqwest::blocking::Client;

use crate::keywords::{KeywordContext, KeywordError, KeywordHandler};

/// `API_GET <url>`: el paso pasa si la respuesta es 2xx y, cuando el paso
/// tiene resultado esperado, el cuerpo lo contiene.
pub struct ApiGetKeyword {
    client: Client,
}

impl ApiGetKeyword {
    pub fn new() -> Self {
        ApiGetKeyword {
            client: Client::new(),
        }
    }
}

impl Default for ApiGetKeyword {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordHandler for ApiGetKeyword {
    fn execute(&self, ctx: &KeywordContext<'_>) -> Result<String, KeywordError> {
        let url = ctx
            .arguments()
            .into_iter()
            .next()
            .ok_or_else(|| KeywordError::Failed("API_GET requiere una URL".to_string()))?;

        debug!("GET {}", url);
        let response = self.client.get(&url).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(KeywordError::Failed(format!("{} respondió {}", url, status)));
        }

        let expected = ctx.expected();
        if !expected.is_empty() && !body.contains(&expected) {
            return Err(KeywordError::Failed(format!(
                "la respuesta de {} no contiene '{}'",
                url, expected
            )));
        }

        Ok(format!("{} respondió {}", url, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataRow, TestCase, TestStep};

    #[test]
    fn missing_url_fails_without_network() {
        let test_case = TestCase::default();
        let step = TestStep {
            id: 1,
            step_type: String::new(),
            action: "API_GET".to_string(),
            expected: String::new(),
        };
        let row = DataRow::new();
        let ctx = KeywordContext {
            test_case: &test_case,
            step: &step,
            data_row: &row,
            data_row_index: 0,
        };

        let err = ApiGetKeyword::new().execute(&ctx).unwrap_err();
        assert!(matches!(err, KeywordError::Failed(_)));
    }
}
