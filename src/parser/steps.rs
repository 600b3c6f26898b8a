use crate::error::MarkupError;
use crate::models::{TestStep, INVALID_STEP_ID};
use crate::parser::markup::decode;
use crate::parser::xml::{elements_named, parse_document, Element};

const TAG_STEP: &str = "step";
const TAG_PARAMETERIZED_STRING: &str = "parameterizedString";

/// Interpreta el XML de `Microsoft.VSTS.TCM.Steps`.
///
/// Devuelve un paso por cada elemento `step`, a cualquier profundidad y en
/// orden de documento. El primer `parameterizedString` es la acción y el
/// segundo el resultado esperado.
pub fn parse_steps(steps_xml: &str) -> Result<Vec<TestStep>, MarkupError> {
    let root = parse_document(steps_xml)?;

    Ok(elements_named(&root, TAG_STEP)
        .into_iter()
        .map(step_from_element)
        .collect())
}

fn step_from_element(element: &Element) -> TestStep {
    let id = element
        .attribute("id")
        .and_then(|id| id.trim().parse::<i32>().ok())
        .unwrap_or(INVALID_STEP_ID);
    let step_type = element.attribute("type").unwrap_or_default().to_string();

    let params = element.descendants_named(TAG_PARAMETERIZED_STRING);
    let text_at = |index: usize| {
        params
            .get(index)
            .map(|param| decode(&param.text_content()))
            .unwrap_or_default()
    };

    TestStep {
        id,
        step_type,
        action: text_at(0),
        expected: text_at(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const AZURE_STEPS: &str = concat!(
        r#"<steps id="0" last="10">"#,
        r#"<step id="2" type="ActionStep">"#,
        r#"<parameterizedString isformatted="true">&lt;DIV&gt;&lt;P&gt;Customer goes to an OFFUS ATM supporting NFC&lt;/P&gt;&lt;/DIV&gt;</parameterizedString>"#,
        r#"<parameterizedString isformatted="true">&lt;DIV&gt;&lt;P&gt;&lt;BR/&gt;&lt;/P&gt;&lt;/DIV&gt;</parameterizedString>"#,
        r#"<description/>"#,
        r#"</step>"#,
        r#"<step id="10" type="ValidateStep">"#,
        r#"<parameterizedString isformatted="true">&lt;DIV&gt;&lt;P&gt;Test Automation Step&lt;/P&gt;&lt;/DIV&gt;</parameterizedString>"#,
        r#"<parameterizedString isformatted="true">&lt;P&gt;Saldo &amp;amp; límite&lt;BR/&gt;actualizados&lt;/P&gt;</parameterizedString>"#,
        r#"<description/>"#,
        r#"</step>"#,
        r#"</steps>"#,
    );

    #[test]
    fn parses_steps_in_document_order() {
        let steps = parse_steps(AZURE_STEPS).unwrap();

        assert_eq!(
            steps,
            vec![
                TestStep {
                    id: 2,
                    step_type: "ActionStep".to_string(),
                    action: "Customer goes to an OFFUS ATM supporting NFC".to_string(),
                    expected: String::new(),
                },
                TestStep {
                    id: 10,
                    step_type: "ValidateStep".to_string(),
                    action: "Test Automation Step".to_string(),
                    expected: "Saldo & límite\nactualizados".to_string(),
                },
            ]
        );
    }

    #[test]
    fn single_parameterized_string_leaves_expected_empty() {
        let steps = parse_steps(
            r#"<steps><step id="1" type="ActionStep"><parameterizedString>Abrir</parameterizedString></step></steps>"#,
        )
        .unwrap();

        assert_eq!(steps[0].action, "Abrir");
        assert_eq!(steps[0].expected, "");
    }

    #[test]
    fn step_without_parameters_or_type() {
        let steps = parse_steps(r#"<steps><step id="4"/></steps>"#).unwrap();

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].step_type, "");
        assert_eq!(steps[0].action, "");
        assert_eq!(steps[0].expected, "");
    }

    #[test]
    fn bad_id_degrades_to_sentinel() {
        let steps = parse_steps(
            r#"<steps><step id="x"/><step/><step id="3"/></steps>"#,
        )
        .unwrap();

        let ids: Vec<i32> = steps.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![INVALID_STEP_ID, INVALID_STEP_ID, 3]);
    }

    #[test]
    fn finds_nested_steps() {
        let steps = parse_steps(
            r#"<steps><compref id="5"><step id="6"><parameterizedString>a</parameterizedString></step></compref></steps>"#,
        )
        .unwrap();

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].id, 6);
        assert_eq!(steps[0].action, "a");
    }

    #[test]
    fn unterminated_steps_fail() {
        assert!(parse_steps(r#"<steps><step id="1">"#).is_err());
    }

    #[test]
    fn control_char_inside_step_fails() {
        let err = parse_steps("<steps><step id=\"1\">\u{1}</step></steps>").unwrap_err();
        assert!(matches!(err, MarkupError::InvalidChar { .. }));
    }

    #[test]
    fn step_count_matches_source() {
        let xml: String = std::iter::once("<steps>".to_string())
            .chain((1..=25).map(|i| format!(r#"<step id="{i}" type="ActionStep"/>"#)))
            .chain(std::iter::once("</steps>".to_string()))
            .collect();

        let steps = parse_steps(&xml).unwrap();
        assert_eq!(steps.len(), 25);
        assert!(steps.iter().enumerate().all(|(i, s)| s.id == i as i32 + 1));
    }
}
