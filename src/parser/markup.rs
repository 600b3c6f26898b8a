use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref BASIC_ENTITY: Regex = Regex::new(r"&(lt|gt|amp|quot|apos);").unwrap();
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref HORIZONTAL_SPACE: Regex = Regex::new(r"[ \t\x0B\x0C\r]+").unwrap();
    static ref NEWLINE_INDENT: Regex = Regex::new(r"\n\s+").unwrap();
}

/// Convierte el texto enriquecido de un `parameterizedString` en texto plano.
///
/// El contenido llega como HTML escapado: primero se resuelven las cinco
/// referencias básicas una sola vez, después los `<br>` pasan a ser saltos de
/// línea y el resto de etiquetas se sustituye por un espacio. Es un reemplazo
/// textual, así que el HTML mal cerrado no provoca errores.
pub fn decode(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let html = unescape_basic_entities(raw);
    let text = LINE_BREAK.replace_all(&html, "\n");
    let text = TAG.replace_all(&text, " ");
    let text = HORIZONTAL_SPACE.replace_all(&text, " ");
    let text = NEWLINE_INDENT.replace_all(&text, "\n");

    text.trim().to_string()
}

/// Igual que [`decode`], con ausencia equivalente a texto vacío
pub fn decode_opt(raw: Option<&str>) -> String {
    raw.map(decode).unwrap_or_default()
}

// Una sola pasada de izquierda a derecha: `&amp;lt;` queda como `&lt;`.
fn unescape_basic_entities(raw: &str) -> String {
    BASIC_ENTITY
        .replace_all(raw, |caps: &Captures| match &caps[1] {
            "lt" => "<",
            "gt" => ">",
            "amp" => "&",
            "quot" => "\"",
            _ => "'",
        })
        .into_owned()
}
