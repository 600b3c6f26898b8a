use crate::error::MarkupError;
use crate::models::DataRow;
use crate::parser::xml::{elements_named, parse_document};

const TAG_ROW: &str = "Table1";

/// Interpreta el XML de `Microsoft.VSTS.TCM.LocalDataSource`.
///
/// Cada `Table1` es una fila; sus hijos directos son parámetros (nombre de la
/// etiqueta -> texto). Las filas sin parámetros se descartan.
pub fn parse_data_source(data_source_xml: &str) -> Result<Vec<DataRow>, MarkupError> {
    let root = parse_document(data_source_xml)?;

    Ok(elements_named(&root, TAG_ROW)
        .into_iter()
        .map(|table| {
            table
                .child_elements()
                .map(|field| (field.name.clone(), field.text_content()))
                .collect::<DataRow>()
        })
        .filter(|row| !row.is_empty())
        .collect())
}
