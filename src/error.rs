use thiserror::Error;

/// Errores de un fragmento XML incrustado (pasos o fuente de datos)
#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("XML mal formado en el byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("la etiqueta <{0}> no se cerró antes del final del documento")]
    Unclosed(String),

    #[error("el documento no contiene un elemento raíz")]
    MissingRoot,

    #[error("contenido fuera del elemento raíz: '{0}'")]
    ContentOutsideRoot(String),

    #[error("carácter no permitido en XML cerca del byte {position}")]
    InvalidChar { position: usize },
}

/// Fallo al interpretar un campo de un caso de prueba concreto
#[derive(Error, Debug)]
#[error("campo {field} del caso de prueba {test_case_id}: {source}")]
pub struct FieldError {
    pub test_case_id: i64,
    pub field: &'static str,
    #[source]
    pub source: MarkupError,
}

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("respuesta inesperada del servicio de pruebas: {0}")]
    Protocol(String),

    #[error("elemento {index} (caso de prueba {test_case_id}): no se pudo interpretar {field}: {source}")]
    Parse {
        index: usize,
        test_case_id: i64,
        field: &'static str,
        #[source]
        source: MarkupError,
    },

    #[error("error de configuración: {0}")]
    Config(String),

    #[error("el servicio respondió HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("la palabra clave '{keyword}' falló: {message}")]
    Keyword { keyword: String, message: String },

    #[error("error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("error de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("error de CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("error en el archivo de configuración: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("error HTTP: {0}")]
    Http(#[from] reqwest::Error),
}

impl HarnessError {
    pub(crate) fn from_field(index: usize, err: FieldError) -> Self {
        HarnessError::Parse {
            index,
            test_case_id: err.test_case_id,
            field: err.field,
            source: err.source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
