use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::error::Result;
use crate::models::{ExecutionReport, StepResult, TestStatus};

pub const DEFINITIONS_DIR: &str = "definitions";
pub const EXECUTIONS_DIR: &str = "executions";

/// Guarda los resultados de pasos en un archivo CSV
pub fn save_to_csv(file_path: &Path, results: &[StepResult]) -> Result<()> {
    let file = File::create(file_path)?;
    let mut writer = Writer::from_writer(file);

    for result in results {
        writer.serialize(result)?;
    }

    writer.flush()?;

    Ok(())
}

/// Guarda el informe de ejecución en formato Markdown
pub fn save_to_markdown(file_path: &Path, report: &ExecutionReport) -> io::Result<()> {
    let mut file = File::create(file_path)?;

    writeln!(file, "# Informe de Pruebas: {}", report.name)?;
    writeln!(
        file,
        "\nFecha de ejecución: {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(file, "Ejecución: {}\n", report.run_id)?;

    writeln!(file, "## Resumen Numérico\n")?;
    writeln!(file, "- Total de pasos: {}", report.results.len())?;
    for status in TestStatus::ALL {
        writeln!(file, "- {}: {}", status, report.count(status))?;
    }
    writeln!(file)?;

    writeln!(file, "## Resumen Visual\n")?;
    writeln!(file, "```mermaid")?;
    writeln!(file, "pie title Distribución de Pasos")?;
    // Mermaid no dibuja porciones en cero
    for status in TestStatus::ALL {
        let count = report.count(status);
        if count > 0 {
            writeln!(file, "    \"{}\" : {}", status, count)?;
        }
    }
    writeln!(file, "```\n")?;

    writeln!(file, "## Detalle de Casos de Prueba\n")?;
    let mut current: Option<(i64, usize)> = None;
    for result in &report.results {
        if current != Some((result.test_case_id, result.data_row)) {
            if current.map(|(id, _)| id) != Some(result.test_case_id) {
                writeln!(file, "### {} (ID: {})\n", result.title, result.test_case_id)?;
            }
            writeln!(file, "#### Fila de datos {}\n", result.data_row + 1)?;
            current = Some((result.test_case_id, result.data_row));
        }

        let keyword = if result.keyword.is_empty() {
            "-"
        } else {
            result.keyword.as_str()
        };
        write!(file, "- Paso {} [{}]: {}", result.step_id, keyword, result.status)?;
        if !result.message.is_empty() {
            write!(file, " - {}", result.message)?;
        }
        writeln!(file)?;
    }

    Ok(())
}

/// Guarda la respuesta original del servicio como definición
pub fn save_definition(file_path: &Path, raw_json: &str) -> io::Result<()> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, raw_json)
}

/// Obtiene la lista de definiciones descargadas
pub fn get_definition_files() -> io::Result<Vec<PathBuf>> {
    list_files(Path::new(DEFINITIONS_DIR), &["json"])
}

/// Obtiene la lista de informes de ejecución
pub fn get_execution_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    list_files(dir, &["csv", "md"])
}

fn list_files(dir: &Path, extensions: &[&str]) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if !dir.exists() {
        return Ok(files);
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| extensions.contains(&ext));
        if path.is_file() && matches {
            files.push(path);
        }
    }

    // Ordenar alfabéticamente
    files.sort();

    Ok(files)
}
