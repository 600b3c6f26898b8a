use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use colored::*;
use inquire::Select;
use log::{debug, Level};

use test_case_harness::azure::LoadPolicy;
use test_case_harness::commands::{execute_test_cases, fetch_suite, show_test_cases};
use test_case_harness::config::{HarnessConfig, DEFAULT_CONFIG_FILE};
use test_case_harness::utils::{get_definition_files, get_execution_files};
use test_case_harness::Result;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Archivo de configuración
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Aumenta el detalle del log (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Omite los casos con XML corrupto en lugar de abortar la carga
    #[arg(long)]
    skip_invalid: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Descargar la suite configurada y guardarla como definición
    Fetch,
    /// Mostrar los casos de prueba de una definición
    Show {
        /// Ruta al archivo JSON de la definición
        #[arg(short, long)]
        file: PathBuf,

        /// Imprimir el modelo interpretado como JSON
        #[arg(long)]
        json: bool,
    },
    /// Ejecutar casos de prueba
    Execute {
        /// Definición a ejecutar; sin ella se descarga la suite configurada
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Listar definiciones e informes disponibles
    List,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    if let Err(e) = simple_logger::init_with_level(log_level) {
        eprintln!("No se pudo iniciar el log: {}", e);
    }

    if let Err(e) = run(&cli) {
        eprintln!("{}", format!("Error: {}", e).red());
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = HarnessConfig::load(&cli.config)?;
    debug!("configuración: {:?}", config.azure.project_url);

    let policy = if cli.skip_invalid {
        LoadPolicy::SkipInvalid
    } else {
        config.load.policy
    };

    match &cli.command {
        Some(Commands::Fetch) => {
            fetch_suite(&config, policy)?;
        }
        Some(Commands::Show { file, json }) => show_test_cases(file, policy, *json)?,
        Some(Commands::Execute { file }) => run_execution(file.as_deref(), &config, policy)?,
        Some(Commands::List) => list_test_files(&config.report.dir)?,
        None => {
            // Menú interactivo si no se proporciona un comando
            let options = vec![
                "Descargar suite",
                "Ver definición",
                "Ejecutar definición",
                "Ejecutar suite de Azure",
                "Listar archivos",
                "Salir",
            ];

            let selection = Select::new("¿Qué deseas hacer?", options).prompt();

            match selection {
                Ok("Descargar suite") => {
                    fetch_suite(&config, policy)?;
                }
                Ok("Ver definición") => {
                    if let Some(file) = select_definition_file()? {
                        show_test_cases(&file, policy, false)?
                    }
                }
                Ok("Ejecutar definición") => {
                    if let Some(file) = select_definition_file()? {
                        run_execution(Some(&file), &config, policy)?
                    }
                }
                Ok("Ejecutar suite de Azure") => run_execution(None, &config, policy)?,
                Ok("Listar archivos") => list_test_files(&config.report.dir)?,
                _ => println!("¡Hasta pronto!"),
            }
        }
    }

    Ok(())
}

fn run_execution(file: Option<&Path>, config: &HarnessConfig, policy: LoadPolicy) -> Result<()> {
    let report = execute_test_cases(file, config, policy)?;
    if report.has_failures() {
        // El informe ya quedó guardado; el código de salida refleja el fallo
        process::exit(2);
    }
    Ok(())
}

/// Selecciona una definición existente
fn select_definition_file() -> Result<Option<PathBuf>> {
    let definition_files: Vec<String> = get_definition_files()?
        .into_iter()
        .map(|p| p.display().to_string())
        .collect();

    if definition_files.is_empty() {
        println!("{}", "No hay archivos de definición disponibles.".red());
        return Ok(None);
    }

    let selection = Select::new("Selecciona un archivo de definición:", definition_files).prompt();

    match selection {
        Ok(file) => Ok(Some(PathBuf::from(file))),
        Err(_) => Ok(None),
    }
}

/// Lista las definiciones y los informes de ejecución disponibles
fn list_test_files(executions_dir: &Path) -> Result<()> {
    let definition_files = get_definition_files()?;
    let execution_files = get_execution_files(executions_dir)?;

    if definition_files.is_empty() && execution_files.is_empty() {
        println!("{}", "No hay archivos de prueba disponibles.".yellow());
        return Ok(());
    }

    if !definition_files.is_empty() {
        println!("{}", "Archivos de definición disponibles:".green());
        for (i, file) in definition_files.iter().enumerate() {
            println!("{}: {}", i + 1, file.display());
        }
        println!();
    } else {
        println!("{}", "No hay archivos de definición disponibles.".yellow());
    }

    if !execution_files.is_empty() {
        println!("{}", "Informes de ejecución disponibles:".green());
        for (i, file) in execution_files.iter().enumerate() {
            println!("{}: {}", i + 1, file.display());
        }
    } else {
        println!("{}", "No hay informes de ejecución disponibles.".yellow());
    }

    Ok(())
}
