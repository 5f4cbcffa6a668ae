//! Command-line interface for `geoform`, which turns GIS layer field metadata into
//! form control descriptors.
//!
//! This binary provides a thin front-end to the [`geoform_core`] library: it reads a
//! JSON layer definition, builds a control descriptor for each field and prints the
//! result as a table or as JSON.
//!
//! # Architecture
//!
//! The CLI is built using [`clap`] for argument parsing and [`tracing`] for structured logging.
//! It parses arguments, configures logging, and delegates to command handlers.
//!
//! # Available Commands
//!
//! - `describe` - Build and display the controls of a layer
//! - `check` - Validate a value against one field's control
//! - `kinds` - List the supported editor kinds
//! - `types` - List the raw data types and their canonical types

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, debug, info};
use tracing_log::LogTracer;
use tracing_subscriber::FmtSubscriber;

use geoform_core::FormError;

mod display;
mod layer;
mod summary;

use layer::{describe_layer, load_layer, report};

#[derive(Parser)]
#[command(
    name = "geoform",
    version,
    about = "Form control descriptors for GIS layer fields",
    long_about = "geoform maps each field of a GIS layer (data type, editor, alias, categories)\n\
                  to a toolkit-neutral form control descriptor."
)]
/// Command-line arguments and options for the `geoform` CLI.
struct Cli {
    /// Enable verbose (INFO level) logging output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug (DEBUG level) logging output with detailed diagnostics.
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the `geoform` CLI.
#[derive(Subcommand)]
enum Commands {
    /// Builds the control descriptors of a layer definition.
    Describe {
        /// Path to the JSON layer definition.
        #[arg(value_name = "LAYER_FILE")]
        layer: PathBuf,

        /// Only describe this field.
        #[arg(short, long, value_name = "NAME")]
        field: Option<String>,

        /// Print the descriptors as JSON instead of a table.
        #[arg(long)]
        json: bool,

        /// Skip fields with an unknown data type instead of failing.
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Checks a value against the control of one field.
    ///
    /// Without `--value` the field is checked as left empty.
    Check {
        /// Path to the JSON layer definition.
        #[arg(value_name = "LAYER_FILE")]
        layer: PathBuf,

        /// Field whose control is used.
        #[arg(short, long, value_name = "NAME")]
        field: String,

        /// Value to check.
        #[arg(long, value_name = "VALUE")]
        value: Option<String>,
    },

    /// Lists the editor kinds and the widget each one translates to.
    Kinds,

    /// Lists the raw data types and their canonical types.
    Types,
}

/// Entry point for the `geoform` command-line interface.
///
/// # Errors
///
/// Returns an error if command execution fails or if the logging system cannot be initialized.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    // Bridge logs from the `log` crate to the `tracing` ecosystem.
    LogTracer::init()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Describe {
            layer,
            field,
            json,
            skip_invalid,
        } => {
            info!("Describing {}", layer.display());
            handle_describe(&layer, field.as_deref(), json, skip_invalid)?;
        },
        Commands::Check {
            layer,
            field,
            value,
        } => {
            info!("Checking field '{field}' of {}", layer.display());
            let message = handle_check(&layer, &field, value.as_deref())?;
            println!("{message}");
        },
        Commands::Kinds => display::display_editor_kinds(),
        Commands::Types => display::display_data_types(),
    }

    Ok(())
}

fn handle_describe(path: &Path, field: Option<&str>, json: bool, skip_invalid: bool) -> Result<()> {
    let layer = load_layer(path)?;
    let controls = describe_layer(&layer, field, skip_invalid)?;
    debug!("Built {} control(s)", controls.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&controls)?);
        return Ok(());
    }
    display::display_controls(&layer.layer, &controls, &summary::summary_registry())
}

/// Validates `value` against the control of `field` and returns the message to print.
fn handle_check(path: &Path, field: &str, value: Option<&str>) -> Result<String> {
    let layer = load_layer(path)?;
    let controls = describe_layer(&layer, Some(field), false)?;
    let Some(control) = controls.first() else {
        return Err(anyhow::anyhow!("Field '{field}' produced no control."));
    };

    control
        .validate(value)
        .map_err(|err| report(&FormError::from(err)))?;

    Ok(match value {
        Some(value) => format!("'{value}' is valid for field '{field}'."),
        None => format!("An empty value is valid for field '{field}'."),
    })
}
