//! CLI command for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{BuzzPayError, BuzzPayResult};
use crate::export::{self, ExportFormat};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// One row per request
    Csv,
    /// Every request with export metadata
    Json,
    /// The JSON document, human-readable
    Yaml,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Yaml => ExportFormat::Yaml,
        }
    }
}

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: FormatArg,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> BuzzPayResult<()> {
    let format = ExportFormat::from(args.format);

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                BuzzPayError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(storage, format, &mut writer, !args.compact)?;
            writer
                .flush()
                .map_err(|e| BuzzPayError::Export(e.to_string()))?;

            let count = storage.store().list()?.len();
            println!(
                "Exported {} requests ({}) to: {}",
                count,
                format,
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(storage, format, &mut writer, !args.compact)?;
            writeln!(writer).map_err(|e| BuzzPayError::Export(e.to_string()))?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    storage: &Storage,
    format: ExportFormat,
    writer: &mut W,
    pretty: bool,
) -> BuzzPayResult<()> {
    match format {
        ExportFormat::Csv => export::export_requests_csv(storage, writer),
        ExportFormat::Json => export::export_requests_json(storage, writer, pretty),
        ExportFormat::Yaml => export::export_requests_yaml(storage, writer),
    }
}
