use clap::Parser;
use rcpd_convert::cli;
use rcpd_convert::config::ExtractConfig;
use rcpd_convert::error::ConvertResult;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rcpd-convert")]
#[command(about = "Convert Register of Processing Operations spreadsheets (.xlsx) to styled Word documents (.docx)")]
#[command(long_about = "rcpd-convert - Register converter: Excel to Word

Reads every .xlsx register in the input directory and writes one styled
.docx per file to the output directory. Each register is read at fixed
addresses: the administrator name in a single cell, field names and field
contents in two fixed rows whose cells are merged pairwise by the template.

A failing file is reported and skipped; the rest of the batch continues.

EXAMPLES:
  rcpd-convert                          # excel/ -> word/ with template defaults
  rcpd-convert sheets out               # custom directories
  rcpd-convert --key-row 10 --value-row 13
  rcpd-convert --strict                 # any per-file failure fails the run")]
#[command(version)]
struct Cli {
    /// Directory containing the .xlsx registers
    #[arg(default_value = "excel")]
    input_dir: PathBuf,

    /// Directory receiving the .docx documents
    #[arg(default_value = "word")]
    output_dir: PathBuf,

    /// 1-indexed row holding the field names
    #[arg(long, default_value_t = 12)]
    key_row: u32,

    /// 1-indexed row holding the field contents
    #[arg(long, default_value_t = 15)]
    value_row: u32,

    /// A1 reference of the administrator name cell
    #[arg(long, default_value = "F1")]
    administrator_cell: String,

    /// Fail the run if any file fails to convert
    #[arg(long)]
    strict: bool,
}

fn main() -> ConvertResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let extract_config = ExtractConfig {
        administrator_cell: cli.administrator_cell,
        key_row: cli.key_row,
        value_row: cli.value_row,
    };

    cli::convert(cli.input_dir, cli.output_dir, extract_config, cli.strict)
}
