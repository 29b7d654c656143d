use crate::config::{ExtractConfig, RenderConfig};
use crate::error::ConvertResult;
use crate::pipeline;
use colored::Colorize;
use std::path::PathBuf;

/// Execute the convert command: one batch run over the input directory
pub fn convert(
    input_dir: PathBuf,
    output_dir: PathBuf,
    extract_config: ExtractConfig,
    strict: bool,
) -> ConvertResult<()> {
    println!(
        "{}",
        "📄 rcpd-convert - Register of Processing Operations".bold().green()
    );
    println!("   Input:  {}", input_dir.display());
    println!("   Output: {}", output_dir.display());
    println!(
        "   Layout: administrator {} | keys row {} | values row {}\n",
        extract_config.administrator_cell.cyan(),
        extract_config.key_row,
        extract_config.value_row
    );

    let render_config = RenderConfig::default();
    let mut summary =
        pipeline::convert_directory(&input_dir, &output_dir, &extract_config, &render_config)?;

    if summary.total() == 0 {
        println!(
            "{}",
            format!(
                "⚠️  No .xlsx files found in {}",
                input_dir.display()
            )
            .yellow()
        );
        return Ok(());
    }

    for path in &summary.converted {
        println!("   {} {}", "✅".green(), path.display());
    }
    for (path, error) in &summary.failed {
        println!("   {} {}: {}", "❌".red(), path.display(), error.to_string().red());
    }

    println!();
    if summary.failed.is_empty() {
        println!(
            "{}",
            format!("✅ Conversion complete: {} file(s)", summary.converted.len())
                .bold()
                .green()
        );
    } else {
        println!(
            "{}",
            format!(
                "⚠️  Conversion finished: {} converted, {} failed",
                summary.converted.len(),
                summary.failed.len()
            )
            .bold()
            .yellow()
        );
        if strict {
            // Strict automation mode: surface the first per-file error
            return Err(summary.failed.remove(0).1);
        }
    }

    Ok(())
}
