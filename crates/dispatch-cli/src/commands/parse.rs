use dispatch_core::error::DispatchError;
use dispatch_core::extraction::read_listing;
use dispatch_core::registry::{builtin, load_registry, Registry};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::output;

pub fn run(
    input_file: PathBuf,
    preset: Option<String>,
    registry_file: Option<PathBuf>,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), DispatchError> {
    let registry = match registry_file {
        Some(path) => Registry::compile(&load_registry(&path)?)?,
        None => Registry::preset(preset.as_deref().unwrap_or(builtin::DEFAULT_PRESET))?,
    };

    let text = read_input(&input_file)?;
    let parsed = dispatch_core::parse_text(&text, &registry);

    match output_file {
        Some(path) => {
            // The saved file feeds `dispatch route`, so it holds the bare job list.
            output::json::write_jobs(&path, &parsed.jobs)?;
            eprintln!(
                "Parsed {} job(s), written to {}",
                parsed.jobs.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&parsed)?,
            _ => output::table::print_jobs(&parsed.jobs),
        },
    }

    if !parsed.skipped_lines.is_empty() {
        eprintln!("{} line(s) skipped:", parsed.skipped_lines.len());
        for skipped in &parsed.skipped_lines {
            eprintln!(
                "  line {}: {} ({})",
                skipped.line_number, skipped.line_text, skipped.reason
            );
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String, DispatchError> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        read_listing(path)
    }
}
