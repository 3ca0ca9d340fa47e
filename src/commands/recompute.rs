use super::{print_json, CommandContext};
use crate::cli::OutputFormat;
use crate::config::WeightOverrides;
use crate::extraction::JsonFactSource;
use crate::formatting::render_run_summary;
use crate::pipeline::Recompute;
use anyhow::{Context, Result};
use std::path::Path;

/// Read per-run weight overrides. `.json` files parse as JSON, anything else as TOML.
pub fn load_weight_overrides(path: &Path) -> Result<WeightOverrides> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read weights file {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let overrides = if is_json {
        WeightOverrides::from_json_str(&contents)?
    } else {
        WeightOverrides::from_toml_str(&contents)?
    };
    Ok(overrides)
}

pub fn recompute(
    ctx: &CommandContext,
    facts: &Path,
    weights: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let overrides = match weights {
        Some(path) => load_weight_overrides(path)?,
        None => WeightOverrides::default(),
    };

    let store = ctx.open_store()?;
    let source = JsonFactSource::new(facts);
    let summary = Recompute::new(&store)
        .with_project_weights(ctx.config.weights.unwrap_or_default())
        .run(&source, &overrides)?;

    match format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Terminal => {
            let formatter = ctx.formatter();
            println!("{}", render_run_summary(&summary, formatter.as_ref()));
            println!("  store: {}", store.path().display());
        }
    }
    Ok(())
}
