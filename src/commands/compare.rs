use super::{print_json, CommandContext};
use crate::cli::OutputFormat;
use crate::core::LawmakerId;
use crate::formatting::{render_lawmaker_comparison, render_party_comparison};
use crate::query::Queries;
use anyhow::Result;

pub fn compare_lawmakers(
    ctx: &CommandContext,
    left: &str,
    right: &str,
    format: OutputFormat,
) -> Result<()> {
    let store = ctx.open_store()?;
    let comparison =
        Queries::new(&store).compare_lawmakers(&LawmakerId::new(left), &LawmakerId::new(right))?;

    match format {
        OutputFormat::Json => print_json(&comparison)?,
        OutputFormat::Terminal => {
            let formatter = ctx.formatter();
            println!(
                "{}",
                render_lawmaker_comparison(&comparison, &ctx.formatting, formatter.as_ref())
            );
        }
    }
    Ok(())
}

pub fn compare_parties(
    ctx: &CommandContext,
    left: &str,
    right: &str,
    format: OutputFormat,
) -> Result<()> {
    let store = ctx.open_store()?;
    let comparison = Queries::new(&store).compare_parties(left, right)?;

    match format {
        OutputFormat::Json => print_json(&comparison)?,
        OutputFormat::Terminal => {
            let formatter = ctx.formatter();
            println!(
                "{}",
                render_party_comparison(&comparison, &ctx.formatting, formatter.as_ref())
            );
        }
    }
    Ok(())
}
