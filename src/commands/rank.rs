use super::{print_json, CommandContext};
use crate::cli::{default_direction, OutputFormat};
use crate::formatting::{render_lawmaker_ranking, render_party_ranking};
use crate::observability::{set_phase, RunPhase};
use crate::query::Queries;
use crate::ranking::{LawmakerField, PartyField, RankDirection};
use anyhow::Result;

pub fn rank_lawmakers(
    ctx: &CommandContext,
    field: LawmakerField,
    order: Option<RankDirection>,
    include_former: bool,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let _phase = set_phase(RunPhase::Reporting);
    let store = ctx.open_store()?;
    let direction = default_direction(order, field.lower_is_better());
    let rows = Queries::new(&store).lawmaker_ranking(field, direction, !include_former, limit)?;

    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Terminal => {
            let formatter = ctx.formatter();
            println!(
                "{}",
                render_lawmaker_ranking(&rows, field, &ctx.formatting, formatter.as_ref())
            );
        }
    }
    Ok(())
}

pub fn rank_parties(
    ctx: &CommandContext,
    field: PartyField,
    order: Option<RankDirection>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let _phase = set_phase(RunPhase::Reporting);
    let store = ctx.open_store()?;
    let direction = default_direction(order, field.lower_is_better());
    let rows = Queries::new(&store).party_ranking(field, direction, limit)?;

    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Terminal => {
            let formatter = ctx.formatter();
            println!(
                "{}",
                render_party_ranking(&rows, field, &ctx.formatting, formatter.as_ref())
            );
        }
    }
    Ok(())
}

pub fn party_members(
    ctx: &CommandContext,
    party: &str,
    order: RankDirection,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let _phase = set_phase(RunPhase::Reporting);
    let store = ctx.open_store()?;
    let rows = Queries::new(&store).lawmakers_by_party(party, order, limit)?;

    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Terminal => {
            let formatter = ctx.formatter();
            println!(
                "{}",
                render_lawmaker_ranking(
                    &rows,
                    LawmakerField::TotalScore,
                    &ctx.formatting,
                    formatter.as_ref()
                )
            );
        }
    }
    Ok(())
}
