use super::{FormattingConfig, OutputFormatter};
use crate::core::{LawmakerPerformance, PartyPerformance};
use crate::pipeline::RunSummary;
use crate::query::{Comparison, Leader};
use crate::ranking::{LawmakerField, PartyField, Ranked};
use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};

fn new_table(config: &FormattingConfig, header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(if config.ascii_only {
            presets::ASCII_FULL
        } else {
            presets::UTF8_FULL
        })
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn number(value: f64) -> Cell {
    Cell::new(format!("{:.2}", value)).set_alignment(CellAlignment::Right)
}

fn count(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

pub fn render_lawmaker_ranking(
    rows: &[Ranked<LawmakerPerformance>],
    field: LawmakerField,
    config: &FormattingConfig,
    formatter: &dyn OutputFormatter,
) -> String {
    let title = formatter.header(&format!("Lawmakers by {}", field));
    if rows.is_empty() {
        return format!("{}\n{}", title, formatter.dim("No lawmakers stored. Run `recompute` first."));
    }

    let mut table = new_table(
        config,
        vec!["Rank", "Pct", "ID", "Name", "Party", field.name(), "Total"],
    );
    for row in rows {
        table.add_row(vec![
            count(row.rank),
            number(row.percentile),
            Cell::new(row.item.lawmaker_id.as_str()),
            Cell::new(&row.item.name),
            Cell::new(&row.item.party),
            number(row.value),
            number(row.item.total_score),
        ]);
    }
    format!("{}\n{}", title, table)
}

pub fn render_party_ranking(
    rows: &[Ranked<PartyPerformance>],
    field: PartyField,
    config: &FormattingConfig,
    formatter: &dyn OutputFormatter,
) -> String {
    let title = formatter.header(&format!("Parties by {}", field));
    if rows.is_empty() {
        return format!("{}\n{}", title, formatter.dim("No parties stored. Run `recompute` first."));
    }

    let mut table = new_table(
        config,
        vec!["Rank", "Party", "Members", field.name(), "Weighted", "Penalty"],
    );
    for row in rows {
        table.add_row(vec![
            count(row.rank),
            Cell::new(&row.item.party),
            count(row.item.member_count),
            number(row.value),
            number(row.item.weighted_score),
            number(row.item.penalty_factor),
        ]);
    }

    let mut out = format!("{}\n{}", title, table);
    if rows.iter().any(|r| r.item.penalty_factor < 1.0) {
        out.push('\n');
        out.push_str(&formatter.dim("Penalty < 1.00 marks a small caucus."));
    }
    out
}

fn leader_cell(leader: Leader, left: &str, right: &str) -> Cell {
    Cell::new(match leader {
        Leader::Left => left,
        Leader::Right => right,
        Leader::Tie => "=",
    })
}

fn render_comparison<T>(
    title: String,
    left_name: &str,
    right_name: &str,
    comparison: &Comparison<T>,
    config: &FormattingConfig,
    formatter: &dyn OutputFormatter,
) -> String {
    let mut table = new_table(config, vec!["Field", left_name, right_name, "Leader"]);
    table.add_row(vec![
        Cell::new("overall_rank"),
        count(format!("{}/{}", comparison.left_rank, comparison.population)),
        count(format!("{}/{}", comparison.right_rank, comparison.population)),
        leader_cell(
            Leader::decide_rank(comparison.left_rank, comparison.right_rank),
            left_name,
            right_name,
        ),
    ]);
    for field in &comparison.fields {
        table.add_row(vec![
            Cell::new(field.field),
            number(field.left),
            number(field.right),
            leader_cell(field.leader, left_name, right_name),
        ]);
    }

    let (left_wins, right_wins) = comparison.tally();
    format!(
        "{}\n{}\n{}",
        formatter.header(&title),
        table,
        formatter.dim(&format!(
            "{} leads on {} field(s), {} on {}",
            left_name, left_wins, right_name, right_wins
        ))
    )
}

pub fn render_lawmaker_comparison(
    comparison: &Comparison<LawmakerPerformance>,
    config: &FormattingConfig,
    formatter: &dyn OutputFormatter,
) -> String {
    let left = format!("{} ({})", comparison.left.name, comparison.left.party);
    let right = format!("{} ({})", comparison.right.name, comparison.right.party);
    render_comparison(
        format!("{} vs {}", left, right),
        &left,
        &right,
        comparison,
        config,
        formatter,
    )
}

pub fn render_party_comparison(
    comparison: &Comparison<PartyPerformance>,
    config: &FormattingConfig,
    formatter: &dyn OutputFormatter,
) -> String {
    render_comparison(
        format!("{} vs {}", comparison.left.party, comparison.right.party),
        &comparison.left.party,
        &comparison.right.party,
        comparison,
        config,
        formatter,
    )
}

pub fn render_run_summary(summary: &RunSummary, formatter: &dyn OutputFormatter) -> String {
    let elapsed = summary.finished_at - summary.started_at;
    let mut lines = vec![
        formatter.success("Recompute complete"),
        format!(
            "  lawmakers: {} ({} serving)",
            summary.lawmakers_written, summary.serving_lawmakers
        ),
        format!("  parties:   {}", summary.parties_written),
    ];
    if summary.pruned_lawmakers + summary.pruned_parties > 0 {
        lines.push(format!(
            "  pruned:    {} lawmaker(s), {} party row(s)",
            summary.pruned_lawmakers, summary.pruned_parties
        ));
    }
    lines.push(formatter.dim(&format!(
        "  finished {} in {} ms",
        summary.finished_at.format("%Y-%m-%d %H:%M:%S UTC"),
        elapsed.num_milliseconds()
    )));
    lines.join("\n")
}
