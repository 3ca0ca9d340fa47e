use anyhow::Result;
use assemblyscore::cli::{parse_args, CompareTarget, Commands, RankTarget};
use assemblyscore::commands::{self, CommandContext};
use assemblyscore::formatting::FormattingConfig;
use assemblyscore::observability::{init_tracing, install_panic_hook};

fn main() -> Result<()> {
    install_panic_hook();
    let cli = parse_args();

    // Before config discovery, so loader warnings reach stderr
    let log_color = !cli.plain && FormattingConfig::from_env().color.should_use_color();
    init_tracing(cli.verbosity, log_color);

    if let Commands::Init { force } = cli.command {
        return commands::init_config(force);
    }

    let ctx = CommandContext::load(cli.config.as_deref(), cli.store.clone(), cli.plain)?;

    match cli.command {
        Commands::Recompute {
            facts,
            weights,
            format,
        } => commands::recompute(&ctx, &facts, weights.as_deref(), format),
        Commands::Rank { target } => match target {
            RankTarget::Lawmakers {
                field,
                order,
                all,
                limit,
                format,
            } => commands::rank_lawmakers(&ctx, field, order, all, limit, format),
            RankTarget::Parties {
                field,
                order,
                limit,
                format,
            } => commands::rank_parties(&ctx, field, order, limit, format),
        },
        Commands::PartyMembers {
            party,
            order,
            limit,
            format,
        } => commands::party_members(&ctx, &party, order, limit, format),
        Commands::Compare { target } => match target {
            CompareTarget::Lawmakers {
                left,
                right,
                format,
            } => commands::compare_lawmakers(&ctx, &left, &right, format),
            CompareTarget::Parties {
                left,
                right,
                format,
            } => commands::compare_parties(&ctx, &left, &right, format),
        },
        Commands::Init { .. } => Ok(()),
    }
}
