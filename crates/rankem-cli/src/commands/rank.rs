//! Rank command implementation.

use super::{confirm, report, validate_name};
use crate::cli::{RankAction, RankArgs};
use crate::error::Result;
use crate::output::Formatter;
use crate::workspace::Workspace;
use rankem_domain::traits::RankRepository;

/// Execute a rank management command.
pub fn execute_rank(args: RankArgs, workspace: &mut Workspace, formatter: &Formatter) -> Result<()> {
    match args.action {
        RankAction::Create { name } => {
            let name = validate_name(&name)?;
            let rank = workspace.store_mut().create_rank(name)?;
            workspace.commit()?;
            report(
                formatter,
                &rank.id.to_string(),
                &format!("Rank created: {} ({})", rank.name, rank.id),
            );
        }
        RankAction::List => {
            let ranks = workspace.store().list_ranks()?;
            println!("{}", formatter.format_ranks(&ranks)?);
        }
        RankAction::Show { rank } => {
            let rank = workspace.rank(&rank)?;
            println!("{}", formatter.format_rank(&rank)?);
        }
        RankAction::Delete { rank, yes } => {
            let rank = workspace.rank(&rank)?;

            // Confirm deletion unless --yes is specified
            if !yes {
                let question = format!(
                    "About to delete rank '{}' and its {} item(s).",
                    rank.name,
                    rank.items.len()
                );
                if !confirm(formatter, &question)? {
                    println!("{}", formatter.info("Operation cancelled"));
                    return Ok(());
                }
            }

            workspace.store_mut().delete_rank(rank.id)?;
            workspace.commit()?;
            report(formatter, &rank.id.to_string(), &format!("Rank deleted: {}", rank.name));
        }
    }

    Ok(())
}
