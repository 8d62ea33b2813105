//! Item command implementation.

use super::{confirm, report, validate_name};
use crate::cli::{ItemAction, ItemArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::workspace::Workspace;
use rankem_domain::traits::RankRepository;

/// Execute an item management command.
pub fn execute_item(args: ItemArgs, workspace: &mut Workspace, formatter: &Formatter) -> Result<()> {
    match args.action {
        ItemAction::Add { rank, name } => {
            let name = validate_name(&name)?;
            let rank = workspace.rank(&rank)?;
            let item = workspace.store_mut().add_item(rank.id, name)?;

            // The new item has no judgments yet, so the current ordering no longer holds
            if rank.sorted {
                workspace.store_mut().hide_ranking(rank.id)?;
            }
            workspace.commit()?;

            report(
                formatter,
                &item.id.to_string(),
                &format!("Item added to {}: {} ({})", rank.name, item.name, item.id),
            );
            if rank.sorted {
                eprintln!("{}", formatter.info("Scores hidden until the next calculate"));
            }
        }
        ItemAction::Remove { rank, item, yes } => {
            let (rank, item) = workspace.item(&rank, &item)?;

            // Confirm deletion unless --yes is specified
            if !yes {
                let question = format!("About to remove '{}' from rank '{}'.", item.name, rank.name);
                if !confirm(formatter, &question)? {
                    println!("{}", formatter.info("Operation cancelled"));
                    return Ok(());
                }
            }

            workspace.store_mut().remove_item(rank.id, item.id)?;
            workspace.commit()?;
            report(
                formatter,
                &item.id.to_string(),
                &format!("Item removed from {}: {}", rank.name, item.name),
            );
        }
        ItemAction::Show { rank, item } => {
            let (rank, item) = workspace.item(&rank, &item)?;
            let comparisons = rank
                .comparisons(item.id)
                .ok_or_else(|| CliError::NotFound(format!("item '{}'", item.id)))?;
            println!("{}", formatter.format_item(&rank, &item, &comparisons)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use rankem_domain::RatingEngine;

    fn setup() -> (Workspace, Formatter) {
        let mut workspace = Workspace::in_memory(RatingEngine::default()).unwrap();
        workspace.store_mut().create_rank("Fruits").unwrap();
        (workspace, Formatter::new(OutputFormat::Quiet, false))
    }

    fn add(workspace: &mut Workspace, formatter: &Formatter, name: &str) -> Result<()> {
        let action = ItemAction::Add {
            rank: "Fruits".into(),
            name: name.into(),
        };
        execute_item(ItemArgs { action }, workspace, formatter)
    }

    #[test]
    fn test_add_item() {
        let (mut workspace, formatter) = setup();
        add(&mut workspace, &formatter, " Apple ").unwrap();

        let rank = workspace.rank("Fruits").unwrap();
        assert_eq!(rank.items.len(), 1);
        assert_eq!(rank.items[0].name, "Apple");
    }

    #[test]
    fn test_add_item_hides_sorted_ranking() {
        let (mut workspace, formatter) = setup();
        add(&mut workspace, &formatter, "Apple").unwrap();
        let rank_id = workspace.rank("Fruits").unwrap().id;
        workspace.store_mut().calculate_scores(rank_id).unwrap();

        add(&mut workspace, &formatter, "Pear").unwrap();

        assert!(!workspace.rank("Fruits").unwrap().sorted);
    }

    #[test]
    fn test_add_item_rejects_empty_name() {
        let (mut workspace, formatter) = setup();
        assert!(matches!(
            add(&mut workspace, &formatter, "   "),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_remove_item_with_yes() {
        let (mut workspace, formatter) = setup();
        add(&mut workspace, &formatter, "Apple").unwrap();
        add(&mut workspace, &formatter, "Pear").unwrap();

        let action = ItemAction::Remove {
            rank: "Fruits".into(),
            item: "apple".into(),
            yes: true,
        };
        execute_item(ItemArgs { action }, &mut workspace, &formatter).unwrap();

        let names: Vec<String> = workspace
            .rank("Fruits")
            .unwrap()
            .items
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, ["Pear"]);
    }

    #[test]
    fn test_show_unknown_item() {
        let (mut workspace, formatter) = setup();
        let action = ItemAction::Show {
            rank: "Fruits".into(),
            item: "Mango".into(),
        };
        let result = execute_item(ItemArgs { action }, &mut workspace, &formatter);
        assert!(matches!(result, Err(CliError::NotFound(_))));
    }
}
