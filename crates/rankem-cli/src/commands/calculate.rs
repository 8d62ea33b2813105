//! Calculate and hide command implementations.

use super::report;
use crate::cli::RankRef;
use crate::error::Result;
use crate::output::Formatter;
use crate::workspace::Workspace;
use rankem_domain::traits::RankRepository;

/// Compute scores for a rank and print it in score order.
pub fn execute_calculate(args: RankRef, workspace: &mut Workspace, formatter: &Formatter) -> Result<()> {
    let rank = workspace.rank(&args.rank)?;
    workspace.store_mut().calculate_scores(rank.id)?;
    workspace.commit()?;

    let rank = workspace.rank(&rank.id.to_string())?;
    println!("{}", formatter.format_rank(&rank)?);
    Ok(())
}

/// Mark a rank unsorted so its scores are no longer shown.
pub fn execute_hide(args: RankRef, workspace: &mut Workspace, formatter: &Formatter) -> Result<()> {
    let rank = workspace.rank(&args.rank)?;
    workspace.store_mut().hide_ranking(rank.id)?;
    workspace.commit()?;
    report(formatter, &rank.id.to_string(), &format!("Ranking hidden: {}", rank.name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use rankem_domain::{RatingEngine, DEFAULT_SCORE};

    fn fruits() -> Workspace {
        let mut workspace = Workspace::in_memory(RatingEngine::default()).unwrap();
        let store = workspace.store_mut();
        let rank = store.create_rank("Fruits").unwrap();
        let a = store.add_item(rank.id, "A").unwrap();
        let b = store.add_item(rank.id, "B").unwrap();
        store.add_item(rank.id, "C").unwrap();
        store.add_better_than_item(rank.id, a.id, b.id).unwrap();
        workspace
    }

    fn rank_ref() -> RankRef {
        RankRef { rank: "Fruits".into() }
    }

    #[test]
    fn test_calculate_scores() {
        let mut workspace = fruits();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute_calculate(rank_ref(), &mut workspace, &formatter).unwrap();

        let rank = workspace.rank("Fruits").unwrap();
        assert!(rank.sorted);
        let scores: Vec<f64> = rank.items.iter().map(|i| i.score).collect();
        assert_eq!(scores, vec![1016.0, 984.0, DEFAULT_SCORE]);
    }

    #[test]
    fn test_calculate_uses_configured_engine() {
        let mut workspace = Workspace::in_memory(RatingEngine::new(10.0, 1500.0)).unwrap();
        let store = workspace.store_mut();
        let rank = store.create_rank("Fruits").unwrap();
        let a = store.add_item(rank.id, "A").unwrap();
        let b = store.add_item(rank.id, "B").unwrap();
        store.add_better_than_item(rank.id, a.id, b.id).unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute_calculate(rank_ref(), &mut workspace, &formatter).unwrap();

        let rank = workspace.rank("Fruits").unwrap();
        assert_eq!(rank.items[0].score, 1505.0);
        assert_eq!(rank.items[1].score, 1495.0);
    }

    #[test]
    fn test_hide_after_calculate() {
        let mut workspace = fruits();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        execute_calculate(rank_ref(), &mut workspace, &formatter).unwrap();

        execute_hide(rank_ref(), &mut workspace, &formatter).unwrap();

        let rank = workspace.rank("Fruits").unwrap();
        assert!(!rank.sorted);
        // Scores are kept, only hidden
        assert_eq!(rank.items[0].score, 1016.0);
    }
}
