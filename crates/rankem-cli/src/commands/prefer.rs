//! Prefer command implementation.

use super::report;
use crate::cli::PreferArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::resolve;
use crate::workspace::Workspace;
use rankem_domain::traits::RankRepository;
use rankem_domain::Preference;

/// Execute the prefer command.
pub fn execute_prefer(args: PreferArgs, workspace: &mut Workspace, formatter: &Formatter) -> Result<()> {
    let (rank, item) = workspace.item(&args.rank, &args.item)?;
    let other = resolve::resolve_item(&rank, &args.other)?;
    let preference = Preference::from(args.preference);

    if item.id == other.id && preference != Preference::None {
        return Err(CliError::InvalidInput(format!(
            "'{}' cannot be compared with itself",
            item.name
        )));
    }

    workspace
        .store_mut()
        .set_preference(rank.id, item.id, other.id, preference)?;
    workspace.commit()?;

    let message = match preference {
        Preference::Better => format!("{} is better than {}", item.name, other.name),
        Preference::Worse => format!("{} is worse than {}", item.name, other.name),
        Preference::None => format!("Cleared {} vs {}", item.name, other.name),
    };
    report(formatter, &item.id.to_string(), &message);

    Ok(())
}
