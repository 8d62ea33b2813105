//! Resolution of user-typed rank and item references.
//!
//! A reference is tried as a full id, then as an exact name (case-insensitive),
//! then as an id prefix. Names and prefixes must select exactly one candidate.

use crate::error::{CliError, Result};
use rankem_domain::{Item, Rank};

/// Resolve `query` against a list of ranks.
pub fn resolve_rank<'a>(ranks: &'a [Rank], query: &str) -> Result<&'a Rank> {
    resolve(ranks, query, "rank", |rank| rank.id.to_string(), |rank| &rank.name)
}

/// Resolve `query` against the items of `rank`.
pub fn resolve_item<'a>(rank: &'a Rank, query: &str) -> Result<&'a Item> {
    resolve(&rank.items, query, "item", |item| item.id.to_string(), |item| &item.name)
        .map_err(|e| match e {
            CliError::NotFound(what) => CliError::NotFound(format!("{} in rank '{}'", what, rank.name)),
            other => other,
        })
}

fn resolve<'a, T>(
    candidates: &'a [T],
    query: &str,
    kind: &str,
    id: impl Fn(&T) -> String,
    name: impl Fn(&T) -> &str,
) -> Result<&'a T> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CliError::InvalidInput(format!("{} reference cannot be empty", kind)));
    }

    let lowered = query.to_lowercase();

    if let Some(found) = candidates.iter().find(|c| id(c) == lowered) {
        return Ok(found);
    }

    let by_name: Vec<&T> = candidates
        .iter()
        .filter(|c| name(c).to_lowercase() == lowered)
        .collect();
    match by_name.as_slice() {
        [only] => return Ok(*only),
        [] => {}
        many => {
            return Err(CliError::Ambiguous(format!(
                "{} {}s named '{}'; use an id instead",
                many.len(),
                kind,
                query
            )))
        }
    }

    let by_prefix: Vec<&T> = candidates
        .iter()
        .filter(|c| id(c).starts_with(&lowered))
        .collect();
    match by_prefix.as_slice() {
        [only] => Ok(*only),
        [] => Err(CliError::NotFound(format!("{} '{}'", kind, query))),
        many => Err(CliError::Ambiguous(format!(
            "'{}' is a prefix of {} {} ids",
            query,
            many.len(),
            kind
        ))),
    }
}
