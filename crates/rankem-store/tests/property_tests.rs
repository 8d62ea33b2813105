//! Property tests for store invariants under arbitrary operation sequences

use proptest::prelude::*;
use rankem_domain::traits::RankRepository;
use rankem_domain::{ItemId, RankId};
use rankem_store::Store;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    CreateRank,
    DeleteRank(usize),
    AddItem(usize),
    RemoveItem(usize, usize),
    Better(usize, usize, usize),
    Worse(usize, usize, usize),
    Unbetter(usize, usize, usize),
    Calculate(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::CreateRank),
        (0usize..4).prop_map(Op::DeleteRank),
        (0usize..4).prop_map(Op::AddItem),
        (0usize..4, 0usize..6).prop_map(|(r, i)| Op::RemoveItem(r, i)),
        (0usize..4, 0usize..6, 0usize..6).prop_map(|(r, i, j)| Op::Better(r, i, j)),
        (0usize..4, 0usize..6, 0usize..6).prop_map(|(r, i, j)| Op::Worse(r, i, j)),
        (0usize..4, 0usize..6, 0usize..6).prop_map(|(r, i, j)| Op::Unbetter(r, i, j)),
        (0usize..4).prop_map(Op::Calculate),
    ]
}

/// Pick the rank and items an op refers to, if they exist
fn pick(store: &Store, rank: usize, items: &[usize]) -> Option<(RankId, Vec<ItemId>)> {
    let ranks = store.list_ranks().unwrap();
    let rank = ranks.get(rank)?;
    let ids = items
        .iter()
        .map(|&i| rank.items.get(i).map(|item| item.id))
        .collect::<Option<Vec<_>>>()?;
    Some((rank.id, ids))
}

fn apply(store: &mut Store, op: &Op) {
    match *op {
        Op::CreateRank => {
            store.create_rank("rank").unwrap();
        }
        Op::DeleteRank(r) => {
            if let Some((rank, _)) = pick(store, r, &[]) {
                store.delete_rank(rank).unwrap();
            }
        }
        Op::AddItem(r) => {
            if let Some((rank, _)) = pick(store, r, &[]) {
                store.add_item(rank, "item").unwrap();
            }
        }
        Op::RemoveItem(r, i) => {
            if let Some((rank, ids)) = pick(store, r, &[i]) {
                store.remove_item(rank, ids[0]).unwrap();
            }
        }
        Op::Better(r, i, j) => {
            if let Some((rank, ids)) = pick(store, r, &[i, j]) {
                store.add_better_than_item(rank, ids[0], ids[1]).unwrap();
            }
        }
        Op::Worse(r, i, j) => {
            if let Some((rank, ids)) = pick(store, r, &[i, j]) {
                store.add_worse_than_item(rank, ids[0], ids[1]).unwrap();
            }
        }
        Op::Unbetter(r, i, j) => {
            if let Some((rank, ids)) = pick(store, r, &[i, j]) {
                store.remove_better_than_item(rank, ids[0], ids[1]).unwrap();
            }
        }
        Op::Calculate(r) => {
            if let Some((rank, _)) = pick(store, r, &[]) {
                store.calculate_scores(rank).unwrap();
            }
        }
    }
}

proptest! {
    /// Property: ids stay unique and no pair is both better and worse
    #[test]
    fn test_invariants_hold(ops in prop::collection::vec(op(), 0..60)) {
        let mut store = Store::new();
        for op in &ops {
            apply(&mut store, op);
        }

        let ranks = store.list_ranks().unwrap();
        let rank_ids: HashSet<RankId> = ranks.iter().map(|r| r.id).collect();
        prop_assert_eq!(rank_ids.len(), ranks.len());

        for rank in &ranks {
            let item_ids: HashSet<ItemId> = rank.items.iter().map(|i| i.id).collect();
            prop_assert_eq!(item_ids.len(), rank.items.len());

            for item in &rank.items {
                for other in &item.better_than {
                    prop_assert!(!item.worse_than.contains(other));
                }
                let unique: HashSet<&ItemId> = item.better_than.iter().collect();
                prop_assert_eq!(unique.len(), item.better_than.len());
                prop_assert!(item.score.is_finite());
            }
        }
    }

    /// Property: recalculating without edits between calls is a fixed point
    #[test]
    fn test_recalculation_is_stable(ops in prop::collection::vec(op(), 0..60)) {
        let mut store = Store::new();
        for op in &ops {
            apply(&mut store, op);
        }

        for rank in store.list_ranks().unwrap() {
            store.calculate_scores(rank.id).unwrap();
            let first = store.get_rank(rank.id).unwrap();
            store.calculate_scores(rank.id).unwrap();
            let second = store.get_rank(rank.id).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
