//! Property tests for click semantics and normalization

use std::collections::HashSet;

use cuechain_core::selection::{
    ClickMode, SelectionState, apply_click, normalize, select_all, top_most_ids,
};
use cuechain_core::tree::{descendant_ids, flatten};
use proptest::prelude::*;
use proptest::sample::Index;

use super::strategies::{chain_strategy, pick_ids};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Shift-clicking y after clicking x selects the same set as
    /// shift-clicking x after clicking y.
    #[test]
    fn prop_range_is_commutative_in_endpoints(
        chain in chain_strategy(),
        x in any::<Index>(),
        y in any::<Index>(),
    ) {
        let ids = flatten(&chain);
        let x = ids[x.index(ids.len())];
        let y = ids[y.index(ids.len())];

        let from_x = apply_click(&chain, &SelectionState::new(), x, ClickMode::Single);
        let from_x = apply_click(&chain, &from_x, y, ClickMode::Range);
        let from_y = apply_click(&chain, &SelectionState::new(), y, ClickMode::Single);
        let from_y = apply_click(&chain, &from_y, x, ClickMode::Range);

        prop_assert_eq!(from_x.selected_ids(), from_y.selected_ids());
        prop_assert_eq!(from_x.last_selected_id(), Some(x));
        prop_assert_eq!(from_y.last_selected_id(), Some(y));
    }

    /// A range is a contiguous run of the flattened order.
    #[test]
    fn prop_range_is_contiguous(
        chain in chain_strategy(),
        x in any::<Index>(),
        y in any::<Index>(),
    ) {
        let ids = flatten(&chain);
        let (xi, yi) = (x.index(ids.len()), y.index(ids.len()));
        let state = SelectionState::single(ids[xi]);
        let next = apply_click(&chain, &state, ids[yi], ClickMode::Range);

        let expected: HashSet<_> = ids[xi.min(yi)..=xi.max(yi)].iter().copied().collect();
        prop_assert_eq!(next.selected_ids(), &expected);
    }

    /// Normalizing twice changes nothing further.
    #[test]
    fn prop_normalize_is_idempotent(
        chain in chain_strategy(),
        picks in prop::collection::vec(any::<Index>(), 0..10),
    ) {
        let selected = pick_ids(&chain, &picks);
        let once = normalize(&selected, &chain);
        let twice = normalize(&once, &chain);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.is_subset(&selected));
    }

    /// Normalization of a full selection keeps only the root items.
    #[test]
    fn prop_normalize_select_all_is_roots(chain in chain_strategy()) {
        let all = select_all(&chain);
        let roots: HashSet<_> = chain.root_ids().into_iter().collect();
        prop_assert_eq!(normalize(&all, &chain), roots);
    }

    /// No top-most id has an ancestor in the set.
    #[test]
    fn prop_top_most_ids_have_no_selected_ancestor(
        chain in chain_strategy(),
        picks in prop::collection::vec(any::<Index>(), 0..10),
    ) {
        let selected = pick_ids(&chain, &picks);
        let top = top_most_ids(&selected, &chain);
        for id in &top {
            prop_assert!(selected.contains(id));
        }
        for id in &selected {
            let covered = top.iter().any(|t| {
                t == id || descendant_ids(&chain, *t).unwrap_or_default().contains(id)
            });
            prop_assert!(covered);
        }
    }

    /// Toggling an item twice restores the original set.
    #[test]
    fn prop_toggle_twice_restores(
        chain in chain_strategy(),
        picks in prop::collection::vec(any::<Index>(), 0..6),
        clicked in any::<Index>(),
    ) {
        let ids = flatten(&chain);
        let clicked = ids[clicked.index(ids.len())];
        let state = SelectionState::with_ids(pick_ids(&chain, &picks), None);
        let once = apply_click(&chain, &state, clicked, ClickMode::Toggle);
        let twice = apply_click(&chain, &once, clicked, ClickMode::Toggle);
        prop_assert_eq!(twice.selected_ids(), state.selected_ids());
        prop_assert_eq!(twice.last_selected_id(), Some(clicked));
    }
}
