//! Property tests for drop zones and moves

use std::collections::HashSet;

use cuechain_core::ChainError;
use cuechain_core::drag_drop::{
    DropConfig, DropPosition, TargetKind, can_drop, is_valid_drop_position, perform_move,
};
use cuechain_core::models::MAX_GROUP_DEPTH;
use cuechain_core::selection::top_most_ids;
use cuechain_core::tree::{find_item, find_path, flatten, get_at, max_group_depth, validate_chain};
use proptest::prelude::*;
use proptest::sample::Index;

use super::strategies::{chain_strategy, pick_ids};

fn position_strategy() -> impl Strategy<Value = DropPosition> {
    prop_oneof![
        Just(DropPosition::Before),
        Just(DropPosition::Into),
        Just(DropPosition::After),
    ]
}

fn drop_config_strategy() -> impl Strategy<Value = DropConfig> {
    (16.0..64.0f64, 0.05..0.45f64, 0.3..0.7f64).prop_map(|(row_height, group, leaf)| DropConfig {
        row_height,
        group_before_ratio: group,
        leaf_split_ratio: leaf,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Resolved positions are always valid for their target kind: never
    /// Into on a leaf, never After on a group.
    #[test]
    fn prop_resolved_position_is_valid(
        fraction in 0.0..=1.0f64,
        is_group in any::<bool>(),
        config in drop_config_strategy(),
    ) {
        let kind = TargetKind::from_is_group(is_group);
        let position = config.resolve(fraction, kind);
        prop_assert!(is_valid_drop_position(position, kind));
        if is_group {
            prop_assert_ne!(position, DropPosition::After);
        } else {
            prop_assert_ne!(position, DropPosition::Into);
        }
    }

    /// A successful move lands the top-most dragged items as one run, in
    /// their original document order, without breaking any invariant.
    #[test]
    fn prop_move_preserves_order_and_invariants(
        chain in chain_strategy(),
        picks in prop::collection::vec(any::<Index>(), 1..5),
        target in any::<Index>(),
        position in position_strategy(),
    ) {
        let dragging = pick_ids(&chain, &picks);
        let ids = flatten(&chain);
        let target = ids[target.index(ids.len())];
        let moved = top_most_ids(&dragging, &chain);

        match perform_move(&chain, &dragging, target, position) {
            Ok(next) => {
                prop_assert!(can_drop(&chain, &dragging, target));
                prop_assert_eq!(validate_chain(&next), Ok(()));
                prop_assert!(max_group_depth(&next) <= MAX_GROUP_DEPTH);

                let before: HashSet<_> = ids.iter().copied().collect();
                let after: HashSet<_> = flatten(&next).into_iter().collect();
                prop_assert_eq!(before, after);

                let first = find_path(&next, moved[0]).unwrap();
                for (offset, id) in moved.iter().enumerate() {
                    let expected = first.with_last_index(first.last_index().unwrap() + offset);
                    prop_assert_eq!(get_at(&next, &expected).map(|item| item.id()), Ok(*id));
                }
            }
            Err(err) => {
                prop_assert!(err.is_rejection(), "unexpected error {:?}", err);
                if !can_drop(&chain, &dragging, target) {
                    prop_assert_eq!(err, ChainError::CyclicDrop);
                }
            }
        }
    }

    /// Dropping onto any dragged item or inside a dragged group is refused.
    #[test]
    fn prop_drop_into_own_subtree_is_refused(
        chain in chain_strategy(),
        picks in prop::collection::vec(any::<Index>(), 1..4),
        position in position_strategy(),
    ) {
        let dragging = pick_ids(&chain, &picks);
        for target in flatten(&chain) {
            let inside = dragging.contains(&target)
                || dragging.iter().any(|d| {
                    find_item(&chain, *d).is_some_and(|item| {
                        let mut hit = false;
                        item.walk(&mut |node| hit |= node.id() == target);
                        hit
                    })
                });
            prop_assert_eq!(can_drop(&chain, &dragging, target), !inside);
            if inside {
                prop_assert_eq!(
                    perform_move(&chain, &dragging, target, position),
                    Err(ChainError::CyclicDrop)
                );
            }
        }
    }
}
