//! Property tests for path addressing and surgery

use std::collections::HashSet;

use cuechain_core::models::MAX_GROUP_DEPTH;
use cuechain_core::tree::{
    ItemPath, count_leaves, delete_at_safely, descendant_ids, find_path, find_paths, flatten,
    flatten_visible, get_at, max_group_depth, validate_chain,
};
use proptest::prelude::*;
use proptest::sample::Index;

use super::strategies::{chain_strategy, pick_ids};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Generated chains satisfy the invariants the engine relies on.
    #[test]
    fn prop_generated_chains_are_valid(chain in chain_strategy()) {
        prop_assert_eq!(validate_chain(&chain), Ok(()));
        prop_assert!(max_group_depth(&chain) <= MAX_GROUP_DEPTH);
    }

    /// Every flattened id resolves to a path addressing that same item,
    /// and paths come out in ascending (document) order.
    #[test]
    fn prop_flatten_matches_paths(chain in chain_strategy()) {
        let ids = flatten(&chain);
        let unique: HashSet<_> = ids.iter().copied().collect();
        prop_assert_eq!(unique.len(), ids.len());

        let mut previous: Option<ItemPath> = None;
        for id in &ids {
            let path = find_path(&chain, *id);
            prop_assert!(path.is_some());
            let path = path.unwrap();
            prop_assert_eq!(get_at(&chain, &path).map(|item| item.id()), Ok(*id));
            if let Some(previous) = &previous {
                prop_assert!(previous < &path);
            }
            previous = Some(path);
        }
    }

    /// The batched lookup agrees with one lookup per id.
    #[test]
    fn prop_find_paths_agrees_with_find_path(
        chain in chain_strategy(),
        picks in prop::collection::vec(any::<Index>(), 0..6),
    ) {
        let ids = pick_ids(&chain, &picks);
        let paths = find_paths(&chain, &ids);
        prop_assert_eq!(paths.len(), ids.len());
        for (id, path) in paths {
            prop_assert_eq!(find_path(&chain, id), Some(path));
        }
    }

    /// The visible order is the full order minus children of collapsed
    /// groups.
    #[test]
    fn prop_visible_is_subsequence_of_flatten(chain in chain_strategy()) {
        let all = flatten(&chain);
        let visible = flatten_visible(&chain);
        let mut cursor = all.iter();
        for id in &visible {
            prop_assert!(cursor.any(|candidate| candidate == id));
        }
        prop_assert_eq!(all.first(), visible.first());
    }

    /// Deleting a batch removes exactly the requested subtrees.
    #[test]
    fn prop_delete_safely_removes_exactly_the_subtrees(
        chain in chain_strategy(),
        picks in prop::collection::vec(any::<Index>(), 0..6),
    ) {
        let ids = pick_ids(&chain, &picks);
        let mut doomed = ids.clone();
        for id in &ids {
            doomed.extend(descendant_ids(&chain, *id).unwrap_or_default());
        }

        let paths: Vec<ItemPath> = find_paths(&chain, &ids).into_values().collect();
        let next = delete_at_safely(&chain, &paths);

        let expected: Vec<_> = flatten(&chain)
            .into_iter()
            .filter(|id| !doomed.contains(id))
            .collect();
        prop_assert_eq!(flatten(&next), expected);
        prop_assert_eq!(validate_chain(&next), Ok(()));
    }

    /// Leaf counts add up across the root sequence.
    #[test]
    fn prop_leaf_count_sums_over_roots(chain in chain_strategy()) {
        let per_root: usize = chain.items().iter().map(|item| item.leaf_count()).sum();
        prop_assert_eq!(count_leaves(&chain), per_root);
        let leaves = flatten(&chain)
            .into_iter()
            .filter(|id| {
                find_path(&chain, *id)
                    .and_then(|path| get_at(&chain, &path).ok().map(|item| item.is_leaf()))
                    .unwrap_or(false)
            })
            .count();
        prop_assert_eq!(count_leaves(&chain), leaves);
    }
}
