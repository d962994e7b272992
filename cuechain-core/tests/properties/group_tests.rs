//! Property tests for grouping and ungrouping

use cuechain_core::ChainError;
use cuechain_core::group::{create_group, ungroup};
use cuechain_core::models::MAX_GROUP_DEPTH;
use cuechain_core::tree::{find_path, find_paths, flatten, max_group_depth, validate_chain};
use proptest::prelude::*;
use proptest::sample::Index;

use super::strategies::{chain_strategy, pick_ids};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(150))]

    /// Grouping root items and ungrouping the result restores the root
    /// sequence, ids and order included.
    #[test]
    fn prop_ungroup_inverts_group(
        chain in chain_strategy(),
        picks in prop::collection::vec(any::<Index>(), 1..5),
    ) {
        let roots = chain.root_ids();
        let ids: Vec<_> = picks.iter().map(|pick| roots[pick.index(roots.len())]).collect();

        match create_group(&chain, ids) {
            Ok((grouped, group_id)) => {
                prop_assert_eq!(validate_chain(&grouped), Ok(()));
                let restored = ungroup(&grouped, group_id).unwrap();
                prop_assert_eq!(restored.root_ids(), roots);
                prop_assert_eq!(flatten(&restored), flatten(&chain));
            }
            Err(err) => {
                prop_assert!(
                    matches!(err, ChainError::DepthExceeded { .. }),
                    "unexpected error {:?}",
                    err
                );
            }
        }
    }

    /// Grouping arbitrary items succeeds exactly when they share a parent,
    /// and never breaks the invariants.
    #[test]
    fn prop_group_requires_one_parent(
        chain in chain_strategy(),
        picks in prop::collection::vec(any::<Index>(), 1..5),
    ) {
        let ids = pick_ids(&chain, &picks);
        let paths: Vec<_> = find_paths(&chain, &ids).into_values().collect();
        let siblings = paths.iter().all(|path| path.is_sibling_of(&paths[0]));

        match create_group(&chain, ids.iter().copied()) {
            Ok((grouped, group_id)) => {
                prop_assert!(siblings);
                prop_assert_eq!(validate_chain(&grouped), Ok(()));
                prop_assert!(max_group_depth(&grouped) <= MAX_GROUP_DEPTH);
                let group_path = find_path(&grouped, group_id).unwrap();
                let first = paths.iter().min().unwrap();
                prop_assert_eq!(&group_path, first);
            }
            Err(ChainError::MixedParents) => prop_assert!(!siblings),
            Err(err) => prop_assert!(
                matches!(err, ChainError::DepthExceeded { .. }),
                "unexpected error {:?}",
                err
            ),
        }
    }
}
