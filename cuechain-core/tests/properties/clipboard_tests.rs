//! Property tests for copy, paste and duplicate

use std::collections::HashSet;

use cuechain_core::clipboard::{copy, copy_subtrees, duplicate, paste};
use cuechain_core::tree::{find_item, flatten, validate_chain};
use proptest::prelude::*;
use proptest::sample::Index;

use super::strategies::{chain_strategy, pick_ids, shape, subtree_ids};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Copying never touches the chain, and the buffer holds structurally
    /// identical subtrees under entirely new ids.
    #[test]
    fn prop_copy_is_structural_with_fresh_ids(
        chain in chain_strategy(),
        picks in prop::collection::vec(any::<Index>(), 1..5),
    ) {
        let before = chain.clone();
        let ids = pick_ids(&chain, &picks);
        let originals = copy_subtrees(&chain, &ids);
        let buffer = copy(&chain, &ids);

        prop_assert_eq!(&chain, &before);
        prop_assert_eq!(
            buffer.items().iter().map(shape).collect::<Vec<_>>(),
            originals.iter().map(shape).collect::<Vec<_>>()
        );
        let original_ids = subtree_ids(&originals);
        prop_assert!(subtree_ids(buffer.items()).is_disjoint(&original_ids));
    }

    /// Pasting the same clipboard twice yields three id-disjoint copies.
    #[test]
    fn prop_paste_twice_never_collides(
        chain in chain_strategy(),
        picks in prop::collection::vec(any::<Index>(), 1..5),
    ) {
        let ids = pick_ids(&chain, &picks);
        let buffer = copy(&chain, &ids);
        let buffered = subtree_ids(buffer.items());

        let (once, first) = paste(&chain, &buffer, None).unwrap();
        let (twice, second) = paste(&once, &buffer, None).unwrap();
        prop_assert_eq!(validate_chain(&twice), Ok(()));

        let originals: HashSet<_> = flatten(&chain).into_iter().collect();
        let first_ids = subtree_ids(
            &first.iter().filter_map(|id| find_item(&twice, *id).cloned()).collect::<Vec<_>>(),
        );
        let second_ids = subtree_ids(
            &second.iter().filter_map(|id| find_item(&twice, *id).cloned()).collect::<Vec<_>>(),
        );
        prop_assert_eq!(first_ids.len(), buffered.len());
        prop_assert!(first_ids.is_disjoint(&originals));
        prop_assert!(second_ids.is_disjoint(&originals));
        prop_assert!(first_ids.is_disjoint(&second_ids));
        prop_assert!(first_ids.is_disjoint(&buffered));
        prop_assert_eq!(flatten(&twice).len(), originals.len() + 2 * buffered.len());
    }

    /// Duplicates are structural copies placed right after the originals.
    #[test]
    fn prop_duplicate_copies_structure(
        chain in chain_strategy(),
        picks in prop::collection::vec(any::<Index>(), 1..5),
    ) {
        let ids = pick_ids(&chain, &picks);
        let originals = copy_subtrees(&chain, &ids);
        match duplicate(&chain, &ids) {
            Ok((next, created)) => {
                prop_assert_eq!(validate_chain(&next), Ok(()));
                let copies: Vec<_> = created
                    .iter()
                    .filter_map(|id| find_item(&next, *id))
                    .map(shape)
                    .collect();
                prop_assert_eq!(copies, originals.iter().map(shape).collect::<Vec<_>>());
            }
            Err(err) => prop_assert!(err.is_rejection(), "unexpected error {:?}", err),
        }
    }
}
