//! Contiguous block packing for the schedule layout
//!
//! Greedily groups intervals into chains (one horizontal track each): a chain
//! starts from the earliest-queued unplaced block and keeps taking the next
//! block that starts at or after the current one ends, and strictly after the
//! current one starts, so empty blocks never stack. Among candidates the
//! earliest start wins, then the longest duration, then input order.
//!
//! This is a greedy approximation; it does not guarantee the minimum number
//! of chains.

use crate::types::LayoutBlock;
use std::collections::VecDeque;

pub struct ContiguousBlockPacker;

impl ContiguousBlockPacker {
    /// Pack blocks into non-overlapping chains
    ///
    /// Every input block lands in exactly one chain; chain seeds follow the
    /// input order of whatever is still unplaced.
    pub fn pack<T>(blocks: Vec<LayoutBlock<T>>) -> Vec<Vec<LayoutBlock<T>>> {
        let mut unplaced: VecDeque<LayoutBlock<T>> = blocks.into();
        let mut chains = Vec::new();

        while let Some(seed) = unplaced.pop_front() {
            let mut current = (seed.start, seed.end);
            let mut chain = vec![seed];

            while let Some(index) = Self::next_candidate(&unplaced, current) {
                let Some(next) = unplaced.remove(index) else {
                    break;
                };
                current = (next.start, next.end);
                chain.push(next);
            }

            chains.push(chain);
        }

        chains
    }

    /// Index of the best follower for a chain whose last block spans `(start, end)`
    fn next_candidate<T>(
        unplaced: &VecDeque<LayoutBlock<T>>,
        (start, end): (i64, i64),
    ) -> Option<usize> {
        unplaced
            .iter()
            .enumerate()
            .filter(|(_, b)| b.start >= end && b.start > start)
            .min_by_key(|(i, b)| (b.start, b.start - b.end, *i))
            .map(|(i, _)| i)
    }
}
