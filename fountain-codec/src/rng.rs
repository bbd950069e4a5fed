// Copyright (C) 2025 Category Labs, Inc.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::index_set::IndexSet;

/// The generator every index selection is drawn from.
///
/// Encoder and decoder must draw the same values for the same block id, so everything
/// here is part of the wire protocol:
///
/// - the stream is `ChaCha8Rng::seed_from_u64(block_id as u64)`
/// - [`BlockRng::coin`] is the low bit of the next 32-bit word
/// - [`BlockRng::uniform`] is the top 53 bits of the next 64-bit word, scaled into `[0, 1)`
/// - [`BlockRng::below`] is a widening multiply of the next 64-bit word, rejecting draws whose
///   low half falls under `2^64 mod n`
/// - [`BlockRng::sample_distinct`] is a partial Fisher-Yates shuffle over `0..max` driven by
///   [`BlockRng::below`]
///
/// A fresh instance is built for every call, so there is no shared state between threads.
pub struct BlockRng {
    inner: ChaCha8Rng,
}

impl BlockRng {
    pub fn from_block_id(block_id: i64) -> BlockRng {
        BlockRng::from_seed(block_id)
    }

    pub fn from_seed(seed: i64) -> BlockRng {
        BlockRng {
            inner: ChaCha8Rng::seed_from_u64(seed as u64),
        }
    }

    pub fn coin(&mut self) -> bool {
        self.inner.next_u32() & 1 == 1
    }

    pub fn uniform(&mut self) -> f64 {
        (self.inner.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform in `0..n`.  `n` must be non-zero.
    pub fn below(&mut self, n: u64) -> u64 {
        assert!(n > 0);

        let threshold = n.wrapping_neg() % n;

        loop {
            let m = u128::from(self.inner.next_u64()) * u128::from(n);

            if (m as u64) >= threshold {
                return (m >> 64) as u64;
            }
        }
    }

    /// `count` distinct values from `0..max`, ascending.  Asking for at least `max` values
    /// returns all of `0..max` without drawing.
    pub fn sample_distinct(&mut self, count: usize, max: usize) -> IndexSet {
        if count >= max {
            return IndexSet::full(max);
        }

        let mut pool: Vec<usize> = (0..max).collect();
        let mut picked = Vec::with_capacity(count);

        for i in 0..count {
            let live = max - i;
            let j = self.below(live as u64) as usize;

            picked.push(pool[j]);
            pool[j] = pool[live - 1];
        }

        IndexSet::from_unsorted(picked)
    }
}
