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

use std::num::NonZeroUsize;

use super::{non_zero_source_blocks, Codec};
use crate::{error::ConfigError, index_set::IndexSet, rng::BlockRng};

/// Random linear fountain: every source block goes into an encoded block on a fair coin
/// flip, so the expected degree is K/2.
#[derive(Clone, Debug)]
pub struct BinaryCodec {
    source_blocks: NonZeroUsize,
}

impl BinaryCodec {
    pub fn new(source_blocks: usize) -> Result<BinaryCodec, ConfigError> {
        Ok(BinaryCodec {
            source_blocks: non_zero_source_blocks(source_blocks)?,
        })
    }
}

impl Codec for BinaryCodec {
    fn source_blocks(&self) -> NonZeroUsize {
        self.source_blocks
    }

    fn pick_indices(&self, block_id: i64) -> IndexSet {
        let num_blocks = self.source_blocks.get();

        let mut rng = BlockRng::from_block_id(block_id);
        let mut indices = IndexSet::with_capacity(num_blocks);

        for b in 0..num_blocks {
            if rng.coin() {
                indices.append(b);
            }
        }

        indices
    }
}
