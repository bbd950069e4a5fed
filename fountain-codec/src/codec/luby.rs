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
use crate::{degree::DegreeDistribution, error::ConfigError, index_set::IndexSet, rng::BlockRng};

/// Luby Transform code.
///
/// Each encoded block draws its degree from `degree_distribution` and then that many
/// distinct source blocks, uniformly.  Degrees above K take every source block.
#[derive(Clone, Debug)]
pub struct LubyCodec {
    source_blocks: NonZeroUsize,
    degree_distribution: DegreeDistribution,
}

impl LubyCodec {
    pub fn new(
        source_blocks: usize,
        degree_distribution: DegreeDistribution,
    ) -> Result<LubyCodec, ConfigError> {
        Ok(LubyCodec {
            source_blocks: non_zero_source_blocks(source_blocks)?,
            degree_distribution,
        })
    }

    pub fn degree_distribution(&self) -> &DegreeDistribution {
        &self.degree_distribution
    }
}

impl Codec for LubyCodec {
    fn source_blocks(&self) -> NonZeroUsize {
        self.source_blocks
    }

    fn pick_indices(&self, block_id: i64) -> IndexSet {
        let mut rng = BlockRng::from_block_id(block_id);

        let degree = self.degree_distribution.pick_degree(rng.uniform());

        rng.sample_distinct(degree, self.source_blocks.get())
    }
}
