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
use crate::{
    block::Block, degree::DegreeDistribution, error::ConfigError, index_set::IndexSet,
    rng::BlockRng,
};

// Auxiliary blocks per source block, per unit of quality and epsilon.
pub const AUX_BLOCK_FACTOR: f64 = 0.55;

/// Online code (Maymounkov).
///
/// The K source blocks are first expanded with `ceil(0.55 * quality * epsilon * K)`
/// auxiliary blocks: every source block is XORed into `quality` distinct auxiliary blocks
/// picked by a generator seeded with `seed`.  Encoded blocks are then drawn from all
/// `K + aux` intermediate blocks with the online degree distribution.
#[derive(Clone, Debug)]
pub struct OnlineCodec {
    source_blocks: NonZeroUsize,
    epsilon: f64,
    quality: usize,
    seed: i64,
    degree_distribution: DegreeDistribution,
    num_aux_blocks: usize,
    // For every source block, the auxiliary blocks it is XORed into.
    aux_map: Vec<IndexSet>,
}

impl OnlineCodec {
    pub fn new(
        source_blocks: usize,
        epsilon: f64,
        quality: usize,
        seed: i64,
    ) -> Result<OnlineCodec, ConfigError> {
        let source_blocks = non_zero_source_blocks(source_blocks)?;

        if quality == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "quality",
                value: 0.0,
            });
        }

        let degree_distribution = DegreeDistribution::online(epsilon)?;

        let num_aux_blocks =
            (AUX_BLOCK_FACTOR * quality as f64 * epsilon * source_blocks.get() as f64).ceil()
                as usize;

        let mut rng = BlockRng::from_seed(seed);
        let aux_map = (0..source_blocks.get())
            .map(|_| rng.sample_distinct(quality, num_aux_blocks))
            .collect();

        Ok(OnlineCodec {
            source_blocks,
            epsilon,
            quality,
            seed,
            degree_distribution,
            num_aux_blocks,
            aux_map,
        })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn quality(&self) -> usize {
        self.quality
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn num_aux_blocks(&self) -> usize {
        self.num_aux_blocks
    }

    pub fn degree_distribution(&self) -> &DegreeDistribution {
        &self.degree_distribution
    }

    /// Rough number of encoded blocks a decoder needs, `(1 + epsilon)` times the number of
    /// intermediate blocks.
    pub fn estimate_decode_blocks_needed(&self) -> usize {
        ((1.0 + self.epsilon) * self.intermediate_blocks() as f64).ceil() as usize
    }
}

impl Codec for OnlineCodec {
    fn source_blocks(&self) -> NonZeroUsize {
        self.source_blocks
    }

    fn intermediate_blocks(&self) -> usize {
        self.source_blocks.get() + self.num_aux_blocks
    }

    fn generate_intermediate_blocks(&self, message: &[u8]) -> Vec<Block> {
        let partition = self.partition(message.len());

        let mut blocks = partition.split_equalized(message);

        let mut aux_blocks = vec![Block::zeroed(partition.working_len()); self.num_aux_blocks];
        for (source, aux_indices) in blocks.iter().zip(&self.aux_map) {
            for a in aux_indices {
                aux_blocks[*a].xor_eq(source);
            }
        }

        blocks.append(&mut aux_blocks);

        blocks
    }

    fn pick_indices(&self, block_id: i64) -> IndexSet {
        let mut rng = BlockRng::from_block_id(block_id);

        let degree = self.degree_distribution.pick_degree(rng.uniform());

        rng.sample_distinct(degree, self.intermediate_blocks())
    }

    fn constraint_equations(&self) -> Vec<IndexSet> {
        let num_source_blocks = self.source_blocks.get();

        let mut equations = vec![IndexSet::new(); self.num_aux_blocks];

        for (source, aux_indices) in self.aux_map.iter().enumerate() {
            for a in aux_indices {
                equations[*a].append(source);
            }
        }

        for (a, equation) in equations.iter_mut().enumerate() {
            equation.append(num_source_blocks + a);
        }

        equations
    }
}
