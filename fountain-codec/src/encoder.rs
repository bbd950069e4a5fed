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

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    block::{Block, EncodedBlock},
    codec::Codec,
    xor_eq::{self, xor_eq},
};

// Batches at least this large are encoded in parallel.
pub const PARALLEL_ENCODE_THRESHOLD: usize = 64;

/// Produces encoded blocks for one message.
///
/// The intermediate blocks are computed once up front and shared read-only by every
/// [`Encoder::encode_block`] call.
#[derive(Debug)]
pub struct Encoder<'a, C: ?Sized> {
    codec: &'a C,
    blocks: Vec<Block>,
    block_len: usize,
}

impl<'a, C: Codec + ?Sized> Encoder<'a, C> {
    pub fn new(codec: &'a C, message: &[u8]) -> Encoder<'a, C> {
        let block_len = codec.partition(message.len()).working_len();
        let blocks = codec.generate_intermediate_blocks(message);

        tracing::debug!(
            message_len = message.len(),
            num_blocks = blocks.len(),
            block_len,
            "created encoder"
        );

        Encoder {
            codec,
            blocks,
            block_len,
        }
    }

    /// Length of every encoded block's payload.
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    pub fn intermediate_blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// XOR of the intermediate blocks `block_id` selects.  An empty selection gives an
    /// all-zero payload.
    pub fn encode_block(&self, block_id: i64) -> EncodedBlock {
        let mut payload = vec![0; self.block_len];

        for chunk in self
            .codec
            .pick_indices(block_id)
            .iter()
            .map(|index| self.blocks[*index].data())
            .collect::<Vec<&[u8]>>()
            .chunks(xor_eq::MAX_SOURCES)
        {
            xor_eq(&mut payload, chunk);
        }

        EncodedBlock::new(block_id, Block::new(payload))
    }

    /// One encoded block per id, in the order given.
    pub fn encode(&self, block_ids: &[i64]) -> Vec<EncodedBlock>
    where
        C: Sync,
    {
        if block_ids.len() >= PARALLEL_ENCODE_THRESHOLD {
            block_ids
                .par_iter()
                .map(|block_id| self.encode_block(*block_id))
                .collect()
        } else {
            block_ids
                .iter()
                .map(|block_id| self.encode_block(*block_id))
                .collect()
        }
    }
}

/// Encodes `message` into one block per id in `block_ids`.
pub fn encode<C: Codec + Sync + ?Sized>(
    codec: &C,
    message: &[u8],
    block_ids: &[i64],
) -> Vec<EncodedBlock> {
    Encoder::new(codec, message).encode(block_ids)
}
