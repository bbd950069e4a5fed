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

use crate::{
    block::{Block, EncodedBlock},
    codec::Codec,
    error::BlockError,
    matrix::{Equation, SparseMatrix},
    partition::Partition,
};

/// Running counts of what a [`Decoder`] did with the blocks it was given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderStats {
    pub received: usize,
    pub stored: usize,
    pub redundant: usize,
    pub inconsistent: usize,
    pub malformed: usize,
}

/// Decode session for one message of a known length.
///
/// Blocks may arrive in any order and may repeat.  Blocks that can't be used are skipped
/// without disturbing what has been received so far.
#[derive(Debug)]
pub struct Decoder<'a, C: ?Sized> {
    codec: &'a C,
    partition: Partition,
    block_len: usize,
    matrix: SparseMatrix,
    stats: DecoderStats,
}

impl<'a, C: Codec + ?Sized> Decoder<'a, C> {
    pub fn new(codec: &'a C, message_len: usize) -> Decoder<'a, C> {
        let partition = codec.partition(message_len);
        let block_len = partition.working_len();

        let mut matrix = SparseMatrix::new(codec.intermediate_blocks());

        for constraint in codec.constraint_equations() {
            if let Err(err) = matrix.add_equation(constraint, Block::padding_only(block_len)) {
                tracing::warn!(?err, "dropped constraint equation");
            }
        }

        tracing::debug!(
            message_len,
            num_unknowns = matrix.width(),
            block_len,
            "created decoder"
        );

        Decoder {
            codec,
            partition,
            block_len,
            matrix,
            stats: DecoderStats::default(),
        }
    }

    /// Length every encoded block's payload must have.
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Feeds one encoded block into the equation system.  On error nothing but the
    /// statistics has changed.
    pub fn add_block(&mut self, block: &EncodedBlock) -> Result<Equation, BlockError> {
        self.stats.received += 1;

        let num_blocks_received = self.stats.received;
        if (num_blocks_received % 100) == 0 {
            tracing::debug!(?num_blocks_received, block_id = block.block_id, "received block");
        } else {
            tracing::trace!(?num_blocks_received, block_id = block.block_id, "received block");
        }

        if block.payload.len() != self.block_len {
            self.stats.malformed += 1;

            return Err(BlockError::LengthMismatch {
                block_id: block.block_id,
                expected: self.block_len,
                actual: block.payload.len(),
            });
        }

        let indices = self.codec.pick_indices(block.block_id);

        match self.matrix.add_equation(indices, block.payload.clone()) {
            Ok(Equation::Stored { pivot }) => {
                self.stats.stored += 1;

                if self.matrix.determined() {
                    let stats = self.stats;
                    tracing::debug!(?stats, "decoder determined");
                }

                Ok(Equation::Stored { pivot })
            }
            Ok(Equation::Redundant) => {
                self.stats.redundant += 1;

                Ok(Equation::Redundant)
            }
            Ok(Equation::Inconsistent) => {
                self.stats.inconsistent += 1;

                Err(BlockError::Inconsistent {
                    block_id: block.block_id,
                })
            }
            Err(err) => {
                self.stats.malformed += 1;

                Err(err)
            }
        }
    }

    /// Feeds every block in `blocks`, skipping the unusable ones, and reports whether the
    /// message can now be decoded.
    pub fn add_blocks<'b>(&mut self, blocks: impl IntoIterator<Item = &'b EncodedBlock>) -> bool {
        for block in blocks {
            if let Err(err) = self.add_block(block) {
                tracing::warn!(block_id = block.block_id, ?err, "skipped block");
            }
        }

        self.determined()
    }

    pub fn determined(&self) -> bool {
        self.matrix.determined()
    }

    /// The message, once enough blocks have arrived.  `None` means keep feeding blocks.
    pub fn decode(&mut self) -> Option<Vec<u8>> {
        let solved = self.matrix.solve()?;

        Some(solved.reconstruct(&self.partition))
    }
}

/// Decodes a message of `message_len` bytes from `blocks`, or `None` if they don't
/// determine it yet.
pub fn decode<C: Codec + ?Sized>(
    codec: &C,
    message_len: usize,
    blocks: &[EncodedBlock],
) -> Option<Vec<u8>> {
    let mut decoder = Decoder::new(codec, message_len);

    decoder.add_blocks(blocks);

    decoder.decode()
}
