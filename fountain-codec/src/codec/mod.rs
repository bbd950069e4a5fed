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

use crate::{
    block::Block, decoder::Decoder, error::ConfigError, index_set::IndexSet, partition::Partition,
};

pub mod binary;
pub mod luby;
pub mod online;

pub use binary::BinaryCodec;
pub use luby::LubyCodec;
pub use online::OnlineCodec;

/// A fountain code: how a message becomes intermediate blocks, and which of those blocks
/// every encoded block is the XOR of.
///
/// Implementations are immutable once built.  [`Codec::pick_indices`] must return the same
/// set for the same block id on every call and in every process, since the decoder
/// recovers the neighbours of a block from its id alone.
pub trait Codec {
    /// Number of blocks the message is split into.
    fn source_blocks(&self) -> NonZeroUsize;

    /// Number of blocks encoded blocks are drawn from, and the decoder solves for.  The
    /// first [`Codec::source_blocks`] of these are the source blocks.
    fn intermediate_blocks(&self) -> usize {
        self.source_blocks().get()
    }

    fn partition(&self, message_len: usize) -> Partition {
        Partition::new(message_len, self.source_blocks())
    }

    /// Splits `message` into source blocks equalized to the working length, followed by
    /// any blocks derived from them.
    fn generate_intermediate_blocks(&self, message: &[u8]) -> Vec<Block> {
        self.partition(message.len()).split_equalized(message)
    }

    /// The intermediate blocks XORed into the encoded block `block_id`.
    fn pick_indices(&self, block_id: i64) -> IndexSet;

    /// Equations over the intermediate blocks that always XOR to zero.  The decoder starts
    /// out knowing these.
    fn constraint_equations(&self) -> Vec<IndexSet> {
        Vec::new()
    }

    fn new_decoder(&self, message_len: usize) -> Decoder<'_, Self>
    where
        Self: Sized,
    {
        Decoder::new(self, message_len)
    }
}

/// One of the codecs this crate implements, picked at runtime.
#[derive(Clone, Debug)]
pub enum AnyCodec {
    Binary(BinaryCodec),
    Luby(LubyCodec),
    Online(OnlineCodec),
}

impl AnyCodec {
    pub fn kind(&self) -> &'static str {
        match self {
            AnyCodec::Binary(_) => "binary",
            AnyCodec::Luby(_) => "luby",
            AnyCodec::Online(_) => "online",
        }
    }
}

impl Codec for AnyCodec {
    fn source_blocks(&self) -> NonZeroUsize {
        match self {
            AnyCodec::Binary(codec) => codec.source_blocks(),
            AnyCodec::Luby(codec) => codec.source_blocks(),
            AnyCodec::Online(codec) => codec.source_blocks(),
        }
    }

    fn intermediate_blocks(&self) -> usize {
        match self {
            AnyCodec::Binary(codec) => codec.intermediate_blocks(),
            AnyCodec::Luby(codec) => codec.intermediate_blocks(),
            AnyCodec::Online(codec) => codec.intermediate_blocks(),
        }
    }

    fn generate_intermediate_blocks(&self, message: &[u8]) -> Vec<Block> {
        match self {
            AnyCodec::Binary(codec) => codec.generate_intermediate_blocks(message),
            AnyCodec::Luby(codec) => codec.generate_intermediate_blocks(message),
            AnyCodec::Online(codec) => codec.generate_intermediate_blocks(message),
        }
    }

    fn pick_indices(&self, block_id: i64) -> IndexSet {
        match self {
            AnyCodec::Binary(codec) => codec.pick_indices(block_id),
            AnyCodec::Luby(codec) => codec.pick_indices(block_id),
            AnyCodec::Online(codec) => codec.pick_indices(block_id),
        }
    }

    fn constraint_equations(&self) -> Vec<IndexSet> {
        match self {
            AnyCodec::Binary(codec) => codec.constraint_equations(),
            AnyCodec::Luby(codec) => codec.constraint_equations(),
            AnyCodec::Online(codec) => codec.constraint_equations(),
        }
    }
}

impl From<BinaryCodec> for AnyCodec {
    fn from(codec: BinaryCodec) -> AnyCodec {
        AnyCodec::Binary(codec)
    }
}

impl From<LubyCodec> for AnyCodec {
    fn from(codec: LubyCodec) -> AnyCodec {
        AnyCodec::Luby(codec)
    }
}

impl From<OnlineCodec> for AnyCodec {
    fn from(codec: OnlineCodec) -> AnyCodec {
        AnyCodec::Online(codec)
    }
}

pub(crate) fn non_zero_source_blocks(source_blocks: usize) -> Result<NonZeroUsize, ConfigError> {
    NonZeroUsize::new(source_blocks).ok_or(ConfigError::NoSourceBlocks)
}
