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

use thiserror::Error;

/// Rejected codec or degree distribution parameters.  Always surfaced at construction time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("number of source blocks must be at least 1")]
    NoSourceBlocks,

    #[error("degree distribution must cover at least degree 1")]
    EmptyDistribution,

    #[error("degree distribution entry {index} is {value}, which is not a probability")]
    InvalidProbability { index: usize, value: f64 },

    #[error("degree distribution decreases at degree {index}")]
    NonMonotonic { index: usize },

    #[error("degree distribution sums to {total}, expected 1")]
    NotNormalized { total: f64 },

    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// A received block that the decoder could not use.  The decoder skips such blocks and
/// carries on; none of these are fatal to a decode session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("index {index} is outside the {num_blocks} blocks being solved for")]
    IndexOutOfRange { index: usize, num_blocks: usize },

    #[error("block {block_id} has {actual} bytes, expected {expected}")]
    LengthMismatch {
        block_id: i64,
        expected: usize,
        actual: usize,
    },

    #[error("block {block_id} contradicts the blocks received before it")]
    Inconsistent { block_id: i64 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("frame needs {needed} bytes, only {available} available")]
    TooShort { needed: usize, available: usize },

    #[error("frame length {0} does not fit in memory")]
    LengthOverflow(u64),
}
