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

// Fountain (rateless erasure) codes over XOR: binary random linear, Luby Transform and
// online codes, sharing one partitioner, index selector and sparse equation solver.

mod block;
pub use block::{Block, EncodedBlock};

pub mod codec;
pub use codec::{AnyCodec, BinaryCodec, Codec, LubyCodec, OnlineCodec};

pub mod config;
pub use config::{CodecConfig, CodecVariantConfig, DegreeDistributionConfig};

mod decoder;
pub use decoder::{decode, Decoder, DecoderStats};

pub mod degree;
pub use degree::DegreeDistribution;

mod encoder;
pub use encoder::{encode, Encoder, PARALLEL_ENCODE_THRESHOLD};

mod error;
pub use error::{BlockError, ConfigError, WireError};

mod index_set;
pub use index_set::IndexSet;

pub mod matrix;
pub use matrix::{Equation, SparseMatrix};

pub mod partition;
pub use partition::Partition;

pub mod rng;

pub mod wire;
pub use wire::deserialize_stream;

pub mod xor_eq;
