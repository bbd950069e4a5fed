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

use std::slice;

use crate::xor_eq::xor_eq;

/// A run of bytes taking part in the XOR transform.
///
/// `data` holds the stored bytes and `padding` counts further trailing bytes that are
/// logically part of the block but are always zero and never stored.  The block's total
/// size is `data.len() + padding`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    data: Vec<u8>,
    padding: usize,
}

impl Block {
    pub fn new(data: Vec<u8>) -> Block {
        Block { data, padding: 0 }
    }

    pub fn with_padding(data: Vec<u8>, padding: usize) -> Block {
        Block { data, padding }
    }

    /// An all-zero block of `len` bytes, stored in full so XORing into it never reallocates.
    pub fn zeroed(len: usize) -> Block {
        Block {
            data: vec![0; len],
            padding: 0,
        }
    }

    /// An all-zero block of `len` bytes with nothing stored.
    pub fn padding_only(len: usize) -> Block {
        Block {
            data: Vec::new(),
            padding: len,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Number of stored bytes.
    pub fn length(&self) -> usize {
        self.data.len()
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Total size, stored bytes plus padding.
    pub fn len(&self) -> usize {
        self.data.len() + self.padding
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|byte| *byte == 0)
    }

    pub fn pad(&mut self, padding: usize) {
        self.padding += padding;
    }

    /// XORs `other` into `self`.  `other`'s padding reads as zero.  If `other` stores more
    /// bytes than `self`, `self` is zero-extended first and gives up that much padding.
    pub fn xor_eq(&mut self, other: &Block) {
        let len = self.data.len();
        let other_len = other.data.len();

        if len < other_len {
            let grow = other_len - len;

            self.data.resize(other_len, 0);
            self.padding = self.padding.saturating_sub(grow);
        }

        xor_eq(&mut self.data, slice::from_ref(&other.data()));
    }

    /// Appends the first `len` bytes of the block to `out`, reading padding as zero.
    pub fn copy_prefix_to(&self, out: &mut Vec<u8>, len: usize) {
        let stored = len.min(self.data.len());

        out.extend_from_slice(&self.data[..stored]);
        out.resize(out.len() + (len - stored), 0);
    }
}

/// The unit produced by an encoder and consumed by a decoder.
///
/// `block_id` identifies the block in the stream and also seeds the choice of source
/// blocks XORed into `payload`, so the decoder recovers the neighbour set from it alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedBlock {
    pub block_id: i64,
    pub payload: Block,
}

impl EncodedBlock {
    pub fn new(block_id: i64, payload: Block) -> EncodedBlock {
        EncodedBlock { block_id, payload }
    }
}
