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

// Framing of encoded blocks:
//
// - 8 bytes => block id, i64 little endian
// - 8 bytes => payload length in bytes, u64 little endian
// - rest => payload; padding is written out as NUL bytes

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{block::Block, error::WireError, EncodedBlock};

pub const HEADER_LEN: usize = 16;

impl EncodedBlock {
    pub fn serialized_len(&self) -> usize {
        HEADER_LEN + self.payload.len()
    }

    pub fn serialize_into(&self, buf: &mut BytesMut) {
        buf.reserve(self.serialized_len());

        buf.put_i64_le(self.block_id);
        buf.put_u64_le(self.payload.len() as u64);
        buf.put_slice(self.payload.data());
        buf.put_bytes(0, self.payload.padding());
    }

    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.serialized_len());
        self.serialize_into(&mut buf);
        buf.freeze()
    }

    /// Parses one frame off the front of `cursor`.  On error `cursor` is left untouched.
    pub fn deserialize(cursor: &mut Bytes) -> Result<EncodedBlock, WireError> {
        if cursor.len() < HEADER_LEN {
            return Err(WireError::TooShort {
                needed: HEADER_LEN,
                available: cursor.len(),
            });
        }

        let block_id = i64::from_le_bytes(cursor[0..8].try_into().expect("i64 is 8 bytes"));
        let length = u64::from_le_bytes(cursor[8..16].try_into().expect("u64 is 8 bytes"));

        let needed = usize::try_from(length)
            .ok()
            .and_then(|length| length.checked_add(HEADER_LEN))
            .ok_or(WireError::LengthOverflow(length))?;

        if cursor.len() < needed {
            return Err(WireError::TooShort {
                needed,
                available: cursor.len(),
            });
        }

        cursor.advance(HEADER_LEN);
        let payload = cursor.split_to(needed - HEADER_LEN);

        Ok(EncodedBlock {
            block_id,
            payload: Block::new(payload.to_vec()),
        })
    }
}

/// Parses back-to-back frames until `data` is exhausted.
pub fn deserialize_stream(mut data: Bytes) -> Result<Vec<EncodedBlock>, WireError> {
    let mut blocks = Vec::new();

    while data.has_remaining() {
        blocks.push(EncodedBlock::deserialize(&mut data)?);
    }

    Ok(blocks)
}
