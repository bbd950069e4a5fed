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

// Feeds the decoder blocks it can't use and checks that decoding carries on regardless.

use std::num::NonZeroUsize;

use fountain_codec::{
    Block, BlockError, Codec, DegreeDistribution, EncodedBlock, Encoder, IndexSet, LubyCodec,
};
use rand::{thread_rng, RngCore};

// Behaves like the wrapped codec, except that negative block ids select a block past the
// end of the intermediate blocks.
#[derive(Debug)]
struct OutOfRangeCodec {
    inner: LubyCodec,
}

impl Codec for OutOfRangeCodec {
    fn source_blocks(&self) -> NonZeroUsize {
        self.inner.source_blocks()
    }

    fn pick_indices(&self, block_id: i64) -> IndexSet {
        let mut indices = self.inner.pick_indices(block_id);

        if block_id < 0 {
            indices.insert(self.intermediate_blocks() + 3);
        }

        indices
    }
}

fn luby(source_blocks: usize) -> LubyCodec {
    LubyCodec::new(
        source_blocks,
        DegreeDistribution::ideal_soliton(source_blocks).unwrap(),
    )
    .unwrap()
}

fn random_message(len: usize) -> Vec<u8> {
    let mut message = vec![0u8; len];
    thread_rng().fill_bytes(&mut message);
    message
}

#[test]
fn test_index_out_of_range() {
    let codec = OutOfRangeCodec { inner: luby(8) };
    let message = random_message(100);

    let encoder = Encoder::new(&codec, &message);
    let mut decoder = codec.new_decoder(message.len());

    let out_of_range =
        |block_id: i64| EncodedBlock::new(block_id, Block::zeroed(encoder.block_len()));

    for block_id in 1..=1000 {
        assert_eq!(
            decoder.add_block(&out_of_range(-block_id)),
            Err(BlockError::IndexOutOfRange {
                index: 11,
                num_blocks: 8
            })
        );
    }

    assert!(!decoder.determined());
    assert_eq!(decoder.stats().malformed, 1000);
    assert_eq!(decoder.stats().stored, 0);

    let mut block_id = 0;
    while !decoder.determined() {
        assert!(decoder.add_block(&encoder.encode_block(block_id)).is_ok());

        let determined = decoder.determined();
        assert_eq!(decoder.add_blocks([&out_of_range(-5)]), determined);

        block_id += 1;
    }

    assert_eq!(decoder.decode(), Some(message));
}

#[test]
fn test_wrong_length() {
    let codec = luby(4);
    let message = random_message(40);

    let mut decoder = codec.new_decoder(message.len());

    for len in [0, 9, 11, 1000] {
        assert_eq!(
            decoder.add_block(&EncodedBlock::new(1, Block::new(vec![0; len]))),
            Err(BlockError::LengthMismatch {
                block_id: 1,
                expected: 10,
                actual: len
            })
        );
    }

    assert_eq!(decoder.stats().malformed, 4);
    assert_eq!(decoder.stats().stored, 0);
}

#[test]
fn test_corrupted_duplicate() {
    let codec = luby(16);
    let message = random_message(1000);

    let encoder = Encoder::new(&codec, &message);
    let mut decoder = codec.new_decoder(message.len());

    let mut block_id = 0;
    while !decoder.determined() {
        let block = encoder.encode_block(block_id);

        if decoder.add_blocks([&block]) {
            break;
        }

        // A second copy with flipped bits contradicts the first one.
        let mut corrupted = block.clone();
        corrupted.payload.xor_eq(&Block::new(vec![0xff; 3]));

        assert_eq!(
            decoder.add_block(&corrupted),
            Err(BlockError::Inconsistent { block_id })
        );

        block_id += 1;
    }

    assert_eq!(decoder.stats().inconsistent, block_id as usize);

    // Once determined, every corrupted block is caught.
    for id in 0..100 {
        let mut corrupted = encoder.encode_block(id);
        corrupted.payload.xor_eq(&Block::new(vec![1]));

        assert!(decoder.add_blocks([&corrupted]));
    }

    assert_eq!(decoder.stats().inconsistent, block_id as usize + 100);
    assert_eq!(decoder.decode(), Some(message));
}
