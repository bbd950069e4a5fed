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

use crate::block::Block;

/// Split of a message into long and short source blocks, after RFC 5053 section 5.3.1.2.
///
/// The first `num_long` blocks are `long_len` bytes, the following `num_short` blocks are
/// `short_len` bytes.  A length whose count is zero is reported as zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    pub long_len: usize,
    pub short_len: usize,
    pub num_long: usize,
    pub num_short: usize,
}

impl Partition {
    pub fn new(total_len: usize, num_blocks: NonZeroUsize) -> Partition {
        let num_blocks = num_blocks.get();

        let mut long_len = total_len.div_ceil(num_blocks);
        let mut short_len = total_len / num_blocks;

        let num_long = total_len - short_len * num_blocks;
        let num_short = num_blocks - num_long;

        if num_long == 0 {
            long_len = 0;
        }
        if num_short == 0 {
            short_len = 0;
        }

        Partition {
            long_len,
            short_len,
            num_long,
            num_short,
        }
    }

    pub fn num_blocks(&self) -> usize {
        self.num_long + self.num_short
    }

    pub fn total_len(&self) -> usize {
        self.num_long * self.long_len + self.num_short * self.short_len
    }

    /// The common length every source block is XORed at.
    pub fn working_len(&self) -> usize {
        self.long_len.max(self.short_len)
    }

    fn block_len(&self, index: usize) -> usize {
        if index < self.num_long {
            self.long_len
        } else {
            self.short_len
        }
    }

    /// Slices `message` into blocks of their nominal lengths, left to right.  Bytes a block
    /// is missing because the message ran out are recorded as padding.
    pub fn split(&self, message: &[u8]) -> Vec<Block> {
        let mut remaining = message;

        (0..self.num_blocks())
            .map(|index| {
                let size = self.block_len(index);
                let take = size.min(remaining.len());

                let (head, tail) = remaining.split_at(take);
                remaining = tail;

                Block::with_padding(head.to_vec(), size - take)
            })
            .collect()
    }

    /// Like [`Partition::split`], with every block padded out to [`Partition::working_len`].
    pub fn split_equalized(&self, message: &[u8]) -> Vec<Block> {
        let working_len = self.working_len();

        let mut blocks = self.split(message);
        for block in &mut blocks {
            let missing = working_len - block.len();
            block.pad(missing);
        }

        blocks
    }
}

#[cfg(test)]
mod test {
    use std::num::NonZeroUsize;

    use test_case::test_case;

    use super::Partition;

    fn partition(total_len: usize, num_blocks: usize) -> Partition {
        Partition::new(total_len, NonZeroUsize::new(num_blocks).unwrap())
    }

    #[test]
    fn test_partition_accounts_for_every_byte() {
        for total_len in 0..200 {
            for num_blocks in 1..40 {
                let p = partition(total_len, num_blocks);

                assert_eq!(p.num_blocks(), num_blocks);
                assert_eq!(p.total_len(), total_len);
                assert!(p.long_len == 0 || p.short_len == 0 || p.long_len == p.short_len + 1);
            }
        }
    }

    #[test_case(13, 4 => (4, 3, 1, 3); "hello world")]
    #[test_case(12, 4 => (0, 3, 0, 4); "even split has no long blocks")]
    #[test_case(2, 4 => (1, 0, 2, 2); "fewer bytes than blocks")]
    #[test_case(0, 3 => (0, 0, 0, 3); "empty message")]
    #[test_case(7, 1 => (0, 7, 0, 1); "single block")]
    fn test_partition_shape(total_len: usize, num_blocks: usize) -> (usize, usize, usize, usize) {
        let p = partition(total_len, num_blocks);

        (p.long_len, p.short_len, p.num_long, p.num_short)
    }

    #[test]
    fn test_split_hello_world() {
        let p = partition(13, 4);

        let blocks = p.split(b"HELLO, WORLD!");
        let data: Vec<&[u8]> = blocks.iter().map(|b| b.data()).collect();

        assert_eq!(data, [&b"HELL"[..], &b"O, "[..], &b"WOR"[..], &b"LD!"[..]]);
        assert!(blocks.iter().all(|b| b.padding() == 0));

        let equalized = p.split_equalized(b"HELLO, WORLD!");
        assert!(equalized.iter().all(|b| b.len() == 4));
        assert_eq!(equalized[0].padding(), 0);
        assert_eq!(equalized[3].padding(), 1);
        assert_eq!(equalized[3].data(), b"LD!");
    }

    #[test]
    fn test_split_short_message_becomes_padding() {
        let p = partition(10, 4);

        let blocks = p.split(b"abcdef");

        assert_eq!(blocks.iter().map(|b| b.len()).sum::<usize>(), 10);
        assert_eq!(blocks[0].data(), b"abc");
        assert_eq!(blocks[1].data(), b"def");
        assert_eq!(blocks[2].length(), 0);
        assert_eq!(blocks[2].padding(), 2);
        assert_eq!(blocks[3].padding(), 2);
    }
}
