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

/// A set of block indices, kept as a strictly increasing vector.
///
/// This is both the neighbour list of an encoded block and the coefficient row of an
/// equation in the decoder, where adding two equations over GF(2) is the symmetric
/// difference of their index sets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IndexSet {
    data: Vec<usize>,
}

impl IndexSet {
    pub fn new() -> IndexSet {
        IndexSet { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> IndexSet {
        IndexSet {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Every index in `0..n`.
    pub fn full(n: usize) -> IndexSet {
        IndexSet {
            data: (0..n).collect(),
        }
    }

    /// Sorts `indices` and drops duplicates.
    pub fn from_unsorted(mut indices: Vec<usize>) -> IndexSet {
        indices.sort_unstable();
        indices.dedup();

        IndexSet { data: indices }
    }

    // Callers must append in strictly increasing order.
    pub fn append(&mut self, value: usize) {
        debug_assert!(self.data.last().map_or(true, |last| *last < value));

        self.data.push(value);
    }

    // The lowest-numbered position holding an entry >= `value`.
    fn placement_index(&self, value: usize) -> usize {
        self.data.partition_point(|entry| *entry < value)
    }

    pub fn contains(&self, value: usize) -> bool {
        let index = self.placement_index(value);

        index < self.data.len() && self.data[index] == value
    }

    pub fn first(&self) -> Option<usize> {
        self.data.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.data.last().copied()
    }

    pub fn insert(&mut self, value: usize) -> bool {
        let index = self.placement_index(value);

        if index == self.data.len() || self.data[index] != value {
            self.data.insert(index, value);

            true
        } else {
            false
        }
    }

    // Returns true if `value` is in the set afterwards.
    pub fn insert_or_remove(&mut self, value: usize) -> bool {
        let index = self.placement_index(value);

        if index == self.data.len() || self.data[index] != value {
            self.data.insert(index, value);

            true
        } else {
            self.data.remove(index);

            false
        }
    }

    pub fn remove(&mut self, value: usize) -> bool {
        let index = self.placement_index(value);

        if index < self.data.len() && self.data[index] == value {
            self.data.remove(index);

            true
        } else {
            false
        }
    }

    /// Replaces `self` with the symmetric difference of `self` and `other`.
    pub fn xor_eq(&mut self, other: &IndexSet) {
        let mut merged = Vec::with_capacity(self.data.len() + other.data.len());

        let (mut i, mut j) = (0, 0);

        while i < self.data.len() && j < other.data.len() {
            let (a, b) = (self.data[i], other.data[j]);

            if a == b {
                i += 1;
                j += 1;
            } else if a < b {
                merged.push(a);
                i += 1;
            } else {
                merged.push(b);
                j += 1;
            }
        }

        merged.extend_from_slice(&self.data[i..]);
        merged.extend_from_slice(&other.data[j..]);

        self.data = merged;
    }

    /// Drops everything but the lowest index.
    pub fn truncate_to_first(&mut self) {
        self.data.truncate(1);
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.data.iter()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.data
    }
}

impl FromIterator<usize> for IndexSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        IndexSet::from_unsorted(iter.into_iter().collect())
    }
}

impl IntoIterator for IndexSet {
    type Item = usize;
    type IntoIter = <Vec<usize> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a> IntoIterator for &'a IndexSet {
    type Item = &'a usize;
    type IntoIter = slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.data[..].iter()
    }
}
