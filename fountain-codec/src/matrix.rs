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

use std::mem;

use crate::{block::Block, error::BlockError, index_set::IndexSet, partition::Partition};

#[derive(Clone, Debug)]
struct Row {
    indices: IndexSet,
    value: Block,
}

/// What became of an equation handed to [`SparseMatrix::add_equation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Equation {
    /// Stored as the row pivoted on `pivot`.
    Stored { pivot: usize },
    /// Already implied by the stored rows.
    Redundant,
    /// Reduces to `0 = non-zero`.  The matrix is left as it was.
    Inconsistent,
}

/// A system of XOR equations over `width` unknown blocks, kept in echelon form.
///
/// Slot `i` holds at most one row, and a row in slot `i` always has `i` as its lowest
/// index.  Once every slot is filled the system is determined, and back-substitution
/// isolates every unknown.
#[derive(Debug)]
pub struct SparseMatrix {
    rows: Vec<Option<Row>>,
    num_stored: usize,
    reduced: bool,
}

impl SparseMatrix {
    pub fn new(width: usize) -> SparseMatrix {
        SparseMatrix {
            rows: vec![None; width],
            num_stored: 0,
            reduced: false,
        }
    }

    pub fn width(&self) -> usize {
        self.rows.len()
    }

    pub fn num_stored(&self) -> usize {
        self.num_stored
    }

    // If `indices` lies in the span of the stored rows, the values of the rows that
    // eliminate it, in elimination order.
    fn dependent_values(&self, indices: &IndexSet) -> Option<Vec<&Block>> {
        let mut indices = indices.clone();
        let mut values = Vec::new();

        while let Some(pivot) = indices.first() {
            let row = self.rows[pivot].as_ref()?;

            indices.xor_eq(&row.indices);
            values.push(&row.value);
        }

        Some(values)
    }

    /// Adds the equation `XOR of unknowns at indices = value`.
    ///
    /// Reduction runs against the stored rows from the lowest index up.  When the incoming
    /// equation has strictly fewer indices than the row pivoted on its lowest index, the two
    /// trade places and the displaced row carries on being reduced.
    pub fn add_equation(
        &mut self,
        mut indices: IndexSet,
        mut value: Block,
    ) -> Result<Equation, BlockError> {
        if let Some(last) = indices.last() {
            if last >= self.width() {
                return Err(BlockError::IndexOutOfRange {
                    index: last,
                    num_blocks: self.width(),
                });
            }
        }

        // Equations that add nothing are classified without touching the stored rows.
        if let Some(values) = self.dependent_values(&indices) {
            for other in values {
                value.xor_eq(other);
            }

            return Ok(classify_empty(&value));
        }

        while let Some(pivot) = indices.first() {
            let row = match &mut self.rows[pivot] {
                None => {
                    self.rows[pivot] = Some(Row { indices, value });
                    self.num_stored += 1;
                    self.reduced = false;

                    self.check();

                    return Ok(Equation::Stored { pivot });
                }
                Some(row) => row,
            };

            if indices.len() < row.indices.len() {
                mem::swap(&mut row.indices, &mut indices);
                mem::swap(&mut row.value, &mut value);
            }

            indices.xor_eq(&row.indices);
            value.xor_eq(&row.value);
        }

        Ok(classify_empty(&value))
    }

    /// Every unknown has a row pivoted on it.
    pub fn determined(&self) -> bool {
        self.num_stored == self.width()
    }

    /// Back-substitutes from the last slot down, leaving every row with just its pivot and
    /// its value equal to that unknown.  Returns false, doing nothing, when not determined.
    pub fn reduce(&mut self) -> bool {
        if !self.determined() {
            return false;
        }

        if self.reduced {
            return true;
        }

        for i in (0..self.width()).rev() {
            let (earlier, rest) = self.rows.split_at_mut(i);

            let Some(row) = &mut rest[0] else {
                return false;
            };

            // Every index above `i` has already been substituted out of this row.
            row.indices.truncate_to_first();

            for other in earlier.iter_mut().flatten() {
                if other.indices.remove(i) {
                    other.value.xor_eq(&row.value);
                }
            }
        }

        self.reduced = true;

        self.check();

        true
    }

    /// Reduces the system if needed and hands out access to the solution, or `None` while
    /// the system is not yet determined.
    pub fn solve(&mut self) -> Option<Solved<'_>> {
        if self.reduce() {
            Some(Solved { matrix: self })
        } else {
            None
        }
    }

    fn check_force(&self) {
        let mut num_stored = 0;

        for (slot, row) in self.rows.iter().enumerate() {
            let Some(row) = row else {
                continue;
            };

            num_stored += 1;

            assert_eq!(row.indices.first(), Some(slot));
            assert!(row.indices.last().map_or(false, |last| last < self.width()));
            assert!(row.indices.as_slice().windows(2).all(|w| w[0] < w[1]));

            if self.reduced {
                assert_eq!(row.indices.len(), 1);
            }
        }

        assert_eq!(self.num_stored, num_stored);
    }

    pub fn check(&self) {
        if cfg!(debug_assertions) {
            self.check_force();
        }
    }
}

fn classify_empty(value: &Block) -> Equation {
    if value.is_zero() {
        Equation::Redundant
    } else {
        Equation::Inconsistent
    }
}

/// Read access to a determined and fully reduced [`SparseMatrix`].
#[derive(Clone, Copy)]
pub struct Solved<'a> {
    matrix: &'a SparseMatrix,
}

impl<'a> Solved<'a> {
    /// The value of unknown `index`.
    pub fn block(&self, index: usize) -> &'a Block {
        match &self.matrix.rows[index] {
            Some(row) => &row.value,
            None => unreachable!("solved matrix has a row in every slot"),
        }
    }

    /// Concatenates the long blocks and then the short blocks `partition` describes, each
    /// cut to its nominal length.
    pub fn reconstruct(&self, partition: &Partition) -> Vec<u8> {
        let mut message = Vec::with_capacity(partition.total_len());

        for i in 0..partition.num_long {
            self.block(i).copy_prefix_to(&mut message, partition.long_len);
        }

        for i in partition.num_long..partition.num_blocks() {
            self.block(i).copy_prefix_to(&mut message, partition.short_len);
        }

        message
    }
}
