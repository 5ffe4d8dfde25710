//! Bounded enumeration of the cartesian product of the dimension tables.
//!
//! Tuples are produced depth-first in lexicographic order: dimension 0 varies
//! slowest, the last dimension fastest. A stack holds the encoded columns of
//! the tuple under construction and `cursor[d]` holds the candidate row of
//! dimension `d`. The row limit is checked before every candidate at every
//! level, so the result is always the first `min(L, k^n)` tuples of the full
//! product, never a sample spread across it.
//!
//! For `n = 2, k = 3, L = 5` the output is
//! `(0,0) (0,1) (0,2) (1,0) (1,1)`.

use crate::encoding::TupleEncoding;
use crate::error::{StarJoinError, StarJoinResult};
use crate::fact_table::{FactTable, FactTuple};
use serde::{Deserialize, Serialize};

/// Sizing of one enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationShape {
    /// Number of dimension tables (n)
    pub dimensions: usize,
    /// Rows per dimension table (k)
    pub rows_per_dimension: usize,
    /// Global cap on emitted tuples (L)
    pub row_limit: usize,
}

impl EnumerationShape {
    pub fn new(dimensions: usize, rows_per_dimension: usize, row_limit: usize) -> Self {
        Self { dimensions, rows_per_dimension, row_limit }
    }

    /// `k^n`, saturating at `usize::MAX`
    pub fn product_size(&self) -> usize {
        cartesian_product_size(self.rows_per_dimension, self.dimensions)
    }

    /// Number of tuples [`enumerate`] produces: `min(L, k^n)`, or 0 when
    /// there are no dimensions or no rows.
    pub fn expected_cardinality(&self) -> usize {
        if self.dimensions == 0 || self.rows_per_dimension == 0 {
            return 0;
        }
        self.row_limit.min(self.product_size())
    }
}

/// `rows^dimensions`, saturating at `usize::MAX`.
pub fn cartesian_product_size(rows: usize, dimensions: usize) -> usize {
    let exponent = u32::try_from(dimensions).unwrap_or(u32::MAX);
    rows.saturating_pow(exponent)
}

/// Materialise the lexicographically first `min(L, k^n)` tuples of the
/// cartesian product, encoding each column with `encoding`.
///
/// The encoding is asked for a column each time a candidate row is entered at
/// any level, exactly once per candidate, and the tuple stack is copied into
/// the table on every emission. Both encodings therefore do the same amount of
/// traversal work and produce tables with identical tuple order.
pub fn enumerate<E: TupleEncoding>(
    shape: EnumerationShape,
    encoding: &E,
) -> StarJoinResult<FactTable<E::Column>> {
    let EnumerationShape { dimensions, rows_per_dimension, row_limit } = shape;
    let capacity = shape.expected_cardinality();

    let mut tuples: Vec<FactTuple<E::Column>> = Vec::new();
    tuples
        .try_reserve_exact(capacity)
        .map_err(|_| StarJoinError::resource_exhaustion("fact table", capacity))?;

    if capacity == 0 {
        return Ok(FactTable::from_parts(tuples, dimensions));
    }

    let mut cursor = vec![0_usize; dimensions];
    let mut stack: Vec<E::Column> = Vec::with_capacity(dimensions);

    loop {
        // Cap check precedes every candidate, whether it descends or emits.
        if tuples.len() >= row_limit {
            break;
        }

        let level = stack.len();
        stack.push(encoding.encode(level, cursor[level])?);
        if level + 1 < dimensions {
            continue;
        }

        tuples.push(FactTuple::from(stack.as_slice()));

        // Backtrack to the deepest level that still has an untried candidate.
        loop {
            stack.pop();
            let level = stack.len();
            cursor[level] += 1;
            if cursor[level] < rows_per_dimension {
                break;
            }
            cursor[level] = 0;
            if level == 0 {
                return Ok(FactTable::from_parts(tuples, dimensions));
            }
        }
    }

    Ok(FactTable::from_parts(tuples, dimensions))
}
