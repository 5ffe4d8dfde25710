//! Dimension tables and their lookup indexes.
//!
//! A [`DimensionStore`] owns `n` dimension tables of `k` rows each and one
//! [`DimensionIndex`] per table. Row positions and row ids coincide. The index
//! does not point into the table: every entry is a separate heap allocation
//! holding a copy of the row, so dereferencing a handle chases a pointer to an
//! independently allocated object instead of indexing into the table.

use crate::error::{StarJoinError, StarJoinResult};
use crate::timing::Timer;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Surrogate key of a dimension row
pub type RowId = u64;

/// Shared ownership handle to a dimension row
pub type DimensionHandle = Arc<DimensionRow>;

/// One tuple of a dimension table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimensionRow {
    pub id: RowId,
    pub info: String,
}

impl DimensionRow {
    /// Row at `position`, carrying the textual form of its position as payload
    pub fn at_position(position: usize) -> Self {
        Self { id: position as RowId, info: position.to_string() }
    }
}

/// Hash index from row id to a separately allocated copy of the row.
#[derive(Debug, Clone, Default)]
pub struct DimensionIndex {
    entries: HashMap<RowId, DimensionHandle, ahash::RandomState>,
}

impl DimensionIndex {
    /// Build the index over `rows`, allocating a fresh handle per row
    pub fn build(rows: &[DimensionRow]) -> StarJoinResult<Self> {
        let mut entries = HashMap::with_hasher(ahash::RandomState::new());
        entries
            .try_reserve(rows.len())
            .map_err(|_| StarJoinError::resource_exhaustion("dimension index", rows.len()))?;
        for row in rows {
            entries.insert(row.id, Arc::new(row.clone()));
        }
        Ok(Self { entries })
    }

    /// Handle for `id`, if indexed
    #[inline]
    pub fn get(&self, id: RowId) -> Option<&DimensionHandle> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The star schema's dimension side: `n` tables with `k` rows and their indexes.
///
/// Built once per dimension count and shared read-only by every repetition of
/// that experiment.
#[derive(Debug, Clone)]
pub struct DimensionStore {
    tables: Vec<Vec<DimensionRow>>,
    indexes: Vec<DimensionIndex>,
    rows_per_dimension: usize,
}

impl DimensionStore {
    /// Generate `dimensions` tables of `rows_per_dimension` rows and index each one.
    #[instrument(skip_all, fields(dimensions = dimensions, rows = rows_per_dimension))]
    pub fn build(dimensions: usize, rows_per_dimension: usize) -> StarJoinResult<Self> {
        let timer = Timer::new();

        let mut tables = Vec::new();
        tables
            .try_reserve_exact(dimensions)
            .map_err(|_| StarJoinError::resource_exhaustion("dimension tables", dimensions))?;
        let mut indexes = Vec::new();
        indexes
            .try_reserve_exact(dimensions)
            .map_err(|_| StarJoinError::resource_exhaustion("dimension indexes", dimensions))?;

        for _ in 0..dimensions {
            let mut rows = Vec::new();
            rows.try_reserve_exact(rows_per_dimension).map_err(|_| {
                StarJoinError::resource_exhaustion("dimension table", rows_per_dimension)
            })?;
            rows.extend((0..rows_per_dimension).map(DimensionRow::at_position));

            indexes.push(DimensionIndex::build(&rows)?);
            tables.push(rows);
        }

        debug!(elapsed_ms = timer.elapsed_ms(), "Built dimension tables and indexes");
        Ok(Self { tables, indexes, rows_per_dimension })
    }

    /// Number of dimension tables
    pub fn dimensions(&self) -> usize {
        self.tables.len()
    }

    pub fn rows_per_dimension(&self) -> usize {
        self.rows_per_dimension
    }

    /// Rows of dimension `dimension`.
    ///
    /// Panics if `dimension` is out of range.
    pub fn table(&self, dimension: usize) -> &[DimensionRow] {
        &self.tables[dimension]
    }

    /// Index of dimension `dimension`.
    ///
    /// Panics if `dimension` is out of range.
    pub fn index(&self, dimension: usize) -> &DimensionIndex {
        &self.indexes[dimension]
    }

    /// Row at `position` of dimension `dimension`
    pub fn row(&self, dimension: usize, position: usize) -> Option<&DimensionRow> {
        self.tables.get(dimension).and_then(|table| table.get(position))
    }

    /// Indexed handle for `id` in dimension `dimension`
    pub fn lookup(&self, dimension: usize, id: RowId) -> Option<&DimensionHandle> {
        self.indexes.get(dimension).and_then(|index| index.get(id))
    }
}
