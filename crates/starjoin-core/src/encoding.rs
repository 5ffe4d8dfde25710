//! Tuple encodings: how a fact column refers to its dimension row.
//!
//! A [`TupleEncoding`] decides both halves of the trade-off being measured:
//! what the enumerator stores per column when it builds a fact table, and what
//! the scan has to do to get from that column back to the dimension row.
//!
//! - [`ForeignKeyEncoding`] stores the surrogate id and resolves it with a
//!   hash lookup in the dimension index.
//! - [`DirectReferenceEncoding`] stores the shared handle taken from the
//!   dimension index and resolves it with a plain dereference.

use crate::dimension::{DimensionHandle, DimensionRow, DimensionStore, RowId};
use crate::error::{StarJoinError, StarJoinResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which encoding produced a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingKind {
    /// Surrogate id resolved through the dimension index
    Foreign,
    /// Shared handle dereferenced directly
    Pointer,
}

impl EncodingKind {
    pub const ALL: [EncodingKind; 2] = [EncodingKind::Foreign, EncodingKind::Pointer];

    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingKind::Foreign => "foreign",
            EncodingKind::Pointer => "pointer",
        }
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Encodes `(dimension, row position)` pairs into fact columns and resolves
/// them back to dimension rows.
pub trait TupleEncoding {
    /// Value stored in each fact column
    type Column: Clone;

    /// Tag reported alongside measurements taken with this encoding
    const KIND: EncodingKind;

    /// Column value for the row at `position` in dimension `dimension`
    fn encode(&self, dimension: usize, position: usize) -> StarJoinResult<Self::Column>;

    /// The dimension row `column` refers to
    fn resolve<'a>(
        &'a self,
        dimension: usize,
        column: &'a Self::Column,
    ) -> StarJoinResult<&'a DimensionRow>;
}

/// Stores surrogate ids; resolution is a hash lookup.
#[derive(Debug, Clone, Copy)]
pub struct ForeignKeyEncoding<'s> {
    store: &'s DimensionStore,
}

impl<'s> ForeignKeyEncoding<'s> {
    pub fn new(store: &'s DimensionStore) -> Self {
        Self { store }
    }
}

impl TupleEncoding for ForeignKeyEncoding<'_> {
    type Column = RowId;

    const KIND: EncodingKind = EncodingKind::Foreign;

    #[inline]
    fn encode(&self, dimension: usize, position: usize) -> StarJoinResult<RowId> {
        self.store
            .row(dimension, position)
            .map(|row| row.id)
            .ok_or_else(|| StarJoinError::lookup_miss(dimension, position as RowId))
    }

    #[inline]
    fn resolve<'a>(
        &'a self,
        dimension: usize,
        column: &'a RowId,
    ) -> StarJoinResult<&'a DimensionRow> {
        self.store
            .lookup(dimension, *column)
            .map(|handle| handle.as_ref())
            .ok_or_else(|| StarJoinError::lookup_miss(dimension, *column))
    }
}

/// Stores shared handles to the indexed rows; resolution is a dereference.
#[derive(Debug, Clone, Copy)]
pub struct DirectReferenceEncoding<'s> {
    store: &'s DimensionStore,
}

impl<'s> DirectReferenceEncoding<'s> {
    pub fn new(store: &'s DimensionStore) -> Self {
        Self { store }
    }
}

impl TupleEncoding for DirectReferenceEncoding<'_> {
    type Column = DimensionHandle;

    const KIND: EncodingKind = EncodingKind::Pointer;

    #[inline]
    fn encode(&self, dimension: usize, position: usize) -> StarJoinResult<DimensionHandle> {
        let id = self
            .store
            .row(dimension, position)
            .ok_or_else(|| StarJoinError::lookup_miss(dimension, position as RowId))?
            .id;
        self.store
            .lookup(dimension, id)
            .cloned()
            .ok_or_else(|| StarJoinError::lookup_miss(dimension, id))
    }

    #[inline]
    fn resolve<'a>(
        &'a self,
        _dimension: usize,
        column: &'a DimensionHandle,
    ) -> StarJoinResult<&'a DimensionRow> {
        Ok(column.as_ref())
    }
}
