//! Full-scan join access benchmark.
//!
//! Walks every tuple of a fact table and resolves every column to its
//! dimension row through the table's encoding. The resolved row is discarded;
//! only the wall-clock time of the complete scan is reported.

use crate::encoding::{EncodingKind, TupleEncoding};
use crate::error::StarJoinResult;
use crate::fact_table::FactTable;
use crate::timing::{Timer, duration_ms};
use std::hint::black_box;
use std::time::Duration;

/// Outcome of one full scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanReport {
    pub encoding: EncodingKind,
    pub elapsed: Duration,
    /// Columns resolved during the scan (tuples × dimensions)
    pub resolved: usize,
}

impl ScanReport {
    pub fn elapsed_ms(&self) -> f64 {
        duration_ms(self.elapsed)
    }
}

/// Resolve every column of `table` and time the whole pass.
///
/// A lookup miss aborts the scan with [`crate::StarJoinError::LookupMiss`].
pub fn scan<E: TupleEncoding>(
    encoding: &E,
    table: &FactTable<E::Column>,
) -> StarJoinResult<ScanReport> {
    let mut resolved = 0_usize;

    let timer = Timer::new();
    for tuple in table {
        for (dimension, column) in tuple.columns().iter().enumerate() {
            black_box(encoding.resolve(dimension, column)?);
        }
        resolved += tuple.arity();
    }
    let elapsed = timer.elapsed();

    Ok(ScanReport { encoding: E::KIND, elapsed, resolved })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::DimensionStore;
    use crate::encoding::{DirectReferenceEncoding, ForeignKeyEncoding};
    use crate::enumerator::{EnumerationShape, enumerate};

    #[test]
    fn test_scan_resolves_every_column() {
        let store = DimensionStore::build(3, 5).unwrap();
        let shape = EnumerationShape::new(3, 5, 40);

        let foreign = ForeignKeyEncoding::new(&store);
        let report = scan(&foreign, &enumerate(shape, &foreign).unwrap()).unwrap();
        assert_eq!(report.encoding, EncodingKind::Foreign);
        assert_eq!(report.resolved, 120);

        let pointer = DirectReferenceEncoding::new(&store);
        let report = scan(&pointer, &enumerate(shape, &pointer).unwrap()).unwrap();
        assert_eq!(report.encoding, EncodingKind::Pointer);
        assert_eq!(report.resolved, 120);
        assert!(report.elapsed_ms() >= 0.0);
    }
}
