use starjoin_core::*;

#[test]
fn test_scan_counts_resolutions() {
    let store = DimensionStore::build(4, 5).unwrap();
    let shape = EnumerationShape::new(4, 5, 300);

    let foreign = ForeignKeyEncoding::new(&store);
    let table = enumerate(shape, &foreign).unwrap();
    let report = scan(&foreign, &table).unwrap();
    assert_eq!(report.encoding, EncodingKind::Foreign);
    assert_eq!(report.resolved, 300 * 4);

    let pointer = DirectReferenceEncoding::new(&store);
    let table = enumerate(shape, &pointer).unwrap();
    let report = scan(&pointer, &table).unwrap();
    assert_eq!(report.encoding, EncodingKind::Pointer);
    assert_eq!(report.resolved, 300 * 4);
}

#[test]
fn test_scan_of_empty_table() {
    let store = DimensionStore::build(2, 0).unwrap();
    let foreign = ForeignKeyEncoding::new(&store);
    let table = enumerate(EnumerationShape::new(2, 0, 10), &foreign).unwrap();

    let report = scan(&foreign, &table).unwrap();
    assert_eq!(report.resolved, 0);
}

#[test]
fn test_foreign_scan_against_mismatched_store_is_lookup_miss() {
    let large = DimensionStore::build(2, 10).unwrap();
    let small = DimensionStore::build(2, 3).unwrap();

    // Keys up to 9 were enumerated against the large store.
    let table = enumerate(EnumerationShape::new(2, 10, 100), &ForeignKeyEncoding::new(&large))
        .unwrap();
    let err = scan(&ForeignKeyEncoding::new(&small), &table).unwrap_err();

    assert_eq!(err, StarJoinError::LookupMiss { dimension: 1, id: 3 });
    assert!(err.is_fatal());
}

#[test]
fn test_enumerating_beyond_store_is_lookup_miss() {
    let store = DimensionStore::build(2, 5).unwrap();
    let foreign = ForeignKeyEncoding::new(&store);
    let pointer = DirectReferenceEncoding::new(&store);

    // One dimension more than the store holds.
    let wide = EnumerationShape::new(3, 5, 10);
    assert_eq!(enumerate(wide, &foreign).unwrap_err(), StarJoinError::lookup_miss(2, 0));
    assert_eq!(enumerate(wide, &pointer).unwrap_err(), StarJoinError::lookup_miss(2, 0));

    // More rows per dimension than the store holds: the sixth candidate of
    // the last dimension is the first one past the end.
    let deep = EnumerationShape::new(2, 8, 10);
    let err = enumerate(deep, &pointer).unwrap_err();
    assert_eq!(err, StarJoinError::lookup_miss(1, 5));
    assert!(err.is_fatal());
}

#[test]
fn test_scan_wider_than_store_is_lookup_miss() {
    let wide = DimensionStore::build(3, 4).unwrap();
    let narrow = DimensionStore::build(2, 4).unwrap();

    let table = enumerate(EnumerationShape::new(3, 4, 8), &ForeignKeyEncoding::new(&wide)).unwrap();
    let err = scan(&ForeignKeyEncoding::new(&narrow), &table).unwrap_err();

    assert_eq!(err, StarJoinError::lookup_miss(2, 0));
}
