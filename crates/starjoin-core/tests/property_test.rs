use proptest::prelude::*;
use starjoin_core::*;

/// Decode the `index`-th tuple of the lexicographic product in base `rows`.
fn nth_tuple(mut index: usize, dimensions: usize, rows: usize) -> Vec<u64> {
    let mut tuple = vec![0_u64; dimensions];
    for column in (0..dimensions).rev() {
        tuple[column] = (index % rows) as u64;
        index /= rows;
    }
    tuple
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_cardinality_is_min_of_cap_and_product(
        dimensions in 0usize..5,
        rows in 0usize..6,
        limit in 0usize..800,
    ) {
        let store = DimensionStore::build(dimensions, rows).unwrap();
        let shape = EnumerationShape::new(dimensions, rows, limit);
        let table = enumerate(shape, &ForeignKeyEncoding::new(&store)).unwrap();

        let expected = if dimensions == 0 || rows == 0 {
            0
        } else {
            limit.min(rows.pow(dimensions as u32))
        };
        prop_assert_eq!(table.len(), expected);
        prop_assert_eq!(shape.expected_cardinality(), expected);
    }

    #[test]
    fn prop_output_is_lexicographic_prefix(
        dimensions in 1usize..5,
        rows in 1usize..6,
        limit in 1usize..800,
    ) {
        let store = DimensionStore::build(dimensions, rows).unwrap();
        let table = enumerate(
            EnumerationShape::new(dimensions, rows, limit),
            &ForeignKeyEncoding::new(&store),
        )
        .unwrap();

        for (position, tuple) in table.iter().enumerate() {
            let expected = nth_tuple(position, dimensions, rows);
            prop_assert_eq!(tuple.columns(), expected.as_slice());
        }
    }

    #[test]
    fn prop_encodings_agree(
        dimensions in 1usize..4,
        rows in 1usize..8,
        limit in 1usize..300,
    ) {
        let store = DimensionStore::build(dimensions, rows).unwrap();
        let shape = EnumerationShape::new(dimensions, rows, limit);
        let foreign = ForeignKeyEncoding::new(&store);
        let pointer = DirectReferenceEncoding::new(&store);
        let fk_table = enumerate(shape, &foreign).unwrap();
        let ptr_table = enumerate(shape, &pointer).unwrap();

        prop_assert_eq!(fk_table.len(), ptr_table.len());
        for (fk, ptr) in fk_table.iter().zip(ptr_table.iter()) {
            for dimension in 0..dimensions {
                prop_assert_eq!(
                    foreign.resolve(dimension, &fk[dimension]).unwrap(),
                    pointer.resolve(dimension, &ptr[dimension]).unwrap()
                );
            }
        }
    }
}
