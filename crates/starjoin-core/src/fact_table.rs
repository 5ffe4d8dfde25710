//! Fact tuples and fact tables, generic over the column encoding.

use std::ops::Index;

/// One fact: exactly one encoded column per dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactTuple<C> {
    columns: Box<[C]>,
}

impl<C> FactTuple<C> {
    pub fn columns(&self) -> &[C] {
        &self.columns
    }

    /// Number of columns, equal to the dimension count it was built for
    pub fn arity(&self) -> usize {
        self.columns.len()
    }
}

impl<C: Clone> From<&[C]> for FactTuple<C> {
    fn from(columns: &[C]) -> Self {
        Self { columns: columns.into() }
    }
}

impl<C> Index<usize> for FactTuple<C> {
    type Output = C;

    fn index(&self, column: usize) -> &C {
        &self.columns[column]
    }
}

/// Ordered sequence of fact tuples over `dimensions` dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactTable<C> {
    tuples: Vec<FactTuple<C>>,
    dimensions: usize,
}

impl<C> FactTable<C> {
    pub(crate) fn from_parts(tuples: Vec<FactTuple<C>>, dimensions: usize) -> Self {
        Self { tuples, dimensions }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn tuples(&self) -> &[FactTuple<C>] {
        &self.tuples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FactTuple<C>> {
        self.tuples.iter()
    }
}

impl<'a, C> IntoIterator for &'a FactTable<C> {
    type Item = &'a FactTuple<C>;
    type IntoIter = std::slice::Iter<'a, FactTuple<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tuples.iter()
    }
}
