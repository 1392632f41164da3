//! # Search Index
//!
//! For every queryable field, a map from each distinct value to the
//! positions of the regions holding it. The index is always rebuilt in
//! full from the store's records and never patched in place.

use std::collections::HashMap;

use nuts_core::{Field, Region, Scalar};

/// Field/value lookup over a slice of regions.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    fields: HashMap<Field, HashMap<Scalar, Vec<usize>>>,
}

impl SearchIndex {
    /// Index every queryable field of `regions`.
    ///
    /// Positions are indices into `regions`, in ascending order.
    pub fn build(regions: &[Region]) -> Self {
        let mut fields: HashMap<Field, HashMap<Scalar, Vec<usize>>> = Field::all()
            .iter()
            .map(|&field| (field, HashMap::new()))
            .collect();
        for (pos, region) in regions.iter().enumerate() {
            for &field in Field::all() {
                fields
                    .entry(field)
                    .or_default()
                    .entry(region.field_value(field))
                    .or_default()
                    .push(pos);
            }
        }
        let index = Self { fields };
        tracing::info!(
            regions = regions.len(),
            distinct_codes = index.distinct_values(Field::Code),
            "built search index"
        );
        index
    }

    /// Positions of the regions whose `field` equals `value`.
    pub fn lookup(&self, field: Field, value: &Scalar) -> &[usize] {
        self.fields
            .get(&field)
            .and_then(|values| values.get(value))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct values indexed for `field`.
    pub fn distinct_values(&self, field: Field) -> usize {
        self.fields.get(&field).map_or(0, HashMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nuts_core::Scheme;

    fn regions() -> Vec<Region> {
        vec![
            Region::new(Scheme::Nuts, "AT", "AT1", "Ostösterreich", 1).unwrap(),
            Region::new(Scheme::Nuts, "AT", "AT12", "Niederösterreich", 2).unwrap(),
            Region::new(Scheme::StatisticalRegion, "AT", "AT1", "Ostösterreich", 1).unwrap(),
        ]
    }

    #[test]
    fn positions_per_value() {
        let index = SearchIndex::build(&regions());
        assert_eq!(index.lookup(Field::CountryCode, &"AT".into()), &[0, 1, 2]);
        assert_eq!(index.lookup(Field::Code, &"AT1".into()), &[0, 2]);
        assert_eq!(index.lookup(Field::Level, &Scalar::Int(2)), &[1]);
    }

    #[test]
    fn absent_values_and_kind_mismatch() {
        let index = SearchIndex::build(&regions());
        assert!(index.lookup(Field::Code, &"PT1".into()).is_empty());
        assert!(index.lookup(Field::Level, &"1".into()).is_empty());
        assert!(index.lookup(Field::Code, &Scalar::Int(1)).is_empty());
    }

    #[test]
    fn distinct_values() {
        let index = SearchIndex::build(&regions());
        assert_eq!(index.distinct_values(Field::CountryCode), 1);
        assert_eq!(index.distinct_values(Field::Label), 2);
        assert_eq!(SearchIndex::default().distinct_values(Field::Code), 0);
    }
}
