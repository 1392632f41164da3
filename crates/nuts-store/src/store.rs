//! # Region Store
//!
//! Owns the loaded regions and answers queries over them.
//!
//! ## Lifecycle
//!
//! A store is built from a list of regions (or loaded through a
//! [`Loader`]). The index, when enabled, is built at the same time and is
//! rebuilt in full on every [`RegionStore::reload`]. Between reloads the
//! store is immutable, so concurrent readers need no locking; a reload
//! takes `&mut self` and the borrow checker rules out overlapping reads.
//!
//! ## Results
//!
//! Queries return a set of references into the store. Two records equal in
//! every field (scheme included) collapse to one member. Result order is
//! unspecified.

use std::collections::HashSet;

use nuts_core::{QueryError, Region, Scheme};
use nuts_loader::{LoadResult, Loader, RowSource};

use crate::index::SearchIndex;
use crate::query::{Criterion, Query};

/// An in-memory table of regions with optional field/value index.
#[derive(Debug, Clone, Default)]
pub struct RegionStore {
    data: Vec<Region>,
    index: Option<SearchIndex>,
}

impl RegionStore {
    /// Build an indexed store.
    pub fn new(regions: Vec<Region>) -> Self {
        let index = Some(SearchIndex::build(&regions));
        Self {
            data: regions,
            index,
        }
    }

    /// Build a store that answers queries by scanning.
    pub fn unindexed(regions: Vec<Region>) -> Self {
        Self {
            data: regions,
            index: None,
        }
    }

    /// Load every configured sheet from `source` into a new indexed store.
    pub fn load<S: RowSource + ?Sized>(loader: &Loader, source: &mut S) -> LoadResult<Self> {
        Ok(Self::new(loader.load_all(source)?))
    }

    /// Replace the contents and rebuild the index if the store has one.
    pub fn reload(&mut self, regions: Vec<Region>) {
        if self.index.is_some() {
            self.index = Some(SearchIndex::build(&regions));
        }
        self.data = regions;
        tracing::info!(regions = self.data.len(), indexed = self.is_indexed(), "reloaded store");
    }

    /// Reload from a source. On error the current contents are kept.
    pub fn reload_from<S: RowSource + ?Sized>(
        &mut self,
        loader: &Loader,
        source: &mut S,
    ) -> LoadResult<()> {
        let regions = loader.load_all(source)?;
        self.reload(regions);
        Ok(())
    }

    /// All regions, in load order.
    pub fn regions(&self) -> &[Region] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// Regions of one classification scheme, in load order.
    pub fn by_scheme(&self, scheme: Scheme) -> impl Iterator<Item = &Region> + '_ {
        self.data.iter().filter(move |r| r.scheme() == scheme)
    }

    /// Regions matching every filter of `query`.
    ///
    /// Within a filter, a region matches if its field equals any listed
    /// value. An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] if the query is empty, names an unknown
    /// field, or carries an unacceptable value. Validation completes
    /// before any lookup.
    pub fn query(&self, query: &Query) -> Result<HashSet<&Region>, QueryError> {
        let criteria = query.resolve()?;

        let mut selected: Option<HashSet<usize>> = None;
        for criterion in &criteria {
            let matched = self.positions(criterion);
            let narrowed = match selected {
                None => matched,
                Some(acc) => acc.intersection(&matched).copied().collect(),
            };
            let done = narrowed.is_empty();
            selected = Some(narrowed);
            if done {
                break;
            }
        }

        let result: HashSet<&Region> = selected
            .unwrap_or_default()
            .into_iter()
            .filter_map(|pos| self.data.get(pos))
            .collect();
        tracing::debug!(
            filters = criteria.len(),
            indexed = self.is_indexed(),
            matched = result.len(),
            "query"
        );
        Ok(result)
    }

    fn positions(&self, criterion: &Criterion) -> HashSet<usize> {
        match &self.index {
            Some(index) => criterion
                .values
                .iter()
                .flat_map(|value| index.lookup(criterion.field, value).iter().copied())
                .collect(),
            None => self
                .data
                .iter()
                .enumerate()
                .filter(|(_, region)| {
                    criterion
                        .values
                        .iter()
                        .any(|value| region.matches(criterion.field, value))
                })
                .map(|(pos, _)| pos)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nuts_core::Level;
    use nuts_loader::{Cell, LoadError, MemorySource};
    use serde_json::json;

    fn sample() -> Vec<Region> {
        [
            ("AT", "AT1", "Ostösterreich", 1),
            ("AT", "AT12", "Niederösterreich", 2),
            ("AT", "AT127", "Wiener Umland/Südteil", 3),
            ("PT", "PT1", "Continente", 1),
            ("PT", "PT1C", "Alentejo", 2),
            ("PT", "PT1C1", "Alentejo Litoral", 3),
        ]
        .into_iter()
        .map(|(cc, code, label, level)| Region::new(Scheme::Nuts, cc, code, label, level).unwrap())
        .collect()
    }

    fn stores() -> [RegionStore; 2] {
        [RegionStore::new(sample()), RegionStore::unindexed(sample())]
    }

    fn codes(result: &HashSet<&Region>) -> Vec<String> {
        let mut codes: Vec<String> = result.iter().map(|r| r.code().to_string()).collect();
        codes.sort();
        codes
    }

    #[test]
    fn single_field() {
        for store in stores() {
            let result = store.query(&Query::new().filter("level", 2)).unwrap();
            assert_eq!(codes(&result), vec!["AT12", "PT1C"]);
        }
    }

    #[test]
    fn list_is_a_union() {
        for store in stores() {
            let result = store
                .query(&Query::new().filter("country_code", ["AT", "PT"]))
                .unwrap();
            assert_eq!(result.len(), 6);
        }
    }

    #[test]
    fn filters_intersect() {
        for store in stores() {
            let result = store
                .query(&Query::new().filter("country_code", "PT").filter("level", [1, 3]))
                .unwrap();
            assert_eq!(codes(&result), vec!["PT1", "PT1C1"]);
        }
    }

    #[test]
    fn no_match_is_empty() {
        for store in stores() {
            let query = Query::new().filter("country_code", "AT").filter("code", "PT1");
            assert!(store.query(&query).unwrap().is_empty());
            let query = Query::new().filter("label", "Wien");
            assert!(store.query(&query).unwrap().is_empty());
        }
    }

    #[test]
    fn no_type_coercion() {
        for store in stores() {
            assert!(store.query(&Query::new().filter("level", "2")).unwrap().is_empty());
        }
    }

    #[test]
    fn invalid_queries() {
        for store in stores() {
            assert_eq!(store.query(&Query::new()), Err(QueryError::EmptyQuery));
            assert_eq!(
                store.query(&Query::new().filter("parent_code", "AT1")),
                Err(QueryError::UnknownField("parent_code".to_string()))
            );
            assert!(matches!(
                store.query(&Query::new().filter("code", json!([["AT1"]]))),
                Err(QueryError::InvalidFilterValue { .. })
            ));
        }
    }

    #[test]
    fn invalid_filter_wins_over_empty_intersection() {
        let store = RegionStore::new(sample());
        let query = Query::new()
            .filter("code", "XX1")
            .filter("level", json!(true));
        assert!(matches!(
            store.query(&query),
            Err(QueryError::InvalidFilterValue { .. })
        ));
    }

    #[test]
    fn repeated_field_is_an_error_not_an_empty_set() {
        for store in stores() {
            let query = Query::new().filter("level", 1).filter("level", 2);
            assert!(matches!(
                store.query(&query),
                Err(QueryError::InvalidFilterValue { .. })
            ));
            let merged = store.query(&Query::new().filter("level", [1, 2])).unwrap();
            assert_eq!(merged.len(), 4);
        }
    }

    #[test]
    fn duplicate_records_collapse() {
        let mut regions = sample();
        regions.push(regions[0].clone());
        let store = RegionStore::new(regions);
        assert_eq!(store.len(), 7);
        let result = store.query(&Query::new().filter("code", "AT1")).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn schemes_are_distinct_members() {
        let mut regions = sample();
        regions.push(Region::new(Scheme::StatisticalRegion, "AT", "AT1", "Ostösterreich", 1).unwrap());
        let store = RegionStore::new(regions);
        let result = store.query(&Query::new().filter("code", "AT1")).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(store.by_scheme(Scheme::StatisticalRegion).count(), 1);
        assert_eq!(store.by_scheme(Scheme::Nuts).count(), 6);
    }

    #[test]
    fn reload_replaces_contents() {
        for mut store in stores() {
            let indexed = store.is_indexed();
            let lux = Region::new(Scheme::Nuts, "LU", "LU0", "Luxembourg", 1).unwrap();
            store.reload(vec![lux]);
            assert_eq!(store.len(), 1);
            assert_eq!(store.is_indexed(), indexed);
            assert!(store.query(&Query::new().filter("country_code", "AT")).unwrap().is_empty());
            let result = store.query(&Query::new().filter("level", Level::One)).unwrap();
            assert_eq!(codes(&result), vec!["LU0"]);
        }
    }

    #[test]
    fn failed_reload_keeps_contents() {
        let mut store = RegionStore::new(sample());
        let mut source = MemorySource::new().with_sheet("NUTS2024", vec![]);
        let err = store
            .reload_from(&Loader::default(), &mut source)
            .unwrap_err();
        assert!(matches!(err, LoadError::SheetNotFound { .. }));
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn load_from_source() {
        let row = |cc: &str, code: &str, label: &str, level: i64| {
            vec![Cell::from(cc), Cell::from(code), Cell::from(label), Cell::Int(level)]
        };
        let mut source = MemorySource::new()
            .with_sheet("NUTS2024", vec![row("AT", "AT1", "Ostösterreich", 1)])
            .with_sheet("Statistical Regions", vec![row("PT", "PT1", "Continente", 1)]);
        let store = RegionStore::load(&Loader::default(), &mut source).unwrap();
        assert!(store.is_indexed());
        assert_eq!(store.regions().len(), 2);
        let sr = store.query(&Query::new().filter("country_code", "PT")).unwrap();
        assert_eq!(
            sr.iter().map(|r| r.scheme()).collect::<Vec<_>>(),
            vec![Scheme::StatisticalRegion]
        );
    }

    #[test]
    fn stores_are_independent() {
        let a = RegionStore::new(sample());
        let mut b = a.clone();
        b.reload(Vec::new());
        assert_eq!(a.len(), 6);
        assert!(b.is_empty());
    }

    #[test]
    fn empty_store_answers_empty() {
        let store = RegionStore::default();
        assert!(store.query(&Query::new().filter("code", "AT1")).unwrap().is_empty());
    }

    #[test]
    fn concurrent_readers() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RegionStore>();

        let store = RegionStore::new(sample());
        std::thread::scope(|scope| {
            for level in 1..=3i64 {
                let store = &store;
                scope.spawn(move || {
                    let result = store.query(&Query::new().filter("level", level)).unwrap();
                    assert_eq!(result.len(), 2);
                });
            }
        });
    }
}
