//! # Store Queries Over Loaded Data
//!
//! Loads a YAML fixture of both sheets into stores and checks query results,
//! then cross-checks the indexed and scanning strategies on generated
//! tables.

use std::collections::BTreeSet;
use std::path::Path;

use nuts_core::{Region, Scheme};
use nuts_loader::{Loader, YamlSource};
use nuts_store::{FilterValue, Query, RegionStore};
use proptest::prelude::*;

fn fixture_source() -> YamlSource {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("regions.yaml");
    YamlSource::from_path(&path).unwrap()
}

fn fixture_store() -> RegionStore {
    RegionStore::load(&Loader::default(), &mut fixture_source()).unwrap()
}

fn keys(result: &std::collections::HashSet<&Region>) -> BTreeSet<(Scheme, String)> {
    result
        .iter()
        .map(|r| (r.scheme(), r.code().to_string()))
        .collect()
}

#[test]
fn luxembourg_lookup() {
    let store = fixture_store();
    let result = store
        .query(&Query::new().filter("country_code", "LU").filter("level", 1))
        .unwrap();
    assert_eq!(result.len(), 1);
    let lu = result.iter().next().unwrap();
    assert_eq!(lu.code().as_str(), "LU0");
    assert_eq!(lu.label(), "Luxembourg");
}

#[test]
fn code_spans_both_schemes() {
    let store = fixture_store();
    let result = store.query(&Query::new().filter("code", "AT1")).unwrap();
    assert_eq!(
        keys(&result),
        BTreeSet::from([
            (Scheme::Nuts, "AT1".to_string()),
            (Scheme::StatisticalRegion, "AT1".to_string()),
        ])
    );
}

#[test]
fn extra_regio_units_are_ordinary_members() {
    let store = fixture_store();
    let result = store
        .query(&Query::new().filter("country_code", "AT").filter("level", 1))
        .unwrap();
    let extra: Vec<_> = result.iter().filter(|r| r.is_extra_regio()).collect();
    assert_eq!(extra.len(), 1);
    assert_eq!(extra[0].code().as_str(), "ATZ");
}

#[test]
fn reload_from_fixture() {
    let mut store = RegionStore::new(Vec::new());
    let mut source = fixture_source();
    store.reload_from(&Loader::default(), &mut source).unwrap();
    assert_eq!(store.len(), 11);
    assert_eq!(store.by_scheme(Scheme::StatisticalRegion).count(), 3);
}

#[test]
fn code_and_cross_kind_filters_agree_across_strategies() {
    let indexed = fixture_store();
    let scanned = RegionStore::unindexed(indexed.regions().to_vec());

    let by_code = Query::new().filter("code", ["AT1", "PT1C"]);
    let a = indexed.query(&by_code).unwrap();
    assert_eq!(a, scanned.query(&by_code).unwrap());
    assert_eq!(a.len(), 4);

    for cross_kind in [
        Query::new().filter("country_code", [1, 2]),
        Query::new().filter("level", ["1"]),
        Query::new().filter("code", 1).filter("level", 1),
    ] {
        assert!(indexed.query(&cross_kind).unwrap().is_empty());
        assert!(scanned.query(&cross_kind).unwrap().is_empty());
    }
}

// Small alphabets so that generated filters actually hit.
fn arb_region() -> impl Strategy<Value = Region> {
    (
        prop::sample::select(vec!["AT", "PT", "LU"]),
        1..=3i64,
        prop::sample::select(vec!["A", "B"]),
        prop::bool::ANY,
    )
        .prop_map(|(cc, level, label, sr)| {
            let code = format!("{cc}{}", "1".repeat(level as usize));
            let scheme = if sr { Scheme::StatisticalRegion } else { Scheme::Nuts };
            Region::new(scheme, cc, code, label, level).unwrap()
        })
}

// A homogeneous value list that is usually of the field's own kind and
// sometimes of the other kind, which must never match.
fn arb_values(
    texts: Vec<&'static str>,
    ints: std::ops::RangeInclusive<i64>,
) -> BoxedStrategy<FilterValue> {
    prop_oneof![
        3 => prop::collection::vec(prop::sample::select(texts), 1..3).prop_map(FilterValue::from),
        1 => prop::collection::vec(ints, 1..3).prop_map(FilterValue::from),
    ]
    .boxed()
}

fn arb_query() -> impl Strategy<Value = Query> {
    let country = arb_values(vec!["AT", "PT", "LU", "DE"], 0..=2);
    let code = arb_values(vec!["AT1", "AT11", "PT111", "LU1", "DE1"], 0..=2);
    let label = arb_values(vec!["A", "B", "C"], 0..=1);
    let level = prop_oneof![
        3 => prop::collection::vec(0..=4i64, 1..3).prop_map(FilterValue::from),
        1 => prop::collection::vec(prop::sample::select(vec!["1", "2"]), 1..3)
            .prop_map(FilterValue::from),
    ];
    (
        prop::option::of(country),
        prop::option::of(code),
        prop::option::of(label),
        prop::option::of(level),
    )
        .prop_filter("at least one filter", |(c, d, b, l)| {
            c.is_some() || d.is_some() || b.is_some() || l.is_some()
        })
        .prop_map(|(country, code, label, level)| {
            [
                ("country_code", country),
                ("code", code),
                ("label", label),
                ("level", level),
            ]
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .fold(Query::new(), |query, (field, value)| query.filter(field, value))
        })
}

proptest! {
    #[test]
    fn index_and_scan_agree(
        regions in prop::collection::vec(arb_region(), 0..40),
        query in arb_query(),
    ) {
        let indexed = RegionStore::new(regions.clone());
        let scanned = RegionStore::unindexed(regions.clone());
        let a = indexed.query(&query).unwrap();
        let b = scanned.query(&query).unwrap();
        prop_assert_eq!(&a, &b);

        // Every member satisfies every filter.
        for criterion in query.resolve().unwrap() {
            for region in &a {
                prop_assert!(criterion.values.iter().any(|v| region.matches(criterion.field, v)));
            }
        }
    }
}
