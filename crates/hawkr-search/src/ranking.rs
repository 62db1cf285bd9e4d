//! Scoring and ordering of vendor candidates.

use hawkr_core::GeoPoint;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::expansion::expand;
use crate::store::{CandidateMenuItem, CandidateStore, VendorCandidate};
use crate::SearchError;

/// Hard cap on the result list; caller-supplied limits above this are capped.
pub const MAX_RESULTS: usize = 20;

/// Candidate-fetch ceiling, independent of the final limit. Generous on
/// purpose: it bounds cost while leaving text relevance enough nearby
/// diversity to re-rank.
const CANDIDATE_CEILING: i64 = 100;

/// Awarded at most once when the vendor name contains any search term.
const NAME_MATCH_BONUS: f64 = 100.0;

/// Awarded per menu item whose name contains any search term.
const ITEM_MATCH_BONUS: f64 = 50.0;

/// Best-matching menu items retained per result.
const MATCHING_ITEMS_CAP: usize = 3;

/// A menu item surfaced on a ranked result.
#[derive(Debug, Clone, Serialize)]
pub struct MatchingItem {
    pub item_id: String,
    pub name: String,
    pub price: Decimal,
}

/// One entry of the ranked discovery response.
///
/// The engine-internal score is not a field here: the scored type below
/// never leaves this module, so relevance numbers cannot leak to callers.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult {
    pub vendor_id: String,
    pub name: String,
    pub phone: String,
    pub business_hours: Option<String>,
    pub location: GeoPoint,
    /// Whole meters, truncated, never negative.
    pub distance_m: i64,
    pub matching_items: Vec<MatchingItem>,
}

/// Engine-internal: a candidate with its computed score and the raw
/// fractional distance kept for tie-breaking.
struct ScoredCandidate {
    result: RankedResult,
    score: f64,
    distance_m: f64,
}

/// The discovery and ranking engine.
///
/// Stateless apart from its store handle; every [`rank`](Self::rank) call
/// fetches a fresh candidate snapshot, so concurrent calls share nothing.
#[derive(Debug, Clone)]
pub struct VendorRanker<S> {
    store: S,
}

impl<S: CandidateStore> VendorRanker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Rank vendors near `(lat, lng)` for a free-text `query`.
    ///
    /// An empty query means "no text filter": nothing is discarded and the
    /// ordering degrades to ascending distance. A non-empty query excludes
    /// candidates with no name or menu match at all, however close.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidInput`] for non-finite/out-of-range coordinates
    /// or a zero limit (checked before any store access);
    /// [`SearchError::Store`] when a store fetch fails — the whole call
    /// fails, no partial results.
    pub async fn rank(
        &self,
        query: &str,
        lat: f64,
        lng: f64,
        limit: usize,
    ) -> Result<Vec<RankedResult>, SearchError> {
        let point = GeoPoint { lat, lng };
        if !point.is_valid() {
            return Err(SearchError::InvalidInput(format!(
                "coordinates out of range: ({lat}, {lng})"
            )));
        }
        if limit == 0 {
            return Err(SearchError::InvalidInput(
                "limit must be positive".to_string(),
            ));
        }
        let limit = limit.min(MAX_RESULTS);

        let query = query.trim().to_lowercase();
        let terms = expand(&query);
        let has_query = !query.is_empty();

        let candidates = self
            .store
            .vendor_candidates(lat, lng, CANDIDATE_CEILING)
            .await?;
        tracing::debug!(candidates = candidates.len(), %query, "scoring candidates");

        let mut scored: Vec<ScoredCandidate> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let menu = self.store.menu_items(&candidate.vendor_id).await?;
            if let Some(sc) = score_candidate(candidate, menu, &terms, has_query) {
                scored.push(sc);
            }
        }

        // Highest score first; nearest first among equals. total_cmp keeps
        // the order total even for pathological float input.
        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.distance_m.total_cmp(&b.distance_m))
        });
        scored.truncate(limit);

        Ok(scored.into_iter().map(|sc| sc.result).collect())
    }
}

/// Score one candidate, or drop it when a non-empty query finds no textual
/// relevance at all.
fn score_candidate(
    candidate: VendorCandidate,
    menu: Vec<CandidateMenuItem>,
    terms: &[String],
    has_query: bool,
) -> Option<ScoredCandidate> {
    let mut score = 0.0_f64;
    let mut matching_items = Vec::new();

    if has_query {
        if contains_any(&candidate.name.to_lowercase(), terms) {
            score += NAME_MATCH_BONUS;
        }
        for item in menu {
            if contains_any(&item.name.to_lowercase(), terms) {
                // Every matching item counts toward the score; only the
                // first three are retained for display.
                score += ITEM_MATCH_BONUS;
                if matching_items.len() < MATCHING_ITEMS_CAP {
                    matching_items.push(MatchingItem {
                        item_id: item.item_id,
                        name: item.name,
                        price: item.price,
                    });
                }
            }
        }
        if score == 0.0 {
            return None;
        }
    }

    score += distance_bonus(candidate.distance_m);

    Some(ScoredCandidate {
        distance_m: candidate.distance_m,
        score,
        result: RankedResult {
            vendor_id: candidate.vendor_id,
            name: candidate.name,
            phone: candidate.phone,
            business_hours: candidate.business_hours,
            location: GeoPoint {
                lat: candidate.lat,
                lng: candidate.lng,
            },
            distance_m: whole_meters(candidate.distance_m),
            matching_items,
        },
    })
}

fn contains_any(haystack: &str, terms: &[String]) -> bool {
    terms.iter().any(|t| haystack.contains(t.as_str()))
}

/// Linear decay, zero at 50 km and beyond. Small next to the match bonuses,
/// so distance orders candidates of equal textual relevance without
/// outranking relevance itself.
fn distance_bonus(distance_m: f64) -> f64 {
    (50.0 - distance_m / 1000.0).max(0.0)
}

fn whole_meters(distance_m: f64) -> i64 {
    distance_m.max(0.0) as i64
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::store::StoreError;

    /// In-memory store for engine tests. `ceiling` is honored the way the
    /// real store honors it: nearest-first, capped.
    #[derive(Default)]
    struct FakeStore {
        vendors: Vec<VendorCandidate>,
        menus: HashMap<String, Vec<CandidateMenuItem>>,
        fail: bool,
    }

    impl FakeStore {
        fn with_vendor(mut self, id: &str, name: &str, distance_m: f64) -> Self {
            self.vendors.push(VendorCandidate {
                vendor_id: id.to_string(),
                name: name.to_string(),
                phone: "+15125550100".to_string(),
                business_hours: None,
                lat: 30.0,
                lng: -97.0,
                distance_m,
            });
            self
        }

        fn with_menu(mut self, vendor_id: &str, items: &[(&str, &str)]) -> Self {
            let items = items
                .iter()
                .map(|(id, name)| CandidateMenuItem {
                    item_id: (*id).to_string(),
                    name: (*name).to_string(),
                    price: Decimal::new(899, 2),
                })
                .collect();
            self.menus.insert(vendor_id.to_string(), items);
            self
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    impl CandidateStore for FakeStore {
        async fn vendor_candidates(
            &self,
            _lat: f64,
            _lng: f64,
            ceiling: i64,
        ) -> Result<Vec<VendorCandidate>, StoreError> {
            if self.fail {
                return Err(StoreError::new(std::io::Error::other("store down")));
            }
            let mut vendors = self.vendors.clone();
            vendors.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
            vendors.truncate(usize::try_from(ceiling).unwrap());
            Ok(vendors)
        }

        async fn menu_items(
            &self,
            vendor_id: &str,
        ) -> Result<Vec<CandidateMenuItem>, StoreError> {
            if self.fail {
                return Err(StoreError::new(std::io::Error::other("store down")));
            }
            Ok(self.menus.get(vendor_id).cloned().unwrap_or_default())
        }
    }

    fn ids(results: &[RankedResult]) -> Vec<&str> {
        results.iter().map(|r| r.vendor_id.as_str()).collect()
    }

    #[tokio::test]
    async fn empty_query_orders_by_ascending_distance() {
        // Menus of different sizes must not influence the no-query ordering.
        let store = FakeStore::default()
            .with_vendor("v_far", "Taco Cart", 5_000.0)
            .with_vendor("v_near", "Juice Stand", 100.0)
            .with_vendor("v_mid", "Taco Palace", 2_000.0)
            .with_menu("v_far", &[("m_1", "Tacos"), ("m_2", "Burritos"), ("m_3", "Elote")])
            .with_menu("v_mid", &[("m_4", "Tacos")]);

        let ranker = VendorRanker::new(store);
        let results = ranker.rank("", 30.0, -97.0, 10).await.unwrap();

        assert_eq!(ids(&results), vec!["v_near", "v_mid", "v_far"]);
        let distances: Vec<i64> = results.iter().map(|r| r.distance_m).collect();
        assert!(distances.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn empty_query_discards_nothing_and_surfaces_no_items() {
        let store = FakeStore::default()
            .with_vendor("v_1", "Somewhere", 300.0)
            .with_menu("v_1", &[("m_1", "Anything")]);

        let ranker = VendorRanker::new(store);
        let results = ranker.rank("  ", 30.0, -97.0, 10).await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(results[0].matching_items.is_empty());
    }

    #[tokio::test]
    async fn non_matching_query_returns_empty() {
        let store = FakeStore::default()
            .with_vendor("v_1", "Juice Stand", 50.0)
            .with_menu("v_1", &[("m_1", "Orange Juice")]);

        let ranker = VendorRanker::new(store);
        let results = ranker.rank("sushi", 30.0, -97.0, 10).await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn name_match_bonus_awarded_once() {
        // Two name matches in one vendor name score the same as one, so the
        // nearer vendor wins the tie.
        let store = FakeStore::default()
            .with_vendor("v_double", "Taco Taco House", 2_000.0)
            .with_vendor("v_single", "Taco Shack", 1_000.0);

        let ranker = VendorRanker::new(store);
        let results = ranker.rank("taco", 30.0, -97.0, 10).await.unwrap();

        assert_eq!(ids(&results), vec!["v_single", "v_double"]);
    }

    #[tokio::test]
    async fn each_matching_item_raises_score() {
        // Same distance; the vendor with more matching items must rank first.
        let store = FakeStore::default()
            .with_vendor("v_two", "Stand A", 1_000.0)
            .with_vendor("v_one", "Stand B", 1_000.0)
            .with_menu("v_two", &[("m_1", "Taco Plate"), ("m_2", "Taco Combo")])
            .with_menu("v_one", &[("m_3", "Taco Plate")]);

        let ranker = VendorRanker::new(store);
        let results = ranker.rank("taco", 30.0, -97.0, 10).await.unwrap();

        assert_eq!(ids(&results), vec!["v_two", "v_one"]);
    }

    #[tokio::test]
    async fn adding_a_matching_item_cannot_lower_rank() {
        // v_a and v_b identical except v_b has one extra matching item;
        // v_b is farther yet must outrank v_a.
        let store = FakeStore::default()
            .with_vendor("v_a", "Stand A", 1_000.0)
            .with_vendor("v_b", "Stand B", 3_000.0)
            .with_menu("v_a", &[("m_1", "Taco Plate")])
            .with_menu("v_b", &[("m_2", "Taco Plate"), ("m_3", "Taco Supreme")]);

        let ranker = VendorRanker::new(store);
        let results = ranker.rank("taco", 30.0, -97.0, 10).await.unwrap();

        assert_eq!(ids(&results), vec!["v_b", "v_a"]);
    }

    #[tokio::test]
    async fn matching_items_capped_at_three_but_all_score() {
        let store = FakeStore::default()
            .with_vendor("v_five", "Stand A", 1_000.0)
            .with_vendor("v_four", "Stand B", 1_000.0)
            .with_menu(
                "v_five",
                &[
                    ("m_1", "Taco Uno"),
                    ("m_2", "Taco Dos"),
                    ("m_3", "Taco Tres"),
                    ("m_4", "Taco Cuatro"),
                    ("m_5", "Taco Cinco"),
                ],
            )
            .with_menu(
                "v_four",
                &[
                    ("m_6", "Taco A"),
                    ("m_7", "Taco B"),
                    ("m_8", "Taco C"),
                    ("m_9", "Taco D"),
                ],
            );

        let ranker = VendorRanker::new(store);
        let results = ranker.rank("taco", 30.0, -97.0, 10).await.unwrap();

        // 5×50 beats 4×50: the uncapped count drives the score…
        assert_eq!(ids(&results), vec!["v_five", "v_four"]);
        // …while the retained list stays capped.
        assert_eq!(results[0].matching_items.len(), 3);
        assert_eq!(results[0].matching_items[0].item_id, "m_1");
    }

    #[tokio::test]
    async fn equal_scores_tie_break_by_ascending_distance() {
        let store = FakeStore::default()
            .with_vendor("v_far", "Taco Norte", 4_000.0)
            .with_vendor("v_near", "Taco Sur", 1_500.0)
            .with_vendor("v_mid", "Taco Centro", 2_500.0);

        let ranker = VendorRanker::new(store);
        let results = ranker.rank("taco", 30.0, -97.0, 10).await.unwrap();

        // Identical 100-point name bonus; distance bonus decides — but that
        // is monotonic in distance, so the order is nearest-first.
        assert_eq!(ids(&results), vec!["v_near", "v_mid", "v_far"]);
    }

    #[tokio::test]
    async fn text_relevance_dominates_distance() {
        // A name match 60 km out (distance bonus 0) still beats a single
        // item match 1 km out (50 + 49).
        let store = FakeStore::default()
            .with_vendor("v_named", "Taqueria El Taco", 60_000.0)
            .with_vendor("v_item", "Food Stand", 1_000.0)
            .with_menu("v_item", &[("m_1", "Taco Plate")]);

        let ranker = VendorRanker::new(store);
        let results = ranker.rank("taco", 30.0, -97.0, 10).await.unwrap();

        assert_eq!(ids(&results), vec!["v_named", "v_item"]);
    }

    #[tokio::test]
    async fn expansion_matches_related_vendor_names() {
        // "tacos" expands through the taco category to "birria".
        let store = FakeStore::default().with_vendor("v_1", "Birria Bros", 500.0);

        let ranker = VendorRanker::new(store);
        let results = ranker.rank("tacos", 30.0, -97.0, 10).await.unwrap();

        assert_eq!(ids(&results), vec!["v_1"]);
    }

    #[tokio::test]
    async fn matching_is_case_insensitive() {
        let store = FakeStore::default().with_vendor("v_1", "TACO TRUCK", 500.0);

        let ranker = VendorRanker::new(store);
        let results = ranker.rank("Taco", 30.0, -97.0, 10).await.unwrap();

        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn limit_above_system_max_is_capped() {
        let mut store = FakeStore::default();
        for n in 0..30 {
            store = store.with_vendor(
                &format!("v_{n:02}"),
                &format!("Taco Stand {n}"),
                f64::from(n) * 100.0,
            );
        }

        let ranker = VendorRanker::new(store);
        let results = ranker.rank("taco", 30.0, -97.0, 1_000).await.unwrap();

        assert_eq!(results.len(), MAX_RESULTS);
    }

    #[tokio::test]
    async fn limit_truncates_results() {
        let store = FakeStore::default()
            .with_vendor("v_1", "Taco One", 100.0)
            .with_vendor("v_2", "Taco Two", 200.0)
            .with_vendor("v_3", "Taco Three", 300.0);

        let ranker = VendorRanker::new(store);
        let results = ranker.rank("taco", 30.0, -97.0, 2).await.unwrap();

        assert_eq!(ids(&results), vec!["v_1", "v_2"]);
    }

    #[tokio::test]
    async fn invalid_coordinates_rejected_before_store_access() {
        // A failing store proves validation short-circuits the fetch.
        let ranker = VendorRanker::new(FakeStore::failing());

        let err = ranker.rank("taco", f64::NAN, -97.0, 10).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(_)));

        let err = ranker.rank("taco", 91.0, -97.0, 10).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(_)));

        let err = ranker.rank("taco", 30.0, -181.0, 10).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn zero_limit_rejected() {
        let ranker = VendorRanker::new(FakeStore::failing());
        let err = ranker.rank("taco", 30.0, -97.0, 0).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn store_failure_fails_the_whole_call() {
        let ranker = VendorRanker::new(FakeStore::failing());
        let err = ranker.rank("taco", 30.0, -97.0, 10).await.unwrap_err();
        assert!(matches!(err, SearchError::Store(_)));
    }

    #[tokio::test]
    async fn no_candidates_is_empty_not_error() {
        let ranker = VendorRanker::new(FakeStore::default());
        let results = ranker.rank("taco", 30.0, -97.0, 10).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn distance_truncates_to_whole_meters() {
        let store = FakeStore::default().with_vendor("v_1", "Taco Cart", 1_234.9);

        let ranker = VendorRanker::new(store);
        let results = ranker.rank("taco", 30.0, -97.0, 10).await.unwrap();

        assert_eq!(results[0].distance_m, 1_234);
    }

    #[test]
    fn ranked_result_serializes_without_score() {
        let result = RankedResult {
            vendor_id: "v_12345678".to_string(),
            name: "Taco Cart".to_string(),
            phone: "+15125550100".to_string(),
            business_hours: Some("11am-9pm".to_string()),
            location: GeoPoint {
                lat: 30.2672,
                lng: -97.7431,
            },
            distance_m: 420,
            matching_items: vec![MatchingItem {
                item_id: "m_1".to_string(),
                name: "Tacos al Pastor".to_string(),
                price: Decimal::new(850, 2),
            }],
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert!(json.get("score").is_none());
        assert_eq!(json["distance_m"], 420);
        assert_eq!(json["matching_items"][0]["item_id"], "m_1");
    }

    #[test]
    fn distance_bonus_decays_linearly_and_floors_at_zero() {
        assert!((distance_bonus(0.0) - 50.0).abs() < f64::EPSILON);
        assert!((distance_bonus(10_000.0) - 40.0).abs() < f64::EPSILON);
        assert!((distance_bonus(50_000.0)).abs() < f64::EPSILON);
        assert!((distance_bonus(80_000.0)).abs() < f64::EPSILON);
    }
}
