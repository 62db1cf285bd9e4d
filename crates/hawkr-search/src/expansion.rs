//! Query expansion over a fixed food-category vocabulary.
//!
//! Read-only reference data: a category key maps to an ordered list of
//! related terms. No stemming, no edit distance, no language detection —
//! matching is symmetric substring containment, which deliberately lets
//! short terms expand broadly ("taco" hits "tacos", and vice versa).

/// Category key -> related terms, in declaration order.
///
/// Declaration order matters: when several categories hit, their terms are
/// concatenated in this order before first-occurrence dedup.
const FOOD_CATEGORIES: &[(&str, &[&str])] = &[
    ("taco", &["taco", "tacos", "birria", "al pastor", "carnitas", "mexican"]),
    ("mexican", &["taco", "burrito", "quesadilla", "torta", "elote", "salsa"]),
    ("burrito", &["burrito", "bowl", "wrap", "mexican"]),
    ("pizza", &["pizza", "slice", "calzone", "italian"]),
    ("burger", &["burger", "cheeseburger", "smash", "fries"]),
    ("ramen", &["ramen", "noodle", "noodles", "broth", "japanese"]),
    ("sushi", &["sushi", "roll", "nigiri", "japanese"]),
    ("bbq", &["bbq", "barbecue", "brisket", "ribs", "smoked"]),
    ("breakfast", &["breakfast", "egg", "eggs", "pancake", "waffle", "bacon"]),
    ("coffee", &["coffee", "espresso", "latte", "cold brew"]),
    ("dessert", &["dessert", "churro", "churros", "ice cream", "paleta", "sweet"]),
    ("halal", &["halal", "shawarma", "gyro", "kebab", "falafel"]),
];

/// Expand a search term into the ordered set of terms treated as equivalent.
///
/// The lower-cased, trimmed original is always the first element, even when
/// no category matches. Blank input yields `vec![""]` so that downstream
/// "name contains any term" checks degrade to always-true, which is what
/// gives the no-query browse mode its match-everything behavior.
///
/// Deterministic: category hits contribute related terms in
/// table-declaration order, deduplicated preserving first occurrence.
#[must_use]
pub fn expand(term: &str) -> Vec<String> {
    let normalized = term.trim().to_lowercase();

    let mut terms = vec![normalized.clone()];
    if normalized.is_empty() {
        return terms;
    }

    for (key, related) in FOOD_CATEGORIES {
        // Symmetric containment: short queries widen, long queries still hit.
        if key.contains(&normalized) || normalized.contains(key) {
            for r in *related {
                if !terms.iter().any(|t| t == r) {
                    terms.push((*r).to_string());
                }
            }
        }
    }

    terms
}
