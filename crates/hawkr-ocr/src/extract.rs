//! The line-by-line extraction loop.

use rust_decimal::Decimal;

use crate::filter::{clean_name, is_digits_and_spaces, is_noise_line, strip_leading_decoration};
use crate::price::PriceMatcher;
use crate::MenuItemCandidate;

/// Lines shorter than this (after trimming) are discarded outright.
const MIN_LINE_LEN: usize = 3;

/// Names shorter than this are rejected as OCR fragments.
const MIN_NAME_LEN: usize = 2;

/// Upper sanity bound on a single item price.
const MAX_PRICE: u32 = 500;

/// Extract structured `{name, price}` candidates from raw OCR text.
///
/// One pass over the input, line by line. Lines that are too short, match
/// the template-noise filter, or fail validation are dropped; a line with no
/// trailing price consumes the next line as its price when that line is a
/// bare price token. Never fails — hopeless input just yields an empty list.
#[must_use]
pub fn extract_items(raw: &str) -> Vec<MenuItemCandidate> {
    let matcher = PriceMatcher::new();
    let max_price = Decimal::from(MAX_PRICE);
    let lines: Vec<&str> = raw.split('\n').collect();

    let mut items = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        i += 1;

        if line.chars().count() < MIN_LINE_LEN {
            continue;
        }
        if is_noise_line(line) {
            tracing::debug!(line, "skipping template noise line");
            continue;
        }

        let line = strip_leading_decoration(line);

        let (name_part, price) = match matcher.match_trailing(line) {
            Some((name, price)) => (name, Some(price)),
            None => match lines.get(i).and_then(|next| matcher.match_whole_line(next.trim())) {
                Some(price) => {
                    i += 1; // consume the price line
                    (line, Some(price))
                }
                None => (line, None),
            },
        };

        let name = clean_name(name_part);
        if name.chars().count() < MIN_NAME_LEN || is_digits_and_spaces(&name) {
            continue;
        }
        let Some(price) = price else {
            continue;
        };
        if price <= Decimal::ZERO || price > max_price {
            tracing::debug!(%name, %price, "rejecting candidate with out-of-range price");
            continue;
        }

        items.push(MenuItemCandidate {
            id: hawkr_core::prefixed_id('m'),
            name,
            price: price.round_dp(2),
            description: String::new(),
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[MenuItemCandidate]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_no_items() {
        assert!(extract_items("").is_empty());
    }

    #[test]
    fn hopeless_input_yields_no_items() {
        assert!(extract_items("~~\n##\n!!\n").is_empty());
    }

    #[test]
    fn inline_price_extracted() {
        let items = extract_items("Tacos al Pastor $8.50");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Tacos al Pastor");
        assert_eq!(items[0].price, Decimal::new(850, 2));
        assert_eq!(items[0].description, "");
        assert!(items[0].id.starts_with("m_"));
    }

    #[test]
    fn price_on_next_line_consumed() {
        let items = extract_items("Burrito Bowl\n9.25\nElote $4.00");
        assert_eq!(names(&items), vec!["Burrito Bowl", "Elote"]);
        assert_eq!(items[0].price, Decimal::new(925, 2));
    }

    #[test]
    fn menu_with_placeholder_line_round_trip() {
        let items = extract_items("Tacos al Pastor $8.50\nBurrito Bowl\n9.25\nPLACEHOLDER TEXT\n");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Tacos al Pastor");
        assert_eq!(items[0].price, Decimal::new(850, 2));
        assert_eq!(items[1].name, "Burrito Bowl");
        assert_eq!(items[1].price, Decimal::new(925, 2));
    }

    #[test]
    fn price_above_sanity_bound_rejected() {
        assert!(extract_items("Giant Platter 999.00").is_empty());
    }

    #[test]
    fn price_at_bound_accepted() {
        let items = extract_items("Whole Lechon 500.00");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price, Decimal::from(500));
    }

    #[test]
    fn zero_price_rejected() {
        assert!(extract_items("Free Sample 0.00").is_empty());
    }

    #[test]
    fn unpriced_name_rejected() {
        assert!(extract_items("Burrito Bowl\nTortas Ahogadas\n").is_empty());
    }

    #[test]
    fn digit_only_line_never_becomes_item() {
        // "123 45" cleans to a digits-and-spaces name.
        assert!(extract_items("123 45\n").is_empty());
    }

    #[test]
    fn short_lines_skipped() {
        assert!(extract_items("ab\nx\n").is_empty());
    }

    #[test]
    fn bulleted_dot_leader_menu() {
        let items = extract_items("• Carnitas Plate ..... $11.00\n- Agua Fresca ... 3.50\n");
        assert_eq!(names(&items), vec!["Carnitas Plate", "Agua Fresca"]);
        assert_eq!(items[1].price, Decimal::new(350, 2));
    }

    #[test]
    fn noise_line_not_consumed_as_price_source() {
        // The noise filter applies to the head line; a price-only line after
        // a noise line is itself rejected as a digits-only candidate.
        let items = extract_items("ADD ITEM\n5.00\n");
        assert!(items.is_empty());
    }

    #[test]
    fn candidate_ids_are_fresh_per_item() {
        let items = extract_items("Elote $4.00\nChurros $3.00");
        assert_ne!(items[0].id, items[1].id);
    }

    #[test]
    fn price_rounded_to_two_decimals() {
        let items = extract_items("Horchata 3");
        assert_eq!(items[0].price, Decimal::new(300, 2));
    }
}
