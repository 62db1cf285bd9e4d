//! Price-token matching for menu lines.

use regex::Regex;
use rust_decimal::Decimal;

/// Compiled price patterns, built once per extraction pass.
///
/// A price token is an optional currency symbol followed by 1–3 integer
/// digits and an optional 2-digit fraction, e.g. `$8.50`, `12`, `9.25`.
pub(crate) struct PriceMatcher {
    trailing: Regex,
    whole_line: Regex,
}

impl PriceMatcher {
    pub(crate) fn new() -> Self {
        Self {
            trailing: Regex::new(r"\$?\s*(\d{1,3}(?:\.\d{2})?)\s*$").expect("valid price regex"),
            whole_line: Regex::new(r"^\$?\s*(\d{1,3}(?:\.\d{2})?)\s*$")
                .expect("valid price-line regex"),
        }
    }

    /// Match a price token anchored at the end of `line`.
    ///
    /// Returns the text before the token and the parsed price.
    pub(crate) fn match_trailing<'a>(&self, line: &'a str) -> Option<(&'a str, Decimal)> {
        let caps = self.trailing.captures(line)?;
        let whole = caps.get(0)?;
        let price = parse_price(caps.get(1)?.as_str())?;
        Some((&line[..whole.start()], price))
    }

    /// Match a line that is *only* a price token (both ends anchored).
    ///
    /// Used by the lookahead: a menu often prints the price on the line
    /// below the item name.
    pub(crate) fn match_whole_line(&self, line: &str) -> Option<Decimal> {
        let caps = self.whole_line.captures(line)?;
        parse_price(caps.get(1)?.as_str())
    }
}

fn parse_price(token: &str) -> Option<Decimal> {
    token.parse::<Decimal>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> PriceMatcher {
        PriceMatcher::new()
    }

    #[test]
    fn trailing_price_with_dollar_sign() {
        let (name, price) = matcher().match_trailing("Tacos al Pastor $8.50").unwrap();
        assert_eq!(name.trim(), "Tacos al Pastor");
        assert_eq!(price, Decimal::new(850, 2));
    }

    #[test]
    fn trailing_price_without_symbol() {
        let (name, price) = matcher().match_trailing("Elote 4.00").unwrap();
        assert_eq!(name.trim(), "Elote");
        assert_eq!(price, Decimal::new(400, 2));
    }

    #[test]
    fn trailing_integer_price() {
        let (name, price) = matcher().match_trailing("Horchata 3").unwrap();
        assert_eq!(name.trim(), "Horchata");
        assert_eq!(price, Decimal::from(3));
    }

    #[test]
    fn no_trailing_price_on_bare_name() {
        assert!(matcher().match_trailing("Burrito Bowl").is_none());
    }

    #[test]
    fn whole_line_price_bare() {
        assert_eq!(
            matcher().match_whole_line("9.25"),
            Some(Decimal::new(925, 2))
        );
    }

    #[test]
    fn whole_line_price_with_symbol_and_spaces() {
        assert_eq!(
            matcher().match_whole_line("$ 12.00"),
            Some(Decimal::new(1200, 2))
        );
    }

    #[test]
    fn whole_line_rejects_name_with_price() {
        assert!(matcher().match_whole_line("Elote 4.00").is_none());
    }

    #[test]
    fn one_decimal_digit_is_not_a_fraction() {
        // "12.5" — the fraction needs exactly two digits, so only the "5"
        // qualifies as a trailing token.
        let (name, price) = matcher().match_trailing("Combo 12.5").unwrap();
        assert_eq!(name, "Combo 12.");
        assert_eq!(price, Decimal::from(5));
    }
}
