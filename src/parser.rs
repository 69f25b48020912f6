use scraper::{Html, Selector};
use tracing::warn;

use crate::error::PriceUnavailable;

/// Finds the text of the first element matching a selector.
pub trait Locator {
    fn locate(&self, html: &str, selector: &str) -> Option<String>;
}

/// [`Locator`] backed by the `scraper` HTML parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScraperLocator;

impl Locator for ScraperLocator {
    fn locate(&self, html: &str, selector: &str) -> Option<String> {
        let selector = match Selector::parse(selector) {
            Ok(s) => s,
            Err(e) => {
                warn!(selector, error = %e, "invalid css selector");
                return None;
            }
        };
        let doc = Html::parse_document(html);
        doc.select(&selector)
            .next()
            .map(|e| e.text().collect::<String>())
    }
}

/// Locates the price element and reads its digits as an integer.
pub fn extract_price(
    locator: &dyn Locator,
    html: &str,
    selector: &str,
) -> Result<u64, PriceUnavailable> {
    let text = locator
        .locate(html, selector)
        .ok_or_else(|| PriceUnavailable::NoMatch(selector.to_string()))?;
    parse_price(&text)
}

/// Drops everything but decimal digits, so `"￥1,980"` reads as 1980.
///
/// Decimal points are dropped too: `"$12.99"` reads as 1299.
pub fn parse_price(text: &str) -> Result<u64, PriceUnavailable> {
    let digits: String = text.chars().filter_map(decimal_digit).collect();
    if digits.is_empty() {
        return Err(PriceUnavailable::NoDigits(text.trim().to_string()));
    }
    digits
        .parse()
        .map_err(|_| PriceUnavailable::OutOfRange(digits))
}

// ASCII and full-width forms both show up on Japanese storefronts. Other
// Unicode decimal digits (Arabic-Indic, Devanagari, ...) are dropped like any
// other symbol, and `parse_price` rejects digit runs past `u64::MAX`.
fn decimal_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '０'..='９' => char::from_digit(c as u32 - '０' as u32, 10),
        _ => None,
    }
}
