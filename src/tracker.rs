use tracing::{debug, info, warn};

use crate::archiver;
use crate::config::TrackerConfig;
use crate::error::{PriceUnavailable, TrackerError};
use crate::fetcher::PageSource;
use crate::models::Product;
use crate::parser::{self, Locator};

pub struct ProductOutcome {
    pub name: String,
    pub result: Result<u64, PriceUnavailable>,
}

/// What happened during one run.
pub struct RunReport {
    pub date: String,
    pub outcomes: Vec<ProductOutcome>,
}

impl RunReport {
    pub fn recorded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.recorded()
    }
}

/// Fetches every listed product once and records today's prices.
///
/// Only an unusable product list or history file (or a failed final save)
/// ends the run early; a product whose price can't be read is reported and
/// skipped.
pub fn run(
    config: &TrackerConfig,
    date: &str,
    source: &dyn PageSource,
    locator: &dyn Locator,
) -> Result<RunReport, TrackerError> {
    println!("--- Running Price Tracker: {date} ---");

    let products = archiver::load_products(&config.products_path)?;
    info!(count = products.len(), path = %config.products_path.display(), "loaded products");

    let mut history = archiver::load_history(&config.history_path)?;
    let mut outcomes = Vec::with_capacity(products.len());

    for product in &products {
        println!("Checking: {} ...", product.name);
        let result = check_price(product, source, locator);
        match &result {
            Ok(price) => {
                println!("  -> {}", format_yen(*price));
                history.upsert(&product.name, date, *price);
            }
            Err(e) => {
                if let PriceUnavailable::Fetch(err) = e {
                    println!("Error fetching {}: {}", product.url, err);
                }
                warn!(name = %product.name, url = %product.url, reason = %e, "price unavailable");
                println!("  -> Failed to get price");
            }
        }
        outcomes.push(ProductOutcome { name: product.name.clone(), result });
    }

    archiver::save_history(&history, &config.history_path)?;
    debug!(path = %config.history_path.display(), products = history.len(), "history saved");
    println!("Done.");

    Ok(RunReport { date: date.to_string(), outcomes })
}

fn check_price(
    product: &Product,
    source: &dyn PageSource,
    locator: &dyn Locator,
) -> Result<u64, PriceUnavailable> {
    let html = source.fetch(&product.url)?;
    parser::extract_price(locator, &html, &product.selector)
}

/// `2500` -> `¥2,500`
pub fn format_yen(price: u64) -> String {
    let digits = price.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    out.push('¥');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
