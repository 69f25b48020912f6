use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::PriceRecord;

/// Per-product price series, in the shape of the history file.
///
/// Products keep the order they were first seen in, and each series keeps
/// the order its dates were first recorded in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    products: IndexMap<String, Vec<PriceRecord>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `price` for `name` on `date`, replacing that day's price if
    /// one is already there.
    pub fn upsert(&mut self, name: &str, date: &str, price: u64) {
        let series = self.products.entry(name.to_string()).or_default();
        match series.iter_mut().find(|r| r.date == date) {
            Some(record) => record.price = price,
            None => series.push(PriceRecord { date: date.to_string(), price }),
        }
    }

    pub fn series(&self, name: &str) -> Option<&[PriceRecord]> {
        self.products.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, price: u64) -> PriceRecord {
        PriceRecord { date: date.to_string(), price }
    }

    #[test]
    fn same_day_overwrites_in_place() {
        let mut h = History::new();
        h.upsert("Widget", "2024-06-01", 1000);
        h.upsert("Widget", "2024-06-01", 1000);
        assert_eq!(h.series("Widget").unwrap(), &[record("2024-06-01", 1000)]);

        h.upsert("Widget", "2024-06-01", 900);
        assert_eq!(h.series("Widget").unwrap(), &[record("2024-06-01", 900)]);
    }

    #[test]
    fn new_days_append_in_order() {
        let mut h = History::new();
        h.upsert("Widget", "2024-06-01", 1000);
        h.upsert("Widget", "2024-06-02", 1100);
        assert_eq!(
            h.series("Widget").unwrap(),
            &[record("2024-06-01", 1000), record("2024-06-02", 1100)]
        );
    }

    #[test]
    fn overwriting_an_old_day_keeps_its_position() {
        let mut h = History::new();
        h.upsert("Widget", "2024-06-01", 1000);
        h.upsert("Widget", "2024-06-02", 1100);
        h.upsert("Widget", "2024-06-01", 1200);
        assert_eq!(
            h.series("Widget").unwrap(),
            &[record("2024-06-01", 1200), record("2024-06-02", 1100)]
        );
    }

    #[test]
    fn products_are_independent() {
        let mut h = History::new();
        h.upsert("Widget", "2024-06-01", 1000);
        h.upsert("Gadget", "2024-06-01", 50);
        assert_eq!(h.len(), 2);
        assert_eq!(h.names().collect::<Vec<_>>(), ["Widget", "Gadget"]);
        assert_eq!(h.series("Gadget").unwrap(), &[record("2024-06-01", 50)]);
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut h = History::new();
        h.upsert("Widget", "2024-06-01", 2500);
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Widget": [{"date": "2024-06-01", "price": 2500}]})
        );
    }
}
