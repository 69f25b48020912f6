use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::error::TrackerError;
use crate::history::History;
use crate::models::Product;

/// Reads the product list. A missing file is its own error so the caller
/// can report it plainly.
pub fn load_products(path: &Path) -> Result<Vec<Product>, TrackerError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(TrackerError::ProductsNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(TrackerError::ProductsUnreadable {
                path: path.to_path_buf(),
                source: e.into(),
            });
        }
    };
    serde_json::from_str(&text)
        .context("expected a JSON array of {name, url, selector}")
        .map_err(|source| TrackerError::ProductsUnreadable { path: path.to_path_buf(), source })
}

/// Reads the history file. A missing file or one that is not JSON at all
/// starts a fresh history; anything else is an error so the file is never
/// overwritten with less than it held.
pub fn load_history(path: &Path) -> Result<History, TrackerError> {
    let unreadable = |source: anyhow::Error| TrackerError::HistoryUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no history, starting empty");
            return Ok(History::new());
        }
        Err(e) => return Err(unreadable(e.into())),
    };
    match serde_json::from_str(&text) {
        Ok(history) => Ok(history),
        Err(e) if matches!(e.classify(), Category::Syntax | Category::Eof) => {
            warn!(path = %path.display(), error = %e, "history is not valid JSON, starting empty");
            Ok(History::new())
        }
        Err(e) => Err(unreadable(
            anyhow::Error::new(e).context("expected an object of name -> [{date, price}]"),
        )),
    }
}

/// Writes the history as indented JSON, replacing the file only once the
/// new content is fully on disk.
pub fn save_history(history: &History, path: &Path) -> Result<(), TrackerError> {
    write_atomically(history, path).map_err(|source| TrackerError::HistoryWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomically(history: &History, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string_pretty(history)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = tmp_path(path);
    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let mut history = History::new();
        history.upsert("Widget", "2024-06-01", 1000);
        history.upsert("Widget", "2024-06-02", 1100);
        history.upsert("Ａガジェット", "2024-06-01", 50);
        save_history(&history, &path).unwrap();

        let loaded = load_history(&path).unwrap();
        assert_eq!(loaded, history);
        assert_eq!(loaded.names().collect::<Vec<_>>(), ["Widget", "Ａガジェット"]);
    }

    #[test]
    fn saved_file_is_indented_and_keeps_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let mut history = History::new();
        history.upsert("コーヒー豆", "2024-06-01", 1980);
        save_history(&history, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("コーヒー豆"));
        assert!(text.contains("\n  \"コーヒー豆\": [\n"));
        assert!(!dir.path().join("data.json.tmp").exists());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("data.json");
        save_history(&History::new(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn missing_history_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_history(&dir.path().join("nope.json")).unwrap().is_empty());
    }

    #[test]
    fn corrupt_history_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{\"Widget\": [{\"date\": ").unwrap();
        assert!(load_history(&path).unwrap().is_empty());

        fs::write(&path, "not json").unwrap();
        assert!(load_history(&path).unwrap().is_empty());
    }

    #[test]
    fn wrong_shape_history_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let text = r#"{"Gadget": [{"date": "2024-06-01", "price": 500}], "Widget": [{"date": "2024-06-01", "price": 1980.0}]}"#;
        fs::write(&path, text).unwrap();

        let err = load_history(&path).unwrap_err();
        assert!(matches!(err, TrackerError::HistoryUnreadable { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), text);

        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(load_history(&path), Err(TrackerError::HistoryUnreadable { .. })));
    }

    #[test]
    fn non_utf8_history_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let bytes = b"{\"Widget\": [{\"date\": \"2024-06-01\", \"price\": 1980}], \"\xff\": []}";
        fs::write(&path, bytes).unwrap();

        assert!(matches!(load_history(&path), Err(TrackerError::HistoryUnreadable { .. })));
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn missing_products_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_products(&dir.path().join("products.json")).unwrap_err();
        assert!(matches!(err, TrackerError::ProductsNotFound(_)));
        assert!(err.to_string().ends_with("products.json not found."));
    }

    #[test]
    fn malformed_products_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        fs::write(&path, r#"[{"name": "Widget"}]"#).unwrap();
        assert!(matches!(load_products(&path), Err(TrackerError::ProductsUnreadable { .. })));
    }

    #[test]
    fn products_load_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        fs::write(
            &path,
            r##"[
                {"name": "Widget", "url": "http://example.test/w", "selector": ".price"},
                {"name": "Gadget", "url": "http://example.test/g", "selector": "#p"}
            ]"##,
        )
        .unwrap();
        let products = load_products(&path).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[1].selector, "#p");
    }
}
