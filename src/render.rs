//! Reply text for the slash commands.
//!
//! Missing fields render as `N/A`. So do empty strings and zero download
//! counts, which the chat client has always shown that way.

use crate::domain::Dataset;

pub const NOT_AVAILABLE: &str = "N/A";

pub const DATASETS_HEADER: &str = "🤗 *Hugging Face Datasets*\n\n";
pub const DATASETS_UNEXPECTED: &str = "No datasets found or unexpected response format.";
pub const DATASETS_FOOTER: &str = "\n_Showing datasets from Hugging Face_";
pub const DATASETS_ERROR: &str =
    "❌ Error: Unable to fetch datasets from Hugging Face. Please try again later.";

pub const WATCH_MISSING_ID: &str = "❌ Please provide a dataset ID to watch";
pub const WATCH_ERROR: &str = "❌ Error: Unable to update watch list";

pub const WATCHLIST_EMPTY: &str =
    "📝 Your watch list is empty. Use `/watch <dataset_id>` to add datasets.";
pub const WATCHLIST_HEADER: &str = "📋 *Your Watched Datasets*\n\n";
pub const WATCHLIST_FOOTER: &str =
    "_To remove a dataset from your watch list, use_ `/unwatch <dataset_id>`";
pub const WATCHLIST_ERROR: &str = "❌ Error: Unable to fetch your watch list";

pub fn already_watching(id: &str) -> String {
    format!("📌 Dataset *{id}* is already in your watch list")
}

pub fn added(id: &str) -> String {
    format!("✅ Added *{id}* to your watch list")
}

pub fn unknown_command(name: &str) -> String {
    format!("❓ Unknown command: /{name}")
}

fn or_na(value: Option<&str>) -> &str {
    value.filter(|value| !value.is_empty()).unwrap_or(NOT_AVAILABLE)
}

fn downloads_or_na(value: Option<u64>) -> String {
    match value {
        Some(count) if count > 0 => count.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// One search result, `position` is 1-based.
pub fn search_entry(out: &mut String, position: usize, dataset: &Dataset) {
    out.push_str(&format!(
        "{position}. *{id}*\n   Description: {description}\n   Last modified: {modified}\n   To watch this dataset, use: `/watch {id}`\n\n",
        id = dataset.id,
        description = or_na(dataset.description.as_deref()),
        modified = or_na(dataset.last_modified.as_deref()),
    ));
}

pub fn detail_entry(out: &mut String, position: usize, dataset: &Dataset) {
    out.push_str(&format!(
        "{position}. *{id}*\n   Description: {description}\n   Last modified: {modified}\n   Downloads: {downloads}\n\n",
        id = dataset.id,
        description = or_na(dataset.description.as_deref()),
        modified = or_na(dataset.last_modified.as_deref()),
        downloads = downloads_or_na(dataset.downloads),
    ));
}

pub fn detail_unavailable(out: &mut String, position: usize, id: &str) {
    out.push_str(&format!("{position}. *{id}* (Unable to fetch details)\n\n"));
}

pub fn detail_error(out: &mut String, position: usize, id: &str) {
    out.push_str(&format!("{position}. *{id}* (Error fetching details)\n\n"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(id: &str) -> Dataset {
        Dataset {
            id: id.to_string(),
            description: None,
            last_modified: None,
            downloads: None,
        }
    }

    #[test]
    fn search_entry_uses_placeholders() {
        let mut out = String::new();
        search_entry(&mut out, 1, &dataset("org/ds"));
        assert_eq!(
            out,
            "1. *org/ds*\n   Description: N/A\n   Last modified: N/A\n   To watch this dataset, use: `/watch org/ds`\n\n"
        );
    }

    #[test]
    fn detail_entry_treats_empty_and_zero_as_missing() {
        let mut out = String::new();
        let mut ds = dataset("x");
        ds.description = Some(String::new());
        ds.last_modified = Some("2024-05-01".to_string());
        ds.downloads = Some(0);
        detail_entry(&mut out, 3, &ds);
        assert_eq!(
            out,
            "3. *x*\n   Description: N/A\n   Last modified: 2024-05-01\n   Downloads: N/A\n\n"
        );
    }

    #[test]
    fn failure_lines() {
        let mut out = String::new();
        detail_unavailable(&mut out, 1, "a");
        detail_error(&mut out, 2, "b");
        assert_eq!(
            out,
            "1. *a* (Unable to fetch details)\n\n2. *b* (Error fetching details)\n\n"
        );
    }
}
