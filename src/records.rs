use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Column order of the CSV output
const HEADERS: [&str; 6] = [
    "title",
    "description",
    "date",
    "picture_filename",
    "search_phrase_count",
    "contains_money",
];

/// One extracted search result.
///
/// Created once per result node and never mutated afterwards; the output
/// sequence preserves page order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Article headline
    pub title: String,

    /// Body paragraphs joined with single spaces (possibly empty)
    pub description: String,

    /// Raw date label from the result node, not parsed (possibly empty)
    pub date: String,

    /// Path the article image was saved to, or empty if there was no
    /// image or the download failed
    pub picture_filename: String,

    /// Occurrences of the search phrase in title plus description
    pub search_phrase_count: usize,

    /// Whether title or description mentions an amount of money
    pub contains_money: bool,
}

/// Default output location for a run: `<dir>/news_articles_<phrase>.csv`
pub fn default_csv_path(output_dir: &Path, phrase: &str) -> PathBuf {
    output_dir.join(format!("news_articles_{}.csv", phrase))
}

/// Writes records to a CSV file at `path`, overwriting any existing file.
///
/// Parent directories are created as needed. The header row is always
/// written, even for an empty record set.
pub fn write_records(records: &[ArticleRecord], path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(HEADERS)?;
    for record in records {
        let count = record.search_phrase_count.to_string();
        let money = record.contains_money.to_string();
        writer.write_record([
            record.title.as_str(),
            record.description.as_str(),
            record.date.as_str(),
            record.picture_filename.as_str(),
            count.as_str(),
            money.as_str(),
        ])?;
    }
    writer.flush()?;

    ::log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
