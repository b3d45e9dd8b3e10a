use chrono::{Datelike, Local, Months, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Sections the site's search results can be narrowed to.
///
/// The labels match the checkboxes in the site's section multiselect;
/// `Any` applies no filter at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Section {
    Any,
    Arts,
    Books,
    Business,
    Movies,
    NewYork,
    Opinion,
    Politics,
    Science,
    Sports,
    Technology,
    Travel,
    Us,
    World,
}

impl Section {
    /// Label as it appears in the site's section filter
    pub fn label(&self) -> &'static str {
        match self {
            Section::Any => "Any",
            Section::Arts => "Arts",
            Section::Books => "Books",
            Section::Business => "Business",
            Section::Movies => "Movies",
            Section::NewYork => "New York",
            Section::Opinion => "Opinion",
            Section::Politics => "Politics",
            Section::Science => "Science",
            Section::Sports => "Sports",
            Section::Technology => "Technology",
            Section::Travel => "Travel",
            Section::Us => "U.S.",
            Section::World => "World",
        }
    }
}

/// Parameters for one search run. Immutable once constructed; the
/// pipeline owns it for the duration of the run.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Phrase to search articles for
    pub phrase: String,

    /// Section filter to apply
    pub section: Section,

    /// Start of the date range, preformatted as MM/DD/YYYY
    pub start_date: String,

    /// End of the date range, preformatted as MM/DD/YYYY
    pub end_date: String,

    /// URL of the site to search
    pub site_url: String,
}

impl SearchQuery {
    /// Build a query whose date range covers the last `months` months,
    /// ending today.
    pub fn new(phrase: &str, section: Section, months: u32, site_url: &str) -> Self {
        let (start_date, end_date) = date_range(months, Local::now().date_naive());
        Self {
            phrase: phrase.to_string(),
            section,
            start_date,
            end_date,
            site_url: site_url.to_string(),
        }
    }
}

/// Computes the search date range as (start, end) MM/DD/YYYY strings.
///
/// The end is `today`; the start is `months - 1` calendar months earlier
/// with the day of month preserved (clamped to the last valid day of the
/// target month), or the first day of the current month when `months` is
/// zero.
pub fn date_range(months: u32, today: NaiveDate) -> (String, String) {
    let start = if months > 0 {
        today
            .checked_sub_months(Months::new(months - 1))
            .unwrap_or(today)
    } else {
        today.with_day(1).unwrap_or(today)
    };

    (
        start.format("%m/%d/%Y").to_string(),
        today.format("%m/%d/%Y").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_preserves_day_of_month() {
        let (start, end) = date_range(3, day(2024, 6, 15));
        assert_eq!(start, "04/15/2024");
        assert_eq!(end, "06/15/2024");
    }

    #[test]
    fn test_one_month_range_starts_today() {
        let (start, end) = date_range(1, day(2024, 6, 15));
        assert_eq!(start, "06/15/2024");
        assert_eq!(end, "06/15/2024");
    }

    #[test]
    fn test_zero_months_means_current_month() {
        let (start, end) = date_range(0, day(2024, 6, 15));
        assert_eq!(start, "06/01/2024");
        assert_eq!(end, "06/15/2024");
    }

    #[test]
    fn test_range_clamps_to_last_valid_day() {
        // One month back from March 31 lands on February 29 in a leap year
        let (start, _) = date_range(2, day(2024, 3, 31));
        assert_eq!(start, "02/29/2024");

        let (start, _) = date_range(2, day(2023, 3, 31));
        assert_eq!(start, "02/28/2023");
    }

    #[test]
    fn test_range_crosses_year_boundary() {
        let (start, end) = date_range(4, day(2024, 2, 10));
        assert_eq!(start, "11/10/2023");
        assert_eq!(end, "02/10/2024");
    }

    #[test]
    fn test_section_labels() {
        assert_eq!(Section::Any.label(), "Any");
        assert_eq!(Section::NewYork.label(), "New York");
        assert_eq!(Section::Us.label(), "U.S.");
    }
}
