#[cfg(test)]
mod tests;

use crate::error::Error;
use crate::images::ImageStore;
use crate::metrics;
use crate::query::SearchQuery;
use crate::records::ArticleRecord;
use fantoccini::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const RESULT_NODES: &str = "ol[data-testid='search-results'] > li";
const DATE_LABEL: &str = "[data-testid='todays-date']";

/// Fields pulled straight off one result node, before metrics are
/// computed or the image is fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResult {
    pub title: String,
    pub description: String,
    pub date_label: String,
    pub image_url: Option<String>,
}

/// Walks every result node in the drained list, in page order.
///
/// The first `h4` is the title; all `p` texts joined with single spaces
/// form the description. A node missing the heading or all body
/// paragraphs is dropped entirely, not emitted as a placeholder. The
/// date label comes from the dated node's `aria-label` (falling back to
/// its text) and the image URL from the first `img` src; both are
/// optional.
pub fn parse_results(html: &str) -> Vec<RawResult> {
    let doc = Html::parse_document(html);
    let node_sel = Selector::parse(RESULT_NODES).unwrap();
    let title_sel = Selector::parse("h4").unwrap();
    let para_sel = Selector::parse("p").unwrap();
    let img_sel = Selector::parse("img").unwrap();
    let date_sel = Selector::parse(DATE_LABEL).unwrap();

    let mut results = Vec::new();
    for node in doc.select(&node_sel) {
        let Some(title) = node.select(&title_sel).next().map(element_text) else {
            ::log::debug!("Skipping result with no heading");
            continue;
        };
        let paragraphs: Vec<String> = node.select(&para_sel).map(element_text).collect();
        if paragraphs.is_empty() {
            ::log::debug!("Skipping result with no body paragraphs");
            continue;
        }
        let description = paragraphs.join(" ");

        let date_label = node
            .select(&date_sel)
            .next()
            .map(|el| match el.value().attr("aria-label") {
                Some(label) => label.to_string(),
                None => element_text(el),
            })
            .unwrap_or_default();

        let image_url = node
            .select(&img_sel)
            .next()
            .and_then(|el| el.value().attr("src"))
            .map(str::to_string);

        results.push(RawResult {
            title,
            description,
            date_label,
            image_url,
        });
    }

    ::log::debug!("Parsed {} result nodes", results.len());
    results
}

/// Extracts every loaded result into finished records, downloading
/// images sequentially along the way.
pub async fn extract_all(
    client: &Client,
    query: &SearchQuery,
    images: &mut ImageStore,
) -> Result<Vec<ArticleRecord>, Error> {
    let html = client.source().await?;
    let raw = parse_results(&html);
    ::log::info!("Extracting {} search results", raw.len());

    let mut records = Vec::with_capacity(raw.len());
    for item in raw {
        let picture_filename = match &item.image_url {
            Some(src) => match resolve_image_url(&query.site_url, src) {
                Some(absolute) => images.save(&absolute).await,
                None => {
                    ::log::warn!("Unresolvable image src: {}", src);
                    String::new()
                }
            },
            None => String::new(),
        };

        records.push(build_record(item, &query.phrase, picture_filename));
    }

    Ok(records)
}

/// Finishes one parsed node into a record by computing its derived
/// metrics. The phrase is counted per field and summed, never across
/// the title/description boundary; money counts if either field
/// mentions it.
pub fn build_record(raw: RawResult, phrase: &str, picture_filename: String) -> ArticleRecord {
    let search_phrase_count =
        metrics::phrase_count(&raw.title, phrase) + metrics::phrase_count(&raw.description, phrase);
    let contains_money =
        metrics::mentions_money(&raw.title) || metrics::mentions_money(&raw.description);

    ArticleRecord {
        title: raw.title,
        description: raw.description,
        date: raw.date_label,
        picture_filename,
        search_phrase_count,
        contains_money,
    }
}

/// Resolves a possibly relative img src against the site URL.
fn resolve_image_url(base: &str, src: &str) -> Option<String> {
    if let Ok(absolute) = Url::parse(src) {
        return Some(String::from(absolute));
    }
    Url::parse(base)
        .and_then(|base| base.join(src))
        .ok()
        .map(String::from)
}

/// Text of an element with whitespace normalized to single spaces
fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
