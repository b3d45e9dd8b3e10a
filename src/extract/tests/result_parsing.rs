use crate::extract::parse_results;

const RESULTS_PAGE: &str = r#"
<html><body>
<p>Navigation chrome that is not a result.</p>
<ol data-testid="search-results">
  <li>
    <span data-testid="todays-date" aria-label="June 12, 2024">June 12</span>
    <h4>Markets rally as inflation cools</h4>
    <p>Stocks climbed on Tuesday.</p>
    <p>Analysts expect   further
       gains.</p>
    <img src="/images/2024/rally.jpg">
  </li>
  <li>
    <h4>Headline with no body</h4>
  </li>
  <li>
    <p>Body with no headline.</p>
  </li>
  <li>
    <h4>Minimal result</h4>
    <p>Just one paragraph.</p>
  </li>
</ol>
</body></html>"#;

#[test]
fn test_walks_results_in_page_order() {
    let results = parse_results(RESULTS_PAGE);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Markets rally as inflation cools");
    assert_eq!(results[1].title, "Minimal result");
}

#[test]
fn test_skips_nodes_missing_heading_or_paragraphs() {
    let results = parse_results(RESULTS_PAGE);
    assert!(results.iter().all(|r| r.title != "Headline with no body"));
    assert!(results.iter().all(|r| !r.description.contains("no headline")));
}

#[test]
fn test_joins_paragraphs_with_single_spaces() {
    let results = parse_results(RESULTS_PAGE);
    assert_eq!(
        results[0].description,
        "Stocks climbed on Tuesday. Analysts expect further gains."
    );
}

#[test]
fn test_date_label_comes_from_aria_label() {
    let results = parse_results(RESULTS_PAGE);
    assert_eq!(results[0].date_label, "June 12, 2024");
}

#[test]
fn test_date_label_falls_back_to_node_text() {
    let html = r#"
    <ol data-testid="search-results">
      <li>
        <span data-testid="todays-date">June 13</span>
        <h4>Title</h4>
        <p>Body.</p>
      </li>
    </ol>"#;
    let results = parse_results(html);
    assert_eq!(results[0].date_label, "June 13");
}

#[test]
fn test_missing_date_and_image_yield_empty_fields() {
    let results = parse_results(RESULTS_PAGE);
    assert_eq!(results[1].date_label, "");
    assert_eq!(results[1].image_url, None);
}

#[test]
fn test_image_src_is_captured() {
    let results = parse_results(RESULTS_PAGE);
    assert_eq!(results[0].image_url.as_deref(), Some("/images/2024/rally.jpg"));
}

#[test]
fn test_content_outside_the_result_list_is_ignored() {
    let html = r#"
    <ol>
      <li><h4>Unrelated list</h4><p>Should not appear.</p></li>
    </ol>
    <ol data-testid="search-results"></ol>"#;
    assert!(parse_results(html).is_empty());
}

#[test]
fn test_empty_page_yields_no_results() {
    assert!(parse_results("").is_empty());
    assert!(parse_results("<html><body></body></html>").is_empty());
}
