use crate::error::Error;
use fantoccini::key::Key;
use fantoccini::{Client, Locator};
use std::time::Duration;

const DATE_MENU: &str = ".css-p5555t";
const SPECIFIC_DATES: &str = "//button[contains(normalize-space(.), 'Specific Dates')]";
const START_INPUT: &str = "#startDate";
const END_INPUT: &str = "#endDate";

/// Fills the custom date-range widgets with preformatted MM/DD/YYYY
/// bounds and commits with Enter on the end field. Whether the range is
/// sensible (start before end) is the caller's concern.
pub async fn apply_range(
    client: &Client,
    start: &str,
    end: &str,
    wait_timeout: Duration,
) -> Result<(), Error> {
    let menu = client
        .wait()
        .at_most(wait_timeout)
        .for_element(Locator::Css(DATE_MENU))
        .await
        .map_err(|e| Error::Interaction {
            what: "date filter menu".to_string(),
            source: e,
        })?;
    menu.click().await?;

    let specific = client
        .wait()
        .at_most(wait_timeout)
        .for_element(Locator::XPath(SPECIFIC_DATES))
        .await
        .map_err(|e| Error::Interaction {
            what: "'Specific Dates' option".to_string(),
            source: e,
        })?;
    specific.click().await?;

    let mut start_input = client
        .wait()
        .at_most(wait_timeout)
        .for_element(Locator::Css(START_INPUT))
        .await
        .map_err(|e| Error::Interaction {
            what: "start date input".to_string(),
            source: e,
        })?;
    start_input.clear().await?;
    start_input.send_keys(start).await?;

    let mut end_input = client
        .wait()
        .at_most(wait_timeout)
        .for_element(Locator::Css(END_INPUT))
        .await
        .map_err(|e| Error::Interaction {
            what: "end date input".to_string(),
            source: e,
        })?;
    end_input.clear().await?;
    end_input.send_keys(end).await?;
    end_input
        .send_keys(&String::from(char::from(Key::Enter)))
        .await?;

    ::log::info!("Applied date range {} - {}", start, end);
    Ok(())
}
