use crate::browser::session;
use crate::error::Error;
use crate::query::{SearchQuery, Section};
use fantoccini::key::Key;
use fantoccini::{Client, Locator};
use std::time::Duration;

const CONSENT_BUTTON: &str = "//button[contains(normalize-space(.), 'Accept all')]";
const SEARCH_TOGGLE: &str = "[aria-controls='search-input']";
const SEARCH_INPUT: &str = "[aria-label='Search the new york times']";
const GO_BUTTON: &str = "//button[normalize-space(.)='Go']";
const SECTION_BUTTON: &str = "[data-testid='search-multiselect-button']";
const SECTION_DROPDOWN: &str = "[data-testid='multi-select-dropdown-list']";

/// Drives the search box into the query state: dismiss the consent
/// banner if it is showing, activate the search control, type the
/// phrase, submit.
///
/// Only the search input itself is required; everything else is
/// best-effort since layouts vary between sessions. There is no retry at
/// this layer, navigation-level retry already covers load instability.
pub async fn initiate(
    client: &Client,
    query: &SearchQuery,
    wait_timeout: Duration,
) -> Result<(), Error> {
    if session::click_if_visible(client, Locator::XPath(CONSENT_BUTTON)).await? {
        ::log::debug!("Dismissed consent banner");
    }

    // Absent on layouts where the input is already exposed
    if session::click_if_visible(client, Locator::Css(SEARCH_TOGGLE)).await? {
        ::log::debug!("Opened the search input");
    }

    let input = client
        .wait()
        .at_most(wait_timeout)
        .for_element(Locator::Css(SEARCH_INPUT))
        .await
        .map_err(|e| Error::Interaction {
            what: "search input".to_string(),
            source: e,
        })?;
    input.send_keys(&query.phrase).await?;

    // Some layouts render an explicit Go button, otherwise Enter submits
    if !session::click_if_visible(client, Locator::XPath(GO_BUTTON)).await? {
        input
            .send_keys(&String::from(char::from(Key::Enter)))
            .await?;
    }

    ::log::info!("Submitted search for '{}'", query.phrase);
    Ok(())
}

/// Narrows results to a section via the multiselect filter. `Any`
/// applies no filter. A known section whose checkbox never appears is an
/// interaction error.
pub async fn select_section(
    client: &Client,
    section: Section,
    wait_timeout: Duration,
) -> Result<(), Error> {
    if section == Section::Any {
        ::log::debug!("No section filter requested");
        return Ok(());
    }

    let button = client
        .wait()
        .at_most(wait_timeout)
        .for_element(Locator::Css(SECTION_BUTTON))
        .await
        .map_err(|e| Error::Interaction {
            what: "section filter button".to_string(),
            source: e,
        })?;
    button.click().await?;

    client
        .wait()
        .at_most(wait_timeout)
        .for_element(Locator::Css(SECTION_DROPDOWN))
        .await
        .map_err(|e| Error::Interaction {
            what: "section dropdown list".to_string(),
            source: e,
        })?;

    let checkbox_xpath = format!(
        "//input[@data-testid='DropdownLabelCheckbox'][contains(@value, '{}')]",
        section.label()
    );
    let checkbox = client
        .wait()
        .at_most(wait_timeout)
        .for_element(Locator::XPath(&checkbox_xpath))
        .await
        .map_err(|e| Error::Interaction {
            what: format!("section checkbox for '{}'", section.label()),
            source: e,
        })?;
    checkbox.click().await?;

    ::log::info!("Filtering results to section '{}'", section.label());
    Ok(())
}
