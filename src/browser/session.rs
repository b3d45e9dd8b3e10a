use crate::error::Error;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use std::time::Duration;

/// WebDriver URLs tried after the configured one fails
const FALLBACK_URLS: [&str; 3] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Connects to a WebDriver server, falling back to common local ports
/// before giving up.
pub async fn connect(webdriver_url: &str) -> Result<Client, Error> {
    let mut last = match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::warn!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            e
        }
    };

    for url in FALLBACK_URLS {
        if url == webdriver_url {
            continue;
        }
        ::log::info!("Trying fallback WebDriver URL: {}", url);
        match ClientBuilder::native().connect(url).await {
            Ok(client) => {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(client);
            }
            Err(e) => last = e,
        }
    }

    ::log::error!("Failed to connect to any WebDriver server");
    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(Error::Session(last))
}

/// Whether an element matching `locator` exists and is displayed.
/// An absent element is simply not visible, not an error.
pub async fn is_visible(client: &Client, locator: Locator<'_>) -> Result<bool, CmdError> {
    match client.find_all(locator).await?.into_iter().next() {
        Some(element) => element.is_displayed().await,
        None => Ok(false),
    }
}

/// Clicks the first element matching `locator` if it exists and is
/// displayed. Returns whether a click happened.
pub async fn click_if_visible(client: &Client, locator: Locator<'_>) -> Result<bool, CmdError> {
    if let Some(element) = client.find_all(locator).await?.into_iter().next() {
        if element.is_displayed().await? {
            element.click().await?;
            return Ok(true);
        }
    }
    Ok(false)
}

const SETTLE_POLL: Duration = Duration::from_millis(250);

/// Polls `document.readyState` until the page reports complete, up to
/// `timeout`. Returns false if the deadline passed first; callers treat
/// that as "still loading", not as a failure.
pub async fn settle(client: &Client, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        let ready = match client.execute("return document.readyState", vec![]).await {
            Ok(state) => state.as_str() == Some("complete"),
            Err(e) => {
                ::log::debug!("readyState poll failed: {}", e);
                false
            }
        };
        if ready {
            return true;
        }
        let now = tokio::time::Instant::now();
        if now >= deadline {
            return false;
        }
        tokio::time::sleep(next_poll_delay(now, deadline)).await;
    }
}

/// Next sleep before re-polling, clamped so the deadline is never
/// overshot by a full poll interval
fn next_poll_delay(now: tokio::time::Instant, deadline: tokio::time::Instant) -> Duration {
    (deadline - now).min(SETTLE_POLL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_delay_is_clamped_to_time_remaining() {
        let now = tokio::time::Instant::now();

        let delay = next_poll_delay(now, now + Duration::from_millis(100));
        assert_eq!(delay, Duration::from_millis(100));

        let delay = next_poll_delay(now, now + Duration::from_secs(5));
        assert_eq!(delay, SETTLE_POLL);
    }
}
