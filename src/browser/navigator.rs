use crate::browser::session;
use crate::error::Error;
use fantoccini::Client;
use std::time::Duration;

/// Opens the site, retrying with a doubling backoff and a forced reload
/// between attempts. Exhausting the retries is fatal to the run.
pub async fn open(
    client: &Client,
    url: &str,
    retries: u32,
    backoff_base: Duration,
    settle_timeout: Duration,
) -> Result<(), Error> {
    ::log::info!("Opening website: {}", url);

    let attempts = retries.max(1);
    let mut backoff = backoff_base;

    for attempt in 1..=attempts {
        match client.goto(url).await {
            Ok(()) => {
                if !session::settle(client, settle_timeout).await {
                    ::log::warn!("Page still loading after {:?}, proceeding", settle_timeout);
                }
                ::log::info!("Opened {} on attempt {}", url, attempt);
                return Ok(());
            }
            Err(e) if attempt == attempts => {
                ::log::error!("Failed to open {} after {} attempts", url, attempts);
                return Err(Error::Navigation {
                    url: url.to_string(),
                    attempts,
                    source: e,
                });
            }
            Err(e) => {
                ::log::warn!("Attempt {} failed: {}", attempt, e);
                ::log::warn!("Retrying in {:?}...", backoff);
                tokio::time::sleep(backoff).await;
                backoff *= 2;

                if let Err(e) = client.refresh().await {
                    ::log::warn!("Reload before retry failed: {}", e);
                }
                session::settle(client, settle_timeout).await;
            }
        }
    }

    Ok(())
}
