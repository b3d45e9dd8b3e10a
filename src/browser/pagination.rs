use crate::browser::session;
use fantoccini::error::CmdError;
use fantoccini::{Client, Locator};
use std::time::Duration;

/// The site's "show more" control
pub const SHOW_MORE: &str = "[data-testid='search-show-more-button']";

/// A clickable control that expands the result list.
///
/// [`drain`] is generic over this so the loop can be driven by a
/// scripted control in tests instead of a live page.
#[allow(async_fn_in_trait)]
pub trait ExpandControl {
    /// Whether the control currently exists and is displayed
    async fn is_visible(&mut self) -> Result<bool, CmdError>;

    /// Trigger one expansion. Returns whether a click actually landed;
    /// the control can vanish between the visibility check and the click.
    async fn expand(&mut self) -> Result<bool, CmdError>;

    /// Wait for the page to settle after an expansion. Returns false on
    /// timeout, which the loop tolerates: the control is re-checked and
    /// treated as still expandable if it is back.
    async fn settle(&mut self, timeout: Duration) -> bool;
}

/// Repeatedly triggers the expand control until it disappears, an
/// interaction fails, or the safety cap is reached. Best-effort
/// draining, not a bounded algorithm: termination relies on the site
/// eventually withdrawing the control, with `max_expansions` as the
/// backstop for a page that never does.
///
/// Returns whether any expansion occurred.
pub async fn drain<C: ExpandControl>(
    control: &mut C,
    settle_timeout: Duration,
    max_expansions: usize,
) -> bool {
    let mut expansions = 0;

    loop {
        if expansions >= max_expansions {
            ::log::warn!(
                "Stopping expansion after {} clicks with the control still present",
                expansions
            );
            break;
        }

        match control.is_visible().await {
            Ok(true) => {}
            Ok(false) => {
                ::log::info!("Expand control gone after {} clicks", expansions);
                break;
            }
            Err(e) => {
                ::log::warn!("Lost the expand control: {}", e);
                break;
            }
        }

        match control.expand().await {
            Ok(true) => {}
            Ok(false) => {
                ::log::info!("Expand control vanished before it could be clicked");
                break;
            }
            Err(e) => {
                ::log::warn!("Expansion click failed: {}", e);
                break;
            }
        }
        expansions += 1;

        if !control.settle(settle_timeout).await {
            ::log::debug!(
                "Page still busy after expansion {}, checking the control again",
                expansions
            );
        }
    }

    expansions > 0
}

/// Fantoccini-backed control for a selector on the live page
pub struct PageExpandControl<'a> {
    client: &'a Client,
    selector: &'a str,
}

impl<'a> PageExpandControl<'a> {
    pub fn new(client: &'a Client, selector: &'a str) -> Self {
        Self { client, selector }
    }
}

impl ExpandControl for PageExpandControl<'_> {
    async fn is_visible(&mut self) -> Result<bool, CmdError> {
        session::is_visible(self.client, Locator::Css(self.selector)).await
    }

    async fn expand(&mut self) -> Result<bool, CmdError> {
        if let Some(element) = self
            .client
            .find_all(Locator::Css(self.selector))
            .await?
            .into_iter()
            .next()
        {
            ::log::info!("Clicking '{}'", self.selector);
            element.click().await?;
            return Ok(true);
        }
        Ok(false)
    }

    async fn settle(&mut self, timeout: Duration) -> bool {
        session::settle(self.client, timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTLE: Duration = Duration::from_millis(10);

    /// Control scripted to disappear after a fixed number of clicks,
    /// injecting a batch of results per expansion.
    #[derive(Default)]
    struct ScriptedControl {
        clicks_until_gone: usize,
        clicks: usize,
        batches: Vec<usize>,
        settle_times_out: bool,
        visibility_errors: bool,
        vanishes_before_click: bool,
    }

    impl ScriptedControl {
        fn visible_for(clicks: usize) -> Self {
            Self {
                clicks_until_gone: clicks,
                ..Self::default()
            }
        }
    }

    impl ExpandControl for ScriptedControl {
        async fn is_visible(&mut self) -> Result<bool, CmdError> {
            if self.visibility_errors {
                return Err(CmdError::WaitTimeout);
            }
            Ok(self.clicks < self.clicks_until_gone)
        }

        async fn expand(&mut self) -> Result<bool, CmdError> {
            if self.vanishes_before_click {
                return Ok(false);
            }
            self.clicks += 1;
            self.batches.push(10);
            Ok(true)
        }

        async fn settle(&mut self, _timeout: Duration) -> bool {
            !self.settle_times_out
        }
    }

    #[tokio::test]
    async fn test_drains_until_control_disappears() {
        let mut control = ScriptedControl::visible_for(3);
        let expanded = drain(&mut control, SETTLE, 500).await;

        assert!(expanded);
        assert_eq!(control.clicks, 3);
        assert_eq!(control.batches.len(), 3);
    }

    #[tokio::test]
    async fn test_never_visible_control_is_not_expanded() {
        let mut control = ScriptedControl::visible_for(0);
        let expanded = drain(&mut control, SETTLE, 500).await;

        assert!(!expanded);
        assert_eq!(control.clicks, 0);
    }

    #[tokio::test]
    async fn test_settle_timeout_does_not_end_the_loop() {
        let mut control = ScriptedControl {
            settle_times_out: true,
            ..ScriptedControl::visible_for(2)
        };
        let expanded = drain(&mut control, SETTLE, 500).await;

        assert!(expanded);
        assert_eq!(control.clicks, 2);
    }

    #[tokio::test]
    async fn test_cap_stops_a_control_that_never_disappears() {
        let mut control = ScriptedControl::visible_for(usize::MAX);
        let expanded = drain(&mut control, SETTLE, 5).await;

        assert!(expanded);
        assert_eq!(control.clicks, 5);
    }

    #[tokio::test]
    async fn test_control_vanishing_before_the_click_counts_no_expansion() {
        let mut control = ScriptedControl {
            vanishes_before_click: true,
            ..ScriptedControl::visible_for(3)
        };
        let expanded = drain(&mut control, SETTLE, 500).await;

        assert!(!expanded);
        assert_eq!(control.clicks, 0);
    }

    #[tokio::test]
    async fn test_visibility_error_is_treated_as_exhausted() {
        let mut control = ScriptedControl {
            visibility_errors: true,
            ..ScriptedControl::visible_for(4)
        };
        let expanded = drain(&mut control, SETTLE, 500).await;

        assert!(!expanded);
        assert_eq!(control.clicks, 0);
    }
}
