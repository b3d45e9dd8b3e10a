use fantoccini::error::{CmdError, NewSessionError};
use thiserror::Error;

/// Errors that end a pipeline run.
///
/// Image download failures are deliberately absent: they are recovered
/// where they happen and surface only as an empty `picture_filename`.
#[derive(Debug, Error)]
pub enum Error {
    /// The site never loaded, even after the configured retries
    #[error("failed to open {url} after {attempts} attempts: {source}")]
    Navigation {
        url: String,
        attempts: u32,
        #[source]
        source: CmdError,
    },

    /// A required page control was never found or could not be acted on
    /// within its wait budget
    #[error("could not interact with {what}: {source}")]
    Interaction {
        what: String,
        #[source]
        source: CmdError,
    },

    /// No WebDriver server could be reached
    #[error("failed to start a WebDriver session: {0}")]
    Session(#[from] NewSessionError),

    /// Any other WebDriver command failure
    #[error(transparent)]
    WebDriver(#[from] CmdError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
