use std::path::{Path, PathBuf};

/// Downloads result images and persists them under one directory.
///
/// Every failure mode is recovered locally as an empty filename; a bad
/// image never aborts extraction.
pub struct ImageStore {
    dir: PathBuf,
    http: reqwest::Client,
    saved: usize,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            http: reqwest::Client::new(),
            saved: 0,
        }
    }

    /// Fetch `url` and write its bytes into the image directory.
    ///
    /// Returns the saved path, or an empty string on a non-success
    /// response or any transport/filesystem failure. Fetching the same
    /// URL twice silently overwrites the earlier file.
    pub async fn save(&mut self, url: &str) -> String {
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                ::log::warn!("Image request failed for {}: {}", url, e);
                return String::new();
            }
        };

        if !response.status().is_success() {
            ::log::warn!("Image request for {} returned {}", url, response.status());
            return String::new();
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                ::log::warn!("Failed to read image body for {}: {}", url, e);
                return String::new();
            }
        };

        match persist(&self.dir, url, &bytes) {
            Ok(path) => {
                ::log::debug!("Saved image {} to {}", url, path);
                self.saved += 1;
                path
            }
            Err(e) => {
                ::log::warn!("Failed to save image {}: {}", url, e);
                String::new()
            }
        }
    }

    /// How many images this store has written
    pub fn saved(&self) -> usize {
        self.saved
    }
}

/// Deterministic path for an image URL: the URL's final path segment
/// (query and fragment stripped) with a `.png` suffix appended. The
/// suffix is cosmetic; bytes are written as fetched.
pub fn image_path(dir: &Path, url: &str) -> PathBuf {
    let basename = url.rsplit('/').next().unwrap_or(url);
    let basename = basename.split(['?', '#']).next().unwrap_or(basename);
    dir.join(format!("{}.png", basename))
}

/// Write image bytes to their derived path, creating the directory if
/// absent and silently overwriting any earlier file.
pub fn persist(dir: &Path, url: &str, bytes: &[u8]) -> std::io::Result<String> {
    std::fs::create_dir_all(dir)?;
    let path = image_path(dir, url);
    std::fs::write(&path, bytes)?;
    Ok(path.to_string_lossy().into_owned())
}
