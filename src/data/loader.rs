//! Background loading of the feature file
//!
//! Loading is fire-and-forget: [`FeatureLoad::spawn`] starts the fetch and
//! parse off the input thread and the map drains the outcome whenever it next
//! polls. A click that lands before the data arrives simply hits nothing.

use crate::{
    core::geo::Crs,
    data::{feature::Feature, geojson::parse_features},
    runtime::spawn_detached,
    MapError, Result,
};
use async_trait::async_trait;
use crossbeam_channel::{Receiver, TryRecvError};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

/// Retrieves the raw text of a feature file
#[async_trait]
pub trait FeatureFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Reads feature files from disk, resolving relative URLs against a base directory
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    base_dir: PathBuf,
}

impl FileFetcher {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve(&self, url: &str) -> PathBuf {
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

#[async_trait]
impl FeatureFetcher for FileFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let path = self.resolve(url);
        log::debug!("reading feature file {}", path.display());
        #[cfg(feature = "tokio-runtime")]
        let text = tokio::fs::read_to_string(path).await?;
        // Only ever polled on the loader's own thread without tokio
        #[cfg(not(feature = "tokio-runtime"))]
        let text = std::fs::read_to_string(path)?;
        Ok(text)
    }
}

/// Downloads feature files over HTTP
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeatureFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("downloading feature file {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Picks HTTP for `http(s)://` URLs and the filesystem for everything else
#[derive(Debug, Clone, Default)]
pub struct UrlFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl UrlFetcher {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            http: HttpFetcher::default(),
            file: FileFetcher::new(base_dir),
        }
    }
}

#[async_trait]
impl FeatureFetcher for UrlFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let lower = url.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            self.http.fetch(url).await
        } else {
            self.file.fetch(url).await
        }
    }
}

/// Where the overlay's features come from
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRequest {
    pub url: String,
    pub data_crs: Crs,
    pub display_crs: Crs,
}

/// An in-flight feature load
pub struct FeatureLoad {
    rx: Receiver<Result<Vec<Feature>>>,
}

impl FeatureLoad {
    /// Starts fetching and parsing `request` in the background
    pub fn spawn(request: FeatureRequest, fetcher: Arc<dyn FeatureFetcher>) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(1);
        spawn_detached(async move {
            let outcome = match fetcher.fetch(&request.url).await {
                Ok(text) => parse_features(&text, request.data_crs, request.display_crs),
                Err(e) => Err(e),
            };
            // The map may have been dropped in the meantime; nobody is left to tell.
            let _ = tx.send(outcome);
        });
        Self { rx }
    }

    /// Takes the outcome if the load has settled
    pub fn try_take(&self) -> Option<Result<Vec<Feature>>> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(MapError::Load(
                "feature loader stopped without a result".to_string(),
            ))),
        }
    }

    /// Blocks up to `timeout` for the outcome
    pub fn wait(&self, timeout: Duration) -> Option<Result<Vec<Feature>>> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => None,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => Some(Err(MapError::Load(
                "feature loader stopped without a result".to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticFetcher(&'static str);

    #[async_trait]
    impl FeatureFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn request(url: &str) -> FeatureRequest {
        FeatureRequest {
            url: url.to_string(),
            data_crs: Crs::Epsg4686,
            display_crs: Crs::Epsg3857,
        }
    }

    #[test]
    fn test_load_settles_with_features() {
        let doc = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"id": "1"}, "geometry": {"type": "Point", "coordinates": [-73.9, 5.1]}}
        ]}"#;
        let load = FeatureLoad::spawn(request("inline"), Arc::new(StaticFetcher(doc)));
        let features = load.wait(Duration::from_secs(5)).unwrap().unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].label("id").as_deref(), Some("1"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let fetcher = Arc::new(FileFetcher::new(std::env::temp_dir()));
        let load = FeatureLoad::spawn(request("no-such-file-cadastre.geojson"), fetcher);
        let outcome = load.wait(Duration::from_secs(5)).unwrap();
        assert!(matches!(outcome, Err(MapError::Io(_))));
    }

    #[test]
    fn test_file_fetcher_resolves_relative_paths() {
        let fetcher = FileFetcher::new("/srv/www");
        assert_eq!(fetcher.resolve("data.geojson"), PathBuf::from("/srv/www/data.geojson"));
        assert_eq!(fetcher.resolve("file:///tmp/a.geojson"), PathBuf::from("/tmp/a.geojson"));
    }

    #[tokio::test]
    async fn test_url_fetcher_reads_local_files() {
        let dir = std::env::temp_dir();
        let name = format!("cadastre-map-{}.geojson", std::process::id());
        std::fs::write(dir.join(&name), "{}").unwrap();

        let text = UrlFetcher::new(&dir).fetch(&name).await.unwrap();
        assert_eq!(text, "{}");

        std::fs::remove_file(dir.join(&name)).unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_file_load_on_ambient_runtime() {
        let dir = std::env::temp_dir();
        let name = format!("cadastre-map-ambient-{}.geojson", std::process::id());
        std::fs::write(dir.join(&name), r#"{"type": "FeatureCollection", "features": []}"#).unwrap();

        let load = FeatureLoad::spawn(request(&name), Arc::new(FileFetcher::new(&dir)));
        let outcome = tokio::task::spawn_blocking(move || load.wait(Duration::from_secs(5)))
            .await
            .unwrap();
        assert_eq!(outcome.map(|r| r.map(|f| f.len()).ok()), Some(Some(0)));

        std::fs::remove_file(dir.join(&name)).unwrap();
    }
}
