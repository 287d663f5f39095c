//! src/tasks/load_task.rs
//!
//! # Link list loader
//!
//! Fetches the link list from a local file or an `http(s)` URL and parses it
//! into a [`Dataset`]. Runs as a background task and reports through the
//! task-result channel; there is no timeout beyond the transport's own and no
//! retry.

use std::{fmt, path::PathBuf, time::Instant};

use reqwest::Client;
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};
use tracing::{debug, info, instrument};
use url::Url;

use crate::{
    controller::event_loop::TaskResult,
    error::{AppError, AppResult},
    model::dataset::Dataset,
};

/// Where the link list lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSource {
    /// Path, relative to the working directory unless absolute.
    File(PathBuf),
    Remote(Url),
}

impl LinkSource {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AppError::invalid_input("source", "link list location is empty"));
        }

        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(raw).map_err(|e| AppError::invalid_url(raw, e.to_string()))?;
            Ok(Self::Remote(url))
        } else {
            Ok(Self::File(PathBuf::from(raw)))
        }
    }
}

impl fmt::Display for LinkSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// Reads the raw bytes of the link list. Non-success HTTP statuses are errors.
pub async fn fetch_links(source: &LinkSource, client: &Client) -> AppResult<Vec<u8>> {
    match source {
        LinkSource::File(path) => tokio::fs::read(path)
            .await
            .map_err(|e| AppError::source_io(path, e)),
        LinkSource::Remote(url) => {
            let response = client.get(url.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(AppError::http_status(url.as_str(), status.as_u16()));
            }
            Ok(response.bytes().await?.to_vec())
        }
    }
}

/// Fetches and parses the link list. A malformed body is an error like any
/// transport failure.
#[instrument(level = "debug", skip(client), fields(source = %source))]
pub async fn load_dataset(source: &LinkSource, client: &Client) -> AppResult<Dataset> {
    let bytes = fetch_links(source, client).await?;
    debug!(bytes = bytes.len(), "Link list fetched");
    Ok(Dataset::from_json(&bytes)?)
}

/// Spawns the load and posts `TaskResult::LinksLoaded` when it settles.
pub fn spawn_link_load(
    task_id: u64,
    source: LinkSource,
    client: Client,
    task_tx: UnboundedSender<TaskResult>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let start = Instant::now();
        let result = load_dataset(&source, &client).await;

        info!(
            task_id,
            source = %source,
            ok = result.is_ok(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Link list load settled"
        );

        if task_tx
            .send(TaskResult::LinksLoaded { task_id, result })
            .is_err()
        {
            debug!(task_id, "Task channel closed before load finished");
        }
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    #[test]
    fn parses_sources() {
        assert_eq!(
            LinkSource::parse("config.json").unwrap(),
            LinkSource::File(PathBuf::from("config.json"))
        );
        assert!(matches!(
            LinkSource::parse("https://example.org/links.json").unwrap(),
            LinkSource::Remote(_)
        ));
        assert!(matches!(
            LinkSource::parse("  "),
            Err(AppError::InvalidInput { .. })
        ));
        assert!(matches!(
            LinkSource::parse("http://"),
            Err(AppError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn loads_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"[{"name":"Foo","url":"https://a"}]"#).unwrap();

        let dataset = load_dataset(&LinkSource::File(path), &client())
            .await
            .unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_source_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(
            &LinkSource::File(dir.path().join("absent.json")),
            &client(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::SourceIo { .. }));
    }

    #[tokio::test]
    async fn http_404_is_status_error() {
        let base = test_server::serve("404 Not Found", "").await;
        let source = LinkSource::parse(&format!("{base}/config.json")).unwrap();

        let err = load_dataset(&source, &client()).await.unwrap_err();
        assert!(matches!(err, AppError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn http_200_with_bad_json_is_parse_error() {
        let base = test_server::serve("200 OK", "<html>oops</html>").await;
        let source = LinkSource::parse(&format!("{base}/config.json")).unwrap();

        let err = load_dataset(&source, &client()).await.unwrap_err();
        assert!(matches!(err, AppError::Serde(_)));
    }

    #[tokio::test]
    async fn spawned_load_reports_through_channel() {
        let base =
            test_server::serve("200 OK", r#"[{"name":"Foo","url":"https://a"},{"name":"Bar","url":"https://b"}]"#)
                .await;
        let source = LinkSource::parse(&format!("{base}/config.json")).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_link_load(7, source, client(), tx).await.unwrap();

        match rx.recv().await.unwrap() {
            TaskResult::LinksLoaded { task_id, result } => {
                assert_eq!(task_id, 7);
                assert_eq!(result.unwrap().len(), 2);
            }
            other => panic!("unexpected task result: {other:?}"),
        }
    }
}
