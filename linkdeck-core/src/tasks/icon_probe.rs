//! src/tasks/icon_probe.rs
//! Checks each distinct icon source once after a load. `http(s)` sources must
//! answer a GET with a success status; anything else is treated as a local
//! path that must exist. Failures are cosmetic and only logged at debug.

use futures::{StreamExt, stream};
use reqwest::Client;
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};
use tracing::debug;

use crate::controller::event_loop::TaskResult;

const MAX_IN_FLIGHT: usize = 8;

pub async fn probe_icon(src: &str, client: &Client) -> bool {
    let lower = src.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        match client.get(src).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                debug!(src, status = response.status().as_u16(), "Icon unavailable");
                false
            }
            Err(e) => {
                debug!(src, error = %e, "Icon request failed");
                false
            }
        }
    } else {
        let found = tokio::fs::try_exists(src).await.unwrap_or(false);
        if !found {
            debug!(src, "Icon file missing");
        }
        found
    }
}

/// Probes `sources` with bounded concurrency, one `TaskResult::IconProbed`
/// per source. `load_id` ties results to the load that produced them.
pub fn spawn_icon_probe(
    load_id: u64,
    sources: Vec<String>,
    client: Client,
    task_tx: UnboundedSender<TaskResult>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let client = &client;
        let mut results = stream::iter(sources)
            .map(|src| async move {
                let available = probe_icon(&src, client).await;
                (src, available)
            })
            .buffer_unordered(MAX_IN_FLIGHT);

        while let Some((src, available)) = results.next().await {
            if task_tx
                .send(TaskResult::IconProbed {
                    load_id,
                    src,
                    available,
                })
                .is_err()
            {
                debug!(load_id, "Task channel closed, stopping icon probe");
                break;
            }
        }
    })
}
