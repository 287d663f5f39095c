//! src/controller/event_loop.rs
//! ============================================================================
//! # Event loop: background task results and internal actions
//!
//! Terminal input is read by the application's run loop; this type merges the
//! two internal channels (task results and directly queued actions) into a
//! single `Action` stream and keeps light throughput metrics.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use crate::{controller::actions::Action, error::AppError, model::dataset::Dataset};

/// Messages posted by spawned background tasks.
#[derive(Debug)]
pub enum TaskResult {
    /// A link-list load settled.
    LinksLoaded {
        task_id: u64,
        result: Result<Dataset, AppError>,
    },

    /// One icon source was probed on behalf of load `load_id`.
    IconProbed {
        load_id: u64,
        src: String,
        available: bool,
    },
}

impl TaskResult {
    /// Id of the load this result belongs to.
    pub fn load_id(&self) -> u64 {
        match self {
            Self::LinksLoaded { task_id, .. } => *task_id,
            Self::IconProbed { load_id, .. } => *load_id,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnap {
    pub tasks: u64,
    pub actions: u64,
    pub avg: Duration,
    pub queued: usize,
}

pub struct EventLoop {
    task_rx: mpsc::UnboundedReceiver<TaskResult>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    tasks: u64,
    actions: u64,
    total_wait: Duration,
    last_report: Instant,
}

impl EventLoop {
    pub fn new(
        task_rx: mpsc::UnboundedReceiver<TaskResult>,
        action_rx: mpsc::UnboundedReceiver<Action>,
    ) -> Self {
        info!("Initializing event loop");
        Self {
            task_rx,
            action_rx,
            tasks: 0,
            actions: 0,
            total_wait: Duration::ZERO,
            last_report: Instant::now(),
        }
    }

    /// Waits for the next task result or queued action. `None` once every
    /// sender on both channels is gone.
    pub async fn next_action(&mut self) -> Option<Action> {
        let start = Instant::now();

        let action = tokio::select! {
            Some(task_result) = self.task_rx.recv() => {
                debug!(load_id = task_result.load_id(), "Task result received");
                self.tasks += 1;
                Some(Action::TaskResult(task_result))
            }

            Some(action) = self.action_rx.recv() => {
                trace!("Direct action received: {:?}", action);
                self.actions += 1;
                Some(action)
            }

            else => {
                info!("Event loop terminated - no more events");
                None
            }
        };

        self.total_wait += start.elapsed();
        self.report_periodically();
        action
    }

    fn report_periodically(&mut self) {
        if self.last_report.elapsed().as_secs() >= 30 {
            let snap = self.snapshot_metrics();
            info!(
                tasks = snap.tasks,
                actions = snap.actions,
                queued = snap.queued,
                "Event loop throughput"
            );
            self.last_report = Instant::now();
        }
    }

    pub fn snapshot_metrics(&self) -> MetricsSnap {
        let handled = self.tasks + self.actions;
        let avg = if handled == 0 {
            Duration::ZERO
        } else {
            self.total_wait / u32::try_from(handled).unwrap_or(u32::MAX)
        };

        MetricsSnap {
            tasks: self.tasks,
            actions: self.actions,
            avg,
            queued: self.task_rx.len() + self.action_rx.len(),
        }
    }
}
