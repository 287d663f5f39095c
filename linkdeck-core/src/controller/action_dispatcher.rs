//! ActionDispatcher: applies actions to the application state.
//!
//! The dispatcher owns the side-effecting collaborators (the navigator, the
//! HTTP client and the task channel) and translates each `Action` into calls
//! on the [`DirectoryController`](crate::controller::directory::DirectoryController)
//! and [`UIState`](crate::model::ui_state::UIState). Background loads are
//! tagged with an id so results from a superseded load are dropped.

use reqwest::Client;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::{
    controller::{
        actions::Action,
        directory::Activation,
        event_loop::TaskResult,
        navigator::Navigator,
    },
    error::AppError,
    model::{
        app_state::AppState,
        directory_state::DirectoryState,
        search_input::SearchInput,
        ui_state::{RedrawFlag, UIMode, UIOverlay},
    },
    tasks::{
        icon_probe::spawn_icon_probe,
        load_task::{LinkSource, spawn_link_load},
    },
};

#[derive(Debug, Clone, Copy, Default)]
pub struct DispatcherStats {
    pub total_actions: u64,
    pub user_actions: u64,
    pub loads_started: u64,
    pub stale_results: u64,
}

pub struct ActionDispatcher<N: Navigator> {
    navigator: N,
    source: LinkSource,
    client: Client,
    task_tx: UnboundedSender<TaskResult>,
    next_task_id: u64,
    active_load: Option<u64>,
    stats: DispatcherStats,
}

impl<N: Navigator> ActionDispatcher<N> {
    pub fn new(
        navigator: N,
        source: LinkSource,
        client: Client,
        task_tx: UnboundedSender<TaskResult>,
    ) -> Self {
        Self {
            navigator,
            source,
            client,
            task_tx,
            next_task_id: 1,
            active_load: None,
            stats: DispatcherStats::default(),
        }
    }

    pub const fn get_stats(&self) -> DispatcherStats {
        self.stats
    }

    pub const fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Puts the directory back into `Loading` and spawns a fresh fetch.
    pub fn start_load(&mut self, app: &mut AppState) -> u64 {
        let task_id = self.next_task_id;
        self.next_task_id += 1;
        self.active_load = Some(task_id);
        self.stats.loads_started += 1;

        app.directory.begin_load();
        app.icons.clear();
        app.ui.set_mode(UIMode::Browse);
        if app.ui.overlay == UIOverlay::Confirm {
            app.ui.set_overlay(UIOverlay::None);
        }
        app.ui.request_redraw(RedrawFlag::All);

        info!(task_id, source = %self.source, "Loading link list");
        let _handle = spawn_link_load(
            task_id,
            self.source.clone(),
            self.client.clone(),
            self.task_tx.clone(),
        );
        task_id
    }

    /// Applies one action. Returns `false` when the application should exit.
    pub fn handle(&mut self, app: &mut AppState, action: Action) -> bool {
        use RedrawFlag as RF;

        self.stats.total_actions += 1;
        if action.is_user_input() {
            self.stats.user_actions += 1;
        }

        match action {
            Action::Quit => return false,

            Action::Tick => {
                app.ui.update_notification();
            }

            Action::Resize(..) => app.ui.request_redraw(RF::All),

            Action::TaskResult(result) => self.apply_task_result(app, result),

            Action::Reload => {
                self.start_load(app);
            }

            // selection
            Action::MoveSelectionUp => {
                let step = app.ui.grid.columns.max(1) as isize;
                self.redraw_if(app, |app| app.directory.move_selection(-step));
            }
            Action::MoveSelectionDown => {
                let step = app.ui.grid.columns.max(1) as isize;
                self.redraw_if(app, |app| app.directory.move_selection(step));
            }
            Action::MoveSelectionLeft => {
                self.redraw_if(app, |app| app.directory.move_selection(-1));
            }
            Action::MoveSelectionRight => {
                self.redraw_if(app, |app| app.directory.move_selection(1));
            }
            Action::PageUp => {
                let step = page_step(app);
                self.redraw_if(app, |app| app.directory.move_selection(-step));
            }
            Action::PageDown => {
                let step = page_step(app);
                self.redraw_if(app, |app| app.directory.move_selection(step));
            }
            Action::SelectFirst => {
                self.redraw_if(app, |app| app.directory.select_first());
            }
            Action::SelectLast => {
                self.redraw_if(app, |app| app.directory.select_last());
            }

            // activation
            Action::ActivateSelected => self.activate(app),
            Action::ConfirmOpen => {
                app.ui.set_overlay(UIOverlay::None);
                match app.directory.confirm(&mut self.navigator) {
                    Ok(Some(url)) => app.ui.show_success(format!("Opened {url}")),
                    Ok(None) => {}
                    Err(e) => report_open_failure(app, &e),
                }
            }
            Action::CancelConfirm => {
                if app.directory.cancel_confirmation() {
                    debug!("Confirmation declined");
                }
                app.ui.set_overlay(UIOverlay::None);
            }

            // search
            Action::EnterSearch => {
                if app.directory.accepts_input() {
                    app.ui.set_mode(UIMode::Search);
                }
            }
            Action::ExitSearch => app.ui.set_mode(UIMode::Browse),
            Action::SearchInput(c) => {
                app.directory.on_search_input(|s| s.insert(c));
                app.ui.request_redraw(RF::Main);
            }
            Action::SearchBackspace => {
                app.directory.on_search_input(|s| s.backspace());
                app.ui.request_redraw(RF::Main);
            }
            Action::SearchDelete => {
                app.directory.on_search_input(|s| s.delete());
                app.ui.request_redraw(RF::Main);
            }
            Action::ClearSearch => {
                app.directory.on_search_input(|s| s.clear());
                app.ui.request_redraw(RF::Main);
            }
            Action::SearchCursorLeft => self.move_cursor(app, |s| s.move_left()),
            Action::SearchCursorRight => self.move_cursor(app, |s| s.move_right()),
            Action::SearchCursorHome => self.move_cursor(app, |s| s.move_home()),
            Action::SearchCursorEnd => self.move_cursor(app, |s| s.move_end()),

            // category
            Action::NextCategory => {
                self.redraw_if(app, |app| app.directory.on_category_change(1));
            }
            Action::PrevCategory => {
                self.redraw_if(app, |app| app.directory.on_category_change(-1));
            }

            // overlays
            Action::ToggleHelp => app.ui.toggle_help(),
            Action::CloseOverlay => app.ui.set_overlay(UIOverlay::None),
            Action::DismissNotification => {
                app.ui.dismiss_notification();
            }
        }

        true
    }

    fn activate(&mut self, app: &mut AppState) {
        match app.directory.activate_selected(&mut self.navigator) {
            Ok(Activation::Opened { url }) => app.ui.show_success(format!("Opened {url}")),
            Ok(Activation::AwaitingConfirmation) => app.ui.set_overlay(UIOverlay::Confirm),
            Ok(Activation::NothingSelected) => debug!("Activation with no card selected"),
            Err(e) => report_open_failure(app, &e),
        }
    }

    fn apply_task_result(&mut self, app: &mut AppState, result: TaskResult) {
        if self.active_load != Some(result.load_id()) {
            self.stats.stale_results += 1;
            debug!(load_id = result.load_id(), "Dropping result of superseded load");
            return;
        }

        match result {
            TaskResult::LinksLoaded { task_id, result } => {
                let state = app.directory.finish_load(result);
                let icon_sources = match state {
                    DirectoryState::Ready(ready) if app.config.probe_icons => {
                        ready.dataset.icon_sources()
                    }
                    _ => Vec::new(),
                };

                if !icon_sources.is_empty() {
                    debug!(task_id, icons = icon_sources.len(), "Probing icon sources");
                    let _handle = spawn_icon_probe(
                        task_id,
                        icon_sources,
                        self.client.clone(),
                        self.task_tx.clone(),
                    );
                }
                app.ui.request_redraw(RedrawFlag::All);
            }

            TaskResult::IconProbed { src, available, .. } => {
                app.icons.record(src, available);
                app.ui.request_redraw(RedrawFlag::Main);
            }
        }
    }

    fn redraw_if(&self, app: &mut AppState, change: impl FnOnce(&mut AppState) -> bool) {
        if change(app) {
            app.ui.request_redraw(RedrawFlag::Main);
        }
    }

    fn move_cursor(&self, app: &mut AppState, motion: impl FnOnce(&mut SearchInput)) {
        app.directory.on_search_cursor(motion);
        app.ui.request_redraw(RedrawFlag::Main);
    }
}

fn page_step(app: &AppState) -> isize {
    (app.ui.grid.columns.max(1) * app.ui.grid.visible_rows.max(1)) as isize
}

fn report_open_failure(app: &mut AppState, error: &AppError) {
    warn!(error = %error, "Could not open link");
    app.ui.show_error(format!("Could not open link: {error}"));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use super::*;
    use crate::{
        config::Config,
        controller::navigator::testing::{BrokenNavigator, RecordingNavigator},
        model::{
            dataset::Dataset, directory_state::Placeholder, icon_registry::IconStatus,
            ui_state::NotificationLevel,
        },
        tasks::load_task::test_server,
    };

    const LINKS: &str = r#"[
        {"name": "Foo", "url": "https://a", "category": "Tools", "icon": "/nonexistent/foo.png"},
        {"name": "Bar", "url": "https://b", "description": "caution"},
        {"name": "Baz", "url": "https://c", "category": "Tools", "description": "really?"}
    ]"#;

    fn client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    fn setup<N: Navigator>(
        navigator: N,
        source: LinkSource,
    ) -> (
        ActionDispatcher<N>,
        AppState,
        mpsc::UnboundedReceiver<TaskResult>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = ActionDispatcher::new(navigator, source, client(), tx);
        let app = AppState::new(Arc::new(Config::default()));
        (dispatcher, app, rx)
    }

    fn file_source(dir: &tempfile::TempDir, json: &str) -> LinkSource {
        let path = dir.path().join("config.json");
        std::fs::write(&path, json).unwrap();
        LinkSource::File(path)
    }

    /// Starts a load and applies results until the directory leaves `Loading`.
    async fn load<N: Navigator>(
        dispatcher: &mut ActionDispatcher<N>,
        app: &mut AppState,
        rx: &mut mpsc::UnboundedReceiver<TaskResult>,
    ) {
        dispatcher.start_load(app);
        assert_eq!(app.directory.state(), &DirectoryState::Loading);
        while app.directory.state() == &DirectoryState::Loading {
            let result = rx.recv().await.unwrap();
            dispatcher.handle(app, Action::TaskResult(result));
        }
    }

    #[tokio::test]
    async fn load_then_type_to_filter() {
        let dir = tempfile::tempdir().unwrap();
        let (mut dispatcher, mut app, mut rx) =
            setup(RecordingNavigator::default(), file_source(&dir, LINKS));
        load(&mut dispatcher, &mut app, &mut rx).await;

        assert_eq!(app.directory.card_names(), ["Foo", "Bar", "Baz"]);

        dispatcher.handle(&mut app, Action::EnterSearch);
        assert_eq!(app.ui.mode, UIMode::Search);
        for c in "ba".chars() {
            dispatcher.handle(&mut app, Action::SearchInput(c));
        }
        assert_eq!(app.directory.card_names(), ["Bar", "Baz"]);

        dispatcher.handle(&mut app, Action::ExitSearch);
        assert_eq!(app.ui.mode, UIMode::Browse);
        assert_eq!(app.directory.search().value(), "ba");

        dispatcher.handle(&mut app, Action::NextCategory);
        assert_eq!(app.directory.card_names(), ["Baz"]);
    }

    #[tokio::test]
    async fn gated_link_goes_through_confirm_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let (mut dispatcher, mut app, mut rx) =
            setup(RecordingNavigator::default(), file_source(&dir, LINKS));
        load(&mut dispatcher, &mut app, &mut rx).await;

        dispatcher.handle(&mut app, Action::SelectLast);
        dispatcher.handle(&mut app, Action::ActivateSelected);
        assert_eq!(app.ui.overlay, UIOverlay::Confirm);
        assert!(dispatcher.navigator().opened.is_empty());

        dispatcher.handle(&mut app, Action::CancelConfirm);
        assert_eq!(app.ui.overlay, UIOverlay::None);
        assert!(dispatcher.navigator().opened.is_empty());

        dispatcher.handle(&mut app, Action::ActivateSelected);
        dispatcher.handle(&mut app, Action::ConfirmOpen);
        assert_eq!(dispatcher.navigator().opened, ["https://c"]);
        assert_eq!(
            app.ui.notification.as_ref().map(|n| n.level),
            Some(NotificationLevel::Success)
        );
    }

    #[tokio::test]
    async fn direct_link_opens_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let (mut dispatcher, mut app, mut rx) =
            setup(RecordingNavigator::default(), file_source(&dir, LINKS));
        load(&mut dispatcher, &mut app, &mut rx).await;

        dispatcher.handle(&mut app, Action::ActivateSelected);
        assert_eq!(app.ui.overlay, UIOverlay::None);
        assert_eq!(dispatcher.navigator().opened, ["https://a"]);
    }

    #[tokio::test]
    async fn browser_failure_becomes_error_notification() {
        let dir = tempfile::tempdir().unwrap();
        let (mut dispatcher, mut app, mut rx) = setup(BrokenNavigator, file_source(&dir, LINKS));
        load(&mut dispatcher, &mut app, &mut rx).await;

        dispatcher.handle(&mut app, Action::ActivateSelected);
        assert_eq!(
            app.ui.notification.as_ref().map(|n| n.level),
            Some(NotificationLevel::Error)
        );
        assert!(app.directory.state().is_ready());
    }

    #[tokio::test]
    async fn http_404_leaves_selector_empty() {
        let base = test_server::serve("404 Not Found", "").await;
        let source = LinkSource::parse(&format!("{base}/config.json")).unwrap();
        let (mut dispatcher, mut app, mut rx) = setup(RecordingNavigator::default(), source);
        load(&mut dispatcher, &mut app, &mut rx).await;

        assert!(matches!(app.directory.state(), DirectoryState::LoadError(_)));
        assert_eq!(
            app.directory.container().placeholder(),
            Some(Placeholder::LoadError)
        );
        assert!(app.directory.category().options().is_empty());

        dispatcher.handle(&mut app, Action::EnterSearch);
        assert_eq!(app.ui.mode, UIMode::Browse);
        dispatcher.handle(&mut app, Action::NextCategory);
        assert!(app.directory.category().options().is_empty());
    }

    #[tokio::test]
    async fn stale_results_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let (mut dispatcher, mut app, _rx) =
            setup(RecordingNavigator::default(), file_source(&dir, LINKS));
        let first = dispatcher.start_load(&mut app);
        let _second = dispatcher.start_load(&mut app);

        let stale = TaskResult::LinksLoaded {
            task_id: first,
            result: Dataset::from_json(b"[]").map_err(AppError::from),
        };
        dispatcher.handle(&mut app, Action::TaskResult(stale));

        assert_eq!(app.directory.state(), &DirectoryState::Loading);
        assert_eq!(dispatcher.get_stats().stale_results, 1);
    }

    #[tokio::test]
    async fn failed_icon_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let (mut dispatcher, mut app, mut rx) =
            setup(RecordingNavigator::default(), file_source(&dir, LINKS));
        load(&mut dispatcher, &mut app, &mut rx).await;

        let probe = rx.recv().await.unwrap();
        dispatcher.handle(&mut app, Action::TaskResult(probe));
        assert_eq!(app.icons.status("/nonexistent/foo.png"), IconStatus::Failed);
    }

    #[tokio::test]
    async fn quit_stops_and_reload_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let (mut dispatcher, mut app, mut rx) =
            setup(RecordingNavigator::default(), file_source(&dir, LINKS));
        load(&mut dispatcher, &mut app, &mut rx).await;
        dispatcher.handle(&mut app, Action::EnterSearch);
        dispatcher.handle(&mut app, Action::SearchInput('x'));

        assert!(dispatcher.handle(&mut app, Action::Reload));
        assert_eq!(app.directory.state(), &DirectoryState::Loading);
        assert!(app.directory.search().is_empty());
        assert_eq!(app.ui.mode, UIMode::Browse);

        assert!(!dispatcher.handle(&mut app, Action::Quit));
    }
}
