//! src/controller/directory.rs
//! ============================================================================
//! # DirectoryController: the directory view controller
//!
//! Owns the directory lifecycle ([`DirectoryState`]) together with the three
//! UI handles it drives: the search input, the category selector and the card
//! container. Every input event funnels into [`DirectoryController::filter_and_render`],
//! which recomputes the filtered view from the immutable dataset snapshot.
//!
//! Navigation is delegated to a [`Navigator`]; described links park a
//! [`PendingConfirmation`] until the user answers it.

use tracing::{debug, error, info, instrument};

use crate::{
    config::PromptConfig,
    controller::navigator::Navigator,
    error::{AppError, AppResult},
    model::{
        category::CategorySelector,
        dataset::Dataset,
        directory_state::{Card, ContainerView, DirectoryState, Placeholder, ReadyDirectory},
        filter::FilterState,
        link::{Link, LinkTarget},
        search_input::SearchInput,
    },
};

/// A described link waiting for the user's go-ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub name: String,
    pub url: String,
    pub message: String,
}

/// Result of activating the selected card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// A direct link was handed to the navigator.
    Opened { url: String },
    /// A described link is waiting on [`DirectoryController::confirm`].
    AwaitingConfirmation,
    /// No card is selected.
    NothingSelected,
}

#[derive(Debug, Clone, Default)]
pub struct DirectoryController {
    state: DirectoryState,
    search: SearchInput,
    category: CategorySelector,
    container: ContainerView,
    selected: Option<usize>,
    pending: Option<PendingConfirmation>,
    prompts: PromptConfig,
}

impl DirectoryController {
    pub fn new(prompts: PromptConfig) -> Self {
        Self {
            prompts,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // load
    // ------------------------------------------------------------------

    /// Enters `Loading`, dropping any previous dataset and resetting the inputs.
    pub fn begin_load(&mut self) {
        self.state = DirectoryState::Loading;
        self.search.clear();
        self.category.reset();
        self.pending = None;
        self.show_placeholder(Placeholder::Loading);
    }

    /// Settles a load. Only a non-empty dataset enables filtering.
    #[instrument(level = "debug", skip_all)]
    pub fn finish_load(&mut self, result: Result<Dataset, AppError>) -> &DirectoryState {
        match result {
            Ok(dataset) if dataset.is_empty() => {
                info!("Link list loaded but holds no entries");
                self.state = DirectoryState::EmptyData;
                self.show_placeholder(Placeholder::NoLinksConfigured);
            }
            Ok(dataset) => {
                let ready = ReadyDirectory::new(dataset);
                info!(
                    links = ready.dataset.len(),
                    categories = ready.categories.len(),
                    "Link list loaded"
                );
                self.category.populate(&ready.categories);
                self.state = DirectoryState::Ready(ready);
                self.filter_and_render();
            }
            Err(e) => {
                error!(error = %e, "Failed to load link list");
                self.state = DirectoryState::LoadError(e.to_string());
                self.show_placeholder(Placeholder::LoadError);
            }
        }
        &self.state
    }

    // ------------------------------------------------------------------
    // filter / render
    // ------------------------------------------------------------------

    /// The live filter inputs.
    pub fn filter_state(&self) -> FilterState {
        FilterState::new(self.search.value(), self.category.selected())
    }

    /// Recomputes the visible cards from the current inputs. Does nothing
    /// unless the directory is `Ready`.
    pub fn filter_and_render(&mut self) -> bool {
        let Some(dataset) = self.state.dataset() else {
            return false;
        };
        let filter = self.filter_state();
        let items = dataset.filter(&filter);
        debug!(
            needle = filter.needle(),
            category = %filter.category(),
            matches = items.len(),
            "Filter pass"
        );
        self.render(&items);
        true
    }

    /// Replaces the container contents with one card per item, or the
    /// no-matches placeholder.
    pub fn render(&mut self, items: &[usize]) {
        if items.is_empty() {
            self.show_placeholder(Placeholder::NoMatches);
            return;
        }
        self.container = ContainerView::Cards(items.iter().map(|&link| Card { link }).collect());
        self.selected = Some(0);
    }

    fn show_placeholder(&mut self, placeholder: Placeholder) {
        self.container = ContainerView::Placeholder(placeholder);
        self.selected = None;
    }

    // ------------------------------------------------------------------
    // input events
    // ------------------------------------------------------------------

    /// Applies an edit to the search box. `edit` reports whether the text
    /// changed; only a change triggers a filter pass.
    pub fn on_search_input(&mut self, edit: impl FnOnce(&mut SearchInput) -> bool) -> bool {
        if !self.accepts_input() || !edit(&mut self.search) {
            return false;
        }
        self.filter_and_render()
    }

    /// Moves the cursor inside the search box without filtering.
    pub fn on_search_cursor(&mut self, motion: impl FnOnce(&mut SearchInput)) {
        motion(&mut self.search);
    }

    /// Cycles the category selector and re-renders when the choice changed.
    pub fn on_category_change(&mut self, delta: isize) -> bool {
        if !self.accepts_input() || !self.category.cycle(delta) {
            return false;
        }
        self.filter_and_render()
    }

    /// Search and category handling are wired up only for a loaded dataset.
    pub const fn accepts_input(&self) -> bool {
        self.state.is_ready()
    }

    // ------------------------------------------------------------------
    // selection
    // ------------------------------------------------------------------

    pub fn move_selection(&mut self, delta: isize) -> bool {
        let len = self.container.cards().len();
        let Some(current) = self.selected else {
            return false;
        };
        let next = (current as isize + delta).clamp(0, len as isize - 1) as usize;
        let changed = next != current;
        self.selected = Some(next);
        changed
    }

    pub fn select_first(&mut self) -> bool {
        self.move_selection(isize::MIN / 2)
    }

    pub fn select_last(&mut self) -> bool {
        self.move_selection(isize::MAX / 2)
    }

    pub fn selected_link(&self) -> Option<&Link> {
        let card = self.container.cards().get(self.selected?)?;
        self.link_for(card)
    }

    // ------------------------------------------------------------------
    // activation
    // ------------------------------------------------------------------

    /// Opens a direct link immediately; parks a described link for confirmation.
    pub fn activate_selected<N: Navigator>(&mut self, navigator: &mut N) -> AppResult<Activation> {
        let Some(link) = self.selected_link() else {
            return Ok(Activation::NothingSelected);
        };
        let name = link.name().to_string();
        let target = link.target().clone();

        match target {
            LinkTarget::Direct { url } => {
                navigator.open_in_new_context(&url)?;
                Ok(Activation::Opened { url })
            }
            LinkTarget::Gated { url, description } => {
                debug!(name = %name, "Described link needs confirmation");
                self.pending = Some(PendingConfirmation {
                    message: self.prompts.confirm_message(&description),
                    name,
                    url,
                });
                Ok(Activation::AwaitingConfirmation)
            }
        }
    }

    /// Answers the pending confirmation with "continue". Returns the opened URL.
    pub fn confirm<N: Navigator>(&mut self, navigator: &mut N) -> AppResult<Option<String>> {
        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };
        navigator.open_in_new_context(&pending.url)?;
        Ok(Some(pending.url))
    }

    /// Answers the pending confirmation with "cancel".
    pub fn cancel_confirmation(&mut self) -> bool {
        self.pending.take().is_some()
    }

    // ------------------------------------------------------------------
    // accessors
    // ------------------------------------------------------------------

    pub const fn state(&self) -> &DirectoryState {
        &self.state
    }

    pub const fn container(&self) -> &ContainerView {
        &self.container
    }

    pub const fn search(&self) -> &SearchInput {
        &self.search
    }

    pub const fn category(&self) -> &CategorySelector {
        &self.category
    }

    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub const fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    pub const fn prompts(&self) -> &PromptConfig {
        &self.prompts
    }

    pub fn link_for(&self, card: &Card) -> Option<&Link> {
        self.state.dataset()?.get(card.link)
    }

    /// Names of the rendered cards, in order.
    pub fn card_names(&self) -> Vec<&str> {
        self.container
            .cards()
            .iter()
            .filter_map(|card| self.link_for(card))
            .map(Link::name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::navigator::testing::{BrokenNavigator, RecordingNavigator};
    use crate::model::category::CategoryChoice;

    fn loaded(json: &str) -> DirectoryController {
        let mut controller = DirectoryController::new(PromptConfig::default());
        controller.begin_load();
        controller.finish_load(Dataset::from_json(json.as_bytes()).map_err(AppError::from));
        controller
    }

    const MIXED: &str = r#"[
        {"name": "Foo", "url": "https://a", "category": "Tools"},
        {"name": "Bar", "url": "https://b", "description": "caution"},
        {"name": "Baz", "url": "https://c", "category": "Tools", "description": "caution"},
        {"name": "food", "url": "https://d", "category": "Snacks"}
    ]"#;

    #[test]
    fn search_foo_renders_one_card() {
        let mut controller = loaded(r#"[{"name":"Foo","url":"https://a","category":"Tools"}]"#);
        assert!(controller.on_search_input(|s| s.set("foo")));
        assert_eq!(controller.card_names(), ["Foo"]);
    }

    #[test]
    fn initial_render_shows_everything_in_order() {
        let controller = loaded(MIXED);
        assert!(controller.state().is_ready());
        assert_eq!(controller.card_names(), ["Foo", "Bar", "Baz", "food"]);
        assert_eq!(controller.selected(), Some(0));
        assert_eq!(
            controller.category().options(),
            ["All", "Tools", "Snacks"].map(String::from)
        );
    }

    #[test]
    fn category_then_search_filtering() {
        let mut controller = loaded(MIXED);
        assert!(controller.on_category_change(1));
        assert_eq!(
            controller.filter_state().category(),
            &CategoryChoice::Named("Tools".to_string())
        );
        assert_eq!(controller.card_names(), ["Foo", "Baz"]);

        controller.on_search_input(|s| s.set("BA"));
        assert_eq!(controller.card_names(), ["Baz"]);
    }

    #[test]
    fn filter_and_render_is_idempotent() {
        let mut controller = loaded(MIXED);
        controller.on_search_input(|s| s.set("o"));
        let first = controller.container().clone();
        assert!(controller.filter_and_render());
        assert_eq!(controller.container(), &first);
        assert!(controller.filter_and_render());
        assert_eq!(controller.container(), &first);
    }

    #[test]
    fn dataset_is_shared_not_copied() {
        let mut controller = loaded(MIXED);
        let snapshot = controller.state().dataset().unwrap().clone();
        controller.on_search_input(|s| s.set("zzz"));
        controller.on_search_input(|s| s.clear());
        assert!(controller.state().dataset().unwrap().shares_snapshot(&snapshot));
    }

    #[test]
    fn no_matches_placeholder_for_empty_subset() {
        let mut controller = loaded(MIXED);
        controller.on_search_input(|s| s.set("nothing like this"));
        assert_eq!(
            controller.container().placeholder(),
            Some(Placeholder::NoMatches)
        );
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn empty_dataset_shows_no_links_and_ignores_input() {
        let mut controller = loaded("[]");
        assert_eq!(controller.state(), &DirectoryState::EmptyData);
        assert_eq!(
            controller.container().placeholder(),
            Some(Placeholder::NoLinksConfigured)
        );
        assert!(!controller.on_search_input(|s| s.set("x")));
        assert!(!controller.on_category_change(1));
        assert!(controller.search().is_empty());
        assert_eq!(
            controller.container().placeholder(),
            Some(Placeholder::NoLinksConfigured)
        );
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let controller = loaded("{ not json");
        assert!(matches!(controller.state(), DirectoryState::LoadError(_)));
        assert_eq!(
            controller.container().placeholder(),
            Some(Placeholder::LoadError)
        );
        assert!(controller.category().options().is_empty());
    }

    #[test]
    fn transport_error_is_terminal() {
        let mut controller = DirectoryController::new(PromptConfig::default());
        controller.begin_load();
        controller.finish_load(Err(AppError::http_status("http://x/config.json", 404)));

        assert!(!controller.filter_and_render());
        assert!(!controller.on_category_change(1));
        assert_eq!(
            controller.container().placeholder(),
            Some(Placeholder::LoadError)
        );
    }

    #[test]
    fn direct_link_opens_without_confirmation() {
        let mut controller = loaded(MIXED);
        let mut nav = RecordingNavigator::default();

        let activation = controller.activate_selected(&mut nav).unwrap();
        assert_eq!(
            activation,
            Activation::Opened {
                url: "https://a".to_string()
            }
        );
        assert_eq!(nav.opened, ["https://a"]);
        assert!(controller.pending().is_none());
    }

    #[test]
    fn declining_gated_link_opens_nothing() {
        let mut controller = loaded(r#"[{"name":"Bar","url":"https://b","description":"caution"}]"#);
        let mut nav = RecordingNavigator::default();

        assert_eq!(
            controller.activate_selected(&mut nav).unwrap(),
            Activation::AwaitingConfirmation
        );
        let pending = controller.pending().unwrap();
        assert!(pending.message.contains("caution"));

        assert!(controller.cancel_confirmation());
        assert!(nav.opened.is_empty());
        assert!(controller.pending().is_none());
        assert_eq!(controller.card_names(), ["Bar"]);
    }

    #[test]
    fn confirming_gated_link_opens_exactly_once() {
        let mut controller = loaded(r#"[{"name":"Baz","url":"https://c","description":"caution"}]"#);
        let mut nav = RecordingNavigator::default();

        controller.activate_selected(&mut nav).unwrap();
        assert!(nav.opened.is_empty());

        let opened = controller.confirm(&mut nav).unwrap();
        assert_eq!(opened.as_deref(), Some("https://c"));
        assert_eq!(nav.opened, ["https://c"]);

        // Nothing left to confirm.
        assert_eq!(controller.confirm(&mut nav).unwrap(), None);
        assert_eq!(nav.opened.len(), 1);
    }

    #[test]
    fn navigator_failure_is_reported() {
        let mut controller = loaded(MIXED);
        let err = controller
            .activate_selected(&mut BrokenNavigator)
            .unwrap_err();
        assert!(matches!(err, AppError::Browser { .. }));
    }

    #[test]
    fn selection_is_clamped() {
        let mut controller = loaded(MIXED);
        assert!(!controller.move_selection(-1));
        assert!(controller.move_selection(2));
        assert_eq!(controller.selected_link().unwrap().name(), "Baz");
        assert!(controller.select_last());
        assert_eq!(controller.selected(), Some(3));
        assert!(!controller.move_selection(5));
        assert!(controller.select_first());
        assert_eq!(controller.selected(), Some(0));
    }

    #[test]
    fn unchanged_search_edit_keeps_selection() {
        let mut controller = loaded(MIXED);
        assert!(controller.move_selection(2));

        assert!(!controller.on_search_input(|s| s.backspace()));
        assert!(!controller.on_search_input(|s| s.clear()));
        assert_eq!(controller.selected(), Some(2));

        assert!(controller.on_search_input(|s| s.insert('b')));
        assert_eq!(controller.card_names(), ["Bar", "Baz"]);
        assert_eq!(controller.selected(), Some(0));
    }

    #[test]
    fn reload_resets_inputs() {
        let mut controller = loaded(MIXED);
        controller.on_category_change(1);
        controller.on_search_input(|s| s.set("ba"));

        controller.begin_load();
        assert_eq!(controller.state(), &DirectoryState::Loading);
        assert!(controller.search().is_empty());
        assert!(controller.category().options().is_empty());
        assert_eq!(
            controller.container().placeholder(),
            Some(Placeholder::Loading)
        );
    }
}
