pub mod error;

pub mod config;

pub mod controller {

    pub mod actions;
    pub use actions::Action;

    pub mod action_dispatcher;
    pub use action_dispatcher::{ActionDispatcher, DispatcherStats};

    pub mod directory;
    pub use directory::{Activation, DirectoryController, PendingConfirmation};

    pub mod event_loop;
    pub use event_loop::{EventLoop, TaskResult};

    pub mod keymap;

    pub mod navigator;
    pub use navigator::{BrowserNavigator, Navigator};
}

pub mod model {
    pub mod app_state;

    pub mod category;
    pub use category::{CategoryChoice, CategorySelector, CategorySet};

    pub mod dataset;
    pub use dataset::Dataset;

    pub mod directory_state;
    pub use directory_state::{Card, ContainerView, DirectoryState, Placeholder};

    pub mod filter;
    pub use filter::FilterState;

    pub mod icon_registry;

    pub mod link;
    pub use link::{Link, LinkEntry, LinkTarget};

    pub mod search_input;

    pub mod ui_state;
    pub use ui_state::{Notification, NotificationLevel, RedrawFlag, UIMode, UIOverlay, UIState};
}

pub mod view {
    pub mod theme;

    pub mod ui;

    pub mod components {
        pub mod card_grid;
        pub use card_grid::CardGrid;
        pub mod category_bar;
        pub use category_bar::CategoryBar;
        pub mod confirm_overlay;
        pub use confirm_overlay::ConfirmOverlay;
        pub mod help_overlay;
        pub use help_overlay::HelpOverlay;
        pub mod notification_overlay;
        pub use notification_overlay::NotificationOverlay;
        pub mod search_bar;
        pub use search_bar::SearchBar;
        pub mod status_bar;
        pub use status_bar::StatusBar;
    }
}

pub mod tasks {
    pub mod icon_probe;

    pub mod load_task;
}

pub mod proxy;

pub mod logging;
pub use logging::Logger;

pub use error::AppError;

pub use model::{app_state::AppState, ui_state::UIState};
