//! src/model/app_state.rs
//! Everything the dispatcher mutates and the renderer reads.

use std::sync::Arc;

use crate::{
    config::Config,
    controller::directory::DirectoryController,
    model::{icon_registry::IconRegistry, ui_state::UIState},
};

#[derive(Debug)]
pub struct AppState {
    pub config: Arc<Config>,
    pub directory: DirectoryController,
    pub ui: UIState,
    pub icons: IconRegistry,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            directory: DirectoryController::new(config.prompts.clone()),
            ui: UIState::new(config.notification_timeout),
            icons: IconRegistry::default(),
            config,
        }
    }
}
