//! src/controller/actions.rs
//! ============================================================================
//! # Actions: every command the directory responds to
//!
//! Terminal input, timer ticks and background task results are all reduced to
//! an `Action` before they reach the dispatcher.

use crate::controller::event_loop::TaskResult;

#[derive(Debug)]
pub enum Action {
    /// Activate the selected card: open directly or ask for confirmation.
    ActivateSelected,

    /// Decline the pending confirmation.
    CancelConfirm,

    /// Clear the search text.
    ClearSearch,

    /// Close the help overlay.
    CloseOverlay,

    /// Accept the pending confirmation and open the link.
    ConfirmOpen,

    DismissNotification,

    /// Focus the search field.
    EnterSearch,

    /// Leave the search field; its text stays applied.
    ExitSearch,

    /// Move selection one row down.
    MoveSelectionDown,

    /// Move selection one card left.
    MoveSelectionLeft,

    /// Move selection one card right.
    MoveSelectionRight,

    /// Move selection one row up.
    MoveSelectionUp,

    /// Select the next category, wrapping.
    NextCategory,

    /// Move selection down by one visible page of rows.
    PageDown,

    /// Move selection up by one visible page of rows.
    PageUp,

    /// Select the previous category, wrapping.
    PrevCategory,

    /// Quit the application.
    Quit,

    /// Fetch the link list again from scratch.
    Reload,

    /// A terminal resize event.
    Resize(u16, u16),

    SearchBackspace,

    SearchCursorEnd,

    SearchCursorHome,

    SearchCursorLeft,

    SearchCursorRight,

    SearchDelete,

    /// A character typed into the search field.
    SearchInput(char),

    /// Jump to first card.
    SelectFirst,

    /// Jump to last card.
    SelectLast,

    /// A result from a background task.
    TaskResult(TaskResult),

    /// An internal tick event for periodic updates.
    Tick,

    /// Toggle the help overlay visibility.
    ToggleHelp,
}

impl Action {
    /// Whether this action came from the terminal rather than a timer or task.
    pub fn is_user_input(&self) -> bool {
        !matches!(self, Self::Tick | Self::TaskResult(_))
    }
}
