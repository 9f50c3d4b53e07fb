/// Everything the user can ask the picker screen to do
///
/// Actions come only from key events; [`super::keys::key_to_action`] decides
/// which one a key means in the current [`super::app::App`] state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,

    // Popover
    Open,
    Close,
    ToggleFocus,

    // Text field
    TypeChar(char),
    Backspace,
    ClearText,

    // Calendar
    /// Move the day cursor by this many days
    MoveCursor(i64),
    /// Page the visible window by whole months
    NavigateMonths(i32),
    SelectCursor,
}
