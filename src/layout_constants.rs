//! Shared layout constants used across CLI and TUI components.
//!
//! This module centralizes common layout values to ensure consistency
//! and make it easier to adjust layouts globally.

/// Width of one day cell: marker, two digits, marker
pub const DAY_CELL_WIDTH: usize = 4;

/// Space between day cells in a row
pub const DAY_CELL_GAP: usize = 1;

/// Width of a full 7-column week row
pub const MONTH_WIDTH: usize = 7 * DAY_CELL_WIDTH + 6 * DAY_CELL_GAP;

/// Horizontal space between side-by-side months in the TUI
pub const MONTH_GAP: u16 = 3;

/// Title + underline + weekday header + up to six weeks
pub const MONTH_HEIGHT: u16 = 9;

/// Weekday headers are cut to this many columns
pub const WEEKDAY_HEADER_WIDTH: usize = 3;

/// Height of the trigger (button or input) including its border
pub const TRIGGER_HEIGHT: u16 = 3;

/// Minimum inner width of the trigger
pub const TRIGGER_MIN_WIDTH: u16 = 24;
