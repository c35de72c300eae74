//! TUI constants: colors, timing, scroll steps, and notice texts.

use std::time::Duration;

use ratatui::style::Color;

/// Accent green color (#98FB98).
pub(super) const ACCENT: Color = Color::Rgb(152, 251, 152);

/// Secondary accent, soft cyan (#7EC8E3). Used for solver blocks and display math.
pub(super) const ACCENT_SECONDARY: Color = Color::Rgb(126, 200, 227);

/// Event poll timeout in milliseconds (main loop).
pub(crate) const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Scroll amount for arrow keys and mouse wheel.
pub(crate) const SCROLL_LINES_SMALL: usize = 3;

/// Scroll amount for PageUp/PageDown.
pub(crate) const SCROLL_LINES_PAGE: usize = 10;

/// Input box height including borders.
pub(crate) const INPUT_HEIGHT: u16 = 3;

/// How long a notice stays in the bottom bar.
pub(crate) const NOTICE_DURATION: Duration = Duration::from_secs(4);

/// Shown when Enter is pressed on an empty input.
pub(crate) const EMPTY_INPUT_NOTICE: &str = "Please enter a math question or attach an image.";

/// Subtitle under the title on the welcome screen.
pub(super) const SUBTITLE: &str = "Ask a math question or attach an image and I'll solve it step by step.";

/// Minimalist logo when idle (single character).
pub(super) const LOGO_IDLE: &str = "∑";

/// Spinner frames while a reply is on its way (braille pattern, 4 frames).
pub(super) const LOGO_THINKING: &[&str] = &["⠋", "⠙", "⠹", "⠸"];
