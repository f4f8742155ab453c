//! Startup and status diagnostics.
//!
//! Line-oriented status messages (bus init results, mode changes) go into a
//! small ring buffer instead of straight to a serial port, so the same code
//! works on hardware (drained over UART) and in the simulator (drained to
//! stdout). Informational only; nothing reads these messages back.

use heapless::{Deque, String};

// =============================================================================
// Status Log Configuration
// =============================================================================

/// Maximum number of retained status lines.
pub const STATUS_LINES: usize = 6;

/// Maximum characters per status line.
pub const STATUS_LINE_LEN: usize = 48;

// =============================================================================
// Status Log Ring Buffer
// =============================================================================

/// Ring buffer of recent status messages; oldest lines drop first.
pub struct StatusLog {
    lines: Deque<String<STATUS_LINE_LEN>, STATUS_LINES>,
}

impl StatusLog {
    /// Create an empty log.
    pub const fn new() -> Self { Self { lines: Deque::new() } }

    /// Append a message, dropping the oldest line when full and truncating
    /// messages longer than [`STATUS_LINE_LEN`].
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        if self.lines.is_full() {
            self.lines.pop_front();
        }

        let mut line: String<STATUS_LINE_LEN> = String::new();
        for c in msg.chars().take(STATUS_LINE_LEN) {
            if line.push(c).is_err() {
                break;
            }
        }
        self.lines.push_back(line).ok();
    }

    /// Iterate retained messages, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.lines.iter().map(|line| line.as_str()) }

    /// Number of retained lines.
    pub const fn len(&self) -> usize { self.lines.len() }

    /// Whether the log holds no lines.
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }
}

impl Default for StatusLog {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================
