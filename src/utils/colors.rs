/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Status color:
/// present → green, late → yellow, unexcused_absence → red.
pub fn color_for_status(status: &str) -> &'static str {
    match status {
        "present" => GREEN,
        "late" => YELLOW,
        "unexcused_absence" => RED,
        _ => RESET,
    }
}
