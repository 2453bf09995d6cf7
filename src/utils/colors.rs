/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Colour of a stamp kind in listings: sign-in green, sign-out red,
/// breaks yellow, leave cyan.
pub fn color_for_stamp(kind: &str) -> &'static str {
    match kind {
        "sign-in" => GREEN,
        "sign-out" => RED,
        "start-break" | "end-break" => YELLOW,
        "register-leave" => CYAN,
        _ => RESET,
    }
}
