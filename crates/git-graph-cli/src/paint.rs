//! ANSI coloring of lane color indices for the text output.

use std::io::IsTerminal;

use clap::ValueEnum;

/// Color configuration mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal and `NO_COLOR` is unset.
    Auto,
    Always,
    Never,
}

/// Palette cycled through by color index, in the order `git log --graph`
/// picks its column colors.
const PALETTE: [&str; 12] = [
    "\x1b[31m",
    "\x1b[32m",
    "\x1b[33m",
    "\x1b[34m",
    "\x1b[35m",
    "\x1b[36m",
    "\x1b[1;31m",
    "\x1b[1;32m",
    "\x1b[1;33m",
    "\x1b[1;34m",
    "\x1b[1;35m",
    "\x1b[1;36m",
];

const RESET: &str = "\x1b[0m";

/// Decide whether to emit escape codes.
pub fn use_color(mode: ColorMode, is_terminal: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::env::var_os("NO_COLOR").is_none() && is_terminal,
    }
}

pub fn use_color_stdout(mode: ColorMode) -> bool {
    use_color(mode, std::io::stdout().is_terminal())
}

/// Wrap `text` in the escape code for color index `color`.
pub fn paint(text: &str, color: usize, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    format!("{}{}{}", PALETTE[color % PALETTE.len()], text, RESET)
}
