//! CLI color helpers.
//!
//! All functions respect `NO_COLOR`, `FORCE_COLOR`, and TTY detection via
//! `owo-colors`' `if_supports_color()`. The `--no-color` flag sets an
//! internal flag that bypasses owo-colors entirely.

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::OwoColorize;
use owo_colors::Stream::{self, Stderr, Stdout};

/// Global override: when true, forces color off (set by `--no-color` flag).
static NO_COLOR_FLAG: AtomicBool = AtomicBool::new(false);

/// Call once from main.rs when `--no-color` is passed.
pub fn set_no_color() {
    NO_COLOR_FLAG.store(true, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

const SIGNAL: Rgb = Rgb::from_hex(0x5FA8D3); // Handles, primary accent
const GREEN: Rgb = Rgb::from_hex(0x6BA35E); // Succeeded
const AMBER: Rgb = Rgb::from_hex(0xD19A4A); // Aborted, warnings
const RED: Rgb = Rgb::from_hex(0xC8574B); // Failed, errors
const ORANGE: Rgb = Rgb::from_hex(0xD9773A); // Errored
const MUTED: Rgb = Rgb::from_hex(0x6B7280); // Borders, placeholders

fn no_color() -> bool {
    NO_COLOR_FLAG.load(Ordering::Relaxed)
}

fn paint(text: &str, stream: Stream, rgb: Rgb) -> String {
    if no_color() {
        return text.to_string();
    }
    text.if_supports_color(stream, |t| t.truecolor(rgb.r, rgb.g, rgb.b))
        .to_string()
}

/// Primary accent (container handles).
pub fn accent(text: &str) -> String {
    paint(text, Stdout, SIGNAL)
}

/// Bold text (headers, step announcements).
pub fn bold(text: &str) -> String {
    if no_color() {
        return text.to_string();
    }
    text.if_supports_color(Stdout, |t| t.bold()).to_string()
}

/// Muted gray (borders, `none` placeholders, secondary info).
pub fn muted(text: &str) -> String {
    paint(text, Stdout, MUTED)
}

/// Red text on stdout (error events inside a build's output).
pub fn failure(text: &str) -> String {
    paint(text, Stdout, RED)
}

/// Color a terminal build status word.
pub fn build_status(status: &str) -> String {
    match status {
        "succeeded" => paint(status, Stdout, GREEN),
        "failed" => paint(status, Stdout, RED),
        "errored" => paint(status, Stdout, ORANGE),
        "aborted" => paint(status, Stdout, AMBER),
        _ => status.to_string(),
    }
}

/// Error styling for stderr messages.
pub fn error(text: &str) -> String {
    paint(text, Stderr, RED)
}
