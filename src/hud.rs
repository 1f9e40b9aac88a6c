use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue, style::Print};
use std::io::{self, Write};
use std::time::Duration;

const BAR_WIDTH: usize = 10;

/// Everything the status line needs for one frame
pub struct HudState<'a> {
    pub hand_present: bool,
    pub index_extended: bool,
    pub swipe_remaining: Duration,
    pub swipe_window: Duration,
    pub thumbs_up_remaining: Duration,
    pub label: Option<&'a str>,
    pub trail_len: usize,
}

fn cooldown_bar(remaining: Duration, window: Duration) -> String {
    let filled = if window.is_zero() {
        BAR_WIDTH
    } else {
        let progress = 1.0 - remaining.as_secs_f32() / window.as_secs_f32();
        (progress.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize
    };
    format!("{}{}", "█".repeat(filled), "·".repeat(BAR_WIDTH - filled))
}

pub fn status_line(state: &HudState) -> String {
    let bar = cooldown_bar(state.swipe_remaining, state.swipe_window);

    let status = if !state.swipe_remaining.is_zero() {
        format!("cooldown {:.1}s", state.swipe_remaining.as_secs_f32()).blue()
    } else if !state.hand_present {
        "no hand".to_string().dark_grey()
    } else if !state.index_extended {
        "point index finger".to_string().yellow()
    } else {
        format!("ready {}", "•".repeat(state.trail_len.min(8))).green()
    };

    let thumbs = if state.thumbs_up_remaining.is_zero() {
        "👍 READY".to_string().green()
    } else {
        format!("👍 cooldown {:.1}s", state.thumbs_up_remaining.as_secs_f32()).dark_grey()
    };

    let mut line = format!("{} {}  {}", bar.green(), status, thumbs);
    if let Some(label) = state.label {
        line.push_str(&format!("  {}", label.bold().cyan()));
    }
    line
}

/// Redraw the status line in place
pub fn draw(state: &HudState) {
    let mut stdout = io::stdout();
    let _ = queue!(
        stdout,
        cursor::MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(status_line(state))
    );
    stdout.flush().ok();
}

pub fn clear_line() {
    let mut stdout = io::stdout();
    let _ = queue!(stdout, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine));
    stdout.flush().ok();
}
