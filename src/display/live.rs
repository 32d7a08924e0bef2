//! Full-screen live clock.
//!
//! Owns the terminal while running: alternate screen, raw mode, hidden
//! cursor. Log output is suspended for the duration so it cannot tear the
//! frame, and everything is restored when the guard drops, including on error.

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Print, ResetColor, SetBackgroundColor},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{Write, stdout};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::Duration;

use super::theme::Theme;
use super::{RenderOptions, key_hints, render_lines};
use crate::common::logger::Log;
use crate::core::CoreMessage;
use crate::geo::City;
use crate::state::display::ViewState;

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Command for a key press, if the key is bound.
pub fn message_for_key(key: KeyEvent) -> Option<CoreMessage> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(CoreMessage::Shutdown),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(CoreMessage::Shutdown)
        }
        KeyCode::Char('t') => Some(CoreMessage::ToggleDarkMode),
        KeyCode::Char('r') => Some(CoreMessage::Refresh),
        KeyCode::Char(digit @ '1'..='5') => digit
            .to_digit(10)
            .and_then(|index| City::from_index(index as usize))
            .map(CoreMessage::SetLocation),
        _ => None,
    }
}

/// Restores the terminal and re-enables logging on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn acquire() -> Result<Self> {
        let guard = TerminalGuard;
        Log::set_enabled(false);
        enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(stdout(), EnterAlternateScreen, Hide)
            .context("Failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        Log::set_enabled(true);
    }
}

/// Draw snapshots and forward key presses until the user quits or the Core stops.
pub fn run(
    commands: Sender<CoreMessage>,
    snapshots: Receiver<ViewState>,
    options: RenderOptions,
) -> Result<()> {
    let _guard = TerminalGuard::acquire()?;
    let mut out = stdout();

    loop {
        // Only the newest pending snapshot is worth drawing
        let mut latest = None;
        loop {
            match snapshots.try_recv() {
                Ok(snapshot) => latest = Some(snapshot),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }
        if let Some(snapshot) = latest {
            draw(&mut out, &snapshot, &options)?;
        }

        if event::poll(INPUT_POLL)?
            && let Event::Key(key) = event::read()?
            && let Some(message) = message_for_key(key)
        {
            let quit = matches!(message, CoreMessage::Shutdown);
            if commands.send(message).is_err() || quit {
                return Ok(());
            }
        }
    }
}

fn draw(out: &mut impl Write, snapshot: &ViewState, options: &RenderOptions) -> Result<()> {
    let palette = Theme::from_dark_mode(snapshot.is_dark_mode).palette();

    if options.color {
        queue!(out, SetBackgroundColor(palette.background))?;
    }
    queue!(out, Clear(ClearType::All))?;

    let mut lines = render_lines(snapshot, options);
    lines.push(String::new());
    lines.push(key_hints(snapshot, options.color));

    for (row, line) in lines.iter().enumerate() {
        let row = u16::try_from(row + 1).unwrap_or(u16::MAX);
        queue!(out, MoveTo(2, row), Print(line))?;
        if options.color {
            // Colored spans reset the background; restore it for the next span
            queue!(out, SetBackgroundColor(palette.background))?;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert!(matches!(
            message_for_key(key(KeyCode::Char('q'))),
            Some(CoreMessage::Shutdown)
        ));
        assert!(matches!(
            message_for_key(key(KeyCode::Esc)),
            Some(CoreMessage::Shutdown)
        ));
        assert!(matches!(
            message_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(CoreMessage::Shutdown)
        ));
        assert!(message_for_key(key(KeyCode::Char('c'))).is_none());
    }

    #[test]
    fn test_digit_keys_select_city() {
        assert!(matches!(
            message_for_key(key(KeyCode::Char('1'))),
            Some(CoreMessage::SetLocation(City::Helsinki))
        ));
        assert!(matches!(
            message_for_key(key(KeyCode::Char('5'))),
            Some(CoreMessage::SetLocation(City::Utsjoki))
        ));
        assert!(message_for_key(key(KeyCode::Char('6'))).is_none());
        assert!(message_for_key(key(KeyCode::Char('0'))).is_none());
    }

    #[test]
    fn test_theme_and_refresh_keys() {
        assert!(matches!(
            message_for_key(key(KeyCode::Char('t'))),
            Some(CoreMessage::ToggleDarkMode)
        ));
        assert!(matches!(
            message_for_key(key(KeyCode::Char('r'))),
            Some(CoreMessage::Refresh)
        ));
    }

    #[test]
    fn test_key_release_ignored() {
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert!(message_for_key(release).is_none());
    }

    #[test]
    fn test_draw_writes_frame() {
        let snapshot = ViewState::compute(&chrono::Local::now(), City::Oulu, true);
        let mut buffer = Vec::new();
        draw(&mut buffer, &snapshot, &RenderOptions::default()).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Oulu"));
        assert!(text.contains("[q] quit"));
    }
}
