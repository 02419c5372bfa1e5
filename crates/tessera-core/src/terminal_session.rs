#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! [`TerminalSession`] owns raw-mode entry/exit and restores the terminal on
//! drop, on panic (via a hook), and on SIGINT/SIGTERM (unix). Everything the
//! drawing layer needs from the physical terminal goes through it: the screen
//! size, cursor visibility, and input polling.
//!
//! # Cleanup Order
//!
//! On drop, cleanup happens in reverse order of enabling:
//! 1. Show cursor (always)
//! 2. Leave alternate screen (if enabled)
//! 3. Exit raw mode (always)
//! 4. Flush stdout
//!
//! # Usage
//!
//! ```no_run
//! use tessera_core::terminal_session::{SessionOptions, TerminalSession};
//!
//! let session = TerminalSession::new(SessionOptions::from_env())?;
//! let (cols, rows) = session.size()?;
//! // ... build a layout for (rows, cols), draw, read events ...
//! // Terminal restored when `session` is dropped.
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use crate::event::Event;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Cursor visibility levels, in the classic curses numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorVisibility {
    /// Cursor hidden.
    Hidden,
    /// Normal cursor (underline on most terminals).
    #[default]
    Visible,
    /// Very visible cursor (steady block).
    Block,
}

impl CursorVisibility {
    /// Map a curses-style level (0, 1, 2). Out-of-range levels clamp to `Block`.
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        match level {
            0 => Self::Hidden,
            1 => Self::Visible,
            _ => Self::Block,
        }
    }
}

/// Terminal session configuration options.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tessera_core::terminal_session::SessionOptions;
///
/// let opts = SessionOptions {
///     alternate_screen: true,
///     poll_timeout: Some(Duration::from_millis(100)),
///     ..Default::default()
/// };
/// assert!(!opts.hide_cursor);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Switch to the alternate screen buffer, preserving scrollback.
    pub alternate_screen: bool,

    /// Hide the cursor for the lifetime of the session.
    pub hide_cursor: bool,

    /// How long [`TerminalSession::next_event`] waits for input.
    ///
    /// `None` blocks indefinitely; `Some(Duration::ZERO)` never blocks.
    pub poll_timeout: Option<Duration>,
}

impl SessionOptions {
    /// Full-screen defaults overlaid with `TESSERA_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Full-screen defaults overlaid with values from `lookup`.
    ///
    /// | Variable              | Meaning                                   |
    /// |-----------------------|-------------------------------------------|
    /// | `TESSERA_ALT_SCREEN`  | `0`/`false` keeps the primary screen      |
    /// | `TESSERA_HIDE_CURSOR` | `1`/`true` hides the cursor               |
    /// | `TESSERA_POLL_MS`     | input timeout in ms; negative blocks      |
    ///
    /// Unparseable values are ignored.
    #[must_use]
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut opts = Self {
            alternate_screen: true,
            ..Self::default()
        };
        opts.apply_env(lookup);
        opts
    }

    /// Overwrite the fields whose variable `lookup` finds, leaving the rest
    /// as they are. `TESSERA_HIDE_CURSOR=0` therefore shows the cursor even
    /// when `self` hides it.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(flag) = lookup("TESSERA_ALT_SCREEN").as_deref().and_then(parse_flag) {
            self.alternate_screen = flag;
        }
        if let Some(flag) = lookup("TESSERA_HIDE_CURSOR").as_deref().and_then(parse_flag) {
            self.hide_cursor = flag;
        }
        if let Some(ms) = lookup("TESSERA_POLL_MS").and_then(|v| v.trim().parse::<i64>().ok()) {
            self.poll_timeout = u64::try_from(ms).ok().map(Duration::from_millis);
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// A terminal session that manages raw mode and cleanup.
///
/// Only one session should exist at a time. Creating a session enters raw
/// mode; dropping it restores the terminal.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    alternate_screen_enabled: bool,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl TerminalSession {
    /// Enter raw mode and apply `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled or the terminal rejects
    /// one of the requested modes.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode()?;
        crate::info!("terminal raw mode enabled");

        let mut session = Self {
            options: options.clone(),
            alternate_screen_enabled: false,
            #[cfg(unix)]
            signal_guard: Some(SignalGuard::new()?),
        };

        let mut stdout = io::stdout();

        if options.alternate_screen {
            crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
            session.alternate_screen_enabled = true;
            crate::info!("alternate screen enabled");
        }

        if options.hide_cursor {
            session.set_cursor_visibility(CursorVisibility::Hidden)?;
        }

        Ok(session)
    }

    /// Terminal size as `(columns, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Change cursor visibility.
    pub fn set_cursor_visibility(&self, visibility: CursorVisibility) -> io::Result<()> {
        let mut stdout = io::stdout();
        match visibility {
            CursorVisibility::Hidden => crossterm::execute!(stdout, crossterm::cursor::Hide),
            CursorVisibility::Visible => crossterm::execute!(
                stdout,
                crossterm::cursor::Show,
                crossterm::cursor::SetCursorStyle::DefaultUserShape
            ),
            CursorVisibility::Block => crossterm::execute!(
                stdout,
                crossterm::cursor::Show,
                crossterm::cursor::SetCursorStyle::SteadyBlock
            ),
        }
    }

    /// Move the physical cursor to absolute `(y, x)`.
    pub fn move_cursor(&self, y: u16, x: u16) -> io::Result<()> {
        crossterm::execute!(io::stdout(), crossterm::cursor::MoveTo(x, y))
    }

    /// Poll for an event with a timeout.
    ///
    /// Returns `Ok(true)` if an event is available, `Ok(false)` on timeout.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    /// Read the next event, blocking until one is available.
    ///
    /// Returns `Ok(None)` for events we don't model.
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        let event = crossterm::event::read()?;
        Ok(Event::from_crossterm(event))
    }

    /// Wait for the next event according to [`SessionOptions::poll_timeout`].
    ///
    /// Returns `Ok(None)` when the timeout elapses without input.
    pub fn next_event(&self) -> io::Result<Option<Event>> {
        if let Some(timeout) = self.options.poll_timeout
            && !self.poll_event(timeout)?
        {
            return Ok(None);
        }
        self.read_event()
    }

    /// Get the session options.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    fn cleanup(&mut self) {
        #[cfg(unix)]
        let _ = self.signal_guard.take();

        let mut stdout = io::stdout();

        // Always show cursor before leaving
        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);

        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
            crate::info!("alternate screen disabled");
        }

        // Exit raw mode last
        let _ = crossterm::terminal::disable_raw_mode();
        crate::info!("terminal raw mode disabled");

        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();

    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                crate::warn!(signal, "termination signal received, cleaning up");
                best_effort_cleanup();
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
