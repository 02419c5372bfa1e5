#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Session settings start from `TESSERA_*` environment variables and are
//! overridden by explicit flags.

use std::env;
use std::process;
use std::time::Duration;

use tessera::SessionOptions;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Tessera Demo: anchored windows that follow the terminal size

USAGE:
    tessera-demo [OPTIONS]

OPTIONS:
    --no-alt-screen      Draw on the primary screen
    --poll-ms=N          Input poll timeout in milliseconds
    --exit-after-ms=N    Quit after N milliseconds (for testing)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Tab / Shift-Tab      Move focus between menus
    Up / Down            Move the selection
    x / Space / Enter    Toggle the selected check box
    q / Esc / Ctrl+C     Quit

ENVIRONMENT VARIABLES:
    TESSERA_ALT_SCREEN   0 keeps the primary screen
    TESSERA_HIDE_CURSOR  1 hides the cursor
    TESSERA_POLL_MS      Input poll timeout in milliseconds
    TESSERA_LOG          Log filter (with the tracing-json feature)";

/// Poll interval used when only an exit deadline asks for one.
const DEADLINE_POLL: Duration = Duration::from_millis(50);

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Terminal session settings.
    pub session: SessionOptions,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            session: SessionOptions {
                alternate_screen: true,
                hide_cursor: true,
                poll_timeout: None,
            },
            exit_after_ms: 0,
        }
    }
}

/// What the argument list asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse process arguments and environment, exiting on `--help`,
    /// `--version` or a bad argument.
    pub fn parse() -> Self {
        let base = Self::from_env_with(|key| env::var(key).ok());

        match Self::parse_from(base, env::args().skip(1)) {
            Ok(Parsed::Run(opts)) => opts,
            Ok(Parsed::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Parsed::Version) => {
                println!("tessera-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Demo defaults overlaid with whichever `TESSERA_*` variables `lookup`
    /// finds.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut opts = Self::default();
        opts.session.apply_env(lookup);
        opts
    }

    /// Apply `args` on top of `base`.
    ///
    /// # Errors
    ///
    /// A message naming the offending argument.
    pub fn parse_from(
        mut base: Self,
        args: impl IntoIterator<Item = String>,
    ) -> Result<Parsed, String> {
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Parsed::Help),
                "--version" | "-V" => return Ok(Parsed::Version),
                "--no-alt-screen" => base.session.alternate_screen = false,
                other => {
                    if let Some(val) = other.strip_prefix("--poll-ms=") {
                        let ms: u64 = val
                            .parse()
                            .map_err(|_| format!("Invalid --poll-ms value: {val}"))?;
                        base.session.poll_timeout = Some(Duration::from_millis(ms));
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        base.exit_after_ms = val
                            .parse()
                            .map_err(|_| format!("Invalid --exit-after-ms value: {val}"))?;
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        if base.exit_after_ms > 0 && base.session.poll_timeout.is_none() {
            base.session.poll_timeout = Some(DEADLINE_POLL);
        }
        Ok(Parsed::Run(base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Parsed, String> {
        Opts::parse_from(Opts::default(), args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert!(opts.session.alternate_screen);
        assert!(opts.session.hide_cursor);
        assert_eq!(opts.session.poll_timeout, None);
        assert_eq!(opts.exit_after_ms, 0);
    }

    #[test]
    fn flags_override() {
        let Ok(Parsed::Run(opts)) = parse(&["--no-alt-screen", "--poll-ms=25"]) else {
            panic!("expected run");
        };
        assert!(!opts.session.alternate_screen);
        assert_eq!(opts.session.poll_timeout, Some(Duration::from_millis(25)));
    }

    #[test]
    fn exit_deadline_implies_polling() {
        let Ok(Parsed::Run(opts)) = parse(&["--exit-after-ms=500"]) else {
            panic!("expected run");
        };
        assert_eq!(opts.exit_after_ms, 500);
        assert_eq!(opts.session.poll_timeout, Some(DEADLINE_POLL));
    }

    #[test]
    fn env_can_show_the_cursor() {
        let shown = Opts::from_env_with(|key| (key == "TESSERA_HIDE_CURSOR").then(|| "0".into()));
        assert!(!shown.session.hide_cursor);
        assert!(shown.session.alternate_screen);

        let unset = Opts::from_env_with(|_| None);
        assert_eq!(unset, Opts::default());
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse(&["-h"]), Ok(Parsed::Help));
        assert_eq!(parse(&["--version"]), Ok(Parsed::Version));
    }

    #[test]
    fn bad_arguments_rejected() {
        assert_eq!(
            parse(&["--poll-ms=soon"]),
            Err("Invalid --poll-ms value: soon".to_string())
        );
        assert_eq!(
            parse(&["--frobnicate"]),
            Err("Unknown argument: --frobnicate".to_string())
        );
    }

    #[test]
    fn help_text_lists_keys() {
        assert!(HELP_TEXT.contains("Tab / Shift-Tab"));
        assert!(!VERSION.is_empty());
    }
}
