#![forbid(unsafe_code)]

//! Tessera demo binary entry point.

use std::io;
use std::process;
use std::time::{Duration, Instant};

use tessera_demo::app::{DemoApp, Flow};
use tessera_demo::cli;

fn main() {
    let opts = cli::Opts::parse();

    #[cfg(feature = "tracing-json")]
    tessera::core::logging::init_subscriber();

    let deadline = (opts.exit_after_ms > 0)
        .then(|| Instant::now() + Duration::from_millis(opts.exit_after_ms));

    let result = tessera::run(opts.session, |session, ws| {
        let mut app = DemoApp::new(ws)?;
        let mut out = io::stdout();
        loop {
            app.draw(ws);
            ws.present(&mut out)?;

            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Ok(());
            }
            let Some(event) = session.next_event()? else {
                continue;
            };
            if app.handle_event(ws, &event)? == Flow::Quit {
                return Ok(());
            }
        }
    });

    if let Err(e) = result {
        eprintln!("tessera-demo: {e}");
        process::exit(1);
    }
}
