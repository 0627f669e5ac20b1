//! Interactive widget.
//!
//! Clock ticks and stdin lines are multiplexed on one current-thread
//! runtime, so every engine call runs to completion before the next event.

use std::io::{IsTerminal, Write};

use clap::Args;
use pomocute_core::error::Result;
use pomocute_core::{
    Alarm, Config, Event, Persistence, SqliteStore, TimerEngine, TokioClock,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::alarm;
use crate::intent::{self, Intent};
use crate::render::Widget;

#[derive(Args)]
pub struct RunArgs {
    /// Disable ANSI colours
    #[arg(long)]
    pub no_color: bool,
    /// Start the countdown immediately
    #[arg(long)]
    pub start: bool,
}

type LiveEngine = TimerEngine<SqliteStore, TokioClock, Box<dyn Alarm>>;

pub fn run(args: RunArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_loop(args))
}

async fn run_loop(args: RunArgs) -> Result<()> {
    let config = Config::load_or_default();
    let store = SqliteStore::open()?;
    let (clock, mut ticks) = TokioClock::new();
    let mut engine: LiveEngine =
        TimerEngine::new(Persistence::new(store), clock, alarm::from_config(&config.alarm));

    let tty = std::io::stdout().is_terminal();
    let screen = Screen {
        widget: Widget::new(config.ui.clone(), tty && !args.no_color),
        tty,
    };
    info!("interactive timer started");

    screen.say(intent::HELP);
    if args.start {
        engine.start();
    }
    screen.status(&engine);

    // Raw bytes so a line that is not UTF-8 becomes an unknown command
    // instead of a read error.
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut pending = Vec::new();
    loop {
        tokio::select! {
            Some(token) = ticks.recv() => {
                if let Some(event) = engine.tick(token) {
                    screen.event(&event);
                    screen.status(&engine);
                }
            }
            read = stdin.read_until(b'\n', &mut pending) => {
                if read? == 0 && pending.is_empty() {
                    break;
                }
                let line = String::from_utf8_lossy(&pending).into_owned();
                pending.clear();
                if !handle_line(&mut engine, &screen, &line) {
                    break;
                }
                screen.status(&engine);
            }
        }
    }

    engine.pause();
    if screen.tty {
        println!();
    }
    info!("interactive timer stopped");
    Ok(())
}

/// Apply one line of input. Returns false on quit.
fn handle_line(engine: &mut LiveEngine, screen: &Screen, line: &str) -> bool {
    let event = match intent::parse(line) {
        Intent::Toggle => engine.toggle(),
        Intent::Start => engine.start(),
        Intent::Pause => engine.pause(),
        Intent::Reset => Some(engine.reset()),
        Intent::Skip => Some(engine.skip()),
        Intent::SaveSettings(form) => match form.parse() {
            Ok(settings) => match engine.apply_settings(settings) {
                Ok(event) => Some(event),
                Err(e) => {
                    screen.say(&format!("settings not saved: {e}"));
                    None
                }
            },
            Err(e) => {
                screen.say(&format!("settings not saved: {e}"));
                None
            }
        },
        Intent::OpenSettings => {
            let s = engine.settings();
            screen.say(&format!(
                "focus {} min, break {} min -- use: set <focus_min> <break_min>",
                s.focus_minutes(),
                s.break_minutes()
            ));
            None
        }
        Intent::ToggleTheme => {
            let theme = engine.toggle_theme();
            screen.say(&format!("theme: {theme}"));
            None
        }
        Intent::Help => {
            screen.say(intent::HELP);
            None
        }
        Intent::Quit => return false,
        Intent::Unknown(input) => {
            screen.say(&format!("unknown command '{input}' (h for help)"));
            None
        }
    };
    if let Some(event) = event {
        screen.event(&event);
    }
    true
}

struct Screen {
    widget: Widget,
    /// Redraw the status line in place instead of appending lines.
    tty: bool,
}

impl Screen {
    fn status(&self, engine: &LiveEngine) {
        let line = self.widget.line(&engine.snapshot());
        if self.tty {
            print!("\r\x1b[2K{line}");
            let _ = std::io::stdout().flush();
        } else {
            println!("{line}");
        }
    }

    fn say(&self, message: &str) {
        if self.tty {
            print!("\r\x1b[2K");
        }
        println!("{message}");
    }

    fn event(&self, event: &Event) {
        match event {
            Event::TimerTicked { .. } => {}
            Event::TimerCompleted {
                completed, next, ..
            } => {
                self.say(&format!(
                    "{} finished, up next: {}",
                    completed.label(),
                    next.label()
                ));
            }
            other => debug!(?other, "timer event"),
        }
    }
}
