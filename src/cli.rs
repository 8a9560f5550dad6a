use std::ffi::OsString;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use clap::Parser;

use crate::config::{ColorMode, Overrides, Settings};
use crate::diagnostics::Diagnostics;
use crate::engine::Engine;
use crate::error::RuntimeError;
use crate::program::Program;

#[derive(Parser, Debug)]
#[command(name = "bf", disable_help_flag = true)]
pub struct Cli {
    /// Suppress progress lines on stderr (fallback BF_QUIET)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Print a step-by-step table of executed instructions to stderr (fallback BF_TRACE)
    #[arg(short = 't', long = "trace")]
    pub trace: bool,

    /// Colour error messages: auto, always or never (fallback BF_COLOR)
    #[arg(long = "color", value_enum, value_name = "WHEN")]
    pub color: Option<ColorMode>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,

    /// Program file to run
    #[arg(value_name = "file", allow_hyphen_values = true)]
    pub file: Option<PathBuf>,

    /// Anything after the program file is ignored
    #[arg(value_name = "ignored", trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub rest: Vec<OsString>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            quiet: self.quiet.then_some(true),
            trace: self.trace.then_some(true),
            color: self.color,
        }
    }
}

/// What the main thread hears back first.
enum Outcome {
    Finished(Result<Duration, RuntimeError>),
    Interrupted,
    Panicked,
}

/// Parse `args` (including argv[0]) and run. Argument errors are reported and
/// exit 0, like a missing file.
pub fn run_from_args<I, T>(program_name: &str, args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => run(program_name, cli),
        Err(err) => {
            let _ = err.print();
            let _ = io::stderr().flush();
            0
        }
    }
}

/// Load and run the program named on the command line, returning the process
/// exit status.
///
/// A missing argument or unreadable file is reported but still exits 0; only
/// runtime errors exit 1.
pub fn run(program_name: &str, cli: Cli) -> i32 {
    let settings = Settings::resolve(cli.overrides());
    let mut diag = Diagnostics::stderr(&settings);

    if cli.help {
        print_help(program_name);
        return 0;
    }

    let Some(path) = cli.file else {
        diag.usage(program_name);
        return 0;
    };

    let program = match Program::load(&path) {
        Ok(program) => program,
        Err(err) => {
            diag.load_failed(&err);
            return 0;
        }
    };
    diag.loaded(program.len());

    let cancel = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel::<Outcome>();

    // The handler only raises the flag and notifies the main thread; it never
    // touches interpreter state.
    let handler_tx = tx.clone();
    let handler_cancel = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        handler_cancel.store(true, Ordering::Relaxed);
        let _ = handler_tx.send(Outcome::Interrupted);
    }) {
        diag.warn(&format!("failed to set ctrl+c handler: {e}"));
    }

    diag.running();

    let trace = settings.trace;
    let spawned = spawn_worker(tx, move || {
        let mut engine = Engine::new(program, io::stdin(), io::stdout());
        engine.set_cancel_flag(cancel);
        if trace {
            engine.set_trace(io::stderr());
        }
        engine.run()
    });
    if let Err(e) = spawned {
        diag.warn(&format!("failed to start interpreter thread: {e}"));
        return 1;
    }

    // A worker blocked on input is left behind on interrupt; the process
    // exits right after this returns.
    let outcome = rx.recv();
    let _ = io::stdout().flush();

    match outcome {
        Ok(Outcome::Finished(Ok(elapsed))) => {
            diag.done(elapsed);
            0
        }
        Ok(Outcome::Finished(Err(err))) => {
            diag.runtime_error(&err);
            err.exit_code()
        }
        Ok(Outcome::Interrupted) => {
            diag.aborted();
            0
        }
        Ok(Outcome::Panicked) | Err(_) => 1,
    }
}

/// Run `job` on its own thread and report how it ended on `tx`. A panic is
/// reported as [`Outcome::Panicked`] so the receiver never waits on a dead
/// worker.
fn spawn_worker<F>(tx: mpsc::Sender<Outcome>, job: F) -> io::Result<thread::JoinHandle<()>>
where
    F: FnOnce() -> Result<Duration, RuntimeError> + Send + 'static,
{
    thread::Builder::new().name("bf-engine".to_string()).spawn(move || {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(job)) {
            Ok(result) => Outcome::Finished(result),
            Err(_) => Outcome::Panicked,
        };
        let _ = tx.send(outcome);
    })
}

fn print_help(program: &str) {
    eprintln!(
        r#"Usage:
  {0} [--quiet|-q] [--trace|-t] [--color <WHEN>] <file>

Options:
  --quiet, -q       Suppress progress lines (loaded/running/done)
  --trace, -t       Print a step-by-step table of executed instructions to stderr
  --color <WHEN>    Colour error messages: auto, always or never
  --help,  -h       Show this help

Notes:
- Program output goes to stdout as raw bytes; everything else goes to stderr.
- Input (`,`) reads a single byte from stdin; on EOF the current cell is left unchanged.
- Bytes other than ><+-.,[] are ignored.
- Press ctrl+c to abort a running program.

Configuration:
  Settings fall back to BF_QUIET, BF_TRACE and BF_COLOR, then to the [run]
  section of bf.toml in your config directory (or the file named by BF_CONFIG).
"#,
        program
    );
    let _ = io::stderr().flush();
}
