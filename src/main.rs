use clap::Parser;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tapeworm::cli_util::print_run_error;
use tapeworm::{CancelFlag, Config, Program, StdioInterpreter, Tape};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} [--tape-size N] [--quiet|-q] <FILE>

Options:
  --tape-size <N>  Number of tape cells (fallback BF_TAPE_SIZE, then bf.toml; default 30000)
  --quiet,  -q     Do not print the size, banner and timing lines on stderr
  --help,   -h     Show this help

Notes:
- Program output goes to stdout; diagnostics go to stderr.
- Input (`,`) reads a single byte from stdin; on EOF the current cell is left unchanged.
- Any characters outside of Brainfuck's ><+-.,[] are ignored.
- Press ctrl+c to abort a running program, including one waiting for input.

Examples:
- Run a program file:
    {0} ./hello.bf
- Feed bytes to the program's `,` instructions:
    {0} ./cat.bf < input.txt
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "bf", disable_help_flag = true)]
struct Cli {
    /// Path to the program source
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Number of tape cells
    #[arg(long = "tape-size", value_name = "N")]
    tape_size: Option<usize>,

    /// Suppress informational diagnostics
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_env("BF_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Install the ctrl+c handler. The run normally stops at the next instruction;
/// a run blocked on stdin never gets there, so the handler exits directly.
fn install_interrupt_handler(cancel: CancelFlag) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        cancel.cancel();
        // Output is flushed before every read, and stdout stays locked by the
        // interpreter, so only stderr is touched here.
        if cancel.is_awaiting_input() {
            eprintln!("\naborted");
            std::process::exit(0);
        }
    })
}

fn run(program: &str, cli: Cli) -> i32 {
    if cli.help {
        usage_and_exit(program, 0);
    }

    // A missing program is a request for help, not a failure.
    let Some(path) = cli.file else {
        usage_and_exit(program, 0);
    };

    let config = Config::resolve(cli.tape_size, cli.quiet);
    debug!(?config, "resolved configuration");

    let code = match Program::from_file(&path) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{program}: error: {err}");
            let _ = io::stderr().flush();
            return 0;
        }
    };
    if !config.quiet {
        eprintln!("loaded program, size: {}", code.len());
    }

    let cancel = CancelFlag::new();
    if let Err(err) = install_interrupt_handler(cancel.clone()) {
        warn!(error = %err, "failed to set ctrl+c handler");
    }

    if !config.quiet {
        eprintln!("running, press ctrl+c to abort, press ctrl+d for EOF");
    }

    let started = Instant::now();
    let mut bf = StdioInterpreter::stdio(code, Tape::with_capacity(config.tape_size));
    bf.set_cancel_flag(cancel);
    let result = bf.run();
    let elapsed = started.elapsed();

    match result {
        Ok(()) => {
            if !config.quiet {
                eprintln!("\ndone, took: {:.6}s", elapsed.as_secs_f64());
            }
            0
        }
        Err(err) => {
            eprintln!();
            print_run_error(Some(program), bf.program().as_bytes(), &err);
            if err.is_fatal() { 1 } else { 0 }
        }
    }
}

fn main() {
    init_tracing();

    // We still pull the program name for help rendering consistency
    let program = env::args().next().unwrap_or_else(|| String::from("bf"));

    let cli = Cli::parse();
    let code = run(&program, cli);

    std::process::exit(code);
}
