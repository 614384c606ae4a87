use std::io::{self, Write};
use crate::InterpreterError;

/// Show this many program bytes either side of the failing instruction.
const WINDOW_BYTES: usize = 32;

/// Pretty-print a structured InterpreterError with caret positioning.
/// If `program` is `Some("bf")`, prefix messages with "bf: ..."
/// An interrupted run prints only the abort notice, since no instruction failed.
pub fn print_run_error(program: Option<&str>, code: &[u8], err: &InterpreterError) {
    let msg = match program {
        Some(p) => format!("{p}: {}", headline(err)),
        None => headline(err),
    };

    match err.ip() {
        Some(ip) => print_error_with_context(&msg, code, ip),
        None => {
            eprintln!("{msg}");
            let _ = io::stderr().flush();
        }
    }
}

/// One-line summary of `err`, without the instruction position.
fn headline(err: &InterpreterError) -> String {
    match err {
        InterpreterError::OutOfBounds { cursor, op, .. } => {
            format!("Runtime error: pointer out of bounds (ptr={cursor}, op={op})")
        }
        InterpreterError::UnmatchedBracket { kind, .. } => {
            format!("Runtime error: unmatched bracket {kind}")
        }
        InterpreterError::Output { source, .. } => format!("I/O error: {source}"),
        InterpreterError::Interrupted => "aborted".to_string(),
    }
}

/// Print a concise error with instruction index and a caret context window.
pub fn print_error_with_context(prefix: &str, code: &[u8], pos: usize) {
    eprintln!("{prefix} at instruction {pos}");

    let (window, caret) = context_window(code, pos);
    eprintln!("  {window}");
    eprintln!("  {caret}");
    let _ = io::stderr().flush();
}

/// Render the bytes around `pos` on one line, plus a caret line pointing at `pos`.
/// Bytes that would break the line (newlines, control and non-ASCII bytes) show as spaces.
fn context_window(code: &[u8], pos: usize) -> (String, String) {
    let start = pos.saturating_sub(WINDOW_BYTES);
    let end = (pos + WINDOW_BYTES + 1).min(code.len());

    let window: String = code
        .get(start..end)
        .unwrap_or_default()
        .iter()
        .map(|&b| if b.is_ascii_graphic() { b as char } else { ' ' })
        .collect();

    let mut caret = " ".repeat(pos.saturating_sub(start));
    caret.push('^');
    (window, caret)
}
