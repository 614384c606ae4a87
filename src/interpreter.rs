//! The execution context and fetch-execute loop.
//!
//! An [`Interpreter`] owns everything a run needs: the program, the tape, the
//! instruction cursor, and the two byte streams. Handlers return `Result`s and
//! never terminate the process; the caller decides how to report a failure.

use std::io::{self, BufWriter, Read, StdinLock, StdoutLock, Write};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::{debug, trace};

use crate::matcher::{self, UnmatchedBracketKind};
use crate::program::{Opcode, Program};
use crate::tape::{CursorOutOfBounds, Tape};

/// Errors that end a run early.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    /// The data cursor attempted to move left of cell 0 or beyond the last cell.
    #[error("Pointer out of bounds at instruction {ip} (ptr={cursor}, op='{op}')")]
    OutOfBounds { ip: usize, cursor: usize, op: Opcode },

    /// A taken jump scanned off the program without closing its nesting depth.
    #[error("Unmatched bracket {kind} at instruction {ip}")]
    UnmatchedBracket { ip: usize, kind: UnmatchedBracketKind },

    /// The output stream refused a byte or a flush.
    #[error("Output error at instruction {ip}: {source}")]
    Output {
        ip: usize,
        #[source]
        source: io::Error,
    },

    /// The run was cancelled through its [`CancelFlag`].
    #[error("Execution aborted: interrupted")]
    Interrupted,
}

impl InterpreterError {
    /// Index of the instruction that failed, when there is one.
    pub fn ip(&self) -> Option<usize> {
        match self {
            InterpreterError::OutOfBounds { ip, .. }
            | InterpreterError::UnmatchedBracket { ip, .. }
            | InterpreterError::Output { ip, .. } => Some(*ip),
            InterpreterError::Interrupted => None,
        }
    }

    /// Whether the error is a runtime failure rather than a requested stop.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, InterpreterError::Interrupted)
    }
}

/// Shared flag for cooperative cancellation, checked once per step.
///
/// Also records whether the interpreter is blocked reading input, where the
/// per-step check cannot be reached until a byte arrives.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
    awaiting_input: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// True while a `,` instruction is blocked in a read. Output has been
    /// flushed by then, so the process can stop without losing bytes.
    pub fn is_awaiting_input(&self) -> bool {
        self.awaiting_input.load(Ordering::SeqCst)
    }

    fn set_awaiting_input(&self, waiting: bool) {
        self.awaiting_input.store(waiting, Ordering::SeqCst);
    }
}

/// Outcome of a single [`Interpreter::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An instruction retired; the program has more to run.
    Continue,
    /// The instruction cursor reached the end of the program.
    Halted,
}

/// Interpreter wired to the process's stdin and a buffered stdout.
pub type StdioInterpreter = Interpreter<StdinLock<'static>, BufWriter<StdoutLock<'static>>>;

/// A single execution context.
pub struct Interpreter<R, W> {
    program: Program,
    tape: Tape,
    ip: usize,
    input: R,
    output: W,
    cancel: Option<CancelFlag>,
}

impl<R: Read, W: Write> Interpreter<R, W> {
    pub fn new(program: Program, tape: Tape, input: R, output: W) -> Self {
        Self {
            program,
            tape,
            ip: 0,
            input,
            output,
            cancel: None,
        }
    }

    /// Observe `flag` between steps; once set, the run ends with
    /// [`InterpreterError::Interrupted`].
    pub fn set_cancel_flag(&mut self, flag: CancelFlag) {
        self.cancel = Some(flag);
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Index of the next instruction to fetch.
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Give back the output stream, e.g. to inspect an in-memory buffer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the program ends or an instruction fails.
    ///
    /// The output stream is flushed before returning, whatever the outcome.
    pub fn run(&mut self) -> Result<(), InterpreterError> {
        debug!(
            program_len = self.program.len(),
            tape_size = self.tape.capacity(),
            "run started"
        );

        let result = loop {
            match self.step() {
                Ok(Step::Continue) => {}
                Ok(Step::Halted) => break Ok(()),
                Err(err) => break Err(err),
            }
        };

        let flushed = self.flush();
        match &result {
            Ok(()) => debug!(ip = self.ip, "run finished"),
            Err(err) => debug!(ip = self.ip, error = %err, "run failed"),
        }
        result.and(flushed)
    }

    /// Fetch, advance, and dispatch exactly one instruction.
    pub fn step(&mut self) -> Result<Step, InterpreterError> {
        if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
            return Err(InterpreterError::Interrupted);
        }
        if self.ip >= self.program.len() {
            return Ok(Step::Halted);
        }

        let at = self.ip;
        let op = Opcode::decode(self.program.byte_at(at));
        self.ip += 1;

        match op {
            Opcode::MoveRight => self
                .tape
                .advance_cursor()
                .map_err(|e| out_of_bounds(at, op, e))?,
            Opcode::MoveLeft => self
                .tape
                .retreat_cursor()
                .map_err(|e| out_of_bounds(at, op, e))?,
            Opcode::Increment => self.tape.increment_cell(),
            Opcode::Decrement => self.tape.decrement_cell(),
            Opcode::Output => self.write_cell(at)?,
            Opcode::Input => self.read_cell(at)?,
            Opcode::OpenLoop => {
                if self.tape.read_cell() == 0 {
                    self.ip = matcher::seek_forward(&self.program, self.ip)
                        .map_err(|kind| InterpreterError::UnmatchedBracket { ip: at, kind })?;
                    trace!(from = at, to = self.ip, "skip loop");
                }
            }
            Opcode::CloseLoop => {
                if self.tape.read_cell() != 0 {
                    self.ip = matcher::seek_backward(&self.program, self.ip)
                        .map_err(|kind| InterpreterError::UnmatchedBracket { ip: at, kind })?;
                    trace!(from = at, to = self.ip, "repeat loop");
                }
            }
            Opcode::NoOp => {}
        }

        Ok(Step::Continue)
    }

    fn write_cell(&mut self, at: usize) -> Result<(), InterpreterError> {
        self.output
            .write_all(&[self.tape.read_cell()])
            .map_err(|source| InterpreterError::Output { ip: at, source })
    }

    /// Read one byte into the current cell.
    ///
    /// End of input and read errors both leave the cell as it was.
    fn read_cell(&mut self, at: usize) -> Result<(), InterpreterError> {
        // Make any pending prompt visible before blocking on input.
        self.output
            .flush()
            .map_err(|source| InterpreterError::Output { ip: at, source })?;

        // Publish the pending read before re-checking for cancellation, so a
        // concurrent `cancel` either sees the read or is seen here.
        if let Some(flag) = &self.cancel {
            flag.set_awaiting_input(true);
            if flag.is_cancelled() {
                flag.set_awaiting_input(false);
                return Ok(());
            }
        }
        let mut buf = [0u8; 1];
        let read = self.input.read(&mut buf);
        if let Some(flag) = &self.cancel {
            flag.set_awaiting_input(false);
        }

        match read {
            Ok(0) => trace!(ip = at, "end of input"),
            Ok(_) => self.tape.write_cell(buf[0]),
            Err(err) => trace!(ip = at, error = %err, "input read failed"),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), InterpreterError> {
        self.output
            .flush()
            .map_err(|source| InterpreterError::Output { ip: self.ip, source })
    }
}

impl StdioInterpreter {
    /// Build an interpreter reading from stdin and writing to stdout.
    pub fn stdio(program: Program, tape: Tape) -> Self {
        Self::new(
            program,
            tape,
            io::stdin().lock(),
            BufWriter::new(io::stdout().lock()),
        )
    }
}

fn out_of_bounds(ip: usize, op: Opcode, err: CursorOutOfBounds) -> InterpreterError {
    InterpreterError::OutOfBounds {
        ip,
        cursor: err.cursor,
        op,
    }
}
