//! A direct Brainfuck interpreter over a fixed-size byte tape.
//!
//! This crate runs program text as-is, one byte per instruction, against a
//! memory tape (default 30,000 cells) with a single data pointer.
//!
//! Features and behaviors:
//! - Memory tape initialized to 0; cells wrap at 255 -> 0 and 0 -> 255.
//! - Strict pointer bounds: moving left from cell 0 or right past the end
//!   returns an error.
//! - Input `,` reads a single byte; on EOF (or a read error) the current cell
//!   is left unchanged.
//! - Output `.` writes the byte at the current cell.
//! - Loops are matched at runtime by scanning for the partner bracket, so an
//!   unmatched bracket is only reported when execution reaches it.
//! - Any byte outside `><+-.,[]` is ignored.
//!
//! Quick start:
//!
//! ```
//! use tapeworm::{Interpreter, Program, Tape};
//!
//! // Classic "Hello World!" in Brainfuck
//! let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
//! let mut bf = Interpreter::new(Program::from(code), Tape::new(), std::io::empty(), Vec::new());
//! bf.run().expect("program should run");
//! assert_eq!(bf.into_output(), b"Hello World!\n");
//! ```

pub mod cli_util;
pub mod config;
pub mod interpreter;
pub mod matcher;
pub mod program;
pub mod tape;

pub use config::Config;
pub use interpreter::{CancelFlag, Interpreter, InterpreterError, StdioInterpreter, Step};
pub use matcher::UnmatchedBracketKind;
pub use program::{LoadError, Opcode, Program};
pub use tape::{CursorOutOfBounds, DEFAULT_TAPE_SIZE, Tape};
