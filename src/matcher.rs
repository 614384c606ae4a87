//! Runtime bracket matching by nesting-depth scan.
//!
//! Pairs are never cached: every taken jump re-scans the program from the
//! bracket being executed. An unbalanced program is therefore only rejected
//! when execution actually reaches a jump that cannot be resolved.

use std::fmt;

use crate::program::Program;

/// Which side of the loop was left without a partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedBracketKind {
    Open,
    Close,
}

impl fmt::Display for UnmatchedBracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedBracketKind::Open => write!(f, "'['"),
            UnmatchedBracketKind::Close => write!(f, "']'"),
        }
    }
}

/// Find the `]` matching the `[` at `ip - 1` and return the index just past it.
///
/// `ip` is the instruction cursor after the `[` was fetched.
pub fn seek_forward(program: &Program, ip: usize) -> Result<usize, UnmatchedBracketKind> {
    debug_assert!(ip > 0 && program.byte_at(ip - 1) == b'[');
    let mut pos = ip - 1;
    let mut depth = 1usize;
    while depth > 0 {
        if pos + 1 >= program.len() {
            return Err(UnmatchedBracketKind::Open);
        }
        pos += 1;
        match program.byte_at(pos) {
            b'[' => depth += 1,
            b']' => depth -= 1,
            _ => {}
        }
    }
    Ok(pos + 1)
}

/// Find the `[` matching the `]` at `ip - 1` and return the index just past it.
///
/// `ip` is the instruction cursor after the `]` was fetched.
pub fn seek_backward(program: &Program, ip: usize) -> Result<usize, UnmatchedBracketKind> {
    debug_assert!(ip > 0 && program.byte_at(ip - 1) == b']');
    let mut pos = ip - 1;
    let mut depth = 1usize;
    while depth > 0 {
        if pos == 0 {
            return Err(UnmatchedBracketKind::Close);
        }
        pos -= 1;
        match program.byte_at(pos) {
            b']' => depth += 1,
            b'[' => depth -= 1,
            _ => {}
        }
    }
    Ok(pos + 1)
}
