//! Loaded program text and the byte-to-opcode mapping.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// The program file could not be read.
#[derive(Debug, thiserror::Error)]
#[error("could not open {}: {source}", .path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// One of the nine effects a program byte can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    MoveRight,
    MoveLeft,
    Increment,
    Decrement,
    Output,
    Input,
    OpenLoop,
    CloseLoop,
    NoOp,
}

impl Opcode {
    /// Map a program byte to its effect. Anything outside `><+-.,[]` is a no-op.
    pub fn decode(byte: u8) -> Self {
        match byte {
            b'>' => Opcode::MoveRight,
            b'<' => Opcode::MoveLeft,
            b'+' => Opcode::Increment,
            b'-' => Opcode::Decrement,
            b'.' => Opcode::Output,
            b',' => Opcode::Input,
            b'[' => Opcode::OpenLoop,
            b']' => Opcode::CloseLoop,
            _ => Opcode::NoOp,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Opcode::MoveRight => '>',
            Opcode::MoveLeft => '<',
            Opcode::Increment => '+',
            Opcode::Decrement => '-',
            Opcode::Output => '.',
            Opcode::Input => ',',
            Opcode::OpenLoop => '[',
            Opcode::CloseLoop => ']',
            Opcode::NoOp => return write!(f, "no-op"),
        };
        write!(f, "{ch}")
    }
}

/// Immutable program bytes, kept exactly as loaded.
///
/// No validation happens here: comments, whitespace and stray bytes are kept
/// and later decode to [`Opcode::NoOp`]. Bracket pairing is never computed up
/// front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    bytes: Box<[u8]>,
}

impl Program {
    pub fn load(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into().into_boxed_slice(),
        }
    }

    /// Read the whole file at `path` as program bytes.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LoadError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), size = bytes.len(), "loaded program");
        Ok(Self::load(bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Byte at `index`. Callers keep `index < len()`.
    pub fn byte_at(&self, index: usize) -> u8 {
        self.bytes[index]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&str> for Program {
    fn from(code: &str) -> Self {
        Self::load(code.as_bytes())
    }
}

impl From<Vec<u8>> for Program {
    fn from(bytes: Vec<u8>) -> Self {
        Self::load(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_preserves_order_and_length() {
        let raw = b"+ comment\n[-]\xff".to_vec();
        let program = Program::load(raw.clone());
        assert_eq!(program.len(), raw.len());
        assert_eq!(program.as_bytes(), raw.as_slice());
        assert_eq!(program.byte_at(0), b'+');
        assert_eq!(program.byte_at(raw.len() - 1), 0xff);
    }

    #[test]
    fn from_file_reads_raw_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prog.bf");
        fs::write(&path, b"+\x00+").unwrap();
        let program = Program::from_file(&path).unwrap();
        assert_eq!(program.as_bytes(), b"+\x00+");
    }

    #[test]
    fn from_file_names_the_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bf");
        let err = Program::from_file(&path).unwrap_err();
        assert_eq!(err.path, path);
        assert!(err.to_string().starts_with(&format!("could not open {}", path.display())));
    }

    #[test]
    fn empty_program_is_empty() {
        let program = Program::load(Vec::new());
        assert!(program.is_empty());
        assert_eq!(program.len(), 0);
    }

    #[test]
    fn decodes_the_eight_opcodes() {
        let decoded: Vec<Opcode> = b"><+-.,[]".iter().copied().map(Opcode::decode).collect();
        assert_eq!(
            decoded,
            vec![
                Opcode::MoveRight,
                Opcode::MoveLeft,
                Opcode::Increment,
                Opcode::Decrement,
                Opcode::Output,
                Opcode::Input,
                Opcode::OpenLoop,
                Opcode::CloseLoop,
            ]
        );
    }

    #[test]
    fn everything_else_is_a_no_op() {
        for byte in 0..=255u8 {
            if b"><+-.,[]".contains(&byte) {
                continue;
            }
            assert_eq!(Opcode::decode(byte), Opcode::NoOp, "byte {byte:#04x}");
        }
    }

    #[test]
    fn display_round_trips_through_decode() {
        for byte in b"><+-.,[]" {
            let op = Opcode::decode(*byte);
            assert_eq!(op.to_string(), (*byte as char).to_string());
        }
        assert_eq!(Opcode::NoOp.to_string(), "no-op");
    }
}
