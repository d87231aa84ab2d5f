//! Line-oriented command interpreter driving a [`ProbeTable`].
//!
//! Input is a stream of whitespace-separated `(op, key)` pairs where `op` is
//! one of `?` (contains), `+` (insert) or `-` (delete). Each executed command
//! writes a single `OK` or `FAIL` line. The op may be glued to its key
//! (`+abc`) or separated from it by any ASCII whitespace, including
//! newlines. Input is read as raw bytes; a pair that is not UTF-8 is skipped
//! like an unknown op.

use crate::probe_table::ProbeTable;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::str::{self, Utf8Error};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    UnknownOp(char),
    #[error("command is not valid UTF-8: {0}")]
    NotUtf8(#[source] Utf8Error),
    #[error("failed to read commands: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write result: {0}")]
    Write(#[source] io::Error),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Op {
    Contains,
    Insert,
    Delete,
}

impl TryFrom<char> for Op {
    type Error = CommandError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '?' => Ok(Op::Contains),
            '+' => Ok(Op::Insert),
            '-' => Ok(Op::Delete),
            other => Err(CommandError::UnknownOp(other)),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Command {
    pub op: Op,
    pub key: String,
}

impl Command {
    pub fn apply(self, table: &mut ProbeTable) -> bool {
        match self.op {
            Op::Contains => table.contains(&self.key),
            Op::Insert => table.insert(self.key),
            Op::Delete => table.delete(&self.key),
        }
    }
}

/// Counts reported by [`run`] once input is exhausted.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub executed: usize,
    pub skipped: usize,
}

/// Token separators: the ASCII whitespace set of C's `isspace`. Unicode
/// spaces are part of a key.
#[inline]
fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

/// Undecoded `(op, key)` pair as split from the input bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
struct RawPair {
    op: Vec<u8>,
    key: Vec<u8>,
}

impl RawPair {
    fn parse(&self) -> Result<Command, CommandError> {
        let op = str::from_utf8(&self.op).map_err(CommandError::NotUtf8)?;
        // `split_op` guarantees exactly one char when the bytes decode.
        let op = op
            .chars()
            .next()
            .map_or(Err(CommandError::UnknownOp('\0')), Op::try_from)?;
        let key = str::from_utf8(&self.key).map_err(CommandError::NotUtf8)?;
        Ok(Command {
            op,
            key: key.to_owned(),
        })
    }
}

/// Split a token into its leading character and the rest. The leading
/// character is one UTF-8 scalar when the token starts with one, otherwise a
/// single byte.
fn split_op(token: &[u8]) -> (&[u8], &[u8]) {
    let valid = match str::from_utf8(token) {
        Ok(s) => s,
        Err(e) => str::from_utf8(&token[..e.valid_up_to()]).unwrap_or_default(),
    };
    let width = valid.chars().next().map_or(1, char::len_utf8);
    token.split_at(width.min(token.len()))
}

/// Whitespace tokenizer over raw bytes that pulls lines from `input` only as
/// needed, so an interactive session sees each answer as soon as its command
/// is complete.
struct Tokens<R> {
    input: R,
    pending: VecDeque<Vec<u8>>,
    line: Vec<u8>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
            line: Vec::new(),
        }
    }

    fn next_token(&mut self) -> Result<Option<Vec<u8>>, CommandError> {
        while self.pending.is_empty() {
            self.line.clear();
            let n = self
                .input
                .read_until(b'\n', &mut self.line)
                .map_err(CommandError::Read)?;
            if n == 0 {
                return Ok(None);
            }
            self.pending.extend(
                self.line
                    .split(|&b| is_separator(b))
                    .filter(|t| !t.is_empty())
                    .map(<[u8]>::to_vec),
            );
        }
        Ok(self.pending.pop_front())
    }

    /// Next `(op, key)` pair, or `None` at end of input. A trailing op with
    /// no key counts as end of input.
    fn next_pair(&mut self) -> Result<Option<RawPair>, CommandError> {
        let Some(token) = self.next_token()? else {
            return Ok(None);
        };
        let (op, rest) = split_op(&token);
        if !rest.is_empty() {
            return Ok(Some(RawPair {
                op: op.to_vec(),
                key: rest.to_vec(),
            }));
        }
        match self.next_token()? {
            Some(key) => Ok(Some(RawPair { op: token, key })),
            None => {
                debug!(
                    op = %String::from_utf8_lossy(&token),
                    "input ended after a command without a key"
                );
                Ok(None)
            }
        }
    }
}

/// Execute every command in `input` against `table`, writing one result line
/// per executed command to `output`.
///
/// Commands with an unknown op or bytes that are not UTF-8 consume their key
/// and produce no output.
pub fn run<R, W>(input: R, mut output: W, table: &mut ProbeTable) -> Result<Summary, CommandError>
where
    R: BufRead,
    W: Write,
{
    let mut tokens = Tokens::new(input);
    let mut summary = Summary::default();

    while let Some(pair) = tokens.next_pair()? {
        let command = match pair.parse() {
            Ok(command) => command,
            Err(e) => {
                warn!(key = %String::from_utf8_lossy(&pair.key), "skipping command: {e}");
                summary.skipped += 1;
                continue;
            }
        };
        let ok = command.apply(table);
        writeln!(output, "{}", if ok { "OK" } else { "FAIL" }).map_err(CommandError::Write)?;
        summary.executed += 1;
    }

    output.flush().map_err(CommandError::Write)?;
    Ok(summary)
}
