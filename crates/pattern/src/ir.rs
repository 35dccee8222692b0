//! Compiled pattern instructions
//!
//! A pattern compiles to a flat program of instructions. Control-flow
//! instructions carry pc-relative offsets so compiled blocks can be
//! concatenated without patching.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    /// Match one literal character.
    Char(char),
    /// Match any single character.
    AnyChar,
    /// Match only at the start of the text.
    Start,
    /// Match only at the end of the text.
    End,
    /// Match one decimal digit.
    Digit,
    /// Match one word character: alphanumeric or '_'.
    Word,
    /// Match one character against a set, or against its complement.
    Class { negated: bool, chars: HashSet<char> },
    /// Try the branch at the first offset, then backtrack to the second.
    Split(isize, isize),
    /// Continue at a pc-relative offset.
    Jump(isize),
    /// Record where capture group `n` begins.
    GroupStart(usize),
    /// Record where capture group `n` ends.
    GroupEnd(usize),
    /// Match the text most recently captured by group `n`.
    Backref(usize),
    /// Accept.
    Match,
}
