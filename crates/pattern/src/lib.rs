//! shipit pattern matching engine
//!
//! A small extended-pattern matcher in three stages: a recursive-descent
//! [`parser`] compiles the pattern into a flat [`ir`] instruction program,
//! and a backtracking [`vm`] interprets that program against a text.
//!
//! Supported syntax: literal characters, `.`, the `\d`/`\w` classes,
//! character classes with ranges and `^` negation, the `^`/`$` anchors,
//! quantifiers `*`/`+`/`?`/`{m}`/`{m,}`/`{m,n}`, capturing groups with `|`
//! alternation, and backreferences `\1`..`\9`.
//!
//! ## Usage
//!
//! ```rust
//! use shipit_pattern::Pattern;
//!
//! # fn example() -> Result<(), shipit_pattern::PatternError> {
//! let pattern = Pattern::new(r"^I see \d+ (cat|dog)s?$")?;
//! assert!(pattern.is_match("I see 42 dogs"));
//! # Ok(())
//! # }
//! ```

pub mod ir;
pub mod parser;
pub mod vm;

pub use parser::PatternError;

use crate::ir::Inst;
use crate::parser::Parser;
use crate::vm::Vm;

/// A compiled pattern.
pub struct Pattern {
    program: Vec<Inst>,
    group_count: usize,
}

impl Pattern {
    /// Compile a pattern string.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let (program, group_count) = Parser::new(pattern).compile()?;
        Ok(Self {
            program,
            group_count,
        })
    }

    /// True if the pattern matches anywhere in `text`.
    ///
    /// The match is attempted at every character boundary in turn, including
    /// the end of the text, so patterns that can match the empty string
    /// match every text.
    pub fn is_match(&self, text: &str) -> bool {
        let mut cursor = 0;
        loop {
            let mut vm = Vm::new(&self.program, self.group_count);
            if vm.run(text, cursor) {
                return true;
            }
            match text.get(cursor..).and_then(|rest| rest.chars().next()) {
                Some(c) => cursor += c.len_utf8(),
                None => return false,
            }
        }
    }
}
