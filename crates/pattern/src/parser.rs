//! Pattern parser and compiler
//!
//! Recursive-descent parser that compiles a pattern string directly into an
//! instruction program. Supported syntax: literals, `.`, `\d`, `\w`, `\\`,
//! character classes with ranges and negation, `^`/`$` anchors, the
//! quantifiers `*`, `+`, `?` and `{m}`/`{m,}`/`{m,n}`, capturing groups with
//! alternation, and backreferences `\1`..`\9`.

use std::collections::HashSet;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use crate::ir::Inst;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Unknown escape sequence '\\{0}'")]
    UnknownEscape(char),

    #[error("Pattern ends in the middle of an escape sequence")]
    UnterminatedEscape,

    #[error("Unclosed character class, missing ']'")]
    UnclosedClass,

    #[error("Unclosed group, missing ')'")]
    UnclosedGroup,

    #[error("'$' is only valid at the end of the pattern")]
    MisplacedAnchor,

    #[error("Invalid repetition count: {0}")]
    InvalidRepeat(String),
}

pub struct Parser<'p> {
    chars: Peekable<Chars<'p>>,
    next_group: usize,
}

impl<'p> Parser<'p> {
    pub fn new(pattern: &'p str) -> Self {
        Self {
            chars: pattern.chars().peekable(),
            next_group: 1,
        }
    }

    /// Compile the whole pattern. Returns the program and the number of
    /// capture groups it contains.
    pub fn compile(mut self) -> Result<(Vec<Inst>, usize), PatternError> {
        let mut program = Vec::new();
        while self.chars.peek().is_some() {
            program.extend(self.parse_term()?);
        }
        program.push(Inst::Match);
        Ok((program, self.next_group - 1))
    }

    fn parse_term(&mut self) -> Result<Vec<Inst>, PatternError> {
        let block = if self.chars.peek() == Some(&'(') {
            self.parse_group()?
        } else {
            self.parse_atom()?
        };
        self.parse_quantifier(block)
    }

    /// Parse a capturing group, including any `|` alternation inside it.
    fn parse_group(&mut self) -> Result<Vec<Inst>, PatternError> {
        self.chars.next();
        let group = self.next_group;
        self.next_group += 1;

        let mut branches: Vec<Vec<Inst>> = vec![Vec::new()];
        loop {
            match self.chars.peek() {
                None => return Err(PatternError::UnclosedGroup),
                Some('|') => {
                    self.chars.next();
                    branches.push(Vec::new());
                }
                Some(')') => {
                    self.chars.next();
                    break;
                }
                Some(_) => {
                    let instrs = self.parse_term()?;
                    if let Some(branch) = branches.last_mut() {
                        branch.extend(instrs);
                    }
                }
            }
        }

        let mut program = vec![Inst::GroupStart(group)];
        program.extend(Self::emit_alternation(branches));
        program.push(Inst::GroupEnd(group));
        Ok(program)
    }

    fn parse_atom(&mut self) -> Result<Vec<Inst>, PatternError> {
        let Some(ch) = self.chars.next() else {
            return Ok(Vec::new());
        };
        let inst = match ch {
            '.' => Inst::AnyChar,
            '^' => Inst::Start,
            '$' => {
                if self.chars.peek().is_some() {
                    return Err(PatternError::MisplacedAnchor);
                }
                Inst::End
            }
            '\\' => self.parse_escape()?,
            '[' => self.parse_class()?,
            other => Inst::Char(other),
        };
        Ok(vec![inst])
    }

    fn parse_escape(&mut self) -> Result<Inst, PatternError> {
        match self.chars.next() {
            Some('d') => Ok(Inst::Digit),
            Some('w') => Ok(Inst::Word),
            Some('\\') => Ok(Inst::Char('\\')),
            Some(d @ '1'..='9') => Ok(Inst::Backref((d as u8 - b'0') as usize)),
            Some(other) => Err(PatternError::UnknownEscape(other)),
            None => Err(PatternError::UnterminatedEscape),
        }
    }

    fn parse_class(&mut self) -> Result<Inst, PatternError> {
        let mut chars = HashSet::new();
        let negated = self.chars.next_if_eq(&'^').is_some();
        loop {
            match self.chars.next() {
                None => return Err(PatternError::UnclosedClass),
                Some(']') => return Ok(Inst::Class { negated, chars }),
                Some('\\') => match self.chars.next() {
                    Some('d') => chars.extend('0'..='9'),
                    Some('w') => {
                        chars.insert('_');
                        chars.extend('0'..='9');
                        chars.extend('a'..='z');
                        chars.extend('A'..='Z');
                    }
                    Some(other) => return Err(PatternError::UnknownEscape(other)),
                    None => return Err(PatternError::UnterminatedEscape),
                },
                Some(start) if start.is_ascii_alphanumeric() => {
                    if self.chars.next_if_eq(&'-').is_none() {
                        chars.insert(start);
                    } else if let Some(end) = self.chars.next_if(|c| c.is_ascii_alphanumeric()) {
                        Self::extend_range(&mut chars, start, end);
                    } else {
                        // trailing '-' before ']' is a literal
                        chars.insert(start);
                        chars.insert('-');
                    }
                }
                Some(other) => {
                    chars.insert(other);
                }
            }
        }
    }

    fn parse_quantifier(&mut self, block: Vec<Inst>) -> Result<Vec<Inst>, PatternError> {
        let block = match self.chars.peek() {
            Some('*') => {
                self.chars.next();
                Self::emit_zero_or_more(block)
            }
            Some('+') => {
                self.chars.next();
                Self::emit_one_or_more(block)
            }
            Some('?') => {
                self.chars.next();
                Self::emit_zero_or_one(block)
            }
            Some('{') => {
                self.chars.next();
                let (min, max) = self.parse_repeat_bounds()?;
                Self::emit_repeat(block, min, max)?
            }
            _ => block,
        };
        Ok(block)
    }

    /// Parse the inside of a `{...}` quantifier up to and including `}`.
    fn parse_repeat_bounds(&mut self) -> Result<(usize, Option<usize>), PatternError> {
        let mut spec = String::new();
        loop {
            match self.chars.next() {
                Some('}') => break,
                Some(d @ ('0'..='9' | ',')) => spec.push(d),
                Some(_) | None => return Err(PatternError::InvalidRepeat(spec)),
            }
        }

        let mut bounds = spec.splitn(2, ',');
        let min = bounds
            .next()
            .filter(|m| !m.is_empty())
            .and_then(|m| m.parse::<usize>().ok())
            .ok_or_else(|| PatternError::InvalidRepeat(spec.clone()))?;
        let max = match bounds.next() {
            None => Some(min),
            Some("") => None,
            Some(m) => Some(
                m.parse::<usize>()
                    .map_err(|_| PatternError::InvalidRepeat(spec.clone()))?,
            ),
        };
        Ok((min, max))
    }

    /// Fold alternation branches into nested split/jump blocks, trying the
    /// leftmost branch first.
    fn emit_alternation(mut branches: Vec<Vec<Inst>>) -> Vec<Inst> {
        let mut program = branches.pop().unwrap_or_default();
        while let Some(mut branch) = branches.pop() {
            branch.push(Inst::Jump(program.len() as isize + 1));
            program = Self::emit_split(branch, program);
        }
        program
    }

    fn emit_split(first: Vec<Inst>, second: Vec<Inst>) -> Vec<Inst> {
        let mut program = vec![Inst::Split(1, first.len() as isize + 1)];
        program.extend(first);
        program.extend(second);
        program
    }

    fn emit_zero_or_more(block: Vec<Inst>) -> Vec<Inst> {
        let mut body = block;
        // loop back to the split in front of the body
        body.push(Inst::Jump(-(body.len() as isize) - 1));
        Self::emit_split(body, Vec::new())
    }

    fn emit_one_or_more(block: Vec<Inst>) -> Vec<Inst> {
        let mut program = block.clone();
        program.extend(Self::emit_zero_or_more(block));
        program
    }

    fn emit_zero_or_one(block: Vec<Inst>) -> Vec<Inst> {
        Self::emit_split(block, Vec::new())
    }

    fn emit_repeat(
        block: Vec<Inst>,
        min: usize,
        max: Option<usize>,
    ) -> Result<Vec<Inst>, PatternError> {
        let mut program = Vec::new();
        for _ in 0..min {
            program.extend_from_slice(&block);
        }
        match max {
            None => program.extend(Self::emit_zero_or_more(block)),
            Some(max) if max < min => {
                return Err(PatternError::InvalidRepeat(format!("{},{}", min, max)))
            }
            Some(max) => {
                let optional = Self::emit_zero_or_one(block);
                for _ in min..max {
                    program.extend_from_slice(&optional);
                }
            }
        }
        Ok(program)
    }

    fn extend_range(chars: &mut HashSet<char>, start: char, end: char) {
        let same_kind = start.is_ascii_digit() && end.is_ascii_digit()
            || start.is_ascii_lowercase() && end.is_ascii_lowercase()
            || start.is_ascii_uppercase() && end.is_ascii_uppercase();
        if same_kind && start <= end {
            chars.extend(start..=end);
        } else {
            // not a range, keep the three characters literally
            chars.extend([start, '-', end]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str) -> Vec<Inst> {
        Parser::new(pattern).compile().unwrap().0
    }

    #[test]
    fn test_literal_sequence() {
        assert_eq!(
            compile("ab"),
            vec![Inst::Char('a'), Inst::Char('b'), Inst::Match]
        );
    }

    #[test]
    fn test_zero_or_more_loops_back_to_split() {
        assert_eq!(
            compile("a*"),
            vec![
                Inst::Split(1, 3),
                Inst::Char('a'),
                Inst::Jump(-2),
                Inst::Match,
            ]
        );
    }

    #[test]
    fn test_group_brackets_with_numbered_markers() {
        let program = compile("(a)(b)");
        assert_eq!(
            program,
            vec![
                Inst::GroupStart(1),
                Inst::Char('a'),
                Inst::GroupEnd(1),
                Inst::GroupStart(2),
                Inst::Char('b'),
                Inst::GroupEnd(2),
                Inst::Match,
            ]
        );
    }

    #[test]
    fn test_alternation_tries_left_branch_first() {
        assert_eq!(
            compile("(a|b)"),
            vec![
                Inst::GroupStart(1),
                Inst::Split(1, 3),
                Inst::Char('a'),
                Inst::Jump(2),
                Inst::Char('b'),
                Inst::GroupEnd(1),
                Inst::Match,
            ]
        );
    }

    #[test]
    fn test_three_way_alternation_compiles_to_nested_splits() {
        let program = compile("(a|b|c)");
        let splits = program
            .iter()
            .filter(|inst| matches!(inst, Inst::Split(_, _)))
            .count();
        assert_eq!(splits, 2);
    }

    #[test]
    fn test_class_range_expansion() {
        match &compile("[a-c]")[0] {
            Inst::Class { negated, chars } => {
                assert!(!negated);
                assert_eq!(chars, &HashSet::from(['a', 'b', 'c']));
            }
            other => panic!("expected a class, got {:?}", other),
        }
    }

    #[test]
    fn test_class_with_trailing_dash_is_literal() {
        match &compile("[a-]")[0] {
            Inst::Class { chars, .. } => {
                assert_eq!(chars, &HashSet::from(['a', '-']));
            }
            other => panic!("expected a class, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_kind_range_kept_literal() {
        match &compile("[a-3]")[0] {
            Inst::Class { chars, .. } => {
                assert_eq!(chars, &HashSet::from(['a', '-', '3']));
            }
            other => panic!("expected a class, got {:?}", other),
        }
    }

    #[test]
    fn test_repeat_bounds() {
        let parse = |p: &str| Parser::new(p).compile();
        assert!(parse("a{2}").is_ok());
        assert!(parse("a{2,}").is_ok());
        assert!(parse("a{2,4}").is_ok());
        assert!(matches!(
            parse("a{3,2}"),
            Err(PatternError::InvalidRepeat(_))
        ));
        assert!(matches!(parse("a{x}"), Err(PatternError::InvalidRepeat(_))));
        assert!(matches!(parse("a{,2}"), Err(PatternError::InvalidRepeat(_))));
    }

    #[test]
    fn test_exact_repeat_unrolls() {
        assert_eq!(
            compile("a{3}"),
            vec![
                Inst::Char('a'),
                Inst::Char('a'),
                Inst::Char('a'),
                Inst::Match,
            ]
        );
    }

    #[test]
    fn test_unclosed_group() {
        assert!(matches!(
            Parser::new("(ab").compile(),
            Err(PatternError::UnclosedGroup)
        ));
    }

    #[test]
    fn test_unclosed_class() {
        assert!(matches!(
            Parser::new("[ab").compile(),
            Err(PatternError::UnclosedClass)
        ));
    }

    #[test]
    fn test_unknown_escape() {
        assert!(matches!(
            Parser::new(r"\q").compile(),
            Err(PatternError::UnknownEscape('q'))
        ));
    }

    #[test]
    fn test_dangling_backslash() {
        assert!(matches!(
            Parser::new("\\").compile(),
            Err(PatternError::UnterminatedEscape)
        ));
    }

    #[test]
    fn test_dollar_must_be_last() {
        assert!(matches!(
            Parser::new("a$b").compile(),
            Err(PatternError::MisplacedAnchor)
        ));
        assert!(Parser::new("ab$").compile().is_ok());
    }

    #[test]
    fn test_group_count_reported() {
        let (_, groups) = Parser::new(r"((a)b)(c)").compile().unwrap();
        assert_eq!(groups, 3);
    }
}
