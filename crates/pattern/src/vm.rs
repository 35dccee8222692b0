//! Backtracking interpreter for compiled pattern programs
//!
//! The machine walks the instruction program recursively with a byte cursor
//! into the text. `Split` tries its first branch and falls back to the
//! second, which gives greedy quantifiers and leftmost-branch alternation.
//! Capture slots are saved and restored around group markers so a failed
//! branch never leaks a stale capture into a backreference.

use crate::ir::Inst;

pub struct Vm<'p> {
    program: &'p [Inst],
    captures: Vec<Option<(usize, usize)>>,
}

impl<'p> Vm<'p> {
    pub fn new(program: &'p [Inst], group_count: usize) -> Self {
        Self {
            program,
            captures: vec![None; group_count],
        }
    }

    /// Attempt a match with the pattern anchored at `start`.
    pub fn run(&mut self, text: &str, start: usize) -> bool {
        self.step(0, text, start)
    }

    fn step(&mut self, pc: usize, text: &str, cursor: usize) -> bool {
        let program = self.program;
        let Some(inst) = program.get(pc) else {
            return false;
        };
        match inst {
            Inst::Match => true,
            Inst::Char(ch) => self.consume(pc, text, cursor, |c| c == *ch),
            Inst::AnyChar => self.consume(pc, text, cursor, |_| true),
            Inst::Digit => self.consume(pc, text, cursor, |c| c.is_ascii_digit()),
            Inst::Word => self.consume(pc, text, cursor, |c| c.is_alphanumeric() || c == '_'),
            Inst::Class { negated, chars } => {
                self.consume(pc, text, cursor, |c| chars.contains(&c) != *negated)
            }
            Inst::Start => cursor == 0 && self.step(pc + 1, text, cursor),
            Inst::End => cursor == text.len() && self.step(pc + 1, text, cursor),
            Inst::Jump(offset) => self.jump(pc, *offset, text, cursor),
            Inst::Split(first, second) => {
                self.jump(pc, *first, text, cursor) || self.jump(pc, *second, text, cursor)
            }
            Inst::GroupStart(n) => {
                let Some(slot) = n.checked_sub(1) else {
                    return false;
                };
                let saved = self.captures.get(slot).copied().flatten();
                if let Some(capture) = self.captures.get_mut(slot) {
                    *capture = Some((cursor, cursor));
                }
                if self.step(pc + 1, text, cursor) {
                    true
                } else {
                    if let Some(capture) = self.captures.get_mut(slot) {
                        *capture = saved;
                    }
                    false
                }
            }
            Inst::GroupEnd(n) => {
                let Some(slot) = n.checked_sub(1) else {
                    return false;
                };
                let saved = self.captures.get(slot).copied().flatten();
                if let Some(Some((_, end))) = self.captures.get_mut(slot) {
                    *end = cursor;
                }
                if self.step(pc + 1, text, cursor) {
                    true
                } else {
                    if let Some(capture) = self.captures.get_mut(slot) {
                        *capture = saved;
                    }
                    false
                }
            }
            Inst::Backref(n) => match n
                .checked_sub(1)
                .and_then(|slot| self.captures.get(slot))
                .copied()
                .flatten()
            {
                Some((start, end)) => {
                    let captured = text.get(start..end).unwrap_or("");
                    let matches = text
                        .get(cursor..)
                        .is_some_and(|rest| rest.starts_with(captured));
                    matches && self.step(pc + 1, text, cursor + captured.len())
                }
                None => false,
            },
        }
    }

    fn consume(
        &mut self,
        pc: usize,
        text: &str,
        cursor: usize,
        accepts: impl Fn(char) -> bool,
    ) -> bool {
        match text.get(cursor..).and_then(|rest| rest.chars().next()) {
            Some(c) if accepts(c) => self.step(pc + 1, text, cursor + c.len_utf8()),
            _ => false,
        }
    }

    fn jump(&mut self, pc: usize, offset: isize, text: &str, cursor: usize) -> bool {
        match pc.checked_add_signed(offset) {
            Some(target) => self.step(target, text, cursor),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backreference_to_inner_group() {
        let program = vec![
            Inst::GroupStart(1),
            Inst::Char('f'),
            Inst::Char('o'),
            Inst::Char('o'),
            Inst::GroupStart(2),
            Inst::Char('m'),
            Inst::Char('n'),
            Inst::GroupEnd(2),
            Inst::GroupEnd(1),
            Inst::Char('b'),
            Inst::Char('a'),
            Inst::Char('r'),
            Inst::Backref(2),
            Inst::Digit,
            Inst::Match,
        ];

        let mut vm = Vm::new(&program, 2);
        assert!(vm.run("foomnbarmn8", 0));
    }

    #[test]
    fn test_backreference_tracks_taken_branch() {
        // (foo|bar)-\1 followed by a digit
        let program = vec![
            Inst::GroupStart(1),
            Inst::Split(1, 5),
            Inst::Char('f'),
            Inst::Char('o'),
            Inst::Char('o'),
            Inst::Jump(4),
            Inst::Char('b'),
            Inst::Char('a'),
            Inst::Char('r'),
            Inst::GroupEnd(1),
            Inst::Char('-'),
            Inst::Backref(1),
            Inst::Digit,
            Inst::Match,
        ];

        assert!(Vm::new(&program, 1).run("foo-foo8", 0));
        assert!(Vm::new(&program, 1).run("bar-bar8", 0));
        assert!(!Vm::new(&program, 1).run("foo-bar8", 0));
    }

    #[test]
    fn test_unset_backreference_never_matches() {
        let program = vec![Inst::Backref(1), Inst::Match];
        assert!(!Vm::new(&program, 1).run("anything", 0));
    }

    #[test]
    fn test_out_of_range_jump_fails_instead_of_panicking() {
        let program = vec![Inst::Jump(-5), Inst::Match];
        assert!(!Vm::new(&program, 0).run("x", 0));
    }
}
