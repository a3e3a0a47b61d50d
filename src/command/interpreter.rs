use crate::clipboard::Clipboard;
use crate::command::token::{Literal, NumParam, Op, Payload, Token, tokenize};
use crate::editor::NoteBuffer;

/// Counts of what a run did with its tokens.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Literals and operators that were executed.
    pub applied: usize,
    /// Operators skipped as unknown or missing their payload.
    pub dropped: usize,
}

/// Executes tokenized commands against one buffer.
///
/// Tokens are consumed left to right in a single pass. A literal replaces
/// the whole note; an operator takes its payload from the literal right
/// after it. An operator that is unknown or lacks its payload is dropped on
/// its own and the pass goes on.
pub struct Interpreter<'a> {
    buffer: &'a mut NoteBuffer,
    clipboard: &'a mut dyn Clipboard,
}

impl<'a> Interpreter<'a> {
    pub fn new(buffer: &'a mut NoteBuffer, clipboard: &'a mut dyn Clipboard) -> Self {
        Self { buffer, clipboard }
    }

    /// Tokenize and run an argument list.
    pub fn run<S: AsRef<str>>(&mut self, args: &[S]) -> Outcome {
        self.run_tokens(&tokenize(args))
    }

    pub fn run_tokens(&mut self, tokens: &[Token]) -> Outcome {
        let mut outcome = Outcome::default();
        let mut i = 0;
        while i < tokens.len() {
            let (mnemonic, suffix) = match &tokens[i] {
                Token::Literal(literal) => {
                    self.buffer.renew(&literal.text());
                    outcome.applied += 1;
                    i += 1;
                    continue;
                }
                Token::Operator { mnemonic, suffix } => (*mnemonic, suffix),
            };

            let Some(op) = mnemonic.and_then(Op::from_mnemonic) else {
                tracing::debug!(?mnemonic, "dropping unknown operator");
                outcome.dropped += 1;
                i += 1;
                continue;
            };

            let param = NumParam::parse(suffix);
            let (applied, consumed) = match op.payload() {
                Payload::None => (self.apply(op, &param, None), 1),
                Payload::Text | Payload::Pair => {
                    match tokens.get(i + 1).and_then(Token::as_literal) {
                        Some(literal) => (self.apply(op, &param, Some(literal)), 2),
                        None => (false, 1),
                    }
                }
            };
            if applied {
                outcome.applied += 1;
                i += consumed;
            } else {
                tracing::debug!(op = ?op, "dropping operator without payload");
                outcome.dropped += 1;
                i += 1;
            }
        }
        outcome
    }

    /// Execute `op`. Returns `false` when the literal does not fit the
    /// operator, in which case nothing was done.
    fn apply(&mut self, op: Op, param: &NumParam, literal: Option<&Literal>) -> bool {
        tracing::debug!(op = ?op, ?param, "dispatch");
        let text = literal.map(Literal::text).unwrap_or_default();
        match op {
            Op::InsertChar => {
                self.buffer.move_caret_to(param.resolve(self.buffer.caret()));
                self.buffer.insert_char(&text);
            }
            Op::DeleteChar => {
                let current = self.buffer.caret().min(self.buffer.len_chars().saturating_sub(1)) + 1;
                self.buffer.delete_char(param.resolve(current));
            }
            Op::MoveCaret => self.buffer.move_caret_to(param.resolve(self.buffer.caret())),
            Op::ToWord => {
                self.target_word(param);
            }
            Op::ToLine => {
                self.target_line(param);
            }
            Op::InsertWord => {
                let n = self.target_word(param);
                self.buffer.insert_at_word(n, &text);
            }
            Op::AppendWord => {
                let n = self.target_word(param);
                self.buffer.append_after_word(n, &text);
            }
            Op::InsertLine => {
                let n = self.target_line(param);
                self.buffer.insert_at_line(n, &text);
            }
            Op::AppendLine => {
                let n = self.target_line(param);
                self.buffer.append_after_line(n, &text);
            }
            Op::NewLineBelow => {
                let n = self.target_line(param);
                self.buffer.new_line_below(n, &text);
            }
            Op::NewLineAbove => {
                let n = self.target_line(param);
                self.buffer.new_line_above(n, &text);
            }
            Op::DeleteWord => {
                let words = self.buffer.word_segments();
                for n in descending(param, self.buffer.word_at_caret(), |n| words.clamp_index(n)) {
                    self.buffer.delete_word(n);
                }
            }
            Op::DeleteLine => {
                let lines = self.buffer.line_segments();
                for n in descending(param, self.buffer.line_at_caret(), |n| lines.clamp_index(n)) {
                    self.buffer.delete_line(n);
                }
            }
            Op::ReplaceNext | Op::ReplaceAll => {
                let Some((find, replace)) = literal.and_then(Literal::split_pair) else {
                    return false;
                };
                if op == Op::ReplaceNext {
                    self.buffer.replace_first(find, &replace);
                } else {
                    self.buffer.replace_all(find, &replace);
                }
            }
            Op::Undo => {
                self.buffer.undo(param.magnitude().unwrap_or(1));
            }
            Op::Redo => {
                self.buffer.redo(param.magnitude().unwrap_or(1));
            }
            Op::Clear => self.buffer.clear(),
            Op::ClearAll => self.buffer.clear_all(),
            Op::Copy => {
                if let Err(err) = self.buffer.copy(self.clipboard) {
                    tracing::warn!(%err, "copy failed");
                }
            }
            Op::Cut => {
                if let Err(err) = self.buffer.cut(self.clipboard) {
                    tracing::warn!(%err, "cut failed");
                }
            }
        }
        true
    }

    /// Resolve the word `param` names and put the caret on it.
    fn target_word(&mut self, param: &NumParam) -> usize {
        let words = self.buffer.word_segments();
        let n = words.clamp_index(param.resolve(self.buffer.word_at_caret()));
        self.buffer.move_to_word(n);
        n
    }

    fn target_line(&mut self, param: &NumParam) -> usize {
        let lines = self.buffer.line_segments();
        let n = lines.clamp_index(param.resolve(self.buffer.line_at_caret()));
        self.buffer.move_to_line(n);
        n
    }
}

/// Resolved, clamped and deduplicated targets, highest first so deleting
/// one does not shift the ones still to come.
fn descending(param: &NumParam, current: usize, clamp: impl Fn(usize) -> usize) -> Vec<usize> {
    let mut targets: Vec<usize> = param.resolve_all(current).into_iter().map(clamp).collect();
    targets.sort_unstable_by(|a, b| b.cmp(a));
    targets.dedup();
    targets
}

/// Run `args` against `buffer` in one go.
pub fn run_command<S: AsRef<str>>(
    buffer: &mut NoteBuffer,
    clipboard: &mut dyn Clipboard,
    args: &[S],
) -> Outcome {
    Interpreter::new(buffer, clipboard).run(args)
}
