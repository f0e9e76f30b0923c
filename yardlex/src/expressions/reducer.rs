//! Shunting-yard reduction to postfix order
//!
//! [`Reducer`] is the step-wise state machine: feed it one infix item at a
//! time and it appends whatever became final to an output queue.
//! [`ShuntingYard`] wraps it as a lazy iterator. No decision looks ahead, so
//! items are released as soon as they are determined.

use crate::config::compile_time::reducer::MAX_STACK_DEPTH;
use crate::config::runtime::ReducerPreferences;
use crate::expressions::{brackets, PrecedenceError, Reducible};
use crate::logging::codes;
use crate::tokens::TokenKind;
use crate::{log_debug, log_error, log_success};
use std::collections::VecDeque;

/// Operator, function and open-bracket stack with its dispatch rules
#[derive(Debug)]
pub struct Reducer<T> {
    stack: Vec<T>,
    preferences: ReducerPreferences,
    consumed: usize,
    emitted: usize,
}

impl<T: Reducible> Default for Reducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Reducible> Reducer<T> {
    pub fn new() -> Self {
        Self::with_preferences(ReducerPreferences::default())
    }

    pub fn with_preferences(preferences: ReducerPreferences) -> Self {
        Self {
            stack: Vec::new(),
            preferences,
            consumed: 0,
            emitted: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn emit(&mut self, item: T, out: &mut VecDeque<T>) {
        self.emitted += 1;
        if self.preferences.log_reductions {
            log_debug!("Postfix emit", "item" => item.name(), "kind" => item.kind());
        }
        out.push_back(item);
    }

    fn push(&mut self, item: T) -> Result<(), PrecedenceError> {
        if self.preferences.enforce_stack_limit && self.stack.len() >= MAX_STACK_DEPTH {
            return Err(PrecedenceError::StackOverflow {
                depth: self.stack.len() + 1,
            });
        }
        self.stack.push(item);
        Ok(())
    }

    fn top_kind(&self) -> Option<TokenKind> {
        self.stack.last().map(|top| top.kind())
    }

    /// Pop into `out` until an open bracket is on top. `false` when the
    /// stack ran dry first.
    fn unwind_to_open(&mut self, out: &mut VecDeque<T>) -> bool {
        loop {
            match self.top_kind() {
                None => return false,
                Some(TokenKind::BraceOpen) => return true,
                Some(_) => {
                    if let Some(top) = self.stack.pop() {
                        self.emit(top, out);
                    }
                }
            }
        }
    }

    /// Consume one infix item, queueing everything it makes final
    pub fn feed(&mut self, item: T, out: &mut VecDeque<T>) -> Result<(), PrecedenceError> {
        self.consumed += 1;

        match item.kind() {
            TokenKind::Constant | TokenKind::Variable => {
                self.emit(item, out);
                Ok(())
            }
            TokenKind::Function | TokenKind::BraceOpen => self.push(item),
            TokenKind::Delimiter => {
                if self.unwind_to_open(out) {
                    Ok(())
                } else {
                    Err(PrecedenceError::MissingOpeningForDelimiter {
                        delimiter: item.name().to_string(),
                    })
                }
            }
            TokenKind::BraceClose => self.close(item, out),
            TokenKind::Operator => {
                while let Some(top) = self.stack.last() {
                    if top.kind() != TokenKind::Operator || top.priority() < item.priority() {
                        break;
                    }
                    if let Some(top) = self.stack.pop() {
                        self.emit(top, out);
                    }
                }
                self.push(item)
            }
            TokenKind::None | TokenKind::WhiteSpace => Ok(()),
        }
    }

    fn close(&mut self, closing: T, out: &mut VecDeque<T>) -> Result<(), PrecedenceError> {
        if !self.unwind_to_open(out) {
            return Err(PrecedenceError::MissingOpening {
                closing: closing.name().to_string(),
            });
        }

        let Some(opening) = self.stack.pop() else {
            return Err(PrecedenceError::MissingOpening {
                closing: closing.name().to_string(),
            });
        };

        if !brackets::pairs(opening.name(), closing.name()) {
            return Err(PrecedenceError::MismatchedBrackets {
                opening: opening.name().to_string(),
                closing: closing.name().to_string(),
            });
        }

        if self.top_kind() == Some(TokenKind::Function) {
            if let Some(function) = self.stack.pop() {
                self.emit(function, out);
            }
        }
        Ok(())
    }

    /// Drain the stack after the last item
    pub fn finish(&mut self, out: &mut VecDeque<T>) -> Result<(), PrecedenceError> {
        while let Some(top) = self.stack.pop() {
            match top.kind() {
                TokenKind::BraceOpen => {
                    return Err(PrecedenceError::MissingClosing {
                        opening: top.name().to_string(),
                    })
                }
                TokenKind::BraceClose => {
                    return Err(PrecedenceError::UnexpectedClosing {
                        closing: top.name().to_string(),
                    })
                }
                _ => self.emit(top, out),
            }
        }

        log_success!(codes::success::REDUCTION_COMPLETE, "Reduction complete",
            "consumed" => self.consumed,
            "emitted" => self.emitted
        );
        Ok(())
    }
}

/// Lazy postfix sequence over an infix source.
///
/// Items determined before a fault are still yielded, then the error once,
/// then nothing.
pub struct ShuntingYard<I>
where
    I: Iterator,
    I::Item: Reducible,
{
    source: I,
    reducer: Reducer<I::Item>,
    ready: VecDeque<I::Item>,
    error: Option<PrecedenceError>,
    drained: bool,
    finished: bool,
}

impl<I> ShuntingYard<I>
where
    I: Iterator,
    I::Item: Reducible,
{
    pub fn new(source: I) -> Self {
        Self::with_preferences(source, ReducerPreferences::default())
    }

    pub fn with_preferences(source: I, preferences: ReducerPreferences) -> Self {
        Self {
            source,
            reducer: Reducer::with_preferences(preferences),
            ready: VecDeque::new(),
            error: None,
            drained: false,
            finished: false,
        }
    }

    fn record(&mut self, result: Result<(), PrecedenceError>) {
        if let Err(e) = result {
            log_error!(e.error_code(), "Reduction failed", "error" => e);
            self.error = Some(e);
            self.drained = true;
        }
    }
}

impl<I> Iterator for ShuntingYard<I>
where
    I: Iterator,
    I::Item: Reducible,
{
    type Item = Result<I::Item, PrecedenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.ready.pop_front() {
                return Some(Ok(item));
            }
            if let Some(e) = self.error.take() {
                self.finished = true;
                return Some(Err(e));
            }
            if self.finished || self.drained {
                self.finished = true;
                return None;
            }

            match self.source.next() {
                Some(item) => {
                    let result = self.reducer.feed(item, &mut self.ready);
                    self.record(result);
                }
                None => {
                    let result = self.reducer.finish(&mut self.ready);
                    self.drained = true;
                    self.record(result);
                }
            }
        }
    }
}

impl<I> std::iter::FusedIterator for ShuntingYard<I>
where
    I: Iterator,
    I::Item: Reducible,
{
}

/// Reorder `items` into postfix order, lazily
pub fn reduce<L>(items: L) -> ShuntingYard<L::IntoIter>
where
    L: IntoIterator,
    L::Item: Reducible,
{
    ShuntingYard::new(items.into_iter())
}
