use std::collections::VecDeque;

use super::board::TokenSource;

/// Hands out a fixed sequence of tokens; panics once the script runs dry so
/// tests notice unexpected refills.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedTokens {
    queue: VecDeque<u8>,
    drawn: usize,
}

impl ScriptedTokens {
    pub(crate) fn new(tokens: impl IntoIterator<Item = u8>) -> Self {
        ScriptedTokens {
            queue: tokens.into_iter().collect(),
            drawn: 0,
        }
    }

    pub(crate) fn drawn(&self) -> usize {
        self.drawn
    }

    pub(crate) fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl TokenSource for ScriptedTokens {
    fn draw(&mut self, _kind_count: u8) -> u8 {
        self.drawn += 1;
        match self.queue.pop_front() {
            Some(kind) => kind,
            None => panic!("token script exhausted after {} draws", self.drawn - 1),
        }
    }
}

/// Repeats a pattern forever.
#[derive(Debug, Clone)]
pub(crate) struct CycleTokens {
    pattern: Vec<u8>,
    next: usize,
}

impl CycleTokens {
    pub(crate) fn new(pattern: impl IntoIterator<Item = u8>) -> Self {
        let pattern: Vec<u8> = pattern.into_iter().collect();
        assert!(!pattern.is_empty(), "cycle pattern must not be empty");
        CycleTokens { pattern, next: 0 }
    }
}

impl TokenSource for CycleTokens {
    fn draw(&mut self, _kind_count: u8) -> u8 {
        let kind = self.pattern[self.next % self.pattern.len()];
        self.next += 1;
        kind
    }
}
