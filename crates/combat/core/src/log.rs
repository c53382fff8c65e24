//! Bounded combat log.

use std::collections::VecDeque;

use crate::config::CombatConfig;

/// Ring buffer of log lines, newest first, capped at
/// [`CombatConfig::LOG_CAPACITY`] entries.
#[derive(Clone, Debug, Default)]
pub struct CombatLog {
    entries: VecDeque<String>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(CombatConfig::LOG_CAPACITY),
        }
    }

    /// Prepend a line, dropping the oldest once full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.entries.len() == CombatConfig::LOG_CAPACITY {
            self.entries.pop_back();
        }
        self.entries.push_front(line.into());
    }

    /// Newest-first view of the log.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_entry_comes_first() {
        let mut log = CombatLog::new();
        log.push("first");
        log.push("second");
        assert_eq!(log.to_vec(), vec!["second", "first"]);
    }

    #[test]
    fn capacity_is_bounded_at_ten() {
        let mut log = CombatLog::new();
        for i in 0..15 {
            log.push(format!("line {i}"));
        }
        assert_eq!(log.len(), 10);
        assert_eq!(log.lines().next(), Some("line 14"));
        assert_eq!(log.lines().last(), Some("line 5"));
    }
}
