use std::collections::HashMap;

/// Occurrence counts per position key
#[derive(Clone, Debug, Default)]
pub(crate) struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    pub(crate) fn new() -> Self {
        RepetitionTable {
            counts: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, key: u64) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    fn set(&mut self, key: u64, count: u32) {
        if count == 0 {
            self.counts.remove(&key);
        } else {
            self.counts.insert(key, count);
        }
    }

    /// Record one more occurrence and return the new count
    pub(crate) fn increment(&mut self, key: u64) -> u32 {
        let next = self.get(key).saturating_add(1);
        self.set(key, next);
        next
    }

    pub(crate) fn decrement(&mut self, key: u64) {
        let next = self.get(key).saturating_sub(1);
        self.set(key, next);
    }
}
