//! Rolling per-target history of health symbols.
//!
//! Symbols are only ever appended. Storage is capped at `retention` entries
//! per target; older entries fall off the front because nothing reads past
//! the render window. `recorded` keeps counting regardless.

use std::collections::VecDeque;

use netdiag_common::health::HealthSymbol;

use crate::registry::TargetId;

#[derive(Debug, Default, Clone)]
struct History {
    symbols: VecDeque<HealthSymbol>,
    recorded: u64,
}

#[derive(Debug, Clone)]
pub struct HistoryLedger {
    histories: Vec<History>,
    retention: usize,
}

impl HistoryLedger {
    /// `retention` is clamped to at least one entry.
    pub fn new(target_count: usize, retention: usize) -> Self {
        Self {
            histories: vec![History::default(); target_count],
            retention: retention.max(1),
        }
    }

    pub fn append(&mut self, id: TargetId, symbol: HealthSymbol) {
        let history = &mut self.histories[id.index()];
        if history.symbols.len() == self.retention {
            history.symbols.pop_front();
        }
        history.symbols.push_back(symbol);
        history.recorded += 1;
    }

    /// The most recent `n` symbols, oldest first. Shorter histories come back whole.
    pub fn recent_window(&self, id: TargetId, n: usize) -> Vec<HealthSymbol> {
        let symbols = &self.histories[id.index()].symbols;
        let start = symbols.len().saturating_sub(n);
        symbols.range(start..).copied().collect()
    }

    /// Number of symbols currently held for a target.
    pub fn len(&self, id: TargetId) -> usize {
        self.histories[id.index()].symbols.len()
    }

    /// Total symbols ever appended for a target, including dropped ones.
    pub fn recorded(&self, id: TargetId) -> u64 {
        self.histories[id.index()].recorded
    }

    pub fn retention(&self) -> usize {
        self.retention
    }
}
