//! Series — an immutable, time-ascending sequence of bars.

use super::Bar;
use serde::{Deserialize, Serialize};

/// Ordered bar sequence for one symbol, oldest first.
///
/// Constructed once per request by the data boundary and never mutated.
/// Ordering and timestamp uniqueness are the provider's contract; the
/// engine operates positionally and does not re-sort or de-duplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    pub fn new(bars: Vec<Bar>) -> Self {
        Self { bars }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Close prices, positionally aligned with the bars.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

impl From<Vec<Bar>> for Series {
    fn from(bars: Vec<Bar>) -> Self {
        Self::new(bars)
    }
}
