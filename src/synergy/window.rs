//! The recent-tag window combos are matched against.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::MIN_SYNERGY_WINDOW;

/// Inline storage for the common window sizes.
type TagBuf = SmallVec<[String; 4]>;

/// Bounded FIFO of the most recently played card tags.
///
/// Oldest tags fall off the front once the capacity is reached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynergyWindow {
    tags: TagBuf,
    capacity: usize,
}

impl Default for SynergyWindow {
    fn default() -> Self {
        Self::new(MIN_SYNERGY_WINDOW)
    }
}

impl SynergyWindow {
    /// Create an empty window. Capacity is raised to at least 2.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            tags: TagBuf::new(),
            capacity: capacity.max(MIN_SYNERGY_WINDOW),
        }
    }

    /// Push a tag, dropping the oldest when over capacity.
    pub fn push(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
        if self.tags.len() > self.capacity {
            let excess = self.tags.len() - self.capacity;
            self.tags.drain(..excess);
        }
    }

    /// The two most recently pushed tags, oldest first.
    #[must_use]
    pub fn last_pair(&self) -> Option<(&str, &str)> {
        match self.tags.as_slice() {
            [.., first, second] => Some((first.as_str(), second.as_str())),
            _ => None,
        }
    }

    /// Buffered tags, oldest first.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    /// Replace the contents with a persisted sequence, keeping the newest
    /// tags that fit.
    pub fn restore<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clear();
        for tag in tags {
            self.push(tag);
        }
    }
}
