//! Fixed-size re-packing buffer

use super::types::FixedSizePage;
use std::collections::VecDeque;

/// Pending-items buffer behind a fixed-size page sequence.
///
/// Collects items across as many service pages as needed, then cuts exact
/// `size` batches. When the service honors the written page size, at most
/// `size - 1` items sit here between fetches. The resume token tracks the
/// token the most recently absorbed page was requested with.
#[derive(Debug)]
pub(crate) struct Repacker<T> {
    size: usize,
    pending: VecDeque<T>,
    resume_token: Option<String>,
}

impl<T> Repacker<T> {
    /// `size` must be positive; validated where the caller's argument
    /// enters the engine.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            pending: VecDeque::with_capacity(size),
            resume_token: None,
        }
    }

    /// Absorb one service page worth of items. `token` is the token that
    /// page was requested with.
    pub fn absorb(&mut self, items: Vec<T>, token: Option<String>) {
        self.pending.extend(items);
        self.resume_token = token;
    }

    /// Enough pending items for a full batch.
    pub fn is_filled(&self) -> bool {
        self.pending.len() >= self.size
    }

    /// No pending items at all.
    pub fn is_drained(&self) -> bool {
        self.pending.is_empty()
    }

    /// Cut the next batch: `size` items, or whatever remains.
    pub fn emit(&mut self) -> FixedSizePage<T> {
        let take = self.size.min(self.pending.len());
        let items: Vec<T> = self.pending.drain(..take).collect();
        FixedSizePage::new(items, self.resume_token.clone())
    }
}
