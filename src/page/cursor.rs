//! Token propagation state

use crate::error::{Error, Result};
use std::collections::HashSet;

/// Mutable iteration state for one pass over a listing.
///
/// Tracks the continuation token, exhaustion, and every token already
/// consumed. A token is offered for a fetch at most once; a service that
/// hands back a token a second time would otherwise loop forever, so the
/// repeat is surfaced as a protocol violation instead.
///
/// Not restartable: remote state may have changed between passes, so a
/// fresh cursor must be built to list again from the start.
#[derive(Debug, Default)]
pub(crate) struct Cursor {
    token: Option<String>,
    exhausted: bool,
    consumed: HashSet<String>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token to fetch with next.
    ///
    /// Returns `None` when the listing is exhausted and no call should be
    /// made. Otherwise returns the token for the fetch (`None` inside the
    /// `Some` means the first page) and consumes it.
    pub fn next_fetch(&mut self) -> Option<Option<String>> {
        if self.exhausted {
            return None;
        }
        let used = self.token.take();
        if let Some(token) = &used {
            self.consumed.insert(token.clone());
        }
        Some(used)
    }

    /// Record the continuation token carried by the page just fetched.
    ///
    /// `None` marks the listing exhausted: the page already yielded is the
    /// last one. A token seen before poisons the cursor and fails.
    pub fn advance(&mut self, next: Option<String>) -> Result<()> {
        match next {
            None => {
                self.exhausted = true;
                Ok(())
            }
            Some(token) => {
                if self.consumed.contains(&token) {
                    self.exhausted = true;
                    return Err(Error::protocol_violation(format!(
                        "service returned page token {token:?} twice"
                    )));
                }
                self.token = Some(token);
                Ok(())
            }
        }
    }
}
