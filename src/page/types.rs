//! Page value types

// ============================================================================
// Page
// ============================================================================

/// One raw response from a listing call, positioned in its listing.
///
/// Carries the response itself (for whole-response metadata such as total
/// counts or aggregates), the items extracted from it, the token the page
/// was *requested with*, and the normalized continuation token it carries.
#[derive(Debug, Clone)]
pub struct Page<R, T> {
    response: R,
    items: Vec<T>,
    token: Option<String>,
    next_token: Option<String>,
}

impl<R, T> Page<R, T> {
    pub(crate) fn new(
        response: R,
        items: Vec<T>,
        token: Option<String>,
        next_token: Option<String>,
    ) -> Self {
        Self {
            response,
            items,
            token,
            next_token,
        }
    }

    /// The raw response this page was built from.
    pub fn response(&self) -> &R {
        &self.response
    }

    /// Consume the page, returning the raw response.
    pub fn into_response(self) -> R {
        self.response
    }

    /// The items carried by this page, in service order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, returning its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The token this page was requested with (`None` for the first page).
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The continuation token this page carries, or `None` when it is the
    /// last page of the listing.
    pub fn next_token(&self) -> Option<&str> {
        self.next_token.as_deref()
    }

    /// Whether this is the final page of the listing.
    pub fn is_last(&self) -> bool {
        self.next_token.is_none()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page carries no items.
    ///
    /// An empty page does not mean the listing is over; services may return
    /// empty intermediate pages, e.g. when a deadline cuts a scan short.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// FixedSizePage
// ============================================================================

/// A batch of items re-packed to a caller-chosen size, independent of the
/// service's own page boundaries.
///
/// Every batch holds exactly the requested number of items except the last
/// one, which may be shorter; a zero-item batch is never produced. See
/// [`FixedSizePage::resume_token`] for the resumption contract.
#[derive(Debug, Clone)]
pub struct FixedSizePage<T> {
    items: Vec<T>,
    resume_token: Option<String>,
}

impl<T> FixedSizePage<T> {
    pub(crate) fn new(items: Vec<T>, resume_token: Option<String>) -> Self {
        Self {
            items,
            resume_token,
        }
    }

    /// The items of this batch, in service order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the batch, returning its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Token to start a new listing from after this batch.
    ///
    /// This is the token the *last service page consulted* for this batch
    /// was requested with. Service page boundaries do not subdivide, so a
    /// listing resumed from this token re-fetches that service page and
    /// will deliver again items that were already part of this batch; the
    /// caller must discard the duplicates. `None` means the batch was built
    /// entirely from the first service page and resumption restarts the
    /// listing from the beginning.
    pub fn resume_token(&self) -> Option<&str> {
        self.resume_token.as_deref()
    }

    /// Number of items in this batch.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this batch carries no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
