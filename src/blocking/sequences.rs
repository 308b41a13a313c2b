//! Blocking sequence adapters

use crate::call::{BlockingListCall, ListCall};
use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::fetch::PageFetcher;
use crate::page::{Cursor, FixedSizePage, Page, Repacker};

// ============================================================================
// Pages
// ============================================================================

/// Lazy sequence of raw service pages.
///
/// Finite and not restartable: remote state may have changed between
/// passes, so a new sequence must be built to list again from the start.
/// After the first error the sequence is terminally failed and yields
/// nothing further. A single instance must not be advanced from two
/// threads; independent instances over the same call are fine.
pub struct Pages<C: ListCall> {
    fetcher: PageFetcher<C>,
    cursor: Cursor,
    cancel: CancelToken,
    failed: bool,
}

impl<C: BlockingListCall> Pages<C> {
    /// Page-level listing over `call`.
    pub fn new(call: C) -> Self {
        Self {
            fetcher: PageFetcher::new(call),
            cursor: Cursor::new(),
            cancel: CancelToken::new(),
            failed: false,
        }
    }

    /// Page size to request from the service on every fetch.
    ///
    /// Unset by default, which leaves the request's own page-size field
    /// untouched.
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.fetcher = self.fetcher.with_page_size(size);
        self
    }

    /// Cancellation handle, checked before every fetch.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Re-pack the listing into batches of exactly `size` items.
    ///
    /// `size` is also written into every underlying request, so service
    /// pages arrive no larger than one batch. Only the final batch may be
    /// shorter, except that an empty service page flushes the items
    /// gathered so far as a short batch rather than fetching further.
    /// Fails with [`Error::InvalidArgument`] when `size` is zero.
    ///
    /// Each batch carries a resume token with a deliberate approximation:
    /// see [`FixedSizePage::resume_token`].
    pub fn with_fixed_size(self, size: u32) -> Result<FixedSizePages<C>> {
        if size == 0 {
            return Err(Error::invalid_argument(
                "fixed page size must be greater than zero",
            ));
        }
        Ok(FixedSizePages {
            pages: self.with_page_size(size),
            repack: Repacker::new(size as usize),
            done: false,
        })
    }

    fn pull(&mut self) -> Option<Result<Page<C::Response, C::Item>>> {
        if self.failed {
            return None;
        }
        let token = self.cursor.next_fetch()?;
        if self.cancel.is_cancelled() {
            self.failed = true;
            return Some(Err(Error::Cancelled));
        }
        let outcome = self.fetcher.fetch(token).and_then(|page| {
            self.cursor
                .advance(page.next_token().map(str::to_owned))?;
            Ok(page)
        });
        if outcome.is_err() {
            self.failed = true;
        }
        Some(outcome)
    }
}

impl<C: BlockingListCall> Iterator for Pages<C> {
    type Item = Result<Page<C::Response, C::Item>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull()
    }
}

// ============================================================================
// Resources
// ============================================================================

/// Flat lazy sequence of individual resources.
///
/// Yields exactly the concatenation, in order, of every page's items. A
/// new page is fetched only once the current page's items are drained;
/// the sequence never fetches ahead.
pub struct Resources<C: ListCall> {
    pages: Pages<C>,
    current: std::vec::IntoIter<C::Item>,
}

impl<C: BlockingListCall> Resources<C> {
    /// Flat listing over `call`.
    pub fn new(call: C) -> Self {
        Self {
            pages: Pages::new(call),
            current: Vec::new().into_iter(),
        }
    }

    /// Page size to request from the service on every fetch.
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.pages = self.pages.with_page_size(size);
        self
    }

    /// Cancellation handle, checked before every fetch.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.pages = self.pages.with_cancel(cancel);
        self
    }

    /// Page-level view of the same listing, for access to whole-response
    /// metadata.
    pub fn into_pages(self) -> Pages<C> {
        self.pages
    }
}

impl<C: BlockingListCall> Iterator for Resources<C> {
    type Item = Result<C::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(Ok(item));
            }
            match self.pages.next()? {
                Ok(page) => self.current = page.into_items().into_iter(),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

// ============================================================================
// FixedSizePages
// ============================================================================

/// Lazy sequence of exact-size batches.
///
/// Built by [`Pages::with_fixed_size`]. Pulls as many service pages as
/// needed to fill each batch; items already fetched but not yet emitted
/// wait in a pending buffer that never grows past one batch.
pub struct FixedSizePages<C: ListCall> {
    pages: Pages<C>,
    repack: Repacker<C::Item>,
    done: bool,
}

impl<C: BlockingListCall> Iterator for FixedSizePages<C> {
    type Item = Result<FixedSizePage<C::Item>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if self.repack.is_filled() {
                return Some(Ok(self.repack.emit()));
            }
            match self.pages.next() {
                Some(Ok(page)) => {
                    // an empty service page flushes what we have instead of
                    // fetching further; with nothing pending it is skipped
                    let flush = page.is_empty() && !self.repack.is_drained();
                    let token = page.token().map(str::to_owned);
                    self.repack.absorb(page.into_items(), token);
                    if flush {
                        return Some(Ok(self.repack.emit()));
                    }
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                None => {
                    self.done = true;
                    if self.repack.is_drained() {
                        return None;
                    }
                    return Some(Ok(self.repack.emit()));
                }
            }
        }
    }
}
