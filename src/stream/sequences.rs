//! Asynchronous sequence adapters

use crate::call::{AsyncListCall, ListCall};
use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::fetch::PageFetcher;
use crate::page::{Cursor, FixedSizePage, Page, Repacker};
use futures::future::BoxFuture;
use futures::ready;
use futures::stream::Stream;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

type PageFuture<C> =
    BoxFuture<'static, Result<Page<<C as ListCall>::Response, <C as ListCall>::Item>>>;

// ============================================================================
// PageStream
// ============================================================================

/// Lazy stream of raw service pages.
///
/// Finite and not restartable: remote state may have changed between
/// passes, so a new stream must be built to list again from the start.
/// At most one fetch is in flight at a time; after the first error the
/// stream is terminally failed and yields nothing further.
pub struct PageStream<C: AsyncListCall> {
    fetcher: PageFetcher<C>,
    cursor: Cursor,
    cancel: CancelToken,
    in_flight: Option<PageFuture<C>>,
    failed: bool,
}

impl<C: AsyncListCall> PageStream<C> {
    /// Page-level listing over `call`.
    pub fn new(call: C) -> Self {
        Self {
            fetcher: PageFetcher::new(call),
            cursor: Cursor::new(),
            cancel: CancelToken::new(),
            in_flight: None,
            failed: false,
        }
    }

    /// Page size to request from the service on every fetch.
    ///
    /// Unset by default, which leaves the request's own page-size field
    /// untouched. Configure before the first poll.
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.fetcher = self.fetcher.with_page_size(size);
        self
    }

    /// Cancellation handle; an in-flight fetch is raced against it.
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
    pub fn with_fixed_size(self, size: u32) -> Result<FixedSizePageStream<C>> {
        if size == 0 {
            return Err(Error::invalid_argument(
                "fixed page size must be greater than zero",
            ));
        }
        Ok(FixedSizePageStream {
            pages: self.with_page_size(size),
            repack: Repacker::new(size as usize),
            done: false,
        })
    }

    fn begin_fetch(&mut self, token: Option<String>) {
        let fetcher = self.fetcher.clone();
        let cancel = self.cancel.clone();
        self.in_flight = Some(Box::pin(async move {
            fetcher.fetch_async(token, cancel).await
        }));
    }
}

impl<C: AsyncListCall> Stream for PageStream<C> {
    type Item = Result<Page<C::Response, C::Item>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.failed {
            return Poll::Ready(None);
        }
        if this.in_flight.is_none() {
            match this.cursor.next_fetch() {
                None => return Poll::Ready(None),
                Some(token) => this.begin_fetch(token),
            }
        }
        let Some(fetch) = this.in_flight.as_mut() else {
            return Poll::Ready(None);
        };
        let outcome = ready!(fetch.as_mut().poll(cx));
        this.in_flight = None;
        let outcome = outcome.and_then(|page| {
            this.cursor
                .advance(page.next_token().map(str::to_owned))?;
            Ok(page)
        });
        if outcome.is_err() {
            this.failed = true;
        }
        Poll::Ready(Some(outcome))
    }
}

// ============================================================================
// ResourceStream
// ============================================================================

/// Flat lazy stream of individual resources.
///
/// Yields exactly the concatenation, in order, of every page's items. A
/// new page is fetched only once the current page's items are drained;
/// the stream never fetches ahead.
pub struct ResourceStream<C: AsyncListCall> {
    pages: PageStream<C>,
    current: std::vec::IntoIter<C::Item>,
}

// The stream states never structurally pin their fields: the only pinned
// inner field is the already-`Unpin` `PageStream`, and items are moved out by
// value. Assert the invariant the design relies on so `get_mut` is available
// regardless of whether `C::Item` is `Unpin`.
impl<C: AsyncListCall> Unpin for ResourceStream<C> {}

impl<C: AsyncListCall> ResourceStream<C> {
    /// Flat listing over `call`.
    pub fn new(call: C) -> Self {
        Self {
            pages: PageStream::new(call),
            current: Vec::new().into_iter(),
        }
    }

    /// Page size to request from the service on every fetch.
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.pages = self.pages.with_page_size(size);
        self
    }

    /// Cancellation handle; an in-flight fetch is raced against it.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.pages = self.pages.with_cancel(cancel);
        self
    }

    /// Page-level view of the same listing, for access to whole-response
    /// metadata.
    pub fn into_pages(self) -> PageStream<C> {
        self.pages
    }
}

impl<C: AsyncListCall> Stream for ResourceStream<C> {
    type Item = Result<C::Item>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some(item) = this.current.next() {
                return Poll::Ready(Some(Ok(item)));
            }
            match ready!(Pin::new(&mut this.pages).poll_next(cx)) {
                Some(Ok(page)) => this.current = page.into_items().into_iter(),
                Some(Err(err)) => return Poll::Ready(Some(Err(err))),
                None => return Poll::Ready(None),
            }
        }
    }
}

// ============================================================================
// FixedSizePageStream
// ============================================================================

/// Lazy stream of exact-size batches.
///
/// Built by [`PageStream::with_fixed_size`]. Pulls as many service pages
/// as needed to fill each batch; items already fetched but not yet emitted
/// wait in a pending buffer that never grows past one batch.
pub struct FixedSizePageStream<C: AsyncListCall> {
    pages: PageStream<C>,
    repack: Repacker<C::Item>,
    done: bool,
}

impl<C: AsyncListCall> Unpin for FixedSizePageStream<C> {}

impl<C: AsyncListCall> Stream for FixedSizePageStream<C> {
    type Item = Result<FixedSizePage<C::Item>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }
        loop {
            if this.repack.is_filled() {
                return Poll::Ready(Some(Ok(this.repack.emit())));
            }
            match ready!(Pin::new(&mut this.pages).poll_next(cx)) {
                Some(Ok(page)) => {
                    // an empty service page flushes what we have instead of
                    // fetching further; with nothing pending it is skipped
                    let flush = page.is_empty() && !this.repack.is_drained();
                    let token = page.token().map(str::to_owned);
                    this.repack.absorb(page.into_items(), token);
                    if flush {
                        return Poll::Ready(Some(Ok(this.repack.emit())));
                    }
                }
                Some(Err(err)) => {
                    this.done = true;
                    return Poll::Ready(Some(Err(err)));
                }
                None => {
                    this.done = true;
                    if this.repack.is_drained() {
                        return Poll::Ready(None);
                    }
                    return Poll::Ready(Some(Ok(this.repack.emit())));
                }
            }
        }
    }
}
