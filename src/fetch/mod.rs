//! Single-page fetching
//!
//! # Overview
//!
//! [`PageFetcher`] turns one continuation token into one service page: it
//! builds the request, issues the call exactly once, and extracts the
//! items and continuation token from the response. No retries and no
//! caching; transport policy lives entirely in the injected call, and
//! failures pass through unchanged.

use crate::call::{AsyncListCall, BlockingListCall, ListCall};
use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::page::Page;
use std::sync::Arc;
use tracing::debug;

/// Stateless fetcher wrapping a listing call.
///
/// Holds the call plus the page size to request, if one was set at
/// sequence level. Cheap to clone; clones share the call.
pub struct PageFetcher<C: ListCall> {
    call: Arc<C>,
    page_size: Option<u32>,
}

impl<C: ListCall> Clone for PageFetcher<C> {
    fn clone(&self) -> Self {
        Self {
            call: Arc::clone(&self.call),
            page_size: self.page_size,
        }
    }
}

impl<C: ListCall> PageFetcher<C> {
    /// Wrap `call` with no page size set, leaving the request's own
    /// page-size field untouched on every fetch.
    pub fn new(call: C) -> Self {
        Self {
            call: Arc::new(call),
            page_size: None,
        }
    }

    /// Page size to write into every request.
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Build the request for one fetch.
    ///
    /// The token is only written when present, so the first fetch keeps
    /// whatever token the initial request already carries; the size is only
    /// written when one was set, so the API's default page size survives
    /// otherwise.
    fn build_request(&self, token: Option<&str>) -> C::Request {
        let mut request = self.call.initial_request();
        if let Some(token) = token {
            self.call.write_token(&mut request, token);
        }
        if let Some(size) = self.page_size {
            self.call.write_size(&mut request, size);
        }
        debug!("issuing list call: token={token:?}, size={:?}", self.page_size);
        request
    }

    fn assemble(&self, response: C::Response, token: Option<String>) -> Page<C::Response, C::Item> {
        let items = self.call.read_items(&response);
        let next_token = self
            .call
            .token_policy()
            .continuation(self.call.read_token(&response));
        debug!(
            "fetched page: {} items, last={}",
            items.len(),
            next_token.is_none()
        );
        Page::new(response, items, token, next_token)
    }
}

impl<C: BlockingListCall> PageFetcher<C> {
    /// Fetch the page at `token`, blocking until the call completes.
    pub fn fetch(&self, token: Option<String>) -> Result<Page<C::Response, C::Item>> {
        let request = self.build_request(token.as_deref());
        let response = self.call.issue(request)?;
        Ok(self.assemble(response, token))
    }
}

impl<C: AsyncListCall> PageFetcher<C> {
    /// Fetch the page at `token`, racing the in-flight call against
    /// `cancel`.
    ///
    /// Cancellation drops the call before any page is assembled, so a
    /// partially received page is never observable.
    pub async fn fetch_async(
        &self,
        token: Option<String>,
        cancel: CancelToken,
    ) -> Result<Page<C::Response, C::Item>> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let request = self.build_request(token.as_deref());
        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            response = self.call.issue(request) => response?,
        };
        Ok(self.assemble(response, token))
    }
}
