//! Capability traits and token interpretation
//!
//! Defines the core abstractions every listing operation supplies.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

// ============================================================================
// Token interpretation
// ============================================================================

/// How an empty-string page token in a response is interpreted.
///
/// Services disagree on this: proto3/JSON APIs typically leave the token
/// field blank on the last page, while a few treat the empty string as a
/// real cursor and signal the end only by omitting the field. The policy is
/// part of the call description ([`ListCall::token_policy`]) so each
/// operation can say which convention its service follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenPolicy {
    /// An empty token means the listing is over (the common convention).
    #[default]
    EmptyIsEnd,

    /// An empty string is a usable token; only an absent field ends the
    /// listing.
    EmptyIsToken,
}

impl TokenPolicy {
    /// Normalize a raw carried token into the continuation token for the
    /// next fetch. `None` means the listing is exhausted.
    pub fn continuation(self, raw: Option<String>) -> Option<String> {
        match self {
            Self::EmptyIsEnd => raw.filter(|token| !token.is_empty()),
            Self::EmptyIsToken => raw,
        }
    }

    /// Whether `raw` signals the end of the listing under this policy.
    pub fn is_end(self, raw: Option<&str>) -> bool {
        match (self, raw) {
            (_, None) => true,
            (Self::EmptyIsEnd, Some(token)) => token.is_empty(),
            (Self::EmptyIsToken, Some(_)) => false,
        }
    }
}

// ============================================================================
// Call description
// ============================================================================

/// The immutable description of one listing operation.
///
/// Implementations carry the initial request value and know how to read and
/// write the paging fields of the operation's request and response types.
/// All accessors are pure; the remote invocation lives in
/// [`AsyncListCall::issue`] or [`BlockingListCall::issue`].
pub trait ListCall: Send + Sync + 'static {
    /// Request type of the listing operation. Cloned once per fetch.
    type Request: Clone + Send + 'static;

    /// Response type of the listing operation.
    type Response: Send + 'static;

    /// The resource being listed (one item within a page).
    type Item: Send + 'static;

    /// The request to start the listing from.
    ///
    /// To resume a listing from a known token, set the token field here;
    /// the engine leaves the field untouched on the first fetch.
    fn initial_request(&self) -> Self::Request;

    /// Set the page token on a request.
    fn write_token(&self, request: &mut Self::Request, token: &str);

    /// Set the page size on a request.
    ///
    /// Must be idempotent. The engine only calls this when a size was set
    /// at sequence level, so the API's own default survives otherwise.
    fn write_size(&self, request: &mut Self::Request, size: u32);

    /// The raw next-page token carried by a response, if any.
    ///
    /// Return the field as the service sent it; the engine applies
    /// [`ListCall::token_policy`] to decide whether it ends the listing.
    fn read_token(&self, response: &Self::Response) -> Option<String>;

    /// The items carried by a response, in service order.
    fn read_items(&self, response: &Self::Response) -> Vec<Self::Item>;

    /// How an empty-string token from this service is interpreted.
    fn token_policy(&self) -> TokenPolicy {
        TokenPolicy::default()
    }
}

/// A listing call whose fetch effect is asynchronous.
#[async_trait]
pub trait AsyncListCall: ListCall {
    /// Perform one remote invocation.
    ///
    /// Exactly one invocation per call: retries, auth, and timeouts are the
    /// implementation's concern, not the engine's.
    async fn issue(&self, request: Self::Request) -> Result<Self::Response>;
}

/// A listing call whose fetch effect blocks the calling thread.
pub trait BlockingListCall: ListCall {
    /// Perform one remote invocation, blocking until it completes.
    fn issue(&self, request: Self::Request) -> Result<Self::Response>;
}

// ============================================================================
// Shared-call impls
// ============================================================================

// An Arc'd call is a call, so several independent sequences can list over
// one description concurrently, each making its own remote calls.

impl<C: ListCall> ListCall for Arc<C> {
    type Request = C::Request;
    type Response = C::Response;
    type Item = C::Item;

    fn initial_request(&self) -> Self::Request {
        (**self).initial_request()
    }

    fn write_token(&self, request: &mut Self::Request, token: &str) {
        (**self).write_token(request, token);
    }

    fn write_size(&self, request: &mut Self::Request, size: u32) {
        (**self).write_size(request, size);
    }

    fn read_token(&self, response: &Self::Response) -> Option<String> {
        (**self).read_token(response)
    }

    fn read_items(&self, response: &Self::Response) -> Vec<Self::Item> {
        (**self).read_items(response)
    }

    fn token_policy(&self) -> TokenPolicy {
        (**self).token_policy()
    }
}

#[async_trait]
impl<C: AsyncListCall> AsyncListCall for Arc<C> {
    async fn issue(&self, request: Self::Request) -> Result<Self::Response> {
        (**self).issue(request).await
    }
}

impl<C: BlockingListCall> BlockingListCall for Arc<C> {
    fn issue(&self, request: Self::Request) -> Result<Self::Response> {
        (**self).issue(request)
    }
}
