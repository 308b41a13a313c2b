// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Pagewise
//!
//! A minimal, Rust-native engine for consuming page-token list APIs.
//! Describe a listing operation once, get back lazy sequences of
//! resources, raw pages, or exact-size batches.
//!
//! ## Features
//!
//! - **Flat iteration**: every resource across every page, one at a time
//! - **Page-level iteration**: raw responses with their tokens, for
//!   whole-response metadata
//! - **Fixed-size batching**: exact-size pages re-packed across service
//!   page boundaries, for presentation layers ("25 results per page")
//! - **Async and blocking**: the same engine behind `futures::Stream` and
//!   `Iterator` adapters
//! - **Strictly lazy**: one fetch in flight at most, nothing fetched
//!   before it is needed, cancellation aborts mid-fetch
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use pagewise::{list_all, Result};
//!
//! async fn run(call: ListBooks) -> Result<()> {
//!     // Flat: every book, fetching pages as needed
//!     let mut books = list_all(call.clone());
//!     while let Some(book) = books.next().await {
//!         let book = book?;
//!         // ...
//!     }
//!
//!     // Batched: exactly 25 books per page for a UI
//!     let mut shelves = list_all(call).into_pages().with_fixed_size(25)?;
//!     while let Some(shelf) = shelves.next().await {
//!         render(shelf?.items());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! A listing operation is described by implementing [`ListCall`] (paging
//! accessors) plus [`AsyncListCall`] or [`BlockingListCall`] (the remote
//! invocation). Retry, auth, and timeout policy belong to that
//! implementation; the engine issues exactly one invocation per page.
//!
//! ## Architecture
//!
//! ```text
//! ListCall  (initial_request / write_token / write_size /
//!            read_token / read_items / issue)
//!     │
//! PageFetcher ─────────────── one remote call per fetch
//!     │
//! PageStream / Pages ──────── raw pages, token propagation
//!     │
//! ResourceStream / Resources ─ flat items
//!     │
//! FixedSizePageStream / FixedSizePages ─ exact-size batches
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the engine
pub mod error;

/// The listing-call capability boundary
pub mod call;

/// Page value types and iteration state
pub mod page;

/// Single-page fetching
pub mod fetch;

/// Cooperative cancellation
pub mod cancel;

/// Blocking consumption (`Iterator` adapters)
pub mod blocking;

/// Asynchronous consumption (`futures::Stream` adapters)
pub mod stream;

// ============================================================================
// Re-exports
// ============================================================================

pub use call::{AsyncListCall, BlockingListCall, ListCall, TokenPolicy};
pub use cancel::CancelToken;
pub use error::{Error, Result, TransportError};
pub use fetch::PageFetcher;
pub use page::{FixedSizePage, Page};
pub use stream::{list_all, FixedSizePageStream, PageStream, ResourceStream};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
