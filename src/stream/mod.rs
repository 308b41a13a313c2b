//! Asynchronous consumption
//!
//! # Overview
//!
//! [`futures::Stream`] adapters over an [`AsyncListCall`]:
//! [`ResourceStream`] for flat iteration, [`PageStream`] for page-level
//! iteration with whole-response metadata, and [`FixedSizePageStream`] for
//! exact-size batches. All three are pull-based (a fetch starts only when
//! the consumer polls for an element that is not already buffered) and
//! mirror the blocking adapters in [`crate::blocking`] exactly.
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use pagewise::list_all;
//!
//! let mut books = list_all(call);
//! while let Some(book) = books.next().await {
//!     let book = book?;
//!     // ...
//! }
//!
//! let mut shelves = list_all(call).into_pages().with_fixed_size(25)?;
//! while let Some(shelf) = shelves.next().await {
//!     render(shelf?.items());
//! }
//! ```

mod sequences;

pub use sequences::{FixedSizePageStream, PageStream, ResourceStream};

use crate::call::AsyncListCall;

/// Flat asynchronous iteration over every resource of `call`.
pub fn list_all<C: AsyncListCall>(call: C) -> ResourceStream<C> {
    ResourceStream::new(call)
}
