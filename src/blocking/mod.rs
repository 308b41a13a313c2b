//! Blocking consumption
//!
//! # Overview
//!
//! `Iterator` adapters over a [`BlockingListCall`]: [`Resources`] for flat
//! iteration, [`Pages`] for page-level iteration with whole-response
//! metadata, and [`FixedSizePages`] for exact-size batches. All three are
//! pull-based (no page is fetched before it is needed) and mirror the
//! `Stream` adapters in [`crate::stream`] exactly.
//!
//! ```rust,ignore
//! use pagewise::blocking::list_all;
//!
//! for book in list_all(call) {
//!     let book = book?;
//!     // ...
//! }
//!
//! for shelf in list_all(call).into_pages().with_fixed_size(25)? {
//!     render(shelf?.items());
//! }
//! ```

mod sequences;

pub use sequences::{FixedSizePages, Pages, Resources};

use crate::call::BlockingListCall;

/// Flat blocking iteration over every resource of `call`.
pub fn list_all<C: BlockingListCall>(call: C) -> Resources<C> {
    Resources::new(call)
}
