//! Page value types and iteration state
//!
//! # Overview
//!
//! [`Page`] is one raw service response positioned in its listing;
//! [`FixedSizePage`] is a batch re-packed to a caller-chosen size. The
//! crate-internal `Cursor` and `Repacker` hold the token-propagation and
//! re-packing state shared by the blocking and async sequence adapters,
//! so the algorithm exists exactly once.

mod cursor;
mod repack;
mod types;

pub use types::{FixedSizePage, Page};

pub(crate) use cursor::Cursor;
pub(crate) use repack::Repacker;
