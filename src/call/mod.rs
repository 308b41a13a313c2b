//! The listing-call capability boundary
//!
//! # Overview
//!
//! A listing operation is described to the engine by a [`ListCall`]: an
//! initial request value plus the accessors that read and write the page
//! token, page size, and item list on the operation's request and response
//! types. The engine drives the operation exclusively through this trait,
//! which keeps it transport- and protocol-agnostic.
//!
//! The fetch effect itself comes in two flavors, [`AsyncListCall`] and
//! [`BlockingListCall`], so the same call description can back both the
//! `Stream`-based and the `Iterator`-based sequences.

mod types;

pub use types::{AsyncListCall, BlockingListCall, ListCall, TokenPolicy};
