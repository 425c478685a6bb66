#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Search dispatch and response correlation.
//!
//! The [`Dispatcher`] hands each search to one of two transport channels: a
//! pass-through that calls the provider on the caller's task, or a shared
//! background worker reached over message-passing channels. Background
//! responses can arrive in any order; they are matched back to callers
//! purely by correlation id.

mod dispatcher;
mod message;
mod transport;
mod worker;

pub use dispatcher::Dispatcher;
pub use message::{SearchRequest, SearchResponse};
