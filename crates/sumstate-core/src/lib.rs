//! # Sum-type state containers
//!
//! A request that is "not asked yet", "in flight", or "settled" is one value
//! of one type here, not three booleans that can contradict each other.
//! There are three main pieces:
//!
//! - [`AsyncData<T>`] — lifecycle of an asynchronous value, with
//!   [`AsyncResult<T, E>`] (`AsyncData<Result<T, E>>`) for fallible requests
//!   and combinators that reach through the nested pair.
//! - Boundary adapters — [`FetchFlags`] collapses the flag-product shape of
//!   data-fetching layers into an `AsyncResult`; [`from_nullable`]
//!   normalizes optional-ish inputs at API edges.
//! - Dynamic matching — [`Cases`] / [`CaseTable`] dispatch keyed by runtime
//!   tags, validated for exhaustiveness when the table is built. For plain
//!   enums, `match` already is the exhaustive matcher; the table exists for
//!   inspector-style and wire-keyed dispatch.
//!
//! ## From flags to one state
//!
//! ```rust
//! use sumstate_core::prelude::*;
//!
//! let flags = FetchFlags {
//!     data: Some(42),
//!     error: None::<String>,
//!     is_loading: true, // refresh in flight; settled data still wins
//! };
//! assert_eq!(flags.into_async(), AsyncData::Done(Ok(42)));
//! ```
//!
//! ## Pipelines end in an exhaustive match
//!
//! ```rust
//! use sumstate_core::prelude::*;
//!
//! fn render(state: AsyncResult<u32, String>) -> String {
//!     state.resolve(
//!         || "—".into(),
//!         || "loading…".into(),
//!         |n| format!("{n} items"),
//!         |e| format!("failed: {e}"),
//!     )
//! }
//!
//! assert_eq!(render(AsyncData::Loading), "loading…");
//! assert_eq!(render(AsyncData::Done(Ok(3))), "3 items");
//! ```
//!
//! ## Driving a request
//!
//! `AsyncData` values are terminal and immutable; sequencing them for a real
//! request is the job of [`Request`]:
//!
//! ```rust
//! use sumstate_core::prelude::*;
//!
//! let req = Request::<u32, String>::new();
//! assert!(req.state().is_not_asked());
//! req.begin();
//! req.finish(Ok(7));
//! assert_eq!(req.state().ok(), Some(7));
//! ```
//!
//! Errors are payload values inside `Result`, surfaced only through a
//! terminal match; there is no catch-all and no invisible failure path.

pub mod async_data;
pub mod fetch;
pub mod option;
pub mod prelude;
pub mod result;
pub mod store;
pub mod tag;
pub mod tests;

pub use async_data::*;
pub use fetch::*;
pub use option::*;
pub use result::*;
pub use store::*;
pub use tag::*;
