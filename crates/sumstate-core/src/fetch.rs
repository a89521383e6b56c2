//! Boundary adapter from flag-product fetch results.
//!
//! Data-fetching layers typically hand back three independent fields
//! (`data`, `error`, `is_loading`) whose 2³ combinations include four that
//! should be impossible. [`FetchFlags::into_async`] collapses all eight
//! deterministically into an [`AsyncResult`] using the precedence
//! **data > error > loading > none**:
//!
//! | `data`  | `error` | `is_loading` | result            |
//! |---------|---------|--------------|-------------------|
//! | present | *any*   | *any*        | `Done(Ok(data))`  |
//! | absent  | present | *any*        | `Done(Err(error))`|
//! | absent  | absent  | `true`       | `Loading`         |
//! | absent  | absent  | `false`      | `NotAsked`        |
//!
//! The precedence is a policy, not an accident: data alongside
//! `is_loading` is a refresh in flight and the settled payload still wins;
//! data alongside an error is a failed background refresh and the last
//! good payload still wins. The latter pair is contradictory input, so it
//! is logged before being resolved.

use crate::async_data::{AsyncData, AsyncResult};

/// Raw result shape of a data-fetching layer: three independent fields
/// where only four combinations are meaningful.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct FetchFlags<T, E> {
    pub data: Option<T>,
    pub error: Option<E>,
    pub is_loading: bool,
}

impl<T, E> Default for FetchFlags<T, E> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
        }
    }
}

impl<T, E> FetchFlags<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapses the flag product into the canonical request state.
    ///
    /// Total and deterministic over all eight raw combinations; see the
    /// module docs for the precedence table.
    pub fn into_async(self) -> AsyncResult<T, E> {
        if self.data.is_some() && self.error.is_some() {
            log::warn!("fetch flags carry both data and an error; keeping data");
        }
        if let Some(data) = self.data {
            AsyncData::Done(Ok(data))
        } else if let Some(error) = self.error {
            AsyncData::Done(Err(error))
        } else if self.is_loading {
            AsyncData::Loading
        } else {
            AsyncData::NotAsked
        }
    }
}

impl<T, E> From<FetchFlags<T, E>> for AsyncResult<T, E> {
    fn from(flags: FetchFlags<T, E>) -> Self {
        flags.into_async()
    }
}
