//! Request lifecycle as one value.
//!
//! The classic bug this replaces: a struct of `data` / `error` /
//! `is_loading` fields has eight representable states, of which only a few
//! mean anything. [`AsyncData<T>`] has exactly the meaningful ones, and
//! [`AsyncResult<T, E>`] (`AsyncData<Result<T, E>>`) models a fallible
//! request with exactly four reachable states: not asked, loading, settled
//! ok, settled failed. Nothing else is constructible.

use crate::tag::{Tag, TagFamily, Tagged};

/// Family descriptor for [`AsyncData`].
pub const ASYNC_DATA: TagFamily = TagFamily::new("async_data", &["not_asked", "loading", "done"]);

/// Lifecycle of a value produced by an asynchronous operation.
///
/// Values are immutable once constructed; combinators return new values.
/// The type does not police transition order; sequencing a real request
/// is the job of [`Request`](crate::store::Request).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "state", content = "value", rename_all = "snake_case")
)]
pub enum AsyncData<T> {
    NotAsked,
    Loading,
    Done(T),
}

impl<T> Default for AsyncData<T> {
    fn default() -> Self {
        AsyncData::NotAsked
    }
}

impl<T> AsyncData<T> {
    /// Applies `f` under `Done`; `NotAsked` and `Loading` pass through.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AsyncData<U> {
        match self {
            AsyncData::NotAsked => AsyncData::NotAsked,
            AsyncData::Loading => AsyncData::Loading,
            AsyncData::Done(value) => AsyncData::Done(f(value)),
        }
    }

    /// Chains a step that itself reports request state.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> AsyncData<U>) -> AsyncData<U> {
        match self {
            AsyncData::NotAsked => AsyncData::NotAsked,
            AsyncData::Loading => AsyncData::Loading,
            AsyncData::Done(value) => f(value),
        }
    }

    pub fn as_ref(&self) -> AsyncData<&T> {
        match self {
            AsyncData::NotAsked => AsyncData::NotAsked,
            AsyncData::Loading => AsyncData::Loading,
            AsyncData::Done(value) => AsyncData::Done(value),
        }
    }

    pub fn is_not_asked(&self) -> bool {
        matches!(self, AsyncData::NotAsked)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AsyncData::Loading)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, AsyncData::Done(_))
    }

    /// The settled value, if any.
    pub fn done(self) -> Option<T> {
        match self {
            AsyncData::Done(value) => Some(value),
            _ => None,
        }
    }

    pub fn unwrap_or_else(self, f: impl FnOnce() -> T) -> T {
        match self {
            AsyncData::Done(value) => value,
            _ => f(),
        }
    }

    /// Exhaustive terminal match.
    pub fn fold<R>(
        self,
        on_not_asked: impl FnOnce() -> R,
        on_loading: impl FnOnce() -> R,
        on_done: impl FnOnce(T) -> R,
    ) -> R {
        match self {
            AsyncData::NotAsked => on_not_asked(),
            AsyncData::Loading => on_loading(),
            AsyncData::Done(value) => on_done(value),
        }
    }
}

impl<T> From<Option<T>> for AsyncData<T> {
    /// `Some` is a settled value; `None` is a request never made.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => AsyncData::Done(value),
            None => AsyncData::NotAsked,
        }
    }
}

impl<T> Tagged for AsyncData<T> {
    const FAMILY: TagFamily = ASYNC_DATA;

    fn tag(&self) -> Tag {
        match self {
            AsyncData::NotAsked => "not_asked",
            AsyncData::Loading => "loading",
            AsyncData::Done(_) => "done",
        }
    }
}

/// A fallible request: lifecycle outside, success/failure inside.
pub type AsyncResult<T, E> = AsyncData<Result<T, E>>;

impl<T, E> AsyncData<Result<T, E>> {
    /// Maps the success payload of a settled request.
    pub fn map_ok<U>(self, f: impl FnOnce(T) -> U) -> AsyncResult<U, E> {
        self.map(|r| r.map(f))
    }

    /// Maps the error payload of a settled request.
    pub fn map_err<F>(self, f: impl FnOnce(E) -> F) -> AsyncResult<T, F> {
        self.map(|r| r.map_err(f))
    }

    /// Chains a fallible step under `Done(Ok(_))`.
    pub fn and_then_ok<U>(self, f: impl FnOnce(T) -> Result<U, E>) -> AsyncResult<U, E> {
        self.map(|r| r.and_then(f))
    }

    /// The successful payload of a settled request, if any.
    pub fn ok(self) -> Option<T> {
        self.done().and_then(Result::ok)
    }

    /// Collapses the nested pair in one exhaustive match over the four
    /// reachable states.
    pub fn resolve<R>(
        self,
        on_not_asked: impl FnOnce() -> R,
        on_loading: impl FnOnce() -> R,
        on_ok: impl FnOnce(T) -> R,
        on_err: impl FnOnce(E) -> R,
    ) -> R {
        match self {
            AsyncData::NotAsked => on_not_asked(),
            AsyncData::Loading => on_loading(),
            AsyncData::Done(Ok(value)) => on_ok(value),
            AsyncData::Done(Err(error)) => on_err(error),
        }
    }
}
