//! The presence family: std [`Option`] as a tagged, matchable container.
//!
//! `Option` already carries the algebra this crate relies on: `map` and
//! `and_then` short-circuit on `None`, so an absent value stays absent for
//! the rest of a pipeline. This module adds the pieces std leaves out: the
//! boundary normalizer, the exhaustive terminal fold, and family metadata
//! for the dynamic dispatch layer.

use crate::tag::{Tag, TagFamily, Tagged};

/// Family descriptor for [`Option`].
pub const OPTION: TagFamily = TagFamily::new("option", &["some", "none"]);

impl<T> Tagged for Option<T> {
    const FAMILY: TagFamily = OPTION;

    fn tag(&self) -> Tag {
        match self {
            Some(_) => "some",
            None => "none",
        }
    }
}

/// Normalizes an optional-ish value at an API edge.
///
/// Ambient "maybe absent" inputs (`T`, `Option<T>`) all funnel into a plain
/// `Option<T>` here, so downstream code matches one shape only.
///
/// ```rust
/// use sumstate_core::from_nullable;
///
/// assert_eq!(from_nullable(5).map(|n| n * 2), Some(10));
/// assert_eq!(from_nullable::<i32>(None::<i32>).map(|n| n * 2), None);
/// ```
pub fn from_nullable<T>(value: impl Into<Option<T>>) -> Option<T> {
    value.into()
}

/// Terminal match for [`Option`].
pub trait OptionExt<T> {
    /// Exhaustive two-handler match producing a plain value.
    fn fold<R>(self, on_some: impl FnOnce(T) -> R, on_none: impl FnOnce() -> R) -> R;
}

impl<T> OptionExt<T> for Option<T> {
    fn fold<R>(self, on_some: impl FnOnce(T) -> R, on_none: impl FnOnce() -> R) -> R {
        match self {
            Some(value) => on_some(value),
            None => on_none(),
        }
    }
}
