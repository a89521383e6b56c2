//! # Dynamic tagged dispatch
//!
//! For plain Rust enums, `match` is the exhaustive matcher: every container
//! combinator in this crate is a `match` expression, so removing a variant
//! arm is a compile error, not a runtime surprise. This module covers the
//! other case: dispatch keyed by *runtime* tags (inspector tables, wire
//! tags, table-driven rendering), where completeness has to be validated
//! when the table is built rather than by the compiler:
//!
//! ```rust
//! use sumstate_core::prelude::*;
//!
//! let render: CaseTable<AsyncData<u32>, &'static str> = Cases::new()
//!     .on("not_asked", |_| "idle")
//!     .on("loading", |_| "spinner")
//!     .on("done", |_| "value")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(render.apply(&AsyncData::Loading).unwrap(), "spinner");
//! ```
//!
//! A table missing a handler, carrying a handler for a foreign tag, or
//! naming the same tag twice fails in [`Cases::build`] with a [`MatchError`]
//! identifying the offending discriminant. Dispatch itself can only fail if
//! a [`Tagged`] impl reports a tag outside its declared family.

use std::cell::RefCell;
use std::collections::HashMap;

use smallvec::SmallVec;

/// Discriminant label of a tagged value, e.g. `"loading"`.
pub type Tag = &'static str;

/// Closed set of discriminants for one variant family.
///
/// The set is fixed at the definition site; matchers are validated against
/// exactly this set, no more, no fewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagFamily {
    pub name: &'static str,
    pub tags: &'static [Tag],
}

impl TagFamily {
    pub const fn new(name: &'static str, tags: &'static [Tag]) -> Self {
        Self { name, tags }
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.tags.iter().any(|t| *t == tag)
    }
}

/// A value whose discriminant can be read at runtime as a [`Tag`] drawn
/// from a closed [`TagFamily`].
pub trait Tagged {
    const FAMILY: TagFamily;

    /// The discriminant of this value. Must be a member of `Self::FAMILY`.
    fn tag(&self) -> Tag;
}

thread_local! {
    static FAMILIES: RefCell<HashMap<&'static str, &'static [Tag]>> =
        RefCell::new(HashMap::new());
}

/// Records `family` in the thread-local registry.
///
/// Registering the same name again is fine as long as the tag set matches;
/// a mismatch means two types claim the same family name.
pub fn register_family(family: TagFamily) -> Result<(), MatchError> {
    FAMILIES.with(|reg| {
        let mut reg = reg.borrow_mut();
        match reg.get(family.name) {
            Some(tags) if *tags == family.tags => Ok(()),
            Some(_) => Err(MatchError::FamilyMismatch {
                family: family.name,
            }),
            None => {
                reg.insert(family.name, family.tags);
                Ok(())
            }
        }
    })
}

/// Looks up a registered family by name.
pub fn family(name: &str) -> Option<TagFamily> {
    FAMILIES.with(|reg| {
        reg.borrow()
            .get_key_value(name)
            .map(|(&name, &tags)| TagFamily { name, tags })
    })
}

/// Failures of building or applying a [`CaseTable`].
///
/// The first three are construction-time: a bad table never exists.
/// `UnknownTag` is dispatch-time and reachable only through a [`Tagged`]
/// impl that violates its declared family.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("family `{family}`: no handler for tag `{missing}`")]
    MissingHandler { family: &'static str, missing: Tag },
    #[error("family `{family}`: handler for foreign tag `{tag}`")]
    ForeignHandler { family: &'static str, tag: Tag },
    #[error("family `{family}`: duplicate handler for tag `{tag}`")]
    DuplicateHandler { family: &'static str, tag: Tag },
    #[error("family `{family}`: value carries unknown tag `{tag}`")]
    UnknownTag { family: &'static str, tag: Tag },
    #[error("family `{family}` registered twice with different tag sets")]
    FamilyMismatch { family: &'static str },
}

type Arm<V, R> = (Tag, Box<dyn Fn(&V) -> R>);

/// Builder for a [`CaseTable`].
///
/// Arms are recorded unconditionally; all validation happens in
/// [`Cases::build`], so a bad mapping fails where it is constructed, not
/// where it is applied.
pub struct Cases<V, R> {
    arms: SmallVec<[Arm<V, R>; 4]>,
}

impl<V: Tagged, R> Cases<V, R> {
    pub fn new() -> Self {
        Self {
            arms: SmallVec::new(),
        }
    }

    /// Adds the handler for `tag`.
    pub fn on(mut self, tag: Tag, handler: impl Fn(&V) -> R + 'static) -> Self {
        let handler: Box<dyn Fn(&V) -> R> = Box::new(handler);
        self.arms.push((tag, handler));
        self
    }

    /// Validates the mapping against `V`'s family: exactly one handler per
    /// family tag.
    pub fn build(self) -> Result<CaseTable<V, R>, MatchError> {
        let fam = V::FAMILY;
        register_family(fam)?;
        for (i, (tag, _)) in self.arms.iter().enumerate() {
            let tag = *tag;
            if !fam.contains(tag) {
                return Err(MatchError::ForeignHandler {
                    family: fam.name,
                    tag,
                });
            }
            if self.arms[..i].iter().any(|(t, _)| *t == tag) {
                return Err(MatchError::DuplicateHandler {
                    family: fam.name,
                    tag,
                });
            }
        }
        if let Some(missing) = fam
            .tags
            .iter()
            .copied()
            .find(|t| !self.arms.iter().any(|(a, _)| a == t))
        {
            return Err(MatchError::MissingHandler {
                family: fam.name,
                missing,
            });
        }
        Ok(CaseTable { arms: self.arms })
    }
}

impl<V: Tagged, R> Default for Cases<V, R> {
    fn default() -> Self {
        Self::new()
    }
}

/// A validated, exhaustive handler table over `V`'s family.
pub struct CaseTable<V, R> {
    arms: SmallVec<[Arm<V, R>; 4]>,
}

impl<V, R> std::fmt::Debug for CaseTable<V, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseTable")
            .field("arms", &self.arms.len())
            .finish()
    }
}

impl<V: Tagged, R> CaseTable<V, R> {
    /// Dispatches on `value.tag()` and returns the handler's result.
    ///
    /// Fails only when the value reports a tag outside its declared family;
    /// the error names the offending discriminant instead of silently
    /// picking a branch.
    pub fn apply(&self, value: &V) -> Result<R, MatchError> {
        let tag = value.tag();
        match self.arms.iter().find(|(t, _)| *t == tag) {
            Some((_, handler)) => Ok(handler(value)),
            None => Err(MatchError::UnknownTag {
                family: V::FAMILY.name,
                tag,
            }),
        }
    }
}
