//! Observable store and request driver.
//!
//! [`Store<T>`] is a cloneable handle to a single-threaded observable cell;
//! clones share the same slot and subscribers run synchronously after every
//! write. [`Request<T, E>`] drives the `NotAsked → Loading → Done` sequence
//! for one logical request into a `Store<AsyncResult<T, E>>`. The states
//! themselves are plain immutable values, so an out-of-order report cannot
//! corrupt anything; it is merely suspicious and gets logged.

use std::cell::RefCell;
use std::rc::Rc;

use crate::async_data::{AsyncData, AsyncResult};

pub type SubId = usize;

pub struct Store<T: 'static> {
    inner: Rc<RefCell<StoreInner<T>>>,
}

struct StoreInner<T> {
    value: T,
    next_sub: SubId,
    subs: Vec<(SubId, Box<dyn Fn(&T)>)>,
}

impl<T> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                value,
                next_sub: 0,
                subs: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.borrow().value.clone()
    }

    /// Reads the value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    pub fn set(&self, value: T) {
        let mut inner = self.inner.borrow_mut();
        inner.value = value;
        // Subscribers run under the borrow; they must not write back into
        // the same store.
        let value = &inner.value;
        for (_, sub) in &inner.subs {
            sub(value);
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut inner = self.inner.borrow_mut();
        f(&mut inner.value);
        let value = &inner.value;
        for (_, sub) in &inner.subs {
            sub(value);
        }
    }

    /// Registers `f` to run after every write. Returns an id for
    /// [`Store::unsubscribe`].
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_sub;
        inner.next_sub += 1;
        inner.subs.push((id, Box::new(f)));
        id
    }

    /// Removes a subscriber; returns whether it was present.
    pub fn unsubscribe(&self, id: SubId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.subs.len();
        inner.subs.retain(|(sid, _)| *sid != id);
        inner.subs.len() != before
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Sequences one logical request into an observable [`Store`].
pub struct Request<T: 'static, E: 'static> {
    state: Store<AsyncResult<T, E>>,
}

impl<T, E> Request<T, E> {
    pub fn new() -> Self {
        Self {
            state: Store::new(AsyncData::NotAsked),
        }
    }

    /// Observable handle to the request state.
    pub fn store(&self) -> Store<AsyncResult<T, E>> {
        self.state.clone()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AsyncResult<T, E>
    where
        T: Clone,
        E: Clone,
    {
        self.state.get()
    }

    /// Marks the request in flight.
    pub fn begin(&self) {
        if self.state.with(AsyncData::is_loading) {
            log::warn!("request begun while already loading; restarting");
        }
        self.state.set(AsyncData::Loading);
    }

    /// Settles the request with the outcome of the fetch.
    pub fn finish(&self, outcome: Result<T, E>) {
        if !self.state.with(AsyncData::is_loading) {
            log::warn!("request finished without a begin; accepting the result");
        }
        self.state.set(AsyncData::Done(outcome));
    }

    /// Forgets the request, back to `NotAsked`.
    pub fn reset(&self) {
        self.state.set(AsyncData::NotAsked);
    }
}

impl<T, E> Default for Request<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Request<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}
