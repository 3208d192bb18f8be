//! Click handlers registered by the host.
//!
//! A [`HandlerRef`] is a shared, reference-counted capability. The node that
//! stores one holds exactly one strong handle; replacing or destroying the
//! node drops it, which is how the handle gets released.

use std::fmt;
use std::rc::{Rc, Weak};

use crate::errors::CallbackError;
use crate::state::StateStore;

/// User code run when a node is clicked.
pub trait Handler {
    fn call(&self, state: &mut StateStore) -> Result<(), CallbackError>;
}

impl<F> Handler for F
where
    F: Fn(&mut StateStore) -> Result<(), CallbackError>,
{
    fn call(&self, state: &mut StateStore) -> Result<(), CallbackError> {
        self(state)
    }
}

/// Shared handle to a [`Handler`].
#[derive(Clone)]
pub struct HandlerRef(Rc<dyn Handler>);

impl HandlerRef {
    pub fn new(handler: impl Handler + 'static) -> Self {
        HandlerRef(Rc::new(handler))
    }

    pub fn call(&self, state: &mut StateStore) -> Result<(), CallbackError> {
        self.0.call(state)
    }

    /// Whether both refer to the same handler instance.
    pub fn ptr_eq(&self, other: &HandlerRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of live handles to this handler.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// A non-owning observer, mostly useful for checking releases.
    pub fn downgrade(&self) -> WeakHandler {
        WeakHandler(Rc::downgrade(&self.0))
    }
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerRef")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Non-owning observer of a [`HandlerRef`].
#[derive(Clone)]
pub struct WeakHandler(Weak<dyn Handler>);

impl WeakHandler {
    /// Number of live strong handles; 0 once every owner released it.
    pub fn live_handles(&self) -> usize {
        self.0.strong_count()
    }
}

impl fmt::Debug for WeakHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakHandler")
            .field("live_handles", &self.live_handles())
            .finish()
    }
}
