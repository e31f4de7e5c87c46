//! Owner instance identity
//!
//! Field declarations keep per-instance values in a side table keyed by
//! [`InstanceId`]. An owner type embeds an [`Instance`]; dropping it purges
//! the instance's entries from every declaration it was written through.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use uuid::Uuid;

/// Stable identifier assigned when an instance is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(Uuid);

impl InstanceId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Target of the weak back-references held by value stores.
#[derive(Debug)]
pub struct InstanceToken {
    id: InstanceId,
}

impl InstanceToken {
    pub fn id(&self) -> InstanceId {
        self.id
    }
}

/// Purges one instance's entry. Implemented by value stores.
pub(crate) trait Teardown: Send + Sync {
    fn teardown(&self, id: InstanceId);
}

/// Identity of an owner object.
///
/// Not `Clone`: two owners never share an identity.
pub struct Instance {
    token: Arc<InstanceToken>,
    hooks: Mutex<Vec<Weak<dyn Teardown>>>,
}

impl Instance {
    pub fn new() -> Self {
        Self {
            token: Arc::new(InstanceToken {
                id: InstanceId::generate(),
            }),
            hooks: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.token.id
    }

    /// Non-owning reference to this instance.
    pub fn back_reference(&self) -> Weak<InstanceToken> {
        Arc::downgrade(&self.token)
    }

    /// Registers a store to purge on drop. Registering twice is a no-op.
    pub(crate) fn attach(&self, hook: Weak<dyn Teardown>) {
        let mut hooks = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
        if !hooks.iter().any(|h| Weak::ptr_eq(h, &hook)) {
            hooks.push(hook);
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance").field("id", &self.id()).finish_non_exhaustive()
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        let id = self.id();
        let hooks = std::mem::take(self.hooks.get_mut().unwrap_or_else(PoisonError::into_inner));
        for hook in hooks {
            // Stores whose declaration is already gone have nothing to purge
            if let Some(store) = hook.upgrade() {
                store.teardown(id);
            }
        }
    }
}
