//! Single-slot state recording which tenant is active for a unit of work.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::ActiveTenant;

/// Holds at most one active tenant.
///
/// Pure state; no I/O, no validation. Set on connect, overwritten by a
/// later connect (no stacking), cleared on disconnect.
///
/// There is no ambient global: an instance is either owned by one request
/// scope (the default when each scope builds its own adapter), or shared
/// explicitly via `Clone`, which shares the slot. A shared slot is valid
/// only under one-request-at-a-time execution; the internal lock keeps the
/// slot itself consistent, not the callers' interleaving.
#[derive(Debug, Clone, Default)]
pub struct ContextHolder {
    slot: Arc<RwLock<Option<ActiveTenant>>>,
}

impl ContextHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the active tenant, replacing any previous value
    pub fn set(&self, tenant: ActiveTenant) {
        *self.slot.write() = Some(tenant);
    }

    /// The currently active tenant, if any
    pub fn get(&self) -> Option<ActiveTenant> {
        self.slot.read().clone()
    }

    /// Remove the active tenant
    pub fn clear(&self) {
        *self.slot.write() = None;
    }

    /// Whether a tenant is currently set
    pub fn has(&self) -> bool {
        self.slot.read().is_some()
    }
}
