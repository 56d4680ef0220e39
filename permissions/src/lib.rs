//! Capability registry standing in for the host's access-control
//! subsystem. Plugins register named capabilities at startup; grants are
//! managed by the hosting harness (console commands, admin tooling) and
//! only queried here.

use {
    bevy::prelude::*,
    std::collections::{HashMap, HashSet},
};

#[derive(Resource, Default, Debug)]
pub struct CapabilityRegistry {
    registered: HashSet<String>,
    grants: HashMap<u64, HashSet<String>>,
}

impl CapabilityRegistry {
    /// Registers a capability name. Idempotent.
    pub fn register(&mut self, capability: &str) {
        if self.registered.insert(capability.to_string()) {
            debug!("registered capability '{}'", capability);
        }
    }

    pub fn is_registered(&self, capability: &str) -> bool {
        self.registered.contains(capability)
    }

    pub fn grant(&mut self, user_id: u64, capability: &str) {
        self.grants
            .entry(user_id)
            .or_default()
            .insert(capability.to_string());
    }

    pub fn revoke(&mut self, user_id: u64, capability: &str) {
        if let Some(capabilities) = self.grants.get_mut(&user_id) {
            capabilities.remove(capability);
        }
    }

    /// Pure query: does the user hold a registered capability?
    /// Unregistered capabilities are never held, whatever the grant table
    /// says.
    pub fn user_has(&self, user_id: u64, capability: &str) -> bool {
        self.registered.contains(capability)
            && self
                .grants
                .get(&user_id)
                .is_some_and(|capabilities| capabilities.contains(capability))
    }
}

pub struct PermissionsPlugin;

impl Plugin for PermissionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CapabilityRegistry>();
    }
}
