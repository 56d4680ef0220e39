//! Demolition refunds: tearing down an upgraded structure returns a
//! configurable percentage of the material difference between its current
//! grade and its base grade.

use {
    bevy::prelude::*,
    building_components::BuildingComponentsPlugin,
    item_assets::ItemAssetsPlugin,
    localization::{DEFAULT_LOCALE, LocalizationPlugin, MessageCatalog},
    permissions::{CapabilityRegistry, PermissionsPlugin},
    player_components::PlayerComponentsPlugin,
    refund_config::RefundConfigPlugin,
    refund_events::RefundEventsPlugin,
};

pub mod calculator;
pub mod systems;


pub use {
    calculator::{RefundTable, compute_refund},
    systems::DemolitionOutcome,
};

/// Capability a player must hold to receive demolition refunds.
pub const USE_PERMISSION: &str = "buildrefund.use";

const REFUND_MESSAGES_EN: &str = r#"refund-summary =
    Refund issued for demolishing { $structure } (Grade: { $grade }):
    { $items }
"#;

pub struct BuildRefundPlugin;

impl Plugin for BuildRefundPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            BuildingComponentsPlugin,
            PlayerComponentsPlugin,
            RefundEventsPlugin,
            RefundConfigPlugin,
            PermissionsPlugin,
            LocalizationPlugin,
            ItemAssetsPlugin,
        ))
        .add_systems(Startup, (register_capabilities, register_default_messages))
        .add_observer(systems::on_structure_demolished);
    }
}

fn register_capabilities(mut registry: ResMut<CapabilityRegistry>) {
    registry.register(USE_PERMISSION);
}

fn register_default_messages(mut catalog: ResMut<MessageCatalog>) {
    if let Err(error) = catalog.register(DEFAULT_LOCALE, REFUND_MESSAGES_EN) {
        error!("failed to register default refund messages: {}", error);
    }
}
