//! Item metadata definitions and the id -> display name lookup.
//!
//! Definitions are loaded from `.item.ron` files; the hosting harness may
//! also insert entries into [`ItemRegistry`] directly (tests do).

use {
    bevy::prelude::*, bevy_common_assets::ron::RonAssetPlugin, serde::Deserialize,
    std::collections::HashMap,
};

/// Item definition loaded from `.item.ron` asset files.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct ItemDefinition {
    /// Numeric item id as the host's item subsystem knows it.
    pub id: i32,
    /// Stable short name (e.g., "metal.fragments").
    pub short_name: String,
    /// Translated name shown to players.
    pub display_name: String,
}

/// Read-only lookup from item id to its metadata.
#[derive(Resource, Default, Debug)]
pub struct ItemRegistry {
    entries: HashMap<i32, ItemDefinition>,
}

impl ItemRegistry {
    pub fn insert(&mut self, definition: ItemDefinition) {
        self.entries.insert(definition.id, definition);
    }

    pub fn contains(&self, id: i32) -> bool {
        self.entries.contains_key(&id)
    }

    /// Display name for an item id, `None` for ids the host has no
    /// definition for.
    pub fn resolve(&self, id: i32) -> Option<&str> {
        self.entries.get(&id).map(|def| def.display_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct ItemAssetsPlugin;

impl Plugin for ItemAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<ItemDefinition>::new(&["item.ron"]))
            .init_resource::<ItemRegistry>()
            .add_systems(Update, index_item_definitions);
    }
}

/// Folds loaded item definitions into the registry. Already-indexed ids
/// are skipped, so re-running is cheap and idempotent.
fn index_item_definitions(
    assets: Res<Assets<ItemDefinition>>,
    mut registry: ResMut<ItemRegistry>,
) {
    for (_, definition) in assets.iter() {
        if !registry.contains(definition.id) {
            debug!(
                "indexed item {} ('{}')",
                definition.id, definition.short_name
            );
            registry.insert(definition.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_returns_display_name() {
        let mut registry = ItemRegistry::default();
        registry.insert(ItemDefinition {
            id: 69511070,
            short_name: "metal.fragments".to_string(),
            display_name: "Metal Fragments".to_string(),
        });

        assert_eq!(registry.resolve(69511070), Some("Metal Fragments"));
        assert_eq!(registry.resolve(12345), None);
    }

    #[test]
    fn ron_definition_parses() {
        let definition: ItemDefinition = ron::de::from_str(
            r#"(id: -151838493, short_name: "wood", display_name: "Wood")"#,
        )
        .unwrap();
        assert_eq!(definition.id, -151838493);
        assert_eq!(definition.display_name, "Wood");
    }
}
