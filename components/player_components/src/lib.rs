use bevy::prelude::*;

/// A connected player as the host server presents it to plugins.
#[derive(Component, Debug, Reflect)]
#[reflect(Component)]
pub struct Player {
    /// Stable numeric identity used by the permission subsystem.
    pub user_id: u64,
    pub display_name: String,
    /// Preferred locale for chat messages; `None` falls back to the
    /// default locale.
    pub locale: Option<String>,
}

pub struct PlayerComponentsPlugin;

impl Plugin for PlayerComponentsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Player>();
    }
}
