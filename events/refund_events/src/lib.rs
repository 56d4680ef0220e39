use bevy::prelude::*;

/// Event fired by the host when a player demolishes a structure.
/// Used with observers via commands.trigger().
#[derive(Event)]
pub struct DemolishStructure {
    pub player: Entity,
    pub structure: Entity,
}

/// Outbound request to the host's item subsystem: create `quantity` of
/// `item_id` and hand it to the recipient.
#[derive(Message, Reflect)]
#[reflect(Default)]
pub struct GrantItem {
    pub recipient: Entity,
    pub item_id: i32,
    pub quantity: u32,
}

impl Default for GrantItem {
    fn default() -> Self {
        Self {
            recipient: Entity::PLACEHOLDER,
            item_id: 0,
            quantity: 0,
        }
    }
}

/// Outbound chat message to a single player.
#[derive(Message, Reflect)]
#[reflect(Default)]
pub struct PlayerNotification {
    pub recipient: Entity,
    pub text: String,
}

impl Default for PlayerNotification {
    fn default() -> Self {
        Self {
            recipient: Entity::PLACEHOLDER,
            text: String::new(),
        }
    }
}

pub struct RefundEventsPlugin;

impl Plugin for RefundEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<GrantItem>()
            .add_message::<PlayerNotification>()
            .register_type::<GrantItem>()
            .register_type::<PlayerNotification>();
    }
}
