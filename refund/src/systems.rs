use {
    crate::{USE_PERMISSION, calculator::compute_refund},
    bevy::prelude::*,
    building_components::{BuildingBlock, BuildingGrades},
    item_assets::ItemRegistry,
    localization::{self, MessageCatalog},
    permissions::CapabilityRegistry,
    player_components::Player,
    refund_config::RefundConfig,
    refund_events::{DemolishStructure, GrantItem, PlayerNotification},
};

/// Outcome of one demolition event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemolitionOutcome {
    /// The event fell outside the refund domain: missing actor or grade
    /// data, no permission, no upgrade delta, or nothing resolvable to
    /// grant. Nothing was sent.
    NotApplicable,
    /// At least one refund grant was dispatched.
    Handled,
}

/// Observer for host demolition events.
pub fn on_structure_demolished(
    trigger: On<DemolishStructure>,
    players: Query<&Player>,
    blocks: Query<(&BuildingBlock, &BuildingGrades)>,
    config: Res<RefundConfig>,
    capabilities: Res<CapabilityRegistry>,
    items: Res<ItemRegistry>,
    catalog: Res<MessageCatalog>,
    mut grants: MessageWriter<GrantItem>,
    mut notifications: MessageWriter<PlayerNotification>,
) {
    let event = trigger.event();
    let outcome = handle_demolition(
        event,
        &players,
        &blocks,
        &config,
        &capabilities,
        &items,
        &catalog,
        &mut grants,
        &mut notifications,
    );
    debug!("demolition of {:?}: {:?}", event.structure, outcome);
}

/// Runs the whole refund pipeline for one demolition: context checks,
/// permission gate, delta computation, grants, and the summary message.
#[allow(clippy::too_many_arguments)]
pub fn handle_demolition(
    event: &DemolishStructure,
    players: &Query<&Player>,
    blocks: &Query<(&BuildingBlock, &BuildingGrades)>,
    config: &RefundConfig,
    capabilities: &CapabilityRegistry,
    items: &ItemRegistry,
    catalog: &MessageCatalog,
    grants: &mut MessageWriter<GrantItem>,
    notifications: &mut MessageWriter<PlayerNotification>,
) -> DemolitionOutcome {
    // Entities without the expected components are outside the refund
    // domain: disconnected actors, non-gradable objects.
    let Ok(player) = players.get(event.player) else {
        return DemolitionOutcome::NotApplicable;
    };
    let Ok((block, grades)) = blocks.get(event.structure) else {
        return DemolitionOutcome::NotApplicable;
    };

    if !capabilities.user_has(player.user_id, USE_PERMISSION) {
        return DemolitionOutcome::NotApplicable;
    }

    let refunds = compute_refund(
        &grades.base.costs,
        &grades.current.costs,
        config.refund_percentage,
    );
    if refunds.is_empty() {
        return DemolitionOutcome::NotApplicable;
    }

    let mut lines = Vec::with_capacity(refunds.len());
    for (&item_id, &quantity) in &refunds {
        // The host has no definition for this id, so it cannot create the
        // item. Skip this material, the rest still proceed.
        let Some(display_name) = items.resolve(item_id) else {
            warn!("no item definition for id {}, skipping its refund", item_id);
            continue;
        };

        grants.write(GrantItem {
            recipient: event.player,
            item_id,
            quantity,
        });
        lines.push(localization::summary_line(display_name, quantity));
    }

    if lines.is_empty() {
        // Every computed entry was unresolvable; no grant went out.
        return DemolitionOutcome::NotApplicable;
    }

    if let Some(text) = localization::format_summary(
        catalog,
        player.locale.as_deref(),
        &block.short_name,
        &grades.current.name,
        &lines,
    ) {
        notifications.write(PlayerNotification {
            recipient: event.player,
            text,
        });
    }

    info!(
        "refunded {} material(s) to '{}' for demolishing '{}'",
        lines.len(),
        player.display_name,
        block.short_name
    );
    DemolitionOutcome::Handled
}
