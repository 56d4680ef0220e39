use {
    bevy::prelude::*,
    building_components::{BuildingBlock, BuildingGrades, ConstructionGrade},
    item_assets::{ItemDefinition, ItemRegistry},
    localization::MessageCatalog,
    permissions::CapabilityRegistry,
    player_components::Player,
    refund::{BuildRefundPlugin, DemolitionOutcome, USE_PERMISSION, systems::handle_demolition},
    refund_config::{ConfigPath, RefundConfig},
    refund_events::{DemolishStructure, GrantItem, PlayerNotification},
};

const WOOD: i32 = -151838493;
const STONES: i32 = -2099697608;
const USER: u64 = 76561198000000001;

#[derive(Resource, Default)]
struct SeenGrants(Vec<(i32, u32)>);

#[derive(Resource, Default)]
struct SeenNotifications(Vec<String>);

#[derive(Resource, Default)]
struct LastOutcome(Option<DemolitionOutcome>);

/// Mirrors the plugin's observer but records the pipeline outcome, for
/// tests that assert on it directly.
#[allow(clippy::too_many_arguments)]
fn record_outcome(
    trigger: On<DemolishStructure>,
    players: Query<&Player>,
    blocks: Query<(&BuildingBlock, &BuildingGrades)>,
    config: Res<RefundConfig>,
    capabilities: Res<CapabilityRegistry>,
    items: Res<ItemRegistry>,
    catalog: Res<MessageCatalog>,
    mut grants: MessageWriter<GrantItem>,
    mut notifications: MessageWriter<PlayerNotification>,
    mut last: ResMut<LastOutcome>,
) {
    last.0 = Some(handle_demolition(
        trigger.event(),
        &players,
        &blocks,
        &config,
        &capabilities,
        &items,
        &catalog,
        &mut grants,
        &mut notifications,
    ));
}

fn collect_grants(mut reader: MessageReader<GrantItem>, mut seen: ResMut<SeenGrants>) {
    for grant in reader.read() {
        seen.0.push((grant.item_id, grant.quantity));
    }
}

fn collect_notifications(
    mut reader: MessageReader<PlayerNotification>,
    mut seen: ResMut<SeenNotifications>,
) {
    for message in reader.read() {
        seen.0.push(message.text.clone());
    }
}

/// Host stand-in: minimal app with the plugin installed, spying on the
/// outbound grant and chat traffic. Startup has already run on return.
fn test_app(name: &str) -> App {
    let config_path = std::env::temp_dir().join(format!(
        "build_refund_it_{}_{}.json",
        std::process::id(),
        name
    ));
    std::fs::remove_file(&config_path).ok();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(AssetPlugin::default())
        .insert_resource(ConfigPath(config_path))
        .add_plugins(BuildRefundPlugin)
        .init_resource::<SeenGrants>()
        .init_resource::<SeenNotifications>()
        .add_systems(Update, (collect_grants, collect_notifications));
    app.update();
    app
}

fn seed_item(app: &mut App, id: i32, short_name: &str, display_name: &str) {
    app.world_mut()
        .resource_mut::<ItemRegistry>()
        .insert(ItemDefinition {
            id,
            short_name: short_name.to_string(),
            display_name: display_name.to_string(),
        });
}

fn spawn_player(app: &mut App, has_permission: bool, locale: Option<&str>) -> Entity {
    if has_permission {
        app.world_mut()
            .resource_mut::<CapabilityRegistry>()
            .grant(USER, USE_PERMISSION);
    }
    app.world_mut()
        .spawn(Player {
            user_id: USER,
            display_name: "Tester".to_string(),
            locale: locale.map(str::to_string),
        })
        .id()
}

/// Wall placed at Twigs (wood 100), upgraded to Stone (wood 200 + stones 50).
fn spawn_upgraded_wall(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            BuildingBlock {
                short_name: "wall".to_string(),
            },
            BuildingGrades {
                base: ConstructionGrade {
                    name: "Twigs".to_string(),
                    costs: [(WOOD, 100.0)].into_iter().collect(),
                },
                current: ConstructionGrade {
                    name: "Stone".to_string(),
                    costs: [(WOOD, 200.0), (STONES, 50.0)].into_iter().collect(),
                },
            },
        ))
        .id()
}

fn demolish(app: &mut App, player: Entity, structure: Entity) {
    app.world_mut().trigger(DemolishStructure { player, structure });
    app.update();
}

#[test]
fn full_refund_flow_grants_items_and_sends_summary() {
    let mut app = test_app("full_flow");
    seed_item(&mut app, WOOD, "wood", "Wood");
    seed_item(&mut app, STONES, "stones", "Stones");

    let player = spawn_player(&mut app, true, None);
    let wall = spawn_upgraded_wall(&mut app);
    demolish(&mut app, player, wall);

    // BTreeMap order: the stones id is numerically smaller than wood's.
    let grants = &app.world().resource::<SeenGrants>().0;
    assert_eq!(grants, &vec![(STONES, 50), (WOOD, 100)]);

    let notifications = &app.world().resource::<SeenNotifications>().0;
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0],
        "Refund issued for demolishing wall (Grade: Stone):\n- Stones x50\n- Wood x100"
    );
}

#[test]
fn configured_percentage_scales_grants() {
    let mut app = test_app("halved");
    seed_item(&mut app, WOOD, "wood", "Wood");
    seed_item(&mut app, STONES, "stones", "Stones");
    app.insert_resource(RefundConfig {
        refund_percentage: 50,
        ..Default::default()
    });

    let player = spawn_player(&mut app, true, None);
    let wall = spawn_upgraded_wall(&mut app);
    demolish(&mut app, player, wall);

    let grants = &app.world().resource::<SeenGrants>().0;
    assert_eq!(grants, &vec![(STONES, 25), (WOOD, 50)]);
}

#[test]
fn player_without_permission_gets_nothing() {
    let mut app = test_app("no_permission");
    seed_item(&mut app, WOOD, "wood", "Wood");
    seed_item(&mut app, STONES, "stones", "Stones");

    let player = spawn_player(&mut app, false, None);
    let wall = spawn_upgraded_wall(&mut app);
    demolish(&mut app, player, wall);

    assert!(app.world().resource::<SeenGrants>().0.is_empty());
    assert!(app.world().resource::<SeenNotifications>().0.is_empty());
}

#[test]
fn actor_without_player_data_is_ignored() {
    let mut app = test_app("missing_actor");
    seed_item(&mut app, WOOD, "wood", "Wood");
    seed_item(&mut app, STONES, "stones", "Stones");

    // The event names an entity the host never attached player data to.
    let ghost = app.world_mut().spawn_empty().id();
    let wall = spawn_upgraded_wall(&mut app);
    demolish(&mut app, ghost, wall);

    assert!(app.world().resource::<SeenGrants>().0.is_empty());
    assert!(app.world().resource::<SeenNotifications>().0.is_empty());
}

#[test]
fn non_gradable_structure_is_ignored() {
    let mut app = test_app("non_gradable");
    seed_item(&mut app, WOOD, "wood", "Wood");

    let player = spawn_player(&mut app, true, None);
    // A barricade-style object: demolishable, but carries no grade data.
    let barricade = app
        .world_mut()
        .spawn(BuildingBlock {
            short_name: "barricade".to_string(),
        })
        .id();
    demolish(&mut app, player, barricade);

    assert!(app.world().resource::<SeenGrants>().0.is_empty());
    assert!(app.world().resource::<SeenNotifications>().0.is_empty());
}

#[test]
fn unresolvable_item_is_skipped_but_others_proceed() {
    let mut app = test_app("grant_failure");
    // Stones deliberately missing from the registry.
    seed_item(&mut app, WOOD, "wood", "Wood");

    let player = spawn_player(&mut app, true, None);
    let wall = spawn_upgraded_wall(&mut app);
    demolish(&mut app, player, wall);

    let grants = &app.world().resource::<SeenGrants>().0;
    assert_eq!(grants, &vec![(WOOD, 100)]);

    let notifications = &app.world().resource::<SeenNotifications>().0;
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].contains("- Wood x100"));
    assert!(!notifications[0].contains("Stones"));
}

#[test]
fn refund_with_no_resolvable_items_is_not_applicable() {
    let mut app = test_app("all_unresolvable");
    app.init_resource::<LastOutcome>();
    app.add_observer(record_outcome);

    // Empty item registry: every refund entry fails to resolve.
    let player = spawn_player(&mut app, true, None);
    let wall = spawn_upgraded_wall(&mut app);
    demolish(&mut app, player, wall);

    assert!(app.world().resource::<SeenGrants>().0.is_empty());
    assert!(app.world().resource::<SeenNotifications>().0.is_empty());
    assert_eq!(
        app.world().resource::<LastOutcome>().0,
        Some(DemolitionOutcome::NotApplicable)
    );
}

#[test]
fn summary_uses_recipient_locale_when_translated() {
    let mut app = test_app("locale");
    seed_item(&mut app, WOOD, "wood", "Wood");
    seed_item(&mut app, STONES, "stones", "Stones");
    app.world_mut()
        .resource_mut::<MessageCatalog>()
        .register(
            "cs",
            r#"refund-summary =
    Vraceno za demolici { $structure } ({ $grade }):
    { $items }
"#,
        )
        .unwrap();

    let player = spawn_player(&mut app, true, Some("cs"));
    let wall = spawn_upgraded_wall(&mut app);
    demolish(&mut app, player, wall);

    let notifications = &app.world().resource::<SeenNotifications>().0;
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].starts_with("Vraceno za demolici wall (Stone):"));
}
