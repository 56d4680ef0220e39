//! Headless demo harness standing in for the host game server: installs
//! the refund plugin, seeds one player and one upgraded wall, fires a
//! demolition, and logs the grant/notification traffic a real host would
//! consume.

use {
    bevy::{log::LogPlugin, prelude::*},
    building_components::{BuildingBlock, BuildingGrades, ConstructionGrade},
    item_assets::{ItemDefinition, ItemRegistry},
    permissions::CapabilityRegistry,
    player_components::Player,
    refund::{BuildRefundPlugin, USE_PERMISSION},
    refund_events::{DemolishStructure, GrantItem, PlayerNotification},
    std::time::Duration,
};

const WOOD: i32 = -151838493;
const STONES: i32 = -2099697608;
const DEMO_USER: u64 = 76561198000000001;

/// Keeps the demo item definition handles alive while they load.
#[derive(Resource)]
struct DemoItemAssets(Vec<Handle<ItemDefinition>>);

fn main() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin {
            filter: "info,\
                refund=debug,\
                refund_config=debug,\
                item_assets=debug"
                .into(),
            level: bevy::log::Level::DEBUG,
            ..Default::default()
        })
        .add_plugins(AssetPlugin::default())
        .add_plugins(BuildRefundPlugin)
        .add_systems(Startup, load_demo_items)
        .add_systems(Update, (report_grants, report_notifications));

    app.update();

    // Give the asset pipeline time to deliver the item definitions.
    for _ in 0..200 {
        if app.world().resource::<ItemRegistry>().len() >= 3 {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
        app.update();
    }

    let world = app.world_mut();
    world
        .resource_mut::<CapabilityRegistry>()
        .grant(DEMO_USER, USE_PERMISSION);

    let player = world
        .spawn(Player {
            user_id: DEMO_USER,
            display_name: "Demo Player".to_string(),
            locale: None,
        })
        .id();

    let wall = world
        .spawn((
            BuildingBlock {
                short_name: "wall".to_string(),
            },
            BuildingGrades {
                base: ConstructionGrade {
                    name: "Twigs".to_string(),
                    costs: [(WOOD, 50.0)].into_iter().collect(),
                },
                current: ConstructionGrade {
                    name: "Stone".to_string(),
                    costs: [(WOOD, 200.0), (STONES, 300.0)].into_iter().collect(),
                },
            },
        ))
        .id();

    world.trigger(DemolishStructure {
        player,
        structure: wall,
    });
    app.update();
}

fn load_demo_items(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handles = [
        "items/wood.item.ron",
        "items/stones.item.ron",
        "items/metal_fragments.item.ron",
    ]
    .map(|path| asset_server.load(path));
    commands.insert_resource(DemoItemAssets(handles.to_vec()));
}

fn report_grants(mut reader: MessageReader<GrantItem>) {
    for grant in reader.read() {
        info!(
            "host grant: item {} x{} -> {:?}",
            grant.item_id, grant.quantity, grant.recipient
        );
    }
}

fn report_notifications(mut reader: MessageReader<PlayerNotification>) {
    for message in reader.read() {
        info!("host chat -> {:?}:\n{}", message.recipient, message.text);
    }
}
