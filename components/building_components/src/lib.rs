use {bevy::prelude::*, std::collections::HashMap};

/// Material costs for one construction grade.
/// Maps material item id to the quantity required to build that grade.
#[derive(Reflect, Default, Debug, Clone, PartialEq)]
pub struct CostTable(pub HashMap<i32, f32>);

impl CostTable {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(i32, f32)> for CostTable {
    fn from_iter<T: IntoIterator<Item = (i32, f32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One upgrade grade of a building block (e.g., Twigs, Wood, Stone).
#[derive(Reflect, Default, Debug, Clone)]
pub struct ConstructionGrade {
    pub name: String,
    pub costs: CostTable,
}

/// A demolishable building structure.
#[derive(Component, Debug, Reflect)]
#[reflect(Component)]
pub struct BuildingBlock {
    /// Short prefab-style name used in player-facing messages (e.g., "wall").
    pub short_name: String,
}

/// Grade data for a gradable structure. Structures without this component
/// (non-upgradable objects) fall outside the refund domain.
#[derive(Component, Debug, Reflect)]
#[reflect(Component)]
pub struct BuildingGrades {
    /// The grade the structure was originally placed at.
    pub base: ConstructionGrade,
    /// The grade the structure currently stands at.
    pub current: ConstructionGrade,
}

pub struct BuildingComponentsPlugin;

impl Plugin for BuildingComponentsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CostTable>()
            .register_type::<ConstructionGrade>()
            .register_type::<BuildingBlock>()
            .register_type::<BuildingGrades>();
    }
}
