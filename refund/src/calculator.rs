use {
    building_components::CostTable,
    std::collections::{BTreeMap, HashMap},
};

/// Material id to strictly positive refund quantity. Ordered so grants
/// and summary lines come out deterministically.
pub type RefundTable = BTreeMap<i32, u32>;

/// Computes what demolishing a structure refunds: the positive cost
/// difference between the current grade and the base grade, scaled by
/// `percent` and rounded to whole items.
///
/// Materials that appear only in the base grade are never added — they
/// cannot produce a negative refund. Entries that end up at or below zero
/// (or round to zero) are dropped, so every returned quantity is >= 1.
pub fn compute_refund(base: &CostTable, current: &CostTable, percent: u32) -> RefundTable {
    let mut deltas: HashMap<i32, f32> = current.0.clone();

    for (id, amount) in &base.0 {
        if let Some(delta) = deltas.get_mut(id) {
            *delta -= amount;
        }
    }

    let factor = percent as f32 / 100.0;
    let mut refunds = RefundTable::new();
    for (id, delta) in deltas {
        if delta <= 0.0 {
            continue;
        }
        // f32::round rounds halves away from zero.
        let quantity = (delta * factor).round();
        if quantity >= 1.0 {
            refunds.insert(id, quantity as u32);
        }
    }

    refunds
}
