use humus_data::{CideRelease, ContaminantGroup, ContaminantPools, SoilCell, G_PER_KG};

/// Partitions every cide release into the four functional-group pools.
///
/// No degradation happens here; residues only leave through leaching.
/// Returns the mass added per group (g).
pub fn update_contaminants(cell: &mut SoilCell, cides: &[CideRelease]) -> ContaminantPools {
    let mut added = ContaminantPools::ZERO;

    for cide in cides {
        let total_kg = cide.total_kg.max(0.0);
        for group in ContaminantGroup::ALL {
            let share_g = total_kg * cide.partition[group].max(0.0) * G_PER_KG;
            cell.contaminants[group] += share_g;
            added[group] += share_g;
        }
    }

    added
}
