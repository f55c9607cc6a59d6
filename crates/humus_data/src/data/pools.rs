use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Grams per kilogram.
pub const G_PER_KG: f64 = 1000.0;
/// Milligrams per gram.
pub const MG_PER_G: f64 = 1000.0;

/// Nutrient kinds held in every soil cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nutrient {
    /// Nitrogen.
    N,
    /// Phosphorus.
    P,
    /// Potassium.
    K,
    /// Carbon.
    C,
}

impl Nutrient {
    pub const ALL: [Nutrient; 4] = [Nutrient::N, Nutrient::P, Nutrient::K, Nutrient::C];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Nutrient::N => "N",
            Nutrient::P => "P",
            Nutrient::K => "K",
            Nutrient::C => "C",
        }
    }
}

/// Functional group a contaminant residue is attributed to.
///
/// This is an impact key, not a chemical class: one substance may load several
/// groups at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContaminantGroup {
    Pollinators,
    Pests,
    Soil,
    Weeds,
}

impl ContaminantGroup {
    pub const ALL: [ContaminantGroup; 4] = [
        ContaminantGroup::Pollinators,
        ContaminantGroup::Pests,
        ContaminantGroup::Soil,
        ContaminantGroup::Weeds,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ContaminantGroup::Pollinators => "pollinators",
            ContaminantGroup::Pests => "pests",
            ContaminantGroup::Soil => "soil",
            ContaminantGroup::Weeds => "weeds",
        }
    }
}

/// One value per nutrient kind. Units depend on context (g in pools, kg in
/// fertilizer releases, mg/day for bedrock rates).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientPools {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub c: f64,
}

impl NutrientPools {
    pub const ZERO: Self = Self {
        n: 0.0,
        p: 0.0,
        k: 0.0,
        c: 0.0,
    };

    #[must_use]
    pub fn new(n: f64, p: f64, k: f64, c: f64) -> Self {
        Self { n, p, k, c }
    }

    #[must_use]
    pub fn splat(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.n + self.p + self.k + self.c
    }

    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL.into_iter().map(move |kind| (kind, self[kind]))
    }

    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.n * factor,
            self.p * factor,
            self.k * factor,
            self.c * factor,
        )
    }

    /// Adds `other` element-wise.
    pub fn accumulate(&mut self, other: &Self) {
        for kind in Nutrient::ALL {
            self[kind] += other[kind];
        }
    }

    pub fn clamp_non_negative(&mut self) {
        for kind in Nutrient::ALL {
            self[kind] = self[kind].max(0.0);
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.iter().all(|(_, v)| v.is_finite())
    }

    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        self.iter().all(|(_, v)| v >= 0.0)
    }
}

impl Index<Nutrient> for NutrientPools {
    type Output = f64;

    fn index(&self, kind: Nutrient) -> &f64 {
        match kind {
            Nutrient::N => &self.n,
            Nutrient::P => &self.p,
            Nutrient::K => &self.k,
            Nutrient::C => &self.c,
        }
    }
}

impl IndexMut<Nutrient> for NutrientPools {
    fn index_mut(&mut self, kind: Nutrient) -> &mut f64 {
        match kind {
            Nutrient::N => &mut self.n,
            Nutrient::P => &mut self.p,
            Nutrient::K => &mut self.k,
            Nutrient::C => &mut self.c,
        }
    }
}

/// One value per contaminant functional group (g in pools, fractions in
/// partition coefficients).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContaminantPools {
    pub pollinators: f64,
    pub pests: f64,
    pub soil: f64,
    pub weeds: f64,
}

impl ContaminantPools {
    pub const ZERO: Self = Self {
        pollinators: 0.0,
        pests: 0.0,
        soil: 0.0,
        weeds: 0.0,
    };

    #[must_use]
    pub fn new(pollinators: f64, pests: f64, soil: f64, weeds: f64) -> Self {
        Self {
            pollinators,
            pests,
            soil,
            weeds,
        }
    }

    #[must_use]
    pub fn splat(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.pollinators + self.pests + self.soil + self.weeds
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContaminantGroup, f64)> + '_ {
        ContaminantGroup::ALL
            .into_iter()
            .map(move |group| (group, self[group]))
    }

    pub fn accumulate(&mut self, other: &Self) {
        for group in ContaminantGroup::ALL {
            self[group] += other[group];
        }
    }

    pub fn clamp_non_negative(&mut self) {
        for group in ContaminantGroup::ALL {
            self[group] = self[group].max(0.0);
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.iter().all(|(_, v)| v.is_finite())
    }

    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        self.iter().all(|(_, v)| v >= 0.0)
    }
}

impl Index<ContaminantGroup> for ContaminantPools {
    type Output = f64;

    fn index(&self, group: ContaminantGroup) -> &f64 {
        match group {
            ContaminantGroup::Pollinators => &self.pollinators,
            ContaminantGroup::Pests => &self.pests,
            ContaminantGroup::Soil => &self.soil,
            ContaminantGroup::Weeds => &self.weeds,
        }
    }
}

impl IndexMut<ContaminantGroup> for ContaminantPools {
    fn index_mut(&mut self, group: ContaminantGroup) -> &mut f64 {
        match group {
            ContaminantGroup::Pollinators => &mut self.pollinators,
            ContaminantGroup::Pests => &mut self.pests,
            ContaminantGroup::Soil => &mut self.soil,
            ContaminantGroup::Weeds => &mut self.weeds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_named_fields() {
        let pools = NutrientPools::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(pools[Nutrient::N], 1.0);
        assert_eq!(pools[Nutrient::P], 2.0);
        assert_eq!(pools[Nutrient::K], 3.0);
        assert_eq!(pools[Nutrient::C], 4.0);
        assert_eq!(pools.total(), 10.0);
    }

    #[test]
    fn test_clamp_non_negative() {
        let mut pools = ContaminantPools::new(-1.0, 2.0, -0.5, 0.0);
        pools.clamp_non_negative();
        assert_eq!(pools, ContaminantPools::new(0.0, 2.0, 0.0, 0.0));
    }

    #[test]
    fn test_accumulate() {
        let mut a = NutrientPools::splat(1.0);
        a.accumulate(&NutrientPools::new(1.0, 0.0, 2.0, 0.5));
        assert_eq!(a, NutrientPools::new(2.0, 1.0, 3.0, 1.5));
    }

    #[test]
    fn test_group_labels_match_serde_names() {
        for group in ContaminantGroup::ALL {
            let json = serde_json::to_string(&group).unwrap();
            assert_eq!(json, format!("\"{}\"", group.label()));
        }
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let pools: NutrientPools = serde_json::from_str(r#"{"n": 5.0}"#).unwrap();
        assert_eq!(pools, NutrientPools::new(5.0, 0.0, 0.0, 0.0));
    }
}
