//! Per-object audio parameters (`ClatterObjectData`).

use crate::materials::{ImpactMaterial, ScrapeMaterial};

#[derive(Clone, Debug)]
pub struct ClatterObjectData {
    pub id: u32,
    pub material: ImpactMaterial,
    pub amp: f64,
    pub resonance: f64,
    pub mass: f64,
    pub scrape_material: Option<ScrapeMaterial>,
    pub has_previous_impact: bool,
    pub previous_impact_time_s: f64,
}

impl ClatterObjectData {
    pub fn new(id: u32, material: ImpactMaterial, amp: f64, resonance: f64, mass: f64) -> Self {
        ClatterObjectData {
            id,
            material,
            // Resonance is no longer clamped above 1 (upstream changelog
            // 0.1.2); clamp only to [0, +inf).
            resonance: resonance.max(0.0),
            amp,
            mass,
            scrape_material: None,
            has_previous_impact: false,
            previous_impact_time_s: 0.0,
        }
    }

    pub fn with_scrape_material(mut self, m: ScrapeMaterial) -> Self {
        self.scrape_material = Some(m);
        self
    }

    /// The material used for scrape synthesis: the explicit override, or
    /// the default mapping for this object's impact material.
    pub fn effective_scrape_material(&self) -> ScrapeMaterial {
        self.scrape_material
            .unwrap_or_else(|| crate::materials::default_scrape_material(self.material.unsized_material()))
    }
}
