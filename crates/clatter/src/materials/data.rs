//! Parsed, in-memory representations of one material's modal or roughness
//! data.

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mode {
    pub frequency_hz: f64,
    pub power_db: f64,
    pub decay_ms: f64,
}

impl Mode {
    pub fn is_valid(&self) -> bool {
        self.frequency_hz > 0.0 && self.decay_ms > 0.0 && self.power_db.is_finite()
    }
}

#[derive(Clone, Debug)]
pub struct ImpactMaterialData {
    pub cf: f64,
    pub modes: Vec<Mode>,
    pub density: f64,
}

#[derive(Clone, Debug)]
pub struct ScrapeMaterialData {
    pub dsdx: Vec<f64>,
    pub roughness_ratio_exponent: f64,
}
