// Shared table of material characteristics, `include!`d by both
// `build/material_tables.rs` (which bakes it into the embedded bundle) and
// `src/materials/kinds.rs` (which needs the same names, ids, and densities
// at runtime without re-parsing the bundle just to enumerate materials).
//
// Deliberately self-contained: no references to other crate modules, so it
// can be included verbatim from the build script.

pub struct UnsizedMaterialDef {
    pub name: &'static str,
    pub density: f64,
    pub cf: f64,
    pub base_freq_hz: f64,
    pub base_decay_ms: f64,
    pub base_power_db: f64,
    pub num_modes: usize,
    pub mode_freq_ratio_step: f64,
    pub mode_decay_ratio: f64,
    pub power_falloff_db: f64,
}

/// Fourteen unsized material families, ordered; this order fixes both
/// `ImpactMaterial`'s discriminants and the bundle's density table order.
pub const UNSIZED_MATERIALS: &[UnsizedMaterialDef] = &[
    UnsizedMaterialDef { name: "glass", density: 2500.0, cf: 0.9, base_freq_hz: 3200.0, base_decay_ms: 900.0, base_power_db: -6.0, num_modes: 14, mode_freq_ratio_step: 1.41, mode_decay_ratio: 0.92, power_falloff_db: 3.4 },
    UnsizedMaterialDef { name: "stone", density: 2700.0, cf: 0.85, base_freq_hz: 1800.0, base_decay_ms: 500.0, base_power_db: -5.0, num_modes: 13, mode_freq_ratio_step: 1.38, mode_decay_ratio: 0.90, power_falloff_db: 3.6 },
    UnsizedMaterialDef { name: "metal", density: 7800.0, cf: 1.0, base_freq_hz: 2600.0, base_decay_ms: 1800.0, base_power_db: -4.0, num_modes: 18, mode_freq_ratio_step: 1.5, mode_decay_ratio: 0.95, power_falloff_db: 2.8 },
    UnsizedMaterialDef { name: "wood_hard", density: 900.0, cf: 0.7, base_freq_hz: 900.0, base_decay_ms: 350.0, base_power_db: -7.0, num_modes: 11, mode_freq_ratio_step: 1.33, mode_decay_ratio: 0.85, power_falloff_db: 4.0 },
    UnsizedMaterialDef { name: "wood_medium", density: 650.0, cf: 0.65, base_freq_hz: 750.0, base_decay_ms: 280.0, base_power_db: -7.5, num_modes: 10, mode_freq_ratio_step: 1.32, mode_decay_ratio: 0.83, power_falloff_db: 4.2 },
    UnsizedMaterialDef { name: "wood_soft", density: 450.0, cf: 0.55, base_freq_hz: 600.0, base_decay_ms: 220.0, base_power_db: -8.0, num_modes: 10, mode_freq_ratio_step: 1.30, mode_decay_ratio: 0.80, power_falloff_db: 4.5 },
    UnsizedMaterialDef { name: "ceramic", density: 2300.0, cf: 0.88, base_freq_hz: 2900.0, base_decay_ms: 700.0, base_power_db: -5.5, num_modes: 13, mode_freq_ratio_step: 1.40, mode_decay_ratio: 0.91, power_falloff_db: 3.5 },
    UnsizedMaterialDef { name: "cardboard", density: 250.0, cf: 0.35, base_freq_hz: 350.0, base_decay_ms: 90.0, base_power_db: -10.0, num_modes: 8, mode_freq_ratio_step: 1.25, mode_decay_ratio: 0.65, power_falloff_db: 5.5 },
    UnsizedMaterialDef { name: "fabric", density: 150.0, cf: 0.25, base_freq_hz: 250.0, base_decay_ms: 60.0, base_power_db: -12.0, num_modes: 7, mode_freq_ratio_step: 1.22, mode_decay_ratio: 0.6, power_falloff_db: 6.0 },
    UnsizedMaterialDef { name: "leaf", density: 120.0, cf: 0.2, base_freq_hz: 400.0, base_decay_ms: 40.0, base_power_db: -14.0, num_modes: 6, mode_freq_ratio_step: 1.27, mode_decay_ratio: 0.5, power_falloff_db: 6.5 },
    UnsizedMaterialDef { name: "paper", density: 160.0, cf: 0.3, base_freq_hz: 500.0, base_decay_ms: 50.0, base_power_db: -13.0, num_modes: 7, mode_freq_ratio_step: 1.28, mode_decay_ratio: 0.55, power_falloff_db: 6.2 },
    UnsizedMaterialDef { name: "plastic_hard", density: 1100.0, cf: 0.6, base_freq_hz: 1400.0, base_decay_ms: 260.0, base_power_db: -7.0, num_modes: 10, mode_freq_ratio_step: 1.34, mode_decay_ratio: 0.78, power_falloff_db: 4.3 },
    UnsizedMaterialDef { name: "plastic_soft", density: 950.0, cf: 0.45, base_freq_hz: 1000.0, base_decay_ms: 150.0, base_power_db: -9.0, num_modes: 9, mode_freq_ratio_step: 1.29, mode_decay_ratio: 0.7, power_falloff_db: 4.8 },
    UnsizedMaterialDef { name: "rubber", density: 1200.0, cf: 0.3, base_freq_hz: 500.0, base_decay_ms: 80.0, base_power_db: -11.0, num_modes: 8, mode_freq_ratio_step: 1.24, mode_decay_ratio: 0.55, power_falloff_db: 5.8 },
];

pub struct ScrapeMaterialDef {
    pub name: &'static str,
    pub roughness_ratio_exponent: f64,
    /// Relative amplitude of the procedural roughness noise.
    pub roughness_amplitude: f64,
    /// Number of summed noise octaves; higher is rougher-sounding.
    pub roughness_octaves: u32,
    /// Seeds the deterministic procedural roughness generator.
    pub seed: u64,
}

/// Nine scrape materials, ordered; this order fixes `ScrapeMaterial`'s
/// discriminants.
pub const SCRAPE_MATERIALS: &[ScrapeMaterialDef] = &[
    ScrapeMaterialDef { name: "glass", roughness_ratio_exponent: 0.35, roughness_amplitude: 0.6, roughness_octaves: 3, seed: 1001 },
    ScrapeMaterialDef { name: "ceramic", roughness_ratio_exponent: 0.4, roughness_amplitude: 0.55, roughness_octaves: 3, seed: 1002 },
    ScrapeMaterialDef { name: "metal", roughness_ratio_exponent: 0.5, roughness_amplitude: 0.7, roughness_octaves: 4, seed: 1003 },
    ScrapeMaterialDef { name: "plywood", roughness_ratio_exponent: 0.6, roughness_amplitude: 0.8, roughness_octaves: 4, seed: 1004 },
    ScrapeMaterialDef { name: "cardboard", roughness_ratio_exponent: 0.75, roughness_amplitude: 1.0, roughness_octaves: 5, seed: 1005 },
    ScrapeMaterialDef { name: "fabric", roughness_ratio_exponent: 0.85, roughness_amplitude: 1.1, roughness_octaves: 5, seed: 1006 },
    ScrapeMaterialDef { name: "paper", roughness_ratio_exponent: 0.8, roughness_amplitude: 1.05, roughness_octaves: 5, seed: 1007 },
    ScrapeMaterialDef { name: "plastic", roughness_ratio_exponent: 0.55, roughness_amplitude: 0.65, roughness_octaves: 4, seed: 1008 },
    ScrapeMaterialDef { name: "rubber", roughness_ratio_exponent: 0.9, roughness_amplitude: 1.2, roughness_octaves: 6, seed: 1009 },
];

/// Default `unsized_impact_material -> scrape_material` mapping, indexed in
/// lockstep with [`UNSIZED_MATERIALS`]; values index into
/// [`SCRAPE_MATERIALS`].
pub const UNSIZED_TO_SCRAPE_DEFAULT: &[usize] = &[
    0, // glass -> glass
    1, // stone -> ceramic
    2, // metal -> metal
    3, // wood_hard -> plywood
    3, // wood_medium -> plywood
    3, // wood_soft -> plywood
    1, // ceramic -> ceramic
    4, // cardboard -> cardboard
    5, // fabric -> fabric
    4, // leaf -> cardboard
    6, // paper -> paper
    7, // plastic_hard -> plastic
    7, // plastic_soft -> plastic
    8, // rubber -> rubber
];
