//! Closed enumerations for impact and scrape materials.
//!
//! Generated from the single source-of-truth table in `material_defs.rs`
//! (shared with the build script) via a small `macro_rules!`, in the spirit
//! of reaching for code generation (`paste`, `enum_dispatch`,
//! derive macros) rather than hand-duplicating lookup tables that must stay
//! in lockstep with each other.

include!("../../material_defs.rs");

pub(crate) const NUM_SIZE_BUCKETS: usize = 6;

macro_rules! unsized_impact_material {
    ($($variant:ident => $index:expr),+ $(,)?) => {
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum UnsizedImpactMaterial {
            $($variant),+
        }

        impl UnsizedImpactMaterial {
            pub const ALL: &'static [UnsizedImpactMaterial] = &[$(UnsizedImpactMaterial::$variant),+];

            pub fn index(self) -> usize {
                match self {
                    $(UnsizedImpactMaterial::$variant => $index),+
                }
            }

            pub fn name(self) -> &'static str {
                UNSIZED_MATERIALS[self.index()].name
            }

            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|m| m.name() == name)
            }
        }
    };
}

unsized_impact_material! {
    Glass => 0,
    Stone => 1,
    Metal => 2,
    WoodHard => 3,
    WoodMedium => 4,
    WoodSoft => 5,
    Ceramic => 6,
    Cardboard => 7,
    Fabric => 8,
    Leaf => 9,
    Paper => 10,
    PlasticHard => 11,
    PlasticSoft => 12,
    Rubber => 13,
}

/// A material/size-bucket pair. `material_id()` is the value stored in the
/// embedded bundle and matches `unsized.index() * NUM_SIZE_BUCKETS + bucket`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ImpactMaterial {
    unsized_material: UnsizedImpactMaterial,
    size_bucket: u8,
}

impl ImpactMaterial {
    pub fn new(unsized_material: UnsizedImpactMaterial, size_bucket: u8) -> Self {
        assert!((size_bucket as usize) < NUM_SIZE_BUCKETS, "size bucket out of range");
        ImpactMaterial { unsized_material, size_bucket }
    }

    pub fn unsized_material(self) -> UnsizedImpactMaterial {
        self.unsized_material
    }

    pub fn size_bucket(self) -> u8 {
        self.size_bucket
    }

    pub fn material_id(self) -> u16 {
        (self.unsized_material.index() * NUM_SIZE_BUCKETS + self.size_bucket as usize) as u16
    }

    pub fn from_material_id(id: u16) -> Option<Self> {
        let id = id as usize;
        let unsized_index = id / NUM_SIZE_BUCKETS;
        let bucket = id % NUM_SIZE_BUCKETS;
        UnsizedImpactMaterial::ALL
            .get(unsized_index)
            .map(|&u| ImpactMaterial::new(u, bucket as u8))
    }

    /// Parse the `name_k` CLI form, e.g. `"wood_hard_4"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let (base, bucket_str) = name.rsplit_once('_')?;
        let bucket: u8 = bucket_str.parse().ok()?;
        if bucket as usize >= NUM_SIZE_BUCKETS {
            return None;
        }
        let unsized_material = UnsizedImpactMaterial::from_name(base)?;
        Some(ImpactMaterial::new(unsized_material, bucket))
    }

    pub fn name(self) -> String {
        format!("{}_{}", self.unsized_material.name(), self.size_bucket)
    }
}

/// Select a size bucket (0..=5) for a volume in cubic meters, per the fixed
/// fixed thresholds.
pub fn size_bucket_for(volume_m3: f64) -> u8 {
    const THRESHOLDS: [f64; 5] = [1e-4, 1e-3, 1e-2, 1e-1, 1.0];
    THRESHOLDS
        .iter()
        .position(|&t| volume_m3 < t)
        .map(|b| b as u8)
        .unwrap_or(5)
}

macro_rules! scrape_material {
    ($($variant:ident => $index:expr),+ $(,)?) => {
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum ScrapeMaterial {
            $($variant),+
        }

        impl ScrapeMaterial {
            pub const ALL: &'static [ScrapeMaterial] = &[$(ScrapeMaterial::$variant),+];

            pub fn index(self) -> usize {
                match self {
                    $(ScrapeMaterial::$variant => $index),+
                }
            }

            pub fn name(self) -> &'static str {
                SCRAPE_MATERIALS[self.index()].name
            }

            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|m| m.name() == name)
            }
        }
    };
}

scrape_material! {
    Glass => 0,
    Ceramic => 1,
    Metal => 2,
    Plywood => 3,
    Cardboard => 4,
    Fabric => 5,
    Paper => 6,
    Plastic => 7,
    Rubber => 8,
}

/// The default `unsized_impact_material -> scrape_material` mapping used
/// when a `ClatterObjectData` doesn't specify one explicitly.
pub fn default_scrape_material(unsized_material: UnsizedImpactMaterial) -> ScrapeMaterial {
    let scrape_index = UNSIZED_TO_SCRAPE_DEFAULT[unsized_material.index()];
    ScrapeMaterial::ALL[scrape_index]
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn size_bucket_for_is_monotone(a in 0.0f64..10.0, b in 0.0f64..10.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(size_bucket_for(lo) <= size_bucket_for(hi));
        }

        #[test]
        fn size_bucket_for_stays_in_range(v in 0.0f64..1000.0) {
            prop_assert!(size_bucket_for(v) <= 5);
        }

        #[test]
        fn material_id_round_trips_for_any_valid_bucket(unsized_index in 0usize..UnsizedImpactMaterial::ALL.len(), bucket in 0u8..NUM_SIZE_BUCKETS as u8) {
            let m = ImpactMaterial::new(UnsizedImpactMaterial::ALL[unsized_index], bucket);
            prop_assert_eq!(ImpactMaterial::from_material_id(m.material_id()), Some(m));
        }
    }
}
