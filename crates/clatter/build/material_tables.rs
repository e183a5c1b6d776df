//! Bakes [`UNSIZED_MATERIALS`]/[`SCRAPE_MATERIALS`] into the embedded
//! binary bundle layout: a pure function the build script calls, handed a
//! `Vec<u8>` to serialize into, kept entirely separate from the runtime
//! parser in `src/materials/bundle.rs` (the two only agree by contract,
//! the same way an encoder and decoder of any wire format do).

include!("../material_defs.rs");

const NUM_SIZE_BUCKETS: usize = 6;
const MAGIC: &[u8; 4] = b"CLAT";
const VERSION: u32 = 1;

/// Generate the modal data for one (unsized material, size bucket) pair.
///
/// Larger buckets resonate lower and longer, matching the expectation
/// that bigger objects "ring" longer at lower pitch; modes above the base
/// fall off in both frequency spacing and power, mirroring how a real
/// struck object's higher modes are both more tightly spaced (relatively)
/// and quieter.
fn generate_modes(def: &UnsizedMaterialDef, bucket: usize) -> Vec<(f64, f64, f64)> {
    let size_scale = 2f64.powi(bucket as i32 - 2);
    let mut modes = Vec::with_capacity(def.num_modes);
    let mut freq_ratio = 1.0f64;
    let mut decay_ratio = 1.0f64;
    for i in 0..def.num_modes {
        let freq = (def.base_freq_hz * freq_ratio / size_scale).max(20.0);
        let decay_ms = (def.base_decay_ms * decay_ratio * (1.0 + 0.15 * bucket as f64)).max(1.0);
        let power_db = def.base_power_db - (i as f64) * def.power_falloff_db;
        modes.push((freq, power_db, decay_ms));
        freq_ratio *= def.mode_freq_ratio_step;
        decay_ratio *= def.mode_decay_ratio;
    }
    modes
}

/// Deterministic procedural roughness profile: a handful of noise octaves
/// summed from a splitmix-style integer hash, seeded per material so the
/// same material always yields the same surface.
fn generate_dsdx(def: &ScrapeMaterialDef, length: usize) -> Vec<f64> {
    fn hash_to_unit(mut x: u64) -> f64 {
        x ^= x >> 33;
        x = x.wrapping_mul(0xff51afd7ed558ccd);
        x ^= x >> 33;
        x = x.wrapping_mul(0xc4ceb9fe1a85ec53);
        x ^= x >> 33;
        (x >> 11) as f64 / (1u64 << 53) as f64
    }

    let mut out = vec![0.0f64; length];
    for octave in 0..def.roughness_octaves {
        let period = (length / (2usize.pow(octave + 1)).max(1)).max(1);
        let amp = def.roughness_amplitude / 2f64.powi(octave as i32);
        for n in 0..length {
            let bucket = n / period;
            let a = hash_to_unit(def.seed ^ (octave as u64) << 32 ^ bucket as u64);
            let b = hash_to_unit(def.seed ^ (octave as u64) << 32 ^ (bucket as u64 + 1));
            let t = (n % period) as f64 / period as f64;
            let interp = a + (b - a) * t;
            out[n] += amp * (interp * 2.0 - 1.0);
        }
    }
    out
}

pub fn build_bundle() -> Vec<u8> {
    let dsdx_length = 44_100usize;

    let mut out = Vec::new();
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&((UNSIZED_MATERIALS.len() * NUM_SIZE_BUCKETS) as u32).to_le_bytes());
    out.extend_from_slice(&(SCRAPE_MATERIALS.len() as u32).to_le_bytes());

    let mut material_id: u16 = 0;
    for def in UNSIZED_MATERIALS {
        for bucket in 0..NUM_SIZE_BUCKETS {
            let modes = generate_modes(def, bucket);
            out.extend_from_slice(&material_id.to_le_bytes());
            out.extend_from_slice(&(modes.len() as u16).to_le_bytes());
            out.extend_from_slice(&def.cf.to_le_bytes());
            for (freq, power_db, decay_ms) in modes {
                out.extend_from_slice(&freq.to_le_bytes());
                out.extend_from_slice(&power_db.to_le_bytes());
                out.extend_from_slice(&decay_ms.to_le_bytes());
            }
            material_id += 1;
        }
    }

    for (id, def) in SCRAPE_MATERIALS.iter().enumerate() {
        let dsdx = generate_dsdx(def, dsdx_length);
        out.extend_from_slice(&(id as u16).to_le_bytes());
        out.extend_from_slice(&(dsdx.len() as u32).to_le_bytes());
        out.extend_from_slice(&def.roughness_ratio_exponent.to_le_bytes());
        for v in dsdx {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }

    for def in UNSIZED_MATERIALS {
        out.extend_from_slice(&def.density.to_le_bytes());
    }

    out
}
