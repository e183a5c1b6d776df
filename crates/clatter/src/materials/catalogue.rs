//! Process-wide, lazily-populated material catalogue.
//!
//! The embedded bundle itself is free to access (`include_bytes!`, no I/O);
//! what's lazy and memoized here is *parsing* a given material's entry out
//! of it; `load_impact`/`load_scrape` are explicit, idempotent, and safe
//! to race.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use super::bundle::Bundle;
use super::data::{ImpactMaterialData, ScrapeMaterialData};
use super::kinds::{ImpactMaterial, ScrapeMaterial};
use crate::error::{Error, Result};

static BUNDLE_BYTES: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/material_bundle.bin"));

fn bundle() -> &'static Bundle {
    static BUNDLE: OnceLock<Bundle> = OnceLock::new();
    BUNDLE.get_or_init(|| Bundle::parse(BUNDLE_BYTES).expect("embedded material bundle is corrupt"))
}

/// Process-wide cache of parsed material data. Kept behind a single mutex
/// each: parsing one material's entry is microseconds of work, so there is
/// no value in finer-grained sharding the way a `dashmap`-backed cache
/// earns its keep for hot, highly contended per-sample state.
struct Catalogue {
    impact: Mutex<HashMap<ImpactMaterial, ImpactMaterialData>>,
    scrape: Mutex<HashMap<ScrapeMaterial, ScrapeMaterialData>>,
}

fn catalogue() -> &'static Catalogue {
    static CATALOGUE: OnceLock<Catalogue> = OnceLock::new();
    CATALOGUE.get_or_init(|| Catalogue {
        impact: Mutex::new(HashMap::new()),
        scrape: Mutex::new(HashMap::new()),
    })
}

/// Idempotent: parses and caches `m`'s modal data on first call, no-ops
/// afterward. Safe to call concurrently on the same key.
pub fn load_impact(m: ImpactMaterial) -> Result<()> {
    let mut guard = catalogue().impact.lock().unwrap();
    if guard.contains_key(&m) {
        return Ok(());
    }
    let data = bundle().parse_impact(m.material_id())?;
    log::debug!("loaded impact material {} ({} modes)", m.name(), data.modes.len());
    guard.insert(m, data);
    Ok(())
}

pub fn load_scrape(m: ScrapeMaterial) -> Result<()> {
    let mut guard = catalogue().scrape.lock().unwrap();
    if guard.contains_key(&m) {
        return Ok(());
    }
    let data = bundle().parse_scrape(m.index() as u16)?;
    log::debug!("loaded scrape material {} ({} dsdx samples)", m.name(), data.dsdx.len());
    guard.insert(m, data);
    Ok(())
}

pub fn get_impact(m: ImpactMaterial) -> Result<ImpactMaterialData> {
    catalogue()
        .impact
        .lock()
        .unwrap()
        .get(&m)
        .cloned()
        .ok_or_else(|| not_loaded("impact"))
}

pub fn get_scrape(m: ScrapeMaterial) -> Result<ScrapeMaterialData> {
    catalogue()
        .scrape
        .lock()
        .unwrap()
        .get(&m)
        .cloned()
        .ok_or_else(|| not_loaded("scrape"))
}

fn not_loaded(kind: &'static str) -> Error {
    Error::MaterialNotLoaded(kind)
}
