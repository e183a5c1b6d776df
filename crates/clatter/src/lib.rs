pub mod config;
mod error;
mod event;
mod generator;
mod impact;
pub mod materials;
mod object;
pub mod rng;
mod samples;
pub mod scrape;
mod worker_pool;

pub use config::SynthesisConfig;
pub use error::{Error, Result};
pub use event::{CollisionEvent, CollisionKind, ObjectPairKey, Vec3d};
pub use generator::{AudioGenerator, SynthesisEvent};
pub use materials::{
    default_scrape_material, size_bucket_for, ImpactMaterial, ImpactMaterialData, Mode, ScrapeMaterial,
    ScrapeMaterialData, UnsizedImpactMaterial,
};
pub use object::ClatterObjectData;
pub use rng::{RandomSource, XoshiroRandomSource};
pub use samples::Samples;
pub use scrape::{get_num_scrape_events, ScrapeSynthesizer};
pub use worker_pool::WorkerPool;
