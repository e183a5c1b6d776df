//! The material catalogue: closed material enumerations, their
//! parsed modal/roughness data, and the embedded bundle they're loaded from.

mod bundle;
mod catalogue;
mod data;
mod kinds;

pub use catalogue::{get_impact, get_scrape, load_impact, load_scrape};
pub use data::{ImpactMaterialData, Mode, ScrapeMaterialData};
pub use kinds::{
    default_scrape_material, size_bucket_for, ImpactMaterial, ScrapeMaterial, UnsizedImpactMaterial,
};

/// The unsized material underlying a sized `ImpactMaterial`.
pub fn unsized_of(m: ImpactMaterial) -> UnsizedImpactMaterial {
    m.unsized_material()
}

/// Combine an unsized material with a size bucket.
pub fn impact_material_for(unsized_material: UnsizedImpactMaterial, size_bucket: u8) -> ImpactMaterial {
    ImpactMaterial::new(unsized_material, size_bucket)
}

/// An unsized material's density. Requires at least one size bucket of
/// `unsized_material` to have been loaded, since density lives alongside
/// the modal data in the bundle's density table but is only decoded as
/// part of parsing an impact entry.
pub fn density_of(unsized_material: UnsizedImpactMaterial) -> crate::error::Result<f64> {
    for bucket in 0..6 {
        if let Ok(data) = get_impact(ImpactMaterial::new(unsized_material, bucket)) {
            return Ok(data.density);
        }
    }
    load_impact(ImpactMaterial::new(unsized_material, 0))?;
    Ok(get_impact(ImpactMaterial::new(unsized_material, 0))?.density)
}
