use clatter::{ClatterObjectData, CollisionEvent, CollisionKind, Error, ImpactMaterial, Samples, ScrapeMaterial, Vec3d};

use crate::cli_args::ScrapeArgs;
use crate::wav;

fn parse_material(name: &str) -> Result<ImpactMaterial, Error> {
    ImpactMaterial::from_name(name).ok_or_else(|| Error::UnknownMaterial(name.to_string()))
}

fn parse_scrape_material(name: &str) -> Result<ScrapeMaterial, Error> {
    ScrapeMaterial::from_name(name).ok_or_else(|| Error::UnknownMaterial(name.to_string()))
}

pub fn run(args: &ScrapeArgs) -> anyhow::Result<()> {
    let material_a = parse_material(&args.primary.material)?;
    let material_b = parse_material(&args.material_b)?;
    let scrape_material = parse_scrape_material(&args.scrape_material)?;
    clatter::materials::load_impact(material_a)?;
    clatter::materials::load_impact(material_b)?;
    clatter::materials::load_scrape(scrape_material)?;

    let a = ClatterObjectData::new(0, material_a, args.primary.amp, args.primary.resonance, args.primary.mass)
        .with_scrape_material(scrape_material);
    let b = ClatterObjectData::new(1, material_b, args.amp_b, args.resonance_b, args.mass_b);

    let config = super::config_with_overrides(args.simulation_amp);
    let mut generator = clatter::AudioGenerator::new(vec![a.clone(), b.clone()], config, args.seed)?;
    if let Some(exponent) = args.roughness_ratio_exponent {
        generator = generator.with_roughness_ratio_exponent_override(exponent);
    }

    let num_chunks = clatter::get_num_scrape_events(args.duration_s);
    let mut chunks: Vec<Samples> = Vec::with_capacity(num_chunks);

    for _ in 0..num_chunks {
        generator.add_collision(CollisionEvent::new(a.clone(), b.clone(), CollisionKind::Scrape, args.speed, Vec3d::ZERO));
        generator.update(0.0, &mut |event| match event {
            clatter::SynthesisEvent::ScrapeStart { samples, .. } => chunks.push(samples),
            clatter::SynthesisEvent::ScrapeOngoing { samples, .. } => chunks.push(samples),
            _ => {}
        })?;
    }
    generator.end(&mut |_| {});

    wav::write_pcm16_chunks(&args.out, &chunks)?;
    log::info!("wrote {} chunks to {}", chunks.len(), args.out.display());
    Ok(())
}
