use clatter::{ClatterObjectData, CollisionEvent, CollisionKind, Error, ImpactMaterial, Samples, Vec3d};

use crate::cli_args::ImpactArgs;
use crate::wav;

fn parse_material(name: &str) -> Result<ImpactMaterial, Error> {
    ImpactMaterial::from_name(name).ok_or_else(|| Error::UnknownMaterial(name.to_string()))
}

pub fn run(args: &ImpactArgs) -> anyhow::Result<()> {
    let material_a = parse_material(&args.primary.material)?;
    let material_b = parse_material(&args.material_b)?;
    clatter::materials::load_impact(material_a)?;
    clatter::materials::load_impact(material_b)?;

    let a = ClatterObjectData::new(0, material_a, args.primary.amp, args.primary.resonance, args.primary.mass);
    let b = ClatterObjectData::new(1, material_b, args.amp_b, args.resonance_b, args.mass_b);

    let config = super::config_with_overrides(args.simulation_amp);
    let mut generator = clatter::AudioGenerator::new(vec![a.clone(), b.clone()], config, args.seed)?;
    generator.add_collision(CollisionEvent::new(a, b, CollisionKind::Impact, args.speed, Vec3d::ZERO));

    let mut rendered: Option<Samples> = None;
    generator.update(0.0, &mut |event| {
        if let clatter::SynthesisEvent::Impact { samples, .. } = event {
            rendered = Some(samples);
        }
    })?;

    let samples = rendered.ok_or_else(|| Error::BadArgument {
        name: "speed".into(),
        message: "impact was rejected; speed must be > 0".into(),
    })?;

    wav::write_pcm16(&args.out, &samples)?;
    log::info!("wrote {} samples to {}", samples.length(), args.out.display());
    Ok(())
}
