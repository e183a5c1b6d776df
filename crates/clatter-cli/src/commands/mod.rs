mod impact;
mod list_materials;
mod scrape;

use crate::cli_args;

/// The default `SynthesisConfig`, with `simulation_amp` overridden when the
/// caller passed one on the command line.
fn config_with_overrides(simulation_amp: Option<f64>) -> clatter::SynthesisConfig {
    let mut config = clatter::SynthesisConfig::default();
    if let Some(amp) = simulation_amp {
        config.simulation_amp = amp;
    }
    config
}

/// Figure out what command to run, then run it.
pub fn dispatch_command(args: &cli_args::CliArgs) -> anyhow::Result<()> {
    match &args.command {
        cli_args::Command::Impact(a) => impact::run(a),
        cli_args::Command::Scrape(a) => scrape::run(a),
        cli_args::Command::ListMaterials(a) => list_materials::run(a),
    }
}
