//! Definition of the Clap command line.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "clatter", about = "Render collision audio to a WAV file")]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render one impact event.
    Impact(ImpactArgs),

    /// Render a fixed-duration scrape.
    Scrape(ScrapeArgs),

    /// List every closed material name this build knows about.
    ListMaterials(ListMaterialsArgs),
}

#[derive(Debug, Parser)]
pub struct ObjectArgs {
    /// Impact material, e.g. `glass_3` (see `list-materials`).
    pub material: String,

    /// Amplitude scale for this object's contribution, in (0, 1].
    #[arg(long, default_value_t = 0.5)]
    pub amp: f64,

    /// Resonance multiplier; 0 damps fastest, larger rings longer.
    #[arg(long, default_value_t = 0.0)]
    pub resonance: f64,

    /// Mass in kilograms.
    #[arg(long, default_value_t = 1.0)]
    pub mass: f64,
}

#[derive(Debug, Parser)]
pub struct ImpactArgs {
    #[command(flatten)]
    pub primary: ObjectArgs,

    /// Secondary object's material.
    #[arg(long = "material-b")]
    pub material_b: String,
    #[arg(long = "amp-b", default_value_t = 0.5)]
    pub amp_b: f64,
    #[arg(long = "resonance-b", default_value_t = 0.0)]
    pub resonance_b: f64,
    #[arg(long = "mass-b", default_value_t = 1.0)]
    pub mass_b: f64,

    /// Relative impact speed in meters/second.
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,

    /// Deterministic RNG seed; omit for a seed drawn from entropy.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Peak-normalization ceiling; overrides the synthesis config default.
    #[arg(long)]
    pub simulation_amp: Option<f64>,

    /// Output WAV path.
    #[arg(long, short = 'o')]
    pub out: std::path::PathBuf,
}

#[derive(Debug, Parser)]
pub struct ScrapeArgs {
    #[command(flatten)]
    pub primary: ObjectArgs,

    #[arg(long = "material-b")]
    pub material_b: String,
    #[arg(long = "amp-b", default_value_t = 0.5)]
    pub amp_b: f64,
    #[arg(long = "resonance-b", default_value_t = 0.0)]
    pub resonance_b: f64,
    #[arg(long = "mass-b", default_value_t = 1.0)]
    pub mass_b: f64,

    /// Sliding speed in meters/second, held constant for the render.
    #[arg(long, default_value_t = 0.5)]
    pub speed: f64,

    /// Total render duration in seconds.
    #[arg(long = "duration-s", default_value_t = 1.0)]
    pub duration_s: f64,

    /// Scrape material driving the surface roughness profile; mandatory,
    /// distinct from either object's impact material (see
    /// `list-materials --scrape`).
    #[arg(long)]
    pub scrape_material: String,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Peak-normalization ceiling; overrides the synthesis config default.
    #[arg(long)]
    pub simulation_amp: Option<f64>,

    /// Overrides the scrape material's baked-in roughness-ratio exponent.
    #[arg(long)]
    pub roughness_ratio_exponent: Option<f64>,

    #[arg(long, short = 'o')]
    pub out: std::path::PathBuf,
}

#[derive(Debug, Parser)]
pub struct ListMaterialsArgs {
    /// List scrape materials instead of impact materials.
    #[arg(long)]
    pub scrape: bool,
}
