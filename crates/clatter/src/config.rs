//! Synthesis-wide tunables.
//!
//! These are threaded through as an explicit, `Copy` value passed to
//! [`crate::AudioGenerator::new`] rather than process-wide mutable
//! globals, the same way `SR` is a named item here rather than a magic
//! number scattered through the crate.

/// The fixed sample rate of the engine. All buffers are rendered at this
/// rate; there is no resampling path because every consumer of this crate
/// wants interactive collision audio, not arbitrary sample rates.
pub const SR: u32 = 44_100;

/// Length in samples of one scrape chunk (100 ms at [`SR`]).
pub const SCRAPE_CHUNK: usize = 4410;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SynthesisConfig {
    /// Ceiling on emitted sample magnitude. Impact renders are
    /// peak-normalized down to this value only if they exceed it; scrape
    /// chunks are hard-clipped to `[-simulation_amp, simulation_amp]`.
    pub simulation_amp: f64,

    /// Impacts on the same object pair closer together than this are
    /// rejected (see the gating policy in `impact.rs`).
    pub min_time_between_impacts_s: f64,

    /// An elapsed time since the last impact on a pair larger than this
    /// is treated as a fresh contact rather than extremely sparse repeat
    /// contact.
    pub max_time_between_impacts_s: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        SynthesisConfig {
            simulation_amp: 0.5,
            min_time_between_impacts_s: 0.0001,
            max_time_between_impacts_s: 1000.0,
        }
    }
}

impl SynthesisConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(0.0..0.99).contains(&self.simulation_amp) {
            return Err(crate::error::Error::BadArgument {
                name: "simulation_amp".into(),
                message: "must be in (0, 0.99)".into(),
            });
        }
        Ok(())
    }
}

lazy_static::lazy_static! {
    /// Legacy-compatibility path: CLI parity for callers who don't want to
    /// build a [`SynthesisConfig`] themselves. Library consumers should
    /// prefer passing an explicit config to `AudioGenerator::new`.
    static ref DEFAULT_CONFIG: SynthesisConfig = SynthesisConfig::default();
}

pub fn default_config() -> SynthesisConfig {
    *DEFAULT_CONFIG
}
