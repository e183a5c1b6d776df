//! Modal impact synthesis.

use crate::config::{SynthesisConfig, SR};
use crate::error::Result;
use crate::materials;
use crate::object::ClatterObjectData;
use crate::rng::RandomSource;
use crate::samples::Samples;

/// Modes quieter than this are inaudible; both truncate a mode's own
/// sinusoid and are skipped outright when deciding the render length.
const MIN_RENDER_AMPLITUDE: f64 = 1e-7;

/// Upper bound on one impact render, so a pathological combination of very
/// low damping and high resonance can't allocate unbounded memory.
pub const MAX_IMPACT_SAMPLES: usize = 2 * SR as usize;

struct RenderedMode {
    amplitude: f64,
    frequency_hz: f64,
    tau_s: f64,
}

/// Render the modal sum for a pair with a canonical unit excitation: no
/// per-call amplitude randomization, no mass weighting, no peak
/// normalization. Used by the scrape synthesizer to build a
/// one-time impulse response for a pair, reusing the same mode-combination
/// logic that drives impact rendering instead of duplicating it.
pub(crate) fn render_unit_modal_response(
    modes_a: &[crate::materials::Mode],
    resonance_a: f64,
    modes_b: &[crate::materials::Mode],
    resonance_b: f64,
    length_samples: usize,
) -> Vec<f32> {
    let mut out = vec![0.0f32; length_samples];
    for (modes, resonance) in [(modes_a, resonance_a), (modes_b, resonance_b)] {
        for mode in modes {
            let amplitude = 10f64.powf(mode.power_db / 20.0);
            let tau_s = (mode.decay_ms / 1000.0) * (1.0 + resonance);
            if amplitude <= MIN_RENDER_AMPLITUDE || tau_s <= 0.0 {
                continue;
            }
            let omega = std::f64::consts::TAU * mode.frequency_hz;
            for (n, slot) in out.iter_mut().enumerate() {
                let t = n as f64 / SR as f64;
                *slot += (amplitude * (omega * t).sin() * (-t / tau_s).exp()) as f32;
            }
        }
    }
    out
}

/// Per-pair impact state: inter-event timing used to gate closely spaced
/// impacts. Stateless otherwise — the actual synthesis reads
/// fresh material data from the catalogue on every call.
pub struct ImpactSynthesizer {
    config: SynthesisConfig,
    previous_impact_time_s: f64,
    previous_contact_time_s: f64,
}

impl ImpactSynthesizer {
    pub fn new(config: SynthesisConfig) -> Self {
        ImpactSynthesizer {
            config,
            previous_impact_time_s: f64::NEG_INFINITY,
            previous_contact_time_s: f64::NEG_INFINITY,
        }
    }

    /// Render one impact, or reject it. `now_s` is the caller's simulation
    /// clock; `samples` must have capacity >= [`MAX_IMPACT_SAMPLES`].
    ///
    /// Returns `Ok(true)` with `samples.length() > 0` on success, `Ok(false)`
    /// with `samples.length() == 0` if the event was rejected.
    pub fn get_audio(
        &mut self,
        primary: &ClatterObjectData,
        secondary: &ClatterObjectData,
        speed: f64,
        now_s: f64,
        rng: &mut dyn RandomSource,
        samples: &mut Samples,
    ) -> Result<bool> {
        samples.set_length(0);

        if speed <= 0.0 {
            return Ok(false);
        }

        let dt = now_s - self.previous_impact_time_s;
        if dt > self.config.max_time_between_impacts_s {
            // Elapsed time is large enough that this isn't really a
            // "repeat" contact; start the gating state over.
            self.previous_impact_time_s = f64::NEG_INFINITY;
            self.previous_contact_time_s = f64::NEG_INFINITY;
        } else {
            // Canonical choice for closely-spaced repeat impacts:
            // reject, not fold. The gap must clear both
            // the configured minimum and however long the previous
            // impact's sound is still ringing.
            let min_gap = self
                .config
                .min_time_between_impacts_s
                .max(self.previous_contact_time_s);
            if dt < min_gap {
                return Ok(false);
            }
        }

        let data_a = materials::get_impact(primary.material)?;
        let data_b = materials::get_impact(secondary.material)?;

        let cf_a = primary.amp * speed * data_a.cf;
        let cf_b = secondary.amp * speed * data_b.cf;

        let mut rendered = Vec::with_capacity(data_a.modes.len() + data_b.modes.len());
        for (cf, resonance, data) in [
            (cf_a, primary.resonance, &data_a),
            (cf_b, secondary.resonance, &data_b),
        ] {
            for mode in &data.modes {
                let amplitude = cf * 10f64.powf(mode.power_db / 20.0) * rng.gaussian(0.0, 1.0);
                let tau_s = (mode.decay_ms / 1000.0) * (1.0 + resonance);
                rendered.push(RenderedMode { amplitude, frequency_hz: mode.frequency_hz, tau_s });
            }
        }

        let mut length_samples = 0usize;
        for m in &rendered {
            if m.amplitude.abs() <= MIN_RENDER_AMPLITUDE || m.tau_s <= 0.0 {
                continue;
            }
            let t_max = m.tau_s * (m.amplitude.abs() / MIN_RENDER_AMPLITUDE).ln();
            length_samples = length_samples.max((t_max * SR as f64).ceil().max(0.0) as usize);
        }
        length_samples = length_samples.clamp(1, MAX_IMPACT_SAMPLES);

        let buf = samples.as_mut_slice();
        for v in buf[..length_samples].iter_mut() {
            *v = 0.0;
        }
        for m in &rendered {
            if m.amplitude.abs() <= MIN_RENDER_AMPLITUDE || m.tau_s <= 0.0 {
                continue;
            }
            let omega = std::f64::consts::TAU * m.frequency_hz;
            for (n, slot) in buf[..length_samples].iter_mut().enumerate() {
                let t = n as f64 / SR as f64;
                *slot += (m.amplitude * (omega * t).sin() * (-t / m.tau_s).exp()) as f32;
            }
        }

        // Mass of the lighter object is favored: a light object hit by a
        // heavy one rings closer to its own natural loudness rather than
        // being dragged down by the heavy object's mass.
        let lighter_mass = primary.mass.min(secondary.mass);
        let mass_weight = 1.0 + (1.0 + lighter_mass).log10();
        for v in buf[..length_samples].iter_mut() {
            *v = (*v as f64 / mass_weight) as f32;
        }

        let peak = buf[..length_samples]
            .iter()
            .fold(0.0f32, |acc, &v| acc.max(v.abs()));
        if (peak as f64) > self.config.simulation_amp {
            let scale = (self.config.simulation_amp / peak as f64) as f32;
            for v in buf[..length_samples].iter_mut() {
                *v *= scale;
            }
        }

        samples.set_length(length_samples);

        self.previous_contact_time_s = length_samples as f64 / SR as f64;
        self.previous_impact_time_s = now_s;

        Ok(true)
    }
}
