//! Streaming scrape synthesis.

use crate::config::{SynthesisConfig, SCRAPE_CHUNK, SR};
use crate::error::Result;
use crate::impact::render_unit_modal_response;
use crate::materials;
use crate::object::ClatterObjectData;
use crate::rng::RandomSource;
use crate::samples::Samples;

/// Nominal distance (in the same units as the roughness profile's implied
/// sampling) that one full pass through a material's `dsdx` table
/// represents. Scaling the cursor advance by this lets faster scrapes
/// consume the profile faster without the profile's length leaking into
/// the physical-speed relationship.
const REFERENCE_LENGTH: f64 = 1.0;

/// Quality factor for the dynamic low-pass filter.
const LOWPASS_Q: f64 = core::f64::consts::FRAC_1_SQRT_2;

#[derive(Copy, Clone, Default)]
struct BiquadState {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadState {
    fn process(&mut self, input: &mut [f32], cutoff_hz: f64) {
        let omega = std::f64::consts::TAU * cutoff_hz / SR as f64;
        let alpha = omega.sin() / (2.0 * LOWPASS_Q);
        let cos_omega = omega.cos();

        let a0 = 1.0 + alpha;
        let b0 = ((1.0 - cos_omega) / 2.0) / a0;
        let b1 = (1.0 - cos_omega) / a0;
        let b2 = ((1.0 - cos_omega) / 2.0) / a0;
        let a1 = (-2.0 * cos_omega) / a0;
        let a2 = (1.0 - alpha) / a0;

        for sample in input.iter_mut() {
            let x0 = *sample as f64;
            let y0 = b0 * x0 + b1 * self.x1 + b2 * self.x2 - a1 * self.y1 - a2 * self.y2;
            self.x2 = self.x1;
            self.x1 = x0;
            self.y2 = self.y1;
            self.y1 = y0;
            *sample = y0 as f32;
        }
    }
}

pub fn get_num_scrape_events(duration_s: f64) -> usize {
    (duration_s * SR as f64 / SCRAPE_CHUNK as f64).ceil() as usize
}

pub enum ScrapeLifecycle {
    Start,
    Ongoing,
}

/// Per-pair scrape state: filter memory, roughness cursor, and the
/// precomputed pair-specific impulse response. Streaming: successive calls
/// to [`ScrapeSynthesizer::get_audio`] carry state forward for gapless
/// output.
pub struct ScrapeSynthesizer {
    config: SynthesisConfig,
    summed_master: Box<[f32; SCRAPE_CHUNK]>,
    lowpass: BiquadState,
    dsdx_cursor: usize,
    impulse_response: Option<Vec<f32>>,
    started: bool,
    roughness_ratio_exponent_override: Option<f64>,
}

impl ScrapeSynthesizer {
    pub fn new(config: SynthesisConfig) -> Self {
        ScrapeSynthesizer {
            config,
            summed_master: Box::new([0.0; SCRAPE_CHUNK]),
            lowpass: BiquadState::default(),
            dsdx_cursor: 0,
            impulse_response: None,
            started: false,
            roughness_ratio_exponent_override: None,
        }
    }

    pub fn with_roughness_ratio_exponent_override(mut self, exponent: f64) -> Self {
        self.roughness_ratio_exponent_override = Some(exponent);
        self
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    fn ensure_impulse_response(
        &mut self,
        primary: &ClatterObjectData,
        secondary: &ClatterObjectData,
    ) -> Result<()> {
        if self.impulse_response.is_some() {
            return Ok(());
        }
        let data_a = materials::get_impact(primary.material)?;
        let data_b = materials::get_impact(secondary.material)?;
        let ir = render_unit_modal_response(
            &data_a.modes,
            primary.resonance,
            &data_b.modes,
            secondary.resonance,
            SCRAPE_CHUNK,
        );
        self.impulse_response = Some(ir);
        Ok(())
    }

    /// Render one fixed-length chunk. Speed of exactly 0 naturally produces
    /// (eventually) silence: the force curve is scaled by `speed^2`, so no
    /// special-case branch is needed for the "zero-filled chunk"
    /// behavior; only previously-buffered `summed_master` tail and filter
    /// ringing remain audible for a couple of chunks after speed drops to 0.
    pub fn get_audio(
        &mut self,
        primary: &ClatterObjectData,
        secondary: &ClatterObjectData,
        speed: f64,
        // Signature mirrors `ImpactSynthesizer::get_audio`; the force curve
        // here has no stochastic term, so this stays unused.
        _rng: &mut dyn RandomSource,
        samples: &mut Samples,
    ) -> Result<ScrapeLifecycle> {
        self.ensure_impulse_response(primary, secondary)?;
        let ir = self.impulse_response.as_ref().unwrap();

        let scrape_material = primary.effective_scrape_material();
        let data = materials::get_scrape(scrape_material)?;
        let roughness_ratio_exponent = self
            .roughness_ratio_exponent_override
            .unwrap_or(data.roughness_ratio_exponent);

        let profile_len = data.dsdx.len().max(1);
        let step = ((speed * SCRAPE_CHUNK as f64 / REFERENCE_LENGTH).abs() as usize) % profile_len;
        self.dsdx_cursor = (self.dsdx_cursor + step) % profile_len;

        let roughness_ratio = speed.max(1e-5);
        let roughness_scale = (1.0 / roughness_ratio).powf(roughness_ratio_exponent) * speed * speed;

        let mut force = vec![0.0f64; SCRAPE_CHUNK];
        for (i, slot) in force.iter_mut().enumerate() {
            let idx = (self.dsdx_cursor + i) % profile_len;
            *slot = data.dsdx[idx] * roughness_scale;
        }

        let mut chunk_out = vec![0.0f32; SCRAPE_CHUNK];
        let mut next_summed_master = [0.0f32; SCRAPE_CHUNK];
        for n in 0..(2 * SCRAPE_CHUNK) {
            let mut acc = 0.0f64;
            let k_lo = n.saturating_sub(ir.len() - 1);
            let k_hi = n.min(SCRAPE_CHUNK - 1);
            for k in k_lo..=k_hi {
                let ir_idx = n - k;
                if ir_idx < ir.len() {
                    acc += force[k] * ir[ir_idx] as f64;
                }
            }
            if n < SCRAPE_CHUNK {
                chunk_out[n] = acc as f32;
            } else {
                next_summed_master[n - SCRAPE_CHUNK] = acc as f32;
            }
        }

        for i in 0..SCRAPE_CHUNK {
            chunk_out[i] += self.summed_master[i];
        }
        *self.summed_master = next_summed_master;

        let cutoff_hz = (1000.0 + 4000.0 * speed).clamp(200.0, 18000.0);
        self.lowpass.process(&mut chunk_out, cutoff_hz);

        let amp = self.config.simulation_amp as f32;
        for v in chunk_out.iter_mut() {
            *v = v.clamp(-amp, amp);
        }

        samples.as_mut_slice()[..SCRAPE_CHUNK].copy_from_slice(&chunk_out);
        samples.set_length(SCRAPE_CHUNK);

        let lifecycle = if self.started {
            ScrapeLifecycle::Ongoing
        } else {
            self.started = true;
            ScrapeLifecycle::Start
        };

        Ok(lifecycle)
    }
}
