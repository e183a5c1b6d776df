//! Multi-object dispatcher: routes `CollisionEvent`s to per-pair
//! synthesizers and reports results through a caller-supplied event sink.

use std::collections::{HashMap, HashSet};

use crate::config::SynthesisConfig;
use crate::error::Result;
use crate::event::{CollisionEvent, CollisionKind, ObjectPairKey, Vec3d};
use crate::impact::{ImpactSynthesizer, MAX_IMPACT_SAMPLES};
use crate::object::ClatterObjectData;
use crate::rng::{RandomSource, XoshiroRandomSource};
use crate::samples::Samples;
use crate::scrape::{ScrapeLifecycle, ScrapeSynthesizer};
use crate::worker_pool::WorkerPool;

/// Represented as one sum type emitted through a sink, rather than four
/// independent callback slots. Downstreams that want per-kind dispatch
/// branch on the variant.
pub enum SynthesisEvent {
    Impact { event: CollisionEvent, samples: Samples, centroid: Vec3d, source_id: u64 },
    ScrapeStart { event: CollisionEvent, samples: Samples, centroid: Vec3d, source_id: u64 },
    ScrapeOngoing { event: CollisionEvent, samples: Samples, centroid: Vec3d, source_id: u64 },
    ScrapeEnd { source_id: u64 },
}

/// Allocates source ids for scrape streams, reusing ids from streams that
/// have ended rather than growing without bound, so a disjoint later
/// scrape can pick up a freed id.
#[derive(Default)]
struct SourceIdAllocator {
    next: u64,
    free: Vec<u64>,
}

impl SourceIdAllocator {
    fn allocate(&mut self) -> u64 {
        if let Some(id) = self.free.pop() {
            return id;
        }
        let id = self.next;
        self.next += 1;
        id
    }

    fn release(&mut self, id: u64) {
        self.free.push(id);
    }
}

struct ScrapePairState {
    synth: ScrapeSynthesizer,
    source_id: u64,
}

pub struct AudioGenerator {
    config: SynthesisConfig,
    objects: HashMap<u32, ClatterObjectData>,
    impact_states: HashMap<ObjectPairKey, ImpactSynthesizer>,
    scrape_states: HashMap<ObjectPairKey, ScrapePairState>,
    pending: Vec<CollisionEvent>,
    source_ids: SourceIdAllocator,
    rng: Box<dyn RandomSource + Send>,
    worker_pool: Option<WorkerPool>,
    tick_counter: u64,
    roughness_ratio_exponent_override: Option<f64>,
}

impl AudioGenerator {
    pub fn new(objects: Vec<ClatterObjectData>, config: SynthesisConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        let rng: Box<dyn RandomSource + Send> = match seed {
            Some(s) => Box::new(XoshiroRandomSource::new_seeded(s)),
            None => Box::new(XoshiroRandomSource::from_entropy()),
        };
        Ok(AudioGenerator {
            config,
            objects: objects.into_iter().map(|o| (o.id, o)).collect(),
            impact_states: HashMap::new(),
            scrape_states: HashMap::new(),
            pending: Vec::new(),
            source_ids: SourceIdAllocator::default(),
            rng,
            worker_pool: None,
            tick_counter: 0,
            roughness_ratio_exponent_override: None,
        })
    }

    pub fn with_worker_pool(mut self, pool: WorkerPool) -> Self {
        self.worker_pool = Some(pool);
        self
    }

    /// Override every scrape pair's roughness-ratio exponent, in place of
    /// the value baked into each pair's material data.
    pub fn with_roughness_ratio_exponent_override(mut self, exponent: f64) -> Self {
        self.roughness_ratio_exponent_override = Some(exponent);
        self
    }

    /// Enqueue a collision event, canonicalizing primary/secondary order so
    /// the dispatcher's per-pair key is independent of caller-supplied
    /// order.
    pub fn add_collision(&mut self, event: CollisionEvent) {
        self.pending.push(event.canonicalized());
    }

    /// Drain the pending queue, dispatch per-pair synthesis, and invoke
    /// `sink` for every resulting event in a deterministic order: all
    /// impacts (ascending canonical pair order), then scrape starts, then
    /// scrape ongoings, then scrape ends. `now_s` is the caller's
    /// simulation clock, passed straight through to each pair's
    /// [`ImpactSynthesizer`] for inter-event gating.
    pub fn update(&mut self, now_s: f64, sink: &mut dyn FnMut(SynthesisEvent)) -> Result<()> {
        self.tick_counter += 1;

        let mut by_pair: HashMap<ObjectPairKey, Vec<CollisionEvent>> = HashMap::new();
        for event in self.pending.drain(..) {
            by_pair.entry(event.pair_key()).or_default().push(event);
        }

        let mut pairs: Vec<ObjectPairKey> = by_pair.keys().copied().collect();
        pairs.sort();

        let mut impact_jobs = Vec::new();
        let mut scrape_jobs = Vec::new();
        let mut seen_scrapes: HashSet<ObjectPairKey> = HashSet::new();

        for pair in pairs {
            let events = by_pair.remove(&pair).unwrap();
            let impact_event = events
                .iter()
                .filter(|e| e.kind == CollisionKind::Impact)
                .max_by(|a, b| a.speed.partial_cmp(&b.speed).unwrap());

            if let Some(event) = impact_event {
                impact_jobs.push((pair, event.clone()));
                continue;
            }

            if let Some(event) = events.iter().rev().find(|e| e.kind == CollisionKind::Scrape) {
                seen_scrapes.insert(pair);
                scrape_jobs.push((pair, event.clone()));
            }
        }

        let worker_id_for = |pair: &ObjectPairKey, tick: u64| -> usize {
            use std::hash::{Hash, Hasher};
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            pair.hash(&mut hasher);
            tick.hash(&mut hasher);
            hasher.finish() as usize
        };

        // Take ownership of the per-pair synthesizers we'll touch this tick
        // so worker jobs can mutate them without the caller thread's
        // `&mut self` being borrowed at the same time (each pair is only
        // ever touched by one worker per tick, since pairs are disjoint by
        // construction).
        let mut impact_synths: Vec<ImpactSynthesizer> = impact_jobs
            .iter()
            .map(|(pair, _)| {
                self.impact_states
                    .remove(pair)
                    .unwrap_or_else(|| ImpactSynthesizer::new(self.config))
            })
            .collect();

        // Drawn from the generator's own RNG (itself seeded from
        // `AudioGenerator::new`'s `seed` argument), so two generators
        // constructed with different seeds never hand their per-pair
        // workers the same stream; `for_worker` then fans this one draw
        // out per pair so simultaneous pairs in the same tick diverge too.
        let base_seed = self.rng.next_u64();
        let tick = self.tick_counter;

        let impact_results: Vec<(bool, Samples, ImpactSynthesizer)> = {
            let jobs: Vec<_> = impact_jobs
                .iter()
                .zip(impact_synths.drain(..))
                .map(|((pair, event), mut synth)| {
                    let mut rng_local = Box::new(XoshiroRandomSource::for_worker(
                        base_seed,
                        worker_id_for(pair, tick),
                        tick,
                    )) as Box<dyn RandomSource + Send>;
                    let event = event.clone();
                    move || {
                        let mut samples = Samples::new(MAX_IMPACT_SAMPLES);
                        let accepted = synth
                            .get_audio(
                                &event.primary,
                                &event.secondary,
                                event.speed,
                                now_s,
                                rng_local.as_mut(),
                                &mut samples,
                            )
                            .unwrap_or(false);
                        (accepted, samples, synth)
                    }
                })
                .collect();

            match &self.worker_pool {
                Some(pool) => pool.run_batch(jobs),
                None => jobs.into_iter().map(|job| job()).collect(),
            }
        };

        for ((pair, event), (accepted, samples, synth)) in impact_jobs.into_iter().zip(impact_results) {
            self.impact_states.insert(pair, synth);
            if accepted {
                sink(SynthesisEvent::Impact {
                    centroid: event.position,
                    source_id: self.source_ids.allocate(),
                    samples,
                    event,
                });
            }
        }

        // Scrapes: rendered sequentially on the caller thread for
        // simplicity's sake (a single pair is rarely the bottleneck; the
        // worker pool's value is in overlapping many pairs' impact
        // renders). Lifecycle bookkeeping only ever touches this pair's own
        // state.
        let mut started_events = Vec::new();
        let mut ongoing_events = Vec::new();
        for (pair, event) in scrape_jobs {
            let is_new = !self.scrape_states.contains_key(&pair);
            let roughness_override = self.roughness_ratio_exponent_override;
            let state = self.scrape_states.entry(pair).or_insert_with(|| {
                let mut synth = ScrapeSynthesizer::new(self.config);
                if let Some(exponent) = roughness_override {
                    synth = synth.with_roughness_ratio_exponent_override(exponent);
                }
                ScrapePairState { synth, source_id: self.source_ids.allocate() }
            });

            let mut samples = Samples::new(crate::config::SCRAPE_CHUNK);
            let lifecycle = state.synth.get_audio(
                &event.primary,
                &event.secondary,
                event.speed,
                self.rng.as_mut(),
                &mut samples,
            )?;

            let synth_event = SynthesisEvent::ScrapeStart {
                centroid: event.position,
                source_id: state.source_id,
                samples,
                event,
            };
            match lifecycle {
                ScrapeLifecycle::Start if is_new => started_events.push(synth_event),
                _ => ongoing_events.push(relabel_as_ongoing(synth_event)),
            }
        }

        for e in started_events {
            sink(e);
        }
        for e in ongoing_events {
            sink(e);
        }

        let ended: Vec<ObjectPairKey> = self
            .scrape_states
            .keys()
            .copied()
            .filter(|p| !seen_scrapes.contains(p))
            .collect();
        for pair in ended {
            if let Some(state) = self.scrape_states.remove(&pair) {
                self.source_ids.release(state.source_id);
                sink(SynthesisEvent::ScrapeEnd { source_id: state.source_id });
            }
        }

        Ok(())
    }

    /// Flush all active scrapes, firing `ScrapeEnd` for each, then clear
    /// all per-pair state.
    pub fn end(&mut self, sink: &mut dyn FnMut(SynthesisEvent)) {
        for (_, state) in self.scrape_states.drain() {
            self.source_ids.release(state.source_id);
            sink(SynthesisEvent::ScrapeEnd { source_id: state.source_id });
        }
        self.impact_states.clear();
    }

    pub fn object(&self, id: u32) -> Option<&ClatterObjectData> {
        self.objects.get(&id)
    }
}

fn relabel_as_ongoing(event: SynthesisEvent) -> SynthesisEvent {
    match event {
        SynthesisEvent::ScrapeStart { event, samples, centroid, source_id } => {
            SynthesisEvent::ScrapeOngoing { event, samples, centroid, source_id }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{self, ImpactMaterial, ScrapeMaterial, UnsizedImpactMaterial};
    use crate::object::ClatterObjectData;

    fn make_objects() -> (ClatterObjectData, ClatterObjectData) {
        let glass = ImpactMaterial::new(UnsizedImpactMaterial::Glass, 1);
        let stone = ImpactMaterial::new(UnsizedImpactMaterial::Stone, 4);
        materials::load_impact(glass).unwrap();
        materials::load_impact(stone).unwrap();
        materials::load_scrape(ScrapeMaterial::Ceramic).unwrap();
        (
            ClatterObjectData::new(0, glass, 0.2, 0.2, 1.0).with_scrape_material(ScrapeMaterial::Ceramic),
            ClatterObjectData::new(1, stone, 0.5, 0.1, 100.0),
        )
    }

    #[test]
    fn single_impact_fires_one_event() {
        let (a, b) = make_objects();
        let mut generator = AudioGenerator::new(vec![a.clone(), b.clone()], SynthesisConfig::default(), Some(1)).unwrap();
        generator.add_collision(CollisionEvent::new(a, b, CollisionKind::Impact, 1.0, Vec3d::ZERO));

        let mut fired = 0;
        generator
            .update(0.0, &mut |event| {
                if let SynthesisEvent::Impact { samples, .. } = event {
                    assert!(samples.length() > 0);
                    fired += 1;
                }
            })
            .unwrap();
        assert_eq!(fired, 1);
    }

    #[test]
    fn two_disjoint_pairs_both_fire_in_one_update() {
        let (a, b) = make_objects();
        let c = ClatterObjectData::new(2, a.material, 0.3, 0.1, 2.0);
        let d = ClatterObjectData::new(3, b.material, 0.3, 0.1, 2.0);
        let mut generator = AudioGenerator::new(
            vec![a.clone(), b.clone(), c.clone(), d.clone()],
            SynthesisConfig::default(),
            Some(1),
        )
        .unwrap();
        generator.add_collision(CollisionEvent::new(a, b, CollisionKind::Impact, 1.0, Vec3d::ZERO));
        generator.add_collision(CollisionEvent::new(c, d, CollisionKind::Impact, 1.0, Vec3d::ZERO));

        let mut fired = 0;
        generator
            .update(0.0, &mut |event| {
                if let SynthesisEvent::Impact { .. } = event {
                    fired += 1;
                }
            })
            .unwrap();
        assert_eq!(fired, 2);
    }

    #[test]
    fn scrape_lifecycle_starts_then_ends_on_end() {
        let (a, b) = make_objects();
        let mut generator = AudioGenerator::new(vec![a.clone(), b.clone()], SynthesisConfig::default(), Some(1)).unwrap();
        generator.add_collision(CollisionEvent::new(a.clone(), b.clone(), CollisionKind::Scrape, 0.5, Vec3d::ZERO));

        let mut saw_start = false;
        generator
            .update(0.0, &mut |event| {
                if let SynthesisEvent::ScrapeStart { .. } = event {
                    saw_start = true;
                }
            })
            .unwrap();
        assert!(saw_start);

        let mut saw_end = false;
        generator.end(&mut |event| {
            if let SynthesisEvent::ScrapeEnd { .. } = event {
                saw_end = true;
            }
        });
        assert!(saw_end);
    }

    #[test]
    fn scrape_source_id_is_stable_then_reused() {
        let (a, b) = make_objects();
        let mut generator = AudioGenerator::new(vec![a.clone(), b.clone()], SynthesisConfig::default(), Some(1)).unwrap();

        generator.add_collision(CollisionEvent::new(a.clone(), b.clone(), CollisionKind::Scrape, 0.5, Vec3d::ZERO));
        let mut first_id = None;
        generator
            .update(0.0, &mut |event| {
                if let SynthesisEvent::ScrapeStart { source_id, .. } = event {
                    first_id = Some(source_id);
                }
            })
            .unwrap();

        generator.add_collision(CollisionEvent::new(a.clone(), b.clone(), CollisionKind::Scrape, 0.5, Vec3d::ZERO));
        let mut second_id = None;
        generator
            .update(0.0, &mut |event| {
                if let SynthesisEvent::ScrapeOngoing { source_id, .. } = event {
                    second_id = Some(source_id);
                }
            })
            .unwrap();
        assert_eq!(first_id, second_id);

        let mut released_id = None;
        generator.end(&mut |event| {
            if let SynthesisEvent::ScrapeEnd { source_id } = event {
                released_id = Some(source_id);
            }
        });
        assert_eq!(first_id, released_id);

        let c = ClatterObjectData::new(2, a.material, 0.3, 0.1, 2.0);
        let d = ClatterObjectData::new(3, b.material, 0.3, 0.1, 2.0);
        generator.add_collision(CollisionEvent::new(c, d, CollisionKind::Scrape, 0.5, Vec3d::ZERO));
        let mut new_id = None;
        generator
            .update(0.0, &mut |event| {
                if let SynthesisEvent::ScrapeStart { source_id, .. } = event {
                    new_id = Some(source_id);
                }
            })
            .unwrap();
        assert_eq!(new_id, released_id);
    }
}
