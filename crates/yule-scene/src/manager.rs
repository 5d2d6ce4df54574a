//! Effect manager: owns every effect in the scene and advances them per frame

use crate::atmosphere::{Atmosphere, PowerChange};
use crate::campfire::{Campfire, FlameTongue};
use crate::config::SceneConfig;
use crate::decoration::{Decoration, DecorationKind, DecorationStore};
use serde::Serialize;
use std::collections::VecDeque;
use yule_core::{Color, DecorationId, Result, SceneRng, Vec3};
use yule_particles::{FireworkBurst, FlareStatus, LifetimeStatus, ParticleInstance};
use yule_runtime::{AudioCue, AudioSink, EventBus, FrameTime, SceneEvent, SceneSystem};
use yule_sequence::{AirdropController, AirdropView, SequenceTrigger};

/// Running counters for the host and the CLI report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SceneStats {
    pub ticks: u64,
    pub flares_ignited: u64,
    pub flares_expired: u64,
    pub fireworks_launched: u64,
    pub fireworks_finished: u64,
    pub fireworks_evicted: u64,
    pub airdrops_started: u64,
    pub airdrops_completed: u64,
    pub decorations_spawned: u64,
    pub decorations_placed: u64,
    pub active_fireworks: usize,
    pub burning_campfires: usize,
}

/// One campfire as the renderer sees it
#[derive(Debug, Clone, Copy)]
pub struct CampfireView<'a> {
    pub anchor: Vec3,
    pub active: bool,
    /// Particle positions relative to `anchor`
    pub positions: &'a [[f32; 3]],
    pub colors: &'a [[f32; 3]],
    pub point_size: f32,
    pub light_intensity: f32,
    pub tongues: &'a [FlameTongue],
}

/// One firework burst as the renderer sees it
#[derive(Debug, Clone, Copy)]
pub struct FireworkView<'a> {
    pub anchor: Vec3,
    pub positions: &'a [[f32; 3]],
    pub colors: &'a [[f32; 3]],
    pub opacity: f32,
    pub point_size: f32,
    pub light_intensity: f32,
    pub light_color: Color,
}

/// Borrowed snapshot of everything drawable after a tick
#[derive(Debug, Clone)]
pub struct RenderFrame<'a> {
    pub campfires: Vec<CampfireView<'a>>,
    pub fireworks: Vec<FireworkView<'a>>,
    pub airdrop: AirdropView,
    pub snow: f32,
    pub shake: f32,
    pub lights_on: bool,
}

/// Composition root for the holiday scene.
///
/// Inputs (`click_campfire`, `launch_firework`, `request_airdrop`, ...) take
/// effect immediately or on the next `tick`; nothing is delivered later than
/// the tick that produced it.
pub struct EffectManager {
    config: SceneConfig,
    campfires: Vec<Campfire>,
    /// Oldest first
    fireworks: VecDeque<FireworkBurst>,
    airdrop: AirdropController,
    atmosphere: Atmosphere,
    audio: Box<dyn AudioSink>,
    store: Box<dyn DecorationStore>,
    events: EventBus,
    rng: SceneRng,
    instances: Vec<ParticleInstance>,
    stats: SceneStats,
}

impl EffectManager {
    pub fn new(
        config: SceneConfig,
        audio: Box<dyn AudioSink>,
        store: Box<dyn DecorationStore>,
    ) -> Result<Self> {
        config.validate()?;
        let rng = config
            .seed
            .map(SceneRng::new)
            .unwrap_or_else(SceneRng::from_time);
        let campfires = config
            .campfires
            .iter()
            .map(|&anchor| Campfire::new(anchor, config.flare.clone()))
            .collect();
        Ok(Self {
            campfires,
            fireworks: VecDeque::new(),
            airdrop: AirdropController::new(config.airdrop.clone()),
            atmosphere: Atmosphere::new(config.atmosphere.clone()),
            audio,
            store,
            events: EventBus::new(),
            rng,
            instances: Vec::new(),
            stats: SceneStats::default(),
            config,
        })
    }

    // ── Input ──

    /// Re-ignite campfire `index`. Returns false for an unknown index.
    pub fn click_campfire(&mut self, index: usize) -> bool {
        let Some(campfire) = self.campfires.get_mut(index) else {
            log::warn!("[effects] No campfire at index {index}");
            return false;
        };
        campfire.ignite(&mut self.rng);
        self.audio.play(AudioCue::FireWhoosh);
        self.events.push(SceneEvent::FlareIgnited { campfire: index });
        self.stats.flares_ignited += 1;
        true
    }

    /// Burst a firework at `position`. At capacity the oldest burst is dropped.
    pub fn launch_firework(&mut self, position: Vec3) {
        while self.fireworks.len() >= self.config.max_fireworks {
            let Some(evicted) = self.fireworks.pop_front() else {
                break;
            };
            log::warn!(
                "[effects] Firework limit {} reached, dropping burst at {:?}",
                self.config.max_fireworks,
                evicted.anchor()
            );
            self.stats.fireworks_evicted += 1;
        }
        let burst = FireworkBurst::new(position, &self.config.firework, &mut self.rng);
        self.fireworks.push_back(burst);
        self.audio.play(AudioCue::FireworkLaunch);
        self.events.push(SceneEvent::FireworkLaunched { position });
        self.stats.fireworks_launched += 1;
    }

    /// Ask for an airdrop. Ignored (false) while one is running or pending.
    pub fn request_airdrop(&mut self) -> bool {
        let accepted = self.airdrop.request_start();
        if !accepted {
            log::debug!("[effects] Airdrop request ignored, phase {:?}", self.airdrop.phase());
        }
        accepted
    }

    pub fn pointer_moved(&mut self, dx: f32, dy: f32) {
        self.atmosphere.pointer_moved(dx, dy);
    }

    /// Press the tree's power button
    pub fn toggle_power(&mut self) -> PowerChange {
        let change = self.atmosphere.toggle_power();
        if let Some(cue) = change.cue() {
            self.audio.play(cue);
        }
        if change == PowerChange::SwitchedOff {
            self.events.push(SceneEvent::LightsChanged { lit: false });
        }
        change
    }

    /// Hang a user decoration on the tree. Only possible while the lights
    /// are on; returns the new id, or `None` if rejected.
    pub fn place_decoration(
        &mut self,
        sender: &str,
        position: Vec3,
        kind: DecorationKind,
        color: Color,
        message: &str,
    ) -> Option<DecorationId> {
        if !self.atmosphere.lights_on() {
            log::debug!("[effects] Decoration from {sender} rejected, lights are off");
            return None;
        }
        let decoration = Decoration::placed_by(sender, position, kind, color, message);
        let id = decoration.id;
        self.store.insert_batch(vec![decoration]);
        self.audio.play(AudioCue::Chime);
        self.events.push(SceneEvent::DecorationPlaced { id });
        self.stats.decorations_placed += 1;
        Some(id)
    }

    // ── Frame ──

    /// Advance every effect by one frame.
    ///
    /// Order: airdrop (and everything its triggers spawn), campfires,
    /// fireworks, atmosphere.
    pub fn tick(&mut self, time: FrameTime) {
        self.stats.ticks += 1;

        for trigger in self.airdrop.tick(time.delta) {
            self.handle_trigger(trigger);
        }

        for (index, campfire) in self.campfires.iter_mut().enumerate() {
            if campfire.tick(time) == FlareStatus::Expired {
                self.events.push(SceneEvent::FlareExpired { campfire: index });
                self.stats.flares_expired += 1;
            }
        }

        let events = &mut self.events;
        let stats = &mut self.stats;
        self.fireworks.retain_mut(|burst| match burst.tick(time) {
            LifetimeStatus::Running => true,
            LifetimeStatus::Completed | LifetimeStatus::Spent => {
                events.push(SceneEvent::FireworkFinished {
                    position: burst.anchor(),
                });
                stats.fireworks_finished += 1;
                false
            }
        });

        if self.atmosphere.update(time.delta) {
            self.events.push(SceneEvent::LightsChanged { lit: true });
        }
    }

    fn handle_trigger(&mut self, trigger: SequenceTrigger) {
        match trigger {
            SequenceTrigger::Started => {
                self.audio.play(AudioCue::SleighBells);
                self.events.push(SceneEvent::AirdropStarted);
                self.stats.airdrops_started += 1;
            }
            SequenceTrigger::Landed => {
                self.audio.play(AudioCue::ImpactThud);
                self.events.push(SceneEvent::AirdropLanded);
            }
            SequenceTrigger::Explode => {
                let count = self.config.decorations_per_airdrop;
                let batch = self.config.scatter.scatter(count, &mut self.rng);
                self.store.insert_batch(batch);
                self.stats.decorations_spawned += count as u64;
                log::info!("[effects] Airdrop exploded, {count} decorations spawned");
                self.launch_firework(self.config.airdrop_firework_at);
                self.events.push(SceneEvent::AirdropExploded { decorations: count });
            }
            SequenceTrigger::Complete => {
                self.events.push(SceneEvent::AirdropCompleted);
                self.stats.airdrops_completed += 1;
            }
        }
    }

    // ── Output ──

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        self.events.drain()
    }

    pub fn render_frame(&self) -> RenderFrame<'_> {
        let campfires = self
            .campfires
            .iter()
            .map(|campfire| {
                let flare = campfire.flare();
                CampfireView {
                    anchor: campfire.anchor(),
                    active: flare.is_active(),
                    positions: flare.buffer().positions(),
                    colors: flare.buffer().colors(),
                    point_size: flare.point_size(),
                    light_intensity: flare.light_intensity(),
                    tongues: campfire.tongues(),
                }
            })
            .collect();
        let fireworks = self
            .fireworks
            .iter()
            .map(|burst| FireworkView {
                anchor: burst.anchor(),
                positions: burst.buffer().positions(),
                colors: burst.buffer().colors(),
                opacity: burst.opacity(),
                point_size: burst.point_size(),
                light_intensity: burst.light_intensity(),
                light_color: burst.light_color(),
            })
            .collect();
        RenderFrame {
            campfires,
            fireworks,
            airdrop: self.airdrop.view(),
            snow: self.atmosphere.snow_amount(),
            shake: self.atmosphere.shake_intensity(),
            lights_on: self.atmosphere.lights_on(),
        }
    }

    /// Pack every visible particle into GPU instances, reusing the buffer
    pub fn pack_instances(&mut self) -> &[ParticleInstance] {
        self.instances.clear();
        for campfire in &self.campfires {
            let flare = campfire.flare();
            ParticleInstance::pack(
                flare.buffer(),
                campfire.anchor(),
                flare.point_size(),
                1.0,
                &mut self.instances,
            );
        }
        for burst in &self.fireworks {
            ParticleInstance::pack(
                burst.buffer(),
                burst.anchor(),
                burst.point_size(),
                burst.opacity(),
                &mut self.instances,
            );
        }
        &self.instances
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats {
            active_fireworks: self.fireworks.len(),
            burning_campfires: self
                .campfires
                .iter()
                .filter(|c| c.flare().is_active())
                .count(),
            ..self.stats
        }
    }

    pub fn airdrop(&self) -> &AirdropController {
        &self.airdrop
    }

    pub fn atmosphere(&self) -> &Atmosphere {
        &self.atmosphere
    }

    pub fn campfires(&self) -> &[Campfire] {
        &self.campfires
    }

    pub fn fireworks(&self) -> &VecDeque<FireworkBurst> {
        &self.fireworks
    }

    pub fn store(&self) -> &dyn DecorationStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}

impl SceneSystem for EffectManager {
    fn initialize(&mut self) -> Result<()> {
        log::info!(
            "[effects] Initialized: {} campfires, airdrop drops {} decorations",
            self.campfires.len(),
            self.config.decorations_per_airdrop
        );
        Ok(())
    }

    fn update(&mut self, time: FrameTime) -> Result<()> {
        self.tick(time);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        let stats = self.stats();
        log::info!(
            "[effects] Shutdown after {} ticks ({} fireworks, {} airdrops)",
            stats.ticks,
            stats.fireworks_launched,
            stats.airdrops_completed
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "effects"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoration::ConeScatter;
    use std::cell::RefCell;
    use std::rc::Rc;
    use yule_runtime::FrameClock;
    use yule_sequence::Phase;

    #[derive(Clone, Default)]
    struct RecordingAudio(Rc<RefCell<Vec<AudioCue>>>);

    impl AudioSink for RecordingAudio {
        fn play(&mut self, cue: AudioCue) {
            self.0.borrow_mut().push(cue);
        }
    }

    #[derive(Clone, Default)]
    struct RecordingStore(Rc<RefCell<Vec<Decoration>>>);

    impl DecorationStore for RecordingStore {
        fn insert_batch(&mut self, batch: Vec<Decoration>) {
            self.0.borrow_mut().extend(batch);
        }

        fn len(&self) -> usize {
            self.0.borrow().len()
        }
    }

    fn seeded() -> SceneConfig {
        SceneConfig {
            seed: Some(2024),
            ..SceneConfig::default()
        }
    }

    fn manager_with(config: SceneConfig) -> (EffectManager, RecordingAudio, RecordingStore) {
        let audio = RecordingAudio::default();
        let store = RecordingStore::default();
        let manager =
            EffectManager::new(config, Box::new(audio.clone()), Box::new(store.clone())).unwrap();
        (manager, audio, store)
    }

    fn run(manager: &mut EffectManager, clock: &mut FrameClock, seconds: f64, dt: f64) {
        let ticks = (seconds / dt).round() as usize;
        for _ in 0..ticks {
            manager.tick(clock.advance(dt));
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = seeded();
        config.max_fireworks = 0;
        let result = EffectManager::new(
            config,
            Box::new(RecordingAudio::default()),
            Box::new(RecordingStore::default()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn airdrop_scatters_exactly_once_on_the_cone() {
        let (mut manager, _audio, store) = manager_with(seeded());
        let mut clock = FrameClock::new();
        assert!(manager.request_airdrop());
        run(&mut manager, &mut clock, 8.0, 0.1);

        let decorations = store.0.borrow();
        assert_eq!(decorations.len(), 50);
        let cone = ConeScatter::default();
        for d in decorations.iter() {
            assert!(cone.contains(d.position));
            assert_eq!(d.sender, "Santa");
        }

        let explosions = manager
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, SceneEvent::AirdropExploded { .. }))
            .count();
        assert_eq!(explosions, 1);
        assert_eq!(manager.airdrop().phase(), Phase::Idle);
    }

    #[test]
    fn airdrop_events_and_cues_in_order() {
        let (mut manager, audio, _store) = manager_with(seeded());
        let mut clock = FrameClock::new();
        manager.request_airdrop();
        run(&mut manager, &mut clock, 8.0, 0.1);

        let airdrop_events: Vec<_> = manager
            .drain_events()
            .into_iter()
            .filter(|e| {
                matches!(
                    e,
                    SceneEvent::AirdropStarted
                        | SceneEvent::AirdropLanded
                        | SceneEvent::AirdropExploded { .. }
                        | SceneEvent::AirdropCompleted
                )
            })
            .collect();
        assert_eq!(
            airdrop_events,
            vec![
                SceneEvent::AirdropStarted,
                SceneEvent::AirdropLanded,
                SceneEvent::AirdropExploded { decorations: 50 },
                SceneEvent::AirdropCompleted,
            ]
        );
        assert_eq!(
            *audio.0.borrow(),
            vec![
                AudioCue::SleighBells,
                AudioCue::ImpactThud,
                AudioCue::FireworkLaunch,
            ]
        );
    }

    #[test]
    fn explosion_launches_firework_above_tree() {
        let (mut manager, _audio, _store) = manager_with(seeded());
        let mut clock = FrameClock::new();
        manager.request_airdrop();
        let mut launched = None;
        for _ in 0..80 {
            manager.tick(clock.advance(0.1));
            for event in manager.drain_events() {
                if let SceneEvent::FireworkLaunched { position } = event {
                    launched = Some(position);
                }
            }
            if launched.is_some() {
                break;
            }
        }
        assert_eq!(launched, Some(Vec3::new(0.0, 2.0, 0.0)));
        assert_eq!(manager.fireworks().len(), 1);
    }

    #[test]
    fn second_airdrop_request_while_running_is_ignored() {
        let (mut manager, _audio, store) = manager_with(seeded());
        let mut clock = FrameClock::new();
        assert!(manager.request_airdrop());
        assert!(!manager.request_airdrop());
        run(&mut manager, &mut clock, 1.0, 0.1);
        assert!(!manager.request_airdrop());
        run(&mut manager, &mut clock, 8.0, 0.1);
        assert_eq!(store.len(), 50);
        assert_eq!(manager.stats().airdrops_completed, 1);
    }

    #[test]
    fn firework_released_exactly_once() {
        let (mut manager, _audio, _store) = manager_with(seeded());
        let mut clock = FrameClock::new();
        manager.launch_firework(Vec3::new(1.0, 3.0, 0.0));
        run(&mut manager, &mut clock, 3.0, 0.1);

        let finished: Vec<_> = manager
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, SceneEvent::FireworkFinished { .. }))
            .collect();
        assert_eq!(
            finished,
            vec![SceneEvent::FireworkFinished {
                position: Vec3::new(1.0, 3.0, 0.0)
            }]
        );
        assert!(manager.fireworks().is_empty());
        assert_eq!(manager.stats().fireworks_finished, 1);
    }

    #[test]
    fn oldest_firework_evicted_at_capacity() {
        let mut config = seeded();
        config.max_fireworks = 2;
        let (mut manager, _audio, _store) = manager_with(config);
        manager.launch_firework(Vec3::new(1.0, 0.0, 0.0));
        manager.launch_firework(Vec3::new(2.0, 0.0, 0.0));
        manager.launch_firework(Vec3::new(3.0, 0.0, 0.0));
        let anchors: Vec<_> = manager.fireworks().iter().map(|f| f.anchor()).collect();
        assert_eq!(anchors, vec![Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)]);
        assert_eq!(manager.stats().fireworks_evicted, 1);
    }

    #[test]
    fn sustained_launches_keep_the_newest_bursts() {
        let mut config = seeded();
        config.max_fireworks = 3;
        let (mut manager, _audio, _store) = manager_with(config);
        for i in 0..10 {
            manager.launch_firework(Vec3::new(i as f32, 4.0, 0.0));
        }
        let xs: Vec<f32> = manager.fireworks().iter().map(|f| f.anchor().x).collect();
        assert_eq!(xs, vec![7.0, 8.0, 9.0]);
        let stats = manager.stats();
        assert_eq!(stats.fireworks_evicted, 7);
        assert_eq!(stats.fireworks_launched, 10);
        assert_eq!(stats.active_fireworks, 3);
    }

    #[test]
    fn flare_burns_out_after_duration() {
        let (mut manager, audio, _store) = manager_with(seeded());
        let mut clock = FrameClock::new();
        assert!(manager.click_campfire(0));
        assert_eq!(*audio.0.borrow(), vec![AudioCue::FireWhoosh]);

        manager.tick(clock.advance(1.0 / 60.0));
        assert!(manager.campfires()[0].flare().buffer().lit_count() > 0);
        assert_eq!(manager.stats().burning_campfires, 1);

        run(&mut manager, &mut clock, 2.1, 1.0 / 60.0);
        let buffer = manager.campfires()[0].flare().buffer();
        assert_eq!(buffer.len(), 100);
        assert_eq!(buffer.lit_count(), 0);
        assert!(manager
            .drain_events()
            .contains(&SceneEvent::FlareExpired { campfire: 0 }));
    }

    #[test]
    fn unknown_campfire_click_is_ignored() {
        let (mut manager, audio, _store) = manager_with(seeded());
        assert!(!manager.click_campfire(99));
        assert!(audio.0.borrow().is_empty());
        assert!(manager.drain_events().is_empty());
    }

    #[test]
    fn decorations_need_lights() {
        let (mut manager, audio, store) = manager_with(seeded());
        let mut clock = FrameClock::new();
        let position = Vec3::new(0.5, 2.0, 0.5);
        assert!(manager
            .place_decoration("Ada", position, DecorationKind::Star, Color::WHITE, "")
            .is_none());

        assert_eq!(manager.toggle_power(), PowerChange::Charging);
        run(&mut manager, &mut clock, 2.0, 0.1);
        assert!(manager
            .drain_events()
            .contains(&SceneEvent::LightsChanged { lit: true }));

        let id = manager
            .place_decoration("Ada", position, DecorationKind::Star, Color::WHITE, "")
            .unwrap();
        let stored = store.0.borrow();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].message, "Happy Holidays!");
        assert_eq!(
            *audio.0.borrow(),
            vec![AudioCue::PowerUp, AudioCue::Chime]
        );
    }

    #[test]
    fn packs_only_visible_particles() {
        let (mut manager, _audio, _store) = manager_with(seeded());
        let mut clock = FrameClock::new();
        manager.tick(clock.advance(0.1));
        assert!(manager.pack_instances().is_empty());

        manager.click_campfire(1);
        manager.launch_firework(Vec3::new(0.0, 5.0, 0.0));
        manager.tick(clock.advance(1.0 / 60.0));
        let packed = manager.pack_instances().len();
        assert!(packed > 0);
        assert!(packed <= 100 + 150);
    }

    #[test]
    fn render_frame_reflects_scene() {
        let (mut manager, _audio, _store) = manager_with(seeded());
        let mut clock = FrameClock::new();
        manager.click_campfire(2);
        manager.pointer_moved(30.0, 30.0);
        manager.tick(clock.advance(0.1));

        let frame = manager.render_frame();
        assert_eq!(frame.campfires.len(), 3);
        assert!(frame.campfires[2].active);
        assert!(!frame.campfires[0].active);
        assert_eq!(frame.campfires[2].tongues.len(), 3);
        assert_eq!(frame.campfires[2].anchor, Vec3::new(0.0, 0.0, -5.0));
        assert!(frame.shake > 0.0);
        assert!(frame.snow > 0.0);
        assert!(!frame.lights_on);
        assert_eq!(frame.airdrop.phase, Phase::Idle);
    }

    #[test]
    fn zero_delta_tick_changes_nothing() {
        let (mut manager, _audio, _store) = manager_with(seeded());
        let mut clock = FrameClock::new();
        manager.click_campfire(0);
        manager.tick(clock.advance(0.1));
        let before = manager.campfires()[0].flare().buffer().positions().to_vec();
        manager.tick(clock.advance(0.0));
        assert_eq!(manager.campfires()[0].flare().buffer().positions(), &before[..]);
    }

    #[test]
    fn stats_serialize_to_json() {
        let (mut manager, _audio, _store) = manager_with(seeded());
        manager.launch_firework(Vec3::ZERO);
        let json = serde_json::to_value(manager.stats()).unwrap();
        assert_eq!(json["fireworks_launched"], 1);
        assert_eq!(json["active_fireworks"], 1);
    }

    #[test]
    fn runs_as_scene_system() {
        let (mut manager, _audio, _store) = manager_with(seeded());
        manager.initialize().unwrap();
        manager.update(FrameTime::new(0.1, 0.1)).unwrap();
        manager.shutdown().unwrap();
        assert_eq!(manager.name(), "effects");
        assert_eq!(manager.stats().ticks, 1);
    }
}
