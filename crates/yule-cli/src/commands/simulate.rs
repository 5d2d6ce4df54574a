//! Simulate command

use anyhow::{bail, Context, Result};
use serde::Serialize;
use yule_runtime::{AudioSink, FrameClock, LogAudio, SceneEvent, SceneSystem, SilentAudio};
use yule_scene::{DecorationLog, EffectManager, SceneConfig, SceneStats};

/// A scripted campfire click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlareAt {
    pub time: f64,
    pub campfire: usize,
}

pub fn parse_flare_at(s: &str) -> Result<FlareAt, String> {
    let (time, index) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TIME:INDEX, got '{}'", s))?;
    let time: f64 = time
        .trim()
        .parse()
        .map_err(|e| format!("invalid time: {}", e))?;
    if !(time.is_finite() && time >= 0.0) {
        return Err(format!("time must be a non-negative number, got {}", time));
    }
    let campfire: usize = index
        .trim()
        .parse()
        .map_err(|e| format!("invalid campfire index: {}", e))?;
    Ok(FlareAt { time, campfire })
}

pub struct SimulateArgs {
    pub scene: Option<String>,
    pub seconds: f64,
    pub fps: f64,
    pub airdrop_at: Vec<f64>,
    pub flare_at: Vec<FlareAt>,
    pub seed: Option<u32>,
    pub format: String,
    /// Log audio cues instead of discarding them
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Airdrop,
    Flare(usize),
}

#[derive(Debug, Serialize)]
struct TimedEvent {
    time: f64,
    #[serde(flatten)]
    event: SceneEvent,
}

#[derive(Debug, Serialize)]
struct Report {
    seconds: f64,
    fps: f64,
    decorations_in_store: usize,
    stats: SceneStats,
    events: Vec<TimedEvent>,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        bail!("--fps must be positive, got {}", args.fps);
    }
    if !(args.seconds.is_finite() && args.seconds >= 0.0) {
        bail!("--seconds must not be negative, got {}", args.seconds);
    }
    if args.format != "text" && args.format != "json" {
        bail!("Unknown format: {}", args.format);
    }

    let mut config = match &args.scene {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("Failed to load scene '{}'", path))?,
        None => SceneConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut schedule: Vec<(f64, Action)> = args
        .airdrop_at
        .iter()
        .map(|&t| (t, Action::Airdrop))
        .chain(args.flare_at.iter().map(|f| (f.time, Action::Flare(f.campfire))))
        .collect();
    schedule.sort_by(|a, b| a.0.total_cmp(&b.0));

    let audio: Box<dyn AudioSink> = if args.verbose {
        Box::new(LogAudio)
    } else {
        Box::new(SilentAudio)
    };
    let mut manager = EffectManager::new(config, audio, Box::new(DecorationLog::new()))
    .context("Failed to build scene")?;
    manager.initialize()?;

    let dt = 1.0 / args.fps;
    let frames = (args.seconds * args.fps).round() as u64;
    let mut clock = FrameClock::new();
    let mut pending = schedule.into_iter().peekable();
    let mut events = Vec::new();

    for _ in 0..frames {
        while let Some((_, action)) = pending.next_if(|(t, _)| *t <= clock.elapsed_time()) {
            match action {
                Action::Airdrop => {
                    manager.request_airdrop();
                }
                Action::Flare(index) => {
                    if !manager.click_campfire(index) {
                        log::warn!("[simulate] Campfire {} does not exist", index);
                    }
                }
            }
        }

        let time = clock.advance(dt);
        manager.update(time)?;
        events.extend(
            manager
                .drain_events()
                .into_iter()
                .map(|event| TimedEvent {
                    time: time.elapsed,
                    event,
                }),
        );
    }

    manager.shutdown()?;

    let report = Report {
        seconds: clock.elapsed_time(),
        fps: args.fps,
        decorations_in_store: manager.store().len(),
        stats: manager.stats(),
        events,
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }

    Ok(())
}

fn print_text(report: &Report) {
    println!(
        "Simulated {:.2}s at {} fps ({} ticks)",
        report.seconds, report.fps, report.stats.ticks
    );
    for timed in &report.events {
        println!("  [{:>7.3}s] {:?}", timed.time, timed.event);
    }
    let stats = &report.stats;
    println!();
    println!("Flares ignited:      {}", stats.flares_ignited);
    println!("Fireworks launched:  {}", stats.fireworks_launched);
    println!("Fireworks finished:  {}", stats.fireworks_finished);
    println!("Airdrops completed:  {}", stats.airdrops_completed);
    println!("Decorations stored:  {}", report.decorations_in_store);
}
