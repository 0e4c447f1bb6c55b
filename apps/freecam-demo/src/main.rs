mod scenario;

use std::path::PathBuf;

use anyhow::Context;
use crossbeam_channel::unbounded;
use serde::Deserialize;

use freecam_camera::hud::{speed_label, time_prompts};
use freecam_camera::{FreeCamEvent, FreeCamModule, FreeCamSettings, FreeCamStatus, Pose, Scene};
use freecam_core::{config, logging, Bus, Engine, EngineConfig, EngineError};
use glam::Vec3;

use crate::scenario::{OrbitModule, ScriptModule};

const FRAME_DT: f32 = 1.0 / 60.0;
const STATUS_EVERY: u64 = 60;

#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    #[serde(default)]
    engine: EngineConfig,
    #[serde(default)]
    freecam: FreeCamSettings,
}

#[derive(Debug)]
enum DemoEvent {
    FreeCam(FreeCamEvent),
}

impl From<FreeCamEvent> for DemoEvent {
    #[inline]
    fn from(ev: FreeCamEvent) -> Self {
        Self::FreeCam(ev)
    }
}

fn main() -> anyhow::Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("freecam.toml"));

    let cfg: AppConfig = config::load_or_default(&path)
        .with_context(|| format!("loading {}", path.display()))?;
    logging::init(&cfg.engine.log_filter);
    log::info!("config: {} (max_dt {}s)", path.display(), cfg.engine.max_dt_sec);

    let (tx, rx) = unbounded::<DemoEvent>();
    let mut engine: Engine<DemoEvent> = Engine::new(&cfg.engine, Bus::new(tx, rx));

    engine.register_module(Box::new(ScriptModule::default()))?;
    engine.register_module(Box::new(OrbitModule))?;

    let spawn = Pose::from_position(Vec3::new(0.0, 500.0, 1500.0));
    let freecam = FreeCamModule::<Scene>::new(&cfg.freecam, spawn).context("freecam settings")?;
    engine.register_module(Box::new(freecam))?;

    for p in time_prompts(&cfg.freecam.time) {
        log::info!("{}: {:?} / {:?}", p.label, p.keys[0], p.keys[1]);
    }

    engine.start()?;

    let mut events = Vec::new();
    loop {
        let frame = match engine.step(FRAME_DT) {
            Ok(frame) => frame,
            Err(EngineError::ExitRequested) => break,
            Err(e) => return Err(e.into()),
        };

        events.clear();
        engine.bus().drain_into(&mut events);
        for ev in &events {
            match ev {
                DemoEvent::FreeCam(ev) => log::info!("[frame {}] {:?}", frame.frame_index, ev),
            }
        }

        if frame.frame_index % STATUS_EVERY == 0 {
            if let Some(s) = engine.resources().get::<FreeCamStatus>() {
                log::info!(
                    "[frame {}] active={} anchor={} pos={:.1} {} time x{}",
                    frame.frame_index,
                    s.active,
                    s.anchor,
                    s.pose.position,
                    speed_label(s.speed),
                    frame.time_scale
                );
                if s.selecting {
                    let names: Vec<_> = s.anchor_prompts.iter().map(|p| p.label.as_str()).collect();
                    log::debug!("selectable: {}", names.join(", "));
                }
            }
        }
    }

    engine.shutdown()?;
    Ok(())
}
