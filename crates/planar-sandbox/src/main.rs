//! Sandbox game: a keyboard-steered ship and a slowly spinning pickup.
//!
//! Small enough to read in one sitting, but it exercises the whole runtime:
//! node-kind registration, components, input bundles, and the pipeline's
//! image render methods.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use planar_engine::coords::Vec2;
use planar_engine::core::{Collaborators, Engine, EngineConfig, GameCallbacks};
use planar_engine::input::{Key, KeyboardBundle};
use planar_engine::logging::{LoggingConfig, init_logging};
use planar_engine::render::DrawCmd;
use planar_engine::scene::{Component, ComponentKind, Node};

const SHIP_SPEED: f32 = 4.0;

/// Rotates its node a fixed amount each tick.
struct Spinner {
    degrees_per_tick: f32,
}

impl Component for Spinner {
    fn kind(&self) -> ComponentKind {
        ComponentKind("spinner")
    }

    fn updates(&self) -> bool {
        true
    }

    fn update(&mut self, node: &Arc<Node>) {
        node.rotate(self.degrees_per_tick);
    }
}

/// Moves its node by the shared velocity each tick.
struct Mover {
    velocity: Arc<Mutex<Vec2>>,
}

impl Component for Mover {
    fn kind(&self) -> ComponentKind {
        ComponentKind("mover")
    }

    fn updates(&self) -> bool {
        true
    }

    fn update(&mut self, node: &Arc<Node>) {
        let delta = *self.velocity.lock().unwrap_or_else(|e| e.into_inner());
        if delta != Vec2::zero() {
            node.translate(delta);
        }
    }
}

fn key_direction(key: Key) -> Option<Vec2> {
    match key {
        Key::W | Key::ArrowUp => Some(Vec2::new(0.0, -SHIP_SPEED)),
        Key::S | Key::ArrowDown => Some(Vec2::new(0.0, SHIP_SPEED)),
        Key::A | Key::ArrowLeft => Some(Vec2::new(-SHIP_SPEED, 0.0)),
        Key::D | Key::ArrowRight => Some(Vec2::new(SHIP_SPEED, 0.0)),
        _ => None,
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let velocity: Arc<Mutex<Vec2>> = Arc::new(Mutex::new(Vec2::zero()));

    let keyboard = KeyboardBundle {
        pressed: Some(Box::new({
            let velocity = velocity.clone();
            move |ev| {
                if let Some(dir) = key_direction(ev.key) {
                    *velocity.lock().unwrap_or_else(|e| e.into_inner()) = dir;
                }
            }
        })),
        released: Some(Box::new({
            let velocity = velocity.clone();
            move |ev| {
                if key_direction(ev.key).is_some() {
                    *velocity.lock().unwrap_or_else(|e| e.into_inner()) = Vec2::zero();
                }
            }
        })),
        ..Default::default()
    };

    let game = GameCallbacks {
        start: Box::new({
            let velocity = velocity.clone();
            move |handle| {
                log::info!("sandbox starting in {}", handle.title());

                handle.registry().register("pickup", |node| {
                    node.attach(Box::new(Spinner {
                        degrees_per_tick: 1.5,
                    }))
                });

                let world = handle.root();

                let ship = world.add_empty_child("ship");
                if let Err(e) = ship.attach(Box::new(Mover {
                    velocity: velocity.clone(),
                })) {
                    log::error!("failed to set up ship: {e}");
                }

                match world.add_child(handle.registry(), "pickup", "pickup-1") {
                    Ok(pickup) => pickup.translate(Vec2::new(200.0, 120.0)),
                    Err(e) => log::error!("failed to spawn pickup: {e}"),
                }

                // Draw the scene from a snapshot each frame.
                let scene_root = world.clone();
                handle.pipeline().add_image_render_method(Arc::new(move |gfx| {
                    for node in scene_root.children() {
                        let t = node.transform();
                        gfx.push(DrawCmd::Sprite {
                            asset: format!("{}.png", node.name()),
                            position: t.position,
                            rotation: t.rotation,
                        });
                    }
                }));
            }
        }),
        render: Arc::new(|gfx| {
            gfx.push(DrawCmd::Label {
                text: "planar sandbox".to_string(),
                position: Vec2::new(8.0, 8.0),
            });
        }),
        keyboard,
        ..Default::default()
    };

    let config = EngineConfig {
        title: "planar sandbox".to_string(),
        width: 960,
        height: 540,
        tick_rate: 60.0,
        ..Default::default()
    };

    let engine = Engine::initialize(config, game, Collaborators::default())?;
    engine.run()
}
