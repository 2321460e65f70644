//! Headless version of the bouncing-boxes demo: entities drift around a
//! rectangular world, and every tick the quadtree is rebuilt from scratch and
//! used to find which boxes touch.

pub mod collisions;
pub mod config;
pub mod entity;
pub mod error;
pub mod simulation;

pub use collisions::{CollisionPass, DetectionMethod, PassStats};
pub use config::SimConfig;
pub use entity::Entity;
pub use error::{SimError, SimResult};
pub use simulation::{EntitySprite, Frame, RunSummary, Simulation, TickStats};
