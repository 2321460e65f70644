use crate::collisions::{CollisionPass, DetectionMethod};
use crate::config::{SimConfig, MAX_RUN_TICKS};
use crate::entity::Entity;
use crate::error::{SimError, SimResult};
use common::shapes::{Point, Rectangle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    pub tick: u64,
    pub entities: usize,
    pub indexed: usize,
    pub dropped: usize,
    pub nodes: usize,
    pub candidates: usize,
    pub collisions: usize,
    pub elapsed: Duration,
}

/// Totals over a whole `run`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub total_collisions: u64,
    pub peak_collisions: usize,
    pub peak_nodes: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    fn record(&mut self, stats: &TickStats) {
        self.ticks += 1;
        self.total_collisions += stats.collisions as u64;
        self.peak_collisions = self.peak_collisions.max(stats.collisions);
        self.peak_nodes = self.peak_nodes.max(stats.nodes);
        self.elapsed += stats.elapsed;
    }

    pub fn average_tick(&self) -> Duration {
        match u32::try_from(self.ticks) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(ticks) => self.elapsed / ticks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitySprite {
    pub bounds: Rectangle,
    pub colliding: bool,
}

/// Everything a renderer needs to draw one tick: the outline of every
/// quadtree node and every entity with its collision flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub node_boxes: Vec<Rectangle>,
    pub entities: Vec<EntitySprite>,
}

pub struct Simulation {
    config: SimConfig,
    world: Rectangle,
    entities: Vec<Entity>,
    rng: StdRng,
    pass: CollisionPass,
    method: DetectionMethod,
    ticks: u64,
}

impl Simulation {
    /// Builds the world and spawns `entities.count` random entities.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let world = config.world_bounds();
        let rng = StdRng::seed_from_u64(config.entities.seed);
        let pass = CollisionPass::new(world, config.quadtree_config(), config.query_window()?)?;
        let mut simulation = Self {
            method: config.detection.method,
            config,
            world,
            entities: Vec::new(),
            rng,
            pass,
            ticks: 0,
        };
        simulation.spawn_random(simulation.config.entities.count);
        info!(
            entities = simulation.entities.len(),
            method = ?simulation.method,
            "simulation ready"
        );
        Ok(simulation)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> Rectangle {
        self.world
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn method(&self) -> DetectionMethod {
        self.method
    }

    pub fn set_method(&mut self, method: DetectionMethod) {
        self.method = method;
    }

    pub fn collision_pass(&self) -> &CollisionPass {
        &self.pass
    }

    /// Spawns `count` entities of the configured size with their top-left
    /// corner drawn from the spawn area.
    pub fn spawn_random(&mut self, count: usize) {
        let area = self.config.spawn_area();
        let size = self.config.entities.size;
        for _ in 0..count {
            let corner = area.get_random_point_inside(&mut self.rng);
            self.push_entity(Rectangle::new(corner.x, corner.y, size, size));
        }
    }

    /// Spawns `count` small entities scattered around `center`.
    pub fn spawn_cluster(&mut self, center: Point, count: usize) {
        let spread = self.config.entities.cluster_spread;
        let size = self.config.entities.cluster_size;
        let area = Rectangle::from_center(center, spread * 2.0, spread * 2.0);
        for _ in 0..count {
            let corner = area.get_random_point_inside(&mut self.rng);
            self.push_entity(Rectangle::new(corner.x, corner.y, size, size));
        }
        debug!(x = center.x, y = center.y, count, "spawned cluster");
    }

    fn push_entity(&mut self, bounds: Rectangle) {
        let id = self.entities.len() as u32;
        self.entities.push(Entity::new(id, bounds, &mut self.rng));
    }

    pub fn clear(&mut self) {
        debug!(entities = self.entities.len(), "clearing entities");
        self.entities.clear();
        self.pass.rebuild(self.world, &self.entities);
    }

    /// Moves every entity, rebuilds the index and flags every entity that
    /// overlaps another. Colliding entities pick a new heading.
    pub fn tick(&mut self, dt: f32) -> SimResult<TickStats> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(SimError::InvalidTick { dt });
        }
        let started = Instant::now();

        let speed = self.config.entities.speed;
        for entity in &mut self.entities {
            entity.move_step(dt, speed, &self.world);
            entity.colliding = false;
        }

        self.pass.rebuild(self.world, &self.entities);
        let pass_stats = self.pass.detect(self.method, &self.entities);

        for id in self.pass.colliding_ids() {
            if let Some(entity) = self.entities.get_mut(id as usize) {
                entity.colliding = true;
                entity.change_direction(&mut self.rng);
            }
        }

        self.ticks += 1;
        let stats = TickStats {
            tick: self.ticks,
            entities: self.entities.len(),
            indexed: pass_stats.indexed,
            dropped: pass_stats.dropped,
            nodes: pass_stats.nodes,
            candidates: pass_stats.candidates,
            collisions: pass_stats.collisions,
            elapsed: started.elapsed(),
        };
        debug!(
            tick = stats.tick,
            indexed = stats.indexed,
            nodes = stats.nodes,
            candidates = stats.candidates,
            collisions = stats.collisions,
            "tick complete"
        );
        Ok(stats)
    }

    /// Runs `ticks` ticks at the configured `dt`, logging a summary every
    /// `run.log_every` ticks.
    pub fn run(&mut self, ticks: u64) -> SimResult<RunSummary> {
        self.run_with(ticks, |_| {})
    }

    /// Like `run`, handing every tick's stats to `on_tick` as it completes.
    pub fn run_with<F>(&mut self, ticks: u64, mut on_tick: F) -> SimResult<RunSummary>
    where
        F: FnMut(&TickStats),
    {
        if ticks > MAX_RUN_TICKS {
            return Err(SimError::InvalidRun { ticks });
        }
        let dt = self.config.run.dt;
        let log_every = self.config.run.log_every;
        let mut summary = RunSummary::default();
        for _ in 0..ticks {
            let stats = self.tick(dt)?;
            if log_every > 0 && stats.tick % log_every == 0 {
                info!(
                    tick = stats.tick,
                    entities = stats.entities,
                    nodes = stats.nodes,
                    collisions = stats.collisions,
                    elapsed_us = stats.elapsed.as_micros() as u64,
                    "progress"
                );
            }
            summary.record(&stats);
            on_tick(&stats);
        }
        Ok(summary)
    }

    pub fn snapshot(&self) -> Frame {
        let mut node_boxes = Vec::with_capacity(self.pass.quadtree().node_count());
        self.pass.quadtree().all_node_bounding_boxes(&mut node_boxes);
        Frame {
            node_boxes,
            entities: self
                .entities
                .iter()
                .map(|entity| EntitySprite {
                    bounds: entity.bounds,
                    colliding: entity.colliding,
                })
                .collect(),
        }
    }
}
