use crate::entity::Entity;
use crate::error::SimResult;
use common::shapes::Rectangle;
use fxhash::FxHashSet;
use quadtree::collision_detection::entity_entity;
use quadtree::{Config, QuadTree, QueryWindow, SpatialEntity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Look up candidates in a window around each entity.
    #[default]
    Quadtree,
    /// Test every ordered pair.
    BruteForce,
}

/// Counters produced by one detection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub indexed: usize,
    pub dropped: usize,
    pub nodes: usize,
    /// Pairs handed to the exact box test.
    pub candidates: usize,
    /// Distinct unordered pairs whose boxes overlap.
    pub collisions: usize,
}

/// Per-tick collision state. The quadtree and the scratch buffers are kept
/// between ticks so rebuilding does not reallocate.
pub struct CollisionPass {
    quadtree: QuadTree,
    window: QueryWindow,
    candidates: Vec<u32>,
    contacts: FxHashSet<(u32, u32)>,
    colliding: Vec<bool>,
}

impl CollisionPass {
    pub fn new(world: Rectangle, config: Config, window: QueryWindow) -> SimResult<Self> {
        Ok(Self {
            quadtree: QuadTree::new_with_config(world, config)?,
            window,
            candidates: Vec::new(),
            contacts: FxHashSet::default(),
            colliding: Vec::new(),
        })
    }

    pub fn quadtree(&self) -> &QuadTree {
        &self.quadtree
    }

    pub fn window(&self) -> QueryWindow {
        self.window
    }

    /// Refiles every entity in a fresh tree covering `world`.
    pub fn rebuild(&mut self, world: Rectangle, entities: &[Entity]) {
        self.quadtree.reset(world);
        for entity in entities {
            self.quadtree.insert(entity);
        }
    }

    /// Finds every overlapping pair among `entities`. Entity ids must equal
    /// their position in the slice.
    pub fn detect(&mut self, method: DetectionMethod, entities: &[Entity]) -> PassStats {
        self.contacts.clear();
        self.colliding.clear();
        self.colliding.resize(entities.len(), false);

        let candidates = match method {
            DetectionMethod::Quadtree => self.detect_quadtree(entities),
            DetectionMethod::BruteForce => self.detect_brute_force(entities),
        };

        PassStats {
            indexed: self.quadtree.len(),
            dropped: self.quadtree.dropped(),
            nodes: self.quadtree.node_count(),
            candidates,
            collisions: self.contacts.len(),
        }
    }

    fn detect_quadtree(&mut self, entities: &[Entity]) -> usize {
        let mut tested = 0;
        for entity in entities {
            self.candidates.clear();
            self.quadtree
                .query_entities(&self.window.around(entity.center()), &mut self.candidates);
            for &id in &self.candidates {
                if id == entity.id {
                    continue;
                }
                let Some(other) = entities.get(id as usize) else {
                    continue;
                };
                tested += 1;
                if entity_entity(entity, other) {
                    Self::record(&mut self.contacts, &mut self.colliding, entity.id, other.id);
                }
            }
        }
        tested
    }

    fn detect_brute_force(&mut self, entities: &[Entity]) -> usize {
        let mut tested = 0;
        for (i, entity) in entities.iter().enumerate() {
            for (j, other) in entities.iter().enumerate() {
                if i == j {
                    continue;
                }
                tested += 1;
                if entity_entity(entity, other) {
                    Self::record(&mut self.contacts, &mut self.colliding, entity.id, other.id);
                }
            }
        }
        tested
    }

    fn record(contacts: &mut FxHashSet<(u32, u32)>, colliding: &mut [bool], a: u32, b: u32) {
        contacts.insert((a.min(b), a.max(b)));
        for id in [a, b] {
            if let Some(flag) = colliding.get_mut(id as usize) {
                *flag = true;
            }
        }
    }

    /// Unordered overlapping pairs from the last pass, smaller id first.
    pub fn contacts(&self) -> &FxHashSet<(u32, u32)> {
        &self.contacts
    }

    pub fn is_colliding(&self, id: u32) -> bool {
        self.colliding.get(id as usize).copied().unwrap_or(false)
    }

    /// Ids found colliding in the last pass, ascending.
    pub fn colliding_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.colliding
            .iter()
            .enumerate()
            .filter(|&(_, &hit)| hit)
            .map(|(id, _)| id as u32)
    }
}
