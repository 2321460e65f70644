use common::shapes::{Point, Rectangle};
use quadtree::SpatialEntity;
use rand::Rng;

/// Range each velocity component is drawn from when an entity picks a new
/// heading.
pub const DIRECTION_RANGE: std::ops::RangeInclusive<i32> = -10..=10;

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: u32,
    pub bounds: Rectangle,
    pub velocity: Point,
    pub colliding: bool,
}

impl Entity {
    pub fn new<R: Rng>(id: u32, bounds: Rectangle, rng: &mut R) -> Self {
        let mut entity = Self {
            id,
            bounds,
            velocity: Point::default(),
            colliding: false,
        };
        entity.change_direction(rng);
        entity
    }

    /// Bounces off the world edges, then advances by `velocity * dt * speed`.
    pub fn move_step(&mut self, dt: f32, speed: f32, world: &Rectangle) {
        if self.bounds.left() <= world.left() || self.bounds.right() >= world.right() {
            self.velocity.x = -self.velocity.x;
        }
        if self.bounds.top() <= world.top() || self.bounds.bottom() >= world.bottom() {
            self.velocity.y = -self.velocity.y;
        }
        self.bounds
            .translate(self.velocity.x * dt * speed, self.velocity.y * dt * speed);
    }

    pub fn change_direction<R: Rng>(&mut self, rng: &mut R) {
        self.velocity = Point::new(
            rng.gen_range(DIRECTION_RANGE) as f32,
            rng.gen_range(DIRECTION_RANGE) as f32,
        );
    }
}

impl SpatialEntity for Entity {
    fn id(&self) -> u32 {
        self.id
    }

    fn bounding_box(&self) -> Rectangle {
        self.bounds
    }
}
