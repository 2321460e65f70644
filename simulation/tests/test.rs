use common::shapes::{Point, Rectangle};
use quadtree::QuadtreeError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simulation::config::MAX_RUN_TICKS;
use simulation::{CollisionPass, DetectionMethod, Entity, SimConfig, SimError, Simulation};

fn seeded_config(count: usize, seed: u64) -> SimConfig {
    let mut config = SimConfig::default();
    config.entities.count = count;
    config.entities.seed = seed;
    config
}

fn still_entity(x: f32, y: f32, velocity: Point) -> Entity {
    Entity {
        id: 0,
        bounds: Rectangle::new(x, y, 8.0, 8.0),
        velocity,
        colliding: false,
    }
}

fn sorted_contacts(pass: &CollisionPass) -> Vec<(u32, u32)> {
    let mut contacts: Vec<(u32, u32)> = pass.contacts().iter().copied().collect();
    contacts.sort_unstable();
    contacts
}

#[test]
fn test_entity_moves_by_velocity_dt_and_speed() {
    let world = Rectangle::new(0.0, 0.0, 100.0, 100.0);
    let mut entity = still_entity(10.0, 10.0, Point::new(2.0, -1.0));

    entity.move_step(0.5, 10.0, &world);

    assert_eq!(entity.bounds.x, 20.0);
    assert_eq!(entity.bounds.y, 5.0);
    assert_eq!(entity.velocity, Point::new(2.0, -1.0));
}

#[test]
fn test_entity_bounces_off_left_and_top_edges() {
    let world = Rectangle::new(0.0, 0.0, 100.0, 100.0);
    let mut entity = still_entity(0.0, 0.0, Point::new(-5.0, -2.0));

    entity.move_step(1.0, 1.0, &world);

    assert_eq!(entity.velocity, Point::new(5.0, 2.0));
    assert_eq!(entity.bounds.x, 5.0);
    assert_eq!(entity.bounds.y, 2.0);
}

#[test]
fn test_entity_bounces_off_right_and_bottom_edges() {
    let world = Rectangle::new(0.0, 0.0, 100.0, 100.0);
    let mut entity = still_entity(92.0, 95.0, Point::new(3.0, 4.0));

    entity.move_step(1.0, 1.0, &world);

    assert_eq!(entity.velocity, Point::new(-3.0, -4.0));
    assert_eq!(entity.bounds.x, 89.0);
    assert_eq!(entity.bounds.y, 91.0);
}

#[test]
fn test_change_direction_draws_whole_steps_in_range() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut entity = still_entity(0.0, 0.0, Point::default());
    for _ in 0..200 {
        entity.change_direction(&mut rng);
        for component in [entity.velocity.x, entity.velocity.y] {
            assert!((-10.0..=10.0).contains(&component));
            assert_eq!(component.fract(), 0.0);
        }
    }
}

#[test]
fn test_config_defaults() {
    let config = SimConfig::default();
    assert_eq!(config.world.width, 1600.0);
    assert_eq!(config.world.height, 900.0);
    assert_eq!(config.entities.size, 8.0);
    assert_eq!(config.entities.speed, 10.0);
    assert_eq!(config.entities.count, 500);
    assert_eq!(config.entities.seed, 42);
    assert_eq!(config.run.ticks, 600);
    assert_eq!(config.run.dt, 0.016);
    assert_eq!(config.detection.method, DetectionMethod::Quadtree);
    assert_eq!(config.detection.query_width, 24.0);
    assert_eq!(config.detection.query_height, 24.0);
    assert_eq!(config.detection.node_capacity, 5);
    assert_eq!(config.detection.max_depth, None);
    assert_eq!(config.spawn_area(), Rectangle::new(50.0, 50.0, 950.0, 350.0));
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_partial_toml_fills_defaults() {
    let config = SimConfig::from_toml(
        r#"
        [world]
        width = 800.0

        [entities]
        seed = 7

        [detection]
        method = "brute_force"
        max_depth = 6
        "#,
    )
    .unwrap();

    assert_eq!(config.world.width, 800.0);
    assert_eq!(config.world.height, 900.0);
    assert_eq!(config.entities.seed, 7);
    assert_eq!(config.entities.count, SimConfig::default().entities.count);
    assert_eq!(config.detection.method, DetectionMethod::BruteForce);
    assert_eq!(config.quadtree_config().max_depth, Some(6));
    assert_eq!(config.quadtree_config().node_capacity, 5);
}

#[test]
fn test_config_rejects_bad_values() {
    let mut config = SimConfig::default();
    config.world.width = 0.0;
    assert!(matches!(config.validate(), Err(SimError::InvalidWorld { .. })));

    let mut config = SimConfig::default();
    config.run.dt = f32::NAN;
    assert!(matches!(config.validate(), Err(SimError::InvalidTick { .. })));

    let mut config = SimConfig::default();
    config.detection.node_capacity = 0;
    assert!(matches!(
        config.validate(),
        Err(SimError::Config(QuadtreeError::InvalidNodeCapacity { node_capacity: 0 }))
    ));

    let mut config = SimConfig::default();
    config.detection.query_height = -1.0;
    assert!(matches!(
        config.validate(),
        Err(SimError::Config(QuadtreeError::InvalidRectangleDims { .. }))
    ));

    let mut config = SimConfig::default();
    config.detection.query_width = 0.0;
    assert!(matches!(
        config.validate(),
        Err(SimError::Config(QuadtreeError::InvalidRectangleDims { .. }))
    ));

    assert!(matches!(
        SimConfig::from_toml("[detection]\nmethod = \"sweep\""),
        Err(SimError::Parse(_))
    ));
}

#[test]
fn test_config_load_or_create_writes_defaults() {
    let path = std::env::temp_dir().join(format!("quadsim-test-{}.toml", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let created = SimConfig::load_or_create(&path).unwrap();
    assert!(path.exists());
    let reloaded = SimConfig::load_or_create(&path).unwrap();

    assert_eq!(created.world.width, reloaded.world.width);
    assert_eq!(created.entities.count, reloaded.entities.count);
    assert_eq!(created.detection.method, reloaded.detection.method);
    assert_eq!(created.run.ticks, reloaded.run.ticks);
    assert_eq!(reloaded.entities.seed, 42);
    assert_eq!(reloaded.run.dt, 0.016);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_spawn_random_places_entities_in_spawn_area() {
    let simulation = Simulation::new(seeded_config(300, 1)).unwrap();
    assert_eq!(simulation.entities().len(), 300);
    for (index, entity) in simulation.entities().iter().enumerate() {
        assert_eq!(entity.id as usize, index);
        assert_eq!(entity.bounds.width, 8.0);
        assert_eq!(entity.bounds.height, 8.0);
        assert!(entity.bounds.x >= 50.0 && entity.bounds.x <= 1000.0);
        assert!(entity.bounds.y >= 50.0 && entity.bounds.y <= 400.0);
        assert!(!entity.colliding);
    }
}

#[test]
fn test_spawn_cluster_and_clear() {
    let mut simulation = Simulation::new(seeded_config(10, 2)).unwrap();
    simulation.spawn_cluster(Point::new(500.0, 300.0), 25);

    assert_eq!(simulation.entities().len(), 35);
    for entity in &simulation.entities()[10..] {
        assert_eq!(entity.bounds.width, 2.0);
        assert!(entity.bounds.x >= 468.0 && entity.bounds.x <= 532.0);
        assert!(entity.bounds.y >= 268.0 && entity.bounds.y <= 332.0);
    }
    assert_eq!(simulation.entities()[34].id, 34);

    simulation.clear();
    assert!(simulation.entities().is_empty());

    let stats = simulation.tick(0.016).unwrap();
    assert_eq!(stats.entities, 0);
    assert_eq!(stats.indexed, 0);
    assert_eq!(stats.nodes, 1);
    assert_eq!(stats.collisions, 0);

    simulation.spawn_random(3);
    assert_eq!(
        simulation.entities().iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn test_same_seed_same_run() {
    let mut first = Simulation::new(seeded_config(200, 99)).unwrap();
    let mut second = Simulation::new(seeded_config(200, 99)).unwrap();

    let mut first_collisions = Vec::new();
    let mut second_collisions = Vec::new();
    let first_summary = first
        .run_with(30, |stats| first_collisions.push(stats.collisions))
        .unwrap();
    let second_summary = second
        .run_with(30, |stats| second_collisions.push(stats.collisions))
        .unwrap();

    assert_eq!(first.entities(), second.entities());
    assert_eq!(first_collisions, second_collisions);
    assert_eq!(first_summary.total_collisions, second_summary.total_collisions);
    assert_eq!(first_summary.peak_nodes, second_summary.peak_nodes);
    assert_eq!(first.ticks(), 30);
}

#[test]
fn test_stacked_entities_all_collide() {
    let mut config = seeded_config(0, 3);
    config.entities.cluster_spread = 0.0;
    let mut simulation = Simulation::new(config).unwrap();
    simulation.spawn_cluster(Point::new(500.0, 300.0), 5);

    let stats = simulation.tick(0.0).unwrap();

    assert_eq!(stats.indexed, 5);
    assert_eq!(stats.collisions, 10);
    assert_eq!(stats.candidates, 20);
    assert!(simulation.entities().iter().all(|e| e.colliding));

    let frame = simulation.snapshot();
    assert_eq!(frame.entities.len(), 5);
    assert!(frame.entities.iter().all(|sprite| sprite.colliding));
    assert_eq!(frame.node_boxes, vec![simulation.world()]);
}

#[test]
fn test_tick_rejects_invalid_dt() {
    let mut simulation = Simulation::new(seeded_config(5, 4)).unwrap();
    assert!(matches!(
        simulation.tick(f32::NAN),
        Err(SimError::InvalidTick { .. })
    ));
    assert!(matches!(
        simulation.tick(-1.0),
        Err(SimError::InvalidTick { .. })
    ));
    assert_eq!(simulation.ticks(), 0);
}

#[test]
fn test_quadtree_and_brute_force_find_same_contacts() {
    let config = seeded_config(400, 11);
    let mut simulation = Simulation::new(config.clone()).unwrap();
    let world = config.world_bounds();
    let window = config.query_window().unwrap();
    let mut quadtree_pass = CollisionPass::new(world, config.quadtree_config(), window).unwrap();
    let mut brute_force_pass = CollisionPass::new(world, config.quadtree_config(), window).unwrap();

    let mut seen_any = false;
    for _ in 0..10 {
        simulation.tick(config.run.dt).unwrap();
        let entities = simulation.entities();

        quadtree_pass.rebuild(world, entities);
        let quadtree_stats = quadtree_pass.detect(DetectionMethod::Quadtree, entities);
        brute_force_pass.rebuild(world, entities);
        let brute_force_stats = brute_force_pass.detect(DetectionMethod::BruteForce, entities);

        assert_eq!(quadtree_stats.indexed, entities.len());
        assert_eq!(sorted_contacts(&quadtree_pass), sorted_contacts(&brute_force_pass));
        assert_eq!(quadtree_stats.collisions, brute_force_stats.collisions);
        assert!(quadtree_stats.candidates < brute_force_stats.candidates);
        assert_eq!(brute_force_stats.candidates, entities.len() * (entities.len() - 1));
        for entity in entities {
            assert_eq!(
                quadtree_pass.is_colliding(entity.id),
                brute_force_pass.is_colliding(entity.id)
            );
        }
        seen_any |= quadtree_stats.collisions > 0;
    }
    assert!(seen_any);
}

#[test]
fn test_snapshot_matches_index() {
    let mut simulation = Simulation::new(seeded_config(500, 8)).unwrap();
    let stats = simulation.tick(0.016).unwrap();
    let frame = simulation.snapshot();

    assert_eq!(frame.node_boxes.len(), stats.nodes);
    assert_eq!(frame.node_boxes.len(), simulation.collision_pass().quadtree().node_count());
    assert_eq!(frame.node_boxes[0], simulation.world());
    assert!(stats.nodes > 1);
    assert_eq!(frame.entities.len(), 500);
    for (sprite, entity) in frame.entities.iter().zip(simulation.entities()) {
        assert_eq!(sprite.bounds, entity.bounds);
        assert_eq!(sprite.colliding, entity.colliding);
    }
}

#[test]
fn test_brute_force_method_marks_same_entities() {
    let mut quadtree_sim = Simulation::new(seeded_config(300, 21)).unwrap();
    let mut config = seeded_config(300, 21);
    config.detection.method = DetectionMethod::BruteForce;
    let mut brute_force_sim = Simulation::new(config).unwrap();

    for _ in 0..5 {
        let a = quadtree_sim.tick(0.016).unwrap();
        let b = brute_force_sim.tick(0.016).unwrap();
        assert_eq!(a.collisions, b.collisions);
        assert_eq!(quadtree_sim.entities(), brute_force_sim.entities());
    }
    assert_eq!(brute_force_sim.method(), DetectionMethod::BruteForce);
}

#[test]
fn test_run_length_is_bounded() {
    let too_long = SimConfig::from_toml(
        "[entities]\ncount = 0\nseed = 1\n[run]\nticks = 9223372036854775807\n",
    );
    assert!(matches!(
        too_long,
        Err(SimError::InvalidRun {
            ticks: 9223372036854775807
        })
    ));

    let mut simulation = Simulation::new(seeded_config(0, 1)).unwrap();
    assert!(matches!(
        simulation.run(u64::MAX),
        Err(SimError::InvalidRun { .. })
    ));
    assert!(matches!(
        simulation.run(MAX_RUN_TICKS + 1),
        Err(SimError::InvalidRun { .. })
    ));
    assert_eq!(simulation.ticks(), 0);
}

#[test]
fn test_long_run_keeps_totals_only() {
    let mut simulation = Simulation::new(seeded_config(0, 1)).unwrap();
    let mut seen = 0u64;
    let summary = simulation.run_with(200_000, |_| seen += 1).unwrap();

    assert_eq!(summary.ticks, 200_000);
    assert_eq!(seen, 200_000);
    assert_eq!(summary.total_collisions, 0);
    assert_eq!(summary.peak_nodes, 1);
    assert_eq!(simulation.ticks(), 200_000);
}

#[test]
fn test_run_summary_totals_match_ticks() {
    let mut simulation = Simulation::new(seeded_config(300, 5)).unwrap();
    let mut collisions = 0u64;
    let mut peak_nodes = 0;
    let summary = simulation
        .run_with(20, |stats| {
            collisions += stats.collisions as u64;
            peak_nodes = peak_nodes.max(stats.nodes);
        })
        .unwrap();

    assert_eq!(summary.ticks, 20);
    assert_eq!(summary.total_collisions, collisions);
    assert_eq!(summary.peak_nodes, peak_nodes);
    assert!(summary.average_tick() <= summary.elapsed);
}
