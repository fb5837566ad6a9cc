use arenapath::config::Config;
use arenapath::{Obstacle, Point, Seeker, World};

fn config_for(width: f32, height: f32) -> Config {
    let mut config = Config::default();
    config.arena.width = width;
    config.arena.height = height;
    config.arena.seed = Some(1234);
    config
}

#[test]
fn test_seeded_worlds_match() {
    let a = World::new(config_for(800.0, 600.0));
    let b = World::new(config_for(800.0, 600.0));
    assert_eq!(a.obstacles, b.obstacles);
    assert_eq!(a.obstacles.len(), 10);
    assert_eq!(a.grid().cells(), b.grid().cells());
}

#[test]
fn test_world_grid_dimensions() {
    let world = World::with_obstacles(config_for(800.0, 620.0), Vec::new());
    let grid = world.grid();
    assert_eq!((grid.cols, grid.rows), (16, 13));
    assert_eq!(grid.wall_count(), 0);
}

#[test]
fn test_seekers_close_in_on_player() {
    let mut world = World::with_obstacles(config_for(500.0, 500.0), Vec::new());
    assert_eq!(world.seekers.len(), 4);

    let player = world.player.pos;
    let before: Vec<f32> = world.seekers.iter().map(|s| s.pos.distance(&player)).collect();
    world.run(30);
    let after: Vec<f32> = world.seekers.iter().map(|s| s.pos.distance(&player)).collect();

    assert_eq!(world.seekers.len(), 4);
    for (b, a) in before.iter().zip(after.iter()) {
        assert!(a < b, "seeker did not approach: {} -> {}", b, a);
    }
}

#[test]
fn test_projectiles_stop_at_obstacles() {
    let obstacles = vec![Obstacle::rect(200.0, 100.0, 100.0, 50.0)];
    let mut world = World::with_obstacles(config_for(500.0, 500.0), obstacles);

    world.run(30);

    assert_eq!(world.stats.shots_fired, 5);
    assert_eq!(world.projectiles.len(), 4);
    for shot in &world.projectiles {
        assert!(!world.is_inside_obstacle(shot.pos));
        assert!(shot.pos.y > 150.0);
    }
}

#[test]
fn test_projectile_destroys_seeker() {
    let mut world = World::with_obstacles(config_for(500.0, 500.0), Vec::new());
    world.seekers = vec![Seeker::new(Point::new(250.0, 200.0), 20.0, 0.0, 1)];

    world.run(20);

    assert!(world.seekers.is_empty());
    assert_eq!(world.stats.seekers_destroyed, 1);
    assert_eq!(world.stats.damage_taken, 0);
}

#[test]
fn test_contact_damage_resets_world() {
    let mut config = config_for(100.0, 100.0);
    config.player.health = 1;
    config.seekers.speed = 10.0;
    let obstacles = vec![Obstacle::rect(0.0, 60.0, 10.0, 10.0)];
    let mut world = World::with_obstacles(config, obstacles.clone());

    world.run(20);

    assert!(world.stats.resets >= 1);
    assert!(world.stats.damage_taken >= 1);
    // Fixed layouts survive the reset
    assert_eq!(world.obstacles, obstacles);
}

#[test]
fn test_reset_regenerates_random_layout() {
    let mut world = World::new(config_for(800.0, 600.0));
    let original = world.obstacles.clone();
    world.move_player(3.0, 0.0);
    world.reset();

    assert_eq!(world.stats.resets, 1);
    assert_ne!(world.obstacles, original);
    assert_eq!(world.player.pos, Point::new(400.0, 300.0));
    assert_eq!(world.seekers.len(), 4);
}

#[test]
fn test_world_path_requests() {
    let obstacles = vec![Obstacle::rect(260.0, 260.0, 30.0, 30.0)];
    let world = World::with_obstacles(config_for(500.0, 500.0), obstacles);

    let path = world.find_path(Point::new(0.0, 0.0), Point::new(499.0, 499.0));
    assert_eq!(path.first(), Some(&Point::new(25.0, 25.0)));
    assert_eq!(path.last(), Some(&Point::new(475.0, 475.0)));
    assert!(!path.contains(&Point::new(275.0, 275.0)));

    assert!(world.find_path(Point::new(0.0, 0.0), Point::new(275.0, 275.0)).is_empty());
}

#[test]
fn test_random_world_runs() {
    let mut world = World::new(config_for(800.0, 600.0));
    world.run(120);
    assert_eq!(world.stats.ticks, 120);
    assert_eq!(world.stats.shots_fired, 20);
}

fn seeker_positions(world: &World) -> Vec<Point> {
    world.seekers.iter().map(|s| s.pos).collect()
}

#[test]
fn test_seekers_pursue_player_on_far_edges() {
    for &(dx, dy) in &[(1000.0, 0.0), (0.0, 1000.0)] {
        let mut world = World::with_obstacles(config_for(500.0, 500.0), Vec::new());
        world.move_player(dx, dy);
        assert!(world.is_inside_arena(world.player.pos));
        assert!(world.grid().cell_at(world.player.pos.x, world.player.pos.y).is_some());

        let before = seeker_positions(&world);
        world.run(30);
        let after = seeker_positions(&world);

        assert_eq!(world.stats.resets, 0);
        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(after.iter()) {
            assert_ne!(b, a, "seeker stuck with the player at {:?}", world.player.pos);
        }
    }
}

#[test]
fn test_seekers_pursue_player_placed_on_boundary() {
    let mut world = World::with_obstacles(config_for(500.0, 500.0), Vec::new());
    world.player.pos = Point::new(500.0, 250.0);

    let before = seeker_positions(&world);
    world.run(10);
    let after = seeker_positions(&world);

    for (b, a) in before.iter().zip(after.iter()) {
        assert_ne!(b, a);
    }
}
