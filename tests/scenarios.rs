use tilehop::asset::Loadable;
use tilehop::game::animation::AnimationClip;
use tilehop::game::kinematics::{Body, InputState};
use tilehop::game::PlayState;
use tilehop::map::{GridAsset, MapAsset, TileMap};
use tilehop::math::units::world;
use tilehop::network::server::Packet;
use tilehop::{GRAVITY, JUMP_FORCE, PLAYER_FRAME_DURATION};

fn grid(cells: Vec<Vec<u8>>) -> TileMap {
    TileMap::from_grid(&GridAsset { tile_size: 16, cells }).unwrap()
}

/// Open shaft three tiles wide with a floor at y = 64.
fn shaft() -> TileMap {
    grid(vec![
        vec![0, 0, 0],
        vec![0, 0, 0],
        vec![0, 0, 0],
        vec![0, 0, 0],
        vec![1, 1, 1],
    ])
}

/// Floor along the bottom, a wall down the right side starting at x = 64.
fn corridor() -> TileMap {
    grid(vec![
        vec![0, 0, 0, 0, 1],
        vec![0, 0, 0, 0, 1],
        vec![0, 0, 0, 0, 1],
        vec![1, 1, 1, 1, 1],
    ])
}

#[test]
fn landing_clears_jumping_on_the_tick_it_lands() {
    let map = shaft();
    let mut body = Body::new(world::Point2D::new(16.0, 0.0));

    let mut landed = false;
    for _ in 0..200 {
        let falling = body.velocity.y;
        body.step(InputState::default(), Some(&map));

        if falling > 0.0 && body.velocity.y == 0.0 {
            landed = true;
            break;
        }
        assert!(body.jumping, "airborne ticks keep the flag set");
    }

    assert!(landed);
    assert!(!body.jumping);
    assert_eq!(body.velocity.y, 0.0);
    assert_eq!(body.position.y + body.size.height, 64.0);
}

#[test]
fn jump_fires_once_per_takeoff() {
    let map = shaft();
    let mut body = Body::new(world::Point2D::new(16.0, 48.0));
    let jump = InputState {
        jump: true,
        ..Default::default()
    };

    body.step(jump, Some(&map));
    assert_eq!(body.velocity.y, JUMP_FORCE);
    assert!(body.jumping);
    assert_eq!(body.position.y, 44.0);

    // still held while airborne
    body.step(jump, Some(&map));
    assert_eq!(body.velocity.y, JUMP_FORCE + GRAVITY);
    assert!(body.jumping);
}

#[test]
fn walking_into_a_wall_stops_flush() {
    let map = corridor();
    let mut body = Body::new(world::Point2D::new(16.0, 32.0));
    let right = InputState {
        right: true,
        ..Default::default()
    };

    for _ in 0..60 {
        body.step(right, Some(&map));
    }

    assert_eq!(body.position.x + body.size.width, 64.0);
    assert_eq!(body.velocity.x, 0.0);
    assert_eq!(body.position.y, 32.0);
}

#[test]
fn open_space_moves_the_full_distance() {
    let map = grid(vec![vec![0; 40]; 40]);
    let mut body = Body::new(world::Point2D::new(100.0, 100.0));
    let left = InputState {
        left: true,
        ..Default::default()
    };

    body.step(left, Some(&map));
    // 100 - 1.25 rounds to 99
    assert_eq!(body.position.x, 99.0);
    assert_eq!(body.velocity.x, -1.25);
}

#[test]
fn play_state_cycles_the_clip() {
    let mut state = PlayState::new(world::Point2D::new(16.0, 48.0));
    state.handle_packet(Packet::MapData(Box::new(MapAsset::Grid(GridAsset {
        tile_size: 16,
        cells: vec![vec![0, 0, 0], vec![0, 0, 0], vec![0, 0, 0], vec![0, 0, 0], vec![1, 1, 1]],
    }))));
    let clip = AnimationClip::new(vec![Some(0), Some(1), Some(2)], PLAYER_FRAME_DURATION);
    state.clip = Loadable::Ready(clip.unwrap());

    let mut seen = [false; 3];
    for _ in 0..3 * PLAYER_FRAME_DURATION {
        seen[state.local.animation.frame] = true;
        state.tick(InputState::default());
    }

    assert_eq!(seen, [true; 3]);
    assert_eq!(state.local.animation.frame, 0);
    assert_eq!(state.local.animation.elapsed, 0);
}

#[test]
fn camera_stays_inside_a_small_map() {
    let mut state = PlayState::new(world::Point2D::new(16.0, 0.0));
    state.handle_packet(Packet::MapData(Box::new(MapAsset::Grid(GridAsset {
        tile_size: 16,
        cells: vec![vec![0, 0, 0], vec![1, 1, 1]],
    }))));

    for _ in 0..120 {
        state.tick(InputState::default());
        assert_eq!(state.camera.position, world::Point2D::zero());
    }
}
