//! Client-side simulation state and the fixed-step tick that drives it.

pub mod animation;
pub mod camera;
pub mod collision;
pub mod kinematics;
pub mod render;

use crate::asset::Loadable;
use crate::map::TileMap;
use crate::math::units::world;
use crate::network::{server, Entity, PlayerState, Snapshot};
use crate::{CAMERA_SMOOTHNESS, GAME_HEIGHT, GAME_WIDTH};

use self::animation::{animate, AnimationClip};
use self::camera::Camera;
use self::kinematics::{Body, InputState};

/// Everything one client tracks between frames.
pub struct PlayState {
    pub local: Body,
    /// Assigned by the relay, `None` until the welcome arrives.
    pub local_id: Option<Entity>,
    pub camera: Camera,
    /// Last snapshot received, replaced wholesale on every update.
    pub remotes: Snapshot,
    pub map: Loadable<TileMap>,
    pub clip: Loadable<AnimationClip>,
}

impl PlayState {
    pub fn new(spawn: world::Point2D) -> Self {
        Self {
            local: Body::new(spawn),
            local_id: None,
            camera: Camera::new(world::Size2D::new(GAME_WIDTH, GAME_HEIGHT), CAMERA_SMOOTHNESS),
            remotes: Snapshot::default(),
            map: Loadable::Pending,
            clip: Loadable::Pending,
        }
    }

    /// Runs one simulation tick and returns the state to publish.
    ///
    /// Movement, then animation, then the camera, so the camera always
    /// follows this tick's position.
    pub fn tick(&mut self, input: InputState) -> PlayerState {
        self.local.step(input, self.map.get());
        animate(&mut self.local, self.clip.get());
        self.update_camera();

        self.local.state()
    }

    pub fn update_camera(&mut self) {
        let map_size = self.map.get().map(TileMap::pixel_size);
        self.camera.update(self.local.bounds(), map_size);
    }

    pub fn handle_packet(&mut self, packet: server::Packet) {
        match packet {
            server::Packet::Welcome(entity) => {
                log::info!("Joined as {:?}", entity);
                self.local_id = Some(entity);
            }
            server::Packet::MapData(asset) => {
                self.map = Loadable::from_result("map", TileMap::from_asset(&asset));
            }
            server::Packet::Snapshot(snapshot) => {
                self.remotes = snapshot;
            }
        }
    }

    /// Every known player except ourselves.
    pub fn remote_players(&self) -> impl Iterator<Item = (Entity, &PlayerState)> {
        let local_id = self.local_id;
        self.remotes.iter().filter(move |(entity, _)| Some(*entity) != local_id)
    }
}
