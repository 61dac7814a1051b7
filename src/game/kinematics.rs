use crate::map::TileMap;
use crate::math::round_px;
use crate::math::units::world::{self, *};
use crate::network::PlayerState;
use crate::{GRAVITY, JUMP_FORCE, MOVEMENT_SPEED, TILE_SIZE};

use super::animation::AnimationCursor;
use super::collision::{sweep, Axis, Sweep};

/// Buttons held during one tick, sampled once before the tick runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// `None` when standing still, the previous facing should be kept.
    pub fn from_velocity(velocity_x: f32) -> Option<Self> {
        if velocity_x < 0.0 {
            Some(Facing::Left)
        } else if velocity_x > 0.0 {
            Some(Facing::Right)
        } else {
            None
        }
    }
}

/// The locally simulated player.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// Top-left corner.
    pub position: Point2D,
    pub size: Size2D,
    pub velocity: Vector2D,
    /// Set whenever nothing was underfoot this tick, not only while rising.
    pub jumping: bool,
    pub facing: Facing,
    pub animation: AnimationCursor,
}

impl Body {
    pub fn new(position: Point2D) -> Self {
        Self {
            position,
            size: Size2D::splat(TILE_SIZE),
            velocity: Vector2D::zero(),
            jumping: false,
            facing: Facing::default(),
            animation: AnimationCursor::default(),
        }
    }

    pub fn bounds(&self) -> world::Rect {
        world::Rect::new(self.position, self.size)
    }

    pub fn state(&self) -> PlayerState {
        PlayerState {
            x: self.position.x,
            y: self.position.y,
            vel_x: self.velocity.x,
            vel_y: self.velocity.y,
            jumping: self.jumping,
        }
    }

    /// Advances one tick. Without a map the body falls freely.
    pub fn step(&mut self, input: InputState, map: Option<&TileMap>) {
        self.velocity.x = if input.left {
            -MOVEMENT_SPEED
        } else if input.right {
            MOVEMENT_SPEED
        } else {
            0.0
        };

        self.velocity.y += GRAVITY;

        if input.jump && !self.jumping {
            self.velocity.y = JUMP_FORCE;
            self.jumping = true;
        }

        if self.velocity.x != 0.0 {
            let delta = round_px(self.position.x + self.velocity.x) - self.position.x;
            let result = self.sweep(map, Axis::Horizontal, delta);

            self.position.x += result.allowed;
            if result.hit {
                self.velocity.x = 0.0;
            }
        }

        // uses the x resolved above
        if self.velocity.y != 0.0 {
            let delta = round_px(self.position.y + self.velocity.y) - self.position.y;
            let result = self.sweep(map, Axis::Vertical, delta);

            self.position.y += result.allowed;
            if result.hit {
                if self.velocity.y > 0.0 {
                    self.jumping = false;
                }
                self.velocity.y = 0.0;
            } else {
                self.jumping = true;
            }
        }

        self.position = Point2D::new(round_px(self.position.x), round_px(self.position.y));
    }

    fn sweep(&self, map: Option<&TileMap>, axis: Axis, delta: f32) -> Sweep {
        match map {
            Some(map) => sweep(map, self.bounds(), axis, delta),
            None => Sweep::clear(delta),
        }
    }
}
