use thiserror::Error;

use crate::map::LayeredAsset;

use super::kinematics::{Body, Facing};

#[derive(Debug, Error)]
pub enum AnimationError {
    #[error("animation has no frames")]
    NoFrames,
}

/// Looping sequence of sprite-sheet cells, each shown for `frame_duration` ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    frames: Vec<Option<u32>>,
    frame_duration: u32,
}

impl AnimationClip {
    pub fn new(frames: Vec<Option<u32>>, frame_duration: u32) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::NoFrames);
        }

        Ok(Self {
            frames,
            frame_duration: frame_duration.max(1),
        })
    }

    /// Frames are the placements of the document's first layer, in order.
    pub fn from_asset(asset: &LayeredAsset, frame_duration: u32) -> Result<Self, AnimationError> {
        let layer = asset.layers.first().ok_or(AnimationError::NoFrames)?;
        Self::new(layer.tiles.iter().map(|tile| tile.id).collect(), frame_duration)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame_duration(&self) -> u32 {
        self.frame_duration
    }

    /// Sheet cell for a frame, `None` if the document didn't name one.
    pub fn frame(&self, index: usize) -> Option<u32> {
        self.frames.get(index).copied().flatten()
    }
}

/// Play position within a clip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationCursor {
    pub frame: usize,
    pub elapsed: u32,
}

impl AnimationCursor {
    pub fn advance(&mut self, clip: &AnimationClip) {
        self.elapsed += 1;

        if self.elapsed >= clip.frame_duration {
            self.elapsed = 0;
            self.frame = (self.frame + 1) % clip.len();
        }
    }
}

/// Per-tick animation update. Facing follows velocity even while the clip is
/// still loading.
pub fn animate(body: &mut Body, clip: Option<&AnimationClip>) {
    if let Some(clip) = clip {
        body.animation.advance(clip);
    }

    if let Some(facing) = Facing::from_velocity(body.velocity.x) {
        body.facing = facing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{LayerAsset, TileAsset};
    use crate::math::units::world::Point2D;

    #[test]
    fn cycles_back_to_the_first_frame() {
        let clip = AnimationClip::new(vec![Some(0), Some(1), Some(2), Some(3)], 11).unwrap();
        let mut cursor = AnimationCursor::default();
        let mut seen = vec![false; clip.len()];

        for _ in 0..clip.len() as u32 * clip.frame_duration() {
            seen[cursor.frame] = true;
            cursor.advance(&clip);
        }

        assert_eq!(cursor, AnimationCursor::default());
        assert!(seen.iter().all(|seen| *seen));
    }

    #[test]
    fn holds_each_frame_for_its_duration() {
        let clip = AnimationClip::new(vec![Some(5), Some(6)], 3).unwrap();
        let mut cursor = AnimationCursor::default();

        cursor.advance(&clip);
        cursor.advance(&clip);
        assert_eq!(cursor.frame, 0);
        cursor.advance(&clip);
        assert_eq!(cursor.frame, 1);
        assert_eq!(clip.frame(cursor.frame), Some(6));
    }

    #[test]
    fn facing_keeps_last_direction_when_idle() {
        let mut body = Body::new(Point2D::zero());

        body.velocity.x = -1.25;
        animate(&mut body, None);
        assert_eq!(body.facing, Facing::Left);
        assert_eq!(body.animation, AnimationCursor::default());

        body.velocity.x = 0.0;
        animate(&mut body, None);
        assert_eq!(body.facing, Facing::Left);
    }

    #[test]
    fn clip_from_sprite_document() {
        let asset = LayeredAsset {
            tile_size: 16,
            map_width: 4,
            map_height: 1,
            layers: vec![LayerAsset {
                name: "Layer_0".to_owned(),
                tiles: (0..4).map(|x| TileAsset { id: Some(x), x, y: 0 }).collect(),
            }],
        };

        let clip = AnimationClip::from_asset(&asset, 11).unwrap();
        assert_eq!(clip.len(), 4);
        assert_eq!(clip.frame(3), Some(3));

        let empty = LayeredAsset { layers: vec![], ..asset };
        assert!(matches!(AnimationClip::from_asset(&empty, 11), Err(AnimationError::NoFrames)));
    }
}
