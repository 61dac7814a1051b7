use std::io::Read;

use ggez::graphics::Image;
use ggez::{Context, GameError};
use thiserror::Error;
use tilehop::asset::Loadable;
use tilehop::game::animation::{AnimationClip, AnimationError};
use tilehop::game::render::{RenderAssets, Sheet, SpriteSheet};
use tilehop::map::{LayeredAsset, MapError};
use tilehop::math::units::image;
use tilehop::{PLAYER_FRAME_DURATION, TILE_SIZE};

const BACKGROUND: &str = "/gamebg.png";
const TILESET: &str = "/spritesheet.png";
const PLAYER_SHEET: &str = "/characters/knight/idle_spritesheet.png";
const PLAYER_CLIP: &str = "/characters/knight/idle_map.json";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("{0}")]
    Read(#[from] GameError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Map(#[from] MapError),
    #[error("{0}")]
    Animation(#[from] AnimationError),
}

/// Images and the player clip. A missing file leaves its slot failed and the
/// frame is drawn without it.
pub struct AssetCache {
    pub background: Loadable<Image>,
    pub tiles: Loadable<Image>,
    pub player: Loadable<Image>,
}

impl AssetCache {
    pub fn load(ctx: &mut Context) -> Self {
        Self {
            background: Loadable::from_result("background", Image::from_path(ctx, BACKGROUND)),
            tiles: Loadable::from_result("tileset", Image::from_path(ctx, TILESET)),
            player: Loadable::from_result(
                "player sprite sheet",
                Image::from_path(ctx, PLAYER_SHEET),
            ),
        }
    }

    pub fn load_clip(ctx: &mut Context) -> Loadable<AnimationClip> {
        Loadable::from_result("player animation", Self::read_clip(ctx))
    }

    fn read_clip(ctx: &mut Context) -> Result<AnimationClip, AssetError> {
        let mut text = String::new();
        ctx.fs.open(PLAYER_CLIP)?.read_to_string(&mut text)?;

        let asset = LayeredAsset::from_json(&text)?;
        Ok(AnimationClip::from_asset(&asset, PLAYER_FRAME_DURATION)?)
    }

    pub fn image(&self, sheet: Sheet) -> Option<&Image> {
        match sheet {
            Sheet::Background => self.background.get(),
            Sheet::Tiles => self.tiles.get(),
            Sheet::Player => self.player.get(),
        }
    }

    /// Sizes of whatever loaded, for building the frame.
    pub fn dimensions(&self, tile_size: Option<f32>) -> RenderAssets {
        let tile_size = tile_size.unwrap_or(TILE_SIZE) as u32;
        let size = |image: &Image| image::Size2D::new(image.width(), image.height());

        RenderAssets {
            background: self.background.get().map(size),
            tiles: self.tiles.get().map(|image| SpriteSheet::new(size(image), tile_size)),
            player: self.player.get().map(|image| SpriteSheet::new(size(image), TILE_SIZE as u32)),
        }
    }
}
