//! Builds the frame as a flat list of draw commands.
//!
//! Nothing here touches a graphics context, the client replays the list.
//! Every coordinate emitted is a whole pixel.

use crate::math::round_px;
use crate::math::units::{image, screen, world};
use crate::{GAME_HEIGHT, GAME_WIDTH};

use super::kinematics::Facing;
use super::PlayState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const SKY: Color = Color::rgb(0x87, 0xce, 0xeb);
pub const GROUND: Color = Color::rgb(0x5b, 0x3a, 0x29);
pub const REMOTE_PLAYER: Color = Color::rgb(0x00, 0x00, 0xff);
pub const LOCAL_PLAYER: Color = Color::rgb(0xff, 0x00, 0x00);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sheet {
    Background,
    Tiles,
    Player,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Fill {
        rect: screen::Rect,
        color: Color,
    },
    Image {
        sheet: Sheet,
        /// Whole image when `None`.
        source: Option<image::Rect>,
        dest: screen::Rect,
        /// Mirror around the destination's vertical center line.
        flip_x: bool,
    },
}

/// A grid image sliced into square cells, numbered row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    pub size: image::Size2D,
    pub tile_size: u32,
}

impl SpriteSheet {
    pub fn new(size: image::Size2D, tile_size: u32) -> Self {
        Self { size, tile_size }
    }

    pub fn columns(&self) -> u32 {
        self.size.width.checked_div(self.tile_size).unwrap_or(0)
    }

    pub fn rows(&self) -> u32 {
        self.size.height.checked_div(self.tile_size).unwrap_or(0)
    }

    /// `None` for ids that fall outside the sheet.
    pub fn source_rect(&self, id: u32) -> Option<image::Rect> {
        let columns = self.columns();
        if columns == 0 || id / columns >= self.rows() {
            return None;
        }

        let origin = image::Point2D::new(id % columns, id / columns) * self.tile_size;
        Some(image::Rect::new(origin, image::Size2D::splat(self.tile_size)))
    }
}

/// Dimensions of whatever images have finished loading.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderAssets {
    pub background: Option<image::Size2D>,
    pub tiles: Option<SpriteSheet>,
    pub player: Option<SpriteSheet>,
}

/// Scales `image` to cover `target` keeping its aspect ratio, centered, the
/// overflowing axis is cropped by the viewport.
pub fn cover_fit(image: image::Size2D, target: screen::Size2D) -> screen::Rect {
    let image = image.to_f32();
    let image_ratio = image.width / image.height;
    let target_ratio = target.width / target.height;

    let size = if target_ratio > image_ratio {
        screen::Size2D::new(target.width, target.width / image_ratio)
    } else {
        screen::Size2D::new(target.height * image_ratio, target.height)
    };

    let origin = screen::Point2D::new(
        (target.width - size.width) / 2.0,
        (target.height - size.height) / 2.0,
    );
    screen::Rect::new(origin, size)
}

fn round_point(point: screen::Point2D) -> screen::Point2D {
    screen::Point2D::new(round_px(point.x), round_px(point.y))
}

pub fn frame(state: &PlayState, assets: &RenderAssets) -> Vec<DrawCommand> {
    let viewport = screen::Size2D::new(GAME_WIDTH, GAME_HEIGHT);
    let camera = &state.camera;
    let mut commands = Vec::new();

    commands.push(DrawCommand::Fill {
        rect: screen::Rect::from_size(viewport),
        color: SKY,
    });

    if let Some(background) = assets.background.filter(|size| size.width > 0 && size.height > 0) {
        let dest = cover_fit(background, viewport);
        commands.push(DrawCommand::Image {
            sheet: Sheet::Background,
            source: None,
            dest: screen::Rect::new(round_point(dest.origin), dest.size.round()),
            flip_x: false,
        });
    }

    if let Some(map) = state.map.get() {
        let tile_size = map.tile_size();
        let tile = screen::Size2D::splat(tile_size);
        let camera_origin = round_point(camera.position.cast_unit());

        let visible = |position: screen::Point2D| {
            position.x > -tile_size
                && position.x < viewport.width
                && position.y > -tile_size
                && position.y < viewport.height
        };
        let to_screen = |col: i32, row: i32| {
            let pixel = screen::Point2D::new(col as f32, row as f32) * tile_size;
            round_point(pixel - camera_origin.to_vector())
        };

        if map.is_grid() {
            for cell in map.solid_cells() {
                let position = to_screen(cell.x, cell.y);
                if visible(position) {
                    commands.push(DrawCommand::Fill {
                        rect: screen::Rect::new(position, tile),
                        color: GROUND,
                    });
                }
            }
        } else if let Some(sheet) = assets.tiles {
            for layer in map.layers() {
                for placed in &layer.tiles {
                    let position = to_screen(placed.position.x, placed.position.y);
                    if !visible(position) {
                        continue;
                    }

                    // unresolvable tiles are skipped, the rest of the frame still draws
                    let Some(source) = placed.id.and_then(|id| sheet.source_rect(id)) else {
                        continue;
                    };

                    commands.push(DrawCommand::Image {
                        sheet: Sheet::Tiles,
                        source: Some(source),
                        dest: screen::Rect::new(position, tile),
                        flip_x: false,
                    });
                }
            }
        }
    }

    let body = &state.local;
    for (_, remote) in state.remote_players() {
        let position = camera.world_to_screen(world::Point2D::new(remote.x, remote.y));
        commands.push(DrawCommand::Fill {
            rect: screen::Rect::new(round_point(position), body.size.cast_unit()),
            color: REMOTE_PLAYER,
        });
    }

    let screen_position = camera.world_to_screen(body.position);
    let sprite = state.clip.get().zip(assets.player).and_then(|(clip, sheet)| {
        clip.frame(body.animation.frame)
            .and_then(|id| sheet.source_rect(id))
    });

    commands.push(match sprite {
        Some(source) => DrawCommand::Image {
            sheet: Sheet::Player,
            source: Some(source),
            dest: screen::Rect::new(screen_position.floor(), body.size.cast_unit()),
            flip_x: body.facing == Facing::Left,
        },
        None => DrawCommand::Fill {
            rect: screen::Rect::new(round_point(screen_position), body.size.cast_unit()),
            color: LOCAL_PLAYER,
        },
    });

    commands
}

/// Fits the fixed game resolution into a window by filling it, the
/// overflowing axis is cut off evenly on both sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub offset: screen::Vector2D,
}

impl Letterbox {
    pub fn fit(window: screen::Size2D) -> Self {
        let scale = f32::max(window.width / GAME_WIDTH, window.height / GAME_HEIGHT);
        let offset = screen::Vector2D::new(
            (window.width - GAME_WIDTH * scale) / 2.0,
            (window.height - GAME_HEIGHT * scale) / 2.0,
        );

        Self { scale, offset }
    }

    /// Window pixel to game pixel.
    pub fn screen_to_game(&self, point: screen::Point2D) -> screen::Point2D {
        ((point - self.offset).to_vector() / self.scale).to_point()
    }

    /// The window's area expressed in game pixels, for setting up a projection.
    pub fn visible_area(&self, window: screen::Size2D) -> screen::Rect {
        let origin = self.screen_to_game(screen::Point2D::zero());
        screen::Rect::new(origin, window / self.scale)
    }
}
