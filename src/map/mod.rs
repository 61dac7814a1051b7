//! Level geometry and the occupancy queries collision runs against.

mod asset;

use ndarray::Array2;
use thiserror::Error;

use crate::math::units::{tile, world};

pub use self::asset::{GridAsset, LayerAsset, LayeredAsset, MapAsset, TileAsset};

pub const COLLISION_LAYER: &str = "collision";
pub const DECORATION_LAYER: &str = "decoration";

/// Layers a layered map must carry to load.
pub const REQUIRED_LAYERS: &[&str] = &[COLLISION_LAYER];
/// The stricter variant that also insists on the visual layer.
pub const STRICT_LAYERS: &[&str] = &[COLLISION_LAYER, DECORATION_LAYER];

/// Upper bound on `width * height` for a declared map size.
pub const MAX_CELLS: usize = 1 << 24;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("map is missing the required \"{0}\" layer")]
    MissingLayer(String),
    #[error("map has no tiles")]
    Empty,
    #[error("tile size must be non-zero")]
    ZeroTileSize,
    #[error("map size {0}x{1} is too large")]
    TooLarge(u32, u32),
    #[error("could not parse map: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read map: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tile {
    pub id: Option<u32>,
    pub position: tile::Point2D,
}

#[derive(Clone, PartialEq, Debug)]
pub struct TileLayer {
    pub name: String,
    pub tiles: Vec<Tile>,
}

/// Loaded level. Dimensions are fixed once built.
#[derive(Clone, Debug)]
pub struct TileMap {
    tile_size: f32,
    size: tile::Size2D,
    /// Indexed `[(col, row)]`.
    solid: Array2<bool>,
    /// Visual layers in draw order, empty for grid maps.
    layers: Vec<TileLayer>,
}

impl TileMap {
    pub fn from_asset(asset: &MapAsset) -> Result<Self, MapError> {
        match asset {
            MapAsset::Grid(grid) => Self::from_grid(grid),
            MapAsset::Layered(layered) => Self::from_layers(layered, REQUIRED_LAYERS),
        }
    }

    pub fn from_grid(asset: &GridAsset) -> Result<Self, MapError> {
        if asset.tile_size == 0 {
            return Err(MapError::ZeroTileSize);
        }

        let width = asset.cells.iter().map(Vec::len).max().unwrap_or(0);
        let height = asset.cells.len();
        if width == 0 {
            return Err(MapError::Empty);
        }

        // ragged rows are padded with empty cells
        let mut solid = Array2::default((width, height));
        for (row, cells) in asset.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                solid[(col, row)] = cell != 0;
            }
        }

        Ok(Self {
            tile_size: asset.tile_size as f32,
            size: tile::Size2D::new(width as i32, height as i32),
            solid,
            layers: Vec::new(),
        })
    }

    pub fn from_layers(asset: &LayeredAsset, required: &[&str]) -> Result<Self, MapError> {
        if asset.tile_size == 0 {
            return Err(MapError::ZeroTileSize);
        }

        if let Some(missing) = required.iter().find(|name| asset.layer(name).is_none()) {
            return Err(MapError::MissingLayer(missing.to_string()));
        }

        let size = declared_size(asset.map_width, asset.map_height)?;
        let mut solid = Array2::default((size.width as usize, size.height as usize));

        if let Some(collision) = asset.layer(COLLISION_LAYER) {
            for tile in &collision.tiles {
                // out of bounds is solid already
                if let Some(cell) = solid.get_mut((tile.x as usize, tile.y as usize)) {
                    *cell = true;
                }
            }
        }

        let layers = asset
            .layers
            .iter()
            .map(|layer| TileLayer {
                name: layer.name.clone(),
                tiles: layer
                    .tiles
                    .iter()
                    .map(|tile| Tile {
                        id: tile.id,
                        position: tile::Point2D::new(tile.x as i32, tile.y as i32),
                    })
                    .collect(),
            })
            .collect();

        Ok(Self {
            tile_size: asset.tile_size as f32,
            size,
            solid,
            layers,
        })
    }

    /// Any cell outside the map counts as a wall.
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 || col >= self.size.width || row >= self.size.height {
            return true;
        }

        self.solid[(col as usize, row as usize)]
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Size in tiles.
    pub fn size(&self) -> tile::Size2D {
        self.size
    }

    pub fn pixel_size(&self) -> world::Size2D {
        (self.size.to_f32() * self.tile_size).cast_unit()
    }

    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    pub fn is_grid(&self) -> bool {
        self.layers.is_empty()
    }

    /// Every solid in-bounds cell, row-major.
    pub fn solid_cells(&self) -> impl Iterator<Item = tile::Point2D> + '_ {
        let size = self.size;
        (0..size.height)
            .flat_map(move |row| (0..size.width).map(move |col| tile::Point2D::new(col, row)))
            .filter(|cell| self.solid[(cell.x as usize, cell.y as usize)])
    }
}

fn declared_size(width: u32, height: u32) -> Result<tile::Size2D, MapError> {
    let too_large = || MapError::TooLarge(width, height);

    let cols = i32::try_from(width).map_err(|_| too_large())?;
    let rows = i32::try_from(height).map_err(|_| too_large())?;
    match (width as usize).checked_mul(height as usize) {
        Some(cells) if cells <= MAX_CELLS => Ok(tile::Size2D::new(cols, rows)),
        _ => Err(too_large()),
    }
}
