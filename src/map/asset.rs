//! Map documents as they arrive from disk or over the wire.

use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use super::MapError;
use crate::TILE_SIZE;

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub enum MapAsset {
    Grid(GridAsset),
    Layered(LayeredAsset),
}

/// Dense grid, `cells[row][col]`, any non-zero cell is solid.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct GridAsset {
    pub tile_size: u32,
    pub cells: Vec<Vec<u8>>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LayeredAsset {
    #[serde(deserialize_with = "coerce_u32")]
    pub tile_size: u32,
    #[serde(deserialize_with = "coerce_u32")]
    pub map_width: u32,
    #[serde(deserialize_with = "coerce_u32")]
    pub map_height: u32,
    pub layers: Vec<LayerAsset>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct LayerAsset {
    pub name: String,
    #[serde(default)]
    pub tiles: Vec<TileAsset>,
}

/// A single placement. `id` is `None` when the document held something that
/// isn't a tile index, the placement still occupies its cell.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct TileAsset {
    #[serde(deserialize_with = "coerce_id")]
    pub id: Option<u32>,
    #[serde(deserialize_with = "coerce_u32")]
    pub x: u32,
    #[serde(deserialize_with = "coerce_u32")]
    pub y: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MapFile {
    Layered(LayeredAsset),
    Grid(Vec<Vec<u8>>),
}

impl MapAsset {
    /// Parses either a layered document or a bare array of rows.
    pub fn from_json(text: &str) -> Result<Self, MapError> {
        let file: MapFile = serde_json::from_str(text)?;

        Ok(match file {
            MapFile::Layered(layered) => Self::Layered(layered),
            MapFile::Grid(cells) => Self::Grid(GridAsset {
                tile_size: TILE_SIZE as u32,
                cells,
            }),
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

impl LayeredAsset {
    pub fn from_json(text: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn layer(&self, name: &str) -> Option<&LayerAsset> {
        self.layers.iter().find(|layer| layer.name == name)
    }
}

enum Coerced {
    Number(u32),
    Garbage,
}

struct CoerceVisitor;

impl<'de> Visitor<'de> for CoerceVisitor {
    type Value = Coerced;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Coerced, E> {
        Ok(u32::try_from(v).map_or(Coerced::Garbage, Coerced::Number))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Coerced, E> {
        Ok(u32::try_from(v).map_or(Coerced::Garbage, Coerced::Number))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Coerced, E> {
        if v.is_finite() && v >= 0.0 && v <= u32::MAX as f64 {
            Ok(Coerced::Number(v.trunc() as u32))
        } else {
            Ok(Coerced::Garbage)
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Coerced, E> {
        // parseInt semantics: leading digits count, the rest is ignored
        let digits: String = v.trim().chars().take_while(char::is_ascii_digit).collect();
        Ok(digits.parse().map_or(Coerced::Garbage, Coerced::Number))
    }

    fn visit_none<E: de::Error>(self) -> Result<Coerced, E> {
        Ok(Coerced::Garbage)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Coerced, E> {
        Ok(Coerced::Garbage)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Coerced, D::Error> {
        deserializer.deserialize_any(CoerceVisitor)
    }
}

fn coerce_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    match deserializer.deserialize_any(CoerceVisitor)? {
        Coerced::Number(n) => Ok(n),
        Coerced::Garbage => Err(de::Error::custom("expected a non-negative tile coordinate")),
    }
}

fn coerce_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    match deserializer.deserialize_any(CoerceVisitor)? {
        Coerced::Number(n) => Ok(Some(n)),
        Coerced::Garbage => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYERED: &str = r#"{
        "tileSize": 16,
        "mapWidth": "4",
        "mapHeight": 3,
        "layers": [
            { "name": "decoration", "tiles": [{ "id": "7", "x": "1", "y": 0 }] },
            { "name": "collision", "tiles": [
                { "id": 12, "x": 0, "y": 2 },
                { "id": "grass", "x": 1, "y": 2 }
            ] }
        ]
    }"#;

    #[test]
    fn layered_document_coerces_strings() {
        let MapAsset::Layered(asset) = MapAsset::from_json(LAYERED).unwrap() else {
            panic!("expected a layered map");
        };

        assert_eq!(asset.map_width, 4);
        assert_eq!(
            asset.layer("decoration").unwrap().tiles[0],
            TileAsset {
                id: Some(7),
                x: 1,
                y: 0
            }
        );

        let collision = asset.layer("collision").unwrap();
        assert_eq!(collision.tiles[0].id, Some(12));
        assert_eq!(collision.tiles[1].id, None);
        assert_eq!(collision.tiles[1].x, 1);
    }

    #[test]
    fn bare_rows_become_a_grid() {
        let asset = MapAsset::from_json("[[0, 1], [1, 1]]").unwrap();
        assert_eq!(
            asset,
            MapAsset::Grid(GridAsset {
                tile_size: 16,
                cells: vec![vec![0, 1], vec![1, 1]],
            })
        );
    }

    #[test]
    fn unparsable_coordinate_fails_the_load() {
        let text = r#"{ "tileSize": 16, "mapWidth": 1, "mapHeight": 1,
            "layers": [{ "name": "collision", "tiles": [{ "id": 1, "x": "left", "y": 0 }] }] }"#;
        assert!(LayeredAsset::from_json(text).is_err());
    }

    #[test]
    fn survives_the_wire() {
        let asset = MapAsset::from_json(LAYERED).unwrap();
        let bytes = rmp_serde::to_vec(&asset).unwrap();
        let decoded: MapAsset = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(decoded, asset);
    }
}
