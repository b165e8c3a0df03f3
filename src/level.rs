//! Typed view of a level description.
//!
//! The renderer and game loop never walk the raw document; they read a
//! [`Level`], which is built from these tables:
//!
//! ```text
//! [Map]
//! rows : 3
//! cols : 4
//! tile_size : 30          # optional, defaults to 30
//! grid : [[1, 1, 1, 1],
//!         [1, 0, 2, 1],
//!         [1, 1, 1, 1]]
//!
//! [Tiles]
//! wall  : { id: 1, texture: "wall.png" }
//! glass : { id: 2, color: [0, 128, 255, 255], transparent: true }
//!
//! [Billboards]             # optional
//! sprites : [{ sprite: "barrel.png", x: 2, y: 1 }]
//!
//! [Player]                 # optional
//! x : 1.5
//! y : 1.5
//! ```
//!
//! Cell value 0 is always ground; every other value must be the id of a tile.

use crate::de::{from_table, from_value};
use crate::{Document, Error, Result, Value};
use serde::Deserialize;
use std::path::Path;

/// Grid value reserved for empty ground.
pub const GROUND: u32 = 0;

const DEFAULT_TILE_SIZE: u32 = 30;
const DEFAULT_BILLBOARD_SIZE: u32 = 32;

fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

fn default_billboard_size() -> u32 {
    DEFAULT_BILLBOARD_SIZE
}

#[derive(Deserialize)]
struct MapSection {
    rows: usize,
    cols: usize,
    #[serde(default = "default_tile_size")]
    tile_size: u32,
    grid: Vec<Vec<u32>>,
}

#[derive(Deserialize)]
struct TileSection {
    id: u32,
    texture: Option<String>,
    color: Option<[u8; 4]>,
    #[serde(default)]
    transparent: bool,
}

#[derive(Deserialize)]
struct BillboardSection {
    #[serde(default)]
    sprites: Vec<Billboard>,
}

/// How a tile is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum Appearance {
    /// Image file name, resolved by the renderer.
    Texture(String),
    /// RGBA colour.
    Color([u8; 4]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub name: String,
    pub id: u32,
    pub appearance: Appearance,
    pub transparent: bool,
}

/// A sprite standing in the map at grid coordinates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Billboard {
    pub sprite: String,
    pub x: i32,
    pub y: i32,
    #[serde(default = "default_billboard_size")]
    pub size: u32,
}

/// Where the player starts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Spawn {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: f64,
}

/// The tile grid, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct MapGrid {
    rows: usize,
    cols: usize,
    tile_size: u32,
    cells: Vec<u32>,
}

impl MapGrid {
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Edge length of one cell in world units.
    #[must_use]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// The cell value at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    /// True for any non-ground cell. Positions outside the grid count as solid.
    #[must_use]
    pub fn is_solid(&self, row: usize, col: usize) -> bool {
        self.get(row, col).map_or(true, |cell| cell != GROUND)
    }
}

/// A validated level: grid, tile catalogue, billboards and spawn point.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub grid: MapGrid,
    pub tiles: Vec<Tile>,
    pub billboards: Vec<Billboard>,
    pub spawn: Option<Spawn>,
}

impl Level {
    /// Parses and validates the level file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the parse error, or a lookup/validation error from
    /// [`Level::from_document`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let document = crate::parse_file(path)?;
        Self::from_document(&document)
    }

    /// Builds a level from a parsed document.
    ///
    /// # Errors
    ///
    /// Fails if `[Map]` or `[Tiles]` is missing, if the grid does not have
    /// `rows` rows of `cols` cells, if a tile id is 0 or repeated, if a tile
    /// does not have exactly one of `texture` and `color`, or if the grid uses
    /// an id with no tile.
    pub fn from_document(document: &Document) -> Result<Self> {
        let grid = read_grid(document)?;
        let tiles = read_tiles(document)?;

        for (index, cell) in grid.cells.iter().enumerate() {
            if *cell != GROUND && !tiles.iter().any(|t| t.id == *cell) {
                return Err(Error::custom(format!(
                    "grid cell ({}, {}) uses unknown tile id {}",
                    index / grid.cols,
                    index % grid.cols,
                    cell
                )));
            }
        }

        let billboards = match document.table("Billboards") {
            Some(table) => from_table::<BillboardSection>(table)?.sprites,
            None => Vec::new(),
        };
        let spawn = document
            .table("Player")
            .map(|table| from_table::<Spawn>(table))
            .transpose()?;

        Ok(Level {
            grid,
            tiles,
            billboards,
            spawn,
        })
    }

    /// Looks up a tile by its grid id.
    #[must_use]
    pub fn tile(&self, id: u32) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn tile_by_name(&self, name: &str) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.name == name)
    }
}

fn read_grid(document: &Document) -> Result<MapGrid> {
    let section: MapSection = from_table(document.require_table("Map")?)?;

    if section.grid.len() != section.rows {
        return Err(Error::custom(format!(
            "grid has {} rows, expected {}",
            section.grid.len(),
            section.rows
        )));
    }
    if let Some((row, cells)) = section
        .grid
        .iter()
        .enumerate()
        .find(|(_, cells)| cells.len() != section.cols)
    {
        return Err(Error::custom(format!(
            "grid row {} has {} cells, expected {}",
            row,
            cells.len(),
            section.cols
        )));
    }

    Ok(MapGrid {
        rows: section.rows,
        cols: section.cols,
        tile_size: section.tile_size,
        cells: section.grid.into_iter().flatten().collect(),
    })
}

fn read_tiles(document: &Document) -> Result<Vec<Tile>> {
    let table = document.require_table("Tiles")?;
    let mut tiles: Vec<Tile> = Vec::with_capacity(table.len());

    for (name, value) in table.iter() {
        if !matches!(value, Value::Table(_)) {
            return Err(Error::TypeMismatch {
                key: name.clone(),
                expected: crate::ValueKind::Table,
                found: value.kind(),
            });
        }
        let raw: TileSection = from_value(value)?;

        if raw.id == GROUND {
            return Err(Error::custom(format!(
                "tile \"{}\": id {} is reserved for ground",
                name, GROUND
            )));
        }
        if let Some(other) = tiles.iter().find(|t| t.id == raw.id) {
            return Err(Error::custom(format!(
                "tile \"{}\": id {} is already used by \"{}\"",
                name, raw.id, other.name
            )));
        }

        let appearance = match (raw.texture, raw.color) {
            (Some(texture), None) => Appearance::Texture(texture),
            (None, Some(color)) => Appearance::Color(color),
            _ => {
                return Err(Error::custom(format!(
                    "tile \"{}\" needs exactly one of `texture` or `color`",
                    name
                )))
            }
        };

        tiles.push(Tile {
            name: name.clone(),
            id: raw.id,
            appearance,
            transparent: raw.transparent,
        });
    }
    Ok(tiles)
}
