//! Loads a level and draws its grid as text.
//!
//! Run with: cargo run --example level -- demos/level.map

use mapparser::{Appearance, Level, GROUND};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/level.map".to_string());
    let level = Level::load(&path)?;
    let grid = &level.grid;

    println!(
        "{}: {}x{} cells of {} units",
        path,
        grid.rows(),
        grid.cols(),
        grid.tile_size()
    );

    for row in 0..grid.rows() {
        let line: String = (0..grid.cols())
            .map(|col| match grid.get(row, col) {
                Some(GROUND) | None => '.',
                Some(id) => match level.tile(id) {
                    Some(tile) if tile.transparent => '+',
                    Some(_) => '#',
                    None => '?',
                },
            })
            .collect();
        println!("  {}", line);
    }

    for tile in &level.tiles {
        let look = match &tile.appearance {
            Appearance::Texture(file) => file.clone(),
            Appearance::Color([r, g, b, a]) => format!("rgba({}, {}, {}, {})", r, g, b, a),
        };
        println!("tile {:>2} {:<8} {}", tile.id, tile.name, look);
    }
    for billboard in &level.billboards {
        println!(
            "billboard {} at ({}, {}) size {}",
            billboard.sprite, billboard.x, billboard.y, billboard.size
        );
    }
    if let Some(spawn) = &level.spawn {
        println!("spawn at ({}, {}) facing {}", spawn.x, spawn.y, spawn.rotation);
    }

    Ok(())
}
