//! Derived grids handed to the renderer and the movement code

use super::{Grid, Tile};

/// Collapse the wall family to plain wall and fog triggers to floor
pub fn rendering_grid(tiles: &Grid<Tile>) -> Grid<Tile> {
    tiles.map(Tile::rendered)
}

/// Walkable cells of a rendering grid
pub fn walkability_grid(rendering: &Grid<Tile>) -> Grid<bool> {
    rendering.map(Tile::is_walkable)
}

/// Fog of war starts fully cleared
pub fn fog_of_war_grid(columns: usize, rows: usize) -> Grid<bool> {
    Grid::new(columns, rows, false)
}
