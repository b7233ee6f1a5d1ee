//! Dungeon generation pipeline
//!
//! Rooms are placed one at a time and each is connected to the dungeon as
//! soon as it lands. Special rooms come after the regular ones. Once every
//! room is in, doors are cut, the start and exit are picked among the
//! regular rooms, objects are handed out and the derived grids are built.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::{GenerationError, GenerationWarning};
use crate::rng::GenRng;

use super::corridor::{ConnectOutcome, Connection, add_room_to_dungeon};
use super::doors::cut_doors;
use super::objects::place_objects;
use super::placement::{decorate_room, dungeon_side, find_room_space, stamp_room};
use super::projection::{fog_of_war_grid, rendering_grid, walkability_grid};
use super::room::{Room, RoomType};
use super::{Grid, Tile};

/// What to generate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonRequest {
    /// Number of regular rooms
    pub room_count: usize,
    /// Whether a second regular room gets an exit tile
    pub with_exit: bool,
    /// Special rooms placed after the regular ones, in this order
    pub special_rooms: Vec<RoomType>,
}

impl DungeonRequest {
    pub fn new(room_count: usize) -> Self {
        Self {
            room_count,
            ..Self::default()
        }
    }

    /// Ask for an exit tile
    pub fn exit(mut self, with_exit: bool) -> Self {
        self.with_exit = with_exit;
        self
    }

    /// Append a special room
    pub fn special(mut self, room_type: RoomType) -> Self {
        self.special_rooms.push(room_type);
        self
    }

    /// Rooms the grid is sized for
    pub fn total_rooms(&self) -> usize {
        self.room_count + self.special_rooms.len()
    }
}

/// A finished dungeon
///
/// `tiles` is the full logical grid; `rendering`, `walkable` and
/// `fog_of_war` are derived from it and share its dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    tiles: Grid<Tile>,
    rendering: Grid<Tile>,
    walkable: Grid<bool>,
    fog_of_war: Grid<bool>,
    rooms: Vec<Room>,
    connections: Vec<Connection>,
    start: (usize, usize),
    exit: Option<(usize, usize)>,
    warnings: Vec<GenerationWarning>,
}

impl Dungeon {
    pub fn columns(&self) -> usize {
        self.tiles.columns()
    }

    pub fn rows(&self) -> usize {
        self.tiles.rows()
    }

    /// Logical tile grid
    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    /// Tile grid with the wall family collapsed
    pub fn rendering(&self) -> &Grid<Tile> {
        &self.rendering
    }

    pub fn walkable(&self) -> &Grid<bool> {
        &self.walkable
    }

    pub fn fog_of_war(&self) -> &Grid<bool> {
        &self.fog_of_war
    }

    /// Placed rooms, in placement order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Corridors carved while placing rooms
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    pub fn exit(&self) -> Option<(usize, usize)> {
        self.exit
    }

    /// Conditions recovered from during generation
    pub fn warnings(&self) -> &[GenerationWarning] {
        &self.warnings
    }
}

/// Mutable state of one generation run
struct Builder<'a> {
    config: &'a GeneratorConfig,
    grid: Grid<Tile>,
    rooms: Vec<Room>,
    connections: Vec<Connection>,
    warnings: Vec<GenerationWarning>,
}

impl<'a> Builder<'a> {
    fn new(config: &'a GeneratorConfig, side: usize) -> Self {
        Self {
            config,
            grid: Grid::new(side, side, Tile::Wall),
            rooms: Vec::new(),
            connections: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Find space for one room, stamp it and connect it
    fn place_room(&mut self, room_type: RoomType, rng: &mut GenRng) {
        let Some(mut room) = find_room_space(&self.grid, self.config, rng) else {
            warn!("could not find a place for a {room_type} room, skipping it");
            self.warnings.push(GenerationWarning::PlacementExhausted { room_type });
            return;
        };
        room.room_type = room_type;

        self.rooms.push(room);
        let idx = self.rooms.len() - 1;
        debug!(
            "placed {} room {} at ({}, {}) size {}x{}",
            room_type, idx, room.x, room.y, room.width, room.height
        );
        stamp_room(&mut self.grid, &room);
        decorate_room(&mut self.grid, &room, self.config, rng);

        match add_room_to_dungeon(&mut self.grid, &self.rooms, idx) {
            ConnectOutcome::Connected(connection) => self.connections.push(connection),
            ConnectOutcome::NotNeeded => {}
            ConnectOutcome::NoTarget => {
                warn!("room {idx} ({room_type}) has no corridor target");
                self.warnings.push(GenerationWarning::ConnectionTargetMissing { room: idx });
            }
        }
    }

    /// Pick a random regular room index other than `exclude`
    fn pick_regular(&self, exclude: Option<usize>, rng: &mut GenRng) -> usize {
        loop {
            let idx = rng.range(0, self.rooms.len());
            if self.rooms[idx].room_type.is_regular() && Some(idx) != exclude {
                return idx;
            }
        }
    }

    /// Mark start, and exit if asked, at regular room centers
    fn select_start_exit(
        &mut self,
        with_exit: bool,
        rng: &mut GenRng,
    ) -> Result<((usize, usize), Option<(usize, usize)>), GenerationError> {
        let regular_rooms = self
            .rooms
            .iter()
            .filter(|room| room.room_type.is_regular())
            .count();
        if regular_rooms == 0 {
            return Err(GenerationError::NoStartRoom);
        }
        if with_exit && regular_rooms < 2 {
            return Err(GenerationError::NoExitRoom { regular_rooms });
        }

        let start_idx = self.pick_regular(None, rng);
        let start = self.rooms[start_idx].center();
        self.grid[start] = Tile::Start;

        let exit = if with_exit {
            let exit_idx = self.pick_regular(Some(start_idx), rng);
            let exit = self.rooms[exit_idx].center();
            self.grid[exit] = Tile::Exit;
            Some(exit)
        } else {
            None
        };
        Ok((start, exit))
    }
}

/// Generate a dungeon
///
/// Rooms that find no space are skipped with a warning. Fails when the
/// configuration is unusable or when the placed rooms cannot hold the start
/// (and the exit, if requested).
pub fn generate_dungeon(
    request: &DungeonRequest,
    config: &GeneratorConfig,
    rng: &mut GenRng,
) -> Result<Dungeon, GenerationError> {
    config.validate()?;

    let requested = request.total_rooms();
    let side = dungeon_side(config, requested);
    debug!("generating {requested} rooms on a {side}x{side} grid");

    let mut builder = Builder::new(config, side);
    for _ in 0..request.room_count {
        builder.place_room(RoomType::Regular, rng);
    }
    for &room_type in &request.special_rooms {
        builder.place_room(room_type, rng);
    }

    if builder.rooms.is_empty() {
        return Err(GenerationError::NoRoomsPlaced { requested });
    }

    cut_doors(&mut builder.grid, &builder.rooms);
    let (start, exit) = builder.select_start_exit(request.with_exit, rng)?;

    let object_warnings = place_objects(&mut builder.grid, &mut builder.rooms, config, rng);
    builder.warnings.extend(object_warnings);

    let Builder {
        grid,
        rooms,
        connections,
        warnings,
        ..
    } = builder;
    let rendering = rendering_grid(&grid);
    let walkable = walkability_grid(&rendering);
    let fog_of_war = fog_of_war_grid(grid.columns(), grid.rows());

    info!(
        "generated {}x{} dungeon with {} of {} rooms, {} warnings",
        side,
        side,
        rooms.len(),
        requested,
        warnings.len()
    );

    Ok(Dungeon {
        tiles: grid,
        rendering,
        walkable,
        fog_of_war,
        rooms,
        connections,
        start,
        exit,
        warnings,
    })
}
