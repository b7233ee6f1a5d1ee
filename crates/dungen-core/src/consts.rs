//! Layout constants shared by the placement and connection passes.

/// Width of the surrounding-wall buffer kept around every room's interior
/// (wall ring plus surrounding-wall ring).
pub const ROOM_MARGIN: usize = 2;

/// Distance kept between a room's origin and the grid edge.
pub const EDGE_MARGIN: usize = 4;
