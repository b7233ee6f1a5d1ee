//! Plain-text dump of a generated dungeon

use core::fmt;

use super::Dungeon;

impl fmt::Display for Dungeon {
    /// One line per column, two characters per cell
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n=============Start of the dungeon==================\n")?;
        writeln!(
            f,
            "Dungeon of {} columns and {} rows, containing {} rooms.",
            self.columns(),
            self.rows(),
            self.rooms().len()
        )?;
        writeln!(f, "Dungeon map:")?;

        let tiles = self.tiles();
        for x in 0..tiles.columns() {
            writeln!(f)?;
            for y in 0..tiles.rows() {
                f.write_str(&tiles[(x, y)].glyph())?;
            }
        }
        write!(f, "\n=============End of the dungeon==================\n")
    }
}
