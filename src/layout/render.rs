//! ASCII dump of a layout for logs and test failures

use std::fmt;

use crate::core::types::Position;
use crate::layout::state::GridState;

impl fmt::Display for GridState {
    /// One line per row: `.` for empty cells, the kind symbol elsewhere,
    /// upper-cased on the anchor cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counters = self.counters();
        writeln!(
            f,
            "structures: {}  cells: {}  power: {} kW",
            counters.total(),
            counters.cells(),
            counters.power_kw()
        )?;

        for row in 0..self.board_size() {
            let line: String = (0..self.board_size())
                .map(|col| {
                    let pos = Position::new(row, col);
                    match self.structure_at(pos) {
                        Some(s) if s.anchor == pos => s.kind.symbol().to_ascii_uppercase(),
                        Some(s) => s.kind.symbol(),
                        None => '.',
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
