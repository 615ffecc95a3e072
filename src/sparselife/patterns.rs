//! Named seed patterns.

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i64, i64)],
}

pub const R_PENTOMINO: Pattern = Pattern {
    name: "R-pentomino",
    cells: &[(80, 31), (80, 32), (80, 30), (79, 31), (81, 32)],
};

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    cells: &[(0, 0), (1, 0), (2, 0)],
};

/// Travels one cell towards +x, -y every four generations.
pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(1, 0), (2, -1), (0, -2), (1, -2), (2, -2)],
};

pub const ACORN: Pattern = Pattern {
    name: "Acorn",
    cells: &[(1, 2), (3, 1), (0, 0), (1, 0), (4, 0), (5, 0), (6, 0)],
};

/// Dies out completely after 130 generations.
pub const DIEHARD: Pattern = Pattern {
    name: "Diehard",
    cells: &[(6, 2), (0, 1), (1, 1), (1, 0), (5, 0), (6, 0), (7, 0)],
};

pub const PATTERNS: &[Pattern] = &[R_PENTOMINO, BLOCK, BLINKER, GLIDER, ACORN, DIEHARD];

impl Pattern {
    /// Case-insensitive lookup; `-`, `_` and spaces are ignored.
    pub fn by_name(name: &str) -> Option<&'static Pattern> {
        let wanted = normalize(name);
        PATTERNS.iter().find(|p| normalize(p.name) == wanted)
    }

    /// Cells shifted by `(dx, dy)`; cells whose shift overflows `i64` are skipped.
    pub fn translated(&self, dx: i64, dy: i64) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.cells
            .iter()
            .filter_map(move |&(x, y)| Some((x.checked_add(dx)?, y.checked_add(dy)?)))
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
