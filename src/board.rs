//! Board representation: a flat arena of intersections with precomputed
//! orthogonal adjacency.
//!
//! Intersections are addressed by [`Point`], an index into the arena equal to
//! `row * size + col`. Neighbor lists are built once in [`Board::new`] and never
//! change; only occupants are mutated.

use std::fmt;

use crate::constants::{EMPTY_GLYPH, PLAYER_GLYPHS};

/// Player identifier, `1..=num_players`. `0` is reserved for empty cells in the
/// integer encoding used by saved games.
pub type PlayerId = u8;

/// Index of an intersection in the board arena.
pub type Point = usize;

/// What sits on an intersection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Occupant {
    #[default]
    Empty,
    Stone(PlayerId),
}

impl Occupant {
    pub fn is_empty(self) -> bool {
        self == Occupant::Empty
    }

    /// The owning player, if any.
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Occupant::Empty => None,
            Occupant::Stone(p) => Some(p),
        }
    }

    /// Integer encoding: 0 for empty, the player id otherwise.
    pub fn to_u8(self) -> u8 {
        self.player().unwrap_or(0)
    }

    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Occupant::Empty,
            p => Occupant::Stone(p),
        }
    }

    fn glyph(self) -> char {
        match self {
            Occupant::Empty => EMPTY_GLYPH,
            Occupant::Stone(p) => PLAYER_GLYPHS
                .get(usize::from(p).wrapping_sub(1))
                .copied()
                .unwrap_or('?'),
        }
    }
}

/// A single point of the grid.
#[derive(Clone, Debug)]
pub struct Intersection {
    pub row: usize,
    pub col: usize,
    pub occupant: Occupant,
    neighbors: Vec<Point>,
}

impl Intersection {
    /// Orthogonal neighbors, edges excluded.
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }
}

/// Copy of the occupant grid, used for history and ko comparison.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Snapshot {
    size: usize,
    cells: Vec<Occupant>,
}

impl Snapshot {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, pt: Point) -> Occupant {
        self.cells[pt]
    }

    /// Rows of integers, 0 for empty and the player id otherwise.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|c| c.to_u8()).collect())
            .collect()
    }
}

pub struct Board {
    size: usize,
    points: Vec<Intersection>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        let mut points = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let mut neighbors = Vec::with_capacity(4);
                if row + 1 < size {
                    neighbors.push((row + 1) * size + col);
                }
                if col + 1 < size {
                    neighbors.push(row * size + col + 1);
                }
                if row > 0 {
                    neighbors.push((row - 1) * size + col);
                }
                if col > 0 {
                    neighbors.push(row * size + col - 1);
                }
                points.push(Intersection {
                    row,
                    col,
                    occupant: Occupant::Empty,
                    neighbors,
                });
            }
        }
        Self { size, points }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of intersections.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point at (row, col), or `None` when off the board.
    pub fn point(&self, row: usize, col: usize) -> Option<Point> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(row * self.size + col)
    }

    pub fn coords(&self, pt: Point) -> (usize, usize) {
        let p = &self.points[pt];
        (p.row, p.col)
    }

    pub fn get(&self, pt: Point) -> Occupant {
        self.points[pt].occupant
    }

    /// Occupant at (row, col), `None` when off the board.
    pub fn at(&self, row: usize, col: usize) -> Option<Occupant> {
        self.point(row, col).map(|pt| self.get(pt))
    }

    pub fn neighbors(&self, pt: Point) -> &[Point] {
        self.points[pt].neighbors()
    }

    pub(crate) fn set(&mut self, pt: Point, occupant: Occupant) {
        self.points[pt].occupant = occupant;
    }

    /// All points, row-major.
    pub fn points(&self) -> std::ops::Range<Point> {
        0..self.points.len()
    }

    /// Empty every intersection.
    pub fn clear(&mut self) {
        for p in &mut self.points {
            p.occupant = Occupant::Empty;
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.size,
            cells: self.points.iter().map(|p| p.occupant).collect(),
        }
    }

    /// Overwrite every occupant from a snapshot of the same size.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        debug_assert_eq!(snapshot.size, self.size, "snapshot from another board");
        for (p, &occupant) in self.points.iter_mut().zip(&snapshot.cells) {
            p.occupant = occupant;
        }
    }

    /// Rows of integers, 0 for empty and the player id otherwise.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.snapshot().to_rows()
    }

    /// Build a board from rows of integers. Shape and value ranges are the
    /// caller's responsibility (see [`crate::record`]).
    pub fn from_rows(rows: &[Vec<u8>]) -> Self {
        let mut board = Board::new(rows.len());
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if let Some(pt) = board.point(row, col) {
                    board.set(pt, Occupant::from_u8(value));
                }
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.size {
            write!(f, "{col:>2}")?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{row:>2} ")?;
            for col in 0..self.size {
                let ch = self.get(row * self.size + col).glyph();
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
