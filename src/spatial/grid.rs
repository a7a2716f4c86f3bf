//! Dense square grid indexed by cell position

use crate::core::types::Position;

/// Square grid storing one value per board cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T: Clone + Default> {
    side: i32,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(side: i32) -> Self {
        assert!(side > 0, "grid side must be positive, got {}", side);
        Self {
            side,
            data: vec![T::default(); (side as usize) * (side as usize)],
        }
    }

    pub fn side(&self) -> i32 {
        self.side
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.within_board(self.side) {
            Some(pos.row as usize * self.side as usize + pos.col as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index(pos).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        match self.index(pos) {
            Some(i) => Some(&mut self.data[i]),
            None => None,
        }
    }

    /// Write a cell; positions off the grid are ignored
    #[inline]
    pub fn set(&mut self, pos: Position, value: T) {
        if let Some(i) = self.index(pos) {
            self.data[i] = value;
        }
    }

    /// All cells with their values in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        let side = self.side as usize;
        self.data.iter().enumerate().map(move |(i, value)| {
            (Position::new((i / side) as i32, (i % side) as i32), value)
        })
    }
}
