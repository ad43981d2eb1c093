use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// `(dx, dy)` offsets of the Moore neighborhood in scan order: `dy` outer, `dx` inner.
const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A dense 2D grid stored row-major in a single buffer (`y * width + x`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Grid {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T> Grid<T> {
    /// Builds a grid by evaluating `f(x, y)` for every cell, row by row.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Grid { width, height, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        self.contains(x, y).then(|| y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.index_of(x, y).map(|i| &self.data[i])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.index_of(x, y).map(move |i| &mut self.data[i])
    }

    /// Writes `value` at `(x, y)`. Returns false if the cell is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, value: T) -> bool {
        match self.get_mut(x, y) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterates every cell with its coordinates, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, value)| (i % width, i / width, value))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks(0) panics, and a zero-width grid has no rows anyway
        self.data.chunks(self.width.max(1))
    }

    /// In-bounds Moore neighbors of `(x, y)`, scanned with `dy` outer and
    /// `dx` inner over {-1, 0, 1}.
    pub fn moore_neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
        let (width, height) = (self.width as i64, self.height as i64);
        let (x, y) = (x as i64, y as i64);
        MOORE_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let nx = x + dx;
            let ny = y + dy;
            if nx >= 0 && nx < width && ny >= 0 && ny < height {
                Some((nx as usize, ny as usize))
            } else {
                None
            }
        })
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(self.contains(x, y), "cell ({x}, {y}) outside {}x{} grid", self.width, self.height);
        &self.data[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        assert!(self.contains(x, y), "cell ({x}, {y}) outside {}x{} grid", self.width, self.height);
        &mut self.data[y * self.width + x]
    }
}
