use super::{coords, in_bounds, index, BOARD_SIZE, NUM_CELLS};

/// The eight compass directions, with north pointing to row 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    E,
    NE,
    N,
    NW,
    W,
    SW,
    S,
    SE,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::E,
        Direction::NE,
        Direction::N,
        Direction::NW,
        Direction::W,
        Direction::SW,
        Direction::S,
        Direction::SE,
    ];

    /// The unit step as a (row, column) delta.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::E => (0, 1),
            Direction::NE => (-1, 1),
            Direction::N => (-1, 0),
            Direction::NW => (-1, -1),
            Direction::W => (0, -1),
            Direction::SW => (1, -1),
            Direction::S => (1, 0),
            Direction::SE => (1, 1),
        }
    }

    /// The neighbouring cell in this direction, if it is on the board.
    pub fn step(self, i: usize, j: usize) -> Option<(usize, usize)> {
        let (di, dj) = self.delta();
        let (next_i, next_j) = (i as isize + di, j as isize + dj);
        if in_bounds(next_i, next_j) {
            Some((next_i as usize, next_j as usize))
        } else {
            None
        }
    }

    /// Like [`Self::step()`], but stays put at the edge of the board.
    pub fn step_bounded(self, i: usize, j: usize) -> (usize, usize) {
        self.step(i, j).unwrap_or((i, j))
    }
}

/// For every cell and direction, the indices from that cell to the edge of the board.
///
/// The first element of every ray is the cell it starts from.
#[derive(Clone, Debug)]
pub struct RayTable {
    rays: Vec<[Vec<usize>; 8]>,
}

impl RayTable {
    pub fn build() -> Self {
        let rays = (0..NUM_CELLS)
            .map(|idx| {
                let (i, j) = coords(idx);
                Direction::ALL.map(|direction| walk(direction, i, j))
            })
            .collect();
        Self { rays }
    }

    /// Panics if the coordinates are off the board.
    pub fn ray(&self, i: usize, j: usize, direction: Direction) -> &[usize] {
        &self.rays[index(i, j)][direction as usize]
    }

    /// All eight rays starting at a flat index, in the order of [`Direction::ALL`].
    pub fn rays_from(&self, idx: usize) -> impl Iterator<Item = &[usize]> + '_ {
        self.rays[idx].iter().map(Vec::as_slice)
    }
}

fn walk(direction: Direction, i: usize, j: usize) -> Vec<usize> {
    let mut ray = Vec::with_capacity(BOARD_SIZE);
    let mut cursor = Some((i, j));
    while let Some((i, j)) = cursor {
        ray.push(index(i, j));
        cursor = direction.step(i, j);
    }
    ray
}
