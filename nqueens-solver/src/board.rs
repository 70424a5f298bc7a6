//! Board state and the placement safety check

/// Per-worker placement state.
///
/// `placements[row]` holds the column of the queen placed in `row`, or `None`
/// while the row is still undecided. A board is owned by exactly one worker;
/// observers receive clones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    placements: Vec<Option<usize>>,
}

impl Board {
    /// Create an empty N x N board
    pub fn new(size: usize) -> Self {
        Self {
            placements: vec![None; size],
        }
    }

    /// Create a board with only the first-row queen placed at `column`
    pub fn with_first_row(size: usize, column: usize) -> Self {
        let mut board = Self::new(size);
        board.place(0, column);
        board
    }

    /// Side length N
    pub fn size(&self) -> usize {
        self.placements.len()
    }

    /// Column of the queen in `row`, if placed
    pub fn get(&self, row: usize) -> Option<usize> {
        self.placements.get(row).copied().flatten()
    }

    /// Raw row-to-column mapping
    pub fn placements(&self) -> &[Option<usize>] {
        &self.placements
    }

    /// Iterate `(row, column)` over placed rows in row order
    pub fn placed(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.placements
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.map(|c| (row, c)))
    }

    pub(crate) fn place(&mut self, row: usize, column: usize) {
        self.placements[row] = Some(column);
    }

    pub(crate) fn remove(&mut self, row: usize) {
        self.placements[row] = None;
    }

    /// Check whether a queen at (`row`, `column`) conflicts with rows `0..row`
    pub fn is_safe(&self, row: usize, column: usize) -> bool {
        is_safe(&self.placements, row, column)
    }

    /// Snapshot the board as a [`Solution`] if every row is placed
    pub fn to_solution(&self) -> Option<Solution> {
        self.placements
            .iter()
            .copied()
            .collect::<Option<Vec<_>>>()
            .map(|columns| Solution { columns })
    }
}

/// Check whether a queen at (`row`, `column`) is attacked by any placed queen
/// in rows `0..row`, by column or by diagonal.
pub fn is_safe(placements: &[Option<usize>], row: usize, column: usize) -> bool {
    placements[..row].iter().enumerate().all(|(i, placed)| match placed {
        Some(c) => *c != column && c.abs_diff(column) != row - i,
        None => true,
    })
}

/// A complete, conflict-free placement of N queens.
///
/// Ordered lexicographically by column sequence, which gives callers a
/// deterministic output order independent of worker interleaving.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Solution {
    columns: Vec<usize>,
}

impl Solution {
    /// Build a solution from a row-to-column mapping, returning `None` if it
    /// breaks the column or diagonal constraint
    pub fn from_columns(columns: Vec<usize>) -> Option<Self> {
        let solution = Self { columns };
        solution.is_valid().then_some(solution)
    }

    /// Side length N
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    /// Queen column for every row
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Check the full-board invariant: columns in range, pairwise distinct,
    /// no two queens on a shared diagonal
    pub fn is_valid(&self) -> bool {
        let n = self.columns.len();
        self.columns.iter().all(|&c| c < n)
            && self.columns.iter().enumerate().all(|(i, &a)| {
                self.columns[i + 1..]
                    .iter()
                    .enumerate()
                    .all(|(offset, &b)| a != b && a.abs_diff(b) != offset + 1)
            })
    }
}

impl From<Solution> for Vec<usize> {
    fn from(solution: Solution) -> Self {
        solution.columns
    }
}
