/// A cell coordinate. Signed so that a candidate move can step off the board
/// and be rejected by a bounds check instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position
{
    pub row: i32,
    pub col: i32,
}

impl Position
{
    pub const fn new(row: i32, col: i32) -> Self
    {
        Self { row, col }
    }

    pub fn step(self, direction: Direction) -> Self
    {
        let (d_row, d_col) = direction.delta();
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction
{
    Up,
    Left,
    Down,
    Right,
}

impl Direction
{
    pub fn from_key(ch: char) -> Option<Self>
    {
        match ch {
            'w' => Some(Direction::Up),
            'a' => Some(Direction::Left),
            's' => Some(Direction::Down),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn delta(self) -> (i32, i32)
    {
        match self {
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
            Direction::Right => (0, 1),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T>
{
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T>
{
    pub fn filled(rows: usize, cols: usize, value: T) -> Self
    {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }
}

impl<T> Grid<T>
{
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(Position) -> T) -> Self
    {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(Position::new(row as i32, col as i32)));
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize
    {
        self.rows
    }

    pub fn cols(&self) -> usize
    {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool
    {
        pos.row >= 0 && pos.col >= 0 && (pos.row as usize) < self.rows && (pos.col as usize) < self.cols
    }

    fn index(&self, pos: Position) -> Option<usize>
    {
        if self.contains(pos) {
            Some(pos.row as usize * self.cols + pos.col as usize)
        } else {
            None
        }
    }

    pub fn get(&self, pos: Position) -> Option<&T>
    {
        self.index(pos).map(|idx| &self.cells[idx])
    }

    pub fn set(&mut self, pos: Position, value: T) -> bool
    {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    pub fn row(&self, row: usize) -> &[T]
    {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_
    {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row as i32, col as i32)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_
    {
        self.positions().zip(self.cells.iter())
    }
}
