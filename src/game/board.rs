use ufmt::derive::uDebug;

pub const SIZE: usize = 3;
pub const CELLS: usize = SIZE * SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub const fn other(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub const fn marker(self) -> Cell {
        match self {
            Player::A => Cell::PlayerA,
            Player::B => Cell::PlayerB,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    PlayerA,
    PlayerB,
}

impl Cell {
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A board coordinate, always in range
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// `None` when either index is outside 0..=2
    pub const fn new(row: u8, col: u8) -> Option<Coord> {
        if (row as usize) < SIZE && (col as usize) < SIZE {
            Some(Coord { row, col })
        } else {
            None
        }
    }

    pub const fn from_index(index: usize) -> Option<Coord> {
        if index < CELLS {
            Some(Coord {
                row: (index / SIZE) as u8,
                col: (index % SIZE) as u8,
            })
        } else {
            None
        }
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    pub const fn col(self) -> u8 {
        self.col
    }

    /// Row-major index, 0..9
    pub const fn index(self) -> usize {
        self.row as usize * SIZE + self.col as usize
    }
}

/// A set of board cells, one bit per row-major index
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellMask(u16);

impl CellMask {
    pub const EMPTY: CellMask = CellMask(0);
    pub const ALL: CellMask = CellMask((1 << CELLS) - 1);

    pub const fn with(self, coord: Coord) -> CellMask {
        CellMask(self.0 | 1 << coord.index())
    }

    pub const fn contains(self, coord: Coord) -> bool {
        self.0 & (1 << coord.index()) != 0
    }

    pub const fn union(self, other: CellMask) -> CellMask {
        CellMask(self.0 | other.0)
    }

    pub const fn intersect(self, other: CellMask) -> CellMask {
        CellMask(self.0 & other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// The first `count` cells in row-major order
    pub const fn first(count: usize) -> CellMask {
        if count >= CELLS {
            CellMask::ALL
        } else {
            CellMask((1 << count) - 1)
        }
    }
}

impl From<[Coord; 3]> for CellMask {
    fn from(cells: [Coord; 3]) -> Self {
        cells
            .iter()
            .fold(CellMask::EMPTY, |mask, coord| mask.with(*coord))
    }
}

/// The eight lines that can win a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum WinLine {
    Column(u8),
    Row(u8),
    Diagonal,
    AntiDiagonal,
}

impl WinLine {
    /// Columns, then rows, then both diagonals. Decides which line is
    /// highlighted when one move completes two at once.
    pub const SCAN_ORDER: [WinLine; 8] = [
        WinLine::Column(0),
        WinLine::Column(1),
        WinLine::Column(2),
        WinLine::Row(0),
        WinLine::Row(1),
        WinLine::Row(2),
        WinLine::Diagonal,
        WinLine::AntiDiagonal,
    ];

    pub fn cells(self) -> [Coord; 3] {
        let at = |row: usize, col: usize| Coord {
            row: row as u8,
            col: col as u8,
        };
        match self {
            WinLine::Column(c) => [0, 1, 2].map(|r| at(r, c as usize)),
            WinLine::Row(r) => [0, 1, 2].map(|c| at(r as usize, c)),
            WinLine::Diagonal => [0, 1, 2].map(|i| at(i, i)),
            WinLine::AntiDiagonal => [0, 1, 2].map(|i| at(i, SIZE - 1 - i)),
        }
    }

    pub fn mask(self) -> CellMask {
        CellMask::from(self.cells())
    }
}

/// 3x3 grid of cells, row-major
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    pub const fn new() -> Self {
        Self {
            cells: [[Cell::Empty; SIZE]; SIZE],
        }
    }

    #[inline]
    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[coord.row as usize][coord.col as usize]
    }

    pub(crate) fn set(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.row as usize][coord.col as usize] = cell;
    }

    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// First complete line in `WinLine::SCAN_ORDER`
    pub fn winning_line(&self) -> Option<WinLine> {
        WinLine::SCAN_ORDER.into_iter().find(|line| {
            let [a, b, c] = line.cells().map(|coord| self.get(coord));
            !a.is_empty() && a == b && b == c
        })
    }

    /// Copy of the board with every cell in `hidden` shown as empty
    pub fn masked(&self, hidden: CellMask) -> Board {
        let mut frame = *self;
        for index in 0..CELLS {
            if let Some(coord) = Coord::from_index(index) {
                if hidden.contains(coord) {
                    frame.set(coord, Cell::Empty);
                }
            }
        }
        frame
    }

    /// The three cells of one column, top to bottom
    pub fn column(&self, col: usize) -> [Cell; SIZE] {
        [self.cells[0][col], self.cells[1][col], self.cells[2][col]]
    }
}
