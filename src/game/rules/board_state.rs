//! Board store: the client's locally mutable copy of the 64 squares
//!
//! The store is wholesale-replaced on every authoritative push from the
//! server and only patched locally for move previews (markers) and the
//! optimistic commit of the player's own move. Every mutation bumps
//! [`BoardStore::version`], so a render surface can detect change without
//! comparing boards.

use shared::protocol::{Color, Move, Piece, PieceKind, Square};

/// Number of squares on the board
pub const SQUARE_COUNT: usize = 64;

/// Occupant of a single square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Piece(Piece),
    /// Preview of a destination for the selected piece. Never sent to the server.
    Marker,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Cell::Marker)
    }

    pub fn piece(&self) -> Option<Piece> {
        match self {
            Cell::Piece(piece) => Some(*piece),
            _ => None,
        }
    }
}

impl From<Option<Piece>> for Cell {
    fn from(value: Option<Piece>) -> Self {
        value.map_or(Cell::Empty, Cell::Piece)
    }
}

/// Versioned 64-square board in absolute orientation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardStore {
    cells: [Cell; SQUARE_COUNT],
    version: u64,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoardStore {
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; SQUARE_COUNT],
            version: 0,
        }
    }

    /// Default starting arrangement, used until the server pushes a state
    ///
    /// Black occupies ranks 0-1 and White ranks 6-7, queens on file 3 and
    /// kings on file 4, which is the orientation the server starts from.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut cells = [Cell::Empty; SQUARE_COUNT];
        for (file, kind) in BACK_RANK.iter().enumerate() {
            cells[file] = Cell::Piece(Piece::new(Color::Black, *kind));
            cells[8 + file] = Cell::Piece(Piece::new(Color::Black, PieceKind::Pawn));
            cells[48 + file] = Cell::Piece(Piece::new(Color::White, PieceKind::Pawn));
            cells[56 + file] = Cell::Piece(Piece::new(Color::White, *kind));
        }

        Self { cells, version: 0 }
    }

    /// Callers only pass squares in 0..64.
    pub fn get(&self, square: Square) -> Cell {
        self.cells[square as usize]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_empty()
    }

    pub fn set(&mut self, square: Square, cell: Cell) {
        self.cells[square as usize] = cell;
        self.bump();
    }

    /// Drop everything (markers included) and install the given array,
    /// index `i` landing on square `i`.
    pub fn replace_all(&mut self, pieces: &[Option<Piece>; SQUARE_COUNT]) {
        for (cell, piece) in self.cells.iter_mut().zip(pieces.iter()) {
            *cell = Cell::from(*piece);
        }
        self.bump();
    }

    /// Remove every marker, leaving pieces and empty squares untouched.
    pub fn clear_markers(&mut self) {
        let mut removed = false;
        for cell in self.cells.iter_mut().filter(|cell| cell.is_marker()) {
            *cell = Cell::Empty;
            removed = true;
        }
        if removed {
            self.bump();
        }
    }

    /// Optimistically commit a move before the server confirms it.
    ///
    /// A move whose origin holds no piece only clears markers.
    pub fn apply_move(&mut self, mv: &Move) {
        let moving = self.get(mv.from).piece();
        for cell in self.cells.iter_mut().filter(|cell| cell.is_marker()) {
            *cell = Cell::Empty;
        }
        if let Some(piece) = moving {
            let landed = match mv.promotion {
                Some(kind) => Piece::new(piece.color, kind),
                None => piece,
            };
            self.cells[mv.from as usize] = Cell::Empty;
            self.cells[mv.to as usize] = Cell::Piece(landed);
        }
        self.bump();
    }

    /// Occupied squares in ascending order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.piece().map(|piece| (index as Square, piece)))
    }

    pub fn markers(&self) -> impl Iterator<Item = Square> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_marker())
            .map(|(index, _)| index as Square)
    }

    pub fn marker_count(&self) -> usize {
        self.markers().count()
    }

    /// Monotonic mutation counter
    pub fn version(&self) -> u64 {
        self.version
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
