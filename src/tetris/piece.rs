use bevy::{math::IVec2, prelude::Color};
use lazy_static::lazy_static;
use rand::Rng;

/// Square 0/1 matrix, one rotation state of a piece.
pub type Shape = Vec<Vec<u8>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}
impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Value written into the board when this piece is merged.
    pub fn cell_value(&self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_cell(value: u8) -> Option<PieceKind> {
        match value {
            0 => None,
            v => PieceKind::ALL.get(v as usize - 1).copied(),
        }
    }

    pub fn definition(&self) -> &'static PieceDefinition {
        &CATALOG[self.index()]
    }

    pub fn color(&self) -> Color {
        self.definition().color
    }
}

pub struct PieceDefinition {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
}

lazy_static! {
    #[rustfmt::skip]
    static ref CATALOG: Vec<PieceDefinition> = vec![
        PieceDefinition {
            kind: PieceKind::I,
            shape: matrix(&[
                &[0, 0, 0, 0],
                &[1, 1, 1, 1],
                &[0, 0, 0, 0],
                &[0, 0, 0, 0],
            ]),
            color: Color::CYAN,
        },
        PieceDefinition {
            kind: PieceKind::J,
            shape: matrix(&[
                &[1, 0, 0],
                &[1, 1, 1],
                &[0, 0, 0],
            ]),
            color: Color::BLUE,
        },
        PieceDefinition {
            kind: PieceKind::L,
            shape: matrix(&[
                &[0, 0, 1],
                &[1, 1, 1],
                &[0, 0, 0],
            ]),
            color: Color::ORANGE,
        },
        PieceDefinition {
            kind: PieceKind::O,
            shape: matrix(&[
                &[1, 1],
                &[1, 1],
            ]),
            color: Color::YELLOW,
        },
        PieceDefinition {
            kind: PieceKind::S,
            shape: matrix(&[
                &[0, 1, 1],
                &[1, 1, 0],
                &[0, 0, 0],
            ]),
            color: Color::GREEN,
        },
        PieceDefinition {
            kind: PieceKind::T,
            shape: matrix(&[
                &[0, 1, 0],
                &[1, 1, 1],
                &[0, 0, 0],
            ]),
            color: Color::PURPLE,
        },
        PieceDefinition {
            kind: PieceKind::Z,
            shape: matrix(&[
                &[1, 1, 0],
                &[0, 1, 1],
                &[0, 0, 0],
            ]),
            color: Color::RED,
        },
    ];
}

fn matrix(rows: &[&[u8]]) -> Shape {
    rows.iter().map(|row| row.to_vec()).collect()
}

/// Rotates a square matrix 90 degrees clockwise.
pub fn rotate(shape: &Shape) -> Shape {
    let n = shape.len();
    let mut rotated = shape.clone();
    for y in 0..n {
        for x in 0..n {
            rotated[x][n - 1 - y] = shape[y][x];
        }
    }
    rotated
}

#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    // top-left corner of the shape matrix, y grows downward
    pub pos: IVec2,
}

impl Piece {
    pub fn new(kind: PieceKind, pos: IVec2) -> Piece {
        Piece {
            kind,
            shape: kind.definition().shape.clone(),
            pos,
        }
    }

    /// A piece of `kind` centered horizontally on a board `cols` wide, on the top row.
    pub fn spawn(kind: PieceKind, cols: usize) -> Piece {
        let width = kind.definition().shape[0].len() as i32;
        let x = (cols as i32 / 2) - (width + 1) / 2;
        Piece::new(kind, IVec2::new(x, 0))
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Swaps in a new rotation state, handing back the previous one.
    pub fn replace_shape(&mut self, shape: Shape) -> Shape {
        std::mem::replace(&mut self.shape, shape)
    }

    pub fn nudge(&mut self, by: IVec2) {
        self.pos += by;
    }

    /// Board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.shape.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &value)| value != 0)
                .map(move |(x, _)| self.pos + IVec2::new(x as i32, y as i32))
        })
    }
}

pub fn create_piece<R: Rng>(rng: &mut R, cols: usize) -> Piece {
    let kind = PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())];
    Piece::spawn(kind, cols)
}
