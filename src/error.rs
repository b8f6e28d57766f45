use thiserror::Error;

/// Errors raised by the ray caster.
///
/// Construction errors (bad matrix shapes, singular transforms) and contract
/// violations (crossing or reflecting points) are reported here rather than
/// silently producing garbage that would corrupt shading downstream.
#[derive(Error, Debug)]
pub enum RayCasterError {
    #[error("a {rows}x{columns} matrix cannot hold {len} values")]
    MatrixDimension { rows: usize, columns: usize, len: usize },

    #[error("cannot multiply: left has {left_columns} columns, right has {right_rows} rows")]
    NonConformable { left_columns: usize, right_rows: usize },

    #[error("matrix of {rows}x{columns} is not square")]
    NotSquare { rows: usize, columns: usize },

    #[error("row {row}, column {col} is outside a {rows}x{columns} matrix")]
    IndexOutOfRange { row: usize, col: usize, rows: usize, columns: usize },

    #[error("matrix is not invertible")]
    NotInvertible,

    #[error("{operation} requires vector operands (w = 0)")]
    NotAVector { operation: &'static str },

    #[error("cannot normalize a zero-length tuple")]
    ZeroLength,

    #[error("pixel ({x}, {y}) is outside a {width}x{height} canvas")]
    PixelOutOfBounds { x: usize, y: usize, width: usize, height: usize },

    #[error("an image of {width}x{height} has no pixels")]
    EmptyImage { width: usize, height: usize },

    #[error("invalid scene: {0}")]
    Scene(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RayCasterError>;
