mod col;
mod error;
mod matrix;

#[cfg(test)]
mod testing;

pub use col::{Col, ColCursor, ColCursorMut, ColMut};
pub use error::{Axis, MatrixError};
pub use matrix::{Matrix, Shape};
pub use num_traits::{One, Zero};
