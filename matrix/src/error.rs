use crate::matrix::Shape;
use derive_more::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Axis {
    #[display(fmt = "row")]
    Row,
    #[display(fmt = "column")]
    Col,
}

/// Failures reported by the checked layer (`try_*` and `checked_*`).
///
/// The operators and plain accessors never produce these, they leave shape
/// compatibility to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("cannot {op} matrices of shape {lhs} and {rhs}")]
    DimensionMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },
    #[error("{axis} index {index} out of range for matrix of shape {shape}")]
    IndexOutOfRange {
        axis: Axis,
        index: usize,
        shape: Shape,
    },
    #[error("buffer of {len} elements does not fit shape {shape}")]
    LengthMismatch { shape: Shape, len: usize },
}

#[cfg(test)]
mod test {
    use crate::{Axis, MatrixError, Shape};

    #[test]
    fn display() {
        let err = MatrixError::DimensionMismatch {
            op: "multiply",
            lhs: Shape::new(2, 3),
            rhs: Shape::new(2, 3),
        };
        assert_eq!(err.to_string(), "cannot multiply matrices of shape 2x3 and 2x3");

        let err = MatrixError::IndexOutOfRange {
            axis: Axis::Col,
            index: 7,
            shape: Shape::new(4, 3),
        };
        assert_eq!(err.to_string(), "column index 7 out of range for matrix of shape 4x3");

        let err = MatrixError::LengthMismatch {
            shape: Shape::new(2, 2),
            len: 3,
        };
        assert_eq!(err.to_string(), "buffer of 3 elements does not fit shape 2x2");

        let err = MatrixError::LengthMismatch {
            shape: Shape::new(usize::MAX, 2),
            len: 0,
        };
        assert_eq!(
            err.to_string(),
            format!("buffer of 0 elements does not fit shape {}x2", usize::MAX)
        );
    }
}
