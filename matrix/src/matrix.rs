use crate::{
    col::{Col, ColCursor, ColCursorMut, ColMut},
    error::MatrixError,
};
use core::{
    fmt::{self, Display, Formatter},
    iter::repeat_with,
    ops::{Index, IndexMut},
    slice,
};
use derive_more::Display;
use itertools::Itertools;
use log::{debug, trace};
use num_traits::{One, Zero};
use rand::{distributions::Distribution, RngCore};
use std::vec;

mod checked;
mod ops;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}x{}", rows, cols)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn normalize(self) -> Self {
        if self.rows == 0 || self.cols == 0 {
            Self::new(0, 0)
        } else {
            self
        }
    }

    pub fn size(&self) -> usize {
        self.rows
            .checked_mul(self.cols)
            .unwrap_or_else(|| panic!("matrix of shape {self} overflows usize"))
    }
}

/// Dense row-major matrix. Accessors and operators do not validate shapes or
/// per-axis indices; the `try_*` and `checked_*` methods do.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        }
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let shape = Shape::new(rows, cols).normalize();
        let data = (0..shape.size())
            .map(|i| f(i / shape.cols, i % shape.cols))
            .collect();
        Self::from_parts(shape, data)
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, MatrixError> {
        let shape = Shape::new(rows, cols);
        if rows.checked_mul(cols) != Some(data.len()) {
            debug!("rejecting buffer of {} elements for shape {shape}", data.len());
            return Err(MatrixError::LengthMismatch {
                shape,
                len: data.len(),
            });
        }
        Ok(Self::from_parts(shape.normalize(), data))
    }

    pub fn sample(
        rows: usize,
        cols: usize,
        dist: impl Distribution<T>,
        rng: &mut impl RngCore,
    ) -> Self {
        let shape = Shape::new(rows, cols).normalize();
        let data = repeat_with(|| dist.sample(rng)).take(shape.size()).collect();
        Self::from_parts(shape, data)
    }

    fn from_parts(shape: Shape, data: Vec<T>) -> Self {
        debug_assert_eq!(shape.size(), data.len());
        Self {
            rows: shape.rows,
            cols: shape.cols,
            data,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub(crate) fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Element at linear offset `row * cols + col`.
    ///
    /// Neither axis is checked on its own, so a column past the end of a
    /// row reads from the following row. Panics only past the buffer.
    pub fn at(&self, row: usize, col: usize) -> &T {
        &self.data[self.offset(row, col)]
    }

    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut T {
        let offset = self.offset(row, col);
        &mut self.data[offset]
    }

    /// # Safety
    ///
    /// `row * cols + col` must be less than [`Matrix::size`].
    pub unsafe fn at_unchecked(&self, row: usize, col: usize) -> &T {
        self.data.get_unchecked(self.offset(row, col))
    }

    /// # Safety
    ///
    /// `row * cols + col` must be less than [`Matrix::size`].
    pub unsafe fn at_unchecked_mut(&mut self, row: usize, col: usize) -> &mut T {
        let offset = self.offset(row, col);
        self.data.get_unchecked_mut(offset)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.into_iter().map(f).collect(),
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn row(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        let start = self.offset(row, 0);
        &mut self.data[start..start + self.cols]
    }

    pub fn iter_rows(&self) -> slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.cols.max(1))
    }

    pub fn iter_rows_mut(&mut self) -> slice::ChunksExactMut<'_, T> {
        self.data.chunks_exact_mut(self.cols.max(1))
    }

    pub fn col_begin(&self, col: usize) -> ColCursor<'_, T> {
        ColCursor::new(&self.data, col as isize, self.cols)
    }

    pub fn col_end(&self, col: usize) -> ColCursor<'_, T> {
        ColCursor::new(&self.data, (col + self.data.len()) as isize, self.cols)
    }

    pub fn col_begin_mut(&mut self, col: usize) -> ColCursorMut<'_, T> {
        ColCursorMut::new(&mut self.data, col as isize, self.cols)
    }

    pub fn col_end_mut(&mut self, col: usize) -> ColCursorMut<'_, T> {
        let pos = (col + self.data.len()) as isize;
        ColCursorMut::new(&mut self.data, pos, self.cols)
    }

    pub fn col(&self, col: usize) -> Col<'_, T> {
        Col::new(self.col_begin(col), self.col_end(col))
    }

    pub fn col_mut(&mut self, col: usize) -> ColMut<'_, T> {
        ColMut::new(&mut self.data, col, self.cols, self.rows)
    }

    pub fn iter_cols(&self) -> impl ExactSizeIterator<Item = Col<'_, T>> + '_ {
        (0..self.cols).map(|col| self.col(col))
    }
}

impl<T: Default> Matrix<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        let shape = Shape::new(rows, cols).normalize();
        let data = repeat_with(T::default).take(shape.size()).collect();
        Self::from_parts(shape, data)
    }
}

impl<T: Zero> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let shape = Shape::new(rows, cols).normalize();
        let data = repeat_with(T::zero).take(shape.size()).collect();
        Self::from_parts(shape, data)
    }
}

impl<T: Zero + One> Matrix<T> {
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |row, col| if row == col { T::one() } else { T::zero() })
    }
}

impl<T: Clone + PartialEq> Matrix<T> {
    pub fn assign(&mut self, other: &Self) {
        if self == other {
            trace!("assign of equal {} matrix skipped", self.shape());
            return;
        }
        self.rows = other.rows;
        self.cols = other.cols;
        self.data.clone_from(&other.data);
    }
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T> {
    fn from(rows: [[T; C]; R]) -> Self {
        let shape = Shape::new(R, C).normalize();
        if shape.size() == 0 {
            return Self::empty();
        }
        Self::from_parts(shape, rows.into_iter().flatten().collect())
    }
}

impl<T: Clone, const R: usize, const C: usize> From<&[[T; C]; R]> for Matrix<T> {
    fn from(rows: &[[T; C]; R]) -> Self {
        let shape = Shape::new(R, C).normalize();
        if shape.size() == 0 {
            return Self::empty();
        }
        Self::from_parts(shape, rows.iter().flatten().cloned().collect())
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        self.at(row, col)
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        self.at_mut(row, col)
    }
}

impl<T> AsRef<[T]> for Matrix<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T> AsMut<[T]> for Matrix<T> {
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Display> Display for Matrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.iter_rows()
            .try_for_each(|row| writeln!(f, "{}", row.iter().join("  ")))
    }
}

impl<T> IntoIterator for Matrix<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Matrix<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Matrix<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

#[cfg(test)]
mod test {
    use crate::{testing::elements, Matrix, MatrixError, Shape};
    use itertools::Itertools;
    use rand::{distributions::Uniform, thread_rng};

    #[test]
    fn new_keeps_positive_dimensions() {
        for (rows, cols) in (1..5).cartesian_product(1..5) {
            let m = Matrix::<i64>::new(rows, cols);
            assert_eq!(m.rows(), rows);
            assert_eq!(m.cols(), cols);
            assert_eq!(m.size(), rows * cols);
            assert!(!m.is_empty());
            assert!(m.iter().all(|v| *v == 0));
        }
    }

    #[test]
    fn zero_dimension_normalizes_to_empty() {
        for (rows, cols) in [(0, 3), (3, 0), (0, 0)] {
            let m = Matrix::<i64>::new(rows, cols);
            assert_eq!(m.shape(), Shape::new(0, 0));
            assert!(m.is_empty());
            assert!(m.data().is_empty());
            assert_eq!(m, Matrix::empty());
        }
        assert_eq!(Matrix::<i64>::zeros(0, 7), Matrix::default());
        assert_eq!(Matrix::from_fn(5, 0, |_, _| 1), Matrix::<i64>::empty());
        assert_eq!(Matrix::from([[0i64; 0]; 3]), Matrix::empty());
        assert_eq!(Matrix::from_vec(0, 4, Vec::<i64>::new()), Ok(Matrix::empty()));
    }

    #[test]
    fn from_literal_is_row_major() {
        let m = Matrix::from([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.shape(), Shape::new(2, 3));
        assert_eq!(m.data(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(m[(1, 0)], 4);
        assert_eq!(Matrix::from(&[[1, 2, 3], [4, 5, 6]]), m);
        assert_eq!(Matrix::from_fn(2, 3, |row, col| 3 * row + col + 1), m);
    }

    #[test]
    fn from_vec_checks_length() {
        assert_eq!(
            Matrix::from_vec(2, 2, vec![1, 2, 3]),
            Err(MatrixError::LengthMismatch {
                shape: Shape::new(2, 2),
                len: 3
            })
        );
        assert_eq!(
            Matrix::<i64>::from_vec(usize::MAX, 2, vec![]),
            Err(MatrixError::LengthMismatch {
                shape: Shape::new(usize::MAX, 2),
                len: 0
            })
        );
        let m = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(m, Matrix::from([[1, 2], [3, 4]]));
        assert_eq!(m.into_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn clone_is_deep() {
        let m = elements([[1, 2], [3, 4], [5, 6]]);
        let mut copy = m.clone();
        assert_eq!(copy, m);
        copy.at_mut(2, 1).value = 42;
        assert_ne!(copy, m);
        assert_eq!(m.at(2, 1).value, 6);
    }

    #[test]
    fn assign() {
        let src = elements([[1, 2, 3], [4, 5, 6]]);
        let mut dst = elements([[9]]);
        dst.assign(&src);
        assert_eq!(dst, src);
        dst.assign(&src);
        assert_eq!(dst, src);
        dst.assign(&Matrix::empty());
        assert!(dst.is_empty());
        assert!(dst.data().is_empty());
    }

    #[test]
    fn equality() {
        let a = Matrix::from([[1, 2], [3, 4]]);
        let b = Matrix::from([[1, 2], [3, 4]]);
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_ne!(a, Matrix::from([[1, 2], [3, 5]]));
        // Same elements, different shapes.
        assert_ne!(a, Matrix::from([[1, 2, 3, 4]]));
        assert_ne!(Matrix::from([[1, 2, 3, 4]]), a);
        assert_ne!(a, Matrix::from([[1], [2], [3], [4]]));
    }

    #[test]
    fn unchecked_access_uses_linear_offset() {
        let mut m = Matrix::from([[1, 2, 3], [4, 5, 6]]);
        // Column 3 of row 0 is column 0 of row 1.
        assert_eq!(*m.at(0, 3), 4);
        assert_eq!(unsafe { *m.at_unchecked(1, 2) }, 6);
        unsafe { *m.at_unchecked_mut(0, 1) = 20 };
        m[(1, 1)] = 50;
        assert_eq!(m, Matrix::from([[1, 20, 3], [4, 50, 6]]));
    }

    #[test]
    #[should_panic]
    fn access_past_buffer_panics() {
        let m = Matrix::from([[1, 2], [3, 4]]);
        m.at(2, 0);
    }

    #[test]
    fn linear_iteration_is_row_major() {
        let mut rng = thread_rng();
        for (rows, cols) in (1..6).cartesian_product(1..6) {
            let m = Matrix::sample(rows, cols, Uniform::new(-100i64, 100), &mut rng);
            assert_eq!(m.iter().count(), rows * cols);
            for (i, v) in m.iter().enumerate() {
                assert_eq!(v, m.at(i / cols, i % cols));
            }
        }
    }

    #[test]
    fn rows() {
        let mut m = Matrix::from([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.row(0), &[1, 2, 3]);
        assert_eq!(m.row(1), &[4, 5, 6]);
        m.row_mut(1).iter_mut().for_each(|v| *v *= 10);
        assert_eq!(m.iter_rows().collect_vec(), [&[1, 2, 3][..], &[40, 50, 60][..]]);
        m.iter_rows_mut().for_each(|row| row.reverse());
        assert_eq!(m, Matrix::from([[3, 2, 1], [60, 50, 40]]));
        assert_eq!(Matrix::<i64>::empty().iter_rows().count(), 0);
    }

    #[test]
    fn columns() {
        let mut m: Matrix<i64> = Matrix::from([[1, 2, 3], [4, 5, 6], [11, 12, 13], [14, 15, 16]]);
        assert_eq!(m.col(1).copied().collect_vec(), [2, 5, 12, 15]);
        assert_eq!(m.col(2).rev().copied().collect_vec(), [16, 13, 6, 3]);
        assert_eq!(
            m.iter_cols().map(|col| col.sum::<i64>()).collect_vec(),
            [30, 34, 38]
        );
        m.col_mut(0).for_each(|v| *v = 0);
        assert_eq!(m.col(0).copied().collect_vec(), [0, 0, 0, 0]);
        assert_eq!(Matrix::<i64>::empty().col(0).count(), 0);
        assert_eq!(Matrix::<i64>::empty().col_mut(0).count(), 0);
    }

    #[test]
    fn identity() {
        assert_eq!(Matrix::<i64>::identity(3), Matrix::from([[1, 0, 0], [0, 1, 0], [0, 0, 1]]));
        assert!(Matrix::<i64>::identity(0).is_empty());
    }

    #[test]
    fn display() {
        let m = Matrix::from([[1, 2], [3, 4]]);
        assert_eq!(m.to_string(), "1  2\n3  4\n");
        assert_eq!(Matrix::<i64>::empty().to_string(), "");
    }

    #[test]
    fn map_and_into_iter() {
        let m = Matrix::from([[1, 2], [3, 4]]).map(|v| v * 2);
        assert_eq!((&m).into_iter().copied().collect_vec(), [2, 4, 6, 8]);
        assert_eq!(m.into_iter().collect_vec(), [2, 4, 6, 8]);
    }
}
