use crate::{
    col::{Col, ColCursor},
    error::{Axis, MatrixError},
    matrix::ops::product,
    Matrix,
};
use core::ops::{AddAssign, Mul, SubAssign};
use log::debug;
use num_traits::Zero;

impl<T> Matrix<T> {
    fn check_index(&self, axis: Axis, index: usize) -> Result<(), MatrixError> {
        let len = match axis {
            Axis::Row => self.rows,
            Axis::Col => self.cols,
        };
        if index < len {
            return Ok(());
        }
        debug!("{axis} index {index} out of range for {}", self.shape());
        Err(MatrixError::IndexOutOfRange {
            axis,
            index,
            shape: self.shape(),
        })
    }

    fn check_same_shape(&self, op: &'static str, rhs: &Self) -> Result<(), MatrixError> {
        if self.shape() == rhs.shape() {
            return Ok(());
        }
        Err(self.mismatch(op, rhs))
    }

    fn check_chain(&self, rhs: &Self) -> Result<(), MatrixError> {
        if self.cols == rhs.rows {
            return Ok(());
        }
        Err(self.mismatch("multiply", rhs))
    }

    fn mismatch(&self, op: &'static str, rhs: &Self) -> MatrixError {
        debug!("cannot {op} {} and {}", self.shape(), rhs.shape());
        MatrixError::DimensionMismatch {
            op,
            lhs: self.shape(),
            rhs: rhs.shape(),
        }
    }

    pub fn try_at(&self, row: usize, col: usize) -> Result<&T, MatrixError> {
        self.check_index(Axis::Row, row)?;
        self.check_index(Axis::Col, col)?;
        Ok(self.at(row, col))
    }

    pub fn try_at_mut(&mut self, row: usize, col: usize) -> Result<&mut T, MatrixError> {
        self.check_index(Axis::Row, row)?;
        self.check_index(Axis::Col, col)?;
        Ok(self.at_mut(row, col))
    }

    pub fn try_row(&self, row: usize) -> Result<&[T], MatrixError> {
        self.check_index(Axis::Row, row)?;
        Ok(self.row(row))
    }

    pub fn try_row_mut(&mut self, row: usize) -> Result<&mut [T], MatrixError> {
        self.check_index(Axis::Row, row)?;
        Ok(self.row_mut(row))
    }

    pub fn try_col(&self, col: usize) -> Result<Col<'_, T>, MatrixError> {
        self.check_index(Axis::Col, col)?;
        Ok(self.col(col))
    }

    pub fn try_col_begin(&self, col: usize) -> Result<ColCursor<'_, T>, MatrixError> {
        self.check_index(Axis::Col, col)?;
        Ok(self.col_begin(col))
    }

    pub fn try_col_end(&self, col: usize) -> Result<ColCursor<'_, T>, MatrixError> {
        self.check_index(Axis::Col, col)?;
        Ok(self.col_end(col))
    }

    pub fn checked_add_assign(&mut self, rhs: &Self) -> Result<(), MatrixError>
    where
        for<'t> T: AddAssign<&'t T>,
    {
        self.check_same_shape("add", rhs)?;
        *self += rhs;
        Ok(())
    }

    pub fn checked_sub_assign(&mut self, rhs: &Self) -> Result<(), MatrixError>
    where
        for<'t> T: SubAssign<&'t T>,
    {
        self.check_same_shape("subtract", rhs)?;
        *self -= rhs;
        Ok(())
    }

    pub fn checked_mul_assign(&mut self, rhs: &Self) -> Result<(), MatrixError>
    where
        T: Zero + for<'t> AddAssign<&'t T>,
        for<'t> &'t T: Mul<&'t T, Output = T>,
    {
        self.check_chain(rhs)?;
        *self *= rhs;
        Ok(())
    }

    pub fn checked_add(&self, rhs: &Self) -> Result<Self, MatrixError>
    where
        T: Clone + for<'t> AddAssign<&'t T>,
    {
        self.check_same_shape("add", rhs)?;
        Ok(self + rhs)
    }

    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, MatrixError>
    where
        T: Clone + for<'t> SubAssign<&'t T>,
    {
        self.check_same_shape("subtract", rhs)?;
        Ok(self - rhs)
    }

    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, MatrixError>
    where
        T: Zero + for<'t> AddAssign<&'t T>,
        for<'t> &'t T: Mul<&'t T, Output = T>,
    {
        self.check_chain(rhs)?;
        Ok(product::<T>(self, rhs))
    }
}
