use crate::Matrix;
use core::{
    borrow::Borrow,
    iter::{Product, Sum},
    ops::{AddAssign, Mul, MulAssign},
};
use itertools::iproduct;
use log::trace;
use num_traits::Zero;

impl<T> Matrix<T> {
    /// Applies `f` to `self(r, c)` and `rhs(r, c)` for every `(r, c)` in a
    /// `rows x cols` region. Offsets use each operand's own column count.
    pub(crate) fn zip_region(
        &mut self,
        rhs: &Self,
        rows: usize,
        cols: usize,
        mut f: impl FnMut(&mut T, &T),
    ) {
        iproduct!(0..rows, 0..cols)
            .for_each(|(row, col)| f(self.at_mut(row, col), rhs.at(row, col)));
    }

    pub(crate) fn scale(&mut self, factor: &T)
    where
        for<'t> T: MulAssign<&'t T>,
    {
        self.iter_mut().for_each(|value| *value *= factor);
    }
}

/// `lhs × rhs`, accumulating over `lhs.cols()`.
///
/// Always writes into a fresh buffer, so the result never aliases either
/// operand. `rhs` is read through its column cursors.
pub(crate) fn product<T>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Matrix<T>
where
    T: Zero + for<'t> AddAssign<&'t T>,
    for<'t> &'t T: Mul<&'t T, Output = T>,
{
    let mut out = Matrix::zeros(lhs.rows(), rhs.cols());
    for (i, out_row) in out.iter_rows_mut().enumerate() {
        let lhs_row = lhs.row(i);
        for (j, value) in out_row.iter_mut().enumerate() {
            let rhs_col = rhs.col_begin(j);
            lhs_row.iter().zip(0..).for_each(|(l, k)| *value += &(l * &rhs_col[k]));
        }
    }
    out
}

macro_rules! impl_region_op_assign {
    ($($trait:ident),* $(,)?) => {
        paste::paste! {
            $(
                impl<T> core::ops::$trait<&Matrix<T>> for Matrix<T>
                where
                    for<'t> T: core::ops::$trait<&'t T>,
                {
                    fn [<$trait:snake>](&mut self, rhs: &Matrix<T>) {
                        self.zip_region(rhs, rhs.rows(), rhs.cols(), |lhs, rhs| {
                            core::ops::$trait::[<$trait:snake>](lhs, rhs)
                        });
                    }
                }

                impl<T> core::ops::$trait<Matrix<T>> for Matrix<T>
                where
                    for<'t> T: core::ops::$trait<&'t T>,
                {
                    fn [<$trait:snake>](&mut self, rhs: Matrix<T>) {
                        core::ops::$trait::[<$trait:snake>](self, &rhs)
                    }
                }
            )*
        }
    };
}

macro_rules! impl_region_op {
    (@ impl<T> $trait:ident<$rhs:ty> for $lhs:ty; $assign:ident; $into_owned:expr; $($bound:tt)*) => {
        paste::paste! {
            impl<T> core::ops::$trait<$rhs> for $lhs
            where
                for<'t> T: core::ops::$assign<&'t T>,
                $($bound)*
            {
                type Output = Matrix<T>;

                fn [<$trait:lower>](self, rhs: $rhs) -> Matrix<T> {
                    let mut out: Matrix<T> = $into_owned(self);
                    let (rows, cols) = (out.rows(), out.cols());
                    out.zip_region(rhs.borrow(), rows, cols, |lhs, rhs| {
                        core::ops::$assign::[<$assign:snake>](lhs, rhs)
                    });
                    out
                }
            }
        }
    };
    ($(impl<T> $trait:ident for Matrix<T> via $assign:ident),* $(,)?) => {
        $(
            impl_region_op!(@ impl<T> $trait<Matrix<T>> for Matrix<T>; $assign; core::convert::identity;);
            impl_region_op!(@ impl<T> $trait<&Matrix<T>> for Matrix<T>; $assign; core::convert::identity;);
            impl_region_op!(@ impl<T> $trait<Matrix<T>> for &Matrix<T>; $assign; <_>::clone; T: Clone);
            impl_region_op!(@ impl<T> $trait<&Matrix<T>> for &Matrix<T>; $assign; <_>::clone; T: Clone);
        )*
    };
}

impl_region_op_assign!(AddAssign, SubAssign);
impl_region_op!(
    impl<T> Add for Matrix<T> via AddAssign,
    impl<T> Sub for Matrix<T> via SubAssign,
);

impl<T> MulAssign<&Matrix<T>> for Matrix<T>
where
    T: Zero + for<'t> AddAssign<&'t T>,
    for<'t> &'t T: Mul<&'t T, Output = T>,
{
    fn mul_assign(&mut self, rhs: &Matrix<T>) {
        let out = product::<T>(self, rhs);
        trace!(
            "replacing {} buffer with {} product",
            self.shape(),
            out.shape()
        );
        *self = out;
    }
}

impl<T> MulAssign<Matrix<T>> for Matrix<T>
where
    T: Zero + for<'t> AddAssign<&'t T>,
    for<'t> &'t T: Mul<&'t T, Output = T>,
{
    fn mul_assign(&mut self, rhs: Matrix<T>) {
        *self *= &rhs;
    }
}

macro_rules! impl_product {
    ($(impl<T> Mul<$rhs:ty> for $lhs:ty),* $(,)?) => {
        $(
            impl<T> Mul<$rhs> for $lhs
            where
                T: Zero + for<'t> AddAssign<&'t T>,
                for<'t> &'t T: Mul<&'t T, Output = T>,
            {
                type Output = Matrix<T>;

                fn mul(self, rhs: $rhs) -> Matrix<T> {
                    product::<T>(self.borrow(), rhs.borrow())
                }
            }
        )*
    };
}

impl_product!(
    impl<T> Mul<Matrix<T>> for Matrix<T>,
    impl<T> Mul<&Matrix<T>> for Matrix<T>,
    impl<T> Mul<Matrix<T>> for &Matrix<T>,
    impl<T> Mul<&Matrix<T>> for &Matrix<T>,
);

impl<T> MulAssign<T> for Matrix<T>
where
    for<'t> T: MulAssign<&'t T>,
{
    fn mul_assign(&mut self, factor: T) {
        self.scale(&factor);
    }
}

impl<T> MulAssign<&T> for Matrix<T>
where
    for<'t> T: MulAssign<&'t T>,
{
    fn mul_assign(&mut self, factor: &T) {
        self.scale(factor);
    }
}

macro_rules! impl_scale {
    (@ impl<T> Mul<$rhs:ty> for $lhs:ty; $into_owned:expr; $($bound:tt)*) => {
        impl<T> Mul<$rhs> for $lhs
        where
            for<'t> T: MulAssign<&'t T>,
            $($bound)*
        {
            type Output = Matrix<T>;

            fn mul(self, factor: $rhs) -> Matrix<T> {
                let mut out: Matrix<T> = $into_owned(self);
                out.scale(factor.borrow());
                out
            }
        }
    };
    ($(impl<T> Mul<$rhs:ty> for Matrix<T>),* $(,)?) => {
        $(
            impl_scale!(@ impl<T> Mul<$rhs> for Matrix<T>; core::convert::identity;);
            impl_scale!(@ impl<T> Mul<&$rhs> for Matrix<T>; core::convert::identity;);
            impl_scale!(@ impl<T> Mul<$rhs> for &Matrix<T>; <_>::clone; T: Clone);
            impl_scale!(@ impl<T> Mul<&$rhs> for &Matrix<T>; <_>::clone; T: Clone);
        )*
    };
}

impl_scale!(impl<T> Mul<T> for Matrix<T>);

macro_rules! impl_scalar_mul_matrix {
    ($($scalar:ty),* $(,)?) => {
        $(
            impl Mul<Matrix<$scalar>> for $scalar {
                type Output = Matrix<$scalar>;

                fn mul(self, rhs: Matrix<$scalar>) -> Matrix<$scalar> {
                    rhs * self
                }
            }

            impl Mul<&Matrix<$scalar>> for $scalar {
                type Output = Matrix<$scalar>;

                fn mul(self, rhs: &Matrix<$scalar>) -> Matrix<$scalar> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_mul_matrix!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T, Item> Sum<Item> for Matrix<T>
where
    T: Clone + for<'t> AddAssign<&'t T>,
    Item: Borrow<Matrix<T>>,
{
    fn sum<I: Iterator<Item = Item>>(mut iter: I) -> Self {
        let Some(init) = iter.next() else {
            return Matrix::empty();
        };
        iter.fold(init.borrow().clone(), |mut acc, item| {
            acc += item.borrow();
            acc
        })
    }
}

impl<T, Item> Product<Item> for Matrix<T>
where
    T: Clone + Zero + for<'t> AddAssign<&'t T>,
    for<'t> &'t T: Mul<&'t T, Output = T>,
    Item: Borrow<Matrix<T>>,
{
    fn product<I: Iterator<Item = Item>>(mut iter: I) -> Self {
        let Some(init) = iter.next() else {
            return Matrix::empty();
        };
        iter.fold(init.borrow().clone(), |mut acc, item| {
            acc *= item.borrow();
            acc
        })
    }
}
