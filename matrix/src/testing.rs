use crate::Matrix;
use core::ops::{AddAssign, Mul, MulAssign, SubAssign};
use derive_more::{Add, Display, From};
use num_traits::{One, Zero};

/// Numeric element that is not `Copy` and has a named field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Add, Display, From)]
#[display(fmt = "{}", value)]
pub struct Element {
    pub value: i64,
}

impl AddAssign<&Element> for Element {
    fn add_assign(&mut self, rhs: &Element) {
        self.value += rhs.value;
    }
}

impl SubAssign<&Element> for Element {
    fn sub_assign(&mut self, rhs: &Element) {
        self.value -= rhs.value;
    }
}

impl MulAssign<&Element> for Element {
    fn mul_assign(&mut self, rhs: &Element) {
        self.value *= rhs.value;
    }
}

impl Mul for Element {
    type Output = Element;

    fn mul(self, rhs: Element) -> Element {
        Element::from(self.value * rhs.value)
    }
}

impl Mul<&Element> for &Element {
    type Output = Element;

    fn mul(self, rhs: &Element) -> Element {
        Element::from(self.value * rhs.value)
    }
}

impl Zero for Element {
    fn zero() -> Self {
        Element::from(0)
    }

    fn is_zero(&self) -> bool {
        self.value == 0
    }
}

impl One for Element {
    fn one() -> Self {
        Element::from(1)
    }
}

pub fn elements<const R: usize, const C: usize>(values: [[i64; C]; R]) -> Matrix<Element> {
    Matrix::from(values).map(Element::from)
}
