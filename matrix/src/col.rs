use core::{
    cmp::Ordering,
    fmt::{self, Debug, Formatter},
    iter::{FusedIterator, Skip, StepBy, Take},
    ops::{Add, AddAssign, Deref, DerefMut, Index, IndexMut, Sub, SubAssign},
    ptr, slice,
};

fn buffer_index(pos: isize, n: isize, stride: usize) -> usize {
    let pos = pos + n * stride as isize;
    assert!(pos >= 0, "column cursor is {} elements before its buffer", -pos);
    pos as usize
}

fn distance(lhs: isize, rhs: isize, stride: usize) -> isize {
    if stride == 0 {
        0
    } else {
        (lhs - rhs) / stride as isize
    }
}

/// Read-only random-access cursor over one column.
///
/// Two cursors are equal when they point at the same position of the same
/// buffer; the stride is not compared. Dereferencing a cursor that has moved
/// outside the buffer panics.
pub struct ColCursor<'a, T> {
    data: &'a [T],
    pos: isize,
    stride: usize,
}

impl<'a, T> ColCursor<'a, T> {
    pub(crate) fn new(data: &'a [T], pos: isize, stride: usize) -> Self {
        Self { data, pos, stride }
    }

    pub fn position(&self) -> isize {
        self.pos
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn get(&self) -> &'a T {
        self.nth(0)
    }

    fn nth(&self, n: isize) -> &'a T {
        let data: &'a [T] = self.data;
        &data[buffer_index(self.pos, n, self.stride)]
    }

    fn advance(&mut self, n: isize) {
        self.pos += n * self.stride as isize;
    }

    fn same_buffer(&self, data: *const T) -> bool {
        ptr::eq(self.data.as_ptr(), data)
    }
}

impl<T> Clone for ColCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ColCursor<'_, T> {}

impl<T> Default for ColCursor<'_, T> {
    fn default() -> Self {
        Self::new(&[], 0, 0)
    }
}

impl<T> Debug for ColCursor<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColCursor")
            .field("position", &self.pos)
            .field("stride", &self.stride)
            .finish()
    }
}

impl<T> PartialEq for ColCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_buffer(other.data.as_ptr()) && self.pos == other.pos
    }
}

impl<T> Eq for ColCursor<'_, T> {}

impl<T> PartialOrd for ColCursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.same_buffer(other.data.as_ptr())
            .then(|| self.pos.cmp(&other.pos))
    }
}

impl<T> Deref for ColCursor<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> Index<isize> for ColCursor<'_, T> {
    type Output = T;

    fn index(&self, n: isize) -> &T {
        self.nth(n)
    }
}

impl<'a, T> Sub for ColCursor<'a, T> {
    type Output = isize;

    fn sub(self, rhs: Self) -> isize {
        distance(self.pos, rhs.pos, self.stride)
    }
}

pub struct ColCursorMut<'a, T> {
    data: &'a mut [T],
    pos: isize,
    stride: usize,
}

impl<'a, T> ColCursorMut<'a, T> {
    pub(crate) fn new(data: &'a mut [T], pos: isize, stride: usize) -> Self {
        Self { data, pos, stride }
    }

    pub fn position(&self) -> isize {
        self.pos
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn get(&self) -> &T {
        &self.data[buffer_index(self.pos, 0, self.stride)]
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.data[buffer_index(self.pos, 0, self.stride)]
    }

    pub fn into_mut(self) -> &'a mut T {
        let Self { data, pos, stride } = self;
        &mut data[buffer_index(pos, 0, stride)]
    }

    pub fn as_const(&self) -> ColCursor<'_, T> {
        ColCursor::new(&*self.data, self.pos, self.stride)
    }

    pub fn reborrow(&mut self) -> ColCursorMut<'_, T> {
        ColCursorMut::new(&mut *self.data, self.pos, self.stride)
    }

    fn advance(&mut self, n: isize) {
        self.pos += n * self.stride as isize;
    }
}

impl<'a, T> From<ColCursorMut<'a, T>> for ColCursor<'a, T> {
    fn from(cursor: ColCursorMut<'a, T>) -> Self {
        ColCursor::new(cursor.data, cursor.pos, cursor.stride)
    }
}

impl<T> Debug for ColCursorMut<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColCursorMut")
            .field("position", &self.pos)
            .field("stride", &self.stride)
            .finish()
    }
}

impl<T> PartialEq for ColCursorMut<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_const() == other.as_const()
    }
}

impl<T> PartialEq<ColCursor<'_, T>> for ColCursorMut<'_, T> {
    fn eq(&self, other: &ColCursor<'_, T>) -> bool {
        self.as_const() == *other
    }
}

impl<T> PartialEq<ColCursorMut<'_, T>> for ColCursor<'_, T> {
    fn eq(&self, other: &ColCursorMut<'_, T>) -> bool {
        *self == other.as_const()
    }
}

impl<T> Deref for ColCursorMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> DerefMut for ColCursorMut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T> Index<isize> for ColCursorMut<'_, T> {
    type Output = T;

    fn index(&self, n: isize) -> &T {
        &self.data[buffer_index(self.pos, n, self.stride)]
    }
}

impl<T> IndexMut<isize> for ColCursorMut<'_, T> {
    fn index_mut(&mut self, n: isize) -> &mut T {
        &mut self.data[buffer_index(self.pos, n, self.stride)]
    }
}

macro_rules! impl_offset_ops {
    ($cursor:ident; $($offset:ty),* $(,)?) => {
        $(
            impl<T> AddAssign<$offset> for $cursor<'_, T> {
                fn add_assign(&mut self, n: $offset) {
                    self.advance(n as isize)
                }
            }

            impl<T> SubAssign<$offset> for $cursor<'_, T> {
                fn sub_assign(&mut self, n: $offset) {
                    self.advance(-(n as isize))
                }
            }

            impl<'a, T> Add<$offset> for $cursor<'a, T> {
                type Output = $cursor<'a, T>;

                fn add(mut self, n: $offset) -> Self::Output {
                    self += n;
                    self
                }
            }

            impl<'a, T> Sub<$offset> for $cursor<'a, T> {
                type Output = $cursor<'a, T>;

                fn sub(mut self, n: $offset) -> Self::Output {
                    self -= n;
                    self
                }
            }

            impl<'a, T> Add<$cursor<'a, T>> for $offset {
                type Output = $cursor<'a, T>;

                fn add(self, cursor: $cursor<'a, T>) -> Self::Output {
                    cursor + self
                }
            }
        )*
    };
}

impl_offset_ops!(ColCursor; i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_offset_ops!(ColCursorMut; i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

pub struct Col<'a, T> {
    front: ColCursor<'a, T>,
    back: ColCursor<'a, T>,
}

impl<'a, T> Col<'a, T> {
    pub fn new(begin: ColCursor<'a, T>, end: ColCursor<'a, T>) -> Self {
        Self {
            front: begin,
            back: end,
        }
    }

    pub fn begin(&self) -> ColCursor<'a, T> {
        self.front
    }

    pub fn end(&self) -> ColCursor<'a, T> {
        self.back
    }

    fn remaining(&self) -> usize {
        usize::try_from(self.back - self.front).unwrap_or(0)
    }
}

impl<T> Clone for Col<'_, T> {
    fn clone(&self) -> Self {
        Self::new(self.front, self.back)
    }
}

impl<T> Debug for Col<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Col")
            .field("begin", &self.front)
            .field("end", &self.back)
            .finish()
    }
}

impl<'a, T> Iterator for Col<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining() == 0 {
            return None;
        }
        let item = self.front.get();
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining();
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.remaining() {
            self.front = self.back;
            return None;
        }
        self.front += n;
        self.next()
    }
}

impl<'a, T> DoubleEndedIterator for Col<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining() == 0 {
            return None;
        }
        self.back -= 1;
        Some(self.back.get())
    }
}

impl<T> ExactSizeIterator for Col<'_, T> {}

impl<T> FusedIterator for Col<'_, T> {}

/// Mutable counterpart of [`Col`]. Yields `rows` elements and panics on the
/// first one that falls outside the buffer, as dereferencing a cursor would.
#[derive(Debug)]
pub struct ColMut<'a, T> {
    inner: Take<StepBy<Skip<slice::IterMut<'a, T>>>>,
    remaining: usize,
}

impl<'a, T> ColMut<'a, T> {
    pub(crate) fn new(data: &'a mut [T], col: usize, stride: usize, rows: usize) -> Self {
        let inner = data.iter_mut().skip(col).step_by(stride.max(1)).take(rows);
        Self {
            inner,
            remaining: rows,
        }
    }

    // Elements missing from `inner` are always the trailing ones.
    fn past_buffer(&self) -> bool {
        self.inner.len() < self.remaining
    }
}

impl<'a, T> Iterator for ColMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let item = self.inner.next();
        assert!(item.is_some(), "column cursor is past its buffer");
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for ColMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        assert!(!self.past_buffer(), "column cursor is past its buffer");
        self.remaining -= 1;
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for ColMut<'_, T> {}
