//! Utility functions and types used across the library
use crate::Scalar;
use std::fmt;

/// Restrict value to a certain interval
#[inline]
pub fn clamp<T>(val: T, min: T, max: T) -> T
where
    T: PartialOrd,
{
    if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    }
}

/// Abstraction over arrays used by `ArrayIter`
pub trait Array {
    type Item;
    fn new() -> Self;
    fn at(&self, index: usize) -> Option<&Self::Item>;
    fn take(&mut self, index: usize) -> Option<Self::Item>;
    fn put(&mut self, index: usize, value: Self::Item) -> Option<Self::Item>;
}

impl<T: Copy> Array for [Option<T>; 2] {
    type Item = T;
    fn new() -> Self {
        [None; 2]
    }
    fn at(&self, index: usize) -> Option<&Self::Item> {
        self.get(index).and_then(|item| item.as_ref())
    }
    fn take(&mut self, index: usize) -> Option<Self::Item> {
        self[index].take()
    }
    fn put(&mut self, index: usize, value: Self::Item) -> Option<Self::Item> {
        self[index].replace(value)
    }
}

/// Fixed sized iterator
///
/// This type is similar to a smallvec but it never allocates and just panics
/// if you try to fit more data than its size.
#[derive(Clone, Copy)]
pub struct ArrayIter<A> {
    start: usize,
    end: usize,
    array: A,
}

impl<A> fmt::Debug for ArrayIter<A>
where
    A: Array,
    A::Item: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = fmt.debug_list();
        for index in self.start..self.end {
            if let Some(item) = self.array.at(index) {
                list.entry(item);
            }
        }
        list.finish()
    }
}

impl<A: Array> Default for ArrayIter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Array> ArrayIter<A> {
    pub fn new() -> Self {
        Self {
            start: 0,
            end: 0,
            array: A::new(),
        }
    }

    /// Push new element to the end of the iterator
    pub fn push(&mut self, item: A::Item) {
        self.array.put(self.end, item);
        self.end += 1;
    }

    /// Check if array iterator is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of uncosumed elements
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Unconsumed element at `index` (relative to the current position)
    pub fn get(&self, index: usize) -> Option<&A::Item> {
        if self.start + index < self.end {
            self.array.at(self.start + index)
        } else {
            None
        }
    }
}

impl<A> FromIterator<A::Item> for ArrayIter<A>
where
    A: Array,
    A::Item: Copy,
{
    fn from_iter<T: IntoIterator<Item = A::Item>>(iter: T) -> Self {
        let mut array = ArrayIter::<A>::new();
        for item in iter.into_iter() {
            array.push(item);
        }
        array
    }
}

impl<A: Array> Iterator for ArrayIter<A> {
    type Item = A::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            let item = self.array.take(self.start);
            self.start += 1;
            item
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.end - self.start;
        (size, Some(size))
    }
}

/// Roots of the quadratic equation `a * t ^ 2 + b * t + c = 0` in ascending order
///
/// Only a strictly positive discriminant yields two roots, exactly zero yields
/// one. Requires `a >= 0`, for `a == 0` nothing is returned.
pub(crate) fn quadratic_roots(a: Scalar, b: Scalar, c: Scalar) -> ArrayIter<[Option<Scalar>; 2]> {
    let mut result = ArrayIter::new();
    if a <= 0.0 {
        return result;
    }
    let disc = b * b - 4.0 * a * c;
    if disc > 0.0 {
        let sq = disc.sqrt();
        result.push((-sq - b) / (2.0 * a));
        result.push((sq - b) / (2.0 * a));
    } else if disc == 0.0 {
        result.push(b / (-2.0 * a));
    }
    result
}
