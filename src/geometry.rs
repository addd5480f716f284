use std::{fmt, ops::Sub};

pub type Scalar = f32;
pub const EPSILON: f32 = f32::EPSILON;
pub const PI: f32 = std::f32::consts::PI;

/// Format floats in a compact way
pub fn scalar_fmt(f: &mut fmt::Formatter<'_>, value: Scalar) -> fmt::Result {
    let value_abs = value.abs();
    if value_abs.fract() < EPSILON {
        write!(f, "{}", value.trunc() as i64)
    } else if value_abs > 9999.0 || value_abs <= 0.0001 {
        write!(f, "{:.3e}", value)
    } else {
        let ten: Scalar = 10.0;
        let round = ten.powi(6 - (value_abs.trunc() + 1.0).log10().ceil() as i32);
        write!(f, "{}", (value * round).round() / round)
    }
}

/// Value representing a 2D point or vector.
#[derive(Clone, Copy, PartialEq)]
pub struct Point(pub [Scalar; 2]);

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        scalar_fmt(f, *x)?;
        write!(f, ",")?;
        scalar_fmt(f, *y)?;
        Ok(())
    }
}

impl Point {
    #[inline]
    pub fn new(x: Scalar, y: Scalar) -> Self {
        Self([x, y])
    }
}

impl From<(Scalar, Scalar)> for Point {
    #[inline]
    fn from(xy: (Scalar, Scalar)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 - x1, y0 - y1])
    }
}

/// Determine if interval `a0..a1` overlaps with interval `b0..b1`
///
/// Empty or inverted `a` interval never overlaps anything.
#[inline]
pub fn intervals_intersect(a0: Scalar, a1: Scalar, b0: Scalar, b1: Scalar) -> bool {
    a0 < a1 && !(a1 < b0 || b1 < a0)
}

/// Bounding box with sides directed along the axes
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub left: Scalar,
    pub top: Scalar,
    pub right: Scalar,
    pub bottom: Scalar,
}

impl Bounds {
    /// Construct bounds which includes points `p0` and `p1`
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        let Point([x0, y0]) = p0.into();
        let Point([x1, y1]) = p1.into();
        Self {
            left: x0.min(x1),
            top: y0.min(y1),
            right: x0.max(x1),
            bottom: y0.max(y1),
        }
    }

    /// Width of the bounds
    #[inline]
    pub fn width(&self) -> Scalar {
        self.right - self.left
    }

    /// Height of the bounds
    #[inline]
    pub fn height(&self) -> Scalar {
        self.bottom - self.top
    }

    #[inline]
    pub fn area(&self) -> Scalar {
        self.width() * self.height()
    }

    /// Grow bounds in place so it would also contain `other`
    pub fn expand_to_include(&mut self, other: &Bounds) {
        self.left = self.left.min(other.left);
        self.top = self.top.min(other.top);
        self.right = self.right.max(other.right);
        self.bottom = self.bottom.max(other.bottom);
    }

    /// Create bounds the spans both bounds
    pub fn union(&self, other: &Bounds) -> Self {
        let mut result = *self;
        result.expand_to_include(other);
        result
    }

    /// Fraction of each box covered by the intersection of two boxes
    ///
    /// Returns `(cover_self, cover_other)` if the intersection has positive
    /// width and height.
    pub fn overlap(&self, other: &Bounds) -> Option<(Scalar, Scalar)> {
        let width = self.right.min(other.right) - self.left.max(other.left);
        let height = self.bottom.min(other.bottom) - self.top.max(other.top);
        if width > 0.0 && height > 0.0 {
            let area = width * height;
            Some((area / self.area(), area / other.area()))
        } else {
            None
        }
    }
}

impl fmt::Debug for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bounds x=")?;
        scalar_fmt(f, self.left)?;
        write!(f, ", y=")?;
        scalar_fmt(f, self.top)?;
        write!(f, ", w=")?;
        scalar_fmt(f, self.width())?;
        write!(f, ", h=")?;
        scalar_fmt(f, self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_expand_to_include() {
        let mut r0 = Bounds::new((10.0, 20.0), (30.0, 40.0));
        let r1 = Bounds::new((0.0, 10.0), (40.0, 50.0));
        r0.expand_to_include(&r1);
        assert_eq!(r0.left, 0.0);
        assert_eq!(r0.top, 10.0);
        assert_eq!(r0.right, 40.0);
        assert_eq!(r0.bottom, 50.0);

        let r2 = Bounds::new((45.0, 5.0), (41.0, 7.0));
        assert_eq!(r2.left, 41.0);
        let r3 = r0.union(&r2);
        assert_eq!(r3, Bounds::new((0.0, 5.0), (45.0, 50.0)));
        // union does not modify its arguments
        assert_eq!(r0.right, 40.0);
    }

    #[test]
    fn test_intervals_intersect() {
        // to the left, to the right
        assert!(!intervals_intersect(10.0, 20.0, 30.0, 31.0));
        assert!(!intervals_intersect(40.0, 50.0, 30.0, 31.0));
        // empty intervals
        assert!(!intervals_intersect(40.0, 40.0, 30.0, 31.0));
        assert!(!intervals_intersect(40.0, 39.0, 30.0, 31.0));

        assert!(intervals_intersect(10.0, 30.5, 30.0, 31.0));
        assert!(intervals_intersect(30.5, 40.0, 30.0, 31.0));
        assert!(intervals_intersect(10.0, 40.0, 30.0, 31.0));
        assert!(intervals_intersect(30.1, 30.9, 30.0, 31.0));
    }

    #[test]
    fn test_overlap() {
        let one = Bounds::new((10.0, 10.0), (20.0, 20.0));
        let two = Bounds::new((15.0, 15.0), (25.0, 25.0));
        let right = Bounds::new((30.0, 10.0), (40.0, 20.0));
        let below = Bounds::new((10.0, 30.0), (20.0, 40.0));
        let touching = Bounds::new((20.0, 10.0), (30.0, 20.0));
        let inner = Bounds::new((10.0, 15.0), (20.0, 20.0));

        let (c0, c1) = one.overlap(&two).unwrap();
        assert_approx_eq!(c0, 0.25);
        assert_approx_eq!(c1, 0.25);

        assert!(one.overlap(&right).is_none());
        assert!(one.overlap(&below).is_none());
        assert!(one.overlap(&touching).is_none());

        let (c0, c1) = one.overlap(&inner).unwrap();
        assert_approx_eq!(c0, 0.5);
        assert_approx_eq!(c1, 1.0);
    }

    #[test]
    fn test_point() {
        let p0 = Point::new(1.0, 2.0);
        let p1: Point = (4.0, 6.0).into();
        assert_eq!(p1 - p0, Point::new(3.0, 4.0));
        assert_eq!(format!("{:?}", Point::new(1.5, -3.0)), "1.5,-3");
    }
}
