use crate::{ArrayIter, Bounds, Point, Scalar, utils::quadratic_roots};
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Rotated ellipse (oval)
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipse {
    /// `x` coordinate of the center
    pub center_x: Scalar,
    /// `y` coordinate of the center
    pub center_y: Scalar,
    /// radius along x-axis before the rotation
    pub radius_x: Scalar,
    /// radius along y-axis before the rotation
    pub radius_y: Scalar,
    /// counter-clockwise rotation in radians
    pub angle: Scalar,
}

impl fmt::Debug for Ellipse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ellipse center:{:?} radius:{:?} angle:{:.3?}",
            self.center(),
            Point([self.radius_x, self.radius_y]),
            self.angle,
        )
    }
}

impl Ellipse {
    pub fn new(
        center_x: Scalar,
        center_y: Scalar,
        radius_x: Scalar,
        radius_y: Scalar,
        angle: Scalar,
    ) -> Self {
        Self {
            center_x,
            center_y,
            radius_x,
            radius_y,
            angle,
        }
    }

    /// Axis aligned circle
    pub fn circle(center: impl Into<Point>, radius: Scalar) -> Self {
        let Point([x, y]) = center.into();
        Self::new(x, y, radius, radius, 0.0)
    }

    pub fn center(&self) -> Point {
        Point([self.center_x, self.center_y])
    }

    /// Ellipse with a zero radius along either axis covers no area
    pub fn is_degenerate(&self) -> bool {
        self.radius_x == 0.0 || self.radius_y == 0.0
    }

    /// Tight axis aligned bounding box of the rotated ellipse
    pub fn bounds(&self) -> Bounds {
        let (sin, cos) = self.angle.sin_cos();
        let dx = (cos * self.radius_x).hypot(sin * self.radius_y);
        let dy = (cos * self.radius_y).hypot(sin * self.radius_x);
        let Point([x, y]) = self.center();
        Bounds::new((x - dx, y - dy), (x + dx, y + dy))
    }

    /// Find `x` coordinates (in ascending order) where horizontal line `y` crosses the ellipse
    ///
    /// Substitutes the line into the implicit form of the rotated ellipse and
    /// solves the resulting quadratic equation. Tangent line yields single root.
    pub fn scanline_roots(&self, y: Scalar) -> ArrayIter<[Option<Scalar>; 2]> {
        let (sin, cos) = self.angle.sin_cos();
        let sin2 = sin * sin;
        let cos2 = cos * cos;
        let rx2 = self.radius_x * self.radius_x;
        let ry2 = self.radius_y * self.radius_y;
        let dy = y - self.center_y;

        let a = rx2 * sin2 + ry2 * cos2;
        let b = 2.0 * dy * sin * cos * (ry2 - rx2);
        let c = dy * dy * (rx2 * cos2 + ry2 * sin2) - rx2 * ry2;

        quadratic_roots(a, b, c)
            .map(|x| self.center_x + x)
            .collect()
    }

    /// Approximate signed distance from the point to the boundary
    ///
    /// Negative inside, positive outside. Distance is measured along the ray
    /// from the center, which is exact only for circles.
    pub fn signed_distance(&self, point: impl Into<Point>) -> Scalar {
        let Point([dx, dy]) = point.into() - self.center();
        if dx == 0.0 && dy == 0.0 {
            return -self.radius_x.min(self.radius_y);
        }
        let (sin, cos) = (self.angle - dy.atan2(dx)).sin_cos();
        let a2 = self.radius_x * self.radius_x;
        let b2 = self.radius_y * self.radius_y;
        let r2 = (a2 * b2) / (a2 * sin * sin + b2 * cos * cos);
        dx.hypot(dy) - r2.sqrt()
    }
}

/// Index of the first ellipse containing the point (boundary included)
pub fn hit_test(ellipses: &[Ellipse], point: impl Into<Point>) -> Option<usize> {
    let point = point.into();
    ellipses
        .iter()
        .position(|ellipse| !ellipse.is_degenerate() && ellipse.signed_distance(point) <= 0.0)
}
