//! Analytic anti-aliasing of a single pixel
//!
//! Signed distance is sampled at the four corners of the pixel and the
//! pattern of inside (negative) corners selects one of the four closed form
//! coverage estimates. Corner layout used through out this module:
//!
//! ```text
//!    p0 --- p2
//!    |  p4   |
//!    p1 --- p3
//! ```
use crate::{Ellipse, Point, Scalar, clamp};

/// Single corner `p0` is inside, `p1` and `p2` are its outside neighbours
///
/// Right triangle cut from the corner of the pixel.
#[inline]
pub(crate) fn coverage_corner(p0: Scalar, p1: Scalar, p2: Scalar) -> Scalar {
    let s1 = p0 / (p0 - p1);
    let s2 = p0 / (p0 - p2);
    0.5 * s1 * s2
}

/// Adjacent corners `p0` and `p1` are inside, `p2` and `p3` are their outside
/// neighbours along the perpendicular edges.
#[inline]
pub(crate) fn coverage_side(p0: Scalar, p1: Scalar, p2: Scalar, p3: Scalar) -> Scalar {
    let s1 = p0 / (p0 - p2);
    let s2 = p1 / (p1 - p3);
    0.5 * (s1 + s2)
}

/// Diagonal corners `p1` and `p2` are inside, `p0` and `p3` are outside
///
/// Saddle is treated as two independent corner triangles.
#[inline]
pub(crate) fn coverage_saddle(p0: Scalar, p1: Scalar, p2: Scalar, p3: Scalar) -> Scalar {
    coverage_corner(p1, p3, p0) + coverage_corner(p2, p0, p3)
}

/// All corners are outside, center `p4` decides
///
/// Boundary can still bulge into the pixel without reaching any corner, in
/// which case coverage is estimated from the center to corner crossings.
#[inline]
pub(crate) fn coverage_center(
    p0: Scalar,
    p1: Scalar,
    p2: Scalar,
    p3: Scalar,
    p4: Scalar,
) -> Scalar {
    if p4 < 0.0 {
        let s0 = p4 / (p4 - p0);
        let s1 = p4 / (p4 - p1);
        let s2 = p4 / (p4 - p2);
        let s3 = p4 / (p4 - p3);
        let r = 0.25 * (s0 + s1 + s2 + s3);
        r * r
    } else {
        0.0
    }
}

/// Coverage of the pixel with top-left corner at `(x, y)` by the union of `ellipses`
///
/// Returns `0.0` for an empty list.
pub fn pixel_coverage<'a, I>(ellipses: I, x: Scalar, y: Scalar) -> Scalar
where
    I: IntoIterator<Item = &'a Ellipse>,
    I::IntoIter: Clone,
{
    let ellipses = ellipses.into_iter();
    let far = match ellipses.clone().last() {
        Some(last) => last.radius_x.hypot(last.radius_y),
        None => return 0.0,
    };
    // union of the ellipses is the minimum of their distances
    let sample = |point: Point| {
        ellipses
            .clone()
            .fold(far, |dist, ellipse| dist.min(ellipse.signed_distance(point)))
    };
    let p0 = sample(Point::new(x, y));
    let p1 = sample(Point::new(x, y + 1.0));
    let p2 = sample(Point::new(x + 1.0, y));
    let p3 = sample(Point::new(x + 1.0, y + 1.0));

    let mut which = 0x0;
    if p0 < 0.0 {
        which |= 0x1;
    }
    if p1 < 0.0 {
        which |= 0x2;
    }
    if p2 < 0.0 {
        which |= 0x4;
    }
    if p3 < 0.0 {
        which |= 0x8;
    }

    let value = match which {
        0x0 => {
            let p4 = sample(Point::new(x + 0.5, y + 0.5));
            coverage_center(p0, p1, p2, p3, p4)
        }
        0xF => {
            let p4 = sample(Point::new(x + 0.5, y + 0.5));
            1.0 - coverage_center(-p0, -p1, -p2, -p3, -p4)
        }
        0x1 => coverage_corner(p0, p1, p2),
        0x2 => coverage_corner(p1, p3, p0),
        0x4 => coverage_corner(p2, p0, p3),
        0x8 => coverage_corner(p3, p2, p1),
        0x3 => coverage_side(p0, p1, p2, p3),
        0x5 => coverage_side(p2, p0, p3, p1),
        0xA => coverage_side(p1, p3, p0, p2),
        0xC => coverage_side(p3, p2, p1, p0),
        0x6 => coverage_saddle(p0, p1, p2, p3),
        0x9 => coverage_saddle(p1, p3, p0, p2),
        0x7 => 1.0 - coverage_corner(-p3, -p2, -p1),
        0xB => 1.0 - coverage_corner(-p2, -p0, -p3),
        0xD => 1.0 - coverage_corner(-p1, -p3, -p0),
        _ => 1.0 - coverage_corner(-p0, -p1, -p2),
    };
    clamp(value, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_coverage_cases() {
        assert_approx_eq!(coverage_corner(-1.0, 0.0, 0.0), 0.5);
        assert_approx_eq!(coverage_corner(-1.0, 1.0, 1.0), 0.125);

        assert_approx_eq!(coverage_side(-1.0, -1.0, 0.0, 0.0), 1.0);
        assert_approx_eq!(coverage_side(-1.0, -1.0, 1.0, 1.0), 0.5);

        assert_approx_eq!(coverage_saddle(0.0, -1.0, -1.0, 0.0), 1.0);
        assert_approx_eq!(coverage_saddle(1.0, -1.0, -1.0, 1.0), 0.25);

        assert_approx_eq!(coverage_center(1.0, 1.0, 1.0, 1.0, 0.0), 0.0);
        assert_approx_eq!(coverage_center(1.0, 1.0, 1.0, 1.0, -1.0), 0.25);
        assert_approx_eq!(coverage_center(0.0, 0.0, 0.0, 0.0, -1.0), 1.0);
    }

    #[test]
    fn test_pixel_coverage_empty() {
        assert_eq!(pixel_coverage(&[], 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_pixel_coverage_half_plane() {
        // huge circle whose boundary is almost vertical line `x = 10.5`
        let big = Ellipse::circle((-10000.0 + 10.5, 5.5), 10000.0);
        assert_approx_eq!(pixel_coverage(&[big], 10.0, 5.0), 0.5, 1e-2);
        assert_approx_eq!(pixel_coverage(&[big], 9.0, 5.0), 1.0, 1e-2);
        assert_approx_eq!(pixel_coverage(&[big], 11.0, 5.0), 0.0, 1e-2);
    }

    #[test]
    fn test_pixel_coverage_corner() {
        // quarter of a circle centered at the pixel corner
        let circle = Ellipse::circle((1.0, 1.0), 0.5);
        let value = pixel_coverage(&[circle], 0.0, 0.0);
        assert!(value > 0.0 && value < 0.25, "{}", value);

        // fully inside pixel is reported as fully covered
        let circle = Ellipse::circle((0.5, 0.5), 10.0);
        assert_eq!(pixel_coverage(&[circle], 0.0, 0.0), 1.0);

        // small circle in the middle of the pixel touches no corners
        let circle = Ellipse::circle((0.5, 0.5), 0.25);
        let value = pixel_coverage(&[circle], 0.0, 0.0);
        assert!(value > 0.0 && value < 1.0, "{}", value);

        // union of two ellipses covers at least as much as each of them
        let left = Ellipse::circle((-0.5, 0.5), 1.0);
        let right = Ellipse::circle((1.5, 0.5), 1.0);
        let l = pixel_coverage(&[left], 0.0, 0.0);
        let r = pixel_coverage(&[right], 0.0, 0.0);
        let both = pixel_coverage(&[left, right], 0.0, 0.0);
        assert!(both >= l.max(r), "{} < max({}, {})", both, l, r);
    }
}
