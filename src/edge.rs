//! Per scanline boundary edges of a set of ellipses
use crate::{ArrayIter, Bounds, Ellipse, Scalar, intervals_intersect};

/// Which side of an ellipse the edge belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeKind {
    /// Left boundary, interior starts here
    Falling,
    /// Right boundary, interior ends here
    Rising,
}

/// Range of columns crossed by one side of an ellipse within a single band
///
/// `ellipse` is an index into the ellipse list the edge was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edge {
    pub start: i32,
    pub end: i32,
    pub kind: EdgeKind,
    pub ellipse: usize,
}

impl Edge {
    /// Edge covering all pixels touched by the `x0..x1` range (in any order)
    pub fn span(x0: Scalar, x1: Scalar, kind: EdgeKind, ellipse: usize) -> Self {
        let (x0, x1) = if x0 < x1 { (x0, x1) } else { (x1, x0) };
        Self {
            start: x0.floor() as i32,
            end: x1.ceil() as i32,
            kind,
            ellipse,
        }
    }
}

/// Produces edges for every band `[y, y + 1)` intersected by the ellipses
pub(crate) struct EdgeBuilder<'a> {
    ellipses: Vec<&'a Ellipse>,
    bounds: Vec<Bounds>,
    union: Bounds,
}

impl<'a> EdgeBuilder<'a> {
    /// Create builder, degenerate ellipses are dropped
    ///
    /// Returns `None` if no ellipse covers any area.
    pub fn new(ellipses: impl IntoIterator<Item = &'a Ellipse>) -> Option<Self> {
        let ellipses: Vec<_> = ellipses
            .into_iter()
            .filter(|ellipse| !ellipse.is_degenerate())
            .collect();
        let bounds: Vec<_> = ellipses.iter().map(|ellipse| ellipse.bounds()).collect();
        let (first, rest) = bounds.split_first()?;
        let union = rest.iter().fold(*first, |union, bounds| union.union(bounds));
        Some(Self {
            ellipses,
            bounds,
            union,
        })
    }

    /// Union of the bounds of all ellipses
    pub fn union(&self) -> Bounds {
        self.union
    }

    /// Ellipse referenced by `Edge::ellipse`
    pub fn ellipse(&self, index: usize) -> &'a Ellipse {
        self.ellipses[index]
    }

    /// Append edges intersecting band `[y, y + 1)` to `edges`
    ///
    /// Returns next scanline worth processing. If nothing intersects this band,
    /// it skips ahead to the closest ellipse below.
    pub fn build(&self, y: i32, edges: &mut Vec<Edge>) -> i32 {
        let top_y = y as Scalar;
        let bottom_y = top_y + 1.0;
        let mut next_y = self.union.bottom;
        let edges_len = edges.len();

        for (index, (ellipse, bounds)) in self.ellipses.iter().zip(&self.bounds).enumerate() {
            if !intervals_intersect(bounds.top, bounds.bottom, top_y, bottom_y) {
                if bottom_y < bounds.top && bounds.top < next_y {
                    next_y = bounds.top;
                }
                continue;
            }

            let top = ellipse.scanline_roots(top_y);
            let bot = ellipse.scanline_roots(bottom_y);
            match (top.len(), bot.len()) {
                (2, 2) => {
                    let (t0, t1) = pair(&top);
                    let (b0, b1) = pair(&bot);
                    edges.push(Edge::span(t0, b0, EdgeKind::Falling, index));
                    edges.push(Edge::span(t1, b1, EdgeKind::Rising, index));
                }
                (2, _) => {
                    // bottom apex is inside of the band
                    let (t0, t1) = pair(&top);
                    let mid = bot.get(0).copied().unwrap_or(0.5 * (t0 + t1));
                    edges.push(Edge::span(t0, mid, EdgeKind::Falling, index));
                    edges.push(Edge::span(mid, t1, EdgeKind::Rising, index));
                }
                (_, 2) => {
                    // top apex is inside of the band
                    let (b0, b1) = pair(&bot);
                    let mid = top.get(0).copied().unwrap_or(0.5 * (b0 + b1));
                    edges.push(Edge::span(b0, mid, EdgeKind::Falling, index));
                    edges.push(Edge::span(mid, b1, EdgeKind::Rising, index));
                }
                _ => {
                    // both apexes are inside of the band, fallback to bounds
                    let mid = 0.5 * (bounds.left + bounds.right);
                    edges.push(Edge::span(bounds.left, mid, EdgeKind::Falling, index));
                    edges.push(Edge::span(mid, bounds.right, EdgeKind::Rising, index));
                }
            }
        }

        if edges.len() > edges_len {
            y + 1
        } else {
            (next_y.floor() as i32).max(y + 1)
        }
    }
}

/// First two roots, `len() == 2` is checked by the caller
#[inline]
fn pair(roots: &ArrayIter<[Option<Scalar>; 2]>) -> (Scalar, Scalar) {
    let x0 = roots.get(0).copied().unwrap_or_default();
    let x1 = roots.get(1).copied().unwrap_or_default();
    (x0, x1)
}
