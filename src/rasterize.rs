//! Scanline conversion of a list of ellipses into runs of pixels
use crate::{
    Ellipse, Scalar,
    coverage::pixel_coverage,
    edge::{Edge, EdgeBuilder, EdgeKind},
};
use std::fmt;

/// Horizontal run of pixels `start..end` on the `row` sharing the same coverage
///
/// Coverage of anti-aliased pixels can be `0.0` when an edge touches the pixel
/// but the boundary does not cross it.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelRun {
    pub row: usize,
    pub start: usize,
    pub end: usize,
    /// Fraction of each pixel covered, in `[0, 1]`
    pub coverage: Scalar,
}

impl PixelRun {
    pub fn new(row: usize, start: usize, end: usize, coverage: Scalar) -> Self {
        Self {
            row,
            start,
            end,
            coverage,
        }
    }

    /// Number of pixels in the run
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl fmt::Debug for PixelRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:[{}-{} ({:.2})]",
            self.row, self.start, self.end, self.coverage
        )
    }
}

/// Append run to the list, extending the last run instead if they are adjacent
/// and have the same coverage.
pub fn push_run(runs: &mut Vec<PixelRun>, run: PixelRun) {
    match runs.last_mut() {
        Some(last)
            if last.row == run.row && last.end == run.start && last.coverage == run.coverage =>
        {
            last.end = run.end
        }
        _ => runs.push(run),
    }
}

/// Convert ellipses to the list of pixel runs clipped to `width x height` frame
///
/// Runs are ordered by row and then by column. Pixels on the boundary of the
/// ellipses are anti-aliased, ellipses with zero radius produce nothing.
/// Anti-aliased runs are emitted even if their coverage is `0.0`.
pub fn rasterize(ellipses: &[Ellipse], width: usize, height: usize) -> Vec<PixelRun> {
    let span = tracing::debug_span!("[rasterize]", ellipses = ellipses.len(), width, height);
    let _guard = span.enter();
    let mut runs = Vec::new();
    let builder = match EdgeBuilder::new(ellipses) {
        Some(builder) => builder,
        None => return runs,
    };

    let union = builder.union();
    let end_y = (height as Scalar).min(union.bottom.ceil()) as i32;
    let right_edge = (width as Scalar).min(union.right.ceil()) as i32;

    let mut edges = Vec::new();
    let mut candidates = Vec::new();
    let mut y = union.top.max(0.0) as i32;
    while y < end_y {
        edges.clear();
        let next_y = builder.build(y, &mut edges);
        tracing::trace!("[rasterize:band] y={} edges={}", y, edges.len());
        if !edges.is_empty() {
            edges.sort_by_key(|edge| edge.start);
            composite_band(&builder, &edges, y, right_edge, &mut candidates, &mut runs);
        }
        y = next_y;
    }

    tracing::debug!("[rasterize:runs] {}", runs.len());
    runs
}

/// Sweep sorted edges of the band from left to right emitting runs
///
/// `inside` counts ellipses entered at the current column. Columns not covered
/// by any edge are either solid or empty. Columns covered by edges of a single
/// ellipse are anti-aliased. Where ellipses overlap, only the first column of
/// the overlapping region is anti-aliased and the rest is solid.
fn composite_band<'a>(
    builder: &EdgeBuilder<'a>,
    edges: &[Edge],
    y: i32,
    right_edge: i32,
    candidates: &mut Vec<&'a Ellipse>,
    runs: &mut Vec<PixelRun>,
) {
    let mut x = match edges.first() {
        Some(edge) => edge.start.max(0),
        None => return,
    };
    let row = y as usize;
    let mut last_inside = 0;
    while x < right_edge {
        let mut inside = 0;
        let mut end = right_edge;
        candidates.clear();
        for edge in edges {
            if edge.start > x {
                end = edge.start.min(right_edge);
                break;
            }
            match edge.kind {
                EdgeKind::Falling => inside += 1,
                EdgeKind::Rising if edge.end <= x => inside -= 1,
                EdgeKind::Rising => {}
            }
            if x < edge.end {
                candidates.push(builder.ellipse(edge.ellipse));
            }
        }

        if candidates.is_empty() {
            if inside > 0 {
                push_run(runs, PixelRun::new(row, x as usize, end as usize, 1.0));
            }
        } else if inside == 1 || (inside > 1 && last_inside == 0) {
            end = x + 1;
            let coverage = pixel_coverage(candidates.iter().copied(), x as Scalar, y as Scalar);
            push_run(runs, PixelRun::new(row, x as usize, end as usize, coverage));
        } else if inside > 1 {
            end = x + 1;
            push_run(runs, PixelRun::new(row, x as usize, end as usize, 1.0));
        }

        x = end;
        last_inside = inside;
    }
}

/// Coverage of a single pixel at `(x, y)`
///
/// Ellipses are shifted so the pixel becomes the only pixel of the frame.
/// Returns `None` if the pixel is not covered.
pub fn probe(ellipses: &[Ellipse], x: usize, y: usize) -> Option<PixelRun> {
    let (dx, dy) = (x as Scalar, y as Scalar);
    let shifted: Vec<_> = ellipses
        .iter()
        .map(|ellipse| Ellipse {
            center_x: ellipse.center_x - dx,
            center_y: ellipse.center_y - dy,
            ..*ellipse
        })
        .collect();
    match rasterize(&shifted, 1, 1).as_slice() {
        [run] => Some(PixelRun::new(run.row + y, run.start + x, run.end + x, run.coverage)),
        _ => None,
    }
}
