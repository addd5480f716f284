//! Removal of ellipses that are (mostly) covered by other ellipses
use crate::{Bounds, Ellipse, Scalar};
use std::collections::BTreeSet;

/// Default fraction of the bounding box that has to be covered by another
/// ellipse for it to be considered a duplicate.
pub const DEFAULT_COVER_LIMIT: Scalar = 0.95;

#[derive(Debug, Clone, Copy)]
struct OverlapCandidate {
    /// index in the original list
    index: usize,
    bounds: Bounds,
}

/// Remove ellipses whose bounding box is covered by the bounding box of
/// another ellipse by at least `cover_limit` fraction of its area.
///
/// Of the two overlapping ellipses the one with the larger covered fraction
/// (the smaller one) is removed. Overlap is measured on bounding boxes only,
/// so this is an approximation. Surviving ellipses keep their relative order.
/// Returns number of removed ellipses.
pub fn deduplicate(ellipses: &mut Vec<Ellipse>, cover_limit: Scalar) -> usize {
    let span = tracing::debug_span!("[deduplicate]", ellipses = ellipses.len(), cover_limit);
    let _guard = span.enter();
    if ellipses.len() < 2 || cover_limit <= 0.0 {
        return 0;
    }

    // candidates sorted by (left, top)
    let mut sorted: Vec<_> = ellipses
        .iter()
        .enumerate()
        .map(|(index, ellipse)| OverlapCandidate {
            index,
            bounds: ellipse.bounds(),
        })
        .collect();
    sorted.sort_by(|c0, c1| {
        c0.bounds
            .left
            .total_cmp(&c1.bounds.left)
            .then_with(|| c0.bounds.top.total_cmp(&c1.bounds.top))
    });

    // positions in `sorted` of removed candidates
    let mut removed = BTreeSet::new();
    for j in 0..sorted.len() {
        if removed.contains(&j) {
            continue;
        }
        let pivot = sorted[j].bounds;
        for (i, OverlapCandidate { bounds, .. }) in sorted.iter().enumerate().skip(j + 1) {
            if removed.contains(&i) {
                continue;
            }
            // sorted by left side, nothing further can overlap
            if bounds.left >= pivot.right {
                break;
            }
            let (cover_j, cover_i) = match pivot.overlap(bounds) {
                Some(covers) => covers,
                None => continue,
            };
            if cover_j <= cover_i && cover_limit <= cover_i {
                removed.insert(i);
            } else if cover_i < cover_j && cover_limit <= cover_j {
                removed.insert(j);
                break;
            }
        }
    }

    if !removed.is_empty() {
        let removed: BTreeSet<usize> = removed.into_iter().map(|i| sorted[i].index).collect();
        let mut index = 0;
        ellipses.retain(|_| {
            let keep = !removed.contains(&index);
            index += 1;
            keep
        });
    }
    let count = sorted.len() - ellipses.len();
    tracing::debug!("[deduplicate:removed] {}", count);
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let mut ellipses = Vec::new();
        assert_eq!(deduplicate(&mut ellipses, DEFAULT_COVER_LIMIT), 0);
        let mut ellipses = vec![Ellipse::circle((10.0, 10.0), 5.0)];
        assert_eq!(deduplicate(&mut ellipses, DEFAULT_COVER_LIMIT), 0);
        assert_eq!(ellipses.len(), 1);
    }

    #[test]
    fn test_disjoint() {
        let mut ellipses = vec![
            Ellipse::circle((10.0, 10.0), 5.0),
            Ellipse::circle((30.0, 10.0), 5.0),
            Ellipse::circle((10.0, 30.0), 5.0),
            Ellipse::circle((30.0, 30.0), 5.0),
        ];
        let expected = ellipses.clone();
        assert_eq!(deduplicate(&mut ellipses, DEFAULT_COVER_LIMIT), 0);
        assert_eq!(ellipses, expected);
    }

    #[test]
    fn test_pairs() {
        let unique = [
            Ellipse::circle((30.0, 30.0), 5.0),
            Ellipse::new(10.0, 10.0, 6.0, 3.0, 0.5),
            Ellipse::circle((10.0, 30.0), 5.0),
            Ellipse::new(30.0, 10.0, 2.0, 4.0, 0.0),
        ];
        let mut ellipses: Vec<_> = unique.iter().chain(unique.iter()).copied().collect();
        assert_eq!(deduplicate(&mut ellipses, DEFAULT_COVER_LIMIT), 4);
        // one of each pair survives in the original order
        assert_eq!(ellipses, unique.to_vec());
    }

    #[test]
    fn test_contained() {
        let large = Ellipse::new(10.0, 10.0, 8.0, 6.0, 0.0);
        let small = Ellipse::new(11.0, 9.0, 2.0, 1.0, 0.2);

        let mut ellipses = vec![small, large];
        assert_eq!(deduplicate(&mut ellipses, DEFAULT_COVER_LIMIT), 1);
        assert_eq!(ellipses, vec![large]);
        assert_eq!(ellipses[0].radius_x, 8.0);
        assert_eq!(ellipses[0].radius_y, 6.0);

        let mut ellipses = vec![large, small];
        assert_eq!(deduplicate(&mut ellipses, DEFAULT_COVER_LIMIT), 1);
        assert_eq!(ellipses, vec![large]);
    }

    #[test]
    fn test_pivot_removed() {
        // pivot box is mostly inside of the box of the next one
        let first = Ellipse::new(10.0, 10.0, 4.0, 4.0, 0.0);
        let second = Ellipse::new(14.1, 10.0, 8.0, 8.0, 0.0);
        let third = Ellipse::circle((40.0, 40.0), 1.0);
        let mut ellipses = vec![third, second, first];
        assert_eq!(deduplicate(&mut ellipses, 0.9), 1);
        assert_eq!(ellipses, vec![third, second]);
    }

    #[test]
    fn test_cover_limit() {
        let e0 = Ellipse::circle((10.0, 10.0), 4.0);
        let e1 = Ellipse::circle((11.0, 10.0), 4.0);
        // boxes overlap by 7/8 of their area
        let mut ellipses = vec![e0, e1];
        assert_eq!(deduplicate(&mut ellipses, DEFAULT_COVER_LIMIT), 0);
        assert_eq!(deduplicate(&mut ellipses, 0.8), 1);
        assert_eq!(ellipses, vec![e0]);

        // non-positive limit disables deduplication
        let mut ellipses = vec![e0, e0];
        assert_eq!(deduplicate(&mut ellipses, 0.0), 0);
        assert_eq!(deduplicate(&mut ellipses, -1.0), 0);
        assert_eq!(ellipses.len(), 2);
    }
}
