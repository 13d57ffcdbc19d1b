//! Winding order bookkeeping for strips.
//!
//! Consecutive triangles of a strip alternate their read order, so two
//! triangles can only follow each other when they traverse their shared edge
//! in opposite directions. These helpers check that condition, repair a strip
//! whose first triangle came out backwards, and decode strips back into
//! triangles.

use crate::adjacency::MeshGraph;
use crate::types::{EdgeId, TriangleId, VertexId};

/// Check if edge `(a, b)` is traversed `a -> b` in the cyclic order of `face`.
/// Returns `None` if the edge is not part of the face.
pub fn edge_direction_in_face<T: PartialEq>(face: &[T; 3], a: &T, b: &T) -> Option<bool> {
    for i in 0..3 {
        let v0 = &face[i];
        let v1 = &face[(i + 1) % 3];

        if v0 == a && v1 == b {
            return Some(true);
        }
        if v0 == b && v1 == a {
            return Some(false);
        }
    }
    None
}

/// Whether `window` is `face` up to a cyclic rotation (same winding).
pub fn same_winding<T: PartialEq>(window: &[T; 3], face: &[T; 3]) -> bool {
    (0..3).any(|r| (0..3).all(|i| window[i] == face[(i + r) % 3]))
}

/// Whether two triangles sharing `edge` cannot sit next to each other in a strip.
///
/// The flow is intact when the shared vertices appear in opposite rotational
/// order in the two triangles, and broken when they appear in the same order.
///
/// # Panics
///
/// Panics if `edge` is not an edge of both triangles.
pub fn broken_cull_flow(graph: &MeshGraph, a: TriangleId, b: TriangleId, edge: EdgeId) -> bool {
    let [v0, v1] = graph.edge(edge).vertices();
    let dir_a = edge_direction_in_face(&graph.triangle(a).vertices(), &v0, &v1);
    let dir_b = edge_direction_in_face(&graph.triangle(b).vertices(), &v0, &v1);

    match (dir_a, dir_b) {
        (Some(da), Some(db)) => da == db,
        _ => panic!("edge {:?} is not shared by {:?} and {:?}", edge, a, b),
    }
}

/// Make the strip reproduce `first`'s winding in its first window.
///
/// Odd-length strips are reversed, which flips every window without adding
/// a triangle. Even-length strips get their first vertex duplicated, which
/// shifts every window to the opposite parity at the cost of one leading
/// degenerate window. Returns `true` if the strip was changed.
pub fn flip_strip(strip: &mut Vec<VertexId>, first: [VertexId; 3]) -> bool {
    debug_assert!(strip.len() >= 3, "strip too short to hold a triangle");

    let window = [strip[0], strip[1], strip[2]];
    if same_winding(&window, &first) {
        return false;
    }

    if strip.len() % 2 == 1 {
        strip.reverse();
    } else {
        strip.insert(0, strip[0]);
    }
    true
}

/// Decode a strip into triangles with the alternating-winding rule.
///
/// With `reversed` set the strip is read as if it started one position later,
/// i.e. its first window swaps its first two corners. Degenerate windows
/// (any repeated corner) are skipped.
pub fn strip_to_triangles<T: Clone + PartialEq>(strip: &[T], reversed: bool) -> Vec<[T; 3]> {
    let mut triangles = Vec::with_capacity(strip.len().saturating_sub(2));

    for (i, window) in strip.windows(3).enumerate() {
        let (a, b, c) = (&window[0], &window[1], &window[2]);
        if a == b || b == c || a == c {
            continue;
        }

        let odd = (i % 2 == 1) != reversed;
        if odd {
            triangles.push([b.clone(), a.clone(), c.clone()]);
        } else {
            triangles.push([a.clone(), b.clone(), c.clone()]);
        }
    }

    triangles
}
