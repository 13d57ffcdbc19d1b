//! Greedy triangle strip construction.
//!
//! Strips are grown one at a time from the most constrained unused triangle.
//! Each strip walks across shared edges as long as the next triangle keeps
//! the alternating winding intact, then tries to grow from its first triangle
//! in the other direction. A final winding fix makes the first window match
//! its source triangle, which carries every later window along with it.

use std::hash::Hash;

use tracing::info;

use crate::adjacency::MeshGraph;
use crate::distinct::{Deduplicate, DistinctValues, HashDistinct};
use crate::error::{StripError, StripResult};
use crate::params::StripParams;
use crate::types::{EdgeId, Strip, TriangleId, VertexId};
use crate::winding::{broken_cull_flow, flip_strip};

/// Convert a flat triangle index list into strips using default parameters.
///
/// # Example
///
/// ```
/// use mesh_strip::strippify;
///
/// let strips = strippify(&[0, 1, 2, 0, 2, 3]).unwrap();
/// assert_eq!(strips.len(), 1);
/// assert_eq!(strips[0].len(), 4);
/// ```
pub fn strippify(indices: &[u32]) -> StripResult<Vec<Strip>> {
    strippify_with_params(indices, &StripParams::default())
}

/// Convert a flat triangle index list into strips.
///
/// Fails with [`StripError::InvalidInput`] if the length is not a multiple
/// of 3, and with [`StripError::NonManifoldTopology`] if
/// `params.strict_manifold` is set and an edge has more than two triangles.
pub fn strippify_with_params(indices: &[u32], params: &StripParams) -> StripResult<Vec<Strip>> {
    let graph = MeshGraph::build(indices, params.strict_manifold)?;
    Ok(build_strips(&graph, params))
}

/// Cover every triangle of an already built graph with strips.
pub fn build_strips(graph: &MeshGraph, params: &StripParams) -> Vec<Strip> {
    let mut builder = StripBuilder::new(graph, params);
    while let Some(start) = builder.first_triangle() {
        builder.build_strip(start);
    }

    let index_count: usize = builder.strips.iter().map(Vec::len).sum();
    info!(
        "Stripified {} triangles into {} strips ({} single triangles, {} winding fixes, {} indices)",
        graph.triangle_count(),
        builder.strips.len(),
        builder.single_count,
        builder.winding_fixes,
        index_count
    );

    builder.strips
}

/// Strip arbitrary per-corner values.
///
/// Equal values are collapsed to shared vertices before stripping, and the
/// emitted strips hold the original values again.
pub fn strippify_generic<T: Eq + Hash + Clone>(elements: &[T]) -> StripResult<Vec<Strip<T>>> {
    strippify_generic_with(elements, &HashDistinct, &StripParams::default())
}

/// Like [`strippify_generic`] with an explicit deduplicator and parameters.
pub fn strippify_generic_with<T, D>(
    elements: &[T],
    dedup: &D,
    params: &StripParams,
) -> StripResult<Vec<Strip<T>>>
where
    T: Clone,
    D: Deduplicate<T>,
{
    let (distinct, strips) = index_strips(elements, dedup, params)?;
    Ok(strips
        .iter()
        .map(|strip| expand(strip, &distinct.values))
        .collect())
}

/// Strip arbitrary per-corner values without leading degenerate windows.
///
/// Strips whose winding fix duplicated their first vertex lose that
/// duplicate; the returned flag for such a strip is `true`, meaning its
/// first window must be read with swapped corners.
pub fn strippify_no_degenerate<T: Eq + Hash + Clone>(
    elements: &[T],
) -> StripResult<(Vec<Strip<T>>, Vec<bool>)> {
    strippify_no_degenerate_with(elements, &HashDistinct, &StripParams::default())
}

/// Like [`strippify_no_degenerate`] with an explicit deduplicator and parameters.
pub fn strippify_no_degenerate_with<T, D>(
    elements: &[T],
    dedup: &D,
    params: &StripParams,
) -> StripResult<(Vec<Strip<T>>, Vec<bool>)>
where
    T: Clone,
    D: Deduplicate<T>,
{
    let (distinct, strips) = index_strips(elements, dedup, params)?;

    let mut reversed = Vec::with_capacity(strips.len());
    let strips = strips
        .iter()
        .map(|strip| {
            let flipped = strip.len() > 3 && strip[0] == strip[1];
            reversed.push(flipped);
            let body = if flipped { &strip[1..] } else { &strip[..] };
            expand(body, &distinct.values)
        })
        .collect();

    Ok((strips, reversed))
}

fn index_strips<T, D>(
    elements: &[T],
    dedup: &D,
    params: &StripParams,
) -> StripResult<(DistinctValues<T>, Vec<Strip>)>
where
    T: Clone,
    D: Deduplicate<T>,
{
    if elements.len() % 3 != 0 {
        return Err(StripError::InvalidInput {
            len: elements.len(),
        });
    }

    let distinct = dedup
        .deduplicate(elements)
        .unwrap_or_else(|| DistinctValues::identity(elements));
    let strips = strippify_with_params(&distinct.map, params)?;
    Ok((distinct, strips))
}

fn expand<T: Clone>(strip: &[u32], values: &[T]) -> Strip<T> {
    strip.iter().map(|&i| values[i as usize].clone()).collect()
}

/// Mutable traversal state for one stripification pass.
struct StripBuilder<'a> {
    graph: &'a MeshGraph,
    params: &'a StripParams,
    /// Parallel to the triangle arena.
    used: Vec<bool>,
    /// Every triangle before this position is used.
    cursor: usize,
    strips: Vec<Strip>,
    single_count: usize,
    /// Strips whose first triangle needed a winding fix.
    winding_fixes: usize,
}

impl<'a> StripBuilder<'a> {
    fn new(graph: &'a MeshGraph, params: &'a StripParams) -> Self {
        Self {
            graph,
            params,
            used: vec![false; graph.triangle_count()],
            cursor: 0,
            strips: Vec::new(),
            single_count: 0,
            winding_fixes: 0,
        }
    }

    /// Pick the next strip start, emitting isolated triangles on the way.
    ///
    /// A triangle with a single unused neighbor is returned at once;
    /// otherwise the one with the fewest unused neighbors wins.
    fn first_triangle(&mut self) -> Option<TriangleId> {
        let graph = self.graph;
        while self.cursor < self.used.len() && self.used[self.cursor] {
            self.cursor += 1;
        }

        let mut best: Option<(TriangleId, usize)> = None;
        for i in self.cursor..self.used.len() {
            if self.used[i] {
                continue;
            }
            let tri = TriangleId::new(i);
            match graph.available_neighbor_count(tri, &self.used) {
                0 => self.emit_single(tri),
                1 => return Some(tri),
                count => {
                    if best.map_or(true, |(_, fewest)| count < fewest) {
                        best = Some((tri, count));
                    }
                }
            }
        }

        best.map(|(tri, _)| tri)
    }

    fn emit_single(&mut self, tri: TriangleId) {
        self.used[tri.index()] = true;
        self.strips.push(self.graph.triangle(tri).vertices().to_vec());
        self.single_count += 1;
    }

    fn build_strip(&mut self, t0: TriangleId) {
        let graph = self.graph;
        self.used[t0.index()] = true;

        let Some(t1) = self.next_triangle_weighted(t0) else {
            self.emit_single(t0);
            return;
        };

        let edge = self.shared_edge(t0, t1);
        if broken_cull_flow(graph, t0, t1, edge) {
            self.emit_single(t0);
            return;
        }
        self.used[t1.index()] = true;

        let [a, b] = graph.edge(edge).vertices();
        let prev = third_vertex(graph, t0, a, b);
        let next = third_vertex(graph, t1, a, b);

        let Some(t2) = self.next_triangle_weighted(t1) else {
            self.finish(vec![prev, a, b, next], t0);
            return;
        };

        // Put the shared vertex that t2 also touches last, so the trailing
        // edge of the strip is the edge leading into t2.
        let t2_tri = graph.triangle(t2);
        let (mut strip, seed) = if t2_tri.contains(next) && t2_tri.contains(a) {
            (vec![prev, b, a, next], Some(t2))
        } else if t2_tri.contains(next) && t2_tri.contains(b) {
            (vec![prev, a, b, next], Some(t2))
        } else {
            (vec![prev, a, b, next], None)
        };

        let mut head = t0;
        let tail = self.extend(&mut strip, t1, seed);

        // Grow from t0's side too; after reversing, the forward end leads.
        if self.params.extend_backward && graph.available_neighbor_count(t0, &self.used) > 0 {
            strip.reverse();
            head = tail;
            self.extend(&mut strip, t0, None);
        }

        self.finish(strip, head);
    }

    /// Grow `strip` across its trailing edge until no unused triangle
    /// continues it with intact winding. Returns the last triangle added.
    fn extend(
        &mut self,
        strip: &mut Strip,
        mut current: TriangleId,
        mut seed: Option<TriangleId>,
    ) -> TriangleId {
        let graph = self.graph;

        loop {
            let n = strip.len();
            let (u, v) = (strip[n - 2], strip[n - 1]);
            let Some(edge) = graph.edge_between(u, v) else {
                panic!("strip edge ({}, {}) is missing from the graph", u, v);
            };

            let candidate = seed.take().or_else(|| {
                graph
                    .edge(edge)
                    .triangles()
                    .iter()
                    .copied()
                    .find(|t| !self.used[t.index()])
            });
            let Some(next) = candidate else {
                break;
            };
            if broken_cull_flow(graph, current, next, edge) {
                break;
            }

            self.used[next.index()] = true;
            strip.push(third_vertex(graph, next, u, v));
            current = next;
        }

        current
    }

    /// Choose which unused neighbor of `tri` the strip should visit next.
    ///
    /// Neighbors with no other way out are taken immediately. Otherwise
    /// each candidate is weighted by its own unused-neighbor count, nudged
    /// down when its shared edge touches the most unused triangles and up
    /// when it does not; the lowest weight wins, earliest on ties.
    fn next_triangle_weighted(&self, tri: TriangleId) -> Option<TriangleId> {
        let graph = self.graph;
        let candidates: Vec<TriangleId> = graph.available_neighbors(tri, &self.used).collect();
        if candidates.len() <= 1 {
            return candidates.first().copied();
        }

        let mut scored = Vec::with_capacity(candidates.len());
        for &candidate in &candidates {
            let weight = graph.available_neighbor_count(candidate, &self.used);
            if weight == 0 {
                return Some(candidate);
            }

            let [v0, v1] = graph.edge(self.shared_edge(tri, candidate)).vertices();
            let contention = graph.available_triangle_count(v0, &self.used)
                + graph.available_triangle_count(v1, &self.used);
            scored.push((candidate, weight as isize, contention));
        }

        let most_contended = scored.iter().map(|&(_, _, c)| c).max().unwrap_or(0);
        scored
            .into_iter()
            .map(|(candidate, weight, contention)| {
                let adjusted = if contention == most_contended {
                    weight - 1
                } else {
                    weight + 1
                };
                (candidate, adjusted)
            })
            .min_by_key(|&(_, adjusted)| adjusted)
            .map(|(candidate, _)| candidate)
    }

    fn shared_edge(&self, a: TriangleId, b: TriangleId) -> EdgeId {
        match self.graph.shared_edge(a, b) {
            Some(edge) => edge,
            None => panic!("neighbor triangles {:?} and {:?} share no edge", a, b),
        }
    }

    fn finish(&mut self, mut strip: Strip, head: TriangleId) {
        if flip_strip(&mut strip, self.graph.triangle(head).vertices()) {
            self.winding_fixes += 1;
        }
        self.strips.push(strip);
    }
}

fn third_vertex(graph: &MeshGraph, tri: TriangleId, a: VertexId, b: VertexId) -> VertexId {
    match graph.triangle(tri).third_vertex(a, b) {
        Some(v) => v,
        None => panic!("triangle {:?} has no vertex besides {} and {}", tri, a, b),
    }
}
