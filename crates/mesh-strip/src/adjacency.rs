//! Triangle adjacency graph used by the strip builder.
//!
//! Vertices, edges and triangles each live in their own arena and refer to
//! one another by handle, so the graph has no ownership cycles while still
//! answering "which triangles touch this edge" and "which edge joins these
//! two vertices" in constant time.

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::error::{StripError, StripResult};
use crate::types::{EdgeId, TriangleId, VertexId};

/// A vertex of the graph, identified by the caller's index value.
#[derive(Debug, Clone)]
pub struct Vertex {
    id: VertexId,
    /// Incident edges keyed by the opposite endpoint.
    edges: HashMap<VertexId, EdgeId>,
    /// Incident triangles in construction order.
    triangles: Vec<TriangleId>,
}

impl Vertex {
    fn new(id: VertexId) -> Self {
        Self {
            id,
            edges: HashMap::new(),
            triangles: Vec::new(),
        }
    }

    /// The caller's index value for this vertex.
    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Edge connecting this vertex to `other`, if any triangle created one.
    #[inline]
    pub fn edge_to(&self, other: VertexId) -> Option<EdgeId> {
        self.edges.get(&other).copied()
    }

    /// Number of distinct edges incident to this vertex.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Triangles using this vertex.
    #[inline]
    pub fn triangles(&self) -> &[TriangleId] {
        &self.triangles
    }
}

/// An undirected edge between two vertices.
#[derive(Debug, Clone)]
pub struct Edge {
    vertices: [VertexId; 2],
    /// Triangles referencing this edge, in construction order.
    triangles: Vec<TriangleId>,
}

impl Edge {
    /// Endpoints in the order the edge was first created.
    #[inline]
    pub fn vertices(&self) -> [VertexId; 2] {
        self.vertices
    }

    /// Triangles referencing this edge.
    #[inline]
    pub fn triangles(&self) -> &[TriangleId] {
        &self.triangles
    }

    /// A manifold edge is used by at most two triangles.
    #[inline]
    pub fn is_manifold(&self) -> bool {
        self.triangles.len() <= 2
    }
}

/// A triangle with a fixed cyclic vertex order.
#[derive(Debug, Clone)]
pub struct Triangle {
    vertices: [VertexId; 3],
    /// Edges `(v0, v1)`, `(v1, v2)`, `(v2, v0)`.
    edges: [EdgeId; 3],
    /// Triangles sharing at least one edge, each listed once.
    neighbors: Vec<TriangleId>,
}

impl Triangle {
    /// Vertices in winding order.
    #[inline]
    pub fn vertices(&self) -> [VertexId; 3] {
        self.vertices
    }

    /// The three edges between consecutive vertices.
    #[inline]
    pub fn edges(&self) -> [EdgeId; 3] {
        self.edges
    }

    /// Every triangle reachable through a shared edge.
    #[inline]
    pub fn neighbors(&self) -> &[TriangleId] {
        &self.neighbors
    }

    /// Whether `v` is one of the corners.
    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    /// Whether `edge` is one of this triangle's edges.
    #[inline]
    pub fn has_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }

    /// The corner that is neither `a` nor `b`.
    pub fn third_vertex(&self, a: VertexId, b: VertexId) -> Option<VertexId> {
        self.vertices.iter().copied().find(|&v| v != a && v != b)
    }
}

/// Vertex/edge/triangle graph built from a flat index list.
#[derive(Debug, Clone)]
pub struct MeshGraph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    triangles: Vec<Triangle>,
    degenerate_count: usize,
    non_manifold_edge_count: usize,
}

impl MeshGraph {
    /// Build the graph from a flat list of index triples.
    ///
    /// A vertex is created for every value in `0..=max(index)`, referenced or
    /// not. Triples that repeat an index are dropped. With `strict` set, the
    /// first edge to reach a third triangle aborts the build with
    /// [`StripError::NonManifoldTopology`]; otherwise the extra triangle is
    /// linked to every triangle already on the edge.
    pub fn build(indices: &[u32], strict: bool) -> StripResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(StripError::InvalidInput { len: indices.len() });
        }

        let vertex_count = indices.iter().max().map_or(0, |&max| max as usize + 1);
        let mut graph = Self {
            vertices: (0..vertex_count).map(|v| Vertex::new(v as VertexId)).collect(),
            edges: Vec::new(),
            triangles: Vec::with_capacity(indices.len() / 3),
            degenerate_count: 0,
            non_manifold_edge_count: 0,
        };

        for corners in indices.chunks_exact(3) {
            let (a, b, c) = (corners[0], corners[1], corners[2]);
            if a == b || b == c || a == c {
                graph.degenerate_count += 1;
                continue;
            }
            graph.add_triangle([a, b, c], strict)?;
        }

        debug!(
            "Built strip graph: {} vertices, {} edges, {} triangles ({} degenerate dropped)",
            graph.vertices.len(),
            graph.edges.len(),
            graph.triangles.len(),
            graph.degenerate_count
        );
        if graph.non_manifold_edge_count > 0 {
            warn!(
                "Tolerating {} non-manifold edges; strips may be suboptimal",
                graph.non_manifold_edge_count
            );
        }

        Ok(graph)
    }

    fn add_triangle(&mut self, vertices: [VertexId; 3], strict: bool) -> StripResult<()> {
        let [a, b, c] = vertices;
        let tri = TriangleId::new(self.triangles.len());
        let edges = [self.connect(a, b), self.connect(b, c), self.connect(c, a)];

        self.triangles.push(Triangle {
            vertices,
            edges,
            neighbors: Vec::new(),
        });
        for v in vertices {
            self.vertices[v as usize].triangles.push(tri);
        }

        for edge in edges {
            self.attach(edge, tri, strict)?;
        }
        Ok(())
    }

    /// Look up or create the edge between `a` and `b`.
    fn connect(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        if let Some(edge) = self.vertices[a as usize].edge_to(b) {
            return edge;
        }

        let edge = EdgeId::new(self.edges.len());
        self.edges.push(Edge {
            vertices: [a, b],
            triangles: Vec::new(),
        });
        self.vertices[a as usize].edges.insert(b, edge);
        self.vertices[b as usize].edges.insert(a, edge);
        edge
    }

    /// Register `tri` on `edge` and link it with every triangle already there.
    fn attach(&mut self, edge: EdgeId, tri: TriangleId, strict: bool) -> StripResult<()> {
        let existing = self.edges[edge.index()].triangles.len();
        if existing >= 2 {
            if strict {
                let [v0, v1] = self.edges[edge.index()].vertices;
                debug!("Edge ({}, {}) is non-manifold, rejecting mesh", v0, v1);
                return Err(StripError::NonManifoldTopology {
                    v0,
                    v1,
                    triangle_count: existing + 1,
                });
            }
            if existing == 2 {
                self.non_manifold_edge_count += 1;
            }
        }

        for i in 0..existing {
            let other = self.edges[edge.index()].triangles[i];
            self.link(other, tri);
        }
        self.edges[edge.index()].triangles.push(tri);
        Ok(())
    }

    fn link(&mut self, a: TriangleId, b: TriangleId) {
        if a == b || self.triangles[a.index()].neighbors.contains(&b) {
            return;
        }
        self.triangles[a.index()].neighbors.push(b);
        self.triangles[b.index()].neighbors.push(a);
    }

    /// Number of vertices, including unreferenced index values.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of non-degenerate triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of input triples dropped because they repeat an index.
    #[inline]
    pub fn degenerate_count(&self) -> usize {
        self.degenerate_count
    }

    /// Number of edges used by more than two triangles.
    #[inline]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.non_manifold_edge_count
    }

    /// Get a vertex by index value.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id as usize]
    }

    /// Get an edge by handle.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Get a triangle by handle.
    #[inline]
    pub fn triangle(&self, id: TriangleId) -> &Triangle {
        &self.triangles[id.index()]
    }

    /// Iterate over all triangle handles in construction order.
    pub fn triangle_ids(&self) -> impl Iterator<Item = TriangleId> {
        (0..self.triangles.len()).map(TriangleId::new)
    }

    /// Edge joining `a` and `b`, if one exists.
    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.vertices.get(a as usize).and_then(|v| v.edge_to(b))
    }

    /// First edge of `a` (in winding order) that `b` also uses.
    pub fn shared_edge(&self, a: TriangleId, b: TriangleId) -> Option<EdgeId> {
        let other = self.triangle(b);
        self.triangle(a)
            .edges
            .iter()
            .copied()
            .find(|&edge| other.has_edge(edge))
    }

    /// Neighbors of `tri` not yet marked in `used`.
    pub fn available_neighbors<'a>(
        &'a self,
        tri: TriangleId,
        used: &'a [bool],
    ) -> impl Iterator<Item = TriangleId> + 'a {
        self.triangle(tri)
            .neighbors
            .iter()
            .copied()
            .filter(move |n| !used[n.index()])
    }

    /// Count of neighbors of `tri` not yet marked in `used`.
    pub fn available_neighbor_count(&self, tri: TriangleId, used: &[bool]) -> usize {
        self.available_neighbors(tri, used).count()
    }

    /// Count of triangles around `v` not yet marked in `used`.
    pub fn available_triangle_count(&self, v: VertexId, used: &[bool]) -> usize {
        self.vertex(v)
            .triangles
            .iter()
            .filter(|t| !used[t.index()])
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Vec<u32> {
        vec![0, 1, 2, 0, 2, 3]
    }

    fn tetrahedron() -> Vec<u32> {
        vec![0, 1, 2, 0, 2, 3, 0, 3, 1, 1, 3, 2]
    }

    fn non_manifold_fan() -> Vec<u32> {
        // Three triangles on edge (0, 1)
        vec![0, 1, 2, 1, 0, 3, 0, 1, 4]
    }

    #[test]
    fn test_invalid_length() {
        let err = MeshGraph::build(&[0, 1, 2, 3], false).unwrap_err();
        assert!(matches!(err, StripError::InvalidInput { len: 4 }));
    }

    #[test]
    fn test_empty_input() {
        let graph = MeshGraph::build(&[], false).unwrap();
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.triangle_count(), 0);
    }

    #[test]
    fn test_quad_shares_one_edge() {
        let graph = MeshGraph::build(&quad(), false).unwrap();
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.triangle_count(), 2);

        let t0 = TriangleId::new(0);
        let t1 = TriangleId::new(1);
        assert_eq!(graph.triangle(t0).neighbors(), &[t1]);
        assert_eq!(graph.triangle(t1).neighbors(), &[t0]);

        let shared = graph.shared_edge(t0, t1).expect("triangles share an edge");
        assert_eq!(graph.edge_between(2, 0), Some(shared));
        assert_eq!(graph.edge(shared).triangles(), &[t0, t1]);
    }

    #[test]
    fn test_unreferenced_vertices_exist() {
        let graph = MeshGraph::build(&[5, 6, 7], false).unwrap();
        assert_eq!(graph.vertex_count(), 8);
        assert!(graph.vertex(0).triangles().is_empty());
        assert_eq!(graph.vertex(0).edge_count(), 0);
        assert_eq!(graph.vertex(6).triangles().len(), 1);
    }

    #[test]
    fn test_degenerate_triples_dropped() {
        let graph = MeshGraph::build(&[0, 0, 1, 0, 1, 2, 2, 1, 2], false).unwrap();
        assert_eq!(graph.triangle_count(), 1);
        assert_eq!(graph.degenerate_count(), 2);
        assert_eq!(graph.triangle(TriangleId::new(0)).vertices(), [0, 1, 2]);
    }

    #[test]
    fn test_tetrahedron_neighbors() {
        let graph = MeshGraph::build(&tetrahedron(), false).unwrap();
        assert_eq!(graph.edge_count(), 6);
        for t in graph.triangle_ids() {
            assert_eq!(graph.triangle(t).neighbors().len(), 3);
        }
        for v in 0..4 {
            assert_eq!(graph.vertex(v).edge_count(), 3);
        }
    }

    #[test]
    fn test_strict_rejects_non_manifold() {
        let err = MeshGraph::build(&non_manifold_fan(), true).unwrap_err();
        match err {
            StripError::NonManifoldTopology { v0, v1, triangle_count } => {
                assert_eq!([v0.min(v1), v0.max(v1)], [0, 1]);
                assert_eq!(triangle_count, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_links_non_manifold() {
        let graph = MeshGraph::build(&non_manifold_fan(), false).unwrap();
        assert_eq!(graph.non_manifold_edge_count(), 1);
        let edge = graph.edge_between(0, 1).expect("edge exists");
        assert!(!graph.edge(edge).is_manifold());
        for t in graph.triangle_ids() {
            assert_eq!(graph.triangle(t).neighbors().len(), 2);
        }
    }

    #[test]
    fn test_double_sided_pair_linked_once() {
        let graph = MeshGraph::build(&[0, 1, 2, 0, 2, 1], false).unwrap();
        assert_eq!(graph.triangle(TriangleId::new(0)).neighbors().len(), 1);
        assert_eq!(graph.triangle(TriangleId::new(1)).neighbors().len(), 1);
    }

    #[test]
    fn test_available_counts_follow_used_flags() {
        let graph = MeshGraph::build(&quad(), false).unwrap();
        let mut used = vec![false; graph.triangle_count()];
        let t0 = TriangleId::new(0);

        assert_eq!(graph.available_neighbor_count(t0, &used), 1);
        assert_eq!(graph.available_triangle_count(0, &used), 2);

        used[1] = true;
        assert_eq!(graph.available_neighbor_count(t0, &used), 0);
        assert_eq!(graph.available_triangle_count(0, &used), 1);
        assert_eq!(graph.available_triangle_count(1, &used), 1);
    }

    #[test]
    fn test_third_vertex() {
        let graph = MeshGraph::build(&quad(), false).unwrap();
        let t1 = graph.triangle(TriangleId::new(1));
        assert_eq!(t1.third_vertex(0, 2), Some(3));
        assert_eq!(t1.third_vertex(3, 2), Some(0));
    }
}
