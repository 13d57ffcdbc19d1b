//! Triangle strip generation for indexed meshes.
//!
//! This crate turns an indexed triangle list into a small set of triangle
//! strips that reproduce every input triangle exactly once with its original
//! winding. It is meant for writers of strip-based model formats:
//!
//! - **Stripping**: [`strippify`] for plain index lists, [`strippify_generic`]
//!   for arbitrary per-corner values
//! - **Flag-based winding**: [`strippify_no_degenerate`] reports a reversed
//!   flag per strip instead of emitting a leading degenerate vertex
//! - **Joining**: [`join_strips`] / [`JoinedStrip`] concatenate strips with
//!   degenerate bridges
//! - **Checking**: [`validate_strips`] and [`strip_to_triangles`]
//!
//! Degenerate input triangles are dropped. Non-manifold edges are tolerated
//! unless [`StripParams::strict_manifold`] is set.
//!
//! # Example
//!
//! ```
//! use mesh_strip::{strippify, validate_strips};
//!
//! // Two quads side by side
//! let indices = [0, 1, 3, 3, 1, 4, 1, 2, 4, 4, 2, 5];
//! let strips = strippify(&indices).unwrap();
//!
//! let report = validate_strips(&indices, &strips, &[]);
//! assert!(report.is_complete());
//! assert_eq!(strips.len(), 1);
//! ```

mod error;
mod types;

pub mod adjacency;
pub mod distinct;
pub mod join;
pub mod params;
pub mod stripify;
pub mod validate;
pub mod winding;

pub use error::{StripError, StripResult};
pub use types::{EdgeId, Strip, TriangleId, VertexId};

pub use adjacency::MeshGraph;
pub use distinct::{Deduplicate, DistinctValues, HashDistinct};
pub use join::{join_strips, JoinedStrip};
pub use params::StripParams;
pub use stripify::{
    build_strips, strippify, strippify_generic, strippify_generic_with, strippify_no_degenerate,
    strippify_no_degenerate_with, strippify_with_params,
};
pub use validate::{validate_strips, StripReport};
pub use winding::{broken_cull_flow, flip_strip, strip_to_triangles};
