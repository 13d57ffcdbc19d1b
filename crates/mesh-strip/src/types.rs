//! Core handle types for the strip graph.

use std::fmt;

/// An ordered run of corners decoded with alternating winding.
///
/// Window `i` is `(s[i], s[i+1], s[i+2])` for even `i` and
/// `(s[i+1], s[i], s[i+2])` for odd `i`.
pub type Strip<T = u32> = Vec<T>;

macro_rules! arena_handle {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from an arena position.
            #[inline]
            pub fn new(index: usize) -> Self {
                match u32::try_from(index) {
                    Ok(raw) => Self(raw),
                    Err(_) => panic!("arena index {} overflows u32", index),
                }
            }

            /// Position of the element in its arena.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $tag, self.0)
            }
        }
    };
}

arena_handle!(
    /// Handle of an edge in the graph's edge arena.
    EdgeId,
    "E"
);

arena_handle!(
    /// Handle of a triangle in the graph's triangle arena.
    ///
    /// Triangles are numbered in construction order, which is input order
    /// with degenerate triples skipped.
    TriangleId,
    "T"
);

/// Vertices are identified by the caller's own index value.
pub type VertexId = u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_roundtrip() {
        let t = TriangleId::new(42);
        assert_eq!(t.index(), 42);
        assert_eq!(EdgeId::new(7).index(), 7);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", TriangleId::new(3)), "T(3)");
        assert_eq!(format!("{:?}", EdgeId::new(9)), "E(9)");
    }

    #[test]
    fn test_handles_order_by_construction() {
        assert!(TriangleId::new(1) < TriangleId::new(2));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic(expected = "overflows u32")]
    fn test_oversized_index_panics() {
        let _ = TriangleId::new(u32::MAX as usize + 1);
    }
}
