//! Checking strips against the triangle list they were built from.

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::types::Strip;
use crate::winding::strip_to_triangles;

/// Coverage report for a set of strips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripReport {
    /// Non-degenerate triangles in the source index list.
    pub source_triangles: usize,

    /// Non-degenerate triangles decoded from the strips.
    pub strip_triangles: usize,

    /// Source triangles with no matching strip triangle (wrong winding counts as missing).
    pub missing: usize,

    /// Strip triangles with no matching source triangle.
    pub extra: usize,

    /// Number of strips.
    pub strip_count: usize,

    /// Total indices across all strips.
    pub index_count: usize,
}

impl StripReport {
    /// Every source triangle appears exactly once with its winding.
    pub fn is_complete(&self) -> bool {
        self.missing == 0 && self.extra == 0
    }

    /// Average number of indices spent per triangle.
    pub fn indices_per_triangle(&self) -> f64 {
        if self.strip_triangles == 0 {
            return 0.0;
        }
        self.index_count as f64 / self.strip_triangles as f64
    }
}

impl std::fmt::Display for StripReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Strip Report:")?;
        writeln!(f, "  Source triangles: {}", self.source_triangles)?;
        writeln!(f, "  Strip triangles: {}", self.strip_triangles)?;
        writeln!(
            f,
            "  Strips: {} ({} indices, {:.2} per triangle)",
            self.strip_count,
            self.index_count,
            self.indices_per_triangle()
        )?;
        writeln!(
            f,
            "  Complete: {} (missing: {}, extra: {})",
            if self.is_complete() { "yes" } else { "NO" },
            self.missing,
            self.extra
        )?;

        Ok(())
    }
}

/// Rotate a face so its smallest vertex comes first, keeping cyclic order.
fn normalize_face(face: [u32; 3]) -> [u32; 3] {
    let mut min_idx = 0;
    for i in 1..3 {
        if face[i] < face[min_idx] {
            min_idx = i;
        }
    }
    [
        face[min_idx],
        face[(min_idx + 1) % 3],
        face[(min_idx + 2) % 3],
    ]
}

/// Compare the triangles encoded by `strips` with the source index list.
///
/// `reversed` holds per-strip winding flags as returned by
/// [`strippify_no_degenerate`](crate::strippify_no_degenerate); missing
/// entries count as `false`. A trailing partial triple in `indices` is ignored.
pub fn validate_strips(indices: &[u32], strips: &[Strip], reversed: &[bool]) -> StripReport {
    // Positive: still expected from the strips. Negative: emitted too often.
    let mut balance: HashMap<[u32; 3], isize> = HashMap::new();
    let mut source_triangles = 0;

    for corners in indices.chunks_exact(3) {
        let face = [corners[0], corners[1], corners[2]];
        if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
            continue;
        }
        *balance.entry(normalize_face(face)).or_default() += 1;
        source_triangles += 1;
    }

    let mut strip_triangles = 0;
    for (i, strip) in strips.iter().enumerate() {
        let rev = reversed.get(i).copied().unwrap_or(false);
        for face in strip_to_triangles(strip, rev) {
            *balance.entry(normalize_face(face)).or_default() -= 1;
            strip_triangles += 1;
        }
    }

    let missing: usize = balance.values().filter(|&&b| b > 0).map(|&b| b as usize).sum();
    let extra: usize = balance.values().filter(|&&b| b < 0).map(|&b| (-b) as usize).sum();

    let report = StripReport {
        source_triangles,
        strip_triangles,
        missing,
        extra,
        strip_count: strips.len(),
        index_count: strips.iter().map(Vec::len).sum(),
    };

    if !report.is_complete() {
        warn!(
            "Strips do not match source mesh: {} missing, {} extra triangles",
            missing, extra
        );
    }

    debug!("{}", report);

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_winding() {
        assert_eq!(normalize_face([2, 0, 1]), [0, 1, 2]);
        assert_eq!(normalize_face([2, 1, 0]), [0, 2, 1]);
    }

    #[test]
    fn test_complete_quad() {
        let report = validate_strips(&[0, 1, 2, 0, 2, 3], &[vec![1, 2, 0, 3]], &[]);
        assert!(report.is_complete());
        assert_eq!(report.source_triangles, 2);
        assert_eq!(report.strip_triangles, 2);
        assert_eq!(report.index_count, 4);
    }

    #[test]
    fn test_wrong_winding_detected() {
        let report = validate_strips(&[0, 1, 2], &[vec![0, 2, 1]], &[]);
        assert!(!report.is_complete());
        assert_eq!(report.missing, 1);
        assert_eq!(report.extra, 1);
    }

    #[test]
    fn test_reversed_flag_applied() {
        let report = validate_strips(&[0, 1, 2], &[vec![1, 0, 2]], &[true]);
        assert!(report.is_complete());
    }

    #[test]
    fn test_degenerate_source_ignored() {
        let report = validate_strips(&[0, 0, 1, 0, 1, 2], &[vec![0, 1, 2]], &[]);
        assert_eq!(report.source_triangles, 1);
        assert!(report.is_complete());
    }

    #[test]
    fn test_report_display() {
        let report = validate_strips(&[0, 1, 2], &[vec![0, 1, 2]], &[]);
        let output = format!("{}", report);
        assert!(output.contains("Source triangles: 1"));
        assert!(output.contains("Complete: yes"));
    }
}
