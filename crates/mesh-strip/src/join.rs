//! Joining strips into one strip with degenerate bridges.
//!
//! Between two strips the joined sequence repeats the last vertex of the
//! first and the first vertex of the second, which only produces degenerate
//! windows. Each strip must also start at the right parity: a strip flagged
//! as reversed starts at an odd position, any other strip at an even one.
//! When the bridge lands on the wrong parity the first vertex is repeated
//! once more.

use crate::types::Strip;

/// Lazily joined sequence over a list of strips.
///
/// `reversed` may be shorter than `strips`; missing flags are `false`.
/// Empty strips are skipped.
#[derive(Debug, Clone)]
pub struct JoinedStrip<'a, T> {
    strips: &'a [Strip<T>],
    reversed: &'a [bool],
    /// Strip currently being emitted.
    strip: usize,
    /// Next element of the current strip.
    cursor: usize,
    /// Prefix of the current strip already planned.
    started: bool,
    /// Previous strip's last vertex, still to repeat.
    bridge: Option<&'a T>,
    /// Copies of the current strip's first vertex still to emit before it.
    lead: usize,
    emitted: usize,
    last: Option<&'a T>,
}

impl<'a, T> JoinedStrip<'a, T> {
    /// Start joining `strips` with their winding flags.
    pub fn new(strips: &'a [Strip<T>], reversed: &'a [bool]) -> Self {
        Self {
            strips,
            reversed,
            strip: 0,
            cursor: 0,
            started: false,
            bridge: None,
            lead: 0,
            emitted: 0,
            last: None,
        }
    }

    fn plan_prefix(&mut self) {
        let bridged = self.last.is_some();
        self.bridge = self.last;
        self.lead = usize::from(bridged);

        let start = self.emitted + usize::from(bridged) + self.lead;
        let reversed = self.reversed.get(self.strip).copied().unwrap_or(false);
        if (start % 2 == 1) != reversed {
            self.lead += 1;
        }
        self.started = true;
    }

    fn emit(&mut self, item: &'a T) -> &'a T {
        self.emitted += 1;
        self.last = Some(item);
        item
    }
}

impl<'a, T> Iterator for JoinedStrip<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let strips = self.strips;

        loop {
            let current = strips.get(self.strip)?;
            if !self.started {
                if current.is_empty() {
                    self.strip += 1;
                    continue;
                }
                self.plan_prefix();
            }

            if let Some(bridge) = self.bridge.take() {
                return Some(self.emit(bridge));
            }
            if self.lead > 0 {
                self.lead -= 1;
                return Some(self.emit(&current[0]));
            }
            if let Some(item) = current.get(self.cursor) {
                self.cursor += 1;
                return Some(self.emit(item));
            }

            self.strip += 1;
            self.cursor = 0;
            self.started = false;
        }
    }
}

/// Join strips into a single strip that decodes to the same triangles.
///
/// The result is always read with even parity, whatever the flags of the
/// individual strips were.
///
/// # Example
///
/// ```
/// use mesh_strip::join_strips;
///
/// let joined = join_strips(&[vec![0, 1, 2], vec![3, 4, 5]], &[]);
/// assert_eq!(joined, vec![0, 1, 2, 2, 3, 3, 3, 4, 5]);
/// ```
pub fn join_strips<T: Clone>(strips: &[Strip<T>], reversed: &[bool]) -> Strip<T> {
    JoinedStrip::new(strips, reversed).cloned().collect()
}
