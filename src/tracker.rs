// tracker.rs
//
// Dirty tracking against a baseline snapshot taken at load time and after
// every successful save. The comparison is structural; the baseline is
// never mutated in place.

use crate::document::Matrix;

pub struct EditTracker {
    baseline: Matrix,
    dirty: bool,
}

impl EditTracker {
    pub fn new(baseline: &Matrix) -> Self {
        EditTracker {
            baseline: baseline.clone(),
            dirty: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Recompute the dirty flag by comparing the current matrix against the
    /// baseline.
    pub fn check_for_edits(&mut self, current: &Matrix) -> bool {
        self.dirty = *current != self.baseline;
        self.dirty
    }

    /// Replace the baseline with the current matrix and clear the flag.
    pub fn rebaseline(&mut self, current: &Matrix) {
        self.baseline = current.clone();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> Matrix {
        vec![
            vec!["ra".to_string(), "cns".to_string()],
            vec!["123".to_string(), "700".to_string()],
        ]
    }

    #[test]
    fn starts_clean() {
        let m = matrix();
        let mut tracker = EditTracker::new(&m);
        assert!(!tracker.is_dirty());
        assert!(!tracker.check_for_edits(&m));
    }

    #[test]
    fn detects_structural_change_and_reverts() {
        let m = matrix();
        let mut tracker = EditTracker::new(&m);
        let mut edited = m.clone();
        edited[1][0] = "456".to_string();
        assert!(tracker.check_for_edits(&edited));
        // undoing the edit makes the document clean again
        assert!(!tracker.check_for_edits(&m));
    }

    #[test]
    fn rebaseline_clears_dirty() {
        let m = matrix();
        let mut tracker = EditTracker::new(&m);
        let mut edited = m.clone();
        edited.push(vec!["x".to_string(), "y".to_string()]);
        assert!(tracker.check_for_edits(&edited));
        tracker.rebaseline(&edited);
        assert!(!tracker.is_dirty());
        assert!(!tracker.check_for_edits(&edited));
        // but the old shape is now a difference
        assert!(tracker.check_for_edits(&m));
    }
}
