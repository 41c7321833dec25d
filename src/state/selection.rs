/// Which photo, if any, is open for inspection.
///
/// The selection is transient. Whoever removes records must call
/// [`SelectionState::reconcile_removal`] so the index keeps pointing at the
/// same record, or is cleared when that record goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    None,
    Index(usize),
}

impl SelectionState {
    /// Select `index` if it is within `len`; out-of-range requests are ignored.
    /// Returns whether the selection now points at `index`.
    pub fn select(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        *self = SelectionState::Index(index);
        true
    }

    pub fn clear(&mut self) {
        *self = SelectionState::None;
    }

    pub fn current(&self) -> Option<usize> {
        match self {
            SelectionState::None => None,
            SelectionState::Index(index) => Some(*index),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, SelectionState::None)
    }

    /// Adjust after the record at `removed` was deleted.
    ///
    /// Returns true when the selected record itself was removed.
    pub fn reconcile_removal(&mut self, removed: usize) -> bool {
        match *self {
            SelectionState::Index(index) if index == removed => {
                self.clear();
                true
            }
            SelectionState::Index(index) if index > removed => {
                *self = SelectionState::Index(index - 1);
                false
            }
            _ => false,
        }
    }
}
