use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::domain::snapshot::MatchSnapshot;
use crate::persistence::{MatchStore, StoreError};

/// In-process store. Clones share the same slot, so a caller can keep a
/// handle while the match owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<MatchSnapshot>>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently saved snapshot.
    pub fn latest(&self) -> Option<MatchSnapshot> {
        self.slot.borrow().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl MatchStore for MemoryStore {
    fn save(&self, snapshot: &MatchSnapshot) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(snapshot.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn load(&self) -> Result<Option<MatchSnapshot>, StoreError> {
        Ok(self.latest())
    }
}
