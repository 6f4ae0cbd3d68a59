use std::cell::Cell;
use std::rc::Rc;

use tidemark_types::Dimensions;

/// Last known viewport size, shared by every watcher on one viewport.
///
/// Readers get cheap copies. The only writer is a firing throttle timer.
#[derive(Debug, Clone, Default)]
pub struct DimensionState {
    current: Rc<Cell<Dimensions>>,
}

impl DimensionState {
    #[must_use]
    pub fn new(initial: Dimensions) -> Self {
        Self {
            current: Rc::new(Cell::new(initial)),
        }
    }

    #[must_use]
    pub fn get(&self) -> Dimensions {
        self.current.get()
    }

    pub(crate) fn set(&self, dims: Dimensions) {
        self.current.set(dims);
    }
}
