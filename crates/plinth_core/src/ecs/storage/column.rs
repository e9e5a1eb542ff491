use crate::ecs::{Component, Entity};
use std::any::Any;

/// Dense, fixed-length column holding one component type for every entity ID.
///
/// Cell `i` belongs to the entity whose ID is `i`. The column is sized once
/// and never reallocates, so indexing stays O(1) for the world's lifetime.
pub struct Column<T> {
    cells: Vec<Option<T>>,
    occupied: usize,
}

impl<T> Column<T> {
    /// Create a column with `len` empty cells.
    pub fn with_len(len: usize) -> Self {
        Self {
            cells: std::iter::repeat_with(|| None).take(len).collect(),
            occupied: 0,
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.cells.get(index)?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.cells.get_mut(index)?.as_mut()
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(Some(_)))
    }

    /// Store `value`, returning whatever the cell held before.
    /// Out-of-range indices hand the value straight back.
    pub fn insert(&mut self, index: usize, value: T) -> Result<Option<T>, T> {
        let Some(cell) = self.cells.get_mut(index) else {
            return Err(value);
        };
        let previous = cell.replace(value);
        if previous.is_none() {
            self.occupied += 1;
        }
        Ok(previous)
    }

    pub fn take(&mut self, index: usize) -> Option<T> {
        let value = self.cells.get_mut(index)?.take();
        if value.is_some() {
            self.occupied -= 1;
        }
        value
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Type-erased view of a column, used for whole-entity operations that walk
/// every registered type.
pub(crate) trait ErasedColumn {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn contains(&self, index: usize) -> bool;
    /// Take the entity's component, run its removal callback and drop it.
    fn detach(&mut self, entity: Entity) -> bool;
    /// Run the reset callback on the entity's component, if present.
    fn reset(&mut self, entity: Entity) -> bool;
}

impl<T: Component> ErasedColumn for Column<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn contains(&self, index: usize) -> bool {
        Column::contains(self, index)
    }

    fn detach(&mut self, entity: Entity) -> bool {
        match self.take(entity.index()) {
            Some(mut component) => {
                component.on_removed(entity);
                true
            }
            None => false,
        }
    }

    fn reset(&mut self, entity: Entity) -> bool {
        match self.get_mut(entity.index()) {
            Some(component) => {
                component.reset(entity);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_tracks_inserts_and_takes() {
        let mut column = Column::with_len(4);
        assert_eq!(column.insert(1, 10u32), Ok(None));
        assert_eq!(column.insert(1, 11u32), Ok(Some(10)));
        assert_eq!(column.insert(3, 30u32), Ok(None));
        assert_eq!(column.occupied(), 2);

        assert_eq!(column.take(1), Some(11));
        assert_eq!(column.take(1), None);
        assert_eq!(column.occupied(), 1);
        assert!(column.contains(3));
        assert!(!column.contains(0));
    }

    #[test]
    fn out_of_range_is_rejected_not_panicking() {
        let mut column = Column::with_len(2);
        assert_eq!(column.insert(5, 'x'), Err('x'));
        assert_eq!(column.get(5), None);
        assert_eq!(column.take(5), None);
        assert_eq!(column.len(), 2);
    }
}
