//! The authoritative entity list.

use crate::error::{ChartError, Result};

/// One data point: an opaque label and its value.
///
/// The engine never interprets the label; it is only compared for change
/// detection and handed back to the host with hover and selection queries.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEntity<L> {
    pub label: L,
    pub value: f64,
}

impl<L> ChartEntity<L> {
    pub fn new(label: L, value: f64) -> Self {
        Self { label, value }
    }

    /// Value as rendered: negative and non-finite values display as 0.
    pub fn display_value(&self) -> f64 {
        if self.value.is_finite() {
            self.value.max(0.0)
        } else {
            0.0
        }
    }
}

impl<L> From<(L, f64)> for ChartEntity<L> {
    fn from((label, value): (L, f64)) -> Self {
        Self { label, value }
    }
}

/// Outcome of [`DataStore::replace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataChange {
    /// New data equals the stored data element-wise; nothing was touched.
    Unchanged,
    /// Same length with at least one differing entity, updated in place.
    Updated,
    /// The entity count changed.
    Resized { previous_len: usize },
}

impl DataChange {
    pub fn is_changed(&self) -> bool {
        !matches!(self, DataChange::Unchanged)
    }
}

/// Bounded entity storage.
///
/// The backing vector is allocated once for `capacity` entities, so neither
/// in-place updates nor length changes within capacity reallocate it.
#[derive(Debug, Clone)]
pub struct DataStore<L> {
    entities: Vec<ChartEntity<L>>,
    capacity: usize,
}

impl<L: Clone + PartialEq> DataStore<L> {
    /// Create a store holding `initial` with room for `capacity` entities.
    pub fn new(initial: &[ChartEntity<L>], capacity: usize) -> Result<Self> {
        if initial.len() > capacity {
            return Err(ChartError::CapacityExceeded {
                requested: initial.len(),
                capacity,
            });
        }

        let mut entities = Vec::with_capacity(capacity);
        entities.extend_from_slice(initial);
        Ok(Self { entities, capacity })
    }

    /// Replace the stored data.
    ///
    /// Rejected without mutation if `data` is longer than the capacity.
    pub fn replace(&mut self, data: &[ChartEntity<L>]) -> Result<DataChange> {
        if data.len() > self.capacity {
            return Err(ChartError::CapacityExceeded {
                requested: data.len(),
                capacity: self.capacity,
            });
        }

        if data.len() != self.entities.len() {
            let previous_len = self.entities.len();
            self.entities.clear();
            self.entities.extend_from_slice(data);
            return Ok(DataChange::Resized { previous_len });
        }

        let mut change = DataChange::Unchanged;
        for (stored, incoming) in self.entities.iter_mut().zip(data) {
            if !same_entity(stored, incoming) {
                stored.clone_from(incoming);
                change = DataChange::Updated;
            }
        }
        Ok(change)
    }

    pub fn entities(&self) -> &[ChartEntity<L>] {
        &self.entities
    }

    pub fn get(&self, index: usize) -> Option<&ChartEntity<L>> {
        self.entities.get(index)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest displayed value, 0 for an empty store.
    pub fn max_display_value(&self) -> f64 {
        self.entities
            .iter()
            .map(ChartEntity::display_value)
            .fold(0.0, f64::max)
    }
}

fn same_entity<L: PartialEq>(a: &ChartEntity<L>, b: &ChartEntity<L>) -> bool {
    let same_value = a.value == b.value || (a.value.is_nan() && b.value.is_nan());
    same_value && a.label == b.label
}
