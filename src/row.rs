//! One flattened row of cells, keyed by display order.

use crate::error::DuplicateColumnError;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Cells of one flattened row (or one header), ordered by display order.
///
/// Insertion rejects a second cell at an occupied order, which is how order
/// collisions across nesting levels are detected. Iteration and
/// [`join`](RowValues::join) always run in ascending order, regardless of
/// declaration or insertion order.
///
/// ```
/// use rowmill::RowValues;
///
/// let mut row = RowValues::new();
/// row.insert(2, "b".to_string())?;
/// row.insert(1, "a".to_string())?;
/// assert_eq!(row.join(","), "a,b");
/// # Ok::<(), rowmill::DuplicateColumnError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowValues {
    cells: BTreeMap<u32, String>,
}

impl RowValues {
    /// An empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a cell at `order`, failing if the order is already taken.
    pub fn insert(&mut self, order: u32, value: String) -> Result<(), DuplicateColumnError> {
        match self.cells.entry(order) {
            Entry::Occupied(slot) => Err(DuplicateColumnError {
                order,
                existing: slot.get().clone(),
                incoming: value,
            }),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at `order`, if occupied.
    pub fn get(&self, order: u32) -> Option<&str> {
        self.cells.get(&order).map(String::as_str)
    }

    /// Cells in ascending display order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.cells.iter().map(|(order, cell)| (*order, cell.as_str()))
    }

    /// Join the cells in ascending order with `separator`.
    pub fn join(&self, separator: &str) -> String {
        let mut out = String::new();
        for (i, cell) in self.cells.values().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_str(cell);
        }
        out
    }
}
