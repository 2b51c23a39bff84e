//! Sparse n-dimensional tape storage.
//!
//! Cells are materialized on demand: a cell that was never written does not
//! exist in memory, and the owning machine reads it as its blank symbol.
//! The tape tracks an exclusive upper bound per axis (the extent); reads are
//! valid anywhere inside the extent, and writes grow the extent to cover the
//! written cell. Coordinates are never negative.

use crate::error::AutomatonError;
use std::collections::HashMap;

/// An n-dimensional tape with lazily materialized cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape<T> {
    axes: usize,
    cells: HashMap<Vec<i64>, T>,
    extent: Vec<i64>,
}

impl<T> Tape<T> {
    /// Creates a tape with the given number of axes, covering a single
    /// unwritten cell at the origin.
    ///
    /// Fails when `axes` is zero; a tape has at least one dimension.
    pub fn new(axes: usize) -> Result<Self, AutomatonError> {
        if axes == 0 {
            return Err(AutomatonError::InvalidAxes { axes });
        }
        Ok(Tape {
            axes,
            cells: HashMap::new(),
            extent: vec![1; axes],
        })
    }

    /// Returns the number of axes.
    pub fn axes(&self) -> usize {
        self.axes
    }

    /// Returns the exclusive upper bound of each axis.
    pub fn extent(&self) -> &[i64] {
        &self.extent
    }

    /// Returns the number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` when no cell has been written yet.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Looks up the cell at the given coordinates.
    ///
    /// In-bounds cells that were never written yield `Ok(None)`; the owning
    /// machine substitutes its blank symbol. Coordinates outside the extent
    /// fail with an out-of-bounds error naming the offending axis.
    pub fn cell(&self, at: &[i64]) -> Result<Option<&T>, AutomatonError> {
        self.check_coordinates(at)?;
        for (axis, (&coordinate, &extent)) in at.iter().zip(&self.extent).enumerate() {
            if coordinate >= extent {
                return Err(AutomatonError::OutOfBounds {
                    head: at.to_vec(),
                    axis,
                });
            }
        }
        Ok(self.cells.get(at))
    }

    /// Writes `value` at the given coordinates, materializing the cell and
    /// growing the extent to cover it.
    pub fn set(&mut self, at: &[i64], value: T) -> Result<(), AutomatonError> {
        self.check_coordinates(at)?;
        for (axis, &coordinate) in at.iter().enumerate() {
            self.extent[axis] = self.extent[axis].max(coordinate + 1);
        }
        self.cells.insert(at.to_vec(), value);
        Ok(())
    }

    /// Iterates over every materialized cell with its coordinates, in no
    /// particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Vec<i64>, &T)> {
        self.cells.iter()
    }

    /// Iterates over the symbols stored in materialized cells.
    pub fn symbols(&self) -> impl Iterator<Item = &T> {
        self.cells.values()
    }

    /// Builds a two-axis tape from rows of symbols. Rows may have different
    /// lengths; the extent covers the longest one.
    pub fn from_rows<I, J>(rows: I) -> Self
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = T>,
    {
        let mut tape = Tape {
            axes: 2,
            cells: HashMap::new(),
            extent: vec![0, 0],
        };
        for (row, symbols) in rows.into_iter().enumerate() {
            for (column, symbol) in symbols.into_iter().enumerate() {
                tape.cells.insert(vec![row as i64, column as i64], symbol);
                tape.extent[0] = tape.extent[0].max(row as i64 + 1);
                tape.extent[1] = tape.extent[1].max(column as i64 + 1);
            }
        }
        tape
    }

    fn check_coordinates(&self, at: &[i64]) -> Result<(), AutomatonError> {
        if at.len() != self.axes {
            return Err(AutomatonError::AxisMismatch {
                expected: self.axes,
                found: at.len(),
            });
        }
        if let Some(axis) = at.iter().position(|&coordinate| coordinate < 0) {
            return Err(AutomatonError::OutOfBounds {
                head: at.to_vec(),
                axis,
            });
        }
        Ok(())
    }
}

impl<T> FromIterator<T> for Tape<T> {
    /// Collects a symbol sequence into a classic one-axis tape.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut cells = HashMap::new();
        let mut length = 0;
        for (index, symbol) in iter.into_iter().enumerate() {
            cells.insert(vec![index as i64], symbol);
            length = index as i64 + 1;
        }
        Tape {
            axes: 1,
            cells,
            extent: vec![length],
        }
    }
}
