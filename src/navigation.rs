//! Keyboard navigation between editable cells.
//!
//! Navigation works purely in flat-index space: a direction is a signed
//! stride, and the resolver walks that stride until it finds an editable
//! cell or falls off the table.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{DimtableError, Result};
use crate::types::{DimensionSpec, FlatIndex};

/// A navigation request from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    TabForward,
    TabBackward,
}

impl Direction {
    /// Map a `KeyboardEvent.key` name to a direction.
    ///
    /// `shift` only matters for `Tab`. Any other key is not a navigation key.
    #[must_use]
    pub fn from_key(key: &str, shift: bool) -> Option<Self> {
        match key {
            "ArrowUp" | "Up" => Some(Self::Up),
            "ArrowDown" | "Down" => Some(Self::Down),
            "ArrowLeft" | "Left" => Some(Self::Left),
            "ArrowRight" | "Right" => Some(Self::Right),
            "Tab" if shift => Some(Self::TabBackward),
            "Tab" => Some(Self::TabForward),
            _ => None,
        }
    }

    /// The flat-index step this direction takes in a table of `spec`'s shape.
    #[must_use]
    pub fn step(self, spec: &DimensionSpec) -> Step {
        match self {
            Self::Up => Step::backward(spec.col_cell_count()),
            Self::Down => Step::forward(spec.col_cell_count()),
            Self::Left | Self::TabBackward => Step::backward(1),
            Self::Right | Self::TabForward => Step::forward(1),
        }
    }
}

/// A signed stride through flat-index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    stride: usize,
    forward: bool,
}

impl Step {
    #[must_use]
    pub fn forward(stride: usize) -> Self {
        Self {
            stride,
            forward: true,
        }
    }

    #[must_use]
    pub fn backward(stride: usize) -> Self {
        Self {
            stride,
            forward: false,
        }
    }

    /// The step as a signed integer, or `None` if the stride does not fit.
    #[must_use]
    pub fn signed(self) -> Option<isize> {
        let stride = isize::try_from(self.stride).ok()?;
        Some(if self.forward { stride } else { -stride })
    }

    /// Apply the step to `index`, returning `None` below zero or on overflow.
    #[must_use]
    pub fn apply(self, index: FlatIndex) -> Option<FlatIndex> {
        if self.forward {
            index.checked_add(self.stride)
        } else {
            index.checked_sub(self.stride)
        }
    }
}

/// Find the next editable cell from `current` in `direction`.
///
/// Non-editable cells are skipped. Returns `Ok(None)` when the walk leaves
/// the table without meeting an editable cell. Every [`DimensionSpec`] has
/// non-zero strides, so each candidate is strictly further from `current`
/// than the last and the bounds check alone ends the walk.
///
/// # Errors
/// Returns [`DimtableError::IndexOutOfRange`] if `current` is not a cell of
/// the table.
pub fn find_next_editable_flat_index<F>(
    current: FlatIndex,
    direction: Direction,
    spec: &DimensionSpec,
    mut is_editable: F,
) -> Result<Option<FlatIndex>>
where
    F: FnMut(FlatIndex) -> bool,
{
    if !spec.contains(current) {
        return Err(DimtableError::IndexOutOfRange {
            index: current,
            cell_count: spec.cell_count(),
        });
    }

    let step = direction.step(spec);
    if step.stride == 0 {
        return Ok(None);
    }

    let mut candidate = current;
    while let Some(next) = step.apply(candidate).filter(|&ix| spec.contains(ix)) {
        if is_editable(next) {
            debug!("{direction:?} from {current} -> {next}");
            return Ok(Some(next));
        }
        candidate = next;
    }

    debug!(
        "{direction:?} (step {:?}) from {current}: no editable cell before the edge",
        step.signed()
    );
    Ok(None)
}
