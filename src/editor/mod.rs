//! Cell editing session for a dimtable.
//!
//! `EditSession` holds everything the browser binding needs between events:
//! - which cells are read-only (header-like cells navigation skips)
//! - which cells have been turned into input fields, and which has focus
//! - the current value of every cell
//!
//! The DOM binding (`dom.rs`, wasm32 only) forwards clicks and key presses
//! here and applies the returned [`InputSpec`]s to the page.

#[cfg(target_arch = "wasm32")]
mod dom;
mod input;

use std::collections::{BTreeSet, HashMap, HashSet};

use log::debug;

use crate::declaration::{cell_id, TableDeclaration};
use crate::error::{DimtableError, Result};
use crate::navigation::{find_next_editable_flat_index, Direction};
use crate::types::{DimensionSpec, FlatIndex};

#[cfg(target_arch = "wasm32")]
pub use dom::DimTable;
pub use input::{InputConfig, InputFactory, InputSpec, TextInputFactory, DETECT_KEYS_CLASS};

/// Result of a key press on an open cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    /// The key was a navigation key; the caller should suppress its default
    /// action even when no cell was reached.
    pub consumed: bool,
    /// Cell that received focus.
    pub target: Option<FlatIndex>,
    /// Field to install in `target`, if it was not open yet.
    pub input: Option<InputSpec>,
}

/// Editing state of one table.
pub struct EditSession {
    spec: DimensionSpec,
    prefix: String,
    /// Editability of cells not listed in `exceptions`.
    editable_by_default: bool,
    exceptions: HashSet<FlatIndex>,
    values: HashMap<FlatIndex, String>,
    opened: BTreeSet<FlatIndex>,
    focused: Option<FlatIndex>,
    factory: Box<dyn InputFactory>,
}

impl EditSession {
    /// Create a session where every cell is editable, using the default
    /// text input.
    ///
    /// # Errors
    /// Returns [`DimtableError::MalformedSpec`] if the declaration's lengths
    /// do not describe a table.
    pub fn new(declaration: &TableDeclaration) -> Result<Self> {
        Self::with_factory(declaration, Box::new(TextInputFactory::default()))
    }

    /// Create a session that builds fields with `factory`.
    ///
    /// # Errors
    /// Returns [`DimtableError::MalformedSpec`] if the declaration's lengths
    /// do not describe a table.
    pub fn with_factory(
        declaration: &TableDeclaration,
        factory: Box<dyn InputFactory>,
    ) -> Result<Self> {
        Ok(Self {
            spec: declaration.spec()?,
            prefix: declaration.prefix.clone(),
            editable_by_default: true,
            exceptions: HashSet::new(),
            values: HashMap::new(),
            opened: BTreeSet::new(),
            focused: None,
            factory,
        })
    }

    #[must_use]
    pub fn spec(&self) -> &DimensionSpec {
        &self.spec
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Mark a cell editable or read-only.
    ///
    /// # Errors
    /// Returns [`DimtableError::IndexOutOfRange`] for a cell outside the table.
    pub fn set_editable(&mut self, flat: FlatIndex, editable: bool) -> Result<()> {
        self.check(flat)?;
        if editable == self.editable_by_default {
            self.exceptions.remove(&flat);
        } else {
            self.exceptions.insert(flat);
        }
        Ok(())
    }

    /// Mark every cell editable or read-only, dropping per-cell settings.
    ///
    /// A binding that only knows about the cells present on the page starts
    /// from `false` and enables those, so cells without an element are
    /// skipped by navigation.
    pub fn set_all_editable(&mut self, editable: bool) {
        self.editable_by_default = editable;
        self.exceptions.clear();
    }

    #[must_use]
    pub fn is_editable(&self, flat: FlatIndex) -> bool {
        self.spec.contains(flat) && editable(self.editable_by_default, &self.exceptions, flat)
    }

    #[must_use]
    pub fn is_open(&self, flat: FlatIndex) -> bool {
        self.opened.contains(&flat)
    }

    #[must_use]
    pub fn focused(&self) -> Option<FlatIndex> {
        self.focused
    }

    /// Current value of a cell (empty if never set).
    #[must_use]
    pub fn value(&self, flat: FlatIndex) -> &str {
        self.values.get(&flat).map_or("", String::as_str)
    }

    /// Store the value of a cell, either its initial content or user input.
    ///
    /// # Errors
    /// Returns [`DimtableError::IndexOutOfRange`] for a cell outside the table.
    pub fn set_value(&mut self, flat: FlatIndex, value: impl Into<String>) -> Result<()> {
        self.check(flat)?;
        self.values.insert(flat, value.into());
        Ok(())
    }

    /// Put a cell into edit mode and focus it.
    ///
    /// Opening is idempotent: a cell that is already open only takes focus
    /// and `None` is returned, since its field already exists.
    ///
    /// # Errors
    /// Returns [`DimtableError::IndexOutOfRange`] for a cell outside the
    /// table and [`DimtableError::NotEditable`] for a read-only cell.
    pub fn open(&mut self, flat: FlatIndex) -> Result<Option<InputSpec>> {
        self.check(flat)?;
        if !self.is_editable(flat) {
            return Err(DimtableError::NotEditable(flat));
        }

        self.focused = Some(flat);
        if !self.opened.insert(flat) {
            return Ok(None);
        }

        debug!("open cell {flat}");
        let name = cell_id(&self.prefix, flat);
        Ok(Some(self.factory.create_input(self.value(flat), &name)))
    }

    /// Handle a key press in the focused cell.
    ///
    /// # Errors
    /// Propagates navigation errors; see [`EditSession::handle_key_at`].
    pub fn handle_key(&mut self, key: &str, shift: bool) -> Result<KeyOutcome> {
        match self.focused {
            Some(current) => self.handle_key_at(current, key, shift),
            None => Ok(KeyOutcome::default()),
        }
    }

    /// Handle a key press in the field of cell `current`.
    ///
    /// Navigation keys move focus to the next editable cell in their
    /// direction, opening it if needed. At the table edge focus stays put.
    ///
    /// # Errors
    /// Returns [`DimtableError::IndexOutOfRange`] if `current` is outside
    /// the table.
    pub fn handle_key_at(
        &mut self,
        current: FlatIndex,
        key: &str,
        shift: bool,
    ) -> Result<KeyOutcome> {
        let Some(direction) = Direction::from_key(key, shift) else {
            return Ok(KeyOutcome::default());
        };

        let (by_default, exceptions) = (self.editable_by_default, &self.exceptions);
        let next = find_next_editable_flat_index(current, direction, &self.spec, |ix| {
            editable(by_default, exceptions, ix)
        })?;

        let Some(target) = next else {
            return Ok(KeyOutcome {
                consumed: true,
                target: None,
                input: None,
            });
        };

        let input = self.open(target)?;
        Ok(KeyOutcome {
            consumed: true,
            target: Some(target),
            input,
        })
    }

    /// `(field name, value)` of every open cell in flat order; what the
    /// enclosing form submits.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(String, String)> {
        self.opened
            .iter()
            .map(|&flat| (cell_id(&self.prefix, flat), self.value(flat).to_string()))
            .collect()
    }

    fn check(&self, flat: FlatIndex) -> Result<()> {
        if self.spec.contains(flat) {
            Ok(())
        } else {
            Err(DimtableError::IndexOutOfRange {
                index: flat,
                cell_count: self.spec.cell_count(),
            })
        }
    }
}

fn editable(by_default: bool, exceptions: &HashSet<FlatIndex>, flat: FlatIndex) -> bool {
    by_default != exceptions.contains(&flat)
}
