//! Odometer over the index tuples of one axis.
//!
//! The innermost (last) dimension varies fastest, so tuples come out in the
//! same order as the flat index of that axis.

/// Walks every index tuple of an axis, innermost dimension first.
#[derive(Debug, Clone)]
pub struct DimIter {
    lengths: Vec<usize>,
    indexes: Vec<usize>,
    finished: bool,
    started: bool,
}

impl DimIter {
    /// Create an odometer positioned at the all-zero tuple.
    ///
    /// An axis with a zero-length dimension has no tuples at all.
    #[must_use]
    pub fn new(lengths: &[usize]) -> Self {
        Self {
            lengths: lengths.to_vec(),
            indexes: vec![0; lengths.len()],
            finished: lengths.contains(&0),
            started: false,
        }
    }

    /// Current index tuple.
    #[must_use]
    pub fn get(&self) -> &[usize] {
        &self.indexes
    }

    /// Whether the odometer has rolled over past the last tuple.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.finished
    }

    /// Move to the next tuple.
    ///
    /// Returns the position of the outermost dimension that changed, or
    /// `None` once every tuple has been visited. Dimensions after the
    /// returned one were reset to zero.
    pub fn advance(&mut self) -> Option<usize> {
        if self.finished {
            return None;
        }
        for (dim, (ix, &len)) in self
            .indexes
            .iter_mut()
            .zip(&self.lengths)
            .enumerate()
            .rev()
        {
            if *ix + 1 == len {
                *ix = 0;
            } else {
                *ix += 1;
                return Some(dim);
            }
        }
        self.finished = true;
        None
    }

    /// All dimensions except the outermost are at their first value.
    #[must_use]
    pub fn is_first_of_group(&self) -> bool {
        self.indexes.iter().skip(1).all(|&ix| ix == 0)
    }

    /// All dimensions except the outermost are at their last value.
    #[must_use]
    pub fn is_last_of_group(&self) -> bool {
        self.indexes
            .iter()
            .zip(&self.lengths)
            .skip(1)
            .all(|(&ix, &len)| ix + 1 == len)
    }
}

impl Iterator for DimIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            self.advance();
        } else {
            self.started = true;
        }
        if self.finished {
            None
        } else {
            Some(self.indexes.clone())
        }
    }
}
