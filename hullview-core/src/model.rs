/// The authoritative geometry dataset and its replacement contract
use crate::error::Result;

/// A dataset that can be checked before it becomes authoritative
pub trait Geometry: Clone {
    fn validate(&self) -> Result<()>;
}

/// Holds the current dataset. Updates swap the whole dataset; there is no
/// partial mutation, so a reader never sees parts of two datasets.
#[derive(Debug, Clone)]
pub struct GeometryModel<G> {
    current: G,
    version: u64,
}

impl<G: Geometry> GeometryModel<G> {
    /// Create a model from its initial dataset
    pub fn new(initial: G) -> Result<Self> {
        initial.validate()?;
        Ok(Self {
            current: initial,
            version: 1,
        })
    }

    /// Validate and substitute the entire dataset. On error the previous
    /// dataset stays in place.
    pub fn replace(&mut self, data: G) -> Result<()> {
        data.validate()?;
        self.current = data;
        self.version += 1;
        Ok(())
    }

    /// Read-only view of the current dataset
    pub fn snapshot(&self) -> &G {
        &self.current
    }

    /// Number of datasets accepted so far, counting the initial one
    pub fn version(&self) -> u64 {
        self.version
    }
}
