use std::fmt::Display;
use crate::core::*;

/// One-dimensional launch geometry: `global` work items partitioned into groups of `local` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NdRange {
    global: usize,
    local: usize
}

impl NdRange {
    /// Creates a new launch geometry.
    /// # Errors
    /// - [`ErrorType::InvalidGlobalWorkSize`] if `global` is zero
    /// - [`ErrorType::InvalidWorkGroupSize`] if `local` is zero or doesn't evenly divide `global`
    pub fn new (global: usize, local: usize) -> Result<Self> {
        if global == 0 {
            return Err(Error::new(ErrorType::InvalidGlobalWorkSize, "global work size must be non-zero"));
        }

        if local == 0 {
            return Err(Error::new(ErrorType::InvalidWorkGroupSize, "work-group size must be non-zero"));
        }

        if global % local != 0 {
            return Err(Error::new(
                ErrorType::InvalidWorkGroupSize,
                format!("work-group size {local} doesn't evenly divide the global work size {global}")
            ));
        }

        Ok(Self { global, local })
    }

    /// Total number of work items
    #[inline(always)]
    pub const fn global_size (&self) -> usize {
        self.global
    }

    /// Number of work items per group
    #[inline(always)]
    pub const fn local_size (&self) -> usize {
        self.local
    }

    /// Number of groups
    #[inline(always)]
    pub const fn group_count (&self) -> usize {
        self.global / self.local
    }
}

impl Display for NdRange {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} items in {} group(s) of {}", self.global, self.group_count(), self.local)
    }
}
