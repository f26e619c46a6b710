//! Arena configuration parameters.

/// Configuration for a managed arena region.
///
/// The capacity is fixed for the lifetime of the region — the arena
/// reports exhaustion rather than growing, because growth would break
/// the address stability cross-process references rely on. Validated at
/// arena construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Total region size in bytes, header included.
    ///
    /// Default: 1 MiB. Must be a multiple of 8 and large enough for
    /// the header plus at least one minimal block.
    pub capacity: u32,
}

impl ArenaConfig {
    /// Default region capacity: 1 MiB.
    pub const DEFAULT_CAPACITY: u32 = 1024 * 1024;

    /// Create a config with the given capacity in bytes.
    pub fn new(capacity: u32) -> Self {
        Self { capacity }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_one_mib() {
        assert_eq!(ArenaConfig::default().capacity, 1024 * 1024);
    }

    #[test]
    fn explicit_capacity_preserved() {
        assert_eq!(ArenaConfig::new(4096).capacity, 4096);
    }
}
