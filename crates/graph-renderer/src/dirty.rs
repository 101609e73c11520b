//! Layout dirty tracking.

bitflags::bitflags! {
    /// Reasons the chart layout must be recomputed on the next `update`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LayoutDirty: u8 {
        /// Entity target values or the entity count changed.
        const DATA = 0b0000_0001;
        /// The canvas was resized.
        const SIZE = 0b0000_0010;
        /// The chart was just constructed.
        const INITIAL = 0b0000_0100;
    }
}

impl LayoutDirty {
    /// Returns true if the next update has to recompute geometry.
    #[inline]
    pub fn needs_layout(&self) -> bool {
        !self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_clean() {
        let flags = LayoutDirty::default();
        assert!(!flags.needs_layout());
        assert!((flags | LayoutDirty::SIZE).needs_layout());
    }
}
