//! Creature locomotion capabilities.

bitflags::bitflags! {
    /// What a creature can do about the terrain in its way.
    ///
    /// The navigation cost model consults these when pricing cells:
    /// burrowers pay a finite cost for solid walls, flyers skip ground
    /// hazards, and intelligence gates obstacles such as closed doors
    /// (reserved for when the terrain set grows them).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u8 {
        /// Can operate obstacles that require understanding (doors, levers).
        const INTELLIGENT = 1 << 0;
        /// Crosses ground hazards at base cost.
        const FLYING = 1 << 1;
        /// Tunnels through solid walls at a high but finite cost.
        const BURROWING = 1 << 2;
    }
}

impl Capabilities {
    pub fn is_intelligent(self) -> bool {
        self.contains(Capabilities::INTELLIGENT)
    }

    pub fn can_fly(self) -> bool {
        self.contains(Capabilities::FLYING)
    }

    pub fn can_burrow(self) -> bool {
        self.contains(Capabilities::BURROWING)
    }
}

/// Missing capability data falls back to the safe baseline: intelligent,
/// no flight, no burrowing.
impl Default for Capabilities {
    fn default() -> Self {
        Capabilities::INTELLIGENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_intelligent_ground_walker() {
        let caps = Capabilities::default();
        assert!(caps.is_intelligent());
        assert!(!caps.can_fly());
        assert!(!caps.can_burrow());
    }
}
