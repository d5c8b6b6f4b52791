//! Animation clock for the topology renderer

/// Frame counter driving every periodic visual quantity.
/// INVARIANT: only moves forward, exactly one step per rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AnimationClock(u64);

impl AnimationClock {
    pub const ZERO: AnimationClock = AnimationClock(0);

    #[inline]
    pub fn new() -> Self {
        Self::ZERO
    }

    /// A clock positioned at an arbitrary frame (for replaying a sequence)
    #[inline]
    pub fn at(frame: u64) -> Self {
        AnimationClock(frame)
    }

    #[inline]
    pub fn frame(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// Step one frame forward and return the new value
    pub fn advance(&mut self) -> u64 {
        self.0 = self.0.saturating_add(1);
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}
