//! LED frame and pattern types

use std::time::Duration;

/// One discrete LED frame: a color held for a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub duration: Duration,
}

impl Frame {
    /// A frame holding a color for `millis` milliseconds.
    pub const fn new(red: u8, green: u8, blue: u8, millis: u64) -> Self {
        Self {
            red,
            green,
            blue,
            duration: Duration::from_millis(millis),
        }
    }

    /// An off (black) frame.
    pub const fn off(millis: u64) -> Self {
        Self::new(0, 0, 0, millis)
    }
}

/// An ordered frame sequence with repeat semantics.
///
/// A `repeat` of 0 plays the sequence once; `repeat_delay` runs after the
/// whole sequence, before any potential repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub frames: Vec<Frame>,
    pub repeat: u32,
    pub repeat_delay: Duration,
}

impl Pattern {
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
