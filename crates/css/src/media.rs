//! Breakpoint ranges
//!
//! A breakpoint is the `[min-width, max-width]` viewport range a block of
//! declarations applies to, rendered as an `@media` condition list.

use std::fmt;

/// Viewport range, inclusive on both ends; `max_width: None` is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Breakpoint {
    pub min_width: u32,
    pub max_width: Option<u32>,
}

impl Breakpoint {
    /// The range covering every viewport
    pub const UNBOUNDED: Breakpoint = Breakpoint { min_width: 0, max_width: None };

    pub fn new(min_width: Option<u32>, max_width: Option<u32>) -> Self {
        Self {
            min_width: min_width.unwrap_or(0),
            max_width,
        }
    }

    /// Whether this is the default `[0, +inf)` range
    pub fn is_unbounded(&self) -> bool {
        *self == Self::UNBOUNDED
    }

    fn max(&self) -> u32 {
        self.max_width.unwrap_or(u32::MAX)
    }

    /// Two ranges overlap unless one lies entirely below the other
    pub fn overlaps(&self, other: &Breakpoint) -> bool {
        let below = other.max() < self.min_width;
        let above = other.min_width > self.max();
        !(below || above)
    }

    /// `@media` condition list, `None` for the unbounded range
    pub fn media_query(&self) -> Option<String> {
        let mut conditions = Vec::with_capacity(2);

        if self.min_width != 0 {
            conditions.push(format!("(min-width:{}px)", self.min_width));
        }
        if let Some(max) = self.max_width {
            conditions.push(format!("(max-width:{}px)", max));
        }

        if conditions.is_empty() {
            None
        } else {
            Some(conditions.join(" and "))
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_width {
            Some(max) => write!(f, "[{}, {}]", self.min_width, max),
            None => write!(f, "[{}, +inf)", self.min_width),
        }
    }
}
