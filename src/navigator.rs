// ABOUTME: Presentation navigator for the slide-deck library
// ABOUTME: Pure transition function over a 1-based slide position and route addressing

use log::debug;
use serde::Serialize;

use crate::errors::{DeckError, Result};

/// Route prefix used to address a slide by its 1-based position.
pub const ROUTE_PREFIX: &str = "/slides/";

/// A navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Next,
    Prev,
    First,
    Last,
    /// Absolute jump to a 1-based position.
    JumpTo(usize),
    /// Digit key jump, limited to 1-9.
    Digit(u8),
}

/// Animation cue for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Forward,
    Backward,
    #[default]
    None,
}

impl Direction {
    pub fn sign(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
            Direction::None => 0,
        }
    }
}

/// Result of applying an [`Intent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { to: usize, direction: Direction },
    Rejected,
}

impl Transition {
    pub fn target(&self) -> Option<usize> {
        match self {
            Transition::Moved { to, .. } => Some(*to),
            Transition::Rejected => None,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Transition::Moved { direction, .. } => *direction,
            Transition::Rejected => Direction::None,
        }
    }
}

/// Derived navigation flags, recomputed from the live deck on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub current: usize,
    pub total: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Snapshot of a position within a deck of `total` slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    total: usize,
}

impl Navigator {
    /// Fails with `SlideNotFound` unless `1 <= current <= total`.
    pub fn new(current: usize, total: usize) -> Result<Self> {
        if current == 0 || current > total {
            return Err(DeckError::SlideNotFound(format!(
                "position {} of {}",
                current, total
            )));
        }
        Ok(Self { current, total })
    }

    /// Resolve the `{n}` segment of `/slides/{n}`. Only a plain positive
    /// decimal integer inside the deck resolves; nothing is clamped.
    pub fn from_route(segment: &str, total: usize) -> Result<Self> {
        let not_found = || DeckError::SlideNotFound(segment.to_string());
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return Err(not_found());
        }
        let current = segment.parse::<usize>().map_err(|_| not_found())?;
        Self::new(current, total).map_err(|_| not_found())
    }

    /// Resolve a full `/slides/{n}` path.
    pub fn from_path(path: &str, total: usize) -> Result<Self> {
        let segment = path
            .strip_prefix(ROUTE_PREFIX)
            .ok_or_else(|| DeckError::SlideNotFound(path.to_string()))?;
        Self::from_route(segment.trim_end_matches('/'), total)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            current: self.current,
            total: self.total,
            has_next: self.has_next(),
            has_prev: self.has_prev(),
        }
    }

    /// Apply an intent without changing `self`.
    pub fn navigate(&self, intent: Intent) -> Transition {
        let transition = match intent {
            Intent::Next if self.has_next() => self.moved(self.current + 1, Direction::Forward),
            Intent::Prev if self.has_prev() => self.moved(self.current - 1, Direction::Backward),
            Intent::First if self.current != 1 => self.moved(1, Direction::Backward),
            Intent::Last if self.current != self.total => {
                self.moved(self.total, Direction::Forward)
            }
            Intent::JumpTo(n) => self.jump(n),
            Intent::Digit(d) if (1..=9).contains(&d) => self.jump(usize::from(d)),
            _ => Transition::Rejected,
        };
        if transition == Transition::Rejected {
            debug!(
                "Rejected {:?} at slide {} of {}",
                intent, self.current, self.total
            );
        }
        transition
    }

    /// Navigate and return the navigator at the new position; a rejected
    /// intent yields an unchanged copy.
    pub fn advance(&self, intent: Intent) -> (Navigator, Transition) {
        let transition = self.navigate(intent);
        let next = match transition {
            Transition::Moved { to, .. } => Navigator {
                current: to,
                total: self.total,
            },
            Transition::Rejected => *self,
        };
        (next, transition)
    }

    fn jump(&self, n: usize) -> Transition {
        if n == 0 || n > self.total {
            return Transition::Rejected;
        }
        let direction = match n.cmp(&self.current) {
            std::cmp::Ordering::Greater => Direction::Forward,
            std::cmp::Ordering::Less => Direction::Backward,
            std::cmp::Ordering::Equal => Direction::None,
        };
        self.moved(n, direction)
    }

    fn moved(&self, to: usize, direction: Direction) -> Transition {
        Transition::Moved { to, direction }
    }
}

/// Route for a 1-based slide position.
pub fn route_for(position: usize) -> String {
    format!("{}{}", ROUTE_PREFIX, position)
}
