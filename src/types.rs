//! Small shared vocabulary: which face of the rule, which body part, which edge.

use std::fmt;

/// Face of the slide rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Front,
    Rear,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Front, Side::Rear];
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Front => write!(f, "front"),
            Side::Rear => write!(f, "rear"),
        }
    }
}

/// Body part a scale is mounted on, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RulePart {
    StatorTop,
    Slide,
    StatorBottom,
}

impl RulePart {
    pub const ALL: [RulePart; 3] = [RulePart::StatorTop, RulePart::Slide, RulePart::StatorBottom];
}

impl fmt::Display for RulePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulePart::StatorTop => write!(f, "stator_top"),
            RulePart::Slide => write!(f, "slide"),
            RulePart::StatorBottom => write!(f, "stator_bottom"),
        }
    }
}

/// Edge a scale's ticks and numerals hang from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    Upper,
    Lower,
}

/// A value kept separately for each face of the rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerSide<T> {
    pub front: T,
    pub rear: T,
}

impl<T> PerSide<T> {
    pub fn new(front: T, rear: T) -> Self {
        Self { front, rear }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Front => &self.front,
            Side::Rear => &self.rear,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Front => &mut self.front,
            Side::Rear => &mut self.rear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_are_ordered_top_to_bottom() {
        let mut parts = vec![RulePart::StatorBottom, RulePart::StatorTop, RulePart::Slide];
        parts.sort();
        assert_eq!(parts, RulePart::ALL);
    }

    #[test]
    fn per_side_indexes_by_face() {
        let mut v = PerSide::new(1, 2);
        *v.get_mut(Side::Rear) += 10;
        assert_eq!(*v.get(Side::Front), 1);
        assert_eq!(*v.get(Side::Rear), 12);
    }
}
