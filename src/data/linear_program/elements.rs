//! # Building blocks to describe linear programs.
use std::ops::Not;

use enum_map::{Enum, EnumMap};

/// Relation between the left-hand side expression and the right-hand side of a constraint.
///
/// Read "from expression to constant": `Less` means `<a, x> <= b`.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Enum)]
pub enum ConstraintRelation {
    Less,
    Equal,
    Greater,
}

impl ConstraintRelation {
    /// Operator as written in the LP file format.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            ConstraintRelation::Less => "<=",
            ConstraintRelation::Equal => "=",
            ConstraintRelation::Greater => ">=",
        }
    }

    /// Bounds of the slack `s` in `<a, x> + s = b`.
    #[must_use]
    pub fn slack_bounds(self) -> Bounds {
        match self {
            ConstraintRelation::Less => bounds(0_f64, f64::INFINITY),
            ConstraintRelation::Equal => bounds(0_f64, 0_f64),
            ConstraintRelation::Greater => bounds(f64::NEG_INFINITY, 0_f64),
        }
    }
}

/// Direction of a bound.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Enum)]
pub enum BoundDirection {
    /// `x >= l`
    Lower,
    /// `x <= u`
    Upper,
}

impl BoundDirection {
    /// Sign of a movement towards this bound.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            BoundDirection::Lower => -1_f64,
            BoundDirection::Upper => 1_f64,
        }
    }
}

impl Not for BoundDirection {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Lower => Self::Upper,
            Self::Upper => Self::Lower,
        }
    }
}

/// Lower and upper bound of a variable; either may be infinite.
pub type Bounds = EnumMap<BoundDirection, f64>;

/// Shorthand to create `Bounds`.
#[must_use]
pub fn bounds(lower: f64, upper: f64) -> Bounds {
    enum_map::enum_map! {
        BoundDirection::Lower => lower,
        BoundDirection::Upper => upper,
    }
}

/// Direction of optimization.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Objective {
    Maximize,
    #[default]
    Minimize,
}

impl Objective {
    /// Factor that turns a cost in this sense into a cost to minimize.
    #[must_use]
    pub fn minimization_factor(self) -> f64 {
        match self {
            Objective::Maximize => -1_f64,
            Objective::Minimize => 1_f64,
        }
    }
}

/// An interval of values, used for sensitivity ranges; either end may be infinite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Range {
    /// Smallest value in the range.
    pub lower: f64,
    /// Largest value in the range.
    pub upper: f64,
}

impl Range {
    /// Create a new range.
    #[must_use]
    pub fn new(lower: f64, upper: f64) -> Self {
        debug_assert!(lower <= upper);

        Self { lower, upper }
    }

    /// The range `(-inf, inf)`.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Whether `value` lies in the (closed) range.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Mirror the range around zero, used when translating between minimization and maximization.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::new(-self.upper, -self.lower)
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::elements::{BoundDirection, ConstraintRelation, Range};

    #[test]
    fn slack_bounds() {
        let less = ConstraintRelation::Less.slack_bounds();
        assert_eq!(less[BoundDirection::Lower], 0_f64);
        assert_eq!(less[BoundDirection::Upper], f64::INFINITY);

        let greater = ConstraintRelation::Greater.slack_bounds();
        assert_eq!(greater[BoundDirection::Lower], f64::NEG_INFINITY);
        assert_eq!(greater[BoundDirection::Upper], 0_f64);
    }

    #[test]
    fn range() {
        let range = Range::new(-1_f64, 3_f64).negate();
        assert_eq!(range, Range::new(-3_f64, 1_f64));
        assert!(range.contains(0_f64));
        assert!(!range.contains(2_f64));
        assert!(Range::unbounded().contains(1e300));
        assert_eq!(!BoundDirection::Lower, BoundDirection::Upper);
    }
}
