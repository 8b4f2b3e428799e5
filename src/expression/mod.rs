use std::{
    num::NonZeroU32,
    ops::{Add, Mul},
};

use crate::DiceError;

mod parse;
mod print;
pub mod random;

// `None` for anything that can't be a count or a number of sides.
fn positive(n: i64) -> Option<NonZeroU32> {
    u32::try_from(n).ok().and_then(NonZeroU32::new)
}

const fn standard(sides: u32) -> Die {
    match NonZeroU32::new(sides) {
        Some(sides) => Die { sides },
        None => panic!("a die needs at least one side"),
    }
}

/// A single die, rolling a value between 1 and `sides`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Die {
    sides: NonZeroU32,
}

impl Die {
    pub const D4: Die = standard(4);
    pub const D6: Die = standard(6);
    pub const D8: Die = standard(8);
    pub const D10: Die = standard(10);
    pub const D12: Die = standard(12);
    pub const D20: Die = standard(20);
    pub const D100: Die = standard(100);

    /// Fails with [`DiceError::InvalidSides`] unless `sides >= 1`.
    pub fn new(sides: i64) -> Result<Self, DiceError> {
        positive(sides).map(|sides| Die { sides }).ok_or(DiceError::InvalidSides(sides))
    }

    pub fn sides(&self) -> u32 {
        self.sides.get()
    }
}

/// `count` dice of the same kind, rolled independently and summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceGroup {
    count: NonZeroU32,
    die: Die,
}

impl DiceGroup {
    /// Fails with [`DiceError::InvalidCount`] unless `count >= 1`.
    pub fn new(count: i64, die: Die) -> Result<Self, DiceError> {
        let count = positive(count).ok_or(DiceError::InvalidCount(count))?;
        Ok(Self { count, die })
    }

    pub fn count(&self) -> u32 {
        self.count.get()
    }

    pub fn die(&self) -> Die {
        self.die
    }

    fn scaled(&self, factor: i64) -> Result<Self, DiceError> {
        let factor = positive(factor).ok_or(DiceError::InvalidCount(factor))?;
        let count = self.count.checked_mul(factor).ok_or(DiceError::Overflow)?;
        Ok(Self { count, die: self.die })
    }
}

/// Terms added together. A `Sum` always has at least two terms and never
/// contains another `Sum`: nested sums are spliced into their parent when
/// the sum is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Expression>", into = "Vec<Expression>")
)]
pub struct Sum {
    terms: Vec<Expression>,
}

fn flatten(terms: impl IntoIterator<Item = Expression>) -> Vec<Expression> {
    let mut flat = Vec::new();
    for term in terms {
        match term {
            Expression::Sum(sum) => flat.extend(sum.terms),
            term => flat.push(term),
        }
    }
    flat
}

impl Sum {
    pub fn terms(&self) -> &[Expression] {
        &self.terms
    }
}

/// Fails with [`DiceError::TooFewTerms`] unless the flattened terms number
/// at least two. [`Expression::sum`] is the constructor that never fails.
impl TryFrom<Vec<Expression>> for Sum {
    type Error = DiceError;

    fn try_from(terms: Vec<Expression>) -> Result<Self, DiceError> {
        let terms = flatten(terms);
        if terms.len() < 2 {
            return Err(DiceError::TooFewTerms(terms.len()));
        }
        Ok(Self { terms })
    }
}

impl From<Sum> for Vec<Expression> {
    fn from(sum: Sum) -> Self {
        sum.terms
    }
}

/// A dice formula like `3d6 + 2d10 + 4`, not rolled yet.
///
/// Expressions are built with the constructors ([`Expression::die`],
/// [`Expression::group`], [`Expression::constant`], [`Expression::sum`]) and
/// combined with [`Expression::plus`] and [`Expression::scale`], or the `+`
/// and `*` operators layered on top of them. Nothing is ever modified in
/// place, every combination returns a new expression.
/// ```
/// # use dicebag::{d, Expression};
/// let attack = 3 * d(6)? + 2 * d(10)? + 4;
/// assert_eq!(attack.to_string(), "3d6 + 2d10 + 4");
/// assert_eq!(attack.terms().len(), 3);
/// assert_eq!(attack, "3d6 + 2d10 + 4".parse::<Expression>()?);
/// # Ok::<(), dicebag::DiceError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    Die(Die),
    Group(DiceGroup),
    Constant(i64),
    Sum(Sum),
}

impl Expression {
    pub fn die(sides: i64) -> Result<Self, DiceError> {
        Die::new(sides).map(Expression::Die)
    }

    pub fn group(count: i64, sides: i64) -> Result<Self, DiceError> {
        let die = Die::new(sides)?;
        DiceGroup::new(count, die).map(Expression::Group)
    }

    pub fn constant(value: i64) -> Self {
        Expression::Constant(value)
    }

    /// Add `terms` together, splicing in the terms of nested sums.
    ///
    /// No terms at all make `0` and a single term is returned as it is, so
    /// an [`Expression::Sum`] always has two terms or more.
    pub fn sum(terms: impl IntoIterator<Item = Expression>) -> Self {
        let mut terms = flatten(terms);
        match terms.len() {
            0 => Expression::Constant(0),
            1 => terms.remove(0),
            _ => Expression::Sum(Sum { terms }),
        }
    }

    /// The top-level terms, one per line of [`Roll::pretty`](crate::Roll::pretty).
    pub fn terms(&self) -> &[Expression] {
        match self {
            Expression::Sum(sum) => sum.terms(),
            term => std::slice::from_ref(term),
        }
    }

    /// `self + other`, keeping the terms of both sides in order.
    pub fn plus(&self, other: &Expression) -> Expression {
        Expression::sum(self.terms().iter().chain(other.terms()).cloned())
    }

    /// Multiply by an integer.
    ///
    /// Dice turn into a group with `factor` times as many dice, constants
    /// are multiplied and sums are scaled term by term.
    ///
    /// # Errors
    /// [`DiceError::InvalidCount`] if the expression contains dice and
    /// `factor < 1`, [`DiceError::Overflow`] if a count or a constant
    /// overflows.
    pub fn scale(&self, factor: i64) -> Result<Expression, DiceError> {
        match self {
            Expression::Die(die) => DiceGroup::new(factor, *die).map(Expression::Group),
            Expression::Group(group) => group.scaled(factor).map(Expression::Group),
            Expression::Constant(value) => {
                value.checked_mul(factor).map(Expression::Constant).ok_or(DiceError::Overflow)
            }
            Expression::Sum(sum) => sum
                .terms
                .iter()
                .map(|term| term.scale(factor))
                .collect::<Result<Vec<_>, _>>()
                .map(Expression::sum),
        }
    }

    /// The text a roll uses to label this term, `d6`, `3d6` or `4`.
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Smallest and largest total a roll can have.
    pub fn bounds(&self) -> (i64, i64) {
        match self {
            Expression::Die(die) => (1, die.sides().into()),
            Expression::Group(group) => {
                let count = i64::from(group.count());
                (count, count.saturating_mul(group.die.sides().into()))
            }
            Expression::Constant(value) => (*value, *value),
            Expression::Sum(sum) => sum.terms.iter().map(Expression::bounds).fold(
                (0, 0),
                |(low, high), (a, b)| (low.saturating_add(a), high.saturating_add(b)),
            ),
        }
    }
}

impl From<Die> for Expression {
    fn from(die: Die) -> Self {
        Expression::Die(die)
    }
}

impl From<DiceGroup> for Expression {
    fn from(group: DiceGroup) -> Self {
        Expression::Group(group)
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Expression::Constant(value)
    }
}

impl Add<Self> for Expression {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Expression::sum([self, other])
    }
}

impl Add<&Self> for Expression {
    type Output = Self;

    fn add(self, other: &Self) -> Self {
        Expression::sum([self, other.clone()])
    }
}

impl Add<i64> for Expression {
    type Output = Self;

    fn add(self, other: i64) -> Self {
        Expression::sum([self, Expression::Constant(other)])
    }
}

impl Add<Expression> for i64 {
    type Output = Expression;

    fn add(self, other: Expression) -> Expression {
        Expression::sum([Expression::Constant(self), other])
    }
}

/// # Panics
/// If [`Expression::scale`] fails, for example `0 * d(6)?`.
impl Mul<Expression> for i64 {
    type Output = Expression;

    fn mul(self, other: Expression) -> Expression {
        match other.scale(self) {
            Ok(scaled) => scaled,
            Err(err) => panic!("{self} * {other}: {err}"),
        }
    }
}

/// # Panics
/// If [`Expression::scale`] fails.
impl Mul<i64> for Expression {
    type Output = Self;

    fn mul(self, other: i64) -> Self {
        other * self
    }
}
