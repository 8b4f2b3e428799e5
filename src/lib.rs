//! Tabletop dice rolls as composable expressions.
//!
//! Build an [`Expression`] out of dice, groups of dice and constants, roll it
//! as many times as you like and print what happened:
//! ```
//! use dicebag::{d, ScriptedRoller};
//!
//! let attack = 3 * d(6)? + 2 * d(10)? + 4;
//! let roll = attack.roll_with(&mut ScriptedRoller::new([1, 4, 5, 7, 3]));
//! assert_eq!(roll.total(), 24);
//! println!("{}", roll.pretty(3));
//! // prints
//! //       3d6 : 10  = 1 + 4 + 5
//! //  +   2d10 : 10  = 7 + 3
//! //  +      4 : 4
//! // ---------------------------
//! //  =          24
//! # Ok::<(), dicebag::DiceError>(())
//! ```
//!
//! Outside of tests, [`Expression::roll`] uses the thread-local generator
//! and [`Expression::roll_with`] takes any `rand` generator.

mod error;
mod expression;
mod roll;

pub use error::DiceError;
pub use expression::{
    DiceGroup, Die, Expression, Sum,
    random::{DieRoller, ScriptedRoller},
};
pub use roll::{Component, Roll};

/// A single die with `sides` faces.
///
/// # Errors
/// [`DiceError::InvalidSides`] if `sides < 1`.
pub fn d(sides: i64) -> Result<Expression, DiceError> {
    Expression::die(sides)
}

/// Parse dice notation like `"2d8 + 3"` and roll it.
/// ```
/// let roll = dicebag::roll("2d8 + 3")?;
/// assert!((5..=19).contains(&roll.total()));
/// # Ok::<(), dicebag::DiceError>(())
/// ```
///
/// # Errors
/// Whatever parsing `notation` fails with, see [`Expression`]'s `FromStr`.
pub fn roll(notation: &str) -> Result<Roll, DiceError> {
    let expression: Expression = notation.parse()?;
    Ok(expression.roll())
}
