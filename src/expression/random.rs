//! Rolling expressions.

use std::num::NonZeroU32;

use rand::{Rng, RngCore, distr::Distribution};

use super::Expression;
use crate::{Component, Roll};

/// A source of die values.
///
/// Every random number generator from `rand` is a `DieRoller`. Tests that
/// need exact values can use a [`ScriptedRoller`] instead.
pub trait DieRoller {
    /// A value in `1..=sides`.
    fn roll_die(&mut self, sides: NonZeroU32) -> u32;
}

impl<R: RngCore + ?Sized> DieRoller for R {
    fn roll_die(&mut self, sides: NonZeroU32) -> u32 {
        self.random_range(1..=sides.get())
    }
}

/// Hands out a fixed sequence of die values, in order.
/// ```
/// use dicebag::{d, ScriptedRoller};
/// let roll = (2 * d(10)?).roll_with(&mut ScriptedRoller::new([7, 3]));
/// assert_eq!(roll.total(), 10);
/// # Ok::<(), dicebag::DiceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRoller {
    values: std::vec::IntoIter<u32>,
}

impl ScriptedRoller {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        let values: Vec<u32> = values.into_iter().collect();
        Self { values: values.into_iter() }
    }

    /// How many values are left in the script.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl DieRoller for ScriptedRoller {
    /// # Panics
    /// When the script is exhausted, or the next value can't come up on the die.
    fn roll_die(&mut self, sides: NonZeroU32) -> u32 {
        let Some(value) = self.values.next() else {
            panic!("scripted roller ran out of values for a d{sides}");
        };
        assert!((1..=sides.get()).contains(&value), "a d{sides} can't roll {value}");
        value
    }
}

impl Expression {
    /// Roll every die in the expression using the thread-local generator.
    pub fn roll(&self) -> Roll {
        self.roll_with(&mut rand::rng())
    }

    /// Roll every die in the expression using `roller`.
    ///
    /// Terms are rolled left to right and every die is drawn separately, so
    /// a [`ScriptedRoller`] sees the dice in the order they are written.
    pub fn roll_with<R: DieRoller + ?Sized>(&self, roller: &mut R) -> Roll {
        let mut components = Vec::with_capacity(self.terms().len());
        self.roll_into(roller, &mut components);
        let roll = Roll::from_components(components);
        log::debug!("rolled {}: {}", self, roll.total());
        roll
    }

    /// Roll the expression and only keep the total.
    pub fn result(&self) -> i64 {
        self.roll().total()
    }

    fn roll_into<R: DieRoller + ?Sized>(&self, roller: &mut R, components: &mut Vec<Component>) {
        let detail: Vec<u32> = match self {
            Expression::Die(die) => vec![roller.roll_die(die.sides)],
            Expression::Group(group) => {
                (0..group.count()).map(|_| roller.roll_die(group.die.sides)).collect()
            }
            Expression::Constant(n) => {
                log::trace!("{}: constant", n);
                components.push(Component::new(n.to_string(), *n, Vec::new()));
                return;
            }
            Expression::Sum(sum) => {
                for term in sum.terms() {
                    term.roll_into(roller, components);
                }
                return;
            }
        };
        let subtotal = detail.iter().map(|&v| i64::from(v)).fold(0i64, i64::saturating_add);
        log::trace!("{}: {:?}", self, detail);
        components.push(Component::new(self.label(), subtotal, detail));
    }
}

impl Distribution<i64> for Expression {
    /// Roll the expression into a single number, rolling dice using `rng`.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        self.roll_with(rng).total()
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::d;

    #[test]
    fn seeded_rolls_repeat() {
        let x = 4 * d(8).unwrap() + d(20).unwrap() + 3;
        let a = x.roll_with(&mut ChaCha8Rng::seed_from_u64(123));
        let b = x.roll_with(&mut ChaCha8Rng::seed_from_u64(123));
        assert_eq!(a, b);
        assert_eq!(a.pretty(3), b.pretty(3));
    }

    #[test]
    fn sample_matches_roll() {
        let x = 3 * d(6).unwrap() + 1;
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let sampled: Vec<i64> = (&mut rng).sample_iter(&x).take(50).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let rolled: Vec<i64> = (0..50).map(|_| x.roll_with(&mut rng).total()).collect();
        assert_eq!(sampled, rolled);
    }

    #[test]
    fn thread_rng_in_range() {
        let x = 2 * d(4).unwrap() + 10;
        for _ in 0..200 {
            let total = x.result();
            assert!((12..=18).contains(&total), "{total}");
        }
    }

    #[test]
    fn script_is_consumed_in_order() {
        let mut roller = ScriptedRoller::new([2, 6, 1, 1]);
        let roll = (d(6).unwrap() + 2 * d(6).unwrap()).roll_with(&mut roller);
        assert_eq!(roller.remaining(), 1);
        assert_eq!(roll.components()[0].detail(), [2]);
        assert_eq!(roll.components()[1].detail(), [6, 1]);
    }

    #[test]
    #[should_panic]
    fn script_runs_out() {
        (3 * d(6).unwrap()).roll_with(&mut ScriptedRoller::new([1, 2]));
    }

    #[test]
    #[should_panic]
    fn script_value_too_large() {
        d(4).unwrap().roll_with(&mut ScriptedRoller::new([5]));
    }
}
