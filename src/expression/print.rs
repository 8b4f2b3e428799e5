use std::fmt;

use super::{DiceGroup, Die, Expression, Sum};

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "d{}", self.sides)
    }
}

impl fmt::Display for DiceGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.count, self.die)
    }
}

impl fmt::Display for Sum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i != 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

/// Displays an expression in dice notation, the same text
/// [`FromStr`](std::str::FromStr) reads back.
/// ```
/// use dicebag::{d, Die, Expression};
/// let x = 2 * Expression::from(Die::D20) + d(6)? + -1;
/// assert_eq!(x.to_string(), "2d20 + d6 + -1");
/// # Ok::<(), dicebag::DiceError>(())
/// ```
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Die(die) => write!(f, "{}", die),
            Expression::Group(group) => write!(f, "{}", group),
            Expression::Constant(n) => write!(f, "{}", n),
            Expression::Sum(sum) => write!(f, "{}", sum),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Die, Expression, d};

    // Given the name of a test, the expected text and an expression, create a
    // test which checks that the expression is displayed as that text
    macro_rules! test {
        ($f:ident, $right:expr, $expr:expr) => {
            #[test]
            fn $f() {
                let a: Expression = $expr;
                assert_eq!($right, a.to_string());
            }
        };
    }

    test!(single_die, "d6", d(6).unwrap());
    test!(group, "3d6", 3 * d(6).unwrap());
    test!(regrouped, "6d6", 2 * (3 * d(6).unwrap()));
    test!(one_die_group, "1d10", 1 * Expression::from(Die::D10));
    test!(constant, "4", Expression::constant(4));
    test!(negative_constant, "-4", Expression::constant(-4));
    test!(sum, "3d6 + 2d10 + 4", 3 * d(6).unwrap() + 2 * d(10).unwrap() + 4);
    test!(nested_sum, "d4 + d6 + d8", d(4).unwrap() + (d(6).unwrap() + d(8).unwrap()));
    test!(scaled_sum, "2d6 + 2", 2 * (d(6).unwrap() + 1));

    #[test]
    fn label_matches_display() {
        let x = 3 * d(6).unwrap() + 2 * d(10).unwrap() + 4;
        let labels: Vec<String> = x.terms().iter().map(Expression::label).collect();
        assert_eq!(labels, ["3d6", "2d10", "4"]);
    }
}
