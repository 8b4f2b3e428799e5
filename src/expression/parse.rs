use std::str::FromStr;

use super::Expression;
use crate::DiceError;

/// Parses dice notation such as `3d6 + 2d10 + 4`.
///
/// `*` needs a constant on one side, it scales the other side with
/// [`Expression::scale`].
impl FromStr for Expression {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        notation::expression(s)?
    }
}

fn multiply(left: Expression, right: Expression) -> Result<Expression, DiceError> {
    match (&left, &right) {
        (Expression::Constant(factor), _) => right.scale(*factor),
        (_, Expression::Constant(factor)) => left.scale(*factor),
        _ => Err(DiceError::TypeMismatch { left: left.to_string(), right: right.to_string() }),
    }
}

peg::parser! {
    grammar notation() for str {
        rule number() -> i64 = n:$(['0'..='9']+) {? n.parse::<i64>().or(Err("i64")) }
        rule negative() -> i64 = n:$("-" ['0'..='9']+) {? n.parse::<i64>().or(Err("i64")) }
        pub rule expression() -> Result<Expression, DiceError> = " "* e:arithmetic() " "* { e }
        rule arithmetic() -> Result<Expression, DiceError> = precedence!{
            x:(@) " "* "+" " "* y:@ { x.and_then(|x| y.map(|y| x + y)) }
            --
            x:(@) " "* "*" " "* y:@ { x.and_then(|x| y.and_then(|y| multiply(x, y))) }
            --
            count:number() "d" sides:number() { Expression::group(count, sides) }
            "d" sides:number() { Expression::die(sides) }
            n:number() { Ok(Expression::constant(n)) }
            n:negative() { Ok(Expression::constant(n)) }
            "(" " "* e:arithmetic() " "* ")" { e }
        }
    }
}
