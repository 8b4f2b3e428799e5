use peg::str::LineCol;

/// Everything that can go wrong while building an [`Expression`](crate::Expression).
///
/// Rolling never fails, so this only shows up at construction time.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum DiceError {
    #[error("a die needs at least one side, got {0}")]
    InvalidSides(i64),
    #[error("cannot roll {0} dice")]
    InvalidCount(i64),
    #[error("cannot multiply {left} by {right}, one side has to be a constant")]
    TypeMismatch { left: String, right: String },
    #[error("a sum needs at least two terms, got {0}")]
    TooFewTerms(usize),
    #[error("dice expression overflowed")]
    Overflow,
    #[error("invalid dice notation: {0}")]
    Parse(#[from] peg::error::ParseError<LineCol>),
}
