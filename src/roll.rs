use std::fmt;

/// One term of a [`Roll`]: its label, what it added up to and the die
/// values behind that number.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    label: String,
    subtotal: i64,
    detail: Vec<u32>,
}

impl Component {
    pub fn new(label: impl Into<String>, subtotal: i64, detail: Vec<u32>) -> Self {
        Self { label: label.into(), subtotal, detail }
    }

    /// `d6`, `3d6` or `4`, the same text the term is displayed as.
    ///
    /// A single die keeps its `d`, so `d10` never reads like the constant `10`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn subtotal(&self) -> i64 {
        self.subtotal
    }

    /// Individual die values in the order they were rolled, empty for constants.
    pub fn detail(&self) -> &[u32] {
        &self.detail
    }
}

/// The outcome of rolling an [`Expression`](crate::Expression).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Roll {
    total: i64,
    components: Vec<Component>,
}

impl Roll {
    /// A roll made of `components`, totalling their subtotals.
    pub fn from_components(components: Vec<Component>) -> Self {
        let total = components.iter().fold(0i64, |total, c| total.saturating_add(c.subtotal));
        Self { total, components }
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// One component per top-level term of the rolled expression, in order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The total followed by every value that went into it, e.g.
    /// `24 = 1 + 4 + 5 + 7 + 3 + 4`.
    pub fn summary(&self) -> String {
        let values: Vec<String> = self
            .components
            .iter()
            .flat_map(|c| {
                if c.detail.is_empty() {
                    vec![c.subtotal.to_string()]
                } else {
                    c.detail.iter().map(u32::to_string).collect()
                }
            })
            .collect();
        format!("{} = {}", self.total, values.join(" + "))
    }

    /// A table with one line per component, followed by the total.
    ///
    /// Labels are right aligned in a column at least `2 * indent_width`
    /// wide, subtotals left aligned in a column at least `indent_width` wide.
    /// ```
    /// use dicebag::{Component, Roll};
    /// let roll = Roll::from_components(vec![
    ///     Component::new("2d20", 17, vec![8, 9]),
    ///     Component::new("3d6", 6, vec![1, 2, 3]),
    ///     Component::new("12", 12, vec![]),
    /// ]);
    /// let expected = "     2d20 : 17  = 8 + 9\n \
    ///                 +    3d6 : 6   = 1 + 2 + 3\n \
    ///                 +     12 : 12\n\
    ///                 ---------------------------\n \
    ///                 =          35";
    /// assert_eq!(roll.pretty(3), expected);
    /// ```
    pub fn pretty(&self, indent_width: usize) -> String {
        let label_width = self
            .components
            .iter()
            .map(|c| c.label.len())
            .max()
            .unwrap_or(0)
            .max(2 * indent_width);
        let subtotal_width = self
            .components
            .iter()
            .map(|c| c.subtotal.to_string().len())
            .max()
            .unwrap_or(0)
            .max(indent_width);

        let mut lines: Vec<String> = self
            .components
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let sign = if i == 0 { ' ' } else { '+' };
                let mut line = format!(
                    " {sign} {:>label_width$} : {:<subtotal_width$}",
                    c.label, c.subtotal
                );
                if !c.detail.is_empty() {
                    let values: Vec<String> = c.detail.iter().map(u32::to_string).collect();
                    line.push_str(" = ");
                    line.push_str(&values.join(" + "));
                }
                line.truncate(line.trim_end().len());
                line
            })
            .collect();

        let width = lines.iter().map(String::len).max().unwrap_or(0);
        lines.push("-".repeat(width));
        lines.push(format!(" = {:label_width$}   {}", "", self.total));
        lines.join("\n")
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl From<&Roll> for i64 {
    fn from(roll: &Roll) -> Self {
        roll.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiceError, Expression, ScriptedRoller, d};

    fn attack() -> Expression {
        3 * d(6).unwrap() + 2 * d(10).unwrap() + 4
    }

    #[test]
    fn documented_attack() {
        let roll = attack().roll_with(&mut ScriptedRoller::new([1, 4, 5, 7, 3]));
        assert_eq!(roll.total(), 24);
        assert_eq!(
            roll.components(),
            [
                Component::new("3d6", 10, vec![1, 4, 5]),
                Component::new("2d10", 10, vec![7, 3]),
                Component::new("4", 4, vec![]),
            ]
        );
    }

    #[test]
    fn documented_attack_pretty() {
        let roll = attack().roll_with(&mut ScriptedRoller::new([1, 4, 5, 7, 3]));
        let expected = [
            "      3d6 : 10  = 1 + 4 + 5".to_string(),
            " +   2d10 : 10  = 7 + 3".to_string(),
            " +      4 : 4".to_string(),
            "-".repeat(27),
            " =          24".to_string(),
        ]
        .join("\n");
        assert_eq!(roll.pretty(3), expected);
        assert_eq!(roll.pretty(3), roll.pretty(3));
    }

    #[test]
    fn single_die() {
        let roll = d(10).unwrap().roll_with(&mut ScriptedRoller::new([5]));
        assert_eq!(roll.total(), 5);
        assert_eq!(roll.components(), [Component::new("d10", 5, vec![5])]);
        assert_eq!(roll.pretty(1), "   d10 : 5 = 5\n--------------\n =       5");
    }

    #[test]
    fn invalid_die_fails_before_rolling() {
        assert_eq!(d(0), Err(DiceError::InvalidSides(0)));
        assert_eq!(d(-6), Err(DiceError::InvalidSides(-6)));
    }

    #[test]
    fn wide_indent() {
        let roll = (d(4).unwrap() + 1).roll_with(&mut ScriptedRoller::new([3]));
        let expected = "         d4 : 3    = 3\n \
                        +        1 : 1\n\
                        ----------------------\n \
                        =            4";
        assert_eq!(roll.pretty(4), expected);
    }

    #[test]
    fn summary() {
        let roll = attack().roll_with(&mut ScriptedRoller::new([1, 4, 5, 7, 3]));
        assert_eq!(roll.summary(), "24 = 1 + 4 + 5 + 7 + 3 + 4");
        assert_eq!(roll.to_string(), roll.summary());
        assert_eq!(i64::from(&roll), 24);
    }

    #[test]
    fn from_components_totals() {
        let roll = Roll::from_components(vec![
            Component::new("d8", 8, vec![8]),
            Component::new("-3", -3, vec![]),
        ]);
        assert_eq!(roll.total(), 5);
        assert_eq!(roll.summary(), "5 = 8 + -3");
    }
}
