use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::classify::AxisSet;

/// Why an axis selection cannot be plotted. The `Display` text is meant to
/// be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("The data must contain at least two numerical columns to create scatter plots.")]
    InsufficientNumericColumns,

    #[error("Please select columns for both X and Y axes.")]
    IncompleteSelection,

    #[error("Please select different columns for X and Y axes.")]
    IdenticalAxes,

    #[error("Column '{0}' is not a numerical column.")]
    AxisNotNumeric(String),
}

/// The user's (x, y) choice. An unset or empty name means "not chosen".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSelection {
    pub x: Option<String>,
    pub y: Option<String>,
}

impl AxisSelection {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
        }
    }

    pub fn x(&self) -> Option<&str> {
        self.x.as_deref().filter(|s| !s.is_empty())
    }

    pub fn y(&self) -> Option<&str> {
        self.y.as_deref().filter(|s| !s.is_empty())
    }

    pub fn validate(&self, axes: &AxisSet) -> Result<(), Rejection> {
        validate(axes, self.x(), self.y())
    }
}

/// Accept or reject an axis pair. Rules are checked in order and the first
/// match wins; global insufficiency is reported before anything about the
/// particular choice.
pub fn validate(axes: &AxisSet, x: Option<&str>, y: Option<&str>) -> Result<(), Rejection> {
    if axes.len() < 2 {
        return Err(Rejection::InsufficientNumericColumns);
    }

    let (x, y) = match (x.filter(|s| !s.is_empty()), y.filter(|s| !s.is_empty())) {
        (Some(x), Some(y)) => (x, y),
        _ => return Err(Rejection::IncompleteSelection),
    };

    if x == y {
        return Err(Rejection::IdenticalAxes);
    }

    for name in [x, y] {
        if !axes.contains(name) {
            return Err(Rejection::AxisNotNumeric(name.to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes(names: &[&str]) -> AxisSet {
        names.iter().copied().collect()
    }

    #[test]
    fn accepts_two_distinct_numeric_axes() {
        assert_eq!(validate(&axes(&["a", "b"]), Some("a"), Some("b")), Ok(()));
        assert_eq!(AxisSelection::new("b", "a").validate(&axes(&["a", "b"])), Ok(()));
    }

    #[test]
    fn insufficient_columns_wins_over_everything() {
        let one = axes(&["a"]);
        for (x, y) in [
            (Some("a"), Some("a")),
            (None, None),
            (Some("a"), Some("zzz")),
            (Some(""), Some("a")),
        ] {
            assert_eq!(
                validate(&one, x, y),
                Err(Rejection::InsufficientNumericColumns)
            );
        }
        assert_eq!(
            validate(&AxisSet::default(), Some("a"), Some("b")),
            Err(Rejection::InsufficientNumericColumns)
        );
    }

    #[test]
    fn unset_or_empty_names_are_incomplete() {
        let set = axes(&["a", "b"]);
        assert_eq!(validate(&set, None, Some("b")), Err(Rejection::IncompleteSelection));
        assert_eq!(validate(&set, Some("a"), Some("")), Err(Rejection::IncompleteSelection));
        assert_eq!(
            AxisSelection::default().validate(&set),
            Err(Rejection::IncompleteSelection)
        );
    }

    #[test]
    fn identical_axes_rejected_even_when_not_numeric() {
        let set = axes(&["a", "b"]);
        assert_eq!(validate(&set, Some("a"), Some("a")), Err(Rejection::IdenticalAxes));
        assert_eq!(
            validate(&set, Some("label"), Some("label")),
            Err(Rejection::IdenticalAxes)
        );
    }

    #[test]
    fn non_numeric_axis_is_named() {
        let set = axes(&["a", "b"]);
        assert_eq!(
            validate(&set, Some("a"), Some("label")),
            Err(Rejection::AxisNotNumeric("label".into()))
        );
        assert_eq!(
            validate(&set, Some("label"), Some("b")),
            Err(Rejection::AxisNotNumeric("label".into()))
        );
    }

    #[test]
    fn rejection_messages_are_user_facing() {
        assert_eq!(
            Rejection::IdenticalAxes.to_string(),
            "Please select different columns for X and Y axes."
        );
    }
}
