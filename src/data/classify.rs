use serde::Serialize;

use super::model::Table;

// ---------------------------------------------------------------------------
// AxisSet – column names eligible as plot axes
// ---------------------------------------------------------------------------

/// Numeric column names in the table's original column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AxisSet {
    names: Vec<String>,
}

impl AxisSet {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl<S: Into<String>> FromIterator<S> for AxisSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Partition the table's columns and keep the numeric ones.
///
/// Classification only looks at the inferred type: a numeric column with
/// fewer than two values is still eligible here.
pub fn classify(table: &Table) -> AxisSet {
    table
        .columns()
        .iter()
        .filter(|c| c.is_numeric())
        .map(|c| c.name())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    #[test]
    fn keeps_numeric_columns_in_order() {
        let table = Table::new(vec![
            Column::numeric("z", vec![Some(1.0), Some(2.0)]),
            Column::text("label", vec![Some("a".into()), Some("b".into())]),
            Column::numeric("a", vec![None, Some(4.0)]),
        ])
        .unwrap();

        let axes = classify(&table);
        assert_eq!(axes.names(), ["z", "a"]);
        assert!(axes.contains("a"));
        assert!(!axes.contains("label"));
    }

    #[test]
    fn sparse_numeric_column_is_still_eligible() {
        let table = Table::new(vec![
            Column::numeric("only_one", vec![Some(1.0), None, None]),
            Column::numeric("none", vec![None, None, None]),
        ])
        .unwrap();

        assert_eq!(classify(&table).len(), 2);
    }

    #[test]
    fn every_column_is_either_classified_or_text() {
        let table = Table::new(vec![
            Column::numeric("a", vec![Some(1.0)]),
            Column::text("b", vec![Some("x".into())]),
            Column::numeric("c", vec![Some(3.0)]),
        ])
        .unwrap();
        let axes = classify(&table);

        for col in table.columns() {
            assert_eq!(axes.contains(col.name()), col.is_numeric(), "{}", col.name());
        }
    }
}
