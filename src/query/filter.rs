//! Typed filter expressions and their translation to MongoDB filter documents.

use bson::oid::ObjectId;
use bson::{Bson, Document};

/// A single comparison applied to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Equals(Bson),
    GreaterThan(Bson),
    GreaterOrEqual(Bson),
    LessThan(Bson),
    LessOrEqual(Bson),
    InSet(Vec<Bson>),
}

impl Condition {
    /// Build a condition from a comparison token (`gt`, `gte`, `lt`, `lte`, `in`)
    /// and its raw query-string value, read as `kind`. Returns `None` for
    /// unknown tokens.
    pub fn from_token(token: &str, raw: &str, kind: FieldKind) -> Option<Self> {
        let condition = match token {
            "gt" => Condition::GreaterThan(kind.coerce(raw)),
            "gte" => Condition::GreaterOrEqual(kind.coerce(raw)),
            "lt" => Condition::LessThan(kind.coerce(raw)),
            "lte" => Condition::LessOrEqual(kind.coerce(raw)),
            "in" => Condition::InSet(
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| kind.coerce(item))
                    .collect(),
            ),
            _ => return None,
        };
        Some(condition)
    }

    /// MongoDB operator for this condition, `None` for plain equality.
    pub fn operator(&self) -> Option<&'static str> {
        match self {
            Condition::Equals(_) => None,
            Condition::GreaterThan(_) => Some("$gt"),
            Condition::GreaterOrEqual(_) => Some("$gte"),
            Condition::LessThan(_) => Some("$lt"),
            Condition::LessOrEqual(_) => Some("$lte"),
            Condition::InSet(_) => Some("$in"),
        }
    }

    fn into_value(self) -> Bson {
        match self {
            Condition::Equals(v)
            | Condition::GreaterThan(v)
            | Condition::GreaterOrEqual(v)
            | Condition::LessThan(v)
            | Condition::LessOrEqual(v) => v,
            Condition::InSet(values) => Bson::Array(values),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub condition: Condition,
}

/// Conjunction of field filters, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    filters: Vec<FieldFilter>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, condition: Condition) {
        self.filters.push(FieldFilter {
            field: field.into(),
            condition,
        });
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    #[cfg(test)]
    pub fn contains_field(&self, field: &str) -> bool {
        self.filters.iter().any(|f| f.field == field)
    }

    /// Translate to the store's native filter document.
    ///
    /// Comparisons on the same field are merged into one operator document.
    /// An equality mixed with comparisons on that field becomes `$eq`.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();

        for filter in &self.filters {
            let operator = filter.condition.operator();
            let value = filter.condition.clone().into_value();

            if let Some(existing) = doc.get_mut(&filter.field) {
                merge_condition(existing, operator.unwrap_or("$eq"), value);
                continue;
            }

            match operator {
                None => {
                    doc.insert(filter.field.clone(), value);
                }
                Some(op) => {
                    let mut ops = Document::new();
                    ops.insert(op, value);
                    doc.insert(filter.field.clone(), ops);
                }
            }
        }

        doc
    }
}

fn merge_condition(existing: &mut Bson, op: &str, value: Bson) {
    if let Bson::Document(ops) = existing {
        if is_operator_document(ops) {
            ops.insert(op, value);
            return;
        }
    }

    let mut ops = Document::new();
    ops.insert("$eq", existing.clone());
    ops.insert(op, value);
    *existing = Bson::Document(ops);
}

fn is_operator_document(doc: &Document) -> bool {
    !doc.is_empty() && doc.keys().all(|k| k.starts_with('$'))
}

/// Stored type of a filterable field, deciding how raw query values are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    Boolean,
    ObjectId,
    Text,
}

impl FieldKind {
    /// Read a raw query-string value as this kind.
    ///
    /// Values that do not parse are kept as strings, so they match nothing
    /// instead of failing the request.
    pub fn coerce(self, raw: &str) -> Bson {
        let trimmed = raw.trim();
        match self {
            FieldKind::Number => {
                if let Ok(int) = trimmed.parse::<i64>() {
                    return Bson::Int64(int);
                }
                match trimmed.parse::<f64>() {
                    Ok(float) if float.is_finite() => Bson::Double(float),
                    _ => Bson::String(raw.to_string()),
                }
            }
            FieldKind::Boolean => match trimmed {
                "true" => Bson::Boolean(true),
                "false" => Bson::Boolean(false),
                _ => Bson::String(raw.to_string()),
            },
            FieldKind::ObjectId => ObjectId::parse_str(trimmed)
                .map(Bson::ObjectId)
                .unwrap_or_else(|_| Bson::String(raw.to_string())),
            FieldKind::Text => Bson::String(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_numbers_are_parsed_for_numeric_fields() {
        assert_eq!(FieldKind::Number.coerce("10000"), Bson::Int64(10000));
        assert_eq!(FieldKind::Number.coerce("-3"), Bson::Int64(-3));
        assert_eq!(FieldKind::Number.coerce("8.5"), Bson::Double(8.5));
        assert_eq!(FieldKind::Number.coerce("inf"), Bson::String("inf".into()));
        assert_eq!(FieldKind::Number.coerce("cheap"), Bson::String("cheap".into()));
    }

    #[test]
    fn test_flags_and_ids_are_typed() {
        assert_eq!(FieldKind::Boolean.coerce("true"), Bson::Boolean(true));
        assert_eq!(FieldKind::Boolean.coerce("false"), Bson::Boolean(false));
        assert_eq!(FieldKind::Boolean.coerce("yes"), Bson::String("yes".into()));

        let owner = ObjectId::parse_str("5d7a514b5d2c12c7449be042").unwrap();
        assert_eq!(
            FieldKind::ObjectId.coerce("5d7a514b5d2c12c7449be042"),
            Bson::ObjectId(owner)
        );
        assert_eq!(FieldKind::ObjectId.coerce("nobody"), Bson::String("nobody".into()));
    }

    #[test]
    fn test_text_keeps_leading_zeros() {
        assert_eq!(FieldKind::Text.coerce("02215"), Bson::String("02215".into()));
        assert_eq!(FieldKind::Text.coerce("true"), Bson::String("true".into()));
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        assert_eq!(Condition::from_token("ne", "1", FieldKind::Number), None);
        assert_eq!(Condition::from_token("regex", ".*", FieldKind::Text), None);
    }

    #[test]
    fn test_each_comparison_maps_to_its_operator() {
        for (token, op) in [
            ("gt", "$gt"),
            ("gte", "$gte"),
            ("lt", "$lt"),
            ("lte", "$lte"),
            ("in", "$in"),
        ] {
            let condition = Condition::from_token(token, "5", FieldKind::Number).unwrap();
            assert_eq!(condition.operator(), Some(op));
        }
        assert_eq!(Condition::Equals(Bson::Int64(1)).operator(), None);
    }

    #[test]
    fn test_in_set_splits_and_coerces() {
        let condition = Condition::from_token("in", "Business, UI/UX,,3", FieldKind::Text).unwrap();
        assert_eq!(
            condition,
            Condition::InSet(vec![
                Bson::String("Business".into()),
                Bson::String("UI/UX".into()),
                Bson::String("3".into()),
            ])
        );

        let condition = Condition::from_token("in", "5000, 7.5", FieldKind::Number).unwrap();
        assert_eq!(
            condition,
            Condition::InSet(vec![Bson::Int64(5000), Bson::Double(7.5)])
        );
    }

    #[test]
    fn test_to_document_equality_and_comparison() {
        let mut spec = FilterSpec::new();
        spec.push("housing", Condition::Equals(Bson::Boolean(true)));
        spec.push(
            "averageCost",
            Condition::from_token("lte", "10000", FieldKind::Number).unwrap(),
        );

        assert_eq!(
            spec.to_document(),
            doc! { "housing": true, "averageCost": { "$lte": 10000_i64 } }
        );
    }

    #[test]
    fn test_to_document_merges_range_on_same_field() {
        let mut spec = FilterSpec::new();
        spec.push(
            "averageRating",
            Condition::from_token("gte", "5", FieldKind::Number).unwrap(),
        );
        spec.push(
            "averageRating",
            Condition::from_token("lt", "9", FieldKind::Number).unwrap(),
        );

        assert_eq!(
            spec.to_document(),
            doc! { "averageRating": { "$gte": 5_i64, "$lt": 9_i64 } }
        );
    }

    #[test]
    fn test_to_document_equality_mixed_with_comparison() {
        let mut spec = FilterSpec::new();
        spec.push("averageCost", Condition::Equals(Bson::Int64(100)));
        spec.push(
            "averageCost",
            Condition::from_token("gt", "50", FieldKind::Number).unwrap(),
        );

        assert_eq!(
            spec.to_document(),
            doc! { "averageCost": { "$eq": 100_i64, "$gt": 50_i64 } }
        );
    }

    #[test]
    fn test_empty_spec_matches_everything() {
        let spec = FilterSpec::new();
        assert!(spec.is_empty());
        assert_eq!(spec.to_document(), Document::new());
    }
}
