use crate::models::Value;
use derive_more::Display;
use std::{cmp::Ordering, str::FromStr};

///
/// Operator
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum Operator {
    #[display("=")]
    Equals,
    #[display(">")]
    Greater,
    #[display(">=")]
    GreaterOrEqual,
    #[display("ilike")]
    ILike,
    #[display("in")]
    In,
    #[display("like")]
    Like,
    #[display("<")]
    Lower,
    #[display("<=")]
    LowerOrEqual,
    #[display("!=")]
    NotEquals,
    #[display("not in")]
    NotIn,
}

impl Operator {
    /// Test a record's `left` value against the condition's `right` value.
    ///
    /// Relation values compare through their record ids: a relation equals a
    /// value when they share at least one record, and an empty relation
    /// equals `Null`.
    #[must_use]
    pub fn matches(self, left: &Value, right: &Value) -> bool {
        match self {
            Self::Equals => equals(left, right),
            Self::NotEquals => !equals(left, right),
            Self::In => contains(right, left),
            Self::NotIn => !contains(right, left),
            Self::Like => like(left, right, false),
            Self::ILike => like(left, right, true),
            Self::Lower => left.compare(right) == Some(Ordering::Less),
            Self::LowerOrEqual => matches!(
                left.compare(right),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Self::Greater => left.compare(right) == Some(Ordering::Greater),
            Self::GreaterOrEqual => matches!(
                left.compare(right),
                Some(Ordering::Greater | Ordering::Equal)
            ),
        }
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim().to_lowercase().as_str() {
            "=" => Self::Equals,
            "!=" => Self::NotEquals,
            "<" => Self::Lower,
            "<=" => Self::LowerOrEqual,
            ">" => Self::Greater,
            ">=" => Self::GreaterOrEqual,
            "like" => Self::Like,
            "ilike" => Self::ILike,
            "in" => Self::In,
            "not in" => Self::NotIn,
            other => return Err(format!("unknown operator '{other}'")),
        };

        Ok(op)
    }
}

const fn is_relation(value: &Value) -> bool {
    matches!(value, Value::Collection(_))
}

fn equals(left: &Value, right: &Value) -> bool {
    if is_relation(left) || is_relation(right) {
        return match (left.ids(), right.ids()) {
            (Some(l), Some(r)) if l.is_empty() || r.is_empty() => l.is_empty() && r.is_empty(),
            (Some(l), Some(r)) => l.iter().any(|id| r.contains(id)),
            _ => false,
        };
    }

    left == right || left.compare(right) == Some(Ordering::Equal)
}

fn contains(list: &Value, item: &Value) -> bool {
    if is_relation(item) || is_relation(list) {
        return match (item.ids(), list.ids()) {
            (Some(l), Some(r)) => l.iter().any(|id| r.contains(id)),
            _ => false,
        };
    }

    match list {
        Value::List(items) => items.iter().any(|v| equals(item, v)),
        other => equals(item, other),
    }
}

fn like(left: &Value, right: &Value, insensitive: bool) -> bool {
    match (left, right) {
        (Value::Text(text), Value::Text(pattern)) if insensitive => {
            text.to_lowercase().contains(&pattern.to_lowercase())
        }
        (Value::Text(text), Value::Text(pattern)) => text.contains(pattern.as_str()),
        _ => false,
    }
}

///
/// Conjunction
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Conjunction {
    And,
    Or,
}

///
/// Term
///

#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    Predicate {
        field: String,
        operator: Operator,
        value: Value,
    },
    Group(Condition),
}

///
/// Condition
/// terms are folded left to right; an empty condition matches every record
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Condition {
    terms: Vec<(Conjunction, Term)>,
}

impl Condition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn and(self, field: impl AsRef<str>, operator: Operator, value: impl Into<Value>) -> Self {
        self.push(Conjunction::And, predicate(field, operator, value))
    }

    #[must_use]
    pub fn or(self, field: impl AsRef<str>, operator: Operator, value: impl Into<Value>) -> Self {
        self.push(Conjunction::Or, predicate(field, operator, value))
    }

    /// Append `other` as a parenthesised group.
    #[must_use]
    pub fn and_cond(self, other: Self) -> Self {
        if other.is_empty() {
            return self;
        }
        self.push(Conjunction::And, Term::Group(other))
    }

    #[must_use]
    pub fn or_cond(self, other: Self) -> Self {
        if other.is_empty() {
            return self;
        }
        self.push(Conjunction::Or, Term::Group(other))
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = &(Conjunction, Term)> {
        self.terms.iter()
    }

    /// Every field name the condition reads, groups included.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        for (_, term) in &self.terms {
            match term {
                Term::Predicate { field, .. } => fields.push(field.as_str()),
                Term::Group(group) => fields.extend(group.fields()),
            }
        }

        fields
    }

    /// Evaluate against one record, reading field values through `read`.
    pub fn evaluate<E>(
        &self,
        read: &mut impl FnMut(&str) -> Result<Value, E>,
    ) -> Result<bool, E> {
        let mut result: Option<bool> = None;

        for (conjunction, term) in &self.terms {
            let value = match term {
                Term::Predicate {
                    field,
                    operator,
                    value,
                } => operator.matches(&read(field)?, value),
                Term::Group(group) => group.evaluate(read)?,
            };

            result = Some(match (result, conjunction) {
                (None, _) => value,
                (Some(acc), Conjunction::And) => acc && value,
                (Some(acc), Conjunction::Or) => acc || value,
            });
        }

        Ok(result.unwrap_or(true))
    }

    fn push(mut self, conjunction: Conjunction, term: Term) -> Self {
        self.terms.push((conjunction, term));
        self
    }
}

fn predicate(field: impl AsRef<str>, operator: Operator, value: impl Into<Value>) -> Term {
    Term::Predicate {
        field: field.as_ref().to_string(),
        operator,
        value: value.into(),
    }
}
