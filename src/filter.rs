// This file is part of racquet-rivals.
//
// racquet-rivals is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// racquet-rivals is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Record filters in the form `draw_id="2l1hqqi8puodmjq"&&round="3"&&name!=""`.

use std::{fmt, str::FromStr};

use crate::error::{Collection, Error};

/// The value of a record field as seen by a filter.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
}

impl Value {
    /// Integers compare numerically against the literal and null equals `""`.
    #[must_use]
    pub fn equals_literal(&self, literal: &str) -> bool {
        match self {
            Self::Null => literal.is_empty(),
            Self::Int(int) => literal.trim().parse::<i64>().is_ok_and(|value| value == *int),
            Self::Text(text) => text == literal,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<u32> for Value {
    fn from(int: u32) -> Self {
        Self::Int(i64::from(int))
    }
}

impl From<i32> for Value {
    fn from(int: i32) -> Self {
        Self::Int(i64::from(int))
    }
}

/// Something the store keeps and a [`Filter`] can look into.
pub trait Record: Clone {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    /// Returns `None` for a field the record does not have.
    fn field(&self, name: &str) -> Option<Value>;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operator {
    Equal,
    NotEqual,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::NotEqual => write!(f, "!="),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: String,
}

impl Condition {
    fn parse(input: &str) -> Result<(Self, &str), String> {
        let end = input
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
            .unwrap_or(input.len());
        let (field, rest) = input.split_at(end);
        if field.is_empty() {
            return Err("expected a field name".to_string());
        }

        let rest = rest.trim_start();
        let (operator, rest) = if let Some(rest) = rest.strip_prefix("!=") {
            (Operator::NotEqual, rest)
        } else if let Some(rest) = rest.strip_prefix('=') {
            (Operator::Equal, rest)
        } else {
            return Err(format!("expected '=' or '!=' after {field}"));
        };

        let rest = rest.trim_start();
        let (value, rest) = if let Some(quoted) = rest.strip_prefix('"') {
            parse_quoted(quoted).ok_or_else(|| format!("unterminated value for {field}"))?
        } else {
            let end = rest
                .find(|ch: char| ch.is_whitespace() || ch == '&')
                .unwrap_or(rest.len());
            let (value, rest) = rest.split_at(end);
            if value.is_empty() {
                return Err(format!("expected a value for {field}"));
            }
            (value.to_string(), rest)
        };

        Ok((
            Self {
                field: field.to_string(),
                operator,
                value,
            },
            rest,
        ))
    }

    fn matches<R: Record>(&self, record: &R) -> Result<bool, Error> {
        let Some(value) = record.field(&self.field) else {
            return Err(Error::Filter {
                input: self.to_string(),
                reason: format!("{} has no field {}", R::COLLECTION, self.field),
            });
        };

        let equal = value.equals_literal(&self.value);
        Ok(match self.operator {
            Operator::Equal => equal,
            Operator::NotEqual => !equal,
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.replace('\\', "\\\\").replace('"', "\\\"");
        write!(f, "{}{}\"{value}\"", self.field, self.operator)
    }
}

/// Returns the unescaped value and whatever follows the closing quote.
fn parse_quoted(input: &str) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut chars = input.char_indices();

    while let Some((index, ch)) = chars.next() {
        match ch {
            '\\' => value.push(chars.next()?.1),
            '"' => return Some((value, &input[index + 1..])),
            ch => value.push(ch),
        }
    }

    None
}

/// A conjunction of conditions. The empty filter matches every record.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter(pub Vec<Condition>);

impl Filter {
    #[must_use]
    pub fn equal(mut self, field: &str, value: impl fmt::Display) -> Self {
        self.0.push(Condition {
            field: field.to_string(),
            operator: Operator::Equal,
            value: value.to_string(),
        });
        self
    }

    #[must_use]
    pub fn not_equal(mut self, field: &str, value: impl fmt::Display) -> Self {
        self.0.push(Condition {
            field: field.to_string(),
            operator: Operator::NotEqual,
            value: value.to_string(),
        });
        self
    }

    /// # Errors
    ///
    /// If a condition names a field the record does not have.
    pub fn matches<R: Record>(&self, record: &R) -> Result<bool, Error> {
        for condition in &self.0 {
            if !condition.matches(record)? {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conditions: Vec<_> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", conditions.join("&&"))
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Error> {
        let error = |reason: String| Error::Filter {
            input: input.to_string(),
            reason,
        };

        let mut conditions = Vec::new();
        let mut rest = input.trim();

        while !rest.is_empty() {
            let (condition, remaining) = Condition::parse(rest).map_err(error)?;
            conditions.push(condition);

            let remaining = remaining.trim_start();
            if remaining.is_empty() {
                break;
            }

            let Some(remaining) = remaining.strip_prefix("&&") else {
                return Err(error(format!("expected '&&' before '{remaining}'")));
            };
            rest = remaining.trim_start();
            if rest.is_empty() {
                return Err(error("expected a condition after '&&'".to_string()));
            }
        }

        Ok(Self(conditions))
    }
}

/// A filter plus sort, limit and offset.
///
/// The sort field may be prefixed with `-` to sort in descending order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Query {
    pub filter: Filter,
    pub sort: Option<String>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl Query {
    #[must_use]
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sort(mut self, sort: &str) -> Self {
        self.sort = Some(sort.to_string());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// # Errors
    ///
    /// If the filter or the sort names a field the records do not have.
    pub fn run<'a, R, I>(&self, records: I) -> Result<Vec<R>, Error>
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut matched = Vec::new();
        for record in records {
            if self.filter.matches(record)? {
                matched.push(record.clone());
            }
        }

        if let Some(sort) = &self.sort {
            let (field, descending) = match sort.strip_prefix('-') {
                Some(field) => (field, true),
                None => (sort.as_str(), false),
            };

            let mut keyed = Vec::with_capacity(matched.len());
            for record in matched {
                let Some(key) = record.field(field) else {
                    return Err(Error::Filter {
                        input: sort.clone(),
                        reason: format!("{} has no field {field}", R::COLLECTION),
                    });
                };
                keyed.push((key, record));
            }

            keyed.sort_by(|(a, _), (b, _)| {
                let ordering = a.cmp(b);
                if descending { ordering.reverse() } else { ordering }
            });
            matched = keyed.into_iter().map(|(_, record)| record).collect();
        }

        let matched = matched.into_iter().skip(self.offset);
        Ok(match self.limit {
            Some(limit) => matched.take(limit).collect(),
            None => matched.collect(),
        })
    }
}

impl From<Filter> for Query {
    fn from(filter: Filter) -> Self {
        Self::new(filter)
    }
}
