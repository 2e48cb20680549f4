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

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Id,
    error::Collection,
    filter::{Record, Value},
    round::round_of_sixteen_round,
};

/// One tournament bracket.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Draw {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub size: u32,
    /// Set once, when the round of 16 is fully named.
    #[serde(default)]
    pub prediction_close: Option<DateTime<Utc>>,
}

impl Draw {
    #[must_use]
    pub fn round_of_sixteen(&self) -> Option<i64> {
        round_of_sixteen_round(self.size)
    }

    fn event_without_apostrophes(&self) -> String {
        self.event.replace('\'', "")
    }

    /// `"{name} {event} {year}"` with the apostrophes stripped from the event.
    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "{} {} {}",
            self.name,
            self.event_without_apostrophes(),
            self.year
        )
    }

    /// The lower case, hyphenated title followed by the draw id.
    #[must_use]
    pub fn slug(&self) -> String {
        let slug = [
            self.name.clone(),
            self.event_without_apostrophes(),
            self.year.to_string(),
        ]
        .join("-")
        .replace(' ', "-")
        .to_lowercase();

        format!("{slug}-{}", self.id)
    }
}

impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prediction_close {
            Some(close) => write!(
                f,
                "{} {} {} prediction_close {}",
                self.id,
                self.size,
                self.slug(),
                close.to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
            None => write!(f, "{} {} {} prediction_open", self.id, self.size, self.slug()),
        }
    }
}

impl Record for Draw {
    const COLLECTION: Collection = Collection::Draw;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "name" => self.name.as_str().into(),
            "event" => self.event.as_str().into(),
            "year" => self.year.into(),
            "size" => self.size.into(),
            "prediction_close" => match self.prediction_close {
                Some(close) => Value::Text(close.to_rfc3339()),
                None => Value::Null,
            },
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wimbledon() -> Draw {
        Draw {
            id: "2l1hqqi8puodmjq".to_string(),
            name: "Wimbledon".to_string(),
            event: "Ladies' Singles".to_string(),
            year: 2024,
            size: 64,
            prediction_close: None,
        }
    }

    #[test]
    fn title_strips_apostrophes() {
        assert_eq!(wimbledon().title(), "Wimbledon Ladies Singles 2024");
    }

    #[test]
    fn slug() {
        assert_eq!(
            wimbledon().slug(),
            "wimbledon-ladies-singles-2024-2l1hqqi8puodmjq"
        );

        let draw = Draw {
            id: "abc".to_string(),
            name: "Indian Wells".to_string(),
            event: "Men's Singles".to_string(),
            year: 2025,
            ..Draw::default()
        };
        assert_eq!(draw.slug(), "indian-wells-mens-singles-2025-abc");
    }

    #[test]
    fn unset_close_is_null() {
        let draw = wimbledon();
        assert_eq!(draw.field("prediction_close"), Some(Value::Null));
        assert_eq!(draw.field("size"), Some(Value::Int(64)));
        assert_eq!(draw.field("seed"), None);
        assert_eq!(draw.round_of_sixteen(), Some(3));
    }
}
