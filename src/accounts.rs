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

use serde::{Deserialize, Serialize};

use crate::{
    Id,
    email::Email,
    error::Collection,
    filter::{Record, Value},
};

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct User {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<Email>,
}

impl User {
    /// The address to notify, if the user gave a non-empty one.
    #[must_use]
    pub fn recipient(&self) -> Option<Email> {
        let email = self.email.as_ref()?;
        if email.address.is_empty() {
            return None;
        }

        Some(Email {
            address: email.address.clone(),
            name: email.name.clone().or_else(|| Some(self.username.clone())),
        })
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} {email}", self.username),
            None => write!(f, "{}", self.username),
        }
    }
}

impl Record for User {
    const COLLECTION: Collection = Collection::User;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "username" => self.username.as_str().into(),
            "email" => match &self.email {
                Some(email) => email.address.as_str().into(),
                None => Value::Null,
            },
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::filter::Filter;

    use super::*;

    #[test]
    fn email_filter_skips_missing_and_empty() -> anyhow::Result<()> {
        let filter: Filter = r#"email!="""#.parse()?;

        let none = User {
            username: "none".to_string(),
            ..User::default()
        };
        let empty = User {
            username: "empty".to_string(),
            email: Some(Email::new("")),
            ..User::default()
        };
        let some = User {
            username: "some".to_string(),
            email: Some(Email::new("some@example.com")),
            ..User::default()
        };

        assert!(!filter.matches(&none)?);
        assert!(!filter.matches(&empty)?);
        assert!(filter.matches(&some)?);
        assert_eq!(empty.recipient(), None);
        assert_eq!(
            some.recipient().map(|email| email.to_string()),
            Some("some <some@example.com>".to_string())
        );

        Ok(())
    }
}
