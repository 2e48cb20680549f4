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

use std::{fmt, str::FromStr};

/// ```sh
/// <- slot SLOT_ID [NAME ...]
/// -> = slot SLOT_ID DRAW_ID ROUND POSITION NAME
/// <- seed SLOT_ID SEED
/// <- draw DRAW_ID
/// -> = draw DRAW_ID SIZE SLUG prediction_open 15/16
/// <- points PREDICTION_ID
/// <- save
/// <- quit
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Slot { id: String, name: String },
    Seed { id: String, seed: String },
    Draw(String),
    Points(String),
    Save,
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slot { .. } => write!(f, "slot"),
            Self::Seed { .. } => write!(f, "seed"),
            Self::Draw(_) => write!(f, "draw"),
            Self::Points(_) => write!(f, "points"),
            Self::Save => write!(f, "save"),
            Self::Quit => write!(f, "quit"),
        }
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_ascii_whitespace();
        let command = words.next();
        let id = words.next().map(ToString::to_string);
        let the_rest: Vec<&str> = words.collect();

        match (command, id) {
            (Some("slot"), Some(id)) => Ok(Self::Slot {
                id,
                name: the_rest.join(" "),
            }),
            (Some("seed"), Some(id)) => Ok(Self::Seed {
                id,
                seed: the_rest.join(" "),
            }),
            (Some("draw"), Some(id)) => Ok(Self::Draw(id)),
            (Some("points"), Some(id)) => Ok(Self::Points(id)),
            (Some("save"), None) => Ok(Self::Save),
            (Some("quit" | "exit"), None) => Ok(Self::Quit),
            (Some(command), _) => Err(anyhow::Error::msg(format!(
                "invalid command: {command}"
            ))),
            (None, _) => Err(anyhow::Error::msg("empty command")),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn slot_names_keep_their_spaces() {
        assert_eq!(
            "slot r4-1 Beatriz Haddad Maia".parse::<Command>().unwrap(),
            Command::Slot {
                id: "r4-1".to_string(),
                name: "Beatriz Haddad Maia".to_string(),
            }
        );
    }

    #[test]
    fn slot_without_a_name_clears_it() {
        assert_eq!(
            "slot r4-1".parse::<Command>().unwrap(),
            Command::Slot {
                id: "r4-1".to_string(),
                name: String::new(),
            }
        );
    }

    #[test]
    fn invalid_commands() {
        assert!("".parse::<Command>().is_err());
        assert!("draw".parse::<Command>().is_err());
        assert!("save now".parse::<Command>().is_err());
        assert!("delete r4-1".parse::<Command>().is_err());
    }
}
