//! Scoring and prediction window gating for Racquet Rivals tennis brackets.
//!
//! Whenever the result of a bracket slot is recorded, two handlers run in
//! order:
//!
//! * the [`gate::PredictionGate`] closes the prediction window once the round
//!   of 16 is fully named and emails every user that picks are open,
//! * the [`scoring::ScoringEngine`] recomputes the points of every prediction
//!   anchored to the slot.
//!
//! Storage and mail delivery sit behind the [`store::Store`] and
//! [`notify::Mailer`] traits.
//!
//! ## Feature Flags
//!
//! By default the `server` feature flag is enabled.
//!
//! * server - enable SMTP delivery and the `racquet-rivals` binary

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

#![deny(clippy::panic)]

pub mod accounts;
pub mod app;
pub mod draw;
pub mod draw_slot;
pub mod email;
pub mod error;
pub mod filter;
pub mod gate;
pub mod hooks;
pub mod notify;
pub mod prediction;
pub mod round;
pub mod scoring;
pub mod settings;
#[cfg(feature = "server")]
pub mod smtp;
pub mod store;
pub mod utils;

pub use error::Error;

pub type Id = String;
pub const HOME: &str = "racquet-rivals";

pub const COPYRIGHT: &str = r".SH COPYRIGHT
Copyright (C) 2024-2026 Racquet Rivals Developers

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU Affero General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU Affero General Public License for more details.

You should have received a copy of the GNU Affero General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright (c) 2024 Racquet Rivals Developers
Licensed under the AGPLv3"
);
