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

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use log::{debug, error, info};

use crate::{
    draw::Draw,
    draw_slot::DrawSlot,
    email::Email,
    error::Error,
    filter::Filter,
    hooks::{SlotHandler, SlotUpdated},
    notify::{Mailer, PicksOpen},
    round::ROUND_OF_SIXTEEN_SLOTS,
    settings::Settings,
    store::Store,
};

/// Closes a draw's prediction window once its round of 16 is fully named, and
/// tells every user with an email address that picks are open.
pub struct PredictionGate {
    store: Arc<dyn Store>,
    mailer: Arc<dyn Mailer>,
    sender: Email,
    site_url: String,
    window: TimeDelta,
}

impl PredictionGate {
    /// # Errors
    ///
    /// If the prediction window in `settings` is out of range.
    pub fn new(
        store: Arc<dyn Store>,
        mailer: Arc<dyn Mailer>,
        settings: &Settings,
    ) -> Result<Self, Error> {
        Ok(Self {
            store,
            mailer,
            sender: settings.sender(),
            site_url: settings.site_url.clone(),
            window: settings.prediction_window()?,
        })
    }

    /// Returns whether this update closed the prediction window.
    ///
    /// # Errors
    ///
    /// If the slot's draw is missing, the store fails, or the close time
    /// overflows.
    pub fn check(&self, slot: &DrawSlot) -> Result<bool, Error> {
        if !slot.is_named() {
            return Ok(false);
        }

        let draw = self.store.draw(&slot.draw_id)?;
        if draw.prediction_close.is_some() {
            return Ok(false);
        }

        let Some(round_of_sixteen) = draw.round_of_sixteen() else {
            return Ok(false);
        };
        if i64::from(slot.round) != round_of_sixteen {
            return Ok(false);
        }

        let filter = Filter::default()
            .equal("draw_id", &draw.id)
            .equal("round", round_of_sixteen)
            .not_equal("name", "");
        let filled = self.store.draw_slots(&filter.into())?.len();
        if filled != ROUND_OF_SIXTEEN_SLOTS {
            debug!("{} round of 16: {filled}/{ROUND_OF_SIXTEEN_SLOTS}", draw.id);
            return Ok(false);
        }

        let now = Utc::now();
        let close = now.checked_add_signed(self.window).ok_or_else(|| {
            Error::Settings(format!("{now} plus {} overflows", self.window))
        })?;
        let Some(draw) = self.store.close_predictions(&draw.id, close)? else {
            debug!("{} was closed by another update", draw.id);
            return Ok(false);
        };

        info!("{} round of 16 is set, predictions close at {close}", draw.id);
        self.notify(&draw)?;

        Ok(true)
    }

    fn notify(&self, draw: &Draw) -> Result<(), Error> {
        let picks_open = PicksOpen::new(draw, &self.site_url, self.window.num_hours());
        let users = self
            .store
            .users(&Filter::default().not_equal("email", "").into())?;

        for user in users {
            let Some(to) = user.recipient() else {
                continue;
            };

            let address = to.address.clone();
            match self.mailer.send(&picks_open.message(&self.sender, to)) {
                Ok(()) => info!("{}: picks open email to {address}", draw.id),
                Err(error) => error!("{} {}: {error}", user.username, address),
            }
        }

        Ok(())
    }
}

impl SlotHandler for PredictionGate {
    fn name(&self) -> &'static str {
        "prediction_gate"
    }

    fn on_slot_updated(&self, event: &SlotUpdated) -> Result<(), Error> {
        self.check(&event.slot).map(|_| ())
    }
}
