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

use log::{info, trace};

use crate::{
    draw_slot::DrawSlot,
    error::Error,
    filter::Filter,
    hooks::{SlotHandler, SlotUpdated},
    prediction::Prediction,
    round::rounds_past_sixteen,
    store::Store,
};

/// The points a prediction is worth given the current name in its slot.
///
/// A pick matches when the slot is named and the predicted name contains the
/// slot's name, so a stored pick like `"Sabalenka (1)"` still counts.
#[must_use]
pub fn points(slot_name: &str, prediction: &Prediction) -> i32 {
    if slot_name.is_empty() || !prediction.name.contains(slot_name) {
        return 0;
    }

    match rounds_past_sixteen(prediction.size, prediction.round) {
        // Quarterfinal
        Some(1) => 1,
        // Semifinal
        Some(2) => 2,
        // Final
        Some(3) => 4,
        // Winner
        Some(4) => 8,
        _ => 0,
    }
}

/// Recomputes the points of every prediction on a slot whenever it changes.
pub struct ScoringEngine {
    store: Arc<dyn Store>,
}

impl ScoringEngine {
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Returns how many predictions were written.
    ///
    /// # Errors
    ///
    /// If the store fails. Predictions written before the failure stay
    /// written.
    pub fn rescore(&self, slot: &DrawSlot) -> Result<usize, Error> {
        let filter = Filter::default().equal("draw_slot_id", &slot.id);
        let predictions = self.store.predictions(&filter.into())?;

        let mut written = 0;
        for mut prediction in predictions {
            let awarded = points(&slot.name, &prediction);
            if awarded == prediction.points {
                trace!("{} already has {awarded} points", prediction.id);
                continue;
            }

            info!(
                "{} {} {} -> {awarded} points",
                prediction.id, prediction.name, prediction.points
            );
            prediction.points = awarded;
            self.store.save_prediction(&prediction)?;
            written += 1;
        }

        Ok(written)
    }
}

impl SlotHandler for ScoringEngine {
    fn name(&self) -> &'static str {
        "scoring_engine"
    }

    fn on_slot_updated(&self, event: &SlotUpdated) -> Result<(), Error> {
        self.rescore(&event.slot).map(|_| ())
    }
}
