use bevy_ecs::prelude::*;

use crate::data::messages::MessageLibrary;
use crate::simulation::calendar::{elapsed_days, SimCalendar};
use crate::simulation::cursor::{CursorStep, DayCursor};
use crate::simulation::notifications::NotificationLedger;
use crate::simulation::pairing::pair_count;

/// Taps on the shield needed to flip developer mode.
pub const DEVELOPER_TAPS: u32 = 5;

/// Everything the app persists between runs.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SimulationState {
    pub cursor: DayCursor,
    pub start_timestamp_ms: i64,
    pub developer_mode: bool,
    pub username: String,
    pub notified: NotificationLedger,
    pub shield_taps: u32,
    pub first_launch: bool,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            cursor: DayCursor::start(),
            start_timestamp_ms: 0,
            developer_mode: false,
            username: String::new(),
            notified: NotificationLedger::default(),
            shield_taps: 0,
            first_launch: true,
        }
    }
}

impl SimulationState {
    pub fn is_logged_in(&self) -> bool {
        !self.username.is_empty()
    }

    pub fn calendar(&self) -> SimCalendar {
        SimCalendar::new(self.start_timestamp_ms)
    }

    pub fn advance(&mut self, library: &MessageLibrary) -> CursorStep {
        let pairs = pair_count(library, self.cursor.day);
        self.cursor.advance(pairs)
    }

    /// Back to day 1. Username and developer mode survive; notified flags
    /// and the tap counter do not.
    pub fn reset_simulation(&mut self, now_ms: i64) {
        self.cursor.reset();
        self.start_timestamp_ms = now_ms;
        self.notified.clear();
        self.shield_taps = 0;
    }

    pub fn login(&mut self, username: &str, now_ms: i64) {
        self.developer_mode = false;
        self.reset_simulation(now_ms);
        self.username = username.to_string();
        self.first_launch = true;
    }

    pub fn logout(&mut self, now_ms: i64) {
        self.username.clear();
        self.developer_mode = false;
        self.reset_simulation(now_ms);
        self.first_launch = true;
    }

    /// First screen after login: start the clock and show the opening pair.
    /// Returns the cursor to reveal, or `None` on later launches.
    pub fn open_session(&mut self, now_ms: i64) -> Option<DayCursor> {
        if !self.first_launch {
            return None;
        }
        self.first_launch = false;
        self.start_timestamp_ms = now_ms;
        self.cursor.reset();
        Some(self.cursor)
    }

    /// Outside developer mode the story follows the wall clock and a reached
    /// day is shown whole: the cursor moves to the last pair of the day
    /// reached since the start, never backwards. Returns every pair that
    /// became visible, in order; empty when nothing changed.
    pub fn catch_up(&mut self, library: &MessageLibrary, now_ms: i64) -> Vec<DayCursor> {
        if self.developer_mode {
            return Vec::new();
        }
        let reachable = elapsed_days(self.start_timestamp_ms, now_ms).saturating_add(1);
        if reachable < self.cursor.day {
            return Vec::new();
        }
        let end = DayCursor::end_of_day(reachable, pair_count(library, reachable));
        let first = if reachable == self.cursor.day {
            if self.cursor.index >= end.index {
                return Vec::new();
            }
            self.cursor.index + 1
        } else {
            0
        };
        self.cursor = end;
        (first..=end.index)
            .map(|index| DayCursor::new(reachable, index))
            .collect()
    }

    /// Returns the new developer-mode value when this tap flips it.
    pub fn tap_shield(&mut self) -> Option<bool> {
        self.shield_taps += 1;
        if self.shield_taps < DEVELOPER_TAPS {
            return None;
        }
        self.shield_taps = 0;
        self.developer_mode = !self.developer_mode;
        Some(self.developer_mode)
    }
}
