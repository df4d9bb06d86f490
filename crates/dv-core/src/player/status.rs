//! Timed player status effects

use serde::{Deserialize, Serialize};

/// Named status counters; 0 means inactive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub paralysis: i32,
    pub confusion: i32,
    pub blindness: i32,
    pub haste: i32,
}

fn tick_counter(counter: &mut i32, expired: &str, messages: &mut Vec<String>) {
    if *counter > 0 {
        *counter -= 1;
        if *counter == 0 {
            messages.push(expired.to_string());
        }
    }
}

impl PlayerStatus {
    /// Count every active effect down by one turn, announcing expiries
    pub fn tick(&mut self, messages: &mut Vec<String>) {
        tick_counter(&mut self.paralysis, "You can move again.", messages);
        tick_counter(&mut self.confusion, "You feel less confused now.", messages);
        tick_counter(&mut self.blindness, "The veil of darkness lifts.", messages);
        tick_counter(&mut self.haste, "You feel yourself slowing down.", messages);
    }

    pub const fn is_paralyzed(&self) -> bool {
        self.paralysis > 0
    }

    pub const fn is_confused(&self) -> bool {
        self.confusion > 0
    }

    pub const fn is_blind(&self) -> bool {
        self.blindness > 0
    }

    pub const fn is_hasted(&self) -> bool {
        self.haste > 0
    }
}
