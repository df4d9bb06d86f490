//! Combat flavor text, picked by damage tier

/// Verb for the player's blow at each severity tier
pub const fn tier_verb(tier: u8) -> &'static str {
    match tier {
        0 => "scratch",
        1 => "hit",
        2 => "wound",
        _ => "smite",
    }
}

const fn monster_tier_phrase(tier: u8) -> &'static str {
    match tier {
        0 => "grazes you",
        1 => "hits you",
        2 => "hits you hard",
        _ => "mauls you",
    }
}

pub fn player_hit_message(monster: &str, tier: u8) -> String {
    format!("You {} the {}.", tier_verb(tier), monster)
}

pub fn player_miss_message(monster: &str) -> String {
    format!("You miss the {}.", monster)
}

pub fn monster_hit_message(monster: &str, tier: u8) -> String {
    format!("The {} {}.", monster, monster_tier_phrase(tier))
}

pub fn monster_miss_message(monster: &str) -> String {
    format!("The {} misses.", monster)
}
