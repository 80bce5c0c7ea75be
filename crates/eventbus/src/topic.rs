// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Topic name construction for the per-entity topics spec.md §4.8 lists
//! alongside the fixed ones already known to [`lattice_core::Event::fixed_topic`].

pub fn sprite_topic(sprite_id: &str) -> String {
    format!("sprites:{sprite_id}")
}

pub fn intent_topic(intent_id: &str) -> String {
    format!("intents:{intent_id}")
}

pub const FLEET: &str = "sprites:fleet";
pub const INTENTS_ALL: &str = "intents:all";
pub const SAFETY_AUDIT: &str = "safety:audit";
pub const OBSERVATIONS_ALL: &str = "observations:all";
