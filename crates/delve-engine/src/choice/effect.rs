//! Effect application.

use delve_core::{Effect, companion_flag, companion_id};

use crate::state::GameState;

/// Apply every change in an effect to the state.
///
/// Flags are set before they are cleared, inventory is added before it is
/// removed, and companions are recruited before they are dismissed. Setting
/// or clearing a `companion:` flag directly behaves like recruiting or
/// dismissing that NPC.
pub fn apply_effect(effect: &Effect, state: &mut GameState) {
    for flag in &effect.set_flags {
        match companion_id(flag) {
            Some(npc) => recruit(npc, state),
            None => state.set_flag(flag),
        }
    }
    for flag in &effect.clear_flags {
        match companion_id(flag) {
            Some(npc) => dismiss(npc, state),
            None => state.clear_flag(flag),
        }
    }
    for item in &effect.add_inventory {
        state.add_item(item);
    }
    for item in &effect.remove_inventory {
        state.remove_item(item);
    }
    for npc in &effect.add_companions {
        recruit(npc, state);
    }
    for npc in &effect.remove_companions {
        dismiss(npc, state);
    }
}

fn recruit(npc: &str, state: &mut GameState) {
    state.set_flag(&companion_flag(npc));
    state.unplace(npc);
}

fn dismiss(npc: &str, state: &mut GameState) {
    if state.is_companion(npc) {
        state.clear_flag(&companion_flag(npc));
        state.place_here(npc);
    }
}
