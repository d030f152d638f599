//! Criteria evaluation.

use delve_core::Criteria;

use crate::error::CriteriaFailure;
use crate::state::GameState;

/// Check a criteria, reporting the first clause that fails.
///
/// Clauses are checked in a fixed order: required flags, blocking flags,
/// required inventory, required companions.
pub fn check(criteria: &Criteria, state: &GameState) -> Result<(), CriteriaFailure> {
    if let Some(flag) = criteria.requires_flags.iter().find(|f| !state.has_flag(f)) {
        return Err(CriteriaFailure::MissingFlag(flag.clone()));
    }
    if let Some(flag) = criteria.blocking_flags.iter().find(|f| state.has_flag(f)) {
        return Err(CriteriaFailure::BlockingFlag(flag.clone()));
    }
    if let Some(item) = criteria
        .requires_inventory
        .iter()
        .find(|i| !state.has_item(i))
    {
        return Err(CriteriaFailure::MissingItem(item.clone()));
    }
    if let Some(npc) = criteria
        .requires_companions
        .iter()
        .find(|n| !state.is_companion(n))
    {
        return Err(CriteriaFailure::MissingCompanion(npc.clone()));
    }
    Ok(())
}

/// Whether an optional criteria holds. Absent criteria always match.
pub fn matches(criteria: Option<&Criteria>, state: &GameState) -> bool {
    match criteria {
        None => true,
        Some(c) => match check(c, state) {
            Ok(()) => true,
            Err(failure) => {
                tracing::trace!(%failure, "criteria not met");
                false
            }
        },
    }
}
