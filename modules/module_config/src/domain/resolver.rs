//! Specificity resolution over activation rows
//!
//! A row matches a context when every constrained dimension of the row is
//! satisfied; a `NULL` dimension on the row acts as a wildcard. Among the
//! matches the most specific row wins. Ties on specificity are broken by
//! which dimensions are constrained (area over premises type over property
//! type over country), and as a last resort by the higher row id, so the
//! outcome is deterministic for any candidate set.

use crate::contract::model::{Activation, ScopeContext};

/// Pick the winning activation for `ctx` out of `candidates`.
///
/// Candidates are expected to be pre-filtered to enabled rows of a single
/// tenant and module. Returns `None` when nothing matches.
pub fn resolve<'a>(candidates: &'a [Activation], ctx: &ScopeContext) -> Option<&'a Activation> {
    candidates
        .iter()
        .filter(|a| matches(a, ctx))
        .max_by_key(|a| rank(a))
}

fn matches(activation: &Activation, ctx: &ScopeContext) -> bool {
    let s = &activation.scope;
    dimension_matches(s.country_id, ctx.country_id)
        && dimension_matches(s.property_type_id, ctx.property_type_id)
        && dimension_matches(s.premises_type_id, ctx.premises_type_id)
        && dimension_matches(s.area_id, ctx.area_id)
}

/// A row dimension matches when the context leaves it open, when the row
/// itself is a wildcard, or when both carry the same value. A constrained
/// row never matches a context that constrains the dimension differently.
fn dimension_matches(row: Option<i64>, wanted: Option<i64>) -> bool {
    match wanted {
        None => true,
        Some(v) => row.is_none() || row == Some(v),
    }
}

/// Total order over matching rows; `max_by_key` picks the winner.
///
/// The id component makes the tuple unique per row, so no two candidates
/// ever compare equal.
fn rank(activation: &Activation) -> (u8, bool, bool, bool, bool, i64) {
    let s = &activation.scope;
    (
        s.specificity(),
        s.area_id.is_some(),
        s.premises_type_id.is_some(),
        s.property_type_id.is_some(),
        s.country_id.is_some(),
        activation.id,
    )
}
