//! Coverage statistics for candidate roles, for inspection only.
//!
//! Nothing here feeds the greedy selector.

use crate::fast_miner::{CandidatePool, InitRoles};
use crate::support::supporting_users;
use crate::types::{PermissionVector, UpaMatrix};

/// For every candidate, the number of UPA rows that are a superset of it.
///
/// Every row is scanned for every candidate. Sorted by count descending;
/// ties keep generation order.
pub fn total_count(upa: &UpaMatrix, pool: &CandidatePool) -> Vec<(PermissionVector, usize)> {
    let mut counts: Vec<(PermissionVector, usize)> = pool
        .roles()
        .iter()
        .map(|role| (role.clone(), supporting_users(upa, role).len() as usize))
        .collect();
    // `sort_by` is stable.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Rows exactly equal to `role`.
pub fn original_count(init: &InitRoles, role: &PermissionVector) -> usize {
    init.original_count(role)
}
