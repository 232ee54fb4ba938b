//! Roaring Bitmap sets of users that hold a role.
//!
//! A user *supports* a role when its UPA row holds every permission of the
//! role. Covering cells never changes who holds what, so a role's support
//! is fixed for the whole mining run.

use roaring::RoaringBitmap;

use crate::types::{PermissionVector, UpaMatrix, WorkingMatrix};

/// Users whose UPA row is a superset of `role`. Scans every row.
pub fn supporting_users(upa: &UpaMatrix, role: &PermissionVector) -> RoaringBitmap {
    upa.rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| row.covers(role))
        .map(|(user, _)| user as u32)
        .collect()
}

/// Uncovered cells `role` would cover across its supporting users.
pub fn covered_area(
    working: &WorkingMatrix,
    role: &PermissionVector,
    support: &RoaringBitmap,
) -> usize {
    support
        .iter()
        .map(|user| working.uncovered_at(user as usize, role))
        .sum()
}

/// Supporting users that still have at least one uncovered cell anywhere
/// in their row. These are the users a selected role gets assigned to.
pub fn users_to_assign(working: &WorkingMatrix, support: &RoaringBitmap) -> Vec<usize> {
    support
        .iter()
        .map(|user| user as usize)
        .filter(|&user| working.row_has_uncovered(user))
        .collect()
}
