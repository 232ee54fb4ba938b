//! FastMiner candidate role generation.
//!
//! Reduces a UPA to its distinct rows ("init roles") and adds every
//! non-empty pairwise intersection between them. The result is the
//! candidate pool the greedy selector picks from.

pub mod coverage;

use std::time::{Duration, Instant};

use ahash::{AHashMap, AHashSet};
use serde::Serialize;

use crate::error::Result;
use crate::label::RoleLabeler;
use crate::types::{PermissionVector, UpaMatrix};

/// Distinct UPA rows in first-seen order, with their multiplicities.
#[derive(Debug, Clone)]
pub struct InitRoles {
    roles: Vec<PermissionVector>,
    original_count: AHashMap<PermissionVector, usize>,
}

impl InitRoles {
    pub fn roles(&self) -> &[PermissionVector] {
        &self.roles
    }

    /// Rows exactly equal to `role`; 0 if no user holds exactly `role`.
    pub fn original_count(&self, role: &PermissionVector) -> usize {
        self.original_count.get(role).copied().unwrap_or(0)
    }

    /// `(role, count)` pairs in first-seen order.
    pub fn counts(&self) -> impl Iterator<Item = (&PermissionVector, usize)> + '_ {
        self.roles.iter().map(|r| (r, self.original_count(r)))
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Walk the UPA once, deduplicating rows by content.
pub fn init_roles(upa: &UpaMatrix) -> Result<InitRoles> {
    upa.ensure_minable()?;

    let mut roles = Vec::new();
    let mut original_count: AHashMap<PermissionVector, usize> = AHashMap::new();
    for row in upa.rows() {
        let count = original_count.entry(row.clone()).or_insert(0);
        if *count == 0 {
            roles.push(row.clone());
        }
        *count += 1;
    }

    Ok(InitRoles {
        roles,
        original_count,
    })
}

/// Unique candidate roles in generation order.
///
/// Generation order is the tie-break order of the greedy selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePool {
    roles: Vec<PermissionVector>,
}

impl CandidatePool {
    pub fn roles(&self) -> &[PermissionVector] {
        &self.roles
    }

    pub fn into_roles(self) -> Vec<PermissionVector> {
        self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn contains(&self, role: &PermissionVector) -> bool {
        self.roles.contains(role)
    }
}

/// Single pairwise-intersection pass over `init_roles`.
///
/// For each role `i`: the role itself, then `role[i] AND role[j]` for every
/// `j > i`, each inserted only if non-zero and not already present.
/// Intersections of intersections are not explored.
pub fn generate_candidates(init_roles: &[PermissionVector]) -> CandidatePool {
    let mut roles = Vec::new();
    let mut seen: AHashSet<PermissionVector> = AHashSet::new();

    for (i, candidate) in init_roles.iter().enumerate() {
        if !candidate.is_zero() && seen.insert(candidate.clone()) {
            roles.push(candidate.clone());
        }

        for other in &init_roles[i + 1..] {
            let intersection = candidate.intersection(other);
            if !intersection.is_zero() && !seen.contains(&intersection) {
                seen.insert(intersection.clone());
                roles.push(intersection);
            }
        }
    }

    CandidatePool { roles }
}

/// One row of the candidate-inspection view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateReport {
    pub role: PermissionVector,
    pub label: String,
    /// Users whose row equals the role exactly.
    pub original_count: usize,
    /// Users whose row is a superset of the role.
    pub total_count: usize,
}

/// Candidate-inspection view of a UPA, sorted by `total_count` descending.
#[derive(Debug, Clone)]
pub struct FastMinerReport {
    pub candidates: Vec<CandidateReport>,
    pub elapsed: Duration,
}

impl FastMinerReport {
    pub fn get(&self, role: &PermissionVector) -> Option<&CandidateReport> {
        self.candidates.iter().find(|c| &c.role == role)
    }
}

/// Generate candidates for `upa` and annotate each with its counts.
pub fn fast_miner_report(upa: &UpaMatrix, labeler: &mut RoleLabeler) -> Result<FastMinerReport> {
    let start = Instant::now();
    let init = init_roles(upa)?;
    let pool = generate_candidates(init.roles());

    let candidates = coverage::total_count(upa, &pool)
        .into_iter()
        .map(|(role, total_count)| CandidateReport {
            label: labeler.label(&role),
            original_count: coverage::original_count(&init, &role),
            total_count,
            role,
        })
        .collect();

    let elapsed = start.elapsed();
    tracing::debug!(
        users = upa.users(),
        init_roles = init.len(),
        candidates = pool.len(),
        elapsed_us = elapsed.as_micros() as u64,
        "fast miner report built"
    );

    Ok(FastMinerReport {
        candidates,
        elapsed,
    })
}
