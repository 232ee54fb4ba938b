//! Greedy maximum-coverage role selection.
//!
//! Each round picks the candidate that would cover the most still-uncovered
//! cells, marks those cells covered and assigns the role to every holder
//! with work left. Rounds continue while more than `delta_factor` cells are
//! uncovered.

use ahash::AHashMap;
use roaring::RoaringBitmap;

use crate::error::{MinerError, Result};
use crate::fast_miner::CandidatePool;
use crate::rmp::config::{MinerConfig, ScanMode};
use crate::support::{covered_area, supporting_users, users_to_assign};
use crate::types::{PermissionVector, UpaMatrix, WorkingMatrix};

/// Last computed area per role within one selector run.
///
/// A role's area never increases between rounds, so a memoized area that
/// is already no better than the round's best lets the scan skip the role.
#[derive(Debug, Clone, Default)]
pub struct CoverageMemo {
    areas: AHashMap<PermissionVector, usize>,
}

impl CoverageMemo {
    pub fn get(&self, role: &PermissionVector) -> Option<usize> {
        self.areas.get(role).copied()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    fn record(&mut self, role: &PermissionVector, area: usize) {
        match self.areas.get_mut(role) {
            Some(slot) => *slot = area,
            None => {
                self.areas.insert(role.clone(), area);
            }
        }
    }

    fn forget(&mut self, role: &PermissionVector) {
        self.areas.remove(role);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Running,
    Terminated,
}

/// A pool entry with the users that hold it.
#[derive(Debug, Clone)]
struct Candidate {
    role: PermissionVector,
    support: RoaringBitmap,
}

/// Outcome of one selection round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub role: PermissionVector,
    /// Cells this role covered when selected.
    pub covered_area: usize,
    /// Zero-based rows the role was assigned to, ascending.
    pub users: Vec<usize>,
}

/// Drives one greedy run over a private working copy of the UPA.
#[derive(Debug)]
pub struct GreedySelector {
    working: WorkingMatrix,
    pool: Vec<Candidate>,
    memo: CoverageMemo,
    delta_factor: usize,
    scan: ScanMode,
    state: SelectorState,
    selected: usize,
}

impl GreedySelector {
    pub fn new(upa: &UpaMatrix, pool: CandidatePool, config: MinerConfig) -> Result<Self> {
        upa.ensure_minable()?;
        let pool = pool
            .into_roles()
            .into_iter()
            .map(|role| Candidate {
                support: supporting_users(upa, &role),
                role,
            })
            .collect();

        Ok(GreedySelector {
            working: WorkingMatrix::from_upa(upa),
            pool,
            memo: CoverageMemo::default(),
            delta_factor: config.delta_factor,
            scan: config.scan,
            state: SelectorState::Running,
            selected: 0,
        })
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn memo(&self) -> &CoverageMemo {
        &self.memo
    }

    pub fn working(&self) -> &WorkingMatrix {
        &self.working
    }

    /// Candidates not selected yet, in pool order.
    pub fn remaining(&self) -> impl Iterator<Item = &PermissionVector> + '_ {
        self.pool.iter().map(|c| &c.role)
    }

    pub fn uncovered(&self) -> usize {
        self.working.uncovered_count()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Run one round. `Ok(None)` once the run has terminated.
    pub fn select_next(&mut self) -> Result<Option<Selection>> {
        if self.state == SelectorState::Terminated {
            return Ok(None);
        }

        let max_area = self.working.uncovered_count();
        if max_area <= self.delta_factor {
            self.state = SelectorState::Terminated;
            return Ok(None);
        }
        if self.pool.is_empty() {
            return Err(self.exhausted(max_area));
        }

        let threshold = max_area - self.delta_factor;
        let scanned = match self.scan {
            ScanMode::Sequential => self.scan_sequential(threshold),
            ScanMode::Parallel => self.scan_parallel(threshold),
        };
        let Some((index, area)) = scanned else {
            return Err(self.exhausted(max_area));
        };

        let candidate = self.pool.remove(index);
        self.memo.forget(&candidate.role);

        let users = users_to_assign(&self.working, &candidate.support);
        for &user in &users {
            self.working.cover(user, &candidate.role);
        }
        self.selected += 1;

        tracing::debug!(
            round = self.selected,
            role = %candidate.role,
            covered_area = area,
            users = users.len(),
            remaining_uncovered = max_area - area,
            "role selected"
        );

        Ok(Some(Selection {
            role: candidate.role,
            covered_area: area,
            users,
        }))
    }

    /// Select until termination.
    pub fn run(&mut self) -> Result<Vec<Selection>> {
        let mut selections = Vec::new();
        while let Some(selection) = self.select_next()? {
            selections.push(selection);
        }
        Ok(selections)
    }

    fn scan_sequential(&mut self, threshold: usize) -> Option<(usize, usize)> {
        let working = &self.working;
        replay_scan(&self.pool, &mut self.memo, threshold, |_, candidate| {
            covered_area(working, &candidate.role, &candidate.support)
        })
    }

    /// Compute every area from the current snapshot in parallel, then run
    /// the sequential rules over the results in pool order.
    #[cfg(feature = "parallel")]
    fn scan_parallel(&mut self, threshold: usize) -> Option<(usize, usize)> {
        use rayon::prelude::*;

        let working = &self.working;
        let memo = &self.memo;
        let areas: Vec<usize> = self
            .pool
            .par_iter()
            .map(|candidate| {
                // A memoized zero is always pruned by the replay.
                if memo.get(&candidate.role) == Some(0) {
                    0
                } else {
                    covered_area(working, &candidate.role, &candidate.support)
                }
            })
            .collect();

        replay_scan(&self.pool, &mut self.memo, threshold, |index, _| areas[index])
    }

    #[cfg(not(feature = "parallel"))]
    fn scan_parallel(&mut self, threshold: usize) -> Option<(usize, usize)> {
        self.scan_sequential(threshold)
    }

    fn exhausted(&mut self, uncovered: usize) -> MinerError {
        self.state = SelectorState::Terminated;
        tracing::warn!(
            uncovered,
            delta_factor = self.delta_factor,
            selected = self.selected,
            remaining_candidates = self.pool.len(),
            "no candidate role covers the remaining cells"
        );
        MinerError::CoverageExhausted {
            uncovered,
            delta_factor: self.delta_factor,
            selected: self.selected,
        }
    }
}

/// One scan over the pool: memo pruning, strict-greater tie-break, early
/// exit once `threshold` is reached. Returns `(pool index, area)`.
fn replay_scan<F>(
    pool: &[Candidate],
    memo: &mut CoverageMemo,
    threshold: usize,
    mut area_of: F,
) -> Option<(usize, usize)>
where
    F: FnMut(usize, &Candidate) -> usize,
{
    let mut best_area = 0;
    let mut best = None;

    for (index, candidate) in pool.iter().enumerate() {
        if let Some(previous) = memo.get(&candidate.role) {
            if previous <= best_area {
                tracing::trace!(role = %candidate.role, previous, best_area, "memo prune");
                continue;
            }
        }

        let area = area_of(index, candidate);
        memo.record(&candidate.role, area);

        if area > best_area {
            best = Some(index);
            best_area = area;
        }
        if best_area >= threshold {
            break;
        }
    }

    best.map(|index| (index, best_area))
}
