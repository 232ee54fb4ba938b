//! Basic Role Mining Problem (RMP) solver.
//!
//! Wires FastMiner candidate generation into the greedy selector and turns
//! the selected role vectors into label-keyed PA / UA assignments.

pub mod config;
pub mod greedy;


use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;

use crate::error::Result;
use crate::fast_miner::{generate_candidates, init_roles};
use crate::label::RoleLabeler;
use crate::rmp::config::MinerConfig;
use crate::rmp::greedy::GreedySelector;
use crate::types::{PermissionVector, RoleId, UpaMatrix, UserId};

/// One PA entry: a mined role and the permissions it grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionAssignment {
    pub role_id: RoleId,
    pub permissions: Vec<String>,
    #[serde(skip)]
    pub role: PermissionVector,
}

/// One UA entry: a user and its roles, in the order they were assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAssignment {
    pub user_id: UserId,
    pub roles: Vec<RoleId>,
}

/// PA and UA of one `basic_rmp` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MiningResult {
    /// In selection order; `pa[k]` is `R{k+1}`.
    pub pa: Vec<PermissionAssignment>,
    /// Ascending by user.
    pub ua: Vec<UserAssignment>,
    /// Size of the candidate pool the run started from.
    pub candidates: usize,
    /// Uncovered cells left at termination, at most `delta_factor`.
    pub residual_uncovered: usize,
}

impl MiningResult {
    pub fn iterations(&self) -> usize {
        self.pa.len()
    }

    pub fn role(&self, id: RoleId) -> Option<&PermissionAssignment> {
        self.pa.iter().find(|a| a.role_id == id)
    }

    pub fn roles_of(&self, user: UserId) -> Option<&[RoleId]> {
        self.ua
            .iter()
            .find(|a| a.user_id == user)
            .map(|a| a.roles.as_slice())
    }

    /// `R1 -> ["P2", "P4"]` style pairs, PA order.
    pub fn pa_labels(&self) -> Vec<(String, Vec<String>)> {
        self.pa
            .iter()
            .map(|a| (a.role_id.to_string(), a.permissions.clone()))
            .collect()
    }

    /// `U1 -> ["R1", "R3"]` style pairs, UA order.
    pub fn ua_labels(&self) -> Vec<(String, Vec<String>)> {
        self.ua
            .iter()
            .map(|a| {
                (
                    a.user_id.to_string(),
                    a.roles.iter().map(RoleId::to_string).collect(),
                )
            })
            .collect()
    }

    /// Compose UA with PA back into a `users x permissions` matrix.
    pub fn reconstruct(&self, users: usize, permissions: usize) -> UpaMatrix {
        let mut upa = UpaMatrix::zeros(users, permissions);
        for assignment in &self.ua {
            for role_id in &assignment.roles {
                if let Some(pa) = self.role(*role_id) {
                    for p in pa.role.iter_ones() {
                        upa.grant(assignment.user_id.row(), p);
                    }
                }
            }
        }
        upa
    }
}

/// Orchestrates mining runs and owns the label cache they share.
#[derive(Debug, Default)]
pub struct RoleMiner {
    config: MinerConfig,
    labeler: RoleLabeler,
}

impl RoleMiner {
    pub fn new(config: MinerConfig) -> Self {
        RoleMiner {
            config,
            labeler: RoleLabeler::new(),
        }
    }

    /// Reuse an existing label cache, e.g. across several datasets.
    pub fn with_labeler(config: MinerConfig, labeler: RoleLabeler) -> Self {
        RoleMiner { config, labeler }
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    pub fn labeler(&self) -> &RoleLabeler {
        &self.labeler
    }

    pub fn into_labeler(self) -> RoleLabeler {
        self.labeler
    }

    /// Run candidate generation and greedy selection to termination.
    pub fn mine(&mut self, upa: &UpaMatrix) -> Result<MiningResult> {
        let start = Instant::now();
        let init = init_roles(upa)?;
        let pool = generate_candidates(init.roles());
        let candidates = pool.len();

        let mut selector = GreedySelector::new(upa, pool, self.config)?;
        let selections = selector.run()?;

        let mut pa = Vec::with_capacity(selections.len());
        let mut ua: BTreeMap<usize, Vec<RoleId>> = BTreeMap::new();
        for (k, selection) in selections.into_iter().enumerate() {
            let role_id = RoleId(k + 1);
            for user in selection.users {
                ua.entry(user).or_default().push(role_id);
            }
            pa.push(PermissionAssignment {
                role_id,
                permissions: self.labeler.permissions(&selection.role),
                role: selection.role,
            });
        }

        let result = MiningResult {
            pa,
            ua: ua
                .into_iter()
                .map(|(row, roles)| UserAssignment {
                    user_id: UserId(row),
                    roles,
                })
                .collect(),
            candidates,
            residual_uncovered: selector.uncovered(),
        };

        tracing::info!(
            users = upa.users(),
            permissions = upa.permissions(),
            candidates,
            roles = result.pa.len(),
            residual_uncovered = result.residual_uncovered,
            delta_factor = self.config.delta_factor,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "basic rmp finished"
        );

        Ok(result)
    }
}

/// Mine `upa` with a fresh label cache and sequential scan.
pub fn basic_rmp(upa: &UpaMatrix, delta_factor: usize) -> Result<MiningResult> {
    RoleMiner::new(MinerConfig::with_delta_factor(delta_factor)).mine(upa)
}
