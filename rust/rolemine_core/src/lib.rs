//! `rolemine_core` - role mining over a User-Permission Assignment (UPA).
//!
//! Given which users hold which permissions, derive a small set of roles
//! (PA) and a user-to-role assignment (UA) whose composition reproduces the
//! UPA. Two phases: FastMiner candidate generation, then greedy
//! maximum-coverage selection ("basic RMP").
//!
//! Modules:
//! - `types`: permission vectors, UPA and tri-state working matrices, ids
//! - `fast_miner`: init roles, pairwise-intersection candidates, coverage counts
//! - `rmp`: greedy selector and the `basic_rmp` orchestrator
//! - `label`: memoized `P1,P3` role labels
//! - `support`: Roaring Bitmap sets of users holding a role
//! - `dataset`: pair-file loader and synthetic UPA generator
//! - `error`: error types
//!
//! ```
//! use rolemine_core::{basic_rmp, UpaMatrix};
//!
//! let upa = UpaMatrix::from_rows(&[vec![1, 1, 0], vec![1, 1, 1]]).unwrap();
//! let result = basic_rmp(&upa, 0).unwrap();
//! assert_eq!(result.pa_labels()[0].1, vec!["P1", "P2"]);
//! ```

pub mod dataset;
pub mod error;
pub mod fast_miner;
pub mod label;
pub mod rmp;
pub mod support;
pub mod types;

pub use error::{DatasetError, MinerError, Result};
pub use fast_miner::{fast_miner_report, generate_candidates, init_roles};
pub use label::RoleLabeler;
pub use rmp::config::{MinerConfig, ScanMode};
pub use rmp::{basic_rmp, MiningResult, RoleMiner};
pub use types::{CellState, PermissionVector, RoleId, UpaMatrix, UserId};
