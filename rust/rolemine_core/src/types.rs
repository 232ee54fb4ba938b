//! Domain types shared across rolemine_core modules.

use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::error::{MinerError, Result};

// ============================================================================
// Permission vectors
// ============================================================================

/// Fixed-length set of permissions, packed into 64-bit words.
///
/// Identity is content: two vectors with the same length and the same set
/// bits are equal and hash equally, wherever they were built.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct PermissionVector {
    bits: Vec<u64>,
    len: usize,
}

impl PermissionVector {
    /// All-zero vector over `len` permissions.
    pub fn new(len: usize) -> Self {
        PermissionVector {
            bits: vec![0u64; len.div_ceil(64)],
            len,
        }
    }

    /// Build from a sequence of booleans, one per permission.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let bits: Vec<bool> = bits.into_iter().collect();
        let mut vector = PermissionVector::new(bits.len());
        for (i, held) in bits.into_iter().enumerate() {
            if held {
                vector.set(i);
            }
        }
        vector
    }

    /// Build from 0/1 cells. Any non-zero value counts as held.
    pub fn from_cells(cells: &[u8]) -> Self {
        PermissionVector::from_bits(cells.iter().map(|&c| c != 0))
    }

    /// Number of permissions (set or not).
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the vector spans zero permissions.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when no permission is set.
    pub fn is_zero(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn get(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.bits[index / 64] & (1u64 << (index % 64)) != 0
    }

    /// Set permission `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize) {
        if index < self.len {
            self.bits[index / 64] |= 1u64 << (index % 64);
        }
    }

    /// Bitwise AND. Both vectors must span the same permissions.
    pub fn intersection(&self, other: &PermissionVector) -> PermissionVector {
        debug_assert_eq!(self.len, other.len);
        PermissionVector {
            bits: self
                .bits
                .iter()
                .zip(&other.bits)
                .map(|(a, b)| a & b)
                .collect(),
            len: self.len,
        }
    }

    /// Bitwise OR, used when composing several roles into one user row.
    pub fn union(&self, other: &PermissionVector) -> PermissionVector {
        debug_assert_eq!(self.len, other.len);
        PermissionVector {
            bits: self
                .bits
                .iter()
                .zip(&other.bits)
                .map(|(a, b)| a | b)
                .collect(),
            len: self.len,
        }
    }

    /// `self AND other == other`: every permission of `other` is held here.
    pub fn covers(&self, other: &PermissionVector) -> bool {
        self.bits
            .iter()
            .zip(&other.bits)
            .all(|(a, b)| a & b == *b)
    }

    /// Indices of set permissions, ascending.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&i| self.get(i))
    }

    /// Cells as 0/1 values.
    pub fn to_cells(&self) -> Vec<u8> {
        (0..self.len).map(|i| u8::from(self.get(i))).collect()
    }
}

impl fmt::Display for PermissionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.len {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", u8::from(self.get(i)))?;
        }
        write!(f, "]")
    }
}

impl Serialize for PermissionVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for i in 0..self.len {
            seq.serialize_element(&u8::from(self.get(i)))?;
        }
        seq.end()
    }
}

// ============================================================================
// UPA matrix (immutable input)
// ============================================================================

/// User-Permission Assignment: one permission vector per user.
///
/// Row `i` belongs to user `U{i+1}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpaMatrix {
    rows: Vec<PermissionVector>,
    permissions: usize,
}

impl UpaMatrix {
    /// All-zero matrix.
    pub fn zeros(users: usize, permissions: usize) -> Self {
        UpaMatrix {
            rows: vec![PermissionVector::new(permissions); users],
            permissions,
        }
    }

    /// Build from 0/1 rows. Rows must share one length and hold only 0 or 1.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let permissions = rows.first().map_or(0, Vec::len);
        for (user, row) in rows.iter().enumerate() {
            if row.len() != permissions {
                return Err(MinerError::RaggedRow {
                    user,
                    expected: permissions,
                    found: row.len(),
                });
            }
            if let Some(&value) = row.iter().find(|&&v| v > 1) {
                return Err(MinerError::NonBinaryCell { user, value });
            }
        }
        Ok(UpaMatrix {
            rows: rows.iter().map(|r| PermissionVector::from_cells(r)).collect(),
            permissions,
        })
    }

    /// Build from already-packed rows of equal length.
    pub fn from_vectors(rows: Vec<PermissionVector>) -> Result<Self> {
        let permissions = rows.first().map_or(0, PermissionVector::len);
        if let Some((user, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != permissions)
        {
            return Err(MinerError::RaggedRow {
                user,
                expected: permissions,
                found: row.len(),
            });
        }
        Ok(UpaMatrix { rows, permissions })
    }

    pub fn users(&self) -> usize {
        self.rows.len()
    }

    pub fn permissions(&self) -> usize {
        self.permissions
    }

    pub fn rows(&self) -> &[PermissionVector] {
        &self.rows
    }

    pub fn row(&self, user: usize) -> Option<&PermissionVector> {
        self.rows.get(user)
    }

    /// Grant `permission` to `user`. Out-of-range cells are ignored.
    pub fn grant(&mut self, user: usize, permission: usize) {
        if let Some(row) = self.rows.get_mut(user) {
            row.set(permission);
        }
    }

    /// Total number of held permissions.
    pub fn count_ones(&self) -> usize {
        self.rows.iter().map(PermissionVector::count_ones).sum()
    }

    /// Reject inputs the miner cannot work on.
    ///
    /// Zero users or zero permissions is `InvalidInput`. Supporting-user sets
    /// are `u32`-indexed, which caps the number of rows.
    pub fn ensure_minable(&self) -> Result<()> {
        if self.users() == 0 || self.permissions == 0 {
            return Err(MinerError::InvalidInput {
                users: self.users(),
                permissions: self.permissions,
            });
        }
        if u32::try_from(self.users()).is_err() {
            return Err(MinerError::TooManyUsers(self.users()));
        }
        Ok(())
    }
}

// ============================================================================
// Working matrix (mutable tri-state copy used by the greedy selector)
// ============================================================================

/// State of one user/permission cell during selection.
///
/// Only `Uncovered -> Covered` transitions happen; `Empty` and `Covered`
/// are terminal.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum CellState {
    /// Permission never held.
    Empty,
    /// Held, not yet granted by any selected role.
    Uncovered,
    /// Held and granted by a previously selected role.
    Covered,
}

impl CellState {
    /// Held at all, covered or not.
    pub fn is_held(self) -> bool {
        !matches!(self, CellState::Empty)
    }
}

/// Tri-state copy of a UPA, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingMatrix {
    cells: Vec<CellState>,
    users: usize,
    permissions: usize,
}

impl WorkingMatrix {
    pub fn from_upa(upa: &UpaMatrix) -> Self {
        let permissions = upa.permissions();
        let mut cells = Vec::with_capacity(upa.users() * permissions);
        for row in upa.rows() {
            cells.extend((0..permissions).map(|p| {
                if row.get(p) {
                    CellState::Uncovered
                } else {
                    CellState::Empty
                }
            }));
        }
        WorkingMatrix {
            cells,
            users: upa.users(),
            permissions,
        }
    }

    pub fn users(&self) -> usize {
        self.users
    }

    pub fn permissions(&self) -> usize {
        self.permissions
    }

    pub fn row(&self, user: usize) -> &[CellState] {
        let start = user * self.permissions;
        &self.cells[start..start + self.permissions]
    }

    pub fn cell(&self, user: usize, permission: usize) -> CellState {
        self.row(user)[permission]
    }

    /// Number of cells still `Uncovered`, counted fresh.
    pub fn uncovered_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == CellState::Uncovered)
            .count()
    }

    pub fn row_has_uncovered(&self, user: usize) -> bool {
        self.row(user).contains(&CellState::Uncovered)
    }

    /// Every permission of `role` is held (covered or not) by `user`.
    pub fn row_holds(&self, user: usize, role: &PermissionVector) -> bool {
        let row = self.row(user);
        role.iter_ones().all(|p| row[p].is_held())
    }

    /// Uncovered cells of `user` at the permissions of `role`.
    pub fn uncovered_at(&self, user: usize, role: &PermissionVector) -> usize {
        let row = self.row(user);
        role.iter_ones()
            .filter(|&p| row[p] == CellState::Uncovered)
            .count()
    }

    /// Mark `role`'s permissions on `user` as covered.
    pub fn cover(&mut self, user: usize, role: &PermissionVector) {
        let start = user * self.permissions;
        for p in role.iter_ones() {
            let cell = &mut self.cells[start + p];
            if *cell == CellState::Uncovered {
                *cell = CellState::Covered;
            }
        }
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// User identifier, `U{row+1}` when displayed.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct UserId(pub usize);

impl UserId {
    /// Zero-based UPA row.
    pub fn row(self) -> usize {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U{}", self.0 + 1)
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Role identifier in selection order, `R1` is selected first.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct RoleId(pub usize);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

impl Serialize for RoleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
