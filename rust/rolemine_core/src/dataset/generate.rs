//! Synthetic UPA generation from a random hidden role structure.
//!
//! Draw `num_roles` random roles, then give every user the union of a few
//! of them. Useful as a fixture whose true role count is known.

use rand::seq::index::sample;
use rand::Rng;

use crate::error::DatasetError;
use crate::types::{PermissionVector, UpaMatrix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorParams {
    pub num_roles: usize,
    pub num_users: usize,
    pub num_permissions: usize,
    pub max_roles_per_user: usize,
    pub max_permissions_per_role: usize,
    pub min_permissions_per_role: usize,
}

impl GeneratorParams {
    pub fn new(
        num_roles: usize,
        num_users: usize,
        num_permissions: usize,
        max_roles_per_user: usize,
        max_permissions_per_role: usize,
    ) -> Self {
        GeneratorParams {
            num_roles,
            num_users,
            num_permissions,
            max_roles_per_user,
            max_permissions_per_role,
            min_permissions_per_role: 1,
        }
    }

    pub fn validate(&self) -> Result<(), DatasetError> {
        let invalid = |msg: String| Err(DatasetError::InvalidParameters(msg));
        if self.num_roles == 0 || self.num_users == 0 || self.num_permissions == 0 {
            return invalid(format!(
                "roles ({}), users ({}) and permissions ({}) must be non-zero",
                self.num_roles, self.num_users, self.num_permissions
            ));
        }
        if self.max_roles_per_user == 0 || self.max_roles_per_user > self.num_roles {
            return invalid(format!(
                "max roles per user {} outside 1..={}",
                self.max_roles_per_user, self.num_roles
            ));
        }
        if self.min_permissions_per_role == 0
            || self.min_permissions_per_role > self.max_permissions_per_role
            || self.max_permissions_per_role > self.num_permissions
        {
            return invalid(format!(
                "permissions per role {}..={} outside 1..={}",
                self.min_permissions_per_role, self.max_permissions_per_role, self.num_permissions
            ));
        }
        Ok(())
    }
}

/// Random PA: each role holds between min and max distinct permissions.
pub fn generate_pa<R: Rng>(
    params: &GeneratorParams,
    rng: &mut R,
) -> Result<Vec<PermissionVector>, DatasetError> {
    params.validate()?;
    let roles = (0..params.num_roles)
        .map(|_| {
            let size =
                rng.random_range(params.min_permissions_per_role..=params.max_permissions_per_role);
            let mut role = PermissionVector::new(params.num_permissions);
            for p in sample(&mut *rng, params.num_permissions, size).iter() {
                role.set(p);
            }
            role
        })
        .collect();
    Ok(roles)
}

/// Random UPA: each user holds the union of 1..=max distinct roles.
pub fn generate_upa<R: Rng>(
    params: &GeneratorParams,
    rng: &mut R,
) -> Result<UpaMatrix, DatasetError> {
    let roles = generate_pa(params, rng)?;
    let rows = (0..params.num_users)
        .map(|_| {
            let count = rng.random_range(1..=params.max_roles_per_user);
            sample(&mut *rng, params.num_roles, count)
                .iter()
                .fold(PermissionVector::new(params.num_permissions), |acc, r| {
                    acc.union(&roles[r])
                })
        })
        .collect();
    UpaMatrix::from_vectors(rows).map_err(|e| DatasetError::InvalidParameters(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn pa_respects_permission_bounds() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut params = GeneratorParams::new(10, 1, 12, 1, 8);
        params.min_permissions_per_role = 2;
        let roles = generate_pa(&params, &mut rng).unwrap();
        assert_eq!(roles.len(), 10);
        for role in roles {
            assert_eq!(role.len(), 12);
            assert!((2..=8).contains(&role.count_ones()));
        }
    }

    #[test]
    fn single_role_users_reuse_at_most_num_roles_rows() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let params = GeneratorParams::new(6, 20, 12, 1, 8);
        let upa = generate_upa(&params, &mut rng).unwrap();
        assert_eq!(upa.users(), 20);
        assert_eq!(upa.permissions(), 12);
        let distinct: AHashSet<_> = upa.rows().iter().cloned().collect();
        assert!(distinct.len() <= 6);
        for row in upa.rows() {
            assert!((1..=8).contains(&row.count_ones()));
        }
    }

    #[test]
    fn same_seed_same_matrix() {
        let params = GeneratorParams::new(5, 12, 7, 2, 3);
        let a = generate_upa(&params, &mut ChaCha20Rng::seed_from_u64(1)).unwrap();
        let b = generate_upa(&params, &mut ChaCha20Rng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let too_many_roles_per_user = GeneratorParams::new(2, 5, 5, 3, 2);
        assert!(matches!(
            generate_upa(&too_many_roles_per_user, &mut rng),
            Err(DatasetError::InvalidParameters(_))
        ));

        let role_wider_than_permissions = GeneratorParams::new(2, 5, 3, 1, 4);
        assert!(generate_pa(&role_wider_than_permissions, &mut rng).is_err());

        let mut min_above_max = GeneratorParams::new(2, 5, 5, 1, 2);
        min_above_max.min_permissions_per_role = 3;
        assert!(min_above_max.validate().is_err());

        assert!(GeneratorParams::new(0, 5, 5, 1, 1).validate().is_err());
    }
}
