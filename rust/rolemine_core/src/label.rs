//! Human-readable role labels (`"P1,P3,P4"`), memoized per bit pattern.

use ahash::AHashMap;

use crate::types::PermissionVector;

/// Label of a single permission index, 1-based.
pub fn permission_label(index: usize) -> String {
    format!("P{}", index + 1)
}

/// Memoizing role labeler.
///
/// Owned by whoever drives a mining run and passed down by reference.
/// The cache is keyed on vector content, so equal vectors built
/// independently always share one label.
#[derive(Debug, Default, Clone)]
pub struct RoleLabeler {
    cache: AHashMap<PermissionVector, String>,
    hits: u64,
    misses: u64,
}

impl RoleLabeler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Comma-joined `P{i+1}` for every set bit; empty for the zero vector.
    pub fn label(&mut self, role: &PermissionVector) -> String {
        if let Some(label) = self.cache.get(role) {
            self.hits += 1;
            return label.clone();
        }
        self.misses += 1;
        let label = role
            .iter_ones()
            .map(permission_label)
            .collect::<Vec<_>>()
            .join(",");
        self.cache.insert(role.clone(), label.clone());
        label
    }

    /// Individual permission labels of `role`, in permission order.
    pub fn permissions(&mut self, role: &PermissionVector) -> Vec<String> {
        let label = self.label(role);
        if label.is_empty() {
            return Vec::new();
        }
        label.split(',').map(str::to_string).collect()
    }

    /// Number of cached labels.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_set_bits_one_based() {
        let mut labeler = RoleLabeler::new();
        let role = PermissionVector::from_cells(&[1, 0, 1, 1]);
        assert_eq!(labeler.label(&role), "P1,P3,P4");
        assert_eq!(labeler.permissions(&role), vec!["P1", "P3", "P4"]);
    }

    #[test]
    fn zero_vector_has_empty_label() {
        let mut labeler = RoleLabeler::new();
        let zero = PermissionVector::new(5);
        assert_eq!(labeler.label(&zero), "");
        assert!(labeler.permissions(&zero).is_empty());
    }

    #[test]
    fn cache_is_keyed_on_content() {
        let mut labeler = RoleLabeler::new();
        let a = PermissionVector::from_cells(&[0, 1, 0, 1]);
        let b = PermissionVector::from_cells(&[1, 1, 0, 1])
            .intersection(&PermissionVector::from_cells(&[0, 1, 1, 1]));

        assert_eq!(labeler.label(&a), "P2,P4");
        assert_eq!(labeler.label(&b), "P2,P4");
        assert_eq!(labeler.len(), 1);
        assert_eq!(labeler.stats(), (1, 1));
    }

    #[test]
    fn same_bits_different_width_are_distinct_entries() {
        let mut labeler = RoleLabeler::new();
        let narrow = PermissionVector::from_cells(&[1, 0]);
        let wide = PermissionVector::from_cells(&[1, 0, 0]);
        assert_eq!(labeler.label(&narrow), labeler.label(&wide));
        assert_eq!(labeler.len(), 2);

        labeler.clear();
        assert!(labeler.is_empty());
    }
}
