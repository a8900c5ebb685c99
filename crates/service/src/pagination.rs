//! Pagination utilities for list reads

pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;

/// Limit/offset window over an id-ordered listing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Pagination {
    /// Clamp to sane defaults, returning `(limit, offset)`
    pub fn normalize(self) -> (u64, u64) {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        (limit, self.offset.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_clamps_zero_limit() {
        let (limit, offset) = Pagination { limit: Some(0), offset: None }.normalize();
        assert_eq!(limit, 1);
        assert_eq!(offset, 0);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (limit, offset) = Pagination { limit: Some(1000), offset: Some(40) }.normalize();
        assert_eq!(limit, 100);
        assert_eq!(offset, 40);
    }

    #[test]
    fn default_values_are_sane() {
        assert_eq!(Pagination::default().normalize(), (20, 0));
    }
}
