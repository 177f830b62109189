use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u64 = 6;
pub const MAX_LIMIT: u64 = 100;

#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct PageArgs {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageArgs {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Pages are 1-based; page 0 is treated as the first page. Capped at
    /// `i64::MAX`, the largest offset SQLite accepts.
    pub fn offset(&self) -> u64 {
        self.page
            .unwrap_or(1)
            .saturating_sub(1)
            .saturating_mul(self.limit())
            .min(i64::MAX as u64)
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        let args = PageArgs::default();
        assert_eq!(args.limit(), DEFAULT_LIMIT);
        assert_eq!(args.offset(), 0);
    }

    #[test]
    fn test_page_offset_and_clamp() {
        assert_eq!(PageArgs::new(3, 10).offset(), 20);
        assert_eq!(PageArgs::new(0, 10).offset(), 0);
        assert_eq!(PageArgs::new(1, 1000).limit(), MAX_LIMIT);
        assert_eq!(PageArgs::new(1, 0).limit(), 1);
    }

    #[test]
    fn test_page_offset_saturates() {
        assert_eq!(PageArgs::new(u64::MAX, 6).offset(), i64::MAX as u64);
        assert_eq!(PageArgs::new(u64::MAX / 2, MAX_LIMIT).offset(), i64::MAX as u64);
    }
}
