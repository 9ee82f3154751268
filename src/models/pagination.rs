// src/models/pagination.rs
// DOCUMENTATION: Offset/limit paging shared by the review listings
// PURPOSE: `offset` is a page index; the SQL window is [offset*limit, (offset+1)*limit)

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Self {
        Page {
            offset: offset.unwrap_or(0).max(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(0, MAX_LIMIT),
        }
    }

    /// Rows to skip in SQL
    pub fn sql_offset(&self) -> i64 {
        self.offset.saturating_mul(self.limit)
    }

    /// Rows to return in SQL
    pub fn sql_limit(&self) -> i64 {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = Page::new(None, None);
        assert_eq!(page.sql_offset(), 0);
        assert_eq!(page.sql_limit(), 10);
    }

    #[test]
    fn test_offset_is_page_index() {
        let page = Page::new(Some(2), Some(10));
        // rows 20..30
        assert_eq!(page.sql_offset(), 20);
        assert_eq!(page.sql_limit(), 10);
    }

    #[test]
    fn test_negative_and_oversized_values_are_clamped() {
        let page = Page::new(Some(-3), Some(1000));
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, MAX_LIMIT);

        let page = Page::new(Some(1), Some(-5));
        assert_eq!(page.sql_limit(), 0);
    }
}
