/// 1-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    #[must_use]
    pub const fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Page 0 is never valid. Page 1 is always valid, even for an empty set.
    #[must_use]
    pub const fn is_out_of_range(&self, total: u64) -> bool {
        self.page == 0 || (self.page > 1 && self.offset() >= total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
        }
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page.saturating_mul(self.page_size) < self.total
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 20).offset(), 0);
        assert_eq!(PageRequest::new(3, 20).offset(), 40);
    }

    #[test]
    fn test_out_of_range() {
        assert!(PageRequest::new(0, 20).is_out_of_range(100));
        assert!(!PageRequest::new(1, 20).is_out_of_range(0));
        assert!(!PageRequest::new(2, 20).is_out_of_range(21));
        assert!(PageRequest::new(2, 20).is_out_of_range(20));
    }

    #[test]
    fn test_next_previous() {
        let page = Page::new(vec![1, 2], 3, PageRequest::new(1, 2));
        assert!(page.has_next());
        assert!(!page.has_previous());

        let page = Page::new(vec![3], 3, PageRequest::new(2, 2));
        assert!(!page.has_next());
        assert!(page.has_previous());
    }
}
