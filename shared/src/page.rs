//! Pagination over an already-filtered list

use serde::{Deserialize, Serialize};

/// One page of a derived list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub data: Vec<T>,
    /// Total items across all pages
    pub total: usize,
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// ceil(total / limit)
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: usize, page: u32, limit: u32) -> Self {
        let total_pages = if limit > 0 {
            total.div_ceil(limit as usize) as u32
        } else {
            1
        };

        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Previous is disabled on page 1
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Next is disabled once this page's end index reaches the total
    pub fn has_next(&self) -> bool {
        (self.page as usize) * (self.limit as usize) < self.total
    }
}

impl<T: Clone> Page<T> {
    /// Cut page `page` (1-based, 0 treated as 1) out of `items`
    pub fn slice(items: &[T], page: u32, limit: u32) -> Self {
        let page = page.max(1);
        let start = ((page - 1) as usize).saturating_mul(limit as usize);
        let data = items
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();
        Self::new(data, items.len(), page, limit)
    }
}
