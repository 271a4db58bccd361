//! List envelope and paging parameters.

use dialer_core::{Page, PageRequest, ResourceKind};
use serde::{Deserialize, Serialize};

/// `?limit=&offset=` for resources without other filters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PageQuery {
    pub fn page(self) -> PageRequest {
        PageRequest::new(self.limit, self.offset)
    }
}

/// Paging metadata of a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    pub limit: u32,
    /// URI of the following page.
    pub next: Option<String>,
    pub offset: u32,
    /// URI of the preceding page.
    pub previous: Option<String>,
    pub total_count: u64,
}

/// `{"meta": {...}, "objects": [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub meta: ListMeta,
    pub objects: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new<U>(page: Page<U>, kind: ResourceKind, f: impl FnMut(U) -> T) -> Self {
        let link =
            |offset: u32| format!("{}?limit={}&offset={offset}", kind.list_uri(), page.limit);
        let meta = ListMeta {
            limit: page.limit,
            next: page.next_offset().map(link),
            offset: page.offset,
            previous: page.previous_offset().map(link),
            total_count: page.total_count,
        };
        Self {
            meta,
            objects: page.items.into_iter().map(f).collect(),
        }
    }
}
