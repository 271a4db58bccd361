//! Resource addressing, paging and ownership scope.

use serde::{Deserialize, Serialize};

use super::User;

/// Versioned API root every resource URI hangs off.
pub const API_PREFIX: &str = "/api/v1";

/// Page size used when a list request does not specify one.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Largest page a client may request.
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// The resources exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Campaign,
    Phonebook,
    Gateway,
    VoipApp,
    User,
    MyCampaign,
    Rating,
}

impl ResourceKind {
    /// URL segment for the resource (`campaign`, `voipapp`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::Phonebook => "phonebook",
            Self::Gateway => "gateway",
            Self::VoipApp => "voipapp",
            Self::User => "user",
            Self::MyCampaign => "mycampaign",
            Self::Rating => "rating",
        }
    }

    /// Collection URI, e.g. `/api/v1/campaign/`.
    pub fn list_uri(self) -> String {
        format!("{API_PREFIX}/{}/", self.name())
    }

    /// Canonical URI of one record, e.g. `/api/v1/gateway/1/`.
    pub fn uri(self, id: i64) -> String {
        format!("{API_PREFIX}/{}/{id}/", self.name())
    }
}

/// Offset-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

impl PageRequest {
    /// Build a page request, clamping `limit` into `1..=MAX_PAGE_LIMIT`.
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .clamp(1, MAX_PAGE_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of a list result together with the unpaged total.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub limit: u32,
    pub offset: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            limit: request.limit,
            offset: request.offset,
        }
    }

    /// Transform every item while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// Offset of the following page, if any records remain.
    pub fn next_offset(&self) -> Option<u32> {
        let next = u64::from(self.offset) + u64::from(self.limit);
        (next < self.total_count).then(|| u32::try_from(next).unwrap_or(u32::MAX))
    }

    /// Offset of the preceding page, if this is not the first one.
    pub fn previous_offset(&self) -> Option<u32> {
        (self.offset > 0).then(|| self.offset.saturating_sub(self.limit))
    }
}

/// Which owner's records a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Superusers see every record.
    All,
    /// Regular users see only records they own.
    Owner(i64),
}

impl Scope {
    pub const fn for_user(user: &User) -> Self {
        if user.is_superuser {
            Self::All
        } else {
            Self::Owner(user.id)
        }
    }

    /// Whether a record owned by `owner_id` is visible in this scope.
    pub const fn permits(self, owner_id: i64) -> bool {
        match self {
            Self::All => true,
            Self::Owner(id) => id == owner_id,
        }
    }

    pub const fn owner_id(self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Owner(id) => Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uris() {
        assert_eq!(ResourceKind::Gateway.uri(1), "/api/v1/gateway/1/");
        assert_eq!(ResourceKind::VoipApp.uri(3), "/api/v1/voipapp/3/");
        assert_eq!(ResourceKind::Campaign.list_uri(), "/api/v1/campaign/");
    }

    #[test]
    fn test_page_request_clamps_limit() {
        assert_eq!(PageRequest::new(None, None).limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(PageRequest::new(Some(0), None).limit, 1);
        assert_eq!(PageRequest::new(Some(50_000), Some(5)).limit, MAX_PAGE_LIMIT);
    }

    #[test]
    fn test_page_navigation() {
        let page = Page::new(vec![1, 2], 45, PageRequest::new(Some(20), Some(20)));
        assert_eq!(page.next_offset(), Some(40));
        assert_eq!(page.previous_offset(), Some(0));

        let last = Page::new(vec![1], 45, PageRequest::new(Some(20), Some(40)));
        assert_eq!(last.next_offset(), None);

        let first = Page::<i32>::new(vec![], 0, PageRequest::default());
        assert_eq!(first.previous_offset(), None);
    }

    #[test]
    fn test_scope_permits() {
        assert!(Scope::All.permits(9));
        assert!(Scope::Owner(2).permits(2));
        assert!(!Scope::Owner(2).permits(3));
    }
}
