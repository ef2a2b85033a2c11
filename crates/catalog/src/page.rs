use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

/// 1-based catalog page number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(NonZeroU32::MIN);

    pub fn new(page: u32) -> DomainResult<Self> {
        NonZeroU32::new(page)
            .map(Self)
            .ok_or_else(|| DomainError::validation("page number must be at least 1"))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The preceding page; stays on the first page.
    pub fn previous(self) -> Self {
        NonZeroU32::new(self.0.get() - 1).map_or(Self::FIRST, Self)
    }

    /// Zero-based index of the first record on this page.
    pub fn offset(self, page_size: u32) -> usize {
        (self.get() as usize - 1) * page_size as usize
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u32> for PageNumber {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageNumber> for u32 {
    fn from(value: PageNumber) -> Self {
        value.get()
    }
}

impl core::fmt::Display for PageNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
