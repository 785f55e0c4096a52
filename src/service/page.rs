//! Offset paging for `GET /v1/lamps`.

use crate::error::LampError;

pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const MAX_PAGE_SIZE: usize = 100;

/// A validated page request. The cursor is the offset of the first lamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            offset: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Validate raw `cursor` / `pageSize` query values.
    pub fn parse(cursor: Option<&str>, page_size: Option<&str>) -> Result<Self, LampError> {
        let offset = match cursor {
            None | Some("") => 0,
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| LampError::MalformedInput(format!("invalid cursor: {:?}", raw)))?,
        };

        let page_size = match page_size {
            None | Some("") => DEFAULT_PAGE_SIZE,
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
                .ok_or_else(|| {
                    LampError::MalformedInput(format!(
                        "pageSize must be between 1 and {}, got {:?}",
                        MAX_PAGE_SIZE, raw
                    ))
                })?,
        };

        Ok(PageRequest { offset, page_size })
    }

    /// Cursor for the page after this one.
    pub fn next_cursor(&self) -> String {
        self.offset.saturating_add(self.page_size).to_string()
    }
}
