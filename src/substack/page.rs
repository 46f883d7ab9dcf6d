//! Cursor-based pagination over Substack list endpoints
//!
//! List endpoints are pulled page by page and collected by a bounded consumer
//! that never returns more than the requested limit, even when a page
//! over-produces. Iteration is finite by construction: it stops at the limit
//! or when the endpoint stops handing out a next cursor.

use crate::error::AppError;
use std::future::Future;

/// Position within a paginated listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// Numeric offset (posts endpoint)
    Offset(u64),
    /// Opaque continuation token (notes endpoint)
    Token(String),
}

/// One page of a paginated listing
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    /// A page with no continuation, for endpoints that return everything at once
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }
}

/// Pull pages from `next_page` until `limit` items are collected or the
/// listing is exhausted. Starts from the initial (None) cursor.
pub async fn collect_limited<T, F, Fut>(limit: usize, mut next_page: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(Option<Cursor>) -> Fut,
    Fut: Future<Output = Result<Page<T>, AppError>>,
{
    let mut items = Vec::new();
    if limit == 0 {
        return Ok(items);
    }

    let mut cursor: Option<Cursor> = None;
    loop {
        let page = next_page(cursor.take()).await?;
        let page_empty = page.items.is_empty();

        for item in page.items {
            // Duplicate bound check: cap even if a page over-produces
            if items.len() >= limit {
                break;
            }
            items.push(item);
        }

        if items.len() >= limit || page_empty {
            break;
        }

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    Ok(items)
}
