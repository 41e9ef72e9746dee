//! Cursor based pagination for GraphQL connections.
//!
//! GraphQL connections return a page of `nodes` plus a `pageInfo` block carrying the
//! cursor of the last node and whether more pages follow. [`collect_all_pages`] walks
//! such a connection from the first page to the last.

use std::future::Future;

use serde::Deserialize;
use tracing::debug;

use crate::Error;

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;

/// Number of nodes requested per GraphQL page.
pub const PAGE_SIZE: u32 = 100;

/// Cursor information returned with every page of a GraphQL connection.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Cursor of the last node on this page
    pub end_cursor: Option<String>,
    /// Whether another page follows this one
    pub has_next_page: bool,
}

/// One page of a GraphQL connection.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub nodes: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// Creates a page that is the last of its connection.
    pub fn last(nodes: Vec<T>) -> Self {
        Self {
            nodes,
            page_info: PageInfo::default(),
        }
    }

    /// Creates a page that is followed by the page starting after `end_cursor`.
    pub fn with_next(nodes: Vec<T>, end_cursor: impl Into<String>) -> Self {
        Self {
            nodes,
            page_info: PageInfo {
                end_cursor: Some(end_cursor.into()),
                has_next_page: true,
            },
        }
    }
}

/// Fetches every page of a connection and concatenates the nodes in the order received.
///
/// `fetch_page` is called with `None` for the first page and with the previous page's end
/// cursor afterwards, until a page reports `has_next_page == false`. Nodes are neither
/// reordered, deduplicated nor filtered.
///
/// # Errors
///
/// The first failing page aborts the walk and its error is returned; nodes collected so
/// far are discarded. A page that claims a successor but carries no end cursor yields
/// `Error::InvalidResponse`.
///
/// # Examples
///
/// ```rust
/// use github_client::{collect_all_pages, Error, Page};
///
/// # async fn example() -> Result<(), Error> {
/// let numbers = collect_all_pages(|cursor: Option<String>| async move {
///     match cursor.as_deref() {
///         None => Ok(Page::with_next(vec![1, 2], "c1")),
///         Some(_) => Ok(Page::last(vec![3])),
///     }
/// })
/// .await?;
/// assert_eq!(numbers, vec![1, 2, 3]);
/// # Ok(())
/// # }
/// ```
pub async fn collect_all_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, Error>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    let mut nodes = Vec::new();
    let mut cursor: Option<String> = None;
    let mut page_number = 0usize;

    loop {
        page_number += 1;
        let page = fetch_page(cursor.take()).await?;
        debug!(
            page = page_number,
            node_count = page.nodes.len(),
            has_next_page = page.page_info.has_next_page,
            "Fetched page"
        );
        nodes.extend(page.nodes);

        if !page.page_info.has_next_page {
            break;
        }

        match page.page_info.end_cursor {
            Some(end_cursor) => cursor = Some(end_cursor),
            None => return Err(Error::InvalidResponse),
        }
    }

    Ok(nodes)
}
