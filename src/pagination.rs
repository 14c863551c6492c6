//! Pagination utilities for Mavenlink API responses.
//!
//! [`Page`] is one normalized page; [`load_all_items`] drives a single-page
//! loader across every page of a resource.

use std::future::Future;
use std::num::NonZeroUsize;

use futures::future::{try_join_all, TryFutureExt};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;

use crate::error::Result;

/// Number of items requested per page.
pub const PER_PAGE: u32 = 200;

/// A normalized page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page, in server result order.
    pub data: Vec<T>,
    /// Totals for the whole resource.
    pub meta: PageMeta,
}

/// Resource-wide totals reported with every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Number of pages needed to hold `total_items`.
    pub total_pages: u32,
}

impl PageMeta {
    /// Compute totals from the server's `count` and the size of this page.
    ///
    /// An empty page yields zero pages.
    #[must_use]
    pub fn new(total_items: u64, page_len: usize) -> Self {
        let total_pages = if page_len == 0 {
            0
        } else {
            let pages = total_items.div_ceil(page_len as u64);
            u32::try_from(pages).unwrap_or(u32::MAX)
        };
        Self {
            total_items,
            total_pages,
        }
    }
}

impl<T> Page<T> {
    /// Create a new page from items and the server's total count.
    #[must_use]
    pub fn new(data: Vec<T>, total_items: u64) -> Self {
        let meta = PageMeta::new(total_items, data.len());
        Self { data, meta }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Load every page of a resource and concatenate the items.
///
/// Page 1 is fetched first. If it reports more than one page, pages
/// `2..=total_pages` are requested concurrently, all at once, and joined.
/// Items come back in page order, then in server order within a page.
///
/// Extra arguments for the loader are captured by the closure.
///
/// # Errors
///
/// Fails with the first error any page produces; no partial results are
/// returned and nothing is retried.
pub async fn load_all_items<T, F, Fut>(loader: F) -> Result<Vec<T>>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let first = loader(1).await?;
    let total_pages = first.meta.total_pages;
    if total_pages <= 1 {
        return Ok(first.data);
    }

    tracing::debug!(total_pages, "fetching remaining pages");
    let rest = try_join_all((2..=total_pages).map(&loader)).await?;

    Ok(concat_pages(first, rest))
}

/// Like [`load_all_items`], but keeps at most `limit` page requests in
/// flight at once.
///
/// # Errors
///
/// Fails with the first error to complete; pending requests are dropped.
pub async fn load_all_items_buffered<T, F, Fut>(loader: F, limit: NonZeroUsize) -> Result<Vec<T>>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let first = loader(1).await?;
    let total_pages = first.meta.total_pages;
    if total_pages <= 1 {
        return Ok(first.data);
    }

    tracing::debug!(total_pages, limit = limit.get(), "fetching remaining pages");
    let mut rest: Vec<(u32, Page<T>)> = stream::iter(2..=total_pages)
        .map(|number| loader(number).map_ok(move |page| (number, page)))
        .buffer_unordered(limit.get())
        .try_collect()
        .await?;
    rest.sort_unstable_by_key(|(number, _)| *number);

    Ok(concat_pages(first, rest.into_iter().map(|(_, page)| page)))
}

fn concat_pages<T>(first: Page<T>, rest: impl IntoIterator<Item = Page<T>>) -> Vec<T> {
    let mut items = first.data;
    for page in rest {
        items.extend(page.data);
    }
    items
}
