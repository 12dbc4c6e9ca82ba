// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! One module per menu entry. Each exposes `run(&Shared, &mut dyn Write)` and writes its report there.

pub mod cleanup;
pub mod containers;
pub mod databases;
pub mod documents;
pub mod indexing;
pub mod stored_procedures;
pub mod triggers;
pub mod user_defined_functions;

use azure_core::Result;
use cosmos_sql::{FeedPage, FeedPager, PartitionKey, QueryOptions};
use futures::TryStreamExt;

/// Drains a pager into a single list.
pub(crate) async fn collect_items<T>(pager: FeedPager<T>) -> Result<Vec<T>> {
    pager.map_ok(FeedPage::into_items).try_concat().await
}

/// Drains a pager, also returning the total request charge across all pages.
pub(crate) async fn collect_with_charge<T>(mut pager: FeedPager<T>) -> Result<(Vec<T>, f64)> {
    let mut items = Vec::new();
    let mut charge = 0.0;
    while let Some(page) = pager.try_next().await? {
        charge += page.request_charge();
        items.extend(page);
    }
    Ok((items, charge))
}

/// Query options scoped to one logical partition.
pub(crate) fn in_partition(partition_key: impl Into<PartitionKey>) -> Option<QueryOptions> {
    Some(QueryOptions {
        partition_key: Some(partition_key.into()),
        ..Default::default()
    })
}

/// The partition key for a document projected with its postal code.
pub(crate) fn postal_code_key(postal_code: Option<&str>) -> PartitionKey {
    match postal_code {
        Some(code) => PartitionKey::from(code),
        None => PartitionKey::undefined(),
    }
}
