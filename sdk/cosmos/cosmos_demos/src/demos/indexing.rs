// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! How indexing policy affects query cost and which queries can run at all.

use azure_core::Result;
use cosmos_sql::{
    clients::ContainerClient,
    models::{
        CompositeIndexProperty, ContainerProperties, IndexingPolicy, PropertyPath, SpatialIndex,
        SpatialType,
    },
    CreateContainerOptions, QueryOptions, ResponseExt,
};
use futures::TryStreamExt;
use serde_json::{json, Value};
use std::io::Write;
use uuid::Uuid;

use crate::demos::{collect_with_charge, in_partition};
use crate::models::Customer;
use crate::{console, Shared};

const CUSTOM_INDEXING_ID: &str = "customindexing";
const CUSTOM_INDEXING_ZIP_CODE: &str = "12345";
const SPATIAL_INDEXING_ID: &str = "spatialindexing";

const COMPOSITE_SQL: &str = "
    SELECT TOP 20 *
    FROM c
    WHERE c.address.countryRegionName = 'United States'
    ORDER BY
        c.address.location.stateProvinceName,
        c.address.location.city,
        c.name";

pub async fn run(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    excluded_paths(shared, out).await?;
    composite_indexes(shared, out).await?;
    spatial_indexes(shared, out).await
}

async fn excluded_paths(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    console::clear(out)?;
    console::heading(out, "Exclude Index Paths")?;

    // Everything under /miscellaneous stays out of the index except /miscellaneous/rating.
    let policy = IndexingPolicy {
        included_paths: vec![
            PropertyPath::new("/*"),
            PropertyPath::new("/miscellaneous/rating/?"),
        ],
        excluded_paths: vec![PropertyPath::new("/miscellaneous/*")],
        ..Default::default()
    };
    shared
        .database()
        .create_container(
            ContainerProperties::new(CUSTOM_INDEXING_ID, "/zipCode").with_indexing_policy(policy),
            Some(CreateContainerOptions {
                throughput: Some(400),
            }),
        )
        .await?;
    let container = shared.container(CUSTOM_INDEXING_ID);

    let result = query_excluded_paths(&container, out).await;
    container.delete().await?;
    result
}

async fn query_excluded_paths(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    for i in 1..=100 {
        let doc = json!({
            "id": Uuid::new_v4().to_string(),
            "zipCode": CUSTOM_INDEXING_ZIP_CODE,
            "title": format!("Document {i}"),
            "rating": i,
            "miscellaneous": {
                "title": format!("Document {i}"),
                "rating": i,
            }
        });
        container
            .create_item(CUSTOM_INDEXING_ZIP_CODE, doc, None)
            .await?;
    }

    // Querying on indexed properties is most efficient.
    print_cost(
        container,
        "Query indexed string property  ",
        "SELECT * FROM c WHERE c.title = 'Document 90'",
        out,
    )
    .await?;
    print_cost(
        container,
        "Query indexed number property  ",
        "SELECT * FROM c WHERE c.rating = 90",
        out,
    )
    .await?;
    writeln!(out)?;

    // Properties under an excluded path need a scan.
    print_cost(
        container,
        "Query unindexed string property",
        "SELECT * FROM c WHERE c.miscellaneous.title = 'Document 90'",
        out,
    )
    .await?;
    // The explicit include for /miscellaneous/rating wins over the excluded parent.
    print_cost(
        container,
        "Query indexed number property  ",
        "SELECT * FROM c WHERE c.miscellaneous.rating = 90",
        out,
    )
    .await?;
    writeln!(out)?;

    print_cost(
        container,
        "Sort on indexed string property",
        "SELECT * FROM c ORDER BY c.title",
        out,
    )
    .await?;
    print_cost(
        container,
        "Sort on indexed number property",
        "SELECT * FROM c ORDER BY c.rating",
        out,
    )
    .await?;
    writeln!(out)?;

    match container
        .query_items_page::<Value>(
            "SELECT * FROM c ORDER BY c.miscellaneous.title",
            in_partition(CUSTOM_INDEXING_ZIP_CODE),
        )
        .await
    {
        Ok(_) => writeln!(out, "Sort on unindexed property unexpectedly succeeded")?,
        Err(error) => {
            writeln!(out, "Sort on unindexed property failed")?;
            writeln!(out, "{error}")?;
        }
    }
    Ok(())
}

async fn print_cost(
    container: &ContainerClient,
    label: &str,
    sql: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let page = container
        .query_items_page::<Value>(sql, in_partition(CUSTOM_INDEXING_ZIP_CODE))
        .await?;
    writeln!(out, "{label}   Cost = {} RUs", page.request_charge())?;
    Ok(())
}

async fn composite_indexes(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    console::clear(out)?;
    console::heading(out, "Composite Indexes")?;

    let container = shared.store();

    // ORDER BY is only served by the gateway within a single partition, so pick one with US customers.
    let Some(postal_code) = first_us_postal_code(&container).await? else {
        writeln!(out, "No United States customers in {}; skipping", shared.container_id)?;
        return Ok(());
    };
    let options = in_partition(postal_code.as_str());

    writeln!(out, "Multi-property ORDER BY without composite indexes")?;
    if let Err(error) = container
        .query_items_page::<Value>(COMPOSITE_SQL, options.clone())
        .await
    {
        writeln!(out, "{error}\n")?;
    }

    let mut properties: ContainerProperties = container.read().await?.deserialize_body().await?;
    let mut policy = properties.indexing_policy.take().unwrap_or_default();
    policy.composite_indexes.push(vec![
        CompositeIndexProperty::ascending("/address/location/stateProvinceName"),
        CompositeIndexProperty::ascending("/address/location/city"),
        CompositeIndexProperty::ascending("/name"),
    ]);
    properties.indexing_policy = Some(policy);
    container.replace(&properties).await?;

    writeln!(out, "Multi-property ORDER BY with composite indexes")?;
    let result = print_customer_table(&container, options, out).await;

    if let Some(policy) = properties.indexing_policy.as_mut() {
        policy.composite_indexes.clear();
    }
    container.replace(&properties).await?;
    result
}

async fn first_us_postal_code(container: &ContainerClient) -> Result<Option<String>> {
    let mut pager = container.query_items::<String>(
        "SELECT VALUE c.address.postalCode FROM c WHERE c.address.countryRegionName = 'United States' AND IS_STRING(c.address.postalCode)",
        None,
    );
    while let Some(page) = pager.try_next().await? {
        if let Some(code) = page.into_items().into_iter().next() {
            return Ok(Some(code));
        }
    }
    Ok(None)
}

async fn print_customer_table(
    container: &ContainerClient,
    options: Option<QueryOptions>,
    out: &mut dyn Write,
) -> Result<()> {
    let page = container
        .query_items_page::<Customer>(COMPOSITE_SQL, options)
        .await?;
    for customer in page {
        writeln!(
            out,
            "{:<42}{:<12}{:<30}",
            customer.name,
            customer.state_province_name().unwrap_or_default(),
            customer.city().unwrap_or_default()
        )?;
    }
    Ok(())
}

async fn spatial_indexes(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    console::clear(out)?;
    console::heading(out, "Spatial Indexes")?;

    // Only /geo1 gets a spatial index; /geo2 holds the same points for comparison.
    let policy = IndexingPolicy {
        spatial_indexes: vec![SpatialIndex::new("/geo1/?", [SpatialType::Point])],
        ..Default::default()
    };
    shared
        .database()
        .create_container(
            ContainerProperties::new(SPATIAL_INDEXING_ID, "/state").with_indexing_policy(policy),
            Some(CreateContainerOptions {
                throughput: Some(1000),
            }),
        )
        .await?;
    let container = shared.container(SPATIAL_INDEXING_ID);

    let result = query_spatial(&container, out).await;
    container.delete().await?;
    result
}

async fn query_spatial(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    for i in 1..=1000 {
        let in_ny = i % 100 == 0;
        let (longitude, latitude) = if in_ny {
            (-73.992, 40.73104)
        } else {
            (-119.417931, 36.778259)
        };
        let state = if in_ny { "NY" } else { "CA" };
        let doc = json!({
            "id": Uuid::new_v4().to_string(),
            "title": format!("Document {i}"),
            "state": state,
            "geo1": { "type": "Point", "coordinates": [longitude, latitude] },
            "geo2": { "type": "Point", "coordinates": [longitude, latitude] },
        });
        container.create_item(state, doc, None).await?;
    }

    for (label, property) in [
        ("Query indexed spatial property  ", "geo1"),
        ("Query unindexed spatial property", "geo2"),
    ] {
        let sql = format!(
            "SELECT * FROM c WHERE ST_DISTANCE(c.{property}, {{ 'type': 'Point', 'coordinates': [-73.992, 40.73104] }}) <= 10"
        );
        let (items, charge) =
            collect_with_charge(container.query_items::<Value>(sql, None)).await?;
        writeln!(out, "{label}  Cost = {charge} RUs for {} results", items.len())?;
    }
    Ok(())
}
