// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Creating, querying, paging, replacing and deleting customer documents.

use azure_core::{
    error::{Error, ErrorKind},
    Result,
};
use cosmos_sql::{clients::ContainerClient, Query, QueryOptions, ResponseExt};
use futures::TryStreamExt;
use serde_json::{json, Value};
use std::io::Write;
use uuid::Uuid;

use crate::demos::{collect_items, databases, in_partition, postal_code_key};
use crate::models::{Address, Customer, CustomerCity, DocumentKey, Location};
use crate::{console, Shared};

/// Every "New Customer" document lives in this partition.
const NEW_CUSTOMER_POSTAL_CODE: &str = "11229";
const NEW_CUSTOMERS_SQL: &str = "SELECT * FROM c WHERE STARTSWITH(c.name, 'New Customer') = true";
const ALL_SQL: &str = "SELECT * FROM c";

pub async fn run(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    databases::create_database(shared, out).await?;
    let container = shared.ensure_store().await?;

    create_documents(&container, out).await?;
    query_documents(&container, out).await?;

    query_with_unstreamed_stateful_paging(&container, out).await?;
    query_with_unstreamed_stateless_paging(&container, out).await?;

    query_with_streamed_stateful_paging(&container, out).await?;
    query_with_streamed_stateless_paging(&container, out).await?;

    query_with_projection(&container, out).await?;

    replace_documents(&container, out).await?;

    delete_documents(&container, out).await
}

async fn create_documents(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    console::clear(out)?;
    console::heading(out, "Create Documents")?;

    create_document_from_value(container, out).await?;
    create_document_from_json(container, out).await?;
    create_document_from_struct(container, out).await
}

async fn create_document_from_value(
    container: &ContainerClient,
    out: &mut dyn Write,
) -> Result<()> {
    let id = Uuid::new_v4().to_string();
    let document = json!({
        "id": id,
        "name": "New Customer 1",
        "address": {
            "addressType": "Main Office",
            "addressLine1": "123 Main Street",
            "location": {
                "city": "Brooklyn",
                "stateProvinceName": "New York"
            },
            "postalCode": NEW_CUSTOMER_POSTAL_CODE,
            "countryRegionName": "United States"
        }
    });

    container
        .create_item(NEW_CUSTOMER_POSTAL_CODE, document, None)
        .await?;
    writeln!(out, "Created new document {id} from ad-hoc JSON value")?;
    Ok(())
}

async fn create_document_from_json(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    let json = format!(
        r#"{{
            "id": "{}",
            "name": "New Customer 2",
            "address": {{
                "addressType": "Main Office",
                "addressLine1": "123 Main Street",
                "location": {{
                    "city": "Brooklyn",
                    "stateProvinceName": "New York"
                }},
                "postalCode": "{}",
                "countryRegionName": "United States"
            }}
        }}"#,
        Uuid::new_v4(),
        NEW_CUSTOMER_POSTAL_CODE
    );

    let document: Value = azure_core::from_json(&json)?;
    let id = document["id"].as_str().unwrap_or_default().to_string();
    container
        .create_item(NEW_CUSTOMER_POSTAL_CODE, document, None)
        .await?;
    writeln!(out, "Created new document {id} from JSON string")?;
    Ok(())
}

async fn create_document_from_struct(
    container: &ContainerClient,
    out: &mut dyn Write,
) -> Result<()> {
    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        name: "New Customer 3".into(),
        address: Some(Address {
            address_type: Some("Main Office".into()),
            address_line1: Some("123 Main Street".into()),
            location: Some(Location {
                city: Some("Brooklyn".into()),
                state_province_name: Some("New York".into()),
            }),
            postal_code: Some(NEW_CUSTOMER_POSTAL_CODE.into()),
            country_region_name: Some("United States".into()),
        }),
    };

    container
        .create_item(NEW_CUSTOMER_POSTAL_CODE, &customer, None)
        .await?;
    writeln!(out, "Created new document {} from typed struct", customer.id)?;
    Ok(())
}

async fn query_documents(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    console::clear(out)?;
    console::heading(out, "Query Documents (SQL)")?;
    writeln!(out, "Querying for new customer documents (SQL)")?;

    query_as_values(container, out).await?;
    query_as_customers(container, out).await
}

async fn query_as_values(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    let page = container
        .query_items_page::<Value>(NEW_CUSTOMERS_SQL, in_partition(NEW_CUSTOMER_POSTAL_CODE))
        .await?;

    for (i, document) in page.items().iter().enumerate() {
        writeln!(
            out,
            " ({}) Id: {}; Name: {};",
            i + 1,
            document["id"].as_str().unwrap_or("-"),
            document["name"].as_str().unwrap_or("-")
        )?;

        // A JSON value can still be converted to the typed struct afterwards.
        let customer: Customer = serde_json::from_value(document.clone())
            .map_err(|e| Error::full(ErrorKind::DataConversion, e, "document is not a Customer"))?;
        writeln!(out, "     City: {}", customer.city().unwrap_or("-"))?;
    }
    writeln!(out, "Retrieved {} new documents as JSON values\n", page.len())?;
    Ok(())
}

async fn query_as_customers(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    let page = container
        .query_items_page::<Customer>(NEW_CUSTOMERS_SQL, in_partition(NEW_CUSTOMER_POSTAL_CODE))
        .await?;

    for (i, customer) in page.items().iter().enumerate() {
        writeln!(out, " ({}) Id: {}; Name: {};", i + 1, customer.id, customer.name)?;
        writeln!(out, "     City: {}", customer.city().unwrap_or("-"))?;
    }
    writeln!(out, "Retrieved {} new documents as Customer\n", page.len())?;
    Ok(())
}

async fn query_with_unstreamed_stateful_paging(
    container: &ContainerClient,
    out: &mut dyn Write,
) -> Result<()> {
    console::clear(out)?;
    console::heading(out, "Query Documents (paged results, stateful)")?;

    get_first_page(container, out).await?;
    get_all_pages(container, out).await
}

async fn get_first_page(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    let mut pager = container.query_items::<Customer>(ALL_SQL, None);
    let mut count = 0;

    // Dropping the pager after one page leaves the rest of the result set unread.
    if let Some(page) = pager.try_next().await? {
        for customer in page {
            count += 1;
            writeln!(out, " ({count}) Id: {}; Name: {};", customer.id, customer.name)?;
        }
    }
    writeln!(out, "Retrieved {count} documents in first page\n")?;
    Ok(())
}

async fn get_all_pages(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    let mut pager = container.query_items::<Customer>(ALL_SQL, None);
    let mut page_count = 0;
    let mut count = 0;

    while let Some(page) = pager.try_next().await? {
        page_count += 1;
        for customer in page {
            count += 1;
            writeln!(
                out,
                " ({page_count}.{count}) Id: {}; Name: {};",
                customer.id, customer.name
            )?;
        }
    }
    writeln!(out, "Retrieved {count} documents from multi-page result set\n")?;
    Ok(())
}

async fn query_with_unstreamed_stateless_paging(
    container: &ContainerClient,
    out: &mut dyn Write,
) -> Result<()> {
    console::heading(out, "Query Documents (paged results, stateless)")?;

    let mut continuation = None;
    loop {
        continuation = fetch_next_page(container, continuation, out).await?;
        if continuation.is_none() {
            break;
        }
    }
    Ok(())
}

/// Fetches one page and hands back the token for the next, so the caller could resume later from anywhere.
async fn fetch_next_page(
    container: &ContainerClient,
    continuation: Option<String>,
    out: &mut dyn Write,
) -> Result<Option<String>> {
    let page = container
        .query_items_page::<Customer>(
            ALL_SQL,
            Some(QueryOptions {
                continuation,
                ..Default::default()
            }),
        )
        .await?;

    for (i, customer) in page.items().iter().enumerate() {
        writeln!(out, " ({}) Id: {}; Name: {};", i + 1, customer.id, customer.name)?;
    }
    Ok(page.continuation().map(ToOwned::to_owned))
}

async fn query_with_streamed_stateful_paging(
    container: &ContainerClient,
    out: &mut dyn Write,
) -> Result<()> {
    console::heading(out, "Query Documents (streamed, stateful)")?;

    let mut pager = container.query_items_stream(ALL_SQL, None);
    let mut page_count = 0;
    let mut count = 0;

    while let Some(page) = pager.try_next().await? {
        page_count += 1;
        for customer in page.documents::<Customer>()? {
            count += 1;
            writeln!(
                out,
                " ({page_count}.{count}) Id: {}; Name: {};",
                customer.id, customer.name
            )?;
        }
    }
    writeln!(out, "Retrieved {count} documents\n")?;
    Ok(())
}

async fn query_with_streamed_stateless_paging(
    container: &ContainerClient,
    out: &mut dyn Write,
) -> Result<()> {
    console::heading(out, "Query Documents (streamed, stateless)")?;

    let mut continuation = None;
    loop {
        continuation = fetch_next_page_streamed(container, continuation, out).await?;
        if continuation.is_none() {
            break;
        }
    }
    writeln!(out, "Retrieved all documents\n")?;
    Ok(())
}

async fn fetch_next_page_streamed(
    container: &ContainerClient,
    continuation: Option<String>,
    out: &mut dyn Write,
) -> Result<Option<String>> {
    let page = container
        .query_items_stream_page(
            ALL_SQL,
            Some(QueryOptions {
                continuation,
                ..Default::default()
            }),
        )
        .await?;

    for (i, customer) in page.documents::<Customer>()?.iter().enumerate() {
        writeln!(out, " ({}) Id: {}; Name: {};", i + 1, customer.id, customer.name)?;
    }
    Ok(page.continuation().map(ToOwned::to_owned))
}

async fn query_with_projection(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    console::heading(out, "Query Documents (typed projection)")?;

    let query = Query::from(
        "SELECT c.id, c.name, c.address.location.city FROM c WHERE c.address.countryRegionName = @region",
    )
    .with_parameter("@region", "United Kingdom")?;
    let customers: Vec<CustomerCity> = collect_items(container.query_items(query, None)).await?;

    writeln!(out, "Found {} UK customers", customers.len())?;
    for customer in &customers {
        writeln!(
            out,
            " Id: {}; Name: {}; City: {}",
            customer.id,
            customer.name,
            customer.city.as_deref().unwrap_or("-")
        )?;
    }
    Ok(())
}

async fn count_new_flags(container: &ContainerClient) -> Result<u64> {
    // Aggregates are only served by the gateway within a single partition.
    let counts: Vec<u64> = collect_items(container.query_items(
        "SELECT VALUE COUNT(c) FROM c WHERE c.isNew = true",
        in_partition(NEW_CUSTOMER_POSTAL_CODE),
    ))
    .await?;
    Ok(counts.into_iter().sum())
}

async fn replace_documents(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    console::heading(out, "Replace Documents")?;

    writeln!(out, "Documents with 'isNew' flag: {}\n", count_new_flags(container).await?)?;
    writeln!(out, "Querying for documents to be updated")?;

    let documents: Vec<Value> = collect_items(
        container.query_items(NEW_CUSTOMERS_SQL, in_partition(NEW_CUSTOMER_POSTAL_CODE)),
    )
    .await?;
    writeln!(out, "Found {} documents to be updated", documents.len())?;

    for mut document in documents {
        document["isNew"] = Value::Bool(true);
        let id = document["id"].as_str().unwrap_or_default().to_string();
        let updated: Value = container
            .replace_item(NEW_CUSTOMER_POSTAL_CODE, &id, document, None)
            .await?
            .deserialize_body()
            .await?;
        writeln!(out, "Updated document 'isNew' flag: {}", updated["isNew"])?;
    }

    writeln!(out, "Documents with 'isNew' flag: {}\n", count_new_flags(container).await?)?;
    Ok(())
}

async fn delete_documents(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    console::heading(out, "Delete Documents")?;

    let keys: Vec<DocumentKey> = collect_items(container.query_items(
        "SELECT c.id, c.address.postalCode FROM c WHERE STARTSWITH(c.name, 'New Customer') = true",
        None,
    ))
    .await?;
    writeln!(out, "Found {} documents to be deleted", keys.len())?;

    for key in &keys {
        container
            .delete_item(postal_code_key(key.postal_code.as_deref()), &key.id, None)
            .await?;
    }
    writeln!(out, "Deleted {} new customer documents\n", keys.len())?;
    Ok(())
}
