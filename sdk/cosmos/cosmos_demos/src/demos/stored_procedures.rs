// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::Result;
use cosmos_sql::{
    clients::ContainerClient, models::StoredProcedureProperties, PartitionKey, ResponseExt,
};
use serde_json::{json, Value};
use std::io::Write;
use uuid::Uuid;

use crate::demos::collect_items;
use crate::models::BulkDeleteResponse;
use crate::scripts::STORED_PROCEDURES;
use crate::{console, Shared};

const BULK_INSERT_TOTAL: usize = 5000;
const BULK_POSTAL_CODE: &str = "12345";

pub async fn run(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    let container = shared.ensure_store().await?;

    create_stored_procedures(&container, out).await?;
    view_stored_procedures(&container, out).await?;
    execute_stored_procedures(&container, out).await?;
    delete_stored_procedures(&container, out).await
}

async fn create_stored_procedures(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    console::heading(out, "Create Stored Procedures")?;

    let scripts = container.scripts();
    for script in STORED_PROCEDURES {
        let response = scripts
            .create_stored_procedure(&StoredProcedureProperties::new(script.id, script.body))
            .await?;
        writeln!(
            out,
            "Created stored procedure {} ({} RUs);",
            script.id,
            response.request_charge()
        )?;
    }
    Ok(())
}

async fn view_stored_procedures(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    console::heading(out, "View Stored Procedures")?;

    let sprocs = collect_items(
        container
            .scripts()
            .query_stored_procedures("SELECT * FROM c", None),
    )
    .await?;
    for sproc in &sprocs {
        writeln!(
            out,
            " Stored procedure Id: {}; Modified: {}",
            sproc.id,
            console::timestamp(sproc.system_properties.last_modified)
        )?;
    }
    writeln!(out, "\nTotal stored procedures: {}", sprocs.len())?;
    Ok(())
}

async fn execute_stored_procedures(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    console::clear(out)?;
    execute_hello_world(container, out).await?;

    console::clear(out)?;
    execute_set_north_america(container, "United States", "12345", out).await?;
    execute_set_north_america(container, "United Kingdom", "RG41 1QW", out).await?;
    execute_set_north_america_without_country(container, out).await?;

    console::clear(out)?;
    execute_generate_id(container, out).await?;

    console::clear(out)?;
    execute_bulk_insert(container, out).await?;

    console::clear(out)?;
    execute_bulk_delete(container, out).await
}

async fn execute_hello_world(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\nExecute spHelloWorld stored procedure")?;

    let message: String = container
        .scripts()
        .execute_stored_procedure("spHelloWorld", "", &[])
        .await?
        .deserialize_body()
        .await?;
    writeln!(out, "Result: {message}")?;
    Ok(())
}

async fn execute_set_north_america(
    container: &ContainerClient,
    country: &str,
    postal_code: &str,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "\nExecute spSetNorthAmerica (country = {country})\n")?;

    let id = Uuid::new_v4().to_string();
    let document = json!({
        "id": id,
        "name": "John Doe",
        "address": {
            "countryRegionName": country,
            "postalCode": postal_code
        }
    });

    let created: Value = container
        .scripts()
        .execute_stored_procedure("spSetNorthAmerica", postal_code, &[document, json!(true)])
        .await?
        .deserialize_body()
        .await?;

    writeln!(out, "Result:")?;
    writeln!(
        out,
        " Country = {}",
        created["address"]["countryRegionName"].as_str().unwrap_or("-")
    )?;
    writeln!(out, " Is North America = {}", created["address"]["isNorthAmerica"])?;

    container.delete_item(postal_code, &id, None).await?;
    Ok(())
}

async fn execute_set_north_america_without_country(
    container: &ContainerClient,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "\nExecute spSetNorthAmerica (no country)\n")?;

    let document = json!({
        "id": Uuid::new_v4().to_string(),
        "name": "James Smith",
        "address": {
            "postalCode": "12345"
        }
    });

    // The procedure enforces a country, so this must fail.
    match container
        .scripts()
        .execute_stored_procedure("spSetNorthAmerica", "12345", &[document, json!(true)])
        .await
    {
        Ok(_) => writeln!(out, "Unexpectedly created a document without a country")?,
        Err(error) => writeln!(out, "Error: {error}")?,
    }
    Ok(())
}

async fn execute_generate_id(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\nExecute spGenerateId\n")?;

    let people = [
        ("Albert", "12345"),
        ("Alfred", "12345"),
        ("Ashton", "12345"),
        ("Albert", "54321"),
    ];

    let mut created = Vec::new();
    for (first_name, postal_code) in people {
        let document = json!({
            "firstName": first_name,
            "lastName": "Einstein",
            "address": { "postalCode": postal_code }
        });
        let doc: Value = container
            .scripts()
            .execute_stored_procedure("spGenerateId", postal_code, &[document])
            .await?
            .deserialize_body()
            .await?;

        let id = doc["id"].as_str().unwrap_or_default().to_string();
        writeln!(
            out,
            "New document in PK '{postal_code}', generated ID '{id}' for '{} {}'",
            doc["firstName"].as_str().unwrap_or_default(),
            doc["lastName"].as_str().unwrap_or_default()
        )?;
        created.push((id, postal_code));
    }

    for (id, postal_code) in created {
        container.delete_item(postal_code, &id, None).await?;
    }
    Ok(())
}

async fn execute_bulk_insert(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\nExecute spBulkInsert\n")?;

    let docs: Vec<Value> = (1..=BULK_INSERT_TOTAL)
        .map(|i| {
            json!({
                "name": format!("Bulk inserted doc {i}"),
                "address": { "postalCode": BULK_POSTAL_CODE }
            })
        })
        .collect();

    // The procedure stops when it runs out of time; resend whatever it didn't get to.
    let mut total_inserted = 0;
    while total_inserted < docs.len() {
        let remaining_docs = Value::Array(docs[total_inserted..].to_vec());
        let inserted: usize = container
            .scripts()
            .execute_stored_procedure("spBulkInsert", BULK_POSTAL_CODE, &[remaining_docs])
            .await?
            .deserialize_body()
            .await?;
        if inserted == 0 {
            writeln!(out, "The procedure made no progress; giving up")?;
            break;
        }

        total_inserted += inserted;
        writeln!(
            out,
            "Inserted {inserted} documents ({total_inserted} total, {} remaining)",
            docs.len() - total_inserted
        )?;
    }
    writeln!(out)?;
    Ok(())
}

async fn execute_bulk_delete(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\nExecute spBulkDelete\n")?;

    let sql = "SELECT c._self FROM c WHERE STARTSWITH(c.name, 'Bulk inserted doc ') = true";
    let partition_key = PartitionKey::from(BULK_POSTAL_CODE);

    let mut total_deleted = 0;
    loop {
        let response: BulkDeleteResponse = container
            .scripts()
            .execute_stored_procedure("spBulkDelete", partition_key.clone(), &[json!(sql)])
            .await?
            .deserialize_body()
            .await?;

        total_deleted += response.count;
        writeln!(
            out,
            "Deleted {} documents ({total_deleted} total, more: {})",
            response.count, response.continuation_flag
        )?;
        if !response.continuation_flag {
            break;
        }
        if response.count == 0 {
            writeln!(out, "The procedure made no progress; giving up")?;
            break;
        }
    }

    writeln!(out, "\nDeleted bulk inserted documents; count: {total_deleted}\n")?;
    Ok(())
}

async fn delete_stored_procedures(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    console::heading(out, "Delete Stored Procedures")?;

    let scripts = container.scripts();
    for script in STORED_PROCEDURES {
        scripts.delete_stored_procedure(script.id).await?;
        writeln!(out, "Deleted stored procedure: {}", script.id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_json, ok, output_text, shared, MockTransport};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn bulk_insert_gives_up_without_progress() {
        let transport = MockTransport::new(|_| ok("0"));
        let mut output = Vec::new();

        execute_bulk_insert(&shared(&transport).store(), &mut output)
            .await
            .unwrap();

        assert_eq!(transport.requests().len(), 1);
        assert!(output_text(output).contains("made no progress"));
    }

    #[tokio::test]
    async fn bulk_insert_resends_what_was_left() {
        let calls = AtomicUsize::new(0);
        let transport = MockTransport::new(move |_| {
            let inserted = if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                4000
            } else {
                1000
            };
            ok(&inserted.to_string())
        });

        execute_bulk_insert(&shared(&transport).store(), &mut Vec::new())
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1].url().path(),
            "/dbs/mydb/colls/mystore/sprocs/spBulkInsert"
        );
        let resent = body_json(&requests[1]);
        assert_eq!(resent[0].as_array().unwrap().len(), BULK_INSERT_TOTAL - 4000);
        assert_eq!(resent[0][0]["name"], "Bulk inserted doc 4001");
    }

    #[tokio::test]
    async fn bulk_delete_stops_when_nothing_is_deleted() {
        let transport = MockTransport::new(|_| ok(r#"{"count":0,"continuationFlag":true}"#));
        let mut output = Vec::new();

        execute_bulk_delete(&shared(&transport).store(), &mut output)
            .await
            .unwrap();

        assert_eq!(transport.requests().len(), 1);
        let output = output_text(output);
        assert!(output.contains("made no progress"));
        assert!(output.contains("count: 0"));
    }

    #[tokio::test]
    async fn bulk_delete_runs_until_finished() {
        let calls = AtomicUsize::new(0);
        let transport = MockTransport::new(move |_| {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                ok(r#"{"count":250,"continuationFlag":true}"#)
            } else {
                ok(r#"{"count":10,"continuationFlag":false}"#)
            }
        });
        let mut output = Vec::new();

        execute_bulk_delete(&shared(&transport).store(), &mut output)
            .await
            .unwrap();

        assert_eq!(transport.requests().len(), 3);
        assert!(output_text(output).contains("count: 510"));
    }
}
