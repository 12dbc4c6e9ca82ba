// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Pre- and post-triggers. A trigger only runs when a request names it.

use azure_core::Result;
use cosmos_sql::{clients::ContainerClient, ErrorExt, ItemOptions, ResponseExt};
use serde_json::{json, Value};
use std::io::Write;
use uuid::Uuid;

use crate::demos::collect_items;
use crate::scripts::{self, UPDATE_METADATA, VALIDATE_DOCUMENT};
use crate::{console, Shared};

const TRIGGER_POSTAL_CODE: &str = "12345";
const METADATA_ID: &str = "_metadata";

pub async fn run(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    let container = shared.ensure_store().await?;

    create_triggers(&container, out).await?;
    view_triggers(&container, out).await?;

    let mut created = Vec::new();
    let result = async {
        execute_validate_document(&container, &mut created, out).await?;
        execute_update_metadata(&container, &mut created, out).await
    }
    .await;

    delete_documents(&container, &created, out).await?;
    delete_triggers(&container, out).await?;
    result
}

async fn create_triggers(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    console::clear(out)?;
    console::heading(out, "Create Triggers")?;

    let client = container.scripts();
    for trigger in scripts::triggers() {
        let response = client.create_trigger(&trigger).await?;
        writeln!(
            out,
            "Created {:?}-trigger {} ({} RUs);",
            trigger.trigger_type,
            trigger.id,
            response.request_charge()
        )?;
    }
    Ok(())
}

async fn view_triggers(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    console::heading(out, "View Triggers")?;

    let triggers =
        collect_items(container.scripts().query_triggers("SELECT * FROM c", None)).await?;
    for trigger in &triggers {
        writeln!(
            out,
            " Trigger Id: {}; Type: {:?}; Operation: {:?}",
            trigger.id, trigger.trigger_type, trigger.trigger_operation
        )?;
    }
    writeln!(out, "\nTotal triggers: {}", triggers.len())?;
    Ok(())
}

async fn execute_validate_document(
    container: &ContainerClient,
    created: &mut Vec<String>,
    out: &mut dyn Write,
) -> Result<()> {
    console::heading(out, &format!("Execute {}", VALIDATE_DOCUMENT.id))?;

    let options = ItemOptions {
        pre_triggers: vec![VALIDATE_DOCUMENT.id.to_string()],
        ..Default::default()
    };

    for weekday in ["monday", "SATURDAY"] {
        let id = Uuid::new_v4().to_string();
        let document = json!({
            "id": id,
            "name": "Trigger test",
            "weekday": weekday,
            "address": { "postalCode": TRIGGER_POSTAL_CODE }
        });
        let stored: Value = container
            .create_item(TRIGGER_POSTAL_CODE, document, Some(options.clone()))
            .await?
            .deserialize_body()
            .await?;
        created.push(id);

        writeln!(
            out,
            "Created document with weekday '{weekday}'; stored as '{}', weekdayOff = {}",
            stored["weekday"].as_str().unwrap_or("-"),
            stored["weekdayOff"]
        )?;
    }

    // The trigger rejects anything that isn't a day of the week.
    let invalid = json!({
        "id": Uuid::new_v4().to_string(),
        "name": "Trigger test",
        "weekday": "Someday",
        "address": { "postalCode": TRIGGER_POSTAL_CODE }
    });
    match container
        .create_item(TRIGGER_POSTAL_CODE, invalid, Some(options))
        .await
    {
        Ok(_) => writeln!(out, "Unexpectedly created a document with an invalid weekday")?,
        Err(error) => writeln!(out, "Invalid weekday rejected: {error}")?,
    }
    Ok(())
}

async fn execute_update_metadata(
    container: &ContainerClient,
    created: &mut Vec<String>,
    out: &mut dyn Write,
) -> Result<()> {
    console::heading(out, &format!("Execute {}", UPDATE_METADATA.id))?;

    let options = ItemOptions {
        post_triggers: vec![UPDATE_METADATA.id.to_string()],
        ..Default::default()
    };

    for i in 1..=3 {
        let id = Uuid::new_v4().to_string();
        let document = json!({
            "id": id,
            "name": format!("Metadata test {i}"),
            "address": { "postalCode": TRIGGER_POSTAL_CODE }
        });
        container
            .create_item(TRIGGER_POSTAL_CODE, document, Some(options.clone()))
            .await?;
        created.push(id.clone());
        writeln!(out, "Created document {id}")?;
    }

    let metadata: Value = container
        .read_item(TRIGGER_POSTAL_CODE, METADATA_ID, None)
        .await?
        .deserialize_body()
        .await?;
    writeln!(
        out,
        "\n{METADATA_ID}: lastId = {}; count = {}",
        metadata["lastId"].as_str().unwrap_or("-"),
        metadata["count"]
    )?;
    Ok(())
}

async fn delete_documents(
    container: &ContainerClient,
    created: &[String],
    out: &mut dyn Write,
) -> Result<()> {
    console::heading(out, "Delete Trigger Documents")?;

    for id in created {
        container.delete_item(TRIGGER_POSTAL_CODE, id, None).await?;
    }
    match container
        .delete_item(TRIGGER_POSTAL_CODE, METADATA_ID, None)
        .await
    {
        Err(error) if error.is_not_found() => {}
        result => {
            result?;
        }
    }
    writeln!(out, "Deleted {} documents and {METADATA_ID}", created.len())?;
    Ok(())
}

async fn delete_triggers(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    console::heading(out, "Delete Triggers")?;

    let client = container.scripts();
    for trigger in [VALIDATE_DOCUMENT, UPDATE_METADATA] {
        client.delete_trigger(trigger.id).await?;
        writeln!(out, "Deleted trigger: {}", trigger.id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        bad_request, empty_feed, is_query, not_found, ok, respond, shared, MockTransport,
    };
    use azure_core::{Method, StatusCode};

    const STORE: &str = "/dbs/mydb/colls/mystore";

    #[tokio::test]
    async fn triggers_are_deleted_when_a_step_fails() {
        let transport = MockTransport::new(|request| {
            let path = request.url().path();
            match request.method() {
                _ if is_query(request) => empty_feed(),
                Method::Post if path == "/dbs" => respond(StatusCode::Created, r#"{"id":"mydb"}"#),
                Method::Post if path == "/dbs/mydb/colls" => respond(
                    StatusCode::Created,
                    r#"{"id":"mystore","partitionKey":{"paths":["/address/postalCode"],"kind":"Hash"}}"#,
                ),
                Method::Post if path.ends_with("/triggers") => respond(StatusCode::Created, "{}"),
                Method::Post if path.ends_with("/docs") => bad_request("trigger store unavailable"),
                Method::Delete if path.ends_with(METADATA_ID) => not_found(),
                Method::Delete => respond(StatusCode::NoContent, ""),
                _ => ok("{}"),
            }
        });
        let mut output = Vec::new();

        let error = run(&shared(&transport), &mut output).await.unwrap_err();
        assert_eq!(error.http_status(), Some(StatusCode::BadRequest));

        let deletes: Vec<_> = transport
            .calls()
            .into_iter()
            .filter(|(method, _)| method == &Method::Delete)
            .map(|(_, path)| path)
            .collect();
        assert_eq!(
            deletes,
            vec![
                format!("{STORE}/docs/{METADATA_ID}"),
                format!("{STORE}/triggers/{}", VALIDATE_DOCUMENT.id),
                format!("{STORE}/triggers/{}", UPDATE_METADATA.id),
            ]
        );
        assert!(String::from_utf8(output).unwrap().contains("Deleted trigger: trgUpdateMetadata"));
    }

    #[tokio::test]
    async fn documents_created_before_a_failure_are_removed() {
        let transport = MockTransport::new(|request| {
            let path = request.url().path();
            match request.method() {
                _ if is_query(request) => empty_feed(),
                Method::Post if path.ends_with("/docs") => {
                    let weekday = crate::test_support::body_json(request)["weekday"].clone();
                    if weekday == "Someday" {
                        bad_request("invalid weekday")
                    } else {
                        respond(
                            StatusCode::Created,
                            &serde_json::json!({ "weekday": weekday, "weekdayOff": false })
                                .to_string(),
                        )
                    }
                }
                // Reading the metadata document fails, which ends the demo early.
                Method::Get if path.ends_with(METADATA_ID) => bad_request("no metadata"),
                Method::Delete => respond(StatusCode::NoContent, ""),
                _ => respond(StatusCode::Created, r#"{"id":"x"}"#),
            }
        });

        run(&shared(&transport), &mut Vec::new()).await.unwrap_err();

        let deleted_docs = transport
            .calls()
            .into_iter()
            .filter(|(method, path)| method == &Method::Delete && path.contains("/docs/"))
            .count();
        // Two valid weekdays, three metadata documents, then the metadata document itself.
        assert_eq!(deleted_docs, 6);
    }
}
