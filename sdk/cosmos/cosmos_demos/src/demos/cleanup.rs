// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Removes whatever the other demos leave behind in the store container.

use azure_core::Result;
use cosmos_sql::{clients::ContainerClient, ErrorExt};
use std::io::Write;
use tracing::debug;

use crate::demos::{collect_items, postal_code_key};
use crate::models::DocumentKey;
use crate::{console, Shared};

const LEFTOVER_DOCUMENTS_SQL: &str = "
    SELECT c.id, c.address.postalCode
    FROM c
    WHERE
        STARTSWITH(c.name, 'New Customer') OR
        STARTSWITH(c.id, '_meta') OR
        IS_DEFINED(c.weekdayOff) OR
        STARTSWITH(c.id, 'DUPEJ') OR
        c.lastName = 'Einstein'";

pub async fn run(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    console::heading(out, "Cleanup")?;

    let container = shared.store();
    match container.read().await {
        Err(error) if error.is_not_found() => {
            writeln!(out, "Container {} does not exist; nothing to clean up", shared.container_id)?;
            return Ok(());
        }
        result => {
            result?;
        }
    }

    delete_documents(&container, out).await?;
    delete_stored_procedures(&container, out).await?;
    delete_triggers(&container, out).await?;
    delete_user_defined_functions(&container, out).await
}

async fn delete_documents(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Deleting documents created by demos...")?;

    let keys: Vec<DocumentKey> =
        collect_items(container.query_items(LEFTOVER_DOCUMENTS_SQL, None)).await?;
    for key in &keys {
        debug!(id = %key.id, postal_code = ?key.postal_code, "deleting leftover document");
        container
            .delete_item(postal_code_key(key.postal_code.as_deref()), &key.id, None)
            .await?;
    }
    writeln!(out, "Deleted {} documents", keys.len())?;
    Ok(())
}

async fn delete_stored_procedures(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Deleting all stored procedures...")?;

    let scripts = container.scripts();
    let sprocs = collect_items(scripts.query_stored_procedures("SELECT * FROM c", None)).await?;
    for sproc in &sprocs {
        scripts.delete_stored_procedure(&sproc.id).await?;
    }
    Ok(())
}

async fn delete_triggers(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Deleting all triggers...")?;

    let scripts = container.scripts();
    let triggers = collect_items(scripts.query_triggers("SELECT * FROM c", None)).await?;
    for trigger in &triggers {
        scripts.delete_trigger(&trigger.id).await?;
    }
    Ok(())
}

async fn delete_user_defined_functions(
    container: &ContainerClient,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "Deleting all user defined functions...")?;

    let scripts = container.scripts();
    let udfs =
        collect_items(scripts.query_user_defined_functions("SELECT * FROM c", None)).await?;
    for udf in &udfs {
        scripts.delete_user_defined_function(&udf.id).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        empty_feed, header, is_query, not_found, ok, output_text, query_text, respond, shared,
        MockTransport,
    };
    use azure_core::{Method, StatusCode};
    use cosmos_sql::constants;

    #[tokio::test]
    async fn missing_container_is_left_alone() {
        let transport = MockTransport::new(|_| not_found());
        let mut output = Vec::new();

        run(&shared(&transport), &mut output).await.unwrap();

        assert_eq!(
            transport.calls(),
            vec![(Method::Get, "/dbs/mydb/colls/mystore".to_string())]
        );
        assert!(output_text(output).contains("Container mystore does not exist"));
    }

    #[tokio::test]
    async fn other_read_failures_are_reported() {
        let transport = MockTransport::new(|_| {
            respond(StatusCode::Forbidden, r#"{"code":"Forbidden"}"#)
        });

        let error = run(&shared(&transport), &mut Vec::new()).await.unwrap_err();
        assert_eq!(error.http_status(), Some(StatusCode::Forbidden));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn documents_without_postal_code_use_the_undefined_key() {
        let transport = MockTransport::new(|request| {
            let path = request.url().path();
            if is_query(request) && path.ends_with("/docs") {
                assert!(query_text(request).contains("c.address.postalCode"));
                ok(r#"{"Documents":[{"id":"with-code","postalCode":"11229"},{"id":"no-code"}]}"#)
            } else if is_query(request) {
                empty_feed()
            } else if request.method() == &Method::Delete {
                respond(StatusCode::NoContent, "")
            } else {
                ok(r#"{"id":"mystore","partitionKey":{"paths":["/address/postalCode"],"kind":"Hash"}}"#)
            }
        });
        let mut output = Vec::new();

        run(&shared(&transport), &mut output).await.unwrap();

        let deletes: Vec<_> = transport
            .requests()
            .into_iter()
            .filter(|r| r.method() == &Method::Delete)
            .collect();
        assert_eq!(deletes.len(), 2);
        assert_eq!(deletes[0].url().path(), "/dbs/mydb/colls/mystore/docs/with-code");
        assert_eq!(header(&deletes[0], &constants::PARTITION_KEY), Some(r#"["11229"]"#));
        assert_eq!(deletes[1].url().path(), "/dbs/mydb/colls/mystore/docs/no-code");
        assert_eq!(header(&deletes[1], &constants::PARTITION_KEY), Some("[{}]"));

        let queried: Vec<_> = transport
            .requests()
            .iter()
            .filter(|r| is_query(r))
            .map(|r| r.url().path().to_string())
            .collect();
        assert_eq!(
            queried,
            vec![
                "/dbs/mydb/colls/mystore/docs",
                "/dbs/mydb/colls/mystore/sprocs",
                "/dbs/mydb/colls/mystore/triggers",
                "/dbs/mydb/colls/mystore/udfs",
            ]
        );
        assert!(output_text(output).contains("Deleted 2 documents"));
    }
}
