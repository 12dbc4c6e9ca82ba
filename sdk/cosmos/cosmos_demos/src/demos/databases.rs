// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::{Result, StatusCode};
use cosmos_sql::{models::DatabaseProperties, ResponseExt};
use std::io::Write;

use crate::demos::collect_items;
use crate::{console, Shared};

pub async fn run(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    view_databases(shared, out).await?;

    create_database(shared, out).await?;
    view_databases(shared, out).await?;

    delete_database(shared, out).await?;
    view_databases(shared, out).await
}

async fn view_databases(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    console::heading(out, "View Databases")?;

    let databases = collect_items(shared.client.query_databases("SELECT * FROM dbs", None)).await?;
    if databases.is_empty() {
        writeln!(out, "No databases")?;
        return Ok(());
    }

    for database in &databases {
        writeln!(
            out,
            " Database Id: {}; Modified: {}",
            database.id,
            console::timestamp(database.system_properties.last_modified)
        )?;
    }
    writeln!(out, "\nTotal databases: {}", databases.len())?;
    Ok(())
}

/// Creates the demo database unless it already exists. The containers and documents demos start with this too.
pub async fn create_database(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    console::heading(out, &format!("Create Database {}", shared.database_id))?;

    let response = shared
        .client
        .create_database_if_not_exists(&shared.database_id, None)
        .await?;
    let created = response.status() == StatusCode::Created;
    let database: DatabaseProperties = response.deserialize_body().await?;

    writeln!(
        out,
        " Database Id: {}; Modified: {}; {}",
        database.id,
        console::timestamp(database.system_properties.last_modified),
        if created { "created" } else { "already existed" }
    )?;
    Ok(())
}

async fn delete_database(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    console::heading(out, &format!("Delete Database {}", shared.database_id))?;

    let response = shared.database().delete().await?;
    writeln!(
        out,
        "Deleted database {} ({} RUs)",
        shared.database_id,
        response.request_charge()
    )?;
    Ok(())
}
