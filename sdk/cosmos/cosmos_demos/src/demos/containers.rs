// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::Result;
use cosmos_sql::{models::ContainerProperties, CreateContainerOptions, ResponseExt};
use std::io::Write;

use crate::demos::{collect_items, databases};
use crate::{console, Shared};

const CONTAINER1_ID: &str = "Container1";
const CONTAINER2_ID: &str = "Container2";
const PARTITION_KEY_PATH: &str = "/state";
const THROUGHPUT: u32 = 400;

pub async fn run(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    databases::create_database(shared, out).await?;
    view_containers(shared, out).await?;

    create_container(shared, CONTAINER1_ID, out).await?;
    view_containers(shared, out).await?;
    create_container(shared, CONTAINER2_ID, out).await?;
    view_containers(shared, out).await?;

    delete_container(shared, CONTAINER1_ID, out).await?;
    delete_container(shared, CONTAINER2_ID, out).await?;
    view_containers(shared, out).await
}

async fn view_containers(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    console::heading(out, &format!("View Containers in {}", shared.database_id))?;

    let containers =
        collect_items(shared.database().query_containers("SELECT * FROM colls", None)).await?;
    if containers.is_empty() {
        writeln!(out, "No containers in database {}", shared.database_id)?;
    }

    for (i, container) in containers.iter().enumerate() {
        writeln!(out, "\n Container #{}", i + 1)?;
        view_container(shared, container, out).await?;
    }

    writeln!(
        out,
        "\nTotal containers in {} database: {}",
        shared.database_id,
        containers.len()
    )?;
    Ok(())
}

async fn view_container(
    shared: &Shared,
    properties: &ContainerProperties,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "    Container ID: {}", properties.id)?;
    writeln!(
        out,
        "    Last Modified: {}",
        console::timestamp(properties.system_properties.last_modified)
    )?;
    writeln!(
        out,
        "    Partition Key: {}",
        properties.partition_key_path().unwrap_or("-")
    )?;

    let throughput = shared.container(&properties.id).read_throughput().await?;
    match throughput.and_then(|offer| offer.throughput()) {
        Some(ru) => writeln!(out, "       Throughput: {ru}")?,
        None => writeln!(out, "       Throughput: shared with database")?,
    }
    Ok(())
}

async fn create_container(shared: &Shared, container_id: &str, out: &mut dyn Write) -> Result<()> {
    console::heading(out, &format!(
        "Create Container {} in {}",
        container_id, shared.database_id
    ))?;
    writeln!(out, " Throughput: {THROUGHPUT} RU/sec")?;
    writeln!(out, " Partition key: {PARTITION_KEY_PATH}\n")?;

    let response = shared
        .database()
        .create_container_if_not_exists(
            ContainerProperties::new(container_id, PARTITION_KEY_PATH),
            Some(CreateContainerOptions {
                throughput: Some(THROUGHPUT),
            }),
        )
        .await?;
    writeln!(out, "Created container {} ({} RUs)", container_id, response.request_charge())?;
    Ok(())
}

async fn delete_container(shared: &Shared, container_id: &str, out: &mut dyn Write) -> Result<()> {
    console::heading(out, &format!(
        "Delete Container {} in {}",
        container_id, shared.database_id
    ))?;

    shared.container(container_id).delete().await?;
    writeln!(
        out,
        "Deleted container {} from database {}",
        container_id, shared.database_id
    )?;
    Ok(())
}
