// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::Result;
use cosmos_sql::{clients::ContainerClient, models::UserDefinedFunctionProperties, ResponseExt};
use serde_json::Value;
use std::io::Write;

use crate::demos::collect_items;
use crate::scripts::USER_DEFINED_FUNCTIONS;
use crate::{console, Shared};

const SHOW_FIRST: usize = 20;

pub async fn run(shared: &Shared, out: &mut dyn Write) -> Result<()> {
    let container = shared.ensure_store().await?;

    create_user_defined_functions(&container, out).await?;
    view_user_defined_functions(&container, out).await?;

    execute_udf_regex(&container, out).await?;
    execute_udf_is_north_america(&container, out).await?;
    execute_udf_format_city_state_zip(&container, out).await?;

    delete_user_defined_functions(&container, out).await
}

async fn create_user_defined_functions(
    container: &ContainerClient,
    out: &mut dyn Write,
) -> Result<()> {
    console::clear(out)?;
    console::heading(out, "Create User Defined Functions")?;

    let scripts = container.scripts();
    for script in USER_DEFINED_FUNCTIONS {
        let response = scripts
            .create_user_defined_function(&UserDefinedFunctionProperties::new(
                script.id,
                script.body,
            ))
            .await?;
        writeln!(
            out,
            "Created user defined function {} ({} RUs);",
            script.id,
            response.request_charge()
        )?;
    }
    Ok(())
}

async fn view_user_defined_functions(
    container: &ContainerClient,
    out: &mut dyn Write,
) -> Result<()> {
    console::clear(out)?;
    console::heading(out, "View UDFs")?;

    let udfs = collect_items(
        container
            .scripts()
            .query_user_defined_functions("SELECT * FROM c", None),
    )
    .await?;
    for udf in &udfs {
        writeln!(out, " UDF Id: {};", udf.id)?;
    }
    writeln!(out, "\nTotal UDFs: {}", udfs.len())?;
    Ok(())
}

async fn execute_udf_regex(container: &ContainerClient, out: &mut dyn Write) -> Result<()> {
    console::clear(out)?;
    writeln!(out, "Querying for Rental customers")?;

    let documents: Vec<Value> = collect_items(container.query_items(
        "SELECT c.id, c.name FROM c WHERE udf.udfRegEx(c.name, 'Rental') != null",
        None,
    ))
    .await?;

    writeln!(out, "Found {} Rental customers:", documents.len())?;
    for document in &documents {
        writeln!(
            out,
            " {} ({})",
            document["name"].as_str().unwrap_or("-"),
            document["id"].as_str().unwrap_or("-")
        )?;
    }
    Ok(())
}

async fn execute_udf_is_north_america(
    container: &ContainerClient,
    out: &mut dyn Write,
) -> Result<()> {
    console::clear(out)?;

    for (north_america, label) in [(true, "North American"), (false, "non North American")] {
        writeln!(out, "Querying for {label} customers")?;

        let sql = format!(
            "SELECT c.name, c.address.countryRegionName FROM c WHERE udf.udfIsNorthAmerica(c.address.countryRegionName) = {north_america}"
        );
        let documents: Vec<Value> = collect_items(container.query_items(sql, None)).await?;

        writeln!(
            out,
            "Found {} {label} customers; first {SHOW_FIRST}:",
            documents.len()
        )?;
        for document in documents.iter().take(SHOW_FIRST) {
            writeln!(
                out,
                " {}, {}",
                document["name"].as_str().unwrap_or("-"),
                document["countryRegionName"].as_str().unwrap_or("-")
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

async fn execute_udf_format_city_state_zip(
    container: &ContainerClient,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "Listing names with city, state, zip (first {SHOW_FIRST})")?;

    let documents: Vec<Value> = collect_items(container.query_items(
        "SELECT c.name, udf.udfFormatCityStateZip(c) AS csz FROM c",
        None,
    ))
    .await?;
    for document in documents.iter().take(SHOW_FIRST) {
        writeln!(
            out,
            " {} located in {}",
            document["name"].as_str().unwrap_or("-"),
            document["csz"].as_str().unwrap_or("-")
        )?;
    }
    Ok(())
}

async fn delete_user_defined_functions(
    container: &ContainerClient,
    out: &mut dyn Write,
) -> Result<()> {
    console::heading(out, "Delete User Defined Functions")?;

    let scripts = container.scripts();
    for script in USER_DEFINED_FUNCTIONS {
        scripts.delete_user_defined_function(script.id).await?;
        writeln!(out, "Deleted UDF: {}", script.id)?;
    }
    Ok(())
}
