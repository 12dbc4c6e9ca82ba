// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Cosmos DB SQL queries.

use serde::Serialize;

use azure_core::error::{Error, ErrorKind};

/// A SQL query, with optional named parameters.
///
/// Simple queries can be created straight from a string:
///
/// ```rust
/// # use cosmos_sql::Query;
/// let query = Query::from("SELECT * FROM c");
/// ```
///
/// Parameters are bound by name and serialized as JSON, so no value is ever spliced into the query text:
///
/// ```rust
/// # use cosmos_sql::Query;
/// let query = Query::from("SELECT * FROM c WHERE c.address.countryRegionName = @region")
///     .with_parameter("@region", "United Kingdom")?;
/// # Ok::<(), azure_core::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Query {
    #[serde(rename = "query")]
    text: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    parameters: Vec<QueryParameter>,
}

/// A named parameter bound to a [`Query`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryParameter {
    name: String,
    value: serde_json::Value,
}

impl Query {
    /// Binds a parameter, replacing any earlier value bound to the same name.
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Serialize,
    ) -> azure_core::Result<Self> {
        let name = name.into();
        let value = serde_json::to_value(value).map_err(|e| {
            Error::full(ErrorKind::DataConversion, e, format!("failed to serialize {name}"))
        })?;
        self.parameters.retain(|p| p.name != name);
        self.parameters.push(QueryParameter { name, value });
        Ok(self)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parameters(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.parameters.iter().map(|p| (p.name.as_str(), &p.value))
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            parameters: Vec::new(),
        }
    }
}

impl From<String> for Query {
    fn from(text: String) -> Self {
        Self {
            text,
            parameters: Vec::new(),
        }
    }
}

impl From<&String> for Query {
    fn from(text: &String) -> Self {
        Self::from(text.as_str())
    }
}
