// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};

use crate::models::SystemProperties;

/// A server-side JavaScript stored procedure.
#[derive(Clone, Default, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct StoredProcedureProperties {
    pub id: String,
    pub body: String,

    #[serde(flatten)]
    pub system_properties: SystemProperties,
}

impl StoredProcedureProperties {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
            ..Default::default()
        }
    }
}

/// A server-side JavaScript user-defined function, callable from queries as `udf.<id>(...)`.
#[derive(Clone, Default, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserDefinedFunctionProperties {
    pub id: String,
    pub body: String,

    #[serde(flatten)]
    pub system_properties: SystemProperties,
}

impl UserDefinedFunctionProperties {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
            ..Default::default()
        }
    }
}

/// A server-side JavaScript trigger.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TriggerProperties {
    pub id: String,
    pub body: String,
    pub trigger_type: TriggerType,
    pub trigger_operation: TriggerOperation,

    #[serde(flatten)]
    pub system_properties: SystemProperties,
}

impl TriggerProperties {
    pub fn new(
        id: impl Into<String>,
        body: impl Into<String>,
        trigger_type: TriggerType,
        trigger_operation: TriggerOperation,
    ) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
            trigger_type,
            trigger_operation,
            system_properties: SystemProperties::default(),
        }
    }
}

/// Whether a trigger runs before or after the operation it is attached to.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum TriggerType {
    Pre,
    Post,
}

/// The operations a trigger can be attached to.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum TriggerOperation {
    All,
    Create,
    Replace,
    Delete,
    Update,
}
