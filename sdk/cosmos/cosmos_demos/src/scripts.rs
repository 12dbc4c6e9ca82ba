// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Server-side JavaScript, embedded from the `server/` directory at compile time.

use cosmos_sql::models::{TriggerOperation, TriggerProperties, TriggerType};

/// A script's id, which is also the name of the JavaScript function it defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerScript {
    pub id: &'static str,
    pub body: &'static str,
}

macro_rules! server_script {
    ($id:literal) => {
        ServerScript {
            id: $id,
            body: include_str!(concat!("../server/", $id, ".js")),
        }
    };
}

pub const STORED_PROCEDURES: [ServerScript; 5] = [
    server_script!("spHelloWorld"),
    server_script!("spSetNorthAmerica"),
    server_script!("spGenerateId"),
    server_script!("spBulkInsert"),
    server_script!("spBulkDelete"),
];

pub const USER_DEFINED_FUNCTIONS: [ServerScript; 3] = [
    server_script!("udfRegEx"),
    server_script!("udfIsNorthAmerica"),
    server_script!("udfFormatCityStateZip"),
];

pub const VALIDATE_DOCUMENT: ServerScript = server_script!("trgValidateDocument");
pub const UPDATE_METADATA: ServerScript = server_script!("trgUpdateMetadata");

/// The trigger definitions registered by the triggers demo.
pub fn triggers() -> [TriggerProperties; 2] {
    [
        TriggerProperties::new(
            VALIDATE_DOCUMENT.id,
            VALIDATE_DOCUMENT.body,
            TriggerType::Pre,
            TriggerOperation::Create,
        ),
        TriggerProperties::new(
            UPDATE_METADATA.id,
            UPDATE_METADATA.body,
            TriggerType::Post,
            TriggerOperation::Create,
        ),
    ]
}
