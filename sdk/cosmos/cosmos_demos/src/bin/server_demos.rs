// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use cosmos_demos::menu::SERVER_MENU;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    cosmos_demos::run_menu(&SERVER_MENU).await
}
