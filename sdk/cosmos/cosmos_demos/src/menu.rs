// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! The interactive selection loop.

use azure_core::Result;
use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::{console, demos, Shared};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Databases,
    Containers,
    Documents,
    Indexing,
    StoredProcedures,
    Triggers,
    UserDefinedFunctions,
    Cleanup,
}

impl Demo {
    /// Runs the demo, writing its report to `out`.
    pub async fn run(self, shared: &Shared, out: &mut dyn Write) -> Result<()> {
        match self {
            Demo::Databases => Box::pin(demos::databases::run(shared, out)).await,
            Demo::Containers => Box::pin(demos::containers::run(shared, out)).await,
            Demo::Documents => Box::pin(demos::documents::run(shared, out)).await,
            Demo::Indexing => Box::pin(demos::indexing::run(shared, out)).await,
            Demo::StoredProcedures => Box::pin(demos::stored_procedures::run(shared, out)).await,
            Demo::Triggers => Box::pin(demos::triggers::run(shared, out)).await,
            Demo::UserDefinedFunctions => {
                Box::pin(demos::user_defined_functions::run(shared, out)).await
            }
            Demo::Cleanup => Box::pin(demos::cleanup::run(shared, out)).await,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MenuEntry {
    pub code: &'static str,
    pub label: &'static str,
    pub demo: Demo,
}

#[derive(Debug, Clone, Copy)]
pub struct Menu {
    pub title: &'static str,
    /// Demo entries, printed in order. A blank line is printed before `C`.
    pub entries: &'static [MenuEntry],
}

pub const CLIENT_MENU: Menu = Menu {
    title: "Cosmos DB SQL API client demos",
    entries: &[
        MenuEntry {
            code: "DB",
            label: "Databases",
            demo: Demo::Databases,
        },
        MenuEntry {
            code: "CO",
            label: "Containers",
            demo: Demo::Containers,
        },
        MenuEntry {
            code: "DO",
            label: "Documents",
            demo: Demo::Documents,
        },
        MenuEntry {
            code: "IX",
            label: "Indexing",
            demo: Demo::Indexing,
        },
        MenuEntry {
            code: "C",
            label: "Cleanup",
            demo: Demo::Cleanup,
        },
    ],
};

pub const SERVER_MENU: Menu = Menu {
    title: "Cosmos DB SQL API server-side programming demos",
    entries: &[
        MenuEntry {
            code: "SP",
            label: "Stored procedures",
            demo: Demo::StoredProcedures,
        },
        MenuEntry {
            code: "TR",
            label: "Triggers",
            demo: Demo::Triggers,
        },
        MenuEntry {
            code: "UF",
            label: "User defined functions",
            demo: Demo::UserDefinedFunctions,
        },
        MenuEntry {
            code: "C",
            label: "Cleanup",
            demo: Demo::Cleanup,
        },
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Run(Demo),
    Quit,
    /// Holds the input exactly as typed.
    Unknown(String),
}

impl Menu {
    pub fn select(&self, input: &str) -> Selection {
        let code = input.trim().to_uppercase();
        if code == "Q" {
            return Selection::Quit;
        }
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| Selection::Run(entry.demo))
            .unwrap_or_else(|| Selection::Unknown(input.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn render(&self) -> String {
        let mut text = format!("{}\n\n", self.title);
        for entry in self.entries {
            if entry.demo == Demo::Cleanup {
                text.push('\n');
            }
            text.push_str(&format!("{:<2} {}\n", entry.code, entry.label));
        }
        text.push_str("\nQ  Quit\n");
        text
    }
}

/// Reads selections from `input` until `Q` or end of input, running each chosen demo.
///
/// A failing demo doesn't end the loop; its error chain is printed and the menu comes back.
pub async fn run_loop<R: BufRead, W: Write>(
    menu: &Menu,
    shared: &Shared,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(output, "{}", menu.render())?;

    loop {
        write!(output, "Selection: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        match menu.select(&line) {
            Selection::Quit => return Ok(()),
            Selection::Unknown(text) => writeln!(output, "?{text}")?,
            Selection::Run(demo) => {
                debug!(?demo, "running demo");
                if let Err(error) = demo.run(shared, &mut output).await {
                    writeln!(output, "{}", console::error_chain(&error))?;
                }

                writeln!(output)?;
                console::wait_for_enter("Done. Press Enter to continue.", &mut input, &mut output)?;
                console::clear(&mut output)?;
                writeln!(output, "{}", menu.render())?;
            }
        }
    }
}
