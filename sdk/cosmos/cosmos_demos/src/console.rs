// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Console helpers shared by the demos.

use std::error::Error;
use std::io::{self, BufRead, Write};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Clears the terminal with ANSI escapes.
pub fn clear(out: &mut dyn Write) -> io::Result<()> {
    write!(out, "\x1B[2J\x1B[1;1H")?;
    out.flush()
}

pub fn heading(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n>>> {title} <<<\n")
}

/// Prints `prompt` and blocks until a line (or EOF) is read from `input`.
pub fn wait_for_enter<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> io::Result<()> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

/// Renders an error and every `source()` below it, one per line.
pub fn error_chain(error: &(dyn Error + 'static)) -> String {
    let mut rendered = format!("Error: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(&format!("\n  Caused by: {cause}"));
        source = cause.source();
    }
    rendered
}

/// Formats a resource's `_ts`, or `-` if the service didn't return one.
pub fn timestamp(value: Option<OffsetDateTime>) -> String {
    value
        .and_then(|ts| ts.format(&Rfc3339).ok())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use azure_core::error::{Error, ErrorKind};

    #[test]
    fn chain_includes_every_source() {
        let json = serde_json::from_str::<u32>("nope").unwrap_err();
        let error = Error::full(
            ErrorKind::Other,
            Error::full(ErrorKind::DataConversion, json, "not a number"),
            "could not parse appsettings.json",
        );

        let rendered = error_chain(&error);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Error: could not parse appsettings.json");
        assert_eq!(lines[1], "  Caused by: not a number");
        assert!(lines[2].starts_with("  Caused by: expected"));
    }

    #[test]
    fn heading_and_clear_write_to_the_given_output() {
        let mut output = Vec::new();
        clear(&mut output).unwrap();
        heading(&mut output, "Cleanup").unwrap();
        assert_eq!(output, b"\x1B[2J\x1B[1;1H\n>>> Cleanup <<<\n\n");
    }

    #[test]
    fn wait_for_enter_consumes_one_line() {
        let mut input = io::Cursor::new("\nnext\n");
        let mut output = Vec::new();
        wait_for_enter("Done.", &mut input, &mut output).unwrap();

        assert_eq!(output, b"Done.");
        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "next\n");
    }

    #[test]
    fn timestamps() {
        assert_eq!(timestamp(None), "-");
        let ts = OffsetDateTime::from_unix_timestamp(1493254272).unwrap();
        assert_eq!(timestamp(Some(ts)), "2017-04-27T00:51:12Z");
    }
}
