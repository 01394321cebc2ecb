// src/output.rs
// =============================================================================
// Printing: the banner, status lines and the two result lists.
//
// Plain output looks like this (headers disappear with -s):
//
//   Extracted URLs:
//
//   https://example.com/a
//
//   Extracted Paths:
//
//   /about
//
// With -uO the paths section is left out, with -pO the URLs section. The
// blank line between the sections is always printed.
//
// The render functions write to any io::Write so tests can capture them.
// =============================================================================

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;

use crate::config::{Config, DisplayMode};
use crate::error::Result;
use crate::extract::Extraction;

const BANNER: &str = r"
  _ _       _                        _
 | (_)_ __ | | _____  ___ ___  _   _| |_
 | | | '_ \| |/ / __|/ __/ _ \| | | | __|
 | | | | | |   <\__ \ (_| (_) | |_| | |_
 |_|_|_| |_|_|\_\___/\___\___/ \__,_|\__|
";

pub fn write_banner<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", BANNER.bright_magenta().bold())?;
    writeln!(
        out,
        "{}\n",
        format!("linkscout v{} - webpage URL & path extractor", env!("CARGO_PKG_VERSION"))
            .bright_magenta()
            .bold()
    )?;
    Ok(())
}

/// One bold status line, e.g. "Using proxy: ..." (skipped when silent)
pub fn print_status(config: &Config, message: &str) -> Result<()> {
    write_status(&mut io::stdout().lock(), config, message)
}

pub fn write_status<W: Write>(out: &mut W, config: &Config, message: &str) -> Result<()> {
    if decorated(config) {
        writeln!(out, "{}\n", message.bright_white().bold())?;
    }
    Ok(())
}

// Prints the extraction to stdout in the configured format
pub fn print_results(extraction: &Extraction, config: &Config) -> Result<()> {
    let mut out = io::stdout().lock();
    if config.json {
        render_json(&mut out, extraction, config.mode)?;
    } else {
        render_text(&mut out, extraction, config.mode, config.silent)?;
    }
    out.flush()?;
    Ok(())
}

// Writes the two lists, one entry per line, in discovery order
pub fn render_text<W: Write>(
    out: &mut W,
    extraction: &Extraction,
    mode: DisplayMode,
    silent: bool,
) -> io::Result<()> {
    if mode.shows_urls() {
        if !silent {
            write!(out, "{}", "Extracted URLs:\n\n".bright_green().bold())?;
        }
        for url in &extraction.urls {
            writeln!(out, "{}", url)?;
        }
    }

    writeln!(out)?;

    if mode.shows_paths() {
        if !silent {
            write!(out, "{}", "Extracted Paths:\n\n".bright_green().bold())?;
        }
        for path in &extraction.paths {
            writeln!(out, "{}", path)?;
        }
    }

    Ok(())
}

// The JSON shape: {"urls": [...], "paths": [...]}
// A bucket hidden by -uO/-pO is left out entirely
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    urls: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paths: Option<&'a [String]>,
}

pub fn render_json<W: Write>(out: &mut W, extraction: &Extraction, mode: DisplayMode) -> Result<()> {
    let report = JsonReport {
        urls: mode.shows_urls().then_some(extraction.urls.as_slice()),
        paths: mode.shows_paths().then_some(extraction.paths.as_slice()),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

/// Banner and status lines are shown unless -s is set or stdout carries JSON
pub fn decorated(config: &Config) -> bool {
    !config.silent && !config.json
}
