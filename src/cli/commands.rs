//! CLI command implementations
//!
//! Every command loads the configuration, installs logging, loads the
//! catalog, then runs against the schema views and entity locators the
//! catalog built.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tracing::debug;

use crate::catalog::{Catalog, CatalogEntry};
use crate::logical::{Schema, TraceSchema};
use crate::model::WriteRequest;

use super::args::Command;
use super::config::Config;
use super::errors::CliResult;
use super::io::{read_lines, write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(&cli.config, cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(config_path: &Path, cmd: Command) -> CliResult<()> {
    let config = Config::load(config_path)?;
    config.init_logging();

    let catalog = Catalog::load(&config.catalog_path(config_path))?;

    let mut out = io::stdout().lock();
    match cmd {
        Command::Describe { series } => describe(&catalog, &series, &mut out),
        Command::Project { series, fields } => project(&catalog, &series, &fields, &mut out),
        Command::Locate => locate(&catalog, io::stdin().lock(), &mut out),
    }
}

/// Print the schema view of a series
pub fn describe<W: Write>(catalog: &Catalog, series: &str, out: &mut W) -> CliResult<()> {
    match catalog.entry(series) {
        Ok(entry) => write_response(out, describe_entry(entry)),
        Err(e) => write_error(out, e.code(), &e.to_string()),
    }
}

/// Project a series onto the requested fields and print the result
pub fn project<W: Write>(
    catalog: &Catalog,
    series: &str,
    fields: &[String],
    out: &mut W,
) -> CliResult<()> {
    let entry = match catalog.entry(series) {
        Ok(entry) => entry,
        Err(e) => return write_error(out, e.code(), &e.to_string()),
    };
    let names: Vec<&str> = fields.iter().map(String::as_str).collect();
    let refs = match entry.schema.create_ref(&names) {
        Ok(refs) => refs,
        Err(e) => return write_error(out, e.code().code(), e.message()),
    };

    match entry.schema.project(&refs) {
        Some(projected) => write_response(out, describe_fields(&projected)),
        None => write_response(out, Value::Null),
    }
}

/// Locate every write request read from `reader`, one per line.
///
/// A bad line produces an error envelope and the loop continues. Only
/// read and write failures end the command.
pub fn locate<R: BufRead, W: Write>(catalog: &Catalog, reader: R, out: &mut W) -> CliResult<()> {
    for line in read_lines(reader) {
        let line = line?;
        let result = str::from_utf8(&line)
            .map_err(|e| ("SDB_CLI_INVALID_REQUEST", format!("request is not valid UTF-8: {}", e)))
            .and_then(|line| locate_line(catalog, line));
        match result {
            Ok(data) => write_response(out, data)?,
            Err((code, message)) => {
                debug!(code, %message, "WRITE_REJECTED");
                write_error(out, code, &message)?
            }
        }
    }
    Ok(())
}

fn locate_line(catalog: &Catalog, line: &str) -> Result<Value, (&'static str, String)> {
    let req: WriteRequest = serde_json::from_str(line)
        .map_err(|e| ("SDB_CLI_INVALID_REQUEST", e.to_string()))?;

    let entry = catalog
        .entry(&req.series)
        .map_err(|e| (e.code(), e.to_string()))?;

    let (entity, shard_id) = entry
        .locator
        .locate(&req.tag_families, entry.shard_number())
        .map_err(|e| (e.code(), e.to_string()))?;

    let components: Vec<String> = entity
        .components()
        .iter()
        .map(|c| STANDARD.encode(c))
        .collect();

    Ok(json!({
        "series": req.series,
        "element_id": req.element_id,
        "entity": components,
        "shard_id": shard_id.get(),
    }))
}

fn describe_entry(entry: &CatalogEntry) -> Value {
    let schema = &entry.schema;
    let index_objects: Vec<Value> = schema
        .index_rule()
        .objects
        .iter()
        .map(|obj| {
            json!({
                "name": obj.name,
                "fields": obj.fields,
                "type": obj.index_type,
            })
        })
        .collect();
    let locators: Vec<Value> = entry
        .locator
        .locators()
        .iter()
        .map(|l| json!([l.family_offset, l.tag_offset]))
        .collect();

    json!({
        "series": entry.series.metadata.name,
        "group": entry.series.metadata.group,
        "shard_number": schema.shard_number(),
        "trace_id_field": schema.trace_id_field_name(),
        "trace_state_field": schema.trace_state_field_name(),
        "fields": field_list(schema),
        "index_objects": index_objects,
        "entity": entry.series.entity.tag_names,
        "entity_locator": locators,
    })
}

fn describe_fields(schema: &TraceSchema) -> Value {
    json!({
        "shard_number": schema.shard_number(),
        "fields": field_list(schema),
    })
}

/// Registered fields ordered by descriptor index
fn field_list(schema: &TraceSchema) -> Vec<Value> {
    let mut fields: Vec<(usize, Value)> = schema
        .field_names()
        .into_iter()
        .filter_map(|name| schema.descriptor(name).map(|d| (name, d)))
        .map(|(name, d)| {
            let value = json!({
                "name": name,
                "idx": d.idx(),
                "type": d.field_type().type_name(),
                "index_subscript": schema.field_subscript(name),
            });
            (d.idx(), value)
        })
        .collect();
    fields.sort_by_key(|(idx, _)| *idx);
    fields.into_iter().map(|(_, v)| v).collect()
}
