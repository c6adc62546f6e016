//! Schema migration for board documents.
//!
//! A persisted board carries its schema version in `metadata.version`.
//! Older documents are upgraded by walking an ordered chain of transforms,
//! one schema step at a time, until the document reaches [`BOARD_VERSION`].
//! The engine only walks forward through [`KNOWN_VERSIONS`]; anything it
//! cannot place on that chain (ancient or future) is rejected.

use crate::error::{Result, TavlaError};
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;

/// Current schema version of the board document
pub const BOARD_VERSION: &str = "0.2";

/// Every schema version this engine knows, oldest first
const KNOWN_VERSIONS: &[&str] = &["0.1", "0.2"];

/// Transforms keyed by the version they migrate *from*; each targets the
/// next entry of `KNOWN_VERSIONS`
const MIGRATIONS: &[(&str, fn(&Value) -> Value)] = &[("0.1", migrate_0_1_to_0_2)];

fn document_version(doc: &Value) -> Option<&str> {
    doc.get("metadata")?.get("version")?.as_str()
}

/// Brings a raw board document to the current schema version.
///
/// A document already at [`BOARD_VERSION`] is returned as-is (a copy).
/// The input value is never modified; every step operates on the copy.
pub fn migrate(raw: &Value) -> Result<Value> {
    let map = raw.as_mapping().ok_or(TavlaError::InvalidDocument)?;
    if map.is_empty() {
        return Err(TavlaError::InvalidDocument);
    }
    let version = document_version(raw).ok_or(TavlaError::MissingVersion)?;
    if version == BOARD_VERSION {
        return Ok(raw.clone());
    }

    let mut doc = raw.clone();
    while document_version(&doc) != Some(BOARD_VERSION) {
        let from = document_version(&doc)
            .map(str::to_owned)
            .ok_or(TavlaError::MissingVersion)?;
        let position = KNOWN_VERSIONS
            .iter()
            .position(|v| *v == from)
            .ok_or_else(|| TavlaError::NoMigrationPath(from.clone()))?;
        let next = KNOWN_VERSIONS
            .get(position + 1)
            .ok_or_else(|| TavlaError::NoMigrationPath(from.clone()))?;
        let (_, transform) = MIGRATIONS
            .iter()
            .find(|(v, _)| *v == from)
            .ok_or_else(|| TavlaError::NoMigrationPath(from.clone()))?;

        tracing::info!(from = %from, to = %next, "migrating board document");
        doc = transform(&doc);
    }
    Ok(doc)
}

/// 0.1 -> 0.2: flattens the `configuration` block to top-level fields,
/// moves the metadata clock fields into a `dates` block, and synthesizes
/// the label collection from the label names found on tasks.
fn migrate_0_1_to_0_2(doc: &Value) -> Value {
    let configuration = doc.get("configuration");
    let metadata = doc.get("metadata");
    let field = |block: Option<&Value>, key: &str| {
        block
            .and_then(|b| b.get(key))
            .cloned()
            .unwrap_or(Value::Null)
    };

    let tasks = doc
        .get("tasks")
        .cloned()
        .unwrap_or_else(|| Value::Mapping(Mapping::new()));
    let labels = collect_task_labels(&tasks);

    let mut out = Mapping::new();
    out.insert("name".into(), field(configuration, "name"));
    out.insert("description".into(), field(configuration, "description"));
    out.insert("columns".into(), field(configuration, "columns"));
    out.insert("tasks".into(), tasks);
    out.insert("labels".into(), labels);
    if let Some(sprints) = doc.get("sprints") {
        out.insert("sprints".into(), sprints.clone());
    }

    let mut meta = Mapping::new();
    meta.insert("nextId".into(), field(metadata, "nextId"));
    meta.insert("version".into(), "0.2".into());
    out.insert("metadata".into(), Value::Mapping(meta));

    let mut dates = Mapping::new();
    dates.insert("created".into(), field(metadata, "createdAt"));
    dates.insert("updated".into(), field(metadata, "lastModified"));
    dates.insert("saved".into(), field(metadata, "lastModified"));
    out.insert("dates".into(), Value::Mapping(dates));

    Value::Mapping(out)
}

/// The distinct label names across all tasks, in order of first appearance
/// when tasks are visited in ascending ID order, as `{name}` mappings
fn collect_task_labels(tasks: &Value) -> Value {
    let Some(map) = tasks.as_mapping() else {
        return Value::Sequence(Vec::new());
    };

    let mut entries: Vec<(u64, &Value)> = map
        .iter()
        .filter_map(|(key, task)| task_id_key(key).map(|id| (id, task)))
        .collect();
    entries.sort_by_key(|(id, _)| *id);

    let mut seen = HashSet::new();
    let mut labels = Vec::new();
    for (_, task) in entries {
        let Some(names) = task.get("labels").and_then(Value::as_sequence) else {
            continue;
        };
        for name in names.iter().filter_map(Value::as_str) {
            if seen.insert(name.to_owned()) {
                let mut label = Mapping::new();
                label.insert("name".into(), name.into());
                labels.push(Value::Mapping(label));
            }
        }
    }
    Value::Sequence(labels)
}

/// Task map keys may be numbers or numeric strings depending on the writer
fn task_id_key(key: &Value) -> Option<u64> {
    match key {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
