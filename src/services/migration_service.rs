use crate::models::user::{self, CANONICAL_FIELDS};
use crate::services::store_service;
use crate::utils::error::AppError;
use chrono::Local;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Outcome of one migration run.
#[derive(Debug, Serialize)]
pub struct MigrationReport {
    pub users_found: usize,
    pub migrated: usize,
    pub backup_file: Option<String>,
}

/// Local wall-clock time in ISO-8601, the format registration writes.
fn now_iso() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// First present of `created_at` / `created_date`, else "now". Evaluated
/// once per record so the three timestamp fields stay consistent.
fn resolve_created_at(legacy: &Map<String, Value>) -> Value {
    for alias in ["created_at", "created_date"] {
        if let Some(value) = legacy.get(alias) {
            return value.clone();
        }
    }
    Value::String(now_iso())
}

/// Builds the canonical record for one user.
///
/// Starts from a fully-defaulted record, then overwrites each field with the
/// first legacy alias that is present (present wins even when falsy). Two
/// rules are positional: `email` prefers the record key when it looks like an
/// address, and the timestamp fields fall back to the resolved `created_at`.
/// Pure apart from the single clock read; migrating a canonical record is a
/// no-op.
pub fn migrate_record(key: &str, legacy: &Map<String, Value>) -> Map<String, Value> {
    let created_at = resolve_created_at(legacy);
    let mut migrated = user::default_record(&created_at);

    for rule in CANONICAL_FIELDS {
        if rule.name == "email" {
            let email = if key.contains('@') {
                Value::String(key.to_string())
            } else {
                legacy
                    .get("email")
                    .cloned()
                    .unwrap_or_else(|| rule.default.materialize(&created_at))
            };
            migrated.insert(rule.name.to_string(), email);
            continue;
        }

        if let Some(value) = rule.aliases.iter().find_map(|alias| legacy.get(*alias)) {
            migrated.insert(rule.name.to_string(), value.clone());
        }
    }

    migrated
}

/// Replaces every record in the store with its canonical form, keeping the
/// identifier keys untouched. A non-object record aborts the whole run
/// rather than silently corrupting one user.
pub fn migrate_store(store: &mut Map<String, Value>) -> Result<usize, AppError> {
    let mut migrated_count = 0;

    for (key, record) in store.iter_mut() {
        let legacy = record.as_object().ok_or_else(|| {
            AppError::InvalidRecord(format!("record for '{}' is not a JSON object", key))
        })?;

        println!("Migrating user: {}", key);
        if user::is_canonical(legacy) {
            log::debug!("User {} already carries the canonical schema", key);
        }

        let migrated = migrate_record(key, legacy);
        *record = Value::Object(migrated);
        migrated_count += 1;
    }

    Ok(migrated_count)
}

/// End-to-end migration of the on-disk store: load, migrate every record,
/// write the timestamped backup, rewrite the primary file.
pub fn migrate_user_data(path: &Path) -> Result<MigrationReport, AppError> {
    let mut store = match store_service::load_store(path)? {
        Some(store) => store,
        None => {
            println!("No user data file found");
            return Ok(MigrationReport {
                users_found: 0,
                migrated: 0,
                backup_file: None,
            });
        }
    };

    let users_found = store.len();
    println!("Found {} users to migrate", users_found);

    let migrated = migrate_store(&mut store)?;

    let backup = store_service::write_with_backup(path, &store)?;
    println!("Created backup: {}", backup.display());

    println!("Successfully migrated {} users", migrated);
    println!("Migration completed!");

    Ok(MigrationReport {
        users_found,
        migrated,
        backup_file: Some(backup.display().to_string()),
    })
}
