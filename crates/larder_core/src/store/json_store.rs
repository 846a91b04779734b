//! JSON document store for the three registries.
//!
//! # Responsibility
//! - Load and save the `goods`/`dates`/`cans` document at a configured
//!   path with atomic replace semantics.
//!
//! # Invariants
//! - A missing file is first-run bootstrap, not an error: registries
//!   stay empty and a fresh document is written immediately.
//! - Ids and day ordinals travel as decimal strings to sidestep numeric
//!   precision limits of the interchange format.
//! - Sections are written in current display order through an ordered
//!   map, so key order in the file is deterministic.

use crate::registry::{CanRegistry, DateRegistry, GoodRegistry};
use crate::store::{StoreError, StoreResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Wire shape of the persisted document. Each section maps an id string
/// to its payload; missing sections read as empty.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    goods: Map<String, Value>,
    #[serde(default)]
    dates: Map<String, Value>,
    #[serde(default)]
    cans: Map<String, Value>,
}

/// Persistence manager bound to one document path.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document into the three registries.
    ///
    /// A missing file bootstraps a fresh document and leaves the
    /// registries empty. An unreadable or malformed document is a hard
    /// failure and populates nothing. Individual records the registries
    /// reject are logged and skipped; goods load before dates, dates
    /// before cans, each section in document key order.
    ///
    /// # Errors
    /// - `EmptyPath` when no path was configured.
    /// - `Io` / `Json` for unreadable or malformed documents.
    pub fn load(
        &self,
        goods: &mut GoodRegistry,
        dates: &mut DateRegistry,
        cans: &mut CanRegistry,
    ) -> StoreResult<()> {
        self.ensure_path()?;

        if !self.path.exists() {
            info!(
                "event=store_bootstrap module=store status=ok path={}",
                self.path.display()
            );
            return self.save(goods, dates, cans);
        }

        let text = std::fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&text)?;

        goods.clear();
        dates.clear();
        cans.clear();

        for (key, value) in &snapshot.goods {
            let parsed = key
                .parse()
                .ok()
                .zip(value.as_str())
                .and_then(|(id, name)| goods.insert(id, name).ok());
            if parsed.is_none() {
                warn!("event=store_load module=store status=skipped section=goods key={key}");
            }
        }

        for (key, value) in &snapshot.dates {
            let parsed = key
                .parse()
                .ok()
                .zip(value.as_str().and_then(|text| text.parse().ok()))
                .and_then(|(id, day)| dates.insert(id, day).ok());
            if parsed.is_none() {
                warn!("event=store_load module=store status=skipped section=dates key={key}");
            }
        }

        for (key, value) in &snapshot.cans {
            let parsed = key.parse().ok().zip(parse_can_refs(value)).and_then(
                |(can_id, (good_id, date_id))| {
                    cans.insert(&*goods, &*dates, can_id, good_id, date_id).ok()
                },
            );
            if parsed.is_none() {
                warn!("event=store_load module=store status=skipped section=cans key={key}");
            }
        }

        info!(
            "event=store_load module=store status=ok path={} goods={} dates={} cans={}",
            self.path.display(),
            goods.row_count(),
            dates.row_count(),
            cans.row_count()
        );
        Ok(())
    }

    /// Saves the current registry state, committing via a temporary file
    /// renamed over the destination so a failed write never clobbers the
    /// previous document.
    ///
    /// # Errors
    /// - `EmptyPath` when no path was configured.
    /// - `Io` for write or commit failures.
    pub fn save(
        &self,
        goods: &GoodRegistry,
        dates: &DateRegistry,
        cans: &CanRegistry,
    ) -> StoreResult<()> {
        self.ensure_path()?;

        let mut snapshot = Snapshot::default();

        for row in 0..goods.row_count() {
            if let Some((id, name)) = goods.good_at(row) {
                snapshot
                    .goods
                    .insert(id.to_string(), Value::from(name.to_string()));
            }
        }

        for row in 0..dates.row_count() {
            if let Some((id, value)) = dates.date_at(row) {
                snapshot
                    .dates
                    .insert(id.to_string(), Value::from(value.to_string()));
            }
        }

        for row in 0..cans.row_count() {
            let refs = cans.can_at(row).and_then(|can_id| {
                let good_id = cans.good_id_of(can_id)?;
                let date_id = cans.date_id_of(can_id)?;
                Some((can_id, good_id, date_id))
            });
            if let Some((can_id, good_id, date_id)) = refs {
                snapshot.cans.insert(
                    can_id.to_string(),
                    Value::from(vec![good_id.to_string(), date_id.to_string()]),
                );
            }
        }

        let text = serde_json::to_string_pretty(&snapshot)?;
        let dir = parent_dir(&self.path);
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(text.as_bytes())?;
        file.persist(&self.path)?;

        info!(
            "event=store_save module=store status=ok path={} goods={} dates={} cans={}",
            self.path.display(),
            goods.row_count(),
            dates.row_count(),
            cans.row_count()
        );
        Ok(())
    }

    fn ensure_path(&self) -> StoreResult<()> {
        if self.path.as_os_str().is_empty() {
            return Err(StoreError::EmptyPath);
        }
        Ok(())
    }
}

/// Extracts `(good id, date id)` from a can entry: a two-element array of
/// decimal strings.
fn parse_can_refs(value: &Value) -> Option<(u32, u32)> {
    let entries = value.as_array()?;
    if entries.len() != 2 {
        return None;
    }
    let good_id = entries[0].as_str()?.parse().ok()?;
    let date_id = entries[1].as_str()?.parse().ok()?;
    Some((good_id, date_id))
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
