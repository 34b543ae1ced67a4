//! Data table loading.
//!
//! Exported spreadsheet tabs arrive as one JSON file per table, named after
//! the table (`PlayerStatTable.json`). `DataTables` maps file base names to
//! row types registered by the caller, parses matching files and keeps the
//! rows until the cache is cleared.

use crate::error::GrowthError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::path::Path;

/// A row type stored in its own data file.
pub trait DataFile: DeserializeOwned + Send + Sync + 'static {
    /// File name without extension, matched case-insensitively.
    const BASE_NAME: &'static str;
}

/// Object layout wrapping the rows in `items`.
#[derive(Deserialize)]
struct Wrapped<T> {
    items: Vec<T>,
}

type StoredRows = Box<dyn Any + Send + Sync>;
type Loader = fn(&str, &str) -> Result<(TypeId, StoredRows), GrowthError>;

fn parse_rows<T: DataFile>(source_name: &str, text: &str) -> Result<(TypeId, StoredRows), GrowthError> {
    let trimmed = text.trim_start();
    let rows: Vec<T> = if trimmed.is_empty() {
        Vec::new()
    } else if trimmed.starts_with('[') {
        serde_json::from_str(text).map_err(|e| GrowthError::parse(source_name, e))?
    } else {
        serde_json::from_str::<Wrapped<T>>(text)
            .map_err(|e| GrowthError::parse(source_name, e))?
            .items
    };
    let stored: StoredRows = Box::new(rows);
    Ok((TypeId::of::<T>(), stored))
}

/// The last path segment of `name` with its extension removed.
///
/// # Examples
///
/// ```rust
/// use statcurve::table::base_name;
///
/// assert_eq!(base_name("Data/PlayerStatTable.json"), "PlayerStatTable");
/// assert_eq!(base_name("C:\\data\\Stage.json"), "Stage");
/// assert_eq!(base_name("Stage"), "Stage");
/// ```
pub fn base_name(name: &str) -> &str {
    let file = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match file.rfind('.') {
        Some(dot) => &file[..dot],
        None => file,
    }
}

/// Counts from a directory load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    /// Files with no registered table.
    pub skipped: usize,
    /// Files that could not be read or parsed.
    pub failed: usize,
}

/// Registry of table types and their loaded rows.
///
/// # Examples
///
/// ```rust
/// use statcurve::player::PlayerStatRow;
/// use statcurve::table::DataTables;
///
/// let mut tables = DataTables::new();
/// tables.register::<PlayerStatRow>();
///
/// let json = r#"[{"Id": "p1", "UnitRank": "R", "Str": 10, "Dex": 10, "Luk": 10,
///                "StrGrowthRate": 1.0, "DexGrowthRate": 1.0, "LukGrowthRate": 1.0}]"#;
/// assert!(tables.load_text("playerstattable.json", json).unwrap());
/// assert_eq!(tables.get_all::<PlayerStatRow>().len(), 1);
/// ```
#[derive(Default)]
pub struct DataTables {
    loaders: HashMap<String, Loader>,
    rows: HashMap<TypeId, StoredRows>,
}

impl DataTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `T::BASE_NAME` to `T`.
    ///
    /// A blank base name is ignored. When two types share a base name the
    /// first registration wins.
    pub fn register<T: DataFile>(&mut self) {
        let key = T::BASE_NAME.trim().to_lowercase();
        if key.is_empty() {
            return;
        }
        self.loaders.entry(key).or_insert(parse_rows::<T> as Loader);
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.loaders.contains_key(&base_name(name).to_lowercase())
    }

    /// Parse `text` into the table registered for `name`'s base name.
    ///
    /// Returns `Ok(false)` when no table is registered for that name.
    /// Replaces any rows previously loaded for the same type.
    pub fn load_text(&mut self, name: &str, text: &str) -> Result<bool, GrowthError> {
        let key = base_name(name).to_lowercase();
        let loader = match self.loaders.get(&key) {
            Some(loader) => *loader,
            None => return Ok(false),
        };
        let (type_id, rows) = loader(name, text)?;
        self.rows.insert(type_id, rows);
        Ok(true)
    }

    /// Load every `.json` file directly inside `dir`.
    ///
    /// Files that fail to read or parse are logged and counted; they do not
    /// stop the load.
    ///
    /// # Errors
    ///
    /// `GrowthError::Io` if the directory itself cannot be listed.
    pub fn load_dir(&mut self, dir: &Path) -> Result<LoadSummary, GrowthError> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(|e| GrowthError::io(dir, e))? {
            let path = entry.map_err(|e| GrowthError::io(dir, e))?.path();
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if path.is_file() && is_json {
                paths.push(path);
            }
        }
        // Directory order is platform dependent.
        paths.sort();

        let mut summary = LoadSummary::default();
        for path in paths {
            let name = path.to_string_lossy();
            if !self.is_registered(&name) {
                summary.skipped += 1;
                continue;
            }
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    log::error!("failed to read table {}: {}", path.display(), e);
                    summary.failed += 1;
                    continue;
                }
            };
            match self.load_text(&name, &text) {
                Ok(_) => summary.loaded += 1,
                Err(e) => {
                    log::error!("{}", e);
                    summary.failed += 1;
                }
            }
        }

        log::info!(
            "tables loaded from {}: loaded={}, skipped={}, failed={}",
            dir.display(),
            summary.loaded,
            summary.skipped,
            summary.failed
        );
        Ok(summary)
    }

    /// All rows of table `T`, or an empty slice if none are loaded.
    pub fn get_all<T: DataFile>(&self) -> &[T] {
        self.rows
            .get(&TypeId::of::<T>())
            .and_then(|rows| rows.downcast_ref::<Vec<T>>())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Drop loaded rows; registrations are kept.
    pub fn clear_cache(&mut self) {
        self.rows.clear();
    }
}

impl std::fmt::Debug for DataTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.loaders.keys().collect();
        names.sort();
        f.debug_struct("DataTables")
            .field("tables", &names)
            .field("loaded", &self.rows.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Stage {
        id: String,
        waves: u32,
    }

    impl DataFile for Stage {
        const BASE_NAME: &'static str = "Stage";
    }

    #[derive(Debug, Deserialize)]
    struct Unnamed;

    impl DataFile for Unnamed {
        const BASE_NAME: &'static str = "  ";
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("a/b/Stage.json"), "Stage");
        assert_eq!(base_name("Stage.backup.json"), "Stage.backup");
        assert_eq!(base_name(""), "");
    }

    #[test]
    fn test_root_array_and_wrapped() {
        let mut tables = DataTables::new();
        tables.register::<Stage>();

        assert!(tables
            .load_text("Stage", r#"[{"id": "s1", "waves": 3}]"#)
            .unwrap());
        assert_eq!(tables.get_all::<Stage>()[0].waves, 3);

        assert!(tables
            .load_text("STAGE.json", r#"{"items": [{"id": "s1", "waves": 3}, {"id": "s2", "waves": 5}]}"#)
            .unwrap());
        assert_eq!(tables.get_all::<Stage>().len(), 2);
    }

    #[test]
    fn test_blank_text_is_empty_table() {
        let mut tables = DataTables::new();
        tables.register::<Stage>();
        assert!(tables.load_text("Stage.json", "  \n").unwrap());
        assert!(tables.get_all::<Stage>().is_empty());
    }

    #[test]
    fn test_unknown_name_skipped() {
        let mut tables = DataTables::new();
        tables.register::<Stage>();
        assert!(!tables.load_text("Monster.json", "[]").unwrap());
    }

    #[test]
    fn test_parse_error() {
        let mut tables = DataTables::new();
        tables.register::<Stage>();
        let err = tables.load_text("Stage.json", "[{\"id\": 1}]").unwrap_err();
        assert!(matches!(err, GrowthError::Parse { .. }));
        assert!(tables.get_all::<Stage>().is_empty());
    }

    #[test]
    fn test_blank_base_name_not_registered() {
        let mut tables = DataTables::new();
        tables.register::<Unnamed>();
        assert!(!tables.is_registered(".json"));
    }

    #[test]
    fn test_clear_cache_keeps_registrations() {
        let mut tables = DataTables::new();
        tables.register::<Stage>();
        tables.load_text("Stage", "[]").unwrap();
        tables.clear_cache();
        assert!(tables.get_all::<Stage>().is_empty());
        assert!(tables.is_registered("Stage.json"));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Stage.json"), r#"[{"id": "s1", "waves": 2}]"#).unwrap();
        std::fs::write(dir.path().join("Monster.json"), "[]").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut tables = DataTables::new();
        tables.register::<Stage>();
        let summary = tables.load_dir(dir.path()).unwrap();
        assert_eq!(
            summary,
            LoadSummary {
                loaded: 1,
                skipped: 1,
                failed: 0
            }
        );
        assert_eq!(tables.get_all::<Stage>()[0].id, "s1");
    }

    #[test]
    fn test_load_dir_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Stage.json"), "not json").unwrap();

        let mut tables = DataTables::new();
        tables.register::<Stage>();
        let summary = tables.load_dir(dir.path()).unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.loaded, 0);
    }

    #[test]
    fn test_load_dir_missing() {
        let mut tables = DataTables::new();
        let missing = Path::new("/definitely/not/here");
        assert!(matches!(
            tables.load_dir(missing),
            Err(GrowthError::Io { .. })
        ));
    }
}
