use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

use crate::{domain::Expense, ledger::Ledger};

use super::Result;

const EXPENSES_FILE: &str = "expenses.json";
const SUMMARY_FILE: &str = "category-summary.json";
const HOME_ENV: &str = "EXPENSE_TRACKER_HOME";
const APP_DIR: &str = "expense-tracker";

/// A record that could not be deserialized during a lenient load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIssue {
    /// Zero-based position of the record in the persisted array.
    pub index: usize,
    pub reason: String,
}

/// Result of loading the expenses file: the well-formed records plus a report
/// for every record that had to be skipped.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub ledger: Ledger,
    pub issues: Vec<RecordIssue>,
}

/// Reads and writes the ledger and the category-summary snapshot as
/// pretty-printed JSON under a single data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(Self::default_root);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    /// `EXPENSE_TRACKER_HOME` override, else the platform data directory,
    /// else the current directory.
    fn default_root() -> PathBuf {
        if let Some(home) = env::var_os(HOME_ENV) {
            return PathBuf::from(home);
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn expenses_path(&self) -> PathBuf {
        self.root.join(EXPENSES_FILE)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.root.join(SUMMARY_FILE)
    }

    /// Loads the persisted ledger. A missing file is not an error and yields
    /// an empty ledger. A file that is not a JSON array fails as a whole;
    /// within a well-formed array, malformed records are skipped and reported
    /// per record while the rest load in order.
    pub fn load_expenses(&self) -> Result<LoadOutcome> {
        let path = self.expenses_path();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no expenses file yet, starting empty");
            return Ok(LoadOutcome::default());
        }

        let data = fs::read_to_string(&path)?;
        let raw: Vec<serde_json::Value> = serde_json::from_str(&data)?;

        let mut outcome = LoadOutcome::default();
        for (index, value) in raw.into_iter().enumerate() {
            match serde_json::from_value::<Expense>(value) {
                Ok(expense) => outcome.ledger.add(expense),
                Err(err) => {
                    tracing::warn!(index, %err, "skipping malformed expense record");
                    outcome.issues.push(RecordIssue {
                        index,
                        reason: err.to_string(),
                    });
                }
            }
        }
        tracing::info!(
            count = outcome.ledger.len(),
            skipped = outcome.issues.len(),
            "expenses loaded"
        );
        Ok(outcome)
    }

    /// Writes the ledger atomically by staging to a temporary file.
    pub fn save_expenses(&self, ledger: &Ledger) -> Result<PathBuf> {
        let path = self.expenses_path();
        let json = serde_json::to_string_pretty(ledger)?;
        write_atomic(&path, &json)?;
        tracing::info!(count = ledger.len(), path = %path.display(), "expenses saved");
        Ok(path)
    }

    /// Loads the persisted category-summary snapshot. Missing file yields an
    /// empty map. The snapshot is a cache and may be stale relative to the
    /// live ledger; recompute through the summary service when it matters.
    pub fn load_category_summary(&self) -> Result<HashMap<String, f64>> {
        let path = self.summary_path();
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save_category_summary(&self, summary: &HashMap<String, f64>) -> Result<PathBuf> {
        let path = self.summary_path();
        let json = serde_json::to_string_pretty(summary)?;
        write_atomic(&path, &json)?;
        tracing::info!(categories = summary.len(), path = %path.display(), "category summary saved");
        Ok(path)
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = tmp_path(path);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.tmp"),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}
