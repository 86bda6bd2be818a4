//! JSON file backed collaborators

use async_trait::async_trait;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::bill::BillDetail;
use crate::config::{default_cache_path, default_plan_path};
use crate::plan::parse_plan_document;
use crate::traits::*;
use crate::types::*;

/// Caches the open bill detail as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileBillCache {
    path: PathBuf,
}

impl JsonFileBillCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache file under the platform cache directory
    pub fn default_location() -> ReconcileResult<Self> {
        default_cache_path()
            .map(Self::new)
            .ok_or_else(|| ReconcileError::Storage("No cache directory available".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BillCache for JsonFileBillCache {
    async fn load(&self) -> ReconcileResult<Option<BillDetail>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    async fn store(&self, detail: &BillDetail) -> ReconcileResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(detail)?)?;
        tracing::debug!(path = %self.path.display(), "stored bill detail in cache");
        Ok(())
    }
}

/// Reads the budget plan from a JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonPlanFile {
    path: PathBuf,
}

impl JsonPlanFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Plan file under the platform config directory
    pub fn default_location() -> ReconcileResult<Self> {
        default_plan_path()
            .map(Self::new)
            .ok_or_else(|| ReconcileError::Config("No config directory available".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BudgetPlanProvider for JsonPlanFile {
    async fn load_plan(&self) -> ReconcileResult<BudgetPlan> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            ReconcileError::Config(format!(
                "Cannot read budget plan '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        parse_plan_document(&text)
    }
}

/// Writes each summary it receives to a JSON file, replacing the previous one
#[derive(Debug, Clone)]
pub struct JsonReportFile {
    path: PathBuf,
}

impl JsonReportFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportConsumer for JsonReportFile {
    fn consume(&self, summary: &CycleSummary) -> ReconcileResult<()> {
        let text = serde_json::to_string_pretty(summary)
            .map_err(|e| ReconcileError::Report(e.to_string()))?;
        fs::write(&self.path, text).map_err(|e| {
            ReconcileError::Report(format!("Cannot write '{}': {}", self.path.display(), e))
        })
    }
}
