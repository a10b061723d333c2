// driftwatch-core/src/infrastructure/store.rs
//
// File-backed quality context, rooted at a directory the analyst owns:
//
//     <root>/suites/<name>.yaml          expectation suites (overwritable)
//     <root>/checkpoints/<name>.yaml     checkpoints
//     <root>/validations/<checkpoint>/<timestamp>.json   run outcomes
//
// Artifact names are validated so a hostile suite name can never escape the
// store root.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::domain::checkpoint::{Checkpoint, CheckpointResult};
use crate::domain::error::DomainError;
use crate::domain::expectation::suite::ExpectationSuite;
use crate::error::DriftwatchError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

const SUITES_DIR: &str = "suites";
const CHECKPOINTS_DIR: &str = "checkpoints";
const VALIDATIONS_DIR: &str = "validations";

// Compiled once; the literal is valid by construction
#[allow(clippy::unwrap_used)]
fn artifact_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$").unwrap())
}

/// Suite and checkpoint names become file names; keep them boring.
pub fn validate_artifact_name(name: &str) -> Result<(), DomainError> {
    if artifact_name_pattern().is_match(name) {
        Ok(())
    } else {
        Err(DomainError::InvalidArtifactName(name.to_string()))
    }
}

pub struct QualityContext {
    root: PathBuf,
}

impl QualityContext {
    /// Opens (or initializes) a context rooted at `root`.
    pub fn new(root: &Path) -> Result<Self, InfrastructureError> {
        for dir in [SUITES_DIR, CHECKPOINTS_DIR, VALIDATIONS_DIR] {
            fs::create_dir_all(root.join(dir))?;
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // --- EXPECTATION SUITES ---

    fn suite_path(&self, name: &str) -> PathBuf {
        self.root.join(SUITES_DIR).join(format!("{}.yaml", name))
    }

    /// Persists a suite under its name. Saving again under the same name
    /// overwrites the previous definition.
    pub fn save_suite(&self, suite: &ExpectationSuite) -> Result<PathBuf, DriftwatchError> {
        validate_artifact_name(&suite.name)?;
        let path = self.suite_path(&suite.name);
        let content = serde_yaml::to_string(suite).map_err(InfrastructureError::YamlError)?;
        atomic_write(&path, content)?;
        Ok(path)
    }

    pub fn load_suite(&self, name: &str) -> Result<ExpectationSuite, DriftwatchError> {
        validate_artifact_name(name)?;
        let path = self.suite_path(name);
        if !path.exists() {
            return Err(DomainError::SuiteNotFound(name.to_string()).into());
        }
        let content = fs::read_to_string(&path).map_err(InfrastructureError::Io)?;
        let suite = serde_yaml::from_str(&content).map_err(InfrastructureError::YamlError)?;
        Ok(suite)
    }

    pub fn list_suites(&self) -> Result<Vec<String>, DriftwatchError> {
        self.list_yaml_stems(SUITES_DIR)
    }

    // --- CHECKPOINTS ---

    fn checkpoint_path(&self, name: &str) -> PathBuf {
        self.root
            .join(CHECKPOINTS_DIR)
            .join(format!("{}.yaml", name))
    }

    /// Creates the checkpoint, or rebinds an existing one to another suite.
    pub fn add_or_update_checkpoint(
        &self,
        name: &str,
        suite_name: &str,
    ) -> Result<Checkpoint, DriftwatchError> {
        validate_artifact_name(name)?;
        validate_artifact_name(suite_name)?;

        let checkpoint = Checkpoint::new(name, suite_name);
        let content = serde_yaml::to_string(&checkpoint).map_err(InfrastructureError::YamlError)?;
        atomic_write(self.checkpoint_path(name), content)?;
        Ok(checkpoint)
    }

    pub fn get_checkpoint(&self, name: &str) -> Result<Checkpoint, DriftwatchError> {
        validate_artifact_name(name)?;
        let path = self.checkpoint_path(name);
        if !path.exists() {
            return Err(DomainError::CheckpointNotFound(name.to_string()).into());
        }
        let content = fs::read_to_string(&path).map_err(InfrastructureError::Io)?;
        let checkpoint = serde_yaml::from_str(&content).map_err(InfrastructureError::YamlError)?;
        Ok(checkpoint)
    }

    pub fn list_checkpoints(&self) -> Result<Vec<String>, DriftwatchError> {
        self.list_yaml_stems(CHECKPOINTS_DIR)
    }

    // --- VALIDATION RUN ARTIFACTS ---

    /// Stores one checkpoint run outcome as a timestamped JSON artifact and
    /// returns its path.
    pub fn store_validation_result(
        &self,
        result: &CheckpointResult,
    ) -> Result<PathBuf, DriftwatchError> {
        validate_artifact_name(&result.checkpoint_name)?;
        let dir = self
            .root
            .join(VALIDATIONS_DIR)
            .join(&result.checkpoint_name);
        fs::create_dir_all(&dir).map_err(InfrastructureError::Io)?;

        // Runs stamped identically (same microsecond) must not clobber each
        // other's history; disambiguate with a numeric suffix.
        let stamp = result.run_time.format("%Y%m%dT%H%M%S%6fZ").to_string();
        let mut path = dir.join(format!("{}.json", stamp));
        let mut attempt = 1;
        while path.exists() {
            path = dir.join(format!("{}-{}.json", stamp, attempt));
            attempt += 1;
        }
        let content =
            serde_json::to_string_pretty(result).map_err(InfrastructureError::JsonError)?;
        atomic_write(&path, content)?;
        Ok(path)
    }

    // --- HELPERS ---

    fn list_yaml_stems(&self, subdir: &str) -> Result<Vec<String>, DriftwatchError> {
        let dir = self.root.join(subdir);
        let mut names = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                DriftwatchError::Infrastructure(InfrastructureError::Io(std::io::Error::other(e)))
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("yaml")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
