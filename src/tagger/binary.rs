//! Locating the TreeTagger wrapper scripts.
//!
//! Candidates are tried in a fixed order and the first existing file wins:
//!
//! 1. the configured `home` directory
//! 2. each configured environment variable, naming either the script or its directory
//! 3. the `PATH`
//! 4. each configured search path, with a leading `~` expanded
//!
//! When nothing matches, the error lists every location that was tried.

use crate::config::TaggerConfig;
use crate::error::{Error, Result};
use crate::tagger::language::BinarySpec;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct BinaryLocator {
    home: Option<PathBuf>,
    env_vars: Vec<String>,
    search_paths: Vec<PathBuf>,
    use_system_path: bool,
}

impl BinaryLocator {
    pub fn new() -> Self {
        Self {
            use_system_path: true,
            ..Self::default()
        }
    }

    pub fn from_config(config: &TaggerConfig) -> Self {
        let home = env_home();
        Self {
            home: config.home.clone(),
            env_vars: config.env_vars.clone(),
            search_paths: config
                .search_paths
                .iter()
                .map(|path| expand_tilde(path, home.as_deref()))
                .collect(),
            use_system_path: true,
        }
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_vars.push(name.into());
        self
    }

    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Skip the `PATH` lookup.
    pub fn without_system_path(mut self) -> Self {
        self.use_system_path = false;
        self
    }

    pub fn locate(&self, spec: &BinarySpec) -> Result<PathBuf> {
        self.locate_with_env(spec, |name| std::env::var_os(name))
    }

    /// Same as [`locate`](Self::locate) with an explicit environment lookup.
    pub fn locate_with_env<F>(&self, spec: &BinarySpec, env: F) -> Result<PathBuf>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let program = spec.program_name.as_str();
        let mut searched = Vec::new();

        if let Some(home) = &self.home {
            if let Some(found) = probe(home, program, &mut searched) {
                return Ok(found_at(spec, found, "configured home"));
            }
        }

        for name in &self.env_vars {
            let Some(value) = env(name).filter(|value| !value.is_empty()) else {
                continue;
            };
            let path = PathBuf::from(value);
            if path.is_file() && path.file_stem().is_some_and(|stem| stem == program) {
                return Ok(found_at(spec, path, name));
            }
            if let Some(found) = probe(&path, program, &mut searched) {
                return Ok(found_at(spec, found, name));
            }
        }

        if self.use_system_path {
            match which::which(program) {
                Ok(found) => return Ok(found_at(spec, found, "PATH")),
                Err(err) => debug!(program, error = %err, "not on PATH"),
            }
        }

        for dir in &self.search_paths {
            if let Some(found) = probe(dir, program, &mut searched) {
                return Ok(found_at(spec, found, "search path"));
            }
        }

        let reason = if searched.is_empty() {
            "not found on PATH and no other locations configured".to_string()
        } else {
            let places: Vec<String> = searched.iter().map(|p| p.display().to_string()).collect();
            format!("not found on PATH or in: {}", places.join(", "))
        };
        Err(Error::ProcessLaunch {
            program: program.to_string(),
            reason,
            searched,
        })
    }
}

fn probe(dir: &Path, program: &str, searched: &mut Vec<PathBuf>) -> Option<PathBuf> {
    searched.push(dir.to_path_buf());
    candidate_names(program)
        .into_iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

fn candidate_names(program: &str) -> Vec<String> {
    if cfg!(windows) {
        vec![
            program.to_string(),
            format!("{program}.bat"),
            format!("{program}.exe"),
        ]
    } else {
        vec![program.to_string()]
    }
}

fn found_at(spec: &BinarySpec, path: PathBuf, via: &str) -> PathBuf {
    info!(
        program = %spec.program_name,
        language = %spec.language,
        path = %path.display(),
        via,
        "found TreeTagger script"
    );
    path
}

fn env_home() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

/// Expand a leading `~` or `~/` against `home`. Other paths pass through unchanged.
pub fn expand_tilde(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') || rest.starts_with('\\') => {
            home.join(&rest[1..])
        }
        _ => PathBuf::from(path),
    }
}
