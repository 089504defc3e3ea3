use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LaunchError;

/// Locations probed for an agent file, in priority order.
///
/// The working directory comes first, so a same-named file in whatever
/// directory the operator started from shadows the installed agent.
#[derive(Debug, Clone)]
pub(crate) struct SearchPaths {
    /// Pinned working directory; `None` asks the process at every lookup
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) agents_dir: PathBuf,
    pub(crate) root_dir: PathBuf,
}

impl SearchPaths {
    /// Probe the process working directory as it is when each agent launches
    pub(crate) fn new(agents_dir: PathBuf, root_dir: PathBuf) -> Self {
        SearchPaths {
            cwd: None,
            agents_dir,
            root_dir,
        }
    }

    /// A vanished working directory drops out of the search instead of
    /// failing it.
    pub(crate) fn working_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.cwd {
            return Some(dir.clone());
        }
        match std::env::current_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                debug!(error = %e, "working directory unavailable, skipping it");
                None
            }
        }
    }

    pub(crate) fn candidates(&self, file: &str) -> Vec<PathBuf> {
        self.candidates_from(self.working_dir().as_deref(), file)
    }

    fn candidates_from(&self, cwd: Option<&Path>, file: &str) -> Vec<PathBuf> {
        cwd.into_iter()
            .chain([self.agents_dir.as_path(), self.root_dir.as_path()])
            .map(|dir| dir.join(file))
            .collect()
    }

    /// First candidate that exists. Presence only: type and permissions
    /// are left for the spawn to report.
    pub(crate) fn resolve(&self, file: &str) -> Result<PathBuf, LaunchError> {
        let cwd = self.working_dir();
        let candidates = self.candidates_from(cwd.as_deref(), file);
        if let Some(found) = candidates.iter().find(|p| p.exists()) {
            if let Some(dir) = &cwd
                && *found == dir.join(file)
                && *dir != self.agents_dir
            {
                debug!(path = %found.display(), "agent resolved from working directory");
            }
            return Ok(found.clone());
        }
        Err(LaunchError::NotFound {
            file: file.to_string(),
            searched: candidates,
        })
    }
}
