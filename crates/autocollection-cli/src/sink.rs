//! Output sink writing one file per unit

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use autocollection_generator::{GenerationError, OutputSink};
use tracing::debug;

/// Writes `<root>/<identity>` for each published unit
///
/// In dry-run mode nothing touches the disk; identities are still tracked so
/// collisions are reported the same way.
pub struct DirectorySink {
    root: PathBuf,
    dry_run: bool,
    written: Vec<PathBuf>,
    identities: HashSet<String>,
}

impl DirectorySink {
    /// Sink rooted at `root`
    pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            root: root.into(),
            dry_run,
            written: Vec::new(),
            identities: HashSet::new(),
        }
    }

    /// Output directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths published so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl OutputSink for DirectorySink {
    fn publish(&mut self, identity: &str, text: &str) -> Result<(), GenerationError> {
        if identity.contains(['/', '\\']) {
            return Err(GenerationError::PublishFailed {
                identity: identity.to_string(),
                message: "identity contains a path separator".to_string(),
            });
        }
        if !self.identities.insert(identity.to_string()) {
            return Err(GenerationError::IdentityCollision(identity.to_string()));
        }

        let path = self.root.join(identity);
        if self.dry_run {
            debug!("Would write {}", path.display());
        } else {
            fs::create_dir_all(&self.root)?;
            fs::write(&path, text)?;
            debug!("Wrote {}", path.display());
        }
        self.written.push(path);
        Ok(())
    }
}
