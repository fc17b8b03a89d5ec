use crate::options::AnnotationOptions;
use crate::splicer::{insert_annotation, remove_annotation};
use crate::Result;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// What happened to a single target file.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PatchOutcome {
    Annotated,
    Unchanged,
    Removed,
    NothingToRemove,
    FileNotFound,
}

/// Result of patching one file, displayable as the user-facing status line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PatchReport {
    pub path: PathBuf,
    pub outcome: PatchOutcome,
}

impl PatchReport {
    fn new(path: &Path, outcome: PatchOutcome) -> Self {
        PatchReport {
            path: path.to_path_buf(),
            outcome,
        }
    }
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match self.outcome {
            PatchOutcome::Annotated => write!(f, "{path} was annotated."),
            PatchOutcome::Unchanged => write!(f, "{path} was not changed."),
            PatchOutcome::Removed => write!(f, "Annotations were removed from {path}."),
            PatchOutcome::NothingToRemove => {
                write!(f, "{path} was not changed (Annotation did not exist).")
            }
            PatchOutcome::FileNotFound => write!(f, "{path} could not be found."),
        }
    }
}

/// Splices `block` into the file at `path`, writing only if the result
/// differs byte-for-byte from what is already on disk. A missing file is
/// reported, not raised, so batch runs can keep going.
#[instrument(skip(block, options))]
pub fn annotate_file(path: &Path, block: &str, options: &AnnotationOptions) -> Result<PatchReport> {
    let existing_text = match read_target(path)? {
        Some(text) => text,
        None => return Ok(PatchReport::new(path, PatchOutcome::FileNotFound)),
    };

    let (new_text, changed) = insert_annotation(&existing_text, block, options);
    if changed {
        fs::write(path, new_text)?;
        debug!("annotation written");
        Ok(PatchReport::new(path, PatchOutcome::Annotated))
    } else {
        debug!("annotation already up to date, skipping write");
        Ok(PatchReport::new(path, PatchOutcome::Unchanged))
    }
}

/// Removes a previously inserted annotation block from the file at `path`,
/// with the same write-only-if-changed policy as `annotate_file`.
#[instrument(skip(options))]
pub fn remove_annotations_from_file(
    path: &Path,
    options: &AnnotationOptions,
) -> Result<PatchReport> {
    let existing_text = match read_target(path)? {
        Some(text) => text,
        None => return Ok(PatchReport::new(path, PatchOutcome::FileNotFound)),
    };

    let (new_text, changed) = remove_annotation(&existing_text, options);
    if changed {
        fs::write(path, new_text)?;
        debug!("annotation removed");
        Ok(PatchReport::new(path, PatchOutcome::Removed))
    } else {
        debug!("no annotation found, skipping write");
        Ok(PatchReport::new(path, PatchOutcome::NothingToRemove))
    }
}

fn read_target(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
