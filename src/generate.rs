//! Generation run: one source image → every artifact of one variant class.
//!
//! ## Run sequence
//!
//! ```text
//! load source ──▶ aspect-ratio check ──▶ create output dir ──▶ render targets
//!   DecodeError     Block → Validation                        catalog order, one at a time
//!                   Warn  → AspectWarning (unless allowed)
//! ```
//!
//! - **Square / Wide**: each target is rendered and written as its own PNG
//!   before the next one starts.
//! - **MultiSizeContainer**: every frame is rendered first, ordered largest
//!   first, then handed to the container writer in a single call.
//!
//! ## Failure policy
//!
//! The first render or write failure aborts the run and names the target.
//! Files written before the failure stay on disk.
//!
//! ## Progress
//!
//! Callers may pass an `mpsc::Sender<GenerateEvent>`. Events are
//! fire-and-forget: a dropped receiver never affects the run.
//! [`spawn_generation`] runs the whole thing on a worker thread and hands the
//! receiving end back to the caller.

use crate::catalog::{CONTAINER_FILE_NAME, TargetSpec, VariantClass, targets_for};
use crate::imaging::{
    BackendError, IconBackend, RenderError, RenderedArtifact, RustBackend, SharpenOutcome,
    order_frames_descending, render,
};
use crate::validation::{AspectCheck, Verdict, check_aspect};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Could not load source image: {0}")]
    Decode(#[source] BackendError),
    #[error("Invalid aspect ratio: {0}")]
    Validation(AspectCheck),
    #[error("Aspect ratio warning: {0}. Confirm to generate anyway")]
    AspectWarning(AspectCheck),
    #[error("Failed to render {target}: {source}")]
    Render {
        target: TargetSpec,
        #[source]
        source: RenderError,
    },
    #[error("Failed to write {target}: {source}")]
    Persistence {
        target: String,
        #[source]
        source: BackendError,
    },
    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Generation worker panicked")]
    WorkerPanicked,
}

/// Knobs a caller can turn for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Proceed when a Wide source is outside the soft tolerance.
    pub allow_aspect_mismatch: bool,
}

/// Everything one run needs. Owned, so it can move to a worker thread.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub class: VariantClass,
    pub options: GenerateOptions,
}

/// Progress notifications emitted during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateEvent {
    Started {
        class: VariantClass,
        source: PathBuf,
        dimensions: (u32, u32),
        total: usize,
    },
    /// A Wide source outside tolerance that the caller chose to accept.
    AspectAccepted(AspectCheck),
    /// One target finished. `index` is 1-based.
    TargetRendered {
        index: usize,
        total: usize,
        target: TargetSpec,
        sharpening: SharpenOutcome,
        /// Set for PNG targets; container frames are written together later.
        written: Option<PathBuf>,
    },
    ContainerWritten {
        path: PathBuf,
        sizes: Vec<u32>,
    },
}

/// Per-target line of a run report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactSummary {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub sharpening: SharpenOutcome,
}

impl ArtifactSummary {
    fn from_artifact(artifact: &RenderedArtifact) -> Self {
        Self {
            name: artifact.target.name,
            width: artifact.pixels.width(),
            height: artifact.pixels.height(),
            sharpening: artifact.sharpening.clone(),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateReport {
    pub class: VariantClass,
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub source_dimensions: (u32, u32),
    pub aspect: AspectCheck,
    pub icc_profile: bool,
    /// Files on disk, in write order.
    pub written: Vec<PathBuf>,
    /// Rendered targets, in render order.
    pub artifacts: Vec<ArtifactSummary>,
}

fn emit(events: Option<&Sender<GenerateEvent>>, event: GenerateEvent) {
    if let Some(tx) = events {
        // The receiver is only an observer; a closed channel is fine.
        let _ = tx.send(event);
    }
}

/// Decide whether a source of the given size may be used for `class`.
///
/// `Ok` carries the check, including accepted warnings.
pub fn admit(
    dimensions: (u32, u32),
    class: VariantClass,
    options: &GenerateOptions,
) -> Result<AspectCheck, GenerateError> {
    let check = check_aspect(dimensions.0, dimensions.1, class);
    match check.verdict {
        Verdict::Pass => Ok(check),
        Verdict::Warn if options.allow_aspect_mismatch => Ok(check),
        Verdict::Warn => Err(GenerateError::AspectWarning(check)),
        Verdict::Block => Err(GenerateError::Validation(check)),
    }
}

/// Read only the header of `path` and run the aspect-ratio policy on it.
pub fn check_source(
    backend: &impl IconBackend,
    path: &Path,
    class: VariantClass,
) -> Result<AspectCheck, GenerateError> {
    let dims = backend.identify(path).map_err(GenerateError::Decode)?;
    Ok(check_aspect(dims.width, dims.height, class))
}

/// Run a generation with the production backend.
pub fn generate(
    request: &GenerateRequest,
    events: Option<Sender<GenerateEvent>>,
) -> Result<GenerateReport, GenerateError> {
    generate_with_backend(&RustBackend::new(), request, events)
}

/// Run a generation using a specific backend (allows testing with mock).
pub fn generate_with_backend(
    backend: &impl IconBackend,
    request: &GenerateRequest,
    events: Option<Sender<GenerateEvent>>,
) -> Result<GenerateReport, GenerateError> {
    let events = events.as_ref();
    let source = backend
        .load(&request.source)
        .map_err(GenerateError::Decode)?;

    let aspect = admit(source.dimensions(), request.class, &request.options)?;
    if aspect.is_warning() {
        emit(events, GenerateEvent::AspectAccepted(aspect));
    }

    std::fs::create_dir_all(&request.output_dir).map_err(|e| GenerateError::OutputDir {
        path: request.output_dir.clone(),
        source: e,
    })?;

    let targets = targets_for(request.class);
    let total = targets.len();
    emit(
        events,
        GenerateEvent::Started {
            class: request.class,
            source: request.source.clone(),
            dimensions: source.dimensions(),
            total,
        },
    );

    let mut written = Vec::new();
    let mut artifacts = Vec::with_capacity(total);
    let mut frames = Vec::new();

    for (i, target) in targets.iter().enumerate() {
        let artifact = render(&source, target).map_err(|e| GenerateError::Render {
            target: *target,
            source: e,
        })?;
        artifacts.push(ArtifactSummary::from_artifact(&artifact));

        let path = match request.class {
            VariantClass::Square | VariantClass::Wide => {
                let path = request.output_dir.join(target.name);
                backend
                    .write_png(&artifact, &path)
                    .map_err(|e| GenerateError::Persistence {
                        target: target.to_string(),
                        source: e,
                    })?;
                written.push(path.clone());
                Some(path)
            }
            VariantClass::MultiSizeContainer => None,
        };

        emit(
            events,
            GenerateEvent::TargetRendered {
                index: i + 1,
                total,
                target: *target,
                sharpening: artifact.sharpening.clone(),
                written: path,
            },
        );

        if request.class == VariantClass::MultiSizeContainer {
            frames.push(artifact);
        }
    }

    if request.class == VariantClass::MultiSizeContainer {
        let frames = order_frames_descending(frames);
        let path = request.output_dir.join(CONTAINER_FILE_NAME);
        backend
            .write_container(&frames, &path)
            .map_err(|e| GenerateError::Persistence {
                target: CONTAINER_FILE_NAME.to_string(),
                source: e,
            })?;
        emit(
            events,
            GenerateEvent::ContainerWritten {
                path: path.clone(),
                sizes: frames.iter().map(|f| f.target.max_dimension()).collect(),
            },
        );
        written.push(path);
    }

    Ok(GenerateReport {
        class: request.class,
        source: request.source.clone(),
        output_dir: request.output_dir.clone(),
        source_dimensions: source.dimensions(),
        aspect,
        icc_profile: source.icc_profile().is_some(),
        written,
        artifacts,
    })
}

/// A generation running on its own thread.
pub struct GenerationHandle {
    events: Receiver<GenerateEvent>,
    worker: JoinHandle<Result<GenerateReport, GenerateError>>,
}

impl GenerationHandle {
    /// Progress events. Iteration ends when the worker finishes.
    pub fn events(&self) -> &Receiver<GenerateEvent> {
        &self.events
    }

    /// Wait for the worker and return its result.
    pub fn join(self) -> Result<GenerateReport, GenerateError> {
        self.worker
            .join()
            .unwrap_or(Err(GenerateError::WorkerPanicked))
    }
}

/// Start a generation on a background thread.
///
/// Targets are still rendered one at a time; the thread only keeps the
/// CPU-bound work off the caller's thread.
pub fn spawn_generation<B>(backend: B, request: GenerateRequest) -> GenerationHandle
where
    B: IconBackend + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let worker = std::thread::spawn(move || generate_with_backend(&backend, &request, Some(tx)));
    GenerationHandle {
        events: rx,
        worker,
    }
}
