use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    thread,
    time::Instant,
};

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    assets::{
        decode::decode_image,
        sequence::{FrameAsset, FrameSet, LoadError, LoadReport, LoadedFrames, SequenceSpec},
    },
    foundation::{
        core::FrameIndex,
        error::{FramescrubError, FramescrubResult},
    },
};

/// Where encoded frame bytes come from.
pub trait FrameSource: Send + Sync {
    /// Fetch the encoded bytes for a sequence-relative path.
    fn fetch(&self, rel_path: &str) -> FramescrubResult<Vec<u8>>;
}

/// Frames served from a directory on disk.
#[derive(Clone, Debug)]
pub struct FsFrameSource {
    root: PathBuf,
}

impl FsFrameSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FrameSource for FsFrameSource {
    fn fetch(&self, rel_path: &str) -> FramescrubResult<Vec<u8>> {
        let norm = normalize_rel_path(rel_path)?;
        let path = self.root.join(Path::new(&norm));
        let bytes =
            std::fs::read(&path).with_context(|| format!("read frame '{}'", path.display()))?;
        Ok(bytes)
    }
}

/// Frames held in memory, keyed by normalized relative path.
#[derive(Clone, Debug, Default)]
pub struct MemoryFrameSource {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rel_path: &str, bytes: Vec<u8>) -> FramescrubResult<()> {
        self.files.insert(normalize_rel_path(rel_path)?, bytes);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FrameSource for MemoryFrameSource {
    fn fetch(&self, rel_path: &str) -> FramescrubResult<Vec<u8>> {
        let norm = normalize_rel_path(rel_path)?;
        self.files
            .get(&norm)
            .cloned()
            .ok_or_else(|| FramescrubError::asset(format!("no such frame '{norm}'")))
    }
}

/// Normalize a relative frame path to forward slashes, rejecting absolute paths and `..`.
pub fn normalize_rel_path(source: &str) -> FramescrubResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(FramescrubError::validation("frame paths must be relative"));
    }
    if s.is_empty() {
        return Err(FramescrubError::validation("frame path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(FramescrubError::validation(
                "frame paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(FramescrubError::validation(
            "frame path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Fetch and decode every frame of `spec` concurrently.
///
/// Failed frames become sentinels and are listed in the report; the batch itself never fails.
pub fn load_frames(spec: &SequenceSpec, source: &dyn FrameSource) -> LoadedFrames {
    let started = Instant::now();
    let results = fetch_and_decode_all(spec, source, &AtomicBool::new(false));
    assemble(spec, results, started)
}

/// Like [`load_frames`], but returns `None` once `cancel` is observed.
///
/// Frames not yet started when the flag flips are skipped.
pub fn load_frames_cancellable(
    spec: &SequenceSpec,
    source: &dyn FrameSource,
    cancel: &AtomicBool,
) -> Option<LoadedFrames> {
    let started = Instant::now();
    let results = fetch_and_decode_all(spec, source, cancel);
    if cancel.load(Ordering::Relaxed) {
        tracing::debug!(count = spec.count, "frame load cancelled");
        return None;
    }
    Some(assemble(spec, results, started))
}

#[tracing::instrument(skip(source, cancel), fields(count = spec.count))]
fn fetch_and_decode_all(
    spec: &SequenceSpec,
    source: &dyn FrameSource,
    cancel: &AtomicBool,
) -> Vec<Result<FrameAsset, LoadError>> {
    (0..spec.count)
        .into_par_iter()
        .map(|i| {
            let index = FrameIndex(i);
            let path = spec.path_for(index);
            if cancel.load(Ordering::Relaxed) {
                return Err(LoadError {
                    index,
                    path,
                    reason: "cancelled".to_string(),
                });
            }
            source
                .fetch(&path)
                .and_then(|bytes| decode_image(&bytes))
                .map_err(|e| LoadError {
                    index,
                    path,
                    reason: format!("{e:#}"),
                })
        })
        .collect()
}

fn assemble(
    spec: &SequenceSpec,
    results: Vec<Result<FrameAsset, LoadError>>,
    started: Instant,
) -> LoadedFrames {
    let mut frames = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(frame) => frames.push(frame),
            Err(err) => {
                tracing::warn!(
                    frame = err.index.sequence_number(),
                    path = %err.path,
                    reason = %err.reason,
                    "failed to load frame; substituting blank"
                );
                frames.push(FrameAsset::sentinel());
                failures.push(err);
            }
        }
    }

    let report = LoadReport {
        requested: spec.count,
        failures,
        elapsed: started.elapsed(),
    };
    tracing::info!(
        requested = report.requested,
        failed = report.failures.len(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "frame sequence loaded"
    );

    LoadedFrames {
        frames: FrameSet::new(frames),
        report,
    }
}

/// State of a [`LoadTask`] when polled.
#[derive(Debug)]
pub enum LoadPoll {
    Pending,
    Ready(LoadedFrames),
    /// The task was cancelled or its worker went away without a result.
    Abandoned,
}

/// A frame load running on a worker thread.
///
/// Dropping or cancelling the task detaches it; a result produced afterwards is discarded.
#[derive(Debug)]
pub struct LoadTask {
    rx: Option<mpsc::Receiver<LoadedFrames>>,
    cancel: Arc<AtomicBool>,
}

impl LoadTask {
    pub fn spawn(spec: SequenceSpec, source: Arc<dyn FrameSource>) -> FramescrubResult<Self> {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = Arc::clone(&cancel);

        thread::Builder::new()
            .name("framescrub-load".to_string())
            .spawn(move || {
                if let Some(loaded) =
                    load_frames_cancellable(&spec, source.as_ref(), &worker_cancel)
                {
                    // The receiver is gone if the owner was disposed; nothing to do then.
                    let _ = tx.send(loaded);
                }
            })
            .context("spawn frame load thread")?;

        Ok(Self {
            rx: Some(rx),
            cancel,
        })
    }

    pub fn cancel(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        self.rx = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Non-blocking check for a finished load.
    pub fn poll(&mut self) -> LoadPoll {
        let Some(rx) = &self.rx else {
            return LoadPoll::Abandoned;
        };
        match rx.try_recv() {
            Ok(loaded) => {
                self.rx = None;
                LoadPoll::Ready(loaded)
            }
            Err(mpsc::TryRecvError::Empty) => LoadPoll::Pending,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.rx = None;
                LoadPoll::Abandoned
            }
        }
    }
}

impl Drop for LoadTask {
    fn drop(&mut self) {
        if self.rx.is_some() {
            self.cancel.store(true, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
