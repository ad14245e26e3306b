use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::data::error::LoadResult;
use crate::data::loader::{self, Loaded};
use crate::data::model::Dataset;
use crate::data::shaper::{self, ShapeLimits, ShapedView};

/// How long a notification stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient, non-blocking message shown in the corner of the window.
#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub created: Instant,
}

// ---------------------------------------------------------------------------
// Chart selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Line, ChartKind::Pie];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Pie => "Pie Chart",
        }
    }
}

// ---------------------------------------------------------------------------
// Loaded file info
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    pub name: String,
    pub size_bytes: u64,
}

impl FileInfo {
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

/// Result of one background load, tagged with the request that produced it.
struct LoadMessage {
    generation: u64,
    file: FileInfo,
    result: LoadResult<Loaded>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Active dataset; empty until a file loads.
    pub dataset: Dataset,

    /// Derived views of `dataset`, rebuilt on every load.
    pub view: ShapedView,

    /// Name and size of the file behind `dataset`.
    pub file: Option<FileInfo>,

    /// Selected chart tab.
    pub chart: ChartKind,

    /// Pending notifications, oldest first.
    pub toasts: Vec<Toast>,

    pub limits: ShapeLimits,

    /// Generation of the most recent load request.
    generation: u64,
    /// Generation still waiting for its worker, if any.
    in_flight: Option<u64>,
    tx: Sender<LoadMessage>,
    rx: Receiver<LoadMessage>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_limits(ShapeLimits::default())
    }
}

impl AppState {
    pub fn with_limits(limits: ShapeLimits) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            dataset: Dataset::default(),
            view: ShapedView::default(),
            file: None,
            chart: ChartKind::default(),
            toasts: Vec::new(),
            limits,
            generation: 0,
            in_flight: None,
            tx,
            rx,
        }
    }

    /// Whether a file is being read in the background.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start reading `path` on a worker thread.
    ///
    /// `wake` is called from the worker once the result is queued, so the UI
    /// can schedule a repaint. Any earlier load still running is superseded:
    /// its result will be dropped when it arrives.
    pub fn begin_load(&mut self, path: PathBuf, wake: impl FnOnce() + Send + 'static) {
        self.generation += 1;
        let generation = self.generation;
        self.in_flight = Some(generation);

        let tx = self.tx.clone();
        thread::spawn(move || {
            let file = file_info(&path);
            let result = loader::load_file(&path);
            // The receiver lives as long as the state; a send error only
            // means the app is shutting down.
            let _ = tx.send(LoadMessage {
                generation,
                file,
                result,
            });
            wake();
        });
    }

    /// Apply every finished load without blocking. Returns true if the active
    /// dataset changed.
    pub fn poll_load(&mut self) -> bool {
        let mut changed = false;
        while let Ok(msg) = self.rx.try_recv() {
            changed |= self.finish_load(msg);
        }
        changed
    }

    /// Block until the in-flight load finishes or `timeout` passes. Returns
    /// true if the active dataset changed.
    pub fn wait_for_load(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight.is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(msg) => {
                    if self.finish_load(msg) {
                        return true;
                    }
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => break,
            }
        }
        false
    }

    fn finish_load(&mut self, msg: LoadMessage) -> bool {
        if msg.generation != self.generation {
            log::debug!(
                "Discarding stale load of {} (generation {}, current {})",
                msg.file.name,
                msg.generation,
                self.generation
            );
            return false;
        }
        self.in_flight = None;

        match msg.result {
            Ok(loaded) => {
                if loaded.skipped_rows > 0 {
                    self.notify(
                        ToastKind::Warning,
                        format!("Skipped {} malformed CSV rows", loaded.skipped_rows),
                    );
                }
                self.notify(
                    ToastKind::Success,
                    format!("{} file processed successfully!", loaded.format),
                );
                self.file = Some(msg.file);
                self.set_dataset(loaded.dataset);
                true
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", msg.file.name);
                self.notify(ToastKind::Error, e.to_string());
                false
            }
        }
    }

    /// Replace the active dataset and rebuild all derived views.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.view = shaper::shape(&dataset, &self.limits);
        self.dataset = dataset;
        self.chart = ChartKind::default();
        log::info!(
            "Shaped {} rows: numeric {:?}, categorical {:?}",
            self.view.total_rows,
            self.view.numeric_columns,
            self.view.categorical_columns
        );
    }

    /// Drop the active dataset and file info.
    pub fn clear(&mut self) {
        self.set_dataset(Dataset::default());
        self.file = None;
        self.notify(ToastKind::Info, "Data cleared");
    }

    /// Select a chart tab; the pie tab is refused while it has nothing to show.
    pub fn select_chart(&mut self, chart: ChartKind) {
        if chart == ChartKind::Pie && self.view.pie.is_empty() {
            return;
        }
        self.chart = chart;
    }

    pub fn notify(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toasts.push(Toast {
            kind,
            message: message.into(),
            created: Instant::now(),
        });
    }

    /// Remove notifications older than [`TOAST_LIFETIME`].
    pub fn prune_toasts(&mut self, now: Instant) {
        self.toasts
            .retain(|t| now.saturating_duration_since(t.created) < TOAST_LIFETIME);
    }
}

fn file_info(path: &Path) -> FileInfo {
    FileInfo {
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        size_bytes: std::fs::metadata(path).map(|m| m.len()).unwrap_or(0),
    }
}
