//! Staged parallel ingestion pipeline.

use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use tickbar_types::{DEFAULT_DATE_OFFSET, RawTick, Result, SourceFile, Tick, TickbarError};
use tracing::{debug, info, warn};

use crate::{clean, dedup, load_file};

/// Configuration for the ingestion pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Number of worker threads in the pool.
    pub workers: usize,
    /// Byte offset of the `YYYYMMDD` date in source file names.
    pub date_offset: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism().map_or(1, |n| n.get()),
            date_offset: DEFAULT_DATE_OFFSET,
        }
    }
}

impl PipelineConfig {
    /// Sets the number of worker threads (at least one).
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Sets the byte offset of the date in source file names.
    #[must_use]
    pub const fn with_date_offset(mut self, offset: usize) -> Self {
        self.date_offset = offset;
        self
    }
}

/// A pipeline stage. Stages run one after another, each over every file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Reading and filtering raw rows.
    Load,
    /// Parsing fields and correcting prices.
    Clean,
    /// Collapsing same-timestamp ticks.
    Dedup,
}

impl Stage {
    /// Returns the stage name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Clean => "clean",
            Self::Dedup => "dedup",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Observer for pipeline progress.
///
/// Called from worker threads, so implementations must be `Sync`.
pub trait Progress: Sync {
    /// Called before a stage starts with the number of files it will process.
    fn stage_started(&self, _stage: Stage, _files: usize) {}

    /// Called each time a worker finishes one file in a stage.
    fn file_finished(&self, _stage: Stage) {}
}

/// Progress observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}

/// The cleaned, deduplicated ticks of a single source file.
#[derive(Debug, Clone)]
pub struct FileTicks {
    /// The file the ticks came from.
    pub source: SourceFile,
    /// The ticks, in file order.
    pub ticks: Vec<Tick>,
}

impl FileTicks {
    /// Creates a new per-file result.
    #[must_use]
    pub const fn new(source: SourceFile, ticks: Vec<Tick>) -> Self {
        Self { source, ticks }
    }

    /// Returns true if the file produced no ticks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Returns the number of ticks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ticks.len()
    }
}

/// Loads, cleans, and deduplicates source files on a private worker pool.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline with the given configuration.
    #[must_use]
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Returns the pipeline configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Lists the source files in `dir` using the configured date offset.
    ///
    /// # Errors
    ///
    /// See [`discover_sources`].
    pub fn discover(&self, dir: &Path) -> Result<Vec<SourceFile>> {
        discover_sources(dir, self.config.date_offset)
    }

    /// Runs every stage over `sources` and returns the merged tick sequence.
    ///
    /// # Errors
    ///
    /// Returns the first error from any file in any stage.
    pub fn run(&self, sources: &[SourceFile]) -> Result<Vec<Tick>> {
        self.run_with_progress(sources, &NoProgress)
    }

    /// Like [`Pipeline::run`], reporting progress to `progress`.
    ///
    /// # Errors
    ///
    /// Returns the first error from any file in any stage.
    pub fn run_with_progress(
        &self,
        sources: &[SourceFile],
        progress: &dyn Progress,
    ) -> Result<Vec<Tick>> {
        let files = self.process(sources, progress)?;
        Ok(merge(files))
    }

    /// Runs every stage over `sources`, returning one result per file in input order.
    ///
    /// Each stage is a barrier: no file enters the next stage until every
    /// file has finished the current one.
    ///
    /// # Errors
    ///
    /// Returns the first error from any file in any stage.
    pub fn process(&self, sources: &[SourceFile], progress: &dyn Progress) -> Result<Vec<FileTicks>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("tickbar-worker-{i}"))
            .build()
            .map_err(|e| TickbarError::Pool(e.to_string()))?;

        info!(
            files = sources.len(),
            workers = self.config.workers,
            "starting ingestion"
        );

        pool.install(|| {
            let loaded = run_stage(Stage::Load, sources.to_vec(), progress, |source| {
                let rows = load_file(&source).map_err(|e| TickbarError::Load {
                    file: source.name(),
                    source: Box::new(e),
                })?;
                Ok((source, rows))
            })?;

            let cleaned = run_stage(Stage::Clean, loaded, progress, |(source, rows)| {
                clean_rows(source, rows)
            })?;

            run_stage(Stage::Dedup, cleaned, progress, |file| {
                let before = file.len();
                let ticks = dedup(file.ticks);
                if ticks.len() < before {
                    debug!(
                        file = %file.source.name(),
                        removed = before - ticks.len(),
                        "removed duplicate timestamps"
                    );
                }
                Ok(FileTicks::new(file.source, ticks))
            })
        })
    }
}

fn clean_rows(source: SourceFile, rows: Vec<RawTick>) -> Result<FileTicks> {
    let ticks = clean(rows).map_err(|e| TickbarError::Clean {
        file: source.name(),
        source: Box::new(e),
    })?;
    Ok(FileTicks::new(source, ticks))
}

/// Runs `task` once per input on the current pool and waits for all of them.
fn run_stage<T, U, F>(stage: Stage, inputs: Vec<T>, progress: &dyn Progress, task: F) -> Result<Vec<U>>
where
    T: Send,
    U: Send,
    F: Fn(T) -> Result<U> + Sync + Send,
{
    progress.stage_started(stage, inputs.len());
    let started = Instant::now();

    let outputs = inputs
        .into_par_iter()
        .map(|input| {
            let output = task(input);
            progress.file_finished(stage);
            output
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        %stage,
        files = outputs.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "stage complete"
    );
    Ok(outputs)
}

/// Concatenates per-file results in order into one tick sequence.
///
/// No sorting is performed. Files are expected to cover successive days, so
/// concatenating them in date order keeps the sequence time-ordered.
#[must_use]
pub fn merge(files: Vec<FileTicks>) -> Vec<Tick> {
    let total = files.iter().map(FileTicks::len).sum();
    let mut merged: Vec<Tick> = Vec::with_capacity(total);

    for file in files {
        if let (Some(last), Some(first)) = (merged.last(), file.ticks.first()) {
            if first.timestamp < last.timestamp {
                warn!(
                    file = %file.source.name(),
                    "file starts before the previous file ends; merged ticks are out of order"
                );
            }
        }
        merged.extend(file.ticks);
    }

    info!(ticks = merged.len(), "merged source files");
    merged
}

/// Lists the regular files in `dir` as source files, sorted by date then path.
///
/// Hidden files (names starting with `.`) are ignored.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or a file name carries
/// no `YYYYMMDD` date at `date_offset`.
pub fn discover_sources(dir: &Path, date_offset: usize) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        sources.push(SourceFile::from_path(entry.path(), date_offset)?);
    }

    sources.sort();
    debug!(dir = %dir.display(), files = sources.len(), "discovered source files");
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use crate::{CleanError, LoadError};
    use std::fs;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn write_file(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[derive(Default)]
    struct CountingProgress {
        stages: AtomicUsize,
        files: AtomicUsize,
    }

    impl Progress for CountingProgress {
        fn stage_started(&self, _stage: Stage, _files: usize) {
            self.stages.fetch_add(1, Ordering::Relaxed);
        }

        fn file_finished(&self, _stage: Stage) {
            self.files.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Started(Stage),
        Finished(Stage),
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<Event>>,
    }

    impl Progress for RecordingProgress {
        fn stage_started(&self, stage: Stage, _files: usize) {
            self.events.lock().unwrap().push(Event::Started(stage));
        }

        fn file_finished(&self, stage: Stage) {
            self.events.lock().unwrap().push(Event::Finished(stage));
        }
    }

    #[test]
    fn test_stages_are_barriers() {
        let dir = tempfile::tempdir().unwrap();
        for day in 2..=7 {
            write_file(
                dir.path(),
                &format!("CTG_tick_202401{day:02}.csv"),
                &format!(
                    "Timestamp,Price,Size\n\
                     2024-01-{day:02} 10:00:00.000000,417.2,5\n\
                     2024-01-{day:02} 10:00:00.000000,417.3,9\n"
                ),
            );
        }

        let pipeline = Pipeline::new(PipelineConfig::default().with_workers(3));
        let sources = pipeline.discover(dir.path()).unwrap();
        let progress = RecordingProgress::default();
        let ticks = pipeline.run_with_progress(&sources, &progress).unwrap();
        assert_eq!(ticks.len(), 6);

        let events = progress.events.into_inner().unwrap();
        let position = |event: Event| events.iter().position(|e| *e == event).unwrap();
        let last_finished = |stage: Stage| {
            events
                .iter()
                .rposition(|e| *e == Event::Finished(stage))
                .unwrap()
        };

        for stage in [Stage::Load, Stage::Clean, Stage::Dedup] {
            let finished = events.iter().filter(|e| **e == Event::Finished(stage)).count();
            assert_eq!(finished, sources.len(), "{stage}");
        }
        assert!(last_finished(Stage::Load) < position(Event::Started(Stage::Clean)));
        assert!(last_finished(Stage::Clean) < position(Event::Started(Stage::Dedup)));
        assert!(position(Event::Started(Stage::Clean)) < position(Event::Finished(Stage::Clean)));
    }

    #[test]
    fn test_pipeline_config_defaults() {
        let config = PipelineConfig::default();
        assert!(config.workers >= 1);
        assert_eq!(config.date_offset, DEFAULT_DATE_OFFSET);
        assert_eq!(config.with_workers(0).workers, 1);
    }

    #[test]
    fn test_discover_sources_sorted_by_date() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "CTG_tick_20240103.csv", "");
        write_file(dir.path(), "CTG_tick_20240102.csv", "");
        write_file(dir.path(), ".DS_Store", "");
        fs::create_dir(dir.path().join("archive")).unwrap();

        let sources = discover_sources(dir.path(), DEFAULT_DATE_OFFSET).unwrap();

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(sources[1].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn test_discover_sources_rejects_undated_names() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "notes.txt", "");
        assert!(matches!(
            discover_sources(dir.path(), DEFAULT_DATE_OFFSET),
            Err(TickbarError::SourceFile(_))
        ));
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "CTG_tick_20240102.csv",
            "Timestamp,Price,Size\n\
             2024-01-02 10:00:00.000000,41.72,5\n\
             2024-01-02 10:00:00.000000,417.3,9\n\
             2024-01-02 10:00:01.000000,-418.0,2\n\
             2024-01-03 10:00:02.000000,420.0,2\n",
        );
        write_file(
            dir.path(),
            "CTG_tick_20240103.csv",
            "Timestamp,Price,Size\n\
             2024-01-03 09:30:00.000000,419.0,4\n\
             2024-01-03 09:30:01.000000,,4\n",
        );

        let pipeline = Pipeline::new(PipelineConfig::default().with_workers(2));
        let sources = pipeline.discover(dir.path()).unwrap();
        let progress = CountingProgress::default();
        let ticks = pipeline.run_with_progress(&sources, &progress).unwrap();

        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[0].size, 9);
        assert!((ticks[1].price - 418.0).abs() < 1e-9);
        assert_eq!(
            ticks[2].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 3, 9, 30, 0).unwrap()
        );
        assert!(ticks.iter().all(|t| t.price >= 0.0));

        assert_eq!(progress.stages.load(Ordering::Relaxed), 3);
        assert_eq!(progress.files.load(Ordering::Relaxed), 6);
    }

    #[test]
    fn test_pipeline_bad_value_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "CTG_tick_20240102.csv",
            "2024-01-02 10:00:00.000000,abc,5\n",
        );

        let pipeline = Pipeline::default();
        let sources = pipeline.discover(dir.path()).unwrap();
        let err = pipeline.run(&sources).unwrap_err();

        assert!(matches!(err, TickbarError::Clean { ref file, .. } if file == "CTG_tick_20240102.csv"));

        let cause = std::error::Error::source(&err)
            .and_then(|e| e.downcast_ref::<CleanError>())
            .unwrap();
        assert_eq!(
            *cause,
            CleanError::Price {
                row: 0,
                text: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_pipeline_missing_file_fails_load_stage() {
        let source = SourceFile::new(
            "missing/CTG_tick_20240102.csv",
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        );
        let err = Pipeline::default().run(&[source]).unwrap_err();
        assert!(matches!(err, TickbarError::Load { .. }));

        let cause = std::error::Error::source(&err).unwrap();
        assert!(matches!(cause.downcast_ref::<LoadError>(), Some(LoadError::Io(_))));
    }

    #[test]
    fn test_merge_concatenates_in_order() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        let tick = |d, p| Tick::new(Utc.with_ymd_and_hms(2024, 1, d, 10, 0, 0).unwrap(), p, 1);
        let files = vec![
            FileTicks::new(SourceFile::new("a", day(2)), vec![tick(2, 400.0)]),
            FileTicks::new(SourceFile::new("b", day(3)), vec![]),
            FileTicks::new(SourceFile::new("c", day(4)), vec![tick(4, 401.0), tick(4, 402.0)]),
        ];

        let merged = merge(files);

        let prices: Vec<_> = merged.iter().map(|t| t.price).collect();
        assert_eq!(prices, vec![400.0, 401.0, 402.0]);
    }
}
