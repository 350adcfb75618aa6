//! Recursive discovery of media files and job construction.
//!
//! The traversal walks the input root once, in file-name order, and decides
//! for every entry whether it becomes a [`Job`]. Skips are silent (debug
//! log and a counter); read errors and unrelatable paths abort the walk.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::job::Job;
use crate::output_path::{is_within, mirror_output_path, relative_path};

use super::AbortSignal;

/// What the traversal does with one visited entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Directories are descended into but never become jobs
    Directory,
    /// Extension differs from the configured media extension
    WrongExtension,
    /// Entry lives inside the output subtree
    InsideOutput,
    /// A file already exists at the computed output path
    AlreadyExists,
    /// Entry qualifies
    Enqueue(Job),
}

/// Counters collected during one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    pub directories: usize,
    pub wrong_extension: usize,
    pub inside_output: usize,
    pub already_exists: usize,
    pub queued: usize,
}

impl TraversalStats {
    /// Files that were visited but did not become jobs.
    pub fn skipped(&self) -> usize {
        self.wrong_extension + self.inside_output + self.already_exists
    }

    fn record(&mut self, decision: &Decision) {
        match decision {
            Decision::Directory => self.directories += 1,
            Decision::WrongExtension => self.wrong_extension += 1,
            Decision::InsideOutput => self.inside_output += 1,
            Decision::AlreadyExists => self.already_exists += 1,
            Decision::Enqueue(_) => self.queued += 1,
        }
    }
}

/// Walks an input root and turns qualifying files into jobs.
#[derive(Debug, Clone)]
pub struct Traversal {
    root: PathBuf,
    output_dir: PathBuf,
    extension: String,
    strip_chars: Vec<char>,
    trim_offset_secs: u64,
    abort: Option<AbortSignal>,
}

impl Traversal {
    /// Prepares a traversal of `root` that mirrors files under `output_dir`.
    ///
    /// Both paths should be absolute and canonical; `output_dir` is stored
    /// relative to `root`.
    ///
    /// # Errors
    ///
    /// * `CoreError::PathError` - `output_dir` cannot be expressed relative to `root`
    pub fn new(config: &CoreConfig, root: &Path, output_dir: &Path) -> CoreResult<Self> {
        let relative_output = relative_path(root, output_dir).ok_or_else(|| {
            CoreError::PathError(format!(
                "cannot express output directory '{}' relative to '{}'",
                output_dir.display(),
                root.display()
            ))
        })?;

        Ok(Self {
            root: root.to_path_buf(),
            output_dir: relative_output,
            extension: config.normalized_extension().to_string(),
            strip_chars: config.strip_chars.clone(),
            trim_offset_secs: config.trim_offset_secs,
            abort: None,
        })
    }

    /// Stops the walk with `CoreError::Aborted` once `abort` is raised.
    pub fn with_abort(mut self, abort: AbortSignal) -> Self {
        self.abort = Some(abort);
        self
    }

    /// Applies the filter rules to one visited path.
    ///
    /// # Errors
    ///
    /// * `CoreError::PathError` - `path` is not under the root
    pub fn plan(&self, path: &Path, is_dir: bool) -> CoreResult<Decision> {
        let relative = path
            .strip_prefix(&self.root)
            .map_err(|_| {
                CoreError::PathError(format!(
                    "'{}' is not inside the input root '{}'",
                    path.display(),
                    self.root.display()
                ))
            })?
            .to_path_buf();

        if is_dir {
            return Ok(Decision::Directory);
        }

        let matches_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension);
        if !matches_extension {
            return Ok(Decision::WrongExtension);
        }

        if is_within(&relative, &self.output_dir) {
            return Ok(Decision::InsideOutput);
        }

        let output = mirror_output_path(&self.output_dir, &relative, &self.strip_chars);
        match self.root.join(&output).try_exists() {
            Ok(false) => {}
            Ok(true) => return Ok(Decision::AlreadyExists),
            Err(e) => {
                // Unknown state counts as present, so the file is not reprocessed.
                log::debug!("Cannot check {}: {}", output.display(), e);
                return Ok(Decision::AlreadyExists);
            }
        }

        let job = Job::new(&self.root, relative, output, self.trim_offset_secs)?;
        Ok(Decision::Enqueue(job))
    }

    /// Walks the root and hands every job to `sink` in walk order.
    ///
    /// Stops at the first error from the filesystem, from `plan`, or from
    /// `sink`.
    pub fn run<F>(&self, mut sink: F) -> CoreResult<TraversalStats>
    where
        F: FnMut(Job) -> CoreResult<()>,
    {
        let mut stats = TraversalStats::default();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                log::error!("Traversal failed: {}", e);
                CoreError::Walkdir(e)
            })?;

            let decision = self.plan(entry.path(), entry.file_type().is_dir())?;
            stats.record(&decision);

            match decision {
                Decision::Enqueue(job) => {
                    if self.abort.as_ref().is_some_and(AbortSignal::is_raised) {
                        return Err(CoreError::Aborted);
                    }
                    log::info!("Added {}", job.input_path().display());
                    sink(job)?;
                }
                Decision::Directory => {}
                skipped => {
                    log::debug!("Skipping {} ({:?})", entry.path().display(), skipped);
                }
            }
        }

        log::debug!("Traversal finished: {:?}", stats);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        let out = root.join("out");
        fs::create_dir_all(&out).unwrap();
        (dir, root, out)
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    fn collect(traversal: &Traversal) -> (Vec<Job>, TraversalStats) {
        let mut jobs = Vec::new();
        let stats = traversal
            .run(|job| {
                jobs.push(job);
                Ok(())
            })
            .unwrap();
        (jobs, stats)
    }

    #[test]
    fn plan_applies_rules_in_order() {
        let (_dir, root, out) = setup();
        let traversal = Traversal::new(&CoreConfig::default(), &root, &out).unwrap();

        assert_eq!(traversal.plan(&root.join("a"), true).unwrap(), Decision::Directory);
        assert_eq!(
            traversal.plan(&root.join("a/clip.MP4"), false).unwrap(),
            Decision::WrongExtension
        );
        assert_eq!(
            traversal.plan(&root.join("out/a/clip.mp4"), false).unwrap(),
            Decision::InsideOutput
        );

        touch(&root.join("out/b/done.mp4"));
        assert_eq!(
            traversal.plan(&root.join("b/done.mp4"), false).unwrap(),
            Decision::AlreadyExists
        );

        match traversal.plan(&root.join("a/clip.mp4"), false).unwrap() {
            Decision::Enqueue(job) => {
                assert_eq!(job.work_dir(), root.as_path());
                assert_eq!(job.input_path(), Path::new("a/clip.mp4"));
                assert_eq!(job.output_path(), Path::new("out/a/clip.mp4"));
                assert_eq!(job.trim_offset_secs(), 7);
            }
            other => panic!("unexpected decision: {:?}", other),
        }
    }

    #[test]
    fn plan_rejects_paths_outside_root() {
        let (_dir, root, out) = setup();
        let traversal = Traversal::new(&CoreConfig::default(), &root, &out).unwrap();
        let result = traversal.plan(Path::new("/elsewhere/clip.mp4"), false);
        assert!(matches!(result, Err(CoreError::PathError(_))));
    }

    #[test]
    fn sibling_names_sharing_the_output_prefix_are_not_skipped() {
        let (_dir, root, out) = setup();
        touch(&root.join("outtakes/clip.mp4"));
        let traversal = Traversal::new(&CoreConfig::default(), &root, &out).unwrap();

        let (jobs, _) = collect(&traversal);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].output_path(), Path::new("out/outtakes/clip.mp4"));
    }

    #[test]
    fn output_outside_root_is_mirrored_with_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let base = fs::canonicalize(dir.path()).unwrap();
        let root = base.join("in");
        let out = base.join("export");
        touch(&root.join("clip.mp4"));
        fs::create_dir_all(&out).unwrap();

        let traversal = Traversal::new(&CoreConfig::default(), &root, &out).unwrap();
        let (jobs, _) = collect(&traversal);

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].output_path(), Path::new("../export/clip.mp4"));
        assert_eq!(jobs[0].absolute_output(), root.join("../export/clip.mp4"));
    }

    #[test]
    fn denylisted_characters_are_stripped_from_destination() {
        let (_dir, root, out) = setup();
        touch(&root.join("clip's,one.mp4"));
        let traversal = Traversal::new(&CoreConfig::default(), &root, &out).unwrap();

        let (jobs, _) = collect(&traversal);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].input_path(), Path::new("clip's,one.mp4"));
        assert_eq!(jobs[0].output_path(), Path::new("out/clipsone.mp4"));
    }

    #[test]
    fn stripping_cannot_turn_a_directory_into_parent_dir() {
        let (_dir, root, out) = setup();
        touch(&root.join(".'./clip.mp4"));
        let traversal = Traversal::new(&CoreConfig::default(), &root, &out).unwrap();

        let (jobs, _) = collect(&traversal);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].output_path(), Path::new("out/.'./clip.mp4"));
        assert!(jobs[0].absolute_output().starts_with(&out));
    }

    #[test]
    fn sanitized_output_counts_for_existence_check() {
        let (_dir, root, out) = setup();
        touch(&root.join("clip's.mp4"));
        touch(&root.join("out/clips.mp4"));
        let traversal = Traversal::new(&CoreConfig::default(), &root, &out).unwrap();

        let (jobs, stats) = collect(&traversal);
        assert!(jobs.is_empty());
        assert_eq!(stats.already_exists, 1);
    }

    #[test]
    fn custom_extension_and_offset_are_used() {
        let (_dir, root, out) = setup();
        touch(&root.join("a.mkv"));
        touch(&root.join("b.mp4"));
        let config = CoreConfig {
            media_extension: ".mkv".to_string(),
            trim_offset_secs: 30,
            ..CoreConfig::default()
        };
        let traversal = Traversal::new(&config, &root, &out).unwrap();

        let (jobs, stats) = collect(&traversal);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].input_path(), Path::new("a.mkv"));
        assert_eq!(jobs[0].trim_offset_secs(), 30);
        assert_eq!(stats.wrong_extension, 1);
    }

    #[test]
    fn walk_order_is_sorted_by_name() {
        let (_dir, root, out) = setup();
        for name in ["c.mp4", "a.mp4", "b/z.mp4", "b/a.mp4"] {
            touch(&root.join(name));
        }
        let traversal = Traversal::new(&CoreConfig::default(), &root, &out).unwrap();

        let (jobs, stats) = collect(&traversal);
        let inputs: Vec<&Path> = jobs.iter().map(Job::input_path).collect();
        assert_eq!(
            inputs,
            vec![
                Path::new("a.mp4"),
                Path::new("b/a.mp4"),
                Path::new("b/z.mp4"),
                Path::new("c.mp4"),
            ]
        );
        // root, b, out
        assert_eq!(stats.directories, 3);
    }

    #[test]
    fn sink_error_stops_the_walk() {
        let (_dir, root, out) = setup();
        touch(&root.join("a.mp4"));
        touch(&root.join("b.mp4"));
        let traversal = Traversal::new(&CoreConfig::default(), &root, &out).unwrap();

        let mut calls = 0;
        let result = traversal.run(|_| {
            calls += 1;
            Err(CoreError::QueueClosed)
        });
        assert!(matches!(result, Err(CoreError::QueueClosed)));
        assert_eq!(calls, 1);
    }

    #[test]
    fn raised_abort_stops_before_enqueueing() {
        let (_dir, root, out) = setup();
        touch(&root.join("a.mp4"));
        let abort = AbortSignal::default();
        abort.raise();
        let traversal = Traversal::new(&CoreConfig::default(), &root, &out)
            .unwrap()
            .with_abort(abort);

        let result = traversal.run(|_| Ok(()));
        assert!(matches!(result, Err(CoreError::Aborted)));
    }

    #[test]
    fn missing_root_is_a_walk_error() {
        let (_dir, root, out) = setup();
        let missing = root.join("does-not-exist");
        let traversal = Traversal::new(&CoreConfig::default(), &missing, &out).unwrap();

        let result = traversal.run(|_| Ok(()));
        assert!(matches!(result, Err(CoreError::Walkdir(_))));
    }
}
