// ============================================================================
// vtrim-core/src/external/processor.rs
// ============================================================================
//
// JOB PROCESSOR: Running the External Tool for One Job
//
// This module defines the JobProcessor trait used by the worker pool and the
// VlcProcessor that implements it by spawning VLC headless with a start
// offset and a file sout chain.
//
// AI-ASSISTANT-INFO: External tool invocation for a single job

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::job::Job;

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Diagnostic output captured from one tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// stdout followed by stderr, lossily decoded
    pub combined: String,
}

/// Something that can process a job synchronously.
///
/// Implementations are shared by every worker thread, hence `Send + Sync`.
pub trait JobProcessor: Send + Sync {
    /// Runs the job to completion. Any error is fatal to the run.
    fn process(&self, job: &Job) -> CoreResult<ProcessOutput>;
}

/// Invokes the VLC executable for each job.
#[derive(Debug, Clone)]
pub struct VlcProcessor {
    tool_path: PathBuf,
}

impl VlcProcessor {
    pub fn new(tool_path: impl Into<PathBuf>) -> Self {
        Self {
            tool_path: tool_path.into(),
        }
    }

    /// Argument list passed to the tool for `job`.
    ///
    /// Paths are passed through as `OsString`, so names that are not valid
    /// UTF-8 reach the tool unchanged.
    pub fn arguments(job: &Job) -> Vec<OsString> {
        let mut sout = OsString::from("--sout=#file{dst=");
        sout.push(job.output_path().as_os_str());
        sout.push("}");

        vec![
            job.input_path().as_os_str().to_os_string(),
            OsString::from("--start-time"),
            OsString::from(job.trim_offset_secs().to_string()),
            sout,
            OsString::from("-Idummy"),
            OsString::from("vlc://quit"),
        ]
    }

    /// Builds the command without running it.
    pub fn build_command(&self, job: &Job) -> Command {
        let mut cmd = Command::new(&self.tool_path);
        cmd.args(Self::arguments(job))
            .current_dir(job.work_dir())
            .stdin(Stdio::null());
        cmd
    }

    fn command_name(&self) -> String {
        self.tool_path.display().to_string()
    }
}

impl JobProcessor for VlcProcessor {
    fn process(&self, job: &Job) -> CoreResult<ProcessOutput> {
        // The tool does not create missing directories in its sout path.
        if let Some(parent) = job.absolute_output().parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CoreError::PathError(format!(
                    "Failed to create output directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut cmd = self.build_command(job);
        log::debug!("Running command: {:?}", cmd);

        let output = cmd
            .output()
            .map_err(|e| command_start_error(self.command_name(), e))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            log::error!(
                "{} failed for {} ({}):\n{}",
                self.command_name(),
                job.input_path().display(),
                output.status,
                combined
            );
            return Err(command_failed_error(self.command_name(), output.status, combined));
        }

        log::info!("Combined output for {}:\n{}", job.input_path().display(), combined);
        Ok(ProcessOutput { combined })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn sample_job() -> Job {
        Job::new("/videos", "a/video.mp4", "out/a/video.mp4", 7).unwrap()
    }

    #[test]
    fn arguments_follow_vlc_cli_layout() {
        let args = VlcProcessor::arguments(&sample_job());
        let expected: Vec<OsString> = [
            "a/video.mp4",
            "--start-time",
            "7",
            "--sout=#file{dst=out/a/video.mp4}",
            "-Idummy",
            "vlc://quit",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths_are_passed_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let input = OsStr::from_bytes(b"clip\xff.mp4");
        let output = Path::new("out").join(OsStr::from_bytes(b"clip\xff.mp4"));
        let job = Job::new("/videos", input, output, 7).unwrap();

        let mut args = VlcProcessor::arguments(&job).into_iter();
        assert_eq!(args.next().unwrap().into_vec(), b"clip\xff.mp4".to_vec());
        let _ = args.next();
        let _ = args.next();
        assert_eq!(
            args.next().unwrap().into_vec(),
            b"--sout=#file{dst=out/clip\xff.mp4}".to_vec()
        );
    }

    #[test]
    fn command_runs_in_work_dir() {
        let processor = VlcProcessor::new("/opt/vlc/vlc");
        let cmd = processor.build_command(&sample_job());
        assert_eq!(cmd.get_program(), "/opt/vlc/vlc");
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/videos")));
        assert_eq!(cmd.get_args().count(), 6);
    }

    #[test]
    fn unspawnable_tool_is_a_start_error() {
        let dir = tempfile::tempdir().unwrap();
        let job = Job::new(dir.path(), "clip.mp4", "out/clip.mp4", 7).unwrap();
        let processor = VlcProcessor::new(dir.path().join("no-such-tool"));

        let result = processor.process(&job);
        assert!(matches!(result, Err(CoreError::CommandStart(_, _))));
        // The output parent is prepared before spawning.
        assert!(dir.path().join("out").is_dir());
    }

    #[test]
    fn unwritable_output_parent_is_a_path_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the output directory should be.
        fs::write(dir.path().join("out"), b"not a directory").unwrap();
        let job = Job::new(dir.path(), "clip.mp4", "out/clip.mp4", 7).unwrap();
        let processor = VlcProcessor::new(dir.path().join("no-such-tool"));

        match processor.process(&job) {
            Err(CoreError::PathError(message)) => {
                assert!(message.contains("Failed to create output directory"));
                assert!(message.contains("out"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_a_command_failure() {
        let dir = tempfile::tempdir().unwrap();
        let job = Job::new(dir.path(), "clip.mp4", "out/clip.mp4", 7).unwrap();
        let processor = VlcProcessor::new("false");

        let result = processor.process(&job);
        assert!(matches!(result, Err(CoreError::CommandFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn output_is_captured_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let job = Job::new(dir.path(), "clip.mp4", "out/clip.mp4", 3).unwrap();
        let processor = VlcProcessor::new("echo");

        let output = processor.process(&job).unwrap();
        assert!(output.combined.contains("--start-time 3"));
        assert!(output.combined.contains("--sout=#file{dst=out/clip.mp4}"));
    }
}
