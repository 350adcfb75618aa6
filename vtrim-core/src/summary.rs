//! Summary of a completed run.

use std::fmt;
use std::time::Duration;

use crate::pipeline::TraversalStats;

/// Outcome of a run that completed without a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Counters from the traversal
    pub traversal: TraversalStats,
    /// Jobs completed by the workers
    pub processed: usize,
    /// Workers that ran
    pub workers: usize,
    /// Wall time of the whole run
    pub elapsed: Duration,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Run finished in {}: {} queued, {} processed by {} workers, {} skipped \
             ({} wrong extension, {} inside output, {} already done)",
            format_duration(self.elapsed),
            self.traversal.queued,
            self.processed,
            self.workers,
            self.traversal.skipped(),
            self.traversal.wrong_extension,
            self.traversal.inside_output,
            self.traversal.already_exists,
        )
    }
}

/// Formats a duration as `HH:MM:SS`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_duration(Duration::from_secs(59)), "00:00:59");
        assert_eq!(format_duration(Duration::from_secs(3661)), "01:01:01");
        assert_eq!(format_duration(Duration::from_millis(1999)), "00:00:01");
    }

    #[test]
    fn summary_display_mentions_counts() {
        let summary = RunSummary {
            traversal: TraversalStats {
                directories: 2,
                wrong_extension: 3,
                inside_output: 1,
                already_exists: 4,
                queued: 5,
            },
            processed: 5,
            workers: 2,
            elapsed: Duration::from_secs(75),
        };
        let text = summary.to_string();
        assert!(text.contains("00:01:15"));
        assert!(text.contains("5 queued"));
        assert!(text.contains("8 skipped"));
    }
}
