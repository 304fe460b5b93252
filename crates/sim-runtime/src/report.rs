//! Job summaries handed back to the scheduler.

use std::fmt;

/// Human-readable outcome of one period job.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobReport {
    /// Job name, e.g. "market cycle".
    pub job: &'static str,
    /// Entities mutated this run.
    pub processed: usize,
    /// Entities skipped by the idempotency guard or a data-integrity check.
    pub skipped: usize,
    /// News records published this run.
    pub news_published: usize,
}

impl JobReport {
    pub fn new(job: &'static str) -> Self {
        Self {
            job,
            ..Self::default()
        }
    }
}

impl fmt::Display for JobReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} processed, {} skipped",
            self.job, self.processed, self.skipped
        )?;
        if self.news_published > 0 {
            write!(f, ", {} news published", self.news_published)?;
        }
        Ok(())
    }
}
