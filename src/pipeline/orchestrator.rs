// 全ジョブ実行

use rayon::prelude::*;

use crate::error::SheetError;
use crate::pipeline::job_runner::{JobConfig, JobResult, run_job};

/// Run multiple jobs in parallel, collecting results in job order.
/// One job failure does NOT prevent other jobs from running.
///
/// `workers == 0` uses rayon's global pool.
pub fn run_all_jobs(
    jobs: &[JobConfig],
    workers: usize,
) -> crate::error::Result<Vec<crate::error::Result<JobResult>>> {
    if workers == 0 {
        return Ok(jobs.par_iter().map(run_job).collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| SheetError::config(format!("Failed to build worker pool: {e}")))?;
    Ok(pool.install(|| jobs.par_iter().map(run_job).collect()))
}
