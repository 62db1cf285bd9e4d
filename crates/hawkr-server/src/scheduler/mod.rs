//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! recurring expired-deal sweep.

use std::sync::Arc;

use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    pool: PgPool,
    config: Arc<hawkr_core::AppConfig>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_deal_sweep_job(&scheduler, pool, &config.deal_sweep_schedule).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the recurring expired-deal sweep.
///
/// Deals filter on `expires_at` at read time too, so the sweep is purely
/// hygienic: it keeps `is_active` honest and the active-deal index small.
async fn register_deal_sweep_job(
    scheduler: &JobScheduler,
    pool: PgPool,
    schedule: &str,
) -> Result<(), JobSchedulerError> {
    let pool = Arc::new(pool);

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let pool = Arc::clone(&pool);

        Box::pin(async move {
            match hawkr_db::deactivate_expired_deals(&pool).await {
                Ok(0) => tracing::debug!("deal sweep: nothing expired"),
                Ok(count) => tracing::info!(count, "deal sweep: deactivated expired deals"),
                Err(e) => tracing::error!(error = %e, "deal sweep failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
