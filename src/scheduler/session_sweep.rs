use dioxus_logger::tracing;
use engine::Coordinator;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::error::AppError;

/// Starts the idle session sweep scheduler
///
/// On every tick the sweep closes sessions nobody touched for longer than
/// `max_idle`. The coordinator announces each closed session over its notice
/// channel, so the job itself only logs.
///
/// # Arguments
/// - `coordinator`: Coordinator owning the sessions
/// - `schedule`: Cron expression with seconds, e.g. `0 * * * * *` for every minute
/// - `max_idle`: How long a session may sit untouched
pub async fn start_scheduler(
    coordinator: Coordinator,
    schedule: &str,
    max_idle: chrono::Duration,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let coordinator = coordinator.clone();

        Box::pin(async move {
            let released = coordinator.sweep(max_idle).await;
            if released > 0 {
                tracing::info!("Session sweep released {} idle sessions", released);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Session sweep scheduler started ({})", schedule);

    Ok(())
}
