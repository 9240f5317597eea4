//! Run a job once a day at a fixed local time.

use crate::timekit::now_local;
use crate::utils::error::{KitError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveTime, TimeZone};
use std::future::Future;
use tracing::{info, warn};

#[async_trait]
pub trait Job: Send + Sync {
    async fn run(&self) -> anyhow::Result<()>;
}

#[async_trait]
impl<F, Fut> Job for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn run(&self) -> anyhow::Result<()> {
        self().await
    }
}

fn daily_time(hour: u32, min: u32, sec: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_opt(hour, min, sec).ok_or_else(|| {
        KitError::invalid_argument(format!("invalid time of day {:02}:{:02}:{:02}", hour, min, sec))
    })
}

/// The first `hour:min:sec` strictly after `now`, in the zone of `now`.
///
/// A local time skipped by a DST jump is tried again on the following day.
pub fn next_daily_run<Tz: TimeZone>(
    now: &DateTime<Tz>,
    hour: u32,
    min: u32,
    sec: u32,
) -> Result<DateTime<Tz>> {
    let at = daily_time(hour, min, sec)?;
    let tz = now.timezone();
    let today = now.date_naive();

    for days in 0..3 {
        let Some(date) = today.checked_add_days(Days::new(days)) else {
            break;
        };
        if let Some(candidate) = tz.from_local_datetime(&date.and_time(at)).earliest() {
            if candidate > *now {
                return Ok(candidate);
            }
        }
    }
    Err(KitError::invalid_argument(format!(
        "no run time found after {:?}",
        now.naive_local()
    )))
}

/// Run `job` every day at `hour:min:sec` in the [`crate::timekit`] offset.
///
/// Only returns on an invalid time. A failing run is logged and the
/// schedule continues.
pub async fn cron_job_daily<J: Job>(job: J, hour: u32, min: u32, sec: u32) -> Result<()> {
    daily_time(hour, min, sec)?;
    let mut after = now_local();
    loop {
        let next = next_daily_run(&after, hour, min, sec)?;
        let wait = (next - now_local()).to_std().unwrap_or_default();
        info!("Next daily run at {} (in {}s)", next, wait.as_secs());

        tokio::time::sleep(wait).await;
        if let Err(e) = job.run().await {
            warn!("Daily job failed: {:#}", e);
        }
        // A timer that fires early must not repeat the same run.
        after = now_local().max(next);
    }
}
