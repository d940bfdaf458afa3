//! Cron-based scheduler for the daily refresh pass

use crate::config::RefreshSchedule;
use crate::core::refresh::{RefreshError, SignalRefresher};
use chrono::{DateTime, Local};
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid cron expression '{expression}': {reason}")]
    InvalidCron { expression: String, reason: String },
    #[error("scheduler is already running")]
    AlreadyRunning,
}

/// Scheduler that calls `SignalRefresher::refresh` on each cron tick.
///
/// Ticks are evaluated in server local time. The refresher's own guard keeps
/// ticks from overlapping a manual refresh.
pub struct RefreshScheduler {
    refresher: Arc<SignalRefresher>,
    schedule: Schedule,
    expression: String,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl RefreshScheduler {
    /// Create a scheduler from a six-field cron expression
    /// (`sec min hour day-of-month month day-of-week`).
    pub fn new(refresher: Arc<SignalRefresher>, expression: &str) -> Result<Self, SchedulerError> {
        let schedule = Schedule::from_str(expression).map_err(|e| SchedulerError::InvalidCron {
            expression: expression.to_string(),
            reason: e.to_string(),
        })?;

        info!(cron = %expression, "RefreshScheduler: created with cron '{}'", expression);

        Ok(Self {
            refresher,
            schedule,
            expression: expression.to_string(),
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub fn from_config(
        refresher: Arc<SignalRefresher>,
        schedule: &RefreshSchedule,
    ) -> Result<Self, SchedulerError> {
        Self::new(refresher, &schedule.cron_expression())
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Next time the refresh will fire
    pub fn next_run(&self) -> Option<DateTime<Local>> {
        self.schedule.upcoming(Local).next()
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), SchedulerError> {
        let mut handle = self.handle.write().await;
        if handle.is_some() {
            return Err(SchedulerError::AlreadyRunning);
        }

        let refresher = self.refresher.clone();
        let schedule = self.schedule.clone();

        *handle = Some(tokio::spawn(async move {
            info!("RefreshScheduler: started, waiting for cron schedule...");

            loop {
                let Some(next_tick) = schedule.upcoming(Local).next() else {
                    warn!("RefreshScheduler: schedule has no upcoming ticks, stopping");
                    return;
                };

                let wait = (next_tick - Local::now()).to_std().unwrap_or_default();
                info!(next_run = %next_tick, "RefreshScheduler: next refresh at {}", next_tick);
                tokio::time::sleep(wait).await;

                info!("RefreshScheduler: cron tick, starting refresh");
                // Own task per pass so a panic inside it does not end the loop
                let pass = refresher.clone();
                match tokio::spawn(async move { pass.refresh().await }).await {
                    Ok(Ok(snapshot)) => {
                        info!(
                            rows = snapshot.results.len(),
                            "RefreshScheduler: refresh completed"
                        );
                    }
                    Ok(Err(RefreshError::AlreadyRunning)) => {
                        warn!("RefreshScheduler: previous refresh still running, tick skipped");
                    }
                    Ok(Err(e)) => {
                        error!(error = %e, "RefreshScheduler: refresh failed");
                    }
                    Err(e) => {
                        error!(error = %e, "RefreshScheduler: refresh pass aborted");
                    }
                }
            }
        }));

        info!("RefreshScheduler: started successfully");
        Ok(())
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("RefreshScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.is_some()
    }
}
