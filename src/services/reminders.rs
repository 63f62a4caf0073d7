//! Periodic membership reminder job
//!
//! The job only schedules work. What a reminder pass does belongs to the
//! [`ReminderProcessor`] the host plugs in.

use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One pass over pending reminders
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReminderProcessor: Send + Sync {
    /// Send due reminders and return how many went out
    async fn process_reminders(&self) -> Result<usize>;
}

/// Processor that has nothing to send
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReminderProcessor;

#[async_trait]
impl ReminderProcessor for NoopReminderProcessor {
    async fn process_reminders(&self) -> Result<usize> {
        Ok(0)
    }
}

/// Runs a [`ReminderProcessor`] on a fixed interval
#[derive(Clone)]
pub struct ReminderJob {
    processor: Arc<dyn ReminderProcessor>,
    interval: Duration,
}

impl ReminderJob {
    pub fn new(processor: Arc<dyn ReminderProcessor>, interval: Duration) -> Self {
        Self {
            processor,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single pass
    pub async fn run_once(&self) -> Result<usize> {
        let sent = self.processor.process_reminders().await?;
        if sent == 0 {
            debug!("Reminder pass finished, nothing due");
        } else {
            info!("Reminder pass sent {} reminders", sent);
        }
        Ok(sent)
    }

    /// Run passes forever; the first pass starts immediately
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        info!("Scheduling reminders every {:?}", self.interval);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);

            loop {
                interval.tick().await;

                if let Err(e) = self.run_once().await {
                    warn!("Reminder pass failed, retrying next tick: {}", e);
                }
            }
        })
    }
}
