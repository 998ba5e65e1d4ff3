//! Monitor Loop
//!
//! Fixed-cadence driver: perturbs the vitals, runs the assessment pipeline,
//! and hands the record to storage and notification. The pipeline stays
//! stateless; this loop owns the schedule and its own cancellation flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::constants;
use crate::logic::enrich::{GeminiClient, GeminiConfig};
use crate::logic::notify;
use crate::logic::pipeline::RiskPipeline;
use crate::logic::storage::{self, HistoryItem};
use crate::logic::vitals::{VitalsSimulator, VitalsSnapshot};

/// Monitor configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Seconds between assessments
    pub interval_secs: u64,
    pub enabled: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: constants::get_monitor_interval(),
            enabled: constants::is_monitor_enabled(),
        }
    }
}

/// Handle to a running monitor loop
pub struct MonitorHandle {
    stop: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl MonitorHandle {
    /// Signal the loop to stop and wait for it to finish.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }

    /// Block until the loop exits on its own.
    pub fn join(mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Start the monitor loop on a dedicated thread.
pub fn start(config: MonitorConfig) -> MonitorHandle {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = stop.clone();

    let thread = thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime for monitor loop");

        rt.block_on(async move {
            run_loop(config, flag).await;
        });
    });

    MonitorHandle {
        stop,
        thread: Some(thread),
    }
}

async fn run_loop(config: MonitorConfig, stop: Arc<AtomicBool>) {
    let pipeline = RiskPipeline::new(GeminiClient::new(GeminiConfig::default()));
    let mut simulator = VitalsSimulator::new(VitalsSnapshot::default());

    log::info!(
        "Monitor loop started (interval: {}s, patient: {})",
        config.interval_secs,
        simulator.current().patient_id
    );

    while !stop.load(Ordering::Relaxed) {
        let snapshot = simulator.tick();
        let record = pipeline.assess(&snapshot).await;

        log::info!(
            "Assessment: {} (HR {}, temp {:.1}, BMI {:.1}, source {})",
            record.predicted_risk,
            snapshot.heart_rate,
            snapshot.body_temperature,
            record.bmi,
            record.source.as_str()
        );

        storage::append_history(HistoryItem::new(&snapshot, record.clone()));

        if record.alert {
            storage::append_alert(record.clone());
            notify::dispatch(&record);
        }

        sleep_interruptible(config.interval_secs, &stop).await;
    }

    log::info!("Monitor loop stopped");
}

/// Sleep the tick interval in short slices so stop stays responsive.
async fn sleep_interruptible(secs: u64, stop: &AtomicBool) {
    let mut remaining_ms = secs.saturating_mul(1000);
    while remaining_ms > 0 && !stop.load(Ordering::Relaxed) {
        let slice = remaining_ms.min(500);
        tokio::time::sleep(Duration::from_millis(slice)).await;
        remaining_ms -= slice;
    }
}
