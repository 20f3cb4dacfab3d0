// Poll loop - Fetch, derive and push one signal frame per period
use crate::application::sinks::{DisplaySink, ExternalSink};
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::frame::SignalFrame;
use crate::domain::selection::Selection;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};

const DEFAULT_PERIOD: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub period: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Completed(SignalFrame),
    /// Another fetch was still in flight; this tick was dropped.
    Skipped,
}

pub struct PollLoop {
    settings: PollSettings,
    selection: Selection,
    source: Arc<dyn TelemetrySource>,
    display: Arc<dyn DisplaySink>,
    external: Option<Arc<dyn ExternalSink>>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag even if the tick future is dropped mid-fetch.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl PollLoop {
    pub fn new(
        settings: PollSettings,
        selection: Selection,
        source: Arc<dyn TelemetrySource>,
        display: Arc<dyn DisplaySink>,
    ) -> Self {
        Self {
            settings,
            selection,
            source,
            display,
            external: None,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_external_sink(mut self, sink: Arc<dyn ExternalSink>) -> Self {
        self.external = Some(sink);
        self
    }

    /// Run a single fetch-derive-push cycle.
    pub async fn tick(&self) -> TickOutcome {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!("Fetch still in flight, dropping tick");
            return TickOutcome::Skipped;
        }
        let _in_flight = InFlight(&self.in_flight);

        let reading = self.source.fetch(&self.selection).await;
        let frame = SignalFrame::derive(reading, chrono::Utc::now());
        tracing::debug!(
            "Signal reading for train {}: {:?} -> [{}]",
            self.selection.train,
            reading,
            frame.readout
        );

        self.display.show(&frame);

        if let Some(external) = &self.external {
            if let Err(e) = external.send(frame.readout.as_str()).await {
                tracing::warn!("External sink delivery failed: {}", e);
            }
        }

        TickOutcome::Completed(frame)
    }

    /// Tick once per period until `shutdown` resolves.
    ///
    /// The first tick fires one period after start. Ticks are awaited in
    /// sequence and missed periods are skipped, so fetches never overlap.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let period = self.settings.period;
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        tracing::info!(
            "Polling train {} on server {} every {:?}",
            self.selection.train,
            self.selection.server_code,
            period
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = interval.tick() => {
                    tokio::select! {
                        _ = &mut shutdown => break,
                        _ = self.tick() => {}
                    }
                }
            }
        }

        tracing::info!("Poll loop stopped");
    }
}
