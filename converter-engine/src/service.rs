//! Asynchronous converter service.
//!
//! A single tokio task owns the [`ConversionEngine`]. Inputs arrive over an
//! `mpsc` channel, every issued request gets a timer task in a `JoinSet`, and
//! each state change is published on a `watch` channel for the presentation
//! layer. Stale timers still fire; the engine rejects their results by id.
//!
//! When the service stops (explicit shutdown or every handle dropped) the
//! `JoinSet` is dropped with it, aborting all outstanding timers.

use converter_types::{ConversionSnapshot, ConverterError, CurrencyCode, RateProvider, RequestId};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use crate::config::ConverterConfig;
use crate::engine::{ConversionEngine, ConverterInput, PendingConversion};

/// Commands that can be sent to the converter service.
#[derive(Debug)]
enum ConverterCommand {
    /// Apply an input and reply with the id of the request it issued.
    Input {
        input: ConverterInput,
        reply: oneshot::Sender<RequestId>,
    },
    /// Stop the service and abort outstanding timers.
    Shutdown,
}

/// Owns the engine until started.
pub struct ConverterService<R: RateProvider> {
    engine: ConversionEngine<R>,
    config: ConverterConfig,
    state_tx: watch::Sender<ConversionSnapshot>,
}

/// Handle for interacting with a running converter service.
#[derive(Clone)]
pub struct ConverterHandle {
    /// Latest published snapshot.
    state_rx: watch::Receiver<ConversionSnapshot>,
    /// Command sender.
    cmd_tx: mpsc::Sender<ConverterCommand>,
}

impl ConverterHandle {
    /// Returns the current snapshot.
    pub fn snapshot(&self) -> ConversionSnapshot {
        self.state_rx.borrow().clone()
    }

    /// Subscribes to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<ConversionSnapshot> {
        self.state_rx.clone()
    }

    /// Sets the amount. Invalid numbers are normalized to zero.
    pub async fn set_amount(&self, value: f64) -> Result<RequestId, ConverterError> {
        self.send(ConverterInput::Amount(value)).await
    }

    /// Sets the amount from raw text. Unparseable text is normalized to zero.
    pub async fn set_amount_input(
        &self,
        text: impl Into<String>,
    ) -> Result<RequestId, ConverterError> {
        self.send(ConverterInput::AmountText(text.into())).await
    }

    pub async fn set_source_currency(
        &self,
        code: CurrencyCode,
    ) -> Result<RequestId, ConverterError> {
        self.send(ConverterInput::Source(code)).await
    }

    pub async fn set_target_currency(
        &self,
        code: CurrencyCode,
    ) -> Result<RequestId, ConverterError> {
        self.send(ConverterInput::Target(code)).await
    }

    /// Swaps source and target currencies.
    pub async fn swap(&self) -> Result<RequestId, ConverterError> {
        self.send(ConverterInput::Swap).await
    }

    /// Re-issues a request for the current inputs.
    pub async fn refresh(&self) -> Result<RequestId, ConverterError> {
        self.send(ConverterInput::Refresh).await
    }

    /// Waits until no request is in flight and returns that snapshot.
    pub async fn settled(&self) -> Result<ConversionSnapshot, ConverterError> {
        let mut rx = self.state_rx.clone();
        let snapshot = rx
            .wait_for(|s| !s.pending)
            .await
            .map_err(|_| ConverterError::ServiceStopped)?;
        Ok(snapshot.clone())
    }

    /// Stops the service and waits for it to release its state.
    pub async fn shutdown(&self) -> Result<(), ConverterError> {
        self.cmd_tx
            .send(ConverterCommand::Shutdown)
            .await
            .map_err(|_| ConverterError::ServiceStopped)?;

        // The sender lives inside the service task; its drop closes the channel.
        let mut rx = self.state_rx.clone();
        while rx.changed().await.is_ok() {}
        Ok(())
    }

    async fn send(&self, input: ConverterInput) -> Result<RequestId, ConverterError> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(ConverterCommand::Input { input, reply })
            .await
            .map_err(|_| ConverterError::ServiceStopped)?;
        rx.await.map_err(|_| ConverterError::ServiceStopped)
    }
}

impl<R: RateProvider + 'static> ConverterService<R> {
    /// Creates a new converter service around `engine`.
    pub fn new(engine: ConversionEngine<R>, config: ConverterConfig) -> Self {
        let (state_tx, _) = watch::channel(engine.snapshot());
        Self {
            engine,
            config,
            state_tx,
        }
    }

    /// Starts the service and returns a handle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self) -> ConverterHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(self.config.command_buffer.max(1));
        let state_rx = self.state_tx.subscribe();

        let handle = ConverterHandle { state_rx, cmd_tx };

        tokio::spawn(async move {
            self.run(cmd_rx).await;
        });

        handle
    }

    /// Main service loop.
    #[instrument(skip_all)]
    async fn run(mut self, mut cmd_rx: mpsc::Receiver<ConverterCommand>) {
        info!(latency = ?self.config.latency, "Converter service started");

        let mut timers: JoinSet<PendingConversion> = JoinSet::new();

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => match cmd {
                    Some(ConverterCommand::Input { input, reply }) => {
                        let pending = self.engine.apply(input);
                        self.schedule(&mut timers, pending);
                        self.publish();
                        // The caller may have given up waiting; the request stands.
                        let _ = reply.send(pending.id());
                    }
                    Some(ConverterCommand::Shutdown) | None => break,
                },
                Some(joined) = timers.join_next(), if !timers.is_empty() => match joined {
                    Ok(pending) => {
                        self.engine.complete(&pending);
                        self.publish();
                    }
                    Err(e) if e.is_cancelled() => {}
                    Err(e) => warn!(error = %e, "conversion timer failed"),
                },
            }
        }

        let outstanding = timers.len();
        timers.abort_all();
        info!(outstanding, "Converter service stopped");
    }

    fn schedule(&self, timers: &mut JoinSet<PendingConversion>, pending: PendingConversion) {
        let latency = self.config.latency;
        debug!(request = %pending.id(), ?latency, "scheduling delivery");
        timers.spawn(async move {
            tokio::time::sleep(latency).await;
            pending
        });
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.engine.snapshot());
    }
}
