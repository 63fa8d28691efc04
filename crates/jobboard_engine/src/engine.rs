use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use board_logging::{board_debug, board_error, board_info};

use crate::search::{JobSearchService, ReqwestJobSearch, SearchSettings};
use crate::timer::PollTimer;
use crate::{EngineEvent, RequestId, SearchError, SearchRequest};

/// Receives engine events on the runtime's threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Search {
        request_id: RequestId,
        request: SearchRequest,
    },
    StartTimer {
        period: Duration,
    },
    StopTimer,
    Shutdown,
}

/// Owns the async runtime thread. Dropping the handle shuts it down.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    worker: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(settings: SearchSettings, sink: Arc<dyn EventSink>) -> Result<Self, SearchError> {
        let service = Arc::new(ReqwestJobSearch::new(settings)?);
        Ok(Self::with_service(service, sink))
    }

    pub fn with_service(service: Arc<dyn JobSearchService>, sink: Arc<dyn EventSink>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let worker = thread::spawn(move || run_engine(service, sink, cmd_rx));
        Self {
            cmd_tx,
            worker: Some(worker),
        }
    }

    pub fn search(&self, request_id: RequestId, request: SearchRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Search {
            request_id,
            request,
        });
    }

    /// Starts the poll timer, replacing any running one.
    pub fn start_timer(&self, period: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::StartTimer { period });
    }

    pub fn stop_timer(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StopTimer);
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_engine(
    service: Arc<dyn JobSearchService>,
    sink: Arc<dyn EventSink>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            board_error!("Failed to start engine runtime: {}", err);
            return;
        }
    };

    let mut timer: Option<PollTimer> = None;
    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Search {
                request_id,
                request,
            } => {
                let service = service.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    let result = service.search(&request).await;
                    sink.emit(EngineEvent::SearchCompleted { request_id, result });
                });
            }
            EngineCommand::StartTimer { period } => {
                board_debug!("Poll timer every {:?}", period);
                let sink = sink.clone();
                timer = Some(PollTimer::spawn(runtime.handle(), period, move || {
                    sink.emit(EngineEvent::TimerFired)
                }));
            }
            EngineCommand::StopTimer => {
                timer = None;
            }
            EngineCommand::Shutdown => break,
        }
    }

    drop(timer);
    runtime.shutdown_timeout(Duration::from_secs(1));
    board_info!("Engine stopped");
}
