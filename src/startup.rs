use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use signal_hook::flag;
use tokio::{runtime::Handle, sync::mpsc, task::JoinHandle};

use crate::{
    configuration::Settings,
    dashboard::{redraw_channel, Dashboard},
    display_state::SharedDisplayState,
    fee_distribution::DetailFetcher,
    input::InputDispatcher,
    mempool_client::MempoolSpaceClient,
    mempool_manager::{track_channel, MempoolManager, StreamError},
};

const STREAM_SHUTDOWN: Duration = Duration::from_millis(500);

/// Wires the stream task, the detail fetcher and the terminal loop together.
pub struct Application {
    mempool_manager: MempoolManager,
    track_requests: mpsc::UnboundedReceiver<String>,
    dashboard: Dashboard<MempoolSpaceClient>,
    kill_signal: Arc<AtomicBool>,
}

impl Application {
    /// Must be called from within a tokio runtime.
    pub fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let (redraw_handle, redraw_queue) = redraw_channel();
        let display_state = SharedDisplayState::new(
            configuration.dashboard.blocks_to_display,
            redraw_handle.clone(),
        );
        let kill_signal = Arc::new(AtomicBool::new(false));
        let (tracker, track_requests) = track_channel();

        let mempool_manager = MempoolManager::build(
            &configuration.application,
            display_state.clone(),
            kill_signal.clone(),
        );
        let client = MempoolSpaceClient::new(configuration.application.api_base_url());
        let detail = DetailFetcher::new(Arc::new(client), redraw_handle, Handle::try_current()?);
        let dispatcher = InputDispatcher::new(detail, tracker);
        let dashboard = Dashboard::new(
            display_state,
            dispatcher,
            redraw_queue,
            kill_signal.clone(),
            configuration.dashboard.tick_rate(),
        );

        Ok(Self {
            mempool_manager,
            track_requests,
            dashboard,
            kill_signal,
        })
    }

    /// Runs until the user quits, SIGTERM arrives or the update stream fails.
    /// A stream failure tears the UI down and is returned.
    pub async fn run_until_stopped(self) -> Result<(), anyhow::Error> {
        flag::register(signal_hook::consts::SIGTERM, Arc::clone(&self.kill_signal))?;

        let mut stream = spawn_mempool_stream(
            self.mempool_manager,
            self.track_requests,
            self.kill_signal.clone(),
        );

        let dashboard = self.dashboard;
        let ui_result = tokio::task::spawn_blocking(move || dashboard.run()).await?;

        self.kill_signal.store(true, Ordering::Relaxed);
        // the stream only sees the kill signal between messages
        let stream_result = match tokio::time::timeout(STREAM_SHUTDOWN, &mut stream).await {
            Ok(joined) => joined,
            Err(_) => {
                stream.abort();
                Ok(Ok(()))
            }
        };
        match stream_result {
            Ok(Err(e)) => return Err(e.into()),
            Err(e) if e.is_panic() => return Err(e.into()),
            _ => {}
        }
        Ok(ui_result?)
    }
}

/// Runs the update stream on its own task. However the task ends, including
/// by panicking, the kill signal is raised so the dashboard stops too.
pub fn spawn_mempool_stream(
    mempool_manager: MempoolManager,
    track_requests: mpsc::UnboundedReceiver<String>,
    kill_signal: Arc<AtomicBool>,
) -> JoinHandle<Result<(), StreamError>> {
    tokio::spawn(async move {
        let _raise_on_exit = RaiseOnDrop(kill_signal);
        let result = mempool_manager.run(track_requests).await;
        if let Err(e) = &result {
            tracing::error!(error.cause_chain = ?e, "mempool stream ended");
        }
        result
    })
}

struct RaiseOnDrop(Arc<AtomicBool>);

impl Drop for RaiseOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}
