use std::{
    sync::{atomic::AtomicBool, Arc},
    time::Duration,
};

use mempool_dashboard::{
    dashboard::{redraw_channel, Dashboard},
    display_state::SharedDisplayState,
    fee_distribution::DetailFetcher,
    input::{Control, InputDispatcher, InputEvent, Key},
    layout::DashboardLayout,
    mempool_client::MempoolSpaceClient,
    mempool_manager::{track_channel, ConfirmedBlock, MempoolStats, ProjectedBlock, UpdateEvent},
};
use ratatui::{backend::TestBackend, Terminal};
use serde_json::json;
use tokio::{runtime::Handle, sync::mpsc};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::helpers::{buffer_text, init_tracing};

struct TestDashboard {
    dashboard: Dashboard<MempoolSpaceClient>,
    display_state: SharedDisplayState,
    terminal: Terminal<TestBackend>,
    track_requests: mpsc::UnboundedReceiver<String>,
    fee_server: MockServer,
}

impl TestDashboard {
    async fn spawn() -> Self {
        Self::spawn_sized(120, 40).await
    }

    async fn spawn_sized(width: u16, height: u16) -> Self {
        init_tracing();
        let fee_server = MockServer::start().await;
        let (redraw_handle, redraw_queue) = redraw_channel();
        let display_state = SharedDisplayState::new(4, redraw_handle.clone());
        let (tracker, track_requests) = track_channel();
        let detail = DetailFetcher::new(
            Arc::new(MempoolSpaceClient::new(fee_server.uri())),
            redraw_handle,
            Handle::current(),
        );
        let dashboard = Dashboard::new(
            display_state.clone(),
            InputDispatcher::new(detail, tracker),
            redraw_queue,
            Arc::new(AtomicBool::new(false)),
            Duration::from_millis(10),
        );
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("Failed to create test terminal");
        Self {
            dashboard,
            display_state,
            terminal,
            track_requests,
            fee_server,
        }
    }

    fn render(&mut self) -> (DashboardLayout, String) {
        let layout = self
            .dashboard
            .render(&mut self.terminal)
            .expect("Failed to render");
        (layout, buffer_text(self.terminal.backend().buffer()))
    }

    fn press(&mut self, key: Key, layout: &DashboardLayout) -> Control {
        self.dashboard.dispatch(InputEvent::Key(key), layout)
    }

    fn type_text(&mut self, text: &str, layout: &DashboardLayout) {
        for c in text.chars() {
            self.press(Key::Char(c), layout);
        }
    }

    /// Renders until `needle` shows up, or gives up after a second.
    async fn render_until(&mut self, needle: &str) -> String {
        for _ in 0..100 {
            let (_, text) = self.render();
            if text.contains(needle) {
                return text;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("{needle:?} never rendered");
    }

    fn load_mempool(&self) {
        let projected = |median_fee: f64| ProjectedBlock {
            block_size: 1_600_000,
            block_weight: 3_996_000,
            n_tx: 3000,
            min_fee: 8.0,
            max_fee: 400.0,
            median_fee,
            ..Default::default()
        };
        self.display_state.apply_all(vec![
            UpdateEvent::Stats(MempoolStats {
                size: 1000,
                bytes: 2_500_000,
                tx_per_second: None,
                vbytes_per_second: None,
            }),
            UpdateEvent::ProjectedBlocks(vec![projected(20.2), projected(10.0)]),
        ]);
    }
}

#[tokio::test]
async fn nothing_but_a_placeholder_is_drawn_before_the_first_update() {
    let mut app = TestDashboard::spawn().await;

    let (layout, text) = app.render();

    assert!(layout.loading);
    assert!(layout.tiles.is_empty());
    assert!(text.contains("Loading mempool data..."));
    assert!(!text.contains("Unconfirmed"));
}

#[tokio::test]
async fn summary_and_projected_tiles_follow_the_display_state() {
    let mut app = TestDashboard::spawn().await;
    app.load_mempool();

    let (layout, text) = app.render();

    assert!(!layout.loading);
    assert_eq!(layout.tiles.len(), 2);
    assert!(text.contains("Unconfirmed: 1000 txs | Mempool size: 2500kB (2 blocks)"));
    assert!(text.contains("~21 sat/vB"));
    assert!(text.contains("in ~10 minutes"));
    assert!(text.contains("in ~20 minutes"));
    assert!(!text.contains("Loading mempool data..."));
}

#[tokio::test]
async fn standard_terminal_keeps_summary_and_confirmed_blocks_visible() {
    let mut app = TestDashboard::spawn_sized(80, 24).await;
    app.load_mempool();
    app.display_state
        .apply_all(vec![UpdateEvent::ConfirmedBlocks(vec![ConfirmedBlock {
            height: 800_000,
            n_tx: 3721,
            size: 1_633_429,
            weight: 3_993_205,
            ..Default::default()
        }])]);

    let (layout, text) = app.render();

    let first_row = text.lines().next().unwrap_or_default();
    assert!(first_row.contains("Unconfirmed: 1000 txs"));
    assert!(text.contains("#800000"));
    assert!(text.contains("3721 transactions"));
    assert!(layout.tiles.iter().all(|tile| tile.area.y >= 1));
}

#[tokio::test]
async fn clicking_a_tile_shows_its_fee_distribution() {
    let mut app = TestDashboard::spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/transactions/projected/0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"fpv": 9.0}, {"fpv": 1.0}, {"fpv": 5.0}])),
        )
        .expect(1)
        .mount(&app.fee_server)
        .await;
    app.load_mempool();
    let (layout, _) = app.render();
    let tile = layout.tiles[0].area;

    let control = app.dashboard.dispatch(
        InputEvent::Click {
            column: tile.x + 2,
            row: tile.y + 2,
        },
        &layout,
    );
    assert_eq!(control, Control::Continue);

    let text = app.render_until("Tx count").await;
    assert!(text.contains("Fee span: 1 - 9 sat/vByte"));
    assert!(text.contains("Tx count: 3 transactions"));
    assert!(text.contains("Median:   ~5 sat/vBytes"));

    let (layout, _) = app.render();
    app.press(Key::Esc, &layout);
    let (_, text) = app.render();
    assert!(!text.contains("Tx count"));
}

#[tokio::test]
async fn failed_fee_request_is_shown_in_the_overlay() {
    let mut app = TestDashboard::spawn().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.fee_server)
        .await;
    app.load_mempool();
    let (layout, _) = app.render();

    app.press(Key::Char('2'), &layout);

    app.render_until("Failed to load fee distribution").await;
}

#[tokio::test]
async fn digit_without_a_drawn_tile_is_ignored() {
    let mut app = TestDashboard::spawn().await;
    app.load_mempool();
    let (layout, _) = app.render();

    app.press(Key::Char('7'), &layout);

    let (_, text) = app.render();
    assert!(!text.contains("Fee distribution"));
    assert!(!text.contains("Loading..."));
}

#[tokio::test]
async fn search_overlay_sends_a_track_request() {
    let mut app = TestDashboard::spawn().await;
    app.load_mempool();
    let (layout, _) = app.render();

    app.press(Key::Char('f'), &layout);
    app.type_text("abc1", &layout);
    app.press(Key::Backspace, &layout);
    let (_, text) = app.render();
    assert!(text.contains("Track transaction (txid)"));
    assert!(text.contains("abc"));
    assert!(!text.contains("abc1"));

    // 'q' is text while the search is open
    assert_eq!(app.press(Key::Char('q'), &layout), Control::Continue);
    app.press(Key::Enter, &layout);

    assert_eq!(app.track_requests.try_recv().as_deref(), Ok("abcq"));
    let (_, text) = app.render();
    assert!(!text.contains("Track transaction (txid)"));
}

#[tokio::test]
async fn quit_keys_stop_the_dashboard() {
    let mut app = TestDashboard::spawn().await;
    let (layout, _) = app.render();

    assert_eq!(app.press(Key::Char('q'), &layout), Control::Quit);
    assert_eq!(app.press(Key::CtrlC, &layout), Control::Quit);
}
