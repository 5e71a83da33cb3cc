use crate::gui_bridge::model::{PointerInput, VisualizationModel};
use anyhow::Result;
use log::{error, info, warn};
use scanradar::scan_interface::records_from_value;
use scanradar::selection::PointerOutcome;
use scanradar::{DebugSnapshot, ScanRecord};
use serde_json::{json, Value};
use std::{
    net::SocketAddr,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
    thread,
    time::Instant,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

pub fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

type SharedModel = Arc<RwLock<VisualizationModel>>;

fn read_model(state: &SharedModel) -> RwLockReadGuard<'_, VisualizationModel> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_model(state: &SharedModel) -> RwLockWriteGuard<'_, VisualizationModel> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// Bridge that owns the radar engine and exposes it over HTTP.
pub struct GuiBridge {
    state: SharedModel,
    started: Instant,
}

impl GuiBridge {
    pub fn new(model: VisualizationModel) -> Self {
        Self {
            state: Arc::new(RwLock::new(model)),
            started: Instant::now(),
        }
    }

    fn elapsed_ms(started: Instant) -> f64 {
        started.elapsed().as_secs_f64() * 1000.0
    }

    /// Serves `GET /records`, `GET /snapshot`, `POST /scan` and `POST /pointer`
    /// on a dedicated thread.
    pub fn spawn_server(&self, address: SocketAddr) {
        let state = self.state.clone();
        let started = self.started;
        let state_filter = warp::any().map(move || state.clone());

        let records_route = warp::path("records")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: SharedModel| warp::reply::json(&read_model(&state).engine.records()));

        let snapshot_route = warp::path("snapshot")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: SharedModel| warp::reply::json(&read_model(&state).snapshot()));

        let scan_route = warp::path("scan")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .map(|payload: Value, state: SharedModel| match records_from_value(&payload) {
                Ok(records) => {
                    let count = records.len();
                    let mut guard = write_model(&state);
                    guard.engine.load_records(records);
                    guard.status = format!("{} scan records loaded", count);
                    let groups = guard.engine.groups().len();
                    warp::reply::with_status(
                        warp::reply::json(&json!({"status": "ok", "records": count, "groups": groups})),
                        StatusCode::OK,
                    )
                }
                Err(err) => {
                    warn!("scan payload rejected: {}", err);
                    warp::reply::with_status(
                        warp::reply::json(&json!({"status": "error", "message": err.to_string()})),
                        StatusCode::BAD_REQUEST,
                    )
                }
            });

        let pointer_route = warp::path("pointer")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .map(move |input: PointerInput, state: SharedModel| {
                let now_ms = Self::elapsed_ms(started);
                let mut guard = write_model(&state);
                guard.engine.tick(now_ms);
                let outcome = guard.engine.handle_pointer(input.x, input.y, now_ms);
                warp::reply::json(&json!({
                    "outcome": outcome_label(outcome),
                    "selected": guard.engine.selected_group().map(|group| group.key.clone()),
                }))
            });

        thread::spawn(move || {
            let routes = records_route
                .or(snapshot_route)
                .or(scan_route)
                .or(pointer_route);
            match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime.block_on(async move {
                    info!("HTTP bridge listening on {}", address);
                    warp::serve(routes).run(address).await;
                }),
                Err(err) => error!("failed to build bridge runtime: {}", err),
            }
        });
    }

    pub fn publish(&self, records: Vec<ScanRecord>) -> Result<()> {
        let mut guard = write_model(&self.state);
        guard.engine.load_records(records);
        guard.engine.tick(Self::elapsed_ms(self.started));
        guard.status = format!(
            "{} records / {} access points",
            guard.engine.records().len(),
            guard.engine.groups().len()
        );
        println!("[GUI] {}", guard.status);
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    pub fn snapshot(&self) -> DebugSnapshot {
        read_model(&self.state).snapshot()
    }

    pub fn pointer(&self, x: f64, y: f64) -> PointerOutcome {
        let now_ms = Self::elapsed_ms(self.started);
        let mut guard = write_model(&self.state);
        guard.engine.tick(now_ms);
        guard.engine.handle_pointer(x, y, now_ms)
    }
}

fn outcome_label(outcome: PointerOutcome) -> &'static str {
    match outcome {
        PointerOutcome::Selected(_) => "selected",
        PointerOutcome::Cleared => "cleared",
        PointerOutcome::Unchanged => "unchanged",
        PointerOutcome::Ignored => "ignored",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::WorkflowConfig;
    use crate::workflow::runner::Runner;

    fn bridge() -> GuiBridge {
        let runner = Runner::new(WorkflowConfig::from_args(false, 1, 0, 0));
        GuiBridge::new(VisualizationModel::new(runner.build_engine().unwrap()))
    }

    #[test]
    fn gui_bridge_updates_state() {
        let gui = bridge();
        gui.publish(vec![
            ScanRecord::new("Home", "AA:BB:CC:11:22:01", -50, 1),
            ScanRecord::new("Home", "AA:BB:CC:11:22:02", -65, 6),
        ])
        .unwrap();
        let snapshot = gui.snapshot();
        assert_eq!(snapshot.record_count, 2);
        assert_eq!(snapshot.groups.len(), 1);
    }

    #[test]
    fn gui_bridge_pointer_miss_records_coordinates() {
        let gui = bridge();
        gui.publish(vec![ScanRecord::new("Home", "AA:BB:CC:11:22:01", -50, 1)])
            .unwrap();
        assert_eq!(gui.pointer(-1_000.0, -1_000.0), PointerOutcome::Unchanged);
        let pointer = gui.snapshot().last_pointer.unwrap();
        assert_eq!(pointer.x, -1_000.0);
    }

    #[test]
    fn outcome_labels_are_stable() {
        assert_eq!(outcome_label(PointerOutcome::Selected(3)), "selected");
        assert_eq!(outcome_label(PointerOutcome::Ignored), "ignored");
    }
}
