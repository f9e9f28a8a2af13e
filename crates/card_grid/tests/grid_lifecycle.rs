use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{extract::Path, extract::State, http::StatusCode, routing::get, Json, Router};
use card_grid::{render::Renderer, CardController, GridPhase, LoadSummary};
use entity_client::{EntityFetcher, HttpEntityApi};
use serde_json::{json, Value};
use shared::domain::NormalizedEntity;
use tokio::net::TcpListener;
use url::Url;

#[derive(Default)]
struct SlotBoard {
    backs: Vec<Option<String>>,
    revealed: Vec<bool>,
    loading: bool,
    grid: bool,
}

impl Renderer for SlotBoard {
    type Handle = usize;

    fn create_placeholder(&mut self, index: usize) -> Option<usize> {
        self.backs.push(None);
        self.revealed.push(false);
        Some(index)
    }

    fn render_bound(&mut self, handle: &usize, entity: &NormalizedEntity) {
        self.backs[*handle] = Some(entity.name.clone());
    }

    fn set_revealed_visual(&mut self, handle: &usize, revealed: bool) {
        self.revealed[*handle] = revealed;
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.loading = visible;
    }

    fn set_grid_visible(&mut self, visible: bool) {
        self.grid = visible;
    }
}

async fn handle_pokemon(
    State(failures_left): State<Arc<AtomicUsize>>,
    Path(id): Path<u32>,
) -> Result<Json<Value>, StatusCode> {
    let failing = failures_left
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
        .is_ok();
    if failing {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(json!({
        "id": id,
        "name": "ho-oh",
        "height": 38,
        "weight": 1990,
        "sprites": { "front_default": "https://img/250.png" },
        "types": [{ "slot": 1, "type": { "name": "fire" } }],
        "abilities": [{ "ability": { "name": "pressure" }, "is_hidden": false, "slot": 1 }],
        "stats": [{ "base_stat": 106, "stat": { "name": "hp" } }]
    })))
}

async fn spawn_server(failures: usize) -> Url {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/pokemon/:id", get(handle_pokemon))
        .with_state(Arc::new(AtomicUsize::new(failures)));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Url::parse(&format!("http://{addr}")).expect("url")
}

#[tokio::test]
async fn grid_lifecycle_binds_remote_entities_and_flips_cards() {
    let base_url = spawn_server(0).await;
    let fetcher = EntityFetcher::new(HttpEntityApi::new(base_url), 1);
    let mut controller = CardController::new(SlotBoard::default());

    controller.initialize(4);
    assert!(controller.renderer().loading);
    assert!(!controller.renderer().grid);

    let summary = controller.load_entities(&fetcher).await.expect("load");

    assert_eq!(summary, LoadSummary { bound: 4, unbound: 0 });
    assert_eq!(controller.phase(), GridPhase::Populated);
    assert!(!controller.renderer().loading);
    assert!(controller.renderer().grid);
    assert!(controller
        .renderer()
        .backs
        .iter()
        .all(|back| back.as_deref() == Some("Ho oh")));

    let entity = controller
        .slot(3)
        .and_then(|slot| slot.bound_entity())
        .expect("bound");
    assert_eq!(entity.abilities, vec!["Pressure"]);
    assert_eq!(entity.stats.hp, 106);
    assert_eq!(entity.height, 3.8);
    assert_eq!(entity.weight, 199.0);

    controller.toggle(2);
    assert_eq!(controller.renderer().revealed, [false, false, true, false]);
    controller.toggle(2);
    assert_eq!(controller.renderer().revealed, [false; 4]);
}

#[tokio::test]
async fn grid_survives_remote_failures() {
    let base_url = spawn_server(usize::MAX).await;
    let fetcher = EntityFetcher::new(HttpEntityApi::new(base_url), 1008);
    let mut controller = CardController::new(SlotBoard::default());

    controller.initialize(12);
    let summary = controller.load_entities(&fetcher).await.expect("load");

    assert_eq!(summary, LoadSummary { bound: 0, unbound: 12 });
    assert_eq!(controller.phase(), GridPhase::Populated);
    assert!(controller.renderer().backs.iter().all(Option::is_none));
    assert!(controller.renderer().grid);
}
