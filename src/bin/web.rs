//! Kiosk tournament service: REST API over the bracket engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, INACTIVITY_HOURS (idle tournaments are archived).

use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_kiosk::{
    read_signups, BracketSide, MatchLocation, PlayerId, TournamentEngine, TournamentError,
    TournamentFormat, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

/// Per-tournament entry: engine + last activity time (for auto-cleanup).
struct TournamentEntry {
    engine: TournamentEngine,
    last_activity: Instant,
}

/// Registry of live tournaments. Each tournament has its own lock so mutations
/// are serialized per tournament without blocking the others.
type Registry = RwLock<HashMap<TournamentId, Arc<Mutex<TournamentEntry>>>>;
type AppState = Data<Registry>;

/// Server settings read from the environment.
#[derive(Clone, Debug)]
struct ServerConfig {
    host: String,
    port: u16,
    inactivity_timeout: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let hours: u64 = std::env::var("INACTIVITY_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(12);
        Self {
            host,
            port,
            inactivity_timeout: Duration::from_secs(hours * 3600),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    format: TournamentFormat,
    capacity: usize,
    #[serde(default)]
    players: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct ImportTournamentBody {
    name: String,
    format: TournamentFormat,
    capacity: usize,
    signups_csv: String,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    id: PlayerId,
}

#[derive(Deserialize)]
struct ReportResultBody {
    #[serde(default)]
    side: BracketSide,
    round: usize,
    index: usize,
    winner: PlayerId,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

fn bad_request(message: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message.to_string() }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Store a freshly created engine and return its tournament.
fn register(state: &AppState, engine: TournamentEngine) -> HttpResponse {
    let body = HttpResponse::Ok().json(engine.tournament());
    let id = engine.tournament().id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.insert(
        id,
        Arc::new(Mutex::new(TournamentEntry {
            engine,
            last_activity: Instant::now(),
        })),
    );
    body
}

/// Run `action` against one tournament under its own lock. Touching it refreshes last_activity.
fn with_engine<F>(state: &AppState, id: TournamentId, action: F) -> HttpResponse
where
    F: FnOnce(&mut TournamentEngine) -> Result<HttpResponse, TournamentError>,
{
    let entry = match state.read() {
        Ok(g) => g.get(&id).cloned(),
        Err(_) => return lock_error(),
    };
    let Some(entry) = entry else {
        return not_found();
    };
    let mut entry = match entry.lock() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    entry.last_activity = Instant::now();
    match action(&mut entry.engine) {
        Ok(response) => response,
        Err(e) => {
            log::info!("Rejected request for {}: {}", id, e);
            bad_request(e)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-kiosk",
    })
}

/// Create a tournament from an explicit roster.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    match TournamentEngine::create(body.name, body.format, body.capacity, &body.players) {
        Ok(engine) => register(&state, engine),
        Err(e) => bad_request(e),
    }
}

/// Create a tournament from a sign-up sheet (CSV with event_name,gamertag).
#[post("/api/tournaments/import")]
async fn api_import_tournament(state: AppState, body: Json<ImportTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let players = match read_signups(body.signups_csv.as_bytes(), &body.name) {
        Ok(players) => players,
        Err(e) => return bad_request(e),
    };
    match TournamentEngine::create(body.name, body.format, body.capacity, &players) {
        Ok(engine) => register(&state, engine),
        Err(e) => bad_request(e),
    }
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_engine(&state, path.id, |engine| {
        Ok(HttpResponse::Ok().json(engine.tournament()))
    })
}

/// Rounds in display order (winners and losers interleaved, then grand finals).
#[get("/api/tournaments/{id}/rounds")]
async fn api_get_rounds(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_engine(&state, path.id, |engine| {
        Ok(HttpResponse::Ok().json(engine.presentation_rounds()))
    })
}

/// Seat a player in the first open slot (before any result).
#[post("/api/tournaments/{id}/players")]
async fn api_add_player(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    with_engine(&state, path.id, |engine| {
        engine.add_player(body.id.trim())?;
        Ok(HttpResponse::Ok().json(engine.tournament()))
    })
}

/// Regenerate the schedule from the roster (before any result).
#[post("/api/tournaments/{id}/build")]
async fn api_build(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_engine(&state, path.id, |engine| {
        engine.build()?;
        Ok(HttpResponse::Ok().json(engine.tournament()))
    })
}

/// Report the winner of one match.
#[put("/api/tournaments/{id}/results")]
async fn api_report_result(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ReportResultBody>,
) -> HttpResponse {
    let at = MatchLocation::new(body.side, body.round, body.index);
    with_engine(&state, path.id, |engine| {
        engine.report_result(at, &body.winner)?;
        Ok(HttpResponse::Ok().json(engine.tournament()))
    })
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_tournament)
        .service(api_import_tournament)
        .service(api_get_tournament)
        .service(api_get_rounds)
        .service(api_add_player)
        .service(api_build)
        .service(api_report_result);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state: AppState = Data::new(RwLock::new(HashMap::new()));

    // Background task: every 30 minutes, archive tournaments idle past the timeout
    let state_cleanup = state.clone();
    let timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| {
                entry
                    .lock()
                    .map(|e| e.last_activity.elapsed() < timeout)
                    .unwrap_or(false)
            });
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Archived {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    fn app_state() -> AppState {
        Data::new(RwLock::new(HashMap::new()))
    }

    #[actix_web::test]
    async fn health_reports_ok() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["ok"], true);
    }

    #[actix_web::test]
    async fn create_report_and_finish_single_elimination() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/tournaments")
            .set_json(serde_json::json!({
                "name": "Cafe Chess Masters",
                "format": "single_elimination",
                "capacity": 2,
                "players": ["A", "B"]
            }))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["state"], "rounds_generated");
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/api/tournaments/{id}/results"))
            .set_json(serde_json::json!({ "round": 0, "index": 0, "winner": "B" }))
            .to_request();
        let done: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(done["state"], "completed");
        assert_eq!(done["champion"], "B");

        let req = test::TestRequest::put()
            .uri(&format!("/api/tournaments/{id}/results"))
            .set_json(serde_json::json!({ "round": 0, "index": 0, "winner": "B" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn bad_capacity_is_a_bad_request() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/tournaments")
            .set_json(serde_json::json!({
                "name": "Odd Cup",
                "format": "single_elimination",
                "capacity": 6
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn import_reads_signups_for_the_event() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/tournaments/import")
            .set_json(serde_json::json!({
                "name": "Blitz Night",
                "format": "round_robin",
                "capacity": 4,
                "signups_csv": "event_name,gamertag\nBlitz Night,rook\nPoker Night,ace\nBlitz Night,pawn\n"
            }))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let roster = created["roster"].as_array().unwrap();
        assert_eq!(roster.len(), 4);
        assert_eq!(roster[0]["value"], "rook");
        assert_eq!(roster[1]["value"], "pawn");
        assert_eq!(roster[2]["kind"], "open");
    }

    #[actix_web::test]
    async fn unknown_tournament_is_not_found() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri(&format!("/api/tournaments/{}", uuid::Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
