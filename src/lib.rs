pub mod assets;
pub mod channels;
pub mod config;
pub mod console;
pub mod dispatch;
pub mod error;
pub mod mention;
pub mod responder;
pub mod sampler;
pub mod sidecar;
pub mod types;

pub use config::Config;

use self::assets::AssetStore;
use self::channels::groupme::GroupMeClient;
use self::dispatch::Dispatcher;
use self::responder::Responder;
use self::sidecar::{CaptionClient, GenerationClient};
use self::types::InboundMessage;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dispatcher: Arc<Dispatcher>,
    pub responder: Arc<Responder>,
}

impl AppState {
    pub fn new(config: Config, dispatcher: Dispatcher, responder: Responder) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
            responder: Arc::new(responder),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub bot_name: String,
}

pub async fn create_app(config: Config, testing: bool) -> anyhow::Result<(AppState, Router)> {
    let bot = config.active_bot(testing)?.clone();
    config.webhook_path()?;
    let assets = AssetStore::load(&config.assets.images_csv)?;
    info!(
        bot_name = %bot.name,
        images = assets.len(),
        testing,
        "loaded bot configuration"
    );

    let http = reqwest::Client::new();
    let sender = GroupMeClient::new(http.clone(), &config.groupme, bot.bot_id.clone());
    let generator = GenerationClient::new(&config.generation)?;
    let captioner = CaptionClient::new(&config.captioning)?;

    let dispatcher = Dispatcher::new(bot.name, Arc::new(assets), config.dispatch.clone());
    let responder = Responder::new(
        http,
        Arc::new(sender),
        Arc::new(generator),
        Arc::new(captioner),
    );

    let state = AppState::new(config, dispatcher, responder);
    let app = build_router(state.clone());
    Ok((state, app))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route(&state.config.groupme.webhook_path, post(receive_message))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        bot_name: state.dispatcher.bot_name().to_string(),
    })
}

async fn receive_message(
    State(state): State<AppState>,
    Json(message): Json<InboundMessage>,
) -> impl IntoResponse {
    let mut rng = StdRng::from_rng(&mut rand::rng());
    let decision = state.dispatcher.dispatch(&message, &mut rng);
    let kind = decision.kind();
    if decision.is_no_op() {
        debug!(sender = %message.sender_name, ?decision, "ignoring inbound message");
    } else {
        info!(
            sender = %message.sender_name,
            sender_id = %message.sender_id,
            decision = kind,
            "dispatched inbound message"
        );
    }

    match state.responder.execute(&decision, &mut rng).await {
        Ok(delivered) => Json(json!({"decision": kind, "delivered": delivered})).into_response(),
        Err(err) => {
            error!("reply for {kind} failed: {err}");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"decision": kind, "error": err.to_string()})),
            )
                .into_response()
        }
    }
}
