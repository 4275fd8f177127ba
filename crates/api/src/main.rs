use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use runway_core::domain::analysis::AnalysisReport;
use runway_core::domain::confidence::ConfidenceExplanation;
use runway_core::domain::contract::{normalize_subject_id, AnalysisRequest};
use runway_core::domain::input::{DataSharingTier, FounderInput};
use runway_core::domain::plan::ActionPlan;
use runway_core::domain::route::{FundingRoute, RouteResult};
use runway_core::domain::valuation::{DcfInput, ValuationMethodResult, ValuationRequest};
use runway_core::engine;
use runway_core::storage::runs::{self, RunKind, StoredRun};

const DEFAULT_HISTORY_LIMIT: i64 = 20;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = runway_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();
    let pool: Option<PgPool> = match settings.require_database_url() {
        Ok(db_url) => match sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await
        {
            Ok(pool) => match runway_core::storage::migrate(&pool).await {
                Ok(()) => Some(pool),
                Err(e) => {
                    sentry_anyhow::capture_anyhow(&e);
                    tracing::error!(error = %e, "db migrations failed; starting API in degraded mode");
                    None
                }
            },
            Err(e) => {
                let err = anyhow::Error::new(e);
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %err, "db connect failed; starting API in degraded mode");
                None
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "DATABASE_URL missing; starting API in degraded mode");
            None
        }
    };

    let app = router(AppState { pool }).layer(TraceLayer::new_for_http());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/route", post(post_route))
        .route("/valuations", post(post_valuation))
        .route("/valuations/dcf/validate", post(post_validate_dcf))
        .route("/confidence", post(post_confidence))
        .route("/action-plan", post(post_action_plan))
        .route("/analyses", post(post_analysis))
        .route("/analyses/:subject_id/latest", get(get_latest_analysis))
        .route("/analyses/:subject_id", get(get_analysis_history))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    pool: Option<PgPool>,
}

#[derive(Debug)]
enum ApiError {
    BadRequest(Vec<String>),
    Unavailable,
    NotFound,
    Internal(anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    errors: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { errors })).into_response()
            }
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE.into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Internal(e) => {
                sentry_anyhow::capture_anyhow(&e);
                tracing::error!(error = %e, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl ApiError {
    fn contract(e: anyhow::Error) -> Self {
        ApiError::BadRequest(vec![format!("{e:#}")])
    }
}

async fn post_route(Json(input): Json<FounderInput>) -> Json<RouteResult> {
    Json(engine::compute_route(&input))
}

async fn post_valuation(
    Json(request): Json<ValuationRequest>,
) -> Result<Json<ValuationMethodResult>, ApiError> {
    if let ValuationRequest::Dcf(dcf) = &request {
        let errors = engine::validate_dcf_input(dcf);
        if !errors.is_empty() {
            return Err(ApiError::BadRequest(errors));
        }
    }
    Ok(Json(engine::compute_valuation(&request)))
}

#[derive(Debug, Serialize)]
struct DcfValidation {
    valid: bool,
    errors: Vec<String>,
}

async fn post_validate_dcf(Json(input): Json<DcfInput>) -> Json<DcfValidation> {
    let errors = engine::validate_dcf_input(&input);
    Json(DcfValidation {
        valid: errors.is_empty(),
        errors,
    })
}

#[derive(Debug, Deserialize)]
struct ConfidenceRequest {
    /// Falls back to the tier carried in `input`.
    tier: Option<DataSharingTier>,
    #[serde(default)]
    input: FounderInput,
    valuations: Option<Vec<ValuationMethodResult>>,
}

async fn post_confidence(Json(request): Json<ConfidenceRequest>) -> Json<ConfidenceExplanation> {
    let tier = request.tier.unwrap_or(request.input.tier);
    Json(engine::compute_confidence(
        tier,
        &request.input,
        request.valuations.as_deref(),
    ))
}

#[derive(Debug, Deserialize)]
struct ActionPlanRequest {
    #[serde(default)]
    input: FounderInput,
    route: FundingRoute,
}

async fn post_action_plan(Json(request): Json<ActionPlanRequest>) -> Json<ActionPlan> {
    Json(engine::generate_action_plan(&request.input, request.route))
}

#[derive(Debug, Serialize)]
struct AnalysisResponse {
    run_id: Option<Uuid>,
    report: AnalysisReport,
}

async fn post_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let request = request
        .validate_and_normalize()
        .map_err(ApiError::contract)?;
    let report = engine::analyze(&request);

    let run_id = match (&request.subject_id, &state.pool) {
        (Some(subject_id), Some(pool)) => Some(
            runs::persist_run(pool, subject_id, RunKind::Analysis, &request, &report)
                .await
                .map_err(ApiError::Internal)?,
        ),
        (Some(subject_id), None) => {
            tracing::warn!(subject_id = subject_id.as_str(), "no database; analysis not persisted");
            None
        }
        (None, _) => None,
    };

    Ok(Json(AnalysisResponse { run_id, report }))
}

async fn get_latest_analysis(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
) -> Result<Json<StoredRun>, ApiError> {
    let Some(pool) = &state.pool else {
        return Err(ApiError::Unavailable);
    };
    let subject_id = normalize_subject_id(&subject_id).map_err(ApiError::contract)?;

    let run = runs::fetch_latest_run(pool, &subject_id, RunKind::Analysis)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(run))
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    limit: Option<i64>,
}

async fn get_analysis_history(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<StoredRun>>, ApiError> {
    let Some(pool) = &state.pool else {
        return Err(ApiError::Unavailable);
    };
    let subject_id = normalize_subject_id(&subject_id).map_err(ApiError::contract)?;

    let history = runs::list_runs(
        pool,
        &subject_id,
        params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
    )
    .await
    .map_err(ApiError::Internal)?;

    Ok(Json(history))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &runway_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
