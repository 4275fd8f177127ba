use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use runway_core::engine;
use runway_core::storage::runs::{self, RunKind};

mod batch;

#[derive(Debug, Parser)]
#[command(name = "runway_worker")]
struct Args {
    /// JSON file holding an array of analysis requests.
    #[arg(long)]
    input: PathBuf,

    /// Do everything except writing to the database.
    #[arg(long)]
    dry_run: bool,

    /// Pretty-print each report instead of one JSON document per line.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = runway_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let raw = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("read {} failed", args.input.display()))?;
    let requests = batch::parse_batch(&raw)?;

    let pool = if args.dry_run {
        None
    } else {
        let db_url = settings.require_database_url()?;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await
            .context("connect DATABASE_URL failed")?;
        runway_core::storage::migrate(&pool).await?;
        Some(pool)
    };

    let total = requests.len();
    let mut failed = 0usize;
    let mut persisted = 0usize;

    for request in requests {
        let request = match request {
            Ok(request) => request,
            Err(err) => {
                failed += 1;
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %format!("{err:#}"), "skipping invalid request");
                continue;
            }
        };

        let report = engine::analyze(&request);
        println!("{}", batch::render_report(&report, args.pretty)?);

        if !report.rejected_valuations.is_empty() {
            tracing::warn!(
                subject_id = request.subject_id.as_deref(),
                rejected = report.rejected_valuations.len(),
                "some valuations were rejected"
            );
        }

        if let (Some(pool), Some(subject_id)) = (&pool, request.subject_id.as_deref()) {
            match runs::persist_run(pool, subject_id, RunKind::Analysis, &request, &report).await {
                Ok(_) => persisted += 1,
                Err(err) => {
                    failed += 1;
                    sentry_anyhow::capture_anyhow(&err);
                    tracing::error!(subject_id, error = %err, "persist analysis failed");
                }
            }
        }
    }

    tracing::info!(total, failed, persisted, dry_run = args.dry_run, "batch finished");

    anyhow::ensure!(failed == 0, "{failed} of {total} requests failed");
    Ok(())
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
