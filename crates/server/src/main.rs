//! # staybook-server
//!
//! HTTP API for the staybook dashboard. The browser UI is an external
//! collaborator; this binary exposes the store mutations, the filtered
//! queries, and the report downloads it needs.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{Local, NaiveDate};
use clap::Parser;
use serde::Serialize;
use staybook_reports::{
    balance_summary, owner_report, owner_report_csv, partner_report, partner_report_csv,
    weekly_report_csv, weekly_totals, BalanceSummary, BookingFilter,
};
use staybook_store::{Booking, NewBooking, NewOwner, NewPartner, Owner, Partner, Store, StorePaths};
use staybook_table::Table;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// staybook API server
#[derive(Parser)]
#[command(name = "staybook-server")]
#[command(author, version, about = "HTTP API for the staybook dashboard", long_about = None)]
struct Args {
    /// Directory holding bookings.xlsx, partners.xlsx and owners.xlsx
    /// (falls back to STAYBOOK_DATA_DIR, then "data")
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Listen address (falls back to STAYBOOK_ADDR, then 0.0.0.0:3000)
    #[arg(long, value_name = "ADDR")]
    addr: Option<String>,
}

/// The store shared across handlers
///
/// A single active session is assumed; the mutex only serializes
/// handler bodies.
type SharedStore = Arc<Mutex<Store>>;

/// Health check response.
#[derive(Serialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
}

/// Error payload; the status tells the client whether the operation
/// failed to apply (500) or addressed an unknown row (404)
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<staybook_store::StoreError> for ApiError {
    fn from(e: staybook_store::StoreError) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

/// Health check endpoint handler.
async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ===== Bookings =====

async fn list_bookings(State(store): State<SharedStore>) -> Json<Vec<Booking>> {
    Json(store.lock().await.list_bookings())
}

async fn create_booking(
    State(store): State<SharedStore>,
    Json(fields): Json<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let created = store.lock().await.add_booking(fields)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_booking(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(fields): Json<NewBooking>,
) -> Result<Json<Booking>, ApiError> {
    let mut store = store.lock().await;
    if !store.update_booking(&id, fields)? {
        return Err(ApiError::not_found(format!("no booking with id {id}")));
    }
    store
        .get_booking(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("no booking with id {id}")))
}

async fn filter_bookings(
    State(store): State<SharedStore>,
    Query(filter): Query<BookingFilter>,
) -> Json<Vec<Booking>> {
    let store = store.lock().await;
    let filtered = filter.apply(store.bookings());
    Json(table_bookings(&filtered))
}

fn table_bookings(table: &Table) -> Vec<Booking> {
    (0..table.row_count())
        .filter_map(|i| Booking::from_row(table, i))
        .collect()
}

// ===== Partners =====

async fn list_partners(State(store): State<SharedStore>) -> Json<Vec<Partner>> {
    Json(store.lock().await.list_partners())
}

async fn create_partner(
    State(store): State<SharedStore>,
    Json(fields): Json<NewPartner>,
) -> Result<(StatusCode, Json<Partner>), ApiError> {
    let created = store.lock().await.add_partner(fields)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_partner(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(fields): Json<NewPartner>,
) -> Result<Json<Partner>, ApiError> {
    let mut store = store.lock().await;
    if !store.update_partner(&id, fields)? {
        return Err(ApiError::not_found(format!("no partner with id {id}")));
    }
    store
        .get_partner(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("no partner with id {id}")))
}

// ===== Owners =====

async fn list_owners(State(store): State<SharedStore>) -> Json<Vec<Owner>> {
    Json(store.lock().await.list_owners())
}

async fn create_owner(
    State(store): State<SharedStore>,
    Json(fields): Json<NewOwner>,
) -> Result<(StatusCode, Json<Owner>), ApiError> {
    let created = store.lock().await.add_owner(fields)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_owner(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(fields): Json<NewOwner>,
) -> Result<Json<Owner>, ApiError> {
    let mut store = store.lock().await;
    if !store.update_owner(&id, fields)? {
        return Err(ApiError::not_found(format!("no owner with id {id}")));
    }
    store
        .get_owner(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("no owner with id {id}")))
}

// ===== Reload and reports =====

#[derive(Serialize)]
struct ReloadResponse {
    bookings: usize,
    partners: usize,
    owners: usize,
}

async fn reload(State(store): State<SharedStore>) -> Json<ReloadResponse> {
    let mut store = store.lock().await;
    store.reload();
    Json(ReloadResponse {
        bookings: store.bookings().row_count(),
        partners: store.partners().row_count(),
        owners: store.owners().row_count(),
    })
}

#[derive(Serialize)]
struct WeeklyReportResponse {
    window_start: NaiveDate,
    window_end: NaiveDate,
    lodging_total: f64,
    payable_total: f64,
    receivable_total: f64,
    occupied_apartments: usize,
    bookings: Vec<Booking>,
}

async fn weekly_report_json(State(store): State<SharedStore>) -> Json<WeeklyReportResponse> {
    let store = store.lock().await;
    let totals = weekly_totals(&store, today());
    Json(WeeklyReportResponse {
        window_start: totals.window_start,
        window_end: totals.window_end,
        lodging_total: totals.lodging_total,
        payable_total: totals.payable_total,
        receivable_total: totals.receivable_total,
        occupied_apartments: totals.occupied_apartments,
        bookings: table_bookings(&totals.bookings),
    })
}

async fn weekly_report_download(State(store): State<SharedStore>) -> Response {
    let store = store.lock().await;
    csv_response("weekly_report.csv", weekly_report_csv(&store, today()))
}

#[derive(Serialize)]
struct PartnerReportResponse {
    receivable_total: f64,
    payable_total: f64,
    partners: Vec<Partner>,
}

async fn partner_report_json(State(store): State<SharedStore>) -> Json<PartnerReportResponse> {
    let store = store.lock().await;
    let report = partner_report(&store);
    let partners = (0..report.partners.row_count())
        .filter_map(|i| Partner::from_row(&report.partners, i))
        .collect();
    Json(PartnerReportResponse {
        receivable_total: report.receivable_total,
        payable_total: report.payable_total,
        partners,
    })
}

async fn partner_report_download(State(store): State<SharedStore>) -> Response {
    let store = store.lock().await;
    csv_response("partner_report.csv", partner_report_csv(&store))
}

#[derive(Serialize)]
struct OwnerReportResponse {
    payable_total: f64,
    owners: Vec<Owner>,
}

async fn owner_report_json(State(store): State<SharedStore>) -> Json<OwnerReportResponse> {
    let store = store.lock().await;
    let report = owner_report(&store);
    let owners = (0..report.owners.row_count())
        .filter_map(|i| Owner::from_row(&report.owners, i))
        .collect();
    Json(OwnerReportResponse {
        payable_total: report.payable_total,
        owners,
    })
}

async fn owner_report_download(State(store): State<SharedStore>) -> Response {
    let store = store.lock().await;
    csv_response("owner_report.csv", owner_report_csv(&store))
}

async fn balance(State(store): State<SharedStore>) -> Json<Option<BalanceSummary>> {
    Json(balance_summary(&*store.lock().await))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn csv_response(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// Create the application router.
///
/// This is separated from `main()` to allow testing.
pub fn create_router(store: SharedStore) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/:id", put(update_booking))
        .route("/api/bookings/filter", get(filter_bookings))
        .route("/api/partners", get(list_partners).post(create_partner))
        .route("/api/partners/:id", put(update_partner))
        .route("/api/owners", get(list_owners).post(create_owner))
        .route("/api/owners/:id", put(update_owner))
        .route("/api/reload", post(reload))
        .route("/api/balance", get(balance))
        .route("/api/reports/weekly", get(weekly_report_json))
        .route("/api/reports/weekly.csv", get(weekly_report_download))
        .route("/api/reports/partners", get(partner_report_json))
        .route("/api/reports/partners.csv", get(partner_report_download))
        .route("/api/reports/owners", get(owner_report_json))
        .route("/api/reports/owners.csv", get(owner_report_download))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = args
        .data_dir
        .or_else(|| std::env::var("STAYBOOK_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"));
    let addr = args
        .addr
        .or_else(|| std::env::var("STAYBOOK_ADDR").ok())
        .unwrap_or_else(|| "0.0.0.0:3000".to_string());

    let store = Store::open(StorePaths::from_dir(&data_dir));
    let app = create_router(Arc::new(Mutex::new(store)));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, data_dir = %data_dir.display(), "staybook-server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
