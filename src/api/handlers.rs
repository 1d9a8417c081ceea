//! HTTP request handlers for the payroll engine API.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_deductions, calculate_severance};
use crate::config::{ConfigResolution, ConfigSource, WageClassification};
use crate::extract::{SheetSource, extract_records, select_sheet};
use crate::models::{
    Employment, EmploymentStatus, MonthlyWage, SchemeEnrollment, WageComponents, Worker,
};
use crate::reconcile::{LedgerSnapshot, MAX_BATCH_SIZE, chunk_writes, reconcile};

use super::request::{DeductionRequest, ImportPreviewRequest, SeveranceRequest};
use super::response::{ApiError, ApiErrorResponse, ImportPreviewResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/import/preview", post(import_preview_handler))
        .route("/deductions", post(deductions_handler))
        .route("/severance", post(severance_handler))
        .with_state(state)
}

/// Maps a JSON extraction failure to the API error envelope.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {err}"))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn bad_request(error: ApiError) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn engine_error(error: crate::error::EngineError) -> axum::response::Response {
    let response: ApiErrorResponse = error.into();
    (
        response.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response.error),
    )
        .into_response()
}

/// Handler for POST /import/preview.
///
/// Resolves the business's mapping, extracts records from the selected
/// sheet, classifies them against the caller's ledger snapshot and
/// reports the chunked write plan. Nothing is persisted: the caller owns
/// the stores.
async fn import_preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<ImportPreviewRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing import preview request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    let resolution = state.store().resolve(&request.business_id, None);
    let (config, source) = match resolution {
        ConfigResolution::Resolved { config, source } => (config, source),
        ConfigResolution::Unresolved => {
            warn!(
                correlation_id = %correlation_id,
                business_id = %request.business_id,
                "No mapping source resolved"
            );
            return engine_error(crate::error::EngineError::ConfigUnresolved {
                business_id: request.business_id,
            });
        }
    };

    let Some(sheet) = select_sheet(&request.workbook, &config.sheet) else {
        return bad_request(ApiError::new("EMPTY_WORKBOOK", "The workbook has no sheets"));
    };
    let rows = request.workbook.rows(&sheet).unwrap_or(&[]);

    let extraction = extract_records(&config.sheet, rows);
    let snapshot = LedgerSnapshot::build(
        &request.business_id,
        &request.workers,
        &request.employments,
        &request.entries,
    );
    let reconciliation = reconcile(&extraction.records, request.period, &snapshot);
    let write_chunks = chunk_writes(reconciliation.writes(request.period), MAX_BATCH_SIZE).len();

    info!(
        correlation_id = %correlation_id,
        business_id = %request.business_id,
        records = extraction.records.len(),
        rejections = extraction.rejections.len(),
        added = reconciliation.added.len(),
        updated = reconciliation.updated.len(),
        unmatched = reconciliation.unmatched.len(),
        "Import preview completed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(ImportPreviewResponse {
            sheet,
            config_source: match source {
                ConfigSource::Rich => "rich".to_string(),
                ConfigSource::MigratedLegacy => "migrated_legacy".to_string(),
            },
            extraction,
            reconciliation,
            write_chunks,
        }),
    )
        .into_response()
}

/// Handler for POST /deductions.
async fn deductions_handler(
    State(state): State<AppState>,
    payload: Result<Json<DeductionRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing deduction request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    let classification = request
        .business_id
        .as_deref()
        .and_then(|business_id| match state.store().resolve(business_id, None) {
            ConfigResolution::Resolved { config, .. } => Some(config.wage_classification),
            ConfigResolution::Unresolved => None,
        })
        .unwrap_or_else(WageClassification::standard);

    let entry = MonthlyWage {
        id: MonthlyWage::entry_id("preview", request.period),
        employment_id: "preview".to_string(),
        period: request.period,
        components: request.components,
        total_wage: request.total_wage,
        pension: None,
        health: None,
        long_term_care: None,
        employment: None,
        income_tax: None,
        local_tax: None,
        net_wage: None,
        work_days: None,
        deduction_days: None,
        deduction_hours: None,
        created_at: Utc::now(),
    };

    match calculate_deductions(&entry, request.enrollment, &classification, state.store().rates()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                period = %request.period,
                total = result.total(),
                "Deduction calculation completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Deduction calculation failed");
            engine_error(err)
        }
    }
}

/// Handler for POST /severance.
async fn severance_handler(
    State(state): State<AppState>,
    payload: Result<Json<SeveranceRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing severance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    let now = Utc::now();
    let employment = Employment {
        id: request.employment_id.clone(),
        worker_id: request.worker_id.clone(),
        business_id: request.business_id.clone(),
        status: EmploymentStatus::Inactive,
        join_date: request.join_date,
        leave_date: Some(request.leave_date),
        leave_reason: None,
        monthly_wage: 0,
        job_code: crate::config::DEFAULT_JOB_CODE.to_string(),
        weekly_hours: crate::config::DEFAULT_WEEKLY_HOURS,
        enrollment: SchemeEnrollment::all(),
        created_at: now,
        updated_at: now,
    };
    let worker = Worker {
        id: request.worker_id.clone(),
        name: String::new(),
        resident_no: String::new(),
        nationality: None,
        phone: None,
        created_at: now,
        updated_at: now,
    };
    let wages: Vec<MonthlyWage> = request
        .wages
        .iter()
        .map(|item| MonthlyWage {
            id: MonthlyWage::entry_id(&request.employment_id, item.period),
            employment_id: request.employment_id.clone(),
            period: item.period,
            components: WageComponents::default(),
            total_wage: item.total_wage,
            pension: None,
            health: None,
            long_term_care: None,
            employment: None,
            income_tax: None,
            local_tax: None,
            net_wage: None,
            work_days: None,
            deduction_days: None,
            deduction_hours: None,
            created_at: now,
        })
        .collect();

    match calculate_severance(&employment, &worker, &wages, state.store().rates()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                employment_id = %report.employment_id,
                severance_pay = report.severance_pay,
                net = report.net_severance_pay,
                "Severance calculation completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(report),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Severance calculation failed");
            engine_error(err)
        }
    }
}
