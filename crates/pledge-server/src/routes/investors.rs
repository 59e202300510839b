//! Investor endpoints.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use pledge_analytics::{InvestmentStats, InvestorDetail, InvestorSummary};
use pledge_core::{AssetClass, InvestorId};
use pledge_ingest::{ingest_csv, IngestOptions, UploadReport};

use crate::dto::{FilterQuery, SummaryQuery, UploadQuery};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Name of the multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

/// Upload a commitments CSV.
pub async fn upload_csv(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadReport>> {
    let mode = query.mode()?;
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let limit = state.config.max_upload_bytes;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !file_name.to_ascii_lowercase().ends_with(".csv") {
            return Err(ApiError::BadRequest(format!(
                "Only CSV files are allowed, got '{file_name}'"
            )));
        }

        let bytes = field.bytes().await.map_err(multipart_error)?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) = upload
        .ok_or_else(|| ApiError::BadRequest(format!("Missing multipart field '{FILE_FIELD}'")))?;

    if bytes.len() > limit {
        return Err(ApiError::PayloadTooLarge(format!(
            "'{file_name}' is {} bytes, limit is {limit}",
            bytes.len()
        )));
    }

    info!(
        file = %file_name,
        bytes = bytes.len(),
        %mode,
        "Processing CSV upload"
    );

    let options = IngestOptions {
        mode,
        default_currency: state.config.default_currency,
    };
    let report = ingest_csv(state.store.as_ref(), &bytes, &options).await?;

    Ok(Json(report))
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

/// List investor summaries.
pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<Vec<InvestorSummary>>> {
    let summaries = state.reporter.summaries(query.sort()?).await?;
    Ok(Json(summaries))
}

/// List investor summaries matching the query filters.
pub async fn summary_filtered(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Json<Vec<InvestorSummary>>> {
    let filter = query.to_filter()?;
    let summaries = state
        .reporter
        .filtered_summaries(&filter, query.sort()?)
        .await?;
    Ok(Json(summaries))
}

/// Get one investor with commitments.
pub async fn details(
    State(state): State<AppState>,
    Path(investor_id): Path<String>,
) -> ApiResult<Json<InvestorDetail>> {
    let id = InvestorId::parse(&investor_id)
        .map_err(|_| ApiError::NotFound(format!("Investor '{investor_id}' not found")))?;
    let detail = state.reporter.detail(&id).await?;
    Ok(Json(detail))
}

/// List asset classes present in stored commitments.
pub async fn asset_classes(State(state): State<AppState>) -> ApiResult<Json<Vec<AssetClass>>> {
    Ok(Json(state.reporter.asset_classes().await?))
}

/// Portfolio-wide statistics.
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<InvestmentStats>> {
    Ok(Json(state.reporter.stats().await?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use rust_decimal_macros::dec;
    use serde_json::Value;

    use pledge_analytics::{InvestmentStats, InvestorDetail, InvestorSummary};
    use pledge_ingest::UploadReport;
    use pledge_storage::InMemoryInvestorStore;

    use crate::config::ServerConfig;
    use crate::error::ErrorResponse;
    use crate::server::create_router;
    use crate::state::AppState;

    const SAMPLE_CSV: &str = "\
Investor Name,Investory Type,Investor Country,Investor Date Added,Investor Last Updated,Commitment Asset Class,Commitment Amount,Commitment Currency
Ioo Gryffindor fund,fund manager,Singapore,2000-07-06,2024-02-21,Infrastructure,15000000,GBP
Ibx Skywalker ltd,asset manager,United States,1997-07-21,2024-02-21,Infrastructure,31000000,GBP
Ioo Gryffindor fund,fund manager,Singapore,2000-07-06,2024-02-21,Hedge Funds,16000000,GBP
Mjd Jedi fund,bank,China,2010-06-08,2024-02-21,Natural Resources,31500000,GBP
Mjd Jedi fund,bank,China,2010-06-08,2024-02-21,Crypto,1000,GBP
";

    fn create_test_server_with(config: ServerConfig) -> TestServer {
        let state = AppState::new(Arc::new(InMemoryInvestorStore::new()), config).unwrap();
        TestServer::new(create_router(state)).unwrap()
    }

    fn create_test_server() -> TestServer {
        create_test_server_with(ServerConfig::default())
    }

    fn csv_form(file_name: &str, content: &str) -> MultipartForm {
        MultipartForm::new().add_part(
            "file",
            Part::bytes(content.as_bytes().to_vec())
                .file_name(file_name)
                .mime_type("text/csv"),
        )
    }

    async fn upload(server: &TestServer, content: &str) -> UploadReport {
        let response = server
            .post("/investors/upload-csv")
            .multipart(csv_form("investors.csv", content))
            .await;
        response.assert_status_ok();
        response.json()
    }

    #[tokio::test]
    async fn test_upload_csv() {
        let server = create_test_server();
        let report = upload(&server, SAMPLE_CSV).await;

        assert!(report.success);
        assert_eq!(report.rows_processed, 5);
        assert_eq!(report.rows_skipped, 1);
        assert_eq!(report.total_commitments, 4);
        assert_eq!(report.total_investors, 3);
        assert_eq!(report.errors[0].line, 6);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_csv_name() {
        let server = create_test_server();
        let response = server
            .post("/investors/upload-csv")
            .multipart(csv_form("investors.txt", SAMPLE_CSV))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: ErrorResponse = response.json();
        assert_eq!(body.error.code, "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_upload_missing_file_field() {
        let server = create_test_server();
        let form = MultipartForm::new().add_text("comment", "no file here");
        let response = server.post("/investors/upload-csv").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_schema_error_is_422() {
        let server = create_test_server();
        let response = server
            .post("/investors/upload-csv")
            .multipart(csv_form("bad.csv", "Investor Name,Commitment Amount\nA,1\n"))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: ErrorResponse = response.json();
        assert_eq!(body.error.code, "SCHEMA_ERROR");
        assert!(body.error.message.contains("Commitment Asset Class"));

        let summaries: Vec<InvestorSummary> = server.get("/investors/summary").await.json();
        assert!(summaries.is_empty());
    }

    #[tokio::test]
    async fn test_upload_non_utf8_is_malformed() {
        let server = create_test_server();
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(vec![0x49u8, 0xff, 0xfe, 0x0a]).file_name("latin1.csv"),
        );
        let response = server.post("/investors/upload-csv").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: ErrorResponse = response.json();
        assert_eq!(body.error.code, "MALFORMED_FILE");
    }

    #[tokio::test]
    async fn test_upload_too_large() {
        let server = create_test_server_with(ServerConfig {
            max_upload_bytes: 64,
            ..ServerConfig::default()
        });
        let response = server
            .post("/investors/upload-csv")
            .multipart(csv_form("big.csv", SAMPLE_CSV))
            .await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_upload_invalid_mode() {
        let server = create_test_server();
        let response = server
            .post("/investors/upload-csv")
            .add_query_param("mode", "append")
            .multipart(csv_form("investors.csv", SAMPLE_CSV))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_summary_totals_match_rows() {
        let server = create_test_server();
        upload(&server, SAMPLE_CSV).await;

        let response = server.get("/investors/summary").await;
        response.assert_status_ok();
        let summaries: Vec<InvestorSummary> = response.json();

        let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["ibx-skywalker-ltd", "ioo-gryffindor-fund", "mjd-jedi-fund"]);

        let ioo = &summaries[1];
        assert_eq!(ioo.commitment_count, 2);
        assert_eq!(ioo.total_committed, dec!(31000000));
        assert_eq!(ioo.total_commitment_usd, dec!(38750000));
    }

    #[tokio::test]
    async fn test_summary_sorted_by_total() {
        let server = create_test_server();
        upload(&server, SAMPLE_CSV).await;

        let summaries: Vec<InvestorSummary> = server
            .get("/investors/summary")
            .add_query_param("sort", "total_desc")
            .await
            .json();
        let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["mjd-jedi-fund", "ibx-skywalker-ltd", "ioo-gryffindor-fund"]);
    }

    #[tokio::test]
    async fn test_summary_filtered() {
        let server = create_test_server();
        upload(&server, SAMPLE_CSV).await;

        let summaries: Vec<InvestorSummary> = server
            .get("/investors/summary-filtered")
            .add_query_param("asset_class", "Infrastructure")
            .add_query_param("country", "singapore")
            .await
            .json();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id.as_str(), "ioo-gryffindor-fund");

        let response = server
            .get("/investors/summary-filtered")
            .add_query_param("asset_class", "Crypto")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_details() {
        let server = create_test_server();
        upload(&server, SAMPLE_CSV).await;

        let response = server.get("/investors/ioo-gryffindor-fund/details").await;
        response.assert_status_ok();
        let detail: InvestorDetail = response.json();
        assert_eq!(detail.name, "Ioo Gryffindor fund");
        assert_eq!(detail.commitments.len(), 2);
        assert_eq!(detail.asset_classes.len(), 2);

        let missing = server.get("/investors/nobody/details").await;
        missing.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = missing.json();
        assert_eq!(body.error.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_asset_classes_and_stats() {
        let server = create_test_server();
        upload(&server, SAMPLE_CSV).await;

        let classes: Value = server.get("/investors/asset-classes").await.json();
        assert_eq!(
            classes,
            serde_json::json!(["Hedge Funds", "Infrastructure", "Natural Resources"])
        );

        let stats: InvestmentStats = server.get("/investors/stats").await.json();
        assert_eq!(stats.total_investors, 3);
        assert_eq!(stats.total_commitments, 4);
        assert_eq!(stats.total_committed, dec!(93500000));
        assert_eq!(stats.unique_countries_count, 3);
        assert_eq!(stats.max_commitment_usd, Some(dec!(39375000)));
    }

    #[tokio::test]
    async fn test_api_v1_mirror() {
        let server = create_test_server();
        let response = server
            .post("/api/v1/investors/upload-csv")
            .multipart(csv_form("investors.csv", SAMPLE_CSV))
            .await;
        response.assert_status_ok();

        let summaries: Vec<InvestorSummary> = server.get("/api/v1/investors/summary").await.json();
        assert_eq!(summaries.len(), 3);
    }
}
