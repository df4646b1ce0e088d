#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use absences_client::{AbsenceApiError, AbsenceSource};
use absences_core::absence::{AbsenceRecord, ConflictRecord, Employee};
use absences_core::i18n::Language;
use absences_core::types::AbsenceId;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use absences_web::config::ServerConfig;
use absences_web::dashboard::Dashboard;
use absences_web::router::build_app_router;
use absences_web::state::AppState;

// ---------------------------------------------------------------------------
// In-memory upstream
// ---------------------------------------------------------------------------

/// Upstream stand-in serving a fixed absence list.
#[derive(Default)]
pub struct FakeSource {
    pub absences: Vec<AbsenceRecord>,
    /// Ids whose conflict lookup reports a conflict.
    pub conflicting: HashSet<AbsenceId>,
    /// Ids whose conflict lookup fails.
    pub failing: HashSet<AbsenceId>,
    /// Fail the absence listing itself with this status.
    pub outage: Option<u16>,
}

impl FakeSource {
    pub fn with_absences(absences: Vec<AbsenceRecord>) -> Self {
        Self {
            absences,
            ..Default::default()
        }
    }

    pub fn down(status: u16) -> Self {
        Self {
            outage: Some(status),
            ..Default::default()
        }
    }
}

#[async_trait]
impl AbsenceSource for FakeSource {
    async fn fetch_absences(&self) -> Result<Vec<AbsenceRecord>, AbsenceApiError> {
        match self.outage {
            Some(status) => Err(AbsenceApiError::ApiError {
                status,
                body: "service unavailable".into(),
            }),
            None => Ok(self.absences.clone()),
        }
    }

    async fn fetch_conflict(&self, id: AbsenceId) -> Result<ConflictRecord, AbsenceApiError> {
        if self.failing.contains(&id) {
            return Err(AbsenceApiError::ApiError {
                status: 500,
                body: "boom".into(),
            });
        }
        Ok(ConflictRecord {
            id,
            has_conflict: self.conflicting.contains(&id),
        })
    }
}

pub fn absence(
    id: AbsenceId,
    start_date: &str,
    days: Option<i64>,
    first_name: &str,
    last_name: &str,
    approved: bool,
    absence_type: &str,
) -> AbsenceRecord {
    AbsenceRecord {
        id,
        start_date: start_date.into(),
        end_date: None,
        days,
        employee: Employee {
            first_name: first_name.into(),
            last_name: last_name.into(),
        },
        approved,
        absence_type: absence_type.into(),
    }
}

/// Three absences, two of them Rahaf Deckard's. Id 1 conflicts.
pub fn sample_source() -> FakeSource {
    let mut source = FakeSource::with_absences(vec![
        absence(0, "2022-05-28T04:39:06.470Z", Some(9), "Rahaf", "Deckard", true, "SICKNESS"),
        absence(1, "2022-02-08T08:02:47.543Z", Some(5), "Enya", "Behm", false, "ANNUAL_LEAVE"),
        absence(2, "2020-12-31T03:08:19.146Z", Some(2), "Rahaf", "Deckard", true, "ANNUAL_LEAVE"),
    ]);
    source.conflicting.insert(1);
    source
}

/// `count` absences for distinct employees, starting on consecutive days.
pub fn many_absences(count: usize) -> FakeSource {
    FakeSource::with_absences(
        (0..count)
            .map(|i| {
                absence(
                    i as AbsenceId,
                    &format!("2023-01-{:02}", i % 28 + 1),
                    Some(1),
                    "Employee",
                    &format!("No{i}"),
                    i % 2 == 0,
                    "SICKNESS",
                )
            })
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        absences_url: "http://upstream.invalid/api/absences".to_string(),
        conflict_url: "http://upstream.invalid/api/conflict".to_string(),
        page_size: 10,
        upstream_timeout_secs: 5,
        default_language: Language::En,
    }
}

/// Build the full application router over `source`.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack. The dashboard is still loading: no cycle
/// has been run.
pub fn build_test_app(source: FakeSource) -> (Router, Arc<Dashboard>) {
    let config = test_config();
    let dashboard = Arc::new(Dashboard::new(Arc::new(source)));
    let state = AppState {
        config: Arc::new(config.clone()),
        dashboard: Arc::clone(&dashboard),
    };
    (build_app_router(state, &config), dashboard)
}

/// Like [`build_test_app`], with one completed cycle.
pub async fn build_loaded_app(source: FakeSource) -> (Router, Arc<Dashboard>) {
    let (app, dashboard) = build_test_app(source);
    assert!(dashboard.refresh().await, "initial cycle should commit");
    (app, dashboard)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Page markup with URL entities folded back, so hrefs can be matched as
/// written.
pub async fn body_html(response: Response<Body>) -> String {
    body_text(response)
        .await
        .replace("&#x2f;", "/")
        .replace("&#x2F;", "/")
        .replace("&#47;", "/")
        .replace("&amp;", "&")
}

/// The opening tag that starts with `prefix`, up to its closing `>`.
pub fn opening_tag<'a>(html: &'a str, prefix: &str) -> &'a str {
    let start = html
        .find(prefix)
        .unwrap_or_else(|| panic!("no tag starting with {prefix}"));
    let end = html[start..].find('>').map_or(html.len(), |i| start + i + 1);
    &html[start..end]
}
