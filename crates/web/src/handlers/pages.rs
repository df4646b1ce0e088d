//! Handlers for the server-rendered dashboard page.

use absences_core::absence::{conflict_count, RowField, RowRecord};
use absences_core::employee::DetailSelection;
use absences_core::i18n::{Language, Translator};
use absences_core::table::{
    total_pages, ColumnDescriptor, FieldKey, SortDirection, SortState, TableState,
};
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::Form;

use crate::dashboard::LoadState;
use crate::query::{DashboardLink, DashboardQuery, RetryForm};
use crate::state::AppState;
use crate::view::columns::{absence_columns, absence_table};
use crate::view::page::{render_page, PageBody};

/// GET /
///
/// Render the dashboard for the current load state. Query parameters are
/// parsed leniently: an unknown language falls back to the default, an
/// unknown or non-sortable sort key is ignored, and a page outside the
/// current data stays on page 1.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Html<String> {
    let language = resolve_language(query.lang.as_deref(), state.config.default_language);
    let t = Translator::new(language);
    let page_size = state.config.page_size;

    let snapshot = state.dashboard.snapshot().await;
    let rows: &[RowRecord] = match &snapshot {
        LoadState::Ready(rows) => &rows[..],
        _ => &[],
    };

    let mut table_state = table_state_from_query(
        &query,
        &absence_columns(t, &DashboardLink::new(language)),
        total_pages(rows.len(), page_size),
    );

    let mut selection = DetailSelection::default();
    if let Some(name) = query.employee.as_deref() {
        selection.open(name);
    }

    let link = DashboardLink {
        language,
        sort: table_state.sort,
        page: table_state.current_page,
        employee: selection.selected().map(str::to_string),
    };

    let body = match &snapshot {
        LoadState::Loading => {
            let table = absence_table(t, &link, page_size, true);
            PageBody::Loading {
                table: table.view(rows, &mut table_state),
            }
        }
        LoadState::Failed(message) => PageBody::Failed {
            message: message.clone(),
        },
        LoadState::Ready(rows) => {
            let table = absence_table(t, &link, page_size, false);
            PageBody::Ready {
                table: table.view(rows, &mut table_state),
                total: rows.len(),
                conflicts: conflict_count(rows),
                detail: selection.detail(rows),
            }
        }
    };

    tracing::debug!(
        lang = language.code(),
        status = ?snapshot.status(),
        page = table_state.current_page,
        "Rendering dashboard"
    );

    Html(render_page(&t, &link, &body))
}

/// POST /retry
///
/// Start a fresh aggregation cycle and send the browser back to the page,
/// which shows the loading state until the cycle finishes. Language and
/// sort are kept; the page is not.
pub async fn retry(State(state): State<AppState>, Form(form): Form<RetryForm>) -> Redirect {
    let (generation, _) = state.dashboard.spawn_refresh().await;
    tracing::info!(generation, "Retry requested");

    let language = resolve_language(form.lang.as_deref(), state.config.default_language);
    let mut link = DashboardLink::new(language);
    if let Some(key) = form.sort.as_deref().and_then(RowField::from_name) {
        link.sort = SortState::by(key, resolve_direction(form.dir.as_deref()));
    }

    Redirect::to(&link.href())
}

// ---------------------------------------------------------------------------
// Query resolution
// ---------------------------------------------------------------------------

fn resolve_language(code: Option<&str>, default: Language) -> Language {
    code.and_then(Language::from_code).unwrap_or(default)
}

fn resolve_direction(dir: Option<&str>) -> SortDirection {
    dir.and_then(|d| SortDirection::parse(d).ok())
        .unwrap_or_default()
}

/// Rebuild the table state a query describes, going through the same
/// transitions a user would: sort by the key (toggling again for
/// descending), then move to the requested page.
fn table_state_from_query(
    query: &DashboardQuery,
    columns: &[ColumnDescriptor<RowRecord>],
    total_pages: usize,
) -> TableState<RowField> {
    let mut state = TableState::new();

    if let Some(key) = query.sort.as_deref().and_then(RowField::from_name) {
        if state.handle_sort(columns, key)
            && resolve_direction(query.dir.as_deref()) == SortDirection::Desc
        {
            state.handle_sort(columns, key);
        }
    }

    if let Some(page) = query.page.as_deref().and_then(|p| p.trim().parse::<usize>().ok()) {
        state.handle_page_change(page, total_pages);
    }

    state
}
