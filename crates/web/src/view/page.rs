//! The dashboard page: layout, header, language switcher and the body for
//! each load state.

use absences_core::employee::EmployeeDetail;
use absences_core::i18n::{Language, Translator};
use absences_core::table::{FieldKey, TableView};
use dioxus::prelude::*;

use crate::query::DashboardLink;
use crate::view::modal::EmployeeModal;
use crate::view::table::DataTable;

/// Seconds between reloads while the data is loading.
pub const LOADING_REFRESH_SECS: u32 = 2;

/// What the page body shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PageBody {
    Loading {
        table: TableView,
    },
    Failed {
        message: String,
    },
    Ready {
        table: TableView,
        total: usize,
        conflicts: usize,
        detail: Option<EmployeeDetail>,
    },
}

/// Render a complete HTML document.
pub fn render_page(t: &Translator, link: &DashboardLink, body: &PageBody) -> String {
    let document = dioxus_ssr::render_element(rsx! {
        DashboardDocument { t: *t, link: link.clone(), body: body.clone() }
    });
    format!(
        r#"<!DOCTYPE html><html lang="{}">{document}</html>"#,
        t.language().code()
    )
}

#[component]
fn DashboardDocument(t: Translator, link: DashboardLink, body: PageBody) -> Element {
    let loading = matches!(body, PageBody::Loading { .. });

    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            if loading {
                meta { "http-equiv": "refresh", content: "{LOADING_REFRESH_SECS}" }
            }
            title { {t.t("page.title")} }
            style { dangerous_inner_html: STYLES }
        }
        body {
            main { class: "page",
                PageHeader { t, link: link.clone() }
                {match body {
                    PageBody::Loading { table } => rsx! {
                        p { class: "status", "aria-busy": "true", {t.t("table.messages.loading")} }
                        DataTable { view: table, t, link: link.clone() }
                    },
                    PageBody::Failed { message } => rsx! {
                        ErrorPanel { t, link: link.clone(), message }
                    },
                    PageBody::Ready { table, total, conflicts, detail } => rsx! {
                        Counts { t, total, conflicts }
                        DataTable { view: table, t, link: link.clone() }
                        if let Some(detail) = detail {
                            EmployeeModal { detail, t, close_href: link.without_employee().href() }
                        }
                    },
                }}
            }
        }
    }
}

#[component]
fn PageHeader(t: Translator, link: DashboardLink) -> Element {
    rsx! {
        header { class: "page-header",
            div {
                h1 { {t.t("page.title")} }
                h2 { {t.t("page.subtitle")} }
                p { class: "description", {t.t("page.description")} }
            }
            LanguageSwitcher { t, link }
        }
    }
}

/// GET form that re-renders the page in another language, keeping sort,
/// page and the open employee.
#[component]
fn LanguageSwitcher(t: Translator, link: DashboardLink) -> Element {
    let label = t.t("language.label");

    rsx! {
        form { class: "language-switcher", method: "get", action: "/",
            if let Some(key) = link.sort.key {
                input { r#type: "hidden", name: "sort", value: "{key.name()}" }
                input { r#type: "hidden", name: "dir", value: "{link.sort.direction.as_str()}" }
            }
            if link.page > 1 {
                input { r#type: "hidden", name: "page", value: "{link.page}" }
            }
            if let Some(name) = &link.employee {
                input { r#type: "hidden", name: "employee", value: "{name}" }
            }
            label {
                "{label} "
                select { name: "lang",
                    for language in Language::ALL {
                        option {
                            value: "{language.code()}",
                            selected: language == link.language,
                            "{language.flag()} {language.native_name()}"
                        }
                    }
                }
            }
            button { r#type: "submit", {t.t("language.apply")} }
        }
    }
}

#[component]
fn Counts(t: Translator, total: usize, conflicts: usize) -> Element {
    let total = total.to_string();
    let conflicts_text = conflicts.to_string();

    rsx! {
        p { class: "counts",
            span { {t.t_with("page.recordsCount", &[("count", total.as_str())])} }
            if conflicts > 0 {
                " "
                span { class: "conflicts",
                    {t.t_with("page.conflictsCount", &[("count", conflicts_text.as_str())])}
                }
            }
        }
    }
}

/// Error panel with a retry button. The retry keeps language and sort.
#[component]
fn ErrorPanel(t: Translator, link: DashboardLink, message: String) -> Element {
    rsx! {
        section { class: "error-panel", "role": "alert",
            h3 { {t.t("table.messages.errorTitle")} }
            p { {t.t_with("errors.fetchAbsences", &[("error", message.as_str())])} }
            form { method: "post", action: "/retry",
                input { r#type: "hidden", name: "lang", value: "{link.language.code()}" }
                if let Some(key) = link.sort.key {
                    input { r#type: "hidden", name: "sort", value: "{key.name()}" }
                    input { r#type: "hidden", name: "dir", value: "{link.sort.direction.as_str()}" }
                }
                button { r#type: "submit", {t.t("table.messages.tryAgain")} }
            }
        }
    }
}

const STYLES: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:system-ui,sans-serif;background:#f9fafb;color:#111827}
.page{max-width:80rem;margin:0 auto;padding:1.5rem}
.page-header{display:flex;flex-wrap:wrap;justify-content:space-between;gap:1rem;margin-bottom:1rem}
.page-header h1{margin:0;font-size:1.75rem}
.page-header h2{margin:.25rem 0;font-size:1.1rem;color:#374151}
.description,.counts{color:#4b5563;font-size:.9rem}
.conflicts{color:#b91c1c}
.table-container{background:#fff;border:1px solid #e5e7eb;border-radius:.5rem;box-shadow:0 4px 6px rgba(0,0,0,.05)}
.table-wide{width:100%;border-collapse:collapse}
.table-wide th,.table-wide td{padding:.75rem 1rem;text-align:left;border-bottom:1px solid #e5e7eb;font-size:.875rem}
.table-wide th{background:#f9fafb;text-transform:uppercase;font-size:.75rem;color:#6b7280}
.table-wide th a{color:inherit;text-decoration:none}
.table-wide th.sorted{color:#1d4ed8}
.text-center{text-align:center!important}
.empty{text-align:center;color:#6b7280;padding:2rem!important}
.table-narrow{display:none;padding:.5rem}
.card{border:1px solid #e5e7eb;border-radius:.5rem;padding:1rem;margin-bottom:.75rem;background:#fff}
.card-field{display:flex;justify-content:space-between;gap:.5rem;font-size:.875rem;padding:.2rem 0}
.card-label{color:#6b7280;font-weight:500}
.card-value{text-align:right}
.skeleton{display:block;height:1rem;border-radius:.25rem;background:#e5e7eb;animation:pulse 1.5s infinite}
.skeleton-card .skeleton{margin:.5rem 0}
@keyframes pulse{50%{opacity:.5}}
.sort-controls{display:none;gap:.5rem;padding:.75rem}
.badge{display:inline-flex;padding:.125rem .5rem;border-radius:9999px;font-size:.75rem;font-weight:600}
.badge-green{background:#dcfce7;color:#166534}
.badge-yellow{background:#fef9c3;color:#854d0e}
.badge-red{background:#fee2e2;color:#991b1b}
.badge-blue{background:#dbeafe;color:#1e40af}
.badge-purple{background:#f3e8ff;color:#6b21a8}
.badge-pink{background:#fce7f3;color:#9d174d}
.badge-gray{background:#f3f4f6;color:#1f2937}
.employee-link{color:#2563eb;font-weight:500}
.pagination{padding:.75rem 1rem;border-top:1px solid #e5e7eb}
.pagination-narrow{display:none;justify-content:space-between;align-items:center}
.pagination-wide{display:flex;justify-content:space-between;align-items:center}
.pages{display:inline-flex}
.page,.page-step{padding:.4rem .8rem;border:1px solid #d1d5db;color:#374151;text-decoration:none;font-size:.875rem}
.page.current{background:#eff6ff;border-color:#3b82f6;color:#2563eb}
.disabled{opacity:.5}
.error-panel{background:#fef2f2;border:1px solid #fecaca;border-radius:.5rem;padding:1rem;color:#991b1b}
.modal-root{position:fixed;inset:0;display:flex;align-items:center;justify-content:center;padding:1rem;z-index:50}
.modal-backdrop{position:absolute;inset:0;background:rgba(0,0,0,.5)}
.modal{position:relative;background:#fff;border-radius:.5rem;width:100%;max-width:56rem;max-height:90vh;display:flex;flex-direction:column}
.modal-header{display:flex;justify-content:space-between;padding:1.25rem;border-bottom:1px solid #e5e7eb}
.modal-header h2{margin:0}
.modal-close{color:#9ca3af;text-decoration:none;font-size:1.25rem}
.modal-body{overflow-y:auto;padding:1.25rem}
.modal-empty{text-align:center;padding:2rem}
@media (max-width:767px){
.table-wide{display:none}
.table-narrow{display:block}
.sort-controls{display:flex}
.pagination-wide{display:none}
.pagination-narrow{display:flex}
}
"#;
