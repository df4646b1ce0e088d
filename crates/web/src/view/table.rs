//! Presenters for [`TableView`]: a wide table for large screens and stacked
//! cards for narrow ones. Both draw the same view, so they always show the
//! same rows in the same order with the same absolute indices.

use absences_core::absence::RowField;
use absences_core::i18n::Translator;
use absences_core::table::{
    Cell, CellView, FieldKey, HeaderView, PaginationView, SortDirection, TableBody, TableView,
};
use dioxus::prelude::*;

use crate::query::DashboardLink;

/// Sort controls, both layouts, and pagination for one table view.
#[component]
pub fn DataTable(view: TableView, t: Translator, link: DashboardLink) -> Element {
    rsx! {
        section { class: "table-container",
            SortControls { view: view.clone(), t, link: link.clone() }
            WideTable { view: view.clone(), link: link.clone() }
            CardList { view: view.clone() }
            if let Some(pagination) = view.pagination.clone() {
                Pagination { pagination, t, link: link.clone() }
            }
        }
    }
}

/// Link a header points at: the sort state after toggling its column.
fn header_href(header: &HeaderView, link: &DashboardLink) -> Option<String> {
    let key = RowField::from_name(header.key).filter(|_| header.sortable)?;
    let mut next = link.sort;
    next.toggle(key);
    Some(link.with_sort(next).href())
}

fn header_label(header: &HeaderView) -> String {
    match header.indicator {
        Some(direction) => format!("{} {}", header.label, direction.indicator()),
        None => header.label.clone(),
    }
}

fn header_class(header: &HeaderView) -> Option<String> {
    let classes: Vec<&str> = header
        .class_name
        .into_iter()
        .chain(header.indicator.map(|_| "sorted"))
        .collect();
    (!classes.is_empty()).then(|| classes.join(" "))
}

/// Text cells are escaped; markup cells come from column renderers.
fn cell_content(cell: &CellView) -> Element {
    match &cell.cell {
        Cell::Text(text) => rsx! { "{text}" },
        Cell::Markup(markup) => rsx! {
            span { class: "cell-markup", dangerous_inner_html: "{markup}" }
        },
    }
}

// ---------------------------------------------------------------------------
// Wide layout
// ---------------------------------------------------------------------------

#[component]
fn WideTable(view: TableView, link: DashboardLink) -> Element {
    let columns = view.headers.len().max(1);

    rsx! {
        table { class: "table-wide",
            thead {
                tr {
                    for header in view.headers.iter() {
                        th { class: header_class(header),
                            if let Some(href) = header_href(header, &link) {
                                a { class: "sort-link", href: "{href}", {header_label(header)} }
                            } else {
                                {header_label(header)}
                            }
                        }
                    }
                }
            }
            tbody {
                {match &view.body {
                    TableBody::Loading { placeholders } => rsx! {
                        for _ in 0..*placeholders {
                            tr { class: "skeleton-row",
                                for _ in view.headers.iter() {
                                    td { span { class: "skeleton" } }
                                }
                            }
                        }
                    },
                    TableBody::Empty { message } => rsx! {
                        tr {
                            td { class: "empty", colspan: "{columns}", "{message}" }
                        }
                    },
                    TableBody::Rows { rows } => rsx! {
                        for row in rows.iter() {
                            tr { "data-index": "{row.index}",
                                for cell in row.cells.iter() {
                                    td { class: cell.class_name, {cell_content(cell)} }
                                }
                            }
                        }
                    },
                }}
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Narrow layout
// ---------------------------------------------------------------------------

#[component]
fn CardList(view: TableView) -> Element {
    rsx! {
        div { class: "table-narrow",
            {match &view.body {
                TableBody::Loading { placeholders } => rsx! {
                    for _ in 0..*placeholders {
                        div { class: "card skeleton-card",
                            for _ in view.headers.iter() {
                                span { class: "skeleton" }
                            }
                        }
                    }
                },
                TableBody::Empty { message } => rsx! {
                    div { class: "card empty", "{message}" }
                },
                TableBody::Rows { rows } => rsx! {
                    for row in rows.iter() {
                        div { class: "card", "data-index": "{row.index}",
                            for cell in row.cells.iter() {
                                div { class: "card-field",
                                    span { class: "card-label", "{cell.label}:" }
                                    span { class: "card-value", {cell_content(cell)} }
                                }
                            }
                        }
                    }
                },
            }}
        }
    }
}

/// Compact sort selector shown with the card layout.
#[component]
fn SortControls(view: TableView, t: Translator, link: DashboardLink) -> Element {
    if view.sort_options.is_empty() {
        return rsx! {};
    }
    let sorted = view.sort.key.is_some();
    let sort_by = t.t("table.sortBy");

    rsx! {
        form { class: "sort-controls", method: "get", action: "/",
            input { r#type: "hidden", name: "lang", value: "{link.language.code()}" }
            label {
                "{sort_by} "
                select { name: "sort",
                    option { value: "", {t.t("table.noSorting")} }
                    for choice in view.sort_options.iter() {
                        option {
                            value: "{choice.key}",
                            selected: view.sort.key == Some(choice.key),
                            "{choice.label}"
                        }
                    }
                }
            }
            select { name: "dir",
                for direction in [SortDirection::Asc, SortDirection::Desc] {
                    option {
                        value: "{direction.as_str()}",
                        selected: sorted && view.sort.direction == direction,
                        "{direction.indicator()}"
                    }
                }
            }
            button { r#type: "submit", {t.t("language.apply")} }
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[component]
fn Pagination(pagination: PaginationView, t: Translator, link: DashboardLink) -> Element {
    let window = pagination.window;
    let current = window.current_page.to_string();
    let total_pages = window.total_pages.to_string();
    let first = (window.start_index + 1).to_string();
    let last = window.end_index.to_string();
    let total_items = window.total_items.to_string();

    let page_of = t.t_with(
        "table.pagination.pageOf",
        &[("current", current.as_str()), ("total", total_pages.as_str())],
    );
    let summary = t.t_with(
        "table.pagination.summary",
        &[
            ("start", first.as_str()),
            ("end", last.as_str()),
            ("total", total_items.as_str()),
        ],
    );
    let previous = t.t("table.pagination.previous");
    let next = t.t("table.pagination.next");
    let step_href = |target: Option<usize>| target.map(|page| link.with_page(page).href());

    rsx! {
        nav { class: "pagination",
            div { class: "pagination-narrow",
                {page_step(step_href(pagination.previous), format!("← {previous}"))}
                span { "{page_of}" }
                {page_step(step_href(pagination.next), format!("{next} →"))}
            }
            div { class: "pagination-wide",
                p { class: "summary", "{summary}" }
                div { class: "pages",
                    {page_step(step_href(pagination.previous), "‹".to_string())}
                    for page in pagination.pages.iter().copied() {
                        if page == window.current_page {
                            span { class: "page current", "aria-current": "page", "{page}" }
                        } else {
                            a { class: "page", href: "{link.with_page(page).href()}", "{page}" }
                        }
                    }
                    {page_step(step_href(pagination.next), "›".to_string())}
                }
            }
        }
    }
}

/// Previous/next control: a link when there is a target, inert otherwise.
fn page_step(href: Option<String>, label: String) -> Element {
    match href {
        Some(href) => rsx! {
            a { class: "page-step", href: "{href}", "{label}" }
        },
        None => rsx! {
            span { class: "page-step disabled", "{label}" }
        },
    }
}
