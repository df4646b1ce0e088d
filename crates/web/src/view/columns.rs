//! Column set of the absences table.

use absences_core::absence::{ApprovalStatus, RowField, RowRecord};
use absences_core::absence_type::{translate_absence_type, AbsenceTone};
use absences_core::date_math::format_date;
use absences_core::i18n::Translator;
use absences_core::table::{Cell, CellValue, ColumnDescriptor, Table};
use dioxus::prelude::*;

use crate::query::DashboardLink;

/// The absences table for one request: translated labels, locale-aware
/// dates, and employee links that keep the rest of `link`.
pub fn absence_table(
    t: Translator,
    link: &DashboardLink,
    page_size: usize,
    loading: bool,
) -> Table<RowRecord> {
    Table::new(absence_columns(t, link))
        .page_size(page_size)
        .loading(loading)
        .empty_message(t.t("table.messages.emptyTable"))
}

/// Column descriptors in display order. Every column sorts.
pub fn absence_columns(t: Translator, link: &DashboardLink) -> Vec<ColumnDescriptor<RowRecord>> {
    let locale = t.language().date_locale();
    let link = link.clone();

    vec![
        ColumnDescriptor::new(RowField::StartDate, t.t("table.columns.startDate"))
            .sortable()
            .with_renderer(move |value, _, _| date_cell(value, locale)),
        ColumnDescriptor::new(RowField::EndDate, t.t("table.columns.endDate"))
            .sortable()
            .with_renderer(move |value, _, _| date_cell(value, locale)),
        ColumnDescriptor::new(RowField::Days, t.t("table.columns.duration"))
            .sortable()
            .with_class("text-center")
            .with_renderer(move |value, _, _| Cell::Text(duration_text(&t, value.as_int()))),
        ColumnDescriptor::new(RowField::EmployeeName, t.t("table.columns.employeeName"))
            .sortable()
            .with_renderer(move |_, row: &RowRecord, _| {
                let href = link.with_employee(&row.employee_name).href();
                markup(rsx! {
                    a { class: "employee-link", href: "{href}", "{row.employee_name}" }
                })
            }),
        ColumnDescriptor::new(RowField::ApprovalStatus, t.t("table.columns.status"))
            .sortable()
            .with_renderer(move |_, row: &RowRecord, _| markup(status_badge(&t, row.approval_status))),
        ColumnDescriptor::new(RowField::AbsenceType, t.t("table.columns.absenceType"))
            .sortable()
            .with_renderer(move |_, row: &RowRecord, _| {
                markup(absence_type_badge(&t, &row.absence_type))
            }),
        ColumnDescriptor::new(RowField::HasConflict, t.t("table.columns.hasConflict"))
            .sortable()
            .with_class("text-center")
            .with_renderer(move |value, _, _| markup(conflict_badge(&t, value.is_truthy()))),
    ]
}

fn date_cell(value: &CellValue, locale: &str) -> Cell {
    Cell::Text(format_date(value.as_text().unwrap_or_default(), locale))
}

/// Render an element now, for renderers whose output the table stores.
fn markup(element: Element) -> Cell {
    Cell::Markup(dioxus_ssr::render_element(element))
}

/// "N day" / "N days"; missing and zero durations are not available.
pub fn duration_text(t: &Translator, days: Option<i64>) -> String {
    match days {
        None | Some(0) => t.t("table.duration.notAvailable"),
        Some(1) => format!("1 {}", t.t("table.duration.day")),
        Some(n) => format!("{n} {}", t.t("table.duration.days")),
    }
}

#[component]
pub fn Badge(tone: &'static str, text: String) -> Element {
    rsx! {
        span { class: "badge badge-{tone}", "{text}" }
    }
}

pub fn status_badge(t: &Translator, status: ApprovalStatus) -> Element {
    let tone = match status {
        ApprovalStatus::Approved => "green",
        ApprovalStatus::Pending => "yellow",
    };
    rsx! {
        Badge { tone, text: t.t(status.translation_key()) }
    }
}

pub fn absence_type_badge(t: &Translator, raw: &str) -> Element {
    let tone = match AbsenceTone::for_type(raw) {
        AbsenceTone::Blue => "blue",
        AbsenceTone::Red => "red",
        AbsenceTone::Purple => "purple",
        AbsenceTone::Pink => "pink",
        AbsenceTone::Gray => "gray",
    };
    rsx! {
        Badge { tone, text: translate_absence_type(t, raw) }
    }
}

pub fn conflict_badge(t: &Translator, has_conflict: bool) -> Element {
    let (tone, text) = if has_conflict {
        ("red", format!("⚠ {}", t.t("table.conflict.yes")))
    } else {
        ("green", format!("✓ {}", t.t("table.conflict.no")))
    };
    rsx! {
        Badge { tone, text }
    }
}
