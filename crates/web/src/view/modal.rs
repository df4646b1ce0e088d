//! Employee detail dialog.

use absences_core::date_math::format_date;
use absences_core::employee::{DetailEntry, EmployeeDetail};
use absences_core::i18n::Translator;
use dioxus::prelude::*;

use crate::view::columns::{absence_type_badge, conflict_badge, status_badge};

const HEADER_KEYS: [&str; 6] = [
    "table.columns.startDate",
    "table.columns.endDate",
    "table.columns.days",
    "table.columns.absenceType",
    "table.columns.status",
    "table.columns.hasConflict",
];

/// Dialog listing every absence of one employee. `close_href` is where both
/// the close button and the backdrop lead.
#[component]
pub fn EmployeeModal(detail: EmployeeDetail, t: Translator, close_href: String) -> Element {
    let close_label = t.t("modal.close");
    let count = detail.count().to_string();
    let title = t.t_with("modal.employeeAbsences.title", &[("name", detail.name.as_str())]);
    let subtitle = t.t_with("modal.employeeAbsences.subtitle", &[("count", count.as_str())]);

    rsx! {
        div { class: "modal-root", "role": "dialog", "aria-modal": "true",
            a { class: "modal-backdrop", href: "{close_href}", "aria-label": "{close_label}" }
            div { class: "modal",
                header { class: "modal-header",
                    div {
                        h2 { "{title}" }
                        p { "{subtitle}" }
                    }
                    a { class: "modal-close", href: "{close_href}", "aria-label": "{close_label}", "✕" }
                }
                div { class: "modal-body",
                    if detail.is_empty() {
                        div { class: "modal-empty",
                            h3 { {t.t("modal.employeeAbsences.noData")} }
                            p {
                                {t.t_with(
                                    "modal.employeeAbsences.noDataDescription",
                                    &[("name", detail.name.as_str())],
                                )}
                            }
                        }
                    } else {
                        table { class: "table-wide modal-table",
                            thead {
                                tr {
                                    for key in HEADER_KEYS {
                                        th { {t.t(key)} }
                                    }
                                }
                            }
                            tbody {
                                for entry in detail.entries.iter() {
                                    tr { "data-absence": "{entry.id}",
                                        for value in entry_cells(entry, &t) {
                                            td { {value} }
                                        }
                                    }
                                }
                            }
                        }
                        div { class: "table-narrow",
                            for entry in detail.entries.iter() {
                                div { class: "card", "data-absence": "{entry.id}",
                                    for (key, value) in HEADER_KEYS.iter().zip(entry_cells(entry, &t)) {
                                        div { class: "card-field",
                                            span { class: "card-label", "{t.t(key)}:" }
                                            span { class: "card-value", {value} }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// One entry's values in [`HEADER_KEYS`] order.
fn entry_cells(entry: &DetailEntry, t: &Translator) -> [Element; 6] {
    let locale = t.language().date_locale();
    let start = format_date(&entry.start_date, locale);
    let end = format_date(&entry.end_date, locale);
    [
        rsx! { "{start}" },
        rsx! { "{end}" },
        rsx! { "{entry.duration_days}" },
        absence_type_badge(t, &entry.absence_type),
        status_badge(t, entry.approval_status),
        conflict_badge(t, entry.has_conflict),
    ]
}
