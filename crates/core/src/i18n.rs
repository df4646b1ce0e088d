//! Translation catalog and lookup.
//!
//! There is no process-wide "current language": callers build a
//! [`Translator`] for the language of the request they are serving and pass
//! it to whatever renders text.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;

/// Compiled regex for `{{param}}` placeholders in catalog strings.
static PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid regex"));

// ---------------------------------------------------------------------------
// Languages
// ---------------------------------------------------------------------------

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    De,
}

impl Language {
    /// Every supported language, in selector order.
    pub const ALL: [Language; 3] = [Language::En, Language::Es, Language::De];

    /// Two-letter language code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::De => "de",
        }
    }

    /// Resolve a language code such as `de`, `DE` or `de-AT`.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Language::En),
            "es" => Some(Language::Es),
            "de" => Some(Language::De),
            _ => None,
        }
    }

    /// Like [`Language::from_code`] but reports unknown codes as a
    /// validation error.
    pub fn parse(code: &str) -> Result<Self, CoreError> {
        Self::from_code(code)
            .ok_or_else(|| CoreError::Validation(format!("Unsupported language '{code}'")))
    }

    /// Name of the language in that language.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español",
            Language::De => "Deutsch",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Language::En => "🇬🇧",
            Language::Es => "🇪🇸",
            Language::De => "🇩🇪",
        }
    }

    /// Locale passed to [`crate::date_math::format_date`].
    pub fn date_locale(self) -> &'static str {
        match self {
            Language::En => "en-GB",
            Language::Es => "es-ES",
            Language::De => "de-DE",
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

const EN: &[(&str, &str)] = &[
    ("table.columns.startDate", "Start Date"),
    ("table.columns.endDate", "End Date"),
    ("table.columns.duration", "Duration"),
    ("table.columns.days", "Days"),
    ("table.columns.employeeName", "Employee Name"),
    ("table.columns.status", "Status"),
    ("table.columns.absenceType", "Absence Type"),
    ("table.columns.hasConflict", "Has Conflict"),
    ("table.status.approved", "Approved"),
    ("table.status.pendingApproval", "Awaiting Approval"),
    ("table.conflict.yes", "Yes"),
    ("table.conflict.no", "No"),
    ("table.duration.day", "day"),
    ("table.duration.days", "days"),
    ("table.duration.notAvailable", "N/A"),
    ("table.absenceTypes.ANNUAL_LEAVE", "Annual Leave"),
    ("table.absenceTypes.SICKNESS", "Sickness"),
    ("table.absenceTypes.PERSONAL", "Personal Leave"),
    ("table.absenceTypes.MATERNITY", "Maternity Leave"),
    ("table.absenceTypes.MEDICAL", "Medical Leave"),
    ("table.absenceTypes.PATERNITY", "Paternity Leave"),
    ("table.absenceTypes.HOLIDAY", "Holiday"),
    ("table.absenceTypes.VACATION", "Vacation"),
    ("table.absenceTypes.SICK_LEAVE", "Sick Leave"),
    ("table.messages.emptyTable", "No absence records found"),
    ("table.messages.loading", "Loading..."),
    ("table.messages.errorTitle", "Error loading data"),
    ("table.messages.tryAgain", "Try Again"),
    ("table.sortBy", "Sort by:"),
    ("table.noSorting", "No sorting"),
    ("table.pagination.previous", "Prev"),
    ("table.pagination.next", "Next"),
    ("table.pagination.pageOf", "{{current}} of {{total}}"),
    ("table.pagination.summary", "Showing {{start}} to {{end}} of {{total}} results"),
    ("page.title", "Absences Management System"),
    ("page.subtitle", "Employee Absences"),
    ("page.description", "Data from BrightHR API - absences and conflict information"),
    ("page.recordsCount", "Showing {{count}} absence records"),
    ("page.conflictsCount", "• {{count}} with conflicts"),
    ("errors.fetchAbsences", "Failed to fetch absences: {{error}}"),
    ("errors.fetchConflict", "Failed to fetch conflict for ID {{id}}: {{error}}"),
    ("errors.fetchData", "Failed to fetch data"),
    ("modal.close", "Close"),
    ("modal.employeeAbsences.title", "All Absences for {{name}}"),
    ("modal.employeeAbsences.subtitle", "Showing {{count}} absence records"),
    ("modal.employeeAbsences.noData", "No absences found"),
    ("modal.employeeAbsences.noDataDescription", "No absence records were found for {{name}}."),
    ("language.label", "Language:"),
    ("language.apply", "Apply"),
];

const ES: &[(&str, &str)] = &[
    ("table.columns.startDate", "Fecha de Inicio"),
    ("table.columns.endDate", "Fecha de Fin"),
    ("table.columns.duration", "Duración"),
    ("table.columns.days", "Días"),
    ("table.columns.employeeName", "Nombre del Empleado"),
    ("table.columns.status", "Estado"),
    ("table.columns.absenceType", "Tipo de Ausencia"),
    ("table.columns.hasConflict", "Tiene Conflicto"),
    ("table.status.approved", "Aprobado"),
    ("table.status.pendingApproval", "Pendiente de Aprobación"),
    ("table.conflict.yes", "Sí"),
    ("table.conflict.no", "No"),
    ("table.duration.day", "día"),
    ("table.duration.days", "días"),
    ("table.duration.notAvailable", "N/D"),
    ("table.absenceTypes.ANNUAL_LEAVE", "Vacaciones Anuales"),
    ("table.absenceTypes.SICKNESS", "Enfermedad"),
    ("table.absenceTypes.PERSONAL", "Permiso Personal"),
    ("table.absenceTypes.MATERNITY", "Baja por Maternidad"),
    ("table.absenceTypes.MEDICAL", "Baja Médica"),
    ("table.absenceTypes.PATERNITY", "Baja por Paternidad"),
    ("table.absenceTypes.HOLIDAY", "Día Festivo"),
    ("table.absenceTypes.VACATION", "Vacaciones"),
    ("table.absenceTypes.SICK_LEAVE", "Baja por Enfermedad"),
    ("table.messages.emptyTable", "No se encontraron registros de ausencias"),
    ("table.messages.loading", "Cargando..."),
    ("table.messages.errorTitle", "Error al cargar datos"),
    ("table.messages.tryAgain", "Intentar de Nuevo"),
    ("table.sortBy", "Ordenar por:"),
    ("table.noSorting", "Sin ordenar"),
    ("table.pagination.previous", "Anterior"),
    ("table.pagination.next", "Siguiente"),
    ("table.pagination.pageOf", "{{current}} de {{total}}"),
    ("table.pagination.summary", "Mostrando {{start}} a {{end}} de {{total}} resultados"),
    ("page.title", "Sistema de Gestión de Ausencias"),
    ("page.subtitle", "Ausencias de Empleados"),
    ("page.description", "Datos de la API de BrightHR - información de ausencias y conflictos"),
    ("page.recordsCount", "Mostrando {{count}} registros de ausencias"),
    ("page.conflictsCount", "• {{count}} con conflictos"),
    ("errors.fetchAbsences", "Error al obtener ausencias: {{error}}"),
    ("errors.fetchConflict", "Error al obtener conflicto para ID {{id}}: {{error}}"),
    ("errors.fetchData", "Error al obtener datos"),
    ("modal.close", "Cerrar"),
    ("modal.employeeAbsences.title", "Todas las Ausencias de {{name}}"),
    ("modal.employeeAbsences.subtitle", "Mostrando {{count}} registros de ausencias"),
    ("modal.employeeAbsences.noData", "No se encontraron ausencias"),
    ("modal.employeeAbsences.noDataDescription", "No se encontraron registros de ausencias para {{name}}."),
    ("language.label", "Idioma:"),
    ("language.apply", "Aplicar"),
];

const DE: &[(&str, &str)] = &[
    ("table.columns.startDate", "Startdatum"),
    ("table.columns.endDate", "Enddatum"),
    ("table.columns.duration", "Dauer"),
    ("table.columns.days", "Tage"),
    ("table.columns.employeeName", "Mitarbeitername"),
    ("table.columns.status", "Status"),
    ("table.columns.absenceType", "Abwesenheitstyp"),
    ("table.columns.hasConflict", "Hat Konflikt"),
    ("table.status.approved", "Genehmigt"),
    ("table.status.pendingApproval", "Wartend auf Genehmigung"),
    ("table.conflict.yes", "Ja"),
    ("table.conflict.no", "Nein"),
    ("table.duration.day", "Tag"),
    ("table.duration.days", "Tage"),
    ("table.duration.notAvailable", "N/V"),
    ("table.absenceTypes.ANNUAL_LEAVE", "Jahresurlaub"),
    ("table.absenceTypes.SICKNESS", "Krankheit"),
    ("table.absenceTypes.PERSONAL", "Persönlicher Urlaub"),
    ("table.absenceTypes.MATERNITY", "Mutterschaftsurlaub"),
    ("table.absenceTypes.MEDICAL", "Medizinischer Urlaub"),
    ("table.absenceTypes.PATERNITY", "Vaterschaftsurlaub"),
    ("table.absenceTypes.HOLIDAY", "Feiertag"),
    ("table.absenceTypes.VACATION", "Urlaub"),
    ("table.absenceTypes.SICK_LEAVE", "Krankenstand"),
    ("table.messages.emptyTable", "Keine Abwesenheitsdatensätze gefunden"),
    ("table.messages.loading", "Laden..."),
    ("table.messages.errorTitle", "Fehler beim Laden der Daten"),
    ("table.messages.tryAgain", "Erneut versuchen"),
    ("table.sortBy", "Sortieren nach:"),
    ("table.noSorting", "Keine Sortierung"),
    ("table.pagination.previous", "Zurück"),
    ("table.pagination.next", "Weiter"),
    ("table.pagination.pageOf", "{{current}} von {{total}}"),
    ("table.pagination.summary", "{{start}} bis {{end}} von {{total}} Ergebnissen"),
    ("page.title", "Abwesenheitsverwaltungssystem"),
    ("page.subtitle", "Mitarbeiterabwesenheiten"),
    ("page.description", "Daten von BrightHR API - Abwesenheits- und Konfliktinformationen"),
    ("page.recordsCount", "{{count}} Abwesenheitsdatensätze angezeigt"),
    ("page.conflictsCount", "• {{count}} mit Konflikten"),
    ("errors.fetchAbsences", "Fehler beim Abrufen der Abwesenheiten: {{error}}"),
    ("errors.fetchConflict", "Fehler beim Abrufen des Konflikts für ID {{id}}: {{error}}"),
    ("errors.fetchData", "Fehler beim Abrufen der Daten"),
    ("modal.close", "Schließen"),
    ("modal.employeeAbsences.title", "Alle Abwesenheiten für {{name}}"),
    ("modal.employeeAbsences.subtitle", "{{count}} Abwesenheitsdatensätze angezeigt"),
    ("modal.employeeAbsences.noData", "Keine Abwesenheiten gefunden"),
    ("modal.employeeAbsences.noDataDescription", "Es wurden keine Abwesenheitsdatensätze für {{name}} gefunden."),
    ("language.label", "Sprache:"),
    ("language.apply", "Anwenden"),
];

static CATALOGS: LazyLock<HashMap<Language, HashMap<&'static str, &'static str>>> =
    LazyLock::new(|| {
        HashMap::from([
            (Language::En, EN.iter().copied().collect()),
            (Language::Es, ES.iter().copied().collect()),
            (Language::De, DE.iter().copied().collect()),
        ])
    });

fn lookup(language: Language, key: &str) -> Option<&'static str> {
    CATALOGS.get(&language).and_then(|c| c.get(key)).copied()
}

// ---------------------------------------------------------------------------
// Translator
// ---------------------------------------------------------------------------

/// Key-to-string lookup bound to one language.
///
/// Missing keys fall back to English, then to the key itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Whether `key` exists in this language or the English fallback.
    pub fn has(&self, key: &str) -> bool {
        lookup(self.language, key).is_some() || lookup(Language::En, key).is_some()
    }

    /// Translate `key` without parameters.
    pub fn t(&self, key: &str) -> String {
        self.raw(key).to_string()
    }

    /// Translate `key`, replacing `{{name}}` placeholders with `params`.
    ///
    /// Placeholders without a matching parameter are left as-is.
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        let template = self.raw(key);
        PARAM_RE
            .replace_all(template, |caps: &regex::Captures<'_>| {
                let name = &caps[1];
                params
                    .iter()
                    .find(|(k, _)| *k == name)
                    .map(|(_, v)| (*v).to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    fn raw<'k>(&self, key: &'k str) -> &'k str {
        lookup(self.language, key)
            .or_else(|| lookup(Language::En, key))
            .unwrap_or(key)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
