//! Query parameter types shared by the page and API handlers, and the link
//! builder that writes them back into URLs.

use std::fmt::Write;

use absences_core::absence::RowField;
use absences_core::i18n::Language;
use absences_core::table::{FieldKey, SortState};
use serde::Deserialize;

/// Query parameters of the dashboard page (`/?lang=&sort=&dir=&page=&employee=`).
///
/// Everything is optional and parsed leniently by the handler: unknown
/// values fall back to defaults instead of failing the page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub lang: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub page: Option<String>,
    pub employee: Option<String>,
}

/// Form fields posted by the retry button. Sort survives the retry; the page
/// does not.
#[derive(Debug, Default, Deserialize)]
pub struct RetryForm {
    pub lang: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

/// Optional ordering for the JSON listing (`?sort=&dir=`). Validated
/// strictly.
#[derive(Debug, Default, Deserialize)]
pub struct SortParams {
    pub sort: Option<String>,
    pub dir: Option<String>,
}

/// Everything that identifies one rendering of the dashboard page.
///
/// Handlers derive new links from the current one (`with_*`) so sort,
/// page, language and the open employee survive navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLink {
    pub language: Language,
    pub sort: SortState<RowField>,
    pub page: usize,
    pub employee: Option<String>,
}

impl DashboardLink {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            sort: SortState::default(),
            page: 1,
            employee: None,
        }
    }

    pub fn with_sort(&self, sort: SortState<RowField>) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn with_employee(&self, name: &str) -> Self {
        Self {
            employee: Some(name.to_string()),
            ..self.clone()
        }
    }

    pub fn without_employee(&self) -> Self {
        Self {
            employee: None,
            ..self.clone()
        }
    }

    /// Relative URL of the page this link describes.
    ///
    /// Defaults (no sort, page 1, no employee) are left out.
    pub fn href(&self) -> String {
        let mut href = format!("/?lang={}", self.language.code());
        if let Some(key) = self.sort.key {
            let _ = write!(
                href,
                "&sort={}&dir={}",
                key.name(),
                self.sort.direction.as_str()
            );
        }
        if self.page > 1 {
            let _ = write!(href, "&page={}", self.page);
        }
        if let Some(name) = &self.employee {
            let _ = write!(href, "&employee={}", urlencoding::encode(name));
        }
        href
    }
}
