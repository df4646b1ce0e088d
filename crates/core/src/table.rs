//! Generic sortable, paginated table engine.
//!
//! The engine knows nothing about what the columns mean. A row type
//! implements [`TableRow`] to expose its fields as [`CellValue`]s through a
//! typed field selector, and a list of [`ColumnDescriptor`]s says which
//! fields to show, how to label them, and whether they sort. [`Table::view`]
//! turns data plus [`TableState`] into a [`TableView`] that a presenter can
//! draw in any layout; every layout draws the same view.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Maximum number of numbered page links shown at once.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// Empty-state message used when the caller does not supply one.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

// ---------------------------------------------------------------------------
// Row and field abstraction
// ---------------------------------------------------------------------------

/// A typed selector for one field of a row type.
pub trait FieldKey: Copy + Eq + fmt::Debug + 'static {
    /// Stable name of the field, used in URLs and serialized views.
    fn name(self) -> &'static str;

    /// Inverse of [`FieldKey::name`].
    fn from_name(name: &str) -> Option<Self>;
}

/// A record the table can display.
pub trait TableRow {
    type Field: FieldKey;

    /// Value of `field` for this row.
    fn value(&self, field: Self::Field) -> CellValue;
}

/// A field value as seen by the table.
///
/// Values of the same kind compare naturally. Mixed kinds order as
/// `Null < Bool < Int < Text`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl CellValue {
    /// Default string form. `Null` renders as an empty string.
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// JavaScript-style truthiness: `Null`, `false`, `0` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::Bool(b) => *b,
            CellValue::Int(i) => *i != 0,
            CellValue::Text(s) => !s.is_empty(),
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

/// Rendered content of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "lowercase")]
pub enum Cell {
    /// Plain text; the presenter escapes it.
    Text(String),
    /// A trusted markup fragment produced by a renderer.
    Markup(String),
}

impl Cell {
    pub fn content(&self) -> &str {
        match self {
            Cell::Text(s) | Cell::Markup(s) => s,
        }
    }
}

/// Formatter called as `render(value, row, absolute_row_index)`.
pub type CellRenderer<R> = Box<dyn Fn(&CellValue, &R, usize) -> Cell + Send + Sync>;

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// Describes one column of a table over rows of type `R`.
pub struct ColumnDescriptor<R: TableRow> {
    pub key: R::Field,
    pub label: String,
    pub sortable: bool,
    pub render: Option<CellRenderer<R>>,
    pub class_name: Option<&'static str>,
}

impl<R: TableRow> ColumnDescriptor<R> {
    /// A non-sortable column shown with the default string form.
    pub fn new(key: R::Field, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
            sortable: false,
            render: None,
            class_name: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn with_renderer(
        mut self,
        render: impl Fn(&CellValue, &R, usize) -> Cell + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    pub fn with_class(mut self, class_name: &'static str) -> Self {
        self.class_name = Some(class_name);
        self
    }

    /// Produce the cell for `row` at absolute position `index`.
    pub fn cell(&self, row: &R, index: usize) -> Cell {
        let value = row.value(self.key);
        match &self.render {
            Some(render) => render(&value, row, index),
            None => Cell::Text(value.display()),
        }
    }
}

impl<R: TableRow> fmt::Debug for ColumnDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .field("class_name", &self.class_name)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Sort state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(CoreError::Validation(format!(
                "Sort direction must be 'asc' or 'desc' (got '{other}')"
            ))),
        }
    }

    /// Arrow shown next to a sorted column label.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// Which column the data is sorted by, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    pub key: Option<F>,
    pub direction: SortDirection,
}

impl<F> Default for SortState<F> {
    fn default() -> Self {
        Self {
            key: None,
            direction: SortDirection::Asc,
        }
    }
}

impl<F: FieldKey> SortState<F> {
    pub fn by(key: F, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Apply one sort click on `key`.
    ///
    /// A new column sorts ascending, the current ascending column flips to
    /// descending, and the current descending column returns to ascending.
    pub fn toggle(&mut self, key: F) {
        self.direction = if self.key == Some(key) && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        self.key = Some(key);
    }

    /// Compare two values under this sort's direction.
    pub fn compare(&self, a: &CellValue, b: &CellValue) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let ordering = a.cmp(b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Direction to show for `key`, if it is the sorted column.
    pub fn indicator_for(&self, key: F) -> Option<SortDirection> {
        (self.key == Some(key)).then_some(self.direction)
    }
}

/// Return `data` ordered by `sort`, leaving `data` untouched.
///
/// With no sort key the original order is kept.
pub fn sort_rows<'a, R: TableRow>(data: &'a [R], sort: &SortState<R::Field>) -> Vec<&'a R> {
    let Some(key) = sort.key else {
        return data.iter().collect();
    };

    let mut keyed: Vec<(CellValue, &'a R)> = data.iter().map(|r| (r.value(key), r)).collect();
    keyed.sort_by(|(a, _), (b, _)| sort.compare(a, b));
    keyed.into_iter().map(|(_, r)| r).collect()
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Number of pages needed for `total_items`; zero items is zero pages.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// The slice of the sorted data shown on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current_page: usize,
    pub total_pages: usize,
    /// Absolute index of the first row on the page.
    pub start_index: usize,
    /// Exclusive end, never past `total_items`.
    pub end_index: usize,
    pub total_items: usize,
}

impl PageWindow {
    pub fn compute(total_items: usize, page_size: usize, current_page: usize) -> Self {
        let page_size = page_size.max(1);
        let current_page = current_page.max(1);
        let start_index = ((current_page - 1) * page_size).min(total_items);
        let end_index = (start_index + page_size).min(total_items);
        Self {
            current_page,
            total_pages: total_pages(total_items, page_size),
            start_index,
            end_index,
            total_items,
        }
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start_index..self.end_index
    }
}

/// Page numbers to show as direct links, at most [`MAX_VISIBLE_PAGES`].
pub fn page_numbers(current_page: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).collect();
    }
    let start = current_page
        .saturating_sub(MAX_VISIBLE_PAGES / 2)
        .max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total_pages);
    (start..=end).collect()
}

// ---------------------------------------------------------------------------
// Table state
// ---------------------------------------------------------------------------

/// Interactive state of one table: sort and current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableState<F> {
    pub sort: SortState<F>,
    /// 1-based.
    pub current_page: usize,
}

impl<F> Default for TableState<F> {
    fn default() -> Self {
        Self {
            sort: SortState::default(),
            current_page: 1,
        }
    }
}

impl<F: FieldKey> TableState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort by `key` if it names a sortable column.
    ///
    /// Returns `false` and leaves the state unchanged otherwise.
    pub fn handle_sort<R>(&mut self, columns: &[ColumnDescriptor<R>], key: F) -> bool
    where
        R: TableRow<Field = F>,
    {
        let sortable = columns.iter().any(|c| c.key == key && c.sortable);
        if !sortable {
            return false;
        }
        self.sort.toggle(key);
        true
    }

    /// Move to `page` if it lies in `1..=total_pages`.
    ///
    /// Returns `false` and leaves the state unchanged otherwise.
    pub fn handle_page_change(&mut self, page: usize, total_pages: usize) -> bool {
        if page >= 1 && page <= total_pages {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    /// Bring `current_page` back into range after the data changed size.
    ///
    /// Clamps to the last page; with no pages at all, resets to page 1.
    /// Returns whether the page moved.
    pub fn reconcile(&mut self, total_pages: usize) -> bool {
        let target = self.current_page.clamp(1, total_pages.max(1));
        let moved = target != self.current_page;
        self.current_page = target;
        moved
    }
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub key: &'static str,
    pub label: String,
    pub sortable: bool,
    pub class_name: Option<&'static str>,
    pub indicator: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub key: &'static str,
    pub label: String,
    pub class_name: Option<&'static str>,
    pub cell: Cell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// Absolute index of the row in the sorted data.
    pub index: usize,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum TableBody {
    /// Data is not available yet; draw this many placeholder rows.
    Loading { placeholders: usize },
    /// There is nothing to show.
    Empty { message: String },
    Rows { rows: Vec<RowView> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub window: PageWindow,
    pub pages: Vec<usize>,
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortView {
    pub key: Option<&'static str>,
    pub direction: SortDirection,
}

/// Everything a presenter needs to draw one page of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub headers: Vec<HeaderView>,
    /// Sortable columns only, for compact sort selectors.
    pub sort_options: Vec<HeaderView>,
    pub sort: SortView,
    pub window: PageWindow,
    pub body: TableBody,
    /// Present only when there is more than one page.
    pub pagination: Option<PaginationView>,
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Column set plus display options for one table.
pub struct Table<R: TableRow> {
    columns: Vec<ColumnDescriptor<R>>,
    page_size: usize,
    loading: bool,
    empty_message: String,
}

impl<R: TableRow> Table<R> {
    pub fn new(columns: Vec<ColumnDescriptor<R>>) -> Self {
        Self {
            columns,
            page_size: DEFAULT_PAGE_SIZE,
            loading: false,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }

    /// Rows per page; values below 1 are raised to 1.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn columns(&self) -> &[ColumnDescriptor<R>] {
        &self.columns
    }

    pub fn get_page_size(&self) -> usize {
        self.page_size
    }

    /// Sort by `key` through [`TableState::handle_sort`] against this
    /// table's columns.
    pub fn sort_by(&self, state: &mut TableState<R::Field>, key: R::Field) -> bool {
        state.handle_sort(&self.columns, key)
    }

    /// Pages needed for `total_items` at this table's page size.
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_pages(total_items, self.page_size)
    }

    /// Build the view of `data` for `state`.
    ///
    /// `state` is reconciled against the current data size first, so a page
    /// that no longer exists is clamped rather than indexed.
    pub fn view(&self, data: &[R], state: &mut TableState<R::Field>) -> TableView {
        let sorted = sort_rows(data, &state.sort);
        let pages = self.total_pages(sorted.len());
        state.reconcile(pages);
        let window = PageWindow::compute(sorted.len(), self.page_size, state.current_page);

        let headers: Vec<HeaderView> = self
            .columns
            .iter()
            .map(|c| HeaderView {
                key: c.key.name(),
                label: c.label.clone(),
                sortable: c.sortable,
                class_name: c.class_name,
                indicator: state.sort.indicator_for(c.key),
            })
            .collect();
        let sort_options = headers.iter().filter(|h| h.sortable).cloned().collect();

        let body = if self.loading {
            TableBody::Loading {
                placeholders: self.page_size,
            }
        } else if sorted.is_empty() {
            TableBody::Empty {
                message: self.empty_message.clone(),
            }
        } else {
            let rows = sorted[window.range()]
                .iter()
                .enumerate()
                .map(|(i, row)| self.row_view(row, window.start_index + i))
                .collect();
            TableBody::Rows { rows }
        };

        let pagination = (!self.loading && window.total_pages > 1).then(|| PaginationView {
            window,
            pages: page_numbers(window.current_page, window.total_pages),
            previous: (window.current_page > 1).then(|| window.current_page - 1),
            next: (window.current_page < window.total_pages).then(|| window.current_page + 1),
        });

        TableView {
            headers,
            sort_options,
            sort: SortView {
                key: state.sort.key.map(FieldKey::name),
                direction: state.sort.direction,
            },
            window,
            body,
            pagination,
        }
    }

    fn row_view(&self, row: &R, index: usize) -> RowView {
        RowView {
            index,
            cells: self
                .columns
                .iter()
                .map(|c| CellView {
                    key: c.key.name(),
                    label: c.label.clone(),
                    class_name: c.class_name,
                    cell: c.cell(row, index),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[derive(Debug, Clone)]
    struct User {
        id: i64,
        name: Option<String>,
        email: String,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum UserField {
        Id,
        Name,
        Email,
    }

    impl FieldKey for UserField {
        fn name(self) -> &'static str {
            match self {
                UserField::Id => "id",
                UserField::Name => "name",
                UserField::Email => "email",
            }
        }

        fn from_name(name: &str) -> Option<Self> {
            match name {
                "id" => Some(UserField::Id),
                "name" => Some(UserField::Name),
                "email" => Some(UserField::Email),
                _ => None,
            }
        }
    }

    impl TableRow for User {
        type Field = UserField;

        fn value(&self, field: UserField) -> CellValue {
            match field {
                UserField::Id => self.id.into(),
                UserField::Name => self.name.clone().into(),
                UserField::Email => self.email.as_str().into(),
            }
        }
    }

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            name: Some(name.to_string()),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    fn users(n: usize) -> Vec<User> {
        (0..n as i64).map(|i| user(i + 1, &format!("User{i:03}"))).collect()
    }

    fn columns() -> Vec<ColumnDescriptor<User>> {
        vec![
            ColumnDescriptor::new(UserField::Id, "ID").sortable(),
            ColumnDescriptor::new(UserField::Name, "Name").sortable(),
            ColumnDescriptor::new(UserField::Email, "Email"),
        ]
    }

    fn ids(rows: &[&User]) -> Vec<i64> {
        rows.iter().map(|u| u.id).collect()
    }

    // -- sorting -------------------------------------------------------------

    #[test]
    fn toggle_cycle_asc_desc_asc() {
        let cols = columns();
        let mut state = TableState::new();

        assert!(state.handle_sort(&cols, UserField::Name));
        assert_eq!(state.sort, SortState::by(UserField::Name, SortDirection::Asc));

        state.handle_sort(&cols, UserField::Name);
        assert_eq!(state.sort, SortState::by(UserField::Name, SortDirection::Desc));

        state.handle_sort(&cols, UserField::Name);
        assert_eq!(state.sort, SortState::by(UserField::Name, SortDirection::Asc));
    }

    #[test]
    fn switching_column_starts_ascending() {
        let cols = columns();
        let mut state = TableState::new();
        state.handle_sort(&cols, UserField::Name);
        state.handle_sort(&cols, UserField::Name);

        state.handle_sort(&cols, UserField::Id);
        assert_eq!(state.sort, SortState::by(UserField::Id, SortDirection::Asc));
    }

    #[test]
    fn non_sortable_column_is_noop() {
        let cols = columns();
        let mut state = TableState::new();
        state.handle_sort(&cols, UserField::Id);
        let before = state;

        assert!(!state.handle_sort(&cols, UserField::Email));
        assert_eq!(state, before);
    }

    #[test]
    fn unsorted_keeps_input_order() {
        let data = vec![user(3, "C"), user(1, "A"), user(2, "B")];
        let sorted = sort_rows(&data, &SortState::default());
        assert_eq!(ids(&sorted), vec![3, 1, 2]);
    }

    #[test]
    fn ascending_then_descending_reverses_distinct_keys() {
        let data = vec![user(3, "Carol"), user(1, "Alice"), user(4, "Dan"), user(2, "Bob")];

        let asc = sort_rows(&data, &SortState::by(UserField::Name, SortDirection::Asc));
        let desc = sort_rows(&data, &SortState::by(UserField::Name, SortDirection::Desc));

        let mut reversed = ids(&asc);
        reversed.reverse();
        assert_eq!(ids(&asc), vec![1, 2, 3, 4]);
        assert_eq!(ids(&desc), reversed);
    }

    #[test]
    fn sorting_does_not_mutate_input() {
        let data = vec![user(2, "B"), user(1, "A")];
        let _ = sort_rows(&data, &SortState::by(UserField::Id, SortDirection::Asc));
        assert_eq!(data[0].id, 2);
    }

    #[test]
    fn nulls_sort_before_text() {
        let mut nameless = user(9, "x");
        nameless.name = None;
        let data = vec![user(1, "Alice"), nameless];

        let asc = sort_rows(&data, &SortState::by(UserField::Name, SortDirection::Asc));
        assert_eq!(ids(&asc), vec![9, 1]);
    }

    #[test]
    fn equal_values_compare_equal_in_both_directions() {
        let asc = SortState::by(UserField::Id, SortDirection::Asc);
        let desc = SortState::by(UserField::Id, SortDirection::Desc);
        let v = CellValue::Int(5);
        assert_eq!(asc.compare(&v, &v), Ordering::Equal);
        assert_eq!(desc.compare(&v, &v), Ordering::Equal);
        assert_eq!(desc.compare(&CellValue::Int(1), &CellValue::Int(2)), Ordering::Greater);
    }

    #[test]
    fn bool_ordering_false_before_true() {
        assert!(CellValue::Bool(false) < CellValue::Bool(true));
    }

    // -- pagination ----------------------------------------------------------

    #[test]
    fn total_pages_is_ceiling() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 7), 4);
    }

    #[test]
    fn pages_cover_all_rows_without_overlap() {
        for n in 0..40 {
            for p in 1..12 {
                let pages = total_pages(n, p);
                let mut covered = Vec::new();
                for page in 1..=pages {
                    covered.extend(PageWindow::compute(n, p, page).range());
                }
                assert_eq!(covered, (0..n).collect::<Vec<_>>(), "n={n} p={p}");
            }
        }
    }

    #[test]
    fn out_of_range_page_change_is_rejected() {
        let mut state: TableState<UserField> = TableState::new();
        assert!(state.handle_page_change(2, 3));

        assert!(!state.handle_page_change(0, 3));
        assert!(!state.handle_page_change(4, 3));
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn page_change_with_no_pages_is_rejected() {
        let mut state: TableState<UserField> = TableState::new();
        assert!(!state.handle_page_change(1, 0));
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn page_numbers_window() {
        assert_eq!(page_numbers(1, 3), vec![1, 2, 3]);
        assert_eq!(page_numbers(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_numbers(6, 10), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_numbers(10, 10), vec![8, 9, 10]);
    }

    // -- shrinking data ------------------------------------------------------

    #[test]
    fn shrinking_data_clamps_to_last_page() {
        let table = Table::new(columns()).page_size(10);
        let mut state = TableState::new();
        let big = users(45);
        table.view(&big, &mut state);
        assert!(state.handle_page_change(5, table.total_pages(big.len())));

        let small = users(15);
        let view = table.view(&small, &mut state);

        assert_eq!(state.current_page, 2);
        assert_eq!(view.window.start_index, 10);
        assert_matches!(view.body, TableBody::Rows { ref rows } if rows.len() == 5);
    }

    #[test]
    fn shrinking_to_nothing_resets_to_first_page() {
        let table = Table::new(columns()).empty_message("nothing here");
        let mut state = TableState::new();
        state.current_page = 3;

        let view = table.view(&[], &mut state);

        assert_eq!(state.current_page, 1);
        assert_eq!(
            view.body,
            TableBody::Empty {
                message: "nothing here".to_string()
            }
        );
        assert!(view.pagination.is_none());
    }

    // -- view ----------------------------------------------------------------

    #[test]
    fn loading_shows_page_size_placeholders_and_no_rows() {
        let table = Table::new(columns()).page_size(7).loading(true);
        let view = table.view(&users(20), &mut TableState::new());

        assert_eq!(view.body, TableBody::Loading { placeholders: 7 });
        assert!(view.pagination.is_none());
    }

    #[test]
    fn renderer_receives_absolute_index() {
        let cols: Vec<ColumnDescriptor<User>> = vec![
            ColumnDescriptor::new(UserField::Id, "ID")
                .with_renderer(|v, row: &User, idx| Cell::Text(format!("{}:{}:{idx}", v.display(), row.id))),
        ];
        let table = Table::new(cols).page_size(3);
        let mut state = TableState::new();
        state.handle_page_change(2, 2);

        let view = table.view(&users(5), &mut state);

        let TableBody::Rows { rows } = view.body else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 3);
        assert_eq!(rows[0].cells[0].cell, Cell::Text("4:4:3".to_string()));
        assert_eq!(rows[1].cells[0].cell, Cell::Text("5:5:4".to_string()));
    }

    #[test]
    fn null_values_render_as_empty_string() {
        let mut nameless = user(1, "x");
        nameless.name = None;
        let table = Table::new(columns());

        let view = table.view(&[nameless], &mut TableState::new());

        let TableBody::Rows { rows } = view.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].cells[1].cell, Cell::Text(String::new()));
    }

    #[test]
    fn headers_carry_sort_indicator_and_options() {
        let table = Table::new(columns());
        let mut state = TableState::new();
        table.sort_by(&mut state, UserField::Name);
        table.sort_by(&mut state, UserField::Name);

        let view = table.view(&users(3), &mut state);

        assert_eq!(view.headers.len(), 3);
        assert_eq!(view.headers[1].indicator, Some(SortDirection::Desc));
        assert_eq!(view.headers[0].indicator, None);
        assert_eq!(
            view.sort_options.iter().map(|h| h.key).collect::<Vec<_>>(),
            vec!["id", "name"]
        );
        assert_eq!(view.sort.key, Some("name"));
    }

    #[test]
    fn pagination_links_at_edges() {
        let table = Table::new(columns()).page_size(10);
        let mut state = TableState::new();

        let first = table.view(&users(25), &mut state);
        let p = first.pagination.expect("three pages");
        assert_eq!(p.previous, None);
        assert_eq!(p.next, Some(2));
        assert_eq!(p.pages, vec![1, 2, 3]);

        state.handle_page_change(3, 3);
        let last = table.view(&users(25), &mut state);
        let p = last.pagination.expect("three pages");
        assert_eq!(p.previous, Some(2));
        assert_eq!(p.next, None);
        assert_eq!(p.window.end_index, 25);
    }

    #[test]
    fn single_page_has_no_pagination() {
        let table = Table::new(columns());
        let view = table.view(&users(4), &mut TableState::new());
        assert!(view.pagination.is_none());
    }

    #[test]
    fn page_size_below_one_is_raised() {
        let table: Table<User> = Table::new(columns()).page_size(0);
        assert_eq!(table.get_page_size(), 1);
    }

    #[test]
    fn direction_parsing() {
        assert_eq!(SortDirection::parse("DESC").unwrap(), SortDirection::Desc);
        assert_matches!(SortDirection::parse("up"), Err(CoreError::Validation(_)));
    }
}
