//! Headless HTML projection of the book form page
//!
//! Keeps the state a browser page would hold (table body markup, input
//! values, invalid markers, notices) without a browser. The table body is
//! real markup with every record value escaped.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{BookView, FieldErrors, FormMode};
use crate::models::{BookDraft, BookRow, FormField};
use crate::utils::html::escape_html;

/// One form input with its validation marker and help text
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub value: String,
    pub invalid: bool,
    pub help: String,
}

/// Everything visible on the page at one moment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSnapshot {
    pub tbody: String,
    pub inputs: BTreeMap<FormField, InputState>,
    pub mode: FormMode,
    pub error_notice: Option<String>,
    pub success_notice: Option<String>,
    pub confirm_prompts: Vec<String>,
}

impl Default for PageSnapshot {
    fn default() -> Self {
        Self {
            tbody: String::new(),
            inputs: FormField::ALL
                .into_iter()
                .map(|f| (f, InputState::default()))
                .collect(),
            mode: FormMode::Create,
            error_notice: None,
            success_notice: None,
            confirm_prompts: Vec::new(),
        }
    }
}

impl PageSnapshot {
    pub fn input(&self, field: FormField) -> &InputState {
        // Every field is inserted by Default and never removed
        &self.inputs[&field]
    }

    pub fn submit_label(&self) -> &'static str {
        self.mode.submit_label()
    }

    pub fn cancel_visible(&self) -> bool {
        self.mode.cancel_visible()
    }

    pub fn row_count(&self) -> usize {
        self.tbody.matches("<tr").count()
    }
}

/// Render one table row, action buttons included
pub fn render_row(row: &BookRow) -> String {
    let id = escape_html(row.id.as_str());
    let mut html = format!("<tr data-id=\"{}\">", id);

    for cell in [
        row.id.as_str(),
        row.title.as_str(),
        row.author.as_str(),
        row.isbn.as_str(),
        row.price.as_str(),
        row.publish_date.as_str(),
    ] {
        html.push_str("<td>");
        html.push_str(&escape_html(cell));
        html.push_str("</td>");
    }

    html.push_str(&format!(
        "<td>\
         <button type=\"button\" class=\"action-btn edit-btn\" data-action=\"edit\" data-id=\"{id}\">Edit</button>\
         <button type=\"button\" class=\"action-btn delete-btn\" data-action=\"delete\" data-id=\"{id}\">Delete</button>\
         </td></tr>"
    ));
    html
}

pub struct HtmlView {
    page: RwLock<PageSnapshot>,
    confirm_answer: AtomicBool,
}

impl Default for HtmlView {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlView {
    /// A page whose confirmation prompts are accepted
    pub fn new() -> Self {
        Self {
            page: RwLock::new(PageSnapshot::default()),
            confirm_answer: AtomicBool::new(true),
        }
    }

    /// Answer every later confirmation prompt with `answer`
    pub fn set_confirm_answer(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.read().clone()
    }

    pub fn tbody(&self) -> String {
        self.read().tbody.clone()
    }

    /// Type into an input, as a user would
    pub fn set_input(&self, field: FormField, value: &str) {
        if let Some(input) = self.write().inputs.get_mut(&field) {
            input.value = value.to_string();
        }
    }

    /// Collect the current input values into a draft
    pub fn collect_draft(&self) -> BookDraft {
        let page = self.read();
        BookDraft::collect(
            &page.input(FormField::Title).value,
            &page.input(FormField::Author).value,
            &page.input(FormField::Isbn).value,
            &page.input(FormField::Price).value,
            &page.input(FormField::PublishDate).value,
        )
    }

    fn read(&self) -> RwLockReadGuard<'_, PageSnapshot> {
        self.page.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PageSnapshot> {
        self.page.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BookView for HtmlView {
    fn render_list(&self, rows: &[BookRow]) {
        let tbody: String = rows.iter().map(render_row).collect();
        self.write().tbody = tbody;
    }

    fn render_error(&self, fields: &FieldErrors, summary: &str) {
        let mut page = self.write();
        for (field, message) in fields {
            if let Some(input) = page.inputs.get_mut(field) {
                input.invalid = true;
                input.help = message.clone();
            }
        }
        page.success_notice = None;
        page.error_notice = Some(summary.to_string());
    }

    fn clear_errors(&self) {
        let mut page = self.write();
        for input in page.inputs.values_mut() {
            input.invalid = false;
            input.help.clear();
        }
        page.error_notice = None;
    }

    fn show_success(&self, message: &str) {
        let mut page = self.write();
        page.error_notice = None;
        page.success_notice = Some(message.to_string());
    }

    fn hide_success(&self) {
        self.write().success_notice = None;
    }

    fn fill_form(&self, draft: &BookDraft) {
        let mut page = self.write();
        for field in FormField::ALL {
            if let Some(input) = page.inputs.get_mut(&field) {
                input.value = draft.value(field).to_string();
            }
        }
    }

    fn reset_form(&self) {
        let mut page = self.write();
        for input in page.inputs.values_mut() {
            *input = InputState::default();
        }
        page.mode = FormMode::Create;
        page.error_notice = None;
        page.success_notice = None;
    }

    fn set_mode(&self, mode: FormMode) {
        self.write().mode = mode;
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.write().confirm_prompts.push(prompt.to_string());
        self.confirm_answer.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookId;

    fn row(title: &str) -> BookRow {
        BookRow {
            id: BookId::from(1),
            title: title.to_string(),
            author: "B".to_string(),
            isbn: "1234567890".to_string(),
            price: "1000".to_string(),
            publish_date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_render_row_escapes_text() {
        let html = render_row(&row("<script>alert(\"x\")</script>"));
        assert!(html.contains("<td>&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;</td>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_list_replaces_rows() {
        let view = HtmlView::new();
        view.render_list(&[row("A"), row("B")]);
        assert_eq!(view.snapshot().row_count(), 2);

        view.render_list(&[row("C")]);
        let page = view.snapshot();
        assert_eq!(page.row_count(), 1);
        assert!(page.tbody.contains("<td>C</td>"));
        assert!(!page.tbody.contains("<td>A</td>"));
    }

    #[test]
    fn test_errors_are_cleared_and_form_kept() {
        let view = HtmlView::new();
        view.set_input(FormField::Title, "Dune");

        let fields = FieldErrors::from([(FormField::Isbn, "taken".to_string())]);
        view.render_error(&fields, "check your input");

        let page = view.snapshot();
        assert!(page.input(FormField::Isbn).invalid);
        assert_eq!(page.input(FormField::Isbn).help, "taken");
        assert_eq!(page.input(FormField::Title).value, "Dune");

        view.clear_errors();
        let page = view.snapshot();
        assert!(!page.input(FormField::Isbn).invalid);
        assert_eq!(page.error_notice, None);
        assert_eq!(page.input(FormField::Title).value, "Dune");
    }

    #[test]
    fn test_edit_mode_labels() {
        let view = HtmlView::new();
        assert_eq!(view.snapshot().submit_label(), "Create");
        assert!(!view.snapshot().cancel_visible());

        view.set_mode(FormMode::Edit);
        assert_eq!(view.snapshot().submit_label(), "Update");
        assert!(view.snapshot().cancel_visible());

        view.reset_form();
        assert_eq!(view.snapshot().submit_label(), "Create");
    }

    #[test]
    fn test_collect_draft_trims_inputs() {
        let view = HtmlView::new();
        view.set_input(FormField::Title, "  Dune ");
        view.set_input(FormField::Price, " 100");

        let draft = view.collect_draft();
        assert_eq!(draft.title, "Dune");
        assert_eq!(draft.price, "100");
    }
}
