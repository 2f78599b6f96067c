use crate::web::types::{Field, FieldValidation};

/// Everything the `FormController` does to the page goes through this trait.
pub trait FormView {
    /// Static labels: the name and size of the file, and the year in the footer.
    fn show_page_info(&mut self, display_name: &str, file_size: &str, year: i32);

    /// Feedback next to a single input.
    fn show_field_validation(&mut self, field: Field, validation: &FieldValidation);

    fn set_submit_enabled(&mut self, enabled: bool);
    fn set_submit_label(&mut self, label: &str);

    /// The status indicator shown while a request is in flight. Showing it also disables submit.
    fn set_loading(&mut self, loading: bool);

    fn show_success(&mut self, message: &str);
    fn show_error(&mut self, message: &str);
    /// Hides the status, success and error messages.
    fn hide_messages(&mut self);

    /// Starts a same-origin download of `file_name`.
    fn trigger_download(&mut self, file_name: &str);

    /// Empties every input and removes the per-field feedback.
    fn clear_inputs(&mut self);
    fn focus(&mut self, field: Field);
}
