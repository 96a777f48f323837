//! Access code entry form

use log::info;

/// Codes accepted by default.
pub const DEFAULT_ACCESS_CODES: [&str; 3] = ["ABC", "DEF", "GHI"];

/// Check an entered code against the allow list.
///
/// Matching ignores letter case but is otherwise exact; surrounding
/// whitespace is not stripped, so `" ABC"` is rejected.
pub fn validate_code<S: AsRef<str>>(input: &str, allowed: &[S]) -> bool {
    let normalized = input.to_uppercase();
    allowed.iter().any(|code| code.as_ref() == normalized)
}

/// Outcome of the last submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Accepted,
    Rejected,
}

/// Egui window for entering an access code.
pub struct AccessForm {
    codes: Vec<String>,
    input: String,
    status: Option<FormStatus>,
}

impl AccessForm {
    /// Create a form accepting the given codes
    pub fn new<S: Into<String>>(codes: impl IntoIterator<Item = S>) -> Self {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
            input: String::new(),
            status: None,
        }
    }

    /// Outcome of the last submission, if any
    pub fn status(&self) -> Option<FormStatus> {
        self.status
    }

    /// Validate the current input and record the outcome
    pub fn submit(&mut self) {
        let accepted = validate_code(&self.input, &self.codes);
        info!(
            "access code {:?} {}",
            self.input,
            if accepted { "accepted" } else { "rejected" }
        );
        self.status = Some(if accepted {
            FormStatus::Accepted
        } else {
            FormStatus::Rejected
        });
    }

    /// Draw the form window
    pub fn ui(&mut self, ctx: &egui::Context) {
        egui::Window::new("Access")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Code:");
                    let response = ui.text_edit_singleline(&mut self.input);
                    let submitted = response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("Submit").clicked() || submitted {
                        self.submit();
                    }
                });
                match self.status {
                    Some(FormStatus::Accepted) => {
                        ui.colored_label(egui::Color32::LIGHT_GREEN, "Code accepted");
                    }
                    Some(FormStatus::Rejected) => {
                        ui.colored_label(egui::Color32::LIGHT_RED, "Invalid code");
                    }
                    None => {}
                }
            });
    }
}

impl Default for AccessForm {
    fn default() -> Self {
        Self::new(DEFAULT_ACCESS_CODES)
    }
}
