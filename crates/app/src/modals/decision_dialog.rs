//! Decision prompt rendered with egui.
//!
//! Shows the agent's question with:
//! - Numbered options (picking one fills the response)
//! - The four thinking modes
//! - A "Recent" menu with previous answers
//! - Enter + Ctrl to submit, Escape to cancel

use super::Modal;
use egui::{Color32, Context, Key, RichText, ScrollArea, TextEdit};
use services::DialogSession;
use shared::{DialogOutcome, ThinkingMode};

/// Characters shown for each entry of the "Recent" menu.
const RECENT_LABEL_CHARS: usize = 40;

pub struct DecisionDialog {
    session: DialogSession,
    /// Text currently in the response field
    draft: String,
    mode: ThinkingMode,
    /// Option the draft was last filled from
    selected_option: Option<usize>,
    recent_limit: usize,
    outcome: Option<DialogOutcome>,
    /// Shown under the response field
    error: Option<String>,
    focused_once: bool,
}

impl DecisionDialog {
    pub fn new(session: DialogSession, recent_limit: usize) -> Self {
        Self {
            draft: session.response().to_string(),
            mode: session.mode(),
            selected_option: None,
            recent_limit,
            outcome: None,
            error: None,
            focused_once: false,
            session,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn mode(&self) -> ThinkingMode {
        self.mode
    }

    /// Fill the response from option `number` (1-based).
    pub fn pick_option(&mut self, number: usize) {
        match self.session.select_option(number) {
            Ok(()) => {
                self.draft = self.session.response().to_string();
                self.selected_option = Some(number);
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn pick_recent(&mut self, response: &str) {
        self.draft = response.to_string();
        self.selected_option = None;
    }

    pub fn set_mode(&mut self, mode: ThinkingMode) {
        self.mode = mode;
    }

    /// Hand the draft and mode to the session and finish.
    pub fn submit(&mut self) {
        let result = self
            .session
            .submit_with(self.draft.clone(), self.mode);
        self.finish(result);
    }

    pub fn cancel(&mut self) {
        let result = self.session.cancel();
        self.finish(result);
    }

    /// The answer, once the dialog has closed.
    pub fn take_outcome(&mut self) -> Option<DialogOutcome> {
        self.outcome.take()
    }

    fn finish(&mut self, result: Result<DialogOutcome, services::SessionError>) {
        match result {
            Ok(outcome) => self.outcome = Some(outcome),
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

impl Modal for DecisionDialog {
    fn update(&mut self, ctx: &Context) -> bool {
        if !self.is_open() {
            return false;
        }

        let request = self.session.request();
        let prompt = request.decision_context.clone();
        let default_action = request.default_action.clone();
        let has_options = request.has_options();
        let options: Vec<(usize, String)> = request
            .numbered_options()
            .map(|(n, opt)| (n, opt.to_string()))
            .collect();
        let recent: Vec<(String, String)> = self
            .session
            .recent_responses(self.recent_limit)
            .iter()
            .map(|r| (r.label(RECENT_LABEL_CHARS), r.response.clone()))
            .collect();

        let mut picked_option = None;
        let mut picked_recent = None;
        let mut submit = false;
        let mut cancel = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(RichText::new("Decision Required").strong());
            ui.add_space(12.0);

            ScrollArea::vertical()
                .id_source("decision_context")
                .max_height(220.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(&prompt).size(15.0));
                    if !default_action.is_empty() {
                        ui.add_space(8.0);
                        ui.label(RichText::new(format!("Default: {}", default_action)).weak());
                    }
                });

            ui.add_space(12.0);

            if has_options {
                ui.label(RichText::new("Select an option:").strong());
                for (n, opt) in &options {
                    let selected = self.selected_option == Some(*n);
                    if ui.radio(selected, format!("{}. {}", n, opt)).clicked() {
                        picked_option = Some(*n);
                    }
                }
                ui.add_space(4.0);
                ui.label(RichText::new("or enter a custom response").italics().weak());
                ui.add_space(8.0);
            }

            ui.horizontal(|ui| {
                ui.label(RichText::new("Thinking Mode:").strong());
                ui.label(
                    RichText::new(format!("[{}]", self.mode.display_name()))
                        .color(Color32::from_rgb(166, 227, 161)),
                );
            });
            ui.horizontal(|ui| {
                for mode in ThinkingMode::ALL {
                    let (r, g, b) = mode.color();
                    ui.radio_value(
                        &mut self.mode,
                        mode,
                        RichText::new(mode.display_name()).color(Color32::from_rgb(r, g, b)),
                    )
                    .on_hover_text(mode.description());
                }
            });

            ui.add_space(12.0);

            ui.horizontal(|ui| {
                ui.label("Your response:");
                if !recent.is_empty() {
                    ui.menu_button("Recent ▼", |ui| {
                        for (label, full) in &recent {
                            if ui.button(label).clicked() {
                                picked_recent = Some(full.clone());
                                ui.close_menu();
                            }
                        }
                    });
                }
            });

            let response = ui.add(
                TextEdit::multiline(&mut self.draft)
                    .desired_width(f32::INFINITY)
                    .desired_rows(3),
            );
            if response.changed() {
                self.selected_option = None;
            }
            if !self.focused_once {
                response.request_focus();
                self.focused_once = true;
            }

            if let Some(ref error) = self.error {
                ui.colored_label(Color32::RED, error);
            }

            ui.add_space(12.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                if ui.button(RichText::new("Submit").strong()).clicked() {
                    submit = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

        ctx.input(|i| {
            if i.key_pressed(Key::Escape) {
                cancel = true;
            }
            if i.modifiers.ctrl && i.key_pressed(Key::Enter) {
                submit = true;
            }
        });

        if let Some(n) = picked_option {
            self.pick_option(n);
        }
        if let Some(text) = picked_recent {
            self.pick_recent(&text);
        }

        if cancel {
            self.cancel();
        } else if submit {
            self.submit();
        }

        !self.is_open()
    }

    fn is_open(&self) -> bool {
        self.session.is_open()
    }

    fn close(&mut self) {
        if self.is_open() {
            self.cancel();
        }
    }
}
