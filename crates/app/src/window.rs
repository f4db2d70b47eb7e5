//! Native window front-end.

use crate::modals::{DecisionDialog, Modal};
use anyhow::{anyhow, Result};
use eframe::egui;
use services::DialogSession;
use shared::DialogOutcome;
use tokio::sync::oneshot;

/// Show the prompt in an always-on-top window and block until it closes.
///
/// `run_native` only returns once the window is gone, so nothing is left
/// on screen when the outcome is reported. Closing the window through the
/// window manager counts as cancelling.
pub fn run_window(session: DialogSession, recent_limit: usize) -> Result<DialogOutcome> {
    let (tx, mut rx) = oneshot::channel();
    let dialog = DecisionDialog::new(session, recent_limit);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Decision Required")
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([500.0, 400.0])
            .with_always_on_top(),
        ..Default::default()
    };
    eframe::run_native(
        "Decision Required",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Box::new(DecisionWindow {
                dialog,
                outcome_tx: Some(tx),
            })
        }),
    )
    .map_err(|e| anyhow!("Failed to open decision window: {}", e))?;

    Ok(rx.try_recv().unwrap_or(DialogOutcome::Cancelled))
}

struct DecisionWindow {
    dialog: DecisionDialog,
    outcome_tx: Option<oneshot::Sender<DialogOutcome>>,
}

impl DecisionWindow {
    /// Run one frame of the dialog. Returns true once the window should
    /// close, after the outcome has been handed over.
    fn step(&mut self, ctx: &egui::Context) -> bool {
        let should_close = if ctx.input(|i| i.viewport().close_requested()) {
            self.dialog.close();
            true
        } else {
            self.dialog.update(ctx)
        };

        if should_close {
            if let Some(outcome) = self.dialog.take_outcome() {
                if let Some(tx) = self.outcome_tx.take() {
                    if tx.send(outcome).is_err() {
                        tracing::debug!("Nobody is waiting for the dialog outcome");
                    }
                }
            }
        }
        should_close
    }
}

impl eframe::App for DecisionWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.step(ctx) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
