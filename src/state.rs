use std::collections::VecDeque;
use std::time::Instant;

use chrono::Weekday;

use crate::config::Config;
use crate::form::{FormState, TriggerState};
use crate::predict_client::{Prediction, PredictionRequest};
use crate::result_view::{ResultView, format_probability};
use crate::slideshow::{BackgroundLayer, build_layers};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Success(Prediction),
    /// The backend answered `success: false`.
    Rejected(String),
    /// Transport or parse failure.
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum Delta {
    Log(String),
    SubmissionSettled {
        generation: u64,
        outcome: SubmissionOutcome,
    },
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    Predict {
        generation: u64,
        request: PredictionRequest,
    },
}

/// Everything the handlers read and write. Owned by the UI loop.
#[derive(Debug)]
pub struct AppState {
    pub form: FormState,
    pub result: ResultView,
    pub alert: Option<String>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    /// Bumped once per submission; scheduled result callbacks compare against it.
    pub generation: u64,
    pub layers: Vec<BackgroundLayer>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: &Config, today: Weekday) -> Self {
        Self {
            form: FormState::new(&config.teams, today),
            result: ResultView::new(),
            alert: None,
            logs: VecDeque::new(),
            help_overlay: false,
            generation: 0,
            layers: build_layers(&config.background_images, config.background_cycle),
            started_at: Instant::now(),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn show_alert(&mut self, msg: impl Into<String>) {
        self.alert = Some(msg.into());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn is_busy(&self) -> bool {
        self.form.trigger == TriggerState::Busy
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    apply_delta_at(state, delta, Instant::now());
}

pub fn apply_delta_at(state: &mut AppState, delta: Delta, now: Instant) {
    match delta {
        Delta::Log(line) => state.push_log(line),
        Delta::SubmissionSettled {
            generation,
            outcome,
        } => {
            // Every settled attempt releases the trigger, whatever happened.
            state.form.trigger = TriggerState::Idle;
            if generation != state.generation {
                state.push_log(format!(
                    "[WARN] Settled submission #{generation} is older than #{}",
                    state.generation
                ));
            }
            match outcome {
                SubmissionOutcome::Success(prediction) => {
                    state.push_log(format!(
                        "[INFO] Prediction #{generation}: {}% ({})",
                        format_probability(prediction.probability),
                        prediction.category.as_str()
                    ));
                    state.result.show(&prediction, generation, now);
                }
                SubmissionOutcome::Rejected(error) => {
                    state.push_log(format!("[WARN] Prediction rejected: {error}"));
                    state.show_alert(format!("Error: {error}"));
                }
                SubmissionOutcome::Failed(message) => {
                    state.push_log(format!("[ERROR] Prediction failed: {message}"));
                    state.show_alert(format!("Error making prediction: {message}"));
                }
            }
        }
    }
}
