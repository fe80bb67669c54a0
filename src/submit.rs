use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::form::TriggerState;
use crate::predict_client::{PredictionBackend, PredictionRequest, PredictionResponse};
use crate::state::{AppState, Delta, ProviderCommand, SubmissionOutcome, apply_delta};

pub const WORKER_STOPPED: &str = "prediction worker stopped";
pub const WORKER_UNAVAILABLE: &str = "prediction worker unavailable";

/// Sends `SubmissionSettled` exactly once when dropped, even while unwinding.
pub struct SettleGuard {
    tx: Sender<Delta>,
    generation: u64,
    outcome: Option<SubmissionOutcome>,
}

impl SettleGuard {
    pub fn new(tx: Sender<Delta>, generation: u64) -> Self {
        Self {
            tx,
            generation,
            outcome: None,
        }
    }

    pub fn finish(mut self, outcome: SubmissionOutcome) {
        self.outcome = Some(outcome);
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        let outcome = self
            .outcome
            .take()
            .unwrap_or_else(|| SubmissionOutcome::Failed(WORKER_STOPPED.to_string()));
        let _ = self.tx.send(Delta::SubmissionSettled {
            generation: self.generation,
            outcome,
        });
    }
}

/// Validate the form, flip the trigger to busy and hand the request to the
/// worker. Returns whether a request went out.
pub fn begin_submission(state: &mut AppState, cmd_tx: &Sender<ProviderCommand>) -> bool {
    if state.is_busy() {
        state.push_log("[INFO] Prediction already in flight");
        return false;
    }

    let request = match state.form.build_request() {
        Ok(request) => request,
        Err(err) => {
            state.push_log(format!("[WARN] Invalid form: {err}"));
            state.show_alert(format!("Error: {err}"));
            return false;
        }
    };

    state.generation += 1;
    let generation = state.generation;
    state.form.trigger = TriggerState::Busy;
    state.push_log(format!(
        "[INFO] Prediction request sent: {} vs {} ({}) {} {}",
        request.team,
        request.opponent,
        request.venue.label(),
        request.day,
        request.time
    ));

    if cmd_tx
        .send(ProviderCommand::Predict {
            generation,
            request,
        })
        .is_err()
    {
        apply_delta(
            state,
            Delta::SubmissionSettled {
                generation,
                outcome: SubmissionOutcome::Failed(WORKER_UNAVAILABLE.to_string()),
            },
        );
        return false;
    }
    true
}

pub fn spawn_prediction_worker<B: PredictionBackend>(
    backend: B,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::Predict {
                    generation,
                    request,
                } => {
                    let run = panic::catch_unwind(AssertUnwindSafe(|| {
                        run_prediction(&backend, &tx, generation, &request)
                    }));
                    if run.is_err() {
                        let _ = tx.send(Delta::Log(format!(
                            "[ERROR] Prediction worker panicked on #{generation}"
                        )));
                    }
                }
            }
        }
    })
}

/// One request, one settle message.
pub fn run_prediction<B: PredictionBackend + ?Sized>(
    backend: &B,
    tx: &Sender<Delta>,
    generation: u64,
    request: &PredictionRequest,
) {
    let guard = SettleGuard::new(tx.clone(), generation);
    let outcome = match backend.predict(request) {
        Ok(PredictionResponse::Success(prediction)) => SubmissionOutcome::Success(prediction),
        Ok(PredictionResponse::Failure { error }) => SubmissionOutcome::Rejected(error),
        Err(err) => SubmissionOutcome::Failed(format!("{err:#}")),
    };
    guard.finish(outcome);
}
