use std::time::Instant;

use chrono::Weekday;

use predict_terminal::config::{Config, split_list};
use predict_terminal::form::TriggerState;
use predict_terminal::predict_client::{Category, Prediction};
use predict_terminal::result_view::ResultPhase;
use predict_terminal::state::{AppState, Delta, SubmissionOutcome, apply_delta, apply_delta_at};

fn state() -> AppState {
    AppState::new(&Config::default(), Weekday::Wed)
}

#[test]
fn log_delta_appends_and_caps() {
    let mut state = state();
    for i in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] line {i}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] line 249"));
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 50"));
}

#[test]
fn every_outcome_releases_the_trigger() {
    let outcomes = [
        SubmissionOutcome::Success(Prediction {
            probability: 55.0,
            category: Category::Medium,
            message: "Match could go either way".to_string(),
        }),
        SubmissionOutcome::Rejected("model unavailable".to_string()),
        SubmissionOutcome::Failed("timed out".to_string()),
    ];
    for outcome in outcomes {
        let mut state = state();
        state.generation = 1;
        state.form.trigger = TriggerState::Busy;
        apply_delta(
            &mut state,
            Delta::SubmissionSettled {
                generation: 1,
                outcome,
            },
        );
        assert_eq!(state.form.trigger, TriggerState::Idle);
    }
}

#[test]
fn success_starts_render_cycle_with_settled_generation() {
    let mut state = state();
    state.generation = 3;
    let now = Instant::now();
    apply_delta_at(
        &mut state,
        Delta::SubmissionSettled {
            generation: 3,
            outcome: SubmissionOutcome::Success(Prediction {
                probability: 81.2,
                category: Category::High,
                message: "Strong chance of Arsenal winning".to_string(),
            }),
        },
        now,
    );
    assert_eq!(state.result.phase, ResultPhase::Revealing);
    assert_eq!(state.result.generation(), 3);
    assert_eq!(state.result.probability_text, "81.2");
    assert!(state.alert.is_none());
}

#[test]
fn outdated_settle_is_logged() {
    let mut state = state();
    state.generation = 5;
    apply_delta(
        &mut state,
        Delta::SubmissionSettled {
            generation: 4,
            outcome: SubmissionOutcome::Failed("late".to_string()),
        },
    );
    assert!(state.logs.iter().any(|l| l.starts_with("[WARN]") && l.contains("#4")));
}

#[test]
fn alert_can_be_dismissed() {
    let mut state = state();
    apply_delta(
        &mut state,
        Delta::SubmissionSettled {
            generation: 0,
            outcome: SubmissionOutcome::Rejected("nope".to_string()),
        },
    );
    assert_eq!(state.alert.as_deref(), Some("Error: nope"));
    state.dismiss_alert();
    assert!(state.alert.is_none());
}

#[test]
fn default_config_builds_slideshow_and_sorted_teams() {
    let config = Config::default();
    let state = AppState::new(&config, Weekday::Mon);
    assert_eq!(state.layers.len(), config.background_images.len());
    let mut sorted = config.teams.clone();
    sorted.sort();
    assert_eq!(config.teams, sorted);
}

#[test]
fn list_env_values_are_trimmed() {
    assert_eq!(
        split_list(" Arsenal, Chelsea ,,Liverpool "),
        vec!["Arsenal", "Chelsea", "Liverpool"]
    );
    assert!(split_list("").is_empty());
}
