use std::fmt;

use chrono::Weekday;

use crate::predict_client::{PredictionRequest, Venue};
use crate::selection::{SelectControl, enforce_exclusion};
use crate::time_field::{TimeField, TimeUnit};

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub const IDLE_LABEL: &str = "Predict";
pub const BUSY_LABEL: &str = "Predicting...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Team,
    Opponent,
    Venue,
    Hours,
    Minutes,
    Day,
    Submit,
}

const FIELD_ORDER: [FormField; 7] = [
    FormField::Team,
    FormField::Opponent,
    FormField::Venue,
    FormField::Hours,
    FormField::Minutes,
    FormField::Day,
    FormField::Submit,
];

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Team => "Team",
            FormField::Opponent => "Opponent",
            FormField::Venue => "Venue",
            FormField::Hours => "Hours",
            FormField::Minutes => "Minutes",
            FormField::Day => "Day",
            FormField::Submit => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    Busy,
}

impl TriggerState {
    pub fn label(self) -> &'static str {
        match self {
            TriggerState::Idle => IDLE_LABEL,
            TriggerState::Busy => BUSY_LABEL,
        }
    }

    pub fn is_enabled(self) -> bool {
        self == TriggerState::Idle
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    MissingTeam,
    MissingOpponent,
    UnknownTeam(String),
    SameTeams(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::MissingTeam => write!(f, "Please select a team"),
            FormError::MissingOpponent => write!(f, "Please select an opponent"),
            FormError::UnknownTeam(name) => write!(f, "Team '{name}' not found"),
            FormError::SameTeams(name) => {
                write!(f, "Team and opponent cannot both be {name}")
            }
        }
    }
}

impl std::error::Error for FormError {}

#[derive(Debug, Clone)]
pub struct FormState {
    pub team: SelectControl,
    pub opponent: SelectControl,
    pub venue: Venue,
    pub hours: TimeField,
    pub minutes: TimeField,
    pub day: SelectControl,
    pub focus: FormField,
    pub trigger: TriggerState,
}

impl FormState {
    pub fn new(teams: &[String], today: Weekday) -> Self {
        let days = WEEKDAYS.iter().map(|d| d.to_string()).collect::<Vec<_>>();
        let day_idx = WEEKDAYS.iter().position(|d| *d == today).unwrap_or(0);
        Self {
            team: SelectControl::new(teams, 0),
            opponent: SelectControl::new(teams, 1),
            venue: Venue::Home,
            hours: TimeField::new(TimeUnit::Hour),
            minutes: TimeField::new(TimeUnit::Minute),
            day: SelectControl::new(&days, day_idx),
            focus: FormField::Team,
            trigger: TriggerState::Idle,
        }
    }

    pub fn on_team_change(&mut self) {
        enforce_exclusion(self.team.value(), &mut self.opponent);
    }

    pub fn on_opponent_change(&mut self) {
        enforce_exclusion(self.opponent.value(), &mut self.team);
    }

    /// Step the focused picker forward or back; fires its change handler.
    pub fn cycle_focused(&mut self, forward: bool) {
        match self.focus {
            FormField::Team => {
                if step(&mut self.team, forward) {
                    self.on_team_change();
                }
            }
            FormField::Opponent => {
                if step(&mut self.opponent, forward) {
                    self.on_opponent_change();
                }
            }
            FormField::Venue => self.venue = self.venue.toggle(),
            FormField::Day => {
                step(&mut self.day, forward);
            }
            FormField::Hours | FormField::Minutes | FormField::Submit => {}
        }
    }

    pub fn focused_time_field(&mut self) -> Option<&mut TimeField> {
        match self.focus {
            FormField::Hours => Some(&mut self.hours),
            FormField::Minutes => Some(&mut self.minutes),
            _ => None,
        }
    }

    pub fn type_char(&mut self, ch: char) {
        if let Some(field) = self.focused_time_field() {
            field.insert_char(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_time_field() {
            field.backspace();
        }
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(FIELD_ORDER.len() - 1);
    }

    pub fn set_focus(&mut self, field: FormField) {
        if field != self.focus {
            self.blur_focused();
            self.focus = field;
        }
    }

    fn move_focus(&mut self, offset: usize) {
        let idx = FIELD_ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        let next = FIELD_ORDER[(idx + offset) % FIELD_ORDER.len()];
        self.set_focus(next);
    }

    fn blur_focused(&mut self) {
        if let Some(field) = self.focused_time_field() {
            field.on_blur();
        }
    }

    /// Read the five fields into a request. Time parts are padded here,
    /// whether or not blur already ran.
    pub fn build_request(&self) -> Result<PredictionRequest, FormError> {
        let team = self.team.value().ok_or(FormError::MissingTeam)?;
        let opponent = self.opponent.value().ok_or(FormError::MissingOpponent)?;
        if team.is_empty() {
            return Err(FormError::MissingTeam);
        }
        if opponent.is_empty() {
            return Err(FormError::MissingOpponent);
        }
        if !self.opponent.options.iter().any(|o| o.value == team) {
            return Err(FormError::UnknownTeam(team.to_string()));
        }
        if !self.team.options.iter().any(|o| o.value == opponent) {
            return Err(FormError::UnknownTeam(opponent.to_string()));
        }
        if team == opponent {
            return Err(FormError::SameTeams(team.to_string()));
        }

        let day = self.day.value().unwrap_or("Mon").to_string();
        Ok(PredictionRequest {
            team: team.to_string(),
            opponent: opponent.to_string(),
            venue: self.venue,
            time: format!("{}:{}", self.hours.padded(), self.minutes.padded()),
            day,
        })
    }
}

fn step(control: &mut SelectControl, forward: bool) -> bool {
    if forward {
        control.select_next()
    } else {
        control.select_prev()
    }
}
