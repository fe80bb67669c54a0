use std::io::{self, BufRead, Write};

use chrono::{Datelike, Local};

use predict_terminal::config::Config;
use predict_terminal::form::FormState;
use predict_terminal::predict_client::{
    HttpBackend, PredictionBackend, PredictionRequest, PredictionResponse, Venue,
};
use predict_terminal::time_field::TimeField;

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = Config::from_env();
    let backend = HttpBackend::new(&config.base_url, config.timeout)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n=== Match Prediction System ===");
        if let Some(request) = read_request(&mut lines, &config)? {
            predict_and_print(&backend, &request);
        }

        let again = prompt(&mut lines, "\nPredict another match? (yes/no): ")?;
        if !again.to_lowercase().starts_with('y') {
            break;
        }
    }

    Ok(())
}

fn read_request<I>(lines: &mut I, config: &Config) -> anyhow::Result<Option<PredictionRequest>>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut form = FormState::new(&config.teams, Local::now().weekday());

    let team = prompt(lines, "Enter team name (e.g., Manchester City): ")?;
    if !form.team.select_value(&team) {
        println!("\nError: Team '{team}' not found.");
        println!("Available teams: {}", config.teams.join(", "));
        return Ok(None);
    }
    form.on_team_change();

    let opponent = prompt(lines, "Enter opponent name: ")?;
    if !form.opponent.select_value(&opponent) {
        println!("\nError: Opponent '{opponent}' not found.");
        println!("Available opponents: {}", config.teams.join(", "));
        return Ok(None);
    }
    form.on_opponent_change();

    let home = prompt(lines, "Is it a home game? (yes/no): ")?;
    form.venue = if home.to_lowercase().starts_with('y') {
        Venue::Home
    } else {
        Venue::Away
    };

    let time = prompt(lines, "Enter kickoff time (HH:MM, e.g., 15:30): ")?;
    fill_time(&mut form, &time);

    let day = prompt(lines, "Enter day of week (Mon/Tue/Wed/Thu/Fri/Sat/Sun): ")?;
    if !form.day.select_value(&day) {
        println!("\nError: Invalid day of week: {day}");
        return Ok(None);
    }

    match form.build_request() {
        Ok(request) => Ok(Some(request)),
        Err(err) => {
            println!("\nError: {err}");
            Ok(None)
        }
    }
}

fn prompt<I>(lines: &mut I, text: &str) -> anyhow::Result<String>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{text}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?.trim().to_string()),
        None => Err(anyhow::anyhow!("stdin closed")),
    }
}

/// Run the typed `HH:MM` through the same clamping the form fields use, so
/// `"3pm"` becomes `"3"` and pads to `"03"` at submission.
fn fill_time(form: &mut FormState, raw: &str) {
    let (hours, minutes) = raw.split_once(':').unwrap_or((raw, ""));
    form.hours = TimeField::with_value(form.hours.unit, hours.trim());
    form.hours.on_edit();
    form.minutes = TimeField::with_value(form.minutes.unit, minutes.trim());
    form.minutes.on_edit();
}

fn predict_and_print(backend: &HttpBackend, request: &PredictionRequest) {
    let outcome = backend.predict(request);
    let mut stdout = io::stdout().lock();
    if let Err(err) = write_outcome(&mut stdout, request, outcome) {
        eprintln!("failed to write prediction: {err}");
    }
}

/// Results and both kinds of error go to the same stream.
fn write_outcome<W: Write>(
    out: &mut W,
    request: &PredictionRequest,
    outcome: anyhow::Result<PredictionResponse>,
) -> io::Result<()> {
    match outcome {
        Ok(PredictionResponse::Success(prediction)) => {
            writeln!(out, "\n=== Prediction Results ===")?;
            writeln!(out, "Match: {} vs {}", request.team, request.opponent)?;
            writeln!(out, "Venue: {}", request.venue.label())?;
            writeln!(out, "Time: {} on {}", request.time, request.day)?;
            writeln!(out, "\nWin Probability: {:.1}%", prediction.probability)?;
            writeln!(out, "\nInterpretation:")?;
            if prediction.message.trim().is_empty() {
                writeln!(out, "{}", prediction.category.interpretation(&request.team))?;
            } else {
                writeln!(out, "{}", prediction.message)?;
            }
        }
        Ok(PredictionResponse::Failure { error }) => writeln!(out, "\nError: {error}")?,
        Err(err) => writeln!(out, "\nError making prediction: {err:#}")?,
    }
    out.flush()
}
