use std::time::{Duration, Instant};

use crate::predict_client::{Category, Prediction};

pub const FILL_DELAY: Duration = Duration::from_millis(100);
pub const FADE_DELAY: Duration = Duration::from_millis(10);
pub const FILL_TRANSITION: Duration = Duration::from_secs(1);
pub const FADE_TRANSITION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultPhase {
    Hidden,
    Revealing,
    Revealed,
}

/// Fill colour for a category, as RGB.
pub fn category_rgb(category: Category) -> (u8, u8, u8) {
    match category {
        Category::High => (0x28, 0xa7, 0x45),
        Category::Medium => (0xff, 0xc1, 0x07),
        Category::Low => (0xdc, 0x35, 0x45),
    }
}

/// A scalar that either jumps or eases between values.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    from: f64,
    to: f64,
    started: Option<Instant>,
    duration: Option<Duration>,
}

impl Transition {
    pub fn fixed(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            started: None,
            duration: None,
        }
    }

    pub fn disable(&mut self) {
        self.duration = None;
    }

    pub fn enable(&mut self, duration: Duration) {
        self.duration = Some(duration);
    }

    /// Set a new target. Eases from the current value when a duration is set.
    pub fn set(&mut self, value: f64, now: Instant) {
        if self.duration.is_some() {
            self.from = self.value_at(now);
            self.started = Some(now);
        } else {
            self.from = value;
            self.started = None;
        }
        self.to = value;
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        let (Some(started), Some(duration)) = (self.started, self.duration) else {
            return self.to;
        };
        if duration.is_zero() {
            return self.to;
        }
        let t = now.saturating_duration_since(started).as_secs_f64() / duration.as_secs_f64();
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_in_out(t)
    }
}

fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub smooth: bool,
    pub block: ScrollBlock,
}

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Fill { probability: f64, category: Category },
    FadeIn,
}

#[derive(Debug, Clone, PartialEq)]
struct Scheduled {
    due: Instant,
    generation: u64,
    action: Action,
}

/// Result panel: probability bar, text slots, visibility.
#[derive(Debug, Clone)]
pub struct ResultView {
    pub phase: ResultPhase,
    pub fill: Transition,
    pub fill_category: Option<Category>,
    pub probability_text: String,
    pub message: String,
    pub opacity: Transition,
    generation: u64,
    pending: Vec<Scheduled>,
    scroll_request: Option<ScrollRequest>,
}

impl Default for ResultView {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultView {
    pub fn new() -> Self {
        Self {
            phase: ResultPhase::Hidden,
            fill: Transition::fixed(0.0),
            fill_category: None,
            probability_text: String::new(),
            message: String::new(),
            opacity: Transition::fixed(0.0),
            generation: 0,
            pending: Vec::new(),
            scroll_request: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_callbacks(&self) -> usize {
        self.pending.len()
    }

    /// Start a render cycle for a successful prediction.
    pub fn show(&mut self, prediction: &Prediction, generation: u64, now: Instant) {
        self.generation = generation;

        // Snap to 0% with animation off, commit it, then re-arm the transition
        // so the delayed fill always animates up from zero.
        self.fill.disable();
        self.fill.set(0.0, now);
        self.fill.enable(FILL_TRANSITION);
        self.schedule(
            now + FILL_DELAY,
            Action::Fill {
                probability: prediction.probability,
                category: prediction.category,
            },
        );

        self.probability_text = format_probability(prediction.probability);
        self.message = prediction.message.clone();

        self.opacity.disable();
        self.opacity.set(0.0, now);
        self.opacity.enable(FADE_TRANSITION);
        self.phase = ResultPhase::Revealing;
        self.schedule(now + FADE_DELAY, Action::FadeIn);

        self.scroll_request = Some(ScrollRequest {
            smooth: true,
            block: ScrollBlock::Nearest,
        });
    }

    fn schedule(&mut self, due: Instant, action: Action) {
        self.pending.push(Scheduled {
            due,
            generation: self.generation,
            action,
        });
    }

    /// Run every callback that is due. Callbacks from an older cycle are dropped.
    pub fn tick(&mut self, now: Instant) {
        if self.pending.is_empty() {
            return;
        }
        let mut due = Vec::new();
        self.pending.retain(|cb| {
            if cb.due <= now {
                due.push(cb.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|cb| cb.due);
        for cb in due {
            if cb.generation != self.generation {
                continue;
            }
            match cb.action {
                Action::Fill {
                    probability,
                    category,
                } => {
                    self.fill.set(probability, cb.due);
                    self.fill_category = Some(category);
                }
                Action::FadeIn => {
                    self.opacity.set(1.0, cb.due);
                    self.phase = ResultPhase::Revealed;
                }
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.phase != ResultPhase::Hidden
    }

    pub fn fill_percent(&self, now: Instant) -> f64 {
        self.fill.value_at(now)
    }

    pub fn opacity_at(&self, now: Instant) -> f64 {
        self.opacity.value_at(now)
    }

    pub fn fill_rgb(&self) -> Option<(u8, u8, u8)> {
        self.fill_category.map(category_rgb)
    }

    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.scroll_request.take()
    }
}

/// Number text the way the backend's value reads: `72`, `72.5`.
pub fn format_probability(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
