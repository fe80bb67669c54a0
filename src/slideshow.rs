use std::time::Duration;

pub const ANIMATION_NAME: &str = "backgroundSlideshow";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iterations {
    Infinite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FadeAnimation {
    pub name: &'static str,
    pub duration: Duration,
    pub timing: Timing,
    pub iterations: Iterations,
    pub delay: Duration,
}

/// One full-bleed background layer.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundLayer {
    pub image: String,
    pub absolute: bool,
    pub full_bleed: bool,
    pub opacity: f32,
    pub animation: FadeAnimation,
}

impl BackgroundLayer {
    /// Short name for captions: last path segment without the extension.
    pub fn caption(&self) -> &str {
        let name = self.image.rsplit('/').next().unwrap_or(&self.image);
        name.split('.').next().unwrap_or(name)
    }
}

pub fn build_layers(images: &[String], cycle: Duration) -> Vec<BackgroundLayer> {
    if images.is_empty() {
        return Vec::new();
    }
    let slot = cycle / images.len() as u32;
    images
        .iter()
        .enumerate()
        .map(|(index, image)| BackgroundLayer {
            image: image.clone(),
            absolute: true,
            full_bleed: true,
            opacity: 0.0,
            animation: FadeAnimation {
                name: ANIMATION_NAME,
                duration: cycle,
                timing: Timing::Linear,
                iterations: Iterations::Infinite,
                delay: slot * index as u32,
            },
        })
        .collect()
}

/// Index of the layer faded in at `elapsed` since the slideshow started.
pub fn visible_layer(layers: &[BackgroundLayer], elapsed: Duration) -> Option<usize> {
    let first = layers.first()?;
    let cycle = first.animation.duration;
    if cycle.is_zero() {
        return Some(0);
    }
    let pos = elapsed.as_nanos() % cycle.as_nanos();
    layers
        .iter()
        .enumerate()
        .rev()
        .find(|(_, layer)| layer.animation.delay.as_nanos() <= pos)
        .map(|(idx, _)| idx)
}
