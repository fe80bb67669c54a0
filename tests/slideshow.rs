use std::time::Duration;

use predict_terminal::slideshow::{
    ANIMATION_NAME, Iterations, Timing, build_layers, visible_layer,
};

fn images(n: usize) -> Vec<String> {
    (1..=n)
        .map(|i| format!("/static/images/football{i}.jpg"))
        .collect()
}

#[test]
fn one_layer_per_image_with_staggered_delay() {
    let cycle = Duration::from_secs(20);
    for n in 1..=7 {
        let layers = build_layers(&images(n), cycle);
        assert_eq!(layers.len(), n);
        for (index, layer) in layers.iter().enumerate() {
            assert_eq!(layer.animation.delay, (cycle / n as u32) * index as u32);
            assert_eq!(layer.animation.duration, cycle);
        }
    }
}

#[test]
fn five_images_are_four_seconds_apart() {
    let layers = build_layers(&images(5), Duration::from_secs(20));
    let delays: Vec<u64> = layers.iter().map(|l| l.animation.delay.as_secs()).collect();
    assert_eq!(delays, vec![0, 4, 8, 12, 16]);
}

#[test]
fn layers_start_transparent_and_loop_forever() {
    let layers = build_layers(&images(3), Duration::from_secs(20));
    for layer in &layers {
        assert_eq!(layer.opacity, 0.0);
        assert!(layer.absolute);
        assert!(layer.full_bleed);
        assert_eq!(layer.animation.name, ANIMATION_NAME);
        assert_eq!(layer.animation.timing, Timing::Linear);
        assert_eq!(layer.animation.iterations, Iterations::Infinite);
    }
    assert_eq!(layers[1].image, "/static/images/football2.jpg");
    assert_eq!(layers[1].caption(), "football2");
}

#[test]
fn empty_list_has_no_layers() {
    assert!(build_layers(&[], Duration::from_secs(20)).is_empty());
    assert_eq!(visible_layer(&[], Duration::from_secs(3)), None);
}

#[test]
fn visible_layer_rotates_round_robin() {
    let layers = build_layers(&images(5), Duration::from_secs(20));
    assert_eq!(visible_layer(&layers, Duration::from_secs(0)), Some(0));
    assert_eq!(visible_layer(&layers, Duration::from_secs(5)), Some(1));
    assert_eq!(visible_layer(&layers, Duration::from_secs(19)), Some(4));
    assert_eq!(visible_layer(&layers, Duration::from_secs(21)), Some(0));
}
