use crate::foundation::core::{Canvas, Dot, Point, WaveformKind};

/// Default engine speed multiplier.
pub const DEFAULT_SPEED: f64 = 1.0;

/// Clamp a speed multiplier into the supported `[0.1, 3.0]` range.
pub fn clamp_speed(speed: f64) -> f64 {
    speed.clamp(0.1, 3.0)
}

/// Apply one waveform step to every dot, returning a new sequence.
///
/// `t` is elapsed seconds since the animation origin. `None` (an
/// unrecognized waveform key) passes dots through unmodified. The input is
/// never mutated; animated frames are derived values.
pub fn apply(
    kind: Option<WaveformKind>,
    dots: &[Dot],
    canvas: Canvas,
    t: f64,
    speed: f64,
) -> Vec<Dot> {
    let speed = clamp_speed(speed);
    match kind {
        None => dots.to_vec(),
        Some(WaveformKind::Wave) => dots
            .iter()
            .map(|dot| {
                let y = dot.pos.y + (dot.pos.x * 0.01 + t * 2.0 * speed).sin() * 20.0;
                let size = dot.size * (1.0 + (t * 3.0 + dot.pos.x * 0.01).sin() * 0.3);
                Dot {
                    pos: Point::new(dot.pos.x, y),
                    size,
                    ..*dot
                }
            })
            .collect(),
        Some(WaveformKind::Ripple) => {
            let center = canvas.center();
            dots.iter()
                .map(|dot| {
                    let d = (dot.pos - center).hypot();
                    let size = (dot.size * (1.0 + (d * 0.01 - t * 2.0).sin() * 0.4)).max(0.1);
                    dot.with_size(size)
                })
                .collect()
        }
        Some(WaveformKind::Pulse) => {
            let factor = 1.0 + (t * 3.0 * speed).sin() * 0.5;
            dots.iter().map(|dot| dot.with_size(dot.size * factor)).collect()
        }
    }
}
