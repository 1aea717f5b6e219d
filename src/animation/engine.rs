use std::time::Instant;

use crate::{
    animation::waveform::{self, DEFAULT_SPEED},
    foundation::core::{Background, Dot, DotShape, WaveformKind},
    foundation::error::{DotfieldError, DotfieldResult},
    foundation::rng::Rng64,
    render::plan::build_frame,
    render::target::RenderTarget,
};

/// Engine lifecycle: `Idle -> Playing <-> Paused`, with `stop` forcing any
/// state back to `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    /// No animation loaded or stopped.
    Idle,
    /// A frame is scheduled.
    Playing,
    /// Holds dots and target, no frame scheduled.
    Paused,
}

/// Handle for one scheduled frame.
///
/// The engine honors at most one live token at a time; `pause`/`stop`
/// invalidate the pending token so an already-scheduled frame becomes a
/// no-op instead of racing the cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameToken(u64);

/// Monotonic time source for the frame loop, injected so tests can step
/// time manually.
pub trait FrameClock {
    /// Seconds since an arbitrary fixed origin.
    fn now(&self) -> f64;
}

/// Wall-clock [`FrameClock`] backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock starting at zero now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Continuous per-frame animation loop over a [`RenderTarget`].
///
/// The host's display-refresh mechanism drives the loop cooperatively:
/// `start`/`resume` hand back a [`FrameToken`], the host calls
/// [`run_frame`](Self::run_frame) with it when the next refresh fires, and
/// a fresh token comes back for the frame after. Everything is
/// single-threaded; the engine owns its dot buffer between `start` and
/// `stop`.
///
/// Animated frames always draw circles; shape variation is a static-render
/// concern.
pub struct AnimationEngine<T: RenderTarget> {
    state: PlayState,
    target: Option<T>,
    dots: Vec<Dot>,
    waveform: Option<WaveformKind>,
    background: Background,
    speed: f64,
    origin: f64,
    pending: Option<FrameToken>,
    next_token: u64,
    rng: Rng64,
}

impl<T: RenderTarget> AnimationEngine<T> {
    /// Engine in the `Idle` state. The seed feeds the draw-time generator
    /// (unused for the circle shape, but part of the engine's determinism
    /// contract).
    pub fn new(seed: u64) -> Self {
        Self {
            state: PlayState::Idle,
            target: None,
            dots: Vec::new(),
            waveform: None,
            background: Background::White,
            speed: DEFAULT_SPEED,
            origin: 0.0,
            pending: None,
            next_token: 0,
            rng: Rng64::new(seed),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Token of the currently scheduled frame, if any.
    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Set the speed multiplier, clamped to `[0.1, 3.0]`. Takes effect on
    /// the next frame.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = waveform::clamp_speed(speed);
    }

    /// Swap the waveform. While `Playing` this applies on the next
    /// scheduled frame without restarting the time origin.
    pub fn set_waveform(&mut self, waveform: Option<WaveformKind>) {
        self.waveform = waveform;
    }

    /// Begin playing: cancel any prior pending frame, record the time
    /// origin, own `dots` and `target`, and schedule the first frame.
    pub fn start(
        &mut self,
        target: T,
        dots: Vec<Dot>,
        waveform: Option<WaveformKind>,
        background: Background,
        clock: &dyn FrameClock,
    ) -> FrameToken {
        self.pending = None;
        self.target = Some(target);
        self.dots = dots;
        self.waveform = waveform;
        self.background = background;
        self.origin = clock.now();
        self.state = PlayState::Playing;
        tracing::debug!(dots = self.dots.len(), "animation started");
        self.schedule()
    }

    /// Cancel the pending frame and hold position. No-op unless `Playing`.
    pub fn pause(&mut self) {
        if self.state == PlayState::Playing {
            self.pending = None;
            self.state = PlayState::Paused;
            tracing::debug!("animation paused");
        }
    }

    /// Force any state back to `Idle` and release the scheduled-frame
    /// handle. The target and dots stay loaded so a later
    /// [`resume`](Self::resume) can restart the loop.
    pub fn stop(&mut self) {
        self.pending = None;
        self.state = PlayState::Idle;
        tracing::debug!("animation stopped");
    }

    /// Re-enter `Playing` from a non-`Playing` state that still holds a
    /// target and a non-empty dot sequence; otherwise `None`. The time
    /// origin is not reset, so the animation resumes its phase.
    pub fn resume(&mut self) -> Option<FrameToken> {
        if self.state == PlayState::Playing || self.target.is_none() || self.dots.is_empty() {
            return None;
        }
        self.state = PlayState::Playing;
        tracing::debug!("animation resumed");
        Some(self.schedule())
    }

    /// Execute the frame scheduled as `token`.
    ///
    /// A stale or cancelled token returns `Ok(None)` without drawing; the
    /// live token draws one frame (waveform transform, then the same
    /// background-fill-plus-shape-loop as a static render) and returns the
    /// next token.
    pub fn run_frame(
        &mut self,
        token: FrameToken,
        clock: &dyn FrameClock,
    ) -> DotfieldResult<Option<FrameToken>> {
        if self.state != PlayState::Playing || self.pending != Some(token) {
            return Ok(None);
        }
        self.pending = None;

        let target = self
            .target
            .as_mut()
            .ok_or_else(|| DotfieldError::surface("animation engine has no render target"))?;
        let canvas = target.canvas();

        let elapsed = clock.now() - self.origin;
        let transformed = waveform::apply(self.waveform, &self.dots, canvas, elapsed, self.speed);
        let plan = build_frame(
            canvas,
            &transformed,
            DotShape::Circle,
            self.background,
            &mut self.rng,
        );
        self.target
            .as_mut()
            .ok_or_else(|| DotfieldError::surface("animation engine has no render target"))?
            .draw(&plan)?;

        Ok(Some(self.schedule()))
    }

    /// Give the render target back, leaving the engine `Idle`.
    pub fn take_target(&mut self) -> Option<T> {
        self.stop();
        self.target.take()
    }

    fn schedule(&mut self) -> FrameToken {
        self.next_token += 1;
        let token = FrameToken(self.next_token);
        self.pending = Some(token);
        token
    }
}
