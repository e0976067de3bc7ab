//! Screen fade around a camera swap
//!
//! Camera activation itself is instant (see the transition controller). This
//! is the visual layer on top: which rig the screen shows and how dark the
//! overlay is.
//!
//! ```text
//! Idle --request--> FadingOut --> Swapping (hold) --> FadingIn --> Idle
//! ```
//!
//! With nothing on screen yet, a request skips straight to fading in. A new
//! request never waits for the old one: during FadingOut or Swapping it only
//! retargets, during FadingIn it turns around and fades out again from the
//! current opacity.

use std::f32::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadePhase {
    Idle,
    FadingOut { elapsed: f32 },
    Swapping { elapsed: f32 },
    FadingIn { elapsed: f32 },
}

/// Emitted by `ScreenFade::update` when the displayed rig changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeEvent {
    /// The screen is fully dark and the old rig is no longer shown
    Hidden(usize),
    /// The new rig is on screen (still behind the overlay)
    Shown(usize),
}

fn ease_out_sine(t: f32) -> f32 {
    (t * FRAC_PI_2).sin()
}

fn ease_in_sine(t: f32) -> f32 {
    1.0 - (t * FRAC_PI_2).cos()
}

#[derive(Debug, Clone)]
pub struct ScreenFade {
    phase: FadePhase,
    duration: f32,
    hold: f32,
    /// Rig currently on screen
    shown: Option<usize>,
    /// Rig to show once the screen is dark
    pending: Option<usize>,
}

impl ScreenFade {
    pub fn new(duration: f32, hold: f32) -> Self {
        Self {
            phase: FadePhase::Idle,
            duration: duration.max(0.0),
            hold: hold.max(0.0),
            shown: None,
            pending: None,
        }
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == FadePhase::Idle
    }

    /// Rig that should drive the view right now
    pub fn shown(&self) -> Option<usize> {
        self.shown
    }

    /// Start (or redirect) a fade towards `room`'s rig.
    pub fn request(&mut self, room: usize) {
        self.pending = Some(room);

        self.phase = match self.phase {
            FadePhase::Idle if self.shown.is_none() => {
                // Nothing to fade away from
                self.shown = Some(room);
                self.pending = None;
                FadePhase::FadingIn { elapsed: 0.0 }
            }
            FadePhase::Idle => FadePhase::FadingOut { elapsed: 0.0 },
            FadePhase::FadingOut { elapsed } => FadePhase::FadingOut { elapsed },
            FadePhase::Swapping { elapsed } => FadePhase::Swapping { elapsed },
            FadePhase::FadingIn { .. } => {
                // Continue darkening from the current opacity
                let t = self.alpha().clamp(0.0, 1.0).asin() / FRAC_PI_2;
                FadePhase::FadingOut { elapsed: t * self.duration }
            }
        };
    }

    /// Overlay opacity, 0 = clear, 1 = black
    pub fn alpha(&self) -> f32 {
        match self.phase {
            FadePhase::Idle => 0.0,
            FadePhase::FadingOut { elapsed } => ease_out_sine(self.progress(elapsed)),
            FadePhase::Swapping { .. } => 1.0,
            FadePhase::FadingIn { elapsed } => 1.0 - ease_in_sine(self.progress(elapsed)),
        }
    }

    fn progress(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Advance by `dt` seconds. Returns the display change, if any, that
    /// happened during this update.
    pub fn update(&mut self, dt: f32) -> Option<FadeEvent> {
        match self.phase {
            FadePhase::Idle => None,
            FadePhase::FadingOut { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed < self.duration {
                    self.phase = FadePhase::FadingOut { elapsed };
                    return None;
                }
                self.phase = FadePhase::Swapping { elapsed: 0.0 };
                self.shown.take().map(FadeEvent::Hidden)
            }
            FadePhase::Swapping { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed < self.hold {
                    self.phase = FadePhase::Swapping { elapsed };
                    return None;
                }
                self.phase = FadePhase::FadingIn { elapsed: 0.0 };
                self.shown = self.pending.take();
                self.shown.map(FadeEvent::Shown)
            }
            FadePhase::FadingIn { elapsed } => {
                let elapsed = elapsed + dt;
                self.phase = if elapsed < self.duration {
                    FadePhase::FadingIn { elapsed }
                } else {
                    FadePhase::Idle
                };
                None
            }
        }
    }

    /// Jump to `room` with no animation
    pub fn snap_to(&mut self, room: Option<usize>) {
        self.phase = FadePhase::Idle;
        self.shown = room;
        self.pending = None;
    }
}
