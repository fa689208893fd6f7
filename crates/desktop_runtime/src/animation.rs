//! Window open/close/minimize animation frames.
//!
//! Frames are a pure function of the presence transition and the time since it started; the
//! window component samples them on a timer until [`is_settled`] says the target was reached.

/// Angular frequency of the critically damped spring, per millisecond.
const SPRING_OMEGA: f64 = 0.02;
/// Progress at which the spring is treated as settled.
const SETTLE_PROGRESS: f64 = 0.999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Where a window is in its lifecycle, from the animation's point of view.
pub enum WindowPresence {
    Hidden,
    Shown,
    Minimized,
}

impl WindowPresence {
    pub fn of(is_open: bool, is_minimized: bool) -> Self {
        match (is_open, is_minimized) {
            (false, _) => WindowPresence::Hidden,
            (true, true) => WindowPresence::Minimized,
            (true, false) => WindowPresence::Shown,
        }
    }

    fn target(self) -> AnimationFrame {
        match self {
            WindowPresence::Shown => AnimationFrame::SHOWN,
            WindowPresence::Hidden => AnimationFrame {
                opacity: 0.0,
                scale: 0.8,
                offset_y: 0.0,
            },
            WindowPresence::Minimized => AnimationFrame {
                opacity: 0.0,
                scale: 0.5,
                offset_y: 100.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Visual transform applied to a window element.
pub struct AnimationFrame {
    pub opacity: f64,
    pub scale: f64,
    /// Vertical translation in pixels.
    pub offset_y: f64,
}

impl AnimationFrame {
    pub const SHOWN: AnimationFrame = AnimationFrame {
        opacity: 1.0,
        scale: 1.0,
        offset_y: 0.0,
    };

    pub fn css(self) -> String {
        format!(
            "opacity:{:.3};transform:translateY({:.1}px) scale({:.3});",
            self.opacity, self.offset_y, self.scale
        )
    }

    fn lerp(from: AnimationFrame, to: AnimationFrame, t: f64) -> AnimationFrame {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        AnimationFrame {
            opacity: mix(from.opacity, to.opacity),
            scale: mix(from.scale, to.scale),
            offset_y: mix(from.offset_y, to.offset_y),
        }
    }
}

fn spring_progress(elapsed_ms: f64) -> f64 {
    let wt = SPRING_OMEGA * elapsed_ms.max(0.0);
    1.0 - (1.0 + wt) * (-wt).exp()
}

/// Whether a transition started `elapsed_ms` ago has reached its target.
pub fn is_settled(elapsed_ms: f64) -> bool {
    spring_progress(elapsed_ms) >= SETTLE_PROGRESS
}

/// Frame `elapsed_ms` into the transition from `from` to `to`.
pub fn transition_frame(from: WindowPresence, to: WindowPresence, elapsed_ms: f64) -> AnimationFrame {
    if from == to || is_settled(elapsed_ms) {
        return to.target();
    }
    AnimationFrame::lerp(from.target(), to.target(), spring_progress(elapsed_ms))
}
