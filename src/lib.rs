//! Birthday Card - an animated single-page greeting card
//!
//! Core modules:
//! - `card`: Deterministic interaction state (music session, mini-games,
//!   photo gallery, scroll navigation)
//! - `content`: Static card content embedded as JSON
//!
//! The wasm entry point in `main.rs` wires this state to the DOM of
//! `index.html`; native builds run a deterministic smoke demo instead.

pub mod card;
pub mod content;

pub use card::{AudioSession, Gallery, InteractiveState, Section};

/// Card configuration constants
pub mod consts {
    /// Balloons per generated batch
    pub const BALLOON_BATCH: usize = 12;
    /// Balloon horizontal placement range (percent of the field width)
    pub const BALLOON_X_MIN: f32 = 10.0;
    pub const BALLOON_X_MAX: f32 = 90.0;
    /// Balloon vertical placement range (percent of the field height)
    pub const BALLOON_Y_MIN: f32 = 70.0;
    pub const BALLOON_Y_MAX: f32 = 90.0;
    /// Balloon diameter range in pixels
    pub const BALLOON_SIZE_MIN: f32 = 30.0;
    pub const BALLOON_SIZE_MAX: f32 = 50.0;

    /// Confetti particles per popped balloon
    pub const POP_BURST: usize = 8;
    /// Confetti particles when the candles are blown out
    pub const BLOW_BURST: usize = 15;
    /// Display window for a confetti burst before removal
    pub const CONFETTI_TTL_MS: f64 = 3000.0;

    /// Cake center and jitter for the candle burst (percent coordinates)
    pub const CAKE_X: f32 = 50.0;
    pub const CAKE_X_SPREAD: f32 = 20.0;
    pub const CAKE_Y: f32 = 30.0;
    pub const CAKE_Y_SPREAD: f32 = 10.0;

    /// Rendered candles on the cake (one flag controls all flames)
    pub const CANDLE_COUNT: usize = 5;

    /// How long a music notice stays on screen
    pub const NOTICE_TTL_MS: f64 = 3000.0;
    /// Initial music volume
    pub const DEFAULT_VOLUME: f32 = 0.5;
}
