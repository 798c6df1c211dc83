//! Card interaction state
//!
//! All decision-making logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Monotonic entity ids, stable iteration order
//! - No DOM, timer or audio-element dependencies

pub mod audio;
pub mod decor;
pub mod gallery;
pub mod interactive;
pub mod section;

pub use audio::{AudioSession, Notice, PlaybackError};
pub use decor::DecorItem;
pub use gallery::Gallery;
pub use interactive::{Balloon, ConfettiBurst, ConfettiParticle, Feature, InteractiveState};
pub use section::Section;
