//! Background-music session state
//!
//! Browsers refuse to start audio before a user gesture. The session keeps
//! `playing` as the single source of truth and tracks whether gesture-retry
//! listeners are currently armed, so the first qualifying gesture retries
//! playback exactly once and a successful start disarms everything. The
//! media element itself lives in the wasm glue; attempt outcomes are
//! reported back through `play_started` / `play_failed`.

use crate::consts::DEFAULT_VOLUME;

/// Why a playback attempt did not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackError {
    /// Autoplay policy refused to start without a prior user gesture
    Blocked,
    /// The audio resource failed to load or decode
    MediaFailed,
}

/// Transient toast shown near the player controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Playback just started
    Started,
    /// Playback could not start; a tap will unlock it
    NeedsTap,
}

/// State of the single background-audio resource
#[derive(Debug, Clone)]
pub struct AudioSession {
    playing: bool,
    volume: f32,
    muted: bool,
    /// Latches true on the first successful play; never reverts
    unlocked: bool,
    /// Gesture-retry listeners are registered and waiting
    armed: bool,
    controls_open: bool,
    notice: Option<Notice>,
    notice_seq: u32,
}

impl Default for AudioSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSession {
    pub fn new() -> Self {
        Self {
            playing: false,
            volume: DEFAULT_VOLUME,
            muted: false,
            unlocked: false,
            armed: false,
            controls_open: false,
            notice: None,
            notice_seq: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn controls_open(&self) -> bool {
        self.controls_open
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// Effective output volume; mute wins, the stored volume is untouched
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Whether a play attempt should be issued right now. Checking
    /// `playing` here collapses overlapping play/pause races into no-ops.
    pub fn begin_play(&self) -> bool {
        !self.playing
    }

    /// A play attempt resolved successfully
    pub fn play_started(&mut self) -> u32 {
        self.playing = true;
        self.unlocked = true;
        self.armed = false;
        self.show_notice(Notice::Started)
    }

    /// A play attempt was rejected; pre-unlock failures arm the gesture retry
    pub fn play_failed(&mut self, err: PlaybackError) -> u32 {
        log::warn!("playback did not start: {err:?}");
        self.playing = false;
        if !self.unlocked {
            self.armed = true;
        }
        self.show_notice(Notice::NeedsTap)
    }

    /// The element was paused on request
    pub fn paused(&mut self) {
        self.playing = false;
    }

    /// The media `ended` event fired (a looping track normally never ends)
    pub fn ended(&mut self) {
        self.playing = false;
    }

    /// Should an armed gesture listener retry playback?
    pub fn gesture_should_retry(&self) -> bool {
        self.armed && !self.playing
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn toggle_controls(&mut self) {
        self.controls_open = !self.controls_open;
    }

    /// Show a notice; returns its sequence number for expiry scheduling
    pub fn show_notice(&mut self, notice: Notice) -> u32 {
        self.notice_seq = self.notice_seq.wrapping_add(1);
        self.notice = Some(notice);
        self.notice_seq
    }

    /// Clear a notice by sequence number; stale timers are no-ops
    pub fn clear_notice(&mut self, seq: u32) -> bool {
        if self.notice_seq == seq && self.notice.is_some() {
            self.notice = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drives an `AudioSession` the way the DOM glue does, against a fake
    /// media element that rejects the first N play attempts.
    struct FakePlayer {
        rejections: u32,
        play_calls: u32,
    }

    impl FakePlayer {
        fn new(rejections: u32) -> Self {
            Self {
                rejections,
                play_calls: 0,
            }
        }

        fn attempt(&mut self, session: &mut AudioSession) {
            if !session.begin_play() {
                return;
            }
            self.play_calls += 1;
            if self.rejections > 0 {
                self.rejections -= 1;
                session.play_failed(PlaybackError::Blocked);
            } else {
                session.play_started();
            }
        }

        fn gesture(&mut self, session: &mut AudioSession) {
            if session.gesture_should_retry() {
                self.attempt(session);
            }
        }
    }

    #[test]
    fn test_autoplay_blocked_arms_retry() {
        let mut session = AudioSession::new();
        let mut player = FakePlayer::new(1);

        player.attempt(&mut session);
        assert!(!session.is_playing());
        assert!(session.is_armed());
        assert_eq!(session.notice(), Some(Notice::NeedsTap));
    }

    #[test]
    fn test_first_gesture_retries_exactly_once() {
        let mut session = AudioSession::new();
        let mut player = FakePlayer::new(1);

        player.attempt(&mut session); // automatic attempt, rejected
        player.gesture(&mut session); // first click unlocks
        assert!(session.is_playing());
        assert!(session.is_unlocked());
        assert!(!session.is_armed());
        assert_eq!(player.play_calls, 2);

        // Further gestures must not retry
        player.gesture(&mut session);
        player.gesture(&mut session);
        assert_eq!(player.play_calls, 2);
    }

    #[test]
    fn test_failed_retry_stays_armed() {
        let mut session = AudioSession::new();
        let mut player = FakePlayer::new(2);

        player.attempt(&mut session);
        player.gesture(&mut session); // still blocked
        assert!(!session.is_playing());
        assert!(session.is_armed());

        player.gesture(&mut session); // next gesture succeeds
        assert!(session.is_playing());
        assert_eq!(player.play_calls, 3);
    }

    #[test]
    fn test_unlocked_never_reverts() {
        let mut session = AudioSession::new();
        session.play_started();
        session.paused();
        assert!(session.is_unlocked());

        // A later failure must not re-arm the gesture listeners
        session.play_failed(PlaybackError::MediaFailed);
        assert!(session.is_unlocked());
        assert!(!session.is_armed());
    }

    #[test]
    fn test_mute_volume_independence() {
        let mut session = AudioSession::new();
        session.toggle_mute();
        session.set_volume(0.3);
        assert!(session.is_muted());
        assert_eq!(session.effective_volume(), 0.0);

        session.toggle_mute();
        assert!((session.effective_volume() - 0.3).abs() < f32::EPSILON);
        assert!((session.volume() - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_volume_clamped() {
        let mut session = AudioSession::new();
        session.set_volume(1.7);
        assert_eq!(session.volume(), 1.0);
        session.set_volume(-0.2);
        assert_eq!(session.volume(), 0.0);
    }

    #[test]
    fn test_stale_notice_timer_is_noop() {
        let mut session = AudioSession::new();
        let first = session.play_failed(PlaybackError::Blocked);
        let second = session.play_started();

        assert!(!session.clear_notice(first));
        assert_eq!(session.notice(), Some(Notice::Started));
        assert!(session.clear_notice(second));
        assert_eq!(session.notice(), None);
    }

    #[test]
    fn test_toggle_is_guarded_by_playing() {
        let mut session = AudioSession::new();
        session.play_started();
        assert!(!session.begin_play()); // already playing: pause path instead
        session.paused();
        assert!(session.begin_play());
    }
}
