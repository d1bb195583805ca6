use super::grip::SwitchSample;

/// Debounce and click-classification tuning shared by both toe
/// switches. A press held to `long_press_ms` or beyond is a hold, not
/// a click, so grip motion does not also cycle the pose.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SwitchTuning {
    pub(crate) debounce_ms: u64,
    pub(crate) long_press_ms: u64,
}

pub(crate) const SWITCH_TUNING: SwitchTuning = SwitchTuning {
    debounce_ms: 20,
    long_press_ms: 400,
};

#[derive(Clone, Copy, Debug)]
enum DebounceState {
    Released,
    PressPending { since_ms: u64 },
    Pressed { accepted_at_ms: u64 },
    ReleasePending { since_ms: u64, accepted_at_ms: u64 },
}

/// Debounced momentary-switch classifier, updated once per control
/// tick with the raw input level. Exposes the debounced held level and
/// a single-click edge that is true for exactly one tick per completed
/// short press.
pub(crate) struct ToeSwitch {
    tuning: &'static SwitchTuning,
    state: DebounceState,
    single_click: bool,
}

impl ToeSwitch {
    pub(crate) const fn new(tuning: &'static SwitchTuning) -> Self {
        Self {
            tuning,
            state: DebounceState::Released,
            single_click: false,
        }
    }

    pub(crate) fn update(&mut self, level: bool, now_ms: u64) {
        self.single_click = false;
        self.state = match self.state {
            DebounceState::Released => {
                if level {
                    DebounceState::PressPending { since_ms: now_ms }
                } else {
                    DebounceState::Released
                }
            }
            DebounceState::PressPending { since_ms } => {
                if !level {
                    DebounceState::Released
                } else if now_ms.saturating_sub(since_ms) >= self.tuning.debounce_ms {
                    DebounceState::Pressed {
                        accepted_at_ms: since_ms,
                    }
                } else {
                    DebounceState::PressPending { since_ms }
                }
            }
            DebounceState::Pressed { accepted_at_ms } => {
                if level {
                    DebounceState::Pressed { accepted_at_ms }
                } else {
                    DebounceState::ReleasePending {
                        since_ms: now_ms,
                        accepted_at_ms,
                    }
                }
            }
            DebounceState::ReleasePending {
                since_ms,
                accepted_at_ms,
            } => {
                if level {
                    DebounceState::Pressed { accepted_at_ms }
                } else if now_ms.saturating_sub(since_ms) >= self.tuning.debounce_ms {
                    if now_ms.saturating_sub(accepted_at_ms) < self.tuning.long_press_ms {
                        self.single_click = true;
                    }
                    DebounceState::Released
                } else {
                    DebounceState::ReleasePending {
                        since_ms,
                        accepted_at_ms,
                    }
                }
            }
        };
    }

    /// Debounced held level; stays true while a release is still being
    /// debounced.
    pub(crate) fn held(&self) -> bool {
        matches!(
            self.state,
            DebounceState::Pressed { .. } | DebounceState::ReleasePending { .. }
        )
    }

    pub(crate) fn single_click(&self) -> bool {
        self.single_click
    }

    pub(crate) fn sample(&self) -> SwitchSample {
        SwitchSample {
            held: self.held(),
            single_click: self.single_click,
        }
    }
}
