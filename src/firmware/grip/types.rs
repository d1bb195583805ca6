/// The two foot-mounted momentary switches: big toe and small toe.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SwitchId {
    Primary,
    Secondary,
}

/// One physical servo channel of the hand.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub(crate) enum ActuatorChannel {
    ThumbFlex = 0,
    ThumbBase = 1,
    Index = 2,
    Middle = 3,
    Ring = 4,
    Pinky = 5,
}

impl ActuatorChannel {
    pub(crate) const COUNT: usize = 6;
    pub(crate) const ALL: [Self; Self::COUNT] = [
        Self::ThumbFlex,
        Self::ThumbBase,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Pinky,
    ];

    pub(crate) const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Per-tick observation of one switch, as produced by the debounced
/// click classifier: the debounced held level plus the single-click edge
/// (true for exactly one tick per completed click).
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SwitchSample {
    pub(crate) held: bool,
    pub(crate) single_click: bool,
}

/// Snapshot of both switches for one control tick.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SwitchFrame {
    pub(crate) now_ms: u64,
    pub(crate) primary: SwitchSample,
    pub(crate) secondary: SwitchSample,
}

impl SwitchFrame {
    pub(crate) const fn clicked(self, switch: SwitchId) -> bool {
        match switch {
            SwitchId::Primary => self.primary.single_click,
            SwitchId::Secondary => self.secondary.single_click,
        }
    }
}

/// A single fire-and-forget position write for one servo channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ServoCommand {
    pub(crate) channel: ActuatorChannel,
    pub(crate) position: i16,
}

/// Bounded buffer of servo writes produced by one tick. Engage and
/// release for the same pose may both run in one tick, so the capacity
/// covers both channel sets of the widest pose.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ServoCommandBuffer {
    len: usize,
    slots: [Option<ServoCommand>; Self::MAX],
}

impl ServoCommandBuffer {
    pub(crate) const MAX: usize = 12;

    pub(crate) const fn new() -> Self {
        Self {
            len: 0,
            slots: [None; Self::MAX],
        }
    }

    pub(crate) fn push(&mut self, command: ServoCommand) {
        if self.len >= Self::MAX {
            return;
        }
        self.slots[self.len] = Some(command);
        self.len += 1;
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &ServoCommand> {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }

    pub(crate) fn position_for(&self, channel: ActuatorChannel) -> Option<i16> {
        self.iter()
            .find(|command| command.channel == channel)
            .map(|command| command.position)
    }
}

impl Default for ServoCommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Discrete outcomes of one tick, consumed by telemetry and the console.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GripEvent {
    PoseAdvanced { pose_index: u8 },
    ComboLate { elapsed_ms: u16 },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GripEventBuffer {
    len: usize,
    slots: [Option<GripEvent>; Self::MAX],
}

impl GripEventBuffer {
    pub(crate) const MAX: usize = 2;

    pub(crate) const fn new() -> Self {
        Self {
            len: 0,
            slots: [None; Self::MAX],
        }
    }

    pub(crate) fn push(&mut self, event: GripEvent) {
        if self.len >= Self::MAX {
            return;
        }
        self.slots[self.len] = Some(event);
        self.len += 1;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &GripEvent> {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }

    pub(crate) fn contains_pose_advance(&self) -> bool {
        self.iter()
            .any(|event| matches!(event, GripEvent::PoseAdvanced { .. }))
    }
}

impl Default for GripEventBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Recognizer state, exported for traces. `ArmedBoth` covers the case
/// where both switches carry a stale armed flag at once.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub(crate) enum GestureStateId {
    #[default]
    Idle = 0,
    ArmedPrimary = 1,
    ArmedSecondary = 2,
    ArmedBoth = 3,
}

impl GestureStateId {
    pub(crate) const fn as_u8(self) -> u8 {
        self as u8
    }
}
