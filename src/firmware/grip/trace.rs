use super::types::GestureStateId;

/// One control tick's worth of grip state, streamed over the console
/// when tracing is enabled.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct GripTraceSample {
    pub(crate) now_ms: u64,
    pub(crate) state_id: GestureStateId,
    pub(crate) pose_index: u8,
    pub(crate) advanced: u8,
    pub(crate) primary_held: u8,
    pub(crate) secondary_held: u8,
    pub(crate) finger_flex: i16,
    pub(crate) ring_pinky: i16,
    pub(crate) thumb_flex: i16,
    pub(crate) thumb_base: i16,
    pub(crate) command_count: u8,
}
