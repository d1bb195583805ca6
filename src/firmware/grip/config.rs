/// Combo-gesture tuning. `pose_count` is the highest usable pose index;
/// the cycle deliberately passes through one neutral index above it
/// before wrapping (see the selector).
#[derive(Clone, Copy, Debug)]
pub(crate) struct GestureTuning {
    pub(crate) combo_window_ms: u64,
    pub(crate) pose_count: u8,
}

/// Calibrated travel of the shared position scalars, in servo degrees.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FingerCalibration {
    pub(crate) min_finger_pos: i16,
    pub(crate) max_finger_pos: i16,
    pub(crate) min_thumb_flex_pos: i16,
    pub(crate) initial_finger_flex: i16,
    pub(crate) initial_ring_pinky: i16,
    pub(crate) initial_thumb_flex: i16,
    pub(crate) initial_thumb_base: i16,
}

/// Degrees moved per control tick while a switch is held.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StepTuning {
    pub(crate) finger_flex: i16,
    pub(crate) ring_pinky: i16,
    pub(crate) thumb_flex: i16,
}

/// Thumb-base travel targets. The default position offsets transmission
/// lag; each pose caps inward travel at its own maximum.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ThumbBaseTuning {
    pub(crate) default_pos: i16,
    pub(crate) grip_max: i16,
    pub(crate) pinch_max: i16,
    pub(crate) tripod_max: i16,
    pub(crate) point_max: i16,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct GripConfig {
    pub(crate) gesture: GestureTuning,
    pub(crate) calibration: FingerCalibration,
    pub(crate) steps: StepTuning,
    pub(crate) thumb_base: ThumbBaseTuning,
}

pub(crate) const GRIP_CONFIG: GripConfig = GripConfig {
    gesture: GestureTuning {
        combo_window_ms: 2000,
        pose_count: 4,
    },
    calibration: FingerCalibration {
        min_finger_pos: 0,
        max_finger_pos: 160,
        min_thumb_flex_pos: 80,
        initial_finger_flex: 160,
        initial_ring_pinky: 0,
        initial_thumb_flex: 0,
        initial_thumb_base: 0,
    },
    steps: StepTuning {
        finger_flex: 5,
        ring_pinky: 5,
        thumb_flex: 2,
    },
    thumb_base: ThumbBaseTuning {
        default_pos: 30,
        grip_max: 0,
        pinch_max: 40,
        tripod_max: 60,
        point_max: 90,
    },
};

pub(crate) fn active_config() -> &'static GripConfig {
    &GRIP_CONFIG
}
