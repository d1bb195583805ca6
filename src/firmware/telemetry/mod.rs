use core::sync::atomic::{AtomicI32, AtomicU32, Ordering};

mod recorders;

#[allow(unused_imports)]
pub(crate) use recorders::{
    record_combo_late, record_control_tick, record_convergence_tick, record_pose_advance,
    record_servo_writes, record_tick_positions, record_wrist_step,
};

static CONTROL_TICKS: AtomicU32 = AtomicU32::new(0);
static COMBO_ADVANCES: AtomicU32 = AtomicU32::new(0);
static COMBO_LATE_CLICKS: AtomicU32 = AtomicU32::new(0);
static ENGAGE_TICKS: AtomicU32 = AtomicU32::new(0);
static RELEASE_TICKS: AtomicU32 = AtomicU32::new(0);
static ENGAGE_RESYNCS: AtomicU32 = AtomicU32::new(0);
static RELEASE_RESYNCS: AtomicU32 = AtomicU32::new(0);
static NEUTRAL_POSE_HELD_TICKS: AtomicU32 = AtomicU32::new(0);
static SERVO_WRITES: AtomicU32 = AtomicU32::new(0);
static WRIST_BEND_STEPS: AtomicU32 = AtomicU32::new(0);
static WRIST_ROTATION_STEPS: AtomicU32 = AtomicU32::new(0);

// Gauges mirrored out of the control task so the console can report
// state without reaching into it.
static LAST_POSE_INDEX: AtomicU32 = AtomicU32::new(0);
static LAST_FINGER_FLEX: AtomicI32 = AtomicI32::new(0);
static LAST_RING_PINKY: AtomicI32 = AtomicI32::new(0);
static LAST_THUMB_FLEX: AtomicI32 = AtomicI32::new(0);
static LAST_THUMB_BASE: AtomicI32 = AtomicI32::new(0);

#[derive(Clone, Copy)]
pub(crate) struct Snapshot {
    pub(crate) control_ticks: u32,
    pub(crate) combo_advances: u32,
    pub(crate) combo_late_clicks: u32,
    pub(crate) engage_ticks: u32,
    pub(crate) release_ticks: u32,
    pub(crate) engage_resyncs: u32,
    pub(crate) release_resyncs: u32,
    pub(crate) neutral_pose_held_ticks: u32,
    pub(crate) servo_writes: u32,
    pub(crate) wrist_bend_steps: u32,
    pub(crate) wrist_rotation_steps: u32,
    pub(crate) last_pose_index: u32,
    pub(crate) last_finger_flex: i32,
    pub(crate) last_ring_pinky: i32,
    pub(crate) last_thumb_flex: i32,
    pub(crate) last_thumb_base: i32,
}

pub(crate) fn snapshot() -> Snapshot {
    Snapshot {
        control_ticks: CONTROL_TICKS.load(Ordering::Relaxed),
        combo_advances: COMBO_ADVANCES.load(Ordering::Relaxed),
        combo_late_clicks: COMBO_LATE_CLICKS.load(Ordering::Relaxed),
        engage_ticks: ENGAGE_TICKS.load(Ordering::Relaxed),
        release_ticks: RELEASE_TICKS.load(Ordering::Relaxed),
        engage_resyncs: ENGAGE_RESYNCS.load(Ordering::Relaxed),
        release_resyncs: RELEASE_RESYNCS.load(Ordering::Relaxed),
        neutral_pose_held_ticks: NEUTRAL_POSE_HELD_TICKS.load(Ordering::Relaxed),
        servo_writes: SERVO_WRITES.load(Ordering::Relaxed),
        wrist_bend_steps: WRIST_BEND_STEPS.load(Ordering::Relaxed),
        wrist_rotation_steps: WRIST_ROTATION_STEPS.load(Ordering::Relaxed),
        last_pose_index: LAST_POSE_INDEX.load(Ordering::Relaxed),
        last_finger_flex: LAST_FINGER_FLEX.load(Ordering::Relaxed),
        last_ring_pinky: LAST_RING_PINKY.load(Ordering::Relaxed),
        last_thumb_flex: LAST_THUMB_FLEX.load(Ordering::Relaxed),
        last_thumb_base: LAST_THUMB_BASE.load(Ordering::Relaxed),
    }
}

fn saturating_add_u32(counter: &AtomicU32, value: u32) {
    let _ = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
        Some(current.saturating_add(value))
    });
}
