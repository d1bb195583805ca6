use core::sync::atomic::Ordering;

use super::super::grip::{ConvergencePositions, ConvergenceSummary};
use super::super::wrist::WristAxis;
use super::{
    saturating_add_u32, COMBO_ADVANCES, COMBO_LATE_CLICKS, CONTROL_TICKS, ENGAGE_RESYNCS,
    ENGAGE_TICKS, LAST_FINGER_FLEX, LAST_POSE_INDEX, LAST_RING_PINKY, LAST_THUMB_BASE,
    LAST_THUMB_FLEX, NEUTRAL_POSE_HELD_TICKS, RELEASE_RESYNCS, RELEASE_TICKS, SERVO_WRITES,
    WRIST_BEND_STEPS, WRIST_ROTATION_STEPS,
};

pub(crate) fn record_control_tick() {
    CONTROL_TICKS.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_pose_advance(pose_index: u8) {
    COMBO_ADVANCES.fetch_add(1, Ordering::Relaxed);
    LAST_POSE_INDEX.store(u32::from(pose_index), Ordering::Relaxed);
    #[cfg(feature = "telemetry-defmt")]
    defmt::info!("telemetry pose_advance index={=u8}", pose_index);
}

pub(crate) fn record_combo_late(_elapsed_ms: u16) {
    COMBO_LATE_CLICKS.fetch_add(1, Ordering::Relaxed);
    #[cfg(feature = "telemetry-defmt")]
    defmt::debug!("telemetry combo_late elapsed_ms={=u16}", _elapsed_ms);
}

pub(crate) fn record_convergence_tick(summary: ConvergenceSummary) {
    if summary.engage_ran {
        ENGAGE_TICKS.fetch_add(1, Ordering::Relaxed);
    }
    if summary.release_ran {
        RELEASE_TICKS.fetch_add(1, Ordering::Relaxed);
    }
    if summary.engage_resync {
        ENGAGE_RESYNCS.fetch_add(1, Ordering::Relaxed);
    }
    if summary.release_resync {
        RELEASE_RESYNCS.fetch_add(1, Ordering::Relaxed);
    }
    if summary.neutral_pose_held {
        NEUTRAL_POSE_HELD_TICKS.fetch_add(1, Ordering::Relaxed);
    }
    #[cfg(feature = "telemetry-defmt")]
    if summary.engage_resync || summary.release_resync {
        defmt::debug!(
            "telemetry convergence_resync engage={=bool} release={=bool}",
            summary.engage_resync,
            summary.release_resync,
        );
    }
}

pub(crate) fn record_tick_positions(pose_index: u8, positions: ConvergencePositions) {
    LAST_POSE_INDEX.store(u32::from(pose_index), Ordering::Relaxed);
    LAST_FINGER_FLEX.store(i32::from(positions.finger_flex), Ordering::Relaxed);
    LAST_RING_PINKY.store(i32::from(positions.ring_pinky), Ordering::Relaxed);
    LAST_THUMB_FLEX.store(i32::from(positions.thumb_flex), Ordering::Relaxed);
    LAST_THUMB_BASE.store(i32::from(positions.thumb_base), Ordering::Relaxed);
}

pub(crate) fn record_servo_writes(count: usize) {
    saturating_add_u32(&SERVO_WRITES, count as u32);
}

pub(crate) fn record_wrist_step(axis: WristAxis) {
    let counter = match axis {
        WristAxis::Bend => &WRIST_BEND_STEPS,
        WristAxis::Rotation => &WRIST_ROTATION_STEPS,
    };
    counter.fetch_add(1, Ordering::Relaxed);
}
