use super::config::GripConfig;
use super::poses::{pose_for_index, PoseAction};
use super::types::{ActuatorChannel, ServoCommand, ServoCommandBuffer};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum StepDirection {
    Engage,
    Release,
}

/// Current values of the four shared position scalars, for traces and
/// the console.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct ConvergencePositions {
    pub(crate) finger_flex: i16,
    pub(crate) ring_pinky: i16,
    pub(crate) thumb_flex: i16,
    pub(crate) thumb_base: i16,
}

/// What one convergence tick did, for telemetry.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct ConvergenceSummary {
    pub(crate) engage_ran: bool,
    pub(crate) release_ran: bool,
    pub(crate) engage_resync: bool,
    pub(crate) release_resync: bool,
    pub(crate) neutral_pose_held: bool,
}

/// Steps the hand's actuators toward the active pose while a switch is
/// held. The four scalars are shared across poses and persist across
/// pose switches: changing pose mid-motion resumes from wherever the
/// scalars currently sit, never from pose defaults.
pub(crate) struct PoseConvergenceEngine {
    config: &'static GripConfig,
    finger_flex: i16,
    ring_pinky: i16,
    thumb_flex: i16,
    thumb_base: i16,
}

impl PoseConvergenceEngine {
    pub(crate) fn new(config: &'static GripConfig) -> Self {
        Self {
            config,
            finger_flex: config.calibration.initial_finger_flex,
            ring_pinky: config.calibration.initial_ring_pinky,
            thumb_flex: config.calibration.initial_thumb_flex,
            thumb_base: config.calibration.initial_thumb_base,
        }
    }

    pub(crate) fn positions(&self) -> ConvergencePositions {
        ConvergencePositions {
            finger_flex: self.finger_flex,
            ring_pinky: self.ring_pinky,
            thumb_flex: self.thumb_flex,
            thumb_base: self.thumb_base,
        }
    }

    /// One control tick. Held levels select the action; a pose index
    /// without a table entry (the neutral stop in the combo cycle)
    /// moves nothing. Both levels held runs engage then release against
    /// the same scalars, which cancels their deltas; that is existing,
    /// unguarded behavior.
    pub(crate) fn tick(
        &mut self,
        pose_index: u8,
        primary_held: bool,
        secondary_held: bool,
        commands: &mut ServoCommandBuffer,
    ) -> ConvergenceSummary {
        let mut summary = ConvergenceSummary::default();
        let Some(pose) = pose_for_index(pose_index) else {
            summary.neutral_pose_held = primary_held || secondary_held;
            return summary;
        };
        if primary_held {
            summary.engage_ran = true;
            summary.engage_resync = self.run_action(&pose.engage, StepDirection::Engage, commands);
        }
        if secondary_held {
            summary.release_ran = true;
            summary.release_resync =
                self.run_action(&pose.release, StepDirection::Release, commands);
        }
        summary
    }

    fn scalar_for(&self, channel: ActuatorChannel) -> i16 {
        match channel {
            ActuatorChannel::Index | ActuatorChannel::Middle => self.finger_flex,
            ActuatorChannel::Ring | ActuatorChannel::Pinky => self.ring_pinky,
            ActuatorChannel::ThumbFlex => self.thumb_flex,
            ActuatorChannel::ThumbBase => self.thumb_base,
        }
    }

    /// Commands carry the pre-step positions: the servo write lands one
    /// tick behind the internal counters.
    fn run_action(
        &mut self,
        action: &PoseAction,
        direction: StepDirection,
        commands: &mut ServoCommandBuffer,
    ) -> bool {
        self.thumb_base = action.thumb_base.apply_bounds(self.thumb_base);

        for channel in ActuatorChannel::ALL {
            if action.channels.contains(channel) {
                commands.push(ServoCommand {
                    channel,
                    position: self.scalar_for(channel),
                });
            }
        }

        let steps = &self.config.steps;
        match direction {
            StepDirection::Engage => {
                self.finger_flex -= steps.finger_flex;
                self.ring_pinky += steps.ring_pinky;
                self.thumb_flex -= steps.thumb_flex;
            }
            StepDirection::Release => {
                self.finger_flex += steps.finger_flex;
                self.ring_pinky -= steps.ring_pinky;
                self.thumb_flex += steps.thumb_flex;
            }
        }
        self.thumb_base += action.thumb_base.step;

        self.resync_on_saturation(direction)
    }

    /// Once the finger scalar saturates, all coupled scalars are pinned
    /// to their end-of-travel values in the same tick, so actuators that
    /// move in lockstep at different rates cannot drift apart. The
    /// release branch pins the thumb flex to the finger ceiling rather
    /// than a thumb-specific bound; hands in the field are calibrated
    /// against that value, so it stays.
    fn resync_on_saturation(&mut self, direction: StepDirection) -> bool {
        let calibration = &self.config.calibration;
        match direction {
            StepDirection::Engage => {
                if self.finger_flex <= calibration.min_finger_pos {
                    self.finger_flex = calibration.min_finger_pos;
                    self.ring_pinky = calibration.max_finger_pos;
                    self.thumb_flex = calibration.min_thumb_flex_pos;
                    return true;
                }
            }
            StepDirection::Release => {
                if self.finger_flex >= calibration.max_finger_pos {
                    self.finger_flex = calibration.max_finger_pos;
                    self.ring_pinky = calibration.min_finger_pos;
                    self.thumb_flex = calibration.max_finger_pos;
                    return true;
                }
            }
        }
        false
    }

    #[cfg(test)]
    pub(crate) fn set_positions_for_test(&mut self, positions: ConvergencePositions) {
        self.finger_flex = positions.finger_flex;
        self.ring_pinky = positions.ring_pinky;
        self.thumb_flex = positions.thumb_flex;
        self.thumb_base = positions.thumb_base;
    }
}

#[cfg(test)]
mod tests {
    use super::super::config::active_config;
    use super::*;

    fn engine() -> PoseConvergenceEngine {
        PoseConvergenceEngine::new(active_config())
    }

    fn engage_tick(engine: &mut PoseConvergenceEngine, pose_index: u8) -> ServoCommandBuffer {
        let mut commands = ServoCommandBuffer::new();
        let _ = engine.tick(pose_index, true, false, &mut commands);
        commands
    }

    fn release_tick(engine: &mut PoseConvergenceEngine, pose_index: u8) -> ServoCommandBuffer {
        let mut commands = ServoCommandBuffer::new();
        let _ = engine.tick(pose_index, false, true, &mut commands);
        commands
    }

    #[test]
    fn idle_tick_is_a_no_op() {
        let mut engine = engine();
        let before = engine.positions();
        let mut commands = ServoCommandBuffer::new();
        let summary = engine.tick(0, false, false, &mut commands);
        assert!(commands.is_empty());
        assert_eq!(engine.positions(), before);
        assert_eq!(summary, ConvergenceSummary::default());
    }

    #[test]
    fn neutral_pose_index_moves_nothing() {
        let mut engine = engine();
        let before = engine.positions();
        let mut commands = ServoCommandBuffer::new();
        let summary = engine.tick(4, true, true, &mut commands);
        assert!(commands.is_empty());
        assert_eq!(engine.positions(), before);
        assert!(summary.neutral_pose_held);
        assert!(!summary.engage_ran && !summary.release_ran);
    }

    #[test]
    fn commands_carry_pre_step_positions() {
        let mut engine = engine();
        let commands = engage_tick(&mut engine, 0);
        // The servo is told to go where the counter was before the step.
        assert_eq!(commands.position_for(ActuatorChannel::Index), Some(160));
        assert_eq!(commands.position_for(ActuatorChannel::Ring), Some(0));
        assert_eq!(commands.position_for(ActuatorChannel::ThumbFlex), Some(0));
        let positions = engine.positions();
        assert_eq!(positions.finger_flex, 155);
        assert_eq!(positions.ring_pinky, 5);
        assert_eq!(positions.thumb_flex, -2);
    }

    #[test]
    fn full_grip_engage_writes_five_channels_without_thumb_base() {
        let mut engine = engine();
        let commands = engage_tick(&mut engine, 0);
        assert_eq!(commands.len(), 5);
        assert!(commands.position_for(ActuatorChannel::ThumbBase).is_none());
        // The thumb-base scalar still steps down toward the grip stop.
        assert_eq!(engine.positions().thumb_base, -1);
    }

    #[test]
    fn full_grip_engage_reaches_floor_and_holds() {
        let mut engine = engine();
        for _ in 0..32 {
            let _ = engage_tick(&mut engine, 0);
        }
        assert_eq!(engine.positions().finger_flex, 0);
        // Tick 33: held at the floor, cross-pinned values unchanged.
        let commands = engage_tick(&mut engine, 0);
        assert_eq!(commands.position_for(ActuatorChannel::Index), Some(0));
        let positions = engine.positions();
        assert_eq!(positions.finger_flex, 0);
        assert_eq!(positions.ring_pinky, 160);
        assert_eq!(positions.thumb_flex, 80);
    }

    #[test]
    fn saturation_resyncs_all_scalars_in_the_same_tick() {
        let mut engine = engine();
        engine.set_positions_for_test(ConvergencePositions {
            finger_flex: 5,
            ring_pinky: 100,
            thumb_flex: 40,
            thumb_base: 0,
        });
        let mut commands = ServoCommandBuffer::new();
        let summary = engine.tick(0, true, false, &mut commands);
        assert!(summary.engage_resync);
        let positions = engine.positions();
        assert_eq!(positions.finger_flex, 0);
        assert_eq!(positions.ring_pinky, 160);
        assert_eq!(positions.thumb_flex, 80);
    }

    #[test]
    fn release_resync_pins_thumb_flex_to_finger_ceiling() {
        let mut engine = engine();
        engine.set_positions_for_test(ConvergencePositions {
            finger_flex: 155,
            ring_pinky: 5,
            thumb_flex: 100,
            thumb_base: 10,
        });
        let mut commands = ServoCommandBuffer::new();
        let summary = engine.tick(0, false, true, &mut commands);
        assert!(summary.release_resync);
        let positions = engine.positions();
        assert_eq!(positions.finger_flex, 160);
        assert_eq!(positions.ring_pinky, 0);
        // The finger ceiling, not the thumb floor of 80.
        assert_eq!(positions.thumb_flex, 160);
    }

    #[test]
    fn finger_scalars_never_leave_calibrated_range() {
        let mut engine = engine();
        for _ in 0..200 {
            let _ = engage_tick(&mut engine, 0);
            let positions = engine.positions();
            assert!((0..=160).contains(&positions.finger_flex));
            assert!((0..=160).contains(&positions.ring_pinky));
        }
        for _ in 0..200 {
            let _ = release_tick(&mut engine, 0);
            let positions = engine.positions();
            assert!((0..=160).contains(&positions.finger_flex));
            assert!((0..=160).contains(&positions.ring_pinky));
        }
    }

    #[test]
    fn pinch_engage_raises_thumb_base_to_default_before_stepping() {
        let mut engine = engine();
        engine.set_positions_for_test(ConvergencePositions {
            finger_flex: 160,
            ring_pinky: 0,
            thumb_flex: 0,
            thumb_base: 20,
        });
        let commands = engage_tick(&mut engine, 1);
        // Raised to the default floor, commanded, then incremented.
        assert_eq!(commands.position_for(ActuatorChannel::ThumbBase), Some(30));
        assert_eq!(engine.positions().thumb_base, 31);
    }

    #[test]
    fn pinch_engage_caps_thumb_base_at_pose_max() {
        let mut engine = engine();
        engine.set_positions_for_test(ConvergencePositions {
            finger_flex: 160,
            ring_pinky: 0,
            thumb_flex: 0,
            thumb_base: 60,
        });
        let commands = engage_tick(&mut engine, 1);
        assert_eq!(commands.position_for(ActuatorChannel::ThumbBase), Some(40));
        assert_eq!(engine.positions().thumb_base, 41);
    }

    #[test]
    fn tripod_and_point_use_their_own_thumb_base_caps() {
        for (pose_index, cap) in [(2u8, 60i16), (3u8, 90i16)] {
            let mut engine = engine();
            engine.set_positions_for_test(ConvergencePositions {
                finger_flex: 160,
                ring_pinky: 0,
                thumb_flex: 0,
                thumb_base: 127,
            });
            let commands = engage_tick(&mut engine, pose_index);
            assert_eq!(
                commands.position_for(ActuatorChannel::ThumbBase),
                Some(cap),
                "pose {pose_index}"
            );
        }
    }

    #[test]
    fn release_decrements_thumb_base_without_bounds() {
        let mut engine = engine();
        engine.set_positions_for_test(ConvergencePositions {
            finger_flex: 80,
            ring_pinky: 80,
            thumb_flex: 40,
            thumb_base: 2,
        });
        for _ in 0..5 {
            let _ = release_tick(&mut engine, 1);
        }
        // No floor on release: the scalar walks below zero until an
        // engage rule raises it again.
        assert_eq!(engine.positions().thumb_base, -3);
    }

    #[test]
    fn point_engage_leaves_index_untouched() {
        let mut engine = engine();
        let commands = engage_tick(&mut engine, 3);
        assert!(commands.position_for(ActuatorChannel::Index).is_none());
        assert_eq!(commands.position_for(ActuatorChannel::Middle), Some(160));
        assert_eq!(commands.position_for(ActuatorChannel::Ring), Some(0));
    }

    #[test]
    fn both_switches_held_cancel_each_other() {
        let mut engine = engine();
        engine.set_positions_for_test(ConvergencePositions {
            finger_flex: 80,
            ring_pinky: 80,
            thumb_flex: 40,
            thumb_base: 35,
        });
        let mut commands = ServoCommandBuffer::new();
        let summary = engine.tick(1, true, true, &mut commands);
        assert!(summary.engage_ran && summary.release_ran);
        let positions = engine.positions();
        // Engage and release deltas cancel for the shared scalars; the
        // thumb base nets zero as well (+1 then -1).
        assert_eq!(positions.finger_flex, 80);
        assert_eq!(positions.ring_pinky, 80);
        assert_eq!(positions.thumb_flex, 40);
        assert_eq!(positions.thumb_base, 35);
        // Both actions commanded their channels.
        assert_eq!(commands.len(), 6);
    }

    #[test]
    fn pose_switch_resumes_from_current_scalars() {
        let mut engine = engine();
        for _ in 0..10 {
            let _ = engage_tick(&mut engine, 0);
        }
        let mid_motion = engine.positions();
        assert_eq!(mid_motion.finger_flex, 110);
        // Switching to pinch does not snap anything; the next engage
        // continues from the shared scalars.
        let commands = engage_tick(&mut engine, 1);
        assert_eq!(commands.position_for(ActuatorChannel::Index), Some(110));
        assert_eq!(engine.positions().finger_flex, 105);
    }
}
