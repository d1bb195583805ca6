use super::config::GripConfig;
use super::convergence::{ConvergencePositions, ConvergenceSummary, PoseConvergenceEngine};
use super::gesture::GestureModeSelector;
use super::trace::GripTraceSample;
use super::types::{GripEventBuffer, ServoCommandBuffer, SwitchFrame};

/// Everything one tick produced: servo writes for the sink, discrete
/// events for telemetry, and a trace sample.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct TickOutput {
    pub(crate) commands: ServoCommandBuffer,
    pub(crate) events: GripEventBuffer,
    pub(crate) summary: ConvergenceSummary,
    pub(crate) trace: GripTraceSample,
}

/// Ties the gesture recognizer and the convergence engine together
/// under the single-owner tick contract: the control loop calls
/// `tick` exactly once per iteration and nothing else mutates grip
/// state.
pub(crate) struct GripController {
    gesture: GestureModeSelector,
    convergence: PoseConvergenceEngine,
}

impl GripController {
    pub(crate) fn new(config: &'static GripConfig) -> Self {
        Self {
            gesture: GestureModeSelector::new(config),
            convergence: PoseConvergenceEngine::new(config),
        }
    }

    pub(crate) fn pose_index(&self) -> u8 {
        self.gesture.pose_index()
    }

    pub(crate) fn positions(&self) -> ConvergencePositions {
        self.convergence.positions()
    }

    pub(crate) fn tick(&mut self, frame: SwitchFrame) -> TickOutput {
        let mut commands = ServoCommandBuffer::new();
        let gesture_output = self.gesture.tick(frame);
        let advanced = gesture_output.events.contains_pose_advance();

        // A recognized combo consumes the whole tick; convergence only
        // runs on ticks without a pose change.
        let summary = if advanced {
            ConvergenceSummary::default()
        } else {
            self.convergence.tick(
                self.gesture.pose_index(),
                frame.primary.held,
                frame.secondary.held,
                &mut commands,
            )
        };

        let positions = self.convergence.positions();
        let trace = GripTraceSample {
            now_ms: frame.now_ms,
            state_id: self.gesture.state_id(),
            pose_index: self.gesture.pose_index(),
            advanced: if advanced { 1 } else { 0 },
            primary_held: if frame.primary.held { 1 } else { 0 },
            secondary_held: if frame.secondary.held { 1 } else { 0 },
            finger_flex: positions.finger_flex,
            ring_pinky: positions.ring_pinky,
            thumb_flex: positions.thumb_flex,
            thumb_base: positions.thumb_base,
            command_count: commands.len() as u8,
        };

        TickOutput {
            commands,
            events: gesture_output.events,
            summary,
            trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::config::active_config;
    use super::super::types::{GripEvent, SwitchSample};
    use super::*;

    fn frame(now_ms: u64, click: (bool, bool), held: (bool, bool)) -> SwitchFrame {
        SwitchFrame {
            now_ms,
            primary: SwitchSample {
                held: held.0,
                single_click: click.0,
            },
            secondary: SwitchSample {
                held: held.1,
                single_click: click.1,
            },
        }
    }

    #[test]
    fn combo_tick_skips_convergence() {
        let mut controller = GripController::new(active_config());
        let _ = controller.tick(frame(1_000, (true, false), (true, false)));
        // Second combo click with the switch still held: the pose
        // advances and no servo commands are issued on that tick.
        let output = controller.tick(frame(1_200, (false, true), (true, true)));
        assert!(output.events.contains_pose_advance());
        assert!(output.commands.is_empty());
        assert!(!output.summary.engage_ran);
        assert_eq!(controller.pose_index(), 1);
    }

    #[test]
    fn held_primary_engages_active_pose() {
        let mut controller = GripController::new(active_config());
        let output = controller.tick(frame(1_000, (false, false), (true, false)));
        assert_eq!(output.commands.len(), 5);
        assert!(output.summary.engage_ran);
        assert_eq!(output.trace.pose_index, 0);
        assert_eq!(output.trace.finger_flex, 155);
    }

    #[test]
    fn quiet_tick_changes_nothing() {
        let mut controller = GripController::new(active_config());
        let before = controller.positions();
        let output = controller.tick(frame(1_000, (false, false), (false, false)));
        assert!(output.commands.is_empty());
        assert!(output.events.is_empty());
        assert_eq!(controller.positions(), before);
    }

    #[test]
    fn convergence_resumes_on_tick_after_advance() {
        let mut controller = GripController::new(active_config());
        let _ = controller.tick(frame(1_000, (true, false), (false, false)));
        let advanced = controller.tick(frame(1_100, (false, true), (false, false)));
        assert!(matches!(
            advanced.events.iter().next(),
            Some(GripEvent::PoseAdvanced { pose_index: 1 })
        ));
        // Next tick with primary held engages the new pose.
        let output = controller.tick(frame(1_120, (false, false), (true, false)));
        assert!(output.summary.engage_ran);
        assert_eq!(output.trace.pose_index, 1);
        assert_eq!(output.commands.len(), 3);
    }
}
