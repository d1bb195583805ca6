use core::cmp::min;

use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::config::GripConfig;
use super::types::{GestureStateId, GripEvent, GripEventBuffer, SwitchFrame, SwitchId};

#[derive(Clone, Copy, Debug)]
enum ComboEvent {
    Tick(SwitchFrame),
}

#[derive(Default)]
struct DispatchContext {
    events: GripEventBuffer,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct GestureOutput {
    pub(crate) events: GripEventBuffer,
}

/// Recognizes the two-switch click combo (either order) and owns the
/// active pose index. Dispatched exactly once per control tick.
pub(crate) struct GestureModeSelector {
    machine: statig::blocking::StateMachine<ComboHsm>,
}

impl GestureModeSelector {
    pub(crate) fn new(config: &'static GripConfig) -> Self {
        Self {
            machine: ComboHsm::new(config).state_machine(),
        }
    }

    pub(crate) fn tick(&mut self, frame: SwitchFrame) -> GestureOutput {
        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&ComboEvent::Tick(frame), &mut context);
        GestureOutput {
            events: context.events,
        }
    }

    pub(crate) fn pose_index(&self) -> u8 {
        self.machine.inner().pose_index
    }

    pub(crate) fn state_id(&self) -> GestureStateId {
        self.machine.inner().state_id
    }
}

/// An armed flag records the most recent click of one switch. Flags are
/// only consumed by a completed combo or refreshed by a same-switch
/// click; there is no expiry transition, so a stale flag stays armed
/// until a later click of the other switch lands inside its window.
struct ComboHsm {
    config: &'static GripConfig,
    primary_armed_at_ms: Option<u64>,
    secondary_armed_at_ms: Option<u64>,
    pose_index: u8,
    state_id: GestureStateId,
}

impl ComboHsm {
    fn new(config: &'static GripConfig) -> Self {
        Self {
            config,
            primary_armed_at_ms: None,
            secondary_armed_at_ms: None,
            pose_index: 0,
            state_id: GestureStateId::Idle,
        }
    }

    fn within_window(&self, armed_at_ms: Option<u64>, now_ms: u64) -> bool {
        armed_at_ms
            .is_some_and(|at| now_ms.saturating_sub(at) < self.config.gesture.combo_window_ms)
    }

    fn arm_age_ms(armed_at_ms: Option<u64>, now_ms: u64) -> u16 {
        let age = armed_at_ms.map_or(0, |at| now_ms.saturating_sub(at));
        min(age, u16::MAX as u64) as u16
    }

    /// Consumes both armed flags and cycles the index. The comparison is
    /// deliberately strict: the index visits `pose_count` itself for one
    /// combo (a neutral stop with no pose-table entry) before wrapping,
    /// giving a five-click cycle over four poses.
    fn advance_pose(&mut self, context: &mut DispatchContext) {
        self.primary_armed_at_ms = None;
        self.secondary_armed_at_ms = None;
        self.pose_index += 1;
        if self.pose_index > self.config.gesture.pose_count {
            self.pose_index = 0;
        }
        context.events.push(GripEvent::PoseAdvanced {
            pose_index: self.pose_index,
        });
    }

    fn push_combo_late(context: &mut DispatchContext, elapsed_ms: u16) {
        context.events.push(GripEvent::ComboLate { elapsed_ms });
    }
}

#[state_machine(initial = "State::idle()")]
impl ComboHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &ComboEvent) -> Outcome<State> {
        let ComboEvent::Tick(frame) = event;
        let primary_click = frame.clicked(SwitchId::Primary);
        let secondary_click = frame.clicked(SwitchId::Secondary);
        if primary_click && secondary_click {
            // Both edges on one tick: the second click lands inside a
            // zero-width window and completes the combo immediately.
            self.advance_pose(context);
            return Handled;
        }
        if primary_click {
            self.primary_armed_at_ms = Some(frame.now_ms);
            self.state_id = GestureStateId::ArmedPrimary;
            return Transition(State::armed_primary());
        }
        if secondary_click {
            self.secondary_armed_at_ms = Some(frame.now_ms);
            self.state_id = GestureStateId::ArmedSecondary;
            return Transition(State::armed_secondary());
        }
        Handled
    }

    #[state]
    fn armed_primary(
        &mut self,
        context: &mut DispatchContext,
        event: &ComboEvent,
    ) -> Outcome<State> {
        let ComboEvent::Tick(frame) = event;
        let primary_click = frame.clicked(SwitchId::Primary);
        let secondary_click = frame.clicked(SwitchId::Secondary);
        if primary_click && secondary_click {
            self.advance_pose(context);
            self.state_id = GestureStateId::Idle;
            return Transition(State::idle());
        }
        if secondary_click {
            if self.within_window(self.primary_armed_at_ms, frame.now_ms) {
                self.advance_pose(context);
                self.state_id = GestureStateId::Idle;
                return Transition(State::idle());
            }
            Self::push_combo_late(
                context,
                Self::arm_age_ms(self.primary_armed_at_ms, frame.now_ms),
            );
            self.secondary_armed_at_ms = Some(frame.now_ms);
            self.state_id = GestureStateId::ArmedBoth;
            return Transition(State::armed_both());
        }
        if primary_click {
            self.primary_armed_at_ms = Some(frame.now_ms);
        }
        Handled
    }

    #[state]
    fn armed_secondary(
        &mut self,
        context: &mut DispatchContext,
        event: &ComboEvent,
    ) -> Outcome<State> {
        let ComboEvent::Tick(frame) = event;
        let primary_click = frame.clicked(SwitchId::Primary);
        let secondary_click = frame.clicked(SwitchId::Secondary);
        if primary_click && secondary_click {
            self.advance_pose(context);
            self.state_id = GestureStateId::Idle;
            return Transition(State::idle());
        }
        if primary_click {
            if self.within_window(self.secondary_armed_at_ms, frame.now_ms) {
                self.advance_pose(context);
                self.state_id = GestureStateId::Idle;
                return Transition(State::idle());
            }
            Self::push_combo_late(
                context,
                Self::arm_age_ms(self.secondary_armed_at_ms, frame.now_ms),
            );
            self.primary_armed_at_ms = Some(frame.now_ms);
            self.state_id = GestureStateId::ArmedBoth;
            return Transition(State::armed_both());
        }
        if secondary_click {
            self.secondary_armed_at_ms = Some(frame.now_ms);
        }
        Handled
    }

    #[state]
    fn armed_both(&mut self, context: &mut DispatchContext, event: &ComboEvent) -> Outcome<State> {
        let ComboEvent::Tick(frame) = event;
        let primary_click = frame.clicked(SwitchId::Primary);
        let secondary_click = frame.clicked(SwitchId::Secondary);
        if primary_click && secondary_click {
            self.advance_pose(context);
            self.state_id = GestureStateId::Idle;
            return Transition(State::idle());
        }
        if secondary_click {
            if self.within_window(self.primary_armed_at_ms, frame.now_ms) {
                self.advance_pose(context);
                self.state_id = GestureStateId::Idle;
                return Transition(State::idle());
            }
            Self::push_combo_late(
                context,
                Self::arm_age_ms(self.primary_armed_at_ms, frame.now_ms),
            );
            self.secondary_armed_at_ms = Some(frame.now_ms);
            return Handled;
        }
        if primary_click {
            if self.within_window(self.secondary_armed_at_ms, frame.now_ms) {
                self.advance_pose(context);
                self.state_id = GestureStateId::Idle;
                return Transition(State::idle());
            }
            Self::push_combo_late(
                context,
                Self::arm_age_ms(self.secondary_armed_at_ms, frame.now_ms),
            );
            self.primary_armed_at_ms = Some(frame.now_ms);
            return Handled;
        }
        Handled
    }
}
