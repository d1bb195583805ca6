use core::sync::atomic::Ordering;

use embassy_time::{Duration, Instant, Ticker};

use super::super::{
    config::{
        CONTROL_TICK_MS, GRIP_TRACE_ENABLED, GRIP_TRACE_SAMPLES, GRIP_TRACE_SAMPLE_INTERVAL_MS,
        WRIST_BEND_DIRECTION, WRIST_ROTATION_DIRECTION,
    },
    grip::{config::active_config, GripController, GripEvent, SwitchFrame},
    servo::flush_commands,
    switches::{ToeSwitch, SWITCH_TUNING},
    telemetry,
    types::ControlContext,
    wrist::{WristActuator, WristAxis, BEND_CONFIG, ROTATION_CONFIG},
};

/// The control loop: the single owner of all grip state. Exactly one
/// tick per iteration flows switch levels in and servo positions out;
/// nothing here blocks past the ticker.
#[embassy_executor::task]
pub(crate) async fn control_task(mut context: ControlContext) {
    let mut controller = GripController::new(active_config());
    let mut primary_switch = ToeSwitch::new(&SWITCH_TUNING);
    let mut secondary_switch = ToeSwitch::new(&SWITCH_TUNING);
    let mut wrist_bend = WristActuator::new(&BEND_CONFIG);
    let mut wrist_rotation = WristActuator::new(&ROTATION_CONFIG);

    let mut ticker = Ticker::every(Duration::from_millis(CONTROL_TICK_MS));
    let mut next_trace_at = Instant::now();

    loop {
        ticker.next().await;
        let now = Instant::now();
        let now_ms = now.as_millis();

        // Switch inputs are active low.
        primary_switch.update(context.switches.primary.is_low(), now_ms);
        secondary_switch.update(context.switches.secondary.is_low(), now_ms);

        let frame = SwitchFrame {
            now_ms,
            primary: primary_switch.sample(),
            secondary: secondary_switch.sample(),
        };
        let output = controller.tick(frame);

        let written = flush_commands(&mut context.servos, &output.commands);
        telemetry::record_servo_writes(written);
        for event in output.events.iter() {
            match event {
                GripEvent::PoseAdvanced { pose_index } => {
                    telemetry::record_pose_advance(*pose_index);
                }
                GripEvent::ComboLate { elapsed_ms } => {
                    telemetry::record_combo_late(*elapsed_ms);
                }
            }
        }
        telemetry::record_convergence_tick(output.summary);
        telemetry::record_tick_positions(controller.pose_index(), controller.positions());
        telemetry::record_control_tick();

        step_wrist(
            &mut context,
            &mut wrist_bend,
            WristAxis::Bend,
            WRIST_BEND_DIRECTION.load(Ordering::Relaxed),
        );
        step_wrist(
            &mut context,
            &mut wrist_rotation,
            WristAxis::Rotation,
            WRIST_ROTATION_DIRECTION.load(Ordering::Relaxed),
        );

        if GRIP_TRACE_ENABLED.load(Ordering::Relaxed)
            && (output.trace.advanced == 1 || now >= next_trace_at)
        {
            // try_send: a stalled console must never stall the loop.
            let _ = GRIP_TRACE_SAMPLES.try_send(output.trace);
            next_trace_at = now + Duration::from_millis(GRIP_TRACE_SAMPLE_INTERVAL_MS);
        }
    }
}

fn step_wrist(
    context: &mut ControlContext,
    actuator: &mut WristActuator,
    axis: WristAxis,
    direction: i8,
) {
    if let Some(position) = actuator.tick(axis.nudge_for(direction)) {
        context.servos.write_wrist(axis, position);
        telemetry::record_wrist_step(axis);
        telemetry::record_servo_writes(1);
    }
}
