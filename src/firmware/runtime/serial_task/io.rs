use core::fmt::Write;

use super::super::super::{
    grip::{poses::pose_for_index, GripTraceSample},
    telemetry,
    types::SerialUart,
};

pub(super) async fn uart_write_all(uart: &mut SerialUart, bytes: &[u8]) {
    let mut remaining = bytes;
    while !remaining.is_empty() {
        match uart.write_async(remaining).await {
            Ok(0) | Err(_) => return,
            Ok(written) => remaining = &remaining[written..],
        }
    }
}

pub(super) async fn write_line(uart: &mut SerialUart, line: &str) {
    uart_write_all(uart, line.as_bytes()).await;
    uart_write_all(uart, b"\r\n").await;
}

pub(super) async fn write_error_line(uart: &mut SerialUart, message: &str) {
    let mut line = heapless::String::<96>::new();
    let _ = write!(&mut line, "ERR {message}\r\n");
    uart_write_all(uart, line.as_bytes()).await;
}

pub(super) async fn write_status_line(uart: &mut SerialUart) {
    let snapshot = telemetry::snapshot();
    let pose_label = pose_for_index(snapshot.last_pose_index as u8)
        .map_or("neutral", |pose| pose.label);
    let mut line = heapless::String::<160>::new();
    let _ = write!(
        &mut line,
        "GRIP pose={}({}) finger_flex={} ring_pinky={} thumb_flex={} thumb_base={}\r\n",
        snapshot.last_pose_index,
        pose_label,
        snapshot.last_finger_flex,
        snapshot.last_ring_pinky,
        snapshot.last_thumb_flex,
        snapshot.last_thumb_base,
    );
    uart_write_all(uart, line.as_bytes()).await;
}

pub(super) async fn write_counters_lines(uart: &mut SerialUart) {
    let snapshot = telemetry::snapshot();
    let mut line = heapless::String::<224>::new();
    let _ = write!(
        &mut line,
        "COUNTERS ticks={} advances={} late_clicks={} engage={} release={} neutral_held={}\r\n",
        snapshot.control_ticks,
        snapshot.combo_advances,
        snapshot.combo_late_clicks,
        snapshot.engage_ticks,
        snapshot.release_ticks,
        snapshot.neutral_pose_held_ticks,
    );
    uart_write_all(uart, line.as_bytes()).await;

    let mut line = heapless::String::<224>::new();
    let _ = write!(
        &mut line,
        "COUNTERS engage_resyncs={} release_resyncs={} servo_writes={} wrist_bend={} wrist_rot={}\r\n",
        snapshot.engage_resyncs,
        snapshot.release_resyncs,
        snapshot.servo_writes,
        snapshot.wrist_bend_steps,
        snapshot.wrist_rotation_steps,
    );
    uart_write_all(uart, line.as_bytes()).await;
}

pub(super) async fn write_trace_sample(uart: &mut SerialUart, sample: GripTraceSample) {
    let mut line = heapless::String::<192>::new();
    let _ = write!(
        &mut line,
        "grip_trace,{},{},{},{},{},{},{},{},{},{},{}\r\n",
        sample.now_ms,
        sample.state_id.as_u8(),
        sample.pose_index,
        sample.advanced,
        sample.primary_held,
        sample.secondary_held,
        sample.finger_flex,
        sample.ring_pinky,
        sample.thumb_flex,
        sample.thumb_base,
        sample.command_count,
    );
    uart_write_all(uart, line.as_bytes()).await;
}
