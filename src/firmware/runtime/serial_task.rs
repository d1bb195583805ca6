mod io;
mod line_reader;
mod parser;

use core::sync::atomic::Ordering;

use embassy_futures::select::{select, Either};
use embassy_time::Timer;

use super::super::{
    config::{
        GRIP_TRACE_ENABLED, GRIP_TRACE_SAMPLES, WRIST_BEND_DIRECTION, WRIST_ROTATION_DIRECTION,
    },
    types::SerialUart,
};
use io::{
    write_counters_lines, write_error_line, write_line, write_status_line, write_trace_sample,
};
use line_reader::{ConsoleLineReader, LineReadEvent};
use parser::{parse_console_command, ConsoleCommand};

const READ_ERROR_BACKOFF_MS: u64 = 50;

/// Line-oriented maintenance console on UART0. Also drains the grip
/// trace channel so enabled traces stream between commands.
#[embassy_executor::task]
pub(crate) async fn console_task(mut uart: SerialUart) {
    let mut line_reader = ConsoleLineReader::new();
    let mut read_buf = [0u8; 32];

    loop {
        // Bind before matching so the select future (and its borrow of
        // the UART) is dropped before the arms write responses.
        let wake = select(uart.read_async(&mut read_buf), GRIP_TRACE_SAMPLES.receive()).await;
        match wake {
            Either::First(Ok(len)) => {
                for &byte in &read_buf[..len] {
                    match line_reader.push_byte(byte) {
                        LineReadEvent::Complete(line) => {
                            let command = parse_console_command(line);
                            run_console_command(&mut uart, command).await;
                        }
                        LineReadEvent::Overflow => {
                            write_error_line(&mut uart, "line too long").await;
                        }
                        LineReadEvent::None => {}
                    }
                }
            }
            Either::First(Err(_)) => {
                Timer::after_millis(READ_ERROR_BACKOFF_MS).await;
            }
            Either::Second(sample) => {
                write_trace_sample(&mut uart, sample).await;
            }
        }
    }
}

async fn run_console_command(
    uart: &mut SerialUart,
    command: Result<ConsoleCommand, &'static str>,
) {
    match command {
        Ok(ConsoleCommand::Status) => write_status_line(uart).await,
        Ok(ConsoleCommand::Counters) => write_counters_lines(uart).await,
        Ok(ConsoleCommand::GripTrace(enabled)) => {
            GRIP_TRACE_ENABLED.store(enabled, Ordering::Relaxed);
            write_line(uart, if enabled { "OK grip trace on" } else { "OK grip trace off" }).await;
        }
        Ok(ConsoleCommand::WristBend(direction)) => {
            WRIST_BEND_DIRECTION.store(direction, Ordering::Relaxed);
            write_line(uart, "OK wrist bend").await;
        }
        Ok(ConsoleCommand::WristRotation(direction)) => {
            WRIST_ROTATION_DIRECTION.store(direction, Ordering::Relaxed);
            write_line(uart, "OK wrist rot").await;
        }
        Err(message) => write_error_line(uart, message).await,
    }
}
