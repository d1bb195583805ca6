#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum ConsoleCommand {
    Status,
    Counters,
    GripTrace(bool),
    WristBend(i8),
    WristRotation(i8),
}

pub(super) fn parse_console_command(line: &[u8]) -> Result<ConsoleCommand, &'static str> {
    let line = core::str::from_utf8(line).map_err(|_| "not utf-8")?;
    let mut parts = line.split_ascii_whitespace();
    match parts.next() {
        Some("status") => Ok(ConsoleCommand::Status),
        Some("counters") => Ok(ConsoleCommand::Counters),
        Some("grip") => match (parts.next(), parts.next()) {
            (Some("trace"), Some("on")) => Ok(ConsoleCommand::GripTrace(true)),
            (Some("trace"), Some("off")) => Ok(ConsoleCommand::GripTrace(false)),
            _ => Err("usage: grip trace on|off"),
        },
        Some("wrist") => {
            let axis = parts.next();
            let direction = parse_direction(parts.next())?;
            match axis {
                Some("bend") => Ok(ConsoleCommand::WristBend(direction)),
                Some("rot") => Ok(ConsoleCommand::WristRotation(direction)),
                _ => Err("usage: wrist bend|rot -1|0|1"),
            }
        }
        _ => Err("unknown command"),
    }
}

fn parse_direction(token: Option<&str>) -> Result<i8, &'static str> {
    match token {
        Some("-1") => Ok(-1),
        Some("0") => Ok(0),
        Some("1") => Ok(1),
        _ => Err("direction must be -1, 0 or 1"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_commands() {
        assert_eq!(parse_console_command(b"status"), Ok(ConsoleCommand::Status));
        assert_eq!(
            parse_console_command(b"counters"),
            Ok(ConsoleCommand::Counters)
        );
    }

    #[test]
    fn parses_grip_trace_toggle() {
        assert_eq!(
            parse_console_command(b"grip trace on"),
            Ok(ConsoleCommand::GripTrace(true))
        );
        assert_eq!(
            parse_console_command(b"grip trace off"),
            Ok(ConsoleCommand::GripTrace(false))
        );
        assert!(parse_console_command(b"grip trace").is_err());
        assert!(parse_console_command(b"grip").is_err());
    }

    #[test]
    fn parses_wrist_nudges() {
        assert_eq!(
            parse_console_command(b"wrist bend -1"),
            Ok(ConsoleCommand::WristBend(-1))
        );
        assert_eq!(
            parse_console_command(b"wrist rot 1"),
            Ok(ConsoleCommand::WristRotation(1))
        );
        assert_eq!(
            parse_console_command(b"wrist bend 0"),
            Ok(ConsoleCommand::WristBend(0))
        );
        assert!(parse_console_command(b"wrist bend 2").is_err());
        assert!(parse_console_command(b"wrist twist 1").is_err());
    }

    #[test]
    fn tolerates_extra_whitespace() {
        assert_eq!(
            parse_console_command(b"  wrist   rot   -1  "),
            Ok(ConsoleCommand::WristRotation(-1))
        );
    }

    #[test]
    fn rejects_unknown_and_non_utf8_input() {
        assert_eq!(parse_console_command(b"reboot"), Err("unknown command"));
        assert_eq!(parse_console_command(&[0xFF, 0xFE]), Err("not utf-8"));
    }
}
