//! Boot-script emission
//!
//! A [`BootScript`] borrows its descriptor and formats lines on demand.
//! Every call to [`BootScript::lines`] starts a fresh pass, so the script can
//! be iterated any number of times with identical output.

use crate::descriptor::{Connection, DeviceDescriptor};
use std::fmt::{self, Display, Formatter};
use std::iter::FusedIterator;

/// Seconds the IOC waits for socat to set up the pty
pub const SOCAT_SETTLE_SECS: u32 = 5;

/// Boot-script steps in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    SocatComment,
    SocatCommand,
    SleepComment,
    Sleep,
    ConnectComment,
    Connect,
}

static VIRTUAL_STEPS: [Step; 6] = [
    Step::SocatComment,
    Step::SocatCommand,
    Step::SleepComment,
    Step::Sleep,
    Step::ConnectComment,
    Step::Connect,
];

/// Steps emitted regardless of connection mode
const CONNECT_STEPS: usize = 2;

/// Boot-script fragment for one device
#[derive(Debug, Clone, Copy)]
pub struct BootScript<'a> {
    device: &'a DeviceDescriptor,
}

impl<'a> BootScript<'a> {
    /// Script for a descriptor
    #[inline]
    #[must_use]
    pub fn new(device: &'a DeviceDescriptor) -> Self {
        Self { device }
    }

    /// Fresh iterator over the script lines
    #[must_use]
    pub fn lines(&self) -> Lines<'a> {
        let start = if self.device.uses_virtual_port() {
            0
        } else {
            VIRTUAL_STEPS.len() - CONNECT_STEPS
        };
        Lines {
            device: self.device,
            steps: VIRTUAL_STEPS[start..].iter(),
        }
    }

    /// Number of lines the script emits
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines().len()
    }

    /// Always false; every device at least connects
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Display for BootScript<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for BootScript<'a> {
    type Item = String;
    type IntoIter = Lines<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines()
    }
}

impl<'a> IntoIterator for &BootScript<'a> {
    type Item = String;
    type IntoIter = Lines<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines()
    }
}

/// Lazy iterator over boot-script lines
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    device: &'a DeviceDescriptor,
    steps: std::slice::Iter<'static, Step>,
}

impl Lines<'_> {
    fn render(&self, step: Step) -> String {
        let device = self.device;
        match step {
            Step::SocatComment => {
                "# Create virtual port using socat to connect to device".to_string()
            }
            Step::SocatCommand => match device.connection() {
                Connection::VirtualPort {
                    remote_address,
                    remote_port,
                } => format!(
                    "system \"socat pty,link={},waitslave tcp:{}:{}&\"",
                    device.serial_port(),
                    remote_address,
                    remote_port
                ),
                // Serial scripts start after the socat steps
                Connection::Serial => String::new(),
            },
            Step::SleepComment => format!(
                "# Sleep for {SOCAT_SETTLE_SECS} seconds to give socat time to prepare"
            ),
            Step::Sleep => format!("epicsThreadSleep {SOCAT_SETTLE_SECS}"),
            Step::ConnectComment => "# Linkam 3.0 connect".to_string(),
            Step::Connect => format!(
                "linkamConnect \"{}\", \"{}\", \"{}\"",
                device.port_name(),
                device.serial_port(),
                device.log_path()
            ),
        }
    }
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let step = *self.steps.next()?;
        Some(self.render(step))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

impl ExactSizeIterator for Lines<'_> {}

impl FusedIterator for Lines<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DeviceParams;
    use pretty_assertions::assert_eq;

    #[test]
    fn serial_script_is_two_lines() {
        let device = DeviceDescriptor::new(DeviceParams::new("Stage", "T1")).unwrap();
        let lines: Vec<String> = device.boot_script().lines().collect();

        assert_eq!(
            lines,
            vec![
                "# Linkam 3.0 connect".to_string(),
                r#"linkamConnect "T1_AP", "/dev/ttyUSB0", "/dev/null""#.to_string(),
            ]
        );
    }

    #[test]
    fn virtual_script_is_six_lines() {
        let device = DeviceDescriptor::new(
            DeviceParams::new("Stage", "T1")
                .with_serial_port("/tmp/port")
                .with_virtual_port("192.168.0.5", 4001),
        )
        .unwrap();

        assert_eq!(
            device.boot_script().to_string(),
            "# Create virtual port using socat to connect to device\n\
             system \"socat pty,link=/tmp/port,waitslave tcp:192.168.0.5:4001&\"\n\
             # Sleep for 5 seconds to give socat time to prepare\n\
             epicsThreadSleep 5\n\
             # Linkam 3.0 connect\n\
             linkamConnect \"T1_AP\", \"/tmp/port\", \"/dev/null\"\n"
        );
        assert_eq!(device.boot_script().len(), 6);
    }

    #[test]
    fn lines_restart_from_the_top() {
        let device = DeviceDescriptor::new(DeviceParams::new("Stage", "T1")).unwrap();
        let script = device.boot_script();

        let mut first = script.lines();
        first.next();
        let second: Vec<_> = script.lines().collect();
        assert_eq!(second.len(), 2);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn iterates_by_reference() {
        let device = DeviceDescriptor::new(DeviceParams::new("Stage", "T1")).unwrap();
        let script = device.boot_script();
        let mut count = 0;
        for line in &script {
            assert!(!line.is_empty());
            count += 1;
        }
        assert_eq!(count, 2);
    }
}
