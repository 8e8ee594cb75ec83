//! Locating and opening the serial port the printer hangs off.

use log::{debug, info};
use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use std::fmt;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::{error::Error, pacer::Sink};

/// Baud rate the printer firmware ships with.
pub const DEFAULT_BAUD_RATE: u32 = 19200;

/// Time the printer needs after the port opens and before it closes.
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

/// A serial port that may be the printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub device: String,
    pub description: String,
    pub vendor: String,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.device, self.description, self.vendor)
    }
}

impl From<SerialPortInfo> for Candidate {
    fn from(info: SerialPortInfo) -> Self {
        match info.port_type {
            SerialPortType::UsbPort(usb) => {
                let (vid, pid) = (usb.vid, usb.pid);
                Candidate {
                    device: info.port_name,
                    description: usb
                        .product
                        .unwrap_or_else(|| format!("USB {:04x}:{:04x}", vid, pid)),
                    vendor: usb.manufacturer.unwrap_or_default(),
                }
            }
            other => Candidate {
                device: info.port_name,
                description: format!("{:?}", other),
                vendor: String::new(),
            },
        }
    }
}

/// Pick the device to print to.
///
/// An explicit identifier always wins. Otherwise there must be exactly one
/// candidate.
pub fn resolve(explicit: Option<&str>, mut candidates: Vec<Candidate>) -> Result<String, Error> {
    if let Some(device) = explicit {
        return Ok(device.to_string());
    }
    match candidates.len() {
        0 => Err(Error::NoDeviceFound),
        1 => Ok(candidates.remove(0).device),
        _ => Err(Error::AmbiguousDevice(candidates)),
    }
}

/// Serial ports that look like a USB serial adapter.
pub fn discover() -> Result<Vec<Candidate>, Error> {
    let ports = serialport::available_ports()?;
    debug!("available ports: {:?}", ports);
    Ok(ports
        .into_iter()
        .filter(is_usb)
        .map(Candidate::from)
        .collect())
}

fn is_usb(info: &SerialPortInfo) -> bool {
    matches!(info.port_type, SerialPortType::UsbPort(_))
        || info.port_name.to_lowercase().contains("usb")
}

#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
    pub baud_rate: u32,
    pub settle_delay: Duration,
    pub timeout: Duration,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        ConnectionOptions {
            baud_rate: DEFAULT_BAUD_RATE,
            settle_delay: SETTLE_DELAY,
            timeout: Duration::from_secs(1),
        }
    }
}

impl ConnectionOptions {
    pub fn baud_rate(self, baud_rate: u32) -> Self {
        ConnectionOptions { baud_rate, ..self }
    }

    pub fn settle_delay(self, settle_delay: Duration) -> Self {
        ConnectionOptions {
            settle_delay,
            ..self
        }
    }
}

/// Open serial connection to the printer.
///
/// Opening waits for the printer to settle; [`Sink::close`] flushes and waits
/// again before the port is released. Dropping the connection without
/// closing it releases the port immediately.
pub struct Connection {
    port: Box<dyn SerialPort>,
    settle_delay: Duration,
}

impl Connection {
    pub fn open(device: &str, options: ConnectionOptions) -> Result<Self, Error> {
        info!("opening {} at {} baud", device, options.baud_rate);
        let port = serialport::new(device, options.baud_rate)
            .timeout(options.timeout)
            .open()?;
        thread::sleep(options.settle_delay);
        Ok(Connection {
            port,
            settle_delay: options.settle_delay,
        })
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.port.flush()
    }
}

impl Sink for Connection {
    fn close(&mut self) -> io::Result<()> {
        self.port.flush()?;
        thread::sleep(self.settle_delay);
        debug!("connection closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serialport::UsbPortInfo;

    fn candidate(device: &str) -> Candidate {
        Candidate {
            device: device.to_string(),
            description: "FT232R USB UART".to_string(),
            vendor: "FTDI".to_string(),
        }
    }

    #[test]
    fn test_resolve_none() {
        assert!(matches!(resolve(None, vec![]), Err(Error::NoDeviceFound)));
    }

    #[test]
    fn test_resolve_single() {
        let device = resolve(None, vec![candidate("/dev/ttyUSB0")]).unwrap();
        assert_eq!(device, "/dev/ttyUSB0");
    }

    #[test]
    fn test_resolve_ambiguous_lists_all() {
        let err = resolve(
            None,
            vec![candidate("/dev/ttyUSB0"), candidate("/dev/ttyUSB1")],
        )
        .unwrap_err();

        match &err {
            Error::AmbiguousDevice(candidates) => assert_eq!(candidates.len(), 2),
            other => panic!("unexpected error {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains("/dev/ttyUSB0\tFT232R USB UART\tFTDI"));
        assert!(message.contains("/dev/ttyUSB1\tFT232R USB UART\tFTDI"));
    }

    #[test]
    fn test_resolve_explicit_skips_candidates() {
        let device = resolve(Some("/dev/ttyS0"), vec![]).unwrap();
        assert_eq!(device, "/dev/ttyS0");
    }

    #[test]
    fn test_candidate_from_usb_port() {
        let info = SerialPortInfo {
            port_name: "/dev/ttyUSB0".to_string(),
            port_type: SerialPortType::UsbPort(UsbPortInfo {
                vid: 0x0403,
                pid: 0x6001,
                serial_number: None,
                manufacturer: Some("FTDI".to_string()),
                product: None,
            }),
        };
        assert!(is_usb(&info));
        assert_eq!(
            Candidate::from(info),
            Candidate {
                device: "/dev/ttyUSB0".to_string(),
                description: "USB 0403:6001".to_string(),
                vendor: "FTDI".to_string(),
            }
        );
    }

    #[test]
    fn test_usb_name_without_usb_type() {
        let info = SerialPortInfo {
            port_name: "/dev/tty.usbserial-A1".to_string(),
            port_type: SerialPortType::Unknown,
        };
        assert!(is_usb(&info));

        let info = SerialPortInfo {
            port_name: "/dev/ttyS0".to_string(),
            port_type: SerialPortType::PciPort,
        };
        assert!(!is_usb(&info));
    }
}
