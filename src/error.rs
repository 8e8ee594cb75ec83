//! Error types for thermal printer operations.
//!
//! This module defines all possible errors that can occur while validating
//! print requests, locating the serial device, and writing to it.

use crate::device::Candidate;
use thiserror::Error;

/// Main error type for thermal printer operations.
///
/// Errors fall into three groups: validation errors raised before any byte
/// leaves the encoder, device resolution errors raised before the connection
/// is opened, and transport errors which abort the running document.
#[derive(Error, Debug)]
pub enum Error {
    /// Image row width is outside `1..=48` bytes.
    #[error("width: {0} -- can only print rows from 1 up to 48 bytes (384px) wide")]
    InvalidRowWidth(usize),

    /// Invalid configuration parameter provided.
    ///
    /// This error occurs when a heating or density value does not fit the
    /// field width the firmware expects.
    #[error("Invalid configuration parameter: {0}")]
    InvalidConfig(String),

    #[error("Image is {0}px wide, rows can be at most 384px")]
    ImageTooWide(u32),

    /// No serial device looked like a printer.
    #[error("missing serial port (probably /dev/tty.usbserial-something)")]
    NoDeviceFound,

    /// More than one serial device looked like a printer.
    ///
    /// The candidates are listed so the caller can pick one explicitly.
    #[error("not sure which serial port to use. likely candidates:\n{}", format_candidates(.0))]
    AmbiguousDevice(Vec<Candidate>),

    /// Serial port enumeration or open failure.
    #[error(transparent)]
    SerialError(#[from] serialport::Error),

    /// Writing to, flushing or closing the sink failed.
    ///
    /// The printer state is undefined after a partial transmission, the
    /// document is abandoned.
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// A session was asked to run a second document.
    #[error("Session already used, open a new one for each document")]
    SessionUsed,

    #[error(transparent)]
    ImageError(#[from] image::ImageError),
}

fn format_candidates(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
