//! Thermal Receipt Printer Driver
//!
//! This crate drives small thermal receipt printers attached to a serial
//! port: heating configuration, styled titles, paced text and bitmap rows.
//! Nothing is ever read back from the printer.
//!
//! # Example
//!
//! ```rust,no_run
//! use thermal_serial::{Connection, ConnectionOptions, Document, PrinterConfig, Session, TitleLevel};
//!
//! let doc = Document::new()
//!     .configure(PrinterConfig::text_mode())
//!     .title("Hello", TitleLevel::Banner)
//!     .text("printed from Rust\n")
//!     .feed(4);
//! let connection = Connection::open("/dev/ttyUSB0", ConnectionOptions::default()).unwrap();
//! Session::new(connection).run(&doc).unwrap();
//! ```

pub mod command;
mod config;
mod device;
mod error;
mod pacer;
mod printer;
pub mod raster;
mod style;

pub use crate::{
    config::{PrinterConfig, MAX_BREAK_TIME, MAX_DENSITY},
    device::{
        discover, resolve, Candidate, Connection, ConnectionOptions, DEFAULT_BAUD_RATE,
        SETTLE_DELAY,
    },
    error::Error,
    pacer::{Delay, Pacer, Sink, ThreadSleep, CHAR_DELAY, CHUNK_SIZE, ROW_DELAY},
    printer::{Document, Operation, Session, State},
    raster::{rasterize, ImageRow},
    style::{TextStyle, TitleLevel},
};

/// Widest row the print head accepts, in bytes.
///
/// 48 bytes hold 384 pixels, 8 pixels packed into each byte.
pub const MAX_ROW_BYTES: usize = 48;

/// Widest row the print head accepts, in pixels.
pub const MAX_ROW_PIXELS: u32 = MAX_ROW_BYTES as u32 * 8;
