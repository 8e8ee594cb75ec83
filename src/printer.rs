use log::{debug, info};

use crate::{
    command,
    config::PrinterConfig,
    error::Error,
    pacer::{Delay, Pacer, Sink, ThreadSleep},
    raster::ImageRow,
    style::TitleLevel,
};

/// One step of a print job.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Configure(PrinterConfig),
    Title(String, TitleLevel),
    Text(String),
    Image(Vec<ImageRow>),
    Break(usize),
}

/// Ordered list of operations making up one print job.
///
/// # Example
///
/// ```
/// use thermal_serial::{Document, PrinterConfig, TitleLevel};
///
/// let doc = Document::new()
///     .configure(PrinterConfig::text_mode())
///     .title("Hello", TitleLevel::Banner)
///     .text("printed from Rust\n")
///     .feed(4);
/// assert_eq!(doc.operations().len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    operations: Vec<Operation>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(self, config: PrinterConfig) -> Self {
        self.push(Operation::Configure(config))
    }

    pub fn title(self, text: impl Into<String>, level: TitleLevel) -> Self {
        self.push(Operation::Title(text.into(), level))
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.push(Operation::Text(text.into()))
    }

    /// Bitmap rows, printed with whatever configuration is current.
    pub fn image(self, rows: Vec<ImageRow>) -> Self {
        self.push(Operation::Image(rows))
    }

    /// Switch to [`PrinterConfig::image_mode`] and print `rows`.
    pub fn image_block(self, rows: Vec<ImageRow>) -> Self {
        self.configure(PrinterConfig::image_mode()).image(rows)
    }

    /// Feed `lines` blank lines.
    pub fn feed(self, lines: usize) -> Self {
        self.push(Operation::Break(lines))
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    fn push(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Running,
    Done,
    /// A write failed mid-document, the printer mode is unknown.
    Aborted,
}

/// Runs a single document against an exclusively owned sink.
///
/// The sink is closed after the last operation of a successful run and
/// released when the session is dropped, whichever way the run ended.
/// A session is not reusable: open a new one for the next document.
///
/// Physical printers need a settle delay after the port opens and before it
/// closes; [`crate::Connection`] takes care of both.
pub struct Session<W, D = ThreadSleep> {
    pacer: Pacer<W, D>,
    state: State,
}

impl<W: Sink> Session<W> {
    pub fn new(sink: W) -> Self {
        Self::with_delay(sink, ThreadSleep)
    }
}

impl<W: Sink, D: Delay> Session<W, D> {
    pub fn with_delay(sink: W, delay: D) -> Self {
        Session {
            pacer: Pacer::with_delay(sink, delay),
            state: State::Idle,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Print `doc` from start to end, then close the sink.
    ///
    /// Every row width is checked before the first byte is written. Any
    /// write failure stops the run immediately.
    pub fn run(&mut self, doc: &Document) -> Result<(), Error> {
        if self.state != State::Idle {
            return Err(Error::SessionUsed);
        }

        let encoded = encode_images(doc)?;

        info!("printing {} operations", doc.operations().len());
        self.state = State::Running;
        match self.dispatch(doc, &encoded) {
            Ok(()) => {
                self.state = State::Done;
                Ok(())
            }
            Err(err) => {
                debug!("print aborted: {:?}", err);
                self.state = State::Aborted;
                Err(err)
            }
        }
    }

    pub fn into_inner(self) -> W {
        self.pacer.into_inner()
    }

    fn dispatch(&mut self, doc: &Document, encoded: &[Vec<Vec<u8>>]) -> Result<(), Error> {
        let mut images = encoded.iter();
        for operation in doc.operations() {
            match operation {
                Operation::Configure(config) => {
                    debug!("{:?}", config);
                    self.pacer.write_raw(&command::config(config))?;
                }
                Operation::Title(text, level) => {
                    debug!("title {:?} as {:?}", text, level);
                    for chunk in command::title(text, *level) {
                        self.pacer.write_raw(&chunk)?;
                    }
                }
                Operation::Text(text) => {
                    debug!("text of {} characters", text.chars().count());
                    self.pacer.write_text(text)?;
                }
                Operation::Image(_) => {
                    let rows = images.next().map(Vec::as_slice).unwrap_or_default();
                    debug!("image of {} rows", rows.len());
                    for row in rows {
                        self.pacer.write_image_row(row)?;
                    }
                }
                Operation::Break(lines) => {
                    self.pacer.write_raw(&command::line_break(*lines))?;
                }
            }
        }
        self.pacer.close()
    }
}

/// Encode every image row up front so a bad width rejects the whole job
/// before anything is sent.
fn encode_images(doc: &Document) -> Result<Vec<Vec<Vec<u8>>>, Error> {
    doc.operations()
        .iter()
        .filter_map(|operation| match operation {
            Operation::Image(rows) => Some(
                rows.iter()
                    .map(command::image_row)
                    .collect::<Result<Vec<_>, _>>(),
            ),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_image_block_switches_profile() {
        let row = ImageRow::new(vec![0xFF]).unwrap();
        let doc = Document::new().image_block(vec![row.clone()]);
        assert_eq!(
            doc.operations(),
            &[
                Operation::Configure(PrinterConfig::image_mode()),
                Operation::Image(vec![row]),
            ]
        );
    }

    #[test]
    fn test_run_into_vec() {
        let doc = Document::new()
            .configure(PrinterConfig::text_mode())
            .text("hi")
            .feed(2);
        let mut session = Session::new(Vec::<u8>::new());

        session.run(&doc).unwrap();

        assert_eq!(session.state(), State::Done);
        assert_eq!(
            session.into_inner(),
            vec![27, 55, 6, 180, 127, 18, 35, 35, b'h', b'i', b'\n', b'\n']
        );
    }

    #[test]
    fn test_session_runs_once() {
        let mut session = Session::new(Vec::<u8>::new());
        session.run(&Document::new()).unwrap();
        assert!(matches!(
            session.run(&Document::new()),
            Err(Error::SessionUsed)
        ));
    }
}
