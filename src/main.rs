use clap::Parser;
use log::debug;
use std::path::{Path, PathBuf};
use thermal_serial::{
    discover, rasterize, resolve, Connection, ConnectionOptions, Document, Error, PrinterConfig,
    Session, TitleLevel,
};

//
// cargo run -- /dev/ttyUSB0
// cargo run -- --image logo.png
//
#[derive(Debug, Parser)]
#[command(about = "Print to a serial thermal receipt printer")]
struct Cli {
    /// Serial device, found automatically when a single USB port is present
    device: Option<String>,

    /// Print this PNG instead of the demo document
    #[arg(long)]
    image: Option<PathBuf>,

    #[arg(long, default_value_t = thermal_serial::DEFAULT_BAUD_RATE)]
    baud: u32,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let doc = match &cli.image {
        Some(path) => image_document(path)?,
        None => demo_document(),
    };

    let candidates = match cli.device {
        Some(_) => Vec::new(),
        None => discover()?,
    };
    let device = resolve(cli.device.as_deref(), candidates)?;
    debug!("using {}", device);

    let connection = Connection::open(&device, ConnectionOptions::default().baud_rate(cli.baud))?;
    Session::new(connection).run(&doc)
}

fn image_document(path: &Path) -> Result<Document, Error> {
    let image = image::open(path)?.to_rgba8();
    let rows = rasterize(&image)?;
    Ok(Document::new().image_block(rows).feed(4))
}

fn demo_document() -> Document {
    Document::new()
        .configure(PrinterConfig::text_mode())
        .title("DFT bin octave\nintervals", TitleLevel::Banner)
        .text(
            "\
Octave: a doubling of frequency.

Human pitch perception fits a
log scale, and has repetitive
qualities every octave.

Discrete fourier transforms
(DFT) operate on a linear
frequency scale. The scales
don't match!

If you express the frequency bin
width of a DFT in terms of
the octaves it takes up on a
more-human log scale, you get
this expression:
",
        )
        .title(" log2(2i + 1) - log2(2i - 1) ", TitleLevel::Highlight)
        .text(format!(
            "\
where 'i' is the bin index (bin
0 is the DC offset).

This relation between bin number
and octave interval is

  *independent of sample rate
       and number of bins*

which is weird and cool! It
feels like maybe some kind of
basic truth about DFTs.

Here are the intervals in terms
of octaves and semitones of the
first 127 bin widths of any DFT:

bin    octaves    semitones
  0       -           -
{}
",
            interval_table()
        ))
        .feed(4)
}

/// Octave width of a DFT bin, independent of sample rate and bin count.
fn bin_octaves(bin: u32) -> f64 {
    f64::from(2 * bin + 1).log2() - f64::from(2 * bin - 1).log2()
}

fn interval_table() -> String {
    (1..128)
        .map(|bin| {
            let octaves = bin_octaves(bin);
            format!("{:3}   {:8.7}   {:9.7}", bin, octaves, octaves * 12.0)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
