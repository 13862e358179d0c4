use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use log::{error, info};

use running_prctile::codec::{self, Format};
use running_prctile::progbase::{self, Opts};
use running_prctile::{logger, Signal};

fn run(opts: &Opts) -> Result<(), Box<dyn Error>> {
    if opts.schema {
        println!("{}", Signal::schema()?);
        return Ok(());
    }

    let window = opts.window_len()?;
    let rank = opts.resolve_rank(window)?;
    info!(
        "Window {}, rank {}, {} {} input",
        window, rank, opts.element_type, opts.format
    );

    let reader: Box<dyn BufRead> = match &opts.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let mut writer: Box<dyn Write> = match &opts.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    if opts.stream {
        if opts.format != Format::Text {
            return Err("Streaming is only supported for text input".into());
        }
        let count = codec::stream_text(reader, &mut writer, opts.element_type, window, rank)?;
        info!("Filtered {} samples", count);
        return Ok(());
    }

    let signal = codec::read_signal(reader, opts.format, opts.element_type)?;
    let filtered = signal.running_percentile(window.get(), rank.get())?;
    codec::write_signal(&mut writer, opts.format, &filtered)?;
    info!("Filtered {} samples", filtered.len());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let opts = progbase::init();
    logger::init_logger()?;

    run(&opts).map_err(|e| {
        error!("{}", e);
        e
    })
}
