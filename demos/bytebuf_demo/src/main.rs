use std::path::{Path, PathBuf};

use bytebuf::{ByteBuffer, ByteBufferError, Range};
use clap::{ArgAction, Parser};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "bytebuf_demo")]
#[command(about = "Exercise a growable byte buffer on a file and in memory", long_about = None)]
struct Args {
    /// File to load, edit and save (skipped if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to save the edited file (the input with a `.mod` extension if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log more details, repeat for even more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn print_buffer(buffer: &ByteBuffer) {
    let rendered: Vec<String> = buffer.iter().map(|byte| byte.to_string()).collect();
    println!("{}", rendered.join("  "));
}

/// Prints a rejected write and carries on; capacity errors are recoverable.
fn report(result: bytebuf::Result<()>) -> bytebuf::Result<()> {
    match result {
        Err(e @ ByteBufferError::CapacityExceeded { .. }) => {
            println!("Rejected: {e}");
            Ok(())
        }
        other => other,
    }
}

fn file_scenario(input: &Path, output: Option<&Path>) -> bytebuf::Result<()> {
    println!("Loading {}", input.display());
    let mut buffer = ByteBuffer::from_path(input)?;
    println!("Loaded {buffer}");
    println!("Different sizes: {} bytes", buffer.size());
    println!("{} kilobytes", buffer.size_kb());
    println!("{} megabytes", buffer.size_mb());
    println!("{} gigabytes", buffer.size_gb());
    println!();

    let output = output.map_or_else(|| input.with_extension("mod"), Path::to_path_buf);
    println!(
        "Appending 56, prepending 99 and saving to {}",
        output.display()
    );
    buffer.append(56)?;
    buffer.prepend(99)?;
    buffer.save_to_path(&output)?;
    println!("Saved {buffer}");
    println!();
    Ok(())
}

fn memory_scenario() -> bytebuf::Result<()> {
    println!("Creating a buffer from {{5, 99, 255, 33, 42, 65, 33}}");
    let mut buffer = ByteBuffer::from_bytes(&[5, 99, 255, 33, 42, 65, 33]);
    println!("Loaded {buffer}");
    print_buffer(&buffer);
    println!("Digest: {:?}", buffer.digest());
    println!("Hex digest: {}", buffer.hex_digest());
    println!();

    println!("Inserting {{5, 8, 12}} at 4:");
    buffer.insert_bytes(&[5, 8, 12], 4)?;
    print_buffer(&buffer);
    println!();

    let range = Range::new(2, 5)?;
    println!("Bytes in range(2, 5):");
    let in_range = buffer.bytes_in_range(&range)?;
    println!("{in_range:?}");

    println!("Overriding range(2, 5) with {{11, 33, 22, 55, 44}}:");
    buffer.override_bytes(&[11, 33, 22, 55, 44], &range)?;
    print_buffer(&buffer);
    println!();
    Ok(())
}

fn bounded_scenario() -> bytebuf::Result<()> {
    let mut buffer = ByteBuffer::with_max_capacity(10)?;
    println!("Created {buffer}");

    println!("Inserting {{5, 7, 3, 6}} at the beginning");
    buffer.insert_bytes(&[5, 7, 3, 6], 0)?;
    println!("Inserting {{8, 145, 234, 22, 0, 1}} at the end");
    buffer.insert_bytes(&[8, 145, 234, 22, 0, 1], buffer.size())?;
    print_buffer(&buffer);

    println!("Appending and prepending 3 to a full buffer:");
    report(buffer.append(3))?;
    report(buffer.prepend(3))?;

    println!("Removing the bytes at 3 and 4, then range(0, 3)");
    buffer.remove_byte_at(3)?;
    buffer.remove_byte_at(4)?;
    buffer.remove_bytes_in(&Range::new(0, 3)?)?;
    print_buffer(&buffer);
    println!();

    println!("Appending 55, 66, 77:");
    for byte in [55, 66, 77] {
        report(buffer.append(byte))?;
    }
    print_buffer(&buffer);
    println!();

    println!("Shrinking the capacity to 5 bytes");
    buffer.set_capacity(Some(5))?;
    if let Some(max) = buffer.max_capacity() {
        println!("The capacity is now {max} bytes");
    }
    print_buffer(&buffer);
    println!("Appending and prepending 3 to a full buffer:");
    report(buffer.append(3))?;
    report(buffer.prepend(3))?;
    Ok(())
}

fn run(args: &Args) -> bytebuf::Result<()> {
    if let Some(input) = &args.input {
        file_scenario(input, args.output.as_deref())?;
    }
    memory_scenario()?;
    bounded_scenario()
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&args) {
        eprintln!("bytebuf_demo error: {e}");

        match &e {
            ByteBufferError::Io { kind, context } => {
                eprintln!("  Error type: IO error");
                eprintln!("  Context: {context}");
                eprintln!("  Details: {kind:?}");
            }
            ByteBufferError::NoSourcePath => {
                eprintln!("  Error type: the buffer is not bound to a file");
            }
            other => {
                eprintln!("  Error type: invalid buffer operation");
                eprintln!("  Details: {other:?}");
            }
        }

        std::process::exit(1);
    }
}
