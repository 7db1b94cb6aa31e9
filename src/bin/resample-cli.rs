use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use polyphase_resample::prelude::*;

/// Resample a raw interleaved PCM file on disk, in one of the four
/// supported sample formats.
#[derive(Parser)]
struct Args {
    /// Input raw PCM file path ("-" for stdin)
    #[arg(short = 'i', long)]
    input: String,

    /// Output raw PCM file path ("-" for stdout)
    #[arg(short = 'o', long)]
    output: String,

    /// Number of interleaved channels
    #[arg(short = 'c', long, default_value_t = 2)]
    channels: usize,

    /// Input sample rate in Hz
    #[arg(long)]
    in_rate: u32,

    /// Output sample rate in Hz
    #[arg(long)]
    out_rate: u32,

    /// Window method
    #[arg(long, value_enum, default_value = "kaiser")]
    method: MethodArg,

    /// Quality preset, 0 (fastest) to 10 (best), per method's table
    #[arg(long)]
    quality: Option<u8>,

    /// Raw PCM sample format of both the input and output files
    #[arg(long, value_enum, default_value = "f32")]
    format: FormatArg,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum MethodArg {
    Nearest,
    Linear,
    Cubic,
    BlackmanNuttall,
    Kaiser,
}

impl From<MethodArg> for Method {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Nearest => Method::Nearest,
            MethodArg::Linear => Method::Linear,
            MethodArg::Cubic => Method::Cubic,
            MethodArg::BlackmanNuttall => Method::BlackmanNuttall,
            MethodArg::Kaiser => Method::Kaiser,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    S16,
    S32,
    F32,
    F64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let result = match args.format {
        FormatArg::S16 => run::<i16>(&args, 2, decode_i16, encode_i16),
        FormatArg::S32 => run::<i32>(&args, 4, decode_i32, encode_i32),
        FormatArg::F32 => run::<f32>(&args, 4, decode_f32, encode_f32),
        FormatArg::F64 => run::<f64>(&args, 8, decode_f64, encode_f64),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn decode_i16(b: &[u8]) -> i16 {
    i16::from_le_bytes([b[0], b[1]])
}
fn encode_i16(v: i16, out: &mut Vec<u8>) {
    out.extend_from_slice(&v.to_le_bytes());
}
fn decode_i32(b: &[u8]) -> i32 {
    i32::from_le_bytes([b[0], b[1], b[2], b[3]])
}
fn encode_i32(v: i32, out: &mut Vec<u8>) {
    out.extend_from_slice(&v.to_le_bytes());
}
fn decode_f32(b: &[u8]) -> f32 {
    f32::from_le_bytes([b[0], b[1], b[2], b[3]])
}
fn encode_f32(v: f32, out: &mut Vec<u8>) {
    out.extend_from_slice(&v.to_le_bytes());
}
fn decode_f64(b: &[u8]) -> f64 {
    f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
}
fn encode_f64(v: f64, out: &mut Vec<u8>) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// Drive a `Resampler<S>` over the file paths in `args`, using `decode`/
/// `encode` to translate between `bytes_per_sample`-wide little-endian PCM
/// and the native `S` the resampler was monomorphized for.
fn run<S: Sample>(
    args: &Args,
    bytes_per_sample: usize,
    decode: fn(&[u8]) -> S,
    encode: fn(S, &mut Vec<u8>),
) -> Result<(), Box<dyn std::error::Error>> {
    let method = Method::from(args.method);
    let options = match args.quality {
        Some(q) => ResampleOptions::from_quality(method, q)?,
        None => ResampleOptions::new(),
    };

    let mut resampler: Resampler<S> =
        Resampler::new(method, false, args.channels, args.in_rate, args.out_rate, options)?;

    let mut reader: Box<dyn Read> = if args.input == "-" {
        Box::new(io::stdin())
    } else {
        Box::new(BufReader::new(File::open(&args.input)?))
    };
    let mut writer: Box<dyn Write> = if args.output == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(BufWriter::new(File::create(&args.output)?))
    };

    const CHUNK_FRAMES: usize = 4096;
    let channels = args.channels;
    let mut in_buf = vec![S::default(); CHUNK_FRAMES * channels];
    let mut raw = vec![0u8; in_buf.len() * bytes_per_sample];
    let mut out_buf = vec![S::default(); CHUNK_FRAMES * 4 * channels];
    let mut encoded = Vec::with_capacity(out_buf.len() * bytes_per_sample);

    loop {
        let bytes_read = read_fully(&mut reader, &mut raw)?;
        if bytes_read == 0 {
            break;
        }
        let in_frames = bytes_read / bytes_per_sample / channels;
        for (sample, chunk) in in_buf
            .iter_mut()
            .zip(raw.chunks_exact(bytes_per_sample))
            .take(in_frames * channels)
        {
            *sample = decode(chunk);
        }

        let want = resampler.get_out_frames(in_frames);
        if out_buf.len() < want * channels {
            out_buf.resize(want * channels, S::default());
        }
        let produced = resampler.resample(
            SampleInput::Interleaved(&in_buf[..in_frames * channels]),
            in_frames,
            SampleOutput::Interleaved(&mut out_buf[..want * channels]),
            want,
        );

        encoded.clear();
        for &sample in &out_buf[..produced * channels] {
            encode(sample, &mut encoded);
        }
        writer.write_all(&encoded)?;

        if bytes_read < raw.len() {
            break;
        }
    }

    writer.flush()?;
    Ok(())
}

fn read_fully<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}
