use clap::{Parser, Subcommand, ValueEnum};
use qr_codec::decoder::format::FormatInfo;
use qr_codec::encoder::mask::penalty;
use qr_codec::render::{modules_from_gray_image, to_ascii, to_gray_image};
use qr_codec::{
    BitMatrix, DecodeOptions, ECLevel, EncodeOptions, MaskPattern, QRCode, Segment, decode_qr_code_with,
    encode_segments,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR code encoder/decoder tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    L,
    M,
    Q,
    H,
}

impl From<Level> for ECLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::L => ECLevel::L,
            Level::M => ECLevel::M,
            Level::Q => ECLevel::Q,
            Level::H => ECLevel::H,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Encode text (or a file with --binary) as a PNG or ASCII art
    Encode {
        /// Text to encode; ignored with --binary
        text: Option<String>,
        /// Encode the raw bytes of this file in byte mode
        #[arg(long)]
        binary: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "m")]
        level: Level,
        #[arg(long, default_value_t = 1)]
        min_version: u8,
        #[arg(long, default_value_t = 40)]
        max_version: u8,
        /// Fixed mask 0-7 instead of the penalty search
        #[arg(long)]
        mask: Option<u8>,
        /// Keep the requested level even if a higher one fits
        #[arg(long)]
        no_maximize: bool,
        /// Write a PNG here; prints ASCII art otherwise
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = 8)]
        module_size: u32,
        #[arg(long, default_value_t = 4)]
        border: u32,
    },
    /// Decode a PNG written by `encode`
    Decode {
        image: PathBuf,
        #[arg(long, default_value_t = 8)]
        module_size: u32,
        #[arg(long, default_value_t = 4)]
        border: u32,
        /// Skip the retry on the transposed grid
        #[arg(long)]
        no_mirror: bool,
    },
    /// Encode text and print version, level, mode, mask and penalty
    Inspect {
        text: String,
        #[arg(long, value_enum, default_value = "m")]
        level: Level,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("QR_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Encode {
            text,
            binary,
            level,
            min_version,
            max_version,
            mask,
            no_maximize,
            output,
            module_size,
            border,
        } => {
            let segment = match (&binary, &text) {
                (Some(path), _) => Segment::bytes(&std::fs::read(path)?)?,
                (None, Some(text)) => Segment::for_text(text)?,
                (None, None) => return Err("nothing to encode: pass TEXT or --binary".into()),
            };

            let mut options = EncodeOptions::default()
                .with_versions(min_version, max_version)
                .with_maximize_ecc(!no_maximize);
            if let Some(index) = mask {
                let mask = MaskPattern::ALL
                    .get(index as usize)
                    .copied()
                    .ok_or("mask must be 0-7")?;
                options = options.with_mask(mask);
            }

            let code = encode_segments(&[segment], level.into(), &options)?;
            match output {
                Some(path) => write_png(&code, &path, module_size, border)?,
                None => print!("{}", to_ascii(&code, 2)),
            }
        }

        Command::Decode {
            image,
            module_size,
            border,
            no_mirror,
        } => {
            let gray = image::open(&image)?.to_luma8();
            let modules = modules_from_gray_image(&gray, module_size, border)
                .ok_or("image size does not match --module-size/--border")?;
            let options = DecodeOptions {
                try_mirrored: !no_mirror,
                ..DecodeOptions::from_env()
            };
            let code = decode_qr_code_with(&modules, &options)?;
            println!("{}", code.data_string());
            eprintln!(
                "version={} level={} mode={:?} eci={:?}",
                code.version(),
                code.error_correction_capacity(),
                code.encoding_mode(),
                code.eci()
            );
        }

        Command::Inspect { text, level } => {
            let code = encode_segments(&[Segment::for_text(&text)?], level.into(), &EncodeOptions::default())?;
            inspect(&code);
        }
    }

    Ok(())
}

fn write_png(code: &QRCode, path: &Path, module_size: u32, border: u32) -> Result<(), Box<dyn Error>> {
    let image = to_gray_image(code, module_size, border).ok_or("--module-size must be at least 1")?;
    image.save(path)?;
    println!("Wrote {} ({}x{})", path.display(), image.width(), image.height());
    Ok(())
}

fn inspect(code: &QRCode) {
    let side = code.modules_per_side();
    let matrix = BitMatrix::from_modules(side, code.modules());
    println!("version:  {} ({side}x{side})", code.version());
    println!("level:    {}", code.error_correction_capacity());
    println!("mode:     {:?}", code.encoding_mode());
    println!("bytes:    {}", code.data().len());
    if let Some((format, _)) = FormatInfo::extract(&matrix) {
        println!("mask:     {}", format.mask_pattern.index());
    }
    println!("penalty:  {}", penalty(code.modules(), side));
}
