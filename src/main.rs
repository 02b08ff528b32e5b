//! StegoX - password-protected LSB steganography.
//!
//! Hides encrypted messages in PNG/BMP images and 16-bit WAV audio.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rand::rngs::OsRng;
use stegox::media::{self, MediaCarrier};
use stegox::report::{self, CapacityReport, SecurityMetrics};
use stegox::{AllowAll, Authorizer, CodecConfig, StegoCodec, TranscriptGate};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "stegox")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Hide encrypted messages in images and audio",
    long_about = "Embeds a password-protected, authenticated message in the least significant bits of lossless images (PNG, BMP) and 16-bit WAV audio."
)]
struct Cli {
    /// JSON file with codec settings (must match between hide and reveal)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a message in a carrier file
    Hide {
        /// Cover file (png, bmp or wav)
        input: PathBuf,

        /// Where to write the stego file (png, bmp or wav)
        output: PathBuf,

        /// Message text to hide
        #[arg(long, conflicts_with = "message_file")]
        message: Option<String>,

        /// File whose contents to hide
        #[arg(long, conflicts_with = "message")]
        message_file: Option<PathBuf>,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Extract a hidden message
    Reveal {
        /// Stego file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Expected SHA-256 fingerprint of the message
        #[arg(long)]
        verify: Option<String>,

        /// Spoken passphrase as transcribed by a speech recognizer
        #[arg(long, requires = "passphrase")]
        transcript: Option<String>,

        /// Passphrase the transcript must match before extraction
        #[arg(long, requires = "transcript")]
        passphrase: Option<String>,
    },

    /// Show how much a carrier file can hold
    Capacity {
        /// Carrier file
        input: PathBuf,

        /// Also show how much of the carrier a message of this size would use
        #[arg(long)]
        message_len: Option<usize>,
    },

    /// Generate a random password
    Keygen,

    /// Rate a message and password pair
    Analyze {
        /// Message text
        #[arg(long)]
        message: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<stegox::Error>() {
            Some(err) if err.is_extraction_failure() => eprintln!("Error: {}", err.user_message()),
            _ => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => CodecConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CodecConfig::default(),
    };
    let codec = StegoCodec::new(config).context("invalid codec configuration")?;

    match cli.command {
        Commands::Hide {
            input,
            output,
            message,
            message_file,
            password,
        } => cmd_hide(&codec, &input, &output, message, message_file, password),

        Commands::Reveal {
            input,
            output,
            password,
            verify,
            transcript,
            passphrase,
        } => {
            let gate: Box<dyn Authorizer> = match transcript {
                Some(transcript) => Box::new(TranscriptGate::new(transcript)),
                None => Box::new(AllowAll),
            };
            let passphrase = passphrase.unwrap_or_default();
            cmd_reveal(&codec, &input, output, password, verify, gate.as_ref(), &passphrase)
        }

        Commands::Capacity { input, message_len } => cmd_capacity(&input, message_len),

        Commands::Keygen => cmd_keygen(),

        Commands::Analyze { message, password } => cmd_analyze(&message, password),
    }
}

fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    match rpassword::prompt_password(prompt) {
        Ok(password) => Ok(password),
        Err(_) => {
            eprint!("{}", prompt);
            io::stderr().flush()?;
            let mut password = String::new();
            io::stdin().read_line(&mut password)?;
            Ok(password.trim().to_string())
        }
    }
}

fn password_or_prompt(password: Option<String>, confirm: bool) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    let password = prompt_password("Password: ")?;
    if confirm && password != prompt_password("Confirm password: ")? {
        bail!("passwords do not match");
    }
    Ok(password)
}

fn load_carrier(path: &Path) -> anyhow::Result<MediaCarrier> {
    media::load(path).with_context(|| format!("failed to load {}", path.display()))
}

fn capacity_report(carrier: &MediaCarrier) -> CapacityReport {
    match carrier {
        MediaCarrier::Image(image) => CapacityReport::for_carrier(image),
        MediaCarrier::Audio(audio) => CapacityReport::for_audio(audio),
    }
}

fn cmd_hide(
    codec: &StegoCodec,
    input: &Path,
    output: &Path,
    message: Option<String>,
    message_file: Option<PathBuf>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let out_format = media::format_for_path(output)?;
    if !out_format.is_lossless() {
        bail!(
            "{} would destroy the hidden bits; write {} instead",
            out_format,
            out_format.lossless_counterpart()
        );
    }
    media::check_compatible(input, output)?;

    let carrier = load_carrier(input)?;

    let content = match (message, message_file) {
        (Some(text), None) => text.into_bytes(),
        (None, Some(path)) => {
            std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?
        }
        (None, None) => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
        (Some(_), Some(_)) => unreachable!(),
    };

    let report = capacity_report(&carrier);
    let password = password_or_prompt(password, true)?;

    let stego = match &carrier {
        MediaCarrier::Image(image) => MediaCarrier::Image(codec.hide(image, &content, &password)?),
        MediaCarrier::Audio(audio) => MediaCarrier::Audio(codec.hide(audio, &content, &password)?),
    };
    media::save(output, &stego).with_context(|| format!("failed to write {}", output.display()))?;

    println!("Hid {} in {}", report::format_bytes(content.len()), output.display());
    println!(
        "  Carrier usage:  {:.1}% of {}",
        report.usage_percent(content.len()),
        report::format_bytes(report.capacity_bytes)
    );
    println!("  Fingerprint:    {}", report::fingerprint(&content));

    Ok(())
}

fn cmd_reveal(
    codec: &StegoCodec,
    input: &Path,
    output: Option<PathBuf>,
    password: Option<String>,
    verify: Option<String>,
    gate: &dyn Authorizer,
    passphrase: &str,
) -> anyhow::Result<()> {
    let carrier = load_carrier(input)?;
    let password = password_or_prompt(password, false)?;

    let data = match &carrier {
        MediaCarrier::Image(image) => codec.reveal_authorized(image, &password, gate, passphrase)?,
        MediaCarrier::Audio(audio) => codec.reveal_authorized(audio, &password, gate, passphrase)?,
    };

    if let Some(expected) = verify {
        if !report::fingerprint(&data).eq_ignore_ascii_case(expected.trim()) {
            bail!("extracted message does not match the expected fingerprint");
        }
        eprintln!("✓ Fingerprint verified");
    }

    match output {
        Some(path) => {
            std::fs::write(&path, &data)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {} to {}", report::format_bytes(data.len()), path.display());
        }
        None => {
            io::stdout().write_all(&data)?;
        }
    }

    Ok(())
}

fn cmd_capacity(input: &Path, message_len: Option<usize>) -> anyhow::Result<()> {
    let carrier = load_carrier(input)?;
    let report = capacity_report(&carrier);

    println!("StegoX Capacity");
    println!("===============");
    println!("File:             {}", input.display());
    println!("Format:           {}", carrier.format());
    println!("Carrier units:    {}", report.total_units);
    println!();
    println!("Capacity:");
    println!("  Payload:        {}", report::format_bytes(report.capacity_bytes));
    println!("  Max message:    {}", report::format_bytes(report.max_message_bytes));
    println!("  Efficiency:     {:?}", report.rating);
    if let (Some(duration), Some(rate)) = (report.duration_secs, report.bytes_per_second) {
        println!("  Duration:       {:.2} seconds", duration);
        println!("  Throughput:     {:.0} bytes/second", rate);
    }

    if let Some(len) = message_len {
        println!();
        println!(
            "A {} message would use {:.1}% of the carrier",
            report::format_bytes(len),
            report.usage_percent(len)
        );
        if len > report.max_message_bytes {
            println!("✗ Message does not fit");
        }
    }

    Ok(())
}

fn cmd_keygen() -> anyhow::Result<()> {
    println!("{}", report::generate_password(&mut OsRng));
    Ok(())
}

fn cmd_analyze(message: &str, password: Option<String>) -> anyhow::Result<()> {
    let password = password_or_prompt(password, false)?;
    let metrics = SecurityMetrics::evaluate(message, &password);

    println!("Security Analysis");
    println!("=================");
    println!("Password strength: {}/100", metrics.password_strength);
    println!("Message entropy:   {:.2}", metrics.message_entropy);
    println!("Score:             {:.1} ({:?})", metrics.security_score, metrics.rating);

    if !metrics.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for rec in &metrics.recommendations {
            println!("  - {}", rec);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stegox::{Error, ImageCarrier, MediaFormat};
    use tempfile::TempDir;

    struct Workspace {
        dir: TempDir,
    }

    impl Workspace {
        /// A temp dir holding a fast KDF config and a hidden "hi" in stego.png.
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            std::fs::write(
                dir.path().join("codec.json"),
                r#"{"kdf":{"memory_cost":64,"time_cost":1,"parallelism":1}}"#,
            )
            .unwrap();

            let data = (0..32 * 32 * 3).map(|i| (i * 13 % 256) as u8).collect();
            let cover = ImageCarrier::new(32, 32, 3, MediaFormat::Png, data).unwrap();
            media::save(&dir.path().join("cover.png"), &MediaCarrier::Image(cover)).unwrap();

            let ws = Self { dir };
            ws.run(&["hide", "cover.png", "stego.png", "--message", "hi", "--password", "pw"])
                .unwrap();
            ws
        }

        fn path(&self, name: &str) -> String {
            self.dir.path().join(name).to_string_lossy().into_owned()
        }

        fn run(&self, args: &[&str]) -> anyhow::Result<()> {
            let mut argv = vec!["stegox".to_string(), "--config".to_string(), self.path("codec.json")];
            for arg in args {
                if arg.contains('.') {
                    argv.push(self.path(arg));
                } else {
                    argv.push(arg.to_string());
                }
            }
            run(Cli::try_parse_from(argv)?)
        }
    }

    #[test]
    fn test_reveal_refused_by_transcript_gate() {
        let ws = Workspace::new();
        let err = ws
            .run(&[
                "reveal", "stego.png", "--password", "pw", "--output", "out.txt",
                "--transcript", "open sesame", "--passphrase", "close the door",
            ])
            .unwrap_err();

        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Unauthorized)));
        assert!(!ws.dir.path().join("out.txt").exists());
    }

    #[test]
    fn test_reveal_allowed_by_matching_transcript() {
        let ws = Workspace::new();
        ws.run(&[
            "reveal", "stego.png", "--password", "pw", "--output", "out.txt",
            "--transcript", "Open, sesame!", "--passphrase", "open sesame",
        ])
        .unwrap();

        assert_eq!(std::fs::read(ws.dir.path().join("out.txt")).unwrap(), b"hi");
    }

    #[test]
    fn test_transcript_requires_passphrase() {
        let result = Cli::try_parse_from(["stegox", "reveal", "x.png", "--transcript", "hello"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_hide_rejects_kind_mismatch_before_loading() {
        let ws = Workspace::new();
        // missing.png does not exist: the check must fire before any load
        let err = ws
            .run(&["hide", "missing.png", "out.wav", "--message", "hi", "--password", "pw"])
            .unwrap_err();

        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::UnsupportedFormat(_))));
        assert!(!ws.dir.path().join("out.wav").exists());
    }
}
