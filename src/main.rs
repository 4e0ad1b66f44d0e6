use clap::{Parser, Subcommand};
use pawpad::chain::HashAlgorithm;
use pawpad::cli::{
    decode_text, encode_text, extract_original, generate_fingerprint, hide_message, load_key,
    read_text, reveal_message, show_analysis, sign_text, verify_text, EncodeOptions, HideOptions,
    SignOptions, VerifyOptions,
};
use pawpad::fingerprint::DEFAULT_FINGERPRINT_LEN;
use pawpad::Codec;
use rand::rngs::OsRng;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Version info from build.rs
const VERSION: &str = env!("PAWPAD_VERSION");
const BUILD: &str = env!("PAWPAD_BUILD");
const PROFILE: &str = env!("PAWPAD_PROFILE");
const GIT_HASH: &str = env!("PAWPAD_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "pawpad")]
#[command(author, about = "Hide data in text using invisible Unicode variation selectors", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where the text to operate on comes from
#[derive(clap::Args)]
struct TextSource {
    /// Text to operate on
    #[arg(short, long, conflicts_with = "input")]
    text: Option<String>,

    /// Read text from a file (stdin when neither is given)
    #[arg(short, long)]
    input: Option<PathBuf>,
}

impl TextSource {
    fn read(self) -> pawpad::Result<String> {
        read_text(self.text, self.input.as_deref())
    }
}

/// Shared key material for sign/verify
#[derive(clap::Args)]
struct KeySource {
    /// Secret key
    #[arg(long, conflicts_with = "key_file")]
    key: Option<String>,

    /// File whose raw bytes are the secret key
    #[arg(long)]
    key_file: Option<PathBuf>,

    /// MAC algorithm for chain links
    #[arg(long, default_value = "sha256", value_parser = parse_hash)]
    hash: HashAlgorithm,
}

#[derive(Subcommand)]
enum Commands {
    /// Watermark text with a fingerprint after every character
    #[command(alias = "e")]
    Encode {
        #[command(flatten)]
        source: TextSource,

        /// Fingerprint as hex (random when omitted)
        #[arg(short, long)]
        fingerprint: Option<String>,

        /// Length of a generated fingerprint in bytes
        #[arg(short, long, default_value_t = DEFAULT_FINGERPRINT_LEN)]
        length: usize,

        /// Write the encoded text to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract a fingerprint, or check for a specific one
    #[command(alias = "d")]
    Decode {
        #[command(flatten)]
        source: TextSource,

        /// Expected fingerprint as hex
        #[arg(short, long)]
        fingerprint: Option<String>,
    },

    /// Generate a random fingerprint
    Generate {
        /// Length in bytes
        #[arg(short, long, default_value_t = DEFAULT_FINGERPRINT_LEN)]
        length: usize,
    },

    /// Show which characters carry hidden data
    Analyze {
        #[command(flatten)]
        source: TextSource,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Hide a secret message in text
    Hide {
        #[command(flatten)]
        source: TextSource,

        /// Message to hide
        #[arg(short, long)]
        message: String,

        /// Hide the whole message in a single character
        #[arg(short, long)]
        single_char: bool,

        /// Write the encoded text to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Reveal a hidden message
    Reveal {
        #[command(flatten)]
        source: TextSource,
    },

    /// Sign every character with a chained MAC
    Sign {
        #[command(flatten)]
        source: TextSource,

        #[command(flatten)]
        key: KeySource,

        /// Write the signed text to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify a signed text and locate edits
    Verify {
        #[command(flatten)]
        source: TextSource,

        #[command(flatten)]
        key: KeySource,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Strip all hidden data and print the original text
    #[command(alias = "x")]
    Extract {
        #[command(flatten)]
        source: TextSource,

        /// Write the original text to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_hash(s: &str) -> Result<HashAlgorithm, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn run(command: Commands, codec: &Codec) -> pawpad::Result<()> {
    match command {
        Commands::Encode {
            source,
            fingerprint,
            length,
            output,
        } => {
            let options = EncodeOptions {
                fingerprint,
                length,
                output,
            };
            print!("{}", encode_text(&source.read()?, &options, &mut OsRng, codec)?);
        }

        Commands::Decode {
            source,
            fingerprint,
        } => print!("{}", decode_text(&source.read()?, fingerprint.as_deref(), codec)?),

        Commands::Generate { length } => print!("{}", generate_fingerprint(length, &mut OsRng)?),

        Commands::Analyze { source, json } => {
            print!("{}", show_analysis(&source.read()?, json, codec)?)
        }

        Commands::Hide {
            source,
            message,
            single_char,
            output,
        } => {
            let options = HideOptions {
                message,
                single_char,
                output,
            };
            print!("{}", hide_message(&source.read()?, &options, codec)?);
        }

        Commands::Reveal { source } => print!("{}", reveal_message(&source.read()?, codec)?),

        Commands::Sign {
            source,
            key,
            output,
        } => {
            let secret = load_key(key.key.as_deref(), key.key_file.as_deref())?;
            let options = SignOptions {
                hash: key.hash,
                output,
            };
            print!("{}", sign_text(&source.read()?, &secret, &options, codec)?);
        }

        Commands::Verify { source, key, json } => {
            let secret = load_key(key.key.as_deref(), key.key_file.as_deref())?;
            let options = VerifyOptions {
                hash: key.hash,
                json,
            };
            let (report, rendered) = verify_text(&source.read()?, &secret, &options, codec)?;
            print!("{}", rendered);
            report.ensure_intact()?;
        }

        Commands::Extract { source, output } => {
            print!("{}", extract_original(&source.read()?, output.as_deref(), codec)?)
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Handle --version flag
    if cli.version {
        println!("pawpad {}", get_version());
        return ExitCode::SUCCESS;
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let codec = Codec::default();
    match run(command, &codec) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
