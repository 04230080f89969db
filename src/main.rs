use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use credhash::{Verifier, VerifierError, VerifierFile, default_verifier_file};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

mod prompt;

#[derive(Debug, Parser)]
#[command(name = "credhash")]
#[command(
    version,
    about = "Derive and check salted PBKDF2-HMAC-SHA256 password verifiers."
)]
struct Cli {
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Derives a verifier from a new password
    Derive {
        /// Hex-encoded 16-byte salt, for reproducible output
        #[arg(long, value_name = "HEX")]
        salt: Option<String>,

        /// Store the verifier in this file instead of printing it
        #[arg(long, value_name = "PATH", env = "CREDHASH_VERIFIER")]
        out: Option<PathBuf>,
    },

    /// Checks a password against a stored verifier
    Verify {
        /// Verifier string; read from the verifier file when omitted
        verifier: Option<String>,

        /// Verifier file (default: per-user data directory)
        #[arg(long, value_name = "PATH", env = "CREDHASH_VERIFIER")]
        file: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct DeriveOutput<'a> {
    verifier: &'a Verifier,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a Path>,
}

#[derive(Serialize)]
struct VerifyOutput {
    valid: bool,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let fmt_layer = fmt::layer().with_writer(io::stderr).with_target(false);

    //  RUST_LOG=debug credhash verify <VERIFIER>
    //  RUST_LOG wins over -v when set.
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = Registry::default().with(fmt_layer).with(env_filter);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn resolve_file(path: Option<PathBuf>) -> Result<VerifierFile> {
    match path {
        Some(p) => Ok(VerifierFile::new(p)),
        None => default_verifier_file().context("could not resolve default verifier file"),
    }
}

fn derive(json: bool, salt: Option<String>, out: Option<PathBuf>) -> Result<ExitCode> {
    let password = prompt::read_new_password_with_confirmation()?;

    let verifier = match salt {
        Some(salt_hex) => {
            let salt = hex::decode(salt_hex.trim()).context("salt must be hex encoded")?;
            credhash::derive_with_salt(password.as_bytes(), &salt)?
        }
        None => credhash::derive(password.as_bytes())?,
    };
    drop(password);

    let file = out.map(VerifierFile::new);
    if let Some(file) = &file {
        file.save(&verifier)
            .with_context(|| format!("failed to write verifier to {}", file.path().display()))?;
        tracing::info!(path = %file.path().display(), "verifier stored");
    }

    let path = file.as_ref().map(VerifierFile::path);
    if json {
        let output = DeriveOutput {
            verifier: &verifier,
            path,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if let Some(path) = path {
        println!("verifier stored in {}", path.display());
    } else {
        println!("{verifier}");
    }

    Ok(ExitCode::SUCCESS)
}

fn verify(json: bool, verifier: Option<String>, file: Option<PathBuf>) -> Result<ExitCode> {
    let stored = match verifier {
        Some(v) => v,
        None => {
            let file = resolve_file(file)?;
            if !file.exists() {
                bail!("no verifier stored at {}", file.path().display());
            }
            file.load()
                .with_context(|| format!("failed to read {}", file.path().display()))?
        }
    };

    let attempt = prompt::read_password()?;

    let valid = match credhash::verify(&stored, attempt.as_bytes()) {
        Ok(valid) => valid,
        Err(e @ VerifierError::MalformedVerifier(_)) => {
            tracing::warn!(error = %e, "stored verifier is unreadable");
            false
        }
        Err(e) => return Err(e.into()),
    };
    drop(attempt);

    if json {
        println!("{}", serde_json::to_string(&VerifyOutput { valid })?);
    } else if valid {
        println!("valid");
    } else {
        eprintln!("invalid credentials");
    }

    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn run(args: Cli) -> Result<ExitCode> {
    match args.command {
        Commands::Derive { salt, out } => derive(args.json, salt, out),
        Commands::Verify { verifier, file } => verify(args.json, verifier, file),
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    if let Err(e) = init_tracing(args.verbose) {
        eprintln!("Error: failed to initialise logging: {e}");
    }

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
