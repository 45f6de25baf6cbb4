use anyhow::Result;
use clap::{Parser, Subcommand};

use medcrypt::cli::{
    handle_audit_command, handle_decrypt_command, handle_encrypt_command, handle_hash_command,
    logging::init_logging, AuditArgs, Context, DecryptArgs, EncryptArgs, HashArgs,
};

#[derive(Parser)]
#[command(
    name = "medcrypt",
    version,
    about = "Encrypt, decrypt and hash text or small files with a passphrase",
    long_about = "medcrypt encrypts text, images and CSV files with AES-256-GCM under a \
                  key derived from your passphrase (Argon2id), and prints a SHA-512 \
                  digest of the plaintext for integrity checks. It is a demonstration \
                  tool: there is no key management and no recovery if the passphrase \
                  is lost."
)]
struct Cli {
    /// Show progress logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text or a file
    #[command(alias = "enc")]
    Encrypt(EncryptArgs),

    /// Decrypt a ciphertext
    #[command(alias = "dec")]
    Decrypt(DecryptArgs),

    /// Print the SHA-512 digest of text or a file
    Hash(HashArgs),

    /// Show recent audit log entries
    Audit(AuditArgs),

    /// Write default settings to the config directory
    Init,

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(if cli.verbose { "info" } else { "warn" });

    let ctx = Context::load()?;

    match cli.command {
        Some(Commands::Encrypt(args)) => handle_encrypt_command(&ctx, args).await?,
        Some(Commands::Decrypt(args)) => handle_decrypt_command(&ctx, args).await?,
        Some(Commands::Hash(args)) => handle_hash_command(&ctx, args).await?,
        Some(Commands::Audit(args)) => handle_audit_command(&ctx, args)?,
        Some(Commands::Init) => {
            if ctx.paths.is_initialized() {
                println!(
                    "Settings already exist at: {}",
                    ctx.paths.settings_file().display()
                );
            } else {
                ctx.settings.save(&ctx.paths)?;
                println!("Settings written to: {}", ctx.paths.settings_file().display());
            }
        }
        Some(Commands::Config) => {
            let settings = &ctx.settings;
            println!("medcrypt Configuration");
            println!("======================");
            println!("Config directory: {}", ctx.paths.base_dir().display());
            println!("Settings file:    {}", ctx.paths.settings_file().display());
            println!("Audit log:        {}", ctx.paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Key derivation:  Argon2id");
            println!("    Memory cost:   {} KiB", settings.kdf.memory_cost);
            println!("    Time cost:     {} iterations", settings.kdf.time_cost);
            println!("    Parallelism:   {}", settings.kdf.parallelism);
            println!("  Max file size:   {} bytes", settings.max_file_size);
            println!("  Audit enabled:   {}", settings.audit_enabled);
            if let Some(dir) = &settings.output_dir {
                println!("  Output dir:      {}", dir.display());
            }
        }
        None => {
            println!("medcrypt - passphrase encryption for text and small files");
            println!();
            println!("Run 'medcrypt --help' for usage information.");
        }
    }

    Ok(())
}
