//! `medcrypt encrypt`
//!
//! Encrypts text or a file and prints the ciphertext together with the
//! SHA-512 digest of the plaintext.

use std::path::PathBuf;

use clap::Args;

use super::{Context, InputArgs, KeyArgs};
use crate::audit::{AuditEntry, Operation, Source};
use crate::error::{MedcryptError, MedcryptResult};

/// Arguments for `medcrypt encrypt`
#[derive(Args, Debug)]
pub struct EncryptArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub key: KeyArgs,

    /// Write the ciphertext to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Handle `medcrypt encrypt`
pub async fn handle_encrypt_command(ctx: &Context, args: EncryptArgs) -> MedcryptResult<()> {
    let input = args.input.load(&ctx.settings).await?;
    if input.source == Source::Text && input.text.is_empty() {
        return Err(MedcryptError::Validation("Text to encrypt is required".into()));
    }
    let passphrase = args.key.read(true)?;

    tracing::info!(source = %input.source, "encrypting");
    let result = ctx.codec().encrypt(&input.text, &passphrase);

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            ctx.record(AuditEntry::failure(Operation::Encrypt, input.source));
            return Err(e);
        }
    };

    let mut entry = AuditEntry::success(Operation::Encrypt, input.source, Some(output.digest.clone()));
    if let Some((mime, name)) = &input.file {
        entry = entry.with_file(mime.as_str(), name.as_str());
    }
    ctx.record(entry);

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, format!("{}\n", output.ciphertext))
                .await
                .map_err(|e| {
                    MedcryptError::Io(format!("Failed to write {}: {}", path.display(), e))
                })?;
            println!("Ciphertext written to {}", path.display());
        }
        None => println!("{}", output.ciphertext),
    }
    println!("SHA-512: {}", output.digest);

    Ok(())
}
