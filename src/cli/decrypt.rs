//! `medcrypt decrypt`
//!
//! Decrypts a ciphertext. Text is printed; file payloads are written to
//! `decrypted-file.<ext>` in the output directory.

use std::path::{Path, PathBuf};

use clap::Args;
use tokio::io::AsyncWriteExt;

use super::{Context, KeyArgs};
use crate::audit::{AuditEntry, Operation, Source};
use crate::codec::{DecodedFile, DecryptedContent};
use crate::crypto::hash;
use crate::error::{MedcryptError, MedcryptResult};

/// Ciphertext input: inline or from a file
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct CiphertextArgs {
    /// Ciphertext to decrypt
    pub ciphertext: Option<String>,

    /// Read the ciphertext from a file
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,
}

/// Arguments for `medcrypt decrypt`
#[derive(Args, Debug)]
pub struct DecryptArgs {
    #[command(flatten)]
    pub source: CiphertextArgs,

    #[command(flatten)]
    pub key: KeyArgs,

    /// Directory for decrypted files (defaults to the configured output dir, then ".")
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Overwrite an existing decrypted file
    #[arg(long)]
    pub force: bool,
}

/// Handle `medcrypt decrypt`
pub async fn handle_decrypt_command(ctx: &Context, args: DecryptArgs) -> MedcryptResult<()> {
    let ciphertext = match (&args.source.ciphertext, &args.source.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path).await.map_err(|e| {
            MedcryptError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?,
        (None, None) => {
            return Err(MedcryptError::Validation(
                "Provide a ciphertext or --input".into(),
            ))
        }
    };
    if ciphertext.trim().is_empty() {
        return Err(MedcryptError::Validation("Ciphertext is empty".into()));
    }

    let passphrase = args.key.read(false)?;
    let source = if args.source.input.is_some() {
        Source::File
    } else {
        Source::Text
    };

    tracing::info!(%source, "decrypting");
    let decrypted = match ctx.codec().decrypt(&ciphertext, &passphrase) {
        Ok(decrypted) => decrypted,
        Err(e) => {
            ctx.record(AuditEntry::failure(Operation::Decrypt, source));
            return Err(e);
        }
    };
    let digest = hash(&decrypted);

    match DecryptedContent::classify(decrypted) {
        DecryptedContent::Text(text) => {
            ctx.record(AuditEntry::success(Operation::Decrypt, Source::Text, Some(digest)));
            println!("{}", text);
        }
        content @ DecryptedContent::File { .. } => {
            let file = content.into_file()?;

            let dir = args
                .out_dir
                .clone()
                .or_else(|| ctx.settings.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            let path = write_decrypted_file(&dir, &file, args.force).await?;

            ctx.record(
                AuditEntry::success(Operation::Decrypt, Source::File, Some(digest))
                    .with_file(file.mime.as_str(), file.file_name.as_str()),
            );
            println!(
                "Decrypted file written to {} ({}, {} bytes)",
                path.display(),
                file.mime,
                file.bytes.len()
            );
        }
    }

    Ok(())
}

/// Write a decoded file into `dir`, refusing to clobber unless forced
async fn write_decrypted_file(dir: &Path, file: &DecodedFile, force: bool) -> MedcryptResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        MedcryptError::Io(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    let path = dir.join(&file.file_name);
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut out = options.open(&path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::AlreadyExists => MedcryptError::Validation(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )),
        _ => MedcryptError::Io(format!("Failed to create {}: {}", path.display(), e)),
    })?;
    out.write_all(&file.bytes)
        .await
        .map_err(|e| MedcryptError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    out.flush()
        .await
        .map_err(|e| MedcryptError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), bytes = file.bytes.len(), "wrote decrypted file");
    Ok(path)
}
