//! `medcrypt hash`
//!
//! Prints the SHA-512 digest of text or a file. Files are hashed in their
//! data-URL form, which is what `encrypt` reports for them.

use clap::Args;

use super::{Context, InputArgs};
use crate::audit::{AuditEntry, Operation};
use crate::crypto::{hash, matches_digest};
use crate::error::{MedcryptError, MedcryptResult};

/// Arguments for `medcrypt hash`
#[derive(Args, Debug)]
pub struct HashArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Fail unless the digest equals this value
    #[arg(long, value_name = "DIGEST")]
    pub expect: Option<String>,
}

/// Handle `medcrypt hash`
pub async fn handle_hash_command(ctx: &Context, args: HashArgs) -> MedcryptResult<()> {
    let input = args.input.load(&ctx.settings).await?;
    let digest = hash(&input.text);

    let mut entry = AuditEntry::success(Operation::Hash, input.source, Some(digest.clone()));
    if let Some((mime, name)) = &input.file {
        entry = entry.with_file(mime.as_str(), name.as_str());
    }
    ctx.record(entry);

    println!("{}", digest);

    if let Some(expected) = &args.expect {
        if !matches_digest(&input.text, expected) {
            return Err(MedcryptError::Validation(
                "Digest does not match the expected value".into(),
            ));
        }
        println!("Digest matches.");
    }

    Ok(())
}
