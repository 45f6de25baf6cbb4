//! `medcrypt audit`

use clap::Args;

use super::Context;
use crate::error::MedcryptResult;

/// Arguments for `medcrypt audit`
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Number of entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Handle `medcrypt audit`
pub fn handle_audit_command(ctx: &Context, args: AuditArgs) -> MedcryptResult<()> {
    let Some(logger) = ctx.audit_logger() else {
        println!("Audit logging is disabled.");
        return Ok(());
    };

    let entries = logger.read_recent(args.limit)?;
    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
