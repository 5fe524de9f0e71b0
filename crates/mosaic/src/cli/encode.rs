//! Encode and credential check handlers.

use mosaic::{ApiKey, MediaCodec};
use std::path::Path;

/// Handles the encode command.
pub fn handle_encode_command(file: &Path) -> anyhow::Result<()> {
    let bytes = MediaCodec::read_file(file)?;
    println!("{}", MediaCodec::encode(&bytes));
    Ok(())
}

/// Handles the check-key command.
///
/// An unacceptable key is reported as an error, so the exit status is non-zero.
pub fn handle_check_key_command(key: &str) -> anyhow::Result<()> {
    let key = ApiKey::parse(key)?;
    println!("ok: {}", key);
    Ok(())
}
