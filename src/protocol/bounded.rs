//! Terminator-safe copy into fixed-capacity buffers

use super::{Error, Result, TERMINATOR};

/// Copy `source` into `destination`, always leaving room for a terminator.
///
/// At most `destination.len() - 1` bytes are copied. Copying stops early at
/// the first terminator in `source` or at the end of `source`. A terminator
/// is written right after the copied bytes. Returns the number of bytes
/// copied, terminator excluded.
///
/// # Errors
///
/// [`Error::InvalidArguments`] if `destination` has zero capacity. The
/// destination is left untouched in that case.
pub fn bounded_copy(destination: &mut [u8], source: &[u8]) -> Result<usize> {
    let Some(limit) = destination.len().checked_sub(1) else {
        return Err(Error::InvalidArguments("destination capacity must be positive"));
    };

    let copied = source
        .iter()
        .take(limit)
        .position(|&byte| byte == TERMINATOR)
        .unwrap_or_else(|| source.len().min(limit));

    destination[..copied].copy_from_slice(&source[..copied]);
    destination[copied] = TERMINATOR;

    Ok(copied)
}

/// [`bounded_copy`] for callers that hold optional buffers.
///
/// # Errors
///
/// [`Error::InvalidArguments`] if either buffer is `None` or the destination
/// has zero capacity.
pub fn bounded_copy_opt(destination: Option<&mut [u8]>, source: Option<&[u8]>) -> Result<usize> {
    match (destination, source) {
        (Some(destination), Some(source)) => bounded_copy(destination, source),
        (None, _) => Err(Error::InvalidArguments("destination buffer is absent")),
        (_, None) => Err(Error::InvalidArguments("source buffer is absent")),
    }
}
