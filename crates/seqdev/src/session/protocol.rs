#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    error::TransferError,
    generator::SequenceGenerator,
    session::{SessionCursor, UserBuffer, format_value},
};

/// Performs one read on a session.
///
/// - If the cursor is [`SessionCursor::Delivered`], returns `Ok(0)` without
///   touching the generator. This is end of session.
/// - Otherwise draws one value, formats it as decimal digits plus `\n`, and
///   copies `min(formatted length, dest.capacity())` bytes into `dest`. On
///   success the cursor becomes [`SessionCursor::Delivered`] and the number
///   of bytes written is returned.
///
/// A short destination receives a prefix of the formatted value; the rest is
/// never delivered, because the next read on the session is end of session.
///
/// # Errors
/// Returns the [`TransferError`] reported by `dest`. The cursor stays
/// [`SessionCursor::Pending`], but the value drawn for this read has already
/// been issued and is lost: a later read on the same session draws a fresh
/// value. The generator is incremented before the copy so that issuing stays
/// a single unconditional atomic step.
///
/// # Example
/// ```
/// use seqdev::{
///     generator::AtomicSequenceGenerator,
///     session::{SessionCursor, deliver},
/// };
///
/// let generator = AtomicSequenceGenerator::new();
/// let mut cursor = SessionCursor::default();
/// let mut buf = [0u8; 40];
///
/// assert_eq!(deliver(&generator, &mut cursor, &mut buf[..]), Ok(2));
/// assert_eq!(&buf[..2], b"0\n");
/// assert_eq!(deliver(&generator, &mut cursor, &mut buf[..]), Ok(0));
/// ```
#[cfg_attr(
    feature = "tracing",
    instrument(level = "trace", skip(generator, dest), ret, err)
)]
pub fn deliver<G, B>(
    generator: &G,
    cursor: &mut SessionCursor,
    dest: &mut B,
) -> Result<usize, TransferError>
where
    G: SequenceGenerator + ?Sized,
    B: UserBuffer + ?Sized,
{
    if cursor.is_delivered() {
        return Ok(0);
    }

    let value = generator.next();
    let formatted = format_value(value);

    let n = formatted.len().min(dest.capacity());
    dest.copy_to_user(&formatted.as_bytes()[..n])?;

    *cursor = SessionCursor::Delivered;
    Ok(n)
}
