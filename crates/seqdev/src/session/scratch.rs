/// Size of the formatting buffer.
///
/// `u64::MAX` has 20 decimal digits. One newline plus margin fits easily.
pub const SCRATCH_LEN: usize = 40;

/// A fixed-size, stack-allocated rendering of one issued value.
///
/// Holds the base-10 digits of the value followed by a single `\n`: no
/// leading zeros (except for `0` itself), no other whitespace.
#[derive(Clone, Copy)]
pub struct Scratch {
    buf: [u8; SCRATCH_LEN],
    start: usize,
}

impl Scratch {
    /// The formatted bytes, newline included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[self.start..]
    }

    /// Length of the formatted bytes, newline included.
    pub fn len(&self) -> usize {
        SCRATCH_LEN - self.start
    }

    /// Always `false`: a formatted value has at least one digit.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl core::fmt::Debug for Scratch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Scratch")
            .field(&String::from_utf8_lossy(self.as_bytes()))
            .finish()
    }
}

/// Formats `value` as decimal digits plus a trailing newline.
///
/// Digits are written right to left from the end of the buffer, so the
/// operation never allocates and cannot fail.
///
/// # Example
/// ```
/// use seqdev::session::format_value;
///
/// assert_eq!(format_value(0).as_bytes(), b"0\n");
/// assert_eq!(format_value(1234).as_bytes(), b"1234\n");
/// ```
pub fn format_value(mut value: u64) -> Scratch {
    let mut buf = [0u8; SCRATCH_LEN];
    let mut start = SCRATCH_LEN - 1;
    buf[start] = b'\n';

    loop {
        start -= 1;
        buf[start] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }

    Scratch { buf, start }
}
