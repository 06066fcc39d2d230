use crate::{
    error::TransferError,
    generator::{AtomicSequenceGenerator, BasicSequenceGenerator, SequenceGenerator},
    session::{SCRATCH_LEN, SessionCursor, UserBuffer, deliver, format_value},
};
use std::cell::Cell;
use std::collections::BTreeSet;
use std::thread::scope;

/// Counts how often the protocol draws from the generator.
struct CountingGenerator {
    inner: BasicSequenceGenerator,
    calls: Cell<usize>,
}

impl CountingGenerator {
    fn new() -> Self {
        Self {
            inner: BasicSequenceGenerator::new(),
            calls: Cell::new(0),
        }
    }
}

impl SequenceGenerator for CountingGenerator {
    fn next(&self) -> u64 {
        self.calls.set(self.calls.get() + 1);
        self.inner.next()
    }
}

/// A destination whose copies always fail.
struct FaultyBuffer(TransferError);

impl UserBuffer for FaultyBuffer {
    fn capacity(&self) -> usize {
        SCRATCH_LEN
    }

    fn copy_to_user(&mut self, _src: &[u8]) -> Result<(), TransferError> {
        Err(self.0)
    }
}

fn read_session<G: SequenceGenerator + ?Sized>(generator: &G, capacity: usize) -> Vec<u8> {
    let mut cursor = SessionCursor::default();
    let mut buf = vec![0u8; capacity];
    let n = deliver(generator, &mut cursor, &mut buf[..]).unwrap();
    buf.truncate(n);
    buf
}

#[test]
fn cursor_starts_pending() {
    let cursor = SessionCursor::default();
    assert_eq!(cursor, SessionCursor::Pending);
    assert!(!cursor.is_delivered());
    assert!(SessionCursor::Delivered.is_delivered());
}

#[test]
fn format_zero() {
    assert_eq!(format_value(0).as_bytes(), b"0\n");
    assert_eq!(format_value(0).len(), 2);
}

#[test]
fn format_has_no_leading_zeros() {
    assert_eq!(format_value(10).as_bytes(), b"10\n");
    assert_eq!(format_value(100_200).as_bytes(), b"100200\n");
}

#[test]
fn format_max_value() {
    let formatted = format_value(u64::MAX);
    assert_eq!(formatted.as_bytes(), b"18446744073709551615\n");
    assert_eq!(formatted.len(), 21);
}

#[test]
fn format_matches_display() {
    for value in [1, 7, 9, 42, 99, 1_000, 65_535, u32::MAX as u64, 1 << 63] {
        assert_eq!(format_value(value).as_bytes(), format!("{value}\n").as_bytes());
    }
}

#[test]
fn first_read_delivers_then_end_of_session() {
    let generator = AtomicSequenceGenerator::new();
    let mut cursor = SessionCursor::default();
    let mut buf = [0u8; 40];

    assert_eq!(deliver(&generator, &mut cursor, &mut buf), Ok(2));
    assert_eq!(&buf[..2], b"0\n");
    assert_eq!(cursor, SessionCursor::Delivered);

    assert_eq!(deliver(&generator, &mut cursor, &mut buf), Ok(0));
    assert_eq!(cursor, SessionCursor::Delivered);
}

#[test]
fn delivered_session_never_touches_generator() {
    let generator = CountingGenerator::new();
    let mut cursor = SessionCursor::default();
    let mut buf = [0u8; 40];

    deliver(&generator, &mut cursor, &mut buf).unwrap();
    for capacity in [0, 1, 2, 40] {
        let mut other = vec![0u8; capacity];
        assert_eq!(deliver(&generator, &mut cursor, &mut other[..]), Ok(0));
    }
    assert_eq!(generator.calls.get(), 1);
}

#[test]
fn one_byte_buffer_truncates() {
    let generator = AtomicSequenceGenerator::new();
    assert_eq!(read_session(&generator, 1), b"0");
}

#[test]
fn truncated_bytes_are_a_prefix() {
    let generator = AtomicSequenceGenerator::starting_at(123_456_789);
    let mut cursor = SessionCursor::default();
    let mut buf = [0u8; 4];

    assert_eq!(deliver(&generator, &mut cursor, &mut buf), Ok(4));
    assert_eq!(&buf, b"1234");
    assert!(cursor.is_delivered());
    assert_eq!(deliver(&generator, &mut cursor, &mut buf), Ok(0));
}

#[test]
fn zero_capacity_consumes_the_session() {
    let generator = CountingGenerator::new();
    let mut cursor = SessionCursor::default();
    let mut empty: [u8; 0] = [];

    assert_eq!(deliver(&generator, &mut cursor, &mut empty), Ok(0));
    assert!(cursor.is_delivered());
    assert_eq!(generator.calls.get(), 1);
}

#[test]
fn sequential_sessions_get_consecutive_values() {
    let generator = AtomicSequenceGenerator::new();

    assert_eq!(read_session(&generator, 40), b"0\n");
    assert_eq!(read_session(&generator, 40), b"1\n");
    assert_eq!(read_session(&generator, 40), b"2\n");
}

#[test]
fn exact_capacity_fits_newline() {
    let generator = AtomicSequenceGenerator::starting_at(99);
    assert_eq!(read_session(&generator, 3), b"99\n");
}

#[test]
fn vec_destination_appends() {
    let generator = AtomicSequenceGenerator::starting_at(7);
    let mut cursor = SessionCursor::default();
    let mut out = Vec::with_capacity(16);
    out.extend_from_slice(b">");

    let n = deliver(&generator, &mut cursor, &mut out).unwrap();
    assert_eq!(n, 2);
    assert_eq!(out, b">7\n");
}

#[test]
fn transfer_failure_keeps_cursor_pending_and_wastes_value() {
    let generator = CountingGenerator::new();
    let mut cursor = SessionCursor::default();

    let err = deliver(&generator, &mut cursor, &mut FaultyBuffer(TransferError::Inaccessible));
    assert_eq!(err, Err(TransferError::Inaccessible));
    assert_eq!(cursor, SessionCursor::Pending);
    assert_eq!(generator.calls.get(), 1);

    // The same session may read again; value 0 is gone for good.
    let mut buf = [0u8; 40];
    assert_eq!(deliver(&generator, &mut cursor, &mut buf), Ok(2));
    assert_eq!(&buf[..2], b"1\n");
    assert_eq!(generator.calls.get(), 2);
}

#[test]
fn rejected_transfer_is_reported() {
    let generator = AtomicSequenceGenerator::new();
    let mut cursor = SessionCursor::default();

    assert_eq!(
        deliver(&generator, &mut cursor, &mut FaultyBuffer(TransferError::Rejected)),
        Err(TransferError::Rejected)
    );
}

#[test]
fn concurrent_sessions_cover_exact_range() {
    const SESSIONS: u64 = 100;

    let generator = AtomicSequenceGenerator::new();

    let values: BTreeSet<u64> = scope(|s| {
        let handles: Vec<_> = (0..SESSIONS)
            .map(|_| {
                s.spawn(|| {
                    let bytes = read_session(&generator, 40);
                    let text = std::str::from_utf8(&bytes).unwrap();
                    text.strip_suffix('\n').unwrap().parse::<u64>().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(values, (0..SESSIONS).collect());
}

#[test]
fn concurrent_sessions_stress() {
    const SESSIONS_PER_THREAD: usize = 2_000;

    let threads = num_cpus::get().max(2);
    let generator = AtomicSequenceGenerator::new();

    let mut values: Vec<u64> = scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                s.spawn(|| {
                    (0..SESSIONS_PER_THREAD)
                        .map(|_| {
                            let mut cursor = SessionCursor::default();
                            let mut buf = [0u8; SCRATCH_LEN];
                            let n = deliver(&generator, &mut cursor, &mut buf).unwrap();
                            assert_eq!(deliver(&generator, &mut cursor, &mut buf), Ok(0));
                            std::str::from_utf8(&buf[..n - 1]).unwrap().parse().unwrap()
                        })
                        .collect::<Vec<u64>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    values.sort_unstable();
    let expected: Vec<u64> = (0..(threads * SESSIONS_PER_THREAD) as u64).collect();
    assert_eq!(values, expected);
}
