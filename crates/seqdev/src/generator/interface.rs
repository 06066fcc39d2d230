/// A minimal interface for issuing sequence values.
///
/// Implementations hand out `0, 1, 2, ...` with every value issued exactly
/// once since construction. Under contention the relative order two racing
/// callers observe is unspecified, but no value is ever issued twice.
pub trait SequenceGenerator {
    /// Returns the next unused value.
    fn next(&self) -> u64;
}

impl<G> SequenceGenerator for &G
where
    G: SequenceGenerator + ?Sized,
{
    fn next(&self) -> u64 {
        (**self).next()
    }
}
