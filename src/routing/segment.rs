//! Byte-run scanning shared by the pattern matcher and the tail extractor.

/// A run of bytes consumed by [`scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The consumed substring (may be empty).
    pub value: &'a str,
    /// The byte that stopped the run, `None` if the run reached the end.
    pub next: Option<u8>,
    /// Offset immediately after the consumed run.
    pub end: usize,
}

/// Consume the longest run of bytes starting at `start` that satisfy `pred`.
///
/// Callers only stop on ASCII bytes or on the first byte of a character, so
/// the returned offsets always fall on character boundaries.
pub fn scan<F>(src: &str, start: usize, pred: F) -> Segment<'_>
where
    F: Fn(u8) -> bool,
{
    let bytes = src.as_bytes();
    let mut end = start.min(bytes.len());
    while end < bytes.len() && pred(bytes[end]) {
        end += 1;
    }

    Segment {
        value: &src[start.min(end)..end],
        next: bytes.get(end).copied(),
        end,
    }
}

/// Characters allowed in a placeholder name.
pub fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Predicate for a placeholder value: stops at the terminator or at a `/`.
pub fn value_until(terminator: Option<u8>) -> impl Fn(u8) -> bool {
    move |b| b != b'/' && Some(b) != terminator
}
