/// Length of the next block to request, `0` once the file is exhausted.
pub fn next_block_len(block_size: u64, size: u64, bytes_read: u64) -> u64 {
    block_size.min(size.saturating_sub(bytes_read))
}

/// Value for the `Range` header covering `len` bytes from `start`.
///
/// The origin service expects the capitalised `Bytes=` unit and an inclusive
/// end offset. `len` must be non-zero.
pub fn range_header(start: u64, len: u64) -> String {
    format!("Bytes={}-{}", start, start + len - 1)
}
