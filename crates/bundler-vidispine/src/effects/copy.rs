use std::io::{self, Read, Write};

/// Pump `src` into `dst` through a single `buffer_size` buffer.
///
/// Stops at the first read returning 0 bytes and returns the number of bytes
/// copied. The first read or write error ends the copy.
pub fn buffered_copy<W, R>(dst: &mut W, src: &mut R, buffer_size: usize) -> io::Result<u64>
where
    W: Write + ?Sized,
    R: Read + ?Sized,
{
    if buffer_size == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "copy buffer size must be greater than 0",
        ));
    }

    let mut buf = vec![0u8; buffer_size];
    let mut total = 0u64;

    loop {
        let n = match src.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        dst.write_all(&buf[..n])?;
        total += n as u64;
    }
}
