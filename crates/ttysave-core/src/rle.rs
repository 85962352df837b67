//! Run-length codec wrapping the primitive layer (spec §4.3).
//!
//! A chunk is a signed-8-bit prefix followed by either literal bytes
//! (prefix `>= 0`, `prefix + 1` bytes follow verbatim) or a single byte to
//! repeat (prefix `< 0`, repeated `-prefix + 1` times). The encoder here only
//! ever emits literal chunks; compression is not required for round-trip
//! correctness, only the decoder needs to understand both forms, since real
//! files in the wild use run chunks too.

use crate::error::Error;
use crate::io::{Reader, Writer};

const MAX_CHUNK: usize = 128;

pub fn encode_to<W: Writer>(dst: &mut W, data: &[u8]) -> Result<(), Error> {
    for chunk in data.chunks(MAX_CHUNK) {
        dst.write(&[(chunk.len() - 1) as u8])?;
        dst.write(chunk)?;
    }
    Ok(())
}

pub fn decode_from<R: Reader>(src: &mut R, out_len: usize) -> Result<Vec<u8>, Error> {
    let mut out = Vec::with_capacity(out_len);
    while out.len() < out_len {
        let mut prefix = [0u8; 1];
        read_or_eof(src, &mut prefix)?;
        let c = prefix[0] as i8;
        if c >= 0 {
            let mut buf = vec![0u8; c as usize + 1];
            read_or_eof(src, &mut buf)?;
            out.extend_from_slice(&buf);
        } else {
            let mut b = [0u8; 1];
            read_or_eof(src, &mut b)?;
            let count = (-(c as i32) + 1) as usize;
            out.extend(std::iter::repeat(b[0]).take(count));
        }
    }
    Ok(out)
}

fn read_or_eof<R: Reader>(src: &mut R, buf: &mut [u8]) -> Result<(), Error> {
    match src.read(buf) {
        Ok(_) => Ok(()),
        Err(Error::ShortRead { .. }) => Err(Error::UnexpectedEof),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_literal_run_followed_by_a_repeat_run() {
        let encoded: [u8; 5] = [0xFD, 0x2A, 0x01, 0x03, 0x04];
        let mut src = &encoded[..];
        let decoded = decode_from(&mut src, 6).unwrap();
        assert_eq!(decoded, vec![0x2A, 0x2A, 0x2A, 0x2A, 0x03, 0x04]);
    }

    #[test]
    fn round_trips_arbitrary_data() {
        let data: Vec<u8> = (0..500).map(|i| (i % 251) as u8).collect();
        let mut encoded = Vec::new();
        encode_to(&mut encoded, &data).unwrap();
        let mut src = &encoded[..];
        let decoded = decode_from(&mut src, data.len()).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn truncated_stream_is_unexpected_eof() {
        let encoded: [u8; 2] = [0x05, 0x01];
        let mut src = &encoded[..];
        let err = decode_from(&mut src, 6).unwrap_err();
        assert!(matches!(err, Error::UnexpectedEof));
    }
}
