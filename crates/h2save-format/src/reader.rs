//! Little-endian primitives over a shrinking byte slice.
//!
//! Every reader advances `data` past what it consumed and fails with
//! [`Error::UnexpectedEof`] instead of reading short.

use crate::error::{Error, Result};

pub(crate) fn read_bytes_array<const N: usize>(data: &mut &[u8]) -> Result<[u8; N]> {
    let (bytes, rest) = data.split_first_chunk::<N>().ok_or(Error::UnexpectedEof)?;
    *data = rest;
    Ok(*bytes)
}

pub(crate) fn read_bytes<'i>(data: &mut &'i [u8], n: usize) -> Result<&'i [u8]> {
    if data.len() < n {
        return Err(Error::UnexpectedEof);
    }

    let (bytes, rest) = data.split_at(n);
    *data = rest;
    Ok(bytes)
}

pub(crate) fn read_u8(data: &mut &[u8]) -> Result<u8> {
    let (first, rest) = data.split_first().ok_or(Error::UnexpectedEof)?;
    *data = rest;
    Ok(*first)
}

pub(crate) fn read_bool(data: &mut &[u8]) -> Result<bool> {
    Ok(read_u8(data)? != 0)
}

pub(crate) fn read_u32(data: &mut &[u8]) -> Result<u32> {
    read_bytes_array::<4>(data).map(u32::from_le_bytes)
}

pub(crate) fn read_u64(data: &mut &[u8]) -> Result<u64> {
    read_bytes_array::<8>(data).map(u64::from_le_bytes)
}

pub(crate) fn read_f64(data: &mut &[u8]) -> Result<f64> {
    read_bytes_array::<8>(data).map(f64::from_le_bytes)
}

/// u32 length followed by that many UTF-8 bytes.
pub(crate) fn read_str_prefix<'i>(data: &mut &'i [u8]) -> Result<&'i str> {
    let length = read_u32(data)?;
    let bytes = read_bytes(data, length as usize)?;
    Ok(std::str::from_utf8(bytes)?)
}

/// u32 count followed by `count` items read with `f`.
pub(crate) fn read_array<'i, T>(
    data: &mut &'i [u8],
    f: impl Fn(&mut &'i [u8]) -> Result<T>,
) -> Result<Vec<T>> {
    let len = read_u32(data)? as usize;

    // The count comes from untrusted input; don't let it size the allocation.
    let mut items = Vec::with_capacity(len.min(data.len()));
    for _ in 0..len {
        items.push(f(data)?);
    }

    Ok(items)
}

pub(crate) fn expect_end(data: &[u8]) -> Result<()> {
    if data.is_empty() {
        Ok(())
    } else {
        Err(Error::TrailingBytes(data.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_advance_the_slice() {
        let bytes = [1, 0, 0, 0, 0xff, 2, 0, 0, 0, b'h', b'i'];
        let mut data = &bytes[..];

        assert_eq!(read_u32(&mut data).unwrap(), 1);
        assert!(read_bool(&mut data).unwrap());
        assert_eq!(read_str_prefix(&mut data).unwrap(), "hi");
        assert!(data.is_empty());
    }

    #[test]
    fn test_short_reads_fail_without_consuming() {
        let bytes = [1, 2, 3];
        let mut data = &bytes[..];

        assert!(matches!(read_u32(&mut data), Err(Error::UnexpectedEof)));
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_string_length_past_end_is_eof() {
        let bytes = [9, 0, 0, 0, b'a'];
        let mut data = &bytes[..];

        assert!(matches!(read_str_prefix(&mut data), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_huge_array_count_does_not_preallocate() {
        let bytes = [0xff, 0xff, 0xff, 0xff];
        let mut data = &bytes[..];

        assert!(matches!(
            read_array(&mut data, read_u32),
            Err(Error::UnexpectedEof)
        ));
    }

    #[test]
    fn test_expect_end_reports_leftovers() {
        assert!(expect_end(&[]).is_ok());
        assert!(matches!(expect_end(&[0, 0]), Err(Error::TrailingBytes(2))));
    }
}
