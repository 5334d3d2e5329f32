//! RLP building blocks for the account key codec.

use alloy_rlp::{Encodable, Header};

use crate::errors::EncodingError;

/// Shortest big-endian bytes of `value`; zero is the empty string.
pub fn minimal_be_bytes(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}

/// Inverse of [`minimal_be_bytes`], rejecting leading zero bytes.
pub fn decode_minimal_be(bytes: &[u8]) -> Result<u64, EncodingError> {
    if bytes.first() == Some(&0) {
        return Err(EncodingError::NonCanonicalInteger);
    }
    if bytes.len() > 8 {
        return Err(EncodingError::IntegerOverflow);
    }
    Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

pub(crate) fn write_bytes(bytes: &[u8], out: &mut Vec<u8>) {
    bytes.encode(out);
}

/// Writes a list header for `payload` (already-encoded items) then the payload.
pub(crate) fn write_list(payload: &[u8], out: &mut Vec<u8>) {
    Header {
        list: true,
        payload_length: payload.len(),
    }
    .encode(out);
    out.extend_from_slice(payload);
}

/// Splits the next item off `buf` and returns its payload.
pub(crate) fn take_item<'a>(buf: &mut &'a [u8], list: bool) -> Result<&'a [u8], EncodingError> {
    let header = Header::decode(buf)?;
    if header.list != list {
        return Err(EncodingError::UnexpectedItem {
            expected: if list { "list" } else { "byte string" },
        });
    }
    if buf.len() < header.payload_length {
        return Err(alloy_rlp::Error::InputTooShort.into());
    }
    let (payload, rest) = buf.split_at(header.payload_length);
    *buf = rest;
    Ok(payload)
}

pub(crate) fn ensure_consumed(buf: &[u8]) -> Result<(), EncodingError> {
    if buf.is_empty() {
        Ok(())
    } else {
        Err(EncodingError::TrailingBytes(buf.len()))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_minimal_be_bytes() {
        assert_eq!(minimal_be_bytes(0), Vec::<u8>::new());
        assert_eq!(minimal_be_bytes(1), vec![0x01]);
        assert_eq!(minimal_be_bytes(0x0100), vec![0x01, 0x00]);
        assert_eq!(minimal_be_bytes(u64::MAX), vec![0xff; 8]);
    }

    #[test]
    fn test_decode_minimal_be_rejects_padding() {
        assert_eq!(decode_minimal_be(&[]), Ok(0));
        assert_eq!(
            decode_minimal_be(&[0x00, 0x01]),
            Err(EncodingError::NonCanonicalInteger)
        );
        assert_eq!(
            decode_minimal_be(&[0x01; 9]),
            Err(EncodingError::IntegerOverflow)
        );
    }

    #[test]
    fn test_single_byte_items() {
        let mut out = Vec::new();
        write_bytes(&[0x01], &mut out);
        write_bytes(&[], &mut out);
        write_bytes(&[0x80], &mut out);
        assert_eq!(out, vec![0x01, 0x80, 0x81, 0x80]);

        let mut buf = out.as_slice();
        assert_eq!(take_item(&mut buf, false).unwrap(), &[0x01]);
        assert_eq!(take_item(&mut buf, false).unwrap(), &[] as &[u8]);
        assert_eq!(take_item(&mut buf, false).unwrap(), &[0x80]);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_take_item_checks_kind_and_length() {
        let mut list = [0xc1, 0x01].as_slice();
        assert!(matches!(
            take_item(&mut list, false),
            Err(EncodingError::UnexpectedItem { .. })
        ));

        let mut truncated = [0x83, 0x01, 0x02].as_slice();
        assert!(matches!(
            take_item(&mut truncated, false),
            Err(EncodingError::Rlp(_))
        ));
    }

    proptest! {
        #[test]
        fn proptest_minimal_be_has_no_leading_zero(value in any::<u64>()) {
            let bytes = minimal_be_bytes(value);
            prop_assert_ne!(bytes.first(), Some(&0u8));
            prop_assert_eq!(decode_minimal_be(&bytes), Ok(value));
        }
    }
}
