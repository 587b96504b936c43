//! Frame codec: unsigned varint length prefix followed by a protobuf
//! payload.
//!
//! ```text
//! ┌────────────────┬──────────────────────┐
//! │ varint(len)    │ serialized message   │
//! │ 1-10 bytes     │ exactly `len` bytes  │
//! └────────────────┴──────────────────────┘
//! ```
//!
//! [`encode_frame`] produces one frame; [`FrameReader`] turns a byte
//! stream into a lazy, ordered sequence of decoded messages. Both are
//! generic over [`prost::Message`], so the same codec serves every schema
//! snapshot and both directions of the wire.

use std::marker::PhantomData;

use bytes::{Bytes, BytesMut};
use prost::Message;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{AbciError, Result};

/// Longest legal length prefix: a 64-bit varint never exceeds 10 bytes.
pub const MAX_VARINT_LEN: usize = 10;

/// Default maximum frame length (1 GiB).
pub const DEFAULT_MAX_FRAME_LEN: u64 = 1_073_741_824;

/// Serialize `message` and prepend its varint-encoded byte length.
///
/// Pure function, no side effects. Fails only if the message violates the
/// wire format's structural limits.
pub fn encode_frame<M: Message>(message: &M) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(message.encoded_len() + MAX_VARINT_LEN);
    message.encode_length_delimited(&mut buf)?;
    Ok(buf.freeze())
}

/// Lazy reader of length-prefixed messages from a byte stream.
///
/// Each call to [`next`](Self::next) blocks until a full frame arrives,
/// the stream ends, or an error occurs:
///
/// - `None`: clean end-of-input exactly at a frame boundary.
/// - `Some(Err(TruncatedFrame))`: the stream ended mid-varint or
///   mid-payload.
/// - `Some(Err(FrameTooLarge))`: the prefix declared more than the
///   configured limit; the payload is not read.
/// - `Some(Err(Decode))`: the payload failed structural parsing.
///
/// The sequence is ordered and non-restartable: a new stream position
/// requires a new reader. There are no implicit retries.
pub struct FrameReader<R, M> {
    reader: R,
    max_frame_len: u64,
    _message: PhantomData<fn() -> M>,
}

impl<R, M> FrameReader<R, M>
where
    R: AsyncRead + Unpin,
    M: Message + Default,
{
    /// Create a reader with the default frame length limit.
    pub fn new(reader: R) -> Self {
        Self::with_max_frame_len(reader, DEFAULT_MAX_FRAME_LEN)
    }

    /// Create a reader with a custom frame length limit.
    pub fn with_max_frame_len(reader: R, max_frame_len: u64) -> Self {
        Self {
            reader,
            max_frame_len,
            _message: PhantomData,
        }
    }

    /// Read and decode the next frame.
    pub async fn next(&mut self) -> Option<Result<M>> {
        let len = match self.read_length_prefix().await {
            Some(Ok(len)) => len,
            Some(Err(e)) => return Some(Err(e)),
            None => return None,
        };

        if len > self.max_frame_len {
            return Some(Err(AbciError::FrameTooLarge {
                len,
                max: self.max_frame_len,
            }));
        }

        let mut payload = vec![0u8; len as usize];
        if let Err(e) = self.reader.read_exact(&mut payload).await {
            return Some(Err(if e.kind() == std::io::ErrorKind::UnexpectedEof {
                AbciError::TruncatedFrame
            } else {
                AbciError::Io(e)
            }));
        }

        Some(M::decode(payload.as_slice()).map_err(AbciError::from))
    }

    /// Read the varint length prefix one byte at a time.
    ///
    /// `None` means the stream ended before the first prefix byte, i.e. a
    /// clean frame boundary.
    async fn read_length_prefix(&mut self) -> Option<Result<u64>> {
        let mut value = 0u64;

        for i in 0..MAX_VARINT_LEN {
            let byte = match self.reader.read_u8().await {
                Ok(byte) => byte,
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    return if i == 0 {
                        None
                    } else {
                        Some(Err(AbciError::TruncatedFrame))
                    };
                }
                Err(e) => return Some(Err(AbciError::Io(e))),
            };

            // The tenth byte can only carry bit 63; anything above that
            // does not fit in a u64 length.
            if i == MAX_VARINT_LEN - 1 && byte > 0x01 {
                return Some(Err(AbciError::Protocol(
                    "length prefix varint exceeds 64 bits".to_string(),
                )));
            }

            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return Some(Ok(value));
            }
        }

        Some(Err(AbciError::Protocol(
            "length prefix varint exceeds 10 bytes".to_string(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{request, Request, RequestEcho};

    fn echo_request(message: &str) -> Request {
        Request {
            value: Some(request::Value::Echo(RequestEcho {
                message: message.to_string(),
            })),
        }
    }

    #[test]
    fn test_encode_frame_prefixes_exact_length() {
        let request = echo_request("hello");
        let frame = encode_frame(&request).unwrap();

        // Short frame, so the prefix is a single varint byte.
        let payload_len = frame[0] as usize;
        assert_eq!(frame.len(), 1 + payload_len);
        assert_eq!(payload_len, request.encoded_len());
    }

    #[tokio::test]
    async fn test_single_frame_roundtrip() {
        let original = echo_request("hello");
        let frame = encode_frame(&original).unwrap();

        let mut reader = FrameReader::<_, Request>::new(&frame[..]);

        let decoded = reader.next().await.unwrap().unwrap();
        assert_eq!(decoded, original);
        assert!(reader.next().await.is_none());
    }

    #[tokio::test]
    async fn test_concatenated_frames_decode_in_order() {
        let originals: Vec<Request> = (0..5)
            .map(|i| echo_request(&format!("message_{}", i)))
            .collect();

        let mut stream = Vec::new();
        for request in &originals {
            stream.extend_from_slice(&encode_frame(request).unwrap());
        }

        let mut reader = FrameReader::<_, Request>::new(stream.as_slice());
        for original in &originals {
            let decoded = reader.next().await.unwrap().unwrap();
            assert_eq!(&decoded, original);
        }
        assert!(reader.next().await.is_none());
    }

    #[tokio::test]
    async fn test_empty_stream_ends_cleanly() {
        let mut reader = FrameReader::<_, Request>::new(&[][..]);
        assert!(reader.next().await.is_none());
    }

    #[tokio::test]
    async fn test_eof_mid_varint_is_truncation() {
        // Continuation bit set on the last available byte.
        let stream: &[u8] = &[0x80];
        let mut reader = FrameReader::<_, Request>::new(stream);

        let err = reader.next().await.unwrap().unwrap_err();
        assert!(matches!(err, AbciError::TruncatedFrame));
    }

    #[tokio::test]
    async fn test_eof_mid_payload_is_truncation() {
        let frame = encode_frame(&echo_request("truncate me")).unwrap();
        let cut = &frame[..frame.len() - 3];

        let mut reader = FrameReader::<_, Request>::new(cut);

        let err = reader.next().await.unwrap().unwrap_err();
        assert!(matches!(err, AbciError::TruncatedFrame));
    }

    #[tokio::test]
    async fn test_declared_length_past_stream_end_is_truncation() {
        // Prefix claims 100 bytes, only 3 follow before the stream closes.
        let stream: &[u8] = &[100, 1, 2, 3];
        let mut reader = FrameReader::<_, Request>::new(stream);

        let err = reader.next().await.unwrap().unwrap_err();
        assert!(matches!(err, AbciError::TruncatedFrame));
    }

    #[tokio::test]
    async fn test_oversized_frame_rejected_before_read() {
        let stream: &[u8] = &[0x80, 0x08]; // declares 1024 bytes
        let mut reader = FrameReader::<_, Request>::with_max_frame_len(stream, 16);

        let err = reader.next().await.unwrap().unwrap_err();
        assert!(matches!(
            err,
            AbciError::FrameTooLarge { len: 1024, max: 16 }
        ));
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_decode_error() {
        // Valid prefix, garbage payload: field 1 with an unknown wire type 7.
        let stream: &[u8] = &[2, 0x0f, 0x00];
        let mut reader = FrameReader::<_, Request>::new(stream);

        let err = reader.next().await.unwrap().unwrap_err();
        assert!(matches!(err, AbciError::Decode(_)));
    }

    #[tokio::test]
    async fn test_overlong_varint_rejected() {
        let stream: &[u8] = &[0x80; 11];
        let mut reader = FrameReader::<_, Request>::new(stream);

        let err = reader.next().await.unwrap().unwrap_err();
        assert!(matches!(err, AbciError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_varint_overflowing_u64_rejected() {
        // Tenth byte 0x7e would drop its payload bits past bit 63.
        let mut stream = vec![0x80u8; 9];
        stream.push(0x7e);
        let mut reader = FrameReader::<_, Request>::new(stream.as_slice());

        let err = reader.next().await.unwrap().unwrap_err();
        assert!(matches!(err, AbciError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_ten_byte_varint_with_top_bit_decodes() {
        // Nine continuation bytes then 0x01 encode exactly 1 << 63, which
        // is a valid length and fails only against the frame cap.
        let mut stream = vec![0x80u8; 9];
        stream.push(0x01);
        let mut reader = FrameReader::<_, Request>::new(stream.as_slice());

        let err = reader.next().await.unwrap().unwrap_err();
        assert!(matches!(err, AbciError::FrameTooLarge { len, .. } if len == 1 << 63));
    }
}
