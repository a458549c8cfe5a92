//! Large object materialization

use crate::ibase::BlobId;
use rsdbal_core::Error;

/// Seam over the native client's blob API.
///
/// Mirrors the isc_open_blob / isc_blob_info / isc_get_segment /
/// isc_close_blob call sequence of the firebird client library.
pub trait BlobApi {
    type Handle;

    /// Open a stream over the object identified by `id`.
    fn open(&mut self, id: BlobId) -> Result<Self::Handle, Error>;

    /// Total length the object declares for itself.
    fn total_len(&mut self, handle: &mut Self::Handle) -> Result<usize, Error>;

    /// Read the next segment, returning the number of bytes produced.
    /// Zero means the stream is exhausted.
    fn read_segment(&mut self, handle: &mut Self::Handle, buf: &mut [u8]) -> Result<usize, Error>;

    fn close(&mut self, handle: Self::Handle) -> Result<(), Error>;
}

/// Read the full declared content of a large object into `out`.
///
/// The stream is closed on every path. Fails with a short-read error
/// when the stream ends before the declared length was produced; `out`
/// then holds what was read.
pub fn materialize_blob<A: BlobApi>(
    api: &mut A,
    id: BlobId,
    out: &mut Vec<u8>,
) -> Result<usize, Error> {
    let mut handle = api.open(id)?;

    let read = read_segments(api, &mut handle, out);
    let closed = api.close(handle);

    let expected = read?;
    closed?;

    if out.len() < expected {
        return Err(Error::ShortRead {
            read: out.len(),
            expected,
        });
    }

    Ok(out.len())
}

fn read_segments<A: BlobApi>(
    api: &mut A,
    handle: &mut A::Handle,
    out: &mut Vec<u8>,
) -> Result<usize, Error> {
    let expected = api.total_len(handle)?;

    out.clear();
    out.reserve(expected);

    let mut segment = [0u8; 255];
    loop {
        let n = api.read_segment(handle, &mut segment)?;
        if n == 0 {
            break;
        }
        out.extend_from_slice(&segment[..n]);
        if out.len() >= expected {
            break;
        }
    }

    Ok(expected)
}

#[cfg(test)]
mod test {
    use super::*;

    /// In-memory stream, optionally lying about its length
    struct FakeBlobs {
        content: Vec<u8>,
        declared_extra: usize,
        open_handles: usize,
        closed: usize,
    }

    impl FakeBlobs {
        fn new(content: &[u8]) -> Self {
            FakeBlobs {
                content: content.to_vec(),
                declared_extra: 0,
                open_handles: 0,
                closed: 0,
            }
        }
    }

    impl BlobApi for FakeBlobs {
        type Handle = usize;

        fn open(&mut self, _id: BlobId) -> Result<usize, Error> {
            self.open_handles += 1;
            Ok(0)
        }

        fn total_len(&mut self, _handle: &mut usize) -> Result<usize, Error> {
            Ok(self.content.len() + self.declared_extra)
        }

        fn read_segment(&mut self, handle: &mut usize, buf: &mut [u8]) -> Result<usize, Error> {
            let rest = &self.content[*handle..];
            let n = rest.len().min(buf.len());
            buf[..n].copy_from_slice(&rest[..n]);
            *handle += n;
            Ok(n)
        }

        fn close(&mut self, _handle: usize) -> Result<(), Error> {
            self.closed += 1;
            Ok(())
        }
    }

    #[test]
    fn reads_the_full_declared_length() -> Result<(), Error> {
        let content: Vec<u8> = (0..1000).map(|i| (i % 251) as u8).collect();
        let mut api = FakeBlobs::new(&content);
        let mut out = Vec::new();

        let n = materialize_blob(&mut api, BlobId::default(), &mut out)?;

        assert_eq!(content.len(), n);
        assert_eq!(content, out);
        assert_eq!(1, api.closed);

        Ok(())
    }

    #[test]
    fn short_stream_is_an_error_but_still_closed() {
        let mut api = FakeBlobs::new(b"only this");
        api.declared_extra = 5;
        let mut out = Vec::new();

        let err = materialize_blob(&mut api, BlobId::default(), &mut out).unwrap_err();

        match err {
            Error::ShortRead { read, expected } => {
                assert_eq!(9, read);
                assert_eq!(14, expected);
            }
            other => panic!("expected a short read, got {:?}", other),
        }
        assert_eq!(1, api.closed);
    }
}
