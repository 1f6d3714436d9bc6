use super::*;
use std::cell::RefCell;

/// One outgoing point-to-point message, payload kept as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub dst: usize,
    pub tag: Tag,
    pub bytes: Vec<u8>,
}

impl SentMessage {
    pub fn values(&self) -> Vec<f64> {
        self.bytes
            .chunks_exact(std::mem::size_of::<f64>())
            .map(bytemuck::pod_read_unaligned::<f64>)
            .collect()
    }
}

/// Wraps a transport and logs every boundary message it sends.
pub struct RecordingTransport<T> {
    inner: T,
    sent: RefCell<Vec<SentMessage>>,
}

impl<T: Transport> RecordingTransport<T> {
    pub fn new(inner: T) -> Self {
        RecordingTransport {
            inner,
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn into_parts(self) -> (T, Vec<SentMessage>) {
        (self.inner, self.sent.into_inner())
    }
}

impl<T: Transport> Transport for RecordingTransport<T> {
    fn rank(&self) -> usize {
        self.inner.rank()
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn send(&self, dst: usize, tag: Tag, values: &[f64]) -> Result<(), TransportError> {
        self.sent.borrow_mut().push(SentMessage {
            dst,
            tag,
            bytes: bytemuck::cast_slice(values).to_vec(),
        });
        self.inner.send(dst, tag, values)
    }

    fn recv(&self, src: usize, tag: Tag, values: &mut [f64]) -> Result<(), TransportError> {
        self.inner.recv(src, tag, values)
    }

    fn gather(
        &self,
        root: usize,
        local: &[f64],
        out: Option<&mut [f64]>,
    ) -> Result<(), TransportError> {
        self.inner.gather(root, local, out)
    }

    fn barrier(&self) -> Result<(), TransportError> {
        self.inner.barrier()
    }
}
