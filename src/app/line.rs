//! Line accumulator for console input.
//!
//! Collects bytes from the serial transport into [`CommandLine`]s.  The
//! buffer is fixed-size: once [`LINE_CAPACITY`] bytes are held, further
//! bytes are dropped until the terminator arrives, and the truncated line
//! is still dispatched.  Every byte other than a terminator is kept, so
//! a line of control or non-ASCII bytes still reaches the dispatcher and
//! gets an "Unknown command" reply.

use crate::config::LINE_CAPACITY;

/// One completed command line: raw bytes, never empty, never holding a
/// terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    bytes: heapless::Vec<u8, LINE_CAPACITY>,
}

impl CommandLine {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lossy text form: bytes outside printable ASCII become `?`.
    pub fn text(&self) -> heapless::String<LINE_CAPACITY> {
        let mut out = heapless::String::new();
        for &b in &self.bytes {
            let c = if (0x20..=0x7E).contains(&b) { b as char } else { '?' };
            // Same capacity as the byte buffer, one char per byte.
            let _ = out.push(c);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Byte-at-a-time line assembler.
pub struct LineAccumulator {
    buf: heapless::Vec<u8, LINE_CAPACITY>,
}

impl Default for LineAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl LineAccumulator {
    pub const fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
        }
    }

    /// Feed one byte; returns a line when `\n` or `\r` ends a non-empty one.
    ///
    /// A terminator on an empty buffer is ignored, so CRLF endings and
    /// keep-alive newlines never produce blank commands.
    pub fn feed(&mut self, byte: u8) -> Option<CommandLine> {
        match byte {
            b'\n' | b'\r' => {
                if self.buf.is_empty() {
                    return None;
                }
                let bytes = core::mem::take(&mut self.buf);
                Some(CommandLine { bytes })
            }
            _ => {
                // Full buffer: drop the byte, keep the prefix.
                let _ = self.buf.push(byte);
                None
            }
        }
    }

    /// Bytes held for the line in progress.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}
