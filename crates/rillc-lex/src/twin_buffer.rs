//! Twin-buffer character source.
//!
//! The scanner never touches the input reader directly. It pulls bytes from
//! a [`TwinBuffer`], which keeps two fixed-size halves and refills the
//! inactive half while the scanner works through the active one. The buffer
//! tracks the current source line, supports bounded retraction (the scanner
//! over-reads by up to three bytes when disambiguating operators), and can
//! produce the current lexeme, the byte range between the last commit and
//! the read position.
//!
//! Invariants:
//!
//! - a lexeme spans at most one half boundary and never exceeds
//!   [`BUFFER_SIZE`] bytes;
//! - retraction never crosses two half swaps;
//! - retracting over a newline un-counts it, so the line number always
//!   reflects the read position.

use std::io::{self, Read};

/// Size of each buffer half in bytes.
pub const BUFFER_SIZE: usize = 4096;

/// A sliding two-half window over a byte stream.
///
/// # Example
///
/// ```
/// use rillc_lex::twin_buffer::TwinBuffer;
///
/// let mut buf = TwinBuffer::new("ab".as_bytes()).unwrap();
/// assert_eq!(buf.next_char().unwrap(), Some(b'a'));
/// assert_eq!(buf.next_char().unwrap(), Some(b'b'));
/// assert_eq!(buf.next_char().unwrap(), None);
/// assert_eq!(buf.lexeme(), b"ab");
/// ```
pub struct TwinBuffer<R> {
    reader: R,
    halves: [Box<[u8]>; 2],
    /// Valid byte count in each half. A half shorter than
    /// [`BUFFER_SIZE`] is the final one.
    filled: [usize; 2],
    /// Half that `forward` points into.
    active: usize,
    /// Next byte to read within the active half.
    forward: usize,
    /// Half that `begin` points into.
    begin_half: usize,
    /// Start of the current lexeme within `begin_half`.
    begin: usize,
    /// Current source line (1-based), advanced on newline reads.
    line: u32,
    /// Set when a retraction crossed back over a half boundary: the
    /// inactive half still holds unconsumed bytes and must not be refilled
    /// on the next swap.
    other_is_ahead: bool,
}

impl<R: Read> TwinBuffer<R> {
    /// Create a buffer over `reader` and prime the first half.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the initial fill. Read failures are fatal
    /// to the whole scan; a short read at end of input is not an error.
    pub fn new(reader: R) -> io::Result<Self> {
        let mut buf = Self {
            reader,
            halves: [
                vec![0u8; BUFFER_SIZE].into_boxed_slice(),
                vec![0u8; BUFFER_SIZE].into_boxed_slice(),
            ],
            filled: [0, 0],
            active: 0,
            forward: 0,
            begin_half: 0,
            begin: 0,
            line: 1,
            other_is_ahead: false,
        };
        buf.filled[0] = buf.fill(0)?;
        Ok(buf)
    }

    /// Read into `half` until it is full or the reader is exhausted.
    fn fill(&mut self, half: usize) -> io::Result<usize> {
        let mut total = 0;
        while total < BUFFER_SIZE {
            let n = self.reader.read(&mut self.halves[half][total..])?;
            if n == 0 {
                break;
            }
            total += n;
        }
        Ok(total)
    }

    /// Return the next byte, or `None` once the input is exhausted.
    ///
    /// Crossing a newline increments the line count. After the end of input
    /// is reached, every further call returns `Ok(None)`.
    pub fn next_char(&mut self) -> io::Result<Option<u8>> {
        if self.forward == self.filled[self.active] {
            if self.filled[self.active] < BUFFER_SIZE {
                // Final, short half: true end of input.
                return Ok(None);
            }
            let other = 1 - self.active;
            if self.other_is_ahead {
                self.other_is_ahead = false;
            } else {
                self.filled[other] = self.fill(other)?;
            }
            self.active = other;
            self.forward = 0;
            if self.filled[other] == 0 {
                return Ok(None);
            }
        }
        let c = self.halves[self.active][self.forward];
        self.forward += 1;
        if c == b'\n' {
            self.line += 1;
        }
        Ok(Some(c))
    }

    /// Move the read position back by `k` bytes.
    ///
    /// Retracting over a newline decrements the line count. The caller must
    /// only retract bytes it actually consumed, and never past the start of
    /// the current lexeme.
    pub fn retract(&mut self, k: usize) {
        debug_assert!(k <= BUFFER_SIZE);
        for _ in 0..k {
            if self.forward == 0 {
                // Step back across the half boundary. The half we leave
                // still holds unread bytes; remember not to refill it.
                self.other_is_ahead = true;
                self.active = 1 - self.active;
                self.forward = self.filled[self.active];
            }
            self.forward -= 1;
            if self.halves[self.active][self.forward] == b'\n' {
                self.line -= 1;
            }
        }
    }

    /// The bytes of the current lexeme, `[begin, forward)`.
    ///
    /// The range spans at most one half boundary.
    pub fn lexeme(&self) -> Vec<u8> {
        if self.begin_half == self.active {
            self.halves[self.active][self.begin..self.forward].to_vec()
        } else {
            let head = &self.halves[self.begin_half][self.begin..self.filled[self.begin_half]];
            let tail = &self.halves[self.active][..self.forward];
            let mut out = Vec::with_capacity(head.len() + tail.len());
            out.extend_from_slice(head);
            out.extend_from_slice(tail);
            out
        }
    }

    /// Start the next lexeme at the current read position.
    pub fn commit(&mut self) {
        self.begin_half = self.active;
        self.begin = self.forward;
    }

    /// Current source line (1-based).
    pub fn line(&self) -> u32 {
        self.line
    }
}
