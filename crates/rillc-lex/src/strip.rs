//! Comment stripping.
//!
//! Copies source text with `%` comments removed. Newlines are preserved so
//! line numbers in later phases still match the original file.

use std::io::{self, BufRead, BufReader, Read, Write};

/// Copy `input` to `output` with comment bytes removed.
///
/// Everything from a `%` to the end of its line is dropped; the newline
/// itself is kept.
///
/// # Example
///
/// ```
/// let source = "a ; % note\nb2 ;\n";
/// let mut out = Vec::new();
/// rillc_lex::strip_comments(source.as_bytes(), &mut out).unwrap();
/// assert_eq!(out, b"a ; \nb2 ;\n");
/// ```
pub fn strip_comments<R: Read, W: Write>(input: R, mut output: W) -> io::Result<()> {
    let reader = BufReader::new(input);
    let mut in_comment = false;
    for byte in reader.bytes() {
        let byte = byte?;
        match byte {
            b'%' => in_comment = true,
            b'\n' => {
                in_comment = false;
                output.write_all(&[b'\n'])?;
            }
            _ if in_comment => {}
            _ => output.write_all(&[byte])?,
        }
    }
    Ok(())
}
