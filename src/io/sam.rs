/// SAM text input: alignment lines and header detection
///
/// Only the fields the junction tools need are decoded:
/// 1. QNAME (read id)
/// 3. RNAME (segment)
/// 4. POS (1-based leftmost position)
/// 6. CIGAR
///
/// The raw line is kept so records can be written back unmodified.
use crate::error::Error;
use crate::io::open_text;
use std::io::BufRead;
use std::path::{Path, PathBuf};

const QNAME: usize = 0;
const RNAME: usize = 2;
const POS: usize = 3;
const CIGAR: usize = 5;

/// Largest POS allowed by the SAM format (2^31 - 1)
pub const MAX_POS: u64 = (1 << 31) - 1;

/// Check whether a SAM line is a header/metadata line
pub fn is_header(line: &str) -> bool {
    line.starts_with('@')
}

/// One alignment line, borrowed from the line buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamLine<'a> {
    pub read_id: &'a str,
    pub segment: &'a str,
    /// 1-based leftmost reference position
    pub pos: u64,
    pub cigar: &'a str,
    /// Full original line (without line terminator)
    pub raw: &'a str,
}

impl<'a> SamLine<'a> {
    /// Split an alignment line into the fields used downstream
    pub fn parse(line: &'a str) -> Result<Self, Error> {
        let mut read_id = None;
        let mut segment = None;
        let mut pos = None;
        let mut cigar = None;

        for (i, field) in line.split('\t').enumerate().take(CIGAR + 1) {
            match i {
                QNAME => read_id = Some(field),
                RNAME => segment = Some(field),
                POS => pos = Some(field),
                CIGAR => cigar = Some(field),
                _ => {}
            }
        }

        let (read_id, segment, pos, cigar) = match (read_id, segment, pos, cigar) {
            (Some(r), Some(s), Some(p), Some(c)) => (r, s, p, c),
            _ => {
                return Err(Error::Format(format!(
                    "alignment line has fewer than {} fields",
                    CIGAR + 1
                )))
            }
        };

        let pos = pos.parse::<u64>().map_err(|e| {
            Error::Format(format!("invalid position '{pos}' for read {read_id}: {e}"))
        })?;
        if pos == 0 {
            return Err(Error::Format(format!(
                "read {read_id} has no leftmost position (POS 0)"
            )));
        }
        if pos > MAX_POS {
            return Err(Error::Format(format!(
                "position {pos} for read {read_id} exceeds the SAM maximum {MAX_POS}"
            )));
        }

        Ok(Self {
            read_id,
            segment,
            pos,
            cigar,
            raw: line,
        })
    }
}

/// Line reader for SAM text files (plain or gzip compressed)
pub struct SamReader {
    inner: Box<dyn BufRead + Send>,
    path: PathBuf,
    buf: Vec<u8>,
    line_num: usize,
}

impl SamReader {
    /// Open a SAM file
    ///
    /// # Arguments
    /// * `path` - Path to SAM file, `.gz` files are decompressed
    pub fn open(path: &Path) -> Result<Self, Error> {
        Ok(Self {
            inner: open_text(path)?,
            path: path.to_path_buf(),
            buf: Vec::new(),
            line_num: 0,
        })
    }

    /// Number of lines read so far
    pub fn line_num(&self) -> usize {
        self.line_num
    }

    /// Get next line without its terminator (`\n` or `\r\n`)
    ///
    /// A line that is not valid UTF-8 is consumed and reported as
    /// [`Error::Format`] so the caller can skip it and keep reading.
    pub fn next_line(&mut self) -> Result<Option<&str>, Error> {
        self.buf.clear();
        let n = self
            .inner
            .read_until(b'\n', &mut self.buf)
            .map_err(|e| Error::io(e, &self.path))?;
        if n == 0 {
            return Ok(None);
        }
        self.line_num += 1;

        let line = self.buf.strip_suffix(b"\n").unwrap_or(&self.buf);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        std::str::from_utf8(line).map(Some).map_err(|e| {
            Error::Format(format!(
                "{}:{}: line is not valid UTF-8: {}",
                self.path.display(),
                self.line_num,
                e
            ))
        })
    }
}
