/// Junction table output (CSV)
///
/// Layout matches a pandas `DataFrame.to_csv` dump of the rows:
/// 1. header `,0,1,...,k` (blank index label, then column numbers)
/// 2. one line per record, prefixed by a running row index
///
/// Missing values are empty fields. Fields containing a comma, quote or
/// line break are quoted, with embedded quotes doubled.
use super::{GapFamily, JunctionRecord};
use crate::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Streaming writer for junction tables
pub struct JunctionTableWriter<W: Write> {
    inner: W,
    n_columns: usize,
    next_row: usize,
}

impl<W: Write> JunctionTableWriter<W> {
    /// Create a writer and emit the header line
    pub fn new(mut inner: W, family: GapFamily) -> std::io::Result<Self> {
        let n_columns = family.n_columns();
        let header: Vec<String> = (0..n_columns).map(|i| i.to_string()).collect();
        writeln!(inner, ",{}", header.join(","))?;
        Ok(Self {
            inner,
            n_columns,
            next_row: 0,
        })
    }

    /// Append one record
    pub fn write_record(&mut self, record: &JunctionRecord) -> std::io::Result<()> {
        let fields = record.fields();
        debug_assert_eq!(fields.len(), self.n_columns);

        write!(self.inner, "{}", self.next_row)?;
        for field in &fields {
            match field {
                Some(value) => write!(self.inner, ",{}", quote(value))?,
                None => write!(self.inner, ",")?,
            }
        }
        writeln!(self.inner)?;
        self.next_row += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn rows(&self) -> usize {
        self.next_row
    }

    /// Flush and return the underlying writer
    pub fn finish(mut self) -> std::io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

fn quote(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\"")).into()
    } else {
        value.into()
    }
}

/// Write a complete junction table to `path`
///
/// # Returns
/// Number of rows written
pub fn write_table<'a>(
    path: &Path,
    family: GapFamily,
    records: impl IntoIterator<Item = &'a JunctionRecord>,
) -> Result<usize, Error> {
    let file = File::create(path).map_err(|e| Error::io(e, path))?;
    let mut writer =
        JunctionTableWriter::new(BufWriter::new(file), family).map_err(|e| Error::io(e, path))?;

    for record in records {
        writer
            .write_record(record)
            .map_err(|e| Error::io(e, path))?;
    }

    let rows = writer.rows();
    writer.finish().map_err(|e| Error::io(e, path))?;
    log::info!("Wrote {} junction rows to {}", rows, path.display());
    Ok(rows)
}
