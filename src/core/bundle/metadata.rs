//! `dublin_core.xml` writer
//!
//! A [`DublinCoreWriter`] owns the output for one publication's metadata
//! from header to footer. The handle is released when the writer is finished
//! or dropped, including on early returns.

use crate::core::dublin_core::DublinCoreField;
use crate::domain::{DcExportError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Name of the metadata file inside an item folder
pub const METADATA_FILE: &str = "dublin_core.xml";

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<dublin_core>\n";
const XML_FOOTER: &str = "</dublin_core>\n";

/// Streaming writer for one `dublin_core` document
pub struct DublinCoreWriter<W: Write> {
    out: W,
    label: String,
    written: usize,
    suppressed: usize,
}

impl DublinCoreWriter<BufWriter<File>> {
    /// Creates (or truncates) `<dir>/dublin_core.xml` and writes the header
    ///
    /// # Errors
    ///
    /// Returns an I/O error naming the file if it cannot be created.
    pub fn create(dir: &Path) -> Result<Self> {
        let path: PathBuf = dir.join(METADATA_FILE);
        let file = File::create(&path)
            .map_err(|e| DcExportError::io_context(path.display(), e))?;
        Self::new(BufWriter::new(file), path.display().to_string())
    }
}

impl<W: Write> DublinCoreWriter<W> {
    /// Wraps any writer and emits the XML declaration and root element
    pub fn new(mut out: W, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        out.write_all(XML_HEADER.as_bytes())
            .map_err(|e| DcExportError::io_context(&label, e))?;
        Ok(Self {
            out,
            label,
            written: 0,
            suppressed: 0,
        })
    }

    /// Writes one field; returns false if the field was suppressed
    pub fn write_field(&mut self, field: &DublinCoreField) -> Result<bool> {
        match field.to_xml_line() {
            Some(line) => {
                self.out
                    .write_all(line.as_bytes())
                    .map_err(|e| DcExportError::io_context(&self.label, e))?;
                self.written += 1;
                Ok(true)
            }
            None => {
                self.suppressed += 1;
                Ok(false)
            }
        }
    }

    pub fn write_fields<'a, I>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a DublinCoreField>,
    {
        for field in fields {
            self.write_field(field)?;
        }
        Ok(())
    }

    /// Number of `dcvalue` elements written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Number of fields skipped as empty or `"0"`
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    /// Closes the root element, flushes, and hands back the writer
    pub fn finish(mut self) -> Result<W> {
        self.out
            .write_all(XML_FOOTER.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| DcExportError::io_context(&self.label, e))?;
        Ok(self.out)
    }
}
