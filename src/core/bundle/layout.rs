//! Batch import bundle layout on disk
//!
//! ```text
//! <output_dir>/<padded-pub-id>/
//!     dublin_core.xml
//!     contents
//!     <pdf filename>        (not moved in dry-run mode)
//! ```

use super::metadata::DublinCoreWriter;
use super::naming::{escape_filename, is_plain_filename};
use crate::config::ExportConfig;
use crate::domain::{DcExportError, PublicationId, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Name of the bundle manifest inside an item folder
pub const CONTENTS_FILE: &str = "contents";

/// What happened to a publication's PDF
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfDisposition {
    /// Renamed into the item folder
    Moved,
    /// Copied across filesystems, then removed from the intake directory
    Copied,
    /// Left in place because of dry-run mode
    DryRun,
}

/// Writes item bundles for one export run
#[derive(Debug, Clone)]
pub struct BundleWriter {
    output_dir: PathBuf,
    intake_dir: PathBuf,
    folder_digits: usize,
    dry_run: bool,
}

impl BundleWriter {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        intake_dir: impl Into<PathBuf>,
        folder_digits: usize,
        dry_run: bool,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            intake_dir: intake_dir.into(),
            folder_digits,
            dry_run,
        }
    }

    /// Builds a writer from export settings with an already resolved width
    pub fn from_config(config: &ExportConfig, folder_digits: usize) -> Self {
        Self::new(
            &config.output_dir,
            &config.intake_dir,
            folder_digits,
            config.dry_run,
        )
    }

    /// Item folder path for a publication
    ///
    /// # Errors
    ///
    /// Returns an export error if the identifier does not fit the folder width.
    pub fn item_dir(&self, pub_id: PublicationId) -> Result<PathBuf> {
        let name = pub_id
            .folder_name(self.folder_digits)
            .map_err(DcExportError::Export)?;
        Ok(self.output_dir.join(name))
    }

    /// Location of a PDF in the intake directory
    pub fn intake_path(&self, filename: &str) -> PathBuf {
        self.intake_dir.join(filename)
    }

    /// True if the publication's PDF is present and can be bundled
    ///
    /// Empty filenames, names that reach outside the intake directory and
    /// names that are not regular files all count as missing.
    pub fn has_pdf(&self, filename: &str) -> bool {
        is_plain_filename(filename) && self.intake_path(filename).is_file()
    }

    /// Creates the item folder if it does not exist yet
    pub fn create_item_dir(&self, pub_id: PublicationId) -> Result<PathBuf> {
        let dir = self.item_dir(pub_id)?;
        fs::create_dir_all(&dir).map_err(|e| DcExportError::io_context(dir.display(), e))?;
        Ok(dir)
    }

    /// Moves the PDF from the intake directory into the item folder
    ///
    /// Falls back to copy-and-remove when a rename is not possible, as
    /// happens when intake and output live on different filesystems.
    pub fn move_pdf(&self, item_dir: &Path, filename: &str) -> Result<PdfDisposition> {
        if self.dry_run {
            tracing::debug!(
                file = %escape_filename(filename),
                "Dry run, leaving PDF in intake directory"
            );
            return Ok(PdfDisposition::DryRun);
        }

        let source = self.intake_path(filename);
        let target = item_dir.join(filename);
        tracing::debug!(
            from = %source.display(),
            file = %escape_filename(filename),
            "Moving file"
        );

        relocate(&source, &target, |from, to| fs::rename(from, to))
    }

    /// Writes the `contents` manifest naming the PDF as the original bitstream
    pub fn write_contents(&self, item_dir: &Path, filename: &str) -> Result<()> {
        let path = item_dir.join(CONTENTS_FILE);
        fs::write(&path, format!("{filename}\tbundle:ORIGINAL\n"))
            .map_err(|e| DcExportError::io_context(path.display(), e))
    }

    /// Opens the item's `dublin_core.xml` for writing
    pub fn create_metadata(&self, item_dir: &Path) -> Result<DublinCoreWriter<BufWriter<File>>> {
        DublinCoreWriter::create(item_dir)
    }
}

/// Renames `source` to `target`, or copies and removes it if the rename fails
fn relocate<R>(source: &Path, target: &Path, rename: R) -> Result<PdfDisposition>
where
    R: FnOnce(&Path, &Path) -> io::Result<()>,
{
    let Err(rename_err) = rename(source, target) else {
        return Ok(PdfDisposition::Moved);
    };

    tracing::debug!(
        error = %rename_err,
        from = %source.display(),
        "Rename failed, copying instead"
    );
    fs::copy(source, target).map_err(|copy_err| {
        DcExportError::io_context(
            format!(
                "copying {} after rename failed ({rename_err})",
                source.display()
            ),
            copy_err,
        )
    })?;
    fs::remove_file(source).map_err(|e| DcExportError::io_context(source.display(), e))?;
    Ok(PdfDisposition::Copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn writer(root: &TempDir, dry_run: bool) -> BundleWriter {
        fs::create_dir_all(root.path().join("pdfs")).unwrap();
        BundleWriter::new(root.path().join("import"), root.path().join("pdfs"), 4, dry_run)
    }

    #[test]
    fn test_item_dir_is_padded() {
        let root = TempDir::new().unwrap();
        let bundle = writer(&root, true);
        assert_eq!(
            bundle.item_dir(PublicationId::new(7)).unwrap(),
            root.path().join("import").join("0007")
        );
        assert!(bundle.item_dir(PublicationId::new(12345)).is_err());
    }

    #[test]
    fn test_create_item_dir_is_idempotent() {
        let root = TempDir::new().unwrap();
        let bundle = writer(&root, true);
        let first = bundle.create_item_dir(PublicationId::new(3)).unwrap();
        let second = bundle.create_item_dir(PublicationId::new(3)).unwrap();
        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[test]
    fn test_has_pdf() {
        let root = TempDir::new().unwrap();
        let bundle = writer(&root, true);
        fs::write(root.path().join("pdfs").join("a.pdf"), b"%PDF").unwrap();
        fs::create_dir(root.path().join("pdfs").join("folder.pdf")).unwrap();

        assert!(bundle.has_pdf("a.pdf"));
        assert!(!bundle.has_pdf("b.pdf"));
        assert!(!bundle.has_pdf(""));
        assert!(!bundle.has_pdf("folder.pdf"));
        assert!(!bundle.has_pdf("../pdfs/a.pdf"));
    }

    #[test]
    fn test_move_pdf() {
        let root = TempDir::new().unwrap();
        let bundle = writer(&root, false);
        fs::write(root.path().join("pdfs").join("my paper (v2).pdf"), b"%PDF-1.4").unwrap();
        let dir = bundle.create_item_dir(PublicationId::new(1)).unwrap();

        let disposition = bundle.move_pdf(&dir, "my paper (v2).pdf").unwrap();

        assert_eq!(disposition, PdfDisposition::Moved);
        assert!(!root.path().join("pdfs").join("my paper (v2).pdf").exists());
        assert_eq!(fs::read(dir.join("my paper (v2).pdf")).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_move_pdf_dry_run_leaves_file() {
        let root = TempDir::new().unwrap();
        let bundle = writer(&root, true);
        fs::write(root.path().join("pdfs").join("a.pdf"), b"%PDF").unwrap();
        let dir = bundle.create_item_dir(PublicationId::new(1)).unwrap();

        assert_eq!(bundle.move_pdf(&dir, "a.pdf").unwrap(), PdfDisposition::DryRun);
        assert!(root.path().join("pdfs").join("a.pdf").exists());
        assert!(!dir.join("a.pdf").exists());
    }

    #[test]
    fn test_relocate_copies_when_rename_fails() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("a.pdf");
        let target = root.path().join("moved.pdf");
        fs::write(&source, b"%PDF-1.4").unwrap();

        let disposition = relocate(&source, &target, |_, _| {
            Err(io::Error::from_raw_os_error(18))
        })
        .unwrap();

        assert_eq!(disposition, PdfDisposition::Copied);
        assert!(!source.exists());
        assert_eq!(fs::read(&target).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_move_pdf_reports_copy_error() {
        let root = TempDir::new().unwrap();
        let bundle = writer(&root, false);
        fs::write(root.path().join("pdfs").join("a.pdf"), b"%PDF").unwrap();
        let dir = bundle.create_item_dir(PublicationId::new(1)).unwrap();
        // A non-empty directory in the target's place defeats rename and copy
        fs::create_dir(dir.join("a.pdf")).unwrap();
        fs::write(dir.join("a.pdf").join("keep"), b"x").unwrap();

        let err = bundle.move_pdf(&dir, "a.pdf").unwrap_err();

        let message = err.to_string();
        assert!(matches!(err, DcExportError::Io(_)));
        assert!(message.contains("copying"), "{message}");
        assert!(message.contains("after rename failed"), "{message}");
        assert!(root.path().join("pdfs").join("a.pdf").exists());
        assert!(dir.join("a.pdf").join("keep").exists());
    }

    #[test]
    fn test_move_missing_pdf_fails() {
        let root = TempDir::new().unwrap();
        let bundle = writer(&root, false);
        let dir = bundle.create_item_dir(PublicationId::new(1)).unwrap();
        assert!(bundle.move_pdf(&dir, "gone.pdf").is_err());
    }

    #[test]
    fn test_write_contents() {
        let root = TempDir::new().unwrap();
        let bundle = writer(&root, true);
        let dir = bundle.create_item_dir(PublicationId::new(7)).unwrap();

        bundle.write_contents(&dir, "a.pdf").unwrap();

        assert_eq!(
            fs::read_to_string(dir.join(CONTENTS_FILE)).unwrap(),
            "a.pdf\tbundle:ORIGINAL\n"
        );
    }
}
