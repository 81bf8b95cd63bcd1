#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use lopdf::{dictionary, Document, Object, Stream};
use pdf_shrink::{CompressError, ToolRunner};

/// Writes a one-page PDF whose content stream holds `filler` bytes.
pub fn write_pdf(path: &Path, filler: usize) {
    build_pdf(filler).save(path).unwrap();
}

/// Writes a PDF whose trailer carries a standard security handler.
pub fn write_encrypted_pdf(path: &Path) {
    let mut doc = build_pdf(1_000);
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "P" => -4,
    });
    doc.trailer.set("Encrypt", encrypt_id);
    doc.save(path).unwrap();
}

fn build_pdf(filler: usize) -> Document {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(dictionary! {}, vec![b' '; filler]));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

pub fn is_valid_pdf(path: &Path) -> bool {
    Document::load(path).is_ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
}

/// Scripted stand-in for gs, pdfimages and img2pdf.
pub struct FakeTools {
    pub calls: RefCell<Vec<Call>>,
    /// Filler bytes written by gs, keyed by `-dPDFSETTINGS` directive.
    pub gs_filler: HashMap<&'static str, usize>,
    pub gs_fails: bool,
    /// gs exits 0 without writing its output.
    pub gs_silent: bool,
    /// Images written by each pdfimages call.
    pub images: usize,
    /// Filler bytes written by the n-th img2pdf call; the last entry repeats.
    pub img2pdf_filler: Vec<usize>,
    pub img2pdf_fails: bool,
    /// img2pdf exits 0 without writing its output.
    pub img2pdf_silent: bool,
}

impl Default for FakeTools {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            gs_filler: HashMap::new(),
            gs_fails: false,
            gs_silent: false,
            images: 2,
            img2pdf_filler: vec![1_000],
            img2pdf_fails: false,
            img2pdf_silent: false,
        }
    }
}

impl FakeTools {
    pub fn calls_to(&self, program: &str) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.program == program)
            .cloned()
            .collect()
    }

    fn fail(program: &str) -> CompressError {
        CompressError::ToolFailed {
            program: program.to_string(),
            code: Some(1),
        }
    }

    fn ghostscript(&self, args: &[String]) -> pdf_shrink::Result<()> {
        if self.gs_fails {
            return Err(Self::fail("gs"));
        }
        if self.gs_silent {
            return Ok(());
        }
        let output = args
            .iter()
            .find_map(|a| a.strip_prefix("-sOutputFile="))
            .expect("gs called without -sOutputFile");
        let directive = args
            .iter()
            .find_map(|a| a.strip_prefix("-dPDFSETTINGS="))
            .expect("gs called without -dPDFSETTINGS");
        let input = args.last().expect("gs called without input");
        assert!(Path::new(input).exists(), "gs input missing: {input}");

        let filler = self.gs_filler.get(directive).copied().unwrap_or(1_000);
        write_pdf(Path::new(output), filler);
        Ok(())
    }

    fn pdfimages(&self, args: &[String]) -> pdf_shrink::Result<()> {
        assert_eq!(args.len(), 3);
        assert_eq!(args[0], "-png");
        assert!(Path::new(&args[1]).exists(), "pdfimages input missing");
        for i in 0..self.images {
            let shade = (i * 40 % 256) as u8;
            RgbaImage::from_pixel(12, 12, Rgba([shade, 80, 160, 200]))
                .save(format!("{}-{:03}.png", args[2], i))
                .unwrap();
        }
        Ok(())
    }

    fn img2pdf(&self, args: &[String]) -> pdf_shrink::Result<()> {
        if self.img2pdf_fails {
            return Err(Self::fail("img2pdf"));
        }
        if self.img2pdf_silent {
            return Ok(());
        }
        let split = args
            .iter()
            .position(|a| a == "-o")
            .expect("img2pdf called without -o");
        let images = &args[..split];
        if images.is_empty() {
            return Err(Self::fail("img2pdf"));
        }
        for image in images {
            let bytes = std::fs::read(image).map_err(CompressError::Io)?;
            assert!(bytes.starts_with(&[0xFF, 0xD8]), "{image} is not a JPEG");
        }

        let n = self.calls_to("img2pdf").len() - 1;
        let filler = self
            .img2pdf_filler
            .get(n)
            .or(self.img2pdf_filler.last())
            .copied()
            .unwrap_or(1_000);
        write_pdf(Path::new(&args[split + 1]), filler);
        Ok(())
    }
}

impl ToolRunner for FakeTools {
    fn run(&self, program: &str, args: &[OsString]) -> pdf_shrink::Result<()> {
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        self.calls.borrow_mut().push(Call {
            program: program.to_string(),
            args: args.clone(),
        });

        match program {
            "gs" => self.ghostscript(&args),
            "pdfimages" => self.pdfimages(&args),
            "img2pdf" => self.img2pdf(&args),
            other => Err(CompressError::ToolNotFound {
                program: other.to_string(),
            }),
        }
    }
}

/// A working directory holding an input PDF.
pub struct Workspace {
    pub dir: tempfile::TempDir,
    pub scratch_root: tempfile::TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    pub fn with_input(filler: usize) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.pdf");
        write_pdf(&input, filler);
        Self::finish(dir, input)
    }

    pub fn with_raw_input(bytes: &[u8]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.pdf");
        std::fs::write(&input, bytes).unwrap();
        Self::finish(dir, input)
    }

    fn finish(dir: tempfile::TempDir, input: PathBuf) -> Self {
        let output = dir.path().join("output.pdf");
        Self {
            dir,
            scratch_root: tempfile::tempdir().unwrap(),
            input,
            output,
        }
    }

    pub fn options(&self) -> pdf_shrink::CompressOptions {
        let mut options = pdf_shrink::CompressOptions::new(&self.input, &self.output);
        options.tools.ghostscript = "gs".to_string();
        options.scratch_root = Some(self.scratch_root.path().to_path_buf());
        options
    }

    pub fn scratch_is_empty(&self) -> bool {
        std::fs::read_dir(self.scratch_root.path()).unwrap().count() == 0
    }

    /// Files left in the working directory (no staged leftovers expected).
    pub fn file_count(&self) -> usize {
        std::fs::read_dir(self.dir.path()).unwrap().count()
    }
}

/// Bytes to megabytes, for targets expressed relative to filler sizes.
pub fn mb(bytes: usize) -> f64 {
    bytes as f64 / 1_048_576.0
}
