// Compressed input and output files
//
// The compression of a file is chosen by its last extension. Output paths
// are derived from the input path by swapping the inner extension for
// `.mse` and keeping the compression suffix.

use crate::error::Result;
use bzip2::read::MultiBzDecoder;
use bzip2::write::BzEncoder;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Extension of the model output
pub const OUTPUT_EXTENSION: &str = "mse";

/// Compression format of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Bzip2,
    Gzip,
}

impl Compression {
    /// Detect the compression from the file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("bz2") => Compression::Bzip2,
            Some("gz") | Some("gzip") => Compression::Gzip,
            _ => Compression::None,
        }
    }

    /// Suffix appended to compressed output, without the dot
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Compression::None => None,
            Compression::Bzip2 => Some("bz2"),
            Compression::Gzip => Some("gz"),
        }
    }
}

/// Derive the output path of an input fact base.
///
/// `foo.xml.bz2` becomes `foo.mse.bz2`, `foo.xml` becomes `foo.mse`.
pub fn output_path(input: &Path) -> PathBuf {
    let compression = Compression::from_path(input);
    let compression_ext = match compression {
        Compression::None => None,
        _ => input.extension().map(|e| e.to_os_string()),
    };

    let mut base = input.to_path_buf();
    if compression_ext.is_some() {
        base.set_extension("");
    }
    base.set_extension(OUTPUT_EXTENSION);

    match compression_ext {
        Some(ext) => {
            let mut name = base.into_os_string();
            name.push(".");
            name.push(ext);
            PathBuf::from(name)
        }
        None => base,
    }
}

/// Read a whole fact base, decompressing as needed
pub fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(crate::error::Error::PathNotFound(path.to_path_buf()));
    }
    let file = BufReader::new(File::open(path)?);
    let mut reader: Box<dyn Read> = match Compression::from_path(path) {
        Compression::None => Box::new(file),
        Compression::Bzip2 => Box::new(MultiBzDecoder::new(file)),
        Compression::Gzip => Box::new(MultiGzDecoder::new(file)),
    };
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

/// A possibly compressing output file
pub enum OutputSink {
    Plain(BufWriter<File>),
    Bzip2(BzEncoder<BufWriter<File>>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl OutputSink {
    /// Flush and write any compression trailer
    pub fn finish(self) -> Result<()> {
        let mut inner = match self {
            OutputSink::Plain(w) => w,
            OutputSink::Bzip2(e) => e.finish()?,
            OutputSink::Gzip(e) => e.finish()?,
        };
        inner.flush()?;
        Ok(())
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            OutputSink::Plain(w) => w.write(buf),
            OutputSink::Bzip2(e) => e.write(buf),
            OutputSink::Gzip(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            OutputSink::Plain(w) => w.flush(),
            OutputSink::Bzip2(e) => e.flush(),
            OutputSink::Gzip(e) => e.flush(),
        }
    }
}

/// Create an output file with the given compression
pub fn create_output(path: &Path, compression: Compression) -> Result<OutputSink> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = BufWriter::new(File::create(path)?);
    Ok(match compression {
        Compression::None => OutputSink::Plain(file),
        Compression::Bzip2 => {
            OutputSink::Bzip2(BzEncoder::new(file, bzip2::Compression::best()))
        }
        Compression::Gzip => {
            OutputSink::Gzip(GzEncoder::new(file, flate2::Compression::default()))
        }
    })
}
