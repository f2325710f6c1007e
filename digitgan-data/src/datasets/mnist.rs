//! Reader for the IDX files the MNIST distribution ships.
//!
//! Layout: big-endian `i32` magic number, one big-endian `i32` per
//! dimension, then the `u8` payload in row-major order. Files may be stored
//! plain or gzip-compressed (`.gz`).

use super::image_dataset::ImageDataset;
use byteorder::{BigEndian, ReadBytesExt};
use digitgan_core::DigitGanError;
use flate2::read::GzDecoder;
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Magic number of an IDX3 image file.
pub const IMAGES_MAGIC: i32 = 2051;
/// Magic number of an IDX1 label file.
pub const LABELS_MAGIC: i32 = 2049;

/// Raw images read from an IDX3 file.
#[derive(Debug, Clone)]
pub struct IdxImages {
    pub count: usize,
    pub rows: usize,
    pub cols: usize,
    pub pixels: Vec<u8>,
}

/// Which half of the MNIST distribution to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnistSplit {
    Train,
    Test,
}

impl MnistSplit {
    fn prefix(self) -> &'static str {
        match self {
            MnistSplit::Train => "train",
            MnistSplit::Test => "t10k",
        }
    }

    /// File name of the image file, without `.gz`.
    pub fn images_file(self) -> String {
        format!("{}-images-idx3-ubyte", self.prefix())
    }

    /// File name of the label file, without `.gz`.
    pub fn labels_file(self) -> String {
        format!("{}-labels-idx1-ubyte", self.prefix())
    }
}

/// Maps a raw pixel to [-1, 1]: `p/255` then `(x - 0.5) / 0.5`.
pub fn normalize_pixel(pixel: u8) -> f32 {
    (pixel as f32 / 255.0 - 0.5) / 0.5
}

fn read_header<R: Read>(reader: &mut R, magic: i32, ndims: usize) -> Result<Vec<usize>, DigitGanError> {
    let found = reader.read_i32::<BigEndian>()?;
    if found != magic {
        return Err(DigitGanError::DatasetError(format!(
            "bad IDX magic number: expected {}, found {}",
            magic, found
        )));
    }
    let mut dims = Vec::with_capacity(ndims);
    for _ in 0..ndims {
        let dim = reader.read_i32::<BigEndian>()?;
        let dim = usize::try_from(dim).map_err(|_| {
            DigitGanError::DatasetError(format!("negative IDX dimension {}", dim))
        })?;
        dims.push(dim);
    }
    Ok(dims)
}

/// Upper bound on the bytes reserved before the payload is actually read.
const MAX_PREALLOC: usize = 1 << 20;

fn read_payload<R: Read>(reader: &mut R, expected: usize) -> Result<Vec<u8>, DigitGanError> {
    // The header is untrusted; the buffer grows only with bytes really read
    let mut payload = Vec::with_capacity(expected.min(MAX_PREALLOC));
    reader.take(expected as u64).read_to_end(&mut payload)?;
    if payload.len() != expected {
        return Err(DigitGanError::DatasetError(format!(
            "truncated IDX payload: expected {} bytes, found {}",
            expected,
            payload.len()
        )));
    }
    Ok(payload)
}

/// Reads an IDX3 image file.
///
/// # Errors
/// `DatasetError` on a wrong magic number, a negative or overflowing
/// dimension, or a short payload. `Io` if the header cannot be read.
pub fn read_idx_images<R: Read>(mut reader: R) -> Result<IdxImages, DigitGanError> {
    let dims = read_header(&mut reader, IMAGES_MAGIC, 3)?;
    let (count, rows, cols) = (dims[0], dims[1], dims[2]);
    let expected = count
        .checked_mul(rows)
        .and_then(|n| n.checked_mul(cols))
        .ok_or_else(|| {
            DigitGanError::DatasetError(format!(
                "IDX image dimensions {}x{}x{} overflow",
                count, rows, cols
            ))
        })?;
    let pixels = read_payload(&mut reader, expected)?;
    Ok(IdxImages {
        count,
        rows,
        cols,
        pixels,
    })
}

/// Reads an IDX1 label file.
pub fn read_idx_labels<R: Read>(mut reader: R) -> Result<Vec<u8>, DigitGanError> {
    let dims = read_header(&mut reader, LABELS_MAGIC, 1)?;
    read_payload(&mut reader, dims[0])
}

/// Opens `dir/name`, falling back to the gzip-compressed `dir/name.gz`.
fn open_idx(dir: &Path, name: &str) -> Result<Box<dyn Read>, DigitGanError> {
    let plain = dir.join(name);
    if plain.is_file() {
        debug!("Reading {}", plain.display());
        return Ok(Box::new(BufReader::new(File::open(plain)?)));
    }
    let gz: PathBuf = dir.join(format!("{}.gz", name));
    if gz.is_file() {
        debug!("Reading {}", gz.display());
        return Ok(Box::new(GzDecoder::new(BufReader::new(File::open(gz)?))));
    }
    Err(DigitGanError::DatasetError(format!(
        "neither {} nor {} exists",
        plain.display(),
        gz.display()
    )))
}

/// Loads one MNIST split from `dir` as a normalised [`ImageDataset`].
///
/// Every image is flattened to `rows * cols` values in [-1, 1].
pub fn load_mnist<P: AsRef<Path>>(dir: P, split: MnistSplit) -> Result<ImageDataset, DigitGanError> {
    let dir = dir.as_ref();
    let images = read_idx_images(open_idx(dir, &split.images_file())?)?;
    let labels = read_idx_labels(open_idx(dir, &split.labels_file())?)?;
    if images.count != labels.len() {
        return Err(DigitGanError::DatasetError(format!(
            "{} images but {} labels",
            images.count,
            labels.len()
        )));
    }
    debug!(
        "Loaded {} MNIST {:?} images of {}x{}",
        images.count, split, images.rows, images.cols
    );
    let pixels = images.pixels.iter().map(|&p| normalize_pixel(p)).collect();
    ImageDataset::new(pixels, labels, images.rows * images.cols)
}

#[cfg(test)]
#[path = "mnist_test.rs"]
mod tests;
