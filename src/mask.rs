use crate::{PixelRun, Scalar, clamp};
use std::{fmt, io::Write};

/// Dimensions of the mask, pixels are stored in row-major order
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    /// Width of the image
    pub width: usize,
    /// Height of the image
    pub height: usize,
}

impl Shape {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Offset of the pixel in the data, `None` if it is outside of the image
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape {}x{}", self.width, self.height)
    }
}

/// Coverage image, one value in `[0, 1]` per pixel
#[derive(Clone, PartialEq)]
pub struct Mask {
    shape: Shape,
    data: Vec<Scalar>,
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask {:?} sum={:.2}", self.shape, self.sum())
    }
}

impl Mask {
    /// Empty (fully transparent) mask
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            shape: Shape::new(width, height),
            data: vec![0.0; width * height],
        }
    }

    /// Render runs into a new mask, pixels outside of the mask are ignored
    pub fn from_runs(width: usize, height: usize, runs: &[PixelRun]) -> Self {
        let mut mask = Self::new(width, height);
        mask.fill_runs(runs);
        mask
    }

    /// Overwrite pixels covered by the runs with the runs' coverage
    pub fn fill_runs(&mut self, runs: &[PixelRun]) {
        let shape = self.shape;
        for run in runs {
            for col in run.start..run.end.min(shape.width) {
                if let Some(offset) = shape.offset(run.row, col) {
                    self.data[offset] = run.coverage;
                }
            }
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn width(&self) -> usize {
        self.shape.width
    }

    pub fn height(&self) -> usize {
        self.shape.height
    }

    pub fn data(&self) -> &[Scalar] {
        &self.data
    }

    /// Coverage of the pixel, `None` if it is outside of the mask
    pub fn get(&self, row: usize, col: usize) -> Option<Scalar> {
        self.data.get(self.shape.offset(row, col)?).copied()
    }

    /// Total covered area in pixels
    pub fn sum(&self) -> Scalar {
        self.data.iter().sum()
    }

    /// Write mask as binary grayscale PGM (`P5`) image
    pub fn write_pgm(&self, mut out: impl Write) -> std::io::Result<()> {
        writeln!(out, "P5 {} {} 255", self.width(), self.height())?;
        let bytes: Vec<u8> = self
            .data
            .iter()
            .map(|value| (clamp(*value, 0.0, 1.0) * 255.0).round() as u8)
            .collect();
        out.write_all(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let shape = Shape::new(3, 2);
        assert_eq!(shape.offset(1, 2), Some(5));
        assert_eq!(shape.offset(2, 0), None);
        assert_eq!(shape.offset(0, 3), None);
        assert_eq!(Shape::new(0, 2).offset(0, 0), None);
    }

    #[test]
    fn test_from_runs() {
        let runs = [
            PixelRun::new(0, 1, 3, 1.0),
            PixelRun::new(1, 0, 1, 0.5),
            // clipped
            PixelRun::new(1, 3, 10, 0.25),
            PixelRun::new(5, 0, 4, 1.0),
        ];
        let mask = Mask::from_runs(4, 2, &runs);
        assert_eq!((mask.width(), mask.height()), (4, 2));
        assert_eq!(mask.data(), &[0.0, 1.0, 1.0, 0.0, 0.5, 0.0, 0.0, 0.25]);
        assert_eq!(mask.get(1, 0), Some(0.5));
        assert_eq!(mask.get(2, 0), None);
        assert_eq!(mask.sum(), 2.75);
    }

    #[test]
    fn test_write_pgm() -> std::io::Result<()> {
        let runs = [PixelRun::new(0, 0, 1, 1.0), PixelRun::new(1, 1, 2, 0.5)];
        let mask = Mask::from_runs(2, 2, &runs);
        let mut out = Vec::new();
        mask.write_pgm(&mut out)?;
        let header = b"P5 2 2 255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(&out[header.len()..], &[255, 0, 0, 128]);
        Ok(())
    }
}
