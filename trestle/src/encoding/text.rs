//! Plain text encoding.
//!
//! This encoding is intended for diagnostics. The first line contains the
//! number of vertices and edges. Each vertex position follows on its own
//! line. Each edge then occupies two lines: the indices of its vertices and
//! the position of its first endpoint. Values on a line are separated by a
//! single space and reals are written in fixed notation with six decimal
//! places.
//!
//! ```text
//! 2 1
//! 0.000000 0.000000 0.000000
//! 1.000000 2.000000 3.000000
//! 0 1
//! 0.000000 0.000000 0.000000
//! ```

use std::io::{self, Write};

use crate::geometry::Vector;
use crate::shape::Shape;

pub trait ToText {
    /// Writes a text encoding to `writer`.
    ///
    /// # Errors
    ///
    /// Returns any error produced by `writer` unchanged.
    fn to_text<W>(&self, writer: W) -> io::Result<()>
    where
        W: Write;
}

impl ToText for Shape {
    fn to_text<W>(&self, mut writer: W) -> io::Result<()>
    where
        W: Write,
    {
        writeln!(writer, "{} {}", self.vertex_count(), self.edge_count())?;
        for position in self.vertices() {
            write_vector(&mut writer, position)?;
        }
        for (edge, rod) in self.edges().iter().zip(self.rods()) {
            writeln!(writer, "{} {}", edge.v1(), edge.v2())?;
            write_vector(&mut writer, &rod.end1)?;
        }
        Ok(())
    }
}

fn write_vector<W>(writer: &mut W, vector: &Vector) -> io::Result<()>
where
    W: Write,
{
    writeln!(writer, "{:.6} {:.6} {:.6}", vector.x, vector.y, vector.z)
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use crate::encoding::text::ToText;
    use crate::prelude::*;
    use crate::shape::Shape;

    #[test]
    fn encode_rod() {
        let shape = Shape::from_raw_buffers(
            vec![(0u32, 1)],
            vec![(0.0, 0.0, 0.0), (1.0, 2.0, 3.0)],
        )
        .unwrap();
        let mut text = Vec::new();
        shape.to_text(&mut text).unwrap();

        assert_eq!(
            "2 1\n\
             0.000000 0.000000 0.000000\n\
             1.000000 2.000000 3.000000\n\
             0 1\n\
             0.000000 0.000000 0.000000\n",
            String::from_utf8(text).unwrap()
        );
    }

    #[test]
    fn encode_reversed_edge() {
        let shape = Shape::from_raw_buffers(
            vec![(1u32, 0)],
            vec![(0.0, 0.0, 0.0), (-0.5, 1.0e-7, 12345.678_9)],
        )
        .unwrap();
        let mut text = Vec::new();
        shape.to_text(&mut text).unwrap();

        let text = String::from_utf8(text).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(
            vec![
                "2 1",
                "0.000000 0.000000 0.000000",
                "-0.500000 0.000000 12345.678900",
                "1 0",
                "-0.500000 0.000000 12345.678900",
            ],
            lines
        );
    }

    #[test]
    fn encode_empty() {
        let mut text = Vec::new();
        Shape::default().to_text(&mut text).unwrap();
        assert_eq!(b"0 0\n".to_vec(), text);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn error_propagates_from_writer() {
        let error = Shape::default().to_text(Broken).err().unwrap();
        assert_eq!(io::ErrorKind::BrokenPipe, error.kind());
    }
}
