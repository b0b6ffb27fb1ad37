use crate::error::Result;
use crate::tour::Tour;
use std::io::{self, Read, Write};

/// Every `read` call made by [`read_chunks`], including the final empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadStep {
    pub n: usize,
    pub buffer: Vec<u8>,
}

impl ReadStep {
    pub fn filled(&self) -> &[u8] {
        &self.buffer[..self.n]
    }
}

/// Reads `input` through one reused buffer of `chunk` bytes until EOF.
pub fn read_chunks<R: Read>(mut input: R, chunk: usize) -> io::Result<Vec<ReadStep>> {
    let mut buffer = vec![0u8; chunk];
    let mut steps = Vec::new();
    loop {
        let n = match input.read(&mut buffer) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        steps.push(ReadStep {
            n,
            buffer: buffer.clone(),
        });
        if n == 0 {
            return Ok(steps);
        }
    }
}

pub fn readers(t: &mut Tour<'_>) -> Result<()> {
    let steps = read_chunks("Hiya, buddy!".as_bytes(), t.config.read_chunk)?;
    for step in &steps {
        let eof = if step.n == 0 { "EOF" } else { "none" };
        writeln!(t.out, "n = {} err = {eof} buffer = {:?}", step.n, step.buffer)?;
        writeln!(t.out, "buffer[..n] = {:?}", String::from_utf8_lossy(step.filled()))?;
    }
    Ok(())
}
