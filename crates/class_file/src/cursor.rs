use std::io::{BufReader, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::{ClassFileError, Result};

type Endian = BigEndian;

/// Forward-only big-endian reader that counts the bytes it has consumed.
pub struct ByteCursor<R> {
    r: BufReader<R>,
    position: u64,
}
impl<R: Read> ByteCursor<R> {
    pub fn new(r: R) -> Self {
        Self {
            r: BufReader::new(r),
            position: 0,
        }
    }

    /// Number of bytes consumed since the cursor was created.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn read_u1(&mut self) -> Result<u8> {
        let v = self.r.read_u8()?;
        self.position += 1;
        Ok(v)
    }

    pub fn read_u2(&mut self) -> Result<u16> {
        let v = self.r.read_u16::<Endian>()?;
        self.position += 2;
        Ok(v)
    }

    pub fn read_u4(&mut self) -> Result<u32> {
        let v = self.r.read_u32::<Endian>()?;
        self.position += 4;
        Ok(v)
    }

    pub fn read_i4(&mut self) -> Result<i32> {
        let v = self.r.read_i32::<Endian>()?;
        self.position += 4;
        Ok(v)
    }

    pub fn read_u2_array(&mut self, count: usize) -> Result<Vec<u16>> {
        let mut values = vec![0u16; count];
        self.r.read_u16_into::<Endian>(&mut values)?;
        self.position += 2 * count as u64;
        Ok(values)
    }

    // `count` is untrusted, only allocate for bytes that actually arrive.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        (&mut self.r).take(count as u64).read_to_end(&mut bytes)?;
        if bytes.len() != count {
            return Err(ClassFileError::TruncatedInput);
        }
        self.position += count as u64;
        Ok(bytes)
    }
}
