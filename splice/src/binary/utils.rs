use std::{
    io::{ErrorKind, Read, Result},
    slice,
};

pub fn read_byte<R>(mut reader: R) -> Result<u8>
where
    R: Read,
{
    let mut byte = 0;
    reader.read_exact(slice::from_mut(&mut byte))?;
    Ok(byte)
}

/// Read a single byte, or `None` if the reader was already exhausted
pub fn try_read_byte<R>(mut reader: R) -> Result<Option<u8>>
where
    R: Read,
{
    let mut byte = 0;
    loop {
        match reader.read(slice::from_mut(&mut byte)) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte)),
            Err(error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn try_read() {
        let mut reader = Cursor::new([0x2A]);
        assert_eq!(try_read_byte(&mut reader).unwrap(), Some(0x2A));
        assert_eq!(try_read_byte(&mut reader).unwrap(), None);
        assert_eq!(
            read_byte(&mut reader).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }
}
