use crate::{ObjectError, ObjectType};

/// Parse a `"<type> <size>\0"` header at the start of `data`.
///
/// Returns `(type, content_size, header_len)`; `header_len` counts the NUL.
pub fn parse_header(data: &[u8]) -> Result<(ObjectType, usize, usize), ObjectError> {
    let nul = data
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| ObjectError::InvalidHeader("missing null terminator".into()))?;

    let header = &data[..nul];
    let space = header
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| ObjectError::InvalidHeader("missing space in header".into()))?;

    let obj_type = ObjectType::from_bytes(&header[..space])?;

    let size = std::str::from_utf8(&header[space + 1..])
        .map_err(|_| ObjectError::InvalidHeader("non-ASCII size".into()))?;
    let content_size: usize = size
        .parse()
        .map_err(|_| ObjectError::InvalidHeader(format!("invalid size: {size}")))?;

    Ok((obj_type, content_size, nul + 1))
}

/// Split framed object bytes into type and exactly `size` content bytes.
pub fn split_object(data: &[u8]) -> Result<(ObjectType, &[u8]), ObjectError> {
    let (obj_type, size, header_len) = parse_header(data)?;
    let content = &data[header_len..];
    if content.len() < size {
        return Err(ObjectError::Truncated {
            expected: size,
            actual: content.len(),
        });
    }
    Ok((obj_type, &content[..size]))
}

/// Build a header for `content_size` bytes of `obj_type`.
pub fn write_header(obj_type: ObjectType, content_size: usize) -> Vec<u8> {
    format!("{obj_type} {content_size}\0").into_bytes()
}
