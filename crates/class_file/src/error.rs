use thiserror::Error;

use crate::constant_pool;

#[derive(Error, Debug)]
pub enum ClassFileError {
    #[error("Input ended before the requested bytes could be read")]
    TruncatedInput,
    #[error(transparent)]
    IOError(std::io::Error),
    #[error("Invalid magic identifier: 0x{0:X}")]
    InvalidMagicIdentifier(u32),
    #[error("Unknown constant pool tag: {0}")]
    UnknownConstantTag(u8),
    #[error("Constant pool index {index} out of range (pool has {size} entries)")]
    IndexOutOfRange { index: u16, size: usize },
    #[error("Expected {0}, found {1:?}")]
    UnexpectedConstantPoolEntry(&'static str, constant_pool::CpInfo),
    #[error("Constant pool reference chain too deep at index {0}")]
    ResolutionTooDeep(u16),
    #[error("Attribute {name} declares {declared} bytes but {consumed} were decoded")]
    LengthMismatch {
        name: String,
        declared: u32,
        consumed: u64,
    },
    #[error("Reserved stack map frame type: {0}")]
    ReservedFrameType(u8),
    #[error("Invalid verification type tag: {0}")]
    InvalidVerificationTypeTag(u8),
}

impl From<std::io::Error> for ClassFileError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => ClassFileError::TruncatedInput,
            _ => ClassFileError::IOError(e),
        }
    }
}
