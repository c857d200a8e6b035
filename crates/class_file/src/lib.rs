// https://docs.oracle.com/javase/specs/jvms/se19/html/jvms-4.html

#[macro_use]
pub mod constant_pool;
mod access_flags;
pub mod attributes;
mod class_file;
mod cursor;
mod error;
mod parser;
pub mod stack_map;

use std::io::Read;

pub use self::class_file::{ClassFile, FieldInfo, MethodInfo};
pub use access_flags::AccessFlags;
pub use attributes::{Attribute, AttributeInfo, Attributes};
pub use constant_pool::{ConstantPool, CpInfo};
pub use cursor::ByteCursor;
pub use error::ClassFileError;
pub use parser::Parser;
pub use stack_map::{StackMapFrame, VerificationType};

pub type Result<T, E = ClassFileError> = std::result::Result<T, E>;

/// Decodes a whole class file. Nothing is returned unless every part of it
/// decoded cleanly.
pub fn decode_class_file(r: impl Read) -> Result<ClassFile> {
    ClassFile::parse(r)
}
