use std::fmt;

use crate::{stack_map::StackMapFrame, ConstantPool};

pub const CONSTANT_VALUE: &[u8] = b"ConstantValue";
pub const CODE: &[u8] = b"Code";
pub const STACK_MAP_TABLE: &[u8] = b"StackMapTable";
pub const EXCEPTIONS: &[u8] = b"Exceptions";
pub const BOOTSTRAP_METHODS: &[u8] = b"BootstrapMethods";

#[derive(Debug, Default, PartialEq, Clone)]
pub struct Attributes(pub Vec<Attribute>);
impl Attributes {
    pub fn find_by_name(&self, name: &str, constant_pool: &ConstantPool) -> Option<&Attribute> {
        self.0.iter().find(|a| {
            constant_pool
                .utf8(a.attribute_name_index)
                .map_or(false, |s| s == name.as_bytes())
        })
    }

    pub fn code_attribute(&self, constant_pool: &ConstantPool) -> Option<&CodeAttribute> {
        match &self.find_by_name("Code", constant_pool)?.info {
            AttributeInfo::Code(code) => Some(code),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }
}
impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Attribute {
    pub attribute_name_index: u16,
    pub attribute_length: u32,
    pub info: AttributeInfo,
}

#[derive(PartialEq, Clone)]
pub enum AttributeInfo {
    ConstantValue { constantvalue_index: u16 },
    Code(CodeAttribute),
    StackMapTable(Vec<StackMapFrame>),
    Exceptions(Vec<u16>),
    BootstrapMethods(Vec<BootstrapMethod>),
    /// Unrecognized attribute, kept byte for byte.
    Other(Vec<u8>),
}
impl fmt::Debug for AttributeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeInfo::ConstantValue {
                constantvalue_index,
            } => f
                .debug_struct("ConstantValue")
                .field("constantvalue_index", constantvalue_index)
                .finish(),
            AttributeInfo::Code(code) => f.debug_tuple("Code").field(code).finish(),
            AttributeInfo::StackMapTable(entries) => {
                f.debug_tuple("StackMapTable").field(entries).finish()
            }
            AttributeInfo::Exceptions(exception_index_table) => f
                .debug_tuple("Exceptions")
                .field(exception_index_table)
                .finish(),
            AttributeInfo::BootstrapMethods(bootstrap_methods) => f
                .debug_tuple("BootstrapMethods")
                .field(bootstrap_methods)
                .finish(),
            AttributeInfo::Other(info) => f
                .debug_tuple("Other")
                .field(&format!("({} bytes)", info.len()))
                .finish(),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct ExceptionTableEntry {
    pub start_pc: u16,
    pub end_pc: u16,
    pub handler_pc: u16,
    /// `None` catches every exception.
    pub catch_type: Option<u16>,
}

#[derive(PartialEq, Clone)]
pub struct CodeAttribute {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code: Vec<u8>,
    pub exception_table: Vec<ExceptionTableEntry>,
    pub attributes: Attributes,
}
impl fmt::Debug for CodeAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeAttribute")
            .field("max_stack", &self.max_stack)
            .field("max_locals", &self.max_locals)
            .field("code", &format!("({} bytes)", self.code.len()))
            .field("exception_table", &self.exception_table)
            .field("attributes", &self.attributes)
            .finish()
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BootstrapMethod {
    pub bootstrap_method_ref: u16,
    pub bootstrap_arguments: Vec<u16>,
}
