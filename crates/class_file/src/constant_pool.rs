use std::borrow::Cow;

use crate::{ClassFileError, Result};

// Composite entries nest at most Ref -> NameAndType -> Utf8 (plus one level
// for MethodHandle), anything deeper is a malformed or cyclic pool.
const MAX_RESOLVE_DEPTH: usize = 8;

#[macro_export]
macro_rules! matches_cp_info {
    ($cp:expr, $index:expr, $i:ident) => {
        match $cp.at($index)? {
            $crate::constant_pool::CpInfo::$i(n) => Ok(n),
            c => Err($crate::ClassFileError::UnexpectedConstantPoolEntry(
                stringify!($i),
                c.clone(),
            )),
        }
    };
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct ConstantPool {
    cp_infos: Vec<CpInfo>,
}
impl ConstantPool {
    pub fn new(cp_infos: Vec<CpInfo>) -> Self {
        Self { cp_infos }
    }

    pub fn len(&self) -> usize {
        self.cp_infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cp_infos.is_empty()
    }

    /// Returns the entry at the 1-based `index`.
    ///
    /// Indices follow the class file's slot numbering, not the order of the
    /// decoded records: a Long or Double takes two slots and the second one
    /// holds `CpInfo::Unusable`. A pool of `n` slots may therefore hold fewer
    /// than `n` records.
    pub fn at(&self, index: u16) -> Result<&CpInfo> {
        self.get(index).ok_or(ClassFileError::IndexOutOfRange {
            index,
            size: self.cp_infos.len(),
        })
    }

    pub fn get(&self, index: u16) -> Option<&CpInfo> {
        let slot = (index as usize).checked_sub(1)?;
        self.cp_infos.get(slot)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CpInfo> {
        self.cp_infos.iter()
    }

    pub fn utf8(&self, index: u16) -> Result<&[u8]> {
        matches_cp_info!(self, index, Utf8).map(Vec::as_slice)
    }

    pub fn utf8_lossy(&self, index: u16) -> Result<Cow<'_, str>> {
        self.utf8(index).map(String::from_utf8_lossy)
    }

    /// Resolves the entry at `index` into a readable string.
    pub fn resolve(&self, index: u16) -> Result<String> {
        self.resolve_at(index, 0)
    }

    /// Renders `cp_info`, following every index it holds through the pool.
    ///
    /// Never mutates the pool, so it can be called from several threads at
    /// once after decoding.
    pub fn resolve_value(&self, cp_info: &CpInfo) -> Result<String> {
        self.resolve_with_depth(cp_info, 0)
    }

    fn resolve_at(&self, index: u16, depth: usize) -> Result<String> {
        if depth > MAX_RESOLVE_DEPTH {
            return Err(ClassFileError::ResolutionTooDeep(index));
        }

        self.resolve_with_depth(self.at(index)?, depth)
    }

    fn resolve_with_depth(&self, cp_info: &CpInfo, depth: usize) -> Result<String> {
        let depth = depth + 1;
        let value = match cp_info {
            CpInfo::Class(ClassInfo { name_index }) => self.resolve_at(*name_index, depth)?,
            CpInfo::String { string_index } => self.resolve_at(*string_index, depth)?,
            CpInfo::FieldRef(ref_info)
            | CpInfo::MethodRef(ref_info)
            | CpInfo::InterfaceMethodRef(ref_info) => format!(
                "{}.{}",
                self.resolve_at(ref_info.class_index, depth)?,
                self.resolve_at(ref_info.name_and_type_index, depth)?
            ),
            CpInfo::NameAndType(NameAndTypeInfo {
                name_index,
                descriptor_index,
            }) => format!(
                "{}:{}",
                self.resolve_at(*name_index, depth)?,
                self.resolve_at(*descriptor_index, depth)?
            ),
            CpInfo::MethodHandle(MethodHandleInfo {
                reference_kind,
                reference_index,
            }) => format!(
                "{} {}",
                reference_kind_name(*reference_kind),
                self.resolve_at(*reference_index, depth)?
            ),
            CpInfo::MethodType(MethodTypeInfo { descriptor_index }) => {
                self.resolve_at(*descriptor_index, depth)?
            }
            CpInfo::InvokeDynamic(InvokeDynamicInfo {
                bootstrap_method_attr_index,
                name_and_type_index,
            }) => format!(
                "#{}:{}",
                bootstrap_method_attr_index,
                self.resolve_at(*name_and_type_index, depth)?
            ),
            CpInfo::Integer(i) => i.to_string(),
            CpInfo::Float(f) => f.to_string(),
            CpInfo::Long(l) => l.to_string(),
            CpInfo::Double(d) => d.to_string(),
            CpInfo::Utf8(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            CpInfo::Unusable => String::from("<unusable>"),
        };

        Ok(value)
    }
}
impl<'a> IntoIterator for &'a ConstantPool {
    type Item = &'a CpInfo;
    type IntoIter = std::slice::Iter<'a, CpInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.cp_infos.iter()
    }
}

fn reference_kind_name(reference_kind: u8) -> Cow<'static, str> {
    match reference_kind {
        1 => "REF_getField".into(),
        2 => "REF_getStatic".into(),
        3 => "REF_putField".into(),
        4 => "REF_putStatic".into(),
        5 => "REF_invokeVirtual".into(),
        6 => "REF_invokeStatic".into(),
        7 => "REF_invokeSpecial".into(),
        8 => "REF_newInvokeSpecial".into(),
        9 => "REF_invokeInterface".into(),
        kind => format!("REF_{}", kind).into(),
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum CpInfo {
    MethodRef(RefInfo),
    FieldRef(RefInfo),
    Float(f32),
    InterfaceMethodRef(RefInfo),
    Class(ClassInfo),
    NameAndType(NameAndTypeInfo),
    /// Raw bytes as stored in the file, in modified UTF-8.
    Utf8(Vec<u8>),
    String { string_index: u16 },
    InvokeDynamic(InvokeDynamicInfo),
    Integer(i32),
    MethodHandle(MethodHandleInfo),
    MethodType(MethodTypeInfo),
    Long(i64),
    Double(f64),
    /// The slot following a `Long` or `Double`.
    Unusable,
}
impl CpInfo {
    pub fn kind(&self) -> &'static str {
        match self {
            CpInfo::MethodRef(_) => "MethodRef",
            CpInfo::FieldRef(_) => "FieldRef",
            CpInfo::Float(_) => "Float",
            CpInfo::InterfaceMethodRef(_) => "InterfaceMethodRef",
            CpInfo::Class(_) => "Class",
            CpInfo::NameAndType(_) => "NameAndType",
            CpInfo::Utf8(_) => "Utf8",
            CpInfo::String { .. } => "String",
            CpInfo::InvokeDynamic(_) => "InvokeDynamic",
            CpInfo::Integer(_) => "Integer",
            CpInfo::MethodHandle(_) => "MethodHandle",
            CpInfo::MethodType(_) => "MethodType",
            CpInfo::Long(_) => "Long",
            CpInfo::Double(_) => "Double",
            CpInfo::Unusable => "Unusable",
        }
    }

    /// Number of pool slots the entry occupies.
    pub fn slot_size(&self) -> usize {
        match self {
            CpInfo::Long(_) | CpInfo::Double(_) => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct RefInfo {
    pub class_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ClassInfo {
    // The constant_pool entry at name_index must be a CONSTANT_Utf8_info structure
    // representing a binary class or interface name encoded in internal form.
    pub name_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct NameAndTypeInfo {
    pub name_index: u16,
    pub descriptor_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct InvokeDynamicInfo {
    /// Index into the `BootstrapMethods` attribute, not into the pool.
    pub bootstrap_method_attr_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MethodHandleInfo {
    pub reference_kind: u8,
    pub reference_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MethodTypeInfo {
    pub descriptor_index: u16,
}
