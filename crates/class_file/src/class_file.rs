use std::{borrow::Cow, io::Read};

use crate::{
    attributes::Attributes, constant_pool::ClassInfo, parser::Parser, AccessFlags, ConstantPool,
    Result,
};

#[derive(Debug, PartialEq, Clone)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: ConstantPool,
    pub access_flags: AccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces: Vec<u16>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
    pub attributes: Attributes,
}
impl ClassFile {
    pub fn parse(bytes: impl Read) -> Result<ClassFile> {
        Parser::new(bytes).parse()
    }

    pub fn class_name(&self) -> Result<Cow<'_, str>> {
        // The constant_pool entry at this_class must be a CONSTANT_Class_info structure
        // representing the class or interface defined by this class file.
        self.class_name_at(self.this_class)
    }

    pub fn super_class_name(&self) -> Result<Option<Cow<'_, str>>> {
        // If the value of the super_class item is zero, then this class file must represent
        // the class Object, the only class or interface without a direct superclass.
        if self.super_class == 0 {
            return Ok(None);
        }

        self.class_name_at(self.super_class).map(Some)
    }

    pub fn interface_names(&self) -> Result<Vec<Cow<'_, str>>> {
        self.interfaces
            .iter()
            .map(|&index| self.class_name_at(index))
            .collect()
    }

    pub fn field_name(&self, field: &FieldInfo) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8_lossy(field.name_index)
    }

    pub fn field_descriptor(&self, field: &FieldInfo) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8_lossy(field.descriptor_index)
    }

    pub fn method_name(&self, method: &MethodInfo) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8_lossy(method.name_index)
    }

    pub fn method_descriptor(&self, method: &MethodInfo) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8_lossy(method.descriptor_index)
    }

    fn class_name_at(&self, index: u16) -> Result<Cow<'_, str>> {
        let ClassInfo { name_index } = matches_cp_info!(self.constant_pool, index, Class)?;

        self.constant_pool.utf8_lossy(*name_index)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct FieldInfo {
    pub access_flags: AccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Attributes,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MethodInfo {
    pub access_flags: AccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Attributes,
}
