use std::io::Read;

use log::{debug, trace};

use crate::{
    attributes::{
        self, Attribute, AttributeInfo, Attributes, BootstrapMethod, CodeAttribute,
        ExceptionTableEntry,
    },
    class_file::{FieldInfo, MethodInfo},
    constant_pool::{
        ClassInfo, CpInfo, InvokeDynamicInfo, MethodHandleInfo, MethodTypeInfo, NameAndTypeInfo,
        RefInfo,
    },
    cursor::ByteCursor,
    stack_map::{FrameKind, StackMapFrame, VerificationType},
    AccessFlags, ClassFile, ClassFileError, ConstantPool, Result,
};

pub struct Parser<R> {
    r: ByteCursor<R>,
}
impl<R: Read> Parser<R> {
    pub fn new(r: R) -> Self {
        Self {
            r: ByteCursor::new(r),
        }
    }

    pub fn parse(&mut self) -> Result<ClassFile> {
        self.parse_magic_identifier()?;
        let (major_version, minor_version) = self.parse_version()?;

        let constant_pool = self.parse_constant_pool()?;
        let access_flags = AccessFlags::from_bits_truncate(self.r.read_u2()?);
        let this_class = self.r.read_u2()?;
        let super_class = self.r.read_u2()?;
        let interfaces_count = self.r.read_u2()?;
        let interfaces = self.r.read_u2_array(interfaces_count as usize)?;

        let fields_count = self.r.read_u2()?;
        let fields = (0..fields_count)
            .map(|_| self.parse_field_info(&constant_pool))
            .collect::<Result<Vec<_>>>()?;

        let methods_count = self.r.read_u2()?;
        let methods = (0..methods_count)
            .map(|_| self.parse_method_info(&constant_pool))
            .collect::<Result<Vec<_>>>()?;

        let attributes_count = self.r.read_u2()?;
        let attributes = self.parse_attributes(attributes_count, &constant_pool)?;

        debug!(
            "parsed class file version {}.{}: {} pool slots, {} interfaces, {} fields, {} methods, {} attributes",
            major_version,
            minor_version,
            constant_pool.len(),
            interfaces.len(),
            fields.len(),
            methods.len(),
            attributes.len()
        );

        Ok(ClassFile {
            minor_version,
            major_version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
        })
    }

    fn parse_field_info(&mut self, constant_pool: &ConstantPool) -> Result<FieldInfo> {
        let access_flags = AccessFlags::from_bits_truncate(self.r.read_u2()?);
        let name_index = self.r.read_u2()?;
        let descriptor_index = self.r.read_u2()?;
        let attributes_count = self.r.read_u2()?;
        let attributes = self.parse_attributes(attributes_count, constant_pool)?;

        Ok(FieldInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }

    fn parse_method_info(&mut self, constant_pool: &ConstantPool) -> Result<MethodInfo> {
        let access_flags = AccessFlags::from_bits_truncate(self.r.read_u2()?);
        let name_index = self.r.read_u2()?;
        let descriptor_index = self.r.read_u2()?;
        let attributes_count = self.r.read_u2()?;
        let attributes = self.parse_attributes(attributes_count, constant_pool)?;

        Ok(MethodInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }

    fn parse_magic_identifier(&mut self) -> Result<()> {
        match self.r.read_u4()? {
            0xCAFEBABE => Ok(()),
            magic_identifier => Err(ClassFileError::InvalidMagicIdentifier(magic_identifier)),
        }
    }

    fn parse_version(&mut self) -> Result<(u16, u16)> {
        let minor = self.r.read_u2()?;
        let major = self.r.read_u2()?;
        Ok((major, minor))
    }

    fn parse_constant_pool(&mut self) -> Result<ConstantPool> {
        let constant_pool_count = self.r.read_u2()?;
        self.parse_constant_pool_entries(constant_pool_count.saturating_sub(1) as usize)
    }

    /// Fills `count` pool slots. Long and Double entries take two slots, the
    /// second one holding `CpInfo::Unusable`.
    pub fn parse_constant_pool_entries(&mut self, count: usize) -> Result<ConstantPool> {
        let mut res = Vec::with_capacity(count);
        while res.len() < count {
            let cp_info = self.parse_cp_info()?;
            trace!("constant pool #{}: {:?}", res.len() + 1, cp_info);

            let slot_size = cp_info.slot_size();
            res.push(cp_info);
            if slot_size == 2 && res.len() < count {
                res.push(CpInfo::Unusable);
            }
        }
        Ok(ConstantPool::new(res))
    }

    fn parse_cp_info(&mut self) -> Result<CpInfo> {
        let tag = self.r.read_u1()?;
        match tag {
            1 => self.parse_utf8(),
            3 => self.parse_integer(),
            4 => self.parse_float(),
            5 => self.parse_long(),
            6 => self.parse_double(),
            7 => self.parse_class_info(),
            8 => self.parse_string(),
            9 => self.parse_field_ref(),
            10 => self.parse_method_ref(),
            11 => self.parse_interface_method_ref(),
            12 => self.parse_name_and_type_info(),
            15 => self.parse_method_handle(),
            16 => self.parse_method_type_info(),
            18 => self.parse_invoke_dynamic_info(),
            _ => Err(ClassFileError::UnknownConstantTag(tag)),
        }
    }

    fn parse_utf8(&mut self) -> Result<CpInfo> {
        let length = self.r.read_u2()?;
        let bytes = self.r.read_bytes(length as usize)?;

        Ok(CpInfo::Utf8(bytes))
    }

    fn parse_integer(&mut self) -> Result<CpInfo> {
        let int = self.r.read_i4()?;

        Ok(CpInfo::Integer(int))
    }

    fn parse_float(&mut self) -> Result<CpInfo> {
        let bits = self.r.read_u4()?;

        Ok(CpInfo::Float(f32::from_bits(bits)))
    }

    fn parse_long(&mut self) -> Result<CpInfo> {
        Ok(CpInfo::Long(self.read_u8_wide()? as i64))
    }

    fn parse_double(&mut self) -> Result<CpInfo> {
        Ok(CpInfo::Double(f64::from_bits(self.read_u8_wide()?)))
    }

    fn read_u8_wide(&mut self) -> Result<u64> {
        let high_bytes = self.r.read_u4()?;
        let low_bytes = self.r.read_u4()?;

        Ok(((high_bytes as u64) << 32) | low_bytes as u64)
    }

    fn parse_class_info(&mut self) -> Result<CpInfo> {
        let name_index = self.r.read_u2()?;

        Ok(CpInfo::Class(ClassInfo { name_index }))
    }

    fn parse_string(&mut self) -> Result<CpInfo> {
        let string_index = self.r.read_u2()?;

        Ok(CpInfo::String { string_index })
    }

    fn parse_field_ref(&mut self) -> Result<CpInfo> {
        let ref_info = self.parse_ref_info()?;

        Ok(CpInfo::FieldRef(ref_info))
    }

    fn parse_method_ref(&mut self) -> Result<CpInfo> {
        let ref_info = self.parse_ref_info()?;

        Ok(CpInfo::MethodRef(ref_info))
    }

    fn parse_interface_method_ref(&mut self) -> Result<CpInfo> {
        let ref_info = self.parse_ref_info()?;

        Ok(CpInfo::InterfaceMethodRef(ref_info))
    }

    fn parse_name_and_type_info(&mut self) -> Result<CpInfo> {
        let name_index = self.r.read_u2()?;
        let descriptor_index = self.r.read_u2()?;

        Ok(CpInfo::NameAndType(NameAndTypeInfo {
            name_index,
            descriptor_index,
        }))
    }

    fn parse_method_handle(&mut self) -> Result<CpInfo> {
        let reference_kind = self.r.read_u1()?;
        let reference_index = self.r.read_u2()?;

        Ok(CpInfo::MethodHandle(MethodHandleInfo {
            reference_kind,
            reference_index,
        }))
    }

    fn parse_method_type_info(&mut self) -> Result<CpInfo> {
        let descriptor_index = self.r.read_u2()?;

        Ok(CpInfo::MethodType(MethodTypeInfo { descriptor_index }))
    }

    fn parse_invoke_dynamic_info(&mut self) -> Result<CpInfo> {
        let bootstrap_method_attr_index = self.r.read_u2()?;
        let name_and_type_index = self.r.read_u2()?;

        Ok(CpInfo::InvokeDynamic(InvokeDynamicInfo {
            bootstrap_method_attr_index,
            name_and_type_index,
        }))
    }

    fn parse_ref_info(&mut self) -> Result<RefInfo> {
        let class_index = self.r.read_u2()?;
        let name_and_type_index = self.r.read_u2()?;

        Ok(RefInfo {
            class_index,
            name_and_type_index,
        })
    }

    /// Parses one attribute, picking the body format from its name.
    ///
    /// The pool must be complete: the name is looked up while parsing.
    pub fn parse_attribute(&mut self, constant_pool: &ConstantPool) -> Result<Attribute> {
        let attribute_name_index = self.r.read_u2()?;
        let attribute_length = self.r.read_u4()?;
        let name = constant_pool.utf8(attribute_name_index)?;

        let start = self.r.position();
        let info = match name {
            attributes::CONSTANT_VALUE => AttributeInfo::ConstantValue {
                constantvalue_index: self.r.read_u2()?,
            },
            attributes::CODE => AttributeInfo::Code(self.parse_code_attribute(constant_pool)?),
            attributes::STACK_MAP_TABLE => {
                AttributeInfo::StackMapTable(self.parse_stack_map_table()?)
            }
            attributes::EXCEPTIONS => {
                let number_of_exceptions = self.r.read_u2()?;
                AttributeInfo::Exceptions(self.r.read_u2_array(number_of_exceptions as usize)?)
            }
            attributes::BOOTSTRAP_METHODS => {
                let num_bootstrap_methods = self.r.read_u2()?;
                AttributeInfo::BootstrapMethods(
                    (0..num_bootstrap_methods)
                        .map(|_| self.parse_bootstrap_method())
                        .collect::<Result<Vec<_>>>()?,
                )
            }
            _ => AttributeInfo::Other(self.r.read_bytes(attribute_length as usize)?),
        };

        let consumed = self.r.position() - start;
        if consumed != attribute_length as u64 {
            return Err(ClassFileError::LengthMismatch {
                name: String::from_utf8_lossy(name).into_owned(),
                declared: attribute_length,
                consumed,
            });
        }

        trace!(
            "attribute {} ({} bytes)",
            String::from_utf8_lossy(name),
            attribute_length
        );

        Ok(Attribute {
            attribute_name_index,
            attribute_length,
            info,
        })
    }

    pub fn parse_code_attribute(&mut self, constant_pool: &ConstantPool) -> Result<CodeAttribute> {
        let max_stack = self.r.read_u2()?;
        let max_locals = self.r.read_u2()?;
        let code_length = self.r.read_u4()?;
        let code = self.r.read_bytes(code_length as usize)?;
        let exception_table_length = self.r.read_u2()?;
        let exception_table = (0..exception_table_length)
            .map(|_| self.parse_exception_table_entry())
            .collect::<Result<Vec<_>>>()?;
        let attributes_count = self.r.read_u2()?;
        let attributes = self.parse_attributes(attributes_count, constant_pool)?;

        Ok(CodeAttribute {
            max_stack,
            max_locals,
            code,
            exception_table,
            attributes,
        })
    }

    fn parse_exception_table_entry(&mut self) -> Result<ExceptionTableEntry> {
        let start_pc = self.r.read_u2()?;
        let end_pc = self.r.read_u2()?;
        let handler_pc = self.r.read_u2()?;
        let catch_type = match self.r.read_u2()? {
            0 => None,
            index => Some(index),
        };

        Ok(ExceptionTableEntry {
            start_pc,
            end_pc,
            handler_pc,
            catch_type,
        })
    }

    fn parse_stack_map_table(&mut self) -> Result<Vec<StackMapFrame>> {
        let number_of_entries = self.r.read_u2()?;
        (0..number_of_entries)
            .map(|_| self.parse_stack_map_frame())
            .collect()
    }

    pub fn parse_stack_map_frame(&mut self) -> Result<StackMapFrame> {
        let frame_type = self.r.read_u1()?;
        let frame = match FrameKind::classify(frame_type)? {
            FrameKind::Same { offset_delta } => StackMapFrame::Same { offset_delta },
            FrameKind::SameLocalsOneStackItem { offset_delta } => {
                StackMapFrame::SameLocalsOneStackItem {
                    offset_delta,
                    stack: self.parse_verification_type()?,
                }
            }
            FrameKind::SameLocalsOneStackItemExtended => {
                StackMapFrame::SameLocalsOneStackItemExtended {
                    offset_delta: self.r.read_u2()?,
                    stack: self.parse_verification_type()?,
                }
            }
            FrameKind::Chop { trim_count } => StackMapFrame::Chop {
                offset_delta: self.r.read_u2()?,
                trim_count,
            },
            FrameKind::SameExtended => StackMapFrame::SameExtended {
                offset_delta: self.r.read_u2()?,
            },
            FrameKind::Append { locals_count } => StackMapFrame::Append {
                offset_delta: self.r.read_u2()?,
                locals: self.parse_verification_types(locals_count as u16)?,
            },
            FrameKind::Full => {
                let offset_delta = self.r.read_u2()?;
                let number_of_locals = self.r.read_u2()?;
                let locals = self.parse_verification_types(number_of_locals)?;
                let number_of_stack_items = self.r.read_u2()?;
                let stack = self.parse_verification_types(number_of_stack_items)?;

                StackMapFrame::Full {
                    offset_delta,
                    locals,
                    stack,
                }
            }
        };

        trace!("stack map frame {}: {:?}", frame_type, frame);
        Ok(frame)
    }

    fn parse_verification_types(&mut self, count: u16) -> Result<Vec<VerificationType>> {
        (0..count).map(|_| self.parse_verification_type()).collect()
    }

    pub fn parse_verification_type(&mut self) -> Result<VerificationType> {
        let tag = self.r.read_u1()?;
        Ok(match tag {
            0 => VerificationType::Top,
            1 => VerificationType::Integer,
            2 => VerificationType::Float,
            3 => VerificationType::Double,
            4 => VerificationType::Long,
            5 => VerificationType::Null,
            6 => VerificationType::UninitializedThis,
            7 => VerificationType::Object {
                cpool_index: self.r.read_u2()?,
            },
            8 => VerificationType::Uninitialized {
                offset: self.r.read_u2()?,
            },
            _ => return Err(ClassFileError::InvalidVerificationTypeTag(tag)),
        })
    }

    pub fn parse_bootstrap_method(&mut self) -> Result<BootstrapMethod> {
        let bootstrap_method_ref = self.r.read_u2()?;
        let num_bootstrap_arguments = self.r.read_u2()?;
        let bootstrap_arguments = self.r.read_u2_array(num_bootstrap_arguments as usize)?;

        Ok(BootstrapMethod {
            bootstrap_method_ref,
            bootstrap_arguments,
        })
    }

    fn parse_attributes(
        &mut self,
        attributes_count: u16,
        constant_pool: &ConstantPool,
    ) -> Result<Attributes> {
        (0..attributes_count)
            .map(|_| self.parse_attribute(constant_pool))
            .collect::<Result<Vec<_>>>()
            .map(Attributes)
    }
}

#[cfg(test)]
fn parser(bytes: &[u8]) -> Parser<&[u8]> {
    Parser::new(bytes)
}

#[cfg(test)]
fn pool_of(names: &[&str]) -> ConstantPool {
    ConstantPool::new(
        names
            .iter()
            .map(|s| CpInfo::Utf8(s.as_bytes().to_vec()))
            .collect(),
    )
}




#[cfg(test)]
mod parse_attribute_tests {
    use super::*;

    #[test]
    fn it_should_dispatch_code_attributes() {
        let pool = pool_of(&["Code"]);
        let bytes = [
            0x00, 0x01, // name_index
            0x00, 0x00, 0x00, 0x0d, // attribute_length
            0x00, 0x02, // max_stack
            0x00, 0x03, // max_locals
            0x00, 0x00, 0x00, 0x01, 0xb1, // code
            0x00, 0x00, // exception_table_length
            0x00, 0x00, // attributes_count
        ];
        let attribute = parser(&bytes).parse_attribute(&pool).unwrap();

        assert_eq!(attribute.attribute_length, 13);
        let AttributeInfo::Code(code) = attribute.info else {
            panic!("expected a Code attribute");
        };
        assert_eq!(code.max_stack, 2);
        assert_eq!(code.max_locals, 3);
        assert_eq!(code.code, vec![0xb1]);
        assert!(code.exception_table.is_empty());
        assert!(code.attributes.is_empty());
    }

    #[test]
    fn it_should_parse_exception_tables() {
        let pool = pool_of(&["Code"]);
        let bytes = [
            0x00, 0x01, 0x00, 0x00, 0x00, 0x1c, //
            0x00, 0x01, 0x00, 0x01, //
            0x00, 0x00, 0x00, 0x00, //
            0x00, 0x02, //
            0x00, 0x00, 0x00, 0x04, 0x00, 0x05, 0x00, 0x07, //
            0x00, 0x00, 0x00, 0x04, 0x00, 0x06, 0x00, 0x00, //
            0x00, 0x00,
        ];
        let attribute = parser(&bytes).parse_attribute(&pool).unwrap();

        let AttributeInfo::Code(code) = attribute.info else {
            panic!("expected a Code attribute");
        };
        assert_eq!(
            code.exception_table,
            vec![
                ExceptionTableEntry {
                    start_pc: 0,
                    end_pc: 4,
                    handler_pc: 5,
                    catch_type: Some(7),
                },
                ExceptionTableEntry {
                    start_pc: 0,
                    end_pc: 4,
                    handler_pc: 6,
                    catch_type: None,
                },
            ]
        );
    }

    #[test]
    fn it_should_parse_attributes_nested_in_code() {
        let pool = pool_of(&["Code", "StackMapTable", "LineNumberTable"]);
        let bytes = [
            0x00, 0x01, 0x00, 0x00, 0x00, 0x21, // Code, 33 bytes
            0x00, 0x01, 0x00, 0x01, //
            0x00, 0x00, 0x00, 0x01, 0xb1, //
            0x00, 0x00, //
            0x00, 0x02, //
            0x00, 0x02, 0x00, 0x00, 0x00, 0x06, // StackMapTable, 6 bytes
            0x00, 0x02, 0x03, 0xfb, 0x00, 0x10, // Same(3), SameExtended(16)
            0x00, 0x03, 0x00, 0x00, 0x00, 0x02, 0xab, 0xcd, // LineNumberTable, opaque
        ];
        let attribute = parser(&bytes).parse_attribute(&pool).unwrap();

        let AttributeInfo::Code(code) = attribute.info else {
            panic!("expected a Code attribute");
        };
        assert_eq!(code.attributes.len(), 2);
        assert_eq!(
            code.attributes.0[0].info,
            AttributeInfo::StackMapTable(vec![
                StackMapFrame::Same { offset_delta: 3 },
                StackMapFrame::SameExtended { offset_delta: 16 },
            ])
        );
        assert_eq!(code.attributes.0[1].info, AttributeInfo::Other(vec![0xab, 0xcd]));
    }

    #[test]
    fn it_should_keep_unknown_attributes_verbatim() {
        let pool = pool_of(&["SourceFile"]);
        let body = [0x00, 0xff, 0x10, 0x80, 0x00];
        let mut bytes = vec![0x00, 0x01, 0x00, 0x00, 0x00, body.len() as u8];
        bytes.extend_from_slice(&body);
        bytes.push(0x42);

        let mut parser = parser(&bytes);
        let attribute = parser.parse_attribute(&pool).unwrap();

        assert_eq!(attribute.info, AttributeInfo::Other(body.to_vec()));
        assert_eq!(parser.r.position(), 6 + body.len() as u64);
        assert_eq!(parser.r.read_u1().unwrap(), 0x42);
    }

    #[test]
    fn it_should_parse_constant_values() {
        let pool = pool_of(&["ConstantValue"]);
        let bytes = [0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x07];

        assert_eq!(
            parser(&bytes).parse_attribute(&pool).unwrap().info,
            AttributeInfo::ConstantValue {
                constantvalue_index: 7
            }
        );
    }

    #[test]
    fn it_should_parse_exceptions() {
        let pool = pool_of(&["Exceptions"]);
        let bytes = [
            0x00, 0x01, 0x00, 0x00, 0x00, 0x06, 0x00, 0x02, 0x00, 0x05, 0x00, 0x09,
        ];

        assert_eq!(
            parser(&bytes).parse_attribute(&pool).unwrap().info,
            AttributeInfo::Exceptions(vec![5, 9])
        );
    }

    #[test]
    fn it_should_parse_bootstrap_methods() {
        let pool = pool_of(&["BootstrapMethods"]);
        let bytes = [
            0x00, 0x01, 0x00, 0x00, 0x00, 0x0e, //
            0x00, 0x02, //
            0x00, 0x03, 0x00, 0x02, 0x00, 0x04, 0x00, 0x05, //
            0x00, 0x06, 0x00, 0x00,
        ];

        assert_eq!(
            parser(&bytes).parse_attribute(&pool).unwrap().info,
            AttributeInfo::BootstrapMethods(vec![
                BootstrapMethod {
                    bootstrap_method_ref: 3,
                    bootstrap_arguments: vec![4, 5],
                },
                BootstrapMethod {
                    bootstrap_method_ref: 6,
                    bootstrap_arguments: vec![],
                },
            ])
        );
    }

    #[test]
    fn it_should_fail_if_the_declared_length_is_too_long() {
        let pool = pool_of(&["ConstantValue"]);
        let bytes = [0x00, 0x01, 0x00, 0x00, 0x00, 0x04, 0x00, 0x07, 0x00, 0x00];

        assert!(matches!(
            parser(&bytes).parse_attribute(&pool),
            Err(ClassFileError::LengthMismatch {
                declared: 4,
                consumed: 2,
                ..
            })
        ));
    }

    #[test]
    fn it_should_fail_if_the_declared_length_is_too_short() {
        let pool = pool_of(&["Exceptions"]);
        let bytes = [0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x01, 0x00, 0x05];

        assert!(matches!(
            parser(&bytes).parse_attribute(&pool),
            Err(ClassFileError::LengthMismatch {
                declared: 2,
                consumed: 4,
                ..
            })
        ));
    }

    #[test]
    fn it_should_fail_if_the_name_is_not_in_the_pool() {
        let pool = pool_of(&["Code"]);
        let bytes = [0x00, 0x02, 0x00, 0x00, 0x00, 0x00];

        assert!(matches!(
            parser(&bytes).parse_attribute(&pool),
            Err(ClassFileError::IndexOutOfRange { index: 2, size: 1 })
        ));
    }

    #[test]
    fn it_should_fail_if_the_name_is_not_utf8() {
        let pool = ConstantPool::new(vec![CpInfo::Integer(3)]);
        let bytes = [0x00, 0x01, 0x00, 0x00, 0x00, 0x00];

        assert!(matches!(
            parser(&bytes).parse_attribute(&pool),
            Err(ClassFileError::UnexpectedConstantPoolEntry("Utf8", _))
        ));
    }

    #[test]
    fn it_should_fail_on_truncated_opaque_bodies() {
        let pool = pool_of(&["Signature"]);
        let bytes = [0x00, 0x01, 0x00, 0x00, 0x00, 0x04, 0x00, 0x07];

        assert!(matches!(
            parser(&bytes).parse_attribute(&pool),
            Err(ClassFileError::TruncatedInput)
        ));
    }
}

#[cfg(test)]
mod parse_stack_map_frame_tests {
    use super::*;

    #[test]
    fn it_should_parse_same_frames_without_further_reads() {
        for frame_type in 0..=63u8 {
            let bytes = [frame_type];
            let mut parser = parser(&bytes);

            assert_eq!(
                parser.parse_stack_map_frame().unwrap(),
                StackMapFrame::Same {
                    offset_delta: frame_type as u16
                }
            );
            assert_eq!(parser.r.position(), 1);
        }
    }

    #[test]
    fn it_should_parse_same_locals_one_stack_item() {
        let frame = parser(&[70, 7, 0x00, 0x0c])
            .parse_stack_map_frame()
            .unwrap();

        assert_eq!(
            frame,
            StackMapFrame::SameLocalsOneStackItem {
                offset_delta: 6,
                stack: VerificationType::Object { cpool_index: 12 },
            }
        );
        assert_eq!(frame.stack().len(), 1);
    }

    #[test]
    fn it_should_parse_same_locals_one_stack_item_extended() {
        assert_eq!(
            parser(&[247, 0x01, 0x00, 1])
                .parse_stack_map_frame()
                .unwrap(),
            StackMapFrame::SameLocalsOneStackItemExtended {
                offset_delta: 256,
                stack: VerificationType::Integer,
            }
        );
    }

    #[test]
    fn it_should_parse_chop_frames() {
        for (frame_type, trim_count) in [(248u8, 3u8), (249, 2), (250, 1)] {
            assert_eq!(
                parser(&[frame_type, 0x00, 0x05])
                    .parse_stack_map_frame()
                    .unwrap(),
                StackMapFrame::Chop {
                    offset_delta: 5,
                    trim_count,
                }
            );
        }
    }

    #[test]
    fn it_should_read_the_explicit_offset_of_same_extended_frames() {
        assert_eq!(
            parser(&[251, 0xbe, 0xef]).parse_stack_map_frame().unwrap(),
            StackMapFrame::SameExtended {
                offset_delta: 0xbeef
            }
        );
    }

    #[test]
    fn it_should_parse_append_frames() {
        let frame = parser(&[254, 0x00, 0x02, 1, 8, 0x00, 0x10, 4])
            .parse_stack_map_frame()
            .unwrap();

        assert_eq!(
            frame,
            StackMapFrame::Append {
                offset_delta: 2,
                locals: vec![
                    VerificationType::Integer,
                    VerificationType::Uninitialized { offset: 16 },
                    VerificationType::Long,
                ],
            }
        );
        assert_eq!(frame.offset_delta(), 2);
    }

    #[test]
    fn it_should_parse_full_frames() {
        let bytes = [
            255, 0x00, 0x09, // offset_delta
            0x00, 0x02, 6, 3, // locals
            0x00, 0x01, 5, // stack
        ];

        assert_eq!(
            parser(&bytes).parse_stack_map_frame().unwrap(),
            StackMapFrame::Full {
                offset_delta: 9,
                locals: vec![
                    VerificationType::UninitializedThis,
                    VerificationType::Double
                ],
                stack: vec![VerificationType::Null],
            }
        );
    }

    #[test]
    fn it_should_fail_on_reserved_frame_types() {
        for frame_type in [128u8, 200, 246] {
            assert!(matches!(
                parser(&[frame_type, 0, 0, 0, 0]).parse_stack_map_frame(),
                Err(ClassFileError::ReservedFrameType(t)) if t == frame_type
            ));
        }
    }

    #[test]
    fn it_should_fail_on_truncated_frames() {
        assert!(matches!(
            parser(&[255, 0x00, 0x01, 0x00]).parse_stack_map_frame(),
            Err(ClassFileError::TruncatedInput)
        ));
        assert!(matches!(
            parser(&[64]).parse_stack_map_frame(),
            Err(ClassFileError::TruncatedInput)
        ));
    }
}
