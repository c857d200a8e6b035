// https://docs.oracle.com/javase/specs/jvms/se19/html/jvms-4.html#jvms-4.7.4

use crate::{ClassFileError, Result};

/// What a `frame_type` byte says about the frame that follows it.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FrameKind {
    Same { offset_delta: u16 },
    SameLocalsOneStackItem { offset_delta: u16 },
    SameLocalsOneStackItemExtended,
    Chop { trim_count: u8 },
    SameExtended,
    Append { locals_count: u8 },
    Full,
}
impl FrameKind {
    pub fn classify(frame_type: u8) -> Result<Self> {
        Ok(match frame_type {
            0..=63 => FrameKind::Same {
                offset_delta: frame_type as u16,
            },
            64..=127 => FrameKind::SameLocalsOneStackItem {
                offset_delta: frame_type as u16 - 64,
            },
            128..=246 => return Err(ClassFileError::ReservedFrameType(frame_type)),
            247 => FrameKind::SameLocalsOneStackItemExtended,
            248..=250 => FrameKind::Chop {
                trim_count: 251 - frame_type,
            },
            251 => FrameKind::SameExtended,
            252..=254 => FrameKind::Append {
                locals_count: frame_type - 251,
            },
            255 => FrameKind::Full,
        })
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum StackMapFrame {
    Same {
        offset_delta: u16,
    },
    SameLocalsOneStackItem {
        offset_delta: u16,
        stack: VerificationType,
    },
    SameLocalsOneStackItemExtended {
        offset_delta: u16,
        stack: VerificationType,
    },
    Chop {
        offset_delta: u16,
        trim_count: u8,
    },
    SameExtended {
        offset_delta: u16,
    },
    Append {
        offset_delta: u16,
        locals: Vec<VerificationType>,
    },
    Full {
        offset_delta: u16,
        locals: Vec<VerificationType>,
        stack: Vec<VerificationType>,
    },
}
impl StackMapFrame {
    pub fn offset_delta(&self) -> u16 {
        match self {
            StackMapFrame::Same { offset_delta }
            | StackMapFrame::SameLocalsOneStackItem { offset_delta, .. }
            | StackMapFrame::SameLocalsOneStackItemExtended { offset_delta, .. }
            | StackMapFrame::Chop { offset_delta, .. }
            | StackMapFrame::SameExtended { offset_delta }
            | StackMapFrame::Append { offset_delta, .. }
            | StackMapFrame::Full { offset_delta, .. } => *offset_delta,
        }
    }

    pub fn locals(&self) -> &[VerificationType] {
        match self {
            StackMapFrame::Append { locals, .. } | StackMapFrame::Full { locals, .. } => {
                locals.as_slice()
            }
            _ => &[],
        }
    }

    pub fn stack(&self) -> &[VerificationType] {
        match self {
            StackMapFrame::SameLocalsOneStackItem { stack, .. }
            | StackMapFrame::SameLocalsOneStackItemExtended { stack, .. } => {
                std::slice::from_ref(stack)
            }
            StackMapFrame::Full { stack, .. } => stack.as_slice(),
            _ => &[],
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VerificationType {
    Top,
    Integer,
    Float,
    Double,
    Long,
    Null,
    UninitializedThis,
    Object { cpool_index: u16 },
    /// `offset` is the bytecode offset of the `new` instruction.
    Uninitialized { offset: u16 },
}
impl VerificationType {
    pub fn tag(&self) -> u8 {
        match self {
            VerificationType::Top => 0,
            VerificationType::Integer => 1,
            VerificationType::Float => 2,
            VerificationType::Double => 3,
            VerificationType::Long => 4,
            VerificationType::Null => 5,
            VerificationType::UninitializedThis => 6,
            VerificationType::Object { .. } => 7,
            VerificationType::Uninitialized { .. } => 8,
        }
    }
}
