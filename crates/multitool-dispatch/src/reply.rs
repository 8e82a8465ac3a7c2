// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

use core::fmt;

use multitool_hal::TagUid;
use multitool_ir::Code;

/// Most replies a single command produces (`RFID_SCAN` with a tag)
pub const MAX_REPLIES: usize = 2;

/// Replies to one command, in send order
pub type Replies = heapless::Vec<Reply, MAX_REPLIES>;

/// Reply line sent back over the link (without the trailing newline)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Uid(TagUid),
    Data(String),
    /// Background scan report: `UID:<uid>|<data or N/A>`
    TagReport { uid: TagUid, data: Option<String> },
    IrCode(Code),
    NoUid,
    NoData,
    UnknownCommand,
    WriteOk,
    WriteFail,
    EmitOk,
    EmitFail,
    IrOk,
    IrFail,
    WrongSubmode,
    WrongMode,
}

impl Reply {
    /// True for `ERR:*` and `IGNORED:*` tokens
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Reply::NoUid
                | Reply::NoData
                | Reply::UnknownCommand
                | Reply::WrongSubmode
                | Reply::WrongMode
        )
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => f.write_str("OK"),
            Reply::Uid(uid) => write!(f, "UID:{}", uid),
            Reply::Data(data) => write!(f, "DATA:{}", data),
            Reply::TagReport { uid, data } => {
                write!(f, "UID:{}|{}", uid, data.as_deref().unwrap_or("N/A"))
            }
            Reply::IrCode(code) => write!(f, "IR_CODE:{}", code),
            Reply::NoUid => f.write_str("ERR:NoUID"),
            Reply::NoData => f.write_str("ERR:NoData"),
            Reply::UnknownCommand => f.write_str("ERR:UnknownCommand"),
            Reply::WriteOk => f.write_str("WRITE_OK"),
            Reply::WriteFail => f.write_str("WRITE_FAIL"),
            Reply::EmitOk => f.write_str("EMIT_OK"),
            Reply::EmitFail => f.write_str("EMIT_FAIL"),
            Reply::IrOk => f.write_str("IR_OK"),
            Reply::IrFail => f.write_str("IR_FAIL"),
            Reply::WrongSubmode => f.write_str("IGNORED:WrongSubmode"),
            Reply::WrongMode => f.write_str("IGNORED:WrongMode"),
        }
    }
}
