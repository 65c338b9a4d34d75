//! 纸带语言操作码定义
//!
//! 八条指令直接以 ASCII 字节编码，解码即分发：
//! 运行时无需查表，直接匹配对应的执行分支。
//!
//! 指令编码空间：
//! - `+` / `-`：当前单元格算术（模 256 回绕）
//! - `>` / `<`：指针移动（模纸带长度回绕）
//! - `.` / `,`：字节输出 / 字节输入
//! - `[` / `]`：循环开始 / 循环结束
//! - 其余任何字节：注释，不占用执行语义

use std::fmt;

/// 纸带语言操作码
///
/// 每个变体的判别值就是其源字符的 ASCII 编码，
/// 因此 `opcode as u8` 可以原样还原源文本。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// 当前单元格加一（255 回绕到 0）
    Inc = b'+',

    /// 当前单元格减一（0 回绕到 255）
    Dec = b'-',

    /// 指针右移一格（末格回绕到首格）
    MoveRight = b'>',

    /// 指针左移一格（首格回绕到末格）
    MoveLeft = b'<',

    /// 输出当前单元格字节并立即刷新
    Output = b'.',

    /// 读取一个输入字节写入当前单元格
    Input = b',',

    /// 循环开始：当前单元格非零时执行循环体
    LoopStart = b'[',

    /// 循环结束：仅作为 `[` 扫描的配对目标
    LoopEnd = b']',
}

impl Opcode {
    /// 解码一个源字节
    ///
    /// 返回 `None` 表示该字节是注释，执行时直接跳过。
    pub fn decode(byte: u8) -> Option<Self> {
        match byte {
            b'+' => Some(Opcode::Inc),
            b'-' => Some(Opcode::Dec),
            b'>' => Some(Opcode::MoveRight),
            b'<' => Some(Opcode::MoveLeft),
            b'.' => Some(Opcode::Output),
            b',' => Some(Opcode::Input),
            b'[' => Some(Opcode::LoopStart),
            b']' => Some(Opcode::LoopEnd),
            _ => None,
        }
    }

    /// 判断字节是否为指令（非注释）
    pub fn is_instruction(byte: u8) -> bool {
        Self::decode(byte).is_some()
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Opcode::decode(byte).ok_or(byte)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8 as char)
    }
}
