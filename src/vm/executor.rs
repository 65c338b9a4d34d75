//! Virtual Machine executor
//!
//! 实现纸带语言执行器：指令分发、环形纸带内存模型、
//! 以及基于递归重解释的循环执行算法。

use std::fmt;
use std::io::{self, Read, Write};

use tracing::debug;

use crate::vm::errors::{VMError, VMResult};
use crate::vm::opcode::Opcode;

/// 默认纸带长度（单元格数量）
pub const DEFAULT_TAPE_SIZE: usize = 30_000;

/// 输入流结束哨兵值
///
/// 交互模式下 `,` 在输入流耗尽时写入该值。选 0 是一个固定约定：
/// 它让 `,[.,]` 这类回显循环在输入结束时自然退出。
pub const EOF_SENTINEL: u8 = 0;

/// VM 配置
#[derive(Debug, Clone)]
pub struct VMConfig {
    /// 纸带长度（单元格数量）
    pub tape_size: usize,
    /// 是否启用逐指令跟踪
    pub trace_execution: bool,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            trace_execution: false,
        }
    }
}

/// 输入模式
///
/// 每次顶层运行固定一次，决定 `,` 指令的行为。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// 程序文本来自文件或命令行，输入流仍可按需读取
    Interactive,
    /// 程序文本本身就是从管道标准输入整体读入的，
    /// 输入流已被消耗殆尽，任何 `,` 都无法再取得字节
    Piped,
}

/// VM 执行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VMStatus {
    /// 准备好执行
    Ready,
    /// 正在执行
    Running,
    /// 执行完成
    Finished,
    /// 发生错误
    Error,
}

/// 虚拟机
///
/// 持有纸带与指针；同一次顶层运行中的所有递归子调用
/// 共享这份状态，循环体因此能观察并修改外层程序的单元格。
pub struct VM<R = io::Stdin, W = io::Stdout> {
    /// 配置
    config: VMConfig,
    /// 状态
    status: VMStatus,
    /// 错误
    error: Option<VMError>,
    /// 纸带（构造时全零，一次顶层运行内从不重置）
    tape: Box<[u8]>,
    /// 数据指针，始终满足 `pointer < tape.len()`
    pointer: usize,
    /// 输入模式
    mode: InputMode,
    /// 输入源
    input: R,
    /// 输出汇
    output: W,
}

impl VM<io::Stdin, io::Stdout> {
    /// 使用默认配置创建 VM，输入输出绑定到标准流
    pub fn new(mode: InputMode) -> Self {
        Self::new_with_config(VMConfig::default(), mode)
    }

    /// 使用配置创建 VM
    pub fn new_with_config(config: VMConfig, mode: InputMode) -> Self {
        Self::with_io(config, mode, io::stdin(), io::stdout())
    }
}

impl<R: Read, W: Write> VM<R, W> {
    /// 使用自定义输入输出创建 VM
    pub fn with_io(config: VMConfig, mode: InputMode, input: R, output: W) -> Self {
        debug!("VM created: tape_size={} mode={:?}", config.tape_size, mode);
        // 空纸带无法执行，至少保留一个单元格
        let tape = vec![0u8; config.tape_size.max(1)].into_boxed_slice();
        Self {
            config,
            status: VMStatus::Ready,
            error: None,
            tape,
            pointer: 0,
            mode,
            input,
            output,
        }
    }

    /// 获取 VM 状态
    pub fn status(&self) -> VMStatus {
        self.status
    }

    /// 获取 VM 错误
    pub fn error(&self) -> Option<&VMError> {
        self.error.as_ref()
    }

    /// 获取当前指针位置
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// 获取指针所指单元格的值
    pub fn cell(&self) -> u8 {
        self.tape[self.pointer]
    }

    /// 获取整条纸带
    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    /// 获取输入模式
    pub fn input_mode(&self) -> InputMode {
        self.mode
    }

    /// 获取输出汇的引用
    pub fn output(&self) -> &W {
        &self.output
    }

    /// 重置纸带与指针，回到初始状态
    ///
    /// 只在两次顶层运行之间调用（REPL 的 `:reset`），
    /// 解释过程中纸带从不清零。
    pub fn reset(&mut self) {
        self.tape.fill(0);
        self.pointer = 0;
        self.status = VMStatus::Ready;
        self.error = None;
    }

    /// 解释执行一段程序
    ///
    /// 顶层入口：非指令字节视为注释；任何失败（括号不匹配、
    /// 输入耗尽）立即中止整次执行，已写出的输出保持可见。
    pub fn interpret(&mut self, program: &[u8]) -> VMResult<()> {
        debug!("interpret: {} bytes", program.len());
        self.status = VMStatus::Running;
        self.error = None;

        match self.execute(program) {
            Ok(()) => {
                self.status = VMStatus::Finished;
                debug!("interpret: finished");
                Ok(())
            }
            Err(e) => {
                self.status = VMStatus::Error;
                self.error = Some(e.duplicate());
                debug!("interpret: failed: {e}");
                Err(e)
            }
        }
    }

    /// 执行程序体（循环体递归从这里重入）
    fn execute(&mut self, program: &[u8]) -> VMResult<()> {
        let mut i = 0;

        while i < program.len() {
            let byte = program[i];
            i += 1;

            match Opcode::decode(byte) {
                Some(op) => {
                    if self.config.trace_execution {
                        debug!(
                            "exec {op} pointer={} cell={}",
                            self.pointer,
                            self.tape[self.pointer]
                        );
                    }
                    i = self.step(op, program, i)?;
                }
                None => {} // 注释字节
            }

            // 每条指令之后统一归一化指针，含注释字节
            self.pointer %= self.tape.len();
        }

        Ok(())
    }

    /// 执行单条指令，返回下一条指令的位置
    fn step(&mut self, op: Opcode, program: &[u8], next: usize) -> VMResult<usize> {
        match op {
            Opcode::Inc => {
                self.tape[self.pointer] = self.tape[self.pointer].wrapping_add(1);
            }
            Opcode::Dec => {
                self.tape[self.pointer] = self.tape[self.pointer].wrapping_sub(1);
            }
            Opcode::MoveRight => {
                self.pointer += 1;
            }
            Opcode::MoveLeft => {
                // 借助 execute 末尾的取模完成回绕
                self.pointer += self.tape.len() - 1;
            }
            Opcode::Output => {
                let byte = self.tape[self.pointer];
                self.output.write_all(&[byte])?;
                // 阻塞读取之前输出必须已可见
                self.output.flush()?;
            }
            Opcode::Input => {
                if self.mode == InputMode::Piped {
                    return Err(VMError::InputExhausted);
                }
                let mut buf = [0u8; 1];
                let n = self.input.read(&mut buf)?;
                self.tape[self.pointer] = if n == 0 { EOF_SENTINEL } else { buf[0] };
                self.output.flush()?;
            }
            Opcode::LoopStart => {
                let end = find_loop_end(program, next)?;
                let body = &program[next..end];
                while self.tape[self.pointer] != 0 {
                    self.execute(body)?;
                }
                return Ok(end + 1);
            }
            // 配对的 `]` 已被 `[` 的扫描吞掉，执行到这里只能是游离括号
            Opcode::LoopEnd => return Err(VMError::UnmatchedBracket),
        }

        Ok(next)
    }
}

impl<R, W> fmt::Debug for VM<R, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VM")
            .field("status", &self.status)
            .field("pointer", &self.pointer)
            .field("mode", &self.mode)
            .field("tape_size", &self.tape.len())
            .finish()
    }
}

/// 扫描匹配的 `]` 位置
///
/// `start` 是 `[` 之后第一个字节的下标；深度从 1 开始，
/// 遇 `[` 加一、遇 `]` 减一，归零即配对成功。
/// 程序结束前未归零则括号不匹配。
fn find_loop_end(program: &[u8], start: usize) -> VMResult<usize> {
    let mut depth = 1usize;

    for (offset, &byte) in program[start..].iter().enumerate() {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(start + offset);
                }
            }
            _ => {}
        }
    }

    Err(VMError::UnmatchedBracket)
}
