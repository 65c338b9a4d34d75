//! Interpreter integration tests
//!
//! Exercise the public library surface end to end.

use std::io::{Cursor, Write};

use zhidai::vm::{InputMode, VMConfig, VM};
use zhidai::{run, run_file, run_piped, run_program};

/// 经典问候程序，输出 "Hello World!\n"
const HELLO_WORLD: &[u8] =
    b"++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";

fn capture(program: &[u8], input: &[u8], mode: InputMode) -> (Result<(), zhidai::vm::VMError>, Vec<u8>) {
    let mut vm = VM::with_io(
        VMConfig::default(),
        mode,
        Cursor::new(input.to_vec()),
        Vec::new(),
    );
    let result = vm.interpret(program);
    let output = vm.output().clone();
    (result, output)
}

#[test]
fn test_hello_world() {
    let (result, output) = capture(HELLO_WORLD, b"", InputMode::Interactive);
    assert!(result.is_ok());
    assert_eq!(output, b"Hello World!\n");
}

#[test]
fn test_run_silent_program() {
    // 无输出的程序可以直接跑在真实标准流上
    assert!(run("+++[-]").is_ok());
}

#[test]
fn test_run_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"+++ move it over [->+<] done").unwrap();
    assert!(run_file(file.path()).is_ok());
}

#[test]
fn test_run_file_missing() {
    let result = run_file(std::path::Path::new("/no/such/program.zd"));
    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read file"));
}

#[test]
fn test_run_piped_without_reads() {
    assert!(run_piped(b"++[-]").is_ok());
}

#[test]
fn test_run_piped_read_fails() {
    assert!(run_piped(b",").is_err());
}

#[test]
fn test_run_program_custom_tape_size() {
    let config = VMConfig {
        tape_size: 10,
        trace_execution: false,
    };
    // 指针回绕由取模保证，小纸带同样成立
    assert!(run_program(b"<<<<<<<<<<<<", InputMode::Interactive, config).is_ok());
}

#[test]
fn test_echo_program_with_piped_data() {
    // 程序来自文件、数据来自管道的典型组合：按需读取仍然可用
    let (result, output) = capture(b",[.,]", b"AB", InputMode::Interactive);
    assert!(result.is_ok());
    assert_eq!(output, b"AB");
}
