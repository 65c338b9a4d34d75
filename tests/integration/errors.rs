//! Error handling integration tests
//!
//! Interpreter failures must keep their kind across the anyhow boundary so
//! the CLI can report them and exit nonzero.

use zhidai::vm::VMError;
use zhidai::{run, run_piped};

#[test]
fn test_unmatched_bracket_kind_survives() {
    let err = run("[").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VMError>(),
        Some(VMError::UnmatchedBracket)
    ));
}

#[test]
fn test_stray_close_bracket_kind_survives() {
    let err = run("]").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VMError>(),
        Some(VMError::UnmatchedBracket)
    ));
}

#[test]
fn test_input_exhausted_kind_survives() {
    let err = run_piped(b",").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VMError>(),
        Some(VMError::InputExhausted)
    ));
}

#[test]
fn test_error_message_is_human_readable() {
    let err = run("[").unwrap_err();
    assert!(err.to_string().contains("unmatched bracket"));

    let err = run_piped(b",").unwrap_err();
    assert!(err.to_string().contains("input exhausted"));
}

#[test]
fn test_failure_deep_in_nested_loops() {
    // 括号全部配对，失败发生在最内层循环体执行时，
    // 必须原样传播到顶层
    let err = run_piped(b"+[+[+[,]]]").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VMError>(),
        Some(VMError::InputExhausted)
    ));
}
