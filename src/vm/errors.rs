//! VM errors

use thiserror::Error;

/// VM result
pub type VMResult<T> = Result<T, VMError>;

/// VM errors
#[derive(Debug, Error)]
pub enum VMError {
    /// A `[` with no matching `]` before end of program, or a stray `]`.
    #[error("unmatched bracket in program")]
    UnmatchedBracket,

    /// A `,` executed after the whole input stream was already drained
    /// into the program text. No further bytes can ever arrive.
    #[error("input exhausted: program was read from piped input")]
    InputExhausted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VMError {
    /// 复制一份用于状态记录（`io::Error` 不支持 `Clone`）
    pub(crate) fn duplicate(&self) -> Self {
        match self {
            VMError::UnmatchedBracket => VMError::UnmatchedBracket,
            VMError::InputExhausted => VMError::InputExhausted,
            VMError::Io(e) => VMError::Io(std::io::Error::new(e.kind(), e.to_string())),
        }
    }
}
