use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum IrError {
  #[error("source descriptor already set on type `{0}`")]
  SourceAlreadySet(String),

  #[error("field `{field}` of message `{message}` has invalid position 0")]
  InvalidPosition { message: String, field: String },

  #[error("duplicate position {pos} in message `{message}`")]
  DuplicatePosition { message: String, pos: u32 },

  #[error("field `{field}` of message `{message}` uses reserved position {pos}")]
  ReservedPosition {
    message: String,
    field: String,
    pos: u32,
  },

  #[error("duplicate message `{0}`")]
  DuplicateMessage(String),

  #[error("duplicate enum `{0}`")]
  DuplicateEnum(String),

  #[error("duplicate rpc `{0}`")]
  DuplicateRpc(String),
}
