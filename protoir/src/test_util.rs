use std::sync::Arc;

use crate::schema::types::{SourceRef, SourceType};

#[derive(Debug)]
pub struct FakeSource {
  pub nullable: bool,
}

impl SourceType for FakeSource {
  fn is_nullable(&self) -> bool {
    self.nullable
  }
}

pub fn source(nullable: bool) -> SourceRef {
  Arc::new(FakeSource { nullable })
}
