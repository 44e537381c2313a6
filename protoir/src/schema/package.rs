use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::option::Options;
use super::types::{ProtoType, Type};
use crate::config::IrConfig;
use crate::error::IrError;
use crate::util::{clean_locator, first_duplicate, join_locator};

/// A single schema file with its own package declaration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "PackageData")]
pub struct Package {
  pub name: String,
  pub path: String,
  imports: Vec<String>,
  pub options: Options,
  pub messages: Vec<Message>,
  pub enums: Vec<Enum>,
  pub rpcs: Vec<Rpc>,
  config: IrConfig,
}

/// Wire form of [`Package`]. Imports are replayed through the same
/// dedup and self-import checks as [`Package::import`].
#[derive(Deserialize)]
struct PackageData {
  name: String,
  path: String,
  #[serde(default)]
  imports: Vec<String>,
  #[serde(default)]
  options: Options,
  #[serde(default)]
  messages: Vec<Message>,
  #[serde(default)]
  enums: Vec<Enum>,
  #[serde(default)]
  rpcs: Vec<Rpc>,
  #[serde(default)]
  config: IrConfig,
}

impl From<PackageData> for Package {
  fn from(data: PackageData) -> Self {
    let mut pkg = Package::with_config(data.name, data.path, data.config);
    pkg.options = data.options;
    pkg.messages = data.messages;
    pkg.enums = data.enums;
    pkg.rpcs = data.rpcs;
    for file in data.imports {
      pkg.add_import(file);
    }
    pkg
  }
}

impl Package {
  pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
    Self::with_config(name, path, IrConfig::default())
  }

  pub fn with_config(name: impl Into<String>, path: impl Into<String>, config: IrConfig) -> Self {
    Self {
      name: name.into(),
      path: path.into(),
      imports: vec![],
      options: Options::default(),
      messages: vec![],
      enums: vec![],
      rpcs: vec![],
      config,
    }
  }

  pub fn config(&self) -> &IrConfig {
    &self.config
  }

  /// Imports in the order they were first added.
  pub fn imports(&self) -> &[String] {
    &self.imports
  }

  /// Imports the file that defines `ty`. Types without an import locator
  /// need no import and are ignored.
  pub fn import(&mut self, ty: &ProtoType) {
    if let Some(file) = ty.import_locator() {
      self.add_import(file.to_string());
    }
  }

  /// Imports the generated schema file of the package at `path`. Paths are
  /// compared and stored in normalized form.
  pub fn import_from_path(&mut self, path: &str) {
    if clean_locator(path) == clean_locator(&self.path) {
      log::trace!("package `{}`: skipping self import", self.name);
      return;
    }
    let file = join_locator(path, &self.config.generated_file_name);
    self.add_import(file);
  }

  fn add_import(&mut self, file: String) {
    let file = clean_locator(&file);
    if file == clean_locator(&self.path) || file == self.own_locator() {
      log::trace!("package `{}`: skipping self import `{}`", self.name, file);
      return;
    }
    if self.is_imported(&file) {
      log::trace!("package `{}`: `{}` already imported", self.name, file);
      return;
    }
    log::debug!("package `{}`: importing `{}`", self.name, file);
    self.imports.push(file);
  }

  fn own_locator(&self) -> String {
    join_locator(&self.path, &self.config.generated_file_name)
  }

  fn is_imported(&self, file: &str) -> bool {
    self.imports.iter().any(|x| x == file)
  }

  /// Derives the service name from the last segment of the package name,
  /// e.g. `store.users` becomes `UsersService`.
  ///
  /// # Panics
  ///
  /// Panics if the package name or its last segment is empty.
  pub fn service_name(&self) -> String {
    let last = self.name.rsplit('.').next().unwrap_or("");
    let mut chars = last.chars();
    let first = match chars.next() {
      Some(x) => x,
      None => panic!(
        "cannot derive a service name from package name `{}`",
        self.name
      ),
    };
    format!(
      "{}{}{}",
      first.to_uppercase(),
      chars.as_str(),
      self.config.service_suffix
    )
  }

  /// Checks that message, enum and rpc names are unique and that every
  /// message has consistent field positions.
  pub fn validate(&self) -> Result<(), IrError> {
    if let Some(x) = first_duplicate(self.messages.iter().map(|x| x.name.as_str())) {
      return Err(IrError::DuplicateMessage(x.to_string()));
    }
    if let Some(x) = first_duplicate(self.enums.iter().map(|x| x.name.as_str())) {
      return Err(IrError::DuplicateEnum(x.to_string()));
    }
    if let Some(x) = first_duplicate(self.rpcs.iter().map(|x| x.name.as_str())) {
      return Err(IrError::DuplicateRpc(x.to_string()));
    }
    for msg in &self.messages {
      msg.check_positions()?;
    }
    Ok(())
  }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "MessageData")]
pub struct Message {
  pub docs: Vec<String>,
  pub name: String,
  reserved: Vec<u32>,
  pub options: Options,
  pub fields: Vec<Field>,
}

#[derive(Deserialize)]
struct MessageData {
  #[serde(default)]
  docs: Vec<String>,
  name: String,
  #[serde(default)]
  reserved: Vec<u32>,
  #[serde(default)]
  options: Options,
  #[serde(default)]
  fields: Vec<Field>,
}

impl From<MessageData> for Message {
  fn from(data: MessageData) -> Self {
    let mut msg = Message {
      docs: data.docs,
      name: data.name,
      reserved: vec![],
      options: data.options,
      fields: data.fields,
    };
    for pos in data.reserved {
      msg.reserve(pos);
    }
    msg
  }
}

impl Message {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Default::default()
    }
  }

  pub fn reserved(&self) -> &[u32] {
    &self.reserved
  }

  /// Marks `pos` as never to be used again. Reserving twice is a no-op.
  pub fn reserve(&mut self, pos: u32) {
    if !self.is_reserved(pos) {
      self.reserved.push(pos);
    }
  }

  pub fn is_reserved(&self, pos: u32) -> bool {
    self.reserved.contains(&pos)
  }

  pub fn field(&self, name: &str) -> Option<&Field> {
    self.fields.iter().find(|x| x.name == name)
  }

  /// Positions are assigned by the caller. This checks they are non-zero,
  /// unique and clear of reserved positions.
  pub fn check_positions(&self) -> Result<(), IrError> {
    for field in &self.fields {
      if field.pos == 0 {
        return Err(IrError::InvalidPosition {
          message: self.name.clone(),
          field: field.name.clone(),
        });
      }
      if self.is_reserved(field.pos) {
        return Err(IrError::ReservedPosition {
          message: self.name.clone(),
          field: field.name.clone(),
          pos: field.pos,
        });
      }
    }
    if let Some(pos) = first_duplicate(self.fields.iter().map(|x| x.pos)) {
      return Err(IrError::DuplicatePosition {
        message: self.name.clone(),
        pos,
      });
    }
    Ok(())
  }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Field {
  pub docs: Vec<String>,
  pub name: String,
  pub pos: u32,
  pub repeated: bool,
  pub ty: Arc<Type>,
  pub options: Options,
}

impl Field {
  pub fn new(name: impl Into<String>, pos: u32, ty: Arc<Type>) -> Self {
    Self {
      docs: vec![],
      name: name.into(),
      pos,
      repeated: false,
      ty,
      options: Options::default(),
    }
  }

  pub fn repeated(self) -> Self {
    Self {
      repeated: true,
      ..self
    }
  }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Enum {
  pub docs: Vec<String>,
  pub name: String,
  pub options: Options,
  pub values: Vec<EnumValue>,
}

impl Enum {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Default::default()
    }
  }

  pub fn value(&self, name: &str) -> Option<&EnumValue> {
    self.values.iter().find(|x| x.name == name)
  }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
  pub docs: Vec<String>,
  pub name: String,
  pub value: u32,
  pub options: Options,
}

impl EnumValue {
  pub fn new(name: impl Into<String>, value: u32) -> Self {
    Self {
      name: name.into(),
      value,
      ..Default::default()
    }
  }
}

/// A method exposed through the package service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rpc {
  pub docs: Vec<String>,
  pub name: String,
  /// Receiver type of the source method. Empty for plain functions.
  pub recv: String,
  /// Name of the source method or function.
  pub method: String,
  /// The source callable takes a cancellation/deadline context.
  pub has_ctx: bool,
  /// The source callable can fail.
  pub has_error: bool,
  pub is_variadic: bool,
  pub input: Arc<Type>,
  pub output: Arc<Type>,
  pub options: Options,
}

impl Rpc {
  pub fn new(name: impl Into<String>, input: Arc<Type>, output: Arc<Type>) -> Self {
    let name = name.into();
    Self {
      docs: vec![],
      method: name.clone(),
      name,
      recv: String::new(),
      has_ctx: false,
      has_error: false,
      is_variadic: false,
      input,
      output,
      options: Options::default(),
    }
  }

  pub fn is_method(&self) -> bool {
    !self.recv.is_empty()
  }
}
