use std::fmt::{self, Debug, Display};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::IrError;

/// Metadata about the source-language type a schema type was mapped from.
///
/// The IR only ever asks whether the originating type admits a null value.
pub trait SourceType: Debug + Send + Sync {
  fn is_nullable(&self) -> bool;
}

pub type SourceRef = Arc<dyn SourceType>;

/// A primitive schema type such as `int32`, `string` or `bool`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Basic {
  pub name: String,
  #[serde(skip)]
  src: OnceCell<SourceRef>,
}

impl Basic {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      src: OnceCell::new(),
    }
  }

  /// Primitives have no null representation; the source is never consulted.
  pub fn is_nullable(&self) -> bool {
    false
  }
}

impl Display for Basic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name)
  }
}

/// A type defined elsewhere, possibly in another package.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Named {
  pub package: String,
  pub name: String,
  /// Whether the type was generated by this tool rather than defined by the user.
  pub generated: bool,
  #[serde(skip)]
  src: OnceCell<SourceRef>,
}

impl Named {
  pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      package: package.into(),
      name: name.into(),
      generated: false,
      src: OnceCell::new(),
    }
  }

  pub fn generated(package: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      generated: true,
      ..Self::new(package, name)
    }
  }

  pub fn is_nullable(&self) -> bool {
    match self.src.get() {
      Some(src) => src.is_nullable(),
      // Named types are nullable unless the source says otherwise.
      None => true,
    }
  }
}

impl Display for Named {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.package, self.name)
  }
}

/// A declared rename of `underlying` to `ty`. Renders as the underlying type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Alias {
  pub ty: Arc<Type>,
  pub underlying: Arc<Type>,
  #[serde(skip)]
  src: OnceCell<SourceRef>,
}

impl Alias {
  pub fn new(ty: Arc<Type>, underlying: Arc<Type>) -> Self {
    Self {
      ty,
      underlying,
      src: OnceCell::new(),
    }
  }

  pub fn is_nullable(&self) -> bool {
    match self.src.get() {
      Some(src) => src.is_nullable(),
      None => self.underlying.is_nullable(),
    }
  }
}

impl Display for Alias {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.underlying)
  }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Map {
  pub key: Arc<Type>,
  pub value: Arc<Type>,
  #[serde(skip)]
  src: OnceCell<SourceRef>,
}

impl Map {
  pub fn new(key: Arc<Type>, value: Arc<Type>) -> Self {
    Self {
      key,
      value,
      src: OnceCell::new(),
    }
  }

  /// Only map values can be null, never the entry itself.
  pub fn is_nullable(&self) -> bool {
    self.value.is_nullable()
  }
}

impl Display for Map {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "map<{}, {}>", self.key, self.value)
  }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Type {
  Basic(Basic),
  Named(Named),
  Alias(Alias),
  Map(Map),
}

impl Type {
  pub fn basic(name: impl Into<String>) -> Self {
    Self::Basic(Basic::new(name))
  }

  pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
    Self::Named(Named::new(package, name))
  }

  pub fn generated_named(package: impl Into<String>, name: impl Into<String>) -> Self {
    Self::Named(Named::generated(package, name))
  }

  pub fn alias(ty: Arc<Type>, underlying: Arc<Type>) -> Self {
    Self::Alias(Alias::new(ty, underlying))
  }

  pub fn map(key: Arc<Type>, value: Arc<Type>) -> Self {
    Self::Map(Map::new(key, value))
  }

  fn source_slot(&self) -> &OnceCell<SourceRef> {
    match self {
      Self::Basic(x) => &x.src,
      Self::Named(x) => &x.src,
      Self::Alias(x) => &x.src,
      Self::Map(x) => &x.src,
    }
  }

  pub fn source(&self) -> Option<&SourceRef> {
    self.source_slot().get()
  }

  /// Attaches the source descriptor. Types are shared between fields, so the
  /// slot can be filled only once; later calls fail and keep the first value.
  pub fn set_source(&self, src: SourceRef) -> Result<(), IrError> {
    self
      .source_slot()
      .set(src)
      .map_err(|_| IrError::SourceAlreadySet(self.to_string()))
  }

  pub fn is_nullable(&self) -> bool {
    match self {
      Self::Basic(x) => x.is_nullable(),
      Self::Named(x) => x.is_nullable(),
      Self::Alias(x) => x.is_nullable(),
      Self::Map(x) => x.is_nullable(),
    }
  }
}

impl Display for Type {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Basic(x) => write!(f, "{}", x),
      Self::Named(x) => write!(f, "{}", x),
      Self::Alias(x) => write!(f, "{}", x),
      Self::Map(x) => write!(f, "{}", x),
    }
  }
}

/// Result of mapping a source-language type to a schema type.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProtoType {
  pub name: String,
  pub package: String,
  /// Locator of the schema file that must be imported to use this type.
  pub import: Option<String>,
  pub basic: bool,
}

impl ProtoType {
  pub fn basic(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      basic: true,
      ..Default::default()
    }
  }

  pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      package: package.into(),
      ..Default::default()
    }
  }

  pub fn with_import(self, import: impl Into<String>) -> Self {
    Self {
      import: Some(import.into()),
      ..self
    }
  }

  pub fn import_locator(&self) -> Option<&str> {
    self.import.as_deref().filter(|x| !x.is_empty())
  }

  pub fn to_type(&self) -> Type {
    if self.basic {
      Type::basic(self.name.as_str())
    } else {
      Type::named(self.package.as_str(), self.name.as_str())
    }
  }
}
