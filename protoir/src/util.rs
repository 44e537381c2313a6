use std::{collections::HashSet, hash::Hash};

pub fn first_duplicate<T>(iter: T) -> Option<T::Item>
where
  T: IntoIterator,
  T::Item: Eq + Hash,
{
  let mut uniq = HashSet::new();
  for x in iter {
    if uniq.contains(&x) {
      return Some(x);
    }
    uniq.insert(x);
  }
  None
}

/// Lexically normalizes a `/`-separated locator: repeated separators and `.`
/// segments are dropped and `..` removes the preceding segment. A rooted
/// locator never climbs above `/`; a relative one keeps its leading `..`.
/// The empty locator normalizes to `.`.
pub fn clean_locator(path: &str) -> String {
  let rooted = path.starts_with('/');
  let mut segments: Vec<&str> = vec![];
  for seg in path.split('/') {
    match seg {
      "" | "." => {}
      ".." => match segments.last().copied() {
        Some(last) if last != ".." => {
          segments.pop();
        }
        _ if rooted => {}
        _ => segments.push(".."),
      },
      _ => segments.push(seg),
    }
  }
  let joined = segments.join("/");
  match (rooted, joined.is_empty()) {
    (true, _) => format!("/{}", joined),
    (false, true) => ".".to_string(),
    (false, false) => joined,
  }
}

/// Joins a directory locator and a file name with `/`, the separator used by
/// schema import statements regardless of host platform, and normalizes the
/// result.
pub fn join_locator(dir: &str, file: &str) -> String {
  clean_locator(&format!("{}/{}", dir, file))
}
