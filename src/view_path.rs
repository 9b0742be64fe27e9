use std::fmt;
use std::path::{Path, MAIN_SEPARATOR};

/// Marker files that identify the root directory of a ClearCase view
const VIEW_MARKERS: [&str; 2] = ["view.dat", ".view.dat"];

/// Errors raised while splitting a legacy view path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewPathError {
    #[error("Invalid path: '{0}'; not a directory")]
    NotADirectory(String),
    #[error("Invalid path: '{0}'; cannot find view root, directory containing 'view.dat' file")]
    ViewRootNotFound(String),
}

/// A whole view path split into the ClearCase view root and the path
/// relative to that root.
///
/// Example: `C:\eprom\views\dev\epr_tls_dev\eprom\tools` has the view root
/// `C:\eprom\views\dev\epr_tls_dev` and the relative path `eprom\tools`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewPath {
    view_root: String,
    relative_path: String,
}

impl ViewPath {
    pub fn new(view_root: &str, relative_path: Option<&str>) -> Self {
        let relative = normalize_path(relative_path.unwrap_or(""));
        let relative = match relative.strip_prefix(MAIN_SEPARATOR) {
            Some(rest) if !rest.is_empty() => rest.to_string(),
            _ => relative,
        };

        Self {
            view_root: normalize_path(view_root),
            relative_path: relative,
        }
    }

    pub fn view_root(&self) -> &str {
        &self.view_root
    }

    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn whole_path(&self) -> String {
        if self.relative_path.is_empty() {
            return self.view_root.clone();
        }
        normalize_path(&format!(
            "{}{}{}",
            self.view_root, MAIN_SEPARATOR, self.relative_path
        ))
    }

    /// First component of the relative path
    pub fn vob(&self) -> &str {
        self.relative_path
            .split(MAIN_SEPARATOR)
            .next()
            .unwrap_or_default()
    }
}

impl fmt::Display for ViewPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ViewPath{{view_root='{}', relative_path='{}'}}",
            self.view_root, self.relative_path
        )
    }
}

/// Normalize a path string: trimmed, platform separators only, no repeated
/// separators and no trailing separator unless the path is a bare root.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());

    for ch in path.trim().chars() {
        let ch = if ch == '/' || ch == '\\' { MAIN_SEPARATOR } else { ch };
        if ch == MAIN_SEPARATOR && normalized.ends_with(MAIN_SEPARATOR) {
            continue;
        }
        normalized.push(ch);
    }

    if normalized.len() > 1 && normalized.ends_with(MAIN_SEPARATOR) && !is_drive_root(&normalized) {
        normalized.pop();
    }

    normalized
}

fn is_drive_root(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Split a whole path that points somewhere inside a view into its view root
/// and the remaining relative path.
///
/// The search starts at the parent of `whole_path` and walks upwards until a
/// directory holding `view.dat` or `.view.dat` is found.
pub fn resolve(whole_path: &str) -> Result<ViewPath, ViewPathError> {
    let normalized = normalize_path(whole_path);
    let path = Path::new(&normalized);

    if !path.is_dir() {
        let reported = std::path::absolute(path)
            .map(|abs| abs.to_string_lossy().into_owned())
            .unwrap_or(normalized);
        return Err(ViewPathError::NotADirectory(reported));
    }

    let root = find_view_root(path).ok_or_else(|| ViewPathError::ViewRootNotFound(normalized.clone()))?;

    let relative = path
        .strip_prefix(root)
        .map(|rel| rel.to_string_lossy().into_owned())
        .unwrap_or_default();

    let view_path = ViewPath::new(&root.to_string_lossy(), Some(&relative));
    tracing::debug!("Resolved {} to {}", normalized, view_path);

    Ok(view_path)
}

fn find_view_root(path: &Path) -> Option<&Path> {
    path.ancestors()
        .skip(1)
        .filter(|dir| !dir.as_os_str().is_empty())
        .find(|dir| VIEW_MARKERS.iter().any(|marker| dir.join(marker).is_file()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sep(path: &str) -> String {
        path.replace('/', &MAIN_SEPARATOR.to_string())
    }

    fn view_fixture(marker: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let view = dir.path().join("views").join("dev_view");
        fs::create_dir_all(view.join("eprom").join("tools")).unwrap();
        fs::write(view.join(marker), "").unwrap();
        dir
    }

    #[test]
    fn test_normalize_unifies_separators() {
        assert_eq!(normalize_path("a\\b/c"), sep("a/b/c"));
    }

    #[test]
    fn test_normalize_collapses_and_trims() {
        assert_eq!(normalize_path("  /vobs//proj///view1/ "), sep("/vobs/proj/view1"));
        assert_eq!(normalize_path("/"), sep("/"));
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn test_normalize_keeps_drive_root() {
        let root = format!("C:{}", MAIN_SEPARATOR);
        assert_eq!(normalize_path("C:\\"), root);
    }

    #[test]
    fn test_view_path_strips_leading_separator() {
        let view_path = ViewPath::new("/views/dev", Some("/eprom/tools/"));

        assert_eq!(view_path.view_root(), sep("/views/dev"));
        assert_eq!(view_path.relative_path(), sep("eprom/tools"));
        assert_eq!(view_path.whole_path(), sep("/views/dev/eprom/tools"));
        assert_eq!(view_path.vob(), "eprom");
    }

    #[test]
    fn test_view_path_without_relative_part() {
        let view_path = ViewPath::new("/views/dev", None);

        assert_eq!(view_path.relative_path(), "");
        assert_eq!(view_path.whole_path(), sep("/views/dev"));
        assert_eq!(view_path.vob(), "");
    }

    #[test]
    fn test_resolve_finds_view_dat() {
        let dir = view_fixture("view.dat");
        let whole = dir.path().join("views/dev_view/eprom/tools");

        let view_path = resolve(&whole.to_string_lossy()).unwrap();

        let expected_root = normalize_path(&dir.path().join("views/dev_view").to_string_lossy());
        assert_eq!(view_path.view_root(), expected_root);
        assert_eq!(view_path.relative_path(), sep("eprom/tools"));
        assert_eq!(view_path.vob(), "eprom");
    }

    #[test]
    fn test_resolve_finds_hidden_view_dat() {
        let dir = view_fixture(".view.dat");
        let whole = dir.path().join("views/dev_view/eprom");

        let view_path = resolve(&whole.to_string_lossy()).unwrap();

        assert_eq!(view_path.relative_path(), "eprom");
    }

    #[test]
    fn test_resolve_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = resolve(&missing.to_string_lossy()).unwrap_err();

        assert!(matches!(err, ViewPathError::NotADirectory(_)));
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_resolve_without_view_root() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain").join("dir");
        fs::create_dir_all(&plain).unwrap();

        let err = resolve(&plain.to_string_lossy()).unwrap_err();

        assert!(matches!(err, ViewPathError::ViewRootNotFound(_)));
        assert!(err.to_string().contains("cannot find view root"));
    }

    #[test]
    fn test_resolve_starts_from_parent() {
        // the marker inside the path itself does not count
        let dir = tempfile::tempdir().unwrap();
        let view = dir.path().join("lonely_view");
        fs::create_dir_all(&view).unwrap();
        fs::write(view.join("view.dat"), "").unwrap();

        let err = resolve(&view.to_string_lossy()).unwrap_err();

        assert!(matches!(err, ViewPathError::ViewRootNotFound(_)));
    }

    #[test]
    fn test_not_a_directory_reports_absolute_path() {
        let err = resolve("no-such-dir/inside").unwrap_err();

        let expected = std::env::current_dir()
            .unwrap()
            .join("no-such-dir")
            .join("inside");
        assert_eq!(
            err,
            ViewPathError::NotADirectory(expected.to_string_lossy().into_owned())
        );
    }
}
