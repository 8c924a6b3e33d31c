use std::fmt::{self, Display};

#[cfg(all(unix, not(target_os = "macos")))]
pub fn dynlib_fname(name: &str) -> String {
    format!("lib{name}.so")
}
#[cfg(windows)]
pub fn dynlib_fname(name: &str) -> String {
    format!("{name}.dll")
}
#[cfg(target_os = "macos")]
pub fn dynlib_fname(name: &str) -> String {
    format!("lib{name}.dylib")
}

/// Logical name of a shared library, without path, platform prefix or extension. The loader
/// reconstructs the file name per platform convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LibraryName(&'static str);

impl LibraryName {
    /// Panics (at compile time when used in a const) if the name is not a bare identifier.
    pub const fn new(name: &'static str) -> Self {
        let bytes = name.as_bytes();
        assert!(!bytes.is_empty(), "library name is empty");

        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[i];
            assert!(
                c != b'/' && c != b'\\' && c != b'.',
                "library name must not contain a path or extension"
            );
            i += 1;
        }

        Self(name)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    pub const fn same_as(&self, other: &LibraryName) -> bool {
        let (a, b) = (self.0.as_bytes(), other.0.as_bytes());
        if a.len() != b.len() {
            return false;
        }

        let mut i = 0;
        while i < a.len() {
            if a[i] != b[i] {
                return false;
            }
            i += 1;
        }

        true
    }

    pub fn file_name(&self) -> String {
        dynlib_fname(self.0)
    }
}

impl Display for LibraryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
