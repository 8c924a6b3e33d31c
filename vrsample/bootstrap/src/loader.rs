use crate::LibraryName;
use libloading::Library;
use std::path::{Path, PathBuf};

/// Synchronous request to map a library, resolve its dependencies and run its constructors.
/// Requesting an already loaded library succeeds without side effects.
pub trait LoadPrimitive {
    fn load(&mut self, name: LibraryName) -> Result<(), LoadError>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("library {name} not found: {message}")]
    Missing { name: LibraryName, message: String },
    #[error("library {name} failed to link: {message}")]
    Broken { name: LibraryName, message: String },
}

impl LoadError {
    /// Sorts a loader diagnostic into the two failure kinds. A missing transitive dependency counts
    /// as a broken library, not a missing one.
    pub fn classify(name: LibraryName, message: String) -> Self {
        let file_name = name.file_name();

        // bionic: `dlopen failed: library "libvrapi.so" not found`, with a "needed by" suffix when
        // the missing file is someone else's dependency
        let bionic_missing = message.contains(&format!("library \"{file_name}\" not found"))
            && !message.contains("needed by");
        // glibc: `libvrapi.so: cannot open shared object file: No such file or directory`
        let glibc_missing =
            message.contains(&format!("{file_name}: cannot open shared object file"));

        if bionic_missing || glibc_missing {
            LoadError::Missing { name, message }
        } else {
            LoadError::Broken { name, message }
        }
    }

    pub fn library(&self) -> LibraryName {
        match self {
            LoadError::Missing { name, .. } | LoadError::Broken { name, .. } => *name,
        }
    }
}

#[cfg(unix)]
unsafe fn open(file: &Path) -> Result<Library, libloading::Error> {
    use libloading::os::unix::{self, RTLD_LOCAL, RTLD_NOW};

    // Bind eagerly so unresolved symbols fail here and not on first call
    unsafe { unix::Library::open(Some(file), RTLD_NOW | RTLD_LOCAL) }.map(Into::into)
}
#[cfg(windows)]
unsafe fn open(file: &Path) -> Result<Library, libloading::Error> {
    unsafe { Library::new(file) }
}

/// The platform dynamic linker. Loaded libraries are retained and never unloaded.
#[derive(Default)]
pub struct DynamicLinker {
    // None: bare file names, resolved by the loader's own search path (the app namespace on Android)
    search_dir: Option<PathBuf>,
    libraries: Vec<(LibraryName, Library)>,
}

impl DynamicLinker {
    pub const fn new() -> Self {
        Self {
            search_dir: None,
            libraries: Vec::new(),
        }
    }

    pub fn with_search_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            search_dir: Some(dir.into()),
            libraries: Vec::new(),
        }
    }

    pub fn loaded(&self) -> impl Iterator<Item = LibraryName> + '_ {
        self.libraries.iter().map(|(name, _)| *name)
    }

    /// Looks up `symbol` (nul terminated) in a library loaded by this linker.
    ///
    /// # Safety
    /// `T` must match the actual type of the exported item.
    pub unsafe fn get<T: Copy>(&self, name: LibraryName, symbol: &[u8]) -> Option<T> {
        let (_, library) = self.libraries.iter().find(|(loaded, _)| *loaded == name)?;

        // Libraries are never closed, so the value may outlive the borrow
        unsafe { library.get::<T>(symbol) }.ok().map(|symbol| *symbol)
    }
}

impl LoadPrimitive for DynamicLinker {
    fn load(&mut self, name: LibraryName) -> Result<(), LoadError> {
        let file = match &self.search_dir {
            Some(dir) => dir.join(name.file_name()),
            None => PathBuf::from(name.file_name()),
        };

        // SAFETY: the constructors run here belong to libraries shipped in the application package
        let library = unsafe { open(&file) }
            .map_err(|e| LoadError::classify(name, e.to_string()))?;

        // A repeated request only bumped the loader's reference count; the first handle is kept
        if !self.libraries.iter().any(|(loaded, _)| *loaded == name) {
            self.libraries.push((name, library));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VRAPI: LibraryName = LibraryName::new("vrapi");
    const ABSENT: LibraryName = LibraryName::new("vrsample_absent_library");

    #[test]
    fn test_classify_bionic() {
        let missing = LoadError::classify(
            VRAPI,
            format!("dlopen failed: library \"{}\" not found", VRAPI.file_name()),
        );
        assert!(matches!(missing, LoadError::Missing { .. }));

        let dependency_missing = LoadError::classify(
            LibraryName::new("vrsamplebase"),
            format!(
                "dlopen failed: library \"{}\" not found: needed by libvrsamplebase.so",
                VRAPI.file_name()
            ),
        );
        assert!(matches!(dependency_missing, LoadError::Broken { .. }));

        let unresolved = LoadError::classify(
            VRAPI,
            "dlopen failed: cannot locate symbol \"vrapi_Initialize\"".into(),
        );
        assert!(matches!(unresolved, LoadError::Broken { .. }));
        assert_eq!(unresolved.library(), VRAPI);
    }

    #[test]
    fn test_classify_glibc() {
        let missing = LoadError::classify(
            VRAPI,
            format!(
                "{}: cannot open shared object file: No such file or directory",
                VRAPI.file_name()
            ),
        );
        assert!(matches!(missing, LoadError::Missing { .. }));

        let dependency_missing = LoadError::classify(
            LibraryName::new("vrsamplebase"),
            format!(
                "{}: cannot open shared object file: No such file or directory",
                VRAPI.file_name()
            ),
        );
        assert!(matches!(dependency_missing, LoadError::Broken { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_dynamic_linker_missing() {
        let mut linker = DynamicLinker::new();

        let err = linker.load(ABSENT).unwrap_err();
        assert!(matches!(err, LoadError::Missing { .. }), "{err}");
        assert_eq!(linker.loaded().count(), 0);
    }

    #[cfg(target_os = "linux")]
    fn build_fixture(dir: &Path, name: LibraryName, source: &str) {
        let source_path = dir.join(format!("{name}.c"));
        std::fs::write(&source_path, source).unwrap();

        // undefined symbols are allowed in shared objects; they only fail when bound at load time
        let status = std::process::Command::new("cc")
            .args(["-shared", "-fPIC", "-o"])
            .arg(dir.join(name.file_name()))
            .arg(&source_path)
            .status()
            .unwrap();
        assert!(status.success());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_dynamic_linker_fixtures() {
        const ENTRY: LibraryName = LibraryName::new("vrsamplefixtureentry");
        const UNRESOLVED: LibraryName = LibraryName::new("vrsamplefixtureunresolved");

        let dir = std::env::temp_dir().join(format!("vrsample_linker_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        build_fixture(&dir, ENTRY, "int vrsample_fixture_entry(void) { return 7; }\n");
        build_fixture(
            &dir,
            UNRESOLVED,
            "extern int nobody_exports_this(void);\n\
             int vrsample_fixture_call(void) { return nobody_exports_this(); }\n",
        );

        let mut linker = DynamicLinker::with_search_dir(&dir);

        linker.load(ENTRY).unwrap();
        linker.load(ENTRY).unwrap();
        assert_eq!(linker.loaded().collect::<Vec<_>>(), [ENTRY]);

        let entry = unsafe {
            linker.get::<unsafe extern "C" fn() -> i32>(ENTRY, b"vrsample_fixture_entry\0")
        }
        .unwrap();
        assert_eq!(unsafe { entry() }, 7);
        assert!(unsafe { linker.get::<unsafe extern "C" fn() -> i32>(ENTRY, b"absent\0") }
            .is_none());

        let err = linker.load(UNRESOLVED).unwrap_err();
        assert!(
            matches!(&err, LoadError::Broken { message, .. } if message.contains("nobody_exports_this")),
            "{err}"
        );
        assert_eq!(linker.loaded().count(), 1);

        let missing = DynamicLinker::with_search_dir(&dir)
            .load(LibraryName::new("vrsamplefixtureabsent"))
            .unwrap_err();
        assert!(matches!(missing, LoadError::Missing { .. }), "{missing}");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_symbol_of_unloaded_library() {
        let linker = DynamicLinker::new();

        assert!(unsafe { linker.get::<extern "C" fn()>(ABSENT, b"entry\0") }.is_none());
    }
}
