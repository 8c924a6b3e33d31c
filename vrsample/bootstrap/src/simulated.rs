use crate::{LibraryName, LoadError, LoadPrimitive};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Default)]
struct PackagedLibrary {
    needed: Vec<LibraryName>,
    broken: bool,
}

/// In-process model of the platform dynamic linker used to instrument load requests.
///
/// A packaged library only links if every library in its `needed` list is already resident. Any
/// failed request poisons the name: later requests for it fail without being attempted, the way
/// the bionic linker refuses to retry.
#[derive(Default)]
pub struct SimulatedLinker {
    packaged: HashMap<LibraryName, PackagedLibrary>,
    loaded: Vec<LibraryName>,
    negative_cache: HashSet<LibraryName>,
    requests: Vec<LibraryName>,
}

impl SimulatedLinker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library(mut self, name: LibraryName, needed: &[LibraryName]) -> Self {
        self.packaged.insert(
            name,
            PackagedLibrary {
                needed: needed.to_vec(),
                broken: false,
            },
        );

        self
    }

    /// Packages a library that references a symbol nobody exports.
    pub fn with_broken_library(mut self, name: LibraryName, needed: &[LibraryName]) -> Self {
        self.packaged.insert(
            name,
            PackagedLibrary {
                needed: needed.to_vec(),
                broken: true,
            },
        );

        self
    }

    /// Every name passed to the load primitive, in request order.
    pub fn requests(&self) -> &[LibraryName] {
        &self.requests
    }

    /// Resident libraries, in the order their constructors ran.
    pub fn loaded(&self) -> &[LibraryName] {
        &self.loaded
    }

    pub fn is_poisoned(&self, name: LibraryName) -> bool {
        self.negative_cache.contains(&name)
    }

    fn fail(&mut self, name: LibraryName, message: String) -> LoadError {
        self.negative_cache.insert(name);

        LoadError::classify(name, message)
    }
}

impl LoadPrimitive for SimulatedLinker {
    fn load(&mut self, name: LibraryName) -> Result<(), LoadError> {
        self.requests.push(name);

        let file_name = name.file_name();

        if self.negative_cache.contains(&name) {
            return Err(LoadError::Broken {
                name,
                message: format!("dlopen failed: \"{file_name}\" has already failed to load"),
            });
        }

        if self.loaded.contains(&name) {
            return Ok(());
        }

        let Some(library) = self.packaged.get(&name).cloned() else {
            return Err(self.fail(
                name,
                format!("dlopen failed: library \"{file_name}\" not found"),
            ));
        };

        if let Some(dependency) = library
            .needed
            .iter()
            .find(|needed| !self.loaded.contains(*needed))
        {
            return Err(self.fail(
                name,
                format!(
                    "dlopen failed: cannot locate symbol exported by \"{}\" referenced by \
                     \"{file_name}\"",
                    dependency.file_name()
                ),
            ));
        }

        if library.broken {
            return Err(self.fail(
                name,
                format!("dlopen failed: cannot locate symbol referenced by \"{file_name}\""),
            ));
        }

        self.loaded.push(name);

        Ok(())
    }
}
