use crate::LibraryName;
use std::slice;

pub const VRAPI: LibraryName = LibraryName::new("vrapi");
// Replace with the project's own native library. It must match the manifest's activity library.
pub const VRSAMPLEBASE: LibraryName = LibraryName::new("vrsamplebase");

const VRSAMPLE_LIBRARIES: &[LibraryName] = &[VRAPI, VRSAMPLEBASE];
const VRSAMPLE_DEPENDENCIES: &[Dependency] = &[Dependency {
    dependent: VRSAMPLEBASE,
    dependency: VRAPI,
}];

/// Vendor runtime first, then the application's native libraries in dependency order.
pub const VRSAMPLE_LOAD_ORDER: LoadOrder =
    LoadOrder::new(VRSAMPLE_LIBRARIES, VRSAMPLE_DEPENDENCIES);

/// Link-time edge: `dependent` references symbols exported by `dependency`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dependency {
    pub dependent: LibraryName,
    pub dependency: LibraryName,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("load order is empty")]
    Empty,
    #[error("library {0} is listed more than once")]
    Duplicate(LibraryName),
    #[error("dependency edge names unlisted library {0}")]
    UnknownLibrary(LibraryName),
    #[error("{dependency} must be loaded before {dependent}")]
    DependencyAfterDependent {
        dependent: LibraryName,
        dependency: LibraryName,
    },
}

/// Fixed sequence of libraries to load. Every instance is non-empty, free of duplicates and a
/// topological order of its dependency edges.
#[derive(Clone, Copy, Debug)]
pub struct LoadOrder {
    libraries: &'static [LibraryName],
    dependencies: &'static [Dependency],
}

impl LoadOrder {
    /// Panics on an invalid order, which fails compilation when evaluated in a const.
    pub const fn new(
        libraries: &'static [LibraryName],
        dependencies: &'static [Dependency],
    ) -> Self {
        match Self::try_new(libraries, dependencies) {
            Ok(order) => order,
            Err(_) => panic!("invalid library load order"),
        }
    }

    pub const fn try_new(
        libraries: &'static [LibraryName],
        dependencies: &'static [Dependency],
    ) -> Result<Self, OrderError> {
        let order = Self {
            libraries,
            dependencies,
        };

        match order.validate() {
            Ok(()) => Ok(order),
            Err(e) => Err(e),
        }
    }

    pub const fn validate(&self) -> Result<(), OrderError> {
        if self.libraries.is_empty() {
            return Err(OrderError::Empty);
        }

        let mut i = 0;
        while i < self.libraries.len() {
            let mut j = i + 1;
            while j < self.libraries.len() {
                if self.libraries[i].same_as(&self.libraries[j]) {
                    return Err(OrderError::Duplicate(self.libraries[i]));
                }
                j += 1;
            }
            i += 1;
        }

        let mut e = 0;
        while e < self.dependencies.len() {
            let edge = self.dependencies[e];
            let Some(dependent_idx) = self.position(&edge.dependent) else {
                return Err(OrderError::UnknownLibrary(edge.dependent));
            };
            let Some(dependency_idx) = self.position(&edge.dependency) else {
                return Err(OrderError::UnknownLibrary(edge.dependency));
            };

            // a self edge is a cycle and fails here too
            if dependency_idx >= dependent_idx {
                return Err(OrderError::DependencyAfterDependent {
                    dependent: edge.dependent,
                    dependency: edge.dependency,
                });
            }

            e += 1;
        }

        Ok(())
    }

    const fn position(&self, name: &LibraryName) -> Option<usize> {
        let mut i = 0;
        while i < self.libraries.len() {
            if self.libraries[i].same_as(name) {
                return Some(i);
            }
            i += 1;
        }

        None
    }

    pub fn iter(&self) -> std::iter::Copied<slice::Iter<'static, LibraryName>> {
        self.libraries.iter().copied()
    }

    pub const fn len(&self) -> usize {
        self.libraries.len()
    }

    pub const fn libraries(&self) -> &'static [LibraryName] {
        self.libraries
    }

    pub const fn dependencies(&self) -> &'static [Dependency] {
        self.dependencies
    }

    pub const fn vendor_runtime(&self) -> LibraryName {
        self.libraries[0]
    }

    /// The library the native activity dispatches into. Always the last entry.
    pub const fn activity_library(&self) -> LibraryName {
        self.libraries[self.libraries.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OTHER: LibraryName = LibraryName::new("vrsampleextra");

    #[test]
    fn test_vrsample_order() {
        let names = VRSAMPLE_LOAD_ORDER
            .iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>();

        assert_eq!(names, ["vrapi", "vrsamplebase"]);
        assert_eq!(VRSAMPLE_LOAD_ORDER.vendor_runtime(), VRAPI);
        assert_eq!(VRSAMPLE_LOAD_ORDER.activity_library(), VRSAMPLEBASE);
        assert_eq!(VRSAMPLE_LOAD_ORDER.validate(), Ok(()));
    }

    #[test]
    fn test_empty() {
        assert_eq!(LoadOrder::try_new(&[], &[]).unwrap_err(), OrderError::Empty);
    }

    #[test]
    fn test_duplicate() {
        assert_eq!(
            LoadOrder::try_new(&[VRAPI, VRSAMPLEBASE, VRAPI], &[]).unwrap_err(),
            OrderError::Duplicate(VRAPI)
        );
    }

    #[test]
    fn test_unknown_edge() {
        const EDGES: &[Dependency] = &[Dependency {
            dependent: OTHER,
            dependency: VRAPI,
        }];

        assert_eq!(
            LoadOrder::try_new(VRSAMPLE_LIBRARIES, EDGES).unwrap_err(),
            OrderError::UnknownLibrary(OTHER)
        );
    }

    #[test]
    fn test_dependent_first() {
        assert_eq!(
            LoadOrder::try_new(&[VRSAMPLEBASE, VRAPI], VRSAMPLE_DEPENDENCIES).unwrap_err(),
            OrderError::DependencyAfterDependent {
                dependent: VRSAMPLEBASE,
                dependency: VRAPI,
            }
        );
    }

    #[test]
    fn test_self_edge() {
        const EDGES: &[Dependency] = &[Dependency {
            dependent: VRAPI,
            dependency: VRAPI,
        }];

        assert!(LoadOrder::try_new(&[VRAPI], EDGES).is_err());
    }

    #[test]
    fn test_longer_chain() {
        const EDGES: &[Dependency] = &[
            Dependency {
                dependent: OTHER,
                dependency: VRAPI,
            },
            Dependency {
                dependent: VRSAMPLEBASE,
                dependency: OTHER,
            },
        ];

        let order = LoadOrder::try_new(&[VRAPI, OTHER, VRSAMPLEBASE], EDGES).unwrap();
        assert_eq!(order.len(), 3);
        assert_eq!(order.activity_library(), VRSAMPLEBASE);

        assert!(LoadOrder::try_new(&[VRAPI, VRSAMPLEBASE, OTHER], EDGES).is_err());
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_invalid() {
        LoadOrder::new(&[VRSAMPLEBASE, VRAPI], VRSAMPLE_DEPENDENCIES);
    }
}
