use crate::{LoadError, LoadOrder, LoadPrimitive};
use std::sync::OnceLock;
use vrsample_common::{error, info, parking_lot::Mutex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitState {
    NotYet,
    // Initialization ran. If it failed, the process is being torn down.
    Done,
}

/// Requests every library of `order` in sequence, stopping at the first failure. Returns the
/// number of libraries loaded.
pub fn load_in_order(
    loader: &mut impl LoadPrimitive,
    order: &LoadOrder,
) -> Result<usize, LoadError> {
    for (idx, name) in order.iter().enumerate() {
        info!("Loading {name} ({}/{})", idx + 1, order.len());

        loader.load(name)?;
    }

    Ok(order.len())
}

/// One-shot loader of a fixed [`LoadOrder`]. The first initialization issues the load requests,
/// every later one returns the recorded outcome without touching the loader.
pub struct Trampoline<L> {
    order: LoadOrder,
    loader: Mutex<L>,
    outcome: OnceLock<Result<(), LoadError>>,
}

impl<L> Trampoline<L> {
    pub const fn new(order: LoadOrder, loader: L) -> Self {
        Self {
            order,
            loader: Mutex::new(loader),
            outcome: OnceLock::new(),
        }
    }

    pub fn order(&self) -> &LoadOrder {
        &self.order
    }

    pub fn state(&self) -> InitState {
        if self.outcome.get().is_some() {
            InitState::Done
        } else {
            InitState::NotYet
        }
    }

    pub fn with_loader<R>(&self, f: impl FnOnce(&L) -> R) -> R {
        f(&self.loader.lock())
    }
}

impl<L: LoadPrimitive> Trampoline<L> {
    pub fn initialize(&self) -> Result<(), LoadError> {
        self.outcome
            .get_or_init(|| {
                let mut loader = self.loader.lock();

                load_in_order(&mut *loader, &self.order)
                    .map(|count| info!("{count} libraries resident"))
            })
            .clone()
    }

    /// Initializes, terminating the process if any library fails to load. A broken package cannot
    /// be recovered from and the linker would refuse a retry anyway.
    pub fn ensure_initialized(&self) {
        if let Err(e) = self.initialize() {
            error!("Fatal: {e}");

            std::process::abort();
        }
    }
}
