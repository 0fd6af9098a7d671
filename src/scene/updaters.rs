use std::fmt;

/// Handle returned by [`Updaters::add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct UpdaterId(pub u64);

type UpdateFn<'a, W> = Box<dyn FnMut(&mut W) + 'a>;

struct Entry<'a, W> {
    id: UpdaterId,
    owner: String,
    f: UpdateFn<'a, W>,
}

/// Per-frame update callbacks over a shared state `W`, run in insertion order.
///
/// Each callback is registered under an owner label so everything attached to one part can be
/// detached at once.
pub struct Updaters<'a, W> {
    next_id: u64,
    entries: Vec<Entry<'a, W>>,
}

impl<W> Default for Updaters<'_, W> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<'a, W> Updaters<'a, W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, owner: impl Into<String>, f: impl FnMut(&mut W) + 'a) -> UpdaterId {
        let id = UpdaterId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            owner: owner.into(),
            f: Box::new(f),
        });
        id
    }

    /// Detach a single updater. Returns whether it was present.
    pub fn remove(&mut self, id: UpdaterId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Detach every updater registered under `owner`. Returns how many were removed.
    pub fn remove_owner(&mut self, owner: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.owner != owner);
        before - self.entries.len()
    }

    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.owner.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn run(&mut self, world: &mut W) {
        for entry in &mut self.entries {
            (entry.f)(world);
        }
    }
}

impl<W> fmt::Debug for Updaters<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (e.id, e.owner.as_str())))
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/updaters.rs"]
mod tests;
