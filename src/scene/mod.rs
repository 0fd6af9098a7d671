pub(crate) mod item;
pub(crate) mod updaters;
