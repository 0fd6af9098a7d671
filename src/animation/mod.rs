pub(crate) mod compose;
pub(crate) mod driver;
pub(crate) mod ease;
pub(crate) mod group;
pub(crate) mod lerp;
pub(crate) mod timeline;
