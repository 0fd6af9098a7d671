pub(crate) mod bucket;
pub(crate) mod calculator;
pub(crate) mod clock;
pub(crate) mod scale;
pub(crate) mod sequence_line;
