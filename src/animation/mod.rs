pub(crate) mod task;
pub(crate) mod waveform;
