mod event;

pub use event::{Event, PayloadPan, PayloadRebuild, PayloadZoom};
