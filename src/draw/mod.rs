mod alert;
mod drawer;
mod layers;

pub use self::alert::category_colors;
pub use self::drawer::{DrawContext, Drawer};
pub use self::layers::{Layer, Layers};
