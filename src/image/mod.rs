pub mod buffer;
pub mod frame;
pub mod io;
pub mod packed;
pub mod pixel;
pub mod traits;
pub mod u8;

pub use self::buffer::Image;
pub use self::frame::Frame;
pub use self::pixel::{Pixel, Rgb};
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
