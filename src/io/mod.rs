pub mod codec;
pub mod naming;

pub use codec::{decode_image, encode_bmp, open_image, save_bmp};
pub use naming::{default_output_path, output_file_name};
