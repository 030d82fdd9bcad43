pub mod use_sign_out;

pub use use_sign_out::use_sign_out;
