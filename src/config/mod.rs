pub mod mapping;
pub mod settings;
pub mod validator;

pub use mapping::*;
pub use settings::*;
pub use validator::*;
