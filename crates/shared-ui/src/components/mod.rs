// Standalone components
pub mod button;
pub mod card;
pub mod form;
pub mod input;

// Primitive wrappers
pub mod toast;

pub use button::*;
pub use card::*;
pub use form::*;
pub use input::*;
pub use toast::*;
