mod contact;
pub mod error;

pub use self::contact::ContactService;
