pub mod checkout_session;
pub mod redirect_html;

pub use checkout_session::*;
pub use redirect_html::*;
