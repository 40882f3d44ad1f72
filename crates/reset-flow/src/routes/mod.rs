pub mod not_found;
pub mod reset_password;

use dioxus::prelude::*;

use not_found::NotFound;
use reset_password::ResetPassword;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    ResetPassword {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}
