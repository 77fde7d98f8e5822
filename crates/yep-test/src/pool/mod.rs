// This file is autogenerated by yep-generate
// DO NOT MODIFY THIS FILE - ANY CHANGES WILL BE OVERWRITTEN

mod post;
pub use post::*;
mod profile;
pub use profile::*;
mod tag;
pub use tag::*;
mod user;
pub use user::*;
