// src/scrape/users.rs
use std::rc::Rc;

use crate::config::consts::{FRONT_PAGE, PICTURE_SUFFIX, USER_PAGE};
use crate::core::net::Session;
use crate::error::{Error, Result};
use crate::models::{User, UserKind};
use crate::specs::{front, user::{self, UserLayout}};

/// Id and kind of the logged-in account, read off the front page.
pub fn current_user_id(session: &Session) -> Result<(u32, UserKind)> {
    let doc = session.fetch(FRONT_PAGE, &[])?;
    front::parse(&doc)
}

/// One user's page header. Only students and teachers have one.
pub fn fetch_user(session: &Rc<Session>, id: u32, kind: UserKind) -> Result<User> {
    let (Some(page_type), Some(id_param)) = (kind.page_type(), kind.id_param()) else {
        return Err(Error::InvalidArgument(format!("user {id} is neither a student nor a teacher")));
    };

    let doc = session.fetch(USER_PAGE, &[("type", s!(page_type)), (id_param, id.to_string())])?;
    let mut details = user::parse(&doc, kind, &UserLayout::default())?;
    details.picture_url = details
        .picture_url
        .map(|src| format!("{}{PICTURE_SUFFIX}", session.options().absolute(&src)));

    logd!(id, ?kind, name = %details.name, "user fetched");
    Ok(User::new(Rc::clone(session), id, kind, details))
}
