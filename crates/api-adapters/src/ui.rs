//! Askama templates for every page. Flash messages arrive as a query
//! parameter; an empty string means no flash.

use askama::Template;
use domains::models::ImageEntry;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate<'a> {
    pub flash: &'a str,
}

#[derive(Template)]
#[template(path = "gallery.html")]
pub struct GalleryTemplate<'a> {
    pub images: &'a [ImageEntry],
    pub flash: &'a str,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate<'a> {
    pub images: &'a [ImageEntry],
    pub flash: &'a str,
}

#[derive(Template)]
#[template(path = "guest.html")]
pub struct GuestTemplate<'a> {
    pub images: &'a [ImageEntry],
}

#[derive(Template)]
#[template(path = "chat.html")]
pub struct ChatTemplate {
    /// Renders per-message delete buttons.
    pub can_moderate: bool,
    /// Renders the clear-all control.
    pub can_clear: bool,
}
