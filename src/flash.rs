//! One-shot flash messages carried across a redirect in a cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Warning => "warning",
            FlashLevel::Danger => "danger",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(FlashLevel::Success),
            "info" => Some(FlashLevel::Info),
            "warning" => Some(FlashLevel::Warning),
            "danger" => Some(FlashLevel::Danger),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Danger, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Warning, message)
    }

    /// Cookie value: `level:message`, percent-encoded.
    fn encode(&self) -> String {
        urlencoding::encode(&format!("{}:{}", self.level.as_str(), self.message)).into_owned()
    }

    fn decode(value: &str) -> Option<Self> {
        let decoded = urlencoding::decode(value).ok()?;
        let (level, message) = decoded.split_once(':')?;
        Some(Self::new(FlashLevel::parse(level)?, message))
    }
}

/// Store a flash message for the next page load.
pub fn set_flash(jar: CookieJar, flash: &Flash) -> CookieJar {
    let mut cookie = Cookie::new(FLASH_COOKIE, flash.encode());
    cookie.set_path("/");
    cookie.set_http_only(true);
    jar.add(cookie)
}

/// Read and clear the pending flash message, if any.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let flash = Flash::decode(cookie.value());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, flash)
}
