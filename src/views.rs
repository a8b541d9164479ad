//! Server-side HTML views rendered with Handlebars.

use axum::response::Html;
use handlebars::{Handlebars, TemplateError};
use serde::Serialize;
use serde_json::{Map, Value};
use tower_cookies::{Cookie, Cookies};

use crate::domain::validation::FieldErrors;
use crate::error::AppError;
use crate::i18n::Locale;

pub const WELCOME: &str = "welcome";
pub const FIND_OWNERS: &str = "owners/findOwners";
pub const OWNERS_LIST: &str = "owners/ownersList";
pub const OWNER_DETAILS: &str = "owners/ownerDetails";
pub const OWNER_FORM: &str = "owners/createOrUpdateOwnerForm";
pub const PET_FORM: &str = "pets/createOrUpdatePetForm";
pub const VISIT_FORM: &str = "pets/createOrUpdateVisitForm";
pub const VET_LIST: &str = "vets/vetList";

const TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("../templates/layout.hbs")),
    ("pagination", include_str!("../templates/pagination.hbs")),
    (WELCOME, include_str!("../templates/welcome.hbs")),
    (FIND_OWNERS, include_str!("../templates/owners/findOwners.hbs")),
    (OWNERS_LIST, include_str!("../templates/owners/ownersList.hbs")),
    (OWNER_DETAILS, include_str!("../templates/owners/ownerDetails.hbs")),
    (OWNER_FORM, include_str!("../templates/owners/createOrUpdateOwnerForm.hbs")),
    (PET_FORM, include_str!("../templates/pets/createOrUpdatePetForm.hbs")),
    (VISIT_FORM, include_str!("../templates/pets/createOrUpdateVisitForm.hbs")),
    (VET_LIST, include_str!("../templates/vets/vetList.hbs")),
];

/// Compiled template registry, shared by all handlers.
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }
        Ok(Self { registry })
    }

    pub fn render(&self, name: &str, model: &ViewModel) -> Result<Html<String>, AppError> {
        Ok(Html(self.registry.render(name, &model.data)?))
    }
}

/// Data handed to a template. Every model carries the message catalog as `msg`,
/// the locale code as `lang`, and the pending flash message if there is one.
pub struct ViewModel {
    locale: Locale,
    data: Map<String, Value>,
}

impl ViewModel {
    pub fn new(locale: Locale, flash: Option<Flash>) -> Self {
        let mut data = Map::new();
        data.insert("lang".into(), Value::from(locale.code()));
        data.insert("msg".into(), to_value(locale.messages()));
        if let Some(flash) = flash {
            data.insert("flash".into(), flash.localized(locale));
        }
        Self { locale, data }
    }

    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        self.data.insert(key.to_string(), to_value(value));
        self
    }

    pub fn with_errors(self, errors: &FieldErrors) -> Self {
        let localized = errors.localized(self.locale);
        self.with("errors", localized)
    }
}

// Domain types serialize infallibly; a failure here would be a bug in a Serialize impl.
fn to_value(value: impl Serialize) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

pub const FLASH_COOKIE: &str = "petclinic_flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashKind {
    Message,
    Error,
}

/// One-shot notice shown on the page rendered after a redirect.
/// Only the message key travels in the cookie; the text is looked up at render time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub key: String,
}

impl Flash {
    pub fn message(key: &str) -> Self {
        Self {
            kind: FlashKind::Message,
            key: key.to_string(),
        }
    }

    pub fn error(key: &str) -> Self {
        Self {
            kind: FlashKind::Error,
            key: key.to_string(),
        }
    }

    fn encode(&self) -> String {
        let kind = match self.kind {
            FlashKind::Message => "message",
            FlashKind::Error => "error",
        };
        format!("{kind}:{}", self.key)
    }

    fn decode(value: &str) -> Option<Self> {
        match value.split_once(':')? {
            ("message", key) => Some(Flash::message(key)),
            ("error", key) => Some(Flash::error(key)),
            _ => None,
        }
    }

    fn localized(&self, locale: Locale) -> Value {
        let field = match self.kind {
            FlashKind::Message => "message",
            FlashKind::Error => "error",
        };
        serde_json::json!({ field: locale.message(&self.key) })
    }

    pub fn set(self, cookies: &Cookies) {
        let mut cookie = Cookie::new(FLASH_COOKIE, self.encode());
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookies.add(cookie);
    }

    /// Reads and clears the pending flash.
    pub fn take(cookies: &Cookies) -> Option<Self> {
        let flash = cookies.get(FLASH_COOKIE)?;
        let decoded = Flash::decode(flash.value());
        let mut expired = Cookie::new(FLASH_COOKIE, "");
        expired.set_path("/");
        cookies.remove(expired);
        decoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_templates_compile() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn flash_cookie_value_round_trips() {
        let flash = Flash::error("flash.ownerCreateFailed");
        assert_eq!(Flash::decode(&flash.encode()), Some(flash));
        assert_eq!(Flash::decode("bogus"), None);
    }

    #[test]
    fn view_model_carries_messages_and_flash() {
        let model = ViewModel::new(Locale::De, Some(Flash::message("flash.visitBooked")))
            .with("answer", 42);
        assert_eq!(model.data["lang"], "de");
        assert_eq!(model.data["msg"]["owners"], "Besitzer");
        assert_eq!(model.data["flash"]["message"], "Ihr Besuch wurde gebucht");
        assert_eq!(model.data["answer"], 42);
    }

    #[test]
    fn welcome_page_renders_translated() {
        let views = Views::new().unwrap();
        let html = views.render(WELCOME, &ViewModel::new(Locale::Es, None)).unwrap();
        assert!(html.0.contains("Bienvenido"));
    }
}
