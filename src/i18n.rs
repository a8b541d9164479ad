//! Message catalog and locale selection.
//!
//! The locale comes from the `lang` query parameter and sticks for the
//! session through the `petclinic_lang` cookie.

use axum::{extract::Request, middleware::Next, response::Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tower_cookies::{Cookie, Cookies};

pub const LANG_COOKIE: &str = "petclinic_lang";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
    Es,
}

// (key, [en, de, es])
const MESSAGES: &[(&str, [&str; 3])] = &[
    ("welcome", ["Welcome", "Willkommen", "Bienvenido"]),
    ("required", ["is required", "ist erforderlich", "es requerido"]),
    ("notFound", ["has not been found", "wurde nicht gefunden", "no ha sido encontrado"]),
    ("duplicate", ["is already in use", "ist bereits vergeben", "ya se encuentra en uso"]),
    ("nonNumeric", ["must be all numeric", "darf nur numerisch sein", "sólo debe contener numeros"]),
    ("typeMismatch", ["invalid value", "ungültiger Wert", "valor inválido"]),
    ("typeMismatch.date", ["invalid date", "ungültiges Datum", "fecha invalida"]),
    ("typeMismatch.birthDate", ["invalid date", "ungültiges Datum", "fecha invalida"]),
    (
        "telephone.invalid",
        [
            "Telephone must be a 10-digit number",
            "Telefonnummer muss aus 10 Ziffern bestehen",
            "El número de teléfono debe tener 10 dígitos",
        ],
    ),
    ("owner", ["Owner", "Besitzer", "Propietario"]),
    ("firstName", ["First Name", "Vorname", "Nombre"]),
    ("lastName", ["Last Name", "Nachname", "Apellido"]),
    ("address", ["Address", "Adresse", "Dirección"]),
    ("city", ["City", "Stadt", "Ciudad"]),
    ("telephone", ["Telephone", "Telefon", "Teléfono"]),
    ("owners", ["Owners", "Besitzer", "Propietarios"]),
    ("addOwner", ["Add Owner", "Besitzer hinzufügen", "Añadir propietario"]),
    ("findOwner", ["Find Owner", "Besitzer finden", "Buscar propietario"]),
    ("findOwners", ["Find Owners", "Besitzer suchen", "Buscar propietarios"]),
    ("updateOwner", ["Update Owner", "Besitzer aktualisieren", "Actualizar propietario"]),
    ("editOwner", ["Edit Owner", "Besitzer bearbeiten", "Editar propietario"]),
    ("ownerInformation", ["Owner Information", "Besitzerinformationen", "Información del propietario"]),
    ("vets", ["Veterinarians", "Tierärzte", "Veterinarios"]),
    ("name", ["Name", "Name", "Nombre"]),
    ("specialties", ["Specialties", "Fachgebiete", "Especialidades"]),
    ("none", ["none", "keine", "ninguno"]),
    ("pages", ["pages", "Seiten", "páginas"]),
    ("first", ["First", "Erste", "Primero"]),
    ("next", ["Next", "Nächste", "Siguiente"]),
    ("previous", ["Previous", "Vorherige", "Anterior"]),
    ("last", ["Last", "Letzte", "Último"]),
    ("somethingHappened", ["Something happened...", "Etwas ist passiert...", "Algo pasó..."]),
    ("pets", ["Pets", "Haustiere", "Mascotas"]),
    ("petsAndVisits", ["Pets and Visits", "Haustiere und Besuche", "Mascotas y visitas"]),
    ("pet", ["Pet", "Haustier", "Mascota"]),
    ("newPet", ["New Pet", "Neues Haustier", "Nueva mascota"]),
    ("addNewPet", ["Add New Pet", "Neues Haustier hinzufügen", "Añadir nueva mascota"]),
    ("editPet", ["Edit Pet", "Haustier bearbeiten", "Editar mascota"]),
    ("updatePet", ["Update Pet", "Haustier aktualisieren", "Actualizar mascota"]),
    ("addPet", ["Add Pet", "Haustier hinzufügen", "Añadir mascota"]),
    ("birthDate", ["Birth Date", "Geburtsdatum", "Fecha de nacimiento"]),
    ("type", ["Type", "Typ", "Tipo"]),
    ("visits", ["Visits", "Besuche", "Visitas"]),
    ("visitDate", ["Visit Date", "Besuchsdatum", "Fecha de visita"]),
    ("date", ["Date", "Datum", "Fecha"]),
    ("description", ["Description", "Beschreibung", "Descripción"]),
    ("newVisit", ["New Visit", "Neuer Besuch", "Nueva visita"]),
    ("addVisit", ["Add Visit", "Besuch hinzufügen", "Añadir visita"]),
    ("previousVisits", ["Previous Visits", "Frühere Besuche", "Visitas anteriores"]),
    ("home", ["Home", "Startseite", "Inicio"]),
    ("error", ["Error", "Fehler", "Error"]),
    ("flash.ownerCreated", ["New Owner Created", "Neuer Besitzer angelegt", "Nuevo propietario creado"]),
    (
        "flash.ownerUpdated",
        ["Owner Values Updated", "Besitzerdaten aktualisiert", "Datos del propietario actualizados"],
    ),
    (
        "flash.petAdded",
        ["New Pet has been Added", "Neues Haustier wurde hinzugefügt", "Se ha añadido una nueva mascota"],
    ),
    (
        "flash.petEdited",
        [
            "Pet details has been edited",
            "Haustierdaten wurden bearbeitet",
            "Los datos de la mascota han sido editados",
        ],
    ),
    (
        "flash.visitBooked",
        ["Your visit has been booked", "Ihr Besuch wurde gebucht", "Su visita ha sido reservada"],
    ),
    (
        "flash.ownerCreateFailed",
        [
            "There was an error in creating the owner.",
            "Beim Anlegen des Besitzers ist ein Fehler aufgetreten.",
            "Hubo un error al crear el propietario.",
        ],
    ),
    (
        "flash.ownerUpdateFailed",
        [
            "There was an error in updating the owner.",
            "Beim Aktualisieren des Besitzers ist ein Fehler aufgetreten.",
            "Hubo un error al actualizar el propietario.",
        ],
    ),
    (
        "flash.ownerIdMismatch",
        [
            "Owner ID mismatch. Please try again.",
            "Besitzer-ID stimmt nicht überein. Bitte erneut versuchen.",
            "El ID del propietario no coincide. Inténtelo de nuevo.",
        ],
    ),
];

impl Locale {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Locale::En),
            "de" => Some(Locale::De),
            "es" => Some(Locale::Es),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
            Locale::Es => "es",
        }
    }

    fn column(&self) -> usize {
        match self {
            Locale::En => 0,
            Locale::De => 1,
            Locale::Es => 2,
        }
    }

    /// Translated message for `key`; unknown keys come back unchanged.
    pub fn message<'a>(&self, key: &'a str) -> &'a str {
        MESSAGES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, texts)| texts[self.column()])
            .unwrap_or(key)
    }

    /// The whole catalog for this locale, as handed to templates.
    pub fn messages(&self) -> BTreeMap<&'static str, &'static str> {
        MESSAGES
            .iter()
            .map(|(key, texts)| (*key, texts[self.column()]))
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LangQuery {
    lang: Option<String>,
}

/// Locale named by the `lang` query parameter, if it is a supported one.
fn requested_locale(query: Option<&str>) -> Option<Locale> {
    let query: LangQuery = serde_urlencoded::from_str(query?).ok()?;
    Locale::from_code(&query.lang?)
}

/// Resolves the request locale and makes it available as an extension.
pub async fn locale_middleware(cookies: Cookies, mut request: Request, next: Next) -> Response {
    let requested = requested_locale(request.uri().query());

    let locale = match requested {
        Some(locale) => {
            let mut cookie = Cookie::new(LANG_COOKIE, locale.code());
            cookie.set_path("/");
            cookie.set_http_only(true);
            cookies.add(cookie);
            locale
        }
        None => cookies
            .get(LANG_COOKIE)
            .and_then(|cookie| Locale::from_code(cookie.value()))
            .unwrap_or_default(),
    };

    request.extensions_mut().insert(locale);
    next.run(request).await
}
