//! User-facing message strings for the signup flow, Spanish and English.
//! Everything the flow can say to a player goes through here so the locale
//! toggle reaches every message.

use liga_api::Locale;

fn pick(locale: Locale, es: &'static str, en: &'static str) -> &'static str {
    match locale {
        Locale::Es => es,
        Locale::En => en,
    }
}

pub fn required_name(l: Locale) -> &'static str {
    pick(l, "El nombre es obligatorio", "Name is required")
}

pub fn invalid_email(l: Locale) -> &'static str {
    pick(l, "Introduce un email válido", "Enter a valid email address")
}

pub fn invalid_whatsapp(l: Locale) -> &'static str {
    pick(l, "Introduce un número de WhatsApp válido", "Enter a valid WhatsApp number")
}

pub fn required_level(l: Locale) -> &'static str {
    pick(l, "Elige tu nivel de juego", "Choose your playing level")
}

pub fn required_password(l: Locale) -> &'static str {
    pick(l, "La contraseña es obligatoria", "Password is required")
}

pub fn incorrect_credentials(l: Locale) -> &'static str {
    pick(l, "Email o contraseña incorrectos", "Incorrect email or password")
}

pub fn profile_fetch_failed(l: Locale) -> &'static str {
    pick(
        l,
        "No pudimos cargar tu perfil, inténtalo de nuevo",
        "We could not load your profile, please try again",
    )
}

pub fn email_already_registered(l: Locale) -> &'static str {
    pick(l, "Este email ya está registrado", "This email is already registered")
}

pub fn already_in_league(l: Locale) -> &'static str {
    pick(
        l,
        "Ya estás inscrito en esta liga. Encuéntrala en tu panel de jugador.",
        "You are already registered in this league. Find it in your player dashboard.",
    )
}

pub fn something_went_wrong(l: Locale) -> &'static str {
    pick(l, "Algo ha salido mal, inténtalo de nuevo", "Something went wrong, please try again")
}

pub fn connection_error(l: Locale) -> &'static str {
    pick(
        l,
        "Error de conexión, comprueba tu red e inténtalo de nuevo",
        "Connection error, check your network and try again",
    )
}

pub fn league_not_found(l: Locale) -> &'static str {
    pick(l, "No hemos encontrado esa liga", "We could not find that league")
}

pub fn share_message(l: Locale) -> &'static str {
    pick(
        l,
        "¡Apúntate conmigo a la liga de tenis!",
        "Join me in the tennis league!",
    )
}

pub fn registration_confirmed(l: Locale) -> &'static str {
    pick(l, "¡Inscripción confirmada!", "Registration confirmed!")
}

pub fn dashboard_hint(l: Locale) -> &'static str {
    pick(
        l,
        "Sigue tu liga desde el panel de jugador",
        "Follow your league from the player dashboard",
    )
}
