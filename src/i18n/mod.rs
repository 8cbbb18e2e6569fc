//! Internationalization (i18n) module.
//!
//! Provides localized strings for the application UI and CLI output.
//! English is the default language; Spanish is available as an alternative.
//! The architecture supports adding more languages in the future.
//!
//! The two validation messages are NOT routed through here: their English
//! wording is part of the form contract and lives on `ValidationError`.

use std::sync::OnceLock;

static CURRENT_LANG: OnceLock<Lang> = OnceLock::new();

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// English (default)
    En,
    /// Spanish
    Es,
}

impl Lang {
    /// Parse a language code string (e.g. "en", "es", "en_US", "es_ES").
    /// Returns `None` for unrecognized codes.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.to_lowercase();
        let prefix = normalized.split(['_', '-']).next().unwrap_or("");
        match prefix {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Return the ISO 639-1 code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

/// Initialize the global language. Call once at startup.
/// If already initialized, this is a no-op.
pub fn set_lang(lang: Lang) {
    let _ = CURRENT_LANG.set(lang);
}

/// Get the currently configured language (defaults to English).
pub fn lang() -> Lang {
    CURRENT_LANG.get().copied().unwrap_or(Lang::En)
}

/// Detect language from the `LANG` / `LC_MESSAGES` environment variables.
pub fn detect_system_lang() -> Lang {
    std::env::var("CAPSULESHELL_LANG")
        .ok()
        .and_then(|v| Lang::from_code(&v))
        .or_else(|| {
            std::env::var("LC_MESSAGES")
                .ok()
                .and_then(|v| Lang::from_code(&v))
        })
        .or_else(|| std::env::var("LANG").ok().and_then(|v| Lang::from_code(&v)))
        .unwrap_or(Lang::En)
}

/// Macro for defining translatable message functions.
/// Each function returns a `&'static str` based on the current language.
macro_rules! msg {
    ($name:ident, $en:expr, $es:expr) => {
        /// Returns a localized string for the current language.
        pub fn $name() -> &'static str {
            match lang() {
                Lang::En => $en,
                Lang::Es => $es,
            }
        }
    };
}

// ── General ──────────────────────────────────────────────────────

msg!(app_name, "capsuleShell", "capsuleShell");
msg!(
    app_about,
    "capsuleShell \u{2014} Terminal time capsule. Write a letter to your future self, attach memories and seal it for delivery on a future date.",
    "capsuleShell \u{2014} C\u{e1}psula del tiempo en la terminal. Escribe una carta a tu yo del futuro, adjunta recuerdos y s\u{e9}llala para una fecha futura."
);
msg!(
    app_long_about,
    "capsuleShell \u{2014} Terminal time capsule.\nWrite a letter to your future self, attach memories and seal it\nfor delivery on a future date. Built in Rust.",
    "capsuleShell \u{2014} C\u{e1}psula del tiempo en la terminal.\nEscribe una carta a tu yo del futuro, adjunta recuerdos y s\u{e9}llala\npara una fecha futura. Escrito en Rust."
);
msg!(
    app_after_help,
    "Run without a subcommand to open the compose screen.",
    "Ejecuta sin subcomando para abrir la pantalla de redacci\u{f3}n."
);

// ── CLI help strings ─────────────────────────────────────────────

msg!(
    help_verbose,
    "Verbose logging (-v info, -vv debug, -vvv trace)",
    "Registro detallado (-v info, -vv debug, -vvv trace)"
);
msg!(
    help_lang,
    "Language (en, es). Defaults to system locale",
    "Idioma (en, es). Por defecto usa el idioma del sistema"
);
msg!(
    help_cmd_open,
    "Open the compose screen in the TUI (default if no subcommand given)",
    "Abrir la pantalla de redacci\u{f3}n en la TUI (por defecto si no se da subcomando)"
);
msg!(
    help_cmd_seal,
    "Compose and seal a capsule without the TUI",
    "Redactar y sellar una c\u{e1}psula sin la TUI"
);
msg!(
    help_cmd_embed,
    "Print the HTML snippet that embeds the capsule page",
    "Imprimir el fragmento HTML que incrusta la p\u{e1}gina de la c\u{e1}psula"
);
msg!(
    help_cmd_completions,
    "Generate shell completions",
    "Generar autocompletado para la shell"
);
msg!(
    help_cmd_manpage,
    "Generate a man page",
    "Generar una p\u{e1}gina de manual"
);

// ── TUI: compose screen ──────────────────────────────────────────

msg!(tui_tagline, "A message to your future self awaits.", "Un mensaje a tu yo del futuro te espera.");
msg!(tui_label_email, "Your Future Email Address", "Tu direcci\u{f3}n de correo del futuro");
msg!(tui_label_letter, "Letter to Your Future Self", "Carta a tu yo del futuro");
msg!(tui_label_date, "Delivery Date", "Fecha de entrega");
msg!(tui_label_attachments, "Your Memories", "Tus recuerdos");
msg!(tui_email_placeholder, "future.you@example.com", "tu.futuro@example.com");
msg!(tui_letter_placeholder, "Dear Future Me...", "Querido yo del futuro...");
msg!(tui_date_min_hint, "earliest", "como pronto");
msg!(tui_no_attachments, "No memories attached yet. Press 'a' to add one.", "A\u{fa}n no hay recuerdos adjuntos. Pulsa 'a' para a\u{f1}adir uno.");
msg!(tui_sealing, "Sealing\u{2026}", "Sellando\u{2026}");

// ── TUI: sealed screen ───────────────────────────────────────────

msg!(tui_sealed_title, "Capsule Sealed!", "\u{a1}C\u{e1}psula sellada!");
msg!(
    tui_sealed_stored,
    "Your message to the future is now safely stored.",
    "Tu mensaje al futuro est\u{e1} guardado a salvo."
);
msg!(tui_sealed_send_to, "We will send it to", "Lo enviaremos a");
msg!(tui_sealed_on, "on", "el");
msg!(tui_sealed_bye, "See you in the future!", "\u{a1}Nos vemos en el futuro!");
msg!(
    tui_sealed_hints,
    "n: create another \u{2022} e: embed snippet \u{2022} q: quit",
    "n: crear otra \u{2022} e: fragmento para incrustar \u{2022} q: salir"
);

// ── TUI: popups ──────────────────────────────────────────────────

msg!(tui_help_title, " Help ", " Ayuda ");
msg!(tui_attach_title, " Attach a memory ", " Adjuntar un recuerdo ");
msg!(
    tui_attach_prompt,
    "Path to a file (Enter to attach, Esc to cancel):",
    "Ruta de un fichero (Enter adjunta, Esc cancela):"
);
msg!(tui_embed_title, " Embed on your site ", " Incrustar en tu web ");
msg!(
    tui_embed_hint,
    "Copy this snippet into your website's HTML. Esc closes.",
    "Copia este fragmento en el HTML de tu web. Esc cierra."
);

// ── TUI: attachment table ────────────────────────────────────────

msg!(tui_col_filename, "Filename", "Fichero");
msg!(tui_col_type, "Type", "Tipo");
msg!(tui_col_size, "Size", "Tama\u{f1}o");
msg!(tui_col_preview, "Preview", "Vista previa");

// ── TUI: status messages ─────────────────────────────────────────

msg!(status_attached, "Attached", "Adjuntado");
msg!(status_removed, "Removed", "Eliminado");
msg!(status_new_capsule, "Started a new capsule", "Nueva c\u{e1}psula iniciada");

// ── TUI: key hints ───────────────────────────────────────────────

msg!(tui_hint_next_field, "next field", "siguiente campo");
msg!(tui_hint_advance, "next / seal", "siguiente / sellar");
msg!(tui_hint_seal, "seal the capsule", "sellar la c\u{e1}psula");
msg!(tui_hint_newline, "new line", "nueva l\u{ed}nea");
msg!(tui_hint_nav, "navigate", "navegar");
msg!(tui_hint_attach, "attach a file", "adjuntar un fichero");
msg!(tui_hint_remove, "remove", "eliminar");
msg!(tui_hint_help, "help", "ayuda");
msg!(tui_hint_embed, "embed snippet", "fragmento para incrustar");
msg!(tui_hint_another, "create another", "crear otra");
msg!(tui_hint_quit, "quit", "salir");

// ── Headless seal command ────────────────────────────────────────

msg!(seal_spinner, "Sealing the capsule\u{2026}", "Sellando la c\u{e1}psula\u{2026}");
msg!(seal_done_prefix, "Capsule sealed! We will send it to", "\u{a1}C\u{e1}psula sellada! Lo enviaremos a");
msg!(seal_done_on, "on", "el");
msg!(
    seal_waiting_previews,
    "Preparing attachment previews\u{2026}",
    "Preparando vistas previas de los adjuntos\u{2026}"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_from_code() {
        assert_eq!(Lang::from_code("en"), Some(Lang::En));
        assert_eq!(Lang::from_code("es_ES"), Some(Lang::Es));
        assert_eq!(Lang::from_code("en-US"), Some(Lang::En));
        assert_eq!(Lang::from_code("fr"), None);
        assert_eq!(Lang::from_code(""), None);
    }

    #[test]
    fn test_lang_code_roundtrip() {
        assert_eq!(Lang::from_code(Lang::En.code()), Some(Lang::En));
        assert_eq!(Lang::from_code(Lang::Es.code()), Some(Lang::Es));
    }
}
