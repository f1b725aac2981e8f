//! Internationalization (i18n) module.
//!
//! Provides localized strings for the application UI and CLI output.
//! English is the default language; Simplified Chinese is available as an
//! alternative, matching the backend's own messages.

use std::sync::OnceLock;

static CURRENT_LANG: OnceLock<Lang> = OnceLock::new();

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// English (default)
    En,
    /// Simplified Chinese
    Zh,
}

impl Lang {
    /// Parse a language code string (e.g. "en", "zh", "en_US", "zh_CN.UTF-8").
    /// Returns `None` for unrecognized codes.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.to_lowercase();
        let prefix = normalized.split(['_', '-', '.']).next().unwrap_or("");
        match prefix {
            "en" => Some(Self::En),
            "zh" => Some(Self::Zh),
            _ => None,
        }
    }

    /// Return the ISO 639-1 code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
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

/// Detect language from `MAILQUERY_LANG`, then `LC_MESSAGES` / `LANG`.
pub fn detect_system_lang() -> Lang {
    std::env::var("MAILQUERY_LANG")
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
    ($name:ident, $en:expr, $zh:expr) => {
        /// Returns a localized string for the current language.
        pub fn $name() -> &'static str {
            match lang() {
                Lang::En => $en,
                Lang::Zh => $zh,
            }
        }
    };
}

// ── General ──────────────────────────────────────────────────────

msg!(app_name, "mailquery", "mailquery");
msg!(
    app_about,
    "Check a mailbox from the terminal. Log in with email and password, then browse, read and sync.",
    "\u{5728}\u{7ec8}\u{7aef}\u{4e2d}\u{67e5}\u{8be2}\u{90ae}\u{4ef6}\u{ff1a}\u{4f7f}\u{7528}\u{90ae}\u{7bb1}\u{548c}\u{5bc6}\u{7801}\u{767b}\u{5f55}\u{ff0c}\u{6d4f}\u{89c8}\u{3001}\u{9605}\u{8bfb}\u{5e76}\u{540c}\u{6b65}\u{90ae}\u{4ef6}\u{3002}"
);

// ── CLI help strings ─────────────────────────────────────────────

msg!(
    help_cmd_open,
    "Open the interactive mailbox (default if no subcommand given)",
    "\u{6253}\u{5f00}\u{4ea4}\u{4e92}\u{5f0f}\u{90ae}\u{7bb1}\u{ff08}\u{672a}\u{6307}\u{5b9a}\u{5b50}\u{547d}\u{4ee4}\u{65f6}\u{9ed8}\u{8ba4}\u{ff09}"
);
msg!(
    help_cmd_list,
    "List one page of emails using saved credentials",
    "\u{4f7f}\u{7528}\u{5df2}\u{4fdd}\u{5b58}\u{7684}\u{51ed}\u{636e}\u{5217}\u{51fa}\u{4e00}\u{9875}\u{90ae}\u{4ef6}"
);
msg!(
    help_cmd_show,
    "Show a single email",
    "\u{663e}\u{793a}\u{5355}\u{5c01}\u{90ae}\u{4ef6}"
);
msg!(
    help_cmd_logout,
    "Forget saved credentials",
    "\u{6e05}\u{9664}\u{5df2}\u{4fdd}\u{5b58}\u{7684}\u{51ed}\u{636e}"
);
msg!(
    help_cmd_completions,
    "Generate shell completions",
    "\u{751f}\u{6210} shell \u{8865}\u{5168}\u{811a}\u{672c}"
);
msg!(
    help_cmd_manpage,
    "Generate a man page",
    "\u{751f}\u{6210} man \u{624b}\u{518c}"
);

// ── Errors ───────────────────────────────────────────────────────

msg!(
    err_network,
    "Network error, please try again later",
    "\u{7f51}\u{7edc}\u{9519}\u{8bef}\u{ff0c}\u{8bf7}\u{7a0d}\u{540e}\u{91cd}\u{8bd5}"
);
msg!(
    err_invalid_credentials,
    "Invalid email or password",
    "\u{90ae}\u{7bb1}\u{6216}\u{5bc6}\u{7801}\u{9519}\u{8bef}"
);
msg!(
    err_load_list,
    "Failed to load emails",
    "\u{52a0}\u{8f7d}\u{90ae}\u{4ef6}\u{5931}\u{8d25}"
);
msg!(
    err_load_detail,
    "Failed to load email detail",
    "\u{52a0}\u{8f7d}\u{90ae}\u{4ef6}\u{8be6}\u{60c5}\u{5931}\u{8d25}"
);
msg!(
    err_missing_fields,
    "Please enter email and password",
    "\u{8bf7}\u{8f93}\u{5165}\u{90ae}\u{7bb1}\u{548c}\u{5bc6}\u{7801}"
);
msg!(
    err_no_saved_credentials,
    "No saved credentials. Log in from the interactive view first.",
    "\u{6ca1}\u{6709}\u{5df2}\u{4fdd}\u{5b58}\u{7684}\u{51ed}\u{636e}\u{ff0c}\u{8bf7}\u{5148}\u{5728}\u{4ea4}\u{4e92}\u{754c}\u{9762}\u{4e2d}\u{767b}\u{5f55}\u{3002}"
);

// ── Status messages ──────────────────────────────────────────────

msg!(
    msg_auto_login,
    "Logging in automatically...",
    "\u{6b63}\u{5728}\u{81ea}\u{52a8}\u{767b}\u{5f55}..."
);
msg!(msg_verifying, "Verifying...", "\u{9a8c}\u{8bc1}\u{4e2d}...");
msg!(
    msg_loading_emails,
    "Loading emails...",
    "\u{6b63}\u{5728}\u{52a0}\u{8f7d}\u{90ae}\u{4ef6}..."
);
msg!(msg_syncing, "Syncing...", "\u{540c}\u{6b65}\u{4e2d}...");
msg!(msg_no_emails, "No emails", "\u{6682}\u{65e0}\u{90ae}\u{4ef6}");
msg!(msg_logged_out, "Logged out", "\u{5df2}\u{9000}\u{51fa}");

// ── TUI labels ───────────────────────────────────────────────────

msg!(tui_login_title, " Mail Query ", " \u{90ae}\u{4ef6}\u{67e5}\u{8be2} ");
msg!(
    tui_login_subtitle,
    "Enter your email and password to view mail",
    "\u{8f93}\u{5165}\u{90ae}\u{7bb1}\u{548c}\u{5bc6}\u{7801}\u{67e5}\u{770b}\u{90ae}\u{4ef6}"
);
msg!(tui_login_email, "Email address", "\u{90ae}\u{7bb1}\u{5730}\u{5740}");
msg!(tui_login_password, "Password", "\u{90ae}\u{7bb1}\u{5bc6}\u{7801}");
msg!(tui_login_submit, "[ View mail ]", "[ \u{67e5}\u{770b}\u{90ae}\u{4ef6} ]");
msg!(tui_messages_title, " Inbox ", " \u{6536}\u{4ef6}\u{7bb1} ");
msg!(tui_detail_title, " Message ", " \u{90ae}\u{4ef6} ");
msg!(tui_help_title, " Help ", " \u{5e2e}\u{52a9} ");
msg!(tui_no_subject, "(no subject)", "(\u{65e0}\u{4e3b}\u{9898})");
msg!(
    tui_unknown_sender,
    "Unknown sender",
    "\u{672a}\u{77e5}\u{53d1}\u{4ef6}\u{4eba}"
);
msg!(
    tui_empty_body,
    "(empty message)",
    "\u{90ae}\u{4ef6}\u{5185}\u{5bb9}\u{4e3a}\u{7a7a}"
);
msg!(tui_loading, "Loading...", "\u{52a0}\u{8f7d}\u{4e2d}...");
msg!(tui_header_from, "From: ", "\u{53d1}\u{4ef6}\u{4eba}\u{ff1a}");
msg!(tui_header_to, "To: ", "\u{6536}\u{4ef6}\u{4eba}\u{ff1a}");
msg!(tui_header_date, "Date: ", "\u{65f6}\u{95f4}\u{ff1a}");
msg!(tui_help_hint, " [?] Help ", " [?] \u{5e2e}\u{52a9} ");

// ── TUI key hints ────────────────────────────────────────────────

msg!(tui_hint_nav, "navigate", "\u{79fb}\u{52a8}");
msg!(tui_hint_open, "open", "\u{6253}\u{5f00}");
msg!(tui_hint_close, "close", "\u{5173}\u{95ed}");
msg!(tui_hint_page, "page", "\u{7ffb}\u{9875}");
msg!(tui_hint_sync, "sync", "\u{540c}\u{6b65}");
msg!(tui_hint_refresh, "refresh", "\u{5237}\u{65b0}");
msg!(tui_hint_logout, "logout", "\u{9000}\u{51fa}\u{767b}\u{5f55}");
msg!(tui_hint_scroll, "scroll", "\u{6eda}\u{52a8}");
msg!(tui_hint_field, "next field", "\u{5207}\u{6362}\u{8f93}\u{5165}\u{6846}");
msg!(tui_hint_submit, "submit", "\u{63d0}\u{4ea4}");
msg!(tui_hint_dismiss, "dismiss", "\u{5173}\u{95ed}\u{63d0}\u{793a}");
msg!(tui_hint_help, "help", "\u{5e2e}\u{52a9}");
msg!(tui_hint_quit, "quit", "\u{9000}\u{51fa}");

// ── Parameterized strings ────────────────────────────────────────

/// "42 emails" / "共 42 封邮件".
pub fn total_emails(total: u64) -> String {
    match lang() {
        Lang::En => format!("{total} emails"),
        Lang::Zh => format!("\u{5171} {total} \u{5c01}\u{90ae}\u{4ef6}"),
    }
}

/// "Page 2 / 3" / "第 2 / 3 页".
pub fn page_indicator(current: u32, total: u32) -> String {
    match lang() {
        Lang::En => format!("Page {current} / {total}"),
        Lang::Zh => format!("\u{7b2c} {current} / {total} \u{9875}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_from_code() {
        assert_eq!(Lang::from_code("en"), Some(Lang::En));
        assert_eq!(Lang::from_code("zh"), Some(Lang::Zh));
        assert_eq!(Lang::from_code("en_US"), Some(Lang::En));
        assert_eq!(Lang::from_code("zh_CN.UTF-8"), Some(Lang::Zh));
        assert_eq!(Lang::from_code("zh-TW"), Some(Lang::Zh));
        assert_eq!(Lang::from_code("fr"), None);
    }

    #[test]
    fn test_lang_code_roundtrip() {
        assert_eq!(Lang::from_code(Lang::En.code()), Some(Lang::En));
        assert_eq!(Lang::from_code(Lang::Zh.code()), Some(Lang::Zh));
    }

    #[test]
    fn test_messages_return_strings() {
        assert!(!app_name().is_empty());
        assert!(!err_network().is_empty());
        assert!(!err_invalid_credentials().is_empty());
        assert!(page_indicator(1, 3).contains('3'));
        assert!(total_emails(42).contains("42"));
    }
}
